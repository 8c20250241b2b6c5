//! Figure assembly: series, decorative reference surfaces and scene layout.

use crate::color::{Rgb, SURFACE_COLOR};
use crate::data::Series;

/// MCC height of the reference plane drawn when several models are compared.
pub const BASELINE_MCC: f64 = 0.7;

/// Vertical extent of the breaking-point walls.
const WALL_MCC: (f64, f64) = (-0.1, BASELINE_MCC);

/// Grid resolution of the decorative surfaces.
const SURFACE_STEPS: usize = 25;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A decorative grid surface, laid out the way plotly expects it:
/// `z[j][i]` is the height at `(x[i], y[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    pub color: Rgb,
    pub opacity: f64,
}

impl Surface {
    /// Point `(x, y, z)` of grid cell corner `(i, j)`.
    pub fn vertex(&self, i: usize, j: usize) -> (f64, f64, f64) {
        (self.x[i], self.y[j], self.z[j][i])
    }

    /// Quadrilateral cells of the grid, corners in drawing order.
    pub fn quads(&self) -> Vec<[(f64, f64, f64); 4]> {
        let (nx, ny) = (self.x.len(), self.y.len());
        let mut quads = Vec::with_capacity(nx.saturating_sub(1) * ny.saturating_sub(1));
        for j in 1..ny {
            for i in 1..nx {
                quads.push([
                    self.vertex(i - 1, j - 1),
                    self.vertex(i, j - 1),
                    self.vertex(i, j),
                    self.vertex(i - 1, j),
                ]);
            }
        }
        quads
    }

    /// Outline of the surface plus its inner grid lines, for wireframe drawing.
    pub fn grid_lines(&self, every: usize) -> Vec<Vec<(f64, f64, f64)>> {
        let (nx, ny) = (self.x.len(), self.y.len());
        let every = every.max(1);
        let mut lines = Vec::new();
        for j in (0..ny).filter(|j| j % every == 0 || *j + 1 == ny) {
            lines.push((0..nx).map(|i| self.vertex(i, j)).collect());
        }
        for i in (0..nx).filter(|i| i % every == 0 || *i + 1 == nx) {
            lines.push((0..ny).map(|j| self.vertex(i, j)).collect());
        }
        lines
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start; n];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|k| if k + 1 == n { end } else { start + step * k as f64 })
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub title: String,
    pub range: (f64, f64),
    /// Tick spacing; `None` lets the renderer decide.
    pub dtick: Option<f64>,
}

/// Axes, camera and size of the 3D scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// Malicious participants.
    pub x: AxisSpec,
    /// Training-dataset size.
    pub y: AxisSpec,
    /// MCC.
    pub z: AxisSpec,
    /// Camera position, looking at the origin with z up.
    pub eye: (f64, f64, f64),
    pub width: u32,
    pub height: u32,
}

impl SceneLayout {
    /// Fixed ranges for parameters normalised to fractions.
    pub fn fractions() -> Self {
        SceneLayout {
            x: AxisSpec {
                title: "% of malicious users".into(),
                range: (-0.1, 1.1),
                dtick: Some(0.2),
            },
            y: AxisSpec {
                title: "% of training examples".into(),
                range: (0.2, 1.1),
                dtick: Some(0.2),
            },
            z: AxisSpec {
                title: "MCC".into(),
                range: (-0.1, 1.0),
                dtick: Some(0.2),
            },
            eye: (1.0, 2.0, 0.4),
            width: 600,
            height: 550,
        }
    }

    /// Ranges fitted around raw counts with 5% padding.
    pub fn fitted(series: &[Series]) -> Self {
        let pad = |(lo, hi): (f64, f64)| {
            let span = if hi > lo { hi - lo } else { 1.0 };
            (lo - span * 0.05, hi + span * 0.05)
        };

        let x = bounds(series.iter().flat_map(|s| s.malicious.iter().copied()))
            .map(pad)
            .unwrap_or((0.0, 1.0));
        let y = bounds(series.iter().flat_map(|s| s.dataset_len.iter().copied()))
            .map(pad)
            .unwrap_or((0.0, 1.0));
        let z = bounds(series.iter().flat_map(|s| s.mcc.iter().copied()))
            .map(|(lo, hi)| (lo.min(-0.1), hi.max(1.0)))
            .unwrap_or((-0.1, 1.0));

        let mut layout = SceneLayout::fractions();
        layout.x = AxisSpec {
            title: "malicious users".into(),
            range: x,
            dtick: None,
        };
        layout.y = AxisSpec {
            title: "training examples".into(),
            range: y,
            dtick: None,
        };
        layout.z.range = z;
        layout
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// Everything a renderer needs.
#[derive(Debug, Clone)]
pub struct Figure {
    pub series: Vec<Series>,
    pub surfaces: Vec<Surface>,
    pub layout: SceneLayout,
}

/// Breaking-point coordinates, in the same units as the plotted axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakingPoint {
    pub malicious: f64,
    pub dataset_len: f64,
}

/// Flat plane at [`BASELINE_MCC`] covering the whole floor of the scene.
pub fn reference_plane(layout: &SceneLayout) -> Surface {
    let x = linspace(layout.x.range.0, layout.x.range.1, SURFACE_STEPS);
    let y = linspace(layout.y.range.0, layout.y.range.1, SURFACE_STEPS);
    let z = vec![vec![BASELINE_MCC; x.len()]; y.len()];
    Surface {
        x,
        y,
        z,
        color: SURFACE_COLOR,
        opacity: 0.8,
    }
}

/// Two vertical walls enclosing the region past the breaking point.
pub fn breaking_point_walls(layout: &SceneLayout, bp: BreakingPoint) -> [Surface; 2] {
    let n = SURFACE_STEPS;
    let heights = linspace(WALL_MCC.0, WALL_MCC.1, n);

    // Wall at dataset_len = bp.dataset_len, spanning malicious ∈ [bp, max].
    let along_x = Surface {
        x: linspace(bp.malicious, layout.x.range.1, n),
        y: vec![bp.dataset_len; n],
        z: heights.iter().map(|&h| vec![h; n]).collect(),
        color: SURFACE_COLOR,
        opacity: 1.0,
    };

    // Wall at malicious = bp.malicious, spanning dataset_len ∈ [bp, max].
    let along_y = Surface {
        x: vec![bp.malicious; n],
        y: linspace(bp.dataset_len, layout.y.range.1, n),
        z: vec![heights.clone(); n],
        color: SURFACE_COLOR,
        opacity: 1.0,
    };

    [along_x, along_y]
}

/// Assemble the figure: several models get the baseline plane, a single model
/// with a breaking point gets the two walls, anything else gets no surface.
pub fn build_figure(series: Vec<Series>, raw: bool, breaking_point: Option<BreakingPoint>) -> Figure {
    let layout = if raw {
        SceneLayout::fitted(&series)
    } else {
        SceneLayout::fractions()
    };

    let surfaces = if series.len() > 1 {
        vec![reference_plane(&layout)]
    } else if let Some(bp) = breaking_point {
        breaking_point_walls(&layout, bp).to_vec()
    } else {
        Vec::new()
    };

    Figure {
        series,
        surfaces,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, points: &[(f64, f64, f64)]) -> Series {
        Series {
            name: name.into(),
            malicious: points.iter().map(|p| p.0).collect(),
            dataset_len: points.iter().map(|p| p.1).collect(),
            mcc: points.iter().map(|p| p.2).collect(),
            color: Rgb(0, 0, 0),
            visible: true,
        }
    }

    #[test]
    fn several_models_get_baseline_plane() {
        let fig = build_figure(
            vec![series("A", &[(0.0, 0.5, 0.9)]), series("B", &[(0.1, 0.5, 0.8)])],
            false,
            Some(BreakingPoint { malicious: 0.3, dataset_len: 0.5 }),
        );
        assert_eq!(fig.surfaces.len(), 1);
        let plane = &fig.surfaces[0];
        assert!(plane.z.iter().flatten().all(|&z| z == BASELINE_MCC));
        assert_eq!(plane.x.first(), Some(&-0.1));
        assert_eq!(plane.y.last(), Some(&1.1));
    }

    #[test]
    fn single_model_with_breaking_point_gets_walls() {
        let bp = BreakingPoint { malicious: 0.4, dataset_len: 0.6 };
        let fig = build_figure(vec![series("A", &[(0.0, 0.5, 0.9)])], false, Some(bp));
        assert_eq!(fig.surfaces.len(), 2);

        let wall = &fig.surfaces[0];
        assert!(wall.y.iter().all(|&y| y == 0.6));
        assert_eq!(wall.x.first(), Some(&0.4));
        assert_eq!(wall.vertex(0, 0).2, -0.1);
        assert_eq!(wall.vertex(0, SURFACE_STEPS - 1).2, BASELINE_MCC);

        let wall = &fig.surfaces[1];
        assert!(wall.x.iter().all(|&x| x == 0.4));
        assert_eq!(wall.y.first(), Some(&0.6));
    }

    #[test]
    fn single_model_without_breaking_point_has_no_surface() {
        let fig = build_figure(vec![series("A", &[(0.0, 0.5, 0.9)])], false, None);
        assert!(fig.surfaces.is_empty());
    }

    #[test]
    fn fitted_layout_pads_raw_ranges() {
        let layout = SceneLayout::fitted(&[series("A", &[(0.0, 1000.0, 0.5), (10.0, 3000.0, 0.7)])]);
        assert_eq!(layout.x.range, (-0.5, 10.5));
        assert_eq!(layout.y.range, (900.0, 3100.0));
        assert_eq!(layout.z.range, (-0.1, 1.0));
        assert_eq!(layout.x.dtick, None);
    }

    #[test]
    fn quads_cover_the_grid() {
        let layout = SceneLayout::fractions();
        let plane = reference_plane(&layout);
        assert_eq!(plane.quads().len(), (SURFACE_STEPS - 1) * (SURFACE_STEPS - 1));
        // every 6th line plus the closing edge, both directions
        assert_eq!(plane.grid_lines(6).len(), 2 * 5);
    }
}
