use crate::figure::Figure;
use crate::ui::camera::Camera;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full interactive-viewer state, independent of rendering.
pub struct ViewerState {
    /// The figure being shown; series visibility here is the initial one.
    pub figure: Figure,

    /// Current visibility of each series, same order as `figure.series`.
    pub visible: Vec<bool>,

    /// Orbit camera for the 3D projection.
    pub camera: Camera,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(figure: Figure) -> Self {
        let visible = figure.series.iter().map(|s| s.visible).collect();
        let camera = Camera::from_eye(figure.layout.eye);
        Self {
            figure,
            visible,
            camera,
            status_message: None,
        }
    }

    /// "All" button.
    pub fn show_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    /// Per-model button: show only series `index`.
    pub fn show_only(&mut self, index: usize) {
        for (i, v) in self.visible.iter_mut().enumerate() {
            *v = i == index;
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Number of series currently shown.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Reset the camera to the figure's default eye.
    pub fn reset_camera(&mut self) {
        self.camera = Camera::from_eye(self.figure.layout.eye);
    }

    /// The figure with the current visibility applied, for exporting.
    pub fn export_figure(&self) -> Figure {
        let mut figure = self.figure.clone();
        for (series, &visible) in figure.series.iter_mut().zip(&self.visible) {
            series.visible = visible;
        }
        figure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::data::Series;
    use crate::figure::build_figure;

    fn state(models: &[&str]) -> ViewerState {
        let series = models
            .iter()
            .map(|m| Series {
                name: m.to_string(),
                malicious: vec![0.0],
                dataset_len: vec![0.5],
                mcc: vec![0.8],
                color: Rgb(1, 2, 3),
                visible: true,
            })
            .collect();
        ViewerState::new(build_figure(series, false, None))
    }

    #[test]
    fn show_only_then_all() {
        let mut s = state(&["A", "B", "C"]);
        s.show_only(1);
        assert_eq!(s.visible, vec![false, true, false]);
        assert_eq!(s.visible_count(), 1);

        s.show_all();
        assert_eq!(s.visible_count(), 3);
    }

    #[test]
    fn export_carries_visibility() {
        let mut s = state(&["A", "B"]);
        s.show_only(0);
        let fig = s.export_figure();
        assert!(fig.series[0].visible);
        assert!(!fig.series[1].visible);
        // the original figure is untouched
        assert!(s.figure.series[1].visible);
    }

    #[test]
    fn reset_camera_restores_default_view() {
        let mut s = state(&["A"]);
        let initial = s.camera;
        s.camera.rotate(30.0, -12.0);
        assert_ne!(s.camera, initial);
        s.reset_camera();
        assert_eq!(s.camera, initial);
    }
}
