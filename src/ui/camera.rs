use crate::figure::SceneLayout;

/// Orthographic orbit camera around the centre of the unit scene cube, z up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation around the vertical axis, radians.
    pub yaw: f64,
    /// Elevation above the floor, radians.
    pub pitch: f64,
}

const PITCH_LIMIT: f64 = 1.5;
const RADIANS_PER_PIXEL: f64 = 0.01;

impl Camera {
    /// Camera looking from `eye` towards the origin.
    pub fn from_eye(eye: (f64, f64, f64)) -> Self {
        let (x, y, z) = eye;
        Camera {
            yaw: y.atan2(x),
            pitch: z.atan2(x.hypot(y)),
        }
    }

    /// Orbit by a mouse drag, in screen pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx as f64 * RADIANS_PER_PIXEL;
        self.pitch = (self.pitch + dy as f64 * RADIANS_PER_PIXEL).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Project a point of the unit cube (centred on the origin) onto the screen plane.
    pub fn project(&self, p: [f64; 3]) -> [f64; 2] {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let right = -sy * p[0] + cy * p[1];
        let up = -sp * cy * p[0] - sp * sy * p[1] + cp * p[2];
        [right, up]
    }

    /// Map a scene point into the layout's unit cube, then project it.
    pub fn project_scene(&self, layout: &SceneLayout, p: (f64, f64, f64)) -> [f64; 2] {
        self.project(normalize(layout, p))
    }
}

/// Scale each axis range onto `[-0.5, 0.5]` (cube aspect).
pub fn normalize(layout: &SceneLayout, p: (f64, f64, f64)) -> [f64; 3] {
    let unit = |v: f64, (lo, hi): (f64, f64)| {
        if hi > lo {
            (v - lo) / (hi - lo) - 0.5
        } else {
            0.0
        }
    };
    [
        unit(p.0, layout.x.range),
        unit(p.1, layout.y.range),
        unit(p.2, layout.z.range),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn eye_direction_projects_to_centre() {
        let cam = Camera::from_eye((1.0, 2.0, 0.4));
        let n = (1.0f64 + 4.0 + 0.16).sqrt();
        assert!(close(cam.project([1.0 / n, 2.0 / n, 0.4 / n]), [0.0, 0.0]));
    }

    #[test]
    fn vertical_axis_points_up() {
        let cam = Camera::from_eye((1.0, 2.0, 0.4));
        let [x, y] = cam.project([0.0, 0.0, 1.0]);
        assert!(x.abs() < 1e-9);
        assert!(y > 0.9);
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut cam = Camera::from_eye((1.0, 0.0, 0.0));
        cam.rotate(0.0, 10_000.0);
        assert_eq!(cam.pitch, PITCH_LIMIT);
        cam.rotate(100.0, 0.0);
        assert!((cam.yaw + 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_maps_ranges_to_unit_cube() {
        let layout = SceneLayout::fractions();
        let p = normalize(&layout, (-0.1, 1.1, 1.0));
        assert!(close([p[0], p[1]], [-0.5, 0.5]));
        assert!((p[2] - 0.5).abs() < 1e-9);
    }
}
