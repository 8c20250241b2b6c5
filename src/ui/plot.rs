use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::Rgb;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// 3D scene plot (central panel)
// ---------------------------------------------------------------------------

/// Corners of the unit scene cube.
const CUBE: [[f64; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

#[rustfmt::skip]
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Render the projected 3D scatter.  Dragging orbits the camera.
pub fn scene_plot(ui: &mut Ui, state: &mut ViewerState) {
    let camera = state.camera;
    let figure = &state.figure;
    let layout = &figure.layout;
    let visible = &state.visible;

    let response = Plot::new("scene_plot")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_scroll(false)
        .allow_zoom(true)
        .include_x(-0.9)
        .include_x(0.9)
        .include_y(-0.9)
        .include_y(0.9)
        .show(ui, |plot_ui| {
            // ---- Scene box ----
            for &(a, b) in &CUBE_EDGES {
                let points: PlotPoints = vec![camera.project(CUBE[a]), camera.project(CUBE[b])].into();
                plot_ui.line(Line::new(points).color(Color32::from_gray(170)).width(1.0));
            }

            // ---- Axis titles at the far end of each floor edge ----
            let titles = [
                ([0.6, -0.5, -0.5], &layout.x.title),
                ([-0.5, 0.6, -0.5], &layout.y.title),
                ([-0.5, -0.5, 0.6], &layout.z.title),
            ];
            for (at, title) in titles {
                let [x, y] = camera.project(at);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(title.as_str()).small(),
                ));
            }

            // ---- Decorative surfaces as wireframes ----
            for surface in &figure.surfaces {
                let c = surface.color;
                let alpha = (surface.opacity * 160.0) as u8;
                let stroke = Color32::from_rgba_unmultiplied(c.0, c.1, c.2, alpha);
                for line in surface.grid_lines(4) {
                    let points: PlotPoints = line
                        .into_iter()
                        .map(|p| camera.project_scene(layout, p))
                        .collect();
                    plot_ui.line(Line::new(points).color(stroke).width(1.0));
                }
            }

            // ---- One point cloud per visible model ----
            for (series, _) in figure
                .series
                .iter()
                .zip(visible)
                .filter(|(_, shown)| **shown)
            {
                let points: PlotPoints = series
                    .points()
                    .map(|p| camera.project_scene(layout, p))
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(color32(series.color))
                        .radius(3.5)
                        .filled(true),
                );
            }
        })
        .response;

    if response.dragged() {
        let delta = response.drag_delta();
        state.camera.rotate(delta.x, delta.y);
    }
    if response.double_clicked() {
        state.reset_camera();
    }
}
