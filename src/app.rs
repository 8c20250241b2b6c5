use eframe::egui;

use crate::figure::Figure;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FigureViewerApp {
    pub state: ViewerState,
}

impl FigureViewerApp {
    pub fn new(figure: Figure) -> Self {
        Self {
            state: ViewerState::new(figure),
        }
    }
}

impl eframe::App for FigureViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and model toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.separator();
            panels::model_buttons(ui, &mut self.state);
        });

        // ---- Central panel: scene ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scene_plot(ui, &mut self.state);
        });
    }
}

/// Open a native window showing `figure`; returns when the window closes.
pub fn run_viewer(figure: Figure) -> anyhow::Result<()> {
    let size = [
        figure.layout.width.max(600) as f32 + 200.0,
        figure.layout.height.max(550) as f32 + 100.0,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MCC plot",
        options,
        Box::new(|_cc| Ok(Box::new(FigureViewerApp::new(figure)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
