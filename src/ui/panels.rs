use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::render::{html, static_image};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Model toggle buttons
// ---------------------------------------------------------------------------

/// "All" plus one show-only button per model.
pub fn model_buttons(ui: &mut Ui, state: &mut ViewerState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        let all_shown = state.visible_count() == state.visible.len();
        if ui.selectable_label(all_shown, "All").clicked() {
            state.show_all();
        }

        let mut clicked = None;
        for (i, series) in state.figure.series.iter().enumerate() {
            let c = series.color;
            let mut text = RichText::new(&series.name).color(Color32::from_rgb(c.0, c.1, c.2));
            if series.is_empty() {
                text = text.italics();
            }
            let only_this = !all_shown && state.is_visible(i) && state.visible_count() == 1;
            if ui
                .selectable_label(only_this, text)
                .on_hover_text(format!("{} points", series.len()))
                .clicked()
            {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            state.show_only(i);
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export HTML…").clicked() {
                export_html_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export image…").clicked() {
                export_image_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reset camera").clicked() {
                state.reset_camera();
                ui.close_menu();
            }
        });

        ui.separator();

        let points: usize = state.figure.series.iter().map(|s| s.len()).sum();
        ui.label(format!(
            "{} models, {} visible, {} points",
            state.figure.series.len(),
            state.visible_count(),
            points
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn report(state: &mut ViewerState, path: PathBuf, result: anyhow::Result<()>) {
    match result {
        Ok(()) => {
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_html_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export HTML fragment")
        .add_filter("HTML", &["html", "htm"])
        .set_file_name("figure.html")
        .save_file();

    if let Some(path) = file {
        let result = html::write_html(&state.export_figure(), &path);
        report(state, path, result);
    }
}

pub fn export_image_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export image")
        .add_filter("Supported images", &["svg", "png", "pdf"])
        .add_filter("SVG", &["svg"])
        .add_filter("PNG", &["png"])
        .add_filter("PDF", &["pdf"])
        .set_file_name("figure.svg")
        .save_file();

    if let Some(path) = file {
        let result = static_image::write_image(&state.export_figure(), &path);
        report(state, path, result);
    }
}
