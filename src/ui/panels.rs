use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::sort::SortKey;
use crate::export::{default_file_name, write_export};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.load.viewer().is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut changed = false;

    ui.strong("Search");
    changed |= ui
        .add(egui::TextEdit::singleline(&mut state.draft.filter_text).hint_text("Cytokine name"))
        .changed();
    ui.add_space(6.0);

    ui.strong("Min. samples in a stage");
    changed |= ui
        .add(egui::DragValue::new(&mut state.draft.min_samples).speed(1))
        .changed();
    ui.add_space(6.0);

    ui.strong("Sort by");
    egui::ComboBox::from_id_salt("sort_by")
        .selected_text(state.draft.sort_key.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for key in SortKey::ALL {
                changed |= ui
                    .selectable_value(&mut state.draft.sort_key, key, key.to_string())
                    .changed();
            }
        });
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Apply").clicked() {
            changed = true;
        }
        if ui.button("Reset").clicked() {
            state.reset();
        }
    });
    if ui.button("Export CSV…").clicked() {
        export_dialog(state);
    }

    if changed {
        state.apply_draft();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the dataset counters.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let ready = state.load.viewer().is_some();
            if ui
                .add_enabled(ready, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(viewer) = state.load.viewer() {
            let stats = viewer.summary();
            ui.label(format!("Cytokines: {}", stats.total_entries));
            ui.separator();
            ui.label(format!("Measurements: {}", stats.total_measurements));
            ui.separator();
            ui.label(format!("With data: {}", stats.entries_with_data));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(viewer) = state.load.viewer() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export visible cytokines")
        .set_file_name(default_file_name())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_export(viewer, &path) {
            Ok(written) => {
                state.status_message = Some(format!("Exported to {}", written.display()));
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
