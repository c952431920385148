use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::{ReportMode, YEAR_MAX, YEAR_MIN};
use crate::state::AppState;

pub const DASHBOARD_TITLE: &str = "Automobile Sales Statistics Dashboard";

// ---------------------------------------------------------------------------
// Left side panel – report selectors
// ---------------------------------------------------------------------------

/// Render the report type and year selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Report");
    ui.separator();

    ui.strong("Report type");
    let mode_text = state
        .selection
        .mode
        .map(ReportMode::label)
        .unwrap_or("Select a report type");
    egui::ComboBox::from_id_salt("report_type")
        .selected_text(mode_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for mode in ReportMode::ALL {
                if ui
                    .selectable_label(state.selection.mode == Some(mode), mode.label())
                    .clicked()
                {
                    state.set_mode(Some(mode));
                }
            }
        });

    ui.add_space(8.0);

    ui.strong("Year");
    let year_text = state
        .selection
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Select a year".to_string());
    let enabled = state.year_selector_enabled();
    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        egui::ComboBox::from_id_salt("select_year")
            .selected_text(year_text)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                if ui
                    .selectable_label(state.selection.year.is_none(), "Select a year")
                    .clicked()
                {
                    state.set_year(None);
                }
                for year in YEAR_MIN..=YEAR_MAX {
                    if ui
                        .selectable_label(state.selection.year == Some(year), year.to_string())
                        .clicked()
                    {
                        state.set_year(Some(year));
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let has_charts = !state.charts().is_empty();
            if ui
                .add_enabled(has_charts, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(DASHBOARD_TITLE).strong());
        ui.separator();

        ui.label(format!("{} rows loaded", state.dataset.len()));

        ui.separator();

        if ui.selectable_label(state.show_data, "Show data").clicked() {
            state.show_data = !state.show_data;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        match crate::chart::write_json(&path, state.charts()) {
            Ok(()) => {
                log::info!("Exported {} charts to {}", state.charts().len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
