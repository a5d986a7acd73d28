use eframe::egui::{self, Color32, RichText, TextEdit, Ui};
use stock_screener::Metric;

use crate::state::AppState;

const FIELD_WIDTH: f32 = 56.0;

// ---------------------------------------------------------------------------
// Left side panel – filters and weights
// ---------------------------------------------------------------------------

/// Render the filter / weight form and the run button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Screening");
    ui.separator();

    egui::Grid::new("screening_form")
        .num_columns(4)
        .spacing([10.0, 14.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            ui.strong("Minimum Filter");
            ui.strong("Maximum Filter");
            ui.strong("Weights");
            ui.end_row();

            for metric in Metric::ALL {
                ui.label(metric.label());
                let fields = state.form.field_mut(metric);
                ui.add(TextEdit::singleline(&mut fields.min).desired_width(FIELD_WIDTH));
                ui.add(TextEdit::singleline(&mut fields.max).desired_width(FIELD_WIDTH));
                ui.add(TextEdit::singleline(&mut fields.weight).desired_width(FIELD_WIDTH));
                ui.end_row();
            }
        });

    ui.add_space(16.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if ui
            .add_sized([160.0, 28.0], egui::Button::new("Run Screening"))
            .clicked()
        {
            state.run_screening();
        }
    });

    ui.add_space(8.0);
    ui.small("Empty minimum / maximum fields are not applied.");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("Source: {}", state.data_path.display()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open ticker sheet")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.set_data_path(path);
    }
}
