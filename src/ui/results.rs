use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use stock_screener::DisplayRow;

use crate::color::HIGHLIGHT;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Results table (central panel, top)
// ---------------------------------------------------------------------------

/// Render the top-ranked companies, followed by any extra sheet columns.
/// The first row is highlighted in gold; hovering a name shows its
/// per-metric ranks.
pub fn results_table(ui: &mut Ui, rows: &[DisplayRow]) {
    let extra_columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .collect();

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(48.0))
        .column(Column::initial(260.0).at_least(120.0).resizable(true))
        .column(Column::initial(80.0).at_least(60.0));
    for _ in &extra_columns {
        table = table.column(Column::auto().at_least(60.0));
    }

    table
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Rank");
            });
            header.col(|ui| {
                ui.strong("Company");
            });
            header.col(|ui| {
                ui.strong("Score");
            });
            for name in &extra_columns {
                header.col(|ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.position.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(cell_text(&row.company_name, row.highlighted))
                            .on_hover_text(&row.rank_summary);
                    });
                    table_row.col(|ui| {
                        ui.label(cell_text(&row.score_text, row.highlighted));
                    });
                    for name in &extra_columns {
                        table_row.col(|ui| {
                            ui.label(row.extra.get(*name).map(String::as_str).unwrap_or(""));
                        });
                    }
                });
            }
        });
}

fn cell_text(text: &str, highlighted: bool) -> RichText {
    let text = RichText::new(text);
    if highlighted {
        text.background_color(HIGHLIGHT).color(Color32::BLACK).strong()
    } else {
        text
    }
}
