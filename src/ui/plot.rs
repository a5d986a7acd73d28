use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};
use stock_screener::DisplayRow;

use crate::color::rank_gradient;

// ---------------------------------------------------------------------------
// Composite score chart (central panel, bottom)
// ---------------------------------------------------------------------------

/// One bar per displayed company, in rank order. Unscored rows are skipped.
pub fn score_chart(ui: &mut Ui, rows: &[DisplayRow]) {
    let colors = rank_gradient(rows.len());

    let bars: Vec<Bar> = rows
        .iter()
        .zip(colors)
        .filter_map(|(row, color)| {
            let score = row.score?;
            Some(
                Bar::new(row.position as f64, score)
                    .name(&row.company_name)
                    .fill(color),
            )
        })
        .collect();

    let chart = BarChart::new(bars).width(0.7).name("Composite score");

    Plot::new("score_chart")
        .legend(Legend::default())
        .x_axis_label("Rank")
        .y_axis_label("Composite score")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
