use eframe::egui;
use stock_screener::ScreenerConfig;

use crate::state::AppState;
use crate::ui::{panels, plot, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScreenerApp {
    pub state: AppState,
}

impl ScreenerApp {
    pub fn new(config: ScreenerConfig) -> Self {
        Self {
            state: AppState::from_config(config),
        }
    }
}

impl eframe::App for ScreenerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and weights ----
        egui::SidePanel::left("form_panel")
            .default_width(520.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: results table + score chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.has_run {
                ui.centered_and_justified(|ui| {
                    ui.heading("Set filters and weights, then press Run Screening");
                });
                return;
            }
            if self.state.results.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.heading("No companies passed the filters");
                });
                return;
            }
            results::results_table(ui, &self.state.results);
            ui.separator();
            plot::score_chart(ui, &self.state.results);
        });
    }
}
