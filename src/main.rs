mod app;
mod color;
mod state;
mod ui;

use app::ScreenerApp;
use eframe::egui;
use stock_screener::ScreenerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ScreenerConfig::load().unwrap_or_else(|e| {
        log::error!("Ignoring configuration, using defaults: {e}");
        ScreenerConfig::default()
    });
    log::info!("Ticker sheet: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 640.0])
            .with_min_inner_size([800.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Screening Tool",
        options,
        Box::new(|_cc| Ok(Box::new(ScreenerApp::new(config)))),
    )
}
