use std::path::PathBuf;

use stock_screener::{DisplayRow, ErrorKind, FormState, ScreenerConfig, ScreeningEngine};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Ticker sheet re-read on every run.
    pub data_path: PathBuf,

    /// Text of the min / max / weight fields.
    pub form: FormState,

    /// Rows of the latest successful run.
    pub results: Vec<DisplayRow>,

    /// Whether a run has completed since start-up.
    pub has_run: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    engine: ScreeningEngine,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(ScreenerConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: ScreenerConfig) -> Self {
        Self {
            data_path: config.data_path,
            form: FormState::with_weights(&config.weights),
            results: Vec::new(),
            has_run: false,
            status_message: None,
            engine: ScreeningEngine::default(),
        }
    }

    /// Point the screener at a different sheet. Old results no longer apply.
    pub fn set_data_path(&mut self, path: PathBuf) {
        log::info!("Using ticker sheet {}", path.display());
        self.data_path = path;
        self.results.clear();
        self.has_run = false;
        self.status_message = None;
    }

    /// Run the screening end to end and replace the displayed results.
    pub fn run_screening(&mut self) {
        match self.engine.run(&self.data_path, &self.form) {
            Ok(ranked) => {
                self.results = ranked.display_rows();
                self.has_run = true;
                self.status_message = None;
            }
            Err(e) => {
                let prefix = match e.kind() {
                    ErrorKind::DataAccess => "Data error",
                    ErrorKind::InputParse => "Invalid input",
                };
                log::error!("Screening failed: {e}");
                self.results.clear();
                self.has_run = false;
                self.status_message = Some(format!("{prefix}: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_screener::Metric;

    #[test]
    fn bad_input_reports_and_clears_results() {
        let mut state = AppState::default();
        state.results.push(DisplayRow {
            position: 1,
            company_name: "Stale".into(),
            score: Some(1.0),
            score_text: "1.00".into(),
            highlighted: true,
            extra: Default::default(),
            rank_summary: String::new(),
        });
        state.form.field_mut(Metric::Roic).weight = "abc".into();
        state.run_screening();
        assert!(state.results.is_empty());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Invalid input"), "{msg}");
    }

    #[test]
    fn missing_file_is_data_error() {
        let mut state = AppState::default();
        state.set_data_path(PathBuf::from("/nonexistent/Tickers.csv"));
        state.run_screening();
        assert!(!state.has_run);
        assert!(state.status_message.unwrap().starts_with("Data error"));
    }
}
