use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::model::Metric;
use crate::error::{Result, ScreenerError};
use crate::screening::WeightSpec;

/// Env var naming a JSON configuration file.
pub const CONFIG_ENV: &str = "STOCK_SCREENER_CONFIG";
/// Env var overriding the ticker sheet path.
pub const DATA_ENV: &str = "STOCK_SCREENER_DATA";

const DEFAULT_DATA_PATH: &str = "Tickers.csv";

pub fn default_weights() -> WeightSpec {
    BTreeMap::from([
        (Metric::Roic, 0.25),
        (Metric::EbitMargin, 0.25),
        (Metric::PriceLowRelative52W, 0.20),
        (Metric::RevenueGrowthRate, 0.15),
        (Metric::EbitMarginImprovement, 0.15),
    ])
}

/// Startup settings: where the sheet lives and which weights the form
/// starts with.
///
/// JSON form (all keys optional):
///
/// ```json
/// { "data_path": "/data/Tickers.parquet", "weights": { "ROIC": 0.5 } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub data_path: PathBuf,
    pub weights: WeightSpec,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            weights: default_weights(),
        }
    }
}

impl ScreenerConfig {
    /// Defaults, then the file named by `STOCK_SCREENER_CONFIG`, then the
    /// `STOCK_SCREENER_DATA` override.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ScreenerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Weights given in the JSON replace the defaults per metric; the rest
    /// keep their default value.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: ScreenerConfig = serde_json::from_str(text)?;
        for (metric, weight) in default_weights() {
            config.weights.entry(metric).or_insert(weight);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(ScreenerConfig::from_json("{}").unwrap(), ScreenerConfig::default());
    }

    #[test]
    fn partial_weights_keep_other_defaults() {
        let config = ScreenerConfig::from_json(r#"{"weights": {"ROIC": 1.0}}"#).unwrap();
        assert_eq!(config.weights[&Metric::Roic], 1.0);
        assert_eq!(config.weights[&Metric::EbitMargin], 0.25);
        assert_eq!(config.data_path, PathBuf::from("Tickers.csv"));
    }

    #[test]
    fn unknown_metric_key_is_rejected() {
        let err = ScreenerConfig::from_json(r#"{"weights": {"P/E": 1.0}}"#).unwrap_err();
        assert!(matches!(err, ScreenerError::Json(_)));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_path": "/srv/sheets/Tickers.parquet"}}"#).unwrap();
        let config = ScreenerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/sheets/Tickers.parquet"));
        assert_eq!(config.weights, default_weights());
    }
}
