use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column holding the company identifier in every source sheet.
pub const COMPANY_NAME_COLUMN: &str = "Company Name";

// ---------------------------------------------------------------------------
// Metric – the five tracked financial metrics
// ---------------------------------------------------------------------------

/// One of the five metrics every ticker sheet must carry.
///
/// The serde name is the exact source column name, so the same string keys
/// the data file, the filter/weight maps and the JSON configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "ROIC")]
    Roic,
    #[serde(rename = "EBIT Margin")]
    EbitMargin,
    #[serde(rename = "52-Week Price Low Relative")]
    PriceLowRelative52W,
    #[serde(rename = "Revenue Growth Rate")]
    RevenueGrowthRate,
    #[serde(rename = "EBIT Margin Improvement")]
    EbitMarginImprovement,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Roic,
        Metric::EbitMargin,
        Metric::PriceLowRelative52W,
        Metric::RevenueGrowthRate,
        Metric::EbitMarginImprovement,
    ];

    /// Exact column name in the source sheet.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Roic => "ROIC",
            Metric::EbitMargin => "EBIT Margin",
            Metric::PriceLowRelative52W => "52-Week Price Low Relative",
            Metric::RevenueGrowthRate => "Revenue Growth Rate",
            Metric::EbitMarginImprovement => "EBIT Margin Improvement",
        }
    }

    /// Human-facing label used by the form.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Roic => "ROIC (%)",
            Metric::EbitMargin => "EBIT Margin (%)",
            Metric::PriceLowRelative52W => "52-Week Price Low Relative (%)",
            Metric::RevenueGrowthRate => "Revenue Growth (5Y Avg) (%)",
            Metric::EbitMarginImprovement => "EBIT Margin Improvement (5Y Avg) (%)",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a non-metric column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell for the columns the screener does not interpret
/// (ticker, sector, ...). Kept so nothing from the sheet is silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// CompanyRecord – one row of the ticker sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub name: String,
    /// Metric values indexed by [`Metric::index`]. `None` for an empty or
    /// NaN cell.
    pub metrics: [Option<f64>; 5],
    /// Every other column: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>, metrics: [Option<f64>; 5]) -> Self {
        CompanyRecord {
            name: name.into(),
            metrics,
            extra: BTreeMap::new(),
        }
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.metrics[metric.index()]
    }

    pub fn has_all_metrics(&self) -> bool {
        self.metrics.iter().all(Option::is_some)
    }
}

// ---------------------------------------------------------------------------
// CompanyDataset – the complete loaded sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyDataset {
    /// Rows in source order.
    pub records: Vec<CompanyRecord>,
    /// Source column names in header order.
    pub column_names: Vec<String>,
}

impl CompanyDataset {
    pub fn new(records: Vec<CompanyRecord>, column_names: Vec<String>) -> Self {
        CompanyDataset {
            records,
            column_names,
        }
    }

    /// Build a dataset whose columns are just the required ones.
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        let column_names = std::iter::once(COMPANY_NAME_COLUMN)
            .chain(Metric::ALL.iter().map(|m| m.column()))
            .map(str::to_string)
            .collect();
        CompanyDataset::new(records, column_names)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Same columns, different rows.
    pub fn with_records(&self, records: Vec<CompanyRecord>) -> Self {
        CompanyDataset {
            records,
            column_names: self.column_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_columns_round_trip() {
        for m in Metric::ALL {
            assert_eq!(Metric::from_column(m.column()), Some(m));
        }
        assert_eq!(Metric::from_column("roic"), None);
    }

    #[test]
    fn metric_index_matches_all_order() {
        for (i, m) in Metric::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn metric_serializes_as_column_name() {
        let json = serde_json::to_string(&Metric::PriceLowRelative52W).unwrap();
        assert_eq!(json, "\"52-Week Price Low Relative\"");
    }

    #[test]
    fn from_records_lists_required_columns() {
        let ds = CompanyDataset::from_records(Vec::new());
        assert_eq!(ds.column_names.len(), 6);
        assert_eq!(ds.column_names[0], COMPANY_NAME_COLUMN);
        assert!(ds.is_empty());
    }
}
