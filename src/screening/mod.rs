//! Screening pipeline: form → filters/weights → filter → rank → top N.

pub mod form;
pub mod rank;

use std::collections::BTreeMap;
use std::path::Path;

use crate::data::filter::{apply_filters, FilterSpec};
use crate::data::loader::load_file;
use crate::data::model::{CellValue, CompanyDataset, Metric};
use crate::error::Result;

pub use form::{FormState, MetricFields};
pub use rank::{dense_rank, rank_companies, RankedCompany, RankedResult, WeightSpec};

/// Number of companies shown after ranking.
pub const TOP_N: usize = 10;

/// One line of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    /// 1-based position in the ranking.
    pub position: usize,
    pub company_name: String,
    pub score: Option<f64>,
    /// Score rounded to two decimals, `n/a` when unscored.
    pub score_text: String,
    /// Set on the top-ranked row only.
    pub highlighted: bool,
    /// Non-metric sheet columns (ticker, sector, ...), null cells omitted.
    pub extra: BTreeMap<String, String>,
    /// `ROIC #3, EBIT Margin #1, ...` for the hover text.
    pub rank_summary: String,
}

fn rank_summary(ranks: &[Option<u32>; 5]) -> String {
    Metric::ALL
        .iter()
        .map(|m| match ranks[m.index()] {
            Some(r) => format!("{m} #{r}"),
            None => format!("{m} n/a"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl RankedResult {
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.companies
            .iter()
            .enumerate()
            .map(|(i, c)| DisplayRow {
                position: i + 1,
                company_name: c.record.name.clone(),
                score: c.score,
                score_text: c
                    .score
                    .map_or_else(|| "n/a".to_string(), |s| format!("{s:.2}")),
                highlighted: i == 0,
                extra: c
                    .record
                    .extra
                    .iter()
                    .filter(|(_, v)| **v != CellValue::Null)
                    .map(|(k, v)| (k.clone(), v.to_string()))
                    .collect(),
                rank_summary: rank_summary(&c.ranks),
            })
            .collect()
    }
}

/// Stateless filter-and-rank engine. Holds only the result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningEngine {
    top_n: usize,
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        Self { top_n: TOP_N }
    }
}

impl ScreeningEngine {
    /// Filter, rank within the survivors, keep the best `top_n`.
    pub fn screen(
        &self,
        dataset: &CompanyDataset,
        filters: &FilterSpec,
        weights: &WeightSpec,
    ) -> RankedResult {
        let filtered = apply_filters(dataset, filters);
        let survivors = filtered.len();
        let mut ranked = rank_companies(filtered, weights);
        ranked.truncate(self.top_n);

        log::info!(
            "Screened {} companies: {} passed filters, showing {}",
            dataset.len(),
            survivors,
            ranked.len()
        );
        ranked
    }

    /// One full "Run Screening" action.
    ///
    /// The form is parsed before the sheet is read, so a bad entry stops
    /// the run without touching the file. The sheet is re-read on every
    /// call.
    pub fn run(&self, path: &Path, form: &FormState) -> Result<RankedResult> {
        let (filters, weights) = form.parse()?;
        let dataset = load_file(path)?;
        Ok(self.screen(&dataset, &filters, &weights))
    }
}
