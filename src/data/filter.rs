use std::collections::BTreeMap;

use super::model::{CompanyDataset, CompanyRecord, Metric};

// ---------------------------------------------------------------------------
// Filter predicate: inclusive min / max per metric
// ---------------------------------------------------------------------------

/// Inclusive bounds on one metric. A `None` side imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bound {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Bound { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `value` satisfies both sides.
    ///
    /// A missing value only passes when nothing is constrained.
    pub fn admits(&self, value: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(v) = value else {
            return false;
        };
        self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
    }
}

/// Per-metric bounds. A metric absent from the map is unconstrained.
pub type FilterSpec = BTreeMap<Metric, Bound>;

fn passes(record: &CompanyRecord, filters: &FilterSpec) -> bool {
    filters
        .iter()
        .all(|(metric, bound)| bound.admits(record.value(*metric)))
}

/// Return a new dataset keeping only the records that satisfy every bound.
///
/// Bounds are conjunctive across metrics; source order is preserved.
pub fn apply_filters(dataset: &CompanyDataset, filters: &FilterSpec) -> CompanyDataset {
    let kept: Vec<CompanyRecord> = dataset
        .records
        .iter()
        .filter(|r| passes(r, filters))
        .cloned()
        .collect();

    log::debug!(
        "Filters kept {} of {} companies ({} active bounds)",
        kept.len(),
        dataset.len(),
        filters.values().filter(|b| !b.is_unbounded()).count()
    );
    dataset.with_records(kept)
}
