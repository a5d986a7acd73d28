use std::collections::BTreeMap;

use crate::data::filter::{Bound, FilterSpec};
use crate::data::model::Metric;
use crate::error::{Result, ScreenerError};

use super::rank::WeightSpec;

/// Raw text of the three inputs for one metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFields {
    pub min: String,
    pub max: String,
    pub weight: String,
}

/// Everything the user typed into the screening form, keyed by metric.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub fields: BTreeMap<Metric, MetricFields>,
}

impl FormState {
    /// Empty bounds and the given default weights.
    pub fn with_weights(weights: &WeightSpec) -> Self {
        let fields = Metric::ALL
            .iter()
            .map(|m| {
                let weight = weights.get(m).copied().unwrap_or(0.0);
                (
                    *m,
                    MetricFields {
                        weight: weight.to_string(),
                        ..MetricFields::default()
                    },
                )
            })
            .collect();
        FormState { fields }
    }

    pub fn field_mut(&mut self, metric: Metric) -> &mut MetricFields {
        self.fields.entry(metric).or_default()
    }

    /// Parse every field. Any bad entry aborts the whole parse.
    pub fn parse(&self) -> Result<(FilterSpec, WeightSpec)> {
        let mut filters = FilterSpec::new();
        let mut weights = WeightSpec::new();

        for metric in Metric::ALL {
            let empty = MetricFields::default();
            let f = self.fields.get(&metric).unwrap_or(&empty);

            let min = parse_optional(&f.min, metric, "minimum filter")?;
            let max = parse_optional(&f.max, metric, "maximum filter")?;
            filters.insert(metric, Bound::new(min, max));

            let weight = parse_number(&f.weight, metric, "weight")?;
            if weight < 0.0 {
                return Err(ScreenerError::NegativeWeight {
                    metric: metric.column().to_string(),
                    value: weight,
                });
            }
            weights.insert(metric, weight);
        }

        Ok((filters, weights))
    }
}

/// Only an untouched (zero-length) field is unconstrained; blanks are
/// rejected by `parse_number`.
fn parse_optional(raw: &str, metric: Metric, field: &'static str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_number(raw, metric, field).map(Some)
}

fn parse_number(raw: &str, metric: Metric, field: &'static str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(ScreenerError::InvalidNumber {
            metric: metric.column().to_string(),
            field,
            value: raw.to_string(),
        }),
    }
}
