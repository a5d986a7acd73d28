use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::model::{CompanyDataset, CompanyRecord, Metric};

/// Per-metric weight. A metric absent from the map weighs 0.
pub type WeightSpec = BTreeMap<Metric, f64>;

// ---------------------------------------------------------------------------
// Dense ranking
// ---------------------------------------------------------------------------

/// Dense rank in ascending order: the lowest value gets 1, equal values
/// share a rank and the next distinct value gets the following integer.
///
/// Missing values receive no rank.
pub fn dense_rank(values: &[Option<f64>]) -> Vec<Option<u32>> {
    let mut distinct: Vec<f64> = values.iter().flatten().copied().collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup_by(|a, b| a == b);

    values
        .iter()
        .map(|v| v.map(|x| distinct.partition_point(|d| *d < x) as u32 + 1))
        .collect()
}

// ---------------------------------------------------------------------------
// Ranked output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCompany {
    pub record: CompanyRecord,
    /// Dense rank per metric, indexed by [`Metric::index`].
    pub ranks: [Option<u32>; 5],
    /// Σ rank × weight. `None` when any metric value is missing.
    pub score: Option<f64>,
}

/// Companies sorted by composite score, highest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    pub companies: Vec<RankedCompany>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Keep only the first `n` companies.
    pub fn truncate(&mut self, n: usize) {
        self.companies.truncate(n);
    }

    pub fn names(&self) -> Vec<&str> {
        self.companies.iter().map(|c| c.record.name.as_str()).collect()
    }
}

fn composite_score(ranks: &[Option<u32>; 5], weights: &WeightSpec) -> Option<f64> {
    Metric::ALL.iter().try_fold(0.0, |acc, m| {
        let rank = ranks[m.index()]?;
        let weight = weights.get(m).copied().unwrap_or(0.0);
        Some(acc + rank as f64 * weight)
    })
}

/// Scored companies first in descending order; unscored ones last.
fn by_score_desc(a: &RankedCompany, b: &RankedCompany) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank every company of `dataset` and sort by composite score.
///
/// Ranks are computed over the records passed in, so ranking a filtered
/// dataset ranks within the survivors only. The sort is stable: equal
/// scores keep source order.
pub fn rank_companies(dataset: CompanyDataset, weights: &WeightSpec) -> RankedResult {
    let per_metric: Vec<Vec<Option<u32>>> = Metric::ALL
        .iter()
        .map(|m| {
            let column: Vec<Option<f64>> = dataset.records.iter().map(|r| r.value(*m)).collect();
            dense_rank(&column)
        })
        .collect();

    let mut companies: Vec<RankedCompany> = dataset
        .records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let mut ranks = [None; 5];
            for m in Metric::ALL {
                ranks[m.index()] = per_metric[m.index()][row];
            }
            let score = composite_score(&ranks, weights);
            RankedCompany {
                record,
                ranks,
                score,
            }
        })
        .collect();

    companies.sort_by(by_score_desc);
    log::debug!("Ranked {} companies", companies.len());

    RankedResult { companies }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn company(name: &str, metrics: [f64; 5]) -> CompanyRecord {
        CompanyRecord::new(name, metrics.map(Some))
    }

    fn only(metric: Metric, weight: f64) -> WeightSpec {
        Metric::ALL
            .iter()
            .map(|m| (*m, if *m == metric { weight } else { 0.0 }))
            .collect()
    }

    #[test]
    fn dense_rank_ties_share_rank_without_gaps() {
        let ranks = dense_rank(&[Some(10.0), Some(10.0), Some(20.0)]);
        assert_eq!(ranks, vec![Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn dense_rank_is_ascending_and_skips_missing() {
        let ranks = dense_rank(&[Some(3.0), None, Some(-1.0), Some(3.0), Some(7.0)]);
        assert_eq!(ranks, vec![Some(2), None, Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn dense_rank_treats_signed_zero_as_equal() {
        let ranks = dense_rank(&[Some(0.0), Some(-0.0), Some(1.0)]);
        assert_eq!(ranks, vec![Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn dense_rank_of_nothing_is_empty() {
        assert!(dense_rank(&[]).is_empty());
    }

    #[test]
    fn composite_is_weighted_sum_of_ranks() {
        // ROIC ranks A=1, B=2; EBIT Margin ranks A=2, B=1.
        let ds = CompanyDataset::from_records(vec![
            company("A", [1.0, 9.0, 0.0, 0.0, 0.0]),
            company("B", [2.0, 3.0, 0.0, 0.0, 0.0]),
        ]);
        let mut weights = WeightSpec::new();
        weights.insert(Metric::Roic, 0.5);
        weights.insert(Metric::EbitMargin, 0.5);
        let ranked = rank_companies(ds, &weights);
        for c in &ranked.companies {
            assert_eq!(c.score, Some(1.5));
        }
        // Equal scores keep source order.
        assert_eq!(ranked.names(), ["A", "B"]);
    }

    #[test]
    fn highest_rank_sum_comes_first() {
        let ds = CompanyDataset::from_records(vec![
            company("A", [5.0, 0.0, 0.0, 0.0, 0.0]),
            company("B", [10.0, 0.0, 0.0, 0.0, 0.0]),
            company("C", [15.0, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let ranked = rank_companies(ds, &only(Metric::Roic, 1.0));
        assert_eq!(ranked.names(), ["C", "B", "A"]);
        let scores: Vec<Option<f64>> = ranked.companies.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![Some(3.0), Some(2.0), Some(1.0)]);
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let ds = CompanyDataset::from_records(vec![
            company("A", [1.0, 1.0, 1.0, 1.0, 1.0]),
            company("B", [2.0, 2.0, 2.0, 2.0, 2.0]),
        ]);
        let weights: WeightSpec = Metric::ALL.iter().map(|m| (*m, 2.0)).collect();
        let ranked = rank_companies(ds, &weights);
        assert_eq!(ranked.companies[0].record.name, "B");
        assert_eq!(ranked.companies[0].score, Some(20.0));
        assert_eq!(ranked.companies[1].score, Some(10.0));
    }

    #[test]
    fn missing_metric_sorts_last_without_score() {
        let ds = CompanyDataset::from_records(vec![
            CompanyRecord::new("Gap", [Some(100.0), None, Some(0.0), Some(0.0), Some(0.0)]),
            company("A", [1.0, 1.0, 0.0, 0.0, 0.0]),
        ]);
        let ranked = rank_companies(ds, &only(Metric::Roic, 1.0));
        assert_eq!(ranked.names(), ["A", "Gap"]);
        assert_eq!(ranked.companies[1].score, None);
        assert_eq!(ranked.companies[1].ranks[Metric::Roic.index()], Some(2));
    }

    #[test]
    fn ranking_empty_dataset_yields_empty_result() {
        let ranked = rank_companies(CompanyDataset::default(), &WeightSpec::new());
        assert!(ranked.is_empty());
    }

    proptest! {
        #[test]
        fn proptest_scores_are_descending(
            rows in prop::collection::vec(prop::array::uniform5(-50.0f64..50.0), 0..30),
            weights in prop::array::uniform5(0.0f64..1.0),
        ) {
            let records = rows
                .iter()
                .enumerate()
                .map(|(i, m)| company(&format!("Co{i}"), *m))
                .collect();
            let ws: WeightSpec = Metric::ALL.iter().zip(weights).map(|(m, w)| (*m, w)).collect();
            let ranked = rank_companies(CompanyDataset::from_records(records), &ws);
            prop_assert_eq!(ranked.len(), rows.len());
            for pair in ranked.companies.windows(2) {
                prop_assert!(pair[0].score.unwrap() >= pair[1].score.unwrap());
            }
        }

        #[test]
        fn proptest_dense_ranks_are_contiguous(values in prop::collection::vec(-20i32..20, 1..50)) {
            let column: Vec<Option<f64>> = values.iter().map(|v| Some(*v as f64)).collect();
            let ranks: Vec<u32> = dense_rank(&column).into_iter().flatten().collect();
            let max = *ranks.iter().max().unwrap();
            let mut distinct = values.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(max as usize, distinct.len());
            for r in 1..=max {
                prop_assert!(ranks.contains(&r));
            }
        }
    }
}
