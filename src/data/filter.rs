use serde::{Deserialize, Serialize};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Range predicate: inclusive magnitude bounds
// ---------------------------------------------------------------------------

/// Inclusive magnitude bounds `[low, high]`.
///
/// The two handles of a range slider may cross while being dragged, so a
/// `RangeBounds` with `low > high` is allowed to exist; it simply matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub low: f64,
    pub high: f64,
}

impl RangeBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `low <= high` (false as well when either bound is NaN).
    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }

    pub fn contains(&self, magnitude: f64) -> bool {
        self.is_ordered() && self.low <= magnitude && magnitude <= self.high
    }
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self::new(3.0, 4.0)
    }
}

/// Return indices of records whose magnitude lies within `bounds`.
///
/// A linear scan in dataset order; the result depends only on the dataset
/// and the bounds.
pub fn filtered_indices(dataset: &Dataset, bounds: RangeBounds) -> Vec<usize> {
    if !bounds.is_ordered() {
        return Vec::new();
    }
    dataset
        .iter()
        .enumerate()
        .filter(|(_, rec)| bounds.contains(rec.magnitude))
        .map(|(i, _)| i)
        .collect()
}

/// The matching records themselves, in dataset order.
pub fn filter(dataset: &Dataset, bounds: RangeBounds) -> Vec<&Record> {
    if !bounds.is_ordered() {
        return Vec::new();
    }
    dataset
        .iter()
        .filter(|rec| bounds.contains(rec.magnitude))
        .collect()
}

/// Smallest and largest magnitude in the dataset, `None` when empty.
pub fn magnitude_extent(dataset: &Dataset) -> Option<(f64, f64)> {
    dataset.iter().map(|r| r.magnitude).fold(None, |acc, m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::test_support::dataset;

    fn sample() -> Dataset {
        dataset(&[
            ("2022-01-01 00:00:00", 2.9),
            ("2022-01-02 00:00:00", 3.0),
            ("2022-01-03 00:00:00", 3.9),
            ("2022-01-04 00:00:00", 4.0),
            ("2022-01-05 00:00:00", 4.1),
        ])
    }

    fn mags(recs: &[&Record]) -> Vec<f64> {
        recs.iter().map(|r| r.magnitude).collect()
    }

    #[test]
    fn inclusive_on_both_ends() {
        let ds = sample();
        let out = filter(&ds, RangeBounds::new(3.0, 4.0));
        assert_eq!(mags(&out), vec![3.0, 3.9, 4.0]);
        assert_eq!(filtered_indices(&ds, RangeBounds::new(3.0, 4.0)), vec![1, 2, 3]);
    }

    #[test]
    fn crossed_bounds_yield_nothing() {
        let ds = sample();
        assert!(filter(&ds, RangeBounds::new(4.0, 3.0)).is_empty());
        assert!(filtered_indices(&ds, RangeBounds::new(4.0, 3.0)).is_empty());
        assert!(filter(&ds, RangeBounds::new(f64::NAN, 5.0)).is_empty());
    }

    #[test]
    fn degenerate_range_matches_exact_value() {
        let ds = sample();
        assert_eq!(mags(&filter(&ds, RangeBounds::new(3.9, 3.9))), vec![3.9]);
    }

    #[test]
    fn membership_and_order_match_the_predicate() {
        let ds = dataset(&[
            ("2022-02-01 00:00:00", 5.2),
            ("2022-02-01 00:00:00", 1.0),
            ("2022-02-01 00:00:00", 3.3),
            ("2022-02-01 00:00:00", 3.3),
            ("2022-02-01 00:00:00", 0.4),
            ("2022-02-01 00:00:00", 4.7),
        ]);
        for (low, high) in [(0.0, 10.0), (1.0, 3.3), (3.3, 3.3), (4.8, 5.0), (0.4, 4.7)] {
            let bounds = RangeBounds::new(low, high);
            let got = filtered_indices(&ds, bounds);
            let expected: Vec<usize> = (0..ds.len())
                .filter(|&i| {
                    let m = ds.records()[i].magnitude;
                    low <= m && m <= high
                })
                .collect();
            assert_eq!(got, expected, "bounds {low}..={high}");
            assert!(got.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let ds = sample();
        let bounds = RangeBounds::new(2.95, 4.05);
        assert_eq!(filter(&ds, bounds), filter(&ds, bounds));
    }

    #[test]
    fn concurrent_readers_see_their_own_bounds() {
        let ds = Arc::new(sample());
        let queries = [(3.0, 4.0), (0.0, 3.0), (4.0, 3.0), (4.1, 9.0)];

        let results: Vec<Vec<usize>> = std::thread::scope(|scope| {
            let handles: Vec<_> = queries
                .iter()
                .map(|&(lo, hi)| {
                    let ds = Arc::clone(&ds);
                    scope.spawn(move || filtered_indices(&ds, RangeBounds::new(lo, hi)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results[0], vec![1, 2, 3]);
        assert_eq!(results[1], vec![0, 1]);
        assert!(results[2].is_empty());
        assert_eq!(results[3], vec![4]);
    }

    #[test]
    fn extent_spans_all_magnitudes() {
        assert_eq!(magnitude_extent(&sample()), Some((2.9, 4.1)));
        assert_eq!(magnitude_extent(&dataset(&[])), None);
    }
}
