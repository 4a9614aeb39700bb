use std::sync::Arc;

use crate::color::MagnitudeScale;
use crate::config::ViewerConfig;
use crate::data::aggregate::{aggregate, MonthBucket};
use crate::data::filter::{filtered_indices, magnitude_extent, RangeBounds};
use crate::data::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentralView {
    #[default]
    MonthlyDistribution,
    Table,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Loaded dataset (None until a catalog is loaded). Shared read-only.
    pub dataset: Option<Arc<Dataset>>,

    /// Current magnitude slider position.
    pub bounds: RangeBounds,

    /// Indices of records inside `bounds` (cached).
    pub visible_indices: Vec<usize>,

    /// Monthly distribution of the whole dataset, computed once per load.
    pub month_buckets: Vec<MonthBucket>,

    /// Colour scale for map points, spanning the dataset's magnitudes.
    pub magnitude_scale: MagnitudeScale,

    pub view: CentralView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            bounds: config.initial_bounds,
            config,
            dataset: None,
            visible_indices: Vec::new(),
            month_buckets: Vec::new(),
            magnitude_scale: MagnitudeScale::new(0.0, 0.0),
            view: CentralView::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset: aggregate it once and run the current
    /// range query against it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let dataset = Arc::new(dataset);

        let (min, max) = magnitude_extent(&dataset).unwrap_or((0.0, 0.0));
        self.magnitude_scale = MagnitudeScale::new(min, max);
        self.month_buckets = aggregate(dataset.as_ref());
        self.visible_indices = filtered_indices(&dataset, self.bounds);

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Slider range: the dataset's magnitude extent.
    pub fn slider_range(&self) -> Option<(f64, f64)> {
        self.dataset.as_deref().and_then(magnitude_extent)
    }

    /// Records inside the current bounds, in dataset order.
    pub fn visible_records(&self) -> Vec<&Record> {
        match &self.dataset {
            Some(ds) => self
                .visible_indices
                .iter()
                .map(|&i| &ds.records()[i])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Move the slider handles and re-run the range query.
    pub fn set_bounds(&mut self, bounds: RangeBounds) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.refilter();
    }

    /// Recompute `visible_indices` after a bounds change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, self.bounds);
            log::debug!(
                "Magnitude range [{}, {}]: {} of {} records",
                self.bounds.low,
                self.bounds.high,
                self.visible_indices.len(),
                ds.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::dataset;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[
            ("2022-01-01 00:00:00", 2.9),
            ("2022-01-02 00:00:00", 3.4),
            ("2022-03-03 00:00:00", 4.0),
            ("2022-03-04 00:00:00", 6.1),
        ]));
        state
    }

    #[test]
    fn load_runs_initial_query_and_aggregation() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![1, 2]);
        assert_eq!(state.month_buckets.len(), 12);
        assert_eq!(state.month_buckets[0].label, "Jan. (2)");
        assert_eq!(state.month_buckets[2].label, "Mar. (2)");
        assert_eq!(state.slider_range(), Some((2.9, 6.1)));
        assert_eq!(state.magnitude_scale, MagnitudeScale::new(2.9, 6.1));
    }

    #[test]
    fn bounds_change_refilters_but_keeps_buckets() {
        let mut state = loaded();
        let buckets = state.month_buckets.clone();

        state.set_bounds(RangeBounds::new(4.0, 7.0));
        assert_eq!(state.visible_indices, vec![2, 3]);
        let mags: Vec<f64> = state.visible_records().iter().map(|r| r.magnitude).collect();
        assert_eq!(mags, vec![4.0, 6.1]);

        state.set_bounds(RangeBounds::new(5.0, 4.0));
        assert!(state.visible_indices.is_empty());

        assert_eq!(state.month_buckets, buckets);
    }

    #[test]
    fn bounds_without_dataset_are_remembered() {
        let mut state = AppState::default();
        state.set_bounds(RangeBounds::new(1.0, 2.0));
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.slider_range(), None);
    }
}
