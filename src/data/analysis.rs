use crate::config::AppConfig;

use super::classify::{ColumnClassification, classify};
use super::model::{Dataset, Record};
use super::stats::{DistributionBucket, SummaryStats, distribution, summarize};
use super::view::chart_window;

/// Everything the dashboard derives from one dataset, computed in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub columns: ColumnClassification,
    pub stats: SummaryStats,
    pub distribution: Vec<DistributionBucket>,
    /// Length of the chart window prefix.
    pub window_len: usize,
}

impl Analysis {
    pub fn compute(dataset: &Dataset, config: &AppConfig) -> Self {
        let columns = classify(dataset, config.classifier);
        log::debug!(
            "numeric columns {:?}, categorical columns {:?}",
            columns.numeric,
            columns.categorical
        );
        let stats = summarize(dataset, &columns);
        let distribution = distribution(dataset, &columns, config.top_categories);
        let window_len = chart_window(dataset, config.chart_window).len();

        Self {
            columns,
            stats,
            distribution,
            window_len,
        }
    }

    /// The chart window of `dataset`, which must be the dataset this
    /// analysis was computed from.
    pub fn window<'a>(&self, dataset: &'a Dataset) -> &'a [Record] {
        chart_window(dataset, self.window_len)
    }
}
