use crate::model::{Contributor, FileChange};
use crate::util::label_width;

/// An aggregate that can be ordered and drawn as a labelled bar.
pub trait Ranked {
    fn label(&self) -> &str;
    fn metric(&self) -> u64;
}

impl Ranked for Contributor {
    fn label(&self) -> &str {
        &self.name
    }

    fn metric(&self) -> u64 {
        self.commits
    }
}

impl Ranked for FileChange {
    fn label(&self) -> &str {
        &self.path
    }

    fn metric(&self) -> u64 {
        self.change_count
    }
}

/// Sort by metric, highest first. The sort is stable, so rows with equal
/// metrics keep the order they were discovered in.
pub fn rank<T: Ranked>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by(|a, b| b.metric().cmp(&a.metric()));
    rows
}

/// Resolve a 1-based index, as typed by a user, to a row.
pub fn select<T>(rows: &[T], index: usize) -> Option<&T> {
    index.checked_sub(1).and_then(|i| rows.get(i))
}

/// Ranked rows ready for a bar chart, plus the figures needed to scale it.
#[derive(Debug, Clone)]
pub struct ChartData<T> {
    pub rows: Vec<T>,
    pub max_metric: u64,
    pub max_label_len: usize,
    /// Sum of metrics over all ranked rows, before filtering.
    pub total_metric: u64,
}

impl<T: Ranked> ChartData<T> {
    /// Drop rows below `min_metric`, then keep at most `limit` of the rest.
    pub fn new(ranked: Vec<T>, min_metric: u64, limit: Option<usize>) -> Self {
        let total_metric: u64 = ranked.iter().map(|row| row.metric()).sum();
        let rows: Vec<T> = ranked
            .into_iter()
            .filter(|row| row.metric() >= min_metric)
            .take(limit.unwrap_or(usize::MAX))
            .collect();

        let max_metric = rows.iter().map(|row| row.metric()).max().unwrap_or(0);
        let max_label_len = rows
            .iter()
            .map(|row| label_width(row.label()))
            .max()
            .unwrap_or(0);

        Self {
            rows,
            max_metric,
            max_label_len,
            total_metric,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn bar_length(&self, metric: u64, width: usize) -> usize {
        if self.max_metric == 0 {
            return 0;
        }
        (metric as f64 / self.max_metric as f64 * width as f64).round() as usize
    }

    /// Percentage of the unfiltered total.
    pub fn share(&self, metric: u64) -> f64 {
        if self.total_metric == 0 {
            return 0.0;
        }
        metric as f64 / self.total_metric as f64 * 100.0
    }

    pub fn select(&self, index: usize) -> Option<&T> {
        select(&self.rows, index)
    }
}
