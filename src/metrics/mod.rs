//! Metric line decoding, normalization and derived readability scores
//!
//! Engine output flows through three steps:
//! 1. [`classify_line`] turns a raw line into a [`MetricRecord`]
//! 2. [`MetricTree::insert`] files the record under a stable metric id
//! 3. [`derived`] adds one `readability` score per family

mod classifier;
pub mod derived;

pub use classifier::{classify_line, classify_output, Classified};
pub use derived::{
    bw_readability, parse_method_scores, posnett_readability, scalabrino_readability,
    DerivedScores,
};

use crate::models::{MetricRecord, MetricTree, StatType};

/// Stable id for a metric: lowercased name with every non-alphanumeric
/// character replaced by `_`, plus `_<stat>` when a statistic applies.
///
/// Distinct names that differ only in punctuation map to the same id.
pub fn metric_id(base_name: &str, stat_type: Option<StatType>) -> String {
    let mut id: String = base_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if let Some(stat) = stat_type {
        id.push('_');
        id.push_str(stat.as_str());
    }
    id
}

impl MetricTree {
    /// Merge a classified record, overwriting any previous value for its id
    pub fn insert(&mut self, record: MetricRecord) {
        self.family_mut(record.family).insert(record.id, record.value);
    }

    /// Build a tree from multi-metric engine output
    pub fn from_output(output: &str) -> Self {
        let mut tree = Self::new();
        tree.extend(classify_output(output));
        tree
    }
}

impl Extend<MetricRecord> for MetricTree {
    fn extend<T: IntoIterator<Item = MetricRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}
