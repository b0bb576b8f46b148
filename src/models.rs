//! Core data models for rsm-readability
//!
//! These models are shared by the span extractor, the metric line
//! classifier and the reporters.

use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which each family stores its derived readability score
pub const READABILITY_KEY: &str = "readability";

/// One method body located by brace counting.
///
/// Line indices are 0-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpan {
    pub start_line: usize,
    pub first_brace_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl MethodSpan {
    /// Number of source lines covered by the span
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Metric vocabularies emitted by the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MetricFamily {
    Scalabrino,
    BW,
    Posnett,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 3] =
        [MetricFamily::Scalabrino, MetricFamily::BW, MetricFamily::Posnett];
}

impl std::fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricFamily::Scalabrino => write!(f, "Scalabrino"),
            MetricFamily::BW => write!(f, "BW"),
            MetricFamily::Posnett => write!(f, "Posnett"),
        }
    }
}

/// Aggregation qualifier attached to some Scalabrino and BW metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Minimum,
    Maximum,
    Average,
    Standard,
    Normalized,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Minimum => "minimum",
            StatType::Maximum => "maximum",
            StatType::Average => "average",
            StatType::Standard => "standard",
            StatType::Normalized => "normalized",
        }
    }

    /// Capitalized form used in human-readable labels ("Minimum")
    pub fn label(&self) -> &'static str {
        match self {
            StatType::Minimum => "Minimum",
            StatType::Maximum => "Maximum",
            StatType::Average => "Average",
            StatType::Standard => "Standard",
            StatType::Normalized => "Normalized",
        }
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decoded line of engine output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub family: MetricFamily,
    pub base_name: String,
    pub stat_type: Option<StatType>,
    pub id: String,
    /// `None` when the engine printed something that is not a number
    pub value: Option<f64>,
}

impl MetricRecord {
    /// Build a record, deriving its id from the name and statistic type
    pub fn new(
        family: MetricFamily,
        base_name: impl Into<String>,
        stat_type: Option<StatType>,
        value: Option<f64>,
    ) -> Self {
        let base_name = base_name.into();
        let id = crate::metrics::metric_id(&base_name, stat_type);
        Self {
            family,
            base_name,
            stat_type,
            id,
            value,
        }
    }

    /// Human-readable label, e.g. "Comments readability Minimum"
    pub fn label(&self) -> String {
        match self.stat_type {
            Some(stat) => format!("{} {}", self.base_name, stat.label()),
            None => self.base_name.clone(),
        }
    }
}

/// Per-family metric values keyed by metric id
pub type FamilyMetrics = BTreeMap<String, Option<f64>>;

/// Nested result of one readability analysis.
///
/// Always carries all three families, even when the engine reported
/// nothing for one of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricTree {
    families: BTreeMap<MetricFamily, FamilyMetrics>,
}

impl Default for MetricTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricTree {
    pub fn new() -> Self {
        Self {
            families: MetricFamily::ALL
                .iter()
                .map(|family| (*family, FamilyMetrics::new()))
                .collect(),
        }
    }

    /// Metrics of one family
    pub fn family(&self, family: MetricFamily) -> &FamilyMetrics {
        static EMPTY: FamilyMetrics = FamilyMetrics::new();
        self.families.get(&family).unwrap_or(&EMPTY)
    }

    pub(crate) fn family_mut(&mut self, family: MetricFamily) -> &mut FamilyMetrics {
        self.families.entry(family).or_default()
    }

    /// Value of a metric; outer `None` when the id is absent
    pub fn get(&self, family: MetricFamily, id: &str) -> Option<Option<f64>> {
        self.family(family).get(id).copied()
    }

    /// Value of a metric when it is present and numeric
    pub fn value(&self, family: MetricFamily, id: &str) -> Option<f64> {
        self.get(family, id).flatten()
    }

    /// Overwrite a single slot
    pub fn set(&mut self, family: MetricFamily, id: impl Into<String>, value: Option<f64>) {
        self.family_mut(family).insert(id.into(), value);
    }

    /// Derived readability score of a family, if computed
    pub fn readability(&self, family: MetricFamily) -> Option<f64> {
        self.value(family, READABILITY_KEY)
    }

    /// Iterate families in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (MetricFamily, &FamilyMetrics)> {
        self.families.iter().map(|(family, metrics)| (*family, metrics))
    }

    /// Total number of metric slots across all families
    pub fn len(&self) -> usize {
        self.families.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a full analysis: the metric tree plus non-fatal failures
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadabilityReport {
    pub metrics: MetricTree,
    /// Derived scores that could not be computed (the tree stays valid)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ReadabilityReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
