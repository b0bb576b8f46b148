//! Derived readability scores
//!
//! BW and Scalabrino readability come from separate engine passes and
//! degrade to `None` when the pass produced nothing usable. Posnett
//! readability is computed from three Posnett metrics and fails hard when
//! any of them is missing.

use crate::error::{ReadabilityError, ReadabilityResult};
use crate::models::{MetricFamily, MetricTree, READABILITY_KEY};
use tracing::{debug, warn};

/// Posnett model: z = 8.87 - 0.033 * volume + 0.4 * lines - 1.5 * entropy
const POSNETT_INTERCEPT: f64 = 8.87;
const POSNETT_VOLUME_WEIGHT: f64 = -0.033;
const POSNETT_LINES_WEIGHT: f64 = 0.4;
const POSNETT_ENTROPY_WEIGHT: f64 = -1.5;

/// Per-method scores printed by the method-score pass; other lines are noise
pub fn parse_method_scores(output: &str) -> Vec<f64> {
    output
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

/// Mean of the per-method scores, `None` when there are none
pub fn bw_readability(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Second tab-separated column of the first line that has one
pub fn scalabrino_readability(output: &str) -> Option<f64> {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| line.split('\t').nth(1).is_some())?;
    let field = line.split('\t').nth(1)?;
    match field.trim().parse::<f64>() {
        Ok(score) => Some(score),
        Err(_) => {
            debug!("Scalabrino score {:?} is not a number", field);
            None
        }
    }
}

/// Posnett readability from the `volume`, `lines` and `entropy` metrics
pub fn posnett_readability(tree: &MetricTree) -> ReadabilityResult<f64> {
    let input = |metric: &'static str| {
        tree.value(MetricFamily::Posnett, metric)
            .ok_or_else(|| ReadabilityError::MissingDependency {
                family: MetricFamily::Posnett,
                metric,
            })
    };
    let volume = input("volume")?;
    let lines = input("lines")?;
    let entropy = input("entropy")?;

    let z = POSNETT_INTERCEPT
        + POSNETT_VOLUME_WEIGHT * volume
        + POSNETT_LINES_WEIGHT * lines
        + POSNETT_ENTROPY_WEIGHT * entropy;
    Ok(1.0 / (1.0 + z.exp()))
}

/// Raw output of the two single-score engine passes
#[derive(Debug, Clone, Default)]
pub struct DerivedScores {
    pub method_scores: Vec<f64>,
    pub scalabrino: Option<f64>,
}

impl DerivedScores {
    pub fn from_outputs(method_score_output: &str, single_score_output: &str) -> Self {
        Self {
            method_scores: parse_method_scores(method_score_output),
            scalabrino: scalabrino_readability(single_score_output),
        }
    }

    /// Write every family's `readability` key.
    ///
    /// BW and Scalabrino are written first, so a Posnett failure leaves
    /// them (and all other metrics) in place.
    pub fn apply(&self, tree: &mut MetricTree) -> ReadabilityResult<()> {
        tree.set(
            MetricFamily::BW,
            READABILITY_KEY,
            bw_readability(&self.method_scores),
        );
        tree.set(MetricFamily::Scalabrino, READABILITY_KEY, self.scalabrino);

        match posnett_readability(tree) {
            Ok(score) => {
                tree.set(MetricFamily::Posnett, READABILITY_KEY, Some(score));
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }
}
