//! Classification of multi-metric engine output lines
//!
//! Every line is self-describing through its prefix, so classification is a
//! pure function of the line:
//!
//! | Prefix                | Family     | Statistic                         |
//! |-----------------------|------------|-----------------------------------|
//! | `New` (not `New Text Coherence`) | Scalabrino | `MIN`/`MAX`/`AVG`/`Standard`/`Normalized` suffix |
//! | `BW`                  | BW         | `Avg`/`Max` prefix                |
//! | `Posnett`             | Posnett    | none                              |
//!
//! Anything else is discarded.

use crate::models::{MetricFamily, MetricRecord, StatType};
use tracing::debug;

const SCALABRINO_PREFIX: &str = "New";
const TEXT_COHERENCE_PREFIX: &str = "New Text Coherence";
const BW_PREFIX: &str = "BW";
const POSNETT_PREFIX: &str = "Posnett";

const SCALABRINO_SUFFIXES: &[(&str, StatType)] = &[
    ("MIN", StatType::Minimum),
    ("MAX", StatType::Maximum),
    ("AVG", StatType::Average),
    ("Standard", StatType::Standard),
    ("Normalized", StatType::Normalized),
];

const BW_QUALIFIERS: &[(&str, StatType)] = &[("Avg", StatType::Average), ("Max", StatType::Maximum)];

/// BW reports indentation as "indentation length"; other families say "indentation"
const BW_RENAMES: &[(&str, &str)] = &[("indentation length", "indentation")];

/// Result of classifying one engine output line
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Discarded,
    Record(MetricRecord),
}

impl Classified {
    pub fn into_record(self) -> Option<MetricRecord> {
        match self {
            Classified::Record(record) => Some(record),
            Classified::Discarded => None,
        }
    }
}

/// Decode one line of multi-metric output
pub fn classify_line(line: &str) -> Classified {
    let line = line.trim();
    let Some((metric, rest)) = line.split_once(':') else {
        return Classified::Discarded;
    };
    let metric = metric.trim_end();

    let (family, base_name, stat_type) = if let Some(name) = metric
        .strip_prefix(SCALABRINO_PREFIX)
        .filter(|_| !metric.starts_with(TEXT_COHERENCE_PREFIX))
    {
        let (name, stat) = split_scalabrino_suffix(strip_separator(name));
        (MetricFamily::Scalabrino, name, stat)
    } else if let Some(name) = metric.strip_prefix(BW_PREFIX) {
        let (name, stat) = split_bw_qualifier(strip_separator(name));
        let name = BW_RENAMES
            .iter()
            .find(|(from, _)| *from == name)
            .map_or(name, |(_, to)| *to);
        (MetricFamily::BW, name, stat)
    } else if let Some(name) = metric.strip_prefix(POSNETT_PREFIX) {
        (MetricFamily::Posnett, strip_separator(name), None)
    } else {
        return Classified::Discarded;
    };

    Classified::Record(MetricRecord::new(
        family,
        base_name,
        stat_type,
        parse_value(rest),
    ))
}

/// Classify many lines, keeping only records
pub fn classify_output(output: &str) -> impl Iterator<Item = MetricRecord> + '_ {
    output.lines().filter_map(|line| classify_line(line).into_record())
}

/// The engine separates family tag and name with one space; tolerate none
fn strip_separator(name: &str) -> &str {
    name.strip_prefix(' ').unwrap_or(name)
}

fn split_scalabrino_suffix(name: &str) -> (&str, Option<StatType>) {
    for (suffix, stat) in SCALABRINO_SUFFIXES {
        if let Some(base) = name.strip_suffix(suffix) {
            return (base.strip_suffix(' ').unwrap_or(base), Some(*stat));
        }
    }
    (name, None)
}

fn split_bw_qualifier(name: &str) -> (&str, Option<StatType>) {
    for (qualifier, stat) in BW_QUALIFIERS {
        if let Some(base) = name.strip_prefix(qualifier) {
            return (strip_separator(base), Some(*stat));
        }
    }
    (name, None)
}

/// Value between the first and the next `:`; unparseable values become `None`
fn parse_value(rest: &str) -> Option<f64> {
    let raw = rest.split(':').next().unwrap_or_default().trim();
    match raw.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Metric value {:?} is not a number", raw);
            None
        }
    }
}
