//! Classification engine for leak summaries.
//!
//! This module turns the entries of a leak-summary section into a verdict.
//!
//! Every entry name is checked against each suppression set on its own:
//!
//!   - in priority    → `*** Large O object <name>`
//!   - in entraining  → `*** Large K object <name>`
//!   - not in known   → `<name>` (small leak)
//!
//! The verdict then takes the first matching bucket:
//!
//!   - any priority leak    → PRIORITY_LEAK, reportable (priority + entraining text)
//!   - else any entraining  → SUPPRESSED_ENTRAINING, not reportable
//!   - else any small leak  → SMALL_LEAK, reportable (small text)
//!   - else                 → CLEAN
//!
//! A log without a summary section is NO_SUMMARY. Output depends only on
//! the entries, never on evaluation order across calls.

use serde::{Deserialize, Serialize};

use crate::log::section::{LeakEntry, SummarySection};
use crate::report::model::{ClassificationInfo, LeakVerdict};
use crate::rules::catalog::{self, SuppressionSet};

/// Heading that opens every non-empty leak report.
pub const REPORT_HEADING: &str = "Leaked:";

/// Messages collected per bucket, in log order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakBuckets {
    pub priority: Vec<String>,
    pub entraining: Vec<String>,
    pub small: Vec<String>,
}

/// Applies the suppression sets to leak entries.
#[derive(Debug, Clone, Copy)]
pub struct LeakClassifier<'a> {
    known: &'a SuppressionSet,
    entraining: &'a SuppressionSet,
    priority: &'a SuppressionSet,
}

impl LeakClassifier<'static> {
    /// Classifier over the built-in catalog.
    pub fn baseline() -> Self {
        Self::new(
            catalog::known(),
            catalog::known_entraining(),
            catalog::priority(),
        )
    }
}

impl<'a> LeakClassifier<'a> {
    pub fn new(
        known: &'a SuppressionSet,
        entraining: &'a SuppressionSet,
        priority: &'a SuppressionSet,
    ) -> Self {
        Self {
            known,
            entraining,
            priority,
        }
    }

    /// Sorts each entry into every bucket it qualifies for.
    pub fn bucket(&self, entries: &[LeakEntry]) -> LeakBuckets {
        let mut buckets = LeakBuckets::default();

        for entry in entries {
            let name = entry.name.as_str();
            if self.priority.contains(name) {
                buckets.priority.push(format!("*** Large O object {name}"));
            }
            if self.entraining.contains(name) {
                buckets.entraining.push(format!("*** Large K object {name}"));
            }
            if !self.known.contains(name) {
                buckets.small.push(name.to_string());
            }
        }

        buckets
    }

    /// Buckets a scanned section and derives its verdict.
    pub fn classify(&self, section: &SummarySection) -> (LeakBuckets, ClassificationInfo) {
        if !section.is_present() {
            return (LeakBuckets::default(), ClassificationInfo::no_summary());
        }

        let buckets = self.bucket(section.entries());
        let classification = verdict(&buckets);
        (buckets, classification)
    }
}

/// Derives the final verdict from filled buckets.
///
/// Exit code mapping:
/// - not reportable → 0
/// - reportable     → 2
pub fn verdict(buckets: &LeakBuckets) -> ClassificationInfo {
    let (level, lines): (LeakVerdict, Vec<&str>) = if !buckets.priority.is_empty() {
        (
            LeakVerdict::PriorityLeak,
            buckets
                .priority
                .iter()
                .chain(&buckets.entraining)
                .map(String::as_str)
                .collect(),
        )
    } else if !buckets.entraining.is_empty() {
        (LeakVerdict::SuppressedEntraining, vec![])
    } else if !buckets.small.is_empty() {
        (
            LeakVerdict::SmallLeak,
            buckets.small.iter().map(String::as_str).collect(),
        )
    } else {
        (LeakVerdict::Clean, vec![])
    };

    ClassificationInfo::new(level, render_leak_report(&lines))
}

/// Renders `Leaked:` followed by one message per line.
///
/// No messages renders to the empty string.
pub fn render_leak_report(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from(REPORT_HEADING);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
