use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::log::section::SummarySection;
use crate::rules::classify::LeakBuckets;

/// Top-level leak triage report.
///
/// Deterministic for identical log contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub log: LogInfo,
    pub section: SectionInfo,
    pub buckets: LeakBuckets,
    pub classification: ClassificationInfo,
}

impl Report {
    pub fn new(
        tool: ToolInfo,
        log: LogInfo,
        section: &SummarySection,
        buckets: LeakBuckets,
        classification: ClassificationInfo,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            log,
            section: SectionInfo::from(section),
            buckets,
            classification,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// The companion log this report was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogInfo {
    pub path: String,
    pub size_bytes: u64,
    /// Hex sha256 of the whole file.
    pub hash: String,
}

/// Shape of the leak-summary section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SectionInfo {
    pub present: bool,
    pub terminated: bool,
    pub entry_count: usize,
}

impl From<&SummarySection> for SectionInfo {
    fn from(section: &SummarySection) -> Self {
        match section {
            SummarySection::Absent => Self::default(),
            SummarySection::Present {
                entries,
                terminated,
            } => Self {
                present: true,
                terminated: *terminated,
                entry_count: entries.len(),
            },
        }
    }
}

/// Final verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeakVerdict {
    NoSummary,
    Clean,
    SuppressedEntraining,
    SmallLeak,
    PriorityLeak,
}

impl LeakVerdict {
    pub fn is_reportable(self) -> bool {
        matches!(self, Self::SmallLeak | Self::PriorityLeak)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSummary => "NO_SUMMARY",
            Self::Clean => "CLEAN",
            Self::SuppressedEntraining => "SUPPRESSED_ENTRAINING",
            Self::SmallLeak => "SMALL_LEAK",
            Self::PriorityLeak => "PRIORITY_LEAK",
        }
    }
}

impl std::fmt::Display for LeakVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final classification block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationInfo {
    pub verdict: LeakVerdict,
    pub reportable: bool,
    /// `Leaked:` block; empty when nothing is reportable.
    pub report_text: String,
    pub exit_code: i32,
}

impl ClassificationInfo {
    pub fn new(verdict: LeakVerdict, report_text: String) -> Self {
        let reportable = verdict.is_reportable();
        Self {
            verdict,
            reportable,
            report_text,
            exit_code: if reportable { 2 } else { 0 },
        }
    }

    pub fn no_summary() -> Self {
        Self::new(LeakVerdict::NoSummary, String::new())
    }
}
