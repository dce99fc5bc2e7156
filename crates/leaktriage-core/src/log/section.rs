use serde::{Deserialize, Serialize};

use crate::error::LeakLogError;
use crate::log::line::{normalize, symbolic_name};
use crate::log::read::LogFile;

/// Raw line prefix that opens the leak-summary section.
pub const SENTINEL: &str = "nsTraceRefcntImpl::DumpStatistics";

/// Normalized line that closes the leak-summary section.
pub const TERMINATOR: &str = "nsStringStats";

/// One object reported alive at shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeakEntry {
    pub line_number: usize,
    pub name: String,
}

/// Outcome of scanning a log for its leak-summary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySection {
    /// The sentinel never appeared. The binary produced no statistics dump.
    Absent,
    Present {
        entries: Vec<LeakEntry>,
        /// `false` when EOF was reached before the terminator line.
        terminated: bool,
    },
}

impl SummarySection {
    pub fn entries(&self) -> &[LeakEntry] {
        match self {
            Self::Absent => &[],
            Self::Present { entries, .. } => entries,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingSentinel,
    ScanningEntries,
    Done,
}

/// Scans `log` for the leak-summary section and collects its entries.
///
/// Lines before the sentinel are ignored unparsed. Once the sentinel is
/// seen every line up to the terminator must carry a symbolic name; the
/// first one that does not aborts the scan.
pub fn scan(log: &mut LogFile) -> Result<SummarySection, LeakLogError> {
    let mut state = ScanState::SeekingSentinel;
    let mut entries = Vec::new();

    while state != ScanState::Done {
        let Some((line_number, raw)) = log.next_line()? else {
            break;
        };

        match state {
            ScanState::SeekingSentinel => {
                if raw.starts_with(SENTINEL) {
                    tracing::debug!(line_number, "found leak summary sentinel");
                    state = ScanState::ScanningEntries;
                }
            }
            ScanState::ScanningEntries => {
                let line = normalize(&raw);
                if line == TERMINATOR {
                    tracing::debug!(line_number, "found leak summary terminator");
                    state = ScanState::Done;
                    continue;
                }

                let name = symbolic_name(&line, line_number)?;
                tracing::trace!(line_number, name, "leak entry");
                entries.push(LeakEntry {
                    line_number,
                    name: name.to_string(),
                });
            }
            ScanState::Done => break,
        }
    }

    match state {
        ScanState::SeekingSentinel => {
            tracing::debug!(path = %log.path().display(), "no leak summary section");
            Ok(SummarySection::Absent)
        }
        ScanState::ScanningEntries => {
            tracing::warn!(
                path = %log.path().display(),
                entries = entries.len(),
                "leak summary section ran to end of file without terminator"
            );
            Ok(SummarySection::Present {
                entries,
                terminated: false,
            })
        }
        ScanState::Done => Ok(SummarySection::Present {
            entries,
            terminated: true,
        }),
    }
}
