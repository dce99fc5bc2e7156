pub mod error;
pub mod log;
pub mod report;
pub mod rules;

use std::path::Path;

pub use error::LeakLogError;

use crate::log::{read::open_log, section::scan};
use crate::report::model::{Report, ToolInfo};
use crate::rules::classify::LeakClassifier;

pub const TOOL_NAME: &str = "leaktriage";

/// JSON schema version of leak triage reports.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Classifies the leak summary in `<log_prefix>-out`.
///
/// Returns whether a reportable leak was found and the `Leaked:` report,
/// which is empty unless the verdict is reportable.
pub fn classify(log_prefix: &Path) -> Result<(bool, String), LeakLogError> {
    let mut log = open_log(log_prefix)?;
    let section = scan(&mut log)?;
    let (_, classification) = LeakClassifier::baseline().classify(&section);

    Ok((classification.reportable, classification.report_text))
}

/// Runs the full pipeline and builds a serializable report.
pub fn inspect(log_prefix: &Path, tool: ToolInfo) -> Result<Report, LeakLogError> {
    let mut log = open_log(log_prefix)?;
    let section = scan(&mut log)?;
    let log_info = log.finish()?;

    let (buckets, classification) = LeakClassifier::baseline().classify(&section);

    tracing::info!(
        path = %log_info.path,
        verdict = %classification.verdict,
        entries = section.entries().len(),
        "classified leak log"
    );

    Ok(Report::new(tool, log_info, &section, buckets, classification))
}
