use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading or parsing a leak log.
///
/// None of these are recovered inside the crate. An absent summary section
/// or a suppressed entraining leak are verdicts, not errors.
#[derive(Debug, Error)]
pub enum LeakLogError {
    #[error("leak log not found: {}", path.display())]
    MissingLogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read leak log {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed leak entry on line {line_number}: {line:?}")]
    MalformedLogLine { line_number: usize, line: String },
}

impl LeakLogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingLogFile { path, source }
        } else {
            Self::Io { path, source }
        }
    }
}
