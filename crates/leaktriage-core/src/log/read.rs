use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::LeakLogError;
use crate::report::model::LogInfo;

/// Suffix appended to a log prefix to name the file the instrumented
/// binary writes its shutdown output to.
pub const COMPANION_SUFFIX: &str = "-out";

/// Returns `<prefix>-out`.
///
/// This is a plain string append: a prefix such as `run.1` becomes
/// `run.1-out`, not `run-out`.
pub fn companion_path(prefix: &Path) -> PathBuf {
    let mut raw = prefix.as_os_str().to_os_string();
    raw.push(COMPANION_SUFFIX);
    PathBuf::from(raw)
}

/// An open companion log, read sequentially exactly once.
///
/// Every byte handed out by [`LogFile::next_line`] is also fed into a
/// sha256 hasher, so [`LogFile::finish`] can fingerprint the file without
/// a second read. The handle is closed when this value is dropped.
pub struct LogFile {
    path: PathBuf,
    reader: BufReader<File>,
    hasher: Sha256,
    bytes_read: u64,
    line_number: usize,
}

impl LogFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next raw line, trailing `\n` included.
    ///
    /// Returns the 1-based line number with the line, or `None` at EOF.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn next_line(&mut self) -> Result<Option<(usize, String)>, LeakLogError> {
        let mut buf = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| LeakLogError::io(&self.path, e))?;

        if n == 0 {
            return Ok(None);
        }

        self.hasher.update(&buf);
        self.bytes_read += n as u64;
        self.line_number += 1;

        Ok(Some((
            self.line_number,
            String::from_utf8_lossy(&buf).into_owned(),
        )))
    }

    /// Consumes the rest of the file into the fingerprint and closes it.
    pub fn finish(mut self) -> Result<LogInfo, LeakLogError> {
        let rest = io::copy(&mut self.reader, &mut self.hasher)
            .map_err(|e| LeakLogError::io(&self.path, e))?;

        Ok(LogInfo {
            path: self.path.display().to_string(),
            size_bytes: self.bytes_read + rest,
            hash: hex::encode(self.hasher.finalize()),
        })
    }
}

/// Opens the companion log for `prefix`.
///
/// A missing file surfaces as [`LeakLogError::MissingLogFile`]; the caller
/// decides whether that is a pass or an infrastructure failure.
pub fn open_log(prefix: &Path) -> Result<LogFile, LeakLogError> {
    let path = companion_path(prefix);
    let file = File::open(&path).map_err(|e| LeakLogError::io(&path, e))?;

    tracing::debug!(path = %path.display(), "opened leak log");

    Ok(LogFile {
        path,
        reader: BufReader::new(file),
        hasher: Sha256::new(),
        bytes_read: 0,
        line_number: 0,
    })
}
