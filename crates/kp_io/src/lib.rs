//! kp_io: text formats and file output for the converter.
//!
//! - `jooken`: source instances (`n` / `idx profit weight` x n / `capacity`)
//! - `classic`: classic instances (`n capacity` / `profit weight` x n)
//! - `solution`: flexible solution files with per-line disambiguation
//! - `atomic`: temp-file + rename writes, race-tolerant directory creation
//! - `canonical_json`: sorted-key compact JSON for result records
//!
//! Every parser has a pure `parse_*(&str)` entry point and a thin
//! `read_*(&Path)` wrapper; only the wrappers touch the filesystem.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use kp_core::{ErrorKind, FormatError};
use thiserror::Error;

/// Unified error for kp_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be read.
    #[error("read {path}: {msg}")]
    Read { path: String, msg: String },

    /// File or directory could not be written.
    #[error("write {path}: {msg}")]
    Write { path: String, msg: String },

    /// Path-level problems (no parent, not a directory).
    #[error("path error: {0}")]
    Path(String),

    /// File content violates its format.
    #[error("{path}: {source}")]
    Format {
        path: String,
        #[source]
        source: FormatError,
    },

    /// JSON serialization failure.
    #[error("json error: {0}")]
    Json(String),
}

impl IoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::Format { .. } => ErrorKind::Format,
            IoError::Json(_) => ErrorKind::Value,
            IoError::Read { .. } | IoError::Write { .. } | IoError::Path(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn format(path: &Path, source: FormatError) -> Self {
        IoError::Format { path: path.display().to_string(), source }
    }
}

pub type IoResult<T> = Result<T, IoError>;

#[cfg(feature = "serde")]
impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}

pub mod atomic;
#[cfg(feature = "serde")]
pub mod canonical_json;
pub mod classic;
pub mod jooken;
pub mod solution;

/// Read a file as text, dropping byte sequences that are not valid UTF-8.
pub fn read_text_lossy(path: &Path) -> IoResult<String> {
    let bytes = fs::read(path).map_err(|e| IoError::Read {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %path.display(), "dropping invalid UTF-8 bytes");
            String::from_utf8_lossy(e.as_bytes()).replace('\u{FFFD}', "")
        }
    })
}

/// Trimmed, non-blank lines in file order.
pub(crate) fn non_blank_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
