//! Error types for language-consistency checking.

use std::path::PathBuf;

use serde::Serialize;

use crate::language::LanguageTag;

/// The kind of input-level failure that kept a record from being checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputErrorKind {
    /// A configured directory does not exist.
    MissingDirectory,
    /// A record listed in `expected_ids` is absent from a directory.
    MissingRecord,
    /// An I/O error occurred while opening or reading the file.
    Unreadable,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
}

/// An input-level error: a directory or record that could not be found or read.
///
/// These are distinct from [`Finding`](crate::Finding)s, which describe
/// records that were read and then failed to parse or classified wrongly.
/// Input errors are reported and skipped; they never abort a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct InputError {
    /// Name of the configured directory the input belongs to.
    pub directory: String,
    /// The record identifier, when the failure concerns one record.
    pub record_id: Option<String>,
    /// The path that could not be read.
    pub path: PathBuf,
    /// The kind of failure.
    pub kind: InputErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl InputError {
    #[must_use]
    pub fn new(
        directory: impl Into<String>,
        record_id: Option<String>,
        path: impl Into<PathBuf>,
        kind: InputErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            record_id,
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [input error] {}", self.path.display(), self.message)
    }
}

/// Invalid configuration, detected before any record is read.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no directories configured")]
    NoDirectories,

    #[error("directory name '{0}' is configured more than once")]
    DuplicateDirectory(String),

    #[error("directory '{directory}' expects '{tag}', which is not a target language")]
    NonTargetExpectation {
        directory: String,
        tag: LanguageTag,
    },

    #[error("script share must be between 1 and 99 percent, got {0}")]
    ShareOutOfRange(u8),

    #[error("invalid exclude glob pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}
