//! Record sources.
//!
//! The checker consumes [`RecordGroup`]s and never touches the filesystem
//! itself. The `fs` module builds groups from the configured directories;
//! tests and embedders can build them directly from in-memory bytes.

pub mod fs;

use std::path::PathBuf;

use crate::config::LanguageDirectory;
use crate::error::InputError;
use crate::language::LanguageTag;

/// The raw, unparsed bytes of one content record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Opaque content identifier (the file stem on disk).
    pub id: String,
    /// Where the bytes came from, if anywhere.
    pub path: Option<PathBuf>,
    pub bytes: Vec<u8>,
}

impl RawRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            path: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// All records of one directory, with the language they are expected to be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup {
    /// Directory name used in reports.
    pub directory: String,
    pub expected: LanguageTag,
    pub records: Vec<RawRecord>,
    /// Inputs of this directory that could not be found or read.
    pub input_errors: Vec<InputError>,
}

impl RecordGroup {
    #[must_use]
    pub fn new(directory: impl Into<String>, expected: LanguageTag) -> Self {
        Self {
            directory: directory.into(),
            expected,
            records: Vec::new(),
            input_errors: Vec::new(),
        }
    }

    /// An empty group for a configured directory.
    #[must_use]
    pub fn for_directory(dir: &LanguageDirectory) -> Self {
        Self::new(dir.name.clone(), dir.expected)
    }

    #[must_use]
    pub fn with_record(mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.records.push(RawRecord::new(id, bytes));
        self
    }
}
