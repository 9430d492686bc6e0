//! # langcheck
//!
//! Language-consistency validator for multilingual JSON description files.
//!
//! Each record is a list of `{title, body}` sections stored under a directory
//! that determines the language it must be written in. The checker extracts
//! the record's text, classifies its dominant script over four target
//! languages (Chinese, English, Russian, Korean) and reports records whose
//! language does not match their directory.
//!
//! The crate separates the **core checks** (input-agnostic, over
//! [`RecordGroup`]s) from the **filesystem source** that builds those groups
//! from a configured directory table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use langcheck::{CheckConfig, check_fs};
//!
//! let config = CheckConfig::standard_layout(Path::new("public/locales"));
//! let report = check_fs(&config).unwrap();
//! println!("Records checked: {}", report.checked_records);
//! for finding in report.mismatches() {
//!     println!("{}", finding.format_human_readable());
//! }
//! println!("OK: {}", report.ok);
//! ```
//!
//! In-memory records work the same way, without touching a filesystem:
//!
//! ```rust
//! use langcheck::{ClassifierConfig, LanguageTag, RecordGroup, check_groups};
//!
//! let group = RecordGroup::new("en", LanguageTag::English)
//!     .with_record("cafe", r#"{"sections": [{"title": "Menu", "body": "Coffee"}]}"#);
//! let report = check_groups(&[group], &ClassifierConfig::default());
//! assert_eq!(report.checked_records, 1);
//! ```

mod checker;
mod classifier;
mod config;
mod error;
mod language;
pub mod output;
mod record;
pub mod repair;
mod report;
mod strategy;
mod syntax;

pub use checker::{RecordVerdict, check_groups, check_record, check_syntax_groups};
pub use classifier::{
    ClassifierConfig, DEFAULT_MIN_LATIN_LETTERS, DEFAULT_SCRIPT_SHARE_PERCENT, ScriptCounts,
    classify,
};
pub use config::{CheckConfig, DESCRIPTIONS_DIR, LanguageDirectory, standard_directories};
pub use error::{ConfigError, InputError, InputErrorKind};
pub use language::{LanguageTag, ParseLanguageTagError};
pub use record::{ContentRecord, Section};
pub use report::{
    ConsistencyReport, DirectorySummary, Finding, FindingKind, SyntaxDirectorySummary,
    SyntaxFailure, SyntaxReport,
};
pub use strategy::fs::{load_groups, record_id_for};
pub use strategy::{RawRecord, RecordGroup};
pub use syntax::{SyntaxCategory, SyntaxError, check_syntax, count_typographic_quotes, parse_record};

/// Check the language of every record in the configured directories.
///
/// This is the primary public API.
///
/// # Errors
///
/// Returns an error if the configuration is invalid (no directories,
/// duplicate names, non-target expectations, bad thresholds or globs).
/// Missing directories, missing expected records and unreadable files are
/// not errors: they are reported in `report.input_errors` and skipped.
pub fn check_fs(config: &CheckConfig) -> anyhow::Result<ConsistencyReport> {
    let groups = load_groups(config)?;
    Ok(check_groups(&groups, &config.classifier))
}

/// Check that every record in the configured directories is a valid content record.
///
/// # Errors
///
/// Returns an error if the configuration is invalid; see [`check_fs`].
pub fn check_syntax_fs(config: &CheckConfig) -> anyhow::Result<SyntaxReport> {
    let groups = load_groups(config)?;
    Ok(check_syntax_groups(&groups))
}
