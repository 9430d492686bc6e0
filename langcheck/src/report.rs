//! Report types.
//!
//! Reports are plain data built before anything is rendered, so tests can
//! assert on counts and findings rather than on text.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::InputError;
use crate::language::LanguageTag;
use crate::syntax::SyntaxError;

/// Why a record failed the consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FindingKind {
    /// The record parsed but its dominant language is not the expected one.
    LanguageMismatch,
    /// The record's bytes are not a valid content record.
    ParseError,
}

/// A record that failed the consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Finding {
    /// Name of the directory the record belongs to.
    pub directory: String,
    pub record_id: String,
    pub path: Option<PathBuf>,
    pub kind: FindingKind,
    /// Classifier verdict; [`LanguageTag::Error`] for parse errors.
    pub detected: LanguageTag,
    pub expected: LanguageTag,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Format the finding for human-readable output:
    /// `{directory}/{record_id}: {detected} -> {expected}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match self.kind {
            FindingKind::LanguageMismatch => format!(
                "{}/{}: {} -> {}",
                self.directory, self.record_id, self.detected, self.expected
            ),
            FindingKind::ParseError => format!(
                "{}/{}: {} -> {} ({})",
                self.directory, self.record_id, self.detected, self.expected, self.message
            ),
        }
    }

    /// Ordering key for display.
    fn sort_key(&self) -> (&str, &str, FindingKind) {
        (&self.directory, &self.record_id, self.kind)
    }
}

/// Pass/fail counts for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct DirectorySummary {
    pub directory: String,
    pub expected: LanguageTag,
    /// Records classified as the expected language.
    pub passed: usize,
    /// Records classified as another language.
    pub failed: usize,
    /// Records that could not be parsed; not part of `passed` or `failed`.
    pub errors: usize,
}

impl DirectorySummary {
    #[must_use]
    pub fn new(directory: impl Into<String>, expected: LanguageTag) -> Self {
        Self {
            directory: directory.into(),
            expected,
            passed: 0,
            failed: 0,
            errors: 0,
        }
    }

    /// Every record attempted in this directory.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.passed + self.failed + self.errors
    }
}

/// Result of a language-consistency run.
///
/// `ok` is false when any finding or input error exists.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ConsistencyReport {
    /// Number of records attempted, including those that failed to parse.
    pub checked_records: usize,
    pub ok: bool,
    /// One summary per directory, in configuration order.
    pub directories: Vec<DirectorySummary>,
    /// Failing records, sorted by directory then record id.
    pub findings: Vec<Finding>,
    /// Directories or records that could not be found or read.
    pub input_errors: Vec<InputError>,
}

impl ConsistencyReport {
    #[must_use]
    pub fn new(
        directories: Vec<DirectorySummary>,
        mut findings: Vec<Finding>,
        input_errors: Vec<InputError>,
    ) -> Self {
        findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let checked_records = directories.iter().map(DirectorySummary::records).sum();
        let ok = findings.is_empty() && input_errors.is_empty();
        Self {
            checked_records,
            ok,
            directories,
            findings,
            input_errors,
        }
    }

    /// Language mismatches only.
    pub fn mismatches(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::LanguageMismatch)
    }

    /// Parse errors only.
    pub fn parse_errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::ParseError)
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.directories.iter().map(|d| d.passed).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.directories.iter().map(|d| d.failed).sum()
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.directories.iter().map(|d| d.errors).sum()
    }

    /// Summary of one directory by name.
    #[must_use]
    pub fn directory(&self, name: &str) -> Option<&DirectorySummary> {
        self.directories.iter().find(|d| d.directory == name)
    }
}

/// A record that failed the structural check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SyntaxFailure {
    pub directory: String,
    pub record_id: String,
    pub path: Option<PathBuf>,
    pub error: SyntaxError,
}

impl SyntaxFailure {
    /// `{directory}/{record_id}`, the display location of the record.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}/{}", self.directory, self.record_id)
    }
}

/// Structural check counts for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SyntaxDirectorySummary {
    pub directory: String,
    pub passed: usize,
    pub failed: usize,
}

impl SyntaxDirectorySummary {
    #[must_use]
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            passed: 0,
            failed: 0,
        }
    }

    /// Share of passing records in percent; `None` for an empty directory.
    #[must_use]
    pub fn success_rate(&self) -> Option<f64> {
        percent(self.passed, self.passed + self.failed)
    }
}

/// Result of a structural check run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct SyntaxReport {
    pub checked_files: usize,
    pub passed: usize,
    pub failed: usize,
    pub ok: bool,
    pub directories: Vec<SyntaxDirectorySummary>,
    /// Failing records, sorted by directory then record id.
    pub failures: Vec<SyntaxFailure>,
    pub input_errors: Vec<InputError>,
}

impl SyntaxReport {
    #[must_use]
    pub fn new(
        directories: Vec<SyntaxDirectorySummary>,
        mut failures: Vec<SyntaxFailure>,
        input_errors: Vec<InputError>,
    ) -> Self {
        failures.sort_by(|a, b| {
            (&a.directory, &a.record_id).cmp(&(&b.directory, &b.record_id))
        });
        let passed = directories.iter().map(|d| d.passed).sum();
        let failed = directories.iter().map(|d| d.failed).sum();
        let ok = failures.is_empty() && input_errors.is_empty();
        Self {
            checked_files: passed + failed,
            passed,
            failed,
            ok,
            directories,
            failures,
            input_errors,
        }
    }

    /// Failures grouped by error message, in first-seen order.
    #[must_use]
    pub fn failures_by_message(&self) -> Vec<(&str, Vec<&SyntaxFailure>)> {
        let mut groups: Vec<(&str, Vec<&SyntaxFailure>)> = Vec::new();
        for failure in &self.failures {
            let message = failure.error.message.as_str();
            match groups.iter_mut().find(|(m, _)| *m == message) {
                Some((_, members)) => members.push(failure),
                None => groups.push((message, vec![failure])),
            }
        }
        groups
    }
}

/// `part / whole` in percent, or `None` when `whole` is zero.
fn percent(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    let part = f64::from(u32::try_from(part).unwrap_or(u32::MAX));
    let whole = f64::from(u32::try_from(whole).unwrap_or(u32::MAX));
    Some(part / whole * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(directory: &str, id: &str, kind: FindingKind) -> Finding {
        Finding {
            directory: directory.to_owned(),
            record_id: id.to_owned(),
            path: None,
            kind,
            detected: LanguageTag::English,
            expected: LanguageTag::Chinese,
            message: String::new(),
        }
    }

    #[test]
    fn test_report_counts_and_sorting() {
        let mut zh = DirectorySummary::new("zh", LanguageTag::Chinese);
        zh.passed = 3;
        zh.failed = 1;
        zh.errors = 1;
        let report = ConsistencyReport::new(
            vec![zh],
            vec![
                finding("zh", "b", FindingKind::ParseError),
                finding("zh", "a", FindingKind::LanguageMismatch),
            ],
            vec![],
        );
        assert_eq!(report.checked_records, 5);
        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.errors(), 1);
        assert!(!report.ok);
        assert_eq!(report.findings[0].record_id, "a");
        assert_eq!(report.mismatches().count(), 1);
        assert_eq!(report.parse_errors().count(), 1);
    }

    #[test]
    fn test_format_mismatch() {
        let f = finding("zh", "abc", FindingKind::LanguageMismatch);
        assert_eq!(f.format_human_readable(), "zh/abc: english -> chinese");
    }

    #[test]
    fn test_success_rate() {
        let mut summary = SyntaxDirectorySummary::new("en");
        assert_eq!(summary.success_rate(), None);
        summary.passed = 3;
        summary.failed = 1;
        let rate = summary.success_rate().unwrap();
        assert!((rate - 75.0).abs() < 1e-9);
    }
}
