//! Language-consistency and structural checks over record groups.
//!
//! Both checks are pure functions of their inputs: every record is parsed,
//! judged and discarded on its own, and one bad record never stops the batch.

use tracing::debug;

use crate::classifier::{ClassifierConfig, classify};
use crate::language::LanguageTag;
use crate::report::{
    ConsistencyReport, DirectorySummary, Finding, FindingKind, SyntaxDirectorySummary,
    SyntaxFailure, SyntaxReport,
};
use crate::strategy::{RawRecord, RecordGroup};
use crate::syntax::{SyntaxError, parse_record};

/// The verdict for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordVerdict {
    /// Classified as the expected language.
    Pass(LanguageTag),
    /// Classified as another language.
    Mismatch(LanguageTag),
    /// The bytes are not a valid content record.
    ParseError(SyntaxError),
}

/// Parse, extract and classify one record against its expected language.
#[must_use]
pub fn check_record(
    bytes: &[u8],
    expected: LanguageTag,
    config: &ClassifierConfig,
) -> RecordVerdict {
    match parse_record(bytes) {
        Ok(record) => {
            let detected = classify(&record.extract_text(), config);
            if detected == expected {
                RecordVerdict::Pass(detected)
            } else {
                RecordVerdict::Mismatch(detected)
            }
        }
        Err(e) => RecordVerdict::ParseError(e),
    }
}

fn finding(
    group: &RecordGroup,
    record: &RawRecord,
    kind: FindingKind,
    detected: LanguageTag,
    message: String,
) -> Finding {
    Finding {
        directory: group.directory.clone(),
        record_id: record.id.clone(),
        path: record.path.clone(),
        kind,
        detected,
        expected: group.expected,
        message,
    }
}

/// Classify every record of every group and compare it to the group's expected language.
#[must_use]
pub fn check_groups(groups: &[RecordGroup], config: &ClassifierConfig) -> ConsistencyReport {
    let mut summaries = Vec::with_capacity(groups.len());
    let mut findings = Vec::new();
    let mut input_errors = Vec::new();

    for group in groups {
        let mut summary = DirectorySummary::new(group.directory.clone(), group.expected);

        for record in &group.records {
            match check_record(&record.bytes, group.expected, config) {
                RecordVerdict::Pass(detected) => {
                    debug!(directory = %group.directory, record = %record.id, %detected, "pass");
                    summary.passed += 1;
                }
                RecordVerdict::Mismatch(detected) => {
                    debug!(
                        directory = %group.directory,
                        record = %record.id,
                        %detected,
                        expected = %group.expected,
                        "language mismatch"
                    );
                    summary.failed += 1;
                    findings.push(finding(
                        group,
                        record,
                        FindingKind::LanguageMismatch,
                        detected,
                        format!("Detected {detected}, expected {}", group.expected),
                    ));
                }
                RecordVerdict::ParseError(e) => {
                    debug!(directory = %group.directory, record = %record.id, error = %e, "parse error");
                    summary.errors += 1;
                    findings.push(finding(
                        group,
                        record,
                        FindingKind::ParseError,
                        LanguageTag::Error,
                        e.message,
                    ));
                }
            }
        }

        summaries.push(summary);
        input_errors.extend(group.input_errors.iter().cloned());
    }

    ConsistencyReport::new(summaries, findings, input_errors)
}

/// Parse every record of every group without classifying it.
#[must_use]
pub fn check_syntax_groups(groups: &[RecordGroup]) -> SyntaxReport {
    let mut summaries = Vec::with_capacity(groups.len());
    let mut failures = Vec::new();
    let mut input_errors = Vec::new();

    for group in groups {
        let mut summary = SyntaxDirectorySummary::new(group.directory.clone());

        for record in &group.records {
            match parse_record(&record.bytes) {
                Ok(_) => summary.passed += 1,
                Err(error) => {
                    debug!(directory = %group.directory, record = %record.id, %error, "syntax error");
                    summary.failed += 1;
                    failures.push(SyntaxFailure {
                        directory: group.directory.clone(),
                        record_id: record.id.clone(),
                        path: record.path.clone(),
                        error,
                    });
                }
            }
        }

        summaries.push(summary);
        input_errors.extend(group.input_errors.iter().cloned());
    }

    SyntaxReport::new(summaries, failures, input_errors)
}
