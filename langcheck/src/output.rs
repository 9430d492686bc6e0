//! Shared output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `ConsistencyReport` and
//! `SyntaxReport`. Colors are left to the CLI.

use std::io::Write;

use serde::Serialize;

use crate::report::{ConsistencyReport, SyntaxReport};

/// Format any report as pretty JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize>(report: &T, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

fn write_banner(writer: &mut dyn Write, title: &str) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  {title}")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    Ok(())
}

fn write_section(writer: &mut dyn Write, title: &str) -> anyhow::Result<()> {
    writeln!(writer, "{}", "-".repeat(80))?;
    writeln!(writer, "  {title}")?;
    writeln!(writer, "{}", "-".repeat(80))?;
    Ok(())
}

/// Format a `ConsistencyReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ConsistencyReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    write_banner(writer, "LANGUAGE CONSISTENCY CHECK")?;
    writeln!(writer, "  Records checked:  {}", report.checked_records)?;
    writeln!(writer, "  Passed:           {}", report.passed())?;
    writeln!(writer, "  Mismatches:       {}", report.failed())?;
    writeln!(writer, "  Parse errors:     {}", report.errors())?;
    writeln!(writer, "  Input errors:     {}", report.input_errors.len())?;
    writeln!(writer)?;

    write_section(writer, "BY DIRECTORY")?;
    for dir in &report.directories {
        writeln!(
            writer,
            "  {:<12} expected {:<8} {} passed, {} failed, {} error(s)",
            dir.directory,
            dir.expected.as_str(),
            dir.passed,
            dir.failed,
            dir.errors
        )?;
    }
    writeln!(writer)?;

    if !report.input_errors.is_empty() {
        write_section(writer, "INPUT ERRORS (inputs that could not be checked)")?;
        for err in &report.input_errors {
            writeln!(writer, "{}", err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.findings.is_empty() {
        write_section(writer, "FINDINGS (detected -> expected)")?;
        for finding in &report.findings {
            writeln!(writer, "{}", finding.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} records match their expected language",
            report.checked_records
        )?;
    } else {
        if report.failed() > 0 {
            writeln!(
                writer,
                "\u{2717} {} record(s) written in the wrong language",
                report.failed()
            )?;
        }
        if report.errors() > 0 {
            writeln!(
                writer,
                "\u{2717} {} record(s) could not be parsed; run the syntax check for details",
                report.errors()
            )?;
        }
        if !report.input_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} input(s) missing or unreadable",
                report.input_errors.len()
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

/// Format a `SyntaxReport` as human-readable plain text to a writer.
///
/// Failures are grouped by error message.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_syntax_human(report: &SyntaxReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    write_banner(writer, "JSON SYNTAX VALIDATION")?;
    writeln!(writer, "  Files checked:  {}", report.checked_files)?;
    writeln!(writer, "  Passed:         {}", report.passed)?;
    writeln!(writer, "  Failed:         {}", report.failed)?;
    writeln!(writer, "  Input errors:   {}", report.input_errors.len())?;
    writeln!(writer)?;

    if !report.input_errors.is_empty() {
        write_section(writer, "INPUT ERRORS (inputs that could not be checked)")?;
        for err in &report.input_errors {
            writeln!(writer, "{}", err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.failures.is_empty() {
        write_section(writer, "FAILED FILES")?;
        for (message, members) in report.failures_by_message() {
            writeln!(writer)?;
            writeln!(writer, "{message} ({} files):", members.len())?;
            for failure in members {
                writeln!(
                    writer,
                    "  - {} (line {}, column {}){}",
                    failure.location(),
                    failure.error.line,
                    failure.error.column,
                    if failure.error.typographic_quotes > 0 {
                        " [typographic quotes]"
                    } else {
                        ""
                    }
                )?;
            }
        }
        writeln!(writer)?;
    }

    write_section(writer, "SUMMARY BY DIRECTORY")?;
    for dir in &report.directories {
        match dir.success_rate() {
            Some(rate) => writeln!(
                writer,
                "  {}: {}/{} passed ({rate:.1}%)",
                dir.directory.to_uppercase(),
                dir.passed,
                dir.passed + dir.failed
            )?,
            None => writeln!(writer, "  {}: no records", dir.directory.to_uppercase())?,
        }
    }
    writeln!(writer)?;

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} files passed JSON validation",
            report.checked_files
        )?;
    } else {
        if report.failed > 0 {
            writeln!(writer, "\u{2717} {} file(s) failed JSON validation", report.failed)?;
        }
        if !report.input_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} input(s) missing or unreadable",
                report.input_errors.len()
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
