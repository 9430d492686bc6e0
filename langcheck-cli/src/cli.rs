use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use langcheck::output::{write_human, write_json, write_syntax_human};
use langcheck::repair::{RepairOutcome, repair_record};
use langcheck::{
    CheckConfig, ClassifierConfig, LanguageTag, RecordGroup, ScriptCounts, SyntaxError,
    check_fs, check_syntax_fs, load_groups, parse_record, standard_directories,
};

/// Exit status when every check passed.
pub const EXIT_OK: u8 = 0;
/// Exit status when the run found problems in the data.
pub const EXIT_FINDINGS: u8 = 1;
/// Exit status for configuration or usage failures.
pub const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "langcheck",
    version,
    about = "Validate the language and syntax of multilingual description files"
)]
pub struct Cli {
    /// Locale root holding `<code>/descriptions` directories
    #[arg(long, global = true, default_value = "public/locales")]
    pub root: PathBuf,

    /// YAML configuration file (replaces the standard directory table)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that every record is written in its directory's language (default)
    Languages,
    /// Check that every record is a valid JSON content record
    Syntax,
    /// Rebuild records broken by typographic or unescaped quotes
    Repair {
        /// Write repaired records back to disk (default: dry run)
        #[arg(long)]
        write: bool,
    },
    /// Classify one record file, or plain text from stdin with `-`
    Classify {
        /// Record file, or `-` for stdin
        input: PathBuf,
    },
}

/// Build the check configuration from `--config` and `--root`.
///
/// A configuration file without directories falls back to the standard
/// layout under `--root`.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or parsed.
pub fn build_config(cli: &Cli) -> Result<CheckConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckConfig::load(path)?,
        None => CheckConfig::default(),
    };
    if config.directories.is_empty() {
        config.directories = standard_directories(&cli.root);
    }
    Ok(config)
}

/// Run the selected command, writing the report to `out`.
///
/// Returns the process exit status: [`EXIT_OK`] or [`EXIT_FINDINGS`].
///
/// # Errors
///
/// Returns an error on configuration failures or when output cannot be written.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<u8> {
    if cli.format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    match cli.command.clone().unwrap_or(Command::Languages) {
        Command::Languages => {
            let config = build_config(cli)?;
            info!(directories = config.directories.len(), "checking languages");
            let report = check_fs(&config)?;
            info!(records = report.checked_records, ok = report.ok, "language check finished");
            match cli.format {
                OutputFormat::Human => write_human(&report, out)?,
                OutputFormat::Json => write_json(&report, out)?,
            }
            Ok(status(report.ok))
        }
        Command::Syntax => {
            let config = build_config(cli)?;
            info!(directories = config.directories.len(), "checking syntax");
            let report = check_syntax_fs(&config)?;
            info!(files = report.checked_files, ok = report.ok, "syntax check finished");
            match cli.format {
                OutputFormat::Human => write_syntax_human(&report, out)?,
                OutputFormat::Json => write_json(&report, out)?,
            }
            Ok(status(report.ok))
        }
        Command::Repair { write } => {
            let config = build_config(cli)?;
            let groups = load_groups(&config)?;
            let entries = repair_groups(&groups, write);
            match cli.format {
                OutputFormat::Human => write_repair_human(&entries, write, out)?,
                OutputFormat::Json => write_json(&entries, out)?,
            }
            Ok(status(
                entries.iter().all(|e| e.status != RepairStatus::Failed),
            ))
        }
        Command::Classify { input } => {
            let config = build_config(cli)?;
            config.validate()?;
            run_classify(&input, &config.classifier, cli.format, out)
        }
    }
}

const fn status(ok: bool) -> u8 {
    if ok { EXIT_OK } else { EXIT_FINDINGS }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    /// Repaired and written back.
    Repaired,
    /// Repairable; not written because of a dry run.
    WouldRepair,
    /// Broken and not repairable.
    Failed,
}

/// Outcome of repairing one broken record.
#[derive(Debug, Clone, Serialize)]
pub struct RepairEntry {
    pub directory: String,
    pub record_id: String,
    pub path: Option<PathBuf>,
    pub status: RepairStatus,
    pub sections: usize,
    pub message: String,
}

/// Try to repair every record that fails to parse. Valid records are not listed.
#[must_use]
pub fn repair_groups(groups: &[RecordGroup], write: bool) -> Vec<RepairEntry> {
    let mut entries = Vec::new();

    for group in groups {
        for record in &group.records {
            if parse_record(&record.bytes).is_ok() {
                continue;
            }

            let mut entry = RepairEntry {
                directory: group.directory.clone(),
                record_id: record.id.clone(),
                path: record.path.clone(),
                status: RepairStatus::Failed,
                sections: 0,
                message: String::new(),
            };

            let Ok(content) = std::str::from_utf8(&record.bytes) else {
                entry.message = "record is not valid UTF-8".to_owned();
                entries.push(entry);
                continue;
            };

            match repair_record(content) {
                Ok(RepairOutcome::Repaired { record: repaired, json }) => {
                    entry.sections = repaired.sections.len();
                    match (&record.path, write) {
                        (_, false) => entry.status = RepairStatus::WouldRepair,
                        (Some(path), true) => entry = write_repaired(entry, path, &json),
                        (None, true) => {
                            entry.message = "record has no path to write to".to_owned();
                        }
                    }
                }
                Ok(RepairOutcome::AlreadyValid) => continue,
                Err(e) => {
                    warn!(directory = %group.directory, record = %record.id, error = %e, "repair failed");
                    entry.message = e.to_string();
                }
            }
            entries.push(entry);
        }
    }

    entries
}

fn write_repaired(mut entry: RepairEntry, path: &Path, json: &str) -> RepairEntry {
    match std::fs::write(path, format!("{json}\n")) {
        Ok(()) => {
            info!(path = %path.display(), sections = entry.sections, "repaired");
            entry.status = RepairStatus::Repaired;
        }
        Err(e) => entry.message = format!("failed to write: {e}"),
    }
    entry
}

fn write_repair_human(entries: &[RepairEntry], write: bool, out: &mut dyn Write) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "{} No broken records found", "\u{2713}".green())?;
        return Ok(());
    }

    for entry in entries {
        let location = format!("{}/{}", entry.directory, entry.record_id);
        match entry.status {
            RepairStatus::Repaired => writeln!(
                out,
                "  {} {location}: repaired ({} sections)",
                "\u{2713}".green(),
                entry.sections
            )?,
            RepairStatus::WouldRepair => writeln!(
                out,
                "  {} {location}: would repair ({} sections)",
                "~".yellow(),
                entry.sections
            )?,
            RepairStatus::Failed => writeln!(
                out,
                "  {} {location}: {}",
                "\u{2717}".red(),
                entry.message
            )?,
        }
    }

    let fixable = entries
        .iter()
        .filter(|e| e.status != RepairStatus::Failed)
        .count();
    writeln!(out)?;
    if write {
        writeln!(out, "Repaired {fixable}/{} broken records", entries.len())?;
    } else {
        writeln!(
            out,
            "{fixable}/{} broken records can be repaired; rerun with --write to apply",
            entries.len()
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Classification {
    tag: LanguageTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    counts: Option<ScriptCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SyntaxError>,
}

fn run_classify(
    input: &Path,
    classifier: &ClassifierConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<u8> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        let bytes = std::fs::read(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        match parse_record(&bytes) {
            Ok(record) => record.extract_text(),
            Err(e) => {
                match format {
                    OutputFormat::Human => writeln!(
                        out,
                        "{} {}: {}",
                        "\u{2717}".red(),
                        input.display(),
                        e.format_human_readable()
                    )?,
                    OutputFormat::Json => write_json(
                        &Classification {
                            tag: LanguageTag::Error,
                            counts: None,
                            error: Some(e),
                        },
                        out,
                    )?,
                }
                return Ok(EXIT_FINDINGS);
            }
        }
    };

    let counts = ScriptCounts::of(&text);
    let classification = Classification {
        tag: counts.classify(classifier),
        counts: Some(counts),
        error: None,
    };
    match format {
        OutputFormat::Human => writeln!(
            out,
            "{} (cjk={}, cyrillic={}, hangul={}, latin={})",
            classification.tag.as_str().bold(),
            counts.cjk,
            counts.cyrillic,
            counts.hangul,
            counts.latin
        )?,
        OutputFormat::Json => write_json(&classification, out)?,
    }
    Ok(EXIT_OK)
}
