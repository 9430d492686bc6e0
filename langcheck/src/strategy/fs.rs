//! Filesystem record source.
//!
//! Lists the records of each configured directory and reads them safely:
//! - Only regular `*.json` files directly inside the directory are records
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Bounded streaming reads cap memory per file

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{CheckConfig, LanguageDirectory, RECORD_EXTENSION};
use crate::error::{ConfigError, InputError, InputErrorKind};
use crate::strategy::{RawRecord, RecordGroup};

/// Check if a file name matches any of the exclude patterns.
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| exclude_patterns.iter().any(|p| p.matches(&name)))
}

fn is_record_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
}

/// Record identifier for a record path: its file stem.
#[must_use]
pub fn record_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Path where the record `id` of `dir` is stored.
#[must_use]
pub fn record_path(dir: &LanguageDirectory, id: &str) -> PathBuf {
    dir.path.join(format!("{id}.{RECORD_EXTENSION}"))
}

/// List the record files of one directory, sorted by path.
///
/// Returns `(files, input_errors)`; traversal errors are never silently discarded.
pub fn list_record_files(
    dir: &LanguageDirectory,
    follow_links: bool,
    exclude_patterns: &[Pattern],
) -> (Vec<PathBuf>, Vec<InputError>) {
    let mut files = Vec::new();
    let mut input_errors = Vec::new();

    for entry_result in WalkDir::new(&dir.path)
        .follow_links(follow_links)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| dir.path.clone(), Path::to_path_buf);
                input_errors.push(InputError::new(
                    dir.name.clone(),
                    None,
                    path,
                    InputErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        // Skips directories, devices, pipes, sockets, and unfollowed symlinks.
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        if !is_record_file(file_path) {
            continue;
        }
        if matches_exclude(file_path, exclude_patterns) {
            debug!(path = %file_path.display(), "excluded");
            continue;
        }

        files.push(file_path.to_path_buf());
    }

    files.sort();
    (files, input_errors)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Uses `Read::take` so the size check and the read are the same operation.
///
/// # Errors
///
/// Returns `(kind, message)` if the file cannot be opened or read, or exceeds
/// `max_file_size`.
pub fn read_file_bounded(
    path: &Path,
    max_file_size: u64,
) -> Result<Vec<u8>, (InputErrorKind, String)> {
    let file = std::fs::File::open(path)
        .map_err(|e| (InputErrorKind::Unreadable, format!("Failed to open file: {e}")))?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| (InputErrorKind::Unreadable, format!("Failed to read file: {e}")))?;

    if buffer.len() as u64 > max_file_size {
        return Err((
            InputErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    Ok(buffer)
}

/// Build the record group of one configured directory.
#[must_use]
pub fn load_group(
    dir: &LanguageDirectory,
    config: &CheckConfig,
    exclude_patterns: &[Pattern],
) -> RecordGroup {
    let mut group = RecordGroup::for_directory(dir);

    if !dir.path.is_dir() {
        warn!(directory = %dir.name, path = %dir.path.display(), "directory not found");
        group.input_errors.push(InputError::new(
            dir.name.clone(),
            None,
            dir.path.clone(),
            InputErrorKind::MissingDirectory,
            format!("Directory does not exist: {}", dir.path.display()),
        ));
        return group;
    }

    let (files, walk_errors) = list_record_files(dir, config.follow_links, exclude_patterns);
    group.input_errors.extend(walk_errors);
    debug!(directory = %dir.name, files = files.len(), "listed records");

    for path in files {
        let id = record_id_for(&path);
        match read_file_bounded(&path, config.max_file_size) {
            Ok(bytes) => group.records.push(RawRecord::new(id, bytes).with_path(path)),
            Err((kind, message)) => {
                warn!(path = %path.display(), error = %message, "unreadable record");
                group
                    .input_errors
                    .push(InputError::new(dir.name.clone(), Some(id), path, kind, message));
            }
        }
    }

    for id in &config.expected_ids {
        let present = group.records.iter().any(|r| &r.id == id)
            || group
                .input_errors
                .iter()
                .any(|e| e.record_id.as_deref() == Some(id.as_str()));
        if !present {
            let path = record_path(dir, id);
            warn!(directory = %dir.name, record = %id, "expected record not found");
            group.input_errors.push(InputError::new(
                dir.name.clone(),
                Some(id.clone()),
                path,
                InputErrorKind::MissingRecord,
                format!("Expected record '{id}' not found"),
            ));
        }
    }

    group
}

/// Build the record groups of every configured directory, in configuration order.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration is invalid. Missing or
/// unreadable inputs are not errors here; they are carried in each group's
/// `input_errors`.
pub fn load_groups(config: &CheckConfig) -> Result<Vec<RecordGroup>, ConfigError> {
    config.validate()?;
    let exclude_patterns = config.exclude_patterns()?;
    Ok(config
        .directories
        .iter()
        .map(|dir| load_group(dir, config, &exclude_patterns))
        .collect())
}
