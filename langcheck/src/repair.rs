//! Salvage records whose JSON was broken by quotes.
//!
//! Description prose often contains quotation marks. When those end up as
//! unescaped `"` inside a value, or when typographic quotes replace the JSON
//! delimiters, the record no longer parses. Repair finds the
//! `{"title": ..., "body": ...}` objects by their structure instead of by
//! tokenizing, rebuilds the record and re-serializes it.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{ContentRecord, Section};
use crate::syntax::parse_record;

/// Matches one section object. Delimiting quotes may be `"`, `“` or `”`;
/// the lazy captures end at the first quote followed by the next structural token.
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"(?s)\{\s*",
        r#"["\x{201C}\x{201D}]title["\x{201C}\x{201D}]\s*:\s*"#,
        r#"["\x{201C}\x{201D}](.*?)["\x{201C}\x{201D}]\s*,\s*"#,
        r#"["\x{201C}\x{201D}]body["\x{201C}\x{201D}]\s*:\s*"#,
        r#"["\x{201C}\x{201D}](.*?)["\x{201C}\x{201D}]\s*\}"#,
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid section regex: {err}"),
    }
});

/// A closing quote followed by the end of an object or array, or by the next
/// key. A captured value containing this ran past its own section.
static BOUNDARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(
        r#"["\x{201C}\x{201D}]\s*(?:[}\]]|,\s*["\x{201C}\x{201D}]\w+["\x{201C}\x{201D}]\s*:)"#,
    ) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid boundary regex: {err}"),
    }
});

static TITLE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r#"["\x{201C}\x{201D}]title["\x{201C}\x{201D}]\s*:"#) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid title key regex: {err}"),
    }
});

/// Result of a successful repair attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The input already parses; nothing was changed.
    AlreadyValid,
    /// Sections were salvaged and re-serialized.
    Repaired {
        record: ContentRecord,
        /// Pretty-printed JSON of `record`.
        json: String,
    },
}

/// Why a record could not be repaired.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RepairError {
    #[error("no title/body sections found")]
    NoSections,

    #[error("only {salvaged} of {found} sections could be salvaged")]
    Incomplete { salvaged: usize, found: usize },

    #[error("repaired record does not serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("repaired record still fails to parse: {0}")]
    StillInvalid(String),
}

/// Decode a captured value as a JSON string body when possible, so escapes
/// like `\n` and `\"` survive; otherwise keep it verbatim.
fn decode_value(raw: &str) -> String {
    let raw = raw.trim();
    serde_json::from_str::<String>(&format!("\"{raw}\""))
        .map_or_else(|_| raw.to_owned(), |decoded| decoded.trim().to_owned())
}

/// Extract every title/body section from malformed text, in order.
///
/// A match whose title or body spans a section boundary is dropped, so a
/// section without a body never swallows its neighbour.
#[must_use]
pub fn salvage_sections(content: &str) -> Vec<Section> {
    SECTION_PATTERN
        .captures_iter(content)
        .filter(|caps| {
            !BOUNDARY_PATTERN.is_match(&caps[1]) && !BOUNDARY_PATTERN.is_match(&caps[2])
        })
        .map(|caps| Section::new(decode_value(&caps[1]), decode_value(&caps[2])))
        .collect()
}

/// Repair a record that fails to parse.
///
/// # Errors
///
/// Returns [`RepairError::NoSections`] when nothing could be salvaged,
/// [`RepairError::Incomplete`] when the text has more `title` keys than
/// salvaged sections, or [`RepairError::StillInvalid`] if the rebuilt JSON
/// does not parse back.
pub fn repair_record(content: &str) -> Result<RepairOutcome, RepairError> {
    if parse_record(content.as_bytes()).is_ok() {
        return Ok(RepairOutcome::AlreadyValid);
    }

    let sections = salvage_sections(content);
    if sections.is_empty() {
        return Err(RepairError::NoSections);
    }
    let found = TITLE_KEY_PATTERN.find_iter(content).count();
    if sections.len() < found {
        return Err(RepairError::Incomplete {
            salvaged: sections.len(),
            found,
        });
    }

    let record = ContentRecord::new(sections);
    let json = record.to_pretty_json()?;
    let reparsed = parse_record(json.as_bytes()).map_err(|e| RepairError::StillInvalid(e.message))?;
    if reparsed != record {
        return Err(RepairError::StillInvalid(
            "round-tripped record differs from the salvaged one".to_owned(),
        ));
    }

    Ok(RepairOutcome::Repaired { record, json })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record_untouched() {
        let outcome = repair_record(r#"{"sections": [{"title": "A", "body": "B"}]}"#).unwrap();
        assert_eq!(outcome, RepairOutcome::AlreadyValid);
    }

    #[test]
    fn test_typographic_delimiters_repaired() {
        let broken = "{\n  \u{201C}sections\u{201D}: [\n    {\u{201C}title\u{201D}: \u{201C}Concept\u{201D}, \u{201C}body\u{201D}: \u{201C}A quiet bar.\u{201D}}\n  ]\n}";
        let RepairOutcome::Repaired { record, json } = repair_record(broken).unwrap() else {
            panic!("expected a repair");
        };
        assert_eq!(record.sections, vec![Section::new("Concept", "A quiet bar.")]);
        assert!(parse_record(json.as_bytes()).is_ok());
    }

    #[test]
    fn test_unescaped_inner_quotes_repaired() {
        let broken = r#"{"sections": [
            {"title": "Concept", "body": "A "secret" cocktail parlour."},
            {"title": "Menu", "body": "Try the "barrel-aged" list."}
        ]}"#;
        let RepairOutcome::Repaired { record, .. } = repair_record(broken).unwrap() else {
            panic!("expected a repair");
        };
        assert_eq!(record.sections.len(), 2);
        assert_eq!(
            record.sections[0].body.as_deref(),
            Some(r#"A "secret" cocktail parlour."#)
        );
        assert_eq!(record.sections[1].title.as_deref(), Some("Menu"));
    }

    #[test]
    fn test_escapes_in_values_decoded() {
        let broken = r#"{"sections": [{"title": "Line\nbreak", "body": "ok"}],}"#;
        let RepairOutcome::Repaired { record, .. } = repair_record(broken).unwrap() else {
            panic!("expected a repair");
        };
        assert_eq!(record.sections[0].title.as_deref(), Some("Line\nbreak"));
    }

    #[test]
    fn test_title_only_section_not_merged_into_next() {
        let broken = r#"{"sections": [{"title": "Hours"}, {"title": "Menu", "body": "Coffee"}],}"#;
        assert!(salvage_sections(broken).is_empty());
        assert!(matches!(repair_record(broken), Err(RepairError::NoSections)));
    }

    #[test]
    fn test_partial_salvage_refused() {
        let broken = r#"{"sections": [
            {"title": "Concept", "body": "A "quiet" bar."},
            {"title": "Hours"},
            {"title": "Menu", "body": "Coffee"}
        ]}"#;
        assert_eq!(
            salvage_sections(broken),
            vec![Section::new("Concept", r#"A "quiet" bar."#)]
        );
        let result = repair_record(broken);
        assert!(matches!(
            result,
            Err(RepairError::Incomplete {
                salvaged: 1,
                found: 3
            })
        ));
    }

    #[test]
    fn test_nothing_to_salvage() {
        let result = repair_record("{ this is not a record");
        assert!(matches!(result, Err(RepairError::NoSections)));
    }
}
