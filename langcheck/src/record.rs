//! Content record model and text extraction.

use serde::{Deserialize, Deserializer, Serialize};

/// One titled block of a content record.
///
/// Either field may be absent, but a present field must be a string:
/// `"title": null` does not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<String>,
}

/// Only called for keys that are present; absent keys take the default.
fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl Section {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
        }
    }
}

/// A structured multilingual description: an ordered list of sections.
///
/// The expected language of a record comes from where it is stored and is
/// never part of the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ContentRecord {
    #[must_use]
    pub const fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Concatenate every section's title and body, each followed by one space.
    ///
    /// Works on parsed data only, so structural keys never count as text.
    #[must_use]
    pub fn extract_text(&self) -> String {
        let mut text = String::new();
        for section in &self.sections {
            for field in [&section.title, &section.body].into_iter().flatten() {
                text.push_str(field);
                text.push(' ');
            }
        }
        text
    }

    /// Serialize as pretty JSON (two-space indent, non-ASCII kept as-is).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
