//! Language tags assigned to content records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification of the dominant script/language of a text.
///
/// The first four variants are the target languages a directory may be
/// expected to hold. `Unknown`, `Mixed` and `Error` are sentinels produced by
/// the classifier or the checker and are never valid expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    #[serde(alias = "zh")]
    Chinese,
    #[serde(alias = "en")]
    English,
    #[serde(alias = "ru")]
    Russian,
    #[serde(alias = "ko")]
    Korean,
    /// No recognized script characters at all.
    Unknown,
    /// Some script characters, but none dominant.
    Mixed,
    /// The record could not be read or parsed.
    Error,
}

impl LanguageTag {
    /// The four languages a directory may be expected to contain.
    pub const TARGETS: [Self; 4] = [Self::Chinese, Self::English, Self::Russian, Self::Korean];

    /// Lowercase name used in reports and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => "chinese",
            Self::English => "english",
            Self::Russian => "russian",
            Self::Korean => "korean",
            Self::Unknown => "unknown",
            Self::Mixed => "mixed",
            Self::Error => "error",
        }
    }

    /// Locale directory code (`zh`, `en`, `ru`, `ko`) for target languages.
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::Chinese => Some("zh"),
            Self::English => Some("en"),
            Self::Russian => Some("ru"),
            Self::Korean => Some("ko"),
            Self::Unknown | Self::Mixed | Self::Error => None,
        }
    }

    /// Whether this tag is one of [`LanguageTag::TARGETS`].
    #[must_use]
    pub const fn is_target(self) -> bool {
        self.code().is_some()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag '{0}'")]
pub struct ParseLanguageTagError(pub String);

impl FromStr for LanguageTag {
    type Err = ParseLanguageTagError;

    /// Accepts the lowercase names and the directory codes, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let tag = match lowered.as_str() {
            "chinese" | "zh" => Self::Chinese,
            "english" | "en" => Self::English,
            "russian" | "ru" => Self::Russian,
            "korean" | "ko" => Self::Korean,
            "unknown" => Self::Unknown,
            "mixed" => Self::Mixed,
            "error" => Self::Error,
            _ => return Err(ParseLanguageTagError(s.to_owned())),
        };
        Ok(tag)
    }
}
