//! Dominant-script heuristic over the four target languages.
//!
//! CJK, Cyrillic and Hangul are judged by their share of all recognized
//! letters. Latin letters show up as brand names and loanwords inside every
//! other language, so English is judged by an absolute count instead.

use serde::{Deserialize, Serialize};

use crate::language::LanguageTag;

/// Default minimum share (exclusive, in percent) for CJK, Cyrillic or Hangul.
pub const DEFAULT_SCRIPT_SHARE_PERCENT: u8 = 30;

/// Default minimum number of Latin letters (exclusive) for English.
pub const DEFAULT_MIN_LATIN_LETTERS: usize = 50;

/// Thresholds for [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct ClassifierConfig {
    /// A script wins when its share of all counted letters is strictly above this percentage.
    pub script_share_percent: u8,
    /// English wins when the Latin letter count is strictly above this.
    pub min_latin_letters: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            script_share_percent: DEFAULT_SCRIPT_SHARE_PERCENT,
            min_latin_letters: DEFAULT_MIN_LATIN_LETTERS,
        }
    }
}

impl ClassifierConfig {
    /// Create a config with explicit thresholds.
    #[must_use]
    pub const fn new(script_share_percent: u8, min_latin_letters: usize) -> Self {
        Self {
            script_share_percent,
            min_latin_letters,
        }
    }

    /// `count / total > script_share_percent / 100`, in exact integer arithmetic.
    fn exceeds_share(&self, count: usize, total: usize) -> bool {
        count.saturating_mul(100) > total.saturating_mul(usize::from(self.script_share_percent))
    }
}

/// Per-script letter counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptCounts {
    pub cjk: usize,
    pub cyrillic: usize,
    pub hangul: usize,
    pub latin: usize,
}

impl ScriptCounts {
    /// Count the letters of `text` falling into each recognized script.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            match c {
                '\u{4E00}'..='\u{9FFF}' => counts.cjk += 1,
                '\u{0410}'..='\u{044F}' | '\u{0401}' | '\u{0451}' => counts.cyrillic += 1,
                '\u{AC00}'..='\u{D7AF}' => counts.hangul += 1,
                'A'..='Z' | 'a'..='z' => counts.latin += 1,
                _ => {}
            }
        }
        counts
    }

    /// Sum of all four counts.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.cjk + self.cyrillic + self.hangul + self.latin
    }

    /// Apply the decision order to these counts.
    ///
    /// Chinese, then Russian, then Korean, then English; the first rule that
    /// holds wins, so two scripts both above the share threshold resolve in
    /// that order.
    #[must_use]
    pub fn classify(&self, config: &ClassifierConfig) -> LanguageTag {
        let total = self.total();
        if total == 0 {
            return LanguageTag::Unknown;
        }

        if config.exceeds_share(self.cjk, total) {
            LanguageTag::Chinese
        } else if config.exceeds_share(self.cyrillic, total) {
            LanguageTag::Russian
        } else if config.exceeds_share(self.hangul, total) {
            LanguageTag::Korean
        } else if self.latin > config.min_latin_letters {
            LanguageTag::English
        } else {
            LanguageTag::Mixed
        }
    }
}

/// Classify the dominant script of `text`.
#[must_use]
pub fn classify(text: &str, config: &ClassifierConfig) -> LanguageTag {
    ScriptCounts::of(text).classify(config)
}
