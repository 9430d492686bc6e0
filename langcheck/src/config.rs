//! Configuration types for language-consistency checking.
//!
//! The directory table is injected into every operation rather than baked
//! into the library, so the checker stays layout-agnostic and tests can run
//! against temporary trees or in-memory records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::Pattern;
use serde::Deserialize;

use crate::classifier::ClassifierConfig;
use crate::error::ConfigError;
use crate::language::LanguageTag;

/// Subdirectory of each locale directory that holds the description records.
pub const DESCRIPTIONS_DIR: &str = "descriptions";

/// File extension of content records.
pub const RECORD_EXTENSION: &str = "json";

/// One directory of records and the language every record in it must be written in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDirectory {
    /// Short name used in reports (usually the locale code).
    pub name: String,
    /// Directory holding one `<id>.json` record per content identifier.
    pub path: PathBuf,
    /// Language the records must be classified as.
    pub expected: LanguageTag,
}

impl LanguageDirectory {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, expected: LanguageTag) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            expected,
        }
    }
}

/// Everything a check run needs to know about its inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Directories to check, in report order. Required, must be non-empty.
    pub directories: Vec<LanguageDirectory>,
    /// Classifier thresholds.
    pub classifier: ClassifierConfig,
    /// Record identifiers every directory must contain (default: none).
    pub expected_ids: Vec<String>,
    /// Glob patterns matched against record file names to skip.
    pub exclude: Vec<String>,
    /// Maximum record size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links when listing directories (default: `false`).
    pub follow_links: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            classifier: ClassifierConfig::default(),
            expected_ids: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
        }
    }
}

impl CheckConfig {
    /// The standard locale layout: `<root>/{zh,en,ru,ko}/descriptions`.
    #[must_use]
    pub fn standard_layout(root: &Path) -> Self {
        Self {
            directories: standard_directories(root),
            ..Self::default()
        }
    }

    /// Parse a YAML configuration.
    ///
    /// Relative directory paths are resolved against `base_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the YAML is malformed or has unknown keys.
    pub fn from_yaml_str(content: &str, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: Self =
            serde_saphyr::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Some(base) = base_dir {
            for dir in &mut config.directories {
                if dir.path.is_relative() {
                    dir.path = base.join(&dir.path);
                }
            }
        }
        Ok(config)
    }

    /// Load a YAML configuration file; relative paths resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml_str(&content, path.parent())
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check the configuration for structural problems.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directories.is_empty() {
            return Err(ConfigError::NoDirectories);
        }

        let mut seen = HashSet::new();
        for dir in &self.directories {
            if !seen.insert(dir.name.as_str()) {
                return Err(ConfigError::DuplicateDirectory(dir.name.clone()));
            }
            if !dir.expected.is_target() {
                return Err(ConfigError::NonTargetExpectation {
                    directory: dir.name.clone(),
                    tag: dir.expected,
                });
            }
        }

        let share = self.classifier.script_share_percent;
        if share == 0 || share >= 100 {
            return Err(ConfigError::ShareOutOfRange(share));
        }

        self.exclude_patterns()?;
        Ok(())
    }

    /// Compile the exclude globs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExcludePattern`] for the first bad pattern.
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// `<root>/<code>/descriptions` for each target language, in target order.
#[must_use]
pub fn standard_directories(root: &Path) -> Vec<LanguageDirectory> {
    LanguageTag::TARGETS
        .iter()
        .filter_map(|&tag| {
            tag.code().map(|code| {
                LanguageDirectory::new(code, root.join(code).join(DESCRIPTIONS_DIR), tag)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let config = CheckConfig::standard_layout(Path::new("public/locales"));
        let names: Vec<_> = config.directories.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zh", "en", "ru", "ko"]);
        assert_eq!(
            config.directories[2].path,
            PathBuf::from("public/locales/ru/descriptions")
        );
        assert_eq!(config.directories[3].expected, LanguageTag::Korean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_config_with_aliases_and_base_dir() {
        let yaml = "\
directories:
  - name: zh
    path: zh/descriptions
    expected: zh
  - name: english
    path: /abs/en
    expected: english
classifier:
  script_share_percent: 40
expected_ids: [one, two]
exclude: ['test-*.json']
";
        let config = CheckConfig::from_yaml_str(yaml, Some(Path::new("/data"))).unwrap();
        assert_eq!(config.directories.len(), 2);
        assert_eq!(config.directories[0].expected, LanguageTag::Chinese);
        assert_eq!(config.directories[0].path, PathBuf::from("/data/zh/descriptions"));
        assert_eq!(config.directories[1].path, PathBuf::from("/abs/en"));
        assert_eq!(config.classifier.script_share_percent, 40);
        assert_eq!(config.classifier.min_latin_letters, 50);
        assert_eq!(config.expected_ids, ["one", "two"]);
        assert_eq!(config.max_file_size, 10_485_760);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_unknown_key_rejected() {
        let result = CheckConfig::from_yaml_str("directorys: []\n", None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        assert!(matches!(
            CheckConfig::default().validate(),
            Err(ConfigError::NoDirectories)
        ));

        let mut config = CheckConfig::standard_layout(Path::new("x"));
        config.directories.push(LanguageDirectory::new("zh", "y", LanguageTag::Chinese));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateDirectory(name)) if name == "zh"
        ));

        let mut config = CheckConfig::default();
        config.directories = vec![LanguageDirectory::new("m", "m", LanguageTag::Mixed)];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonTargetExpectation { .. })
        ));

        let mut config = CheckConfig::standard_layout(Path::new("x"));
        config.classifier = ClassifierConfig::new(100, 50);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ShareOutOfRange(100))
        ));

        let mut config = CheckConfig::standard_layout(Path::new("x"));
        config.exclude = vec!["[unclosed".to_owned()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidExcludePattern { .. })
        ));
    }
}
