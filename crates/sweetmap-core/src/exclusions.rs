//! Exclusion rule set: which provider categories and venue names are noise.
//!
//! Rules are data. The surrounding application loads them from YAML (see
//! [`load_exclusion_rules`]) and hands them to the discovery pipeline, so a
//! market can swap the chain-store denylist without touching code.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Immutable, pre-normalized exclusion rules.
///
/// Categories are stored lower-cased. Name patterns are stored in the same
/// form [`normalize_name`] produces, so matching is a plain substring check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    excluded_categories: BTreeSet<String>,
    excluded_name_patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExclusionRulesFile {
    #[serde(default)]
    excluded_categories: Vec<String>,
    #[serde(default)]
    excluded_name_patterns: Vec<String>,
}

impl ExclusionRules {
    /// Build a rule set, normalizing every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any category or name pattern is
    /// blank; a blank pattern would match every venue.
    pub fn new<C, P>(categories: C, name_patterns: P) -> Result<Self, ConfigError>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut excluded_categories = BTreeSet::new();
        for category in categories {
            let category = category.as_ref().trim().to_lowercase();
            if category.is_empty() {
                return Err(ConfigError::Validation(
                    "excluded category must be non-empty".to_string(),
                ));
            }
            excluded_categories.insert(category);
        }

        let mut excluded_name_patterns: Vec<String> = Vec::new();
        for pattern in name_patterns {
            let normalized = normalize_name(pattern.as_ref());
            if normalized.is_empty() {
                return Err(ConfigError::Validation(
                    "excluded name pattern must be non-empty".to_string(),
                ));
            }
            if !excluded_name_patterns.contains(&normalized) {
                excluded_name_patterns.push(normalized);
            }
        }

        Ok(Self {
            excluded_categories,
            excluded_name_patterns,
        })
    }

    #[must_use]
    pub fn excluded_categories(&self) -> &BTreeSet<String> {
        &self.excluded_categories
    }

    #[must_use]
    pub fn excluded_name_patterns(&self) -> &[String] {
        &self.excluded_name_patterns
    }

    /// `true` if `category` (any case) is on the category denylist.
    #[must_use]
    pub fn excludes_category(&self, category: &str) -> bool {
        if self.excluded_categories.is_empty() {
            return false;
        }
        self.excluded_categories
            .contains(&category.trim().to_lowercase())
    }

    /// Returns the first denylisted pattern contained in `normalized_name`.
    ///
    /// `normalized_name` must already be in [`normalize_name`] form.
    #[must_use]
    pub fn matching_name_pattern(&self, normalized_name: &str) -> Option<&str> {
        self.excluded_name_patterns
            .iter()
            .find(|pattern| normalized_name.contains(pattern.as_str()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded_categories.is_empty() && self.excluded_name_patterns.is_empty()
    }
}

/// Case-fold a venue name and collapse runs of whitespace to a single space.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse and validate exclusion rules from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::RulesFileParse`] for malformed YAML or unknown
/// keys, and [`ConfigError::Validation`] for blank entries.
pub fn parse_exclusion_rules(yaml: &str) -> Result<ExclusionRules, ConfigError> {
    let file: ExclusionRulesFile = serde_yaml::from_str(yaml)?;
    ExclusionRules::new(file.excluded_categories, file.excluded_name_patterns)
}

/// Load and validate exclusion rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_exclusion_rules(path: &Path) -> Result<ExclusionRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_exclusion_rules(&content)
}

#[cfg(test)]
#[path = "exclusions_test.rs"]
mod tests;
