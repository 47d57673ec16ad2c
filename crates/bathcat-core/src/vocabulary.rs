//! Data-driven attribute naming rules.
//!
//! When the storefront does not say what an attribute is called, its option
//! text is matched against an ordered list of rules. The first rule that
//! matches supplies the display name; otherwise the positional fallback is
//! used. Rules live in YAML so a new locale only needs a new file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder substituted with `position + 1` in the fallback label.
const FALLBACK_PLACEHOLDER: &str = "{n}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A token is one of the units on its own (`80 cm`, `2 m`) or ends with
    /// one right after a digit (`80cm`, `80x45cm`, `ancho80cm`).
    Unit,
    /// A whole token equals one of the words.
    Word,
    /// The lowercased text contains one of the tokens anywhere.
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub label: String,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
    pub tokens: Vec<String>,
}

impl LabelRule {
    /// Returns `true` if `text` satisfies this rule. Matching is
    /// case-insensitive.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        match self.match_kind {
            MatchKind::Substring => self
                .tokens
                .iter()
                .any(|token| lower.contains(token.to_lowercase().as_str())),
            MatchKind::Word => words(&lower).any(|word| self.has_token(word)),
            MatchKind::Unit => words(&lower).any(|word| {
                self.tokens
                    .iter()
                    .any(|token| is_unit_word(word, &token.to_lowercase()))
            }),
        }
    }

    fn has_token(&self, word: &str) -> bool {
        self.tokens.iter().any(|token| token.to_lowercase() == word)
    }
}

fn is_unit_word(word: &str, unit: &str) -> bool {
    if unit.is_empty() {
        return false;
    }
    word == unit
        || word
            .strip_suffix(unit)
            .and_then(|rest| rest.chars().last())
            .is_some_and(|c| c.is_ascii_digit())
}

/// Splits lowercased text into alphanumeric runs.
fn words(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Technical-attribute names that carry the product's outer dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionKeys {
    #[serde(default)]
    pub width: Vec<String>,
    #[serde(default)]
    pub height: Vec<String>,
    #[serde(default)]
    pub depth: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeVocabulary {
    #[serde(default)]
    pub rules: Vec<LabelRule>,
    pub fallback: String,
    #[serde(default)]
    pub dimensions: DimensionKeys,
}

impl AttributeVocabulary {
    /// Label of the first rule matching `text`, in rule order.
    #[must_use]
    pub fn infer_label(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.label.as_str())
    }

    /// Generic label for the attribute at 0-based `position`.
    #[must_use]
    pub fn fallback_label(&self, position: usize) -> String {
        self.fallback
            .replace(FALLBACK_PLACEHOLDER, &(position + 1).to_string())
    }
}

impl Default for AttributeVocabulary {
    fn default() -> Self {
        let owned = |tokens: &[&str]| tokens.iter().map(|t| (*t).to_string()).collect();
        Self {
            rules: vec![
                LabelRule {
                    label: "Measurement".to_string(),
                    match_kind: MatchKind::Unit,
                    tokens: owned(&["cm", "mm", "m"]),
                },
                LabelRule {
                    label: "Finish".to_string(),
                    match_kind: MatchKind::Word,
                    tokens: owned(&[
                        "white",
                        "black",
                        "grey",
                        "gray",
                        "blue",
                        "red",
                        "green",
                        "yellow",
                        "walnut",
                        "oak",
                        "wenge",
                        "anthracite",
                        "blanco",
                        "negro",
                        "gris",
                        "azul",
                        "rojo",
                        "verde",
                        "amarillo",
                        "nogal",
                        "roble",
                        "wengue",
                        "antracita",
                    ]),
                },
                LabelRule {
                    label: "Mirror".to_string(),
                    match_kind: MatchKind::Substring,
                    tokens: owned(&["mirror", "espejo"]),
                },
            ],
            fallback: "Option {n}".to_string(),
            dimensions: DimensionKeys {
                width: owned(&["ancho seleccionable estándar"]),
                height: owned(&["alto seleccionable estándar"]),
                depth: owned(&["fondo seleccionable estándar"]),
            },
        }
    }
}

/// Load and validate an attribute vocabulary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vocabulary(path: &Path) -> Result<AttributeVocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VocabularyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let vocabulary: AttributeVocabulary = serde_yaml::from_str(&content)?;

    validate_vocabulary(&vocabulary)?;

    Ok(vocabulary)
}

fn validate_vocabulary(vocabulary: &AttributeVocabulary) -> Result<(), ConfigError> {
    if !vocabulary.fallback.contains(FALLBACK_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "fallback '{}' must contain {FALLBACK_PLACEHOLDER} so generated names stay distinct",
            vocabulary.fallback
        )));
    }

    let mut seen_labels = HashSet::new();
    for rule in &vocabulary.rules {
        if rule.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rule label must be non-empty".to_string(),
            ));
        }

        if rule.tokens.is_empty() || rule.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "rule '{}' must list at least one non-empty token",
                rule.label
            )));
        }

        if !seen_labels.insert(rule.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate rule label: '{}'",
                rule.label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "vocabulary_test.rs"]
mod tests;
