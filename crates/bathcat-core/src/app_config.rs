use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::vocabulary::{load_vocabulary, AttributeVocabulary};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How far the attribute normalizer looks when collecting attribute IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeScan {
    /// Union of attribute IDs over every variant, first-seen order.
    AllVariants,
    /// Only the first variant's selections; reproduces legacy exports.
    FirstVariant,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub env: Environment,
    pub log_level: String,
    /// Divisor applied to tax-included web prices, e.g. `1.21`.
    pub tax_rate: Decimal,
    pub category_id: String,
    /// CDN URL with a `{public_id}` placeholder.
    pub image_url_template: String,
    pub image_denylist: Vec<String>,
    pub first_product_id: u64,
    pub product_id_step: u64,
    pub vocabulary_path: Option<PathBuf>,
    pub attribute_scan: AttributeScan,
    pub output_dir: PathBuf,
    pub outbox_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub in_stock_text: String,
    pub extra_tags: Vec<String>,
    /// Delivery text with `{min}` and `{max}` placeholders.
    pub delivery_template: String,
}

impl ExportConfig {
    /// Load the configured vocabulary file, or the built-in one when no path
    /// is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured file cannot be read, parsed, or
    /// fails validation.
    pub fn load_vocabulary(&self) -> Result<AttributeVocabulary, ConfigError> {
        match &self.vocabulary_path {
            Some(path) => load_vocabulary(path),
            None => Ok(AttributeVocabulary::default()),
        }
    }
}
