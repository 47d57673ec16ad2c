mod app_config;
mod config;
pub mod ids;
pub mod products;
pub mod vocabulary;

pub use app_config::{AttributeScan, Environment, ExportConfig};
pub use config::{load_export_config, load_export_config_from_env};
pub use ids::IdAllocator;
pub use products::{
    AttributeDescriptor, AttributeKind, ComplementGroup, ComplementItem, DeliveryWindow,
    OptionSelection, OptionShape, Prices, ProductImage, ProductSnapshot, SeoText,
    TechnicalAttribute, Variant,
};
pub use vocabulary::{load_vocabulary, AttributeVocabulary, DimensionKeys, LabelRule, MatchKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read vocabulary file {path}: {source}")]
    VocabularyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vocabulary file: {0}")]
    VocabularyFileParse(#[from] serde_yaml::Error),

    #[error("vocabulary validation failed: {0}")]
    Validation(String),
}
