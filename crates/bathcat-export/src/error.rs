use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("snapshot is missing mandatory field {field}")]
    MissingMandatoryField { field: &'static str },

    #[error("variant {variant_index} option {option_index} skipped: {reason}")]
    MalformedVariantOption {
        variant_index: usize,
        option_index: usize,
        reason: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
