use bathcat_core::{AttributeScan, AttributeVocabulary, ExportConfig};
use rust_decimal::Decimal;

/// Placeholder replaced with an image's public ID in the CDN template.
pub const PUBLIC_ID_PLACEHOLDER: &str = "{public_id}";

/// Everything the row projector needs besides the snapshot itself.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub tax_rate: Decimal,
    pub category_id: String,
    pub image_url_template: String,
    pub image_denylist: Vec<String>,
    pub in_stock_text: String,
    pub extra_tags: Vec<String>,
    pub delivery_template: String,
    pub vocabulary: AttributeVocabulary,
    pub attribute_scan: AttributeScan,
}

impl ExportSettings {
    #[must_use]
    pub fn from_config(config: &ExportConfig, vocabulary: AttributeVocabulary) -> Self {
        Self {
            tax_rate: config.tax_rate,
            category_id: config.category_id.clone(),
            image_url_template: config.image_url_template.clone(),
            image_denylist: config.image_denylist.clone(),
            in_stock_text: config.in_stock_text.clone(),
            extra_tags: config.extra_tags.clone(),
            delivery_template: config.delivery_template.clone(),
            vocabulary,
            attribute_scan: config.attribute_scan,
        }
    }

    /// CDN URL for an image.
    #[must_use]
    pub fn image_url(&self, public_id: &str) -> String {
        self.image_url_template
            .replace(PUBLIC_ID_PLACEHOLDER, public_id)
    }

    #[must_use]
    pub fn is_denylisted(&self, public_id: &str) -> bool {
        self.image_denylist.iter().any(|denied| denied == public_id)
    }
}

impl Default for ExportSettings {
    /// Same values as an unconfigured environment.
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(121, 2),
            category_id: "13".to_string(),
            image_url_template: format!(
                "https://cdn.todomueblesdebano.com/image/upload/f_auto%2Cq_auto/v1/{PUBLIC_ID_PLACEHOLDER}"
            ),
            image_denylist: Vec::new(),
            in_stock_text: "Disponible".to_string(),
            extra_tags: vec!["muebles".to_string(), "baño".to_string()],
            delivery_template: "Entre {min} y {max} días".to_string(),
            vocabulary: AttributeVocabulary::default(),
            attribute_scan: AttributeScan::AllVariants,
        }
    }
}
