use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One scraped product as it looked at fetch time, already lifted out of the
/// untyped storefront document by the export reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Storefront product ID, stored as a string whether the source used a
    /// JSON number or a string.
    pub id: String,
    pub name: String,
    pub sub_name: String,
    pub slug: String,
    pub reference: String,
    pub ean: String,
    /// Brand/supplier display name; feeds both `Supplier` and `Manufacturer`.
    pub supplier_name: String,
    pub prices: Prices,
    /// Gallery in display order; index + 1 is the storefront image position.
    pub images: Vec<ProductImage>,
    /// At most one entry per case-insensitive attribute name.
    pub technical_attributes: Vec<TechnicalAttribute>,
    pub complement_groups: Vec<ComplementGroup>,
    pub variants: Vec<Variant>,
    pub seo: SeoText,
    pub delivery: Option<DeliveryWindow>,
    /// URL of the downloadable data sheet, if the product ships one.
    pub data_sheet_url: Option<String>,
}

impl ProductSnapshot {
    /// Returns the total number of variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// `true` when the list price is above the web price.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.prices.list_price_minor_units > self.prices.web_price_minor_units
    }

    /// Case-insensitive lookup of a technical attribute value by name.
    #[must_use]
    pub fn technical_value(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.technical_attributes
            .iter()
            .find(|attr| attr.name.to_lowercase() == wanted)
            .map(|attr| attr.value.as_str())
    }
}

/// Monetary fields, all in minor currency units (cents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    /// Supplier list price (`pvp_supplier`).
    pub list_price_minor_units: i64,
    /// Price charged on the web shop (`pvp_web`), tax included.
    pub web_price_minor_units: i64,
    pub web_discount_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub public_id: String,
    /// Option IDs this image illustrates. Empty for generic gallery shots.
    pub associated_option_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalAttribute {
    pub name: String,
    pub value: String,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementGroup {
    pub group_name: String,
    pub items: Vec<ComplementItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementItem {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoText {
    pub short_description: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
}

/// Delivery estimate in days, kept as display text because the storefront
/// mixes numbers and strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub min: String,
    pub max: String,
}

/// One purchasable configuration of a [`ProductSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub reference: Option<String>,
    pub ean: Option<String>,
    /// Same unit and tax basis as [`Prices::web_price_minor_units`].
    pub price_minor_units: i64,
    pub option_selections: Vec<OptionSelection>,
}

impl Variant {
    /// Option IDs selected by this variant, in selection order.
    pub fn option_ids(&self) -> impl Iterator<Item = &str> {
        self.option_selections.iter().map(|s| s.option_id.as_str())
    }

    /// First selection for `attribute_id`, if this variant populates it.
    #[must_use]
    pub fn selection_for(&self, attribute_id: &str) -> Option<&OptionSelection> {
        self.option_selections
            .iter()
            .find(|s| s.attribute_id == attribute_id)
    }
}

/// A single attribute choice inside a variant.
///
/// Attribute options and colour swatches arrive as different record shapes in
/// the storefront data; both are flattened into this type and the origin is
/// kept in [`OptionShape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    pub attribute_id: String,
    pub option_id: String,
    pub display_value: String,
    /// Attribute name carried by the record itself, when the storefront
    /// provided one.
    pub attribute_label: Option<String>,
    pub shape: OptionShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OptionShape {
    Attribute,
    Swatch { hex: Option<String> },
}

impl OptionShape {
    #[must_use]
    pub fn is_swatch(&self) -> bool {
        matches!(self, OptionShape::Swatch { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Select,
    Color,
}

impl AttributeKind {
    /// Type token used in the combination attribute header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Select => "select",
            AttributeKind::Color => "color",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One axis of variation discovered from a product's variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub attribute_id: String,
    pub display_name: String,
    pub kind: AttributeKind,
    /// Dense 0-based ordinal in first-seen order.
    pub position: usize,
}
