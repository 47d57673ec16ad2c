//! Storefront state document types, as embedded in product pages.
//!
//! ## Observed shape (todomueblesdebano.com product pages)
//!
//! The page state lives under `state.product`. The product itself sits one
//! level deeper at `state.product.product`; technical data and the
//! configurator live beside it, not inside it.
//!
//! ### IDs
//! Product, attribute and option IDs show up as JSON numbers on some pages and
//! as strings on others. [`RawScalar`] accepts both. EANs behave the same way.
//!
//! ### Prices
//! Integers in cents: `pvp_web` is the web price, `pvp_supplier` the list
//! price, `web_discount` the advertised discount percentage (may be absent or
//! fractional). A few pages serialize cents as floats (`10000.0`), which is
//! why amounts go through [`RawScalar`] as well.
//!
//! ### Variant options
//! A variant carries two record shapes under `options`:
//! - `options.options[]`: attribute options. May embed the attribute as
//!   `attribute.name` / `attribute.label`, or flat as `attribute_name`, but
//!   usually carries neither.
//! - `options.colors[]`: colour swatches with a `hex` value. Swatch names
//!   are sometimes prefixed with `"color "` (the swatch tooltip text).
//!
//! ### Images
//! `attributes` on an image lists the option IDs the image illustrates.
//! Generic gallery images carry an empty list.
//!
//! ### Nulls and stray types
//! Any optional field may be `null`, absent, or of an unexpected JSON type.
//! `lenient` reads all three as the default, and `lenient_items` drops
//! unreadable list entries. Only `id` and `variants` are read strictly.
//! Variant option records are kept as raw JSON and read one by one, so a bad
//! record costs that option and not the product.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Top-level page state document.
#[derive(Debug, Default, Deserialize)]
pub struct StorefrontDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<StorefrontState>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorefrontState {
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<ProductState>,
}

/// The `state.product` slice of the page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductState {
    #[serde(default, deserialize_with = "lenient")]
    pub product: Option<RawProduct>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub technical_data: Vec<RawTechnicalItem>,

    #[serde(default, deserialize_with = "lenient")]
    pub configuration: Option<RawConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sub_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, rename = "ref", deserialize_with = "lenient")]
    pub reference: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub ean: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub supplier: Option<RawSupplier>,
    #[serde(default, deserialize_with = "lenient")]
    pub prices: RawPrices,
    #[serde(default, deserialize_with = "lenient_items")]
    pub images: Vec<RawImage>,
    /// `None` when the key is missing altogether; an empty list is valid.
    #[serde(default)]
    pub variants: Option<Vec<RawVariant>>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo: RawSeo,
    #[serde(default, deserialize_with = "lenient")]
    pub delivery_time: Option<RawDeliveryTime>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub files: Vec<RawFile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSupplier {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPrices {
    #[serde(default, deserialize_with = "lenient")]
    pub pvp_web: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub pvp_supplier: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub web_discount: Option<RawScalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImage {
    #[serde(default, deserialize_with = "lenient")]
    pub public_id: Option<String>,
    /// Option IDs the image belongs to.
    #[serde(default, deserialize_with = "lenient_items")]
    pub attributes: Vec<RawScalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSeo {
    #[serde(default, deserialize_with = "lenient")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDeliveryTime {
    #[serde(default, deserialize_with = "lenient")]
    pub min: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub max: Option<RawScalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFile {
    #[serde(default, deserialize_with = "lenient")]
    pub file_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVariant {
    #[serde(default, rename = "ref", deserialize_with = "lenient")]
    pub reference: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub ean: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub prices: RawPrices,
    #[serde(default, deserialize_with = "lenient")]
    pub options: RawVariantOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVariantOptions {
    /// [`RawAttributeOption`] records.
    #[serde(default, deserialize_with = "lenient")]
    pub options: Vec<serde_json::Value>,
    /// [`RawColorSwatch`] records.
    #[serde(default, deserialize_with = "lenient")]
    pub colors: Vec<serde_json::Value>,
}

/// An attribute option record (select-style choice). Read strictly: a field
/// of the wrong shape makes the whole record malformed.
#[derive(Debug, Default, Deserialize)]
pub struct RawAttributeOption {
    #[serde(default)]
    pub attribute_id: Option<RawScalar>,
    #[serde(default)]
    pub option_id: Option<RawScalar>,
    /// Human-readable option value, e.g. `"80 cm"` or `"Blanco Brillo"`.
    #[serde(default)]
    pub name: Option<RawScalar>,
    #[serde(default)]
    pub attribute: Option<RawAttributeRef>,
    #[serde(default)]
    pub attribute_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAttributeRef {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
}

/// A colour swatch record.
#[derive(Debug, Default, Deserialize)]
pub struct RawColorSwatch {
    #[serde(default)]
    pub attribute_id: Option<RawScalar>,
    #[serde(default)]
    pub option_id: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<RawScalar>,
    #[serde(default)]
    pub hex: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTechnicalItem {
    #[serde(default, deserialize_with = "lenient")]
    pub attribute: Option<RawAttributeRef>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub options: Vec<RawTechnicalOption>,
    #[serde(default, deserialize_with = "lenient")]
    pub position: Option<RawScalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTechnicalOption {
    #[serde(default, deserialize_with = "lenient")]
    pub option: Option<RawTechnicalValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTechnicalValue {
    #[serde(default, deserialize_with = "lenient")]
    pub value_string: Option<RawScalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawConfiguration {
    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<RawConfigurationOptions>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawConfigurationOptions {
    #[serde(default, deserialize_with = "lenient_items")]
    pub complements: Vec<RawComplementGroup>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawComplementGroup {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub options: Vec<RawComplementItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawComplementItem {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// A JSON value that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    /// Text form; integral floats lose their `.0`.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawScalar::Text(s) => s.trim().to_string(),
            RawScalar::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
                _ => n.to_string(),
            },
        }
    }

    /// Integer value, e.g. an amount in minor units. Floats are rounded;
    /// unparsable text is `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawScalar::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64)),
            RawScalar::Text(s) => {
                let trimmed = s.trim();
                trimmed.parse::<i64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.round() as i64)
                })
            }
        }
    }

    /// Floating-point value; unparsable text is `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawScalar::Number(n) => n.as_f64(),
            RawScalar::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|f| f.is_finite())
    }
}

/// Reads `null` or a value of the wrong JSON type the same as a missing
/// field.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Reads a list, dropping entries that do not deserialize. Anything other
/// than an array is an empty list.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let serde_json::Value::Array(items) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn raw_scalar_accepts_strings_and_numbers() {
        let text: RawScalar = serde_json::from_value(json!("A-12")).unwrap();
        let int: RawScalar = serde_json::from_value(json!(4411)).unwrap();
        let float: RawScalar = serde_json::from_value(json!(8000.0)).unwrap();
        assert_eq!(text.as_text(), "A-12");
        assert_eq!(int.as_text(), "4411");
        assert_eq!(float.as_text(), "8000");
    }

    #[test]
    fn raw_scalar_minor_units() {
        let float: RawScalar = serde_json::from_value(json!(12345.6)).unwrap();
        let text: RawScalar = serde_json::from_value(json!(" 990 ")).unwrap();
        let junk: RawScalar = serde_json::from_value(json!("n/a")).unwrap();
        assert_eq!(float.as_integer(), Some(12346));
        assert_eq!(text.as_integer(), Some(990));
        assert_eq!(junk.as_integer(), None);
    }

    #[test]
    fn null_collections_deserialize_as_empty() {
        let product: RawProduct = serde_json::from_value(json!({
            "id": 1,
            "images": null,
            "files": null,
            "prices": null,
            "variants": []
        }))
        .unwrap();
        assert!(product.images.is_empty());
        assert!(product.files.is_empty());
        assert!(product.prices.pvp_web.is_none());
        assert_eq!(product.variants.map(|v| v.len()), Some(0));
    }

    #[test]
    fn stray_types_in_optional_fields_read_as_defaults() {
        let product: RawProduct = serde_json::from_value(json!({
            "id": 1,
            "name": 42,
            "supplier": "Royo",
            "prices": { "pvp_web": 8000, "web_discount": "20", "pvp_supplier": [] },
            "images": [{ "public_id": "royo/a" }, "royo/b", { "public_id": 7 }],
            "files": { "url": "https://example.com/ficha.pdf" },
            "variants": []
        }))
        .unwrap();
        assert!(product.name.is_none());
        assert!(product.supplier.is_none());
        assert_eq!(product.prices.pvp_web.and_then(|p| p.as_integer()), Some(8000));
        assert_eq!(product.prices.web_discount.and_then(|d| d.as_f64()), Some(20.0));
        assert!(product.prices.pvp_supplier.is_none());
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.images[0].public_id.as_deref(), Some("royo/a"));
        assert!(product.images[1].public_id.is_none());
        assert!(product.files.is_empty());
    }

    #[test]
    fn attribute_option_rejects_wrongly_shaped_fields() {
        let result: Result<RawAttributeOption, _> =
            serde_json::from_value(json!({ "attribute_id": 1, "attribute": "Acabado" }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_variants_key_is_none() {
        let product: RawProduct = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert!(product.variants.is_none());
    }
}
