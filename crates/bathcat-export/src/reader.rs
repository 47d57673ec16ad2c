//! Translation from the untyped storefront document to a [`ProductSnapshot`].
//!
//! This is the only module that looks at raw storefront data. Mandatory
//! fields (product identity and the variant list) fail the read; everything
//! else falls back to an empty string, empty list or zero.

use std::collections::{BTreeSet, HashSet};

use bathcat_core::{
    ComplementGroup, ComplementItem, DeliveryWindow, OptionSelection, OptionShape, Prices,
    ProductImage, ProductSnapshot, SeoText, TechnicalAttribute, Variant,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ExportError;
use crate::types::{
    ProductState, RawAttributeOption, RawColorSwatch, RawComplementGroup, RawPrices, RawProduct,
    RawScalar, RawTechnicalItem, RawVariant, StorefrontDocument,
};

/// Data sheet entries in the product `files` list use this type tag.
const DATA_SHEET_FILE_TYPE: &str = "data_sheet";

/// Group name for complement groups the storefront leaves unnamed.
const DEFAULT_COMPLEMENT_GROUP_NAME: &str = "Complementos";

/// Tooltip prefix the storefront puts in front of swatch names.
const SWATCH_NAME_PREFIX: &str = "color ";

/// A successfully read snapshot plus the option records that were dropped
/// along the way.
#[derive(Debug)]
pub struct SnapshotRead {
    pub snapshot: ProductSnapshot,
    /// One [`ExportError::MalformedVariantOption`] per skipped option.
    pub skipped_options: Vec<ExportError>,
}

/// Reads a storefront page state document into a [`ProductSnapshot`].
///
/// # Errors
///
/// Returns [`ExportError::MissingMandatoryField`] when the product, its ID or
/// its variant list is absent, and [`ExportError::Deserialize`] when the ID or
/// variant list is present with an unusable JSON type. Other fields fall back
/// to their defaults.
pub fn read_snapshot(document: &serde_json::Value) -> Result<SnapshotRead, ExportError> {
    let parsed =
        StorefrontDocument::deserialize(document).map_err(|source| ExportError::Deserialize {
            context: "storefront state document".to_string(),
            source,
        })?;

    let state = parsed
        .state
        .and_then(|s| s.product)
        .ok_or(ExportError::MissingMandatoryField {
            field: "state.product",
        })?;

    read_product_state(state)
}

fn read_product_state(state: ProductState) -> Result<SnapshotRead, ExportError> {
    let ProductState {
        product,
        technical_data,
        configuration,
    } = state;

    let product = product.ok_or(ExportError::MissingMandatoryField {
        field: "state.product.product",
    })?;

    let id = product
        .id
        .as_ref()
        .map(RawScalar::as_text)
        .filter(|id| !id.is_empty())
        .ok_or(ExportError::MissingMandatoryField {
            field: "state.product.product.id",
        })?;

    let RawProduct {
        name,
        sub_name,
        slug,
        reference,
        ean,
        supplier,
        prices,
        images,
        variants,
        seo,
        delivery_time,
        files,
        ..
    } = product;

    let raw_variants = variants.ok_or(ExportError::MissingMandatoryField {
        field: "state.product.product.variants",
    })?;

    let mut skipped_options = Vec::new();
    let variants = raw_variants
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| read_variant(idx, raw, &mut skipped_options))
        .collect();

    for skipped in &skipped_options {
        tracing::warn!(product_id = %id, error = %skipped, "skipping variant option");
    }

    let images = images
        .into_iter()
        .filter_map(|img| {
            let public_id = img.public_id.map(|p| p.trim().to_string());
            match public_id {
                Some(public_id) if !public_id.is_empty() => Some(ProductImage {
                    public_id,
                    associated_option_ids: img
                        .attributes
                        .iter()
                        .map(RawScalar::as_text)
                        .filter(|s| !s.is_empty())
                        .collect::<BTreeSet<_>>(),
                }),
                _ => {
                    tracing::debug!(product_id = %id, "dropping image without public_id");
                    None
                }
            }
        })
        .collect();

    let complement_groups = configuration
        .and_then(|c| c.options)
        .map(|o| o.complements)
        .unwrap_or_default()
        .into_iter()
        .map(read_complement_group)
        .collect();

    let delivery = delivery_time.map(|d| DeliveryWindow {
        min: d.min.as_ref().map_or_else(|| "?".to_string(), RawScalar::as_text),
        max: d.max.as_ref().map_or_else(|| "?".to_string(), RawScalar::as_text),
    });

    let data_sheet_url = files
        .into_iter()
        .find(|f| f.file_type.as_deref() == Some(DATA_SHEET_FILE_TYPE))
        .and_then(|f| f.url)
        .filter(|url| !url.trim().is_empty());

    let snapshot = ProductSnapshot {
        id,
        name: name.unwrap_or_default(),
        sub_name: sub_name.unwrap_or_default(),
        slug: slug.unwrap_or_default(),
        reference: text_or_empty(reference.as_ref()),
        ean: text_or_empty(ean.as_ref()),
        supplier_name: supplier.and_then(|s| s.name).unwrap_or_default(),
        prices: read_prices(&prices),
        images,
        technical_attributes: read_technical_attributes(technical_data),
        complement_groups,
        variants,
        seo: SeoText {
            short_description: seo.short_description.unwrap_or_default(),
            description: seo.description.unwrap_or_default(),
            meta_title: seo.meta_title.unwrap_or_default(),
            meta_description: seo.meta_description.unwrap_or_default(),
        },
        delivery,
        data_sheet_url,
    };

    Ok(SnapshotRead {
        snapshot,
        skipped_options,
    })
}

fn text_or_empty(value: Option<&RawScalar>) -> String {
    value.map(RawScalar::as_text).unwrap_or_default()
}

fn read_prices(prices: &RawPrices) -> Prices {
    let web = prices
        .pvp_web
        .as_ref()
        .and_then(RawScalar::as_integer)
        .unwrap_or(0);
    // No list price means no discount: list equals web.
    let list = prices
        .pvp_supplier
        .as_ref()
        .and_then(RawScalar::as_integer)
        .unwrap_or(web);

    Prices {
        list_price_minor_units: list,
        web_price_minor_units: web,
        web_discount_percent: prices.web_discount.as_ref().and_then(RawScalar::as_f64),
    }
}

fn read_variant(
    variant_index: usize,
    raw: RawVariant,
    skipped: &mut Vec<ExportError>,
) -> Variant {
    let RawVariant {
        reference,
        ean,
        prices,
        options,
    } = raw;

    let mut option_selections = Vec::with_capacity(options.options.len() + options.colors.len());

    // Swatches are indexed after the attribute options of the same variant.
    let attribute_options = options
        .options
        .into_iter()
        .map(|record| parse_record::<RawAttributeOption>(record).and_then(read_attribute_option));
    let swatches = options
        .colors
        .into_iter()
        .map(|record| parse_record::<RawColorSwatch>(record).and_then(read_color_swatch));
    for (option_index, result) in attribute_options.chain(swatches).enumerate() {
        match result {
            Ok(selection) => option_selections.push(selection),
            Err(reason) => skipped.push(ExportError::MalformedVariantOption {
                variant_index,
                option_index,
                reason,
            }),
        }
    }

    Variant {
        reference: reference.as_ref().map(RawScalar::as_text).filter(|s| !s.is_empty()),
        ean: ean.as_ref().map(RawScalar::as_text).filter(|s| !s.is_empty()),
        price_minor_units: prices
            .pvp_web
            .as_ref()
            .and_then(RawScalar::as_integer)
            .unwrap_or(0),
        option_selections,
    }
}

fn parse_record<T: DeserializeOwned>(record: serde_json::Value) -> Result<T, String> {
    serde_json::from_value(record).map_err(|e| format!("unreadable option record: {e}"))
}

fn read_attribute_id(raw: Option<&RawScalar>) -> Result<String, String> {
    raw.map(RawScalar::as_text)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| "option has no attribute_id".to_string())
}

fn read_attribute_option(option: RawAttributeOption) -> Result<OptionSelection, String> {
    let attribute_id = read_attribute_id(option.attribute_id.as_ref())?;

    let attribute_label = option
        .attribute
        .and_then(|a| a.name.or(a.label))
        .or(option.attribute_name)
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());

    Ok(OptionSelection {
        attribute_id,
        option_id: text_or_empty(option.option_id.as_ref()),
        display_value: text_or_empty(option.name.as_ref()),
        attribute_label,
        shape: OptionShape::Attribute,
    })
}

fn read_color_swatch(swatch: RawColorSwatch) -> Result<OptionSelection, String> {
    let attribute_id = read_attribute_id(swatch.attribute_id.as_ref())?;

    let name = text_or_empty(swatch.name.as_ref());
    let trimmed = name.as_str();
    let display_value = trimmed
        .strip_prefix(SWATCH_NAME_PREFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string();

    Ok(OptionSelection {
        attribute_id,
        option_id: text_or_empty(swatch.option_id.as_ref()),
        display_value,
        attribute_label: None,
        shape: OptionShape::Swatch {
            hex: swatch.hex.filter(|h| !h.trim().is_empty()),
        },
    })
}

/// Keeps the first entry per case-insensitive attribute name and drops items
/// without a name or a value.
fn read_technical_attributes(items: Vec<RawTechnicalItem>) -> Vec<TechnicalAttribute> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| {
            let name = item.attribute.and_then(|a| a.name)?.trim().to_string();
            let value = item
                .options
                .into_iter()
                .next()?
                .option?
                .value_string?
                .as_text();
            if name.is_empty() {
                return None;
            }
            Some(TechnicalAttribute {
                name,
                value,
                position: item
                    .position
                    .as_ref()
                    .and_then(RawScalar::as_integer)
                    .unwrap_or(0),
            })
        })
        .filter(|attr| seen.insert(attr.name.to_lowercase()))
        .collect()
}

fn read_complement_group(group: RawComplementGroup) -> ComplementGroup {
    let group_name = group
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_COMPLEMENT_GROUP_NAME.to_string());
    ComplementGroup {
        group_name,
        items: group
            .options
            .into_iter()
            .filter_map(|item| item.name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| ComplementItem { name })
            .collect(),
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
