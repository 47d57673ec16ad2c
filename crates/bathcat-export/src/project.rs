//! Row projection: one [`ProductSnapshot`] plus its attribute descriptors in,
//! one [`ProductRow`] and one [`CombinationRow`] per variant out.
//!
//! All money arithmetic is done on [`Decimal`] built from minor units, so
//! `10000` cents at a 1.21 tax rate is exactly `82.644628` and never a float
//! approximation of it.

use std::collections::HashSet;

use bathcat_core::{AttributeDescriptor, ProductImage, ProductSnapshot, Variant};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::rows::{CombinationRow, ProductRow};
use crate::sanitize::{
    clean_dimension_value, sanitize_list_item, sanitize_text, truncate_chars,
    truncate_with_ellipsis,
};
use crate::settings::ExportSettings;

/// Character caps applied after sanitizing.
const SLUG_MAX_CHARS: usize = 128;
const SUMMARY_MAX_CHARS: usize = 800;

/// Feature position used for complement groups so they sort after the
/// technical attributes.
const COMPLEMENT_FEATURE_POSITION: u32 = 999;
const COMPLEMENT_ITEMS_SHOWN: usize = 3;

/// Shorter name words are not used as tags.
const TAG_MIN_CHARS: usize = 4;

/// Value emitted for an attribute a variant does not select.
pub const MISSING_VALUE: &str = "N/A";

const PRICE_DECIMALS: u32 = 6;

/// Tax-excluded price from a tax-included amount in minor units, rounded to
/// six decimals. Non-positive prices and a zero tax rate yield zero.
#[must_use]
pub fn price_tax_excluded(web_price_minor_units: i64, tax_rate: Decimal) -> Decimal {
    if web_price_minor_units <= 0 {
        return Decimal::ZERO;
    }
    Decimal::new(web_price_minor_units, 2)
        .checked_div(tax_rate)
        .map_or(Decimal::ZERO, |price| {
            price
                .round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
        })
}

/// `list - web` in major units with two decimals (`"20.00"`).
#[must_use]
pub fn discount_amount(list_price_minor_units: i64, web_price_minor_units: i64) -> Decimal {
    Decimal::new(
        list_price_minor_units.saturating_sub(web_price_minor_units),
        2,
    )
}

/// Variant price minus base price in major units. Zero when the base price is
/// not positive.
#[must_use]
pub fn price_impact(variant_price_minor_units: i64, base_price_minor_units: i64) -> Decimal {
    if base_price_minor_units <= 0 {
        return Decimal::ZERO;
    }
    Decimal::new(
        variant_price_minor_units.saturating_sub(base_price_minor_units),
        2,
    )
    .normalize()
}

/// Builds the product line.
#[must_use]
pub fn project_product_row(
    snapshot: &ProductSnapshot,
    product_id: u64,
    settings: &ExportSettings,
) -> ProductRow {
    let on_sale = snapshot.on_sale();
    let prices = &snapshot.prices;

    let (discount, discount_percent) = if on_sale {
        (
            discount_amount(prices.list_price_minor_units, prices.web_price_minor_units)
                .to_string(),
            prices
                .web_discount_percent
                .map(|p| p.to_string())
                .unwrap_or_default(),
        )
    } else {
        (String::new(), String::new())
    };

    let supplier = sanitize_text(&snapshot.supplier_name);
    let dimensions = &settings.vocabulary.dimensions;

    let image_urls = exported_images(snapshot, settings)
        .iter()
        .map(|(_, image)| settings.image_url(&image.public_id))
        .collect::<Vec<_>>()
        .join(",");

    ProductRow {
        product_id,
        name: sanitize_text(&full_name(snapshot)),
        categories: settings.category_id.clone(),
        price_tax_excluded: price_tax_excluded(prices.web_price_minor_units, settings.tax_rate)
            .to_string(),
        on_sale,
        discount_amount: discount,
        discount_percent,
        reference: sanitize_text(&snapshot.reference),
        manufacturer: supplier.clone(),
        supplier,
        ean13: sanitize_text(&snapshot.ean),
        width: dimension(snapshot, &dimensions.width),
        height: dimension(snapshot, &dimensions.height),
        depth: dimension(snapshot, &dimensions.depth),
        delivery_time: delivery_text(snapshot, settings),
        summary: truncate_with_ellipsis(
            &sanitize_text(&snapshot.seo.short_description),
            SUMMARY_MAX_CHARS,
        ),
        description: sanitize_text(&snapshot.seo.description),
        tags: tags(snapshot, settings),
        meta_title: sanitize_text(&snapshot.seo.meta_title),
        meta_description: sanitize_text(&snapshot.seo.meta_description),
        url_rewritten: truncate_chars(&sanitize_text(&snapshot.slug), SLUG_MAX_CHARS),
        text_when_in_stock: sanitize_text(&settings.in_stock_text),
        image_urls,
        features: features(snapshot, settings),
        file_url: snapshot
            .data_sheet_url
            .as_deref()
            .map(sanitize_text)
            .unwrap_or_default(),
    }
}

/// Builds one combination line per variant, in variant order.
///
/// The first variant with a zero price impact is the default; when no
/// variant qualifies none is flagged.
#[must_use]
pub fn project_combination_rows(
    snapshot: &ProductSnapshot,
    descriptors: &[AttributeDescriptor],
    product_id: u64,
    settings: &ExportSettings,
) -> Vec<CombinationRow> {
    let mut ordered: Vec<&AttributeDescriptor> = descriptors.iter().collect();
    ordered.sort_by_key(|d| d.position);

    let attributes = ordered
        .iter()
        .map(|d| format!("{}:{}:{}", d.display_name, d.kind, d.position))
        .collect::<Vec<_>>()
        .join(",");

    let images = exported_images(snapshot, settings);
    let base_price = snapshot.prices.web_price_minor_units;
    let mut default_assigned = false;

    snapshot
        .variants
        .iter()
        .map(|variant| {
            let impact = price_impact(variant.price_minor_units, base_price);
            let is_default = !default_assigned && impact.is_zero();
            default_assigned |= is_default;

            let (image_positions, image_urls) = variant_images(variant, &images, settings);

            CombinationRow {
                product_id,
                attributes: attributes.clone(),
                values: variant_values(variant, &ordered),
                reference: variant
                    .reference
                    .as_deref()
                    .map(sanitize_text)
                    .unwrap_or_default(),
                ean13: variant.ean.as_deref().map(sanitize_text).unwrap_or_default(),
                price_impact: impact.to_string(),
                is_default,
                image_positions,
                image_urls,
            }
        })
        .collect()
}

fn full_name(snapshot: &ProductSnapshot) -> String {
    let sub_name = snapshot.sub_name.trim();
    if sub_name.is_empty() {
        snapshot.name.clone()
    } else {
        format!("{} {sub_name}", snapshot.name)
    }
}

/// Images that survive the denylist, with their 1-based export position.
fn exported_images<'a>(
    snapshot: &'a ProductSnapshot,
    settings: &ExportSettings,
) -> Vec<(usize, &'a ProductImage)> {
    snapshot
        .images
        .iter()
        .filter(|image| !settings.is_denylisted(&image.public_id))
        .enumerate()
        .map(|(idx, image)| (idx + 1, image))
        .collect()
}

/// Images linked to any of the variant's options, or the representative
/// image when no association applies.
fn variant_images(
    variant: &Variant,
    images: &[(usize, &ProductImage)],
    settings: &ExportSettings,
) -> (String, String) {
    let has_associations = images
        .iter()
        .any(|(_, image)| !image.associated_option_ids.is_empty());

    let mut seen = HashSet::new();
    let mut chosen: Vec<&(usize, &ProductImage)> = if has_associations {
        images
            .iter()
            .filter(|(_, image)| {
                variant
                    .option_ids()
                    .any(|id| image.associated_option_ids.contains(id))
            })
            .filter(|(_, image)| seen.insert(image.public_id.clone()))
            .collect()
    } else {
        Vec::new()
    };

    if chosen.is_empty() {
        chosen.extend(images.first());
    }

    let positions = chosen
        .iter()
        .map(|(position, _)| position.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let urls = chosen
        .iter()
        .map(|(_, image)| settings.image_url(&image.public_id))
        .collect::<Vec<_>>()
        .join(",");
    (positions, urls)
}

fn variant_values(variant: &Variant, ordered: &[&AttributeDescriptor]) -> String {
    ordered
        .iter()
        .map(|descriptor| {
            let value = variant
                .selection_for(&descriptor.attribute_id)
                .map(|s| sanitize_list_item(&s.display_value))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| MISSING_VALUE.to_string());
            format!("{value}:{}", descriptor.position)
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn dimension(snapshot: &ProductSnapshot, keys: &[String]) -> String {
    keys.iter()
        .find_map(|key| snapshot.technical_value(key))
        .map(clean_dimension_value)
        .unwrap_or_default()
}

fn delivery_text(snapshot: &ProductSnapshot, settings: &ExportSettings) -> String {
    snapshot
        .delivery
        .as_ref()
        .map(|window| {
            sanitize_text(
                &settings
                    .delivery_template
                    .replace("{min}", &window.min)
                    .replace("{max}", &window.max),
            )
        })
        .unwrap_or_default()
}

/// Name words, configured extra tags, then the supplier. Lowercased and
/// de-duplicated in first-seen order.
fn tags(snapshot: &ProductSnapshot, settings: &ExportSettings) -> String {
    let name_words = snapshot
        .name
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|word| sanitize_list_item(&word.to_lowercase()))
        .filter(|word| word.chars().count() >= TAG_MIN_CHARS);
    let extra = settings
        .extra_tags
        .iter()
        .map(|tag| sanitize_list_item(&tag.to_lowercase()));
    let supplier = std::iter::once(sanitize_list_item(&snapshot.supplier_name.to_lowercase()));

    let mut seen = HashSet::new();
    name_words
        .chain(extra)
        .chain(supplier)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Technical attributes as `Name:Value:Position`, one per name, followed by
/// the complement groups.
fn features(snapshot: &ProductSnapshot, settings: &ExportSettings) -> String {
    let mut seen = HashSet::new();
    let technical = snapshot.technical_attributes.iter().filter_map(|attr| {
        let name = sanitize_list_item(&attr.name);
        let value = sanitize_list_item(&attr.value);
        if name.is_empty() || value.is_empty() || !seen.insert(name.to_lowercase()) {
            return None;
        }
        Some(format!("{name}:{value}:{}", attr.position))
    });

    let in_stock = sanitize_list_item(&settings.in_stock_text);
    let complements = snapshot.complement_groups.iter().filter_map(|group| {
        let name = sanitize_list_item(&group.group_name);
        let items: Vec<String> = group
            .items
            .iter()
            .map(|item| sanitize_list_item(&item.name))
            .filter(|item| !item.is_empty())
            .take(COMPLEMENT_ITEMS_SHOWN)
            .collect();
        if name.is_empty() || items.is_empty() {
            return None;
        }
        Some(format!(
            "{name}:{in_stock} ({}):{COMPLEMENT_FEATURE_POSITION}",
            items.join(", ")
        ))
    });

    technical.chain(complements).collect::<Vec<_>>().join(";")
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
