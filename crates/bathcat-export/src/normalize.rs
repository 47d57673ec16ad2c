//! Attribute discovery: turns the option selections of a product's variants
//! into an ordered set of [`AttributeDescriptor`]s.
//!
//! Positions are assigned the first time an attribute ID is seen, scanning
//! variants in input order. Names come from the storefront when a
//! record carries one, otherwise from the [`AttributeVocabulary`] rules.

use std::collections::HashSet;

use bathcat_core::{
    AttributeDescriptor, AttributeKind, AttributeScan, AttributeVocabulary, OptionSelection,
    Variant,
};
use serde::Serialize;

use crate::sanitize::sanitize_list_item;

/// Two or more attribute IDs of one product that ended up with the same
/// display name. Tolerated: the descriptors stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeNameCollision {
    pub display_name: String,
    pub attribute_ids: Vec<String>,
}

/// Discovers the attribute set of one product.
///
/// With [`AttributeScan::FirstVariant`] only the first variant is looked at,
/// which reproduces legacy exports but misses attributes that first appear
/// later.
#[must_use]
pub fn discover_attributes(
    variants: &[Variant],
    vocabulary: &AttributeVocabulary,
    scan: AttributeScan,
) -> Vec<AttributeDescriptor> {
    let scanned = match scan {
        AttributeScan::AllVariants => variants,
        AttributeScan::FirstVariant => &variants[..variants.len().min(1)],
    };

    let mut seen = HashSet::new();
    let mut descriptors: Vec<AttributeDescriptor> = Vec::new();

    for selection in scanned.iter().flat_map(|v| v.option_selections.iter()) {
        if !seen.insert(selection.attribute_id.as_str()) {
            continue;
        }
        let position = descriptors.len();
        descriptors.push(AttributeDescriptor {
            attribute_id: selection.attribute_id.clone(),
            display_name: display_name(selection, scanned, vocabulary, position),
            kind: if selection.shape.is_swatch() {
                AttributeKind::Color
            } else {
                AttributeKind::Select
            },
            position,
        });
    }

    descriptors
}

/// Name priority: an explicit label on any record of the same attribute,
/// then the first vocabulary rule matching the first-seen value, then the
/// positional fallback.
fn display_name(
    first_seen: &OptionSelection,
    scanned: &[Variant],
    vocabulary: &AttributeVocabulary,
    position: usize,
) -> String {
    let explicit = scanned
        .iter()
        .flat_map(|v| v.option_selections.iter())
        .filter(|s| s.attribute_id == first_seen.attribute_id)
        .filter_map(|s| s.attribute_label.as_deref())
        .map(sanitize_list_item)
        .find(|label| !label.is_empty());

    explicit
        .or_else(|| {
            vocabulary
                .infer_label(&first_seen.display_value)
                .map(sanitize_list_item)
                .filter(|label| !label.is_empty())
        })
        .unwrap_or_else(|| sanitize_list_item(&vocabulary.fallback_label(position)))
}

/// Groups descriptors whose display names are equal ignoring case. Groups
/// are returned in the order their first member appears.
#[must_use]
pub fn find_name_collisions(descriptors: &[AttributeDescriptor]) -> Vec<AttributeNameCollision> {
    let mut groups: Vec<(String, AttributeNameCollision)> = Vec::new();

    for descriptor in descriptors {
        let key = descriptor.display_name.to_lowercase();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.attribute_ids.push(descriptor.attribute_id.clone()),
            None => groups.push((
                key,
                AttributeNameCollision {
                    display_name: descriptor.display_name.clone(),
                    attribute_ids: vec![descriptor.attribute_id.clone()],
                },
            )),
        }
    }

    groups
        .into_iter()
        .map(|(_, group)| group)
        .filter(|group| group.attribute_ids.len() > 1)
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
