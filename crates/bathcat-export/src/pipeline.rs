use bathcat_core::{AttributeDescriptor, IdAllocator};
use serde::Serialize;

use crate::error::ExportError;
use crate::normalize::{discover_attributes, find_name_collisions, AttributeNameCollision};
use crate::project::{project_combination_rows, project_product_row};
use crate::reader::read_snapshot;
use crate::rows::{CombinationRow, ProductRow};
use crate::settings::ExportSettings;

/// Everything produced for one storefront document.
#[derive(Debug)]
pub struct ProductExport {
    pub source_id: String,
    pub product: ProductRow,
    pub combinations: Vec<CombinationRow>,
    pub descriptors: Vec<AttributeDescriptor>,
    pub collisions: Vec<AttributeNameCollision>,
    pub skipped_options: Vec<ExportError>,
}

/// Attribute discovery result for one document, without projecting rows.
#[derive(Debug, Serialize)]
pub struct AttributeReport {
    pub source_id: String,
    pub variant_count: usize,
    pub descriptors: Vec<AttributeDescriptor>,
    pub collisions: Vec<AttributeNameCollision>,
}

/// Reads, normalizes and projects one document.
///
/// An external product ID is taken from `ids` only once the document has
/// been read successfully, so skipped documents leave no gaps.
///
/// # Errors
///
/// Returns the reader's error when the document lacks its product identity
/// or variant list, or has fields of the wrong JSON type.
pub fn export_product(
    document: &serde_json::Value,
    ids: &mut IdAllocator,
    settings: &ExportSettings,
) -> Result<ProductExport, ExportError> {
    let read = read_snapshot(document)?;
    let snapshot = read.snapshot;

    let descriptors =
        discover_attributes(&snapshot.variants, &settings.vocabulary, settings.attribute_scan);
    let collisions = find_name_collisions(&descriptors);
    for collision in &collisions {
        tracing::warn!(
            product_id = %snapshot.id,
            display_name = %collision.display_name,
            attribute_ids = ?collision.attribute_ids,
            "attribute name collision"
        );
    }

    let product_id = ids.allocate();
    let product = project_product_row(&snapshot, product_id, settings);
    let combinations = project_combination_rows(&snapshot, &descriptors, product_id, settings);

    tracing::debug!(
        product_id = %snapshot.id,
        export_id = product_id,
        variants = snapshot.variant_count(),
        attributes = descriptors.len(),
        "projected product"
    );

    Ok(ProductExport {
        source_id: snapshot.id,
        product,
        combinations,
        descriptors,
        collisions,
        skipped_options: read.skipped_options,
    })
}

/// Discovers the attributes of one document without allocating an ID.
///
/// # Errors
///
/// Same as [`export_product`].
pub fn inspect_attributes(
    document: &serde_json::Value,
    settings: &ExportSettings,
) -> Result<AttributeReport, ExportError> {
    let snapshot = read_snapshot(document)?.snapshot;
    let descriptors =
        discover_attributes(&snapshot.variants, &settings.vocabulary, settings.attribute_scan);
    let collisions = find_name_collisions(&descriptors);

    Ok(AttributeReport {
        variant_count: snapshot.variant_count(),
        source_id: snapshot.id,
        descriptors,
        collisions,
    })
}
