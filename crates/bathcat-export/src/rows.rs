//! Fixed-width export rows for the product and combination import files.
//!
//! Each row type only stores the columns that vary per product or variant.
//! [`ExportRow::record`] lays them out together with the constant columns
//! into an array sized by the header list, so a row can never be shorter or
//! longer than its header.

use serde::Serialize;

pub const PRODUCT_COLUMN_COUNT: usize = 67;
pub const COMBINATION_COLUMN_COUNT: usize = 23;

pub const PRODUCT_HEADERS: [&str; PRODUCT_COLUMN_COUNT] = [
    "Product ID",
    "Active (0/1)",
    "Name *",
    "Categories (x,y,z...)",
    "Price tax excluded",
    "Tax rules ID",
    "Wholesale price",
    "On sale (0/1)",
    "Discount amount",
    "Discount percent",
    "Discount from (yyyy-mm-dd)",
    "Discount to (yyyy-mm-dd)",
    "Reference #",
    "Supplier reference #",
    "Supplier",
    "Manufacturer",
    "EAN13",
    "UPC",
    "MPN",
    "Ecotax",
    "Width",
    "Height",
    "Depth",
    "Weight",
    "Delivery time of in-stock products",
    "Delivery time of out-of-stock products with allowed orders",
    "Quantity",
    "Minimal quantity",
    "Low stock level",
    "Send me an email when the quantity is under this level",
    "Visibility",
    "Additional shipping cost",
    "Unity",
    "Unit price",
    "Summary",
    "Description",
    "Tags (x,y,z...)",
    "Meta title",
    "Meta keywords",
    "Meta description",
    "URL rewritten",
    "Text when in stock",
    "Text when backorder allowed",
    "Available for order (0 = No, 1 = Yes)",
    "Product available date",
    "Product creation date",
    "Show price (0 = No, 1 = Yes)",
    "Image URLs (x,y,z...)",
    "Image alt texts (x,y,z...)",
    "Delete existing images (0 = No, 1 = Yes)",
    "Feature(Name:Value:Position)",
    "Available online only (0 = No, 1 = Yes)",
    "Condition",
    "Customizable (0 = No, 1 = Yes)",
    "Uploadable files (0 = No, 1 = Yes)",
    "Text fields (0 = No, 1 = Yes)",
    "Out of stock action",
    "Virtual product",
    "File URL",
    "Number of allowed downloads",
    "Expiration date",
    "Number of days",
    "ID / Name of shop",
    "Advanced stock management",
    "Depends On Stock",
    "Warehouse",
    "Accessories (x,y,z...)",
];

pub const COMBINATION_HEADERS: [&str; COMBINATION_COLUMN_COUNT] = [
    "Product ID",
    "Product Reference",
    "Attribute (Name:Type:Position)*",
    "Value (Value:Position)*",
    "Supplier reference",
    "Reference",
    "EAN13",
    "UPC",
    "MPN",
    "Wholesale price",
    "Impact on price",
    "Ecotax",
    "Quantity",
    "Minimal quantity",
    "Low stock level",
    "Send me an email when the quantity is under this level",
    "Impact on weight",
    "Default (0 = No, 1 = Yes)",
    "Combination available date",
    "Choose among product images by position (1,2,3)",
    "Image URLs (x,y,z...)",
    "Image alt texts (x,y,z...)",
    "ID / Name of shop",
];

/// A row that can be written to one of the import files.
pub trait ExportRow {
    const HEADERS: &'static [&'static str];

    /// Every column value in header order.
    fn record(&self) -> Vec<String>;
}

fn flag(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

/// One product line of the products import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub product_id: u64,
    pub name: String,
    pub categories: String,
    pub price_tax_excluded: String,
    pub on_sale: bool,
    /// Empty unless on sale.
    pub discount_amount: String,
    /// Empty unless on sale.
    pub discount_percent: String,
    pub reference: String,
    pub supplier: String,
    pub manufacturer: String,
    pub ean13: String,
    pub width: String,
    pub height: String,
    pub depth: String,
    pub delivery_time: String,
    pub summary: String,
    pub description: String,
    pub tags: String,
    pub meta_title: String,
    pub meta_description: String,
    pub url_rewritten: String,
    pub text_when_in_stock: String,
    pub image_urls: String,
    pub features: String,
    pub file_url: String,
}

impl ProductRow {
    fn columns(&self) -> [String; PRODUCT_COLUMN_COUNT] {
        let empty = String::new;
        [
            self.product_id.to_string(),
            "1".to_string(),
            self.name.clone(),
            self.categories.clone(),
            self.price_tax_excluded.clone(),
            "1".to_string(),
            empty(),
            flag(self.on_sale),
            self.discount_amount.clone(),
            self.discount_percent.clone(),
            empty(),
            empty(),
            self.reference.clone(),
            empty(),
            self.supplier.clone(),
            self.manufacturer.clone(),
            self.ean13.clone(),
            empty(),
            empty(),
            empty(),
            self.width.clone(),
            self.height.clone(),
            self.depth.clone(),
            "0".to_string(),
            self.delivery_time.clone(),
            empty(),
            "0".to_string(),
            "1".to_string(),
            empty(),
            "0".to_string(),
            "both".to_string(),
            empty(),
            empty(),
            empty(),
            self.summary.clone(),
            self.description.clone(),
            self.tags.clone(),
            self.meta_title.clone(),
            empty(),
            self.meta_description.clone(),
            self.url_rewritten.clone(),
            self.text_when_in_stock.clone(),
            empty(),
            "1".to_string(),
            empty(),
            empty(),
            "1".to_string(),
            self.image_urls.clone(),
            empty(),
            "1".to_string(),
            self.features.clone(),
            "0".to_string(),
            "new".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            flag(!self.file_url.is_empty()),
            self.file_url.clone(),
            empty(),
            empty(),
            empty(),
            "1".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            empty(),
        ]
    }
}

impl ExportRow for ProductRow {
    const HEADERS: &'static [&'static str] = &PRODUCT_HEADERS;

    fn record(&self) -> Vec<String> {
        self.columns().into()
    }
}

/// One variant line of the combinations import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinationRow {
    pub product_id: u64,
    /// `Name:type:position` entries joined by `,`. Identical for every
    /// variant of one product.
    pub attributes: String,
    /// `Value:position` entries joined by `,`, positions ascending.
    pub values: String,
    pub reference: String,
    pub ean13: String,
    pub price_impact: String,
    pub is_default: bool,
    /// 1-based positions joined by `,`.
    pub image_positions: String,
    pub image_urls: String,
}

impl CombinationRow {
    fn columns(&self) -> [String; COMBINATION_COLUMN_COUNT] {
        let empty = String::new;
        [
            self.product_id.to_string(),
            empty(),
            self.attributes.clone(),
            self.values.clone(),
            empty(),
            self.reference.clone(),
            self.ean13.clone(),
            empty(),
            empty(),
            empty(),
            self.price_impact.clone(),
            "0".to_string(),
            "100".to_string(),
            "1".to_string(),
            empty(),
            empty(),
            "0".to_string(),
            flag(self.is_default),
            empty(),
            self.image_positions.clone(),
            self.image_urls.clone(),
            empty(),
            "1".to_string(),
        ]
    }
}

impl ExportRow for CombinationRow {
    const HEADERS: &'static [&'static str] = &COMBINATION_HEADERS;

    fn record(&self) -> Vec<String> {
        self.columns().into()
    }
}
