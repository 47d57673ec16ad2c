pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod project;
pub mod reader;
pub mod rows;
pub mod sanitize;
pub mod settings;
pub mod types;
pub mod writer;

pub use error::ExportError;
pub use normalize::{discover_attributes, find_name_collisions, AttributeNameCollision};
pub use pipeline::{export_product, inspect_attributes, AttributeReport, ProductExport};
pub use project::{project_combination_rows, project_product_row};
pub use reader::{read_snapshot, SnapshotRead};
pub use rows::{CombinationRow, ExportRow, ProductRow, COMBINATION_HEADERS, PRODUCT_HEADERS};
pub use settings::ExportSettings;
pub use writer::{write_csv_file, write_rows};
