//! Export module for Lodgebook
//!
//! - CSV: bookings (re-importable) and the monthly table
//! - JSON: full machine-readable export
//! - YAML: full human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_bookings_csv, export_monthly_csv, write_bookings_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
