//! YAML export for a human-readable copy of the data

use std::io::Write;

use crate::config::HotelContext;
use crate::error::{LodgeError, LodgeResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export everything to YAML, preceded by a comment header
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    hotel: &HotelContext,
    writer: &mut W,
) -> LodgeResult<()> {
    let export = FullExport::from_storage(storage, hotel)?;
    export.validate().map_err(LodgeError::Export)?;

    let header = format!(
        "# Lodgebook export for {}\n# Generated: {}\n# App Version: {}\n# Contains guest personal data; store it accordingly.\n\n",
        export.hotel.name, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LodgeError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LodgeError::Export(e.to_string()))
}
