//! First-run setup

use crate::config::{LodgePaths, Settings};
use crate::error::LodgeError;

use super::file_io::write_json_atomic;

/// Create the directory layout, a default config.json and empty data files
///
/// Existing files are left untouched, so running it twice is harmless.
/// Returns true when config.json was created by this call.
pub fn initialize_storage(paths: &LodgePaths) -> Result<bool, LodgeError> {
    paths.ensure_directories()?;

    let created = !paths.settings_file().exists();
    if created {
        Settings::default().save(paths)?;
    }

    if !paths.bookings_file().exists() {
        write_json_atomic(paths.bookings_file(), &serde_json::json!({ "bookings": [] }))?;
    }
    if !paths.monthly_file().exists() {
        write_json_atomic(paths.monthly_file(), &serde_json::json!({ "months": [] }))?;
    }

    Ok(created)
}
