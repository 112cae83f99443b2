//! JSON file helpers with atomic writes
//!
//! Writes go to a sibling `.tmp` file which is synced and then renamed over
//! the target, so a crash leaves either the old or the new contents.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LodgeError;

/// Read JSON, or `T::default()` when the file doesn't exist yet
pub fn read_json<T, P>(path: P) -> Result<T, LodgeError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    Ok(read_json_optional(path)?.unwrap_or_default())
}

/// Read JSON, or `None` when the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, LodgeError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| LodgeError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| LodgeError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON atomically (temp file, sync, rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LodgeError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LodgeError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LodgeError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| LodgeError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| LodgeError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LodgeError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LodgeError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// Delete a file; a file that is already gone is not an error
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, LodgeError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LodgeError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month, MonthlyData};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("monthly.json");

        let data: Vec<MonthlyData> = read_json(&path).unwrap();
        assert!(data.is_empty());
        assert!(read_json_optional::<Vec<MonthlyData>, _>(&path)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("monthly.json");

        let mut jan = MonthlyData::new(Month::Jan, 2025);
        jan.revenue = Money::from_units(1800);
        write_json_atomic(&path, &vec![jan.clone()]).unwrap();

        let loaded: Vec<MonthlyData> = read_json(&path).unwrap();
        assert_eq!(loaded, vec![jan]);
        assert!(!temp_dir.path().join("data").join("monthly.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookings.json");
        fs::write(&path, "{not json").unwrap();

        let err = read_json::<Vec<MonthlyData>, _>(&path).unwrap_err();
        assert!(matches!(err, LodgeError::Storage(_)));
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import_preview.json");
        fs::write(&path, "{}").unwrap();

        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
    }
}
