//! Storage layer for Lodgebook
//!
//! JSON files under the data directory, written atomically, plus the
//! append-only audit log.

pub mod bookings;
pub mod file_io;
pub mod init;
pub mod monthly;
pub mod preview;

pub use bookings::BookingRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use monthly::MonthlyRepository;
pub use preview::PreviewStore;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::LodgePaths;
use crate::error::LodgeError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LodgePaths,
    pub bookings: BookingRepository,
    pub monthly: MonthlyRepository,
    pub previews: PreviewStore,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage rooted at `paths`, creating directories as needed
    pub fn new(paths: LodgePaths) -> Result<Self, LodgeError> {
        paths.ensure_directories()?;

        Ok(Self {
            bookings: BookingRepository::new(paths.bookings_file()),
            monthly: MonthlyRepository::new(paths.monthly_file()),
            previews: PreviewStore::new(paths.import_preview_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LodgePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Append an audit entry
    pub fn log_audit(&self, entry: &AuditEntry) -> Result<(), LodgeError> {
        self.audit.log(entry)
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LodgeError> {
        self.bookings.load()?;
        self.monthly.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LodgeError> {
        self.bookings.save()?;
        self.monthly.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());

        storage.load_all().unwrap();
        assert_eq!(storage.bookings.count().unwrap(), 0);
        assert!(storage.monthly.get_all().unwrap().is_empty());
    }
}
