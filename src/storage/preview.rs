//! Pending import preview (import_preview.json)
//!
//! A preview lives on disk between `lodge import preview` and the confirm or
//! cancel that consumes it. At most one preview is pending at a time.

use std::path::PathBuf;

use crate::error::LodgeError;
use crate::import::ImportPreview;

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

pub struct PreviewStore {
    path: PathBuf,
}

impl PreviewStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Option<ImportPreview>, LodgeError> {
        read_json_optional(&self.path)
    }

    /// Store a preview, replacing any pending one
    pub fn save(&self, preview: &ImportPreview) -> Result<(), LodgeError> {
        write_json_atomic(&self.path, preview)
    }

    /// Discard the pending preview; returns false when there was none
    pub fn clear(&self) -> Result<bool, LodgeError> {
        remove_if_exists(&self.path)
    }

    pub fn is_pending(&self) -> bool {
        self.path.exists()
    }
}
