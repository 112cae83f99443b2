//! Booking repository for JSON storage
//!
//! Bookings are kept in insertion order. Guest matching returns the first
//! matching stay, so the order on disk is part of the data.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::LodgeError;
use crate::models::{Booking, BookingId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of bookings.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BookingData {
    bookings: Vec<Booking>,
}

/// Repository for booking persistence
pub struct BookingRepository {
    path: PathBuf,
    data: RwLock<Vec<Booking>>,
}

impl BookingRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Booking>>, LodgeError> {
        self.data
            .read()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Booking>>, LodgeError> {
        self.data
            .write()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load bookings from disk
    pub fn load(&self) -> Result<(), LodgeError> {
        let file_data: BookingData = read_json(&self.path)?;
        *self.write()? = file_data.bookings;
        Ok(())
    }

    /// Save bookings to disk
    pub fn save(&self) -> Result<(), LodgeError> {
        let file_data = BookingData {
            bookings: self.read()?.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All bookings in stored order
    pub fn get_all(&self) -> Result<Vec<Booking>, LodgeError> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: &BookingId) -> Result<Option<Booking>, LodgeError> {
        Ok(self.read()?.iter().find(|b| &b.id == id).cloned())
    }

    pub fn count(&self) -> Result<usize, LodgeError> {
        Ok(self.read()?.len())
    }

    /// Append one booking
    pub fn add(&self, booking: Booking) -> Result<(), LodgeError> {
        self.write()?.push(booking);
        Ok(())
    }

    /// Replace the whole list, e.g. with the result of a confirmed import
    pub fn replace_all(&self, bookings: Vec<Booking>) -> Result<(), LodgeError> {
        *self.write()? = bookings;
        Ok(())
    }

    /// Remove a booking, returning it if it existed
    pub fn delete(&self, id: &BookingId) -> Result<Option<Booking>, LodgeError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|b| &b.id == id)
            .map(|idx| data.remove(idx)))
    }
}
