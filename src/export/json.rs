//! JSON export
//!
//! Full dump of the hotel's bookings and monthly table with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HotelContext;
use crate::error::{LodgeError, LodgeResult};
use crate::models::{Booking, MonthlyData};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Version of lodgebook that wrote the export
    pub app_version: String,
    pub hotel: HotelContext,
    pub bookings: Vec<Booking>,
    pub monthly: Vec<MonthlyData>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub booking_count: usize,
    pub month_count: usize,
    /// Distinct ID/passport numbers, placeholders included
    pub guest_count: usize,
    pub earliest_arrival: Option<String>,
    pub latest_arrival: Option<String>,
}

impl FullExport {
    pub fn new(hotel: HotelContext, bookings: Vec<Booking>, monthly: Vec<MonthlyData>) -> Self {
        let guest_count = bookings
            .iter()
            .map(|b| b.passport_or_id.trim().to_uppercase())
            .collect::<HashSet<_>>()
            .len();

        let metadata = ExportMetadata {
            booking_count: bookings.len(),
            month_count: monthly.len(),
            guest_count,
            earliest_arrival: bookings
                .iter()
                .map(|b| b.check_in_date)
                .min()
                .map(|d| d.to_string()),
            latest_arrival: bookings
                .iter()
                .map(|b| b.check_in_date)
                .max()
                .map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            hotel,
            bookings,
            monthly,
            metadata,
        }
    }

    pub fn from_storage(storage: &Storage, hotel: &HotelContext) -> LodgeResult<Self> {
        Ok(Self::new(
            hotel.clone(),
            storage.bookings.get_all()?,
            storage.monthly.get_all()?,
        ))
    }

    /// Check schema version, unique booking IDs, valid bookings and one
    /// entry per month
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = HashSet::new();
        for booking in &self.bookings {
            if !ids.insert(&booking.id) {
                return Err(format!("Duplicate booking ID {}", booking.id));
            }
            booking
                .validate()
                .map_err(|e| format!("Booking {}: {}", booking.id, e))?;
        }

        let mut months = HashSet::new();
        for month in &self.monthly {
            if !months.insert(month.sort_key()) {
                return Err(format!("Month {} appears twice", month.key()));
            }
        }

        Ok(())
    }
}

/// Export everything to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    hotel: &HotelContext,
    writer: &mut W,
    pretty: bool,
) -> LodgeResult<()> {
    let export = FullExport::from_storage(storage, hotel)?;
    export.validate().map_err(LodgeError::Export)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LodgeError::Export(e.to_string()))
}
