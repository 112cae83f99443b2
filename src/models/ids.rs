//! Booking identifiers
//!
//! Booking IDs are opaque strings built from a millisecond timestamp and a
//! random suffix. Records created by older tooling may carry any string, so
//! parsing never fails.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix of every generated booking ID
const BOOKING_PREFIX: &str = "bk-";

/// Unique identifier of a booking (one stay)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Generate a fresh ID: `bk-<unix millis>-<8 random hex chars>`
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}-{}",
            BOOKING_PREFIX,
            Utc::now().timestamp_millis(),
            &suffix[..8]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookingId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl FromStr for BookingId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// Placeholder stored in `passport_or_id` when an imported row has no ID
///
/// The value is unique per call and can never equal a real document number,
/// so later ID-tier matches against such a record are impossible.
pub fn synthetic_guest_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("IMPORT-{}-{}", Utc::now().timestamp_millis(), &suffix[..6])
}

/// Check whether an ID was produced by [`synthetic_guest_id`]
pub fn is_synthetic_guest_id(id: &str) -> bool {
    id.starts_with("IMPORT-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = BookingId::generate();
        let b = BookingId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("bk-"));
    }

    #[test]
    fn test_id_serialization() {
        let id = BookingId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BookingId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_legacy_ids_parse() {
        let id: BookingId = " 1699999999999abc ".parse().unwrap();
        assert_eq!(id.as_str(), "1699999999999abc");
    }

    #[test]
    fn test_synthetic_guest_id() {
        let id = synthetic_guest_id();
        assert!(is_synthetic_guest_id(&id));
        assert_ne!(id, synthetic_guest_id());
        assert!(!is_synthetic_guest_id("8001015009087"));
    }
}
