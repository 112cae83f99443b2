//! Booking model
//!
//! A booking is one stay by one guest. Repeat guests have several bookings;
//! there is no separate guest entity, guest identity is carried by
//! `passport_or_id` (or by name and country when no document was captured).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calendar::{Month, Season};
use super::ids::BookingId;
use super::money::Money;

/// Lifecycle of a stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "confirmed" => Some(Self::Confirmed),
            "checked-in" | "checkedin" => Some(Self::CheckedIn),
            "checked-out" | "checkedout" => Some(Self::CheckedOut),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "Confirmed"),
            Self::CheckedIn => write!(f, "Checked in"),
            Self::CheckedOut => write!(f, "Checked out"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A guest stay record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,

    pub guest_name: String,

    /// Passport or national ID number; primary natural key of the guest
    #[serde(default)]
    pub passport_or_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    pub check_in_date: NaiveDate,

    pub check_out_date: NaiveDate,

    /// Number of nights, at least 1
    pub nights: u32,

    #[serde(default)]
    pub settlement_method: String,

    #[serde(default)]
    pub referral_source: String,

    /// Amount charged for the stay; absent on some legacy records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Money>,

    pub adults: u32,

    #[serde(default)]
    pub kids: u32,

    pub guests: u32,

    #[serde(default)]
    pub room_type: String,

    #[serde(default)]
    pub status: BookingStatus,

    pub season: Season,

    pub year: i32,

    pub month: Month,

    #[serde(default)]
    pub marketing_consent: bool,

    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a booking for a stay, deriving nights, season, month and year
    ///
    /// Occupancy defaults to two adults; commercial fields start empty.
    pub fn new(
        guest_name: impl Into<String>,
        country: impl Into<String>,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
    ) -> Self {
        Self {
            id: BookingId::generate(),
            guest_name: guest_name.into(),
            passport_or_id: String::new(),
            email: None,
            phone: None,
            country: country.into(),
            province: None,
            city: None,
            check_in_date,
            check_out_date,
            nights: calculate_nights(check_in_date, check_out_date),
            settlement_method: String::new(),
            referral_source: String::new(),
            total_amount: None,
            adults: 2,
            kids: 0,
            guests: 2,
            room_type: String::new(),
            status: BookingStatus::default(),
            season: Season::for_date(check_in_date),
            year: check_in_date.year(),
            month: Month::of(check_in_date),
            marketing_consent: false,
            created_at: Utc::now(),
        }
    }

    /// Amount charged, or `nights * nightly_rate` when none was recorded
    pub fn amount_or_estimate(&self, nightly_rate: Money) -> Money {
        self.total_amount.unwrap_or(nightly_rate * self.nights)
    }

    /// Check whether the guest ID was captured (not a synthetic placeholder)
    pub fn has_real_guest_id(&self) -> bool {
        !self.passport_or_id.trim().is_empty()
            && !super::ids::is_synthetic_guest_id(&self.passport_or_id)
    }

    pub fn validate(&self) -> Result<(), BookingValidationError> {
        if self.guest_name.trim().is_empty() {
            return Err(BookingValidationError::EmptyGuestName);
        }
        if self.country.trim().is_empty() {
            return Err(BookingValidationError::EmptyCountry);
        }
        if self.check_out_date < self.check_in_date {
            return Err(BookingValidationError::DepartureBeforeArrival {
                check_in: self.check_in_date,
                check_out: self.check_out_date,
            });
        }
        if self.nights == 0 {
            return Err(BookingValidationError::ZeroNights);
        }
        Ok(())
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} +{}n",
            self.guest_name, self.country, self.check_in_date, self.nights
        )
    }
}

/// Number of nights between two dates, never less than 1
///
/// Same-day stays and departure dates before arrival both count as one night.
pub fn calculate_nights(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    days.max(1) as u32
}

/// Validation errors for bookings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    EmptyGuestName,
    EmptyCountry,
    DepartureBeforeArrival {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    ZeroNights,
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGuestName => write!(f, "Guest name cannot be empty"),
            Self::EmptyCountry => write!(f, "Country cannot be empty"),
            Self::DepartureBeforeArrival {
                check_in,
                check_out,
            } => write!(
                f,
                "Departure {} is before arrival {}",
                check_out, check_in
            ),
            Self::ZeroNights => write!(f, "A stay must be at least one night"),
        }
    }
}

impl std::error::Error for BookingValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nights_same_day_is_one() {
        let d = date(2024, 3, 5);
        assert_eq!(calculate_nights(d, d), 1);
    }

    #[test]
    fn test_nights_inverted_is_one() {
        assert_eq!(calculate_nights(date(2024, 3, 10), date(2024, 3, 5)), 1);
    }

    #[test]
    fn test_nights_across_month_boundary() {
        assert_eq!(calculate_nights(date(2024, 2, 27), date(2024, 3, 2)), 4);
    }

    #[test]
    fn test_new_derives_calendar_fields() {
        let booking = Booking::new("Thandi Mokoena", "South Africa", date(2025, 6, 1), date(2025, 6, 4));
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.month, Month::Jun);
        assert_eq!(booking.year, 2025);
        assert_eq!(booking.season, Season::Low);
        assert!(booking.validate().is_ok());
    }

    #[test]
    fn test_amount_estimate() {
        let mut booking = Booking::new("A", "B", date(2025, 1, 1), date(2025, 1, 3));
        assert_eq!(
            booking.amount_or_estimate(Money::from_units(2500)),
            Money::from_units(5000)
        );
        booking.total_amount = Some(Money::from_units(1200));
        assert_eq!(
            booking.amount_or_estimate(Money::from_units(2500)),
            Money::from_units(1200)
        );
    }

    #[test]
    fn test_validation_rejects_inverted_dates() {
        let mut booking = Booking::new("A", "B", date(2025, 1, 5), date(2025, 1, 6));
        booking.check_out_date = date(2025, 1, 1);
        assert!(matches!(
            booking.validate(),
            Err(BookingValidationError::DepartureBeforeArrival { .. })
        ));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("Checked Out"), Some(BookingStatus::CheckedOut));
        assert_eq!(BookingStatus::parse("checked_in"), Some(BookingStatus::CheckedIn));
        assert_eq!(BookingStatus::parse("canceled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("gone"), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let booking = Booking::new("A", "B", date(2025, 1, 5), date(2025, 1, 6));
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("guestName").is_some());
        assert!(json.get("checkInDate").is_some());
        assert_eq!(json["month"], "Jan");
        assert_eq!(json["season"], "high");
    }
}
