//! Row mapper: one raw export row to one booking
//!
//! Mapping never fails with an error. A row without a guest name or a
//! readable arrival date, or with a malformed number, comes back with
//! `booking: None` and a [`SkipReason`]; every other missing field is
//! defaulted and reported as a [`FieldWarning`].

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ImportDefaults;
use crate::models::{
    calculate_nights, synthetic_guest_id, Booking, BookingId, Money, Month, Season,
};

use super::columns::{parse_flag, Column, RawRow};
use super::dates::{parse_date, parse_timestamp};
use super::matcher::{find_matching_guest_with_tier, GuestCandidate, MatchTier};
use super::normalize::normalize_country;

/// A field the mapper had to fill in or could not fully trust
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldWarning {
    /// Column absent or empty; the default was substituted
    Defaulted { field: String, value: String },
    /// Departure present but unreadable; arrival date used instead
    UnparseableDeparture { value: String },
    /// No ID/passport; a placeholder was stored
    PlaceholderGuestId,
    /// The guest count column disagrees with adults + children
    GuestCountMismatch { guests: u32, adults: u32, kids: u32 },
}

/// Why a row produced no booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingGuestName,
    MissingArrival,
    UnparseableArrival { value: String },
    InvalidNumber { field: String, value: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingGuestName => write!(f, "missing guest name"),
            SkipReason::MissingArrival => write!(f, "missing arrival date"),
            SkipReason::UnparseableArrival { value } => {
                write!(f, "unreadable arrival date '{}'", value)
            }
            SkipReason::InvalidNumber { field, value } => {
                write!(f, "invalid {} '{}'", field, value)
            }
        }
    }
}

/// Result of mapping one row
#[derive(Debug, Clone, Default)]
pub struct RowMapping {
    /// The new stay, or `None` when the row was skipped
    pub booking: Option<Booking>,
    /// True when the guest was seen before
    pub is_duplicate: bool,
    /// The existing booking of the same guest
    pub matched_guest: Option<Booking>,
    pub match_tier: Option<MatchTier>,
    pub warnings: Vec<FieldWarning>,
    pub skip_reason: Option<SkipReason>,
}

impl RowMapping {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            skip_reason: Some(reason),
            ..Default::default()
        }
    }
}

/// Map a row with the stock import defaults
pub fn map_row_to_booking(row: &RawRow, existing: &[Booking]) -> RowMapping {
    map_row_with_defaults(row, existing, &ImportDefaults::default())
}

/// Map a row, substituting `defaults` for missing fields
pub fn map_row_with_defaults(
    row: &RawRow,
    existing: &[Booking],
    defaults: &ImportDefaults,
) -> RowMapping {
    let mut warnings = Vec::new();
    match build_booking(row, existing, defaults, &mut warnings) {
        Ok((booking, matched)) => {
            let (matched_guest, match_tier) = match matched {
                Some((guest, tier)) => (Some(guest.clone()), Some(tier)),
                None => (None, None),
            };
            RowMapping {
                booking: Some(booking),
                is_duplicate: matched_guest.is_some(),
                matched_guest,
                match_tier,
                warnings,
                skip_reason: None,
            }
        }
        Err(reason) => RowMapping::skipped(reason),
    }
}

fn build_booking<'a>(
    row: &RawRow,
    existing: &'a [Booking],
    defaults: &ImportDefaults,
    warnings: &mut Vec<FieldWarning>,
) -> Result<(Booking, Option<(&'a Booking, MatchTier)>), SkipReason> {
    let guest_name = Column::GuestName
        .lookup(row)
        .ok_or(SkipReason::MissingGuestName)?
        .to_string();

    let arrival_text = Column::Arrival
        .lookup(row)
        .ok_or(SkipReason::MissingArrival)?;
    let check_in = parse_date(arrival_text).ok_or_else(|| SkipReason::UnparseableArrival {
        value: arrival_text.to_string(),
    })?;

    let check_out = match Column::Departure.lookup(row) {
        Some(text) => parse_date(text).unwrap_or_else(|| {
            warnings.push(FieldWarning::UnparseableDeparture {
                value: text.to_string(),
            });
            check_in
        }),
        None => {
            warnings.push(defaulted(Column::Departure, check_in));
            check_in
        }
    };
    let nights = calculate_nights(check_in, check_out);

    let adults = count_or_default(row, Column::Adults, defaults.adults, warnings)?;
    let kids = count_or_default(row, Column::Children, defaults.kids, warnings)?;
    let party = adults
        .checked_add(kids)
        .ok_or_else(|| SkipReason::InvalidNumber {
            field: Column::Guests.label().to_string(),
            value: format!("{} + {}", adults, kids),
        })?;
    let guests = match Column::Guests.lookup(row) {
        Some(text) => {
            let guests = parse_count(Column::Guests, text)?;
            if guests != party {
                warnings.push(FieldWarning::GuestCountMismatch {
                    guests,
                    adults,
                    kids,
                });
            }
            guests
        }
        None => party,
    };

    let estimate = defaults.nightly_rate * nights;
    let total_amount = match Column::Amount.lookup(row) {
        Some(text) => {
            let amount = Money::parse(text).map_err(|_| invalid_number(Column::Amount, text))?;
            if amount.is_zero() {
                warnings.push(defaulted(Column::Amount, estimate));
                estimate
            } else {
                amount
            }
        }
        None => {
            warnings.push(defaulted(Column::Amount, estimate));
            estimate
        }
    };

    let country = match Column::Country.lookup(row) {
        Some(text) => normalize_country(text),
        None => {
            warnings.push(defaulted(Column::Country, &defaults.country));
            normalize_country(&defaults.country)
        }
    };

    let raw_guest_id = Column::GuestId.lookup(row).unwrap_or_default().to_string();
    let email = Column::Email.lookup(row).map(str::to_string);
    let phone = Column::Phone.lookup(row).map(str::to_string);

    // Match on the raw ID; the placeholder is assigned afterwards
    let candidate = GuestCandidate {
        guest_name: guest_name.clone(),
        passport_or_id: raw_guest_id.clone(),
        country: country.clone(),
        email: email.clone(),
        phone: phone.clone(),
    };
    let matched = find_matching_guest_with_tier(&candidate, existing);

    let passport_or_id = if raw_guest_id.is_empty() {
        warnings.push(FieldWarning::PlaceholderGuestId);
        synthetic_guest_id()
    } else {
        raw_guest_id
    };

    let settlement_method = text_or_default(
        row,
        Column::Settlement,
        &defaults.settlement_method,
        warnings,
    );
    let referral_source =
        text_or_default(row, Column::Referral, &defaults.referral_source, warnings);
    let room_type = Column::RoomType
        .lookup(row)
        .unwrap_or(defaults.room_type.as_str())
        .to_string();
    let marketing_consent = Column::MarketingConsent
        .lookup(row)
        .map(parse_flag)
        .unwrap_or(false);
    let created_at = Column::Timestamp
        .lookup(row)
        .and_then(parse_timestamp)
        .map(|ts| ts.and_utc())
        .unwrap_or_else(Utc::now);

    let month = Month::of(check_in);
    let booking = Booking {
        id: BookingId::generate(),
        guest_name,
        passport_or_id,
        email,
        phone,
        country,
        province: Column::Province.lookup(row).map(str::to_string),
        city: Column::City.lookup(row).map(str::to_string),
        check_in_date: check_in,
        check_out_date: check_out,
        nights,
        settlement_method,
        referral_source,
        total_amount: Some(total_amount),
        adults,
        kids,
        guests,
        room_type,
        status: defaults.status,
        season: Season::for_month(month),
        year: check_in.year(),
        month,
        marketing_consent,
        created_at,
    };

    Ok((booking, matched))
}

fn defaulted(column: Column, value: impl std::fmt::Display) -> FieldWarning {
    FieldWarning::Defaulted {
        field: column.label().to_string(),
        value: value.to_string(),
    }
}

fn invalid_number(column: Column, text: &str) -> SkipReason {
    SkipReason::InvalidNumber {
        field: column.label().to_string(),
        value: text.to_string(),
    }
}

fn parse_count(column: Column, text: &str) -> Result<u32, SkipReason> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| invalid_number(column, text))
}

fn count_or_default(
    row: &RawRow,
    column: Column,
    default: u32,
    warnings: &mut Vec<FieldWarning>,
) -> Result<u32, SkipReason> {
    match column.lookup(row) {
        Some(text) => parse_count(column, text),
        None => {
            warnings.push(defaulted(column, default));
            Ok(default)
        }
    }
}

fn text_or_default(
    row: &RawRow,
    column: Column,
    default: &str,
    warnings: &mut Vec<FieldWarning>,
) -> String {
    match column.lookup(row) {
        Some(text) => text.to_string(),
        None => {
            warnings.push(defaulted(column, default));
            default.to_string()
        }
    }
}
