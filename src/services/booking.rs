//! Booking service
//!
//! Manual check-in at the front desk, guest history lookup and deletion.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::config::Settings;
use crate::error::{LodgeError, LodgeResult};
use crate::import::{merge_monthly_with, normalize_country, normalize_guest_id, normalize_guest_name};
use crate::models::{
    calculate_nights, synthetic_guest_id, Booking, BookingId, BookingStatus, Money, Month, Season,
};
use crate::storage::Storage;

/// Everything the check-in form captures
#[derive(Debug, Clone, Default)]
pub struct CheckInInput {
    pub guest_name: String,
    pub passport_or_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: String,
    pub province: Option<String>,
    pub city: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub adults: u32,
    pub kids: u32,
    pub settlement_method: Option<String>,
    pub referral_source: Option<String>,
    pub total_amount: Option<Money>,
    pub room_type: Option<String>,
    pub marketing_consent: bool,
    /// The guest must accept the indemnity before checking in
    pub indemnity_accepted: bool,
}

/// Narrow `list` down; every `None` field matches everything
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub year: Option<i32>,
    pub month: Option<Month>,
    pub country: Option<String>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        self.year.map_or(true, |y| booking.year == y)
            && self.month.map_or(true, |m| booking.month == m)
            && self
                .country
                .as_deref()
                .map_or(true, |c| normalize_country(c) == booking.country)
    }
}

/// Service for booking management
pub struct BookingService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> BookingService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Record a walk-in or arriving guest
    pub fn check_in(&self, input: CheckInInput) -> LodgeResult<Booking> {
        let guest_name = input.guest_name.trim();
        if guest_name.is_empty() {
            return Err(LodgeError::Validation("Guest name cannot be empty".into()));
        }
        if input.adults == 0 {
            return Err(LodgeError::Validation(
                "At least one adult must check in".into(),
            ));
        }
        if !input.indemnity_accepted {
            return Err(LodgeError::Validation(
                "The indemnity must be accepted before check-in".into(),
            ));
        }

        let guests = input.adults.checked_add(input.kids).ok_or_else(|| {
            LodgeError::Validation(format!(
                "Party of {} adult(s) and {} child(ren) is too large",
                input.adults, input.kids
            ))
        })?;

        let check_in = input
            .check_in_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let check_out = input.check_out_date.unwrap_or(check_in);
        if check_out < check_in {
            return Err(LodgeError::Validation(format!(
                "Departure {} is before arrival {}",
                check_out, check_in
            )));
        }

        let defaults = &self.settings.import;
        let country = if input.country.trim().is_empty() {
            defaults.country.clone()
        } else {
            normalize_country(input.country.trim())
        };
        let passport_or_id = input
            .passport_or_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(synthetic_guest_id);

        let month = Month::of(check_in);
        let booking = Booking {
            id: BookingId::generate(),
            guest_name: guest_name.to_string(),
            passport_or_id,
            email: input.email,
            phone: input.phone,
            country,
            province: input.province,
            city: input.city,
            check_in_date: check_in,
            check_out_date: check_out,
            nights: calculate_nights(check_in, check_out),
            settlement_method: input
                .settlement_method
                .unwrap_or_else(|| defaults.settlement_method.clone()),
            referral_source: input
                .referral_source
                .unwrap_or_else(|| defaults.referral_source.clone()),
            total_amount: input.total_amount,
            adults: input.adults,
            kids: input.kids,
            guests,
            room_type: input
                .room_type
                .unwrap_or_else(|| defaults.room_type.clone()),
            status: BookingStatus::CheckedIn,
            season: Season::for_month(month),
            year: check_in.year(),
            month,
            marketing_consent: input.marketing_consent,
            created_at: Utc::now(),
        };

        booking
            .validate()
            .map_err(|e| LodgeError::Validation(e.to_string()))?;

        self.storage.bookings.add(booking.clone())?;
        let monthly = merge_monthly_with(
            &self.storage.monthly.get_all()?,
            std::slice::from_ref(&booking),
            defaults.nightly_rate,
            &self.settings.occupancy,
        );
        self.storage.monthly.replace_all(monthly)?;
        self.storage.save_all()?;

        self.storage.log_audit(&AuditEntry::create(
            EntityType::Booking,
            booking.id.as_str(),
            Some(booking.guest_name.clone()),
            &booking,
        ))?;

        info!(booking = %booking.id, nights = booking.nights, "guest checked in");
        Ok(booking)
    }

    /// Bookings matching `filter`, most recent arrival first
    pub fn list(&self, filter: &BookingFilter) -> LodgeResult<Vec<Booking>> {
        let mut bookings: Vec<_> = self
            .storage
            .bookings
            .get_all()?
            .into_iter()
            .filter(|b| filter.matches(b))
            .collect();
        bookings.sort_by(|a, b| b.check_in_date.cmp(&a.check_in_date));
        Ok(bookings)
    }

    pub fn get(&self, id: &BookingId) -> LodgeResult<Booking> {
        self.storage
            .bookings
            .get(id)?
            .ok_or_else(|| LodgeError::booking_not_found(id.as_str()))
    }

    /// All stays of a guest, oldest first
    ///
    /// `query` is compared against the ID/passport (case-insensitive) and
    /// against the normalized guest name.
    pub fn find_guest_history(&self, query: &str) -> LodgeResult<Vec<Booking>> {
        let wanted_id = normalize_guest_id(query);
        let wanted_name = normalize_guest_name(query);
        if wanted_id.is_empty() {
            return Err(LodgeError::Validation("Search query cannot be empty".into()));
        }

        let mut stays: Vec<_> = self
            .storage
            .bookings
            .get_all()?
            .into_iter()
            .filter(|b| {
                normalize_guest_id(&b.passport_or_id) == wanted_id
                    || normalize_guest_name(&b.guest_name) == wanted_name
            })
            .collect();

        if stays.is_empty() {
            return Err(LodgeError::guest_not_found(query.trim()));
        }
        stays.sort_by_key(|b| b.check_in_date);
        Ok(stays)
    }

    /// Remove a booking
    ///
    /// Monthly aggregates are not rolled back; they count what was imported.
    pub fn delete(&self, id: &BookingId) -> LodgeResult<Booking> {
        let booking = self
            .storage
            .bookings
            .delete(id)?
            .ok_or_else(|| LodgeError::booking_not_found(id.as_str()))?;
        self.storage.bookings.save()?;

        self.storage.log_audit(&AuditEntry::delete(
            EntityType::Booking,
            booking.id.as_str(),
            Some(booking.guest_name.clone()),
            &booking,
        ))?;

        info!(booking = %booking.id, "booking deleted");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::LodgePaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, id: Option<&str>) -> CheckInInput {
        CheckInInput {
            guest_name: name.into(),
            passport_or_id: id.map(String::from),
            country: "UK".into(),
            check_in_date: Some(date(2025, 7, 1)),
            check_out_date: Some(date(2025, 7, 4)),
            adults: 2,
            kids: 1,
            indemnity_accepted: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_check_in_derives_fields_and_updates_monthly() {
        let (_temp, storage, settings) = setup();
        let service = BookingService::new(&storage, &settings);

        let booking = service.check_in(input("Mary Jones", Some("P55"))).unwrap();
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.guests, 3);
        assert_eq!(booking.country, "United Kingdom");
        assert_eq!(booking.season, Season::Low);
        assert_eq!(booking.status, BookingStatus::CheckedIn);
        assert_eq!(booking.settlement_method, "Card");

        let july = storage.monthly.get(Month::Jul, 2025).unwrap().unwrap();
        assert_eq!(july.bookings, 1);
        assert_eq!(july.revenue, Money::from_units(7500));

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
    }

    #[test]
    fn test_check_in_validation() {
        let (_temp, storage, settings) = setup();
        let service = BookingService::new(&storage, &settings);

        let mut no_indemnity = input("A", None);
        no_indemnity.indemnity_accepted = false;
        assert!(service.check_in(no_indemnity).unwrap_err().is_validation());

        let mut inverted = input("A", None);
        inverted.check_out_date = Some(date(2025, 6, 1));
        assert!(service.check_in(inverted).unwrap_err().is_validation());

        let mut no_adults = input("A", None);
        no_adults.adults = 0;
        assert!(service.check_in(no_adults).unwrap_err().is_validation());

        let mut oversized = input("A", None);
        oversized.adults = u32::MAX;
        oversized.kids = 1;
        assert!(service.check_in(oversized).unwrap_err().is_validation());

        assert!(service.check_in(input("  ", None)).unwrap_err().is_validation());
        assert_eq!(storage.bookings.count().unwrap(), 0);
    }

    #[test]
    fn test_missing_id_gets_placeholder() {
        let (_temp, storage, settings) = setup();
        let service = BookingService::new(&storage, &settings);
        let booking = service.check_in(input("No Papers", Some("  "))).unwrap();
        assert!(!booking.has_real_guest_id());
    }

    #[test]
    fn test_guest_history_by_id_and_name() {
        let (_temp, storage, settings) = setup();
        let service = BookingService::new(&storage, &settings);

        let mut later = input("Mary Jones", Some("P55"));
        later.check_in_date = Some(date(2025, 9, 1));
        later.check_out_date = Some(date(2025, 9, 2));
        service.check_in(later).unwrap();
        service.check_in(input("Mary Jones", Some("P55"))).unwrap();
        service.check_in(input("Someone Else", Some("Q1"))).unwrap();

        let by_id = service.find_guest_history("p55").unwrap();
        assert_eq!(by_id.len(), 2);
        assert!(by_id[0].check_in_date < by_id[1].check_in_date);

        let by_name = service.find_guest_history("MARY  jones").unwrap();
        assert_eq!(by_name.len(), 2);

        assert!(service
            .find_guest_history("nobody")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_list_filter_and_delete() {
        let (_temp, storage, settings) = setup();
        let service = BookingService::new(&storage, &settings);
        let first = service.check_in(input("A", Some("1"))).unwrap();
        let mut other = input("B", Some("2"));
        other.check_in_date = Some(date(2024, 7, 1));
        other.check_out_date = Some(date(2024, 7, 2));
        service.check_in(other).unwrap();

        let filter = BookingFilter {
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(service.list(&filter).unwrap().len(), 1);
        assert_eq!(service.list(&BookingFilter::default()).unwrap().len(), 2);

        service.delete(&first.id).unwrap();
        assert!(service.get(&first.id).unwrap_err().is_not_found());
        assert!(service.delete(&first.id).is_err());
        assert_eq!(storage.audit().entry_count().unwrap(), 3);
    }
}
