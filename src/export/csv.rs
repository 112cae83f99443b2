//! CSV export
//!
//! The bookings file uses the same headers and day-first dates the importer
//! reads, so an export can be fed back into `lodge import preview`.

use std::io::Write;

use serde::Serialize;

use crate::error::{LodgeError, LodgeResult};
use crate::models::Booking;
use crate::storage::Storage;

#[derive(Serialize)]
struct BookingRow<'a> {
    #[serde(rename = "Full Name")]
    guest_name: &'a str,
    #[serde(rename = "ID/Passport")]
    passport_or_id: &'a str,
    #[serde(rename = "Date of Arrival")]
    check_in: String,
    #[serde(rename = "Date of Departure")]
    check_out: String,
    #[serde(rename = "Nights")]
    nights: u32,
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Province")]
    province: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(rename = "Adults")]
    adults: u32,
    #[serde(rename = "Children")]
    kids: u32,
    #[serde(rename = "Guests")]
    guests: u32,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Settlement Method")]
    settlement_method: &'a str,
    #[serde(rename = "Referral Source")]
    referral_source: &'a str,
    #[serde(rename = "Room Type")]
    room_type: &'a str,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Season")]
    season: String,
    #[serde(rename = "Marketing Consent")]
    marketing_consent: &'static str,
}

impl<'a> From<&'a Booking> for BookingRow<'a> {
    fn from(b: &'a Booking) -> Self {
        Self {
            guest_name: &b.guest_name,
            passport_or_id: &b.passport_or_id,
            check_in: b.check_in_date.format("%d/%m/%Y").to_string(),
            check_out: b.check_out_date.format("%d/%m/%Y").to_string(),
            nights: b.nights,
            country: &b.country,
            province: b.province.as_deref().unwrap_or(""),
            city: b.city.as_deref().unwrap_or(""),
            email: b.email.as_deref().unwrap_or(""),
            phone: b.phone.as_deref().unwrap_or(""),
            adults: b.adults,
            kids: b.kids,
            guests: b.guests,
            amount: b
                .total_amount
                .map(|m| m.format_decimal())
                .unwrap_or_default(),
            settlement_method: &b.settlement_method,
            referral_source: &b.referral_source,
            room_type: &b.room_type,
            status: b.status.to_string(),
            season: b.season.to_string(),
            marketing_consent: if b.marketing_consent { "Yes" } else { "No" },
        }
    }
}

/// Write bookings as CSV in stored order
pub fn write_bookings_csv<W: Write>(bookings: &[Booking], writer: W) -> LodgeResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for booking in bookings {
        csv_writer
            .serialize(BookingRow::from(booking))
            .map_err(|e| LodgeError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| LodgeError::Export(e.to_string()))
}

/// Export all bookings to CSV
pub fn export_bookings_csv<W: Write>(storage: &Storage, writer: W) -> LodgeResult<()> {
    write_bookings_csv(&storage.bookings.get_all()?, writer)
}

/// Export the monthly table to CSV, one referral column pair per month row
pub fn export_monthly_csv<W: Write>(storage: &Storage, writer: W) -> LodgeResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "Month",
            "Year",
            "Bookings",
            "Revenue",
            "Occupancy %",
            "Top Referral",
            "Referrals",
        ])
        .map_err(|e| LodgeError::Export(e.to_string()))?;

    for month in storage.monthly.get_all()? {
        let referrals = month
            .top_referrals()
            .iter()
            .map(|(label, count)| format!("{}={}", label, count))
            .collect::<Vec<_>>()
            .join("; ");
        let top = month
            .top_referrals()
            .first()
            .map(|(label, _)| label.to_string())
            .unwrap_or_default();

        csv_writer
            .write_record([
                month.month.to_string(),
                month.year.to_string(),
                month.bookings.to_string(),
                month.revenue.format_decimal(),
                format!("{:.1}", month.occupancy_percent),
                top,
                referrals,
            ])
            .map_err(|e| LodgeError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LodgeError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImportDefaults, LodgePaths};
    use crate::import::ImportPreview;
    use crate::models::{Money, Month, MonthlyData};
    use crate::services::ImportService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_amounts_are_exact_to_the_cent() {
        let arrival = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut booking = Booking::new("Big Spender", "Kenya", arrival, arrival);
        booking.total_amount = Some(Money::from_cents(9_007_199_254_740_993));
        let mut refund = booking.clone();
        refund.total_amount = Some(Money::from_cents(-50_000));

        let mut out = Vec::new();
        write_bookings_csv(&[booking, refund], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(",90071992547409.93,"));
        assert!(text.contains(",-500.00,"));
    }

    #[test]
    fn test_bookings_csv_reimports() {
        let (_temp, storage) = storage();
        let arrival = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut booking = Booking::new(
            "Anna, Smit",
            "South Africa",
            arrival,
            NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(),
        );
        booking.passport_or_id = "AB123".into();
        booking.total_amount = Some(Money::from_cents(180_050));
        storage.bookings.add(booking).unwrap();

        let mut out = Vec::new();
        export_bookings_csv(&storage, &mut out).unwrap();
        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.starts_with("Full Name,ID/Passport,Date of Arrival"));
        assert!(text.contains("\"Anna, Smit\",AB123,14/03/2025,16/03/2025,2"));
        assert!(text.contains("1800.50"));

        let rows = ImportService::read_rows(out.as_slice()).unwrap();
        let preview = ImportPreview::build(&rows, &[], &ImportDefaults::default());
        let reimported = &preview.new_bookings[0];
        assert_eq!(reimported.guest_name, "Anna, Smit");
        assert_eq!(reimported.check_in_date, arrival);
        assert_eq!(reimported.nights, 2);
        assert_eq!(reimported.total_amount, Some(Money::from_cents(180_050)));
    }

    #[test]
    fn test_monthly_csv() {
        let (_temp, storage) = storage();
        let mut feb = MonthlyData::new(Month::Feb, 2025);
        feb.bookings = 3;
        feb.revenue = Money::from_units(4500);
        feb.occupancy_percent = 52.0;
        feb.referral_data.insert("Friend".into(), 1);
        feb.referral_data.insert("Google".into(), 2);
        storage.monthly.replace_all(vec![feb]).unwrap();

        let mut out = Vec::new();
        export_monthly_csv(&storage, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Feb,2025,3,4500.00,52.0,Google,Google=2; Friend=1");
    }
}
