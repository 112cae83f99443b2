//! Booking display formatting
//!
//! Column-aligned list view plus a detail card and a guest history view.

use crate::models::Booking;

/// Format bookings as an aligned table
pub fn format_booking_list(bookings: &[Booking], currency_symbol: &str) -> String {
    if bookings.is_empty() {
        return "No bookings found.".to_string();
    }

    let name_width = bookings
        .iter()
        .map(|b| b.guest_name.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 30);
    let country_width = bookings
        .iter()
        .map(|b| b.country.chars().count())
        .max()
        .unwrap_or(7)
        .clamp(7, 20);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:<country_width$}  {:>6}  {:>6}  {:>12}  {}\n",
        "Arrival",
        "Guest",
        "Country",
        "Nights",
        "Guests",
        "Amount",
        "ID",
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<name_width$}  {:-<country_width$}  {:->6}  {:->6}  {:->12}  {:-<20}\n",
        "", "", "", "", "", "", "",
    ));

    for booking in bookings {
        let amount = booking
            .total_amount
            .map(|m| m.format_with_symbol(currency_symbol))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<10}  {:<name_width$}  {:<country_width$}  {:>6}  {:>6}  {:>12}  {}\n",
            booking.check_in_date.to_string(),
            truncate(&booking.guest_name, name_width),
            truncate(&booking.country, country_width),
            booking.nights,
            booking.guests,
            amount,
            booking.id,
        ));
    }

    output.push_str(&format!("\n{} booking(s)\n", bookings.len()));
    output
}

/// Format one booking in full
pub fn format_booking_details(booking: &Booking, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Booking: {}\n", booking.id));
    output.push_str(&format!("  Guest:          {}\n", booking.guest_name));
    let id_note = if booking.has_real_guest_id() {
        ""
    } else {
        " (placeholder)"
    };
    output.push_str(&format!(
        "  ID/Passport:    {}{}\n",
        booking.passport_or_id, id_note
    ));
    output.push_str(&format!("  Country:        {}\n", booking.country));
    let place: Vec<&str> = [booking.city.as_deref(), booking.province.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !place.is_empty() {
        output.push_str(&format!("  From:           {}\n", place.join(", ")));
    }
    if let Some(email) = &booking.email {
        output.push_str(&format!("  Email:          {}\n", email));
    }
    if let Some(phone) = &booking.phone {
        output.push_str(&format!("  Phone:          {}\n", phone));
    }
    output.push_str(&format!(
        "  Stay:           {} to {} ({} night(s))\n",
        booking.check_in_date, booking.check_out_date, booking.nights
    ));
    output.push_str(&format!(
        "  Guests:         {} ({} adult(s), {} child(ren))\n",
        booking.guests, booking.adults, booking.kids
    ));
    output.push_str(&format!("  Room:           {}\n", booking.room_type));
    output.push_str(&format!(
        "  Amount:         {}\n",
        booking
            .total_amount
            .map(|m| m.format_with_symbol(currency_symbol))
            .unwrap_or_else(|| "not recorded".to_string())
    ));
    output.push_str(&format!("  Settlement:     {}\n", booking.settlement_method));
    output.push_str(&format!("  Referral:       {}\n", booking.referral_source));
    output.push_str(&format!(
        "  Period:         {} {} ({} season)\n",
        booking.month, booking.year, booking.season
    ));
    output.push_str(&format!("  Status:         {}\n", booking.status));
    output.push_str(&format!(
        "  Marketing:      {}\n",
        if booking.marketing_consent {
            "Opted in"
        } else {
            "No"
        }
    ));

    output
}

/// Format all stays of one guest, with totals
pub fn format_guest_history(stays: &[Booking], currency_symbol: &str) -> String {
    let Some(first) = stays.first() else {
        return "No stays found.".to_string();
    };

    let nights: u32 = stays.iter().map(|b| b.nights).sum();
    let mut output = format!(
        "{} ({}) - {} stay(s), {} night(s)\n\n",
        first.guest_name,
        first.country,
        stays.len(),
        nights
    );
    output.push_str(&format_booking_list(stays, currency_symbol));
    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn booking() -> Booking {
        let d = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let mut b = Booking::new("Sipho Dlamini", "South Africa", d, d + chrono::Duration::days(2));
        b.total_amount = Some(Money::from_units(3200));
        b.city = Some("Durban".into());
        b
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_booking_list(&[], "R"), "No bookings found.");
    }

    #[test]
    fn test_list_row() {
        let output = format_booking_list(&[booking()], "R");
        assert!(output.contains("2025-05-02"));
        assert!(output.contains("Sipho Dlamini"));
        assert!(output.contains("R3200.00"));
        assert!(output.contains("1 booking(s)"));
    }

    #[test]
    fn test_details_flags_placeholder_id() {
        let output = format_booking_details(&booking(), "$");
        assert!(output.contains("(placeholder)"));
        assert!(output.contains("From:           Durban"));
        assert!(output.contains("$3200.00"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
