//! Header aliases for guest-book exports
//!
//! Exports come from several generations of paper-to-spreadsheet forms, so
//! each field is looked up under a fixed priority list of header spellings.
//! The first alias holding a non-empty value wins.

use std::collections::HashMap;

/// One tokenized row: header text -> cell value
pub type RawRow = HashMap<String, String>;

/// A booking field and the headers it may appear under, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    GuestName,
    Arrival,
    Departure,
    Country,
    GuestId,
    City,
    Province,
    Email,
    Phone,
    Guests,
    Adults,
    Children,
    Amount,
    Settlement,
    Referral,
    MarketingConsent,
    Timestamp,
    RoomType,
}

impl Column {
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::GuestName => &["FULL NAME", "Full Name", "Name"],
            Column::Arrival => &["DATE OF ARRIVAL", "Date of Arrival", "Check-In"],
            Column::Departure => &["DATE OF DEPARTURE", "Date of Departure", "Check-Out"],
            Column::Country => &["COUNTRY OF RESIDENCE", "Country"],
            Column::GuestId => &["ID NUMBER", "Passport", "ID/Passport"],
            Column::City => &["CITY", "City", "TOWN/CITY"],
            Column::Province => &["PROVINCE", "Province", "STATE/PROVINCE"],
            Column::Email => &["EMAIL ADDRESS", "EMAIL", "Email", "Email Address"],
            Column::Phone => &["CONTACT NUMBER", "PHONE", "Phone", "Contact Number"],
            Column::Guests => &["NUMBER OF GUESTS", "Guests", "Number of Guests"],
            Column::Adults => &["ADULTS", "Adults", "NUMBER OF ADULTS"],
            Column::Children => &["CHILDREN", "Children", "Kids", "NUMBER OF CHILDREN"],
            Column::Amount => &["AMOUNT", "Amount", "TOTAL AMOUNT", "Total Amount", "Total"],
            Column::Settlement => &["SETTLEMENT METHOD", "Settlement Method", "Payment Method"],
            Column::Referral => &[
                "HOW DID YOU HEAR ABOUT US",
                "How did you hear about us?",
                "Referral Source",
                "Referral",
            ],
            Column::MarketingConsent => &["MARKETING CONSENT", "Marketing Consent", "Marketing"],
            Column::Timestamp => &["Timestamp", "TIMESTAMP"],
            Column::RoomType => &["ROOM TYPE", "Room Type", "Room"],
        }
    }

    /// Field label used in warnings and skip reasons
    pub fn label(&self) -> &'static str {
        match self {
            Column::GuestName => "guest name",
            Column::Arrival => "arrival date",
            Column::Departure => "departure date",
            Column::Country => "country",
            Column::GuestId => "ID/passport",
            Column::City => "city",
            Column::Province => "province",
            Column::Email => "email",
            Column::Phone => "phone",
            Column::Guests => "guests",
            Column::Adults => "adults",
            Column::Children => "children",
            Column::Amount => "amount",
            Column::Settlement => "settlement method",
            Column::Referral => "referral source",
            Column::MarketingConsent => "marketing consent",
            Column::Timestamp => "timestamp",
            Column::RoomType => "room type",
        }
    }

    /// First non-empty (trimmed) value among this column's aliases
    pub fn lookup<'a>(&self, row: &'a RawRow) -> Option<&'a str> {
        self.aliases()
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
    }
}

/// Interpret a yes/no style cell
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "x" | "agree" | "i agree" | "accepted"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_alias_wins() {
        let r = row(&[("FULL NAME", "Anna Smit"), ("Name", "Other")]);
        assert_eq!(Column::GuestName.lookup(&r), Some("Anna Smit"));
    }

    #[test]
    fn test_empty_alias_falls_through() {
        let r = row(&[("FULL NAME", "   "), ("Full Name", ""), ("Name", " Piet ")]);
        assert_eq!(Column::GuestName.lookup(&r), Some("Piet"));
    }

    #[test]
    fn test_missing_column() {
        let r = row(&[("Something", "else")]);
        assert_eq!(Column::Arrival.lookup(&r), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("Yes"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }
}
