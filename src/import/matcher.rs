//! Guest matching against previously recorded stays
//!
//! Matching is a linear scan in the order of the existing bookings, so the
//! first (usually oldest) stay of a repeat guest is the one returned.

use serde::{Deserialize, Serialize};

use crate::models::Booking;

use super::normalize::{normalize_country, normalize_guest_id, normalize_guest_name};

/// Identity fields of an incoming guest, as read from an import row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestCandidate {
    pub guest_name: String,
    /// Empty when the row carried no ID/passport
    pub passport_or_id: String,
    /// Already normalized with `normalize_country`
    pub country: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl GuestCandidate {
    pub fn has_guest_id(&self) -> bool {
        !self.passport_or_id.trim().is_empty()
    }
}

/// How a candidate was matched to an existing guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Same passport/ID number (case-insensitive)
    GuestId,
    /// Same normalized name and country; only tried for candidates without an ID
    NameAndCountry,
}

/// Find the existing booking that belongs to the same guest
///
/// When the candidate carries an ID, only the ID tier runs: a guest with a
/// document number that matches nobody is a new guest, even if someone with
/// the same name and country stayed before.
pub fn find_matching_guest<'a>(
    candidate: &GuestCandidate,
    existing: &'a [Booking],
) -> Option<&'a Booking> {
    find_matching_guest_with_tier(candidate, existing).map(|(booking, _)| booking)
}

/// Like [`find_matching_guest`], also reporting which tier matched
pub fn find_matching_guest_with_tier<'a>(
    candidate: &GuestCandidate,
    existing: &'a [Booking],
) -> Option<(&'a Booking, MatchTier)> {
    if candidate.has_guest_id() {
        let wanted = normalize_guest_id(&candidate.passport_or_id);
        return existing
            .iter()
            .find(|b| normalize_guest_id(&b.passport_or_id) == wanted)
            .map(|b| (b, MatchTier::GuestId));
    }

    let wanted_name = normalize_guest_name(&candidate.guest_name);
    let wanted_country = normalize_country(&candidate.country);
    existing
        .iter()
        .find(|b| {
            normalize_guest_name(&b.guest_name) == wanted_name
                && normalize_country(&b.country) == wanted_country
        })
        .map(|b| (b, MatchTier::NameAndCountry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stay(name: &str, country: &str, id: &str, day: u32) -> Booking {
        let arrival = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let mut booking = Booking::new(name, country, arrival, arrival.succ_opt().unwrap());
        booking.passport_or_id = id.to_string();
        booking
    }

    fn candidate(name: &str, country: &str, id: &str) -> GuestCandidate {
        GuestCandidate {
            guest_name: name.to_string(),
            passport_or_id: id.to_string(),
            country: normalize_country(country),
            ..Default::default()
        }
    }

    #[test]
    fn test_id_match_is_case_insensitive() {
        let existing = vec![stay("Someone Else", "Kenya", "AB123", 1)];
        let found = find_matching_guest(&candidate("Anyone", "UK", "ab123 "), &existing);
        assert_eq!(found.map(|b| b.id.clone()), Some(existing[0].id.clone()));
    }

    #[test]
    fn test_name_and_country_fallback() {
        let existing = vec![stay("John O'Brien", "UK", "", 1)];
        let c = candidate("john obrien", "United Kingdom", "");
        let (found, tier) = find_matching_guest_with_tier(&c, &existing).unwrap();
        assert_eq!(found.id, existing[0].id);
        assert_eq!(tier, MatchTier::NameAndCountry);
    }

    #[test]
    fn test_id_present_skips_name_tier() {
        let existing = vec![stay("John O'Brien", "UK", "P999", 1)];
        let c = candidate("John O'Brien", "UK", "X111");
        assert!(find_matching_guest(&c, &existing).is_none());
    }

    #[test]
    fn test_country_must_match_too() {
        let existing = vec![stay("John O'Brien", "Ireland", "", 1)];
        let c = candidate("John O'Brien", "UK", "");
        assert!(find_matching_guest(&c, &existing).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let existing = vec![
            stay("Ann Lee", "RSA", "ID1", 3),
            stay("Ann Lee", "RSA", "ID1", 1),
        ];
        let found = find_matching_guest(&candidate("Ann Lee", "RSA", "id1"), &existing).unwrap();
        assert_eq!(found.id, existing[0].id);

        let found = find_matching_guest(&candidate("ann lee", "South Africa", ""), &existing).unwrap();
        assert_eq!(found.id, existing[0].id);
    }

    #[test]
    fn test_no_match_is_new_guest() {
        let existing: Vec<Booking> = Vec::new();
        assert!(find_matching_guest(&candidate("New Person", "Kenya", ""), &existing).is_none());
    }
}
