//! Field normalizers used for guest matching
//!
//! Both functions are total: an unknown country or an odd name is passed
//! through rather than rejected.

/// Country aliases found in legacy guest books, mapped to the canonical name
///
/// Lookup is exact and case-sensitive. No canonical name appears as a key,
/// which keeps `normalize_country` idempotent.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("UK", "United Kingdom"),
    ("U.K.", "United Kingdom"),
    ("GB", "United Kingdom"),
    ("England", "United Kingdom"),
    ("Scotland", "United Kingdom"),
    ("Wales", "United Kingdom"),
    ("USA", "United States"),
    ("US", "United States"),
    ("U.S.A.", "United States"),
    ("America", "United States"),
    ("RSA", "South Africa"),
    ("SA", "South Africa"),
    ("ZA", "South Africa"),
    ("S.A.", "South Africa"),
    ("GER", "Germany"),
    ("DE", "Germany"),
    ("Deutschland", "Germany"),
    ("NL", "Netherlands"),
    ("Holland", "Netherlands"),
    ("The Netherlands", "Netherlands"),
    ("FR", "France"),
    ("CH", "Switzerland"),
    ("AUS", "Australia"),
    ("NZ", "New Zealand"),
    ("NAM", "Namibia"),
    ("BW", "Botswana"),
    ("ZIM", "Zimbabwe"),
    ("UAE", "United Arab Emirates"),
];

/// Canonicalize a free-text country
///
/// Trims the input, then replaces a known alias with its full name. Anything
/// else is returned trimmed but otherwise unchanged.
pub fn normalize_country(input: &str) -> String {
    let trimmed = input.trim();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Comparison form of a guest name (never shown to users)
///
/// Lowercases, drops every character that is neither a word character
/// (letter, digit, underscore) nor whitespace, and collapses whitespace.
pub fn normalize_guest_name(input: &str) -> String {
    let kept: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison form of a passport/ID number: trimmed and uppercased
pub fn normalize_guest_id(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_aliases() {
        assert_eq!(normalize_country("UK"), "United Kingdom");
        assert_eq!(normalize_country(" USA "), "United States");
        assert_eq!(normalize_country("RSA"), "South Africa");
    }

    #[test]
    fn test_country_pass_through() {
        assert_eq!(normalize_country("  Kenya "), "Kenya");
        assert_eq!(normalize_country(""), "");
    }

    #[test]
    fn test_country_lookup_is_case_sensitive() {
        assert_eq!(normalize_country("uk"), "uk");
    }

    #[test]
    fn test_country_idempotent() {
        let inputs = ["UK", " usa", "RSA", "Kenya ", "", "United Kingdom", "Holland"];
        for input in inputs {
            let once = normalize_country(input);
            assert_eq!(normalize_country(&once), once, "input {:?}", input);
        }
        for (_, canonical) in COUNTRY_ALIASES {
            assert!(
                COUNTRY_ALIASES.iter().all(|(alias, _)| alias != canonical),
                "{} is both alias and canonical",
                canonical
            );
        }
    }

    #[test]
    fn test_guest_name() {
        assert_eq!(normalize_guest_name("John O'Brien"), "john obrien");
        assert_eq!(normalize_guest_name("  Mary-Jane   Smith "), "maryjane smith");
        assert_eq!(normalize_guest_name("john obrien"), "john obrien");
        assert_eq!(normalize_guest_name("Zoë  Müller"), "zoë müller");
        assert_eq!(normalize_guest_name("!!!"), "");
    }

    #[test]
    fn test_guest_id() {
        assert_eq!(normalize_guest_id(" ab123 "), "AB123");
    }
}
