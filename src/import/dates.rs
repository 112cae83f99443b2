//! Tolerant date parsing for guest-book exports
//!
//! Slash-separated dates are always read day-first (DD/MM/YYYY). US-style
//! MM/DD/YYYY input with a day of 12 or less is therefore misread; this is
//! the expected behavior for South African exports.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried after the day-first slash form fails
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a date from free text
///
/// Returns `None` when no strategy yields a valid calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_day_first(text).or_else(|| parse_fallback(text))
}

/// `DD/MM/YYYY` or `DD/MM/YY` (two-digit years are in the 2000s)
fn parse_day_first(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    if !parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = match parts[2].len() {
        2 => format!("20{}", parts[2]).parse().ok()?,
        4 => parts[2].parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_fallback(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a form-submission timestamp such as `05/03/2024 14:22:10`
///
/// Only the date part is significant; the time of day is taken as midnight
/// when it cannot be read.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Some(date) = parse_date(text) {
        return date.and_hms_opt(0, 0, 0);
    }

    let (date_part, time_part) = text.split_once(' ')?;
    let date = parse_date(date_part)?;
    let time = chrono::NaiveTime::parse_from_str(time_part.trim(), "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(time_part.trim(), "%H:%M"))
        .unwrap_or(chrono::NaiveTime::MIN);
    Some(date.and_time(time))
}
