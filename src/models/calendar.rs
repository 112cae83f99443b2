//! Calendar helpers: month abbreviations and tourism seasons

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, serialized as its three-letter abbreviation
///
/// Variant order is calendar order, so the derived `Ord` sorts Jan..Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order
    pub fn all() -> [Month; 12] {
        use Month::*;
        [Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov, Dec]
    }

    /// Month from its 1-based number
    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::all().get(i as usize).copied())
    }

    /// 1-based month number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn of(date: NaiveDate) -> Self {
        // month() is always 1..=12
        Self::all()[date.month0() as usize]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Parse an abbreviation, full name or number (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Self::from_number(n);
        }
        if s.len() < 3 {
            return None;
        }
        let lower = s.to_lowercase();
        Self::all()
            .into_iter()
            .find(|m| lower.starts_with(&m.abbrev().to_lowercase()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Tourism season a stay falls into, derived from the arrival month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    High,
    Mid,
    Low,
}

impl Season {
    /// High: Dec-Mar. Low: May-Aug. Everything else is Mid.
    pub fn for_month(month: Month) -> Self {
        match month {
            Month::Dec | Month::Jan | Month::Feb | Month::Mar => Season::High,
            Month::May | Month::Jun | Month::Jul | Month::Aug => Season::Low,
            _ => Season::Mid,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_month(Month::of(date))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::High => write!(f, "High"),
            Season::Mid => write!(f, "Mid"),
            Season::Low => write!(f, "Low"),
        }
    }
}
