//! Monthly aggregate used by the analytics dashboard

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::calendar::Month;
use super::money::Money;

/// Summary of all stays arriving in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyData {
    pub month: Month,
    pub year: i32,

    /// Number of bookings
    pub bookings: u32,

    pub revenue: Money,

    /// Referral source label -> number of bookings
    #[serde(default)]
    pub referral_data: BTreeMap<String, u32>,

    /// Estimated occupancy, 0-100
    pub occupancy_percent: f64,
}

impl MonthlyData {
    /// Create an empty month
    pub fn new(month: Month, year: i32) -> Self {
        Self {
            month,
            year,
            bookings: 0,
            revenue: Money::zero(),
            referral_data: BTreeMap::new(),
            occupancy_percent: 0.0,
        }
    }

    /// Lookup key, `"{month}-{year}"` (e.g. "Jan-2025")
    pub fn key(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }

    /// Sort key in calendar order
    pub fn sort_key(&self) -> (i32, Month) {
        (self.year, self.month)
    }

    /// Referral sources ordered by count, highest first (ties by label)
    pub fn top_referrals(&self) -> Vec<(&str, u32)> {
        let mut sources: Vec<_> = self
            .referral_data
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        sources.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        sources
    }
}
