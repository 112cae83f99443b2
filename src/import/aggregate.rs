//! Monthly aggregator
//!
//! Folds a batch of accepted bookings into the `(month, year)` summary table
//! behind the analytics dashboard. The occupancy figure is a rough
//! placeholder: a first booking in a month sets it to a fixed value and
//! every further booking nudges it up by a fixed step, capped.

use std::collections::BTreeMap;

use crate::config::{ImportDefaults, OccupancyRules};
use crate::models::{Booking, Money, Month, MonthlyData};

/// Merge with the stock nightly rate and occupancy rules
pub fn merge_monthly_data(existing: &[MonthlyData], new_bookings: &[Booking]) -> Vec<MonthlyData> {
    merge_monthly_with(
        existing,
        new_bookings,
        ImportDefaults::default().nightly_rate,
        &OccupancyRules::default(),
    )
}

/// Merge `new_bookings` into a copy of `existing`
///
/// `nightly_rate` prices bookings that carry no amount. The result is sorted
/// by year, then calendar month. If `existing` holds the same month twice the
/// later entry wins.
pub fn merge_monthly_with(
    existing: &[MonthlyData],
    new_bookings: &[Booking],
    nightly_rate: Money,
    rules: &OccupancyRules,
) -> Vec<MonthlyData> {
    let mut table: BTreeMap<(i32, Month), MonthlyData> = existing
        .iter()
        .map(|entry| (entry.sort_key(), entry.clone()))
        .collect();

    for booking in new_bookings {
        let amount = booking.amount_or_estimate(nightly_rate);
        let referral = booking.referral_source.clone();

        match table.get_mut(&(booking.year, booking.month)) {
            Some(entry) => {
                entry.bookings += 1;
                entry.revenue += amount;
                *entry.referral_data.entry(referral).or_insert(0) += 1;
                entry.occupancy_percent = (entry.occupancy_percent + rules.step).min(rules.cap);
            }
            None => {
                let mut entry = MonthlyData::new(booking.month, booking.year);
                entry.bookings = 1;
                entry.revenue = amount;
                entry.referral_data.insert(referral, 1);
                entry.occupancy_percent = rules.new_month_percent;
                table.insert(entry.sort_key(), entry);
            }
        }
    }

    table.into_values().collect()
}
