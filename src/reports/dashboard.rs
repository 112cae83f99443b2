//! Analytics dashboard
//!
//! Summarizes the monthly table (bookings, revenue, occupancy, referral
//! sources) and the booking list (origin countries) for one year or for all
//! time.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Booking, Money, MonthlyData, Season};

/// A label with its count and share of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCount {
    pub label: String,
    pub count: u32,
    /// Share of the total, 0-100
    pub percentage: f64,
}

/// Bookings and revenue of one season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSummary {
    pub season: Season,
    pub bookings: u32,
    pub revenue: Money,
}

/// Dashboard figures
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// `None` means all years
    pub year: Option<i32>,
    pub months_covered: usize,
    pub total_bookings: u32,
    pub total_revenue: Money,
    /// Mean of the monthly occupancy estimates
    pub average_occupancy: f64,
    /// Month key ("Jan-2025") with the most bookings
    pub busiest_month: Option<String>,
    pub referrals: Vec<RankedCount>,
    /// Always High, Mid, Low in that order
    pub seasons: Vec<SeasonSummary>,
    pub top_countries: Vec<RankedCount>,
}

/// How many countries the dashboard lists
pub const TOP_COUNTRIES: usize = 5;

impl DashboardReport {
    pub fn generate(monthly: &[MonthlyData], bookings: &[Booking], year: Option<i32>) -> Self {
        let months: Vec<&MonthlyData> = monthly
            .iter()
            .filter(|m| year.map_or(true, |y| m.year == y))
            .collect();

        let total_bookings: u32 = months.iter().map(|m| m.bookings).sum();
        let total_revenue: Money = months.iter().map(|m| m.revenue).sum();
        let average_occupancy = if months.is_empty() {
            0.0
        } else {
            months.iter().map(|m| m.occupancy_percent).sum::<f64>() / months.len() as f64
        };

        // Earliest month wins a tie
        let busiest_month = months
            .iter()
            .copied()
            .fold(None::<&MonthlyData>, |best, m| match best {
                Some(b) if b.bookings >= m.bookings => Some(b),
                _ => Some(m),
            })
            .filter(|m| m.bookings > 0)
            .map(|m| m.key());

        let mut referral_counts: HashMap<&str, u32> = HashMap::new();
        for m in &months {
            for (label, count) in &m.referral_data {
                *referral_counts.entry(label.as_str()).or_insert(0) += count;
            }
        }

        let seasons = [Season::High, Season::Mid, Season::Low]
            .into_iter()
            .map(|season| {
                let in_season = months
                    .iter()
                    .filter(|m| Season::for_month(m.month) == season);
                SeasonSummary {
                    season,
                    bookings: in_season.clone().map(|m| m.bookings).sum(),
                    revenue: in_season.map(|m| m.revenue).sum(),
                }
            })
            .collect();

        let mut country_counts: HashMap<&str, u32> = HashMap::new();
        for booking in bookings
            .iter()
            .filter(|b| year.map_or(true, |y| b.year == y))
        {
            *country_counts.entry(booking.country.as_str()).or_insert(0) += 1;
        }
        let mut top_countries = rank(country_counts);
        top_countries.truncate(TOP_COUNTRIES);

        Self {
            year,
            months_covered: months.len(),
            total_bookings,
            total_revenue,
            average_occupancy,
            busiest_month,
            referrals: rank(referral_counts),
            seasons,
            top_countries,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        let scope = self
            .year
            .map_or_else(|| "all years".to_string(), |y| y.to_string());
        output.push_str(&format!("Dashboard ({})\n", scope));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Bookings:          {}\n", self.total_bookings));
        output.push_str(&format!(
            "Revenue:           {}\n",
            self.total_revenue.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Avg occupancy:     {:.1}%\n",
            self.average_occupancy
        ));
        if let Some(busiest) = &self.busiest_month {
            output.push_str(&format!("Busiest month:     {}\n", busiest));
        }

        output.push_str("\nSeasons\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for s in &self.seasons {
            output.push_str(&format!(
                "  {:<10} {:>8} {:>16}\n",
                s.season.to_string(),
                s.bookings,
                s.revenue.format_with_symbol(currency_symbol)
            ));
        }

        for (title, rows) in [
            ("Referral sources", &self.referrals),
            ("Top countries", &self.top_countries),
        ] {
            output.push_str(&format!("\n{}\n", title));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            if rows.is_empty() {
                output.push_str("  (none)\n");
            }
            for row in rows {
                output.push_str(&format!(
                    "  {:<30} {:>8} {:>7.1}%\n",
                    row.label, row.count, row.percentage
                ));
            }
        }

        output
    }
}

/// Sort by count (highest first, ties by label) and attach percentages
fn rank(counts: HashMap<&str, u32>) -> Vec<RankedCount> {
    let total: u32 = counts.values().sum();
    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(label, count)| RankedCount {
            label: label.to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    ranked
}
