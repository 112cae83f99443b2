//! Monthly analytics table

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::MonthlyData;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    key: String,
    #[tabled(rename = "Bookings")]
    bookings: u32,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Occupancy")]
    occupancy: String,
    #[tabled(rename = "Top referral")]
    top_referral: String,
}

/// Format the monthly table, oldest month first
pub fn format_monthly_table(months: &[MonthlyData], currency_symbol: &str) -> String {
    if months.is_empty() {
        return "No monthly data yet. Import guest history first.".to_string();
    }

    let rows = months.iter().map(|m| MonthRow {
        key: m.key(),
        bookings: m.bookings,
        revenue: m.revenue.format_with_symbol(currency_symbol),
        occupancy: format!("{:.0}%", m.occupancy_percent),
        top_referral: m
            .top_referrals()
            .first()
            .map(|(label, count)| format!("{} ({})", label, count))
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}
