//! CLI commands for analytics

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_monthly_table;
use crate::error::LodgeResult;
use crate::reports::DashboardReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Per-month bookings, revenue and occupancy
    Monthly {
        /// Only this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Totals, seasons, referral sources and top countries
    Dashboard {
        /// Only this year (default: all years)
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LodgeResult<()> {
    let symbol = settings.hotel.currency_symbol.as_str();

    match cmd {
        ReportCommands::Monthly { year } => {
            let months = match year {
                Some(y) => storage.monthly.for_year(y)?,
                None => storage.monthly.get_all()?,
            };
            println!("{}", format_monthly_table(&months, symbol));
        }
        ReportCommands::Dashboard { year, json } => {
            let report = DashboardReport::generate(
                &storage.monthly.get_all()?,
                &storage.bookings.get_all()?,
                year,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.format_terminal(symbol));
            }
        }
    }

    Ok(())
}
