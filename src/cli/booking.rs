//! CLI commands for bookings

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_booking_details, format_booking_list, format_guest_history};
use crate::error::{LodgeError, LodgeResult};
use crate::import::parse_date;
use crate::models::{BookingId, Money, Month};
use crate::services::{BookingFilter, BookingService, CheckInInput};
use crate::storage::Storage;

/// Booking subcommands
#[derive(Subcommand, Debug)]
pub enum BookingCommands {
    /// List bookings, most recent arrival first
    List {
        /// Only this arrival year
        #[arg(short, long)]
        year: Option<i32>,
        /// Only this arrival month (name or number)
        #[arg(short, long)]
        month: Option<String>,
        /// Only guests from this country
        #[arg(short, long)]
        country: Option<String>,
        /// Maximum number of bookings to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show one booking
    Show {
        /// Booking ID
        id: String,
    },

    /// Show every stay of a guest
    History {
        /// ID/passport number or guest name
        query: String,
    },

    /// Check a guest in
    CheckIn {
        /// Guest's full name
        name: String,
        /// Country of residence
        #[arg(short, long, default_value = "")]
        country: String,
        /// ID or passport number
        #[arg(long)]
        id: Option<String>,
        /// Arrival date (defaults to today)
        #[arg(long)]
        arrival: Option<String>,
        /// Departure date (defaults to arrival)
        #[arg(long)]
        departure: Option<String>,
        #[arg(long, default_value = "2")]
        adults: u32,
        #[arg(long, default_value = "0")]
        kids: u32,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        province: Option<String>,
        /// Amount charged, e.g. "R1 800.00"
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        settlement: Option<String>,
        /// How the guest heard about the lodge
        #[arg(long)]
        referral: Option<String>,
        #[arg(long)]
        room: Option<String>,
        /// Guest agreed to receive marketing
        #[arg(long)]
        marketing: bool,
        /// Guest accepted the indemnity
        #[arg(long)]
        accept_indemnity: bool,
    },

    /// Delete a booking
    Delete {
        /// Booking ID
        id: String,
    },
}

pub fn handle_booking_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BookingCommands,
) -> LodgeResult<()> {
    let service = BookingService::new(storage, settings);
    let symbol = settings.hotel.currency_symbol.as_str();

    match cmd {
        BookingCommands::List {
            year,
            month,
            country,
            limit,
        } => {
            let month = month
                .map(|m| {
                    Month::parse(&m)
                        .ok_or_else(|| LodgeError::Validation(format!("Unknown month: {}", m)))
                })
                .transpose()?;
            let filter = BookingFilter {
                year,
                month,
                country,
            };
            let mut bookings = service.list(&filter)?;
            bookings.truncate(limit);
            print!("{}", format_booking_list(&bookings, symbol));
        }
        BookingCommands::Show { id } => {
            let booking = service.get(&BookingId::from(id.as_str()))?;
            print!("{}", format_booking_details(&booking, symbol));
        }
        BookingCommands::History { query } => {
            let stays = service.find_guest_history(&query)?;
            print!("{}", format_guest_history(&stays, symbol));
        }
        BookingCommands::CheckIn {
            name,
            country,
            id,
            arrival,
            departure,
            adults,
            kids,
            email,
            phone,
            city,
            province,
            amount,
            settlement,
            referral,
            room,
            marketing,
            accept_indemnity,
        } => {
            let input = CheckInInput {
                guest_name: name,
                passport_or_id: id,
                email,
                phone,
                country,
                province,
                city,
                check_in_date: arrival.as_deref().map(date_arg).transpose()?,
                check_out_date: departure.as_deref().map(date_arg).transpose()?,
                adults,
                kids,
                settlement_method: settlement,
                referral_source: referral,
                total_amount: amount
                    .as_deref()
                    .map(|a| {
                        Money::parse(a).map_err(|e| LodgeError::Validation(e.to_string()))
                    })
                    .transpose()?,
                room_type: room,
                marketing_consent: marketing,
                indemnity_accepted: accept_indemnity,
            };
            let booking = service.check_in(input)?;
            println!(
                "Checked in {} for {} night(s). Booking ID: {}",
                booking.guest_name, booking.nights, booking.id
            );
        }
        BookingCommands::Delete { id } => {
            let booking = service.delete(&BookingId::from(id.as_str()))?;
            println!("Deleted booking {} ({})", booking.id, booking.guest_name);
        }
    }

    Ok(())
}

fn date_arg(text: &str) -> LodgeResult<chrono::NaiveDate> {
    parse_date(text).ok_or_else(|| LodgeError::Validation(format!("Unreadable date: {}", text)))
}
