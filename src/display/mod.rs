//! Display formatting for terminal output

pub mod booking;
pub mod import;
pub mod monthly;

pub use booking::{format_booking_details, format_booking_list, format_guest_history};
pub use import::{format_preview, format_summary};
pub use monthly::format_monthly_table;
