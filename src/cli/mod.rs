//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod booking;
pub mod export;
pub mod import;
pub mod report;

pub use booking::{handle_booking_command, BookingCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportCommands};
pub use report::{handle_report_command, ReportCommands};
