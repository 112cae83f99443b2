//! Reports module for Lodgebook
//!
//! Analytics built from the monthly table and the booking history.

pub mod dashboard;

pub use dashboard::{DashboardReport, RankedCount, SeasonSummary, TOP_COUNTRIES};
