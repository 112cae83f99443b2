//! Service layer for Lodgebook
//!
//! Services combine the pure import core with storage: they load state,
//! run the operation, persist the result and write the audit trail.

pub mod booking;
pub mod import;

pub use booking::{BookingFilter, BookingService, CheckInInput};
pub use import::ImportService;
