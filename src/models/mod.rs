//! Core data models for Lodgebook
//!
//! Bookings (one per stay), the monthly analytics aggregate, money and
//! calendar helpers.

pub mod booking;
pub mod calendar;
pub mod ids;
pub mod money;
pub mod monthly;

pub use booking::{calculate_nights, Booking, BookingStatus, BookingValidationError};
pub use calendar::{Month, Season};
pub use ids::{is_synthetic_guest_id, synthetic_guest_id, BookingId};
pub use money::Money;
pub use monthly::MonthlyData;
