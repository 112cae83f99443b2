//! Audit trail for Lodgebook
//!
//! Every change to the booking history (a confirmed import batch, a manual
//! check-in, a deletion) is appended to `audit.log` as one JSON line. The log
//! is append-only; nothing in the application rewrites or truncates it.
//!
//! ```rust,ignore
//! use lodgebook::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Booking,
//!     booking.id.as_str(),
//!     Some(booking.guest_name.clone()),
//!     &booking,
//! ))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
