//! Lodgebook - guest history import and occupancy analytics for lodges
//!
//! Imports guest-history spreadsheets, recognises returning guests, and keeps
//! a per-month summary of bookings, revenue, occupancy and referral sources.
//!
//! # Architecture
//!
//! - `config`: paths and settings (hotel context, import defaults)
//! - `error`: the crate error type
//! - `models`: bookings, monthly aggregates, money and calendar types
//! - `import`: row mapping, guest matching, batch preview and monthly merge
//! - `storage`: JSON file storage and the pending-import store
//! - `services`: business operations over storage
//! - `audit`: append-only audit log
//! - `reports`, `display`, `export`: read-side views of the data
//! - `cli`: command handlers for the `lodge` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use lodgebook::config::{LodgePaths, Settings};
//! use lodgebook::services::ImportService;
//! use lodgebook::storage::Storage;
//!
//! let paths = LodgePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let preview = ImportService::new(&storage, &settings).preview_file("guests.csv".as_ref())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LodgeError, LodgeResult};
