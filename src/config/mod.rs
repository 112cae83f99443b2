//! Configuration module for Lodgebook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (hotel context, import defaults)

pub mod paths;
pub mod settings;

pub use paths::LodgePaths;
pub use settings::{HotelContext, ImportDefaults, OccupancyRules, Settings};
