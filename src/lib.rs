//! # Upgrade Timer
//!
//! Computes when base upgrades finish, given the current time of day, the
//! upgrade durations (`Xd`, `Xh`, or `XdYh`) and how many builder potions
//! are spent on them.
//!
//! ## Architecture
//!
//! - **models**: Request, result and duration types
//! - **calculate**: Duration parsing, completion arithmetic and formatting
//! - **api**: HTTP endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;

pub use models::*;
