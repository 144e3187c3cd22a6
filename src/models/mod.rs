//! Core data models for the upgrade timer.

mod upgrade;

pub use upgrade::*;
