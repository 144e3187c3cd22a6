//! Upgrade completion engine.
//!
//! A batch goes through two passes:
//! - every non-blank duration is parsed and checked against the length limit;
//!   the lowest-index failure aborts the whole batch
//! - only then is each entry anchored, potion-reduced and formatted

mod clock;
mod completion;
mod duration;

pub use clock::*;
pub use completion::*;
pub use duration::*;

use thiserror::Error;

use crate::config::CalculatorConfig;
use crate::models::{CalculationInput, CompletionResult, DurationSpec, UpgradeRequest};

/// Why a batch produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("Wrong format in field {index}: '{input}'. Use Xd, Xh, or XdYh")]
    InvalidFormat { index: usize, input: String },

    #[error("Field {index} too long - max {max_days} days. You entered {hours} hours")]
    TooLong {
        index: usize,
        hours: u64,
        max_days: u64,
    },

    #[error("{0}")]
    Unexpected(String),
}

/// Tunables for potion strength and the per-upgrade ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub potion_hours: u64,
    pub max_upgrade_hours: u64,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            potion_hours: 9,
            max_upgrade_hours: 720,
        }
    }
}

impl From<&CalculatorConfig> for CalculatorSettings {
    fn from(config: &CalculatorConfig) -> Self {
        Self {
            potion_hours: config.potion_hours,
            max_upgrade_hours: config.max_upgrade_hours,
        }
    }
}

/// A batch entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpgrade {
    pub request: UpgradeRequest,
    pub duration: DurationSpec,
}

/// Parse and length-check every non-blank entry.
pub fn validate_batch(
    input: &CalculationInput,
    settings: &CalculatorSettings,
) -> Result<Vec<ValidatedUpgrade>, CalculationError> {
    input
        .requests()
        .into_iter()
        .map(|request| {
            let Some(duration) = parse_duration(&request.raw) else {
                return Err(CalculationError::InvalidFormat {
                    index: request.index,
                    input: request.raw,
                });
            };

            if duration.hours() > settings.max_upgrade_hours {
                return Err(CalculationError::TooLong {
                    index: request.index,
                    hours: duration.hours(),
                    max_days: settings.max_upgrade_hours / 24,
                });
            }

            Ok(ValidatedUpgrade { request, duration })
        })
        .collect()
}

/// Validate the batch, then compute a countdown and timestamp for each entry.
pub fn calculate_batch(
    input: &CalculationInput,
    settings: &CalculatorSettings,
    clock: &dyn Clock,
) -> Result<Vec<CompletionResult>, CalculationError> {
    let upgrades = validate_batch(input, settings).inspect_err(|e| {
        tracing::debug!("Rejected upgrade batch: {}", e);
    })?;

    tracing::debug!(
        "Calculating {} upgrade(s) from {:02}:{:02} with {} potion(s)",
        upgrades.len(),
        input.current_hour,
        input.current_minute,
        input.builder_potions
    );

    upgrades
        .into_iter()
        .map(|upgrade| {
            let completion = compute_completion(
                clock.now(),
                input.current_hour,
                input.current_minute,
                upgrade.duration,
                input.builder_potions,
                settings,
            )?;

            Ok(CompletionResult {
                index: upgrade.request.index,
                original_time: upgrade.request.raw,
                completion: format_countdown(completion, clock.now()),
                completion_datetime: format_completion_datetime(completion),
            })
        })
        .collect()
}
