//! Upgrade batch types - what a client submits and what it gets back.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Total upgrade time in whole hours, parsed from `Xd`, `Xh`, or `XdYh` notation.
///
/// Only produced by a successful parse; an unparseable string has no
/// `DurationSpec` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationSpec(u64);

impl DurationSpec {
    pub fn from_hours(hours: u64) -> Self {
        Self(hours)
    }

    pub fn hours(&self) -> u64 {
        self.0
    }
}

/// A single non-blank entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    /// 1-based position in the submitted list (blank entries still count)
    pub index: usize,
    /// Duration string exactly as entered
    pub raw: String,
}

/// A validated `POST /calculate` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculationInput {
    /// Local hour of day (0-23)
    #[serde(deserialize_with = "lenient_u32")]
    pub current_hour: u32,

    /// Local minute (0-59)
    #[serde(deserialize_with = "lenient_u32")]
    pub current_minute: u32,

    #[serde(deserialize_with = "lenient_u32")]
    pub builder_potions: u32,

    pub upgrade_times: Vec<String>,
}

impl CalculationInput {
    /// Non-blank entries, in order, tagged with their batch position.
    pub fn requests(&self) -> Vec<UpgradeRequest> {
        self.upgrade_times
            .iter()
            .enumerate()
            .filter(|(_, raw)| !raw.trim().is_empty())
            .map(|(i, raw)| UpgradeRequest {
                index: i + 1,
                raw: raw.clone(),
            })
            .collect()
    }
}

/// Accepts `9` as well as `"9"`; anything negative, fractional or non-numeric is rejected.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {value}")))
}

/// Computed completion for one batch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub index: usize,
    pub original_time: String,
    /// Countdown, e.g. `1d 2h 30m (Friday 05:30 PM)` or `Done`
    pub completion: String,
    /// Absolute timestamp, e.g. `10/16/2026 at 05:30 PM`
    pub completion_datetime: String,
}

/// `POST /calculate` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculateResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<CompletionResult>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculateResponse {
    pub fn success(results: Vec<CompletionResult>) -> Self {
        Self {
            success: true,
            results: Some(results),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            error: Some(error.into()),
        }
    }
}
