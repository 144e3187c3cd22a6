//! Completion time arithmetic and display formatting.

use chrono::{Duration, NaiveDateTime, Timelike};

use super::{CalculationError, CalculatorSettings};
use crate::models::DurationSpec;

/// Hours left after spending `potions`, each worth `potion_hours`. Never negative.
pub fn effective_hours(duration_hours: u64, potions: u32, potion_hours: u64) -> u64 {
    duration_hours.saturating_sub(u64::from(potions).saturating_mul(potion_hours))
}

/// Today's date (per `now`) at `hour:minute:00`.
///
/// An hour/minute earlier than `now` still anchors to today; it never rolls
/// over to the next day.
pub fn anchor_time(
    now: NaiveDateTime,
    hour: u32,
    minute: u32,
) -> Result<NaiveDateTime, CalculationError> {
    if hour > 23 {
        return Err(CalculationError::Unexpected(format!(
            "current_hour must be between 0 and 23, got {hour}"
        )));
    }
    if minute > 59 {
        return Err(CalculationError::Unexpected(format!(
            "current_minute must be between 0 and 59, got {minute}"
        )));
    }

    now.date().and_hms_opt(hour, minute, 0).ok_or_else(|| {
        CalculationError::Unexpected(format!("invalid time of day {hour:02}:{minute:02}"))
    })
}

/// Anchor time plus the potion-reduced duration.
pub fn compute_completion(
    now: NaiveDateTime,
    hour: u32,
    minute: u32,
    duration: DurationSpec,
    potions: u32,
    settings: &CalculatorSettings,
) -> Result<NaiveDateTime, CalculationError> {
    let anchor = anchor_time(now, hour, minute)?;
    let hours = effective_hours(duration.hours(), potions, settings.potion_hours);

    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|delta| anchor.checked_add_signed(delta))
        .ok_or_else(|| {
            CalculationError::Unexpected(format!("{hours} hours is outside the supported range"))
        })
}

fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Countdown from `now` (truncated to the minute) to `completion`.
///
/// `Done` once the completion has been reached, otherwise
/// `[{d}d ]{h}h[ {m}m] ({Weekday} {hh:mm AM/PM})`. The hours segment is always
/// present; days are dropped when zero, minutes are dropped when zero.
pub fn format_countdown(completion: NaiveDateTime, now: NaiveDateTime) -> String {
    let remaining = completion - truncate_to_minute(now);
    if remaining <= Duration::zero() {
        return "Done".to_string();
    }

    let total = remaining.num_seconds();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    let at = completion.format("%A %I:%M %p");

    match (days, minutes) {
        (0, 0) => format!("{hours}h ({at})"),
        (0, m) => format!("{hours}h {m}m ({at})"),
        (d, 0) => format!("{d}d {hours}h ({at})"),
        (d, m) => format!("{d}d {hours}h {m}m ({at})"),
    }
}

/// Absolute display form, e.g. `10/16/2026 at 05:30 PM`.
pub fn format_completion_datetime(completion: NaiveDateTime) -> String {
    completion.format("%m/%d/%Y at %I:%M %p").to_string()
}
