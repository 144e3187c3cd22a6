//! Parsing of compact upgrade durations (`3d`, `12h`, `2d12h`).

use std::sync::OnceLock;

use regex::Regex;

use crate::models::DurationSpec;

fn days_and_hours() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)d([0-9]+)h$").expect("valid regex"))
}

fn days_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)d$").expect("valid regex"))
}

fn hours_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)h$").expect("valid regex"))
}

/// Digit runs that overflow saturate, so they still fail the length check.
fn number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Parse a duration string into total hours.
///
/// Which pattern applies is decided by the letters present: both `d` and `h`
/// means `XdYh`, only `d` means `Xd`, only `h` means `Xh`. The string must then
/// match that pattern exactly, so `5h3d`, `5.5h` and `1d2h3h` are all rejected.
/// Returns `None` for anything else, including the empty string.
pub fn parse_duration(input: &str) -> Option<DurationSpec> {
    let s = input.trim();
    let has_days = s.contains('d');
    let has_hours = s.contains('h');

    let hours = if has_days && has_hours {
        let caps = days_and_hours().captures(s)?;
        number(&caps[1])
            .saturating_mul(24)
            .saturating_add(number(&caps[2]))
    } else if has_days {
        let caps = days_only().captures(s)?;
        number(&caps[1]).saturating_mul(24)
    } else if has_hours {
        let caps = hours_only().captures(s)?;
        number(&caps[1])
    } else {
        return None;
    };

    Some(DurationSpec::from_hours(hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(s: &str) -> Option<u64> {
        parse_duration(s).map(|d| d.hours())
    }

    #[test]
    fn test_parse_days_and_hours() {
        assert_eq!(hours("2d12h"), Some(60));
        assert_eq!(hours("1d2h"), Some(26));
        assert_eq!(hours("0d0h"), Some(0));
    }

    #[test]
    fn test_parse_days_only() {
        assert_eq!(hours("1d"), Some(24));
        assert_eq!(hours("30d"), Some(720));
    }

    #[test]
    fn test_parse_hours_only() {
        assert_eq!(hours("5h"), Some(5));
        assert_eq!(hours("48h"), Some(48));
    }

    #[test]
    fn test_parse_all_forms_agree() {
        for d in [0u64, 1, 7, 29] {
            for h in [0u64, 1, 12, 23] {
                assert_eq!(hours(&format!("{d}d{h}h")), Some(d * 24 + h));
            }
            assert_eq!(hours(&format!("{d}d")), Some(d * 24));
        }
        for h in [0u64, 9, 100] {
            assert_eq!(hours(&format!("{h}h")), Some(h));
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(hours("  3h\t"), Some(3));
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "5", "5x", "h5", "5h3d", "5.5h", "d", "h", "dh", "1d 2h", "1d2h3h", "2d2d", "-1h", "bad"] {
            assert_eq!(hours(s), None, "{s:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_huge_number_saturates() {
        assert_eq!(hours("99999999999999999999999h"), Some(u64::MAX));
        assert_eq!(hours("999999999999999999d"), Some(u64::MAX));
    }
}
