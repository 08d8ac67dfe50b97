//! Interval specification parsing.
//!
//! An interval is written as one or more `<digits><unit>` components with
//! units `d`, `h`, `m`, `s`, strictly ordered days, hours, minutes, seconds
//! and no separators: `1h30m`, `90s`, `2d4h30m15s`. Parsing is a pure
//! function; prompting and retries are the caller's concern.

use std::fmt;

use tickforge_core::{Error, Result};

const MS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// A bar interval as a sum of day/hour/minute/second components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl IntervalSpec {
    /// Parse an interval spec.
    ///
    /// Rejected before any bucketing begins: empty input, unknown units,
    /// out-of-order or repeated units, a unit with no digits, trailing
    /// digits with no unit, and a zero total duration.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.is_empty() {
            return Err(Error::invalid_interval("empty interval spec"));
        }

        let mut components = [0u64; 4];
        let mut value: Option<u64> = None;
        let mut last_rank: Option<usize> = None;

        for ch in spec.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let next = value
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit as u64));
                match next {
                    Some(v) => value = Some(v),
                    None => {
                        return Err(Error::invalid_interval(format!(
                            "component too large in {spec:?}"
                        )))
                    }
                }
            } else {
                let rank = match ch {
                    'd' => 0,
                    'h' => 1,
                    'm' => 2,
                    's' => 3,
                    _ => {
                        return Err(Error::invalid_interval(format!(
                            "unknown unit {ch:?} in {spec:?} (expected d, h, m or s)"
                        )))
                    }
                };
                let Some(v) = value.take() else {
                    return Err(Error::invalid_interval(format!(
                        "unit {ch:?} has no value in {spec:?}"
                    )));
                };
                if last_rank.is_some_and(|r| rank <= r) {
                    return Err(Error::invalid_interval(format!(
                        "components must be ordered days, hours, minutes, seconds in {spec:?}"
                    )));
                }
                last_rank = Some(rank);
                components[rank] = v;
            }
        }

        if value.is_some() {
            return Err(Error::invalid_interval(format!(
                "trailing digits with no unit in {spec:?}"
            )));
        }

        let [days, hours, minutes, seconds] = components;
        let interval = Self {
            days,
            hours,
            minutes,
            seconds,
        };
        match interval.checked_duration_ms() {
            Some(0) => Err(Error::invalid_interval(format!(
                "interval {spec:?} must be greater than zero seconds"
            ))),
            Some(_) => Ok(interval),
            None => Err(Error::invalid_interval(format!(
                "interval {spec:?} is too large"
            ))),
        }
    }

    fn checked_duration_ms(&self) -> Option<i64> {
        let seconds = self
            .days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(self.minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(self.seconds)?;
        let ms = seconds.checked_mul(MS_PER_SECOND as u64)?;
        i64::try_from(ms).ok()
    }

    /// Total interval duration in milliseconds (always positive).
    pub fn duration_ms(&self) -> i64 {
        // parse() rejected overflow and zero totals
        self.checked_duration_ms().unwrap_or(i64::MAX)
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (value, unit) in [
            (self.days, 'd'),
            (self.hours, 'h'),
            (self.minutes, 'm'),
            (self.seconds, 's'),
        ] {
            if value > 0 {
                write!(f, "{value}{unit}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_components() {
        assert_eq!(IntervalSpec::parse("90s").unwrap().duration_ms(), 90_000);
        assert_eq!(IntervalSpec::parse("30m").unwrap().duration_ms(), 1_800_000);
        assert_eq!(IntervalSpec::parse("1h").unwrap().duration_ms(), 3_600_000);
        assert_eq!(IntervalSpec::parse("1d").unwrap().duration_ms(), 86_400_000);
    }

    #[test]
    fn test_parse_compound_spec() {
        let interval = IntervalSpec::parse("1h30m").unwrap();
        assert_eq!(interval.hours, 1);
        assert_eq!(interval.minutes, 30);
        assert_eq!(interval.duration_ms(), 5_400_000);

        let full = IntervalSpec::parse("2d4h30m15s").unwrap();
        assert_eq!(
            full.duration_ms(),
            ((2 * 86_400 + 4 * 3_600 + 30 * 60 + 15) * 1_000) as i64
        );
    }

    #[test]
    fn test_rejects_malformed_specs() {
        for bad in ["", "1x", "h30m", "1h30", "1.5h", "1h 30m"] {
            assert!(
                matches!(IntervalSpec::parse(bad), Err(Error::InvalidInterval(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_out_of_order_and_repeated_units() {
        assert!(IntervalSpec::parse("30m1h").is_err());
        assert!(IntervalSpec::parse("1h1h").is_err());
        assert!(IntervalSpec::parse("15s1d").is_err());
    }

    #[test]
    fn test_rejects_zero_total() {
        assert!(IntervalSpec::parse("0s").is_err());
        assert!(IntervalSpec::parse("0d0s").is_err());
        // a zero component is fine as long as the total is positive
        assert_eq!(IntervalSpec::parse("0d5m").unwrap().duration_ms(), 300_000);
    }

    #[test]
    fn test_display_round_trip() {
        for spec in ["1h30m", "90s", "1d", "2d4h30m15s"] {
            assert_eq!(IntervalSpec::parse(spec).unwrap().to_string(), spec);
        }
    }
}
