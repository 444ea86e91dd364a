//! Poll interval value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::IntervalParseError;

/// Default marker poll period (100 milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Value object representing a strictly positive polling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollInterval {
    milliseconds: u64,
}

impl PollInterval {
    /// Create an interval from milliseconds. Zero is rounded up to one.
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            milliseconds: if ms == 0 { 1 } else { ms },
        }
    }

    /// Default marker poll period
    pub const fn default_poll() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS)
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> Duration {
        Duration::from_millis(self.milliseconds)
    }
}

impl FromStr for PollInterval {
    type Err = IntervalParseError;

    /// Parse strings like "100ms", "2s", "1m", "1s500ms".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IntervalParseError { input: s.to_string() };
        let input = s.trim().to_lowercase();

        let mut total_ms: u64 = 0;
        let mut number = String::new();
        let mut unit = String::new();
        let mut found_any = false;

        let mut flush = |number: &mut String, unit: &mut String| -> Result<(), IntervalParseError> {
            let value: u64 = number.parse().map_err(|_| err())?;
            let factor = match unit.as_str() {
                "ms" => 1,
                "s" => 1_000,
                "m" => 60_000,
                _ => return Err(err()),
            };
            total_ms = value
                .checked_mul(factor)
                .and_then(|v| total_ms.checked_add(v))
                .ok_or_else(err)?;
            number.clear();
            unit.clear();
            Ok(())
        };

        for ch in input.chars() {
            if ch.is_ascii_digit() {
                if !unit.is_empty() {
                    flush(&mut number, &mut unit)?;
                    found_any = true;
                }
                number.push(ch);
            } else if ch.is_ascii_alphabetic() && !number.is_empty() {
                unit.push(ch);
            } else {
                return Err(err());
            }
        }

        if !number.is_empty() {
            if unit.is_empty() {
                return Err(err());
            }
            flush(&mut number, &mut unit)?;
            found_any = true;
        }

        if !found_any || total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for PollInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.milliseconds / 60_000;
        let seconds = (self.milliseconds % 60_000) / 1_000;
        let millis = self.milliseconds % 1_000;

        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        if millis > 0 {
            write!(f, "{}ms", millis)?;
        }
        Ok(())
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::default_poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_millis() {
        let i: PollInterval = "100ms".parse().unwrap();
        assert_eq!(i.as_millis(), 100);
    }

    #[test]
    fn parse_seconds() {
        let i: PollInterval = "2s".parse().unwrap();
        assert_eq!(i.as_millis(), 2_000);
    }

    #[test]
    fn parse_minutes() {
        let i: PollInterval = "1m".parse().unwrap();
        assert_eq!(i.as_millis(), 60_000);
    }

    #[test]
    fn parse_compound() {
        let i: PollInterval = "1s500ms".parse().unwrap();
        assert_eq!(i.as_millis(), 1_500);
        let i: PollInterval = "1m30s".parse().unwrap();
        assert_eq!(i.as_millis(), 90_000);
    }

    #[test]
    fn parse_case_and_whitespace() {
        let i: PollInterval = "  250MS ".parse().unwrap();
        assert_eq!(i.as_millis(), 250);
    }

    #[test]
    fn parse_rejects_bare_numbers_and_zero() {
        assert!("100".parse::<PollInterval>().is_err());
        assert!("0ms".parse::<PollInterval>().is_err());
        assert!("".parse::<PollInterval>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_units() {
        assert!("10h".parse::<PollInterval>().is_err());
        assert!("10sec".parse::<PollInterval>().is_err());
        assert!("ms".parse::<PollInterval>().is_err());
        assert!("-5ms".parse::<PollInterval>().is_err());
    }

    #[test]
    fn display_uses_largest_units() {
        assert_eq!(PollInterval::from_millis(100).to_string(), "100ms");
        assert_eq!(PollInterval::from_millis(1_500).to_string(), "1s500ms");
        assert_eq!(PollInterval::from_millis(120_000).to_string(), "2m");
    }

    #[test]
    fn display_parses_back() {
        let i = PollInterval::from_millis(61_250);
        assert_eq!(i.to_string().parse::<PollInterval>().unwrap(), i);
    }

    #[test]
    fn zero_millis_is_clamped() {
        assert_eq!(PollInterval::from_millis(0).as_millis(), 1);
    }

    #[test]
    fn default_is_100ms() {
        assert_eq!(PollInterval::default().as_std(), Duration::from_millis(100));
    }
}
