//! Strict `HH:mm:ss` time-of-day type for schedule boundaries.

use core::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`TimeOfDay`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The input string is empty.
    #[error("time cannot be empty")]
    Empty,
    /// The input does not match the `HH:mm:ss` pattern.
    #[error("time must be in the HH:mm:ss format (e.g. 14:30:00)")]
    Pattern,
    /// A component is outside its valid range.
    #[error("time component out of range (hour 00-23, minute/second 00-59)")]
    OutOfRange,
}

/// A wall-clock time of day in strict `HH:mm:ss` form.
///
/// The backend stores schedule boundaries as 24-hour `HH:mm:ss` strings,
/// and the parser here is deliberately stricter than `NaiveTime`'s:
/// single-digit hours (`7:30:00`), missing seconds, fractional seconds,
/// and trailing input are all rejected, exactly mirroring the pattern the
/// schedule forms enforce.
///
/// ## Examples
///
/// ```
/// use platter_core::TimeOfDay;
///
/// let open: TimeOfDay = "09:30:00".parse().unwrap();
/// assert_eq!(open.to_string(), "09:30:00");
///
/// assert!("24:00:00".parse::<TimeOfDay>().is_err()); // hour out of range
/// assert!("12:60:00".parse::<TimeOfDay>().is_err()); // minute out of range
/// assert!("7:30:00".parse::<TimeOfDay>().is_err());  // not zero-padded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from components, rejecting out-of-range values.
    #[must_use]
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Parse a strict `HH:mm:ss` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly `HH:mm:ss` with two digits per component
    /// - Has an hour above 23 or a minute/second above 59
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        if s.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let &[h1, h0, b':', m1, m0, b':', s1, s0] = s.as_bytes() else {
            return Err(TimeParseError::Pattern);
        };

        let digits = [h1, h0, m1, m0, s1, s0];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(TimeParseError::Pattern);
        }

        let value = |hi: u8, lo: u8| u32::from(hi - b'0') * 10 + u32::from(lo - b'0');
        let (hour, minute, second) = (value(h1, h0), value(m1, m0), value(s1, s0));

        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or(TimeParseError::OutOfRange)
    }

    /// The underlying `chrono` time.
    #[must_use]
    pub const fn as_naive(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_times() {
        for s in ["00:00:00", "09:30:00", "14:30:00", "23:59:59"] {
            assert!(TimeOfDay::parse(s).is_ok(), "{s} should parse");
        }
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(TimeOfDay::parse("24:00:00"), Err(TimeParseError::OutOfRange));
        assert_eq!(TimeOfDay::parse("12:60:00"), Err(TimeParseError::OutOfRange));
        assert_eq!(TimeOfDay::parse("12:00:60"), Err(TimeParseError::OutOfRange));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(TimeOfDay::parse(""), Err(TimeParseError::Empty));
        for s in [
            "7:30:00",      // not zero-padded
            "12:30",        // missing seconds
            "12:30:00.5",   // fractional seconds
            "12:30:00 ",    // trailing input
            "ab:cd:ef",     // not digits
            "12-30-00",     // wrong separators
        ] {
            assert_eq!(TimeOfDay::parse(s), Err(TimeParseError::Pattern), "{s}");
        }
    }

    #[test]
    fn displays_zero_padded() {
        let t = TimeOfDay::from_hms(7, 5, 0).unwrap();
        assert_eq!(t.to_string(), "07:05:00");
    }

    #[test]
    fn serde_round_trip() {
        let t: TimeOfDay = serde_json::from_str("\"22:15:30\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"22:15:30\"");
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00:00\"").is_err());
    }

    #[test]
    fn inverted_ranges_are_not_a_parse_concern() {
        // Ordering between start and end is intentionally not enforced here;
        // an end before its start parses fine.
        let start = TimeOfDay::parse("22:00:00").unwrap();
        let end = TimeOfDay::parse("06:00:00").unwrap();
        assert!(end < start);
    }
}
