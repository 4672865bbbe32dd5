//! Core record types for timerec.
//!
//! A [`Record`] is one recording timer: a window between two wall-clock
//! times of day on a given channel. Records are plain values; the
//! [`RecordStore`](crate::store::RecordStore) owns every record it holds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = Error;

    fn try_from(raw: RawTimeOfDay) -> Result<Self> {
        Self::new(raw.hour, raw.minute)
    }
}

impl TimeOfDay {
    /// Create a time of day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] unless `hour` is in `0..=23` and
    /// `minute` is in `0..=59`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        match (u8::try_from(hour), u8::try_from(minute)) {
            (Ok(h), Ok(m)) if h < 24 && m < 60 => Ok(Self { hour: h, minute: m }),
            _ => Err(Error::InvalidTime { hour, minute }),
        }
    }

    /// Hour of the day, `0..=23`.
    #[must_use]
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Minute of the hour, `0..=59`.
    #[must_use]
    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A single recording timer.
///
/// `end` is not required to be after `start`; a window that wraps past
/// midnight is stored as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When recording starts.
    pub start: TimeOfDay,
    /// When recording ends.
    pub end: TimeOfDay,
    /// Channel to record.
    pub channel: u32,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(start: TimeOfDay, end: TimeOfDay, channel: u32) -> Self {
        Self {
            start,
            end,
            channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_bounds() {
        assert!(TimeOfDay::new(0, 0).is_ok());
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(matches!(
            TimeOfDay::new(24, 0),
            Err(Error::InvalidTime { hour: 24, minute: 0 })
        ));
        assert!(matches!(
            TimeOfDay::new(12, 60),
            Err(Error::InvalidTime { hour: 12, minute: 60 })
        ));
        assert!(TimeOfDay::new(u32::MAX, 0).is_err());
    }

    #[test]
    fn test_time_of_day_display() {
        let t = TimeOfDay::new(7, 5).unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 5);
    }

    #[test]
    fn test_time_of_day_ordering() {
        let early = TimeOfDay::new(8, 30).unwrap();
        let late = TimeOfDay::new(9, 0).unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_record_allows_end_before_start() {
        let start = TimeOfDay::new(23, 0).unwrap();
        let end = TimeOfDay::new(1, 0).unwrap();
        let record = Record::new(start, end, 4);
        assert_eq!(record.start, start);
        assert_eq!(record.end, end);
        assert_eq!(record.channel, 4);
    }

    #[test]
    fn test_record_serialization() {
        let record = Record::new(
            TimeOfDay::new(20, 15).unwrap(),
            TimeOfDay::new(21, 0).unwrap(),
            7,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"channel\":7"));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_time() {
        let json = r#"{"hour": 25, "minute": 0}"#;
        assert!(serde_json::from_str::<TimeOfDay>(json).is_err());
    }
}
