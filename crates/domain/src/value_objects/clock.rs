//! Time-of-day, interval and absolute time-point value objects
//!
//! Scenario times are entered as `HH:mm` strings. Internally every instant is
//! an absolute [`TimePoint`] on a fixed reference date, so an event that starts
//! on day 2 of a multi-day scenario compares with plain timestamp arithmetic
//! instead of (day, time-of-day) pairs.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Interval choices offered by the configuration form.
pub const INTERVAL_PRESETS: [&str; 5] = ["00:10", "00:15", "00:30", "01:00", "02:00"];

fn parse_hm(s: &str) -> Result<(u32, u32), DomainError> {
    let trimmed = s.trim();
    let (h, m) = trimmed
        .split_once(':')
        .ok_or_else(|| DomainError::parse(format!("Expected HH:mm, got {:?}", trimmed)))?;
    let hours: u32 = h
        .parse()
        .map_err(|_| DomainError::parse(format!("Invalid hours in {:?}", trimmed)))?;
    let minutes: u32 = m
        .parse()
        .map_err(|_| DomainError::parse(format!("Invalid minutes in {:?}", trimmed)))?;
    if m.len() != 2 || minutes >= 60 {
        return Err(DomainError::parse(format!(
            "Minutes must be two digits below 60 in {:?}",
            trimmed
        )));
    }
    Ok((hours, minutes))
}

fn total_minutes(hours: u32, minutes: u32) -> Result<u32, DomainError> {
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| DomainError::validation(format!("{} hours is out of range", hours)))
}

fn format_hm(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

// ============================================================================
// ClockTime
// ============================================================================

/// A time of day between `00:00` and `24:00` inclusive.
///
/// `24:00` is only meaningful as the end of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// # Errors
    ///
    /// Returns `DomainError::Validation` past `24:00` or for minutes >= 60.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, DomainError> {
        if minutes >= 60 {
            return Err(DomainError::validation("Minutes must be below 60"));
        }
        Self::from_minutes(total_minutes(hours, minutes)?)
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` past `24:00`.
    pub fn from_minutes(minutes: u32) -> Result<Self, DomainError> {
        if minutes > MINUTES_PER_DAY {
            return Err(DomainError::validation(format!(
                "Time of day cannot be later than 24:00 ({} minutes)",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hm(self.0))
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = parse_hm(s)?;
        Self::new(h, m)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> String {
        time.to_string()
    }
}

// ============================================================================
// Interval
// ============================================================================

/// Spacing between grid rows. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval(u32);

impl Interval {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a zero-length interval.
    pub fn from_minutes(minutes: u32) -> Result<Self, DomainError> {
        if minutes == 0 {
            return Err(DomainError::validation("Interval must be longer than 00:00"));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(30)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_hm(self.0))
    }
}

impl FromStr for Interval {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = parse_hm(s)?;
        Self::from_minutes(total_minutes(h, m)?)
    }
}

impl TryFrom<String> for Interval {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> String {
        interval.to_string()
    }
}

// ============================================================================
// TimePoint
// ============================================================================

fn reference_midnight() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// An absolute instant: a day index folded into the fixed reference date
/// plus a time of day, at minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(NaiveDateTime);

impl TimePoint {
    /// `time` on day `day` of the scenario (day 0 is the first day).
    pub fn at(day: u32, time: ClockTime) -> Self {
        Self::from_offset(i64::from(day) * i64::from(MINUTES_PER_DAY) + i64::from(time.minutes()))
    }

    /// The instant `minutes` after midnight of day 0.
    pub fn from_offset(minutes: i64) -> Self {
        Self(reference_midnight() + Duration::minutes(minutes))
    }

    /// Minutes since midnight of day 0.
    pub fn offset_minutes(&self) -> i64 {
        (self.0 - reference_midnight()).num_minutes()
    }

    /// Zero-based scenario day this instant falls on.
    pub fn day_index(&self) -> i64 {
        self.offset_minutes().div_euclid(i64::from(MINUTES_PER_DAY))
    }

    /// Time of day, always below `24:00`.
    pub fn clock_time(&self) -> ClockTime {
        ClockTime(self.0.hour() * 60 + self.0.minute())
    }

    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

impl From<NaiveDateTime> for TimePoint {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_index() {
            0 => write!(f, "{}", self.clock_time()),
            day => write!(f, "Day {} {}", day + 1, self.clock_time()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_parses_and_formats() {
        let t: ClockTime = "9:05".parse().unwrap();
        assert_eq!(t.minutes(), 545);
        assert_eq!(t.to_string(), "09:05");
        assert_eq!("24:00".parse::<ClockTime>().unwrap(), ClockTime::END_OF_DAY);
    }

    #[test]
    fn clock_time_rejects_out_of_range() {
        assert!("24:01".parse::<ClockTime>().is_err());
        assert!("10:60".parse::<ClockTime>().is_err());
        assert!("10:5".parse::<ClockTime>().is_err());
        assert!("1000".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
    }

    #[test]
    fn interval_must_be_positive() {
        assert!("00:00".parse::<Interval>().is_err());
        assert_eq!("01:30".parse::<Interval>().unwrap().minutes(), 90);
        assert!(Interval::from_minutes(0).is_err());
    }

    #[test]
    fn interval_presets_parse() {
        for preset in INTERVAL_PRESETS {
            assert!(preset.parse::<Interval>().is_ok(), "{}", preset);
        }
    }

    #[test]
    fn time_point_folds_days() {
        let t = TimePoint::at(1, "03:15".parse().unwrap());
        assert_eq!(t.offset_minutes(), 1440 + 195);
        assert_eq!(t.day_index(), 1);
        assert_eq!(t.clock_time().to_string(), "03:15");
        assert_eq!(t.to_string(), "Day 2 03:15");
    }

    #[test]
    fn end_of_day_is_next_midnight() {
        let end = TimePoint::at(0, ClockTime::END_OF_DAY);
        assert_eq!(end, TimePoint::at(1, ClockTime::MIDNIGHT));
    }

    #[test]
    fn time_points_order_across_days() {
        let late = TimePoint::at(0, "23:30".parse().unwrap());
        let early_next = TimePoint::at(1, "00:10".parse().unwrap());
        assert!(late < early_next);
    }

    #[test]
    fn time_point_serde_round_trip() {
        let t = TimePoint::at(0, "18:00".parse().unwrap());
        let json = serde_json::to_string(&t).unwrap();
        let back: TimePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
