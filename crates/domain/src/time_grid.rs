//! Time grid generation
//!
//! Turns a [`Schedule`] into the ordered list of time slots the timeline is
//! drawn on. The grid is a lazy, restartable sequence: [`TimeGrid`] only stores
//! the window bounds and every call to [`TimeGrid::iter`] walks them again.
//!
//! Each calendar day is stepped from its own start (the configured start on the
//! first day, `00:00` afterwards) up to and including its end (`24:00`, or the
//! configured end on the last day). Midnight closes one day and opens the next,
//! so it is emitted once.

use std::collections::HashMap;

use chrono::Duration;

use crate::config::Schedule;
use crate::value_objects::{ClockTime, Interval, TimePoint, MINUTES_PER_DAY};

const DAY: i64 = MINUTES_PER_DAY as i64;

/// Generates the time grid for `schedule`.
///
/// An end before the start yields an empty grid rather than an error.
pub fn generate(schedule: &Schedule) -> TimeGrid {
    TimeGrid {
        start: schedule.start_offset(),
        end: schedule.end_offset(),
        interval: schedule.interval,
    }
}

/// The discrete time slots of a scenario, both window bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start: i64,
    end: i64,
    interval: Interval,
}

impl TimeGrid {
    pub fn iter(&self) -> TimeSlots {
        TimeSlots {
            end: self.end,
            step: i64::from(self.interval.minutes()),
            day: self.start.div_euclid(DAY),
            cursor: self.start,
            last: None,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Length of one slot, used as the slot's exclusive end in overlap checks.
    pub fn slot_duration(&self) -> Duration {
        self.interval.as_duration()
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn points(&self) -> Vec<TimePoint> {
        self.iter().collect()
    }

    /// Row of every point on the grid. Points off the grid have no row.
    pub fn row_index(&self) -> HashMap<TimePoint, usize> {
        self.iter()
            .enumerate()
            .map(|(row, point)| (point, row))
            .collect()
    }

    /// Number of calendar days the window touches (0 for an empty grid).
    pub fn day_count(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        // A window ending exactly at midnight does not open another day.
        let last_day = (self.end - 1).max(self.start).div_euclid(DAY);
        let days = last_day - self.start.div_euclid(DAY) + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Times selectable on the 1-based scenario `day`, each day stepped from
    /// its own start.
    ///
    /// Unlike [`TimeGrid::iter`] a day that ends at `24:00` lists it, so the
    /// presets of consecutive days both show midnight.
    pub fn day_presets(&self, day: u32) -> Vec<ClockTime> {
        if day == 0 || self.is_empty() {
            return Vec::new();
        }
        let day_start = (self.start.div_euclid(DAY) + i64::from(day) - 1) * DAY;
        let from = self.start.max(day_start);
        let to = self.end.min(day_start + DAY);
        let step = i64::from(self.interval.minutes());

        let mut presets = Vec::new();
        let mut t = from;
        while t <= to {
            let minutes = u32::try_from(t - day_start).unwrap_or(MINUTES_PER_DAY);
            if let Ok(time) = ClockTime::from_minutes(minutes) {
                presets.push(time);
            }
            t += step;
        }
        presets
    }
}

impl<'a> IntoIterator for &'a TimeGrid {
    type Item = TimePoint;
    type IntoIter = TimeSlots;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the slots of a [`TimeGrid`]. Strictly increasing.
#[derive(Debug, Clone)]
pub struct TimeSlots {
    end: i64,
    step: i64,
    day: i64,
    cursor: i64,
    last: Option<i64>,
}

impl Iterator for TimeSlots {
    type Item = TimePoint;

    fn next(&mut self) -> Option<TimePoint> {
        loop {
            if self.cursor > self.end {
                return None;
            }
            let day_end = self.end.min((self.day + 1) * DAY);
            if self.cursor > day_end {
                self.day += 1;
                self.cursor = self.day * DAY;
                continue;
            }
            let current = self.cursor;
            self.cursor += self.step;
            if self.last == Some(current) {
                continue;
            }
            self.last = Some(current);
            return Some(TimePoint::from_offset(current));
        }
    }
}
