//! The universal day axis underlying every calendar.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::EPOCH_JDN;
use crate::prelude::*;

/// A day number on the universal axis shared by all calendars.
///
/// Day 0 is 1970-01-01 in the proleptic Gregorian calendar. The value is a
/// plain signed day count with no timezone or time-of-day component, so two
/// dates of any calendar kind compare by comparing their epoch days.
///
/// # Example
///
/// ```
/// use calendrium::EpochDay;
///
/// let day = EpochDay::from_gregorian(2000, 1, 1);
/// assert_eq!(10957, day.value());
/// assert_eq!((2000, 1, 1), day.to_gregorian());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct EpochDay(i64);

impl EpochDay {
    /// Wraps a raw day count.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw day count.
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Creates an epoch day from a proleptic Gregorian calendar date.
    ///
    /// `year` is an astronomical year number (1 BC is `0`, 2 BC is `-1`).
    /// The conversion is exact integer arithmetic; supported input begins
    /// at the year -4712.
    pub const fn from_gregorian(year: i32, month: i32, day: i32) -> Self {
        let (y, m, d) = (year as i64, month as i64, day as i64);
        let jdn = (1461 * (y + 4800 + (m - 14) / 12)) / 4
            + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075;
        Self(jdn - EPOCH_JDN)
    }

    /// Represents the day as a proleptic Gregorian date in
    /// `(year, month, day)` format.
    pub const fn to_gregorian(self) -> (i32, i32, i32) {
        let jdn = self.0 + EPOCH_JDN;
        let f = jdn + 1401 + (((4 * jdn + 274_277) / 146_097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }

    /// Adds a day count, returning `None` on arithmetic overflow.
    pub const fn checked_add(self, days: i64) -> Option<Self> {
        match self.0.checked_add(days) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl Add<i64> for EpochDay {
    type Output = EpochDay;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<i64> for EpochDay {
    type Output = EpochDay;

    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl Sub<EpochDay> for EpochDay {
    type Output = i64;

    fn sub(self, rhs: EpochDay) -> Self::Output {
        self.0 - rhs.0
    }
}
