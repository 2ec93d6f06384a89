//! Metonic-cycle calendar (Hebrew): a fixed 19-year leap pattern,
//! deficient/regular/complete year classes with two variable-length
//! months, and anniversary projection.
//!
//! Everything is closed-form integer arithmetic over the epoch-day axis;
//! no oracle data is consumed. The year class is always derived from the
//! distance between successive new-year days, never stored.
//!
//! # Example
//!
//! ```
//! use calendrium::EpochDay;
//! use calendrium::hebrew::{HebrewCalendar, HebrewMonth};
//!
//! let cal = HebrewCalendar;
//! let date = cal.of(5777, HebrewMonth::Tevet, 4).unwrap();
//! assert_eq!(EpochDay::from_gregorian(2017, 1, 2), date.epoch_day());
//! assert!(!HebrewCalendar::is_leap_year(5777));
//! ```

mod anniversary;

use std::cmp::Ordering;
use std::fmt;

use crate::consts::{METONIC_MAX_YEAR, METONIC_MIN_YEAR};
use crate::epoch::EpochDay;
use crate::error::CalendarError;
use crate::prelude::*;
use crate::system::{CalendarSystem, DateField, FieldAccess};

pub use anniversary::Anniversary;

/// Months in civil order; the year begins with Tishri.
///
/// Adar I exists only in leap years, where it precedes Adar II. In common
/// years Adar II is simply called Adar and takes the sixth civil
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HebrewMonth {
    Tishri,
    Heshvan,
    Kislev,
    Tevet,
    Shevat,
    AdarI,
    AdarII,
    Nisan,
    Iyar,
    Sivan,
    Tamuz,
    Av,
    Elul,
}

/// All thirteen months in enumeration order.
const ALL_MONTHS: [HebrewMonth; 13] = [
    HebrewMonth::Tishri,
    HebrewMonth::Heshvan,
    HebrewMonth::Kislev,
    HebrewMonth::Tevet,
    HebrewMonth::Shevat,
    HebrewMonth::AdarI,
    HebrewMonth::AdarII,
    HebrewMonth::Nisan,
    HebrewMonth::Iyar,
    HebrewMonth::Sivan,
    HebrewMonth::Tamuz,
    HebrewMonth::Av,
    HebrewMonth::Elul,
];

impl HebrewMonth {
    /// Position in the thirteen-month enumeration, 1 (Tishri) to 13
    /// (Elul).
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Month for an enumeration position.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] outside 1..=13.
    pub fn from_value(value: u8) -> Result<Self, CalendarError> {
        ALL_MONTHS
            .get(value.wrapping_sub(1) as usize)
            .copied()
            .ok_or_else(|| CalendarError::InvalidField(format!("month value {value} out of 1..=13")))
    }

    /// Civil numbering: 1 (Tishri) to 12 or 13 (Elul). In common years
    /// both Adar I and Adar II report 6.
    pub const fn civil_value(self, leap_year: bool) -> u8 {
        let value = self.value();
        if leap_year || value <= 6 {
            value
        } else {
            value - 1
        }
    }

    /// Month for a civil number.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when the number does not
    /// exist in a year of the given leapness (e.g. 13 in a common year).
    pub fn from_civil(value: u8, leap_year: bool) -> Result<Self, CalendarError> {
        let invalid =
            || CalendarError::InvalidField(format!("civil month {value} does not exist"));
        if leap_year {
            return Self::from_value(value);
        }
        match value {
            1..=5 => Self::from_value(value),
            6 => Ok(Self::AdarII),
            7..=12 => Self::from_value(value + 1),
            _ => Err(invalid()),
        }
    }

    /// Biblical numbering, counting from Nisan. In common years both Adar
    /// I and Adar II report 12.
    pub const fn biblical_value(self, leap_year: bool) -> u8 {
        let civil = self.civil_value(leap_year);
        let months = if leap_year { 13 } else { 12 };
        if civil >= 7 { civil - 6 } else { civil + months - 6 }
    }

    /// Month for a biblical number.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when the number does not
    /// exist in a year of the given leapness.
    pub fn from_biblical(value: u8, leap_year: bool) -> Result<Self, CalendarError> {
        let months = if leap_year { 13u8 } else { 12u8 };
        if value == 0 || value > months {
            return Err(CalendarError::InvalidField(format!(
                "biblical month {value} does not exist"
            )));
        }
        let civil = if value <= 6 { value + months - 6 } else { value - 6 };
        Self::from_civil(civil, leap_year)
    }

    /// The next month in civil time order within the same year, honoring
    /// the year's leapness; `None` after Elul.
    pub fn successor(self, leap_year: bool) -> Option<Self> {
        match self {
            Self::Shevat if !leap_year => Some(Self::AdarII),
            Self::Elul => None,
            _ => ALL_MONTHS.get(self as usize + 1).copied(),
        }
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tishri => "Tishri",
            Self::Heshvan => "Heshvan",
            Self::Kislev => "Kislev",
            Self::Tevet => "Tevet",
            Self::Shevat => "Shevat",
            Self::AdarI => "Adar I",
            Self::AdarII => "Adar II",
            Self::Nisan => "Nisan",
            Self::Iyar => "Iyar",
            Self::Sivan => "Sivan",
            Self::Tamuz => "Tamuz",
            Self::Av => "Av",
            Self::Elul => "Elul",
        };
        f.write_str(name)
    }
}

/// Year class controlling the two variable-length months: Heshvan is full
/// only in complete years, Kislev is short only in deficient years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearType {
    /// 353 or 383 days.
    Deficient,
    /// 354 or 384 days.
    Regular,
    /// 355 or 385 days.
    Complete,
}

/// An immutable metonic calendar date.
///
/// Values are created only through [`HebrewCalendar::of`] or by
/// transformation from an epoch day; equality and ordering follow the
/// epoch day the value maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{} {} {}", day, month, year)]
pub struct HebrewDate {
    year: i32,
    month: HebrewMonth,
    day: u8,
    epoch_day: EpochDay,
}

impl HebrewDate {
    /// Year of the era.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year.
    pub const fn month(&self) -> HebrewMonth {
        self.month
    }

    /// Day of the month, 1-based.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Position of the value on the universal day axis.
    pub const fn epoch_day(&self) -> EpochDay {
        self.epoch_day
    }

    /// Projection of this date into other years.
    pub const fn anniversary(self) -> Anniversary {
        Anniversary::new(self)
    }

    /// The thirteenth birthday, projected under the birthday rules.
    ///
    /// # Errors
    /// Fails only when the target year leaves the supported era.
    pub fn bar_mitzvah(self) -> Result<Self, CalendarError> {
        self.anniversary().birthday_in_year(self.year + 13)
    }

    /// The twelfth birthday, projected under the birthday rules.
    ///
    /// # Errors
    /// Fails only when the target year leaves the supported era.
    pub fn bat_mitzvah(self) -> Result<Self, CalendarError> {
        self.anniversary().birthday_in_year(self.year + 12)
    }
}

impl PartialOrd for HebrewDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HebrewDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_day.cmp(&other.epoch_day)
    }
}

/// Shift between the era's day count and the epoch-day axis.
const ERA_TO_EPOCH: i64 = 2_092_591;

/// Positions of the leap years within the 19-year cycle, via the closed
/// form `(7 * year + 1) mod 19 < 7`.
fn is_leap(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Days from the era's fixed epoch to the nominal new year of `year`,
/// from exact molad arithmetic with the four classical postponements.
fn elapsed_days(year: i64) -> i64 {
    let prior = year - 1;
    let cycles = prior.div_euclid(19);
    let remainder = prior.rem_euclid(19);
    let months = 235 * cycles + 12 * remainder + (7 * remainder + 1) / 19;

    let parts = 204 + 793 * months.rem_euclid(1080);
    let hours = 5 + 12 * months + 793 * months.div_euclid(1080) + parts / 1080;
    let mut day = 1 + 29 * months + hours.div_euclid(24);
    let parts_of_day = 1080 * hours.rem_euclid(24) + parts % 1080;

    if parts_of_day >= 19440
        || (day.rem_euclid(7) == 2 && parts_of_day >= 9924 && !is_leap(year))
        || (day.rem_euclid(7) == 1 && parts_of_day >= 16789 && is_leap(year - 1))
    {
        day += 1;
    }
    // a new year never falls on Sunday, Wednesday or Friday
    if matches!(day.rem_euclid(7), 0 | 3 | 5) {
        day += 1;
    }
    day
}

fn new_year_epoch(year: i32) -> EpochDay {
    EpochDay::new(elapsed_days(i64::from(year)) - ERA_TO_EPOCH)
}

fn year_length(year: i32) -> i64 {
    elapsed_days(i64::from(year) + 1) - elapsed_days(i64::from(year))
}

fn year_type_of(year: i32) -> YearType {
    match year_length(year) {
        353 | 383 => YearType::Deficient,
        354 | 384 => YearType::Regular,
        355 | 385 => YearType::Complete,
        other => unreachable!("hebrew year {year} has impossible length {other}"),
    }
}

/// Civil-order month sequence of a year.
fn sequence(leap_year: bool) -> &'static [HebrewMonth] {
    const COMMON: [HebrewMonth; 12] = [
        HebrewMonth::Tishri,
        HebrewMonth::Heshvan,
        HebrewMonth::Kislev,
        HebrewMonth::Tevet,
        HebrewMonth::Shevat,
        HebrewMonth::AdarII,
        HebrewMonth::Nisan,
        HebrewMonth::Iyar,
        HebrewMonth::Sivan,
        HebrewMonth::Tamuz,
        HebrewMonth::Av,
        HebrewMonth::Elul,
    ];
    if leap_year { &ALL_MONTHS } else { &COMMON }
}

fn month_length(year_type: YearType, month: HebrewMonth) -> u8 {
    match month {
        HebrewMonth::Tishri
        | HebrewMonth::Shevat
        | HebrewMonth::AdarI
        | HebrewMonth::Nisan
        | HebrewMonth::Sivan
        | HebrewMonth::Av => 30,
        HebrewMonth::Tevet
        | HebrewMonth::AdarII
        | HebrewMonth::Iyar
        | HebrewMonth::Tamuz
        | HebrewMonth::Elul => 29,
        HebrewMonth::Heshvan => {
            if year_type == YearType::Complete {
                30
            } else {
                29
            }
        }
        HebrewMonth::Kislev => {
            if year_type == YearType::Deficient {
                29
            } else {
                30
            }
        }
    }
}

/// The metonic calendar's rule set. Stateless: every operation is
/// closed-form arithmetic, so the one value [`HebrewCalendar`] serves all
/// callers concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HebrewCalendar;

impl HebrewCalendar {
    /// Whether `year` is an embolismic (13-month) year of the 19-year
    /// cycle.
    pub fn is_leap_year(year: i32) -> bool {
        is_leap(i64::from(year))
    }

    fn check_year(year: i32) -> Result<(), CalendarError> {
        if !(METONIC_MIN_YEAR..=METONIC_MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidField(format!(
                "year {year} outside supported era {METONIC_MIN_YEAR}..={METONIC_MAX_YEAR}"
            )));
        }
        Ok(())
    }

    /// Year class of `year`, derived from the day distance to the next
    /// new year.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] outside the supported era.
    pub fn year_type(year: i32) -> Result<YearType, CalendarError> {
        Self::check_year(year)?;
        Ok(year_type_of(year))
    }

    /// First day (Tishri 1) of `year`.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] outside the supported era.
    pub fn new_year(year: i32) -> Result<EpochDay, CalendarError> {
        Self::check_year(year)?;
        Ok(new_year_epoch(year))
    }

    /// Length of `year` in days, one of 353, 354, 355, 383, 384 or 385.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] outside the supported era.
    pub fn days_in_year(year: i32) -> Result<i64, CalendarError> {
        Self::check_year(year)?;
        Ok(year_length(year))
    }

    /// Length (29 or 30) of a month instance.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] outside the supported era
    /// or for Adar I in a common year.
    pub fn days_in_month(year: i32, month: HebrewMonth) -> Result<u8, CalendarError> {
        Self::check_year(year)?;
        if month == HebrewMonth::AdarI && !Self::is_leap_year(year) {
            return Err(CalendarError::InvalidField(format!(
                "Adar I does not exist in common year {year}"
            )));
        }
        Ok(month_length(year_type_of(year), month))
    }

    /// Creates a date from its field values.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when the year lies outside
    /// the supported era, when Adar I is requested in a common year, or
    /// when the day exceeds the month's length in that specific year.
    /// Nothing is silently clamped.
    pub fn of(
        &self,
        year: i32,
        month: HebrewMonth,
        day: u8,
    ) -> Result<HebrewDate, CalendarError> {
        let len = Self::days_in_month(year, month)?;
        if !(1..=len).contains(&day) {
            return Err(CalendarError::InvalidField(format!(
                "day {day} out of range 1..={len} for {month} of year {year}"
            )));
        }
        let leap = Self::is_leap_year(year);
        let year_type = year_type_of(year);
        let mut epoch = new_year_epoch(year);
        for &m in sequence(leap) {
            if m == month {
                break;
            }
            epoch = epoch + i64::from(month_length(year_type, m));
        }
        Ok(HebrewDate {
            year,
            month,
            day,
            epoch_day: epoch + i64::from(day) - 1,
        })
    }

    /// Whether the field combination denotes an existing date.
    pub fn is_valid(&self, year: i32, month: HebrewMonth, day: u8) -> bool {
        self.of(year, month, day).is_ok()
    }

    /// Replaces the month, keeping year and day-of-month.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when the combination is
    /// impossible: Adar I in a common year, or a day-of-month beyond the
    /// target month's length. This is hard construction-time validation,
    /// never a deferred computation.
    pub fn with_month(
        &self,
        date: &HebrewDate,
        month: HebrewMonth,
    ) -> Result<HebrewDate, CalendarError> {
        self.of(date.year, month, date.day)
    }

    /// Day of the year of `date`, 1-based.
    pub fn day_of_year(&self, date: &HebrewDate) -> i64 {
        date.epoch_day - new_year_epoch(date.year) + 1
    }
}

impl CalendarSystem for HebrewCalendar {
    type Date = HebrewDate;

    fn transform(&self, epoch_day: EpochDay) -> Result<HebrewDate, CalendarError> {
        self.check_range(epoch_day)?;
        // mean-year approximation, then correct by at most a few steps
        let era_days = epoch_day.value() + ERA_TO_EPOCH;
        let mut year = i32::try_from((era_days * 98_496).div_euclid(35_975_351) + 1)
            .map_err(|_| CalendarError::Range {
                value: epoch_day.value(),
                min: self.min_epoch_day().value(),
                max: self.max_epoch_day().value(),
            })?;
        while new_year_epoch(year) > epoch_day {
            year -= 1;
        }
        while new_year_epoch(year + 1) <= epoch_day {
            year += 1;
        }

        let leap = Self::is_leap_year(year);
        let year_type = year_type_of(year);
        let mut remaining = epoch_day - new_year_epoch(year);
        for &month in sequence(leap) {
            let len = i64::from(month_length(year_type, month));
            if remaining < len {
                return Ok(HebrewDate {
                    year,
                    month,
                    day: (remaining + 1) as u8,
                    epoch_day,
                });
            }
            remaining -= len;
        }
        unreachable!("epoch day {epoch_day} beyond the months of year {year}")
    }

    fn to_epoch_day(&self, date: &HebrewDate) -> EpochDay {
        date.epoch_day
    }

    fn min_epoch_day(&self) -> EpochDay {
        new_year_epoch(METONIC_MIN_YEAR)
    }

    fn max_epoch_day(&self) -> EpochDay {
        new_year_epoch(METONIC_MAX_YEAR + 1) - 1i64
    }

    fn minimum(&self) -> HebrewDate {
        HebrewDate {
            year: METONIC_MIN_YEAR,
            month: HebrewMonth::Tishri,
            day: 1,
            epoch_day: self.min_epoch_day(),
        }
    }

    fn maximum(&self) -> HebrewDate {
        HebrewDate {
            year: METONIC_MAX_YEAR,
            month: HebrewMonth::Elul,
            day: 29,
            epoch_day: self.max_epoch_day(),
        }
    }
}

impl FieldAccess for HebrewCalendar {
    fn field_value(&self, date: &HebrewDate, field: DateField) -> Result<i64, CalendarError> {
        Ok(match field {
            DateField::YearOfEra => i64::from(date.year),
            DateField::MonthOrdinal => {
                i64::from(date.month.civil_value(Self::is_leap_year(date.year)))
            }
            DateField::LeapMonth => i64::from(date.month == HebrewMonth::AdarI),
            DateField::DayOfMonth => i64::from(date.day),
            DateField::DayOfYear => self.day_of_year(date),
        })
    }

    fn field_minimum(&self, _date: &HebrewDate, field: DateField) -> Result<i64, CalendarError> {
        Ok(match field {
            DateField::YearOfEra => i64::from(METONIC_MIN_YEAR),
            DateField::LeapMonth => 0,
            DateField::MonthOrdinal | DateField::DayOfMonth | DateField::DayOfYear => 1,
        })
    }

    fn field_maximum(&self, date: &HebrewDate, field: DateField) -> Result<i64, CalendarError> {
        match field {
            DateField::YearOfEra => Ok(i64::from(METONIC_MAX_YEAR)),
            DateField::MonthOrdinal => {
                Ok(if Self::is_leap_year(date.year) { 13 } else { 12 })
            }
            DateField::LeapMonth => Ok(i64::from(date.month == HebrewMonth::AdarI)),
            DateField::DayOfMonth => Self::days_in_month(date.year, date.month).map(i64::from),
            DateField::DayOfYear => Self::days_in_year(date.year),
        }
    }
}
