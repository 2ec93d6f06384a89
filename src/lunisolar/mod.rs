//! Lunisolar calendar: twelve or thirteen synodic months per year, with
//! leap-month placement driven by an injected astronomical event oracle.
//!
//! A calendar instance is built once from pre-computed new-moon and
//! solar-term dates (see [`oracle`]) and is immutable afterwards. All
//! arithmetic works on the epoch-day axis, so stepping and comparison
//! remain correct where leap months break simple numeric successorship.
//!
//! # Example
//!
//! ```
//! use calendrium::EpochDay;
//! use calendrium::lunisolar::{EventTable, LunisolarCalendar, Month};
//!
//! // Synthetic oracle: two astronomical years of alternating 30/29-day
//! // lunations, one major term per ordinary month.
//! let mut builder = EventTable::builder();
//! let mut start = EpochDay::from_gregorian(1999, 12, 11);
//! for year in [2000, 2001] {
//!     builder = builder.solar_event(EpochDay::from_gregorian(year - 1, 12, 21), true);
//!     for (i, len) in [30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 30]
//!         .into_iter()
//!         .enumerate()
//!     {
//!         builder = builder.new_moon(start);
//!         if i > 0 {
//!             builder = builder.solar_event(start + 2, true);
//!         }
//!         start = start + len;
//!     }
//! }
//! let oracle = builder
//!     .new_moon(start)
//!     .solar_event(EpochDay::from_gregorian(2001, 12, 21), true)
//!     .build()
//!     .unwrap();
//!
//! let calendar = LunisolarCalendar::new("demo", &oracle, 2000..=2000).unwrap();
//! let new_year = calendar.of(2000, Month::Ordinary(1), 1).unwrap();
//! assert_eq!(EpochDay::from_gregorian(2000, 2, 8), new_year.epoch_day());
//! ```

pub mod oracle;
mod year;

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use crate::consts::DAYS_PER_WEEK;
use crate::epoch::EpochDay;
use crate::error::CalendarError;
use crate::prelude::*;
use crate::system::{CalendarSystem, DateField, FieldAccess};

pub use oracle::{EventSource, EventTable, EventTableBuilder, SolarEvent};

use year::YearTable;

/// Month designation within a lunisolar year.
///
/// A leap month repeats the number of its predecessor and sorts
/// immediately after it, so a month value is only meaningfully ordered
/// within a year once its leap status is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Month {
    /// A regular month, numbered 1 to 12.
    #[display(fmt = "{:02}", _0)]
    Ordinary(u8),
    /// The intercalary month following the ordinary month of the same
    /// number.
    #[display(fmt = "{:02}L", _0)]
    Leap(u8),
}

impl Month {
    /// The month number, regardless of leap status.
    pub const fn number(self) -> u8 {
        match self {
            Self::Ordinary(n) | Self::Leap(n) => n,
        }
    }

    /// Whether this is a leap month.
    pub const fn is_leap(self) -> bool {
        matches!(self, Self::Leap(_))
    }
}

/// Units of lunisolar date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Year-of-era steps keeping month number and, where possible, the
    /// leap flag.
    Years,
    /// Ordinal-month steps; a leap month counts as one step.
    Months,
    /// Seven-day steps on the epoch-day axis.
    Weeks,
    /// Single-day steps on the epoch-day axis.
    Days,
}

/// An immutable lunisolar calendar date.
///
/// Values are created only through [`LunisolarCalendar::of`] or by
/// transformation from an epoch day; equality and ordering follow the
/// epoch day the value maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:04}-{}-{:02}", year, month, day)]
pub struct LunisolarDate {
    year: i32,
    month: Month,
    day: u8,
    epoch_day: EpochDay,
}

impl LunisolarDate {
    /// Year of the era.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month designation.
    pub const fn month(&self) -> Month {
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
}

impl PartialOrd for LunisolarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LunisolarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_day.cmp(&other.epoch_day)
    }
}

/// One rule-set variant of the lunisolar calendar kind.
///
/// Construction eagerly derives the month layout of every supported civil
/// year from the oracle, so later operations are pure lookups over
/// immutable data and the instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct LunisolarCalendar {
    variant: String,
    first_year: i32,
    years: Vec<YearTable>,
}

impl LunisolarCalendar {
    /// Builds the variant `variant` for the civil years `years` from the
    /// given oracle.
    ///
    /// # Errors
    /// Returns [`CalendarError::Configuration`] when the year range is
    /// empty, when oracle data is missing for any required span, or when
    /// the events do not describe a well-formed lunisolar year (wrong
    /// lunation count, impossible month length, no term-free lunation for
    /// a required leap month).
    pub fn new(
        variant: impl Into<String>,
        oracle: &dyn EventSource,
        years: RangeInclusive<i32>,
    ) -> Result<Self, CalendarError> {
        let (first, last) = (*years.start(), *years.end());
        if first > last {
            return Err(CalendarError::Configuration(format!(
                "empty year range {first}..={last}"
            )));
        }
        Ok(Self {
            variant: variant.into(),
            first_year: first,
            years: year::build_years(oracle, first, last)?,
        })
    }

    /// The variant key of this instance.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// First supported civil year.
    pub const fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last supported civil year.
    pub fn last_year(&self) -> i32 {
        self.first_year + self.years.len() as i32 - 1
    }

    fn table(&self, year: i32) -> Result<&YearTable, CalendarError> {
        if !(self.first_year..=self.last_year()).contains(&year) {
            return Err(CalendarError::InvalidField(format!(
                "year {year} outside supported years {}..={} of variant {}",
                self.first_year,
                self.last_year(),
                self.variant
            )));
        }
        Ok(&self.years[(year - self.first_year) as usize])
    }

    fn foreign_date(&self, date: &LunisolarDate) -> CalendarError {
        CalendarError::InvalidField(format!(
            "date {date} does not belong to variant {}",
            self.variant
        ))
    }

    fn position(&self, date: &LunisolarDate) -> Result<(&YearTable, usize), CalendarError> {
        let table = self.table(date.year)?;
        let idx = table
            .index_of(date.month)
            .ok_or_else(|| self.foreign_date(date))?;
        Ok((table, idx))
    }

    fn at(&self, year: i32, table: &YearTable, idx: usize, day: u8) -> LunisolarDate {
        LunisolarDate {
            year,
            month: table.months[idx].month,
            day,
            epoch_day: table.month_start(idx) + i64::from(day) - 1,
        }
    }

    /// Creates a date from its field values.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when `year` has no event
    /// data, when `month` names a leap month that does not exist in
    /// `year`, or when `day` exceeds the length of that specific month
    /// instance (month lengths are 29 or 30 and only known from the
    /// surrounding new-moon pair). Nothing is silently clamped.
    pub fn of(&self, year: i32, month: Month, day: u8) -> Result<LunisolarDate, CalendarError> {
        let table = self.table(year)?;
        let idx = table.index_of(month).ok_or_else(|| {
            CalendarError::InvalidField(format!("month {month} does not exist in year {year}"))
        })?;
        let len = table.month_len(idx);
        if !(1..=len).contains(&day) {
            return Err(CalendarError::InvalidField(format!(
                "day {day} out of range 1..={len} for month {month} of year {year}"
            )));
        }
        Ok(self.at(year, table, idx, day))
    }

    /// Whether the field combination denotes an existing date.
    pub fn is_valid(&self, year: i32, month: Month, day: u8) -> bool {
        self.of(year, month, day).is_ok()
    }

    /// First day (month 1, day 1) of a civil year.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] for a year without data.
    pub fn new_year(&self, year: i32) -> Result<EpochDay, CalendarError> {
        Ok(self.table(year)?.new_year())
    }

    /// Number of months (12 or 13) in a civil year.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] for a year without data.
    pub fn months_in_year(&self, year: i32) -> Result<usize, CalendarError> {
        Ok(self.table(year)?.months_in_year())
    }

    /// Number of the leap month of `year`, if it has one.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] for a year without data.
    pub fn leap_month_of(&self, year: i32) -> Result<Option<u8>, CalendarError> {
        Ok(self.table(year)?.leap_month())
    }

    /// Length in days of a civil year.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] for a year without data.
    pub fn days_in_year(&self, year: i32) -> Result<i64, CalendarError> {
        Ok(self.table(year)?.days_in_year())
    }

    /// Length in days (29 or 30) of one month instance.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when the month does not
    /// exist in `year`.
    pub fn days_in_month(&self, year: i32, month: Month) -> Result<u8, CalendarError> {
        let table = self.table(year)?;
        let idx = table.index_of(month).ok_or_else(|| {
            CalendarError::InvalidField(format!("month {month} does not exist in year {year}"))
        })?;
        Ok(table.month_len(idx))
    }

    /// Day of the year of `date`, 1-based.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this variant.
    pub fn day_of_year(&self, date: &LunisolarDate) -> Result<i64, CalendarError> {
        let (table, _) = self.position(date)?;
        Ok(date.epoch_day - table.new_year() + 1)
    }

    /// Adds `amount` of `unit` to `date`.
    ///
    /// Year steps keep the month number, and the leap flag only if the
    /// target year designates the same month as leap; month steps advance
    /// ordinally across year boundaries with a leap month counting as one
    /// step. Both clamp the day-of-month to the target month's actual
    /// length and never roll into a different month. Week and day steps
    /// are pure epoch-day translation.
    ///
    /// # Errors
    /// Returns [`CalendarError::InvalidField`] when year or month
    /// arithmetic leaves the supported span, and [`CalendarError::Range`]
    /// when a day translation leaves the epoch-day domain.
    pub fn plus(
        &self,
        date: &LunisolarDate,
        amount: i64,
        unit: Unit,
    ) -> Result<LunisolarDate, CalendarError> {
        match unit {
            Unit::Years => self.plus_years(date, amount),
            Unit::Months => self.plus_months(date, amount),
            Unit::Weeks => self.shift_days(date, amount.saturating_mul(DAYS_PER_WEEK)),
            Unit::Days => self.shift_days(date, amount),
        }
    }

    fn shift_days(&self, date: &LunisolarDate, days: i64) -> Result<LunisolarDate, CalendarError> {
        let target = EpochDay::new(date.epoch_day.value().saturating_add(days));
        self.transform(target)
    }

    fn plus_years(&self, date: &LunisolarDate, amount: i64) -> Result<LunisolarDate, CalendarError> {
        let target = i64::from(date.year).saturating_add(amount);
        let year = i32::try_from(target).map_err(|_| {
            CalendarError::InvalidField(format!("year arithmetic overflow: {target}"))
        })?;
        let table = self.table(year)?;
        let month = match date.month {
            Month::Leap(n) if table.leap_month() == Some(n) => Month::Leap(n),
            m => Month::Ordinary(m.number()),
        };
        let idx = table
            .index_of(month)
            .ok_or_else(|| self.foreign_date(date))?;
        let day = date.day.min(table.month_len(idx));
        Ok(self.at(year, table, idx, day))
    }

    fn plus_months(&self, date: &LunisolarDate, amount: i64) -> Result<LunisolarDate, CalendarError> {
        let (_, idx) = self.position(date)?;
        let mut ordinal = idx as i64;
        for table in &self.years[..(date.year - self.first_year) as usize] {
            ordinal += table.months_in_year() as i64;
        }
        let target = ordinal.saturating_add(amount);
        if target < 0 {
            return Err(self.out_of_span());
        }
        let mut remaining = target;
        for (offset, table) in self.years.iter().enumerate() {
            let count = table.months_in_year() as i64;
            if remaining < count {
                let mi = remaining as usize;
                let day = date.day.min(table.month_len(mi));
                return Ok(self.at(self.first_year + offset as i32, table, mi, day));
            }
            remaining -= count;
        }
        Err(self.out_of_span())
    }

    fn out_of_span(&self) -> CalendarError {
        CalendarError::InvalidField(format!(
            "month arithmetic leaves supported years {}..={} of variant {}",
            self.first_year,
            self.last_year(),
            self.variant
        ))
    }

    /// First day of the month instance of `date`, leaving the coarser
    /// fields untouched.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this variant.
    pub fn first_day_of_month(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        let (table, idx) = self.position(date)?;
        Ok(self.at(date.year, table, idx, 1))
    }

    /// Last day of the month instance of `date`.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this variant.
    pub fn last_day_of_month(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        let (table, idx) = self.position(date)?;
        Ok(self.at(date.year, table, idx, table.month_len(idx)))
    }

    /// First day (month 1, day 1) of the year of `date`.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this variant.
    pub fn first_day_of_year(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        let table = self.table(date.year)?;
        Ok(self.at(date.year, table, 0, 1))
    }

    /// Last day (last month, last day) of the year of `date`.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this variant.
    pub fn last_day_of_year(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        let table = self.table(date.year)?;
        let idx = table.months_in_year() - 1;
        Ok(self.at(date.year, table, idx, table.month_len(idx)))
    }

    /// Steps to the same day of the next month instance, crossing from
    /// the last ordinary month into an existing leap month before
    /// advancing further, with the day clamped to the target length.
    ///
    /// # Errors
    /// Fails when the step leaves the supported span.
    pub fn next_month(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        self.plus_months(date, 1)
    }

    /// Steps to the same day of the previous month instance, with the day
    /// clamped to the target length.
    ///
    /// # Errors
    /// Fails when the step leaves the supported span.
    pub fn previous_month(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        self.plus_months(date, -1)
    }

    /// The next day on the epoch-day axis.
    ///
    /// # Errors
    /// Returns [`CalendarError::Range`] at the domain maximum.
    pub fn next_day(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        self.shift_days(date, 1)
    }

    /// The previous day on the epoch-day axis.
    ///
    /// # Errors
    /// Returns [`CalendarError::Range`] at the domain minimum.
    pub fn previous_day(&self, date: &LunisolarDate) -> Result<LunisolarDate, CalendarError> {
        self.shift_days(date, -1)
    }
}

impl CalendarSystem for LunisolarCalendar {
    type Date = LunisolarDate;

    fn transform(&self, epoch_day: EpochDay) -> Result<LunisolarDate, CalendarError> {
        self.check_range(epoch_day)?;
        let offset = self.years.partition_point(|t| t.new_year() <= epoch_day) - 1;
        let table = &self.years[offset];
        let idx = table.month_at(epoch_day);
        let day = (epoch_day - table.month_start(idx) + 1) as u8;
        Ok(self.at(self.first_year + offset as i32, table, idx, day))
    }

    fn to_epoch_day(&self, date: &LunisolarDate) -> EpochDay {
        date.epoch_day
    }

    fn min_epoch_day(&self) -> EpochDay {
        self.years[0].new_year()
    }

    fn max_epoch_day(&self) -> EpochDay {
        self.years[self.years.len() - 1].next_new_year - 1i64
    }

    fn minimum(&self) -> LunisolarDate {
        self.at(self.first_year, &self.years[0], 0, 1)
    }

    fn maximum(&self) -> LunisolarDate {
        let table = &self.years[self.years.len() - 1];
        let idx = table.months_in_year() - 1;
        self.at(self.last_year(), table, idx, table.month_len(idx))
    }
}

impl FieldAccess for LunisolarCalendar {
    fn field_value(&self, date: &LunisolarDate, field: DateField) -> Result<i64, CalendarError> {
        match field {
            DateField::YearOfEra => Ok(i64::from(date.year)),
            DateField::MonthOrdinal => {
                let (_, idx) = self.position(date)?;
                Ok(idx as i64 + 1)
            }
            DateField::LeapMonth => Ok(i64::from(date.month.is_leap())),
            DateField::DayOfMonth => Ok(i64::from(date.day)),
            DateField::DayOfYear => self.day_of_year(date),
        }
    }

    fn field_minimum(&self, _date: &LunisolarDate, field: DateField) -> Result<i64, CalendarError> {
        Ok(match field {
            DateField::YearOfEra => i64::from(self.first_year),
            DateField::LeapMonth => 0,
            DateField::MonthOrdinal | DateField::DayOfMonth | DateField::DayOfYear => 1,
        })
    }

    fn field_maximum(&self, date: &LunisolarDate, field: DateField) -> Result<i64, CalendarError> {
        match field {
            DateField::YearOfEra => Ok(i64::from(self.last_year())),
            DateField::MonthOrdinal => Ok(self.table(date.year)?.months_in_year() as i64),
            DateField::LeapMonth => {
                let table = self.table(date.year)?;
                Ok(i64::from(table.leap_month() == Some(date.month.number())))
            }
            DateField::DayOfMonth => {
                let (table, idx) = self.position(date)?;
                Ok(i64::from(table.month_len(idx)))
            }
            DateField::DayOfYear => Ok(self.table(date.year)?.days_in_year()),
        }
    }
}
