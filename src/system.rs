//! The calendar-system contract: bidirectional mapping between date values
//! and the epoch-day axis within a declared closed interval.

use crate::epoch::EpochDay;
use crate::error::CalendarError;

/// Bidirectional, total mapping between a calendar's date values and the
/// epoch-day axis.
///
/// Implementations are pure functions over immutable inputs. Every date
/// value produced by a validated factory maps to exactly one epoch day
/// within the declared domain `[min_epoch_day, max_epoch_day]`, and vice
/// versa.
pub trait CalendarSystem {
    /// The immutable date value produced by this system.
    type Date: Copy + Eq + Ord;

    /// Converts an epoch day into a date value.
    ///
    /// # Errors
    /// Returns [`CalendarError::Range`] when `epoch_day` lies outside the
    /// declared domain. This holds for every representable `i64`,
    /// including `i64::MIN` and `i64::MAX`.
    fn transform(&self, epoch_day: EpochDay) -> Result<Self::Date, CalendarError>;

    /// Converts a date value back onto the epoch-day axis.
    ///
    /// Total for any value produced by a validated factory; never fails.
    fn to_epoch_day(&self, date: &Self::Date) -> EpochDay;

    /// Smallest supported epoch day.
    fn min_epoch_day(&self) -> EpochDay;

    /// Largest supported epoch day.
    fn max_epoch_day(&self) -> EpochDay;

    /// The date value at the lower domain bound.
    fn minimum(&self) -> Self::Date;

    /// The date value at the upper domain bound.
    fn maximum(&self) -> Self::Date;

    /// Checks an epoch day against the declared domain.
    ///
    /// # Errors
    /// Returns [`CalendarError::Range`] outside the domain.
    fn check_range(&self, epoch_day: EpochDay) -> Result<(), CalendarError> {
        let min = self.min_epoch_day();
        let max = self.max_epoch_day();
        if !(min..=max).contains(&epoch_day) {
            return Err(CalendarError::Range {
                value: epoch_day.value(),
                min: min.value(),
                max: max.value(),
            });
        }
        Ok(())
    }
}

/// Named fields exposed to the formatting layer.
///
/// The formatting layer reads and writes dates purely through these
/// fields, never through a calendar's internal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// Year of the calendar's era.
    YearOfEra,
    /// Ordinal position of the month within its year (a leap month counts
    /// as its own step).
    MonthOrdinal,
    /// Leap-month flag, reported as 0 or 1.
    LeapMonth,
    /// Day within the month instance.
    DayOfMonth,
    /// Day within the year.
    DayOfYear,
}

/// Read-only field access for the formatting layer.
///
/// Every value needed externally (minima, maxima, computed classes) is
/// reachable through these accessors; no introspection of internals is
/// ever required.
pub trait FieldAccess: CalendarSystem {
    /// Current value of `field` on `date`.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this calendar instance.
    fn field_value(&self, date: &Self::Date, field: DateField) -> Result<i64, CalendarError>;

    /// Smallest valid value of `field` in the context of `date`.
    ///
    /// # Errors
    /// Fails when `date` does not belong to this calendar instance.
    fn field_minimum(&self, date: &Self::Date, field: DateField) -> Result<i64, CalendarError>;

    /// Largest valid value of `field` in the context of `date`, taking the
    /// concrete month/year instance into account (e.g. 29 vs 30 days, or a
    /// leap flag that is only legal on the designated leap month).
    ///
    /// # Errors
    /// Fails when `date` does not belong to this calendar instance.
    fn field_maximum(&self, date: &Self::Date, field: DateField) -> Result<i64, CalendarError>;

    /// Whether `value` is a legal value of `field` in the context of
    /// `date`.
    fn is_field_valid(&self, date: &Self::Date, field: DateField, value: i64) -> bool {
        match (
            self.field_minimum(date, field),
            self.field_maximum(date, field),
        ) {
            (Ok(min), Ok(max)) => (min..=max).contains(&value),
            _ => false,
        }
    }
}
