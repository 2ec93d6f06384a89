//! Sequencing operations over one resolved calendar system.

use std::cmp::Ordering;

use crate::system::CalendarSystem;

/// Successor/predecessor stepping, comparison and bounds queries over the
/// date values of one calendar system.
///
/// Stepping works on the epoch-day axis, so it is correct even where the
/// calendar's field tuples are not in natural tuple order (leap months).
#[derive(Debug, Clone, Copy)]
pub struct Timeline<'a, S> {
    system: &'a S,
}

impl<'a, S: CalendarSystem> Timeline<'a, S> {
    /// Adapts a resolved calendar system.
    pub const fn new(system: &'a S) -> Self {
        Self { system }
    }

    /// The date whose epoch day is exactly one greater, or `None` if
    /// `date` is already at the variant's maximum.
    pub fn step_forward(&self, date: &S::Date) -> Option<S::Date> {
        let day = self.system.to_epoch_day(date);
        if day >= self.system.max_epoch_day() {
            return None;
        }
        self.system.transform(day + 1).ok()
    }

    /// The date whose epoch day is exactly one smaller, or `None` at the
    /// variant's minimum.
    pub fn step_backwards(&self, date: &S::Date) -> Option<S::Date> {
        let day = self.system.to_epoch_day(date);
        if day <= self.system.min_epoch_day() {
            return None;
        }
        self.system.transform(day - 1i64).ok()
    }

    /// Total order consistent with epoch-day order.
    pub fn compare(&self, a: &S::Date, b: &S::Date) -> Ordering {
        self.system
            .to_epoch_day(a)
            .cmp(&self.system.to_epoch_day(b))
    }

    /// The date value at the lower domain bound.
    pub fn minimum(&self) -> S::Date {
        self.system.minimum()
    }

    /// The date value at the upper domain bound.
    pub fn maximum(&self) -> S::Date {
        self.system.maximum()
    }

    /// Always `true`: this timeline steps in calendar days, not in
    /// time-of-day units. Kept for interface uniformity with
    /// non-calendrical axes elsewhere.
    pub const fn is_calendrical(&self) -> bool {
        true
    }
}
