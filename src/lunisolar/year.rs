//! Month-layout construction from oracle events.
//!
//! An astronomical year runs from the month containing one winter
//! solstice (month 11) to the month before the next month 11. Layouts are
//! computed per astronomical year and then regrouped into civil years,
//! which begin with month 1.

use crate::consts::{
    MAX_MONTH_DAYS, MIN_MONTH_DAYS, MONTHS_PER_COMMON_YEAR, MONTHS_PER_LEAP_YEAR,
};
use crate::epoch::EpochDay;
use crate::error::CalendarError;

use super::Month;
use super::oracle::EventSource;

/// One month instance: its designation and first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthRecord {
    pub(crate) month: Month,
    pub(crate) start: EpochDay,
}

/// Month layout of one civil year.
#[derive(Debug, Clone)]
pub(crate) struct YearTable {
    /// Months in time order: 1..=10 with at most one leap month
    /// interspersed, closed by months 11 and 12 (and their possible
    /// leap counterparts).
    pub(crate) months: Vec<MonthRecord>,
    /// First day of the following civil year.
    pub(crate) next_new_year: EpochDay,
}

impl YearTable {
    /// First day of the year (month 1, day 1).
    pub(crate) fn new_year(&self) -> EpochDay {
        self.months[0].start
    }

    pub(crate) fn months_in_year(&self) -> usize {
        self.months.len()
    }

    pub(crate) fn month_start(&self, idx: usize) -> EpochDay {
        self.months[idx].start
    }

    /// Length in days of the month at `idx`, from the surrounding
    /// new-moon pair.
    pub(crate) fn month_len(&self, idx: usize) -> u8 {
        let end = self
            .months
            .get(idx + 1)
            .map_or(self.next_new_year, |m| m.start);
        (end - self.months[idx].start) as u8
    }

    /// Position of `month` within the year, if that designation exists.
    pub(crate) fn index_of(&self, month: Month) -> Option<usize> {
        self.months.iter().position(|m| m.month == month)
    }

    /// Number of the leap month, if the year has one.
    pub(crate) fn leap_month(&self) -> Option<u8> {
        self.months.iter().find_map(|m| match m.month {
            Month::Leap(n) => Some(n),
            Month::Ordinary(_) => None,
        })
    }

    /// Index of the month containing `day`. `day` must lie within the
    /// year.
    pub(crate) fn month_at(&self, day: EpochDay) -> usize {
        self.months.partition_point(|m| m.start <= day) - 1
    }

    pub(crate) fn days_in_year(&self) -> i64 {
        self.next_new_year - self.new_year()
    }
}

/// Winter solstice of Gregorian year `year`: the last major solar term on
/// or before Dec 31 of that year.
fn winter_solstice(oracle: &dyn EventSource, year: i32) -> Result<EpochDay, CalendarError> {
    let from = EpochDay::from_gregorian(year, 11, 20);
    let to = EpochDay::from_gregorian(year, 12, 31);
    oracle
        .solar_events_between(from, to)
        .iter()
        .rev()
        .find(|e| e.major)
        .map(|e| e.day)
        .ok_or_else(|| {
            CalendarError::Configuration(format!(
                "no major solar term on record near the end of year {year}"
            ))
        })
}

/// Builds the months of one astronomical year: month 11 (containing the
/// winter solstice of `year - 1`) through month 10. When thirteen
/// lunations separate consecutive month-11 starts, the leap month is
/// inserted at the first lunation that contains no major solar term.
pub(crate) fn build_sui(
    oracle: &dyn EventSource,
    year: i32,
) -> Result<Vec<MonthRecord>, CalendarError> {
    let ws = winter_solstice(oracle, year - 1)?;
    let ws_next = winter_solstice(oracle, year)?;

    let moons = oracle.new_moons_between(ws - MAX_MONTH_DAYS, ws_next);
    let m11 = moons
        .partition_point(|d| *d <= ws)
        .checked_sub(1)
        .ok_or_else(|| {
            CalendarError::Configuration(format!(
                "no new moon on record before the winter solstice of year {}",
                year - 1
            ))
        })?;
    let m11_next = moons.partition_point(|d| *d <= ws_next) - 1;

    let lunations = m11_next - m11;
    let leap = match lunations {
        MONTHS_PER_COMMON_YEAR => false,
        MONTHS_PER_LEAP_YEAR => true,
        n => {
            return Err(CalendarError::Configuration(format!(
                "{n} lunations between the winter solstices of {} and {year}",
                year - 1
            )));
        }
    };

    let majors: Vec<EpochDay> = oracle
        .solar_events_between(ws, ws_next)
        .into_iter()
        .filter(|e| e.major)
        .map(|e| e.day)
        .collect();

    let mut months = Vec::with_capacity(lunations);
    let mut number: u8 = 10;
    let mut pending_leap = leap;
    for pair in moons[m11..=m11_next].windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if !(MIN_MONTH_DAYS..=MAX_MONTH_DAYS).contains(&(end - start)) {
            return Err(CalendarError::Configuration(format!(
                "lunation of {} days in event data of year {year}",
                end - start
            )));
        }
        let term_free = !majors.iter().any(|t| (start..end).contains(t));
        if pending_leap && term_free {
            months.push(MonthRecord {
                month: Month::Leap(number),
                start,
            });
            pending_leap = false;
            continue;
        }
        number = number % 12 + 1;
        months.push(MonthRecord {
            month: Month::Ordinary(number),
            start,
        });
    }
    if pending_leap {
        return Err(CalendarError::Configuration(format!(
            "no term-free lunation for leap-month insertion in year {year}"
        )));
    }
    Ok(months)
}

/// Builds the civil-year tables for `first..=last` by regrouping the
/// astronomical years `first..=last + 1` at their month-1 boundaries.
pub(crate) fn build_years(
    oracle: &dyn EventSource,
    first: i32,
    last: i32,
) -> Result<Vec<YearTable>, CalendarError> {
    let mut all: Vec<MonthRecord> = Vec::new();
    for y in first..=last + 1 {
        all.extend(build_sui(oracle, y)?);
    }

    let starts: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, m)| m.month == Month::Ordinary(1))
        .map(|(i, _)| i)
        .collect();
    let expected = (last - first + 2) as usize;
    if starts.len() != expected {
        return Err(CalendarError::Configuration(format!(
            "expected {expected} first months across the event data, found {}",
            starts.len()
        )));
    }

    let mut years = Vec::with_capacity(expected - 1);
    for (k, pair) in starts.windows(2).enumerate() {
        let months = all[pair[0]..pair[1]].to_vec();
        if months.iter().filter(|m| m.month.is_leap()).count() > 1 {
            return Err(CalendarError::Configuration(format!(
                "more than one leap month in civil year {}",
                first + k as i32
            )));
        }
        years.push(YearTable {
            months,
            next_new_year: all[pair[1]].start,
        });
    }
    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunisolar::oracle::EventTable;

    fn greg(y: i32, m: i32, d: i32) -> EpochDay {
        EpochDay::from_gregorian(y, m, d)
    }

    /// Real month starts of the astronomical year 2017, which carried a
    /// leap sixth month. One major term is placed in every ordinary
    /// month, none in the leap month.
    fn year_2017_oracle() -> EventTable {
        let moons = [
            (2016, 11, 29),
            (2016, 12, 29),
            (2017, 1, 28),
            (2017, 2, 26),
            (2017, 3, 28),
            (2017, 4, 26),
            (2017, 5, 26),
            (2017, 6, 24),
            (2017, 7, 23), // leap month, no major term
            (2017, 8, 22),
            (2017, 9, 20),
            (2017, 10, 20),
            (2017, 11, 18),
            (2017, 12, 18),
        ];
        let majors = [
            (2016, 12, 21), // winter solstice opening the year
            (2017, 1, 1),
            (2017, 1, 28),
            (2017, 2, 26),
            (2017, 3, 28),
            (2017, 4, 26),
            (2017, 5, 26),
            (2017, 6, 24),
            (2017, 8, 22),
            (2017, 9, 20),
            (2017, 10, 20),
            (2017, 11, 18),
            (2017, 12, 22), // winter solstice closing the year
        ];
        let mut builder = EventTable::builder();
        for (y, m, d) in moons {
            builder = builder.new_moon(greg(y, m, d));
        }
        for (y, m, d) in majors {
            builder = builder.solar_event(greg(y, m, d), true);
        }
        builder.build().unwrap()
    }

    #[test]
    fn leap_month_placed_at_term_free_lunation() {
        let oracle = year_2017_oracle();
        let months = build_sui(&oracle, 2017).unwrap();

        let expected = [
            (Month::Ordinary(11), (2016, 11, 29)),
            (Month::Ordinary(12), (2016, 12, 29)),
            (Month::Ordinary(1), (2017, 1, 28)),
            (Month::Ordinary(2), (2017, 2, 26)),
            (Month::Ordinary(3), (2017, 3, 28)),
            (Month::Ordinary(4), (2017, 4, 26)),
            (Month::Ordinary(5), (2017, 5, 26)),
            (Month::Ordinary(6), (2017, 6, 24)),
            (Month::Leap(6), (2017, 7, 23)),
            (Month::Ordinary(7), (2017, 8, 22)),
            (Month::Ordinary(8), (2017, 9, 20)),
            (Month::Ordinary(9), (2017, 10, 20)),
            (Month::Ordinary(10), (2017, 11, 18)),
        ];
        assert_eq!(expected.len(), months.len());
        for ((month, (y, m, d)), record) in expected.iter().zip(&months) {
            assert_eq!(*month, record.month);
            assert_eq!(greg(*y, *m, *d), record.start);
        }
    }

    #[test]
    fn missing_solstice_data_is_a_configuration_error() {
        let oracle = EventTable::builder().build().unwrap();
        assert!(matches!(
            build_sui(&oracle, 2017),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn missing_new_moons_are_a_configuration_error() {
        let mut builder = EventTable::builder();
        builder = builder.solar_event(greg(2016, 12, 21), true);
        builder = builder.solar_event(greg(2017, 12, 22), true);
        let oracle = builder.build().unwrap();
        assert!(matches!(
            build_sui(&oracle, 2017),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn wrong_lunation_count_is_a_configuration_error() {
        // Only eleven months of data between the solstices.
        let mut builder = EventTable::builder()
            .solar_event(greg(2016, 12, 21), true)
            .solar_event(greg(2017, 12, 22), true);
        let mut day = greg(2016, 11, 29);
        for _ in 0..11 {
            builder = builder.new_moon(day);
            day = day + 30;
        }
        let oracle = builder.build().unwrap();
        assert!(matches!(
            build_sui(&oracle, 2017),
            Err(CalendarError::Configuration(_))
        ));
    }
}
