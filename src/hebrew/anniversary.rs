//! Anniversary projection: recurring dates (birthdays, death
//! anniversaries) carried into other years under the calendar's own
//! substitution rules.
//!
//! The fallbacks below are documented substitutions, not errors; they are
//! the only internally-absorbed conditions in the crate.

use crate::error::CalendarError;

use super::{HebrewCalendar, HebrewDate, HebrewMonth};

/// Projects a fixed origin date into other years.
///
/// The origin is the only state; every projection is a pure function of
/// it and the target year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anniversary {
    origin: HebrewDate,
}

impl Anniversary {
    /// Closes over an origin date.
    pub const fn new(origin: HebrewDate) -> Self {
        Self { origin }
    }

    /// The origin date.
    pub const fn origin(&self) -> HebrewDate {
        self.origin
    }

    /// The birthday in `year`.
    ///
    /// Same month and day when possible. A birth in Adar I projects onto
    /// Adar II in common target years, and a day past the target month's
    /// end moves to the first day of the immediately following month: the
    /// overflow boundary is the month edge, not the field maximum.
    ///
    /// # Errors
    /// Fails only when `year` leaves the supported era.
    pub fn birthday_in_year(&self, year: i32) -> Result<HebrewDate, CalendarError> {
        let cal = HebrewCalendar;
        let leap = HebrewCalendar::is_leap_year(year);
        let month = if self.origin.month() == HebrewMonth::AdarI && !leap {
            HebrewMonth::AdarII
        } else {
            self.origin.month()
        };
        let len = HebrewCalendar::days_in_month(year, month)?;
        if self.origin.day() <= len {
            return cal.of(year, month, self.origin.day());
        }
        let next = month.successor(leap).ok_or_else(|| {
            CalendarError::InvalidField(format!("no month follows {month} in year {year}"))
        })?;
        cal.of(year, next, 1)
    }

    /// The death anniversary in `year`.
    ///
    /// Applied in order:
    ///
    /// 1. a missing 30th of a variable month is replaced by the last
    ///    valid day of that month;
    /// 2. except that a death on the 30th of Heshvan or Kislev whose
    ///    month is full in the year after the death binds the observance
    ///    to the day after the 29th, so deficient target years move it to
    ///    the first day of the following month instead of clamping;
    /// 3. a death in Adar I projects onto Adar II in common target years
    ///    for days 1 to 29, and onto Shevat 30 for day 30. The latter
    ///    deviates from at least one external reference calculator and is
    ///    kept deliberately.
    ///
    /// # Errors
    /// Fails only when `year` leaves the supported era.
    pub fn death_day_in_year(&self, year: i32) -> Result<HebrewDate, CalendarError> {
        let cal = HebrewCalendar;
        let origin = self.origin;
        let day = origin.day();
        match origin.month() {
            month @ (HebrewMonth::Heshvan | HebrewMonth::Kislev) if day == 30 => {
                let full_after_death =
                    HebrewCalendar::days_in_month(origin.year() + 1, month)? == 30;
                let target_len = HebrewCalendar::days_in_month(year, month)?;
                if full_after_death && target_len == 29 {
                    let next = month
                        .successor(HebrewCalendar::is_leap_year(year))
                        .ok_or_else(|| {
                            CalendarError::InvalidField(format!(
                                "no month follows {month} in year {year}"
                            ))
                        })?;
                    cal.of(year, next, 1)
                } else {
                    cal.of(year, month, day.min(target_len))
                }
            }
            HebrewMonth::AdarI => {
                if HebrewCalendar::is_leap_year(year) {
                    cal.of(year, HebrewMonth::AdarI, day)
                } else if day == 30 {
                    cal.of(year, HebrewMonth::Shevat, 30)
                } else {
                    cal.of(year, HebrewMonth::AdarII, day)
                }
            }
            month => {
                let len = HebrewCalendar::days_in_month(year, month)?;
                cal.of(year, month, day.min(len))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HebrewMonth::*;

    fn date(year: i32, month: HebrewMonth, day: u8) -> HebrewDate {
        HebrewCalendar.of(year, month, day).unwrap()
    }

    #[test]
    fn yahrzeit_heshvan_30_short_first_year_clamps() {
        // Heshvan is short in 5777, the year after the death, so the
        // observance clamps within Heshvan forever after.
        let death = date(5776, Heshvan, 30);
        assert!(!HebrewCalendar.is_valid(5777, Heshvan, 30));
        let anniversary = death.anniversary();
        for (year, day) in [
            (5778, 29),
            (5779, 30),
            (5780, 30),
            (5781, 29),
            (5782, 29),
            (5783, 30),
            (5784, 29),
            (5785, 30),
            (5786, 29),
            (5787, 30),
        ] {
            assert_eq!(
                date(year, Heshvan, day),
                anniversary.death_day_in_year(year).unwrap(),
                "year {year}"
            );
        }
    }

    #[test]
    fn yahrzeit_heshvan_30_full_first_year_moves_to_month_edge() {
        // Heshvan is full in 5780, the year after this death, so a
        // deficient target year pushes the observance to 1 Kislev.
        let death = date(5779, Heshvan, 30);
        assert_eq!(
            date(5781, Kislev, 1),
            death.anniversary().death_day_in_year(5781).unwrap()
        );
    }

    #[test]
    fn yahrzeit_kislev_30_short_first_year_clamps() {
        let death = date(5776, Kislev, 30);
        let anniversary = death.anniversary();
        for (year, day) in [
            (5778, 30),
            (5779, 30),
            (5780, 30),
            (5781, 29),
            (5782, 30),
            (5783, 30),
            (5784, 29),
            (5785, 30),
            (5786, 30),
            (5787, 30),
        ] {
            assert_eq!(
                date(year, Kislev, day),
                anniversary.death_day_in_year(year).unwrap(),
                "year {year}"
            );
        }
    }

    #[test]
    fn yahrzeit_kislev_30_full_first_year_moves_to_month_edge() {
        let death = date(5779, Kislev, 30);
        assert_eq!(
            date(5781, Tevet, 1),
            death.anniversary().death_day_in_year(5781).unwrap()
        );
    }

    #[test]
    fn yahrzeit_adar_ii_is_stable_across_leapness() {
        let death = date(5776, AdarII, 15);
        let anniversary = death.anniversary();
        assert!(!HebrewCalendar::is_leap_year(5777));
        assert_eq!(
            date(5777, AdarII, 15),
            anniversary.death_day_in_year(5777).unwrap()
        );
        assert!(HebrewCalendar::is_leap_year(5787));
        assert_eq!(
            date(5787, AdarII, 15),
            anniversary.death_day_in_year(5787).unwrap()
        );
    }

    #[test]
    fn yahrzeit_adar_i_30_in_common_year_lands_on_shevat_30() {
        let death = date(5776, AdarI, 30);
        let anniversary = death.anniversary();
        // deliberate deviation from an external reference calculator
        assert_eq!(
            date(5777, Shevat, 30),
            anniversary.death_day_in_year(5777).unwrap()
        );
        assert_eq!(
            date(5787, AdarI, 30),
            anniversary.death_day_in_year(5787).unwrap()
        );
    }

    #[test]
    fn yahrzeit_adar_i_small_day_substitutes_adar_ii() {
        let death = date(5776, AdarI, 12);
        assert_eq!(
            date(5777, AdarII, 12),
            death.anniversary().death_day_in_year(5777).unwrap()
        );
    }

    #[test]
    fn yahrzeit_of_fixed_month_is_exact() {
        let death = date(5776, Elul, 29);
        assert_eq!(
            date(5777, Elul, 29),
            death.anniversary().death_day_in_year(5777).unwrap()
        );
    }

    #[test]
    fn birthday_identity_when_the_day_exists() {
        let birth = date(5777, Tevet, 4);
        let anniversary = birth.anniversary();
        for year in 5778..5798 {
            assert_eq!(
                date(year, Tevet, 4),
                anniversary.birthday_in_year(year).unwrap(),
                "year {year}"
            );
        }
    }

    #[test]
    fn birthday_overflows_past_the_month_edge() {
        // Adar I 30 in a common year: Adar II has 29 days, so the
        // birthday falls on 1 Nisan, not 29 Adar II.
        let birth = date(5776, AdarI, 30);
        assert!(!HebrewCalendar::is_leap_year(5789));
        assert_eq!(
            date(5789, Nisan, 1),
            birth.anniversary().birthday_in_year(5789).unwrap()
        );

        // Heshvan 30 against a deficient year overflows to 1 Kislev.
        let birth = date(5779, Heshvan, 30);
        assert_eq!(
            date(5781, Kislev, 1),
            birth.anniversary().birthday_in_year(5781).unwrap()
        );
    }

    #[test]
    fn bar_and_bat_mitzvah() {
        let birth = date(5776, AdarI, 30);
        assert_eq!(date(5789, Nisan, 1), birth.bar_mitzvah().unwrap());

        let birth = date(5776, AdarII, 29);
        assert_eq!(date(5788, AdarII, 29), birth.bat_mitzvah().unwrap());

        let birth = date(5777, Tevet, 4);
        assert_eq!(date(5790, Tevet, 4), birth.bar_mitzvah().unwrap());
    }
}
