//! Shared helpers for unit tests.

use crate::epoch::EpochDay;
use crate::lunisolar::{EventTable, LunisolarCalendar};

pub(crate) fn greg(y: i32, m: i32, d: i32) -> EpochDay {
    EpochDay::from_gregorian(y, m, d)
}

/// Builds a synthetic oracle from per-sui month lengths.
///
/// Each entry describes one astronomical year starting at month 11:
/// the lunation lengths in order and the index of the leap month, if
/// any. One major term is placed in every ordinary month (the winter
/// solstice for month 11, otherwise the month's first day, pushed to
/// Jan 1 when that day would interfere with the solstice search window
/// at the end of December); leap months stay term-free.
pub(crate) fn fixture_oracle(
    first_sui_year: i32,
    first_m11_offset: i64,
    suis: &[(&[i64], Option<usize>)],
) -> EventTable {
    let mut builder = EventTable::builder();
    let mut start = greg(first_sui_year - 1, 12, 21) - first_m11_offset;
    for (j, (lengths, leap_index)) in suis.iter().enumerate() {
        let anchor = first_sui_year + j as i32 - 1;
        let solstice = greg(anchor, 12, 21);
        assert!(
            start <= solstice && solstice < start + lengths[0],
            "winter solstice of {anchor} not inside month 11"
        );
        let mut s = start;
        for (i, &len) in lengths.iter().enumerate() {
            builder = builder.new_moon(s);
            if Some(i) == *leap_index {
                // leap month: no major term
            } else if i == 0 {
                builder = builder.solar_event(solstice, true);
            } else {
                let (y, m, d) = s.to_gregorian();
                let major = if m == 12 && d > 21 { greg(y + 1, 1, 1) } else { s };
                assert!(major >= s && major < s + len, "major term outside its month");
                builder = builder.solar_event(major, true);
            }
            s = s + len;
        }
        start = s;
    }
    // end marker of the final sui, and the solstice closing it
    builder = builder.new_moon(start);
    let last_anchor = first_sui_year + suis.len() as i32 - 1;
    builder = builder.solar_event(greg(last_anchor, 12, 21), true);
    builder.build().unwrap()
}

/// Standard lunisolar fixture: civil years 2000..=2008 with leap month 6
/// in 2002 and 2008 (29-day ordinary sixth month, 30-day leap month) and
/// leap month 2 in 2005 (30-day ordinary sixth month).
pub(crate) fn fixture_calendar() -> LunisolarCalendar {
    const A: &[i64] = &[30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 30];
    const B: &[i64] = &[30, 30, 30, 29, 30, 30, 30, 29, 30, 30, 30, 30];
    const L: &[i64] = &[30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 29];
    let suis: [(&[i64], Option<usize>); 10] = [
        (A, None),
        (B, None),
        (L, Some(8)),
        (A, None),
        (B, None),
        (L, Some(4)),
        (A, None),
        (B, None),
        (L, Some(8)),
        (A, None),
    ];
    let table = fixture_oracle(2000, 10, &suis);
    LunisolarCalendar::new("fixture", &table, 2000..=2008).unwrap()
}
