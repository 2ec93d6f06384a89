//! Astronomical event sources consumed by the lunisolar algorithm.
//!
//! The algorithm performs no astronomy of its own: new-moon and
//! solar-term instants are computed elsewhere and consumed here as plain
//! epoch-day values.

use crate::epoch::EpochDay;
use crate::error::CalendarError;

/// A solar-longitude event on the epoch-day axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarEvent {
    /// Day on which the event falls.
    pub day: EpochDay,
    /// Whether this is a major term (one of the twelve 30-degree
    /// longitude points that govern leap-month placement).
    pub major: bool,
}

/// Supplier of pre-computed new-moon and solar-term dates.
///
/// Both sequences must be gapless and strictly ascending within the
/// supplier's coverage; the calendar constructor validates the slice it
/// consumes and rejects malformed data with a configuration error.
///
/// Implementations are shared process-wide after construction, so they
/// must be immutable and thread-safe.
pub trait EventSource: Send + Sync {
    /// New-moon days within `[from, to]`, ascending.
    fn new_moons_between(&self, from: EpochDay, to: EpochDay) -> Vec<EpochDay>;

    /// Solar-term events within `[from, to]`, ascending.
    fn solar_events_between(&self, from: EpochDay, to: EpochDay) -> Vec<SolarEvent>;
}

/// In-memory event table, the immutable form in which production variants
/// hold their pre-computed astronomical data.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    new_moons: Vec<EpochDay>,
    solar_events: Vec<SolarEvent>,
}

impl EventTable {
    /// Starts building a table.
    pub fn builder() -> EventTableBuilder {
        EventTableBuilder {
            new_moons: Vec::new(),
            solar_events: Vec::new(),
        }
    }
}

impl EventSource for EventTable {
    fn new_moons_between(&self, from: EpochDay, to: EpochDay) -> Vec<EpochDay> {
        let lo = self.new_moons.partition_point(|d| *d < from);
        let hi = self.new_moons.partition_point(|d| *d <= to);
        self.new_moons[lo..hi].to_vec()
    }

    fn solar_events_between(&self, from: EpochDay, to: EpochDay) -> Vec<SolarEvent> {
        let lo = self.solar_events.partition_point(|e| e.day < from);
        let hi = self.solar_events.partition_point(|e| e.day <= to);
        self.solar_events[lo..hi].to_vec()
    }
}

/// Builder collecting events for an [`EventTable`].
///
/// Events may be pushed in any order; `build` sorts them and rejects
/// duplicate days within either sequence.
#[derive(Debug, Default)]
pub struct EventTableBuilder {
    new_moons: Vec<EpochDay>,
    solar_events: Vec<SolarEvent>,
}

impl EventTableBuilder {
    /// Records a new-moon day.
    pub fn new_moon(mut self, day: EpochDay) -> Self {
        self.new_moons.push(day);
        self
    }

    /// Records a solar-term event.
    pub fn solar_event(mut self, day: EpochDay, major: bool) -> Self {
        self.solar_events.push(SolarEvent { day, major });
        self
    }

    /// Finishes the immutable table.
    ///
    /// # Errors
    /// Returns [`CalendarError::Configuration`] when two new moons or two
    /// solar terms fall on the same day.
    pub fn build(mut self) -> Result<EventTable, CalendarError> {
        self.new_moons.sort_unstable();
        self.solar_events.sort_unstable_by_key(|e| e.day);
        if self.new_moons.windows(2).any(|w| w[0] == w[1]) {
            return Err(CalendarError::Configuration(
                "duplicate new-moon day in event table".into(),
            ));
        }
        if self.solar_events.windows(2).any(|w| w[0].day == w[1].day) {
            return Err(CalendarError::Configuration(
                "duplicate solar-term day in event table".into(),
            ));
        }
        Ok(EventTable {
            new_moons: self.new_moons,
            solar_events: self.solar_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(v: i64) -> EpochDay {
        EpochDay::new(v)
    }

    #[test]
    fn queries_are_inclusive_and_sorted() {
        let table = EventTable::builder()
            .new_moon(day(60))
            .new_moon(day(1))
            .new_moon(day(30))
            .solar_event(day(15), true)
            .solar_event(day(45), false)
            .build()
            .unwrap();

        assert_eq!(vec![day(1), day(30)], table.new_moons_between(day(1), day(30)));
        assert_eq!(vec![day(30), day(60)], table.new_moons_between(day(2), day(90)));
        assert!(table.new_moons_between(day(61), day(99)).is_empty());

        let events = table.solar_events_between(day(15), day(45));
        assert_eq!(2, events.len());
        assert!(events[0].major);
        assert!(!events[1].major);
    }

    #[test]
    fn duplicate_events_rejected() {
        let result = EventTable::builder()
            .new_moon(day(10))
            .new_moon(day(10))
            .build();
        assert!(matches!(result, Err(CalendarError::Configuration(_))));

        let result = EventTable::builder()
            .solar_event(day(10), true)
            .solar_event(day(10), false)
            .build();
        assert!(matches!(result, Err(CalendarError::Configuration(_))));
    }
}
