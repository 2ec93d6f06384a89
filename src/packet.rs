//! Compact tagged representation for exact date reconstruction.
//!
//! Each calendar kind maps its dates onto a small tagged packet that a
//! serialization layer can store or ship; reconstruction goes back
//! through the owning calendar's validated factory, so a round trip
//! reproduces the original value exactly and a corrupt packet fails
//! instead of producing a half-valid date.

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::hebrew::{HebrewCalendar, HebrewDate, HebrewMonth};
use crate::lunisolar::{LunisolarCalendar, LunisolarDate, Month};

/// Type tag of lunisolar dates.
pub const TAG_LUNISOLAR: u8 = 0x6C;

/// Type tag of metonic dates.
pub const TAG_HEBREW: u8 = 0x68;

/// Compact tagged date representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatePacket {
    /// Calendar-kind discriminator.
    pub type_tag: u8,
    /// Year of era.
    pub year: i32,
    /// Month number: the lunisolar month number, or the 13-position
    /// enumeration value of a metonic month.
    pub month: u8,
    /// Leap-month flag. Only meaningful for lunisolar dates; metonic
    /// intercalary months have their own enumeration value.
    pub leap: bool,
    /// Day of month.
    pub day: u8,
}

impl From<&LunisolarDate> for DatePacket {
    fn from(date: &LunisolarDate) -> Self {
        Self {
            type_tag: TAG_LUNISOLAR,
            year: date.year(),
            month: date.month().number(),
            leap: date.month().is_leap(),
            day: date.day(),
        }
    }
}

impl From<&HebrewDate> for DatePacket {
    fn from(date: &HebrewDate) -> Self {
        Self {
            type_tag: TAG_HEBREW,
            year: date.year(),
            month: date.month().value(),
            leap: false,
            day: date.day(),
        }
    }
}

impl LunisolarCalendar {
    /// Reconstructs a date from its packet through the validated factory.
    ///
    /// # Errors
    /// Returns [`CalendarError::UnsupportedType`] for a foreign type tag
    /// and the factory's [`CalendarError::InvalidField`] for impossible
    /// field values.
    pub fn from_packet(&self, packet: &DatePacket) -> Result<LunisolarDate, CalendarError> {
        if packet.type_tag != TAG_LUNISOLAR {
            return Err(CalendarError::UnsupportedType(packet.type_tag));
        }
        let month = if packet.leap {
            Month::Leap(packet.month)
        } else {
            Month::Ordinary(packet.month)
        };
        self.of(packet.year, month, packet.day)
    }
}

impl HebrewCalendar {
    /// Reconstructs a date from its packet through the validated factory.
    ///
    /// # Errors
    /// Returns [`CalendarError::UnsupportedType`] for a foreign type tag
    /// and [`CalendarError::InvalidField`] for impossible field values,
    /// including a set leap flag.
    pub fn from_packet(&self, packet: &DatePacket) -> Result<HebrewDate, CalendarError> {
        if packet.type_tag != TAG_HEBREW {
            return Err(CalendarError::UnsupportedType(packet.type_tag));
        }
        if packet.leap {
            return Err(CalendarError::InvalidField(
                "metonic months carry no leap flag".into(),
            ));
        }
        self.of(packet.year, HebrewMonth::from_value(packet.month)?, packet.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_calendar;

    #[test]
    fn lunisolar_round_trip() {
        let cal = fixture_calendar();
        for date in [
            cal.of(2002, Month::Leap(6), 30).unwrap(),
            cal.of(2002, Month::Ordinary(6), 29).unwrap(),
            cal.of(2003, Month::Ordinary(12), 1).unwrap(),
        ] {
            let packet = DatePacket::from(&date);
            assert_eq!(TAG_LUNISOLAR, packet.type_tag);
            assert_eq!(date, cal.from_packet(&packet).unwrap());
        }
    }

    #[test]
    fn hebrew_round_trip() {
        let cal = HebrewCalendar;
        for date in [
            cal.of(5776, HebrewMonth::AdarI, 30).unwrap(),
            cal.of(5777, HebrewMonth::Tevet, 4).unwrap(),
            cal.of(5779, HebrewMonth::Heshvan, 30).unwrap(),
        ] {
            let packet = DatePacket::from(&date);
            assert_eq!(TAG_HEBREW, packet.type_tag);
            assert_eq!(date, cal.from_packet(&packet).unwrap());
        }
    }

    #[test]
    fn round_trip_through_json() {
        let cal = fixture_calendar();
        let date = cal.of(2002, Month::Leap(6), 13).unwrap();
        let packet = DatePacket::from(&date);
        let json = serde_json::to_string(&packet).unwrap();
        let parsed: DatePacket = serde_json::from_str(&json).unwrap();
        assert_eq!(date, cal.from_packet(&parsed).unwrap());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let cal = fixture_calendar();
        let packet = DatePacket {
            type_tag: 0x7a,
            year: 2002,
            month: 6,
            leap: false,
            day: 1,
        };
        assert_eq!(
            Err(CalendarError::UnsupportedType(0x7a)),
            cal.from_packet(&packet)
        );
        assert_eq!(
            Err(CalendarError::UnsupportedType(0x7a)),
            HebrewCalendar.from_packet(&packet)
        );
    }

    #[test]
    fn foreign_tag_is_rejected_not_reinterpreted() {
        let cal = fixture_calendar();
        let hebrew = HebrewCalendar.of(5777, HebrewMonth::Tevet, 4).unwrap();
        let packet = DatePacket::from(&hebrew);
        assert_eq!(
            Err(CalendarError::UnsupportedType(TAG_HEBREW)),
            cal.from_packet(&packet)
        );
    }

    #[test]
    fn corrupt_packet_fails_instead_of_clamping() {
        let cal = fixture_calendar();
        let mut packet = DatePacket::from(&cal.of(2002, Month::Ordinary(6), 29).unwrap());
        packet.day = 30;
        assert!(matches!(
            cal.from_packet(&packet),
            Err(CalendarError::InvalidField(_))
        ));

        let mut packet = DatePacket::from(&HebrewCalendar.of(5777, HebrewMonth::Tevet, 4).unwrap());
        packet.leap = true;
        assert!(matches!(
            HebrewCalendar.from_packet(&packet),
            Err(CalendarError::InvalidField(_))
        ));
    }
}
