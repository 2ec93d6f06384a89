//! Calendrical computation engine.
//!
//! This crate converts between a culture-neutral, monotonically
//! increasing day count (the [`EpochDay`] axis) and the date
//! representations of calendar systems with genuinely irregular
//! structure, and performs arithmetic correctly within each system's own
//! rules:
//!
//! - [`lunisolar`]: years of 12 or 13 synodic months delimited by
//!   new-moon events, with leap-month placement derived from an injected
//!   astronomical oracle;
//! - [`hebrew`]: a metonic-cycle calendar with a closed-form leap-year
//!   pattern, deficient/regular/complete year classes, variable month
//!   lengths and anniversary projection.
//!
//! Both implement the [`CalendarSystem`] contract; [`CalendarFamily`]
//! resolves named rule-set variants of one calendar kind, and
//! [`Timeline`] provides stepping and comparison over a resolved system.
//! All values are immutable, all operations are pure, and every instance
//! is safely shared across threads once constructed.
//!
//! # Examples
//!
//! Metonic calendar arithmetic and anniversary projection:
//!
//! ```
//! use calendrium::EpochDay;
//! use calendrium::hebrew::{HebrewCalendar, HebrewMonth};
//!
//! let cal = HebrewCalendar;
//! let birth = cal.of(5777, HebrewMonth::Tevet, 4).unwrap();
//! assert_eq!(EpochDay::from_gregorian(2017, 1, 2), birth.epoch_day());
//!
//! let bar_mitzvah = birth.bar_mitzvah().unwrap();
//! assert_eq!(5790, bar_mitzvah.year());
//! assert_eq!(HebrewMonth::Tevet, bar_mitzvah.month());
//! ```
//!
//! Field combinations are validated at construction, never clamped:
//!
//! ```
//! use calendrium::CalendarError;
//! use calendrium::hebrew::{HebrewCalendar, HebrewMonth};
//!
//! // Adar I only exists in leap years.
//! assert!(matches!(
//!     HebrewCalendar.of(5777, HebrewMonth::AdarI, 1),
//!     Err(CalendarError::InvalidField(_))
//! ));
//! ```

mod consts;
mod prelude;
#[cfg(test)]
pub(crate) mod test_utils;

pub mod epoch;
pub mod error;
pub mod family;
pub mod hebrew;
pub mod lunisolar;
pub mod packet;
pub mod system;
pub mod timeline;

pub use consts::{
    DAYS_PER_WEEK, LEAP_YEARS_PER_CYCLE, METONIC_CYCLE_YEARS, MONTHS_PER_COMMON_YEAR,
    MONTHS_PER_LEAP_YEAR,
};
pub use epoch::EpochDay;
pub use error::CalendarError;
pub use family::{CalendarFamily, CalendarFamilyBuilder, VariantSource};
pub use packet::{DatePacket, TAG_HEBREW, TAG_LUNISOLAR};
pub use system::{CalendarSystem, DateField, FieldAccess};
pub use timeline::Timeline;
