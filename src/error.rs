//! Error taxonomy shared by every calendar kind.

/// Errors reported by date construction, transformation and variant
/// resolution.
///
/// Every variant indicates either a caller programming error or a genuine
/// domain boundary. Nothing is retried or silently recovered: a date is
/// either fully valid or its constructor fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// An epoch day outside the calendar variant's supported domain.
    #[error("epoch day {value} outside supported range [{min}, {max}]")]
    Range {
        /// The rejected epoch-day value.
        value: i64,
        /// Smallest supported epoch day of the variant.
        min: i64,
        /// Largest supported epoch day of the variant.
        max: i64,
    },

    /// A field combination that is structurally well-typed but
    /// calendrically impossible, e.g. day 30 in a 29-day month or a leap
    /// flag on a month that is not the leap month of its year.
    #[error("invalid field combination: {0}")]
    InvalidField(String),

    /// Missing or ambiguous variant resolution, or malformed rule data
    /// handed to a calendar constructor.
    #[error("calendar configuration error: {0}")]
    Configuration(String),

    /// A variant key that names no registered calendar system.
    #[error("unknown calendar variant: {0}")]
    NotFound(String),

    /// A serialized type tag that names no known calendar kind.
    #[error("unrecognized calendar type tag: {0:#04x}")]
    UnsupportedType(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CalendarError::Range {
            value: 9,
            min: 10,
            max: 20,
        };
        assert_eq!(
            err.to_string(),
            "epoch day 9 outside supported range [10, 20]"
        );

        let err = CalendarError::NotFound("unknown-variant".into());
        assert_eq!(err.to_string(), "unknown calendar variant: unknown-variant");

        let err = CalendarError::UnsupportedType(0xff);
        assert_eq!(err.to_string(), "unrecognized calendar type tag: 0xff");
    }
}
