//! Variant registries for calendar kinds with more than one rule set.
//!
//! A calendar family maps variant keys (e.g. per-country rule sets of the
//! same calendar kind) to concrete calendar systems. The map is populated
//! once through a builder and immutable afterwards, so concurrent readers
//! need no synchronization.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CalendarError;
use crate::timeline::Timeline;

/// A structured source of a variant key.
///
/// Resolution through a source and resolution through the plain string it
/// reports return the same instance.
pub trait VariantSource {
    /// The variant key this source denotes.
    fn variant(&self) -> &str;
}

impl VariantSource for str {
    fn variant(&self) -> &str {
        self
    }
}

impl VariantSource for String {
    fn variant(&self) -> &str {
        self
    }
}

/// Immutable registry resolving variant keys to calendar systems of one
/// calendar kind.
///
/// A family never has an implicit default variant: mixing date values
/// across variants would silently corrupt comparisons, so resolution
/// always requires an explicit key.
///
/// # Example
///
/// ```
/// use calendrium::{CalendarFamily, CalendarError};
///
/// let family = CalendarFamily::builder()
///     .variant("east", 1u8)
///     .variant("west", 2u8)
///     .build();
///
/// assert!(family.has_calendar_system());
/// assert_eq!(2, **family.calendar_system_for("west").unwrap());
/// assert!(matches!(
///     family.calendar_system_for("north"),
///     Err(CalendarError::NotFound(_))
/// ));
/// assert!(matches!(
///     family.calendar_system(),
///     Err(CalendarError::Configuration(_))
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct CalendarFamily<S> {
    variants: HashMap<String, Arc<S>>,
}

impl<S> CalendarFamily<S> {
    /// Starts building a family.
    pub fn builder() -> CalendarFamilyBuilder<S> {
        CalendarFamilyBuilder {
            variants: HashMap::new(),
        }
    }

    /// Whether at least one variant is registered.
    pub fn has_calendar_system(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Resolution without a variant key.
    ///
    /// # Errors
    /// Always fails with [`CalendarError::Configuration`]: a family has no
    /// implicit default variant.
    pub fn calendar_system(&self) -> Result<&Arc<S>, CalendarError> {
        Err(CalendarError::Configuration(
            "calendar family requires an explicit variant key".into(),
        ))
    }

    /// Resolves a variant key to its calendar system.
    ///
    /// # Errors
    /// Returns [`CalendarError::NotFound`] when the key names no
    /// registered variant.
    pub fn calendar_system_for(&self, key: &str) -> Result<&Arc<S>, CalendarError> {
        self.variants
            .get(key)
            .ok_or_else(|| CalendarError::NotFound(key.to_owned()))
    }

    /// Resolves a structured variant source; equivalent to resolving the
    /// key it reports.
    ///
    /// # Errors
    /// Returns [`CalendarError::NotFound`] when the reported key names no
    /// registered variant.
    pub fn calendar_system_for_source<V>(&self, source: &V) -> Result<&Arc<S>, CalendarError>
    where
        V: VariantSource + ?Sized,
    {
        self.calendar_system_for(source.variant())
    }

    /// Registered variant keys, in no particular order.
    pub fn variant_keys(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}

impl<S: crate::system::CalendarSystem> CalendarFamily<S> {
    /// Resolves a variant key to a timeline over its calendar system.
    ///
    /// # Errors
    /// Returns [`CalendarError::NotFound`] for an unknown key.
    pub fn timeline(&self, key: &str) -> Result<Timeline<'_, S>, CalendarError> {
        Ok(Timeline::new(self.calendar_system_for(key)?.as_ref()))
    }
}

/// Builder collecting the variants of a [`CalendarFamily`].
#[derive(Debug)]
pub struct CalendarFamilyBuilder<S> {
    variants: HashMap<String, Arc<S>>,
}

impl<S> CalendarFamilyBuilder<S> {
    /// Registers a variant under `key`, replacing any earlier registration
    /// of the same key.
    pub fn variant(mut self, key: impl Into<String>, system: S) -> Self {
        self.variants.insert(key.into(), Arc::new(system));
        self
    }

    /// Finishes the immutable family.
    pub fn build(self) -> CalendarFamily<S> {
        CalendarFamily {
            variants: self.variants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeyHolder(&'static str);

    impl VariantSource for KeyHolder {
        fn variant(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn empty_family_reports_no_system() {
        let family: CalendarFamily<u8> = CalendarFamily::builder().build();
        assert!(!family.has_calendar_system());
    }

    #[test]
    fn no_default_variant() {
        let family = CalendarFamily::builder().variant("only", 1u8).build();
        assert!(matches!(
            family.calendar_system(),
            Err(CalendarError::Configuration(_))
        ));
    }

    #[test]
    fn unknown_key_is_not_found() {
        let family = CalendarFamily::builder().variant("a", 1u8).build();
        let err = family.calendar_system_for("b").unwrap_err();
        assert_eq!(err, CalendarError::NotFound("b".into()));
    }

    #[test]
    fn string_and_source_resolve_to_same_instance() {
        let family = CalendarFamily::builder().variant("sweden", 7u8).build();
        let by_string = family.calendar_system_for("sweden").unwrap();
        let by_source = family
            .calendar_system_for_source(&KeyHolder("sweden"))
            .unwrap();
        assert!(Arc::ptr_eq(by_string, by_source));
    }

    #[test]
    fn later_registration_wins() {
        let family = CalendarFamily::builder()
            .variant("v", 1u8)
            .variant("v", 2u8)
            .build();
        assert_eq!(2, **family.calendar_system_for("v").unwrap());
    }
}
