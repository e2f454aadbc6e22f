//! Properties supplied directly from code.

use crate::value::{PropertyMap, PropertyValue};

/// An ordered set of properties added programmatically.
///
/// ```
/// use strata::source::ProgrammaticSource;
///
/// let source = ProgrammaticSource::new()
///     .add("greeting", "hello ${name}")
///     .add("name", "world");
/// assert_eq!(source.read()["greeting"].value(), "hello ${name}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammaticSource {
    entries: PropertyMap,
}

impl ProgrammaticSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolvable property. Re-adding a key replaces its value.
    #[must_use]
    pub fn add(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_value(key, PropertyValue::new(value))
    }

    /// Adds a property with an explicit resolvable flag.
    #[must_use]
    pub fn add_value(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produces the property map in insertion order.
    #[must_use]
    pub fn read(&self) -> PropertyMap {
        self.entries.clone()
    }
}

impl<K, V> FromIterator<(K, V)> for ProgrammaticSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |source, (k, v)| source.add(k, v))
    }
}
