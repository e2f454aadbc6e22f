//! Property values and ordered property maps.

use indexmap::IndexMap;
use serde::Serialize;

/// An ordered mapping from property key to [`PropertyValue`].
///
/// Insertion order is preserved; overwriting an existing key keeps the key's
/// original position.
pub type PropertyMap = IndexMap<String, PropertyValue>;

/// A single property entry as produced by a source.
///
/// Values flagged as not resolvable are never scanned for placeholders and
/// are passed through the resolver verbatim.
///
/// # Examples
///
/// ```
/// use strata::PropertyValue;
///
/// let value = PropertyValue::new("${db.host}:5432");
/// assert!(value.is_resolvable());
///
/// let raw = PropertyValue::verbatim("${NOT_A_PLACEHOLDER}");
/// assert!(!raw.is_resolvable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyValue {
    value: String,
    resolvable: bool,
}

impl PropertyValue {
    /// Creates a resolvable value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            resolvable: true,
        }
    }

    /// Creates a value that is taken verbatim and never resolved.
    #[must_use]
    pub fn verbatim(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            resolvable: false,
        }
    }

    /// Returns a copy with the resolvable flag set to `resolvable`.
    #[must_use]
    pub fn with_resolvable(mut self, resolvable: bool) -> Self {
        self.resolvable = resolvable;
        self
    }

    /// The current textual value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value may contain placeholders to substitute.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.resolvable
    }

    /// Consumes the entry, returning the text.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
