//! Error types for the strata library.
//!
//! This module provides the error hierarchy for reading property sources,
//! resolving placeholders and parsing typed values, using `thiserror` for
//! ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a strata error.
///
/// # Examples
///
/// ```
/// use strata::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the strata library.
#[derive(Debug, Error)]
pub enum Error {
    /// A required property source does not exist.
    #[error("resource not found: {}", path.display())]
    ResourceNotFound {
        /// The path of the missing resource.
        path: PathBuf,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading a source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A properties source contained a malformed line.
    #[error("parse error in {source_name} at line {line}: {message}")]
    Parse {
        /// Name of the source being parsed.
        source_name: String,
        /// One-based line number of the offending logical line.
        line: usize,
        /// A description of the problem.
        message: String,
    },

    /// A YAML source could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Placeholders remained that could not be resolved.
    #[error("{}", UnresolvedReport(entries))]
    UnresolvablePlaceholders {
        /// Every entry still holding an unresolved placeholder, in map order.
        entries: Vec<UnresolvedEntry>,
    },

    /// A property value could not be converted to the requested type.
    #[error("cannot parse value [{value}] of key [{key}] as {target}")]
    ValueParse {
        /// The key that was looked up.
        key: String,
        /// The raw value found under the key.
        value: String,
        /// Name of the requested type.
        target: String,
    },
}

/// A key whose value still contains a placeholder after resolution stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedEntry {
    /// The property key.
    pub key: String,
    /// The last known, partially substituted value.
    pub value: String,
}

impl UnresolvedEntry {
    /// Creates an entry from a key and its current value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for UnresolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key: [{}] value: [{}]", self.key, self.value)
    }
}

struct UnresolvedReport<'a>(&'a [UnresolvedEntry]);

impl fmt::Display for UnresolvedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unresolvable placeholders:")?;
        for entry in self.0 {
            write!(f, "\n{entry}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ResourceNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns the unresolved entries carried by an
    /// [`Error::UnresolvablePlaceholders`], or an empty slice otherwise.
    #[must_use]
    pub fn unresolved_entries(&self) -> &[UnresolvedEntry] {
        match self {
            Self::UnresolvablePlaceholders { entries } => entries,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_not_found_error() {
        let err = Error::ResourceNotFound {
            path: PathBuf::from("/missing/app.properties"),
        };
        let display = format!("{err}");
        assert!(display.contains("resource not found"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/missing/app.properties"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("~other/app.properties"),
            reason: "~user syntax is not supported".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        assert!(display.contains("~user syntax"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_error() {
        let err = Error::Parse {
            source_name: "app.properties".to_string(),
            line: 3,
            message: "malformed \\uXXXX escape".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("app.properties"));
        assert!(display.contains("line 3"));
        assert!(display.contains("malformed"));
    }

    #[test]
    fn test_unresolvable_placeholders_lists_every_entry() {
        let err = Error::UnresolvablePlaceholders {
            entries: vec![
                UnresolvedEntry::new("a", "${b}"),
                UnresolvedEntry::new("b", "${a}"),
            ],
        };
        let display = format!("{err}");
        assert!(display.starts_with("Unresolvable placeholders:"));
        assert!(display.contains("key: [a] value: [${b}]"));
        assert!(display.contains("key: [b] value: [${a}]"));
        assert_eq!(err.unresolved_entries().len(), 2);
    }

    #[test]
    fn test_value_parse_error() {
        let err = Error::ValueParse {
            key: "server.port".to_string(),
            value: "eighty".to_string(),
            target: "i32".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("[eighty]"));
        assert!(display.contains("[server.port]"));
        assert!(display.contains("i32"));
        assert!(err.unresolved_entries().is_empty());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::ResourceNotFound {
                path: PathBuf::from("x"),
            })
        }

        assert!(returns_result().is_err());
    }
}
