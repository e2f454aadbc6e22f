//! Read access to resolved properties.

use std::any::type_name;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::value::PropertyMap;

/// Separator used by the list getters unless one is given.
pub const LIST_SEPARATOR: &str = ",";

/// The resolved, immutable result of a build.
///
/// Lookups follow the case-sensitivity of the build: when it was
/// case-insensitive, lookup keys are lower-cased.
///
/// # Examples
///
/// ```
/// use strata::PropertiesBuilder;
///
/// let properties = PropertiesBuilder::new()
///     .skip_env()
///     .add_property("server.port", "8080")
///     .add_property("server.hosts", "a,b,c")
///     .build()
///     .unwrap();
///
/// assert_eq!(properties.get_int("server.port").unwrap(), Some(8080));
/// assert_eq!(properties.get_list("server.hosts"), vec!["a", "b", "c"]);
/// assert_eq!(properties.get_or("missing", "fallback"), "fallback");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    values: IndexMap<String, String>,
    case_sensitive: bool,
}

impl Default for Properties {
    /// An empty, case-sensitive set.
    fn default() -> Self {
        Self {
            values: IndexMap::new(),
            case_sensitive: true,
        }
    }
}

impl Properties {
    /// Wraps a resolved map.
    #[must_use]
    pub fn new(resolved: PropertyMap, case_sensitive: bool) -> Self {
        Self {
            values: resolved
                .into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
            case_sensitive,
        }
    }

    fn lookup_key<'a>(&self, key: &'a str) -> std::borrow::Cow<'a, str> {
        if self.case_sensitive {
            key.into()
        } else {
            key.to_lowercase().into()
        }
    }

    /// The value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(self.lookup_key(key).as_ref()).map(String::as_str)
    }

    /// The value for `key`, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Applies `f` to the value for `key`.
    pub fn map<T>(&self, key: &str, f: impl FnOnce(&str) -> T) -> Option<T> {
        self.get(key).map(f)
    }

    /// Parses the value for `key` into `T`.
    ///
    /// Works for any [`FromStr`] type, including user enums.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if the value does not parse.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        self.get(key).map(|value| parse_value(key, value)).transpose()
    }

    /// Parses the value for `key`, or returns `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value does not parse.
    pub fn get_parsed_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get_parsed(key)?.unwrap_or(default))
    }

    /// The value for `key` as `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if the value is not an integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i32>> {
        self.get_parsed(key)
    }

    /// The value for `key` as `i32`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value is not an integer.
    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if the value is not an integer.
    pub fn get_long(&self, key: &str) -> Result<Option<i64>> {
        self.get_parsed(key)
    }

    /// The value for `key` as `i64`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value is not an integer.
    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if the value is not a number.
    pub fn get_float(&self, key: &str) -> Result<Option<f32>> {
        self.get_parsed(key)
    }

    /// The value for `key` as `f32`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value is not a number.
    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if the value is not a number.
    pub fn get_double(&self, key: &str) -> Result<Option<f64>> {
        self.get_parsed(key)
    }

    /// The value for `key` as `f64`, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value is not a number.
    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64> {
        self.get_parsed_or(key, default)
    }

    /// The value for `key` as a boolean. Accepts `true` and `false` in any
    /// ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] for any other value.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get(key)
            .map(|value| {
                if value.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if value.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(value_parse_error(key, value, "bool"))
                }
            })
            .transpose()
    }

    /// The value for `key` as a boolean, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] if a present value is not a boolean.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    /// The value for `key` split on `,`. Absent keys give an empty list.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.get_list_with(key, LIST_SEPARATOR)
    }

    /// Alias of [`get_list`](Self::get_list).
    #[must_use]
    pub fn get_array(&self, key: &str) -> Vec<&str> {
        self.get_list(key)
    }

    /// The value for `key` split on `separator`.
    ///
    /// Trailing empty items are dropped, so `"a,b,"` gives `["a", "b"]` and an
    /// empty value gives an empty list.
    #[must_use]
    pub fn get_list_with(&self, key: &str, separator: &str) -> Vec<&str> {
        let Some(value) = self.get(key) else {
            return Vec::new();
        };
        let mut items: Vec<&str> = if separator.is_empty() {
            vec![value]
        } else {
            value.split(separator).collect()
        };
        while items.last().is_some_and(|item| item.is_empty()) {
            items.pop();
        }
        items
    }

    /// The value for `key` split on `,` with every item parsed into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueParse`] for the first item that does not parse.
    pub fn get_list_parsed<T: FromStr>(&self, key: &str) -> Result<Vec<T>> {
        self.get_list(key)
            .into_iter()
            .map(|item| parse_value(key, item))
            .collect()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(key, value)` pairs in resolved order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The underlying ordered map.
    #[must_use]
    pub const fn as_map(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Consumes the properties into the underlying ordered map.
    #[must_use]
    pub fn into_map(self) -> IndexMap<String, String> {
        self.values
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| value_parse_error(key, value, type_name::<T>()))
}

fn value_parse_error(key: &str, value: &str, target: &str) -> Error {
    Error::ValueParse {
        key: key.to_string(),
        value: value.to_string(),
        target: target.to_string(),
    }
}
