//! Environment variable source.
//!
//! Environment values are taken verbatim: they are flagged as not resolvable
//! so a `${...}` sequence inside a variable is never treated as a placeholder.

use std::env;

use crate::value::{PropertyMap, PropertyValue};

/// A snapshot of environment variables exposed as properties.
///
/// The snapshot is taken once, either from the process environment with
/// [`EnvSource::capture`] or from injected pairs with [`EnvSource::new`], so
/// reading it is deterministic.
///
/// # Examples
///
/// ```
/// use strata::source::EnvSource;
///
/// let source = EnvSource::new([("APP_DB_HOST", "localhost")]).replace("_", ".");
/// let map = source.read();
/// assert_eq!(map["APP.DB.HOST"].value(), "localhost");
/// assert!(!map["APP.DB.HOST"].is_resolvable());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: Vec<(String, String)>,
    replacements: Vec<(String, String)>,
}

impl EnvSource {
    /// Creates a source over the given variable pairs.
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            replacements: Vec::new(),
        }
    }

    /// Snapshots the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn capture() -> Self {
        Self::new(
            env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Rewrites every occurrence of `from` to `to` in variable names.
    ///
    /// Replacements apply in registration order.
    #[must_use]
    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// The captured variable pairs, untouched by key replacements.
    #[must_use]
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    /// Produces the property map, sorted by variable name.
    #[must_use]
    pub fn read(&self) -> PropertyMap {
        let mut vars: Vec<_> = self.vars.iter().collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));

        vars.into_iter()
            .map(|(key, value)| (self.rewrite_key(key), PropertyValue::verbatim(value.as_str())))
            .collect()
    }

    fn rewrite_key(&self, key: &str) -> String {
        self.replacements
            .iter()
            .fold(key.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }
}
