//! The configuration surface and pipeline driver.
//!
//! [`PropertiesBuilder`] collects sources with their priorities, reads them
//! all, merges them by priority and resolves placeholders in the merged map.

use crate::error::Result;
use crate::merger::PriorityMerger;
use crate::priority;
use crate::properties::Properties;
use crate::resolver::{Resolver, ResolverConfig};
use crate::source::{EnvSource, FileSource, ProgrammaticSource, Source};
use crate::value::PropertyValue;

/// Builds a [`Properties`] instance.
///
/// Unless [`skip_env`](Self::skip_env) is called, the process environment is
/// captured when the builder is created and registered at
/// [`priority::ENVIRONMENT_VARIABLES`] twice: once with raw names and once
/// with names lower-cased and `_` replaced by `.`.
///
/// # Examples
///
/// ```
/// use strata::PropertiesBuilder;
///
/// let properties = PropertiesBuilder::new()
///     .skip_env()
///     .add_property("name", "world")
///     .add_property("greeting", "Hello ${name}!")
///     .build()
///     .unwrap();
///
/// assert_eq!(properties.get("greeting"), Some("Hello world!"));
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesBuilder {
    config: ResolverConfig,
    default_priority: u32,
    env: Option<EnvSource>,
    system_properties: Vec<(String, String)>,
    sources: Vec<(Source, u32)>,
}

impl Default for PropertiesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertiesBuilder {
    /// Creates a builder with default settings and a snapshot of the
    /// process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
            default_priority: priority::DEFAULT,
            env: Some(EnvSource::capture()),
            system_properties: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Sets the placeholder delimiters. Defaults are `${` and `}`.
    #[must_use]
    pub fn delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.config.start_delimiter = start.into();
        self.config.end_delimiter = end.into();
        self
    }

    /// Sets the separator between a placeholder key and its default value.
    /// Default is `:`.
    #[must_use]
    pub fn default_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.default_value_separator = separator.into();
        self
    }

    /// Leave unresolvable placeholders as literal text instead of failing.
    #[must_use]
    pub const fn ignore_unresolvable_placeholders(mut self, ignore: bool) -> Self {
        self.config.ignore_unresolvable_placeholders = ignore;
        self
    }

    /// When false, every key is lower-cased before resolution and lookups
    /// on the built [`Properties`] ignore case.
    #[must_use]
    pub const fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.case_sensitive = case_sensitive;
        self
    }

    /// Priority used by the `add_*` methods without an explicit priority.
    #[must_use]
    pub const fn default_priority(mut self, priority: u32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Do not register environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.env = None;
        self
    }

    /// Replaces the captured environment with the given variables.
    #[must_use]
    pub fn with_env_snapshot<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(EnvSource::new(vars));
        self
    }

    /// Registers system properties at [`priority::SYSTEM_PROPERTIES`].
    ///
    /// Calls accumulate; a repeated key keeps its last value.
    #[must_use]
    pub fn with_system_properties<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.system_properties
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a source at the default priority.
    #[must_use]
    pub fn add_source(self, source: impl Into<Source>) -> Self {
        let priority = self.default_priority;
        self.add_source_with_priority(source, priority)
    }

    /// Adds a source at `priority`. Among sources with the same priority the
    /// last added wins.
    #[must_use]
    pub fn add_source_with_priority(mut self, source: impl Into<Source>, priority: u32) -> Self {
        self.sources.push((source.into(), priority));
        self
    }

    /// Adds a required file at the default priority.
    #[must_use]
    pub fn add_file(self, location: impl Into<String>) -> Self {
        self.add_source(FileSource::new(location))
    }

    /// Adds a required file at `priority`.
    #[must_use]
    pub fn add_file_with_priority(self, location: impl Into<String>, priority: u32) -> Self {
        self.add_source_with_priority(FileSource::new(location), priority)
    }

    /// Adds a file that may be missing, at the default priority.
    #[must_use]
    pub fn add_optional_file(self, location: impl Into<String>) -> Self {
        self.add_source(FileSource::new(location).ignore_not_found(true))
    }

    /// Adds a file that may be missing, at `priority`.
    #[must_use]
    pub fn add_optional_file_with_priority(self, location: impl Into<String>, priority: u32) -> Self {
        self.add_source_with_priority(FileSource::new(location).ignore_not_found(true), priority)
    }

    /// Adds a single resolvable property at the default priority.
    #[must_use]
    pub fn add_property(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_source(ProgrammaticSource::new().add_value(key, PropertyValue::new(value)))
    }

    /// The resolver settings accumulated so far.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Reads every source, merges by priority and resolves placeholders.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::ResourceNotFound`] if a required file is missing
    /// - [`crate::Error::Parse`], [`crate::Error::Yaml`] or
    ///   [`crate::Error::Io`] if a source cannot be read
    /// - [`crate::Error::UnresolvablePlaceholders`] if placeholders remain
    ///   and ignoring them is not enabled
    pub fn build(self) -> Result<Properties> {
        let mut merger = PriorityMerger::new();

        if let Some(env) = self.env {
            let raw = Source::from(env);
            merger.add(raw.read()?, priority::ENVIRONMENT_VARIABLES);
            merger.add(
                Source::lower_case_and_dot(raw).read()?,
                priority::ENVIRONMENT_VARIABLES,
            );
        }

        if !self.system_properties.is_empty() {
            let system: ProgrammaticSource = self.system_properties.into_iter().collect();
            merger.add(system.read(), priority::SYSTEM_PROPERTIES);
        }

        for (source, priority) in &self.sources {
            let entries = source.read()?;
            log::debug!("read {} entries from {source} at priority {priority}", entries.len());
            merger.add(entries, *priority);
        }

        let resolver = Resolver::new(self.config);
        let resolved = resolver.resolve(merger.merge())?;
        Ok(Properties::new(resolved, resolver.config().case_sensitive))
    }
}
