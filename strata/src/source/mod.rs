//! Property sources.
//!
//! A [`Source`] produces a flat, ordered [`PropertyMap`] when read. Sources
//! are registered with a [`crate::PropertiesBuilder`] at a priority and read
//! once during [`crate::PropertiesBuilder::build`].

mod env;
mod file;
mod programmatic;

pub mod properties;
pub mod yaml;

use std::fmt;

pub use env::EnvSource;
pub use file::{Charset, FileFormat, FileSource, FILE_PREFIX};
pub use programmatic::ProgrammaticSource;

use crate::error::Result;
use crate::value::PropertyMap;

/// A reader of properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A `.properties` or YAML file.
    File(FileSource),
    /// A snapshot of environment variables.
    Env(EnvSource),
    /// Properties added from code.
    Programmatic(ProgrammaticSource),
    /// Another source with keys lower-cased and `_` replaced by `.`.
    LowerCaseAndDot(Box<Source>),
}

impl Source {
    /// Wraps `inner` so its keys are lower-cased and underscores become dots.
    ///
    /// ```
    /// use strata::source::{EnvSource, Source};
    ///
    /// let source = Source::lower_case_and_dot(EnvSource::new([("DB_HOST", "h")]));
    /// assert_eq!(source.read().unwrap()["db.host"].value(), "h");
    /// ```
    #[must_use]
    pub fn lower_case_and_dot(inner: impl Into<Source>) -> Self {
        Self::LowerCaseAndDot(Box::new(inner.into()))
    }

    /// Reads the source.
    ///
    /// # Errors
    ///
    /// Only file sources fail; see [`FileSource::read`].
    pub fn read(&self) -> Result<PropertyMap> {
        match self {
            Self::File(file) => file.read(),
            Self::Env(env) => Ok(env.read()),
            Self::Programmatic(programmatic) => Ok(programmatic.read()),
            Self::LowerCaseAndDot(inner) => Ok(inner
                .read()?
                .into_iter()
                .map(|(key, value)| (key.to_lowercase().replace('_', "."), value))
                .collect()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(file) if file.is_optional() => write!(f, "optional file {}", file.location()),
            Self::File(file) => write!(f, "file {}", file.location()),
            Self::Env(_) => f.write_str("environment"),
            Self::Programmatic(_) => f.write_str("programmatic"),
            Self::LowerCaseAndDot(inner) => write!(f, "{inner} (lower-case and dot)"),
        }
    }
}

impl From<FileSource> for Source {
    fn from(source: FileSource) -> Self {
        Self::File(source)
    }
}

impl From<EnvSource> for Source {
    fn from(source: EnvSource) -> Self {
        Self::Env(source)
    }
}

impl From<ProgrammaticSource> for Source {
    fn from(source: ProgrammaticSource) -> Self {
        Self::Programmatic(source)
    }
}
