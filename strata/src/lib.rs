#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # strata
//!
//! Layered configuration properties.
//!
//! Properties are collected from several sources (files, environment
//! variables, system properties, code), merged by priority, and then
//! `${key}` placeholders are resolved across the merged result.
//!
//! ## Core Types
//!
//! - [`PropertiesBuilder`]: registers sources and runs the pipeline
//! - [`Properties`]: the resolved result, with typed getters
//! - [`PriorityMerger`] and [`Resolver`]: the two pipeline stages
//! - [`Source`]: file, environment and programmatic readers
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Priorities
//!
//! A lower number wins. See [`priority`] for the standard bands; sources
//! sharing a priority are applied in registration order, so the last one
//! added wins.
//!
//! ## Examples
//!
//! ```
//! use strata::PropertiesBuilder;
//!
//! let properties = PropertiesBuilder::new()
//!     .skip_env()
//!     .add_property("db.host", "localhost")
//!     .add_property("db.url", "postgres://${db.host}:${db.port:5432}")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(properties.get("db.url"), Some("5432"));
//! ```
//!
//! A default applies only when the referenced key is absent, and it replaces
//! the whole value rather than the placeholder alone.

pub mod builder;
pub mod error;
pub mod logging;
pub mod merger;
pub mod priority;
pub mod properties;
pub mod resolver;
pub mod source;
pub mod tokenizer;
pub mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at crate root for convenience
pub use builder::PropertiesBuilder;
pub use error::{Error, Result, UnresolvedEntry};
pub use logging::{init_logger, LogLevel, Logger};
pub use merger::PriorityMerger;
pub use properties::Properties;
pub use resolver::{Resolver, ResolverConfig};
pub use source::{Charset, EnvSource, FileSource, ProgrammaticSource, Source};
pub use value::{PropertyMap, PropertyValue};
