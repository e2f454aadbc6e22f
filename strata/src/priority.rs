//! Priority bands for property sources.
//!
//! Lower numbers take precedence: a key defined at priority 0 overrides the
//! same key defined anywhere else. Sources sharing a priority are ordered by
//! registration, the last registered winning.

/// The highest possible priority.
pub const HIGHEST: u32 = 0;

/// Band used for system properties (`-D key=value` style definitions).
pub const SYSTEM_PROPERTIES: u32 = 100;

/// Band used for environment variables.
pub const ENVIRONMENT_VARIABLES: u32 = 1000;

/// Band used for sources added without an explicit priority.
pub const DEFAULT: u32 = 10_000;

/// The lowest possible priority.
pub const LOWEST: u32 = u32::MAX;
