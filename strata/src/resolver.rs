//! Placeholder resolution over a merged property map.
//!
//! Resolution runs in passes. In each pass every resolvable value is scanned
//! for tokens, and each token is looked up in the map:
//!
//! - if the referenced key exists and its value holds no tokens itself, the
//!   placeholder is replaced with that value;
//! - if the key is absent and the token carries a default (`${key:default}`),
//!   the whole value becomes the default text;
//! - otherwise the token is left for a later pass.
//!
//! Passes repeat until no tokens remain or a pass substitutes nothing. Chains
//! of references therefore resolve one level per pass, and cycles stop the
//! loop instead of spinning.
//!
//! # Examples
//!
//! ```
//! use strata::{PropertyMap, PropertyValue, Resolver, ResolverConfig};
//!
//! let mut map = PropertyMap::new();
//! map.insert("greeting".to_string(), PropertyValue::new("${word} world!"));
//! map.insert("word".to_string(), PropertyValue::new("Hello"));
//!
//! let resolved = Resolver::new(ResolverConfig::default()).resolve(map).unwrap();
//! assert_eq!(resolved["greeting"].value(), "Hello world!");
//! ```

use crate::error::{Error, Result, UnresolvedEntry};
use crate::tokenizer;
use crate::value::PropertyMap;

/// Default placeholder start delimiter.
pub const DEFAULT_START_DELIMITER: &str = "${";

/// Default placeholder end delimiter.
pub const DEFAULT_END_DELIMITER: &str = "}";

/// Default separator between a key and its fallback inside a placeholder.
pub const DEFAULT_VALUE_SEPARATOR: &str = ":";

/// Settings controlling placeholder resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Placeholder start delimiter.
    pub start_delimiter: String,
    /// Placeholder end delimiter.
    pub end_delimiter: String,
    /// Separator between lookup key and default text.
    pub default_value_separator: String,
    /// Leave unresolvable placeholders as literal text instead of failing.
    pub ignore_unresolvable_placeholders: bool,
    /// Compare keys case-sensitively. When false, all keys are lower-cased.
    pub case_sensitive: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            start_delimiter: DEFAULT_START_DELIMITER.to_string(),
            end_delimiter: DEFAULT_END_DELIMITER.to_string(),
            default_value_separator: DEFAULT_VALUE_SEPARATOR.to_string(),
            ignore_unresolvable_placeholders: false,
            case_sensitive: true,
        }
    }
}

impl ResolverConfig {
    /// Applies the case-sensitivity rule to a key.
    #[must_use]
    pub fn normalize_key(&self, key: &str) -> String {
        if self.case_sensitive {
            key.to_string()
        } else {
            key.to_lowercase()
        }
    }

    /// Splits a token at the first default-value separator.
    fn split_token<'a>(&self, token: &'a str) -> (&'a str, Option<&'a str>) {
        match token.find(self.default_value_separator.as_str()) {
            Some(index) if !self.default_value_separator.is_empty() => (
                &token[..index],
                Some(&token[index + self.default_value_separator.len()..]),
            ),
            _ => (token, None),
        }
    }

    fn has_tokens(&self, value: &str) -> bool {
        tokenizer::has_tokens(value, &self.start_delimiter, &self.end_delimiter)
    }
}

/// Resolves placeholders across a property map.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the given settings.
    #[must_use]
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver settings.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every placeholder in `input`.
    ///
    /// Keys are first normalized per the case-sensitivity setting; when two
    /// keys fold to the same key, the one later in iteration order wins and
    /// takes the position of the first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvablePlaceholders`] listing every key still
    /// holding a placeholder when resolution gets stuck, unless
    /// `ignore_unresolvable_placeholders` is set.
    pub fn resolve(&self, input: PropertyMap) -> Result<PropertyMap> {
        let mut output: PropertyMap = input
            .into_iter()
            .map(|(key, value)| (self.config.normalize_key(&key), value))
            .collect();

        let mut pending = Vec::new();
        let mut values_to_be_replaced = true;
        let mut values_replaced_on_last_loop = true;
        let mut pass = 0_usize;

        while values_to_be_replaced && values_replaced_on_last_loop {
            values_to_be_replaced = false;
            values_replaced_on_last_loop = false;
            pending.clear();
            pass += 1;

            for index in 0..output.len() {
                if self.resolve_entry(&mut output, index, &mut values_replaced_on_last_loop) {
                    values_to_be_replaced = true;
                    pending.push(index);
                }
            }

            log::trace!(
                "resolution pass {pass}: {} entries with placeholders, substituted: {values_replaced_on_last_loop}",
                pending.len()
            );
        }

        if pending.is_empty() {
            log::debug!("resolved {} properties in {pass} passes", output.len());
            return Ok(output);
        }

        let entries: Vec<UnresolvedEntry> = pending
            .iter()
            .filter_map(|&index| output.get_index(index))
            .map(|(key, value)| UnresolvedEntry::new(key.as_str(), value.value()))
            .collect();

        if self.config.ignore_unresolvable_placeholders {
            log::debug!(
                "leaving {} unresolvable placeholders as literal text",
                entries.len()
            );
            return Ok(output);
        }

        log::warn!("{} properties hold unresolvable placeholders", entries.len());
        Err(Error::UnresolvablePlaceholders { entries })
    }

    /// Runs one pass over the entry at `index`.
    ///
    /// Returns true if the entry held tokens at the start of the pass.
    fn resolve_entry(&self, output: &mut PropertyMap, index: usize, replaced: &mut bool) -> bool {
        let Some((_, entry)) = output.get_index(index) else {
            return false;
        };
        if !entry.is_resolvable() {
            return false;
        }

        let start = self.config.start_delimiter.as_str();
        let end = self.config.end_delimiter.as_str();
        let original = entry.value().to_string();
        let tokens = tokenizer::all_tokens(&original, start, end, true);
        if tokens.is_empty() {
            return false;
        }

        let mut current = original.clone();
        for token in tokens {
            let (base, default) = self.config.split_token(token);
            let base = self.config.normalize_key(base);

            match output.get(&base) {
                Some(referenced) => {
                    if !self.config.has_tokens(referenced.value()) {
                        let placeholder = format!("{start}{token}{end}");
                        current = current.replace(&placeholder, referenced.value());
                        *replaced = true;
                    }
                }
                None => {
                    if let Some(default) = default {
                        current = default.to_string();
                        *replaced = true;
                    }
                }
            }

            // Later lookups within this pass see the partially resolved value
            if let Some((_, entry)) = output.get_index_mut(index) {
                entry.set_value(current.clone());
            }
        }

        true
    }
}
