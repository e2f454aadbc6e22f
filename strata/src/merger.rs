//! Priority-ordered merging of property sources.
//!
//! Each source's entries are registered at a priority. Merging applies levels
//! from the lowest precedence (largest number) to the highest precedence
//! (smallest number), and sources within a level in registration order, so
//! later writes overwrite earlier ones on colliding keys.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::value::PropertyMap;

/// Merges property maps according to their priority.
///
/// # Examples
///
/// ```
/// use strata::{PriorityMerger, PropertyMap, PropertyValue};
///
/// let mut low = PropertyMap::new();
/// low.insert("key".to_string(), PropertyValue::new("low"));
/// let mut high = PropertyMap::new();
/// high.insert("key".to_string(), PropertyValue::new("high"));
///
/// let mut merger = PriorityMerger::new();
/// merger.add(high, 0);
/// merger.add(low, 10);
///
/// let merged = merger.merge();
/// assert_eq!(merged["key"].value(), "high");
/// ```
#[derive(Debug, Default)]
pub struct PriorityMerger {
    levels: BTreeMap<Reverse<u32>, Vec<PropertyMap>>,
}

impl PriorityMerger {
    /// Creates an empty merger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a set of entries at `priority`.
    ///
    /// Multiple sets at the same priority accumulate in call order; the last
    /// added wins on collision.
    pub fn add(&mut self, entries: PropertyMap, priority: u32) {
        self.levels
            .entry(Reverse(priority))
            .or_default()
            .push(entries);
    }

    /// Number of registered entry sets across all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Merge every registered set into one map.
    ///
    /// Keys keep the position of their first appearance; values reflect the
    /// final overwrite.
    #[must_use]
    pub fn merge(self) -> PropertyMap {
        let mut result = PropertyMap::new();

        // BTreeMap over Reverse(priority) iterates largest number first
        for (Reverse(priority), sets) in self.levels {
            for entries in sets {
                log::trace!("merging {} entries at priority {priority}", entries.len());
                result.extend(entries);
            }
        }

        log::debug!("merged {} distinct keys", result.len());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PropertyValue;

    fn map(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), PropertyValue::new(*v)))
            .collect()
    }

    #[test]
    fn test_empty_merger_yields_empty_map() {
        let merger = PriorityMerger::new();
        assert!(merger.is_empty());
        assert!(merger.merge().is_empty());
    }

    #[test]
    fn test_lower_number_wins_regardless_of_add_order() {
        let mut merger = PriorityMerger::new();
        merger.add(map(&[("k", "p0")]), 0);
        merger.add(map(&[("k", "p5")]), 5);
        assert_eq!(merger.merge()["k"].value(), "p0");

        let mut merger = PriorityMerger::new();
        merger.add(map(&[("k", "p5")]), 5);
        merger.add(map(&[("k", "p0")]), 0);
        assert_eq!(merger.merge()["k"].value(), "p0");
    }

    #[test]
    fn test_same_priority_last_added_wins() {
        let mut merger = PriorityMerger::new();
        merger.add(map(&[("k", "first")]), 7);
        merger.add(map(&[("k", "second")]), 7);
        assert_eq!(merger.len(), 2);
        assert_eq!(merger.merge()["k"].value(), "second");
    }

    #[test]
    fn test_non_colliding_keys_are_all_kept() {
        let mut merger = PriorityMerger::new();
        merger.add(map(&[("a", "1"), ("b", "2")]), 1);
        merger.add(map(&[("c", "3")]), 2);
        let merged = merger.merge();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["a"].value(), "1");
        assert_eq!(merged["c"].value(), "3");
    }

    #[test]
    fn test_order_follows_first_encounter() {
        let mut merger = PriorityMerger::new();
        merger.add(map(&[("z", "high"), ("y", "high")]), 0);
        merger.add(map(&[("a", "low"), ("z", "low")]), 9);

        let merged = merger.merge();
        let keys: Vec<_> = merged.keys().map(String::as_str).collect();
        // priority 9 is applied first, so its keys are encountered first
        assert_eq!(keys, vec!["a", "z", "y"]);
        assert_eq!(merged["z"].value(), "high");
    }

    #[test]
    fn test_resolvable_flag_carried_through() {
        let mut env = PropertyMap::new();
        env.insert("HOME".to_string(), PropertyValue::verbatim("${x}"));
        let mut merger = PriorityMerger::new();
        merger.add(env, crate::priority::ENVIRONMENT_VARIABLES);
        let merged = merger.merge();
        assert!(!merged["HOME"].is_resolvable());
    }

    #[test]
    fn test_extreme_priorities() {
        let mut merger = PriorityMerger::new();
        merger.add(map(&[("k", "lowest")]), crate::priority::LOWEST);
        merger.add(map(&[("k", "highest")]), crate::priority::HIGHEST);
        assert_eq!(merger.merge()["k"].value(), "highest");
    }
}
