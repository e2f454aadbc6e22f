//! Property-based tests for merging, tokenizing and resolution.

use proptest::prelude::*;

use crate::merger::PriorityMerger;
use crate::resolver::{Resolver, ResolverConfig};
use crate::tokenizer;
use crate::value::{PropertyMap, PropertyValue};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

// Values are either literal text or a placeholder, possibly with a default
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9 ]{0,8}",
        key_strategy().prop_map(|k| format!("${{{k}}}")),
        (key_strategy(), "[a-z]{0,4}").prop_map(|(k, d)| format!("${{{k}:{d}}}")),
        (key_strategy(), key_strategy()).prop_map(|(a, b)| format!("x${{{a}}}y${{{b}}}")),
    ]
}

fn map_strategy() -> impl Strategy<Value = PropertyMap> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k, PropertyValue::new(v)))
            .collect()
    })
}

fn lenient() -> Resolver {
    Resolver::new(ResolverConfig {
        ignore_unresolvable_placeholders: true,
        ..ResolverConfig::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The numerically smaller priority wins regardless of registration order
    #[test]
    fn merge_lower_priority_number_wins(
        key in key_strategy(),
        a in "[a-z]{1,5}",
        b in "[a-z]{1,5}",
        pa in 0u32..1000,
        pb in 0u32..1000,
        a_first in any::<bool>()
    ) {
        prop_assume!(pa != pb);
        let single = |v: &str| -> PropertyMap {
            std::iter::once((key.clone(), PropertyValue::new(v))).collect()
        };

        let mut merger = PriorityMerger::new();
        if a_first {
            merger.add(single(&a), pa);
            merger.add(single(&b), pb);
        } else {
            merger.add(single(&b), pb);
            merger.add(single(&a), pa);
        }

        let expected = if pa < pb { &a } else { &b };
        prop_assert_eq!(merger.merge()[&key].value(), expected.as_str());
    }

    // Among equal priorities the last registered set wins
    #[test]
    fn merge_same_priority_last_wins(
        values in prop::collection::vec("[a-z]{1,5}", 1..6),
        priority in any::<u32>()
    ) {
        let mut merger = PriorityMerger::new();
        for v in &values {
            merger.add(std::iter::once(("k".to_string(), PropertyValue::new(v.as_str()))).collect(), priority);
        }
        let merged = merger.merge();
        prop_assert_eq!(merged["k"].value(), values[values.len() - 1].as_str());
    }

    // The merged key set is the union of all registered key sets
    #[test]
    fn merge_keeps_every_key(maps in prop::collection::vec((map_strategy(), 0u32..5), 0..5)) {
        let mut expected: Vec<String> = maps
            .iter()
            .flat_map(|(m, _)| m.keys().cloned())
            .collect();
        expected.sort();
        expected.dedup();

        let mut merger = PriorityMerger::new();
        for (m, p) in maps {
            merger.add(m, p);
        }
        let mut keys: Vec<String> = merger.merge().keys().cloned().collect();
        keys.sort();
        prop_assert_eq!(keys, expected);
    }

    // Text without a start delimiter never holds tokens
    #[test]
    fn tokenizer_no_start_no_tokens(text in "[a-z0-9 }:.]{0,30}") {
        prop_assert!(!tokenizer::has_tokens(&text, "${", "}"));
        prop_assert!(tokenizer::first_token(&text, "${", "}").is_none());
        prop_assert!(tokenizer::all_tokens(&text, "${", "}", false).is_empty());
    }

    // A single wrapped key is extracted exactly
    #[test]
    fn tokenizer_extracts_wrapped_key(
        prefix in "[a-z ]{0,6}",
        key in "[a-z.:]{0,10}",
        suffix in "[a-z ]{0,6}"
    ) {
        let text = format!("{prefix}${{{key}}}{suffix}");
        prop_assert!(tokenizer::has_tokens(&text, "${", "}"));
        prop_assert_eq!(tokenizer::first_token(&text, "${", "}"), Some(key.as_str()));
    }

    // Distinct extraction never returns more tokens than the full list
    #[test]
    fn tokenizer_distinct_is_subset(keys in prop::collection::vec("[a-c]{1,2}", 0..6)) {
        let text: String = keys.iter().map(|k| format!("${{{k}}}-")).collect();
        let all = tokenizer::all_tokens(&text, "${", "}", false);
        let distinct = tokenizer::all_tokens(&text, "${", "}", true);
        prop_assert_eq!(all.len(), keys.len());
        prop_assert!(distinct.len() <= all.len());
        for token in &distinct {
            prop_assert!(all.contains(token));
        }
    }

    // Literal-only maps pass through resolution unchanged
    #[test]
    fn resolve_literals_unchanged(
        pairs in prop::collection::vec((key_strategy(), "[a-z0-9 ]{0,8}"), 0..8)
    ) {
        let input: PropertyMap = pairs
            .into_iter()
            .map(|(k, v)| (k, PropertyValue::new(v)))
            .collect();
        let output = Resolver::default().resolve(input.clone()).unwrap();
        prop_assert_eq!(output, input);
    }

    // Resolving an already resolved map changes nothing
    #[test]
    fn resolve_is_idempotent(input in map_strategy()) {
        let resolver = lenient();
        let once = resolver.resolve(input).unwrap();
        let twice = resolver.resolve(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Resolution never adds or drops keys
    #[test]
    fn resolve_preserves_keys(input in map_strategy()) {
        let keys: Vec<String> = input.keys().cloned().collect();
        let output = lenient().resolve(input).unwrap();
        let out_keys: Vec<String> = output.keys().cloned().collect();
        prop_assert_eq!(out_keys, keys);
    }

    // Strict and lenient modes agree whenever strict mode succeeds
    #[test]
    fn resolve_strict_matches_lenient(input in map_strategy()) {
        if let Ok(strict) = Resolver::default().resolve(input.clone()) {
            prop_assert_eq!(strict, lenient().resolve(input).unwrap());
        }
    }
}
