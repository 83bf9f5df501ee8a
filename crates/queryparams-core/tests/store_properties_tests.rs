//! Property-based tests for `QueryParams` read/write behavior.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;
use queryparams_core::{
    cast, MemoryNavigator, ParamValue, ParameterSet, QueryParams, QueryParamsProvider, SetOptions,
};

fn store_at(url: &str) -> (Rc<QueryParamsProvider>, QueryParams) {
    let provider = Rc::new(QueryParamsProvider::new());
    let store = QueryParams::new(Rc::new(MemoryNavigator::new(url)), Rc::clone(&provider));
    (provider, store)
}

/// Keys that are plain identifiers.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Strings that stay strings when cast back.
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z &=?]{0,15}".prop_filter("keyword literals cast to other kinds", |s| {
        !matches!(s.trim(), "true" | "false" | "null" | "undefined" | "Infinity")
    })
}

/// Scalar values whose written form casts back to an equal value.
fn scalar_strategy() -> impl Strategy<Value = ParamValue> {
    prop_oneof![
        any::<bool>().prop_map(ParamValue::Bool),
        any::<i32>().prop_map(ParamValue::from),
        (-1.0e6f64..1.0e6).prop_map(ParamValue::Number),
        text_strategy().prop_map(ParamValue::String),
        Just(ParamValue::Null),
    ]
}

fn param_set_strategy() -> impl Strategy<Value = ParameterSet> {
    proptest::collection::btree_map(key_strategy(), scalar_strategy(), 0..6)
        .prop_map(|map: BTreeMap<String, ParamValue>| map.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: writing scalars then reading the same keys returns them.
    #[test]
    fn prop_set_then_get_roundtrips(params in param_set_strategy()) {
        let (_, store) = store_at("http://test.com/page");

        store.set(&params, &SetOptions::replacing()).unwrap();
        let keys: Vec<&String> = params.keys().collect();
        let read = store.get(&keys);

        prop_assert_eq!(read, params);
    }

    /// Property: reading from a URL without a query finds nothing.
    #[test]
    fn prop_get_on_empty_query_is_empty(keys in proptest::collection::vec(key_strategy(), 0..8)) {
        let (_, store) = store_at("http://test.com/page");
        prop_assert!(store.get(&keys).is_empty());
    }

    /// Property: merging keeps every existing key the input does not name,
    /// with its original raw value.
    #[test]
    fn prop_merge_keeps_untouched_keys(
        existing in param_set_strategy(),
        input in param_set_strategy(),
    ) {
        let (_, store) = store_at("http://test.com/page");
        store.set(&existing, &SetOptions::replacing()).unwrap();

        store.set(&input, &SetOptions::default()).unwrap();

        let keys: Vec<&String> = existing.keys().chain(input.keys()).collect();
        let read = store.get(&keys);
        for (key, value) in &input {
            prop_assert_eq!(read.get(key), Some(value));
        }
        for (key, value) in existing.iter().filter(|(k, _)| !input.contains_key(*k)) {
            prop_assert_eq!(read.get(key), Some(value));
        }
    }

    /// Property: replacing leaves only the input keys.
    #[test]
    fn prop_replace_drops_other_keys(
        existing in param_set_strategy(),
        input in param_set_strategy(),
    ) {
        let (_, store) = store_at("http://test.com/page");
        store.set(&existing, &SetOptions::replacing()).unwrap();

        store.set(&input, &SetOptions::replacing()).unwrap();

        let stale: Vec<&String> = existing.keys().filter(|k| !input.contains_key(*k)).collect();
        prop_assert!(store.get(&stale).is_empty());
    }

    /// Property: every successful write notifies exactly once, with the
    /// URL that was returned.
    #[test]
    fn prop_each_set_notifies_once(writes in proptest::collection::vec(param_set_strategy(), 1..5)) {
        let (provider, store) = store_at("http://test.com/page");
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        provider.subscribe(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let mut urls = Vec::new();
        for params in &writes {
            urls.push(store.set(params, &SetOptions::default()).unwrap());
        }

        prop_assert_eq!(calls.get(), writes.len());
        prop_assert_eq!(provider.history(), urls);
    }

    /// Property: cast never panics and is deterministic.
    #[test]
    fn prop_cast_is_deterministic(raw in ".{0,24}") {
        prop_assert_eq!(cast(&raw), cast(&raw));
    }
}
