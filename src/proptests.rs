use crate::RadixMap;

use proptest::prelude::*;
use proptest::string::string_regex;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Remove(String),
    Get(String),
    Pop(String),
    Clear,
}

fn key_strategy() -> impl Strategy<Value = String> {
    // Small alphabets force heavy prefix sharing, so splits and merges fire
    // constantly; the single-letter pattern produces pure chain shapes and
    // the kana pattern exercises multi-byte char boundaries.
    prop_oneof![
        4 => string_regex("[a-d]{0,12}").expect("valid regex"),
        2 => string_regex("[A-Za-z0-9]{1,16}").expect("valid regex"),
        1 => string_regex("A{1,16}").expect("valid regex"),
        1 => string_regex("[あいう]{0,6}").expect("valid regex"),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        50 => (key_strategy(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => key_strategy().prop_map(Op::Remove),
        19 => key_strategy().prop_map(Op::Get),
        10 => key_strategy().prop_map(Op::Pop),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=1500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut map: RadixMap<u64> = RadixMap::new();
        let mut model: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_map = map.insert(&key, value);
                    let old_model = model.insert(key, value);
                    prop_assert_eq!(old_map, old_model);
                }
                Op::Remove(key) => {
                    let old_map = map.remove(&key);
                    let old_model = model.remove(&key);
                    prop_assert_eq!(old_map, old_model);
                }
                Op::Get(key) => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                }
                Op::Pop(key) => {
                    let popped = map.pop(&key);
                    let expected = model.remove(&key);
                    prop_assert_eq!(popped.ok(), expected);
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert!(map.check_invariants().is_ok());

        let got: Vec<(String, u64)> = map.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);

        let got_rev: Vec<(String, u64)> = map.reverse_iter().map(|(k, v)| (k, *v)).collect();
        let expected_rev: Vec<(String, u64)> =
            model.iter().rev().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got_rev, expected_rev);
    }

    #[test]
    fn prop_roundtrip(key in key_strategy(), value in any::<u64>()) {
        let mut map: RadixMap<u64> = RadixMap::new();
        prop_assert_eq!(map.insert(&key, value), None);
        prop_assert_eq!(map.get(&key), Some(&value));
        prop_assert_eq!(map.remove(&key), Some(value));
        prop_assert_eq!(map.get(&key), None);
        prop_assert_eq!(map.len(), 0);
        prop_assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn prop_insert_is_idempotent(keys in prop::collection::vec(key_strategy(), 0..64)) {
        let mut once: RadixMap<u64> = RadixMap::new();
        let mut twice: RadixMap<u64> = RadixMap::new();
        for (i, key) in keys.iter().enumerate() {
            once.insert(key, i as u64);
            twice.insert(key, i as u64);
            twice.insert(key, i as u64);
        }
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(&once, &twice);
        prop_assert!(twice.check_invariants().is_ok());
    }

    #[test]
    fn prop_equality_is_order_independent(
        pairs in prop::collection::btree_map(key_strategy(), any::<u64>(), 0..48)
            .prop_flat_map(|m| {
                let pairs: Vec<(String, u64)> = m.into_iter().collect();
                let shuffled = Just(pairs.clone()).prop_shuffle();
                (Just(pairs), shuffled)
            })
    ) {
        let (ordered, shuffled) = pairs;
        let a: RadixMap<u64> = ordered.into_iter().collect();
        let b: RadixMap<u64> = shuffled.into_iter().collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_clone_detaches(
        pairs in prop::collection::btree_map(key_strategy(), any::<u64>(), 1..32)
    ) {
        let original: RadixMap<u64> = pairs.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let mut copy = original.clone();

        for key in pairs.keys() {
            prop_assert!(copy.remove(key).is_some());
        }
        prop_assert!(copy.is_empty());
        prop_assert!(copy.check_invariants().is_ok());

        for (key, value) in &pairs {
            prop_assert_eq!(original.get(key), Some(value));
        }
        prop_assert!(original.check_invariants().is_ok());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["a", "b", "c", "aa", "ab", "ba"];

    for_each_permutation(&keys, |perm| {
        let mut map: RadixMap<u64> = RadixMap::new();
        let mut model: BTreeMap<String, u64> = BTreeMap::new();

        for (i, key) in perm.into_iter().enumerate() {
            let value = i as u64;
            assert_eq!(map.insert(key, value), model.insert(key.to_owned(), value));
        }

        map.check_invariants().unwrap();
        let got: Vec<(String, u64)> = map.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = ["a", "b", "c", "aa", "ab", "ba"];

    for_each_permutation(&keys, |perm| {
        let mut map: RadixMap<u64> = RadixMap::new();
        for (i, key) in keys.iter().enumerate() {
            map.insert(key, i as u64);
        }

        for (removed, key) in perm.iter().enumerate() {
            assert!(map.remove(key).is_some());
            map.check_invariants().unwrap();
            assert_eq!(map.len(), keys.len() - removed - 1);
        }
        assert!(map.is_empty());
    });
}
