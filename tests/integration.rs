//! # Integration Tests for rbmap
//!
//! This module contains end-to-end integration tests that exercise the
//! containers through their public API with realistic workloads, using
//! `BTreeMap` and `BTreeSet` as oracles.

use rand::prelude::*;
use rbmap::{Error, Natural, RbMap, RbSet, Reversed, Stack, Vector};
use std::collections::{BTreeMap, BTreeSet};

// ===========================================================================
// Large Scale Operation Tests
// ===========================================================================

#[test]
fn large_scale_insert_and_lookup() {
	let mut map: RbMap<i32, i32> = RbMap::new();

	for i in 0..10_000 {
		map.insert(i, i * 10);
	}

	map.assert_invariants();
	assert_eq!(map.len(), 10_000);

	for i in 0..10_000 {
		assert_eq!(map.get(&i), Some(&(i * 10)), "Failed to find key {}", i);
	}
}

#[test]
fn large_scale_insert_and_remove() {
	let mut map: RbMap<i32, i32> = RbMap::new();

	for i in 0..10_000 {
		map.insert(i, i);
	}

	map.assert_invariants();

	for i in 0..10_000 {
		assert_eq!(map.remove(&i), Some(i), "Failed to remove key {}", i);
	}

	map.assert_invariants();
	assert!(map.is_empty());
	assert_eq!(map.begin(), map.end());
}

#[test]
fn large_scale_random_operations() {
	let mut map: RbMap<i32, i32> = RbMap::new();
	let mut expected: BTreeMap<i32, i32> = BTreeMap::new();
	let mut rng = rand::rng();

	for _ in 0..10_000 {
		let key: i32 = rng.random_range(0..1000);
		let op: u8 = rng.random_range(0..4);

		match op {
			0 => {
				let value = key * 10;
				map.insert_or_assign(key, value);
				expected.insert(key, value);
			}
			1 => {
				assert_eq!(map.remove(&key), expected.remove(&key), "Mismatch removing {}", key);
			}
			2 => {
				let ours = map.get_mut(&key).map(|v| {
					*v += 1;
					*v
				});
				let theirs = expected.get_mut(&key).map(|v| {
					*v += 1;
					*v
				});
				assert_eq!(ours, theirs, "Mismatch updating {}", key);
			}
			_ => {
				assert_eq!(map.get(&key), expected.get(&key), "Mismatch looking up {}", key);
			}
		}
	}

	map.assert_invariants();
	assert_eq!(map.len(), expected.len());
	assert!(map.iter().eq(expected.iter()));
}

// ===========================================================================
// Bounds and Range Tests
// ===========================================================================

#[test]
fn bounds_match_btreemap_ranges() {
	let map: RbMap<i32, ()> = (0..500).map(|i| (i * 3, ())).collect();
	let oracle: BTreeMap<i32, ()> = (0..500).map(|i| (i * 3, ())).collect();

	for probe in -5..1510 {
		let lower = map.key_value_at(map.lower_bound(&probe)).ok().map(|(k, _)| *k);
		let expected_lower = oracle.range(probe..).next().map(|(k, _)| *k);
		assert_eq!(lower, expected_lower, "lower_bound({})", probe);

		let upper = map.key_value_at(map.upper_bound(&probe)).ok().map(|(k, _)| *k);
		let expected_upper = oracle.range(probe + 1..).next().map(|(k, _)| *k);
		assert_eq!(upper, expected_upper, "upper_bound({})", probe);
	}
}

#[test]
fn range_queries_match_btreemap() {
	let mut rng = StdRng::seed_from_u64(7);
	let keys: Vec<i32> = (0..2000).map(|_| rng.random_range(-1000..1000)).collect();

	let map: RbMap<i32, i32> = keys.iter().map(|k| (*k, *k)).collect();
	let oracle: BTreeMap<i32, i32> = keys.iter().map(|k| (*k, *k)).collect();

	for _ in 0..200 {
		let a = rng.random_range(-1100..1100);
		let b = rng.random_range(a..1100);

		let ours: Vec<_> = map.range(a..b).collect();
		let theirs: Vec<_> = oracle.range(a..b).collect();
		assert_eq!(ours, theirs, "range {}..{}", a, b);

		let ours: Vec<_> = map.range(a..=b).rev().collect();
		let theirs: Vec<_> = oracle.range(a..=b).rev().collect();
		assert_eq!(ours, theirs, "range {}..={} reversed", a, b);
	}
}

// ===========================================================================
// Position Stability Tests
// ===========================================================================

#[test]
fn positions_survive_unrelated_mutations() {
	let mut map: RbMap<i32, String> = RbMap::new();
	for i in 0..100 {
		map.insert(i, i.to_string());
	}

	let anchor = map.find(&50);
	for i in (0..100).filter(|i| *i != 50) {
		if i % 2 == 0 {
			map.remove(&i);
		} else {
			map.insert(i + 1000, String::new());
		}
		assert_eq!(map.key_value_at(anchor), Ok((&50, &"50".to_string())));
	}
	map.assert_invariants();
}

#[test]
fn walk_with_positions_in_both_directions() {
	let map: RbMap<i32, i32> = (0..50).rev().map(|i| (i, -i)).collect();

	let mut forward = Vec::new();
	let mut pos = map.begin();
	while pos != map.end() {
		forward.push(*map.key_value_at(pos).unwrap().0);
		pos = map.next_pos(pos);
	}
	assert_eq!(forward, (0..50).collect::<Vec<_>>());

	let mut backward = Vec::new();
	let mut pos = map.prev_pos(map.end());
	while pos != map.end() {
		backward.push(*map.key_value_at(pos).unwrap().0);
		pos = map.prev_pos(pos);
	}
	assert_eq!(backward, (0..50).rev().collect::<Vec<_>>());
}

#[test]
fn erase_range_between_positions() {
	let mut map: RbMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
	let mut oracle: BTreeMap<i32, i32> = (0..100).map(|i| (i, i)).collect();

	let removed = map.erase_range(map.find(&25), map.find(&75));
	oracle.retain(|k, _| !(25..75).contains(k));

	assert_eq!(removed, 50);
	map.assert_invariants();
	assert!(map.iter().eq(oracle.iter()));

	let removed = map.erase_range(map.begin(), map.end());
	assert_eq!(removed, 50);
	assert!(map.is_empty());
}

#[test]
fn cursor_walks_and_edits() {
	let mut map: RbMap<i32, i32> = (0..10).map(|i| (i, 0)).collect();

	let begin = map.begin();
	let mut cursor = map.cursor_mut_at(begin);
	while let Some(value) = cursor.value_mut() {
		*value = 1;
		cursor.move_next();
		// Remove every other entry.
		if cursor.remove_current().is_none() {
			break;
		}
	}

	assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
	assert!(map.values().all(|v| *v == 1));
	map.assert_invariants();
}

// ===========================================================================
// Set Tests
// ===========================================================================

#[test]
fn set_random_workload_matches_btreeset() {
	let mut set: RbSet<u16> = RbSet::new();
	let mut oracle: BTreeSet<u16> = BTreeSet::new();
	let mut rng = StdRng::seed_from_u64(11);

	for _ in 0..5000 {
		let value = rng.random_range(0..300);
		if rng.random_bool(0.6) {
			assert_eq!(set.insert(value).1, oracle.insert(value));
		} else {
			assert_eq!(set.remove(&value), oracle.remove(&value));
		}
	}

	set.assert_invariants();
	assert!(set.iter().eq(oracle.iter()));
	assert_eq!(set.first(), oracle.first());
	assert_eq!(set.last(), oracle.last());
}

#[test]
fn set_with_reversed_order() {
	let set = RbSet::from_range(0..10, Reversed(Natural));

	assert_eq!(set.iter().copied().collect::<Vec<_>>(), (0..10).rev().collect::<Vec<_>>());
	assert_eq!(set.value_at(set.lower_bound(&4)), Ok(&4));
	assert_eq!(set.value_at(set.upper_bound(&4)), Ok(&3));
	set.assert_invariants();
}

#[test]
fn into_iter_consumes_in_order() {
	let set: RbSet<String> = ["delta", "alpha", "charlie", "bravo"].iter().map(|s| s.to_string()).collect();
	let words: Vec<String> = set.into_iter().collect();
	assert_eq!(words, vec!["alpha", "bravo", "charlie", "delta"]);
}

// ===========================================================================
// Vector and Stack Tests
// ===========================================================================

#[test]
fn vector_matches_vec_under_random_edits() {
	let mut ours: Vector<i32> = Vector::new();
	let mut theirs: Vec<i32> = Vec::new();
	let mut rng = StdRng::seed_from_u64(3);

	for step in 0..2000 {
		match rng.random_range(0..5) {
			0 => {
				ours.push_back(step);
				theirs.push(step);
			}
			1 => assert_eq!(ours.pop_back(), theirs.pop()),
			2 => {
				let index = rng.random_range(0..=theirs.len());
				ours.insert(index, step);
				theirs.insert(index, step);
			}
			3 if !theirs.is_empty() => {
				let index = rng.random_range(0..theirs.len());
				assert_eq!(ours.erase(index), theirs.remove(index));
			}
			_ => {
				let index = rng.random_range(0..=theirs.len());
				ours.insert_n(index, 2, &-step);
				theirs.splice(index..index, [-step, -step]);
			}
		}
		assert_eq!(ours.data(), theirs.as_slice());
	}
	assert!(ours.capacity() >= ours.len());
}

#[test]
fn vector_checked_access_reports_bounds() {
	let v: Vector<u8> = Vector::from(&b"abc"[..]);
	assert_eq!(v.at(2), Ok(&b'c'));
	assert_eq!(
		v.at(3),
		Err(Error::OutOfRange {
			index: 3,
			len: 3
		})
	);
}

#[test]
fn stack_of_map_snapshots() {
	let mut history: Stack<RbMap<&str, i32>> = Stack::new();
	let mut map: RbMap<&str, i32> = RbMap::new();

	for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
		map.insert(name, i as i32);
		history.push(map.clone());
	}

	assert_eq!(history.len(), 3);
	assert_eq!(history.top().map(|m| m.len()), Ok(3));
	history.pop();
	assert_eq!(history.top().map(|m| m.contains_key("c")), Ok(false));
}
