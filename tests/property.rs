//! # Property-Based Tests for rbmap
//!
//! This module contains property-based tests using proptest to discover
//! edge cases through randomized inputs. Each property compares the
//! containers against the standard library collections.
//!
//! ## Test Properties
//!
//! - Uniqueness: inserting an existing key never adds an entry
//! - Ordering: iteration always yields strictly increasing keys
//! - Oracle comparison: behavior matches `BTreeMap` and `BTreeSet`
//! - Bounds: `lower_bound` and `upper_bound` bracket every probe
//! - Erasure: erasing a missing key is a no-op
//! - Vector edits match `Vec`

use proptest::prelude::*;
use rbmap::{RbMap, RbSet, Stack, Vector};
use std::collections::{BTreeMap, BTreeSet};

// ===========================================================================
// Strategy Helpers
// ===========================================================================

/// Generate a vector of unique keys for testing
fn unique_keys(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
	prop::collection::hash_set(any::<i32>(), 0..max_len).prop_map(|s| s.into_iter().collect())
}

/// Generate a vector of key-value pairs with frequent key collisions
fn key_value_pairs(max_len: usize) -> impl Strategy<Value = Vec<(i16, i32)>> {
	prop::collection::vec((-200i16..200, any::<i32>()), 0..max_len)
}

/// Operations that can be performed on a map
#[derive(Debug, Clone)]
enum Op {
	Insert(i16, i32),
	Assign(i16, i32),
	Remove(i16),
	Lookup(i16),
	PopFirst,
	PopLast,
}

/// Generate a sequence of random operations
fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
	prop::collection::vec(
		prop_oneof![
			4 => (-100i16..100, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
			2 => (-100i16..100, any::<i32>()).prop_map(|(k, v)| Op::Assign(k, v)),
			3 => (-100i16..100).prop_map(Op::Remove),
			2 => (-100i16..100).prop_map(Op::Lookup),
			1 => Just(Op::PopFirst),
			1 => Just(Op::PopLast),
		],
		0..max_ops,
	)
}

/// Edits that can be applied to a vector
#[derive(Debug, Clone)]
enum VecOp {
	Push(u8),
	Pop,
	Insert(usize, u8),
	InsertN(usize, usize, u8),
	Erase(usize),
	EraseRange(usize, usize),
	Resize(usize, u8),
}

fn vec_operations(max_ops: usize) -> impl Strategy<Value = Vec<VecOp>> {
	prop::collection::vec(
		prop_oneof![
			any::<u8>().prop_map(VecOp::Push),
			Just(VecOp::Pop),
			(any::<usize>(), any::<u8>()).prop_map(|(i, v)| VecOp::Insert(i, v)),
			(any::<usize>(), 0usize..5, any::<u8>()).prop_map(|(i, n, v)| VecOp::InsertN(i, n, v)),
			any::<usize>().prop_map(VecOp::Erase),
			(any::<usize>(), any::<usize>()).prop_map(|(a, b)| VecOp::EraseRange(a, b)),
			(0usize..40, any::<u8>()).prop_map(|(n, v)| VecOp::Resize(n, v)),
		],
		0..max_ops,
	)
}

// ===========================================================================
// Insert Properties
// ===========================================================================

proptest! {
	/// Property: every inserted key can be looked up afterwards
	#[test]
	fn insert_then_lookup(keys in unique_keys(300)) {
		let mut map: RbMap<i32, i32> = RbMap::new();
		for &k in &keys {
			let (pos, inserted) = map.insert(k, k.wrapping_mul(2));
			prop_assert!(inserted);
			prop_assert_eq!(map.key_value_at(pos).map(|(k, _)| *k), Ok(k));
		}

		prop_assert_eq!(map.len(), keys.len());
		for &k in &keys {
			prop_assert_eq!(map.get(&k), Some(&k.wrapping_mul(2)));
		}
		map.assert_invariants();
	}

	/// Property: the first value for a key wins and the size tracks distinct keys
	#[test]
	fn insert_keeps_first_value(pairs in key_value_pairs(300)) {
		let mut map: RbMap<i16, i32> = RbMap::new();
		let mut oracle: BTreeMap<i16, i32> = BTreeMap::new();

		for &(k, v) in &pairs {
			let fresh = !oracle.contains_key(&k);
			oracle.entry(k).or_insert(v);
			prop_assert_eq!(map.insert(k, v).1, fresh);
		}

		prop_assert_eq!(map.len(), oracle.len());
		prop_assert!(map.iter().eq(oracle.iter()));
	}

	/// Property: iteration yields strictly increasing keys in both directions
	#[test]
	fn iteration_is_sorted(keys in prop::collection::vec(any::<i64>(), 0..300)) {
		let set: RbSet<i64> = keys.iter().copied().collect();

		let forward: Vec<i64> = set.iter().copied().collect();
		prop_assert!(forward.windows(2).all(|w| w[0] < w[1]));

		let mut backward: Vec<i64> = set.iter().rev().copied().collect();
		backward.reverse();
		prop_assert_eq!(&forward, &backward);
		prop_assert_eq!(set.iter().len(), forward.len());
	}
}

// ===========================================================================
// Oracle Comparison
// ===========================================================================

proptest! {
	/// Property: a random operation sequence behaves exactly like BTreeMap
	#[test]
	fn operations_match_btreemap(ops in operations(400)) {
		let mut map: RbMap<i16, i32> = RbMap::new();
		let mut oracle: BTreeMap<i16, i32> = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(k, v) => {
					let fresh = !oracle.contains_key(&k);
					oracle.entry(k).or_insert(v);
					prop_assert_eq!(map.insert(k, v).1, fresh);
				}
				Op::Assign(k, v) => {
					let fresh = oracle.insert(k, v).is_none();
					prop_assert_eq!(map.insert_or_assign(k, v).1, fresh);
				}
				Op::Remove(k) => {
					prop_assert_eq!(map.remove(&k), oracle.remove(&k));
				}
				Op::Lookup(k) => {
					prop_assert_eq!(map.get(&k), oracle.get(&k));
					prop_assert_eq!(map.count(&k), usize::from(oracle.contains_key(&k)));
				}
				Op::PopFirst => {
					prop_assert_eq!(map.pop_first(), oracle.pop_first());
				}
				Op::PopLast => {
					prop_assert_eq!(map.pop_last(), oracle.pop_last());
				}
			}
		}

		map.assert_invariants();
		prop_assert_eq!(map.len(), oracle.len());
		prop_assert!(map.iter().eq(oracle.iter()));
	}

	/// Property: set insert and remove report the same results as BTreeSet
	#[test]
	fn set_matches_btreeset(values in prop::collection::vec((any::<bool>(), 0u8..64), 0..400)) {
		let mut set: RbSet<u8> = RbSet::new();
		let mut oracle: BTreeSet<u8> = BTreeSet::new();

		for (insert, v) in values {
			if insert {
				prop_assert_eq!(set.insert(v).1, oracle.insert(v));
			} else {
				prop_assert_eq!(set.remove(&v), oracle.remove(&v));
			}
		}

		set.assert_invariants();
		prop_assert!(set.iter().eq(oracle.iter()));
	}
}

// ===========================================================================
// Bound and Erase Properties
// ===========================================================================

proptest! {
	/// Property: lower_bound <= upper_bound and both agree with BTreeSet ranges
	#[test]
	fn bounds_bracket_probe(keys in unique_keys(200), probe in any::<i32>()) {
		let set: RbSet<i32> = keys.iter().copied().collect();
		let oracle: BTreeSet<i32> = keys.into_iter().collect();

		let lower = set.value_at(set.lower_bound(&probe)).ok().copied();
		let upper = set.value_at(set.upper_bound(&probe)).ok().copied();

		prop_assert_eq!(lower, oracle.range(probe..).next().copied());
		prop_assert_eq!(upper, oracle.range((std::ops::Bound::Excluded(probe), std::ops::Bound::Unbounded)).next().copied());

		let (first, last) = set.equal_range(&probe);
		prop_assert_eq!(first, set.lower_bound(&probe));
		prop_assert_eq!(last, set.upper_bound(&probe));
		if oracle.contains(&probe) {
			prop_assert_eq!(set.next_pos(first), last);
		} else {
			prop_assert_eq!(first, last);
		}
	}

	/// Property: erasing a key that is not present changes nothing
	#[test]
	fn erase_missing_is_noop(keys in unique_keys(200), missing in any::<i32>()) {
		prop_assume!(!keys.contains(&missing));
		let mut set: RbSet<i32> = keys.iter().copied().collect();
		let before: Vec<i32> = set.iter().copied().collect();

		prop_assert_eq!(set.erase_key(&missing), 0);
		prop_assert!(!set.remove(&missing));
		prop_assert!(set.iter().copied().eq(before));
		set.assert_invariants();
	}

	/// Property: erasing every key in random order leaves an empty, valid tree
	#[test]
	fn erase_all_in_any_order(keys in unique_keys(200), seed in any::<u64>()) {
		let mut set: RbSet<i32> = keys.iter().copied().collect();
		let mut order = keys;
		let len = order.len().max(1);
		order.rotate_left((seed as usize) % len);

		for k in &order {
			prop_assert_eq!(set.erase_key(k), 1);
		}
		set.assert_invariants();
		prop_assert!(set.is_empty());
		prop_assert_eq!(set.begin(), set.end());
	}

	/// Property: a clone is equal and independent of the original
	#[test]
	fn clone_is_independent(pairs in key_value_pairs(200)) {
		let original: RbMap<i16, i32> = pairs.iter().copied().collect();
		let mut copy = original.clone();
		prop_assert_eq!(&copy, &original);

		copy.clear();
		prop_assert!(copy.is_empty());
		prop_assert_eq!(original.len(), pairs.iter().map(|(k, _)| *k).collect::<BTreeSet<_>>().len());
	}
}

// ===========================================================================
// Vector and Stack Properties
// ===========================================================================

proptest! {
	/// Property: vector edits produce the same contents as Vec
	#[test]
	fn vector_matches_vec(ops in vec_operations(200)) {
		let mut ours: Vector<u8> = Vector::new();
		let mut theirs: Vec<u8> = Vec::new();

		for op in ops {
			match op {
				VecOp::Push(v) => {
					ours.push_back(v);
					theirs.push(v);
				}
				VecOp::Pop => prop_assert_eq!(ours.pop_back(), theirs.pop()),
				VecOp::Insert(i, v) => {
					let i = i % (theirs.len() + 1);
					ours.insert(i, v);
					theirs.insert(i, v);
				}
				VecOp::InsertN(i, n, v) => {
					let i = i % (theirs.len() + 1);
					ours.insert_n(i, n, &v);
					theirs.splice(i..i, std::iter::repeat(v).take(n));
				}
				VecOp::Erase(i) => {
					if !theirs.is_empty() {
						let i = i % theirs.len();
						prop_assert_eq!(ours.erase(i), theirs.remove(i));
					}
				}
				VecOp::EraseRange(a, b) => {
					let a = a % (theirs.len() + 1);
					let b = a + b % (theirs.len() - a + 1);
					ours.erase_range(a, b);
					theirs.drain(a..b);
				}
				VecOp::Resize(n, v) => {
					ours.resize(n, v);
					theirs.resize(n, v);
				}
			}
			prop_assert_eq!(ours.data(), theirs.as_slice());
			prop_assert!(ours.capacity() >= ours.len());
		}
	}

	/// Property: a stack pops values in reverse push order
	#[test]
	fn stack_is_lifo(values in prop::collection::vec(any::<i32>(), 0..100)) {
		let mut stack: Stack<i32> = Stack::new();
		for &v in &values {
			stack.push(v);
			prop_assert_eq!(stack.top(), Ok(&v));
		}

		let mut popped = Vec::new();
		while let Some(v) = stack.pop() {
			popped.push(v);
		}
		popped.reverse();
		prop_assert_eq!(popped, values);
		prop_assert!(stack.top().is_err());
	}
}
