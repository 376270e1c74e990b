//! # Ordered Map
//!
//! [`RbMap`] stores unique keys with a mapped value each, ordered by a
//! [`Compare`] strategy. It is the engine instantiated with `(K, V)` entries
//! and the [`PairKey`] policy.
//!
//! Insertion never overwrites: [`RbMap::insert`] on an existing key leaves
//! the stored value alone and reports `false`. Use
//! [`insert_or_assign`](RbMap::insert_or_assign) or
//! [`entry_or_default`](RbMap::entry_or_default) to update in place.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Map;
use std::ops::{Index, RangeBounds};

use crate::compare::{Compare, EntryCompare, Natural, PairKey};
use crate::error::Result;
use crate::iter::{self, Cursor, CursorMut, Position};
use crate::RbTree;

/// Iterator over `(&K, &V)` in key order.
pub type Iter<'a, K, V, C> = Map<iter::Iter<'a, (K, V), PairKey, C>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

/// Iterator over `(&K, &mut V)` in key order.
pub type IterMut<'a, K, V> = Map<iter::IterMut<'a, (K, V)>, fn(&'a mut (K, V)) -> (&'a K, &'a mut V)>;

/// Iterator over the keys in order.
pub type Keys<'a, K, V, C> = Map<iter::Iter<'a, (K, V), PairKey, C>, fn(&'a (K, V)) -> &'a K>;

/// Iterator over the values in key order.
pub type Values<'a, K, V, C> = Map<iter::Iter<'a, (K, V), PairKey, C>, fn(&'a (K, V)) -> &'a V>;

/// Iterator over mutable values in key order.
pub type ValuesMut<'a, K, V> = Map<iter::IterMut<'a, (K, V)>, fn(&'a mut (K, V)) -> &'a mut V>;

/// Iterator over the entries whose keys fall in a range.
pub type Range<'a, K, V, C> = Map<iter::Range<'a, (K, V), PairKey, C>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

/// Consuming iterator over `(K, V)` in key order.
pub type IntoIter<K, V> = iter::IntoIter<(K, V)>;

fn entry_ref<K, V>(entry: &(K, V)) -> (&K, &V) {
	(&entry.0, &entry.1)
}

fn entry_mut<K, V>(entry: &mut (K, V)) -> (&K, &mut V) {
	let (key, value) = entry;
	(&*key, value)
}

fn entry_key<K, V>(entry: &(K, V)) -> &K {
	&entry.0
}

fn entry_value<K, V>(entry: &(K, V)) -> &V {
	&entry.1
}

fn entry_value_mut<K, V>(entry: &mut (K, V)) -> &mut V {
	&mut entry.1
}

/// An ordered map backed by a red-black tree.
///
/// # Example
///
/// ```
/// use rbmap::RbMap;
///
/// let mut scores = RbMap::new();
/// scores.insert("carol", 7);
/// scores.insert("alice", 9);
/// scores.insert("bob", 4);
///
/// *scores.entry_or_default("bob") += 1;
/// *scores.entry_or_default("dave") += 3;
///
/// let ranked: Vec<_> = scores.iter().map(|(k, v)| (*k, *v)).collect();
/// assert_eq!(ranked, vec![("alice", 9), ("bob", 5), ("carol", 7), ("dave", 3)]);
/// ```
pub struct RbMap<K, V, C = Natural> {
	tree: RbTree<(K, V), PairKey, C>,
}

impl<K, V, C: Default> Default for RbMap<K, V, C> {
	fn default() -> Self {
		Self::with_comparator(C::default())
	}
}

// ---------------------------------------------------------------------------
// Construction and Capacity
// ---------------------------------------------------------------------------

impl<K, V> RbMap<K, V> {
	/// Creates an empty map ordered by [`Natural`].
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let map: RbMap<i32, &str> = RbMap::new();
	/// assert!(map.is_empty());
	/// ```
	pub fn new() -> Self {
		RbMap {
			tree: RbTree::new(),
		}
	}
}

impl<K, V, C> RbMap<K, V, C> {
	/// Creates an empty map ordered by `compare`.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::{Natural, RbMap, Reversed};
	///
	/// let mut map = RbMap::with_comparator(Reversed(Natural));
	/// map.insert(1, 'a');
	/// map.insert(2, 'b');
	/// assert_eq!(map.first_key_value(), Some((&2, &'b')));
	/// ```
	pub fn with_comparator(compare: C) -> Self {
		RbMap {
			tree: RbTree::with_comparator(compare),
		}
	}

	/// The key comparator.
	pub fn key_comp(&self) -> &C {
		self.tree.key_comp()
	}

	/// A comparator over whole entries that looks only at keys.
	pub fn value_comp(&self) -> EntryCompare<'_, C> {
		EntryCompare(self.tree.key_comp())
	}

	pub fn len(&self) -> usize {
		self.tree.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tree.is_empty()
	}

	/// The largest number of entries the map could hold.
	pub fn max_size(&self) -> usize {
		self.tree.max_size()
	}

	// -----------------------------------------------------------------------
	// Positions
	// -----------------------------------------------------------------------

	/// Position of the first entry, or [`end`](Self::end) when empty.
	pub fn begin(&self) -> Position {
		self.tree.begin()
	}

	/// The past-the-end position.
	pub fn end(&self) -> Position {
		self.tree.end()
	}

	/// See [`RbTree::next_pos`].
	pub fn next_pos(&self, pos: Position) -> Position {
		self.tree.next_pos(pos)
	}

	/// See [`RbTree::prev_pos`].
	pub fn prev_pos(&self, pos: Position) -> Position {
		self.tree.prev_pos(pos)
	}

	/// The entry at `pos`, failing with
	/// [`Error::InvalidPosition`](crate::Error::InvalidPosition) at the end.
	pub fn key_value_at(&self, pos: Position) -> Result<(&K, &V)> {
		self.tree.value(pos).map(entry_ref)
	}

	/// A read-only cursor at `pos`.
	pub fn cursor_at(&self, pos: Position) -> Cursor<'_, (K, V), PairKey, C> {
		self.tree.cursor_at(pos)
	}

	/// A read-write cursor at `pos`.
	pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, (K, V), PairKey, C> {
		self.tree.cursor_mut_at(pos)
	}

	/// A cursor on the first entry.
	pub fn cursor_front(&self) -> Cursor<'_, (K, V), PairKey, C> {
		self.tree.cursor_at(self.tree.begin())
	}

	/// A cursor on the last entry.
	pub fn cursor_back(&self) -> Cursor<'_, (K, V), PairKey, C> {
		self.tree.cursor_at(self.tree.last())
	}

	// -----------------------------------------------------------------------
	// Iteration
	// -----------------------------------------------------------------------

	/// Iterates over the entries in key order.
	pub fn iter(&self) -> Iter<'_, K, V, C> {
		self.tree.iter().map(entry_ref as fn(&(K, V)) -> (&K, &V))
	}

	/// Iterates over the entries in key order with mutable values.
	pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
		self.tree.iter_mut().map(entry_mut as fn(&mut (K, V)) -> (&K, &mut V))
	}

	pub fn keys(&self) -> Keys<'_, K, V, C> {
		self.tree.iter().map(entry_key as fn(&(K, V)) -> &K)
	}

	pub fn values(&self) -> Values<'_, K, V, C> {
		self.tree.iter().map(entry_value as fn(&(K, V)) -> &V)
	}

	pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
		self.tree.iter_mut().map(entry_value_mut as fn(&mut (K, V)) -> &mut V)
	}

	/// The entry with the smallest key.
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		self.tree.get(self.tree.begin()).map(entry_ref)
	}

	/// The entry with the largest key.
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		self.tree.get(self.tree.last()).map(entry_ref)
	}

	// -----------------------------------------------------------------------
	// Removal
	// -----------------------------------------------------------------------

	/// Removes and returns the entry at `pos`. Returns `None` for `end()`.
	pub fn erase(&mut self, pos: Position) -> Option<(K, V)> {
		self.tree.erase(pos)
	}

	/// Removes the entries in `[first, last)`, returning how many there were.
	pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
		self.tree.erase_range(first, last)
	}

	/// Removes and returns the entry with the smallest key.
	pub fn pop_first(&mut self) -> Option<(K, V)> {
		let first = self.tree.begin();
		self.tree.erase(first)
	}

	/// Removes and returns the entry with the largest key.
	pub fn pop_last(&mut self) -> Option<(K, V)> {
		let last = self.tree.last();
		self.tree.erase(last)
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.tree.clear();
	}

	/// Exchanges the contents of two maps.
	pub fn swap(&mut self, other: &mut Self) {
		self.tree.swap(&mut other.tree);
	}
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl<K, V, C> RbMap<K, V, C> {
	/// Returns a reference to the value for `key`.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let mut map = RbMap::new();
	/// map.insert(String::from("apple"), 3);
	///
	/// assert_eq!(map.get("apple"), Some(&3));
	/// assert_eq!(map.get("pear"), None);
	/// ```
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.get(self.tree.find(key)).map(|(_, v)| v)
	}

	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let pos = self.tree.find(key);
		self.tree.get_mut(pos).map(|(_, v)| v)
	}

	/// Returns the stored key and its value.
	pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.get(self.tree.find(key)).map(entry_ref)
	}

	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.contains(key)
	}

	/// Position of the entry for `key`, or `end()`.
	pub fn find<Q>(&self, key: &Q) -> Position
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.find(key)
	}

	/// Number of entries for `key`: 0 or 1.
	pub fn count<Q>(&self, key: &Q) -> usize
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.count(key)
	}

	/// Position of the first entry whose key is not less than `key`.
	pub fn lower_bound<Q>(&self, key: &Q) -> Position
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.lower_bound(key)
	}

	/// Position of the first entry whose key is greater than `key`.
	pub fn upper_bound<Q>(&self, key: &Q) -> Position
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.upper_bound(key)
	}

	pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.equal_range(key)
	}

	/// Iterates over the entries whose keys fall in `range`.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let map: RbMap<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')].into();
	/// let middle: String = map.range(2..4).map(|(_, c)| *c).collect();
	/// assert_eq!(middle, "bc");
	/// ```
	pub fn range<Q, R>(&self, range: R) -> Range<'_, K, V, C>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
		R: RangeBounds<Q>,
	{
		self.tree.range(range).map(entry_ref as fn(&(K, V)) -> (&K, &V))
	}

	/// Removes the entry for `key`, returning how many entries were removed.
	pub fn erase_key<Q>(&mut self, key: &Q) -> usize
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.erase_key(key)
	}

	/// Removes the entry for `key`, returning its value.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let mut map = RbMap::new();
	/// map.insert(1, "one");
	///
	/// assert_eq!(map.remove(&1), Some("one"));
	/// assert_eq!(map.remove(&1), None); // Already removed
	/// ```
	pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.remove_entry(key).map(|(_, v)| v)
	}

	/// Removes the entry for `key`, returning the stored key and value.
	pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let pos = self.tree.find(key);
		self.tree.erase(pos)
	}
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

impl<K, V, C: Compare<K>> RbMap<K, V, C> {
	/// Builds a map from `entries` ordered by `compare`. Later duplicates of
	/// a key are dropped.
	pub fn from_range<I>(entries: I, compare: C) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut map = RbMap::with_comparator(compare);
		map.insert_range(entries);
		map
	}

	/// Inserts `value` under `key` unless the key is present.
	///
	/// Returns the position of the entry for `key` and whether it was newly
	/// inserted. An existing entry keeps its value.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let mut map = RbMap::new();
	/// let (_, inserted) = map.insert(1, "first");
	/// assert!(inserted);
	///
	/// let (pos, inserted) = map.insert(1, "second");
	/// assert!(!inserted);
	/// assert_eq!(map.key_value_at(pos), Ok((&1, &"first")));
	/// ```
	pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
		self.tree.insert((key, value))
	}

	/// Like [`insert`](Self::insert); the hint is accepted and ignored.
	pub fn insert_hint(&mut self, hint: Position, key: K, value: V) -> Position {
		self.tree.insert_hint(hint, (key, value))
	}

	/// Inserts every entry from `entries`, skipping keys already present.
	pub fn insert_range<I>(&mut self, entries: I)
	where
		I: IntoIterator<Item = (K, V)>,
	{
		self.tree.insert_range(entries);
	}

	/// Inserts `value` under `key`, replacing the value of an existing entry.
	///
	/// Returns the entry's position and `true` if the key was new.
	pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
		let pos = self.tree.find(&key);
		match pos.id {
			Some(id) => {
				self.tree.value_mut(id).1 = value;
				(pos, false)
			}
			None => self.tree.insert((key, value)),
		}
	}

	/// Returns the value for `key`, inserting `V::default()` first if the
	/// key is absent.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbMap;
	///
	/// let mut counts: RbMap<&str, u32> = RbMap::new();
	/// for word in ["a", "b", "a"] {
	///     *counts.entry_or_default(word) += 1;
	/// }
	/// assert_eq!(counts.get("a"), Some(&2));
	/// assert_eq!(counts.get("b"), Some(&1));
	/// ```
	pub fn entry_or_default(&mut self, key: K) -> &mut V
	where
		V: Default,
	{
		let id = match self.tree.find(&key).id {
			Some(id) => id,
			None => self.tree.insert_id((key, V::default())).0,
		};
		&mut self.tree.value_mut(id).1
	}
}

// ---------------------------------------------------------------------------
// Trait Implementations
// ---------------------------------------------------------------------------

impl<K: Clone, V: Clone, C: Compare<K> + Clone> Clone for RbMap<K, V, C> {
	fn clone(&self) -> Self {
		RbMap {
			tree: self.tree.clone(),
		}
	}
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RbMap<K, V, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RbMap<K, V, C> {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<K: Eq, V: Eq, C> Eq for RbMap<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for RbMap<K, V, C> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<K: Ord, V: Ord, C> Ord for RbMap<K, V, C> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<K: Hash, V: Hash, C> Hash for RbMap<K, V, C> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		for entry in self.iter() {
			entry.hash(state);
		}
	}
}

impl<K, V, C, Q> Index<&Q> for RbMap<K, V, C>
where
	K: Borrow<Q>,
	C: Compare<Q>,
	Q: ?Sized,
{
	type Output = V;

	/// # Panics
	///
	/// Panics if the key is not present.
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

impl<K, V, C: Compare<K> + Default> FromIterator<(K, V)> for RbMap<K, V, C> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		RbMap::from_range(iter, C::default())
	}
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for RbMap<K, V, C> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		self.insert_range(iter);
	}
}

impl<'a, K: Copy, V: Copy, C: Compare<K>> Extend<(&'a K, &'a V)> for RbMap<K, V, C> {
	fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
		self.insert_range(iter.into_iter().map(|(k, v)| (*k, *v)));
	}
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbMap<K, V> {
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl<K, V, C> IntoIterator for RbMap<K, V, C> {
	type Item = (K, V);
	type IntoIter = IntoIter<K, V>;

	fn into_iter(self) -> IntoIter<K, V> {
		self.tree.into_iter()
	}
}

impl<'a, K, V, C> IntoIterator for &'a RbMap<K, V, C> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V, C>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, K, V, C> IntoIterator for &'a mut RbMap<K, V, C> {
	type Item = (&'a K, &'a mut V);
	type IntoIter = IterMut<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

#[cfg(any(test, feature = "test-utils"))]
impl<K: fmt::Debug, V, C: Compare<K>> RbMap<K, V, C> {
	/// Validates the underlying tree. See [`RbTree::assert_invariants`].
	pub fn assert_invariants(&self) {
		self.tree.assert_invariants();
	}

	pub fn black_height(&self) -> usize {
		self.tree.black_height()
	}

	pub fn height(&self) -> usize {
		self.tree.height()
	}
}
