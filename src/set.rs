//! # Ordered Set
//!
//! [`RbSet`] is the tree engine with the [`Identity`] key policy: each value
//! is its own key. Values are immutable once inserted, so there is no
//! mutable iteration.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;

use crate::compare::{Compare, Identity, Natural};
use crate::error::Result;
use crate::iter::{self, Cursor, CursorMut, Position};
use crate::RbTree;

/// Iterator over the values in order.
pub type Iter<'a, T, C> = iter::Iter<'a, T, Identity, C>;

/// Iterator over the values that fall in a range.
pub type Range<'a, T, C> = iter::Range<'a, T, Identity, C>;

/// Consuming iterator over the values in order.
pub type IntoIter<T> = iter::IntoIter<T>;

/// An ordered set backed by a red-black tree.
///
/// # Example
///
/// ```
/// use rbmap::RbSet;
///
/// let mut set: RbSet<i32> = [5, 1, 3].into();
/// assert!(set.insert(4).1);
/// assert!(!set.insert(3).1);
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
/// ```
pub struct RbSet<T, C = Natural> {
	tree: RbTree<T, Identity, C>,
}

impl<T, C: Default> Default for RbSet<T, C> {
	fn default() -> Self {
		Self::with_comparator(C::default())
	}
}

impl<T> RbSet<T> {
	/// Creates an empty set ordered by [`Natural`].
	pub fn new() -> Self {
		RbSet {
			tree: RbTree::new(),
		}
	}
}

impl<T, C> RbSet<T, C> {
	/// Creates an empty set ordered by `compare`.
	pub fn with_comparator(compare: C) -> Self {
		RbSet {
			tree: RbTree::with_comparator(compare),
		}
	}

	pub fn key_comp(&self) -> &C {
		self.tree.key_comp()
	}

	/// The value comparator; identical to [`key_comp`](Self::key_comp) for
	/// a set.
	pub fn value_comp(&self) -> &C {
		self.tree.key_comp()
	}

	pub fn len(&self) -> usize {
		self.tree.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tree.is_empty()
	}

	pub fn max_size(&self) -> usize {
		self.tree.max_size()
	}

	pub fn begin(&self) -> Position {
		self.tree.begin()
	}

	pub fn end(&self) -> Position {
		self.tree.end()
	}

	pub fn next_pos(&self, pos: Position) -> Position {
		self.tree.next_pos(pos)
	}

	pub fn prev_pos(&self, pos: Position) -> Position {
		self.tree.prev_pos(pos)
	}

	/// The value at `pos`, failing with
	/// [`Error::InvalidPosition`](crate::Error::InvalidPosition) at the end.
	pub fn value_at(&self, pos: Position) -> Result<&T> {
		self.tree.value(pos)
	}

	pub fn cursor_at(&self, pos: Position) -> Cursor<'_, T, Identity, C> {
		self.tree.cursor_at(pos)
	}

	/// A cursor that can insert and remove values. It cannot modify them in
	/// place.
	pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, T, Identity, C> {
		self.tree.cursor_mut_at(pos)
	}

	pub fn cursor_front(&self) -> Cursor<'_, T, Identity, C> {
		self.tree.cursor_at(self.tree.begin())
	}

	pub fn cursor_back(&self) -> Cursor<'_, T, Identity, C> {
		self.tree.cursor_at(self.tree.last())
	}

	pub fn iter(&self) -> Iter<'_, T, C> {
		self.tree.iter()
	}

	/// The smallest value.
	pub fn first(&self) -> Option<&T> {
		self.tree.get(self.tree.begin())
	}

	/// The largest value.
	pub fn last(&self) -> Option<&T> {
		self.tree.get(self.tree.last())
	}

	pub fn erase(&mut self, pos: Position) -> Option<T> {
		self.tree.erase(pos)
	}

	pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
		self.tree.erase_range(first, last)
	}

	pub fn pop_first(&mut self) -> Option<T> {
		let first = self.tree.begin();
		self.tree.erase(first)
	}

	pub fn pop_last(&mut self) -> Option<T> {
		let last = self.tree.last();
		self.tree.erase(last)
	}

	pub fn clear(&mut self) {
		self.tree.clear();
	}

	pub fn swap(&mut self, other: &mut Self) {
		self.tree.swap(&mut other.tree);
	}
}

impl<T, C> RbSet<T, C> {
	pub fn contains<Q>(&self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.contains(value)
	}

	/// The stored value equivalent to `value`.
	pub fn get<Q>(&self, value: &Q) -> Option<&T>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.get(self.tree.find(value))
	}

	pub fn find<Q>(&self, value: &Q) -> Position
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.find(value)
	}

	pub fn count<Q>(&self, value: &Q) -> usize
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.count(value)
	}

	pub fn lower_bound<Q>(&self, value: &Q) -> Position
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.lower_bound(value)
	}

	pub fn upper_bound<Q>(&self, value: &Q) -> Position
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.upper_bound(value)
	}

	pub fn equal_range<Q>(&self, value: &Q) -> (Position, Position)
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.equal_range(value)
	}

	/// Iterates over the values that fall in `range`.
	///
	/// # Example
	///
	/// ```
	/// use rbmap::RbSet;
	///
	/// let set: RbSet<i32> = (0..10).collect();
	/// assert_eq!(set.range(3..=5).copied().collect::<Vec<_>>(), vec![3, 4, 5]);
	/// ```
	pub fn range<Q, R>(&self, range: R) -> Range<'_, T, C>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
		R: RangeBounds<Q>,
	{
		self.tree.range(range)
	}

	/// Removes the value equivalent to `value`, returning how many values
	/// were removed.
	pub fn erase_key<Q>(&mut self, value: &Q) -> usize
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.erase_key(value)
	}

	/// Removes the value equivalent to `value`, returning whether it was
	/// present.
	pub fn remove<Q>(&mut self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.tree.erase_key(value) == 1
	}

	/// Removes and returns the value equivalent to `value`.
	pub fn take<Q>(&mut self, value: &Q) -> Option<T>
	where
		T: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let pos = self.tree.find(value);
		self.tree.erase(pos)
	}
}

impl<T, C: Compare<T>> RbSet<T, C> {
	/// Builds a set from `values` ordered by `compare`.
	pub fn from_range<I>(values: I, compare: C) -> Self
	where
		I: IntoIterator<Item = T>,
	{
		let mut set = RbSet::with_comparator(compare);
		set.insert_range(values);
		set
	}

	/// Inserts `value` unless an equivalent value is present.
	///
	/// Returns the position of the stored value and whether it is new.
	pub fn insert(&mut self, value: T) -> (Position, bool) {
		self.tree.insert(value)
	}

	/// Like [`insert`](Self::insert); the hint is accepted and ignored.
	pub fn insert_hint(&mut self, hint: Position, value: T) -> Position {
		self.tree.insert_hint(hint, value)
	}

	pub fn insert_range<I>(&mut self, values: I)
	where
		I: IntoIterator<Item = T>,
	{
		self.tree.insert_range(values);
	}
}

impl<T: Clone, C: Compare<T> + Clone> Clone for RbSet<T, C> {
	fn clone(&self) -> Self {
		RbSet {
			tree: self.tree.clone(),
		}
	}
}

impl<T: fmt::Debug, C> fmt::Debug for RbSet<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<T: PartialEq, C> PartialEq for RbSet<T, C> {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().eq(other.iter())
	}
}

impl<T: Eq, C> Eq for RbSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for RbSet<T, C> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.iter().partial_cmp(other.iter())
	}
}

impl<T: Ord, C> Ord for RbSet<T, C> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.iter().cmp(other.iter())
	}
}

impl<T: Hash, C> Hash for RbSet<T, C> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		for value in self.iter() {
			value.hash(state);
		}
	}
}

impl<T, C: Compare<T> + Default> FromIterator<T> for RbSet<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		RbSet::from_range(iter, C::default())
	}
}

impl<T, C: Compare<T>> Extend<T> for RbSet<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.insert_range(iter);
	}
}

impl<'a, T: Copy + 'a, C: Compare<T>> Extend<&'a T> for RbSet<T, C> {
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.insert_range(iter.into_iter().copied());
	}
}

impl<T: Ord, const N: usize> From<[T; N]> for RbSet<T> {
	fn from(values: [T; N]) -> Self {
		values.into_iter().collect()
	}
}

impl<T, C> IntoIterator for RbSet<T, C> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> IntoIter<T> {
		self.tree.into_iter()
	}
}

impl<'a, T, C> IntoIterator for &'a RbSet<T, C> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T, C>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(any(test, feature = "test-utils"))]
impl<T: fmt::Debug, C: Compare<T>> RbSet<T, C> {
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
