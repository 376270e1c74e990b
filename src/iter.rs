//! # Positions, Cursors and Iterators
//!
//! Navigation over an [`RbTree`] comes in three layers:
//!
//! - [`Position`] is a copyable handle to one node, or to the past-the-end
//!   slot. It does not borrow the tree, so it survives mutations. It is
//!   turned back into data by the tree (`get`, `value`, `next_pos`, ...).
//! - [`Cursor`] and [`CursorMut`] borrow the tree and hold a position. They
//!   step in both directions, seek by key, and (for `CursorMut`) insert and
//!   remove in place.
//! - [`Iter`], [`IterMut`], [`IntoIter`] and [`Range`] are the usual Rust
//!   iterators, double-ended, for `for` loops and adapters.
//!
//! ## Stepping Rules
//!
//! ```text
//!            prev                 next
//!   end() <------- begin() ... last() -------> end()
//!     |                                         |
//!     +-------------- next(end()) = begin() ----+
//!                     prev(end()) = last()
//! ```
//!
//! Stepping past either edge lands on `end()`; stepping from `end()` wraps
//! to the opposite edge. A cursor can therefore cycle through the container
//! indefinitely.

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use slab::Slab;

use crate::compare::{Compare, KeyOf, PairKey};
use crate::error::Result;
use crate::{Node, NodeId, RbTree};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A weak handle to an element of a tree, or to the past-the-end slot.
///
/// Positions compare equal when they name the same node. A position stays
/// valid until its own element is erased. After that every read reports
/// [`Error::InvalidPosition`](crate::Error::InvalidPosition) and every step
/// lands on the end: the position carries the insertion stamp of its node,
/// so a later element reusing the same arena slot is never mistaken for it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
	pub(crate) id: Option<NodeId>,
	pub(crate) stamp: u64,
}

impl Position {
	/// The past-the-end position of every tree.
	pub const END: Position = Position {
		id: None,
		stamp: 0,
	};

	/// Returns `true` for the past-the-end position.
	#[inline]
	pub fn is_end(self) -> bool {
		self.id.is_none()
	}
}

impl Default for Position {
	fn default() -> Self {
		Position::END
	}
}

impl fmt::Debug for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.id {
			Some(id) => write!(f, "Position({}#{})", id, self.stamp),
			None => f.write_str("Position(end)"),
		}
	}
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// A read-only cursor over a tree.
pub struct Cursor<'t, T, X, C> {
	tree: &'t RbTree<T, X, C>,
	pos: Position,
}

impl<T, X, C> Clone for Cursor<'_, T, X, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T, X, C> Copy for Cursor<'_, T, X, C> {}

impl<'t, T, X, C> Cursor<'t, T, X, C> {
	pub(crate) fn new(tree: &'t RbTree<T, X, C>, pos: Position) -> Self {
		Cursor {
			tree,
			pos,
		}
	}

	/// The position the cursor is on.
	#[inline]
	pub fn position(&self) -> Position {
		self.pos
	}

	/// Returns `true` when the cursor is on the past-the-end slot.
	#[inline]
	pub fn is_end(&self) -> bool {
		self.pos.is_end()
	}

	/// The current value, or `None` at the end.
	#[inline]
	pub fn get(&self) -> Option<&'t T> {
		self.tree.get(self.pos)
	}

	/// The current value, failing with
	/// [`Error::InvalidPosition`](crate::Error::InvalidPosition) at the end.
	#[inline]
	pub fn value(&self) -> Result<&'t T> {
		self.tree.value(self.pos)
	}

	/// Steps to the next value; wraps from the end to the first value.
	pub fn move_next(&mut self) {
		self.pos = self.tree.next_pos(self.pos);
	}

	/// Steps to the previous value; wraps from the end to the last value.
	pub fn move_prev(&mut self) {
		self.pos = self.tree.prev_pos(self.pos);
	}

	/// The value [`move_next`](Self::move_next) would land on.
	pub fn peek_next(&self) -> Option<&'t T> {
		self.tree.get(self.tree.next_pos(self.pos))
	}

	/// The value [`move_prev`](Self::move_prev) would land on.
	pub fn peek_prev(&self) -> Option<&'t T> {
		self.tree.get(self.tree.prev_pos(self.pos))
	}

	/// Moves to the first value.
	pub fn seek_to_first(&mut self) {
		self.pos = self.tree.begin();
	}

	/// Moves to the last value.
	pub fn seek_to_last(&mut self) {
		self.pos = self.tree.last();
	}
}

impl<'t, T, X: KeyOf<T>, C> Cursor<'t, T, X, C> {
	/// Moves to the first value whose key is not less than `key`.
	pub fn seek<Q>(&mut self, key: &Q)
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.lower_bound(key);
	}

	/// Moves to the last value whose key is not greater than `key`.
	pub fn seek_for_prev<Q>(&mut self, key: &Q)
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.prev_pos(self.tree.upper_bound(key));
	}

	/// Moves to the value with key `key`, returning whether it exists. On a
	/// miss the cursor is left at the end.
	pub fn seek_exact<Q>(&mut self, key: &Q) -> bool
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.find(key);
		!self.pos.is_end()
	}
}

impl<'t, K, V, C> Cursor<'t, (K, V), PairKey, C> {
	/// The current key.
	pub fn key(&self) -> Option<&'t K> {
		self.get().map(|(k, _)| k)
	}

	/// The current key and value.
	pub fn key_value(&self) -> Option<(&'t K, &'t V)> {
		self.get().map(|(k, v)| (k, v))
	}
}

impl<T: fmt::Debug, X, C> fmt::Debug for Cursor<'_, T, X, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Cursor").field(&self.get()).finish()
	}
}

// ---------------------------------------------------------------------------
// CursorMut
// ---------------------------------------------------------------------------

/// A cursor with exclusive access to a tree.
///
/// Besides moving, it can insert values and remove the one it is on. It can
/// be downgraded to a [`Cursor`] but never the other way round.
pub struct CursorMut<'t, T, X, C> {
	tree: &'t mut RbTree<T, X, C>,
	pos: Position,
}

impl<'t, T, X, C> CursorMut<'t, T, X, C> {
	pub(crate) fn new(tree: &'t mut RbTree<T, X, C>, pos: Position) -> Self {
		CursorMut {
			tree,
			pos,
		}
	}

	#[inline]
	pub fn position(&self) -> Position {
		self.pos
	}

	#[inline]
	pub fn is_end(&self) -> bool {
		self.pos.is_end()
	}

	#[inline]
	pub fn get(&self) -> Option<&T> {
		self.tree.get(self.pos)
	}

	#[inline]
	pub fn value(&self) -> Result<&T> {
		self.tree.value(self.pos)
	}

	pub fn move_next(&mut self) {
		self.pos = self.tree.next_pos(self.pos);
	}

	pub fn move_prev(&mut self) {
		self.pos = self.tree.prev_pos(self.pos);
	}

	pub fn seek_to_first(&mut self) {
		self.pos = self.tree.begin();
	}

	pub fn seek_to_last(&mut self) {
		self.pos = self.tree.last();
	}

	/// Borrows this cursor as a read-only one at the same position.
	pub fn as_cursor(&self) -> Cursor<'_, T, X, C> {
		Cursor::new(self.tree, self.pos)
	}

	/// Removes the current value and moves to its successor.
	///
	/// Returns `None`, without moving, when the cursor is at the end.
	pub fn remove_current(&mut self) -> Option<T> {
		let next = self.tree.next_pos(self.pos);
		let value = self.tree.erase(self.pos)?;
		self.pos = next;
		Some(value)
	}
}

impl<'t, T, X: KeyOf<T>, C> CursorMut<'t, T, X, C> {
	/// See [`Cursor::seek`].
	pub fn seek<Q>(&mut self, key: &Q)
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.lower_bound(key);
	}

	/// See [`Cursor::seek_for_prev`].
	pub fn seek_for_prev<Q>(&mut self, key: &Q)
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.prev_pos(self.tree.upper_bound(key));
	}

	/// See [`Cursor::seek_exact`].
	pub fn seek_exact<Q>(&mut self, key: &Q) -> bool
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		self.pos = self.tree.find(key);
		!self.pos.is_end()
	}
}

impl<'t, T, X: KeyOf<T>, C: Compare<X::Key>> CursorMut<'t, T, X, C> {
	/// Inserts `value` and moves onto it, or onto the value already holding
	/// its key. Returns whether an insertion happened.
	pub fn insert(&mut self, value: T) -> bool {
		let (pos, inserted) = self.tree.insert(value);
		self.pos = pos;
		inserted
	}
}

impl<'t, K, V, C> CursorMut<'t, (K, V), PairKey, C> {
	pub fn key(&self) -> Option<&K> {
		self.get().map(|(k, _)| k)
	}

	/// Mutable access to the current mapped value. Keys stay immutable.
	pub fn value_mut(&mut self) -> Option<&mut V> {
		self.tree.get_mut(self.pos).map(|(_, v)| v)
	}

	pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
		self.tree.get_mut(self.pos).map(|(k, v)| (&*k, v))
	}
}

impl<'t, T, X, C> From<CursorMut<'t, T, X, C>> for Cursor<'t, T, X, C> {
	fn from(cursor: CursorMut<'t, T, X, C>) -> Self {
		let CursorMut {
			tree,
			pos,
		} = cursor;
		Cursor::new(tree, pos)
	}
}

impl<T: fmt::Debug, X, C> fmt::Debug for CursorMut<'_, T, X, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("CursorMut").field(&self.get()).finish()
	}
}

// ---------------------------------------------------------------------------
// Iter
// ---------------------------------------------------------------------------

/// In-order iterator over the values of a tree.
pub struct Iter<'t, T, X, C> {
	tree: &'t RbTree<T, X, C>,
	front: Option<NodeId>,
	back: Option<NodeId>,
	len: usize,
}

impl<'t, T, X, C> Iter<'t, T, X, C> {
	pub(crate) fn new(tree: &'t RbTree<T, X, C>) -> Self {
		Iter {
			tree,
			front: tree.begin().id,
			back: tree.last().id,
			len: tree.len(),
		}
	}
}

impl<T, X, C> Clone for Iter<'_, T, X, C> {
	fn clone(&self) -> Self {
		Iter {
			tree: self.tree,
			front: self.front,
			back: self.back,
			len: self.len,
		}
	}
}

impl<'t, T, X, C> Iterator for Iter<'t, T, X, C> {
	type Item = &'t T;

	fn next(&mut self) -> Option<&'t T> {
		if self.len == 0 {
			return None;
		}
		let id = self.front?;
		self.len -= 1;
		self.front = self.tree.successor(id);
		Some(&self.tree.nodes[id].value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}
}

impl<'t, T, X, C> DoubleEndedIterator for Iter<'t, T, X, C> {
	fn next_back(&mut self) -> Option<&'t T> {
		if self.len == 0 {
			return None;
		}
		let id = self.back?;
		self.len -= 1;
		self.back = self.tree.predecessor(id);
		Some(&self.tree.nodes[id].value)
	}
}

impl<T, X, C> ExactSizeIterator for Iter<'_, T, X, C> {}
impl<T, X, C> FusedIterator for Iter<'_, T, X, C> {}

impl<'t, T, X, C> IntoIterator for &'t RbTree<T, X, C> {
	type Item = &'t T;
	type IntoIter = Iter<'t, T, X, C>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

// ---------------------------------------------------------------------------
// IterMut
// ---------------------------------------------------------------------------

/// In-order iterator over mutable references to the values of a tree.
///
/// The references are gathered up front so that each slot is borrowed
/// exactly once, which costs one pointer per element.
pub struct IterMut<'t, T> {
	values: std::collections::vec_deque::IntoIter<&'t mut T>,
}

impl<'t, T> IterMut<'t, T> {
	pub(crate) fn new<X, C>(tree: &'t mut RbTree<T, X, C>) -> Self {
		let order = in_order(&tree.nodes, tree.begin().id);

		let mut slots: Vec<Option<&'t mut T>> = Vec::new();
		for (id, node) in tree.nodes.iter_mut() {
			if slots.len() <= id {
				slots.resize_with(id + 1, || None);
			}
			slots[id] = Some(&mut node.value);
		}

		let values: VecDeque<&'t mut T> = order.into_iter().filter_map(|id| slots[id].take()).collect();
		IterMut {
			values: values.into_iter(),
		}
	}
}

impl<'t, T> Iterator for IterMut<'t, T> {
	type Item = &'t mut T;

	fn next(&mut self) -> Option<&'t mut T> {
		self.values.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.values.size_hint()
	}
}

impl<'t, T> DoubleEndedIterator for IterMut<'t, T> {
	fn next_back(&mut self) -> Option<&'t mut T> {
		self.values.next_back()
	}
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T, X, C> RbTree<T, X, C> {
	/// Mutable iteration stays inside the crate: handing out `&mut T` for a
	/// set would let callers change keys.
	pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
		IterMut::new(self)
	}
}

/// Node ids in key order, starting from `first`.
fn in_order<T>(nodes: &Slab<Node<T>>, first: Option<NodeId>) -> VecDeque<NodeId> {
	let mut order = VecDeque::with_capacity(nodes.len());
	let mut current = first;
	while let Some(id) = current {
		order.push_back(id);
		current = next_id(nodes, id);
	}
	order
}

/// Successor over a bare arena, for iterators that own it.
fn next_id<T>(nodes: &Slab<Node<T>>, id: NodeId) -> Option<NodeId> {
	if let Some(mut next) = nodes[id].right {
		while let Some(left) = nodes[next].left {
			next = left;
		}
		return Some(next);
	}
	let mut child = id;
	let mut parent = nodes[id].parent;
	while let Some(p) = parent {
		if nodes[p].left == Some(child) {
			return Some(p);
		}
		child = p;
		parent = nodes[p].parent;
	}
	None
}

// ---------------------------------------------------------------------------
// IntoIter
// ---------------------------------------------------------------------------

/// Consuming in-order iterator. Values not yet yielded are dropped with it.
pub struct IntoIter<T> {
	nodes: Slab<Node<T>>,
	order: VecDeque<NodeId>,
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		let id = self.order.pop_front()?;
		self.nodes.try_remove(id).map(|node| node.value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.order.len(), Some(self.order.len()))
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	fn next_back(&mut self) -> Option<T> {
		let id = self.order.pop_back()?;
		self.nodes.try_remove(id).map(|node| node.value)
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, X, C> IntoIterator for RbTree<T, X, C> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> IntoIter<T> {
		let order = in_order(&self.nodes, self.begin().id);
		IntoIter {
			nodes: self.nodes,
			order,
		}
	}
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// In-order iterator over the values whose keys fall in a range.
///
/// A range whose start orders after its end is empty.
pub struct Range<'t, T, X, C> {
	tree: &'t RbTree<T, X, C>,
	front: Option<NodeId>,
	back: Option<NodeId>,
}

impl<'t, T, X: KeyOf<T>, C> Range<'t, T, X, C> {
	pub(crate) fn new<Q, R>(tree: &'t RbTree<T, X, C>, range: R) -> Self
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
		R: RangeBounds<Q>,
	{
		let front = match range.start_bound() {
			Bound::Included(key) => tree.lower_bound(key),
			Bound::Excluded(key) => tree.upper_bound(key),
			Bound::Unbounded => tree.begin(),
		};
		let past_back = match range.end_bound() {
			Bound::Included(key) => tree.upper_bound(key),
			Bound::Excluded(key) => tree.lower_bound(key),
			Bound::Unbounded => tree.end(),
		};
		let back = tree.prev_pos(past_back);

		let (front, back) = match (front.id, back.id) {
			(Some(first), Some(last))
				if !tree.compare.less(tree.key_at(last).borrow(), tree.key_at(first).borrow()) =>
			{
				(Some(first), Some(last))
			}
			_ => (None, None),
		};

		Range {
			tree,
			front,
			back,
		}
	}
}

impl<T, X, C> Clone for Range<'_, T, X, C> {
	fn clone(&self) -> Self {
		Range {
			tree: self.tree,
			front: self.front,
			back: self.back,
		}
	}
}

impl<'t, T, X, C> Iterator for Range<'t, T, X, C> {
	type Item = &'t T;

	fn next(&mut self) -> Option<&'t T> {
		let id = self.front?;
		if self.front == self.back {
			self.front = None;
			self.back = None;
		} else {
			self.front = self.tree.successor(id);
		}
		Some(&self.tree.nodes[id].value)
	}
}

impl<'t, T, X, C> DoubleEndedIterator for Range<'t, T, X, C> {
	fn next_back(&mut self) -> Option<&'t T> {
		let id = self.back?;
		if self.front == self.back {
			self.front = None;
			self.back = None;
		} else {
			self.back = self.tree.predecessor(id);
		}
		Some(&self.tree.nodes[id].value)
	}
}

impl<T, X, C> FusedIterator for Range<'_, T, X, C> {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Error, Identity, Natural};

	type IntTree = RbTree<i32, Identity>;
	type Pairs = RbTree<(i32, &'static str), PairKey>;

	fn tree_of(values: impl IntoIterator<Item = i32>) -> IntTree {
		let mut tree = IntTree::new();
		tree.insert_range(values);
		tree
	}

	#[test]
	fn cursor_cycles_through_end() {
		let tree = tree_of([1, 2, 3]);
		let mut cursor = tree.cursor_at(tree.begin());

		let mut seen = Vec::new();
		for _ in 0..7 {
			seen.push(cursor.get().copied());
			cursor.move_next();
		}
		assert_eq!(seen, vec![Some(1), Some(2), Some(3), None, Some(1), Some(2), Some(3)]);
		assert!(cursor.is_end());

		cursor.move_prev();
		assert_eq!(cursor.get(), Some(&3));
		assert_eq!(cursor.peek_next(), None);
		assert_eq!(cursor.peek_prev(), Some(&2));
	}

	#[test]
	fn cursor_value_at_end_is_an_error() {
		let tree = tree_of([1]);
		let cursor = tree.cursor_at(tree.end());
		assert!(cursor.is_end());
		assert_eq!(cursor.value(), Err(Error::InvalidPosition));
	}

	#[test]
	fn cursor_seeks() {
		let tree = tree_of([10, 20, 30]);
		let mut cursor = tree.cursor_at(tree.end());

		cursor.seek(&15);
		assert_eq!(cursor.get(), Some(&20));

		cursor.seek_for_prev(&15);
		assert_eq!(cursor.get(), Some(&10));

		cursor.seek_for_prev(&5);
		assert!(cursor.is_end());

		cursor.seek_for_prev(&99);
		assert_eq!(cursor.get(), Some(&30));

		assert!(cursor.seek_exact(&20));
		assert!(!cursor.seek_exact(&21));
		assert!(cursor.is_end());

		cursor.seek_to_last();
		assert_eq!(cursor.get(), Some(&30));
		cursor.seek_to_first();
		assert_eq!(cursor.get(), Some(&10));
	}

	#[test]
	fn cursor_mut_insert_and_remove() {
		let mut tree = tree_of([1, 3, 5]);
		{
			let mut cursor = tree.cursor_mut_at(Position::END);
			assert!(cursor.insert(4));
			assert_eq!(cursor.get(), Some(&4));
			assert!(!cursor.insert(4));

			assert_eq!(cursor.remove_current(), Some(4));
			assert_eq!(cursor.get(), Some(&5));

			cursor.seek_to_last();
			assert_eq!(cursor.remove_current(), Some(5));
			assert!(cursor.is_end());
			assert_eq!(cursor.remove_current(), None);
		}
		tree.assert_invariants();
		assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
	}

	#[test]
	fn cursor_mut_downgrades() {
		let mut tree = tree_of([7, 8]);
		let pos = tree.find(&8);
		let cursor = tree.cursor_mut_at(pos);
		assert_eq!(cursor.as_cursor().get(), Some(&8));

		let shared: Cursor<'_, _, _, _> = cursor.into();
		assert_eq!(shared.peek_prev(), Some(&7));
	}

	#[test]
	fn pair_cursors_expose_keys_and_values() {
		let mut tree = Pairs::new();
		tree.insert((1, "one"));
		tree.insert((2, "two"));

		let pos = tree.find(&2);
		assert_eq!(tree.cursor_at(pos).key_value(), Some((&2, &"two")));

		let mut cursor = tree.cursor_mut_at(pos);
		*cursor.value_mut().unwrap() = "TWO";
		assert_eq!(cursor.key(), Some(&2));
		let (k, v) = cursor.key_value_mut().unwrap();
		assert_eq!((*k, *v), (2, "TWO"));
	}

	#[test]
	fn iter_meets_in_the_middle() {
		let tree = tree_of(0..10);
		let mut iter = tree.iter();

		assert_eq!(iter.len(), 10);
		assert_eq!(iter.next(), Some(&0));
		assert_eq!(iter.next_back(), Some(&9));
		assert_eq!(iter.len(), 8);

		let rest: Vec<_> = iter.by_ref().copied().collect();
		assert_eq!(rest, (1..9).collect::<Vec<_>>());
		assert_eq!(iter.next(), None);
		assert_eq!(iter.next_back(), None);
	}

	#[test]
	fn reverse_iteration() {
		let tree = tree_of([3, 1, 2]);
		assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
	}

	#[test]
	fn iter_mut_visits_in_order() {
		let mut tree = Pairs::new();
		for (k, v) in [(2, "b"), (1, "a"), (3, "c")] {
			tree.insert((k, v));
		}
		// Erase and re-insert so slot order differs from key order.
		tree.erase_key(&1);
		tree.insert((0, "z"));

		let keys: Vec<i32> = tree.iter_mut().map(|(k, _)| *k).collect();
		assert_eq!(keys, vec![0, 2, 3]);

		for (_, v) in tree.iter_mut().rev() {
			*v = "x";
		}
		assert!(tree.iter().all(|(_, v)| *v == "x"));
	}

	#[test]
	fn into_iter_is_ordered_from_both_ends() {
		let tree = tree_of([5, 1, 4, 2, 3]);
		let mut iter = tree.into_iter();

		assert_eq!(iter.len(), 5);
		assert_eq!(iter.next(), Some(1));
		assert_eq!(iter.next_back(), Some(5));
		assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3, 4]);
	}

	fn collect(range: Range<'_, i32, Identity, Natural>) -> Vec<i32> {
		range.copied().collect()
	}

	#[test]
	fn ranges() {
		let tree = tree_of((0..20).map(|i| i * 5));

		assert_eq!(collect(tree.range(10..25)), vec![10, 15, 20]);
		assert_eq!(collect(tree.range(11..=25)), vec![15, 20, 25]);
		assert_eq!(collect(tree.range(..10)), vec![0, 5]);
		assert_eq!(collect(tree.range(90..)), vec![90, 95]);
		assert_eq!(collect(tree.range(96..)), Vec::<i32>::new());
		assert_eq!(collect(tree.range(12..13)), Vec::<i32>::new());
		assert_eq!(collect(tree.range((Bound::Excluded(10), Bound::Excluded(20)))), vec![15]);
		assert_eq!(collect(tree.range((Bound::Excluded(10), Bound::Excluded(10)))), Vec::<i32>::new());
		assert_eq!(tree.range::<i32, _>(..).count(), 20);
		assert_eq!(tree.range(10..=20).rev().copied().collect::<Vec<_>>(), vec![20, 15, 10]);
	}

	#[test]
	fn position_debug_and_default() {
		assert_eq!(Position::default(), Position::END);
		assert_eq!(format!("{:?}", Position::END), "Position(end)");
	}
}
