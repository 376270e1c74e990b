//! # rbmap: Ordered Containers on a Red-Black Tree
//!
//! This crate provides an ordered map ([`RbMap`]) and set ([`RbSet`]) built on
//! a single red-black tree engine ([`RbTree`]), together with a growable
//! array ([`Vector`]) and a stack adapter ([`Stack`]) over any sequence.
//!
//! ## Design Overview
//!
//! ### Node Arena
//!
//! Every tree owns a [`slab::Slab`] of nodes. A node is addressed by its slot
//! index, and links between nodes (`parent`, `left`, `right`) are
//! `Option<NodeId>`. Dropping the tree drops the arena, so no node can leak
//! or be freed twice.
//!
//! ### The Sentinel
//!
//! The classic formulation uses one shared black dummy node for every
//! external leaf and for the past-the-end position. Here that role is played
//! by `None`:
//!
//! - an absent child is `None`, and `None` is always black;
//! - the past-the-end [`Position`] wraps `None`;
//! - the root handle lives in the tree itself, not in a back-pointer.
//!
//! ```text
//!                 root (B)
//!                /        \
//!            5 (R)        20 (B)
//!           /    \        /    \
//!       1 (B)   9 (B)   None   None      <- every None is a black leaf
//!       /  \    /  \
//!    None None None None
//! ```
//!
//! ### Key Extraction
//!
//! The engine is generic over a stored value `T`, a key policy `X:`
//! [`KeyOf<T>`] and a comparator `C:` [`Compare`]. Maps store `(K, V)` with
//! [`PairKey`]; sets store `T` with [`Identity`].
//!
//! ### Positions and Cursors
//!
//! Lookups return a [`Position`], a copyable weak handle to a node. A
//! position stays valid across mutations elsewhere in the tree and is
//! invalidated only by erasing its own node. [`Cursor`] and [`CursorMut`]
//! borrow the tree to read, step and edit from a position.
//!
//! ## Basic Usage
//!
//! ```
//! use rbmap::RbMap;
//!
//! let mut map = RbMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! assert_eq!(map.get(&2), Some(&"two"));
//! assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! // Positions behave like bidirectional iterators.
//! let pos = map.lower_bound(&2);
//! assert_eq!(map.key_value_at(map.next_pos(pos)), Ok((&3, &"three")));
//! ```
//!
//! ## Thread Safety
//!
//! None of the containers synchronize. They are `Send`/`Sync` when their
//! contents are, like the standard collections.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::RangeBounds;

use log::debug;
use slab::Slab;

#[cfg(any(test, feature = "test-utils"))]
pub mod alloc;
pub mod compare;
pub mod error;
pub mod iter;
pub mod map;
pub mod set;
pub mod stack;
#[cfg(test)]
mod util;
pub mod vector;

pub use compare::{Compare, EntryCompare, Identity, KeyOf, Natural, PairKey, Reversed};
pub use error::{Error, Result};
pub use iter::{Cursor, CursorMut, Position};
pub use map::RbMap;
pub use set::RbSet;
pub use stack::{Sequence, Stack};
pub use vector::Vector;

// ---------------------------------------------------------------------------
// Node Model
// ---------------------------------------------------------------------------

/// Slot index of a node in the tree's arena.
pub(crate) type NodeId = usize;

/// Node color. Absent children count as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
	Red,
	Black,
}

/// Which child of a node.
///
/// Every rebalancing case has a mirror image; the algorithms are written once
/// in terms of a `Side` and its opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
	Left,
	Right,
}

impl Side {
	#[inline]
	fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

/// A tree node: structural links, color and the stored value.
pub(crate) struct Node<T> {
	pub(crate) parent: Option<NodeId>,
	pub(crate) left: Option<NodeId>,
	pub(crate) right: Option<NodeId>,
	pub(crate) color: Color,
	/// Insertion number, distinguishing this node from later tenants of its slot.
	pub(crate) stamp: u64,
	pub(crate) value: T,
}

impl<T> Node<T> {
	/// A fresh node is red with no children.
	#[inline]
	pub(crate) fn new(parent: Option<NodeId>, stamp: u64, value: T) -> Node<T> {
		Node {
			parent,
			left: None,
			right: None,
			color: Color::Red,
			stamp,
			value,
		}
	}

	#[inline]
	pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	#[inline]
	fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}
}

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// A red-black tree storing unique keys in comparator order.
///
/// This is the engine behind [`RbMap`] and [`RbSet`]. It can be used directly
/// with a custom [`KeyOf`] policy.
///
/// # Type Parameters
///
/// - `T`: the stored value.
/// - `X`: the key policy, extracting `X::Key` from a `&T`.
/// - `C`: the comparator over `X::Key`, [`Natural`] by default.
///
/// # Invariants
///
/// After every public call that mutates the tree:
///
/// 1. The root is black (or the tree is empty).
/// 2. No red node has a red child.
/// 3. Every path from a node down to an absent child crosses the same number
///    of black nodes.
/// 4. An in-order walk yields strictly increasing keys.
/// 5. [`len`](Self::len) equals the number of nodes reachable from the root.
pub struct RbTree<T, X, C = Natural> {
	nodes: Slab<Node<T>>,
	root: Option<NodeId>,
	/// Stamp of the most recently inserted node.
	stamps: u64,
	compare: C,
	_policy: PhantomData<fn() -> X>,
}

impl<T, X, C: Default> Default for RbTree<T, X, C> {
	fn default() -> Self {
		Self::new()
	}
}

// ---------------------------------------------------------------------------
// Construction, Capacity and Navigation
// ---------------------------------------------------------------------------

impl<T, X, C> RbTree<T, X, C> {
	/// Creates an empty tree ordered by `C::default()`.
	pub fn new() -> Self
	where
		C: Default,
	{
		Self::with_comparator(C::default())
	}

	/// Creates an empty tree ordered by `compare`.
	pub fn with_comparator(compare: C) -> Self {
		RbTree {
			nodes: Slab::new(),
			root: None,
			stamps: 0,
			compare,
			_policy: PhantomData,
		}
	}

	/// Returns the comparator.
	#[inline]
	pub fn key_comp(&self) -> &C {
		&self.compare
	}

	/// Returns the number of stored values.
	#[inline]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns `true` if the tree holds no values.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the largest number of values the tree could address.
	pub fn max_size(&self) -> usize {
		isize::MAX as usize / mem::size_of::<Node<T>>().max(1)
	}

	/// Returns the number of nodes on the longest root-to-leaf path.
	///
	/// The red-black invariants bound this by `2 * log2(len + 1)`.
	pub fn height(&self) -> usize {
		let mut deepest = 0;
		let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
		while let Some((id, depth)) = stack.pop() {
			deepest = deepest.max(depth);
			let node = &self.nodes[id];
			stack.extend(node.left.map(|child| (child, depth + 1)));
			stack.extend(node.right.map(|child| (child, depth + 1)));
		}
		deepest
	}

	/// Position of the smallest value, or [`end`](Self::end) when empty.
	#[inline]
	pub fn begin(&self) -> Position {
		self.position(self.root.map(|root| self.minimum(root)))
	}

	/// The past-the-end position.
	#[inline]
	pub fn end(&self) -> Position {
		Position::END
	}

	/// Position of the largest value, or [`end`](Self::end) when empty.
	#[inline]
	pub fn last(&self) -> Position {
		self.position(self.root.map(|root| self.maximum(root)))
	}

	/// Steps a position forward in key order.
	///
	/// The last position steps to `end()`. Stepping `end()` wraps around to
	/// `begin()`.
	pub fn next_pos(&self, pos: Position) -> Position {
		if pos.is_end() {
			return self.begin();
		}
		self.resolve(pos).map_or(Position::END, |id| self.position(self.successor(id)))
	}

	/// Steps a position backward in key order.
	///
	/// `end()` steps to the largest value; `begin()` steps to `end()`.
	pub fn prev_pos(&self, pos: Position) -> Position {
		if pos.is_end() {
			return self.last();
		}
		self.resolve(pos).map_or(Position::END, |id| self.position(self.predecessor(id)))
	}

	/// Stamps a node id into a position.
	#[inline]
	pub(crate) fn position(&self, id: Option<NodeId>) -> Position {
		match id {
			Some(id) => Position {
				id: Some(id),
				stamp: self.nodes[id].stamp,
			},
			None => Position::END,
		}
	}

	/// The live node `pos` names. A position whose node was erased resolves
	/// to `None`, even after another node takes over its slot.
	#[inline]
	pub(crate) fn resolve(&self, pos: Position) -> Option<NodeId> {
		pos.id.filter(|&id| self.nodes.get(id).is_some_and(|node| node.stamp == pos.stamp))
	}

	/// Returns the value at `pos`, or `None` for `end()`.
	#[inline]
	pub fn get(&self, pos: Position) -> Option<&T> {
		self.resolve(pos).map(|id| &self.nodes[id].value)
	}

	/// Returns the value at `pos`, failing with
	/// [`Error::InvalidPosition`] for `end()`.
	#[inline]
	pub fn value(&self, pos: Position) -> Result<&T> {
		self.get(pos).ok_or(Error::InvalidPosition)
	}

	/// Mutable access to a stored value. Callers must not change its key.
	#[inline]
	pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
		let id = self.resolve(pos)?;
		Some(&mut self.nodes[id].value)
	}

	/// Mutable access to a node known to be live.
	#[inline]
	pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut T {
		&mut self.nodes[id].value
	}

	/// Iterates over the values in key order.
	pub fn iter(&self) -> iter::Iter<'_, T, X, C> {
		iter::Iter::new(self)
	}

	/// A read-only cursor at `pos`.
	pub fn cursor_at(&self, pos: Position) -> Cursor<'_, T, X, C> {
		Cursor::new(self, pos)
	}

	/// A read-write cursor at `pos`.
	pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, T, X, C> {
		CursorMut::new(self, pos)
	}

	/// Exchanges the contents of two trees in O(1).
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	/// Removes every value without rebalancing.
	///
	/// Balance is irrelevant once nothing remains, so the nodes are dropped
	/// straight out of the arena and its memory is released.
	pub fn clear(&mut self) {
		if !self.is_empty() {
			debug!("clearing tree of {} nodes", self.len());
		}
		self.root = None;
		drop(mem::take(&mut self.nodes));
	}

	/// Removes the value at `pos`, returning it.
	///
	/// Returns `None` for `end()` or a position whose node is gone, even if
	/// a later insertion reused its slot. Other positions remain valid.
	pub fn erase(&mut self, pos: Position) -> Option<T> {
		let id = self.resolve(pos)?;
		self.unlink(id);
		Some(self.nodes.remove(id).value)
	}

	/// Removes every value in `[first, last)`, returning how many were removed.
	///
	/// A range spanning the whole tree is a [`clear`](Self::clear). Otherwise
	/// values are erased one at a time, each successor found before its
	/// predecessor is unlinked.
	pub fn erase_range(&mut self, first: Position, last: Position) -> usize {
		if first == self.begin() && last.is_end() {
			let removed = self.len();
			self.clear();
			return removed;
		}

		let mut removed = 0;
		let mut current = first;
		while current != last && !current.is_end() {
			let next = self.next_pos(current);
			if self.erase(current).is_some() {
				removed += 1;
			}
			current = next;
		}
		removed
	}

	// -----------------------------------------------------------------------
	// Structural Helpers
	// -----------------------------------------------------------------------

	#[inline]
	fn color(&self, link: Option<NodeId>) -> Color {
		link.map_or(Color::Black, |id| self.nodes[id].color)
	}

	#[inline]
	fn is_red(&self, id: NodeId) -> bool {
		self.nodes[id].color == Color::Red
	}

	/// Which side of `parent` the node `child` hangs on.
	#[inline]
	fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
		if self.nodes[parent].left == Some(child) {
			Side::Left
		} else {
			Side::Right
		}
	}

	pub(crate) fn minimum(&self, mut id: NodeId) -> NodeId {
		while let Some(left) = self.nodes[id].left {
			id = left;
		}
		id
	}

	pub(crate) fn maximum(&self, mut id: NodeId) -> NodeId {
		while let Some(right) = self.nodes[id].right {
			id = right;
		}
		id
	}

	/// In-order successor: leftmost node of the right subtree, else the
	/// first ancestor reached from a left child.
	pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
		if let Some(right) = self.nodes[id].right {
			return Some(self.minimum(right));
		}
		let mut child = id;
		let mut parent = self.nodes[id].parent;
		while let Some(p) = parent {
			if self.nodes[p].left == Some(child) {
				return Some(p);
			}
			child = p;
			parent = self.nodes[p].parent;
		}
		None
	}

	/// In-order predecessor, the mirror of [`successor`](Self::successor).
	pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
		if let Some(left) = self.nodes[id].left {
			return Some(self.maximum(left));
		}
		let mut child = id;
		let mut parent = self.nodes[id].parent;
		while let Some(p) = parent {
			if self.nodes[p].right == Some(child) {
				return Some(p);
			}
			child = p;
			parent = self.nodes[p].parent;
		}
		None
	}

	/// Points `parent`'s link to `old` at `new` instead. A missing parent
	/// means `old` was the root.
	fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
		match parent {
			None => self.root = new,
			Some(p) => {
				let side = self.side_of(old, p);
				*self.nodes[p].child_mut(side) = new;
			}
		}
	}

	/// Puts `replacement` in the place `node` occupies under its parent.
	fn transplant(&mut self, node: NodeId, replacement: Option<NodeId>) {
		let parent = self.nodes[node].parent;
		self.replace_child(parent, node, replacement);
		if let Some(replacement) = replacement {
			self.nodes[replacement].parent = parent;
		}
	}

	/// Rotates `node` down towards `dir`; its child on the opposite side
	/// takes its place.
	///
	/// ```text
	/// rotate(x, Left):
	///
	///       x                 y
	///      / \               / \
	///     a   y      =>     x   c
	///        / \           / \
	///       b   c         a   b
	/// ```
	fn rotate(&mut self, node: NodeId, dir: Side) {
		let Some(pivot) = self.nodes[node].child(dir.opposite()) else {
			return;
		};

		let inner = self.nodes[pivot].child(dir);
		*self.nodes[node].child_mut(dir.opposite()) = inner;
		if let Some(inner) = inner {
			self.nodes[inner].parent = Some(node);
		}

		let parent = self.nodes[node].parent;
		self.nodes[pivot].parent = parent;
		self.replace_child(parent, node, Some(pivot));

		*self.nodes[pivot].child_mut(dir) = Some(node);
		self.nodes[node].parent = Some(pivot);
	}

	// -----------------------------------------------------------------------
	// Rebalancing
	// -----------------------------------------------------------------------

	/// Restores the invariants after `node` was linked in red.
	fn insert_fixup(&mut self, mut node: NodeId) {
		while let Some(parent) = self.nodes[node].parent {
			if !self.is_red(parent) {
				break;
			}
			// A red node is never the root, so a red parent has a parent.
			let Some(grandparent) = self.nodes[parent].parent else {
				break;
			};

			let side = self.side_of(parent, grandparent);
			let uncle = self.nodes[grandparent].child(side.opposite());

			if let Some(uncle) = uncle.filter(|&uncle| self.is_red(uncle)) {
				// Red uncle: push the red up and continue from the grandparent.
				self.nodes[parent].color = Color::Black;
				self.nodes[uncle].color = Color::Black;
				self.nodes[grandparent].color = Color::Red;
				node = grandparent;
			} else {
				// Black uncle: straighten a zig-zag, then one rotation ends it.
				let parent = if self.nodes[parent].child(side.opposite()) == Some(node) {
					self.rotate(parent, side);
					node
				} else {
					parent
				};
				self.nodes[parent].color = Color::Black;
				self.nodes[grandparent].color = Color::Red;
				self.rotate(grandparent, side.opposite());
				break;
			}
		}

		if let Some(root) = self.root {
			self.nodes[root].color = Color::Black;
		}
	}

	/// Detaches `node` from the tree and rebalances. The slot itself is
	/// left for the caller to free.
	fn unlink(&mut self, node: NodeId) {
		let (left, right, parent, color) = {
			let n = &self.nodes[node];
			(n.left, n.right, n.parent, n.color)
		};

		let mut removed_color = color;
		let replacement;
		let replacement_parent;

		match (left, right) {
			(None, child) | (child, None) => {
				replacement = child;
				replacement_parent = parent;
				self.transplant(node, child);
			}
			(Some(left), Some(right)) => {
				let successor = self.minimum(right);
				removed_color = self.nodes[successor].color;
				replacement = self.nodes[successor].right;

				if successor == right {
					replacement_parent = Some(successor);
				} else {
					replacement_parent = self.nodes[successor].parent;
					self.transplant(successor, replacement);
					self.nodes[successor].right = Some(right);
					self.nodes[right].parent = Some(successor);
				}

				self.transplant(node, Some(successor));
				self.nodes[successor].left = Some(left);
				self.nodes[left].parent = Some(successor);
				self.nodes[successor].color = color;
			}
		}

		if removed_color == Color::Black {
			self.erase_fixup(replacement, replacement_parent);
		}
	}

	/// Restores the black height after a black node was removed.
	///
	/// `node` carries the deficit and may be absent, which is why its parent
	/// is tracked separately.
	fn erase_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
		while node != self.root && self.color(node) == Color::Black {
			let Some(p) = parent else {
				break;
			};

			let side = if self.nodes[p].left == node {
				Side::Left
			} else {
				Side::Right
			};

			let mut sibling = self.nodes[p].child(side.opposite());
			if let Some(s) = sibling.filter(|&s| self.is_red(s)) {
				self.nodes[s].color = Color::Black;
				self.nodes[p].color = Color::Red;
				self.rotate(p, side);
				sibling = self.nodes[p].child(side.opposite());
			}

			// Both children absent: nothing is left below to rebalance.
			let Some(mut s) = sibling else {
				break;
			};

			let near = self.nodes[s].child(side);
			let far = self.nodes[s].child(side.opposite());

			if self.color(near) == Color::Black && self.color(far) == Color::Black {
				self.nodes[s].color = Color::Red;
				node = Some(p);
				parent = self.nodes[p].parent;
				continue;
			}

			if self.color(far) == Color::Black {
				if let Some(near) = near {
					self.nodes[near].color = Color::Black;
				}
				self.nodes[s].color = Color::Red;
				self.rotate(s, side.opposite());
				let Some(rotated) = self.nodes[p].child(side.opposite()) else {
					break;
				};
				s = rotated;
			}

			self.nodes[s].color = self.nodes[p].color;
			self.nodes[p].color = Color::Black;
			if let Some(far) = self.nodes[s].child(side.opposite()) {
				self.nodes[far].color = Color::Black;
			}
			self.rotate(p, side);
			node = self.root;
			break;
		}

		if let Some(node) = node {
			self.nodes[node].color = Color::Black;
		}
	}
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

impl<T, X: KeyOf<T>, C> RbTree<T, X, C> {
	#[inline]
	fn key_at(&self, id: NodeId) -> &X::Key {
		X::key(&self.nodes[id].value)
	}

	/// Position of the first value whose key is not less than `key`.
	pub fn lower_bound<Q>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let mut current = self.root;
		let mut candidate = None;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if self.compare.less(X::key(&node.value).borrow(), key) {
				current = node.right;
			} else {
				candidate = Some(id);
				current = node.left;
			}
		}
		self.position(candidate)
	}

	/// Position of the first value whose key is greater than `key`.
	pub fn upper_bound<Q>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let mut current = self.root;
		let mut candidate = None;
		while let Some(id) = current {
			let node = &self.nodes[id];
			if self.compare.less(key, X::key(&node.value).borrow()) {
				candidate = Some(id);
				current = node.left;
			} else {
				current = node.right;
			}
		}
		self.position(candidate)
	}

	/// `(lower_bound(key), upper_bound(key))`.
	pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		(self.lower_bound(key), self.upper_bound(key))
	}

	/// Position of the value with key equivalent to `key`, or `end()`.
	pub fn find<Q>(&self, key: &Q) -> Position
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let pos = self.lower_bound(key);
		match pos.id {
			Some(id) if !self.compare.less(key, self.key_at(id).borrow()) => pos,
			_ => Position::END,
		}
	}

	/// Number of values with key equivalent to `key`: 0 or 1.
	pub fn count<Q>(&self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		usize::from(!self.find(key).is_end())
	}

	/// Returns `true` if a value with key equivalent to `key` is stored.
	pub fn contains<Q>(&self, key: &Q) -> bool
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		!self.find(key).is_end()
	}

	/// Removes the value with key equivalent to `key`, returning how many
	/// values were removed (0 or 1).
	pub fn erase_key<Q>(&mut self, key: &Q) -> usize
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
	{
		let pos = self.find(key);
		usize::from(self.erase(pos).is_some())
	}

	/// Iterates over the values whose keys fall in `range`.
	pub fn range<Q, R>(&self, range: R) -> iter::Range<'_, T, X, C>
	where
		X::Key: Borrow<Q>,
		C: Compare<Q>,
		Q: ?Sized,
		R: RangeBounds<Q>,
	{
		iter::Range::new(self, range)
	}
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

impl<T, X: KeyOf<T>, C: Compare<X::Key>> RbTree<T, X, C> {
	/// Inserts `value` unless an equivalent key is already stored.
	///
	/// Returns the position of the new value and `true`, or the position of
	/// the existing value and `false`; in that case `value` is dropped and
	/// the tree is unchanged.
	pub fn insert(&mut self, value: T) -> (Position, bool) {
		let (id, inserted) = self.insert_id(value);
		(self.position(Some(id)), inserted)
	}

	pub(crate) fn insert_id(&mut self, value: T) -> (NodeId, bool) {
		let mut parent = None;
		let mut side = Side::Left;
		let mut current = self.root;

		{
			let key = X::key(&value);
			while let Some(id) = current {
				let node = &self.nodes[id];
				let node_key = X::key(&node.value);
				side = if self.compare.less(key, node_key) {
					Side::Left
				} else if self.compare.less(node_key, key) {
					Side::Right
				} else {
					return (id, false);
				};
				parent = Some(id);
				current = node.child(side);
			}
		}

		self.stamps += 1;
		let id = self.nodes.insert(Node::new(parent, self.stamps, value));
		match parent {
			Some(p) => *self.nodes[p].child_mut(side) = Some(id),
			None => self.root = Some(id),
		}
		self.insert_fixup(id);

		(id, true)
	}

	/// Inserts `value`, ignoring the hint. Returns the position of the new
	/// or already present value.
	pub fn insert_hint(&mut self, _hint: Position, value: T) -> Position {
		self.insert(value).0
	}

	/// Inserts every value from `values`, skipping duplicate keys.
	pub fn insert_range<I: IntoIterator<Item = T>>(&mut self, values: I) {
		for value in values {
			self.insert(value);
		}
	}
}

impl<T: Clone, X: KeyOf<T>, C: Compare<X::Key> + Clone> Clone for RbTree<T, X, C> {
	/// Deep copy: every value is cloned and re-inserted into a fresh tree.
	///
	/// If a `clone` panics, the partially built copy is dropped and the
	/// source is untouched.
	fn clone(&self) -> Self {
		let mut tree = RbTree::with_comparator(self.compare.clone());
		tree.insert_range(self.iter().cloned());
		tree
	}
}

impl<T: fmt::Debug, X, C> fmt::Debug for RbTree<T, X, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

// ===========================================================================
// Test-Only Validation Module
// ===========================================================================

/// Invariant validation for testing.
#[cfg(any(test, feature = "test-utils"))]
impl<T, X: KeyOf<T>, C: Compare<X::Key>> RbTree<T, X, C>
where
	X::Key: fmt::Debug,
{
	/// Validates all tree invariants. Panics with diagnostic info if any
	/// invariant is violated.
	///
	/// # Invariants Checked
	///
	/// 1. Root color: the root is black and has no parent
	/// 2. Red rule: no red node has a red child
	/// 3. Black height: equal on both sides of every node
	/// 4. Link consistency: every child's parent link points back
	/// 5. Key ordering: in-order keys strictly increase
	/// 6. Length consistency: reachable node count equals `len()`
	pub fn assert_invariants(&self) {
		let Some(root) = self.root else {
			assert_eq!(self.nodes.len(), 0, "Empty tree still owns {} nodes", self.nodes.len());
			return;
		};

		// Invariant 1: Root color
		assert!(self.nodes.contains(root), "Root handle {} is dangling", root);
		assert_eq!(
			self.nodes[root].parent,
			None,
			"Root {:?} has a parent",
			self.key_at(root)
		);
		assert_eq!(self.nodes[root].color, Color::Black, "Root {:?} is red", self.key_at(root));

		// Invariants 2-4
		let mut reachable = 0;
		self.validate_node_recursive(root, &mut reachable);

		// Invariant 6: Length consistency
		assert_eq!(
			reachable,
			self.nodes.len(),
			"Reachable node count {} != len {}",
			reachable,
			self.nodes.len()
		);

		// Invariant 5: Key ordering
		let mut previous: Option<&X::Key> = None;
		let mut current = Some(self.minimum(root));
		while let Some(id) = current {
			let key = self.key_at(id);
			if let Some(previous) = previous {
				assert!(
					self.compare.less(previous, key),
					"Keys not strictly increasing: {:?} then {:?}",
					previous,
					key
				);
			}
			previous = Some(key);
			current = self.successor(id);
		}
	}

	/// Checks the subtree under `id` and returns its black height.
	fn validate_node_recursive(&self, id: NodeId, reachable: &mut usize) -> usize {
		*reachable += 1;
		assert!(
			*reachable <= self.nodes.len(),
			"More nodes reachable than stored; the links contain a cycle"
		);

		let node = &self.nodes[id];
		let mut heights = [0usize; 2];

		for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
			let Some(child) = node.child(side) else {
				continue;
			};
			assert!(self.nodes.contains(child), "Child handle {} is dangling", child);

			// Invariant 4: Link consistency
			assert_eq!(
				self.nodes[child].parent,
				Some(id),
				"Parent link of {:?} does not point back at {:?}",
				self.key_at(child),
				self.key_at(id)
			);

			// Invariant 2: Red rule
			if node.color == Color::Red {
				assert_eq!(
					self.nodes[child].color,
					Color::Black,
					"Red node {:?} has red child {:?}",
					self.key_at(id),
					self.key_at(child)
				);
			}

			*height = self.validate_node_recursive(child, reachable);
		}

		// Invariant 3: Black height
		assert_eq!(
			heights[0],
			heights[1],
			"Black height mismatch under {:?}: left {} right {}",
			self.key_at(id),
			heights[0],
			heights[1]
		);

		heights[0] + usize::from(node.color == Color::Black)
	}

	/// Number of black nodes on any root-to-leaf path.
	pub fn black_height(&self) -> usize {
		let mut height = 0;
		let mut current = self.root;
		while let Some(id) = current {
			if self.nodes[id].color == Color::Black {
				height += 1;
			}
			current = self.nodes[id].left;
		}
		height
	}
}
