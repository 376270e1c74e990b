//! # Stack Adapter
//!
//! [`Stack`] restricts a sequence to last-in first-out access. Any type
//! implementing [`Sequence`] can back it; [`Vector`] is the default, and
//! `Vec`, `VecDeque` and `SmallVec` work as well.
//!
//! ```
//! use rbmap::Stack;
//!
//! let mut stack: Stack<i32> = Stack::new();
//! stack.push(1);
//! stack.push(2);
//!
//! assert_eq!(stack.top(), Ok(&2));
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.len(), 1);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use smallvec::{Array, SmallVec};

use crate::error::{Error, Result};
use crate::vector::Vector;

/// A sequence that supports access at its back end.
pub trait Sequence {
	type Item;

	fn push_back(&mut self, value: Self::Item);

	fn pop_back(&mut self) -> Option<Self::Item>;

	fn back(&self) -> Option<&Self::Item>;

	fn back_mut(&mut self) -> Option<&mut Self::Item>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T> Sequence for Vector<T> {
	type Item = T;

	fn push_back(&mut self, value: T) {
		Vector::push_back(self, value);
	}

	fn pop_back(&mut self) -> Option<T> {
		Vector::pop_back(self)
	}

	fn back(&self) -> Option<&T> {
		Vector::back(self)
	}

	fn back_mut(&mut self) -> Option<&mut T> {
		Vector::back_mut(self)
	}

	fn len(&self) -> usize {
		Vector::len(self)
	}
}

impl<T> Sequence for Vec<T> {
	type Item = T;

	fn push_back(&mut self, value: T) {
		self.push(value);
	}

	fn pop_back(&mut self) -> Option<T> {
		self.pop()
	}

	fn back(&self) -> Option<&T> {
		self.last()
	}

	fn back_mut(&mut self) -> Option<&mut T> {
		self.last_mut()
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}
}

impl<T> Sequence for VecDeque<T> {
	type Item = T;

	fn push_back(&mut self, value: T) {
		VecDeque::push_back(self, value);
	}

	fn pop_back(&mut self) -> Option<T> {
		VecDeque::pop_back(self)
	}

	fn back(&self) -> Option<&T> {
		VecDeque::back(self)
	}

	fn back_mut(&mut self) -> Option<&mut T> {
		VecDeque::back_mut(self)
	}

	fn len(&self) -> usize {
		VecDeque::len(self)
	}
}

impl<A: Array> Sequence for SmallVec<A> {
	type Item = A::Item;

	fn push_back(&mut self, value: A::Item) {
		self.push(value);
	}

	fn pop_back(&mut self) -> Option<A::Item> {
		self.pop()
	}

	fn back(&self) -> Option<&A::Item> {
		self.last()
	}

	fn back_mut(&mut self) -> Option<&mut A::Item> {
		self.last_mut()
	}

	fn len(&self) -> usize {
		SmallVec::len(self)
	}
}

/// A last-in first-out adapter over a [`Sequence`].
pub struct Stack<T, S = Vector<T>> {
	seq: S,
	_item: PhantomData<T>,
}

impl<T, S: Sequence<Item = T> + Default> Default for Stack<T, S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, S: Sequence<Item = T>> Stack<T, S> {
	/// Creates an empty stack over `S::default()`.
	pub fn new() -> Self
	where
		S: Default,
	{
		Self::from_sequence(S::default())
	}

	/// Wraps an existing sequence; its back becomes the top.
	pub fn from_sequence(seq: S) -> Self {
		Stack {
			seq,
			_item: PhantomData,
		}
	}

	pub fn push(&mut self, value: T) {
		self.seq.push_back(value);
	}

	/// Removes and returns the top element.
	pub fn pop(&mut self) -> Option<T> {
		self.seq.pop_back()
	}

	/// The top element, failing with [`Error::OutOfRange`] when empty.
	pub fn top(&self) -> Result<&T> {
		self.seq.back().ok_or(Error::OutOfRange {
			index: 0,
			len: 0,
		})
	}

	pub fn top_mut(&mut self) -> Result<&mut T> {
		self.seq.back_mut().ok_or(Error::OutOfRange {
			index: 0,
			len: 0,
		})
	}

	pub fn len(&self) -> usize {
		self.seq.len()
	}

	pub fn is_empty(&self) -> bool {
		self.seq.is_empty()
	}

	/// Borrows the underlying sequence.
	pub fn as_sequence(&self) -> &S {
		&self.seq
	}

	/// Unwraps the underlying sequence.
	pub fn into_inner(self) -> S {
		self.seq
	}
}

impl<T, S: Clone> Clone for Stack<T, S> {
	fn clone(&self) -> Self {
		Stack {
			seq: self.seq.clone(),
			_item: PhantomData,
		}
	}
}

impl<T, S: fmt::Debug> fmt::Debug for Stack<T, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Stack").field(&self.seq).finish()
	}
}

impl<T, S: PartialEq> PartialEq for Stack<T, S> {
	fn eq(&self, other: &Self) -> bool {
		self.seq == other.seq
	}
}

impl<T, S: Eq> Eq for Stack<T, S> {}

impl<T, S: PartialOrd> PartialOrd for Stack<T, S> {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		self.seq.partial_cmp(&other.seq)
	}
}

impl<T, S: Ord> Ord for Stack<T, S> {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.seq.cmp(&other.seq)
	}
}

impl<T, S: Sequence<Item = T>> Extend<T> for Stack<T, S> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push(value);
		}
	}
}

impl<T, S: Sequence<Item = T> + Default> FromIterator<T> for Stack<T, S> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut stack = Stack::new();
		stack.extend(iter);
		stack
	}
}
