//! # Growable Array
//!
//! [`Vector`] is a contiguous buffer of `T` managed directly through the
//! global allocator. It is the default storage of [`Stack`](crate::Stack)
//! and the staging area for bulk operations.
//!
//! ## Growth
//!
//! An empty vector owns no memory. The first growth allocates room for two
//! elements; every later growth doubles the capacity, or jumps straight to
//! the required size when a bulk insert needs more than double. Capacity
//! never shrinks except through [`swap`](Vector::swap) or drop.
//!
//! Zero-sized element types never allocate; their capacity is `usize::MAX`.
//!
//! ## Panic Safety
//!
//! Bulk inserts (`insert_n`, `insert_slice`, `insert_iter`, `assign*`)
//! build their new elements in a separate buffer before touching the
//! vector. If a `Clone` panics, the staged elements are dropped, the staged
//! buffer is freed, and the vector is left exactly as it was.

use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice::{self, SliceIndex};

use log::{debug, trace};

use crate::error::{Error, Result};

/// Capacity of the first allocation.
const INITIAL_CAPACITY: usize = 2;

/// Layout of a buffer holding `cap` values, or `None` when no memory is
/// involved.
fn buffer_layout<T>(cap: usize) -> Option<Layout> {
	if mem::size_of::<T>() == 0 || cap == 0 {
		None
	} else {
		Layout::array::<T>(cap).ok()
	}
}

/// A contiguous growable array.
///
/// # Example
///
/// ```
/// use rbmap::Vector;
///
/// let mut v = Vector::new();
/// v.push_back(1);
/// v.push_back(3);
/// v.insert(1, 2);
///
/// assert_eq!(v.data(), &[1, 2, 3]);
/// assert_eq!(v.at(1), Ok(&2));
/// assert!(v.at(3).is_err());
/// ```
pub struct Vector<T> {
	ptr: NonNull<T>,
	len: usize,
	cap: usize,
	_owns: PhantomData<T>,
}

// SAFETY: the vector uniquely owns its buffer, like `Vec<T>`.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T> Default for Vector<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Vector<T> {
	const IS_ZST: bool = mem::size_of::<T>() == 0;

	/// Creates an empty vector without allocating.
	pub fn new() -> Self {
		Vector {
			ptr: NonNull::dangling(),
			len: 0,
			cap: if Self::IS_ZST {
				usize::MAX
			} else {
				0
			},
			_owns: PhantomData,
		}
	}

	/// Creates an empty vector with room for `cap` elements.
	///
	/// # Panics
	///
	/// Panics if `cap` exceeds [`max_size`](Self::max_size).
	pub fn with_capacity(cap: usize) -> Self {
		let mut vector = Self::new();
		if let Err(err) = vector.reserve(cap) {
			panic!("{}", err);
		}
		vector
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of elements the current buffer can hold.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.cap
	}

	/// The largest capacity the element type allows.
	pub fn max_size(&self) -> usize {
		if Self::IS_ZST {
			usize::MAX
		} else {
			isize::MAX as usize / mem::size_of::<T>()
		}
	}

	/// The elements as a slice.
	#[inline]
	pub fn data(&self) -> &[T] {
		// SAFETY: the first `len` slots are initialized.
		unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
	}

	/// The elements as a mutable slice.
	#[inline]
	pub fn data_mut(&mut self) -> &mut [T] {
		// SAFETY: the first `len` slots are initialized and uniquely borrowed.
		unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
	}

	/// Checked access, failing with [`Error::OutOfRange`].
	pub fn at(&self, index: usize) -> Result<&T> {
		let len = self.len;
		self.data().get(index).ok_or(Error::OutOfRange {
			index,
			len,
		})
	}

	/// Checked mutable access, failing with [`Error::OutOfRange`].
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
		let len = self.len;
		self.data_mut().get_mut(index).ok_or(Error::OutOfRange {
			index,
			len,
		})
	}

	pub fn front(&self) -> Option<&T> {
		self.data().first()
	}

	pub fn front_mut(&mut self) -> Option<&mut T> {
		self.data_mut().first_mut()
	}

	pub fn back(&self) -> Option<&T> {
		self.data().last()
	}

	pub fn back_mut(&mut self) -> Option<&mut T> {
		self.data_mut().last_mut()
	}

	pub fn iter(&self) -> slice::Iter<'_, T> {
		self.data().iter()
	}

	pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
		self.data_mut().iter_mut()
	}

	// -----------------------------------------------------------------------
	// Capacity Management
	// -----------------------------------------------------------------------

	/// Ensures the capacity is at least `new_cap`. Never shrinks.
	///
	/// Fails with [`Error::CapacityOverflow`] before allocating if `new_cap`
	/// exceeds [`max_size`](Self::max_size). Allocation failure aborts, as
	/// for `Vec`; use [`try_reserve`](Self::try_reserve) to observe it.
	pub fn reserve(&mut self, new_cap: usize) -> Result<()> {
		match self.try_reserve(new_cap) {
			Err(Error::AllocFailed {
				bytes,
			}) => {
				let layout = Layout::from_size_align(bytes, mem::align_of::<T>())
					.unwrap_or_else(|_| Layout::new::<T>());
				alloc::handle_alloc_error(layout)
			}
			other => other,
		}
	}

	/// Like [`reserve`](Self::reserve), but reports allocation failure as
	/// [`Error::AllocFailed`]. On failure the vector is unchanged.
	pub fn try_reserve(&mut self, new_cap: usize) -> Result<()> {
		if new_cap <= self.cap {
			return Ok(());
		}

		let max = self.max_size();
		let overflow = Error::CapacityOverflow {
			requested: new_cap,
			max,
		};
		if new_cap > max {
			return Err(overflow);
		}
		let new_layout = Layout::array::<T>(new_cap).map_err(|_| overflow.clone())?;

		trace!("reallocating vector from {} to {} elements", self.cap, new_cap);

		let raw = match buffer_layout::<T>(self.cap) {
			// SAFETY: `new_layout` has non-zero size since `T` is not zero-sized.
			None => unsafe { alloc::alloc(new_layout) },
			// SAFETY: `ptr` was allocated with `old_layout`, and the new size
			// fits in `isize`.
			Some(old_layout) => unsafe {
				alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
			},
		};

		match NonNull::new(raw.cast::<T>()) {
			Some(ptr) => {
				self.ptr = ptr;
				self.cap = new_cap;
				Ok(())
			}
			None => Err(Error::AllocFailed {
				bytes: new_layout.size(),
			}),
		}
	}

	/// Makes room for `additional` more elements using the doubling policy.
	///
	/// # Panics
	///
	/// Panics if the required capacity exceeds `max_size()`.
	fn grow_for(&mut self, additional: usize) {
		let Some(required) = self.len.checked_add(additional) else {
			panic!("capacity overflow");
		};
		if required <= self.cap {
			return;
		}

		let doubled = if self.cap == 0 {
			INITIAL_CAPACITY
		} else {
			self.cap.saturating_mul(2)
		};
		let new_cap = required.max(doubled.min(self.max_size()));

		if let Err(err) = self.reserve(new_cap) {
			panic!("{}", err);
		}
	}

	// -----------------------------------------------------------------------
	// Modifiers
	// -----------------------------------------------------------------------

	/// Appends `value`, growing the buffer if it is full.
	pub fn push_back(&mut self, value: T) {
		if self.len == self.cap {
			self.grow_for(1);
		}
		// SAFETY: `len < cap` after growing, so the slot is in bounds and
		// uninitialized.
		unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
		self.len += 1;
	}

	/// Removes and returns the last element.
	pub fn pop_back(&mut self) -> Option<T> {
		if self.len == 0 {
			return None;
		}
		self.len -= 1;
		// SAFETY: the slot at the old `len - 1` is initialized and no longer
		// counted.
		Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
	}

	/// Inserts `value` at `index`, shifting later elements right.
	///
	/// # Panics
	///
	/// Panics if `index > len`.
	pub fn insert(&mut self, index: usize, value: T) {
		assert!(index <= self.len, "insertion index (is {}) should be <= len (is {})", index, self.len);

		if self.len == self.cap {
			self.grow_for(1);
		}
		// SAFETY: `index <= len < cap`; the tail is moved up one slot before
		// the gap is filled.
		unsafe {
			let gap = self.ptr.as_ptr().add(index);
			ptr::copy(gap, gap.add(1), self.len - index);
			ptr::write(gap, value);
		}
		self.len += 1;
	}

	/// Inserts `n` clones of `value` at `index`.
	///
	/// # Panics
	///
	/// Panics if `index > len`. A panicking `clone` leaves the vector
	/// unchanged.
	pub fn insert_n(&mut self, index: usize, n: usize, value: &T)
	where
		T: Clone,
	{
		assert!(index <= self.len, "insertion index (is {}) should be <= len (is {})", index, self.len);
		let staged = Self::stage(n, (0..n).map(|_| value.clone()));
		self.splice_in(index, staged);
	}

	/// Inserts clones of `values` at `index`, in order.
	pub fn insert_slice(&mut self, index: usize, values: &[T])
	where
		T: Clone,
	{
		assert!(index <= self.len, "insertion index (is {}) should be <= len (is {})", index, self.len);
		let staged = Self::stage(values.len(), values.iter().cloned());
		self.splice_in(index, staged);
	}

	/// Inserts every item of `values` at `index`, in order.
	pub fn insert_iter<I>(&mut self, index: usize, values: I)
	where
		I: IntoIterator<Item = T>,
	{
		assert!(index <= self.len, "insertion index (is {}) should be <= len (is {})", index, self.len);
		let values = values.into_iter();
		let staged = Self::stage(values.size_hint().0, values);
		self.splice_in(index, staged);
	}

	/// Collects `values` into a fresh buffer.
	fn stage<I: Iterator<Item = T>>(hint: usize, values: I) -> Vector<T> {
		let mut staged = Vector::new();
		if staged.try_reserve(hint).is_err() {
			// The hint is only a hint; growth will report real failures.
			staged = Vector::new();
		}
		for value in values {
			staged.push_back(value);
		}
		staged
	}

	/// Moves every element of `staged` into the gap at `index`.
	fn splice_in(&mut self, index: usize, mut staged: Vector<T>) {
		let n = staged.len;
		if n == 0 {
			return;
		}
		self.grow_for(n);

		// SAFETY: capacity covers `len + n`. The tail moves up `n` slots, the
		// staged elements are copied into the gap, and `staged` forgets them
		// so they are owned exactly once.
		unsafe {
			let gap = self.ptr.as_ptr().add(index);
			ptr::copy(gap, gap.add(n), self.len - index);
			ptr::copy_nonoverlapping(staged.ptr.as_ptr(), gap, n);
			staged.len = 0;
		}
		self.len += n;
	}

	/// Removes and returns the element at `index`, shifting later elements
	/// left.
	///
	/// # Panics
	///
	/// Panics if `index >= len`.
	pub fn erase(&mut self, index: usize) -> T {
		assert!(index < self.len, "removal index (is {}) should be < len (is {})", index, self.len);

		// SAFETY: `index < len`; the value is read out before the tail moves
		// over its slot.
		unsafe {
			let slot = self.ptr.as_ptr().add(index);
			let value = ptr::read(slot);
			ptr::copy(slot.add(1), slot, self.len - index - 1);
			self.len -= 1;
			value
		}
	}

	/// Drops the elements in `first..last` and closes the gap.
	///
	/// # Panics
	///
	/// Panics unless `first <= last <= len`.
	pub fn erase_range(&mut self, first: usize, last: usize) {
		assert!(first <= last, "range start (is {}) should be <= end (is {})", first, last);
		assert!(last <= self.len, "range end (is {}) should be <= len (is {})", last, self.len);

		let tail = self.len - last;
		// SAFETY: the erased elements are uncounted before they are dropped,
		// so a panicking destructor leaks the tail instead of double-dropping.
		unsafe {
			self.len = first;
			let gap = self.ptr.as_ptr().add(first);
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(gap, last - first));
			ptr::copy(gap.add(last - first), gap, tail);
		}
		self.len = first + tail;
	}

	/// Shortens the vector to `len`, dropping the rest.
	pub fn truncate(&mut self, len: usize) {
		if len >= self.len {
			return;
		}
		let tail = self.len - len;
		// SAFETY: the dropped slots are uncounted first.
		unsafe {
			self.len = len;
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr().add(len), tail));
		}
	}

	/// Resizes to `new_len`, filling with clones of `value`.
	pub fn resize(&mut self, new_len: usize, value: T)
	where
		T: Clone,
	{
		if new_len <= self.len {
			self.truncate(new_len);
			return;
		}

		let additional = new_len - self.len;
		self.grow_for(additional);

		let base = self.ptr.as_ptr();
		let mut guard = SetLenOnDrop::new(&mut self.len);
		// SAFETY: capacity covers `new_len`. The guard commits every element
		// written so far, including when a `clone` panics.
		unsafe {
			for _ in 1..additional {
				ptr::write(base.add(guard.local_len), value.clone());
				guard.local_len += 1;
			}
			ptr::write(base.add(guard.local_len), value);
			guard.local_len += 1;
		}
	}

	/// Replaces the contents with `n` clones of `value`.
	pub fn assign_n(&mut self, n: usize, value: &T)
	where
		T: Clone,
	{
		let staged = Self::stage(n, (0..n).map(|_| value.clone()));
		self.clear();
		self.splice_in(0, staged);
	}

	/// Replaces the contents with the items of `values`.
	pub fn assign<I>(&mut self, values: I)
	where
		I: IntoIterator<Item = T>,
	{
		let values = values.into_iter();
		let staged = Self::stage(values.size_hint().0, values);
		self.clear();
		self.splice_in(0, staged);
	}

	/// Drops every element. The capacity is kept.
	pub fn clear(&mut self) {
		self.truncate(0);
	}

	/// Exchanges the buffers of two vectors.
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}
}

/// Commits a running length on drop, so elements written before a panic
/// stay owned by the vector.
struct SetLenOnDrop<'a> {
	len: &'a mut usize,
	local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
	fn new(len: &'a mut usize) -> Self {
		SetLenOnDrop {
			local_len: *len,
			len,
		}
	}
}

impl Drop for SetLenOnDrop<'_> {
	fn drop(&mut self) {
		*self.len = self.local_len;
	}
}

impl<T> Drop for Vector<T> {
	fn drop(&mut self) {
		if std::thread::panicking() && self.len > 0 {
			debug!("releasing {} elements of a vector while unwinding", self.len);
		}
		// SAFETY: the first `len` slots are initialized and the buffer was
		// allocated with `buffer_layout(cap)`.
		unsafe {
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
			if let Some(layout) = buffer_layout::<T>(self.cap) {
				alloc::dealloc(self.ptr.as_ptr().cast(), layout);
			}
		}
	}
}

// ---------------------------------------------------------------------------
// Trait Implementations
// ---------------------------------------------------------------------------

impl<T> Deref for Vector<T> {
	type Target = [T];

	fn deref(&self) -> &[T] {
		self.data()
	}
}

impl<T> DerefMut for Vector<T> {
	fn deref_mut(&mut self) -> &mut [T] {
		self.data_mut()
	}
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
	type Output = I::Output;

	fn index(&self, index: I) -> &I::Output {
		Index::index(self.data(), index)
	}
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
	fn index_mut(&mut self, index: I) -> &mut I::Output {
		IndexMut::index_mut(self.data_mut(), index)
	}
}

impl<T: Clone> Clone for Vector<T> {
	fn clone(&self) -> Self {
		Self::stage(self.len, self.iter().cloned())
	}
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T: PartialEq> PartialEq for Vector<T> {
	fn eq(&self, other: &Self) -> bool {
		self.data() == other.data()
	}
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.data().partial_cmp(other.data())
	}
}

impl<T: Ord> Ord for Vector<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.data().cmp(other.data())
	}
}

impl<T: Hash> Hash for Vector<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.data().hash(state);
	}
}

impl<T> FromIterator<T> for Vector<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let iter = iter.into_iter();
		Self::stage(iter.size_hint().0, iter)
	}
}

impl<T> Extend<T> for Vector<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<T: Clone> From<&[T]> for Vector<T> {
	fn from(values: &[T]) -> Self {
		Self::stage(values.len(), values.iter().cloned())
	}
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
	fn from(values: [T; N]) -> Self {
		values.into_iter().collect()
	}
}

impl<'a, T> IntoIterator for &'a Vector<T> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
	type Item = &'a mut T;
	type IntoIter = slice::IterMut<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

impl<T> IntoIterator for Vector<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(self) -> IntoIter<T> {
		let vector = ManuallyDrop::new(self);
		IntoIter {
			buf: vector.ptr,
			cap: vector.cap,
			start: 0,
			end: vector.len,
			_owns: PhantomData,
		}
	}
}

/// Consuming iterator over a [`Vector`].
pub struct IntoIter<T> {
	buf: NonNull<T>,
	cap: usize,
	start: usize,
	end: usize,
	_owns: PhantomData<T>,
}

// SAFETY: same ownership as the vector it came from.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access exposes nothing.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		if self.start == self.end {
			return None;
		}
		// SAFETY: slots in `start..end` are initialized and read once.
		let value = unsafe { ptr::read(self.buf.as_ptr().add(self.start)) };
		self.start += 1;
		Some(value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.end - self.start;
		(remaining, Some(remaining))
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	fn next_back(&mut self) -> Option<T> {
		if self.start == self.end {
			return None;
		}
		self.end -= 1;
		// SAFETY: as in `next`.
		Some(unsafe { ptr::read(self.buf.as_ptr().add(self.end)) })
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
	fn drop(&mut self) {
		// SAFETY: only `start..end` is still initialized.
		unsafe {
			let rest = self.buf.as_ptr().add(self.start);
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(rest, self.end - self.start));
			if let Some(layout) = buffer_layout::<T>(self.cap) {
				alloc::dealloc(self.buf.as_ptr().cast(), layout);
			}
		}
	}
}
