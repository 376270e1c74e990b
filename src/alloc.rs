//! Allocation tracking for memory leak detection.
//!
//! This module provides a global allocator that counts allocations and
//! bytes per thread. It is meant for test binaries that check the containers
//! release every node and buffer they allocate.
//!
//! # Usage
//!
//! ```ignore
//! use rbmap::alloc::{LeakCheck, TrackingAllocator};
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//!
//! #[test]
//! fn no_leaks() {
//!     let check = LeakCheck::start();
//!
//!     let map: rbmap::RbMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
//!     drop(map);
//!
//!     check.finish();
//! }
//! ```
//!
//! # Caveats
//!
//! - Counters are thread-local. Memory allocated on one thread and freed on
//!   another shows up as a leak on the first and a surplus on the second.
//! - The tracking allocator adds a little overhead to every allocation.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
	static ALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
	static DEALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
	static BYTES_ALLOCATED: Cell<isize> = const { Cell::new(0) };
	static PEAK_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn record_alloc(size: usize) {
	let _ = ALLOC_COUNT.try_with(|count| count.set(count.get() + 1));
	record_resize(size as isize);
}

fn record_dealloc(size: usize) {
	let _ = DEALLOC_COUNT.try_with(|count| count.set(count.get() + 1));
	record_resize(-(size as isize));
}

fn record_resize(diff: isize) {
	let _ = BYTES_ALLOCATED.try_with(|bytes| {
		let current = bytes.get() + diff;
		bytes.set(current);
		let _ = PEAK_BYTES.try_with(|peak| peak.set(peak.get().max(current)));
	});
}

/// A tracking allocator that counts allocations and deallocations.
///
/// This wraps the system allocator and updates the calling thread's
/// counters on each operation.
pub struct TrackingAllocator;

// SAFETY: every call is forwarded unchanged to `System`; the counters are
// const-initialized thread-locals that never allocate.
unsafe impl GlobalAlloc for TrackingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		let ptr = System.alloc(layout);
		if !ptr.is_null() {
			record_alloc(layout.size());
		}
		ptr
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		record_dealloc(layout.size());
		System.dealloc(ptr, layout)
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		let ptr = System.alloc_zeroed(layout);
		if !ptr.is_null() {
			record_alloc(layout.size());
		}
		ptr
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		let new_ptr = System.realloc(ptr, layout, new_size);
		if !new_ptr.is_null() {
			record_resize(new_size as isize - layout.size() as isize);
		}
		new_ptr
	}
}

/// Resets the calling thread's counters to zero.
pub fn reset_counters() {
	ALLOC_COUNT.with(|c| c.set(0));
	DEALLOC_COUNT.with(|c| c.set(0));
	BYTES_ALLOCATED.with(|c| c.set(0));
	PEAK_BYTES.with(|c| c.set(0));
}

/// Returns the calling thread's allocation statistics.
pub fn get_stats() -> AllocationStats {
	AllocationStats {
		alloc_count: ALLOC_COUNT.with(Cell::get),
		dealloc_count: DEALLOC_COUNT.with(Cell::get),
		bytes_allocated: BYTES_ALLOCATED.with(Cell::get),
		peak_bytes: PEAK_BYTES.with(Cell::get),
	}
}

/// Allocation statistics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationStats {
	/// Total number of allocations since reset.
	pub alloc_count: usize,
	/// Total number of deallocations since reset.
	pub dealloc_count: usize,
	/// Bytes currently allocated, relative to the last reset.
	pub bytes_allocated: isize,
	/// Peak of `bytes_allocated` since reset.
	pub peak_bytes: isize,
}

/// Checks that everything allocated since the last reset was freed.
///
/// # Panics
///
/// Panics if allocations and deallocations do not match or bytes remain.
pub fn check_no_leaks() {
	let stats = get_stats();
	let diff = stats.alloc_count as isize - stats.dealloc_count as isize;

	if diff != 0 {
		panic!(
			"Memory leak detected!\n\
             Allocations: {}\n\
             Deallocations: {}\n\
             Difference: {}\n\
             Bytes still allocated: {}",
			stats.alloc_count, stats.dealloc_count, diff, stats.bytes_allocated
		);
	}

	if stats.bytes_allocated != 0 {
		panic!(
			"Memory leak detected!\n\
             Bytes still allocated: {}\n\
             (alloc_count == dealloc_count but bytes != 0, possible size mismatch)",
			stats.bytes_allocated
		);
	}
}

/// A scoped leak check: resets the counters on [`start`](Self::start) and
/// asserts on [`finish`](Self::finish) that the scope freed everything it
/// allocated.
#[must_use = "a leak check does nothing until `finish` is called"]
pub struct LeakCheck {
	_private: (),
}

impl LeakCheck {
	pub fn start() -> LeakCheck {
		reset_counters();
		LeakCheck {
			_private: (),
		}
	}

	/// Statistics gathered since [`start`](Self::start).
	pub fn stats(&self) -> AllocationStats {
		get_stats()
	}

	/// # Panics
	///
	/// Panics if memory allocated since `start` is still live.
	pub fn finish(self) {
		check_no_leaks();
	}
}
