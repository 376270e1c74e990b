//! # Error Types for the Containers
//!
//! This module defines the error type shared by the tree, the map and set
//! wrappers, the [`Vector`](crate::Vector) and the [`Stack`](crate::Stack).
//!
//! ## Error Handling Strategy
//!
//! Containers never swallow a failure. Operations that can fail for a reason
//! the caller controls (an index past the end, a position that no longer
//! names an element, a capacity request that cannot be honoured) return
//! [`Result`]. Operations that mirror the standard library's infallible
//! forms (`push_back`, `insert`) keep that shape and abort on allocation
//! failure the way `Vec` does.
//!
//! ## Error Kinds
//!
//! ```text
//! at(i) / top()           ──► OutOfRange        (bounds failure)
//! value(end())            ──► InvalidPosition   (read through end())
//! reserve(n > max_size()) ──► CapacityOverflow  (length failure, nothing allocated)
//! reserve(n)              ──► AllocFailed       (allocator returned null)
//! ```
//!
//! Bulk operations that construct many elements (fill, copy, range insert)
//! are not represented here: a panic from an element's `Clone` unwinds
//! through them, and they release whatever they had built before the panic
//! propagates.

use thiserror::Error;

/// Errors reported by the containers in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// A checked index was not below the container's length.
	///
	/// Returned by [`Vector::at`](crate::Vector::at) and friends. Unchecked
	/// indexing (`v[i]`) panics instead.
	#[error("index {index} is out of range for length {len}")]
	OutOfRange {
		/// The requested index.
		index: usize,
		/// The length of the container at the time of the call.
		len: usize,
	},

	/// A position did not refer to a live element.
	///
	/// This is what reading through `end()` or through a position whose
	/// node was erased reports.
	#[error("position does not refer to an element")]
	InvalidPosition,

	/// A capacity request exceeded [`Vector::max_size`](crate::Vector::max_size).
	///
	/// Reported before any allocation is attempted.
	#[error("requested capacity {requested} exceeds the maximum of {max}")]
	CapacityOverflow {
		/// The capacity that was asked for.
		requested: usize,
		/// The largest capacity the element type allows.
		max: usize,
	},

	/// The global allocator could not provide the requested memory.
	#[error("allocation of {bytes} bytes failed")]
	AllocFailed {
		/// Size of the failed request.
		bytes: usize,
	},
}

/// A Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
