//! Ordering strategies and key-extraction policies.
//!
//! The tree engine never looks inside the values it stores. It asks a
//! [`KeyOf`] policy for the key of a value and a [`Compare`] strategy whether
//! one key orders before another. Maps and sets are the same engine with a
//! different policy: [`PairKey`] for `(K, V)` entries, [`Identity`] for values
//! that are their own key.

/// A strict weak ordering over keys.
///
/// Two keys are equivalent when neither is less than the other; the
/// containers treat equivalent keys as the same key.
///
/// Any `Fn(&K, &K) -> bool` closure is a comparator:
///
/// ```
/// use rbmap::RbSet;
///
/// let mut set = RbSet::with_comparator(|a: &i32, b: &i32| b < a);
/// set.insert(1);
/// set.insert(3);
/// set.insert(2);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
pub trait Compare<K: ?Sized> {
	/// Returns `true` if `a` orders strictly before `b`.
	fn less(&self, a: &K, b: &K) -> bool;

	/// Returns `true` if neither key orders before the other.
	#[inline]
	fn equivalent(&self, a: &K, b: &K) -> bool {
		!self.less(a, b) && !self.less(b, a)
	}
}

/// Orders keys by their [`Ord`] implementation.
///
/// This is the default comparator of every container in the crate. It
/// compares any `Ord` type, so lookups can use a borrowed form of the key
/// (`&str` for `String` keys).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		a < b
	}
}

/// Inverts another comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reversed<C> {
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		self.0.less(b, a)
	}
}

impl<K: ?Sized, F> Compare<K> for F
where
	F: Fn(&K, &K) -> bool,
{
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		self(a, b)
	}
}

/// Compares map entries by key only.
///
/// Returned by [`RbMap::value_comp`](crate::RbMap::value_comp).
#[derive(Debug, Clone, Copy)]
pub struct EntryCompare<'a, C>(pub(crate) &'a C);

impl<K, V, C: Compare<K>> Compare<(K, V)> for EntryCompare<'_, C> {
	#[inline]
	fn less(&self, a: &(K, V), b: &(K, V)) -> bool {
		self.0.less(&a.0, &b.0)
	}
}

/// Extracts the ordering key from a stored value.
pub trait KeyOf<T> {
	/// The key type the comparator sees.
	type Key;

	/// Borrows the key out of a stored value.
	fn key(value: &T) -> &Self::Key;
}

/// Key policy for maps: the key is the first half of a `(K, V)` entry.
#[derive(Debug, Clone, Copy)]
pub enum PairKey {}

impl<K, V> KeyOf<(K, V)> for PairKey {
	type Key = K;

	#[inline]
	fn key(value: &(K, V)) -> &K {
		&value.0
	}
}

/// Key policy for sets: every value is its own key.
#[derive(Debug, Clone, Copy)]
pub enum Identity {}

impl<T> KeyOf<T> for Identity {
	type Key = T;

	#[inline]
	fn key(value: &T) -> &T {
		value
	}
}
