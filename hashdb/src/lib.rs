// Copyright 2015-2020 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

//! Trait for a hash-keyed datastore, and the `Hasher` seam that lets it be
//! instantiated over any digest.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::hash::Hash;

/// The value type stored against a hash: a plain owned byte buffer.
pub type DBValue = Vec<u8>;

/// A trie node, or any other value, digest. Implemented once per hash
/// algorithm a trie can be instantiated with (Keccak-256, Blake2, ...).
pub trait Hasher: Sync + Send {
	/// The output type of the digest function.
	type Out: AsRef<[u8]> + AsMut<[u8]> + Default + PartialEq + Eq + Hash + Send + Sync + Clone + Copy;

	/// What to use to build a map keyed by `Out`.
	type StdHasher: Default + core::hash::Hasher;

	/// Length in bytes of the digest.
	const LENGTH: usize;

	/// Compute the hash of the provided data.
	fn hash(x: &[u8]) -> Self::Out;
}

/// A key-value datastore implemented as a database of byte slices, keyed by
/// the hash of their contents (content-addressed storage).
///
/// Implementations are free to refcount entries for deletion, or to treat
/// every `remove` as an immediate drop; callers must not rely on either.
pub trait HashDB<H: Hasher, T>: Send + Sync {
	/// Look up a value by hash.
	fn get(&self, key: &H::Out) -> Option<T>;

	/// `true` if the hash is present.
	fn contains(&self, key: &H::Out) -> bool {
		self.get(key).is_some()
	}

	/// Insert `value` and return its hash, bumping any existing refcount.
	fn insert(&mut self, value: &[u8]) -> H::Out;

	/// Insert a pre-hashed value, trusting the caller that `key == H::hash(value)`.
	fn emplace(&mut self, key: H::Out, value: T);

	/// Remove a reference to `key`; the value is not guaranteed to be gone
	/// until the implementation decides its refcount has reached zero.
	fn remove(&mut self, key: &H::Out);
}

/// Upcast a concrete store to a `HashDB` trait object, so generic code can be
/// handed either a standalone store or a facet of a larger structure.
pub trait AsHashDB<H: Hasher, T> {
	/// Perform upcast to a `HashDB` for anything that derives from it.
	fn as_hashdb(&self) -> &dyn HashDB<H, T>;
	/// Perform mutable upcast to a `HashDB` for anything that derives from it.
	fn as_hashdb_mut(&mut self) -> &mut dyn HashDB<H, T>;
}

impl<'a, H: Hasher, T> AsHashDB<H, T> for &'a mut dyn HashDB<H, T> {
	fn as_hashdb(&self) -> &dyn HashDB<H, T> {
		&**self
	}
	fn as_hashdb_mut(&mut self) -> &mut dyn HashDB<H, T> {
		&mut **self
	}
}
