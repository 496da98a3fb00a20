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

//! A Merkle-Patricia Trie, generic over its key hasher and wire encoding.
//!
//! `TrieDBMut` is the mutable core (C5): `get`/`insert`/`remove` plus `root`
//! (the trie's hash, computed lazily) and `len` (the number of key/value
//! associations currently stored). The `NodeCodec` seam (`rlp_codec`) decides
//! how nodes are actually packed into bytes; `RlpNodeCodec` is the canonical
//! Ethereum flavour.

pub mod diff;
pub mod error;
pub mod iterator;
mod lookup;
pub mod nibble;
pub mod node;
pub mod proof;
mod rlp_codec;
pub mod triedb;
mod triedbmut;

pub use diff::DiffTracker;
pub use error::{Result, TrieError};
pub use hashdb::{AsHashDB, DBValue, HashDB, Hasher};
pub use iterator::{DeletingIterator, ProvingIterator, TrieIterator};
pub use node::{ChildReference, NodeCodec};
pub use proof::{
	prove, prove_absence, prove_account, prove_multi, prove_storage, verify_account, verify_multi_proof, verify_proof,
	verify_storage, Account, AccountVerifyError, MultiProofEntry, VerifyError,
};
pub use rlp_codec::RlpNodeCodec;
pub use triedb::{SecTrieDB, SecTrieDBMut, TrieDB};
pub use triedbmut::TrieDBMut;

/// Read-only access to a trie keyed by byte-string keys.
pub trait Trie<H: Hasher, C: NodeCodec<H>> {
	/// The trie's current root hash.
	fn root(&self) -> &H::Out;

	/// `true` if the trie has no key/value associations.
	fn is_empty(&self) -> bool {
		*self.root() == C::hashed_null_node()
	}

	/// `true` if `key` has an associated value.
	fn contains(&self, key: &[u8]) -> Result<bool, H::Out, C::Error> {
		Ok(self.get(key)?.is_some())
	}

	/// The value associated with `key`, if any.
	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error>;

	/// The number of key/value associations currently stored.
	fn len(&self) -> Result<usize, H::Out, C::Error>;
}

/// Mutable access to a trie keyed by byte-string keys (C5).
///
/// An empty `value` passed to `insert` is treated as a `remove` of `key`,
/// mirroring the wire encoding's inability to distinguish a present-but-empty
/// value from an absent one.
pub trait TrieMut<H: Hasher, C: NodeCodec<H>> {
	/// Commit any pending changes and return the resulting root hash.
	fn root(&mut self) -> &H::Out;

	/// `true` if the trie has no key/value associations.
	fn is_empty(&self) -> bool;

	/// `true` if `key` has an associated value.
	fn contains(&self, key: &[u8]) -> Result<bool, H::Out, C::Error> {
		Ok(self.get(key)?.is_some())
	}

	/// The value associated with `key`, if any.
	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error>;

	/// Insert `value` under `key`, returning the previous value if there was
	/// one. Inserting an empty value removes `key` instead.
	fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error>;

	/// Remove `key`, returning its value if it was present.
	fn remove(&mut self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error>;

	/// The number of key/value associations currently stored.
	fn len(&self) -> Result<usize, H::Out, C::Error>;
}
