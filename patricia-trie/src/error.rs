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

//! Trie-level errors, generic over the hash output type and the codec's own
//! decode-error type.

use std::fmt;

use rlp::DecoderError;

/// Something that went wrong while walking or mutating a trie.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TrieError<H, E> {
	/// The root hash passed to `TrieDBMut::from_existing`/`TrieDB::new` isn't
	/// present in the backing database.
	InvalidStateRoot(H),
	/// A hash-referenced node is missing from the backing database. Means the
	/// database is missing nodes that a correct trie of this root must have.
	IncompleteDatabase(H),
	/// A node's wire encoding failed to decode.
	DecoderError(H, E),
	/// `Prove` was asked for a key that isn't present under `root`.
	NotFound(H),
	/// An account leaf's value didn't RLP-decode to the 4-element
	/// `(nonce, balance, storage_root, code_hash)` shape (wrong element
	/// count, or a malformed field within it).
	InvalidAccountRLP(H, DecoderError),
}

impl<H: fmt::Debug, E: fmt::Debug> fmt::Display for TrieError<H, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TrieError::InvalidStateRoot(root) => write!(f, "invalid state root: {:?}", root),
			TrieError::IncompleteDatabase(hash) => write!(f, "incomplete database: node {:?} not found", hash),
			TrieError::DecoderError(hash, err) => write!(f, "failed to decode node {:?}: {:?}", hash, err),
			TrieError::NotFound(root) => write!(f, "key not found under root {:?}", root),
			TrieError::InvalidAccountRLP(key, err) => write!(f, "invalid account rlp for key {:?}: {:?}", key, err),
		}
	}
}

impl<H: fmt::Debug, E: fmt::Debug> std::error::Error for TrieError<H, E> {}

/// A trie operation's result: boxed because `TrieError` carries a hash and a
/// codec error inline, and most call sites only care about the `Ok` case.
pub type Result<T, H, E> = std::result::Result<T, Box<TrieError<H, E>>>;
