// Copyright 2015-2018 Parity Technologies (UK) Ltd.
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

//! Defines the `TrieStream` trait used to build a byte-stream to calculate
//! a trie root. Comes in two flavours: rlp and substrate codec.

use hashdb::Hasher;

/// Builds up the byte-stream that a trie root is hashed from, one node at a
/// time, in the order `triehash::build_trie` visits them.
pub trait TrieStream {
	/// Start a fresh, empty stream.
	fn new() -> Self;
	/// The canonical empty-trie encoding.
	fn append_empty_data(&mut self);
	/// Start a 17-slot branch node. `has_children` reports, per nibble 0..15,
	/// whether that slot is occupied; flavours that need a bitmap header
	/// (rather than relying on `append_empty_child`) use it here.
	fn begin_branch(&mut self, maybe_value: Option<&[u8]>, has_children: impl Iterator<Item = bool>);
	/// Fill an unoccupied branch slot.
	fn append_empty_child(&mut self) {}
	/// Close a branch node, supplying its optional value slot.
	fn end_branch(&mut self, _value: Option<&[u8]>) {}
	/// Append a leaf node with the given partial key and value.
	fn append_leaf(&mut self, key: &[u8], value: &[u8]);
	/// Append an extension node's partial key (the child follows via
	/// `append_substream`).
	fn append_extension(&mut self, key: &[u8]);
	/// Fold a fully-built child substream into this one: inlined if short,
	/// hashed with `H` otherwise.
	fn append_substream<H: Hasher>(&mut self, other: Self);
	/// Consume the stream, yielding its encoded bytes.
	fn out(self) -> Vec<u8>;
}

#[cfg(feature = "ethereum")]
mod rlp_triestream;
#[cfg(feature = "ethereum")]
pub use rlp_triestream::RlpTrieStream;
