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

//! Shared get-path resolution over raw, wire-encoded nodes fetched from a
//! backing `HashDB`. Used by `TrieDBMut` to resolve hash-referenced children
//! it hasn't pulled into its working arena, and by `TrieDB` for its entire
//! read path (which never holds an arena at all).

use hashdb::{DBValue, HashDB, Hasher};

use crate::error::TrieError;
use crate::node::{EncodedNode, NodeCodec};

type Result<T, H, E> = crate::error::Result<T, H, E>;

/// Look up `key` (already expanded to nibbles) starting from the node encoded
/// as `node_data`, fetching any hash-referenced children from `db` as needed.
pub(crate) fn get_from_node<H, C>(
	db: &dyn HashDB<H, DBValue>,
	node_data: &[u8],
	partial: &[u8],
) -> Result<Option<DBValue>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::decode(node_data).map_err(|e| Box::new(TrieError::DecoderError(H::Out::default(), e)))? {
		EncodedNode::Empty => Ok(None),
		EncodedNode::Leaf(key, value) => {
			if key == partial {
				Ok(Some(value.to_vec()))
			} else {
				Ok(None)
			}
		}
		EncodedNode::Extension(key, child) => {
			if partial.starts_with(&key[..]) {
				get_from_child::<H, C>(db, child, &partial[key.len()..])
			} else {
				Ok(None)
			}
		}
		EncodedNode::Branch(children, value) => {
			if partial.is_empty() {
				return Ok(value.map(|v| v.to_vec()));
			}
			match children[partial[0] as usize] {
				Some(child) => get_from_child::<H, C>(db, child, &partial[1..]),
				None => Ok(None),
			}
		}
	}
}

fn get_from_child<H, C>(
	db: &dyn HashDB<H, DBValue>,
	child_data: &[u8],
	partial: &[u8],
) -> Result<Option<DBValue>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::try_decode_hash(child_data) {
		Some(hash) => {
			let node_data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
			get_from_node::<H, C>(db, &node_data, partial)
		}
		None => get_from_node::<H, C>(db, child_data, partial),
	}
}

/// Fetch the node stored under `hash` and look up `partial` within it.
pub(crate) fn get_from_hash<H, C>(
	db: &dyn HashDB<H, DBValue>,
	hash: H::Out,
	partial: &[u8],
) -> Result<Option<DBValue>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let node_data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
	get_from_node::<H, C>(db, &node_data, partial)
}

/// Count the number of key/value associations (C5's `Len`) reachable from the
/// node encoded as `node_data`.
pub(crate) fn count_from_node<H, C>(
	db: &dyn HashDB<H, DBValue>,
	node_data: &[u8],
) -> Result<usize, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::decode(node_data).map_err(|e| Box::new(TrieError::DecoderError(H::Out::default(), e)))? {
		EncodedNode::Empty => Ok(0),
		EncodedNode::Leaf(_, _) => Ok(1),
		EncodedNode::Extension(_, child) => count_from_child::<H, C>(db, child),
		EncodedNode::Branch(children, value) => {
			let mut count = if value.is_some() { 1 } else { 0 };
			for child in children.iter().flatten() {
				count += count_from_child::<H, C>(db, child)?;
			}
			Ok(count)
		}
	}
}

fn count_from_child<H, C>(db: &dyn HashDB<H, DBValue>, child_data: &[u8]) -> Result<usize, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::try_decode_hash(child_data) {
		Some(hash) => {
			let node_data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
			count_from_node::<H, C>(db, &node_data)
		}
		None => count_from_node::<H, C>(db, child_data),
	}
}

/// Count the number of key/value associations reachable from `hash`.
pub(crate) fn count_from_hash<H, C>(db: &dyn HashDB<H, DBValue>, hash: H::Out) -> Result<usize, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	if hash == C::hashed_null_node() {
		return Ok(0);
	}
	let node_data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
	count_from_node::<H, C>(db, &node_data)
}
