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

//! The in-memory node model (C2), its pluggable wire encoding (C3), and the
//! arena that backs a mutable trie's uncommitted working set.

use hashdb::{DBValue, HashDB, Hasher};
use std::ops::Index;

/// Arena index into a `NodeStorage`. Cheap to copy, meaningless outside the
/// arena that minted it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StorageHandle(pub(crate) usize);

/// A reference to a child node: either already resolved into the working
/// arena, or still only known by its hash (requiring a DB fetch to inspect).
#[derive(Clone, Debug)]
pub enum NodeHandle<H> {
	Hash(H),
	InMemory(StorageHandle),
}

impl<H> From<StorageHandle> for NodeHandle<H> {
	fn from(handle: StorageHandle) -> Self {
		NodeHandle::InMemory(handle)
	}
}

pub(crate) fn empty_children<H>() -> Box<[Option<NodeHandle<H>>; 16]> {
	Box::new(Default::default())
}

/// A child reference as it appears while being assembled for encoding: either
/// a digest (too large to inline) or the raw encoding itself (small enough to
/// embed directly in the parent, per the inline-if-under-32-bytes rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildReference<H> {
	Hash(H),
	Inline(Vec<u8>),
}

/// In-memory representation of a trie node (C2).
///
/// `Leaf` and `Extension` carry their partial key as a plain nibble sequence
/// (one nibble per element, *not* hex-prefix packed — packing only happens at
/// the wire-encoding boundary). `Branch` always has exactly 16 child slots
/// plus an optional value, mirroring the canonical 17-slot wire node.
#[derive(Clone, Debug)]
pub enum Node<H> {
	Empty,
	Leaf(Vec<u8>, DBValue),
	Extension(Vec<u8>, NodeHandle<H>),
	Branch(Box<[Option<NodeHandle<H>>; 16]>, Option<DBValue>),
}

/// A transient, borrowed view onto a decoded wire node — the output of
/// `NodeCodec::decode`. Distinct from `Node`, which is the owned, arena-backed
/// representation used while a trie is open for mutation.
#[derive(Clone, Debug)]
pub enum EncodedNode<'a> {
	Empty,
	Leaf(Vec<u8>, &'a [u8]),
	Extension(Vec<u8>, &'a [u8]),
	Branch([Option<&'a [u8]>; 16], Option<&'a [u8]>),
}

/// The pluggable wire encoding for nodes (C3): turns the abstract node shape
/// into bytes suitable for content-addressed storage, and back.
pub trait NodeCodec<H: Hasher> {
	/// Error produced when `decode` is handed malformed input.
	type Error: std::error::Error;

	/// Hash of the canonical empty-node encoding — the root of an empty trie.
	fn hashed_null_node() -> H::Out;

	/// Parse a node from its wire encoding.
	fn decode(data: &[u8]) -> Result<EncodedNode, Self::Error>;

	/// If `data` is itself exactly a bare digest (as opposed to an inline
	/// node), return it; used to tell an inline child apart from a hash-ref.
	fn try_decode_hash(data: &[u8]) -> Option<H::Out>;

	/// `true` if `data` is the canonical empty-node encoding.
	fn is_empty_node(data: &[u8]) -> bool;

	/// The canonical empty-node encoding.
	fn empty_node() -> Vec<u8>;

	/// Encode a leaf node.
	fn leaf_node(partial: &[u8], value: &[u8]) -> Vec<u8>;

	/// Encode an extension node.
	fn ext_node(partial: &[u8], child_ref: ChildReference<H::Out>) -> Vec<u8>;

	/// Encode a branch node from its 16 children and optional value.
	fn branch_node<I>(children: I, value: Option<DBValue>) -> Vec<u8>
	where
		I: IntoIterator<Item = Option<ChildReference<H::Out>>>;
}

impl<H: Copy> Node<H> {
	/// Inline the child's raw encoding if short enough, otherwise store it and
	/// reference it by hash. This is the "inline-if-under-32-bytes" rule (I3).
	pub(crate) fn inline_or_hash<C, K>(
		data: &[u8],
		db: &dyn HashDB<K, DBValue>,
		storage: &mut NodeStorage<K::Out>,
	) -> NodeHandle<K::Out>
	where
		C: NodeCodec<K>,
		K: Hasher,
	{
		match C::try_decode_hash(data) {
			Some(hash) => NodeHandle::Hash(hash),
			None => {
				let node = Node::from_encoded::<C, K>(data, db, storage);
				NodeHandle::InMemory(storage.alloc(Stored::Cached(node, K::hash(data))))
			}
		}
	}

	/// Decode a raw wire encoding into an arena-backed `Node`, recursively
	/// resolving any inline children (hash-referenced children stay lazy).
	pub fn from_encoded<C, K>(data: &[u8], db: &dyn HashDB<K, DBValue>, storage: &mut NodeStorage<K::Out>) -> Node<K::Out>
	where
		C: NodeCodec<K>,
		K: Hasher,
	{
		match C::decode(data) {
			Ok(EncodedNode::Empty) => Node::Empty,
			Ok(EncodedNode::Leaf(k, v)) => Node::Leaf(k, DBValue::from(v)),
			Ok(EncodedNode::Extension(k, child)) => {
				let child = Node::inline_or_hash::<C, K>(child, db, storage);
				Node::Extension(k, child)
			}
			Ok(EncodedNode::Branch(children_data, value)) => {
				let mut children = empty_children::<K::Out>();
				for (i, child) in children_data.into_iter().enumerate() {
					if let Some(child) = child {
						children[i] = Some(Node::inline_or_hash::<C, K>(child, db, storage));
					}
				}
				Node::Branch(children, value.map(DBValue::from))
			}
			Err(_) => Node::Empty,
		}
	}

	/// Encode this node, asking `child_cb` to turn each child reference into
	/// a `ChildReference` (resolving/committing it as a side effect).
	pub fn into_encoded<F, C, K>(self, mut child_cb: F) -> Vec<u8>
	where
		C: NodeCodec<K>,
		K: Hasher<Out = H>,
		F: FnMut(NodeHandle<H>) -> ChildReference<H>,
	{
		match self {
			Node::Empty => C::empty_node(),
			Node::Leaf(partial, value) => C::leaf_node(&partial, &value),
			Node::Extension(partial, child) => {
				let child_ref = child_cb(child);
				C::ext_node(&partial, child_ref)
			}
			Node::Branch(mut children, value) => {
				C::branch_node(children.iter_mut().map(|child| child.take().map(&mut child_cb)), value)
			}
		}
	}
}

/// What an arena slot holds: a brand-new uncommitted node, or one cached from
/// the backing store together with the hash it was fetched under (so a later
/// `fix`/delete can tell whether re-encoding would actually change anything).
#[derive(Clone, Debug)]
pub enum Stored<H> {
	New(Node<H>),
	Cached(Node<H>, H),
}

/// The arena backing a `TrieDBMut`'s uncommitted working set. Nodes allocated
/// here are addressed by `StorageHandle`, not by hash, until `commit`.
pub struct NodeStorage<H> {
	nodes: Vec<Stored<H>>,
	free_indices: Vec<usize>,
}

impl<H> NodeStorage<H> {
	pub fn empty() -> Self {
		NodeStorage { nodes: Vec::new(), free_indices: Vec::new() }
	}

	pub fn alloc(&mut self, stored: Stored<H>) -> StorageHandle {
		if let Some(idx) = self.free_indices.pop() {
			self.nodes[idx] = stored;
			StorageHandle(idx)
		} else {
			self.nodes.push(stored);
			StorageHandle(self.nodes.len() - 1)
		}
	}

	pub fn destroy(&mut self, handle: StorageHandle) -> Stored<H> {
		let idx = handle.0;
		self.free_indices.push(idx);
		std::mem::replace(&mut self.nodes[idx], Stored::New(Node::Empty))
	}
}

impl<H> Index<StorageHandle> for NodeStorage<H> {
	type Output = Node<H>;
	fn index(&self, handle: StorageHandle) -> &Node<H> {
		match &self.nodes[handle.0] {
			Stored::New(node) => node,
			Stored::Cached(node, _) => node,
		}
	}
}
