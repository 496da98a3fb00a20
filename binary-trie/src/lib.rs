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

//! A binary Merkle trie (C11): keys are addressed by the bits of
//! `Keccak256(key)`, MSB-first, so the tree stays balanced regardless of how
//! adversarial the caller's keys are. `BinaryTrieMut` is the bare,
//! single-threaded core; `SyncBinaryTrie` wraps it behind a `parking_lot`
//! `RwLock` so every operation can be called concurrently (§5's "announcement
//! binary trie" is the same structure under a lock, not a second
//! implementation).

use hashdb::Hasher;
use keccak_hasher::KeccakHasher;
use log::trace;
use parking_lot::RwLock;

/// The zero hash: the root of an empty trie, and the implicit hash of every
/// absent child.
pub const ZERO_HASH: [u8; 32] = [0u8; 32];

fn keccak(data: &[u8]) -> [u8; 32] {
	KeccakHasher::hash(data).0
}

fn bit(hash: &[u8; 32], depth: usize) -> u8 {
	(hash[depth / 8] >> (7 - (depth % 8))) & 1
}

fn leaf_hash(key: &[u8], value: &[u8]) -> [u8; 32] {
	let mut buf = Vec::with_capacity(1 + key.len() + value.len());
	buf.push(0x00);
	buf.extend_from_slice(key);
	buf.extend_from_slice(value);
	keccak(&buf)
}

fn branch_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
	let mut buf = [0u8; 65];
	buf[0] = 0x01;
	buf[1..33].copy_from_slice(left);
	buf[33..65].copy_from_slice(right);
	keccak(&buf)
}

#[derive(Clone, Debug)]
enum Node {
	Empty,
	Leaf { key_hash: [u8; 32], key: Vec<u8>, value: Vec<u8> },
	Branch(Box<Node>, Box<Node>),
}

impl Node {
	fn hash(&self) -> [u8; 32] {
		match self {
			Node::Empty => ZERO_HASH,
			Node::Leaf { key, value, .. } => leaf_hash(key, value),
			Node::Branch(left, right) => branch_hash(&left.hash(), &right.hash()),
		}
	}

	fn len(&self) -> usize {
		match self {
			Node::Empty => 0,
			Node::Leaf { .. } => 1,
			Node::Branch(left, right) => left.len() + right.len(),
		}
	}

	fn get(&self, key_hash: &[u8; 32], depth: usize) -> Option<&[u8]> {
		match self {
			Node::Empty => None,
			Node::Leaf { key_hash: kh, value, .. } => if kh == key_hash { Some(value) } else { None },
			Node::Branch(left, right) => {
				if bit(key_hash, depth) == 0 { left.get(key_hash, depth + 1) } else { right.get(key_hash, depth + 1) }
			}
		}
	}

	fn insert(self, depth: usize, key_hash: [u8; 32], key: Vec<u8>, value: Vec<u8>) -> (Node, Option<Vec<u8>>) {
		match self {
			Node::Empty => (Node::Leaf { key_hash, key, value }, None),
			Node::Leaf { key_hash: existing_hash, key: existing_key, value: existing_value } => {
				if existing_hash == key_hash {
					(Node::Leaf { key_hash, key, value }, Some(existing_value))
				} else {
					let existing_bit = bit(&existing_hash, depth);
					let new_bit = bit(&key_hash, depth);
					if existing_bit == new_bit {
						let existing_leaf = Node::Leaf { key_hash: existing_hash, key: existing_key, value: existing_value };
						let (child, _) = existing_leaf.insert(depth + 1, key_hash, key, value);
						let node = if new_bit == 0 {
							Node::Branch(Box::new(child), Box::new(Node::Empty))
						} else {
							Node::Branch(Box::new(Node::Empty), Box::new(child))
						};
						(node, None)
					} else {
						let new_leaf = Node::Leaf { key_hash, key, value };
						let old_leaf = Node::Leaf { key_hash: existing_hash, key: existing_key, value: existing_value };
						let node = if new_bit == 0 {
							Node::Branch(Box::new(new_leaf), Box::new(old_leaf))
						} else {
							Node::Branch(Box::new(old_leaf), Box::new(new_leaf))
						};
						(node, None)
					}
				}
			}
			Node::Branch(left, right) => {
				if bit(&key_hash, depth) == 0 {
					let (new_left, old) = left.insert(depth + 1, key_hash, key, value);
					(Node::Branch(Box::new(new_left), right), old)
				} else {
					let (new_right, old) = right.insert(depth + 1, key_hash, key, value);
					(Node::Branch(left, Box::new(new_right)), old)
				}
			}
		}
	}

	/// Collapse a branch whose only surviving child is a leaf into that leaf.
	fn collapse(left: Node, right: Node) -> Node {
		match (&left, &right) {
			(Node::Empty, Node::Leaf { .. }) => right,
			(Node::Leaf { .. }, Node::Empty) => left,
			(Node::Empty, Node::Empty) => Node::Empty,
			_ => Node::Branch(Box::new(left), Box::new(right)),
		}
	}

	fn delete(self, depth: usize, key_hash: &[u8; 32]) -> (Node, Option<Vec<u8>>) {
		match self {
			Node::Empty => (Node::Empty, None),
			Node::Leaf { key_hash: kh, key, value } => {
				if &kh == key_hash {
					(Node::Empty, Some(value))
				} else {
					(Node::Leaf { key_hash: kh, key, value }, None)
				}
			}
			Node::Branch(left, right) => {
				if bit(key_hash, depth) == 0 {
					let (new_left, old) = left.delete(depth + 1, key_hash);
					(Node::collapse(new_left, *right), old)
				} else {
					let (new_right, old) = right.delete(depth + 1, key_hash);
					(Node::collapse(*left, new_right), old)
				}
			}
		}
	}

	fn collect(&self, out: &mut Vec<(Vec<u8>, Vec<u8>)>) {
		match self {
			Node::Empty => {}
			Node::Leaf { key, value, .. } => out.push((key.clone(), value.clone())),
			Node::Branch(left, right) => {
				left.collect(out);
				right.collect(out);
			}
		}
	}

	fn prove(&self, depth: usize, key_hash: &[u8; 32], siblings: &mut Vec<[u8; 32]>) -> Option<Vec<u8>> {
		match self {
			Node::Empty => None,
			Node::Leaf { key_hash: kh, value, .. } => if kh == key_hash { Some(value.clone()) } else { None },
			Node::Branch(left, right) => {
				if bit(key_hash, depth) == 0 {
					siblings.push(right.hash());
					left.prove(depth + 1, key_hash, siblings)
				} else {
					siblings.push(left.hash());
					right.prove(depth + 1, key_hash, siblings)
				}
			}
		}
	}
}

impl Default for Node {
	fn default() -> Self {
		Node::Empty
	}
}

/// A binary-trie inclusion/absence proof: one sibling hash per level
/// descended, root-first. The bit path itself is re-derived by the verifier
/// from `Keccak256(key)`, so it never needs to be carried explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryProof {
	pub siblings: Vec<[u8; 32]>,
}

/// Reconstruct a root hash from `key`, the claimed `value` (`None` for an
/// absence check), and `proof`, and compare it against `root`.
pub fn verify_proof(root: &[u8; 32], key: &[u8], value: Option<&[u8]>, proof: &BinaryProof) -> bool {
	let key_hash = keccak(key);
	let mut combined = match value {
		Some(v) => leaf_hash(key, v),
		None => ZERO_HASH,
	};
	for depth in (0..proof.siblings.len()).rev() {
		let sib = proof.siblings[depth];
		combined = if bit(&key_hash, depth) == 0 { branch_hash(&combined, &sib) } else { branch_hash(&sib, &combined) };
	}
	&combined == root
}

/// The bare, single-threaded binary trie core.
#[derive(Clone, Debug, Default)]
pub struct BinaryTrieMut {
	root: Node,
}

impl BinaryTrieMut {
	pub fn new() -> Self {
		BinaryTrieMut { root: Node::Empty }
	}

	pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
		self.root.get(&keccak(key), 0).map(|v| v.to_vec())
	}

	/// Insert `value` under `key`. An empty value deletes instead, mirroring
	/// the MPT core's convention. Returns the previous value, if any.
	pub fn put(&mut self, key: &[u8], value: Vec<u8>) -> Option<Vec<u8>> {
		if value.is_empty() {
			return self.delete(key);
		}
		let key_hash = keccak(key);
		let root = std::mem::take(&mut self.root);
		let (new_root, old) = root.insert(0, key_hash, key.to_vec(), value);
		self.root = new_root;
		trace!(target: "binary-trie", "put: {} entries now", self.root.len());
		old
	}

	pub fn delete(&mut self, key: &[u8]) -> Option<Vec<u8>> {
		let key_hash = keccak(key);
		let root = std::mem::take(&mut self.root);
		let (new_root, old) = root.delete(0, &key_hash);
		self.root = new_root;
		if old.is_some() {
			trace!(target: "binary-trie", "delete: {} entries remain", self.root.len());
		}
		old
	}

	pub fn len(&self) -> usize {
		self.root.len()
	}

	pub fn is_empty(&self) -> bool {
		self.root.len() == 0
	}

	pub fn hash(&self) -> [u8; 32] {
		self.root.hash()
	}

	/// Build an inclusion (or absence, if `key` isn't present) proof.
	pub fn prove(&self, key: &[u8]) -> (BinaryProof, Option<Vec<u8>>) {
		let key_hash = keccak(key);
		let mut siblings = Vec::new();
		let value = self.root.prove(0, &key_hash, &mut siblings);
		(BinaryProof { siblings }, value)
	}

	/// All `(key, value)` pairs, in left-to-right (bit 0 before bit 1) order.
	pub fn iter(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
		let mut out = Vec::new();
		self.root.collect(&mut out);
		out
	}
}

/// Thread-safe facade over `BinaryTrieMut`: every operation takes the lock
/// for its own duration, so callers may invoke them concurrently.
#[derive(Default)]
pub struct SyncBinaryTrie {
	inner: RwLock<BinaryTrieMut>,
}

impl SyncBinaryTrie {
	pub fn new() -> Self {
		SyncBinaryTrie { inner: RwLock::new(BinaryTrieMut::new()) }
	}

	pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
		self.inner.read().get(key)
	}

	pub fn put(&self, key: &[u8], value: Vec<u8>) -> Option<Vec<u8>> {
		self.inner.write().put(key, value)
	}

	pub fn delete(&self, key: &[u8]) -> Option<Vec<u8>> {
		self.inner.write().delete(key)
	}

	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	pub fn hash(&self) -> [u8; 32] {
		self.inner.read().hash()
	}

	pub fn prove(&self, key: &[u8]) -> (BinaryProof, Option<Vec<u8>>) {
		self.inner.read().prove(key)
	}

	/// Snapshot of every entry, taken under a single read lock.
	pub fn iter(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
		self.inner.read().iter()
	}
}
