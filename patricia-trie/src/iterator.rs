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

//! Depth-first iteration over a committed trie (C9): `Short`-child first,
//! then branch slots 0..15, then the branch's own terminal value. Built on
//! top of a full materialization of the trie's entries rather than a lazily
//! resumable node-stack, since every consumer here (seek, prefix filter,
//! proof collection, delete-while-iterating) only needs the ordering
//! guarantee, not bounded memory.

use hashdb::{DBValue, HashDB, Hasher};

use crate::error::TrieError;
use crate::nibble;
use crate::node::{EncodedNode, NodeCodec};
use crate::proof;
use crate::triedbmut::TrieDBMut;
use crate::{Result, TrieMut};

fn collect<H, C>(
	db: &dyn HashDB<H, DBValue>,
	node_data: &[u8],
	path: &mut Vec<u8>,
	out: &mut Vec<(Vec<u8>, DBValue)>,
) -> Result<(), H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::decode(node_data).map_err(|e| Box::new(TrieError::DecoderError(H::Out::default(), e)))? {
		EncodedNode::Empty => Ok(()),
		EncodedNode::Leaf(key, value) => {
			path.extend_from_slice(&key);
			out.push((nibble::nibbles_to_key(path), value.to_vec()));
			path.truncate(path.len() - key.len());
			Ok(())
		}
		EncodedNode::Extension(key, child) => {
			path.extend_from_slice(&key);
			descend::<H, C>(db, child, path, out)?;
			path.truncate(path.len() - key.len());
			Ok(())
		}
		EncodedNode::Branch(children, value) => {
			for (i, child) in children.into_iter().enumerate() {
				if let Some(child) = child {
					path.push(i as u8);
					descend::<H, C>(db, child, path, out)?;
					path.pop();
				}
			}
			if let Some(value) = value {
				out.push((nibble::nibbles_to_key(path), value.to_vec()));
			}
			Ok(())
		}
	}
}

fn descend<H, C>(
	db: &dyn HashDB<H, DBValue>,
	child_data: &[u8],
	path: &mut Vec<u8>,
	out: &mut Vec<(Vec<u8>, DBValue)>,
) -> Result<(), H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	match C::try_decode_hash(child_data) {
		Some(hash) => {
			let data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
			collect::<H, C>(db, &data, path, out)
		}
		None => collect::<H, C>(db, child_data, path, out),
	}
}

/// Every `(key, value)` pair in `db` reachable from `root`, in the trie's
/// canonical depth-first order. Branch value slots sort after their
/// children — a branch's own terminal value has the longest matching key, so
/// the resulting order is still plain lexicographic over the byte keys.
pub fn entries<H, C>(db: &dyn HashDB<H, DBValue>, root: H::Out) -> Result<Vec<(Vec<u8>, DBValue)>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let mut out = Vec::new();
	if root == C::hashed_null_node() {
		return Ok(out);
	}
	let data = db.get(&root).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(root)))?;
	let mut path = Vec::new();
	collect::<H, C>(db, &data, &mut path, &mut out)?;
	out.sort_by(|a, b| a.0.cmp(&b.0));
	Ok(out)
}

/// A materialized, position-tracking iterator over a trie's entries.
pub struct TrieIterator {
	entries: Vec<(Vec<u8>, DBValue)>,
	pos: usize,
}

impl TrieIterator {
	pub fn new<H, C>(db: &dyn HashDB<H, DBValue>, root: H::Out) -> Result<Self, H::Out, C::Error>
	where
		H: Hasher,
		C: NodeCodec<H>,
	{
		Ok(TrieIterator { entries: entries::<H, C>(db, root)?, pos: 0 })
	}

	/// Restrict iteration to keys extending `prefix`. Must be called before
	/// any call to `next`/`seek` to have the expected effect on `pos`.
	pub fn with_prefix(mut self, prefix: &[u8]) -> Self {
		self.entries.retain(|(k, _)| k.starts_with(prefix));
		self
	}

	/// Advance until the current key is `>= target`.
	pub fn seek(&mut self, target: &[u8]) {
		while self.pos < self.entries.len() && self.entries[self.pos].0.as_slice() < target {
			self.pos += 1;
		}
	}
}

impl Iterator for TrieIterator {
	type Item = (Vec<u8>, DBValue);

	fn next(&mut self) -> Option<Self::Item> {
		let item = self.entries.get(self.pos).cloned();
		if item.is_some() {
			self.pos += 1;
		}
		item
	}
}

/// Like `TrieIterator`, but each yielded entry carries its inclusion proof
/// (computed against the same `root` it was collected from).
pub struct ProvingIterator<'a, H: Hasher, C: NodeCodec<H>> {
	db: &'a dyn HashDB<H, DBValue>,
	root: H::Out,
	inner: TrieIterator,
	_marker: std::marker::PhantomData<C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> ProvingIterator<'a, H, C> {
	pub fn new(db: &'a dyn HashDB<H, DBValue>, root: H::Out) -> Result<Self, H::Out, C::Error> {
		Ok(ProvingIterator { db, root, inner: TrieIterator::new::<H, C>(db, root)?, _marker: std::marker::PhantomData })
	}

	#[allow(clippy::type_complexity)]
	pub fn next_with_proof(&mut self) -> Option<Result<(Vec<u8>, DBValue, Vec<Vec<u8>>), H::Out, C::Error>> {
		let (key, value) = self.inner.next()?;
		Some(proof::prove::<H, C>(self.db, self.root, &key).map(|p| (key, value, p)))
	}
}

/// Iterates a `TrieDBMut`'s current entries, permitting the current key to be
/// deleted mid-iteration. The key list is snapshotted at construction; values
/// are re-read (and deletions applied) against the live trie, so deleting the
/// current entry never disturbs entries still to come.
pub struct DeletingIterator<'a, 'b, H, C>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	trie: &'a mut TrieDBMut<'b, H, C>,
	keys: std::vec::IntoIter<Vec<u8>>,
	current: Option<Vec<u8>>,
}

impl<'a, 'b, H, C> DeletingIterator<'a, 'b, H, C>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	pub fn new(trie: &'a mut TrieDBMut<'b, H, C>, keys: Vec<Vec<u8>>) -> Self {
		DeletingIterator { trie, keys: keys.into_iter(), current: None }
	}

	pub fn next(&mut self) -> Result<Option<(Vec<u8>, DBValue)>, H::Out, C::Error> {
		match self.keys.next() {
			Some(key) => match self.trie.get(&key)? {
				Some(value) => {
					self.current = Some(key.clone());
					Ok(Some((key, value)))
				}
				None => self.next(),
			},
			None => {
				self.current = None;
				Ok(None)
			}
		}
	}

	/// Delete the entry last yielded by `next`.
	pub fn delete_current(&mut self) -> Result<Option<DBValue>, H::Out, C::Error> {
		match self.current.take() {
			Some(key) => self.trie.remove(&key),
			None => Ok(None),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RlpNodeCodec;
	use keccak_hasher::KeccakHasher;
	use memorydb::MemoryDB;

	type Codec = RlpNodeCodec<KeccakHasher>;

	fn build() -> (MemoryDB<KeccakHasher, DBValue>, <KeccakHasher as Hasher>::Out) {
		let mut db = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = <KeccakHasher as Hasher>::Out::default();
		{
			let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db, &mut root);
			t.insert(b"doe", b"reindeer").unwrap();
			t.insert(b"dog", b"puppy").unwrap();
			t.insert(b"dogglesworth", b"cat").unwrap();
		}
		(db, root)
	}

	#[test]
	fn yields_all_entries_sorted() {
		let (db, root) = build();
		let got: Vec<_> = TrieIterator::new::<KeccakHasher, Codec>(&db, root).unwrap().collect();
		assert_eq!(
			got,
			vec![
				(b"doe".to_vec(), b"reindeer".to_vec()),
				(b"dog".to_vec(), b"puppy".to_vec()),
				(b"dogglesworth".to_vec(), b"cat".to_vec()),
			]
		);
	}

	#[test]
	fn seek_skips_earlier_keys() {
		let (db, root) = build();
		let mut it = TrieIterator::new::<KeccakHasher, Codec>(&db, root).unwrap();
		it.seek(b"dog");
		assert_eq!(it.next().unwrap().0, b"dog".to_vec());
	}

	#[test]
	fn prefix_filters() {
		let (db, root) = build();
		let it = TrieIterator::new::<KeccakHasher, Codec>(&db, root).unwrap().with_prefix(b"dogg");
		let got: Vec<_> = it.collect();
		assert_eq!(got, vec![(b"dogglesworth".to_vec(), b"cat".to_vec())]);
	}

	#[test]
	fn reinserting_yielded_pairs_preserves_root() {
		let (db, root) = build();
		let got: Vec<_> = TrieIterator::new::<KeccakHasher, Codec>(&db, root).unwrap().collect();

		let mut db2 = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root2 = <KeccakHasher as Hasher>::Out::default();
		{
			let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db2, &mut root2);
			for (k, v) in &got {
				t.insert(k, v).unwrap();
			}
		}
		assert_eq!(root, root2);
	}

	#[test]
	fn deleting_iterator_removes_current_only() {
		let mut db = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = <KeccakHasher as Hasher>::Out::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db, &mut root);
		t.insert(b"doe", b"reindeer").unwrap();
		t.insert(b"dog", b"puppy").unwrap();

		let keys = vec![b"doe".to_vec(), b"dog".to_vec()];
		let mut it = DeletingIterator::new(&mut t, keys);
		let (k, _) = it.next().unwrap().unwrap();
		assert_eq!(k, b"doe".to_vec());
		it.delete_current().unwrap();
		assert_eq!(it.next().unwrap().unwrap().0, b"dog".to_vec());

		assert_eq!(t.get(b"doe").unwrap(), None);
		assert_eq!(t.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
	}
}
