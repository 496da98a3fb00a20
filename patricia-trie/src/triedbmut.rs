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

//! The mutable trie core (C5): `TrieDBMut` backs reads and writes with an
//! in-memory arena (`NodeStorage`) and a `HashDB`, hashing lazily at `root()`
//! or `commit()` rather than on every mutation.

use std::collections::HashSet;
use std::marker::PhantomData;

use hashdb::{DBValue, HashDB, Hasher};
use log::trace;

use crate::lookup;
use crate::nibble;
use crate::node::{empty_children, ChildReference, Node, NodeCodec, NodeHandle, NodeStorage, Stored};
use crate::{Result, Trie, TrieError, TrieMut};

/// Handed to `inspect` to say what should happen to the node it looked at.
enum Action<H> {
	Replace(Node<H>),
	Restore(Node<H>),
	Delete,
}

/// Like `Action`, but `insert` never deletes a node outright.
enum InsertAction<H> {
	Replace(Node<H>),
	Restore(Node<H>),
}

impl<H> InsertAction<H> {
	fn into_action(self) -> Action<H> {
		match self {
			InsertAction::Replace(n) => Action::Replace(n),
			InsertAction::Restore(n) => Action::Restore(n),
		}
	}

	fn unwrap_node(self) -> Node<H> {
		match self {
			InsertAction::Replace(n) | InsertAction::Restore(n) => n,
		}
	}
}

/// A trie implementation using a generic `HashDB` backing database (C5/C7
/// combined: mutation plus lazy hash-ref resolution).
///
/// Changes are buffered in an in-memory arena and only pushed into the
/// backing `HashDB` when `root()` or `commit()` is called.
pub struct TrieDBMut<'a, H, C>
where
	H: Hasher + 'a,
	C: NodeCodec<H>,
{
	storage: NodeStorage<H::Out>,
	db: &'a mut dyn HashDB<H, DBValue>,
	root: &'a mut H::Out,
	root_handle: NodeHandle<H::Out>,
	death_row: HashSet<H::Out>,
	hash_count: usize,
	marker: PhantomData<C>,
}

impl<'a, H, C> TrieDBMut<'a, H, C>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	/// Create a new, empty trie backed by `db`, writing the empty root into `root`.
	pub fn new(db: &'a mut dyn HashDB<H, DBValue>, root: &'a mut H::Out) -> Self {
		*root = C::hashed_null_node();
		TrieDBMut {
			storage: NodeStorage::empty(),
			db,
			root,
			root_handle: NodeHandle::Hash(C::hashed_null_node()),
			death_row: HashSet::new(),
			hash_count: 0,
			marker: PhantomData,
		}
	}

	/// Resume a trie previously committed under `root`. Errors if `root` isn't in `db`.
	pub fn from_existing(db: &'a mut dyn HashDB<H, DBValue>, root: &'a mut H::Out) -> Result<Self, H::Out, C::Error> {
		if *root != C::hashed_null_node() && !db.contains(root) {
			return Err(Box::new(TrieError::InvalidStateRoot(*root)));
		}
		let root_handle = NodeHandle::Hash(*root);
		Ok(TrieDBMut {
			storage: NodeStorage::empty(),
			db,
			root,
			root_handle,
			death_row: HashSet::new(),
			hash_count: 0,
			marker: PhantomData,
		})
	}

	/// The backing database.
	pub fn db(&self) -> &dyn HashDB<H, DBValue> {
		self.db
	}

	/// The backing database, mutably.
	pub fn db_mut(&mut self) -> &mut dyn HashDB<H, DBValue> {
		self.db
	}

	/// Number of nodes hashed and written since construction.
	pub fn hash_count(&self) -> usize {
		self.hash_count
	}

	fn root_handle(&self) -> NodeHandle<H::Out> {
		match self.root_handle {
			NodeHandle::Hash(h) => NodeHandle::Hash(h),
			NodeHandle::InMemory(h) => NodeHandle::InMemory(h),
		}
	}

	/// Pull a hash-referenced node into the arena, returning its handle.
	fn cache(&mut self, hash: H::Out) -> Result<crate::node::StorageHandle, H::Out, C::Error> {
		let node_encoded = self.db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
		let node = Node::from_encoded::<C, H>(&node_encoded, self.db, &mut self.storage);
		Ok(self.storage.alloc(Stored::Cached(node, hash)))
	}

	/// Apply `inspector` to a stored node, translating its `Action` back into
	/// a new `Stored` value (or `None`, if deleted), tracking any cached node
	/// it replaces as dead.
	fn inspect<F>(
		&mut self,
		stored: Stored<H::Out>,
		inspector: F,
	) -> Result<Option<(Stored<H::Out>, bool)>, H::Out, C::Error>
	where
		F: FnOnce(&mut Self, Node<H::Out>) -> Result<Action<H::Out>, H::Out, C::Error>,
	{
		Ok(match stored {
			Stored::New(node) => match inspector(self, node)? {
				Action::Restore(node) => Some((Stored::New(node), false)),
				Action::Replace(node) => Some((Stored::New(node), true)),
				Action::Delete => None,
			},
			Stored::Cached(node, hash) => match inspector(self, node)? {
				Action::Restore(node) => Some((Stored::Cached(node, hash), false)),
				Action::Replace(node) => {
					self.death_row.insert(hash);
					Some((Stored::New(node), true))
				}
				Action::Delete => {
					self.death_row.insert(hash);
					None
				}
			},
		})
	}

	fn lookup(&self, partial: &[u8], handle: &NodeHandle<H::Out>) -> Result<Option<DBValue>, H::Out, C::Error> {
		match handle {
			NodeHandle::Hash(hash) => lookup::get_from_hash::<H, C>(self.db, *hash, partial),
			NodeHandle::InMemory(h) => match &self.storage[*h] {
				Node::Empty => Ok(None),
				Node::Leaf(key, value) => {
					if key.as_slice() == partial {
						Ok(Some(value.clone()))
					} else {
						Ok(None)
					}
				}
				Node::Extension(key, child) => {
					if partial.starts_with(key.as_slice()) {
						self.lookup(&partial[key.len()..], child)
					} else {
						Ok(None)
					}
				}
				Node::Branch(children, value) => {
					if partial.is_empty() {
						Ok(value.clone())
					} else {
						match &children[partial[0] as usize] {
							Some(child) => self.lookup(&partial[1..], child),
							None => Ok(None),
						}
					}
				}
			},
		}
	}

	fn count(&self, handle: &NodeHandle<H::Out>) -> Result<usize, H::Out, C::Error> {
		match handle {
			NodeHandle::Hash(hash) => lookup::count_from_hash::<H, C>(self.db, *hash),
			NodeHandle::InMemory(h) => match &self.storage[*h] {
				Node::Empty => Ok(0),
				Node::Leaf(_, _) => Ok(1),
				Node::Extension(_, child) => self.count(child),
				Node::Branch(children, value) => {
					let mut count = if value.is_some() { 1 } else { 0 };
					for child in children.iter().flatten() {
						count += self.count(child)?;
					}
					Ok(count)
				}
			},
		}
	}

	/// Insert `value` at `partial` below `handle`, returning the new handle
	/// and whether anything actually changed.
	fn insert_at(
		&mut self,
		handle: NodeHandle<H::Out>,
		partial: &[u8],
		value: DBValue,
		old_val: &mut Option<DBValue>,
	) -> Result<(crate::node::StorageHandle, bool), H::Out, C::Error> {
		let h = match handle {
			NodeHandle::InMemory(h) => h,
			NodeHandle::Hash(h) => self.cache(h)?,
		};
		let stored = self.storage.destroy(h);
		let (new_stored, changed) = self
			.inspect(stored, move |trie, stored| {
				trie.insert_inspector(stored, partial, value, old_val).map(InsertAction::into_action)
			})?
			.expect("insertion never deletes");
		Ok((self.storage.alloc(new_stored), changed))
	}

	fn insert_inspector(
		&mut self,
		node: Node<H::Out>,
		partial: &[u8],
		value: DBValue,
		old_val: &mut Option<DBValue>,
	) -> Result<InsertAction<H::Out>, H::Out, C::Error> {
		trace!(target: "trie", "augmented (partial: {:?}, value len: {})", partial, value.len());

		Ok(match node {
			Node::Empty => InsertAction::Replace(Node::Leaf(partial.to_vec(), value)),
			Node::Branch(mut children, stored_value) => {
				if partial.is_empty() {
					let unchanged = stored_value.as_ref() == Some(&value);
					*old_val = stored_value;
					let branch = Node::Branch(children, Some(value));
					if unchanged {
						InsertAction::Restore(branch)
					} else {
						InsertAction::Replace(branch)
					}
				} else {
					let idx = partial[0] as usize;
					let rest = &partial[1..];
					if let Some(child) = children[idx].take() {
						let (new_child, changed) = self.insert_at(child, rest, value, old_val)?;
						children[idx] = Some(new_child.into());
						if !changed {
							return Ok(InsertAction::Restore(Node::Branch(children, stored_value)));
						}
					} else {
						let leaf = self.storage.alloc(Stored::New(Node::Leaf(rest.to_vec(), value)));
						children[idx] = Some(leaf.into());
					}
					InsertAction::Replace(Node::Branch(children, stored_value))
				}
			}
			Node::Leaf(existing_key, stored_value) => {
				let cp = nibble::shared_prefix_len(partial, &existing_key);
				if cp == existing_key.len() && cp == partial.len() {
					let unchanged = stored_value == value;
					*old_val = Some(stored_value);
					if unchanged {
						InsertAction::Restore(Node::Leaf(existing_key, value))
					} else {
						InsertAction::Replace(Node::Leaf(existing_key, value))
					}
				} else if cp == 0 {
					let mut children = empty_children();
					let branch = if existing_key.is_empty() {
						Node::Branch(children, Some(stored_value))
					} else {
						let idx = existing_key[0] as usize;
						let new_leaf = Node::Leaf(existing_key[1..].to_vec(), stored_value);
						children[idx] = Some(self.storage.alloc(Stored::New(new_leaf)).into());
						Node::Branch(children, None)
					};
					let branch = self.insert_inspector(branch, partial, value, old_val)?.unwrap_node();
					InsertAction::Replace(branch)
				} else if cp == existing_key.len() {
					let branch = Node::Branch(empty_children(), Some(stored_value));
					let branch = self.insert_inspector(branch, &partial[cp..], value, old_val)?.unwrap_node();
					let branch_handle = self.storage.alloc(Stored::New(branch)).into();
					InsertAction::Replace(Node::Extension(existing_key, branch_handle))
				} else {
					let low = Node::Leaf(existing_key[cp..].to_vec(), stored_value);
					let augmented_low = self.insert_inspector(low, &partial[cp..], value, old_val)?.unwrap_node();
					InsertAction::Replace(Node::Extension(
						existing_key[..cp].to_vec(),
						self.storage.alloc(Stored::New(augmented_low)).into(),
					))
				}
			}
			Node::Extension(existing_key, child_branch) => {
				let cp = nibble::shared_prefix_len(partial, &existing_key);
				if cp == 0 {
					debug_assert!(!existing_key.is_empty(), "extension keys are never empty (invariant 2)");
					let idx = existing_key[0] as usize;
					let mut children = empty_children();
					children[idx] = if existing_key.len() == 1 {
						Some(child_branch)
					} else {
						let ext = Node::Extension(existing_key[1..].to_vec(), child_branch);
						Some(self.storage.alloc(Stored::New(ext)).into())
					};
					let branch = self.insert_inspector(Node::Branch(children, None), partial, value, old_val)?.unwrap_node();
					InsertAction::Replace(branch)
				} else if cp == existing_key.len() {
					let (new_child, changed) = self.insert_at(child_branch, &partial[cp..], value, old_val)?;
					let new_ext = Node::Extension(existing_key, new_child.into());
					if changed {
						InsertAction::Replace(new_ext)
					} else {
						InsertAction::Restore(new_ext)
					}
				} else {
					let low = Node::Extension(existing_key[cp..].to_vec(), child_branch);
					let augmented_low = self.insert_inspector(low, &partial[cp..], value, old_val)?.unwrap_node();
					InsertAction::Replace(Node::Extension(
						existing_key[..cp].to_vec(),
						self.storage.alloc(Stored::New(augmented_low)).into(),
					))
				}
			}
		})
	}

	fn remove_at(
		&mut self,
		handle: NodeHandle<H::Out>,
		partial: &[u8],
		old_val: &mut Option<DBValue>,
	) -> Result<Option<(crate::node::StorageHandle, bool)>, H::Out, C::Error> {
		let stored = match handle {
			NodeHandle::InMemory(h) => self.storage.destroy(h),
			NodeHandle::Hash(h) => {
				let h = self.cache(h)?;
				self.storage.destroy(h)
			}
		};
		let opt = self.inspect(stored, move |trie, node| trie.remove_inspector(node, partial, old_val))?;
		Ok(opt.map(|(new, changed)| (self.storage.alloc(new), changed)))
	}

	fn remove_inspector(
		&mut self,
		node: Node<H::Out>,
		partial: &[u8],
		old_val: &mut Option<DBValue>,
	) -> Result<Action<H::Out>, H::Out, C::Error> {
		Ok(match (node, partial.is_empty()) {
			(Node::Empty, _) => Action::Delete,
			(Node::Branch(c, None), true) => Action::Restore(Node::Branch(c, None)),
			(Node::Branch(children, Some(val)), true) => {
				*old_val = Some(val);
				Action::Replace(self.fix(Node::Branch(children, None))?)
			}
			(Node::Branch(mut children, value), false) => {
				let idx = partial[0] as usize;
				if let Some(child) = children[idx].take() {
					match self.remove_at(child, &partial[1..], old_val)? {
						Some((new, changed)) => {
							children[idx] = Some(new.into());
							let branch = Node::Branch(children, value);
							if changed {
								Action::Replace(branch)
							} else {
								Action::Restore(branch)
							}
						}
						None => Action::Replace(self.fix(Node::Branch(children, value))?),
					}
				} else {
					Action::Restore(Node::Branch(children, value))
				}
			}
			(Node::Leaf(key, value), _) => {
				if key.as_slice() == partial {
					*old_val = Some(value);
					Action::Delete
				} else {
					Action::Restore(Node::Leaf(key, value))
				}
			}
			(Node::Extension(key, child_branch), _) => {
				let cp = nibble::shared_prefix_len(partial, &key);
				if cp == key.len() {
					match self.remove_at(child_branch, &partial[cp..], old_val)? {
						Some((new_child, changed)) => {
							let new_child = new_child.into();
							if changed {
								Action::Replace(self.fix(Node::Extension(key, new_child))?)
							} else {
								Action::Restore(Node::Extension(key, new_child))
							}
						}
						None => Action::Delete,
					}
				} else {
					Action::Restore(Node::Extension(key, child_branch))
				}
			}
		})
	}

	/// Re-normalize a node that may have lost the branch-minimality or
	/// extension-child invariants after a deletion (invariants 3 and 4).
	fn fix(&mut self, node: Node<H::Out>) -> Result<Node<H::Out>, H::Out, C::Error> {
		match node {
			Node::Branch(mut children, value) => {
				enum UsedIndex {
					None,
					One(u8),
					Many,
				}
				let mut used_index = UsedIndex::None;
				for i in 0..16 {
					match (children[i].is_none(), &used_index) {
						(false, UsedIndex::None) => used_index = UsedIndex::One(i as u8),
						(false, UsedIndex::One(_)) => {
							used_index = UsedIndex::Many;
							break;
						}
						_ => continue,
					}
				}
				match (used_index, value) {
					(UsedIndex::None, None) => {
						unreachable!("branch with no children and no value; fix should never be called on it")
					}
					(UsedIndex::One(a), None) => {
						let child = children[a as usize].take().expect("used_index only set if occupied");
						let new_node = Node::Extension(vec![a], child);
						self.fix(new_node)
					}
					(UsedIndex::None, Some(value)) => {
						trace!(target: "trie", "fixing: branch -> leaf");
						Ok(Node::Leaf(Vec::new(), value))
					}
					(_, value) => {
						trace!(target: "trie", "fixing: restoring branch");
						Ok(Node::Branch(children, value))
					}
				}
			}
			Node::Extension(partial, child) => {
				let stored = match child {
					NodeHandle::InMemory(h) => self.storage.destroy(h),
					NodeHandle::Hash(h) => {
						let h = self.cache(h)?;
						self.storage.destroy(h)
					}
				};
				let (child_node, maybe_hash) = match stored {
					Stored::New(node) => (node, None),
					Stored::Cached(node, hash) => (node, Some(hash)),
				};
				match child_node {
					Node::Extension(sub_partial, sub_child) => {
						if let Some(hash) = maybe_hash {
							self.death_row.insert(hash);
						}
						let new_partial: Vec<u8> = partial.iter().chain(sub_partial.iter()).copied().collect();
						trace!(target: "trie", "fixing: extension combination");
						self.fix(Node::Extension(new_partial, sub_child))
					}
					Node::Leaf(sub_partial, value) => {
						if let Some(hash) = maybe_hash {
							self.death_row.insert(hash);
						}
						let new_partial: Vec<u8> = partial.iter().chain(sub_partial.iter()).copied().collect();
						trace!(target: "trie", "fixing: extension -> leaf");
						Ok(Node::Leaf(new_partial, value))
					}
					child_node => {
						trace!(target: "trie", "fixing: restoring extension");
						let stored =
							if let Some(hash) = maybe_hash { Stored::Cached(child_node, hash) } else { Stored::New(child_node) };
						Ok(Node::Extension(partial, self.storage.alloc(stored).into()))
					}
				}
			}
			other => Ok(other),
		}
	}

	/// Push buffered mutations into the backing `HashDB`, updating `root`.
	pub fn commit(&mut self) {
		trace!(target: "trie", "committing {} dead nodes", self.death_row.len());
		for hash in self.death_row.drain() {
			self.db.remove(&hash);
		}

		let handle = match self.root_handle() {
			NodeHandle::Hash(_) => return,
			NodeHandle::InMemory(h) => h,
		};

		match self.storage.destroy(handle) {
			Stored::New(node) => {
				let encoded_root = node.into_encoded::<_, C, H>(|child| self.commit_child(child));
				*self.root = self.db.insert(&encoded_root[..]);
				self.hash_count += 1;
				self.root_handle = NodeHandle::Hash(*self.root);
			}
			Stored::Cached(node, hash) => {
				*self.root = hash;
				self.root_handle = NodeHandle::InMemory(self.storage.alloc(Stored::Cached(node, hash)));
			}
		}
	}

	fn commit_child(&mut self, handle: NodeHandle<H::Out>) -> ChildReference<H::Out> {
		match handle {
			NodeHandle::Hash(hash) => ChildReference::Hash(hash),
			NodeHandle::InMemory(storage_handle) => match self.storage.destroy(storage_handle) {
				Stored::Cached(_, hash) => ChildReference::Hash(hash),
				Stored::New(node) => {
					let encoded = node.into_encoded::<_, C, H>(|h| self.commit_child(h));
					if encoded.len() >= H::LENGTH {
						let hash = self.db.insert(&encoded[..]);
						self.hash_count += 1;
						ChildReference::Hash(hash)
					} else {
						ChildReference::Inline(encoded)
					}
				}
			},
		}
	}
}

impl<'a, H, C> TrieMut<H, C> for TrieDBMut<'a, H, C>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	fn root(&mut self) -> &H::Out {
		self.commit();
		self.root
	}

	fn is_empty(&self) -> bool {
		match self.root_handle {
			NodeHandle::Hash(h) => h == C::hashed_null_node(),
			NodeHandle::InMemory(h) => matches!(self.storage[h], Node::Empty),
		}
	}

	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		self.lookup(&nibble::key_to_nibbles(key), &self.root_handle)
	}

	fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		if value.is_empty() {
			return self.remove(key);
		}
		let mut old_val = None;
		trace!(target: "trie", "insert: key={:?}, {} bytes", key, value.len());
		let root_handle = self.root_handle();
		let (new_handle, _changed) =
			self.insert_at(root_handle, &nibble::key_to_nibbles(key), value.to_vec(), &mut old_val)?;
		self.root_handle = NodeHandle::InMemory(new_handle);
		Ok(old_val)
	}

	fn remove(&mut self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		trace!(target: "trie", "remove: key={:?}", key);
		let root_handle = self.root_handle();
		let partial = nibble::key_to_nibbles(key);
		let mut old_val = None;
		match self.remove_at(root_handle, &partial, &mut old_val)? {
			Some((handle, _changed)) => self.root_handle = NodeHandle::InMemory(handle),
			None => {
				self.root_handle = NodeHandle::Hash(C::hashed_null_node());
				*self.root = C::hashed_null_node();
			}
		}
		Ok(old_val)
	}

	fn len(&self) -> Result<usize, H::Out, C::Error> {
		self.count(&self.root_handle)
	}
}

impl<'a, H, C> Drop for TrieDBMut<'a, H, C>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	fn drop(&mut self) {
		self.commit();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use keccak_hasher::KeccakHasher;
	use memorydb::MemoryDB;
	use triehash::trie_root;

	type Codec = crate::RlpNodeCodec<KeccakHasher>;

	#[test]
	fn init_is_empty() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		assert_eq!(*t.root(), Codec::hashed_null_node());
		assert!(t.is_empty());
	}

	#[test]
	fn insert_on_empty() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01u8, 0x23], &[0x01u8, 0x23]).unwrap();
		assert_eq!(
			*t.root(),
			trie_root::<KeccakHasher, triestream::RlpTrieStream, _, _, _>(vec![(vec![0x01u8, 0x23], vec![0x01u8, 0x23])])
		);
	}

	#[test]
	fn insert_replace_root() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01u8, 0x23], &[0x01u8, 0x23]).unwrap();
		t.insert(&[0x01u8, 0x23], &[0x23u8, 0x45]).unwrap();
		assert_eq!(
			*t.root(),
			trie_root::<KeccakHasher, triestream::RlpTrieStream, _, _, _>(vec![(vec![0x01u8, 0x23], vec![0x23u8, 0x45])])
		);
	}

	#[test]
	fn insert_make_branch_root() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01u8, 0x23], &[0x01u8, 0x23]).unwrap();
		t.insert(&[0x11u8, 0x23], &[0x11u8, 0x23]).unwrap();
		assert_eq!(
			*t.root(),
			trie_root::<KeccakHasher, triestream::RlpTrieStream, _, _, _>(vec![
				(vec![0x01u8, 0x23], vec![0x01u8, 0x23]),
				(vec![0x11u8, 0x23], vec![0x11u8, 0x23]),
			])
		);
	}

	#[test]
	fn insert_into_branch_root() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01u8, 0x23], &[0x01u8, 0x23]).unwrap();
		t.insert(&[0xf1u8, 0x23], &[0xf1u8, 0x23]).unwrap();
		t.insert(&[0x81u8, 0x23], &[0x81u8, 0x23]).unwrap();
		assert_eq!(
			*t.root(),
			trie_root::<KeccakHasher, triestream::RlpTrieStream, _, _, _>(vec![
				(vec![0x01u8, 0x23], vec![0x01u8, 0x23]),
				(vec![0x81u8, 0x23], vec![0x81u8, 0x23]),
				(vec![0xf1u8, 0x23], vec![0xf1u8, 0x23]),
			])
		);
	}

	#[test]
	fn insert_split_leaf_and_extension() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01, 0x23, 0x45], &[0x01]).unwrap();
		t.insert(&[0x01, 0xf3, 0x45], &[0x02]).unwrap();
		t.insert(&[0x01, 0xf3, 0xf5], &[0x03]).unwrap();
		assert_eq!(
			*t.root(),
			trie_root::<KeccakHasher, triestream::RlpTrieStream, _, _, _>(vec![
				(vec![0x01, 0x23, 0x45], vec![0x01]),
				(vec![0x01, 0xf3, 0x45], vec![0x02]),
				(vec![0x01, 0xf3, 0xf5], vec![0x03]),
			])
		);
	}

	#[test]
	fn remove_to_empty() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(&[0x01, 0x23], b"puppy").unwrap();
		t.insert(&[0x01, 0x34], b"cat").unwrap();
		t.remove(&[0x01, 0x23]).unwrap();
		t.remove(&[0x01, 0x34]).unwrap();
		assert!(t.is_empty());
		assert_eq!(*t.root(), Codec::hashed_null_node());
	}

	#[test]
	fn go_ethereum_vector_1() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(b"doe", b"reindeer").unwrap();
		t.insert(b"dog", b"puppy").unwrap();
		t.insert(b"dogglesworth", b"cat").unwrap();
		assert_eq!(format!("{:x}", t.root()), "8aad789dff2f538bca5d8ea56e8abe10f4c7ba3a5dea95fea4cd6e7c3a1168d3");
	}

	#[test]
	fn mixed_insert_delete_scenario() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(b"do", b"verb").unwrap();
		t.insert(b"ether", b"wookiedoo").unwrap();
		t.insert(b"horse", b"stallion").unwrap();
		t.insert(b"shaman", b"horse").unwrap();
		t.insert(b"doge", b"coin").unwrap();
		t.remove(b"ether").unwrap();
		t.insert(b"dog", b"puppy").unwrap();
		t.remove(b"shaman").unwrap();
		assert_eq!(format!("{:x}", t.root()), "5991bb8c6514148a29db676a14ac506cd2cd5775ace63c30a4fe457715e9ac84");
	}

	#[test]
	fn returns_previous_value() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		assert!(t.insert(b"dog", b"puppy").unwrap().is_none());
		assert_eq!(t.insert(b"dog", b"cat").unwrap(), Some(b"puppy".to_vec()));
	}

	#[test]
	fn delete_nonexistent_is_noop() {
		let mut memdb = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = Default::default();
		let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut memdb, &mut root);
		t.insert(b"dog", b"puppy").unwrap();
		let before = *t.root();
		assert!(t.remove(b"cat").unwrap().is_none());
		assert_eq!(*t.root(), before);
	}
}
