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

//! Read-only, lazily-resolving access to a committed trie (C7): `TrieDB`
//! answers `get`/`len` by walking hash-referenced nodes straight out of a
//! `HashDB`, without materializing an in-memory arena the way `TrieDBMut`
//! does. `SecTrieDB`/`SecTrieDBMut` lay the "secure trie" convention (keys
//! hashed before lookup, as Ethereum's account/storage tries do) over the
//! bare core.

use std::marker::PhantomData;

use hashdb::{DBValue, HashDB, Hasher};

use crate::lookup;
use crate::nibble;
use crate::node::NodeCodec;
use crate::triedbmut::TrieDBMut;
use crate::{Result, Trie, TrieError, TrieMut};

/// Read-only view of a trie already committed to a `HashDB`, keyed by `root`.
pub struct TrieDB<'a, H: Hasher, C: NodeCodec<H>> {
	db: &'a dyn HashDB<H, DBValue>,
	root: &'a H::Out,
	marker: PhantomData<C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> TrieDB<'a, H, C> {
	/// Create a trie view over `db` rooted at `root`. Fails if `root` isn't
	/// present in `db` (unless it's the canonical empty-trie root, which
	/// needs no backing node).
	pub fn new(db: &'a dyn HashDB<H, DBValue>, root: &'a H::Out) -> Result<Self, H::Out, C::Error> {
		if *root != C::hashed_null_node() && !db.contains(root) {
			return Err(Box::new(TrieError::InvalidStateRoot(*root)));
		}
		Ok(TrieDB { db, root, marker: PhantomData })
	}

	/// The database this view reads from.
	pub fn db(&self) -> &dyn HashDB<H, DBValue> {
		self.db
	}
}

impl<'a, H: Hasher, C: NodeCodec<H>> Trie<H, C> for TrieDB<'a, H, C> {
	fn root(&self) -> &H::Out {
		self.root
	}

	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		lookup::get_from_hash::<H, C>(self.db, *self.root, &nibble::key_to_nibbles(key))
	}

	fn len(&self) -> Result<usize, H::Out, C::Error> {
		lookup::count_from_hash::<H, C>(self.db, *self.root)
	}
}

/// A "secure" trie: keys are hashed before being used as trie paths, matching
/// Ethereum's account and storage tries. Guards against an attacker choosing
/// adversarial keys to unbalance the trie.
pub struct SecTrieDB<'a, H: Hasher, C: NodeCodec<H>> {
	raw: TrieDB<'a, H, C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> SecTrieDB<'a, H, C> {
	pub fn new(db: &'a dyn HashDB<H, DBValue>, root: &'a H::Out) -> Result<Self, H::Out, C::Error> {
		Ok(SecTrieDB { raw: TrieDB::new(db, root)? })
	}
}

impl<'a, H: Hasher, C: NodeCodec<H>> Trie<H, C> for SecTrieDB<'a, H, C> {
	fn root(&self) -> &H::Out {
		self.raw.root()
	}

	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		self.raw.get(H::hash(key).as_ref())
	}

	fn len(&self) -> Result<usize, H::Out, C::Error> {
		self.raw.len()
	}
}

/// Mutable counterpart of `SecTrieDB`: every key is hashed before it reaches
/// the underlying `TrieDBMut`.
pub struct SecTrieDBMut<'a, H: Hasher, C: NodeCodec<H>> {
	raw: TrieDBMut<'a, H, C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> SecTrieDBMut<'a, H, C> {
	pub fn new(db: &'a mut dyn HashDB<H, DBValue>, root: &'a mut H::Out) -> Self {
		SecTrieDBMut { raw: TrieDBMut::new(db, root) }
	}

	pub fn from_existing(db: &'a mut dyn HashDB<H, DBValue>, root: &'a mut H::Out) -> Result<Self, H::Out, C::Error> {
		Ok(SecTrieDBMut { raw: TrieDBMut::from_existing(db, root)? })
	}
}

impl<'a, H: Hasher, C: NodeCodec<H>> TrieMut<H, C> for SecTrieDBMut<'a, H, C> {
	fn root(&mut self) -> &H::Out {
		self.raw.root()
	}

	fn is_empty(&self) -> bool {
		self.raw.is_empty()
	}

	fn get(&self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		self.raw.get(H::hash(key).as_ref())
	}

	fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		self.raw.insert(H::hash(key).as_ref(), value)
	}

	fn remove(&mut self, key: &[u8]) -> Result<Option<DBValue>, H::Out, C::Error> {
		self.raw.remove(H::hash(key).as_ref())
	}

	fn len(&self) -> Result<usize, H::Out, C::Error> {
		self.raw.len()
	}
}
