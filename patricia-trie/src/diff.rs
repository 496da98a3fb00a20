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

//! Pending-mutation accumulation and trie-vs-trie diffing (C12).
//!
//! `DiffTracker` batches `Put`/`Delete` calls against a base trie before
//! they're actually applied — useful for staging a block's state changes and
//! replaying them atomically — and separately computes the diff between two
//! already-built tries by walking their entries in lock-step.

use std::collections::{BTreeMap, HashMap};

use hashdb::{DBValue, HashDB, Hasher};

use crate::iterator;
use crate::node::NodeCodec;
use crate::{Result, TrieMut};

/// One key's pending change, tracked against whatever value (if any) it had
/// before this tracker started recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
	Inserted(DBValue),
	Updated { old: DBValue, new: DBValue },
	Deleted(DBValue),
}

/// Accumulates pending `Put`/`Delete` calls against a base trie, and computes
/// the entry-level diff between two tries.
#[derive(Default)]
pub struct DiffTracker {
	entries: HashMap<Vec<u8>, Entry>,
	/// Keys this tracker itself inserted (never previously persisted),
	/// tracked so a delete of one drops the entry instead of recording a
	/// deletion of something that was never committed.
	inserted_here: std::collections::HashSet<Vec<u8>>,
}

impl DiffTracker {
	pub fn new() -> Self {
		DiffTracker::default()
	}

	/// Record that `key`'s value is changing from `old` (`None` if it didn't
	/// exist) to `new`. A no-op round-trip (`old == Some(new)`) clears any
	/// prior record for `key` instead of recording an update.
	pub fn record_put(&mut self, key: Vec<u8>, old: Option<DBValue>, new: DBValue) {
		match old {
			None => {
				self.entries.insert(key.clone(), Entry::Inserted(new));
				self.inserted_here.insert(key);
			}
			Some(old) if old == new => {
				self.entries.remove(&key);
				self.inserted_here.remove(&key);
			}
			Some(old) => {
				self.entries.insert(key, Entry::Updated { old, new });
			}
		}
	}

	/// Record that `key` (previously holding `old`) has been deleted. If
	/// `key` was `Inserted` by this same tracker, the whole entry is dropped.
	pub fn record_delete(&mut self, key: Vec<u8>, old: DBValue) {
		if self.inserted_here.remove(&key) {
			self.entries.remove(&key);
			return;
		}
		self.entries.insert(key, Entry::Deleted(old));
	}

	/// The number of keys with a pending change.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Replay the recorded entries onto `trie`, in key order.
	pub fn apply_to<H, C>(&self, trie: &mut dyn TrieMut<H, C>) -> Result<(), H::Out, C::Error>
	where
		H: Hasher,
		C: NodeCodec<H>,
	{
		let ordered: BTreeMap<_, _> = self.entries.iter().collect();
		for (key, entry) in ordered {
			match entry {
				Entry::Inserted(value) | Entry::Updated { new: value, .. } => {
					trie.insert(key, value)?;
				}
				Entry::Deleted(_) => {
					trie.remove(key)?;
				}
			}
		}
		Ok(())
	}

	/// Walk `a` and `b`'s entries in lock-step sorted-key order, emitting one
	/// entry per differing key.
	pub fn diff_tries<H, C>(
		db_a: &dyn HashDB<H, DBValue>,
		root_a: H::Out,
		db_b: &dyn HashDB<H, DBValue>,
		root_b: H::Out,
	) -> Result<DiffTracker, H::Out, C::Error>
	where
		H: Hasher,
		C: NodeCodec<H>,
	{
		let a = iterator::entries::<H, C>(db_a, root_a)?;
		let b = iterator::entries::<H, C>(db_b, root_b)?;

		let mut tracker = DiffTracker::new();
		let (mut i, mut j) = (0, 0);
		while i < a.len() || j < b.len() {
			match (a.get(i), b.get(j)) {
				(Some((ka, va)), Some((kb, vb))) => {
					if ka == kb {
						if va != vb {
							tracker.entries.insert(ka.clone(), Entry::Updated { old: va.clone(), new: vb.clone() });
						}
						i += 1;
						j += 1;
					} else if ka < kb {
						tracker.entries.insert(ka.clone(), Entry::Deleted(va.clone()));
						i += 1;
					} else {
						tracker.entries.insert(kb.clone(), Entry::Inserted(vb.clone()));
						j += 1;
					}
				}
				(Some((ka, va)), None) => {
					tracker.entries.insert(ka.clone(), Entry::Deleted(va.clone()));
					i += 1;
				}
				(None, Some((kb, vb))) => {
					tracker.entries.insert(kb.clone(), Entry::Inserted(vb.clone()));
					j += 1;
				}
				(None, None) => unreachable!(),
			}
		}
		Ok(tracker)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{RlpNodeCodec, Trie, TrieDBMut};
	use keccak_hasher::KeccakHasher;
	use memorydb::MemoryDB;

	type Codec = RlpNodeCodec<KeccakHasher>;

	fn trie_with(pairs: &[(&[u8], &[u8])]) -> (MemoryDB<KeccakHasher, DBValue>, <KeccakHasher as Hasher>::Out) {
		let mut db = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = <KeccakHasher as Hasher>::Out::default();
		{
			let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db, &mut root);
			for (k, v) in pairs {
				t.insert(k, v).unwrap();
			}
		}
		(db, root)
	}

	#[test]
	fn no_op_round_trip_clears_entry() {
		let mut d = DiffTracker::new();
		d.record_put(b"k".to_vec(), Some(b"v".to_vec()), b"v2".to_vec());
		assert_eq!(d.len(), 1);
		d.record_put(b"k".to_vec(), Some(b"v2".to_vec()), b"v".to_vec());
		// net effect across the two calls is a real change (v -> v), but the
		// second call alone reports old==new against its own `old` argument,
		// which should clear the entry.
		d.record_put(b"k2".to_vec(), Some(b"same".to_vec()), b"same".to_vec());
		assert!(!d.entries.contains_key(b"k2".as_slice()));
	}

	#[test]
	fn delete_of_local_insert_drops_entry() {
		let mut d = DiffTracker::new();
		d.record_put(b"k".to_vec(), None, b"v".to_vec());
		d.record_delete(b"k".to_vec(), b"v".to_vec());
		assert!(d.is_empty());
	}

	#[test]
	fn diff_then_apply_matches_target() {
		let (db_a, root_a) = trie_with(&[(b"dog", b"puppy"), (b"doe", b"reindeer")]);
		let (db_b, root_b) = trie_with(&[(b"dog", b"hound"), (b"cat", b"kitten")]);

		let diff = DiffTracker::diff_tries::<KeccakHasher, Codec>(&db_a, root_a, &db_b, root_b).unwrap();

		let mut db_c = db_a.clone();
		let mut root_c = root_a;
		{
			let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db_c, &mut root_c);
			diff.apply_to(&mut t).unwrap();
		}
		assert_eq!(root_c, root_b);
	}
}
