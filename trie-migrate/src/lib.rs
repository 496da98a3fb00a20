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

//! Batched re-keying of a committed MPT into a binary trie (C16), with
//! rollback and sampled verification, plus an `OverlayReader` that serves
//! reads from the migration destination and falls back to the
//! not-yet-migrated MPT on a miss.
//!
//! Named `MptToBinaryMigrator` rather than after "verkle": the destination
//! here is the binary trie (`binary-trie`), not a true Verkle/IPA structure.

use std::fmt;

use binary_trie::BinaryTrieMut;
use hashdb::{DBValue, HashDB, Hasher};
use log::debug;
use patricia_trie::{iterator, triedb::TrieDB, NodeCodec, Trie};

/// Batch size `MptToBinaryMigrator::new` uses if the caller has no reason to
/// pick a different one.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Why `verify` found the migration incomplete or wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyMismatch<H> {
	/// A migrated key's value differs between source and destination.
	Value { key: Vec<u8> },
	/// The number of migrated entries doesn't match the source trie's `len`.
	Count { expected: usize, got: usize },
	/// The source root is no longer resolvable in its database.
	SourceUnavailable(H),
}

impl<H: fmt::Debug> fmt::Display for VerifyMismatch<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			VerifyMismatch::Value { key } => write!(f, "value mismatch for migrated key {:?}", key),
			VerifyMismatch::Count { expected, got } => {
				write!(f, "migrated count {} does not match source length {}", got, expected)
			}
			VerifyMismatch::SourceUnavailable(root) => write!(f, "source root {:?} unavailable", root),
		}
	}
}

impl<H: fmt::Debug> std::error::Error for VerifyMismatch<H> {}

/// Re-keys an MPT's `(raw_key, value)` pairs into a binary trie, in batches
/// small enough that a caller can interleave other work between `step`s.
pub struct MptToBinaryMigrator<'a, H: Hasher, C: NodeCodec<H>> {
	source_db: &'a dyn HashDB<H, DBValue>,
	source_root: H::Out,
	entries: Vec<(Vec<u8>, DBValue)>,
	cursor: usize,
	batch_size: usize,
	dest: BinaryTrieMut,
	checkpoint: BinaryTrieMut,
	_codec: std::marker::PhantomData<C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> MptToBinaryMigrator<'a, H, C> {
	/// Materializes the full sorted entry list of the source trie up front
	/// (matching what `patricia_trie::iterator` already does internally) and
	/// snapshots `dest` as the rollback checkpoint.
	pub fn new(
		source_db: &'a dyn HashDB<H, DBValue>,
		source_root: H::Out,
		dest: BinaryTrieMut,
		batch_size: usize,
	) -> patricia_trie::Result<Self, H::Out, C::Error> {
		let entries = iterator::entries::<H, C>(source_db, source_root)?;
		let checkpoint = dest.clone();
		Ok(MptToBinaryMigrator {
			source_db,
			source_root,
			entries,
			cursor: 0,
			batch_size,
			dest,
			checkpoint,
			_codec: std::marker::PhantomData,
		})
	}

	/// Migrate up to `batch_size` more entries. Returns how many were
	/// migrated this call and whether the source is now fully migrated.
	pub fn step(&mut self) -> (usize, bool) {
		let start = self.cursor;
		let end = usize::min(start + self.batch_size, self.entries.len());
		for (key, value) in &self.entries[start..end] {
			self.dest.put(key, value.clone());
		}
		self.cursor = end;
		let migrated = end - start;
		debug!(target: "trie-migrate", "migrated {} entries, {}/{} done", migrated, self.cursor, self.entries.len());
		(migrated, self.cursor >= self.entries.len())
	}

	/// Drive `step` to completion and return the destination's final hash.
	pub fn run_to_completion(&mut self) -> [u8; 32] {
		loop {
			let (_, exhausted) = self.step();
			if exhausted {
				break;
			}
		}
		self.dest.hash()
	}

	/// Undo every mutation this migrator has made to the destination,
	/// restoring it to its state at construction time. Only meaningful if
	/// nothing else has observed or written to `dest` in the meantime.
	pub fn rollback(&mut self) {
		self.dest = self.checkpoint.clone();
		self.cursor = 0;
	}

	/// Re-read every `1/sample_rate`th migrated entry from both tries and
	/// confirm the values agree. `sample_rate <= 1` additionally confirms
	/// the migrated count equals the source's `len`.
	pub fn verify(&self, sample_rate: usize) -> Result<(), VerifyMismatch<H::Out>> {
		let sample_rate = sample_rate.max(1);
		for (key, value) in self.entries[..self.cursor].iter().step_by(sample_rate) {
			let found = self.dest.get(key);
			if found.as_ref() != Some(value) {
				return Err(VerifyMismatch::Value { key: key.clone() });
			}
		}
		if sample_rate == 1 {
			let trie = TrieDB::<H, C>::new(self.source_db, &self.source_root)
				.map_err(|_| VerifyMismatch::SourceUnavailable(self.source_root))?;
			let source_len =
				trie.len().map_err(|_| VerifyMismatch::SourceUnavailable(self.source_root))?;
			if self.cursor != source_len {
				return Err(VerifyMismatch::Count { expected: source_len, got: self.cursor });
			}
		}
		Ok(())
	}

	pub fn is_exhausted(&self) -> bool {
		self.cursor >= self.entries.len()
	}

	pub fn migrated_count(&self) -> usize {
		self.cursor
	}

	/// The destination trie, in its current (possibly partially-migrated)
	/// state.
	pub fn destination(&self) -> &BinaryTrieMut {
		&self.dest
	}
}

/// Composes a migration destination with its not-yet-migrated source: reads
/// check the binary trie first, falling back to the MPT on a miss. Once
/// migration completes the MPT is never consulted again by construction
/// (every key is present in `binary`), but nothing here assumes that.
pub struct OverlayReader<'a, H: Hasher, C: NodeCodec<H>> {
	binary: &'a BinaryTrieMut,
	mpt_db: &'a dyn HashDB<H, DBValue>,
	mpt_root: H::Out,
	_codec: std::marker::PhantomData<C>,
}

impl<'a, H: Hasher, C: NodeCodec<H>> OverlayReader<'a, H, C> {
	pub fn new(binary: &'a BinaryTrieMut, mpt_db: &'a dyn HashDB<H, DBValue>, mpt_root: H::Out) -> Self {
		OverlayReader { binary, mpt_db, mpt_root, _codec: std::marker::PhantomData }
	}

	pub fn get(&self, key: &[u8]) -> patricia_trie::Result<Option<DBValue>, H::Out, C::Error> {
		if let Some(value) = self.binary.get(key) {
			return Ok(Some(value));
		}
		let trie = TrieDB::<H, C>::new(self.mpt_db, &self.mpt_root)?;
		trie.get(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ethereum_types::H256;
	use keccak_hasher::KeccakHasher;
	use memorydb::MemoryDB;
	use patricia_trie::{RlpNodeCodec, TrieDBMut, TrieMut};

	type Codec = RlpNodeCodec<KeccakHasher>;

	fn build_source() -> (MemoryDB<KeccakHasher, DBValue>, H256, usize) {
		let mut db = MemoryDB::<KeccakHasher, DBValue>::new();
		let mut root = H256::default();
		let pairs: &[(&[u8], &[u8])] =
			&[(b"doe", b"reindeer"), (b"dog", b"puppy"), (b"dogglesworth", b"cat"), (b"horse", b"stallion")];
		{
			let mut t = TrieDBMut::<KeccakHasher, Codec>::new(&mut db, &mut root);
			for (k, v) in pairs {
				t.insert(k, v).unwrap();
			}
		}
		(db, root, pairs.len())
	}

	#[test]
	fn run_to_completion_migrates_everything() {
		let (db, root, count) = build_source();
		let mut migrator =
			MptToBinaryMigrator::<KeccakHasher, Codec>::new(&db, root, BinaryTrieMut::new(), 2).unwrap();
		migrator.run_to_completion();
		assert!(migrator.is_exhausted());
		assert_eq!(migrator.migrated_count(), count);
		assert!(migrator.verify(1).is_ok());
		assert_eq!(migrator.destination().get(b"dog"), Some(b"puppy".to_vec()));
	}

	#[test]
	fn step_advances_by_at_most_batch_size() {
		let (db, root, count) = build_source();
		let mut migrator =
			MptToBinaryMigrator::<KeccakHasher, Codec>::new(&db, root, BinaryTrieMut::new(), 2).unwrap();
		let (migrated, exhausted) = migrator.step();
		assert_eq!(migrated, 2);
		assert!(!exhausted);
		assert_eq!(migrator.migrated_count(), 2);
		assert!(count > 2);
	}

	#[test]
	fn rollback_restores_pre_migration_destination() {
		let (db, root, _) = build_source();
		let mut preloaded = BinaryTrieMut::new();
		preloaded.put(b"untouched", b"value".to_vec());
		let pre_hash = preloaded.hash();

		let mut migrator =
			MptToBinaryMigrator::<KeccakHasher, Codec>::new(&db, root, preloaded, 2).unwrap();
		migrator.step();
		assert_ne!(migrator.destination().hash(), pre_hash);

		migrator.rollback();
		assert_eq!(migrator.destination().hash(), pre_hash);
		assert_eq!(migrator.migrated_count(), 0);
	}

	#[test]
	fn verify_detects_count_mismatch_before_completion() {
		let (db, root, count) = build_source();
		let mut migrator =
			MptToBinaryMigrator::<KeccakHasher, Codec>::new(&db, root, BinaryTrieMut::new(), 2).unwrap();
		migrator.step();
		match migrator.verify(1) {
			Err(VerifyMismatch::Count { got, .. }) => assert!(got < count),
			other => panic!("expected a count mismatch, got {:?}", other),
		}
	}

	#[test]
	fn overlay_reader_falls_back_to_mpt_on_miss() {
		let (db, root, _) = build_source();
		let mut migrator =
			MptToBinaryMigrator::<KeccakHasher, Codec>::new(&db, root, BinaryTrieMut::new(), 1).unwrap();
		migrator.step(); // migrate only the first entry
		let overlay = OverlayReader::<KeccakHasher, Codec>::new(migrator.destination(), &db, root);

		// Whatever made it into the destination is served directly...
		for (key, value) in &migrator.entries[..migrator.migrated_count()] {
			assert_eq!(overlay.get(key).unwrap(), Some(value.clone()));
		}
		// ...and whatever hasn't yet still resolves, via the MPT fallback.
		assert_eq!(overlay.get(b"horse").unwrap(), Some(b"stallion".to_vec()));
	}
}
