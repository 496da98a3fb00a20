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

//! Drives state-sync fetching of trie nodes by hash (C15): a priority queue
//! of pending requests, deduplicated against what's already pending,
//! in-flight, done, or already in the node database.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use log::{trace, warn};
use parking_lot::Mutex;

/// Request priority. Lower discriminant value ⇒ popped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
	Root = 0,
	Shallow = 1,
	Medium = 2,
	Deep = 3,
	Heal = 4,
}

impl Priority {
	/// Classify a request by its depth from the root and whether it's a
	/// state-healing request (which always sorts last).
	pub fn classify(depth: usize, is_heal: bool) -> Priority {
		if is_heal {
			Priority::Heal
		} else if depth == 0 {
			Priority::Root
		} else if depth <= 4 {
			Priority::Shallow
		} else if depth <= 16 {
			Priority::Medium
		} else {
			Priority::Deep
		}
	}
}

/// A node the scheduler wants fetched.
#[derive(Debug, Clone)]
pub struct Request<H> {
	pub hash: H,
	pub path: Vec<u8>,
	pub depth: usize,
	pub is_heal: bool,
	pub priority: Priority,
}

/// Why `node_arrived`/`node_failed` rejected a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError<H> {
	/// The delivered bytes don't hash to the requested hash.
	HashMismatch { expected: H },
	/// The hash named wasn't currently in flight.
	NotInFlight,
}

impl<H: fmt::Debug> fmt::Display for SyncError<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncError::HashMismatch { expected } => write!(f, "node hash mismatch, expected {:?}", expected),
			SyncError::NotInFlight => write!(f, "hash not currently in flight"),
		}
	}
}

impl<H: fmt::Debug> std::error::Error for SyncError<H> {}

/// The minimal node-database contract the scheduler writes through on
/// arrival — deliberately narrower than `hashdb::HashDB` so this crate isn't
/// forced to commit to a concrete `Hasher`; wrap a real `HashDB` to satisfy
/// it (see the `tests` module).
pub trait NodeSink<H> {
	fn insert_node(&mut self, hash: H, data: Vec<u8>);
}

struct State<H> {
	heap: BinaryHeap<Reverse<(Priority, u64)>>,
	pending: HashMap<u64, Request<H>>,
	pending_hashes: HashSet<H>,
	inflight: HashMap<H, Request<H>>,
	done: HashSet<H>,
	next_seq: u64,
}

/// Priority-queued, deduplicated sync scheduler, generic over the hash
/// output type `H` (so it can drive an Ethereum `H256`-keyed trie or a
/// binary trie's raw `[u8; 32]` the same way).
pub struct SyncScheduler<H: std::hash::Hash + Eq + Clone> {
	state: Mutex<State<H>>,
	hasher: fn(&[u8]) -> H,
}

impl<H: std::hash::Hash + Eq + Clone + fmt::Debug> SyncScheduler<H> {
	/// `hasher` computes `H` from raw node bytes, used by `node_arrived` to
	/// verify what was delivered actually matches what was requested.
	pub fn new(hasher: fn(&[u8]) -> H) -> Self {
		SyncScheduler {
			state: Mutex::new(State {
				heap: BinaryHeap::new(),
				pending: HashMap::new(),
				pending_hashes: HashSet::new(),
				inflight: HashMap::new(),
				done: HashSet::new(),
				next_seq: 0,
			}),
			hasher,
		}
	}

	/// Enqueue `hash` for fetching, unless it's already pending, in-flight,
	/// done, or `already_in_db` reports it's already stored.
	pub fn add_hash(&self, hash: H, path: Vec<u8>, depth: usize, is_heal: bool, already_in_db: bool) {
		if already_in_db {
			return;
		}
		let mut state = self.state.lock();
		if state.pending_hashes.contains(&hash) || state.inflight.contains_key(&hash) || state.done.contains(&hash) {
			trace!(target: "sync", "skipping already-tracked hash");
			return;
		}
		let priority = Priority::classify(depth, is_heal);
		let seq = state.next_seq;
		state.next_seq += 1;
		state.heap.push(Reverse((priority, seq)));
		state.pending_hashes.insert(hash.clone());
		state.pending.insert(seq, Request { hash, path, depth, is_heal, priority });
	}

	/// Drain up to `max` requests, lowest priority value first, moving them
	/// atomically from pending to in-flight.
	pub fn pop_requests(&self, max: usize) -> Vec<Request<H>> {
		let mut state = self.state.lock();
		let mut out = Vec::with_capacity(max);
		while out.len() < max {
			let popped = state.heap.pop();
			let Some(Reverse((_, seq))) = popped else { break };
			let Some(req) = state.pending.remove(&seq) else { continue };
			state.pending_hashes.remove(&req.hash);
			state.inflight.insert(req.hash.clone(), req.clone());
			out.push(req);
		}
		out
	}

	/// Record a successfully-fetched node: verify its hash, insert it into
	/// `sink`, and move it from in-flight to done.
	pub fn node_arrived(&self, hash: H, bytes: Vec<u8>, sink: &mut dyn NodeSink<H>) -> Result<(), SyncError<H>> {
		let computed = (self.hasher)(&bytes);
		if computed != hash {
			warn!(target: "sync", "node hash mismatch on arrival");
			return Err(SyncError::HashMismatch { expected: hash });
		}
		let mut state = self.state.lock();
		if state.inflight.remove(&hash).is_none() {
			return Err(SyncError::NotInFlight);
		}
		sink.insert_node(hash.clone(), bytes);
		state.done.insert(hash);
		Ok(())
	}

	/// Move a failed in-flight request back to pending at `Medium` priority
	/// so it becomes immediately poppable again.
	pub fn node_failed(&self, hash: &H) -> bool {
		let mut state = self.state.lock();
		let Some(mut req) = state.inflight.remove(hash) else { return false };
		req.priority = Priority::Medium;
		let seq = state.next_seq;
		state.next_seq += 1;
		state.heap.push(Reverse((Priority::Medium, seq)));
		state.pending_hashes.insert(req.hash.clone());
		state.pending.insert(seq, req);
		true
	}

	/// `true` once both the pending and in-flight sets are empty.
	pub fn is_done(&self) -> bool {
		let state = self.state.lock();
		state.pending.is_empty() && state.inflight.is_empty()
	}

	pub fn done_count(&self) -> usize {
		self.state.lock().done.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ethereum_types::H256;
	use hashdb::{HashDB, Hasher};
	use keccak_hasher::KeccakHasher;
	use memorydb::MemoryDB;

	struct MemoryDBSink<'a>(&'a mut MemoryDB<KeccakHasher, Vec<u8>>);
	impl<'a> NodeSink<H256> for MemoryDBSink<'a> {
		fn insert_node(&mut self, hash: H256, data: Vec<u8>) {
			self.0.emplace(hash, data);
		}
	}

	fn keccak(data: &[u8]) -> H256 {
		KeccakHasher::hash(data)
	}

	#[test]
	fn pops_lowest_priority_first() {
		let sched = SyncScheduler::<H256>::new(keccak);
		sched.add_hash(H256::repeat_byte(3), vec![], 20, false, false); // Deep
		sched.add_hash(H256::repeat_byte(1), vec![], 0, false, false); // Root
		sched.add_hash(H256::repeat_byte(2), vec![], 2, false, false); // Shallow

		let popped = sched.pop_requests(3);
		assert_eq!(popped[0].priority, Priority::Root);
		assert_eq!(popped[1].priority, Priority::Shallow);
		assert_eq!(popped[2].priority, Priority::Deep);
	}

	#[test]
	fn duplicate_add_hash_is_ignored() {
		let sched = SyncScheduler::<H256>::new(keccak);
		let h = H256::repeat_byte(9);
		sched.add_hash(h, vec![], 1, false, false);
		sched.add_hash(h, vec![], 1, false, false);
		assert_eq!(sched.pop_requests(10).len(), 1);
	}

	#[test]
	fn already_in_db_is_never_queued() {
		let sched = SyncScheduler::<H256>::new(keccak);
		sched.add_hash(H256::repeat_byte(4), vec![], 1, false, true);
		assert!(sched.pop_requests(10).is_empty());
	}

	#[test]
	fn arrival_verifies_hash_and_updates_db() {
		let sched = SyncScheduler::<H256>::new(keccak);
		let data = b"hello world".to_vec();
		let hash = keccak(&data);
		sched.add_hash(hash, vec![], 0, false, false);
		sched.pop_requests(1);

		let mut db = MemoryDB::<KeccakHasher, Vec<u8>>::new();
		let mut sink = MemoryDBSink(&mut db);
		assert!(sched.node_arrived(hash, data, &mut sink).is_ok());
		assert!(sched.is_done());
		assert_eq!(sched.done_count(), 1);
		assert!(db.contains(&hash));
	}

	#[test]
	fn mismatched_hash_stays_inflight() {
		let sched = SyncScheduler::<H256>::new(keccak);
		let hash = H256::repeat_byte(7);
		sched.add_hash(hash, vec![], 0, false, false);
		sched.pop_requests(1);

		let mut db = MemoryDB::<KeccakHasher, Vec<u8>>::new();
		let mut sink = MemoryDBSink(&mut db);
		assert!(sched.node_arrived(hash, b"wrong data".to_vec(), &mut sink).is_err());
		assert!(!sched.is_done());
	}

	#[test]
	fn node_failed_requeues_at_medium() {
		let sched = SyncScheduler::<H256>::new(keccak);
		let hash = H256::repeat_byte(5);
		sched.add_hash(hash, vec![], 0, false, false); // originally Root
		sched.pop_requests(1);
		assert!(sched.node_failed(&hash));
		let popped = sched.pop_requests(1);
		assert_eq!(popped[0].priority, Priority::Medium);
	}
}
