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

//! Tracks which state roots are still worth keeping around (C13): a sliding
//! window of the most recent `max_recent` blocks, plus an unbounded "alive"
//! set for roots pinned by a checkpoint or finality vote.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use log::debug;
use parking_lot::Mutex;

const DEFAULT_MAX_RECENT: usize = 128;

struct Inner<H> {
	window: VecDeque<(u64, H)>,
	alive: HashSet<H>,
	max_recent: usize,
	stopped: bool,
}

/// Sliding-window root retention tracker, safe to share across threads
/// behind its single internal mutex.
pub struct StatePruner<H> {
	inner: Mutex<Inner<H>>,
}

impl<H: Clone + Eq + Hash> StatePruner<H> {
	pub fn new(max_recent: usize) -> Self {
		StatePruner {
			inner: Mutex::new(Inner { window: VecDeque::new(), alive: HashSet::new(), max_recent, stopped: false }),
		}
	}

	/// Mark `root` as permanently retained (a checkpoint or finalized block),
	/// independent of the sliding window.
	pub fn mark_alive(&self, root: H) {
		self.inner.lock().alive.insert(root);
	}

	pub fn unmark_alive(&self, root: &H) {
		self.inner.lock().alive.remove(root);
	}

	/// Record a new block's root. Evicts the oldest window entry once over
	/// capacity, unless it's also in the alive set (in which case it drops
	/// out of the window but stays reachable via `retained_roots`). Returns
	/// the window entries actually evicted (dropped from the window AND not
	/// alive) this call.
	pub fn add_root(&self, block_number: u64, root: H) -> Vec<(u64, H)> {
		let mut inner = self.inner.lock();
		if inner.stopped {
			return Vec::new();
		}
		inner.window.push_back((block_number, root));
		let mut evicted = Vec::new();
		while inner.window.len() > inner.max_recent {
			if let Some(entry) = inner.window.pop_front() {
				if !inner.alive.contains(&entry.1) {
					evicted.push(entry);
				}
			}
		}
		debug!(target: "pruner", "window now holds {} roots, evicted {}", inner.window.len(), evicted.len());
		evicted
	}

	/// Drop all-but-the-most-recent `keep_recent` window entries, preserving
	/// any that are also alive.
	pub fn prune(&self, keep_recent: usize) -> Vec<(u64, H)> {
		let mut inner = self.inner.lock();
		if inner.stopped {
			return Vec::new();
		}
		let mut dropped = Vec::new();
		while inner.window.len() > keep_recent {
			let entry = inner.window.pop_front().expect("checked len > keep_recent >= 0");
			if inner.alive.contains(&entry.1) {
				// Still retained via the alive set; not counted as dropped.
				continue;
			}
			dropped.push(entry);
		}
		dropped
	}

	/// The union of the sliding window and the alive set, deduplicated.
	pub fn retained_roots(&self) -> Vec<H> {
		let inner = self.inner.lock();
		let mut seen = HashSet::new();
		let mut out = Vec::new();
		for (_, root) in &inner.window {
			if seen.insert(root.clone()) {
				out.push(root.clone());
			}
		}
		for root in &inner.alive {
			if seen.insert(root.clone()) {
				out.push(root.clone());
			}
		}
		out
	}

	/// Freeze all future mutations: `add_root`/`prune` become no-ops.
	pub fn stop(&self) {
		self.inner.lock().stopped = true;
	}

	pub fn window_len(&self) -> usize {
		self.inner.lock().window.len()
	}
}

impl<H: Clone + Eq + Hash> Default for StatePruner<H> {
	fn default() -> Self {
		StatePruner::new(DEFAULT_MAX_RECENT)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn evicts_oldest_beyond_capacity() {
		let pruner = StatePruner::<u32>::new(2);
		assert!(pruner.add_root(0, 100).is_empty());
		assert!(pruner.add_root(1, 101).is_empty());
		let evicted = pruner.add_root(2, 102);
		assert_eq!(evicted, vec![(0, 100)]);
		assert_eq!(pruner.window_len(), 2);
	}

	#[test]
	fn alive_entries_survive_eviction() {
		let pruner = StatePruner::<u32>::new(1);
		pruner.mark_alive(100);
		pruner.add_root(0, 100);
		let evicted = pruner.add_root(1, 101);
		assert!(evicted.is_empty());
		assert!(pruner.retained_roots().contains(&100));
		assert!(pruner.retained_roots().contains(&101));
	}

	#[test]
	fn stop_freezes_mutations() {
		let pruner = StatePruner::<u32>::new(4);
		pruner.add_root(0, 1);
		pruner.stop();
		pruner.add_root(1, 2);
		assert_eq!(pruner.window_len(), 1);
	}

	#[test]
	fn prune_keeps_only_recent_and_alive() {
		let pruner = StatePruner::<u32>::new(10);
		pruner.mark_alive(10);
		for i in 0..5u64 {
			pruner.add_root(i, i as u32 * 10);
		}
		pruner.prune(1);
		let retained = pruner.retained_roots();
		assert!(retained.contains(&10));
		assert!(retained.contains(&40));
		assert_eq!(pruner.window_len(), 1);
	}
}
