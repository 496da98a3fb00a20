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

//! `std::hash::Hasher` that reuses the leading bytes of an already
//! cryptographically-random digest instead of re-hashing it, for use as the
//! build hasher of a `HashMap<TrieHash, _>`.

use std::hash::Hasher;

/// A no-op `std::hash::Hasher` that assumes the bytes it is fed are already
/// uniformly distributed (e.g. the output of a cryptographic digest) and just
/// folds the leading 8 bytes into a `u64`.
#[derive(Default)]
pub struct PlainHasher {
	prefix: u64,
}

impl Hasher for PlainHasher {
	#[inline]
	fn finish(&self) -> u64 {
		self.prefix
	}

	#[inline]
	fn write(&mut self, bytes: &[u8]) {
		let len = bytes.len().min(8);
		let mut buf = [0u8; 8];
		buf[..len].copy_from_slice(&bytes[..len]);
		self.prefix = u64::from_ne_bytes(buf);
	}
}
