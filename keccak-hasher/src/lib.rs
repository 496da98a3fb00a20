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

//! Concrete `Hasher` implementation binding the trie crates to Keccak-256.

use ethereum_types::H256;
use hashdb::Hasher;
use plain_hasher::PlainHasher;

/// Concrete `Hasher` implementation for Keccak-256, the digest Ethereum's
/// Merkle Patricia Trie is defined over.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct KeccakHasher;

impl Hasher for KeccakHasher {
	type Out = H256;
	type StdHasher = PlainHasher;
	const LENGTH: usize = 32;

	fn hash(x: &[u8]) -> Self::Out {
		H256::from(keccak_hash::keccak(x).0)
	}
}

#[cfg(test)]
mod tests {
	use super::KeccakHasher;
	use hashdb::Hasher;
	use hex_literal::hex;

	#[test]
	fn hash_of_empty_string_matches_keccak_empty() {
		let empty = KeccakHasher::hash(&[]);
		assert_eq!(empty.0, hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"));
	}
}
