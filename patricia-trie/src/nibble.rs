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

//! Helpers for working with keys as sequences of nibbles (half-bytes), and
//! the hex-prefix (compact) encoding used to pack them at node boundaries.
//!
//! Unlike a bit-packed `NibbleSlice`, nibbles here are represented one per
//! `u8` (value `0..=15`), which keeps the branch/extension/leaf logic free of
//! offset arithmetic at the cost of a few extra bytes of storage per node key.

pub use hex_prefix_encoding::{hex_prefix_decode, hex_prefix_encode, shared_prefix_len};

/// Expand a byte-slice key into its nibble representation, high nibble first.
pub fn key_to_nibbles(key: &[u8]) -> Vec<u8> {
	hex_prefix_encoding::bytes_to_nibbles(key)
}

/// Repack a (necessarily even-length) nibble sequence back into bytes.
pub fn nibbles_to_key(nibbles: &[u8]) -> Vec<u8> {
	hex_prefix_encoding::nibbles_to_bytes(nibbles)
}

/// Hex-prefix (compact) encode a nibble slice, flagging it as a leaf or not.
pub fn encode(nibbles: &[u8], is_leaf: bool) -> Vec<u8> {
	hex_prefix_encode(nibbles, is_leaf).collect()
}

/// Decode a hex-prefix-encoded byte string into its nibbles and leaf flag.
///
/// An empty or malformed header decodes to an empty, non-leaf nibble sequence;
/// callers that need to distinguish malformed input should check `data` first.
pub fn decode(data: &[u8]) -> (Vec<u8>, bool) {
	hex_prefix_decode(data).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_to_nibbles_is_high_nibble_first() {
		assert_eq!(key_to_nibbles(&[0xab, 0xcd]), vec![0xa, 0xb, 0xc, 0xd]);
	}

	#[test]
	fn encode_decode_round_trips() {
		let nibbles = vec![1, 2, 3, 4, 5];
		let encoded = encode(&nibbles, true);
		let (decoded, is_leaf) = decode(&encoded);
		assert_eq!(decoded, nibbles);
		assert!(is_leaf);
	}

	#[test]
	fn shared_prefix_len_matches_common_nibbles() {
		assert_eq!(shared_prefix_len(&[1, 2, 3], &[1, 2, 9]), 2);
	}
}
