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

//! The canonical Ethereum RLP `NodeCodec` (C3): a 2-element list for
//! leaf/extension nodes, a 17-element list for branches, the RLP string
//! `0x80` for the empty node.

use crate::nibble;
use crate::node::{ChildReference, EncodedNode, NodeCodec};
use hashdb::{DBValue, Hasher};
use rlp::{DecoderError, Prototype, Rlp, RlpStream};
use std::marker::PhantomData;

/// `NodeCodec` implementation over RLP, generic over the hasher so it can be
/// instantiated against any `Hasher` (its output length determines the
/// inline-vs-hash and hash-reference-detection thresholds).
#[derive(Default, Clone)]
pub struct RlpNodeCodec<H>(PhantomData<H>);

impl<H: Hasher> NodeCodec<H> for RlpNodeCodec<H> {
	type Error = DecoderError;

	fn hashed_null_node() -> H::Out {
		H::hash(&[0x80u8][..])
	}

	fn decode(data: &[u8]) -> Result<EncodedNode, Self::Error> {
		let r = Rlp::new(data);
		match r.prototype()? {
			// Leaf or extension: first item is the compact-encoded key, its
			// terminator bit tells them apart.
			Prototype::List(2) => {
				let (nibbles, is_leaf) = nibble::decode(r.at(0)?.data()?);
				if is_leaf {
					Ok(EncodedNode::Leaf(nibbles, r.at(1)?.data()?))
				} else {
					Ok(EncodedNode::Extension(nibbles, r.at(1)?.as_raw()))
				}
			}
			// Branch: 16 child slots plus a value slot.
			Prototype::List(17) => {
				let mut children: [Option<&[u8]>; 16] = [None; 16];
				for (i, slot) in children.iter_mut().enumerate() {
					let d = r.at(i)?.as_raw();
					*slot = if d != &[0x80u8][..] { Some(d) } else { None };
				}
				let value = if r.at(16)?.is_empty() { None } else { Some(r.at(16)?.data()?) };
				Ok(EncodedNode::Branch(children, value))
			}
			Prototype::Data(0) => Ok(EncodedNode::Empty),
			_ => Err(DecoderError::Custom("rlp node has unexpected shape")),
		}
	}

	fn try_decode_hash(data: &[u8]) -> Option<H::Out> {
		let r = Rlp::new(data);
		if r.is_data() && r.size() == H::LENGTH {
			let raw = r.data().ok()?;
			let mut out = H::Out::default();
			out.as_mut().copy_from_slice(raw);
			Some(out)
		} else {
			None
		}
	}

	fn is_empty_node(data: &[u8]) -> bool {
		Rlp::new(data).is_empty()
	}

	fn empty_node() -> Vec<u8> {
		let mut stream = RlpStream::new();
		stream.append_empty_data();
		stream.out().to_vec()
	}

	fn leaf_node(partial: &[u8], value: &[u8]) -> Vec<u8> {
		let mut stream = RlpStream::new_list(2);
		stream.append_iter(nibble::encode(partial, true));
		stream.append(&value);
		stream.out().to_vec()
	}

	fn ext_node(partial: &[u8], child_ref: ChildReference<H::Out>) -> Vec<u8> {
		let mut stream = RlpStream::new_list(2);
		stream.append_iter(nibble::encode(partial, false));
		match child_ref {
			ChildReference::Hash(h) => {
				stream.append(&h.as_ref());
			}
			ChildReference::Inline(data) => {
				stream.append_raw(&data, 1);
			}
		}
		stream.out().to_vec()
	}

	fn branch_node<I>(children: I, value: Option<DBValue>) -> Vec<u8>
	where
		I: IntoIterator<Item = Option<ChildReference<H::Out>>>,
	{
		let mut stream = RlpStream::new_list(17);
		for child in children {
			match child {
				Some(ChildReference::Hash(h)) => {
					stream.append(&h.as_ref());
				}
				Some(ChildReference::Inline(data)) => {
					stream.append_raw(&data, 1);
				}
				None => {
					stream.append_empty_data();
				}
			}
		}
		match value {
			Some(v) => {
				stream.append(&v.as_slice());
			}
			None => {
				stream.append_empty_data();
			}
		}
		stream.out().to_vec()
	}
}
