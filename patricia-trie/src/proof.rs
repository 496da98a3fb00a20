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

//! Inclusion / absence proofs (C8): `prove`/`prove_absence` walk a committed
//! trie collecting the wire encoding of every hash-referenced node on the
//! path; `verify_proof` checks such a proof against a bare root hash without
//! ever consulting a database.
//!
//! `prove_account`/`verify_account` and `prove_storage`/`verify_storage` wrap
//! the above in the EIP-1186 key/value shapes the Ethereum state and storage
//! tries use; `prove_multi`/`verify_multi_proof` batch either over a set of
//! keys checked against one common root.

use std::fmt;

use ethereum_types::{H256, U256};
use hashdb::{DBValue, HashDB, Hasher};
use log::trace;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::nibble;
use crate::node::{EncodedNode, NodeCodec};
use crate::{Result, TrieError};

/// Why a proof failed `verify_proof`. Distinct from `TrieError` because
/// verification never touches a database or a hash output type it doesn't
/// already have in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
	/// A proof node's hash (or inline bytes) didn't match what the parent
	/// (or the claimed root) expected.
	HashMismatch,
	/// A proof node failed to decode, or had a shape `VerifyProof` doesn't
	/// recognize (wrong element count).
	BadStructure,
	/// The proof ran out before resolving to a value or a clean absence.
	Incomplete,
}

impl fmt::Display for VerifyError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			VerifyError::HashMismatch => write!(f, "proof node hash mismatch"),
			VerifyError::BadStructure => write!(f, "malformed proof node"),
			VerifyError::Incomplete => write!(f, "proof exhausted without resolving key"),
		}
	}
}

impl std::error::Error for VerifyError {}

enum Reference<H> {
	Hash(H),
	Inline(Vec<u8>),
}

fn child_reference<H: Hasher, C: NodeCodec<H>>(data: &[u8]) -> Reference<H::Out> {
	match C::try_decode_hash(data) {
		Some(hash) => Reference::Hash(hash),
		None => Reference::Inline(data.to_vec()),
	}
}

enum Walk {
	Value(DBValue),
	Absence,
}

/// Walk from `root` towards `partial`, collecting every node fetched from
/// `db` into `proof` (in root-first order). Stops as soon as the key resolves
/// or diverges; never continues past a `Leaf`/empty-slot mismatch.
fn walk<H, C>(
	db: &dyn HashDB<H, DBValue>,
	root: H::Out,
	mut partial: &[u8],
	proof: &mut Vec<Vec<u8>>,
) -> Result<Walk, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let mut reference = Reference::Hash(root);
	loop {
		let data = match reference {
			Reference::Hash(hash) => {
				let data = db.get(&hash).ok_or_else(|| Box::new(TrieError::IncompleteDatabase(hash)))?;
				proof.push(data.clone());
				data
			}
			Reference::Inline(data) => data,
		};

		match C::decode(&data).map_err(|e| Box::new(TrieError::DecoderError(root, e)))? {
			EncodedNode::Empty => return Ok(Walk::Absence),
			EncodedNode::Leaf(key, value) => {
				return if key == partial { Ok(Walk::Value(value.to_vec())) } else { Ok(Walk::Absence) };
			}
			EncodedNode::Extension(key, child) => {
				if partial.starts_with(&key[..]) {
					partial = &partial[key.len()..];
					reference = child_reference::<H, C>(child);
				} else {
					return Ok(Walk::Absence);
				}
			}
			EncodedNode::Branch(children, value) => {
				if partial.is_empty() {
					return Ok(match value {
						Some(v) => Walk::Value(v.to_vec()),
						None => Walk::Absence,
					});
				}
				match children[partial[0] as usize] {
					Some(child) => {
						partial = &partial[1..];
						reference = child_reference::<H, C>(child);
					}
					None => return Ok(Walk::Absence),
				}
			}
		}
	}
}

/// Build an inclusion proof for `key`. Fails with `TrieError::NotFound` if
/// the key isn't present under `root`.
pub fn prove<H, C>(db: &dyn HashDB<H, DBValue>, root: H::Out, key: &[u8]) -> Result<Vec<Vec<u8>>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let mut proof = Vec::new();
	let partial = nibble::key_to_nibbles(key);
	match walk::<H, C>(db, root, &partial, &mut proof)? {
		Walk::Value(_) => {
			trace!(target: "trie", "prove: {} nodes for an existing key", proof.len());
			Ok(proof)
		}
		Walk::Absence => Err(Box::new(TrieError::NotFound(root))),
	}
}

/// Build an absence proof for `key`. Never fails: an empty trie yields an
/// empty proof; a present key yields the path up to (and including) the node
/// that would have diverged, i.e. callers should check `key` really is absent
/// via `get` first if that distinction matters to them.
pub fn prove_absence<H, C>(db: &dyn HashDB<H, DBValue>, root: H::Out, key: &[u8]) -> Result<Vec<Vec<u8>>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	if root == C::hashed_null_node() {
		return Ok(Vec::new());
	}
	let mut proof = Vec::new();
	let partial = nibble::key_to_nibbles(key);
	let _ = walk::<H, C>(db, root, &partial, &mut proof)?;
	Ok(proof)
}

/// Next reference a verifier expects the following proof node to satisfy.
enum Expect<H> {
	Hash(H),
	Inline(Vec<u8>),
}

/// Check `proof` against `root` for `key`, without consulting any database.
/// Returns `Ok(Some(value))` for inclusion, `Ok(None)` for a verified
/// absence, `Err` otherwise.
pub fn verify_proof<H, C>(
	root: &H::Out,
	key: &[u8],
	proof: &[Vec<u8>],
) -> std::result::Result<Option<DBValue>, VerifyError>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	if proof.is_empty() {
		return if *root == C::hashed_null_node() { Ok(None) } else { Err(VerifyError::Incomplete) };
	}

	let mut partial: &[u8] = &nibble::key_to_nibbles(key);
	let mut expect = Expect::Hash(*root);
	// Hash-referenced nodes consume one element of `proof`; inline (<32-byte)
	// children are embedded in their parent's bytes and are decoded in place
	// without advancing `cursor` — they never appear as their own element.
	let mut cursor = 0usize;

	loop {
		let node_bytes: Vec<u8> = match &expect {
			Expect::Hash(hash) => {
				let node = proof.get(cursor).ok_or(VerifyError::Incomplete)?;
				if H::hash(node) != *hash {
					return Err(VerifyError::HashMismatch);
				}
				cursor += 1;
				node.clone()
			}
			Expect::Inline(bytes) => bytes.clone(),
		};
		let is_last = cursor == proof.len();

		let decoded = C::decode(&node_bytes).map_err(|_| VerifyError::BadStructure)?;
		match decoded {
			EncodedNode::Empty => return if is_last { Ok(None) } else { Err(VerifyError::BadStructure) },
			EncodedNode::Leaf(node_key, value) => {
				if node_key == partial {
					return Ok(Some(value.to_vec()));
				}
				return if is_last { Ok(None) } else { Err(VerifyError::BadStructure) };
			}
			EncodedNode::Extension(node_key, child) => {
				if !partial.starts_with(&node_key[..]) {
					return if is_last { Ok(None) } else { Err(VerifyError::BadStructure) };
				}
				partial = &partial[node_key.len()..];
				expect = match C::try_decode_hash(child) {
					Some(hash) => Expect::Hash(hash),
					None => Expect::Inline(child.to_vec()),
				};
			}
			EncodedNode::Branch(children, value) => {
				if partial.is_empty() {
					return match value {
						Some(v) => Ok(Some(v.to_vec())),
						None => {
							if is_last {
								Ok(None)
							} else {
								Err(VerifyError::BadStructure)
							}
						}
					};
				}
				match children[partial[0] as usize] {
					Some(child) => {
						partial = &partial[1..];
						expect = match C::try_decode_hash(child) {
							Some(hash) => Expect::Hash(hash),
							None => Expect::Inline(child.to_vec()),
						};
					}
					None => return if is_last { Ok(None) } else { Err(VerifyError::BadStructure) },
				}
			}
		}
	}
}

/// Ethereum world-state account (§3.1): the 4-tuple a state trie's leaf value
/// RLP-decodes to. The account for an address with no state is the zero
/// account: nonce and balance zero, `storage_root` the empty-trie root, and
/// `code_hash` the Keccak-256 of the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
	pub nonce: U256,
	pub balance: U256,
	pub storage_root: H256,
	pub code_hash: H256,
}

impl Account {
	/// The account `verify_account` returns for a verified absence.
	pub fn empty<H, C>() -> Self
	where
		H: Hasher<Out = H256>,
		C: NodeCodec<H>,
	{
		Account { nonce: U256::zero(), balance: U256::zero(), storage_root: C::hashed_null_node(), code_hash: H::hash(&[]) }
	}
}

impl Encodable for Account {
	fn rlp_append(&self, s: &mut RlpStream) {
		s.begin_list(4);
		s.append(&self.nonce);
		s.append(&self.balance);
		s.append(&self.storage_root);
		s.append(&self.code_hash);
	}
}

impl Decodable for Account {
	fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
		if rlp.item_count()? != 4 {
			return Err(DecoderError::RlpIncorrectListLen);
		}
		Ok(Account {
			nonce: rlp.val_at(0)?,
			balance: rlp.val_at(1)?,
			storage_root: rlp.val_at(2)?,
			code_hash: rlp.val_at(3)?,
		})
	}
}

/// Why `verify_account` failed: either the proof itself didn't check out, or
/// it checked out but its value didn't RLP-decode into an `Account`.
#[derive(Debug)]
pub enum AccountVerifyError<H> {
	Proof(VerifyError),
	Account(Box<TrieError<H, DecoderError>>),
}

impl<H: fmt::Debug> fmt::Display for AccountVerifyError<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AccountVerifyError::Proof(e) => write!(f, "{}", e),
			AccountVerifyError::Account(e) => write!(f, "{}", e),
		}
	}
}

impl<H: fmt::Debug> std::error::Error for AccountVerifyError<H> {}

impl<H> From<VerifyError> for AccountVerifyError<H> {
	fn from(e: VerifyError) -> Self {
		AccountVerifyError::Proof(e)
	}
}

/// Build an EIP-1186 account proof: the path to `Keccak256(address)` in the
/// state trie, whether or not the account exists. `prove_absence` already
/// returns the full path regardless of what it resolves to, so it doubles as
/// the inclusion-or-exclusion proof EIP-1186 wants here.
pub fn prove_account<H, C>(
	db: &dyn HashDB<H, DBValue>,
	root: H::Out,
	address: &[u8],
) -> Result<Vec<Vec<u8>>, H::Out, C::Error>
where
	H: Hasher<Out = H256>,
	C: NodeCodec<H>,
{
	let key = H::hash(address);
	prove_absence::<H, C>(db, root, key.as_bytes())
}

/// Verify an EIP-1186 account proof against a state trie's `root`. Returns
/// the decoded account on inclusion, or the empty account (§3.1) on a
/// verified absence.
pub fn verify_account<H, C>(
	root: &H::Out,
	address: &[u8],
	proof: &[Vec<u8>],
) -> std::result::Result<Account, AccountVerifyError<H::Out>>
where
	H: Hasher<Out = H256>,
	C: NodeCodec<H>,
{
	let key = H::hash(address);
	match verify_proof::<H, C>(root, key.as_bytes(), proof)? {
		Some(rlp) => Rlp::new(&rlp)
			.as_val()
			.map_err(|e| AccountVerifyError::Account(Box::new(TrieError::InvalidAccountRLP(key, e)))),
		None => Ok(Account::empty::<H, C>()),
	}
}

/// Build a storage proof: the path to `Keccak256(slot)` under an account's
/// `storage_root`.
pub fn prove_storage<H, C>(
	db: &dyn HashDB<H, DBValue>,
	storage_root: H::Out,
	slot: &[u8],
) -> Result<Vec<Vec<u8>>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let key = H::hash(slot);
	prove_absence::<H, C>(db, storage_root, key.as_ref())
}

/// Verify a storage proof against an account's `storage_root`. The storage
/// scalar RLP-decodes with its leading zero bytes already stripped (`U256`'s
/// own `Decodable` impl does this); a verified absence reads as zero, per the
/// EVM's "unset storage slot is zero" convention.
pub fn verify_storage<H, C>(
	storage_root: &H::Out,
	slot: &[u8],
	proof: &[Vec<u8>],
) -> std::result::Result<U256, VerifyError>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	let key = H::hash(slot);
	match verify_proof::<H, C>(storage_root, key.as_ref(), proof)? {
		Some(rlp) => rlp::decode(&rlp).map_err(|_| VerifyError::BadStructure),
		None => Ok(U256::zero()),
	}
}

/// One entry of a multi-proof: whether `key` is present under the batch's
/// common root, its value if so, and the proof bytes for just this key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiProofEntry {
	pub key: Vec<u8>,
	pub exists: bool,
	pub value: Option<DBValue>,
	pub proof: Vec<Vec<u8>>,
}

/// Build a multi-proof: one independent inclusion-or-absence proof per key
/// in `keys`, all against the same `root`.
pub fn prove_multi<H, C>(
	db: &dyn HashDB<H, DBValue>,
	root: H::Out,
	keys: &[Vec<u8>],
) -> Result<Vec<MultiProofEntry>, H::Out, C::Error>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	keys.iter()
		.map(|key| {
			let mut proof = Vec::new();
			let partial = nibble::key_to_nibbles(key);
			let outcome = if root == C::hashed_null_node() {
				Walk::Absence
			} else {
				walk::<H, C>(db, root, &partial, &mut proof)?
			};
			let (exists, value) = match outcome {
				Walk::Value(v) => (true, Some(v)),
				Walk::Absence => (false, None),
			};
			Ok(MultiProofEntry { key: key.clone(), exists, value, proof })
		})
		.collect()
}

/// Verify every entry of a multi-proof against the same `root`, independently
/// of the others. Fails on the first entry whose proof doesn't check out, or
/// whose resolved value disagrees with what the entry claims.
pub fn verify_multi_proof<H, C>(root: &H::Out, entries: &[MultiProofEntry]) -> std::result::Result<(), VerifyError>
where
	H: Hasher,
	C: NodeCodec<H>,
{
	for entry in entries {
		let resolved = verify_proof::<H, C>(root, &entry.key, &entry.proof)?;
		let expected = if entry.exists { entry.value.as_ref() } else { None };
		if resolved.as_ref() != expected {
			return Err(VerifyError::HashMismatch);
		}
	}
	Ok(())
}
