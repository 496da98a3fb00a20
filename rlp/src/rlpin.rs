// Copyright 2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A read-only view onto an RLP-encoded byte slice.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::{cell::Cell, fmt, ops::Deref};

use crate::{error::DecoderError, traits::Decodable};

/// Shape of the top-level item described by an `Rlp` fragment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Prototype {
	/// Null (empty data item encoded as `0x80`).
	Null,
	/// Data item of given length.
	Data(usize),
	/// List of given arity.
	List(usize),
}

/// Description of the header bytes preceding an RLP payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PayloadInfo {
	/// Number of bytes composing the header (the length prefix).
	pub header_len: usize,
	/// Length of the payload following the header.
	pub value_len: usize,
}

impl PayloadInfo {
	fn new(header_len: usize, value_len: usize) -> Self {
		PayloadInfo { header_len, value_len }
	}

	/// Total length of the encoded item (header plus payload).
	pub fn total(&self) -> usize {
		self.header_len + self.value_len
	}

	/// Parse the length header at the start of `bytes`.
	pub fn from(bytes: &[u8]) -> Result<Self, DecoderError> {
		let first = match bytes.first() {
			Some(&b) => b,
			None => return Err(DecoderError::RlpIsTooShort),
		};
		match first {
			0..=0x7f => Ok(PayloadInfo::new(0, 1)),
			0x80..=0xb7 => Ok(PayloadInfo::new(1, first as usize - 0x80)),
			0xb8..=0xbf => {
				let len_of_len = first as usize - 0xb7;
				let payload = decode_length(bytes, 1, len_of_len)?;
				Ok(PayloadInfo::new(1 + len_of_len, payload))
			}
			0xc0..=0xf7 => Ok(PayloadInfo::new(1, first as usize - 0xc0)),
			0xf8..=0xff => {
				let len_of_len = first as usize - 0xf7;
				let payload = decode_length(bytes, 1, len_of_len)?;
				Ok(PayloadInfo::new(1 + len_of_len, payload))
			}
		}
	}
}

fn decode_length(bytes: &[u8], offset: usize, len_of_len: usize) -> Result<usize, DecoderError> {
	if bytes.len() < offset + len_of_len {
		return Err(DecoderError::RlpIsTooShort);
	}
	let length_bytes = &bytes[offset..offset + len_of_len];
	if length_bytes[0] == 0 {
		return Err(DecoderError::RlpInvalidLength);
	}
	if length_bytes.len() > core::mem::size_of::<usize>() {
		return Err(DecoderError::RlpIsTooBig);
	}
	let mut len = 0usize;
	for &b in length_bytes {
		len = len.checked_shl(8).ok_or(DecoderError::RlpInvalidLength)?;
		len |= b as usize;
	}
	Ok(len)
}

/// A view onto an RLP-encoded value. Does not copy the underlying bytes.
#[derive(Debug)]
pub struct Rlp<'a> {
	bytes: &'a [u8],
	offset_cache: Cell<Option<(usize, usize)>>,
	count_cache: Cell<Option<usize>>,
}

impl<'a> Clone for Rlp<'a> {
	fn clone(&self) -> Self {
		Rlp::new(self.bytes)
	}
}

impl<'a> PartialEq for Rlp<'a> {
	fn eq(&self, other: &Self) -> bool {
		self.bytes == other.bytes
	}
}
impl<'a> Eq for Rlp<'a> {}

impl<'a> Deref for Rlp<'a> {
	type Target = [u8];
	fn deref(&self) -> &[u8] {
		self.bytes
	}
}

impl<'a> fmt::Display for Rlp<'a> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.prototype() {
			Ok(Prototype::Null) => write!(f, "null"),
			Ok(Prototype::Data(_)) => write!(f, "\"0x{}\"", const_hex::encode(self.data().unwrap_or(&[]))),
			Ok(Prototype::List(len)) => {
				write!(f, "[")?;
				for i in 0..len {
					if i != 0 {
						write!(f, ",")?;
					}
					write!(f, "{}", self.at(i).map_err(|_| fmt::Error)?)?;
				}
				write!(f, "]")
			}
			Err(_) => write!(f, "invalid"),
		}
	}
}

impl<'a> Rlp<'a> {
	/// Create a new view onto `bytes`.
	pub fn new(bytes: &'a [u8]) -> Self {
		Rlp { bytes, offset_cache: Cell::new(None), count_cache: Cell::new(None) }
	}

	/// The raw bytes backing this fragment, including the length header.
	pub fn as_raw(&self) -> &'a [u8] {
		self.bytes
	}

	/// Shape of the top-level item: null, data, or a list with N children.
	pub fn prototype(&self) -> Result<Prototype, DecoderError> {
		let first = *self.bytes.first().ok_or(DecoderError::RlpIsTooShort)?;
		match first {
			0x80 => Ok(Prototype::Null),
			0..=0xbf => {
				let info = PayloadInfo::from(self.bytes)?;
				Ok(Prototype::Data(info.value_len))
			}
			_ => Ok(Prototype::List(self.item_count()?)),
		}
	}

	/// Byte length of the payload (excludes the header for data items, includes
	/// the encoded children for lists).
	pub fn size(&self) -> usize {
		match self.prototype() {
			Ok(Prototype::Data(len)) => len,
			_ => 0,
		}
	}

	/// `true` if this fragment is the null/empty item (`0x80`).
	pub fn is_null(&self) -> bool {
		self.bytes.first() == Some(&0x80)
	}

	/// `true` if this fragment is an empty list or the null item.
	pub fn is_empty(&self) -> bool {
		matches!(self.bytes.first(), Some(&0x80) | Some(&0xc0))
	}

	/// `true` if this fragment encodes a data item (not a list).
	pub fn is_data(&self) -> bool {
		self.bytes.first().map(|&b| b < 0xc0).unwrap_or(false)
	}

	/// `true` if this fragment encodes a list.
	pub fn is_list(&self) -> bool {
		self.bytes.first().map(|&b| b >= 0xc0).unwrap_or(false)
	}

	/// Number of items if this is a list, 0 if it is data or null.
	pub fn item_count(&self) -> Result<usize, DecoderError> {
		match self.count_cache.get() {
			Some(c) => Ok(c),
			None => {
				let c = if self.is_list() { self.iter().count() } else { 0 };
				self.count_cache.set(Some(c));
				Ok(c)
			}
		}
	}

	/// Total length in bytes of this fragment (header + payload).
	pub fn payload_info(&self) -> Result<PayloadInfo, DecoderError> {
		PayloadInfo::from(self.bytes)
	}

	/// The raw payload data if this is a data item.
	pub fn data(&self) -> Result<&'a [u8], DecoderError> {
		let first = *self.bytes.first().ok_or(DecoderError::RlpIsTooShort)?;
		if first >= 0xc0 {
			return Err(DecoderError::RlpExpectedToBeData);
		}
		let info = PayloadInfo::from(self.bytes)?;
		if self.bytes.len() < info.total() {
			return Err(DecoderError::RlpIsTooShort);
		}
		Ok(&self.bytes[info.header_len..info.total()])
	}

	/// Get the nth item of a list fragment.
	pub fn at(&self, index: usize) -> Result<Rlp<'a>, DecoderError> {
		if !self.is_list() {
			return Err(DecoderError::RlpExpectedToBeList);
		}
		let (bytes, header_len) = self.list_window()?;
		let mut offset = header_len;
		for i in 0..=index {
			if offset >= self.bytes.len() {
				return Err(DecoderError::RlpIsTooShallow);
			}
			let item_info = PayloadInfo::from(&self.bytes[offset..])?;
			if i == index {
				let _ = bytes;
				let start = offset;
				let end = offset + item_info.total();
				if end > self.bytes.len() {
					return Err(DecoderError::RlpIsTooShort);
				}
				return Ok(Rlp::new(&self.bytes[start..end]));
			}
			offset += item_info.total();
		}
		Err(DecoderError::RlpInvalidIndex)
	}

	fn list_window(&self) -> Result<(&'a [u8], usize), DecoderError> {
		let info = PayloadInfo::from(self.bytes)?;
		Ok((self.bytes, info.header_len))
	}

	/// Iterate over the children of a list fragment.
	pub fn iter(&self) -> RlpIterator<'a> {
		RlpIterator { rlp: Rlp::new(self.bytes), offset: None }
	}

	/// Decode the payload of a data item as `T`.
	pub fn as_val<T: Decodable>(&self) -> Result<T, DecoderError> {
		T::decode(self)
	}

	/// Decode the nth child of a list as `T`.
	pub fn val_at<T: Decodable>(&self, index: usize) -> Result<T, DecoderError> {
		self.at(index)?.as_val()
	}

	/// Decode every child of a list as `T`.
	pub fn as_list<T: Decodable>(&self) -> Result<Vec<T>, DecoderError> {
		self.iter().map(|r| r.as_val()).collect()
	}

	/// Decode the nth child of a list as a list of `T`.
	pub fn list_at<T: Decodable>(&self, index: usize) -> Result<Vec<T>, DecoderError> {
		self.at(index)?.as_list()
	}

	/// A decoder helper bound to this fragment's raw payload.
	pub fn decoder(&self) -> Decoder<'a> {
		Decoder { rlp: Rlp::new(self.bytes) }
	}
}

/// Helper used by `Decodable` impls to validate and extract a data payload.
pub struct Decoder<'a> {
	rlp: Rlp<'a>,
}

impl<'a> Decoder<'a> {
	/// Run `f` over the raw payload bytes, mapping decode errors through.
	pub fn decode_value<T, F>(&self, f: F) -> Result<T, DecoderError>
	where
		F: FnOnce(&[u8]) -> Result<T, DecoderError>,
	{
		f(self.rlp.data()?)
	}
}

/// Iterator over the children of a list `Rlp`.
pub struct RlpIterator<'a> {
	rlp: Rlp<'a>,
	offset: Option<usize>,
}

impl<'a> Iterator for RlpIterator<'a> {
	type Item = Rlp<'a>;

	fn next(&mut self) -> Option<Rlp<'a>> {
		let bytes = self.rlp.bytes;
		let header_len = PayloadInfo::from(bytes).ok()?.header_len;
		let offset = match self.offset {
			None => header_len,
			Some(o) => o,
		};
		if offset >= bytes.len() {
			return None;
		}
		let info = PayloadInfo::from(&bytes[offset..]).ok()?;
		let end = offset + info.total();
		if end > bytes.len() {
			return None;
		}
		self.offset = Some(end);
		Some(Rlp::new(&bytes[offset..end]))
	}
}
