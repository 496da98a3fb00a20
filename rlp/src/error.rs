// Copyright 2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

/// Error concerning the RLP decoder.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecoderError {
	/// Data has additional bytes at the end of the valid RLP fragment.
	RlpIsTooBig,
	/// Data has too few bytes for valid RLP.
	RlpIsTooShort,
	/// Expect an encoded list, RLP was something else.
	RlpExpectedToBeList,
	/// Expect encoded data, RLP was something else.
	RlpExpectedToBeData,
	/// Expected a single data item, a list of items instead.
	RlpDataLenWithZeroPrefix,
	/// Expected a single data item, a list of items instead (list length prefix).
	RlpListLenWithZeroPrefix,
	/// Indirection referred to more bytes than available followed.
	RlpInvalidIndirection,
	/// Declared length is inconsistent with data specified after.
	RlpInconsistentLengthAndData,
	/// Declared length is invalid and results in overflow
	RlpInvalidLength,
	/// Internal incomplete copy of data used for recursive structures (should not be reachable).
	RlpIncorrectListLen,
	/// Internal error: out-of-bounds access to an item index.
	RlpInvalidIndex,
	/// The index queried is out of range.
	RlpIsTooShallow,
	/// A custom error thrown by a `Decodable` implementation.
	Custom(&'static str),
}

impl fmt::Display for DecoderError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let msg = match *self {
			DecoderError::RlpIsTooBig => "rlp is too big",
			DecoderError::RlpIsTooShort => "rlp is too short",
			DecoderError::RlpExpectedToBeList => "rlp expected to be list",
			DecoderError::RlpExpectedToBeData => "rlp expected to be data",
			DecoderError::RlpDataLenWithZeroPrefix => "rlp data length with zero prefix",
			DecoderError::RlpListLenWithZeroPrefix => "rlp list length with zero prefix",
			DecoderError::RlpInvalidIndirection => "rlp invalid indirection",
			DecoderError::RlpInconsistentLengthAndData => "rlp inconsistent length and data",
			DecoderError::RlpInvalidLength => "rlp invalid length",
			DecoderError::RlpIncorrectListLen => "rlp incorrect list length",
			DecoderError::RlpInvalidIndex => "rlp invalid index requested",
			DecoderError::RlpIsTooShallow => "rlp is too shallow",
			DecoderError::Custom(s) => s,
		};
		write!(f, "{}", msg)
	}
}

#[cfg(feature = "std")]
impl std::error::Error for DecoderError {}

#[cfg(not(feature = "std"))]
impl From<DecoderError> for String {
	fn from(err: DecoderError) -> String {
		alloc::format!("{}", err)
	}
}
