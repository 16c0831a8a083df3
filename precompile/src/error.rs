// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Call data read out of bounds: {len} bytes at offset {offset}, buffer holds {size}")]
    CallDataOutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("Host error: {0}")]
    Host(String),
    #[error("Value encoding error: tuple of {0} elements exceeds the maximum size")]
    TupleTooLarge(usize),
    #[error(transparent)]
    ValueDecode(#[from] ValueDecodeError),
    #[error("Invalid outgoing message: {0}")]
    InvalidMessage(String),
}

/// Failures of the value unmarshaller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueDecodeError {
    #[error("Value decoding error: truncated input")]
    Truncated,
    #[error("Value decoding error: unsupported value tag {0:#04x}")]
    UnsupportedTag(u8),
    #[error("Value decoding error: {0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl<I> ParseError<I> for ValueDecodeError {
    fn from_error_kind(_input: I, _kind: ErrorKind) -> Self {
        ValueDecodeError::Truncated
    }

    fn append(_input: I, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}
