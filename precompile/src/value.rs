// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

//! Values exchanged with the base chain bridge.
//!
//! Marshalling is the one of the rollup virtual machine: a one byte tag
//! followed by the payload. Integers are tagged `NUM` and written as a
//! 32 bytes big-endian word, a tuple of `n` elements is tagged `TUPLE + n`
//! and followed by its elements. Code points and hash-only values exist in
//! the machine but never appear in bridge messages, they are rejected.

use nom::{
    bytes::complete::take, combinator::map, multi::count, number::complete::u8 as tag,
    IResult,
};
use revm::primitives::{Address, B256, U256};

use crate::error::{Error, ValueDecodeError};

pub const NUM: u8 = 0;
pub const CODE_POINT: u8 = 1;
pub const HASH_ONLY: u8 = 2;
pub const TUPLE: u8 = 3;
pub const MAX_TUPLE_SIZE: usize = 8;

const WORD_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(U256),
    Tuple(Vec<Value>),
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Value::Int(value)
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Value::Int(U256::from_be_slice(address.as_slice()))
    }
}

impl Value {
    pub fn as_int(&self) -> Option<U256> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Tuple(_) => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            Value::Int(_) => None,
        }
    }

    /// Reads an integer holding a right-aligned address. Integers that do
    /// not fit in 160 bits are not addresses.
    pub fn as_address(&self) -> Option<Address> {
        let value = self.as_int()?;
        if value >> 160usize != U256::ZERO {
            return None;
        }
        Some(Address::from_word(B256::new(value.to_be_bytes::<32>())))
    }

    pub fn marshal(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Value::Int(value) => {
                buf.push(NUM);
                buf.extend_from_slice(&value.to_be_bytes::<32>());
            }
            Value::Tuple(items) => {
                if items.len() > MAX_TUPLE_SIZE {
                    return Err(Error::TupleTooLarge(items.len()));
                }
                buf.push(TUPLE + items.len() as u8);
                for item in items {
                    item.marshal(buf)?;
                }
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.marshal(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        match parse_value(bytes) {
            Ok(([], value)) => Ok(value),
            Ok((rest, _)) => Err(ValueDecodeError::TrailingBytes(rest.len()).into()),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into()),
            Err(nom::Err::Incomplete(_)) => Err(ValueDecodeError::Truncated.into()),
        }
    }
}

fn parse_value(input: &[u8]) -> IResult<&[u8], Value, ValueDecodeError> {
    let (input, value_tag) = tag::<_, ValueDecodeError>(input)?;
    match value_tag {
        NUM => map(take(WORD_SIZE), |word: &[u8]| {
            Value::Int(U256::from_be_slice(word))
        })(input),
        t if (TUPLE..=TUPLE + MAX_TUPLE_SIZE as u8).contains(&t) => {
            map(count(parse_value, (t - TUPLE) as usize), Value::Tuple)(input)
        }
        unsupported => Err(nom::Err::Failure(ValueDecodeError::UnsupportedTag(
            unsupported,
        ))),
    }
}
