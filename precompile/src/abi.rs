// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

//! Fixed-offset decoding of ArbSys call data.
//!
//! Arguments are never decoded generically: every syscall reads 32 bytes
//! words at known offsets after the selector. Addresses are the low 20
//! bytes of their word, the upper bytes are ignored.

use alloy_sol_types::sol;
use revm::primitives::{Address, Bytes, B256, U256};

use crate::error::Error;

sol! {
    interface ArbSys {
        function withdrawEth(address dest, uint256 amount) external;
        function withdrawERC20(address dest, uint256 amount) external;
        function withdrawERC721(address dest, uint256 amount) external;
        function timeUpperBound() external view returns (uint256);
        function currentMessageTime() external view returns (uint256);
        function getTransactionCount(address account) external view returns (uint256);
        function cloneContract(address account) external returns (uint256);
    }
}

pub const SELECTOR_SIZE: usize = 4;
pub const WORD_SIZE: usize = 32;

pub const FIRST_ARG_OFFSET: usize = SELECTOR_SIZE;
pub const SECOND_ARG_OFFSET: usize = SELECTOR_SIZE + WORD_SIZE;

/// Input of one precompile invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalExecState {
    pub caller: Address,
    /// Raw call data, selector included.
    pub data: Bytes,
}

impl LocalExecState {
    pub fn new(caller: Address, data: impl Into<Bytes>) -> Self {
        Self {
            caller,
            data: data.into(),
        }
    }

    fn read(&self, offset: usize, len: usize) -> Result<&[u8], Error> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(Error::CallDataOutOfBounds {
                offset,
                len,
                size: self.data.len(),
            })
    }

    /// The four leading bytes of the call data, big-endian.
    pub fn selector(&self) -> Result<u32, Error> {
        let bytes = self.read(0, SELECTOR_SIZE)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn word(&self, offset: usize) -> Result<U256, Error> {
        self.read(offset, WORD_SIZE).map(U256::from_be_slice)
    }

    pub fn address(&self, offset: usize) -> Result<Address, Error> {
        let word = self.read(offset, WORD_SIZE)?;
        Ok(Address::from_word(B256::from_slice(word)))
    }
}

/// Arguments shared by the three withdrawal syscalls.
///
/// `caller` is not part of the call data, it is the address that called the
/// precompile. The ETH withdrawal uses it as the message sender while token
/// withdrawals use it as the token contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawCall {
    pub amount: U256,
    pub dest: Address,
    pub caller: Address,
}

pub fn parse_withdraw_call(exec_state: &LocalExecState) -> Result<WithdrawCall, Error> {
    let dest = exec_state.address(FIRST_ARG_OFFSET)?;
    let amount = exec_state.word(SECOND_ARG_OFFSET)?;
    Ok(WithdrawCall {
        amount,
        dest,
        caller: exec_state.caller,
    })
}
