// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

use revm::primitives::Address;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        ARB_SYS_ADDRESS, CLONE_CONTRACT_BASE_COST, DISPATCH_BASE_COST, QUERY_BASE_COST,
        WITHDRAW_BASE_COST,
    },
    dispatch::Syscall,
};

/// Flat gas costs of the syscalls. Every call pays `dispatch`, known
/// syscalls pay their own cost on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasSchedule {
    pub dispatch: u64,
    pub withdraw: u64,
    pub query: u64,
    pub clone_contract: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            dispatch: DISPATCH_BASE_COST,
            withdraw: WITHDRAW_BASE_COST,
            query: QUERY_BASE_COST,
            clone_contract: CLONE_CONTRACT_BASE_COST,
        }
    }
}

impl GasSchedule {
    pub fn cost(&self, syscall: Option<Syscall>) -> u64 {
        let own = match syscall {
            None => 0,
            Some(Syscall::WithdrawEth | Syscall::WithdrawErc20 | Syscall::WithdrawErc721) => {
                self.withdraw
            }
            Some(
                Syscall::TimeUpperBound
                | Syscall::CurrentMessageTime
                | Syscall::TransactionCount,
            ) => self.query,
            Some(Syscall::CloneContract) => self.clone_contract,
        };
        self.dispatch.saturating_add(own)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArbSysConfig {
    /// Address the precompile is installed at.
    pub address: Address,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gas: GasSchedule,
}

impl Default for ArbSysConfig {
    fn default() -> Self {
        Self {
            address: ARB_SYS_ADDRESS,
            gas: GasSchedule::default(),
        }
    }
}

impl ArbSysConfig {
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_gas(mut self, gas: GasSchedule) -> Self {
        self.gas = gas;
        self
    }
}
