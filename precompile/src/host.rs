// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

use arb_logging::{DebugSink, Verbosity};
use revm::primitives::{Address, U256};

use crate::{error::Error, message::Message};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccountState {
    /// Sequence number of the next outgoing message of the account.
    pub next_seq_num: U256,
}

/// Read-only view on the account store.
pub trait AccountStore {
    /// Accounts without any activity have the default state.
    fn account(&self, address: &Address) -> Result<AccountState, Error>;
}

/// Interval in which the actual production time of the block lies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub lower: U256,
    pub upper: U256,
}

/// The inbound message currently being executed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InboundMessage {
    /// Base chain block in which the message was delivered.
    pub block_number: U256,
    pub sender: Address,
}

/// Primitives of the execution environment used by ArbSys.
///
/// The host owns the chain state; every mutation goes through one of its
/// primitives.
pub trait ArbSysHost: Verbosity + DebugSink {
    type Accounts: AccountStore;

    fn accounts(&self) -> &Self::Accounts;

    /// Debits `amount` for a withdrawal to the base chain. Returns `false`
    /// when the balance is insufficient, in which case nothing changes.
    fn withdraw_eth(&mut self, amount: U256) -> Result<bool, Error>;

    fn time_bounds(&self) -> TimeBounds;

    fn current_message(&self) -> InboundMessage;

    fn clone_contract(&mut self, address: Address) -> Result<U256, Error>;

    /// Hands a message to the bridge. The bridge accepts every message and
    /// delivers them in order per sender, so a withdrawal never fails
    /// after its debit.
    fn send_message(&mut self, message: Message);
}
