// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

//! In-memory chain used to exercise the precompile.

use std::{cell::RefCell, collections::HashMap, convert::Infallible};

use arb_logging::{DebugSink, Level, Verbosity};
use revm::{
    primitives::{Address, StorageKey, StorageValue, B256, U256},
    state::{AccountInfo, Bytecode},
    Database,
};

use crate::{
    error::Error,
    host::{AccountState, AccountStore, ArbSysHost, InboundMessage, TimeBounds},
    message::Message,
};

#[derive(Debug, Default, Clone)]
pub struct MockAccounts(HashMap<Address, AccountState>);

impl AccountStore for MockAccounts {
    fn account(&self, address: &Address) -> Result<AccountState, Error> {
        Ok(self.0.get(address).copied().unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct MockArbChain {
    pub accounts: MockAccounts,
    /// Balance ETH withdrawals are debited from.
    pub withdrawable: U256,
    pub time_bounds: TimeBounds,
    pub current_message: InboundMessage,
    pub clone_result: U256,
    /// Addresses passed to the clone primitive, in call order.
    pub cloned: Vec<Address>,
    pub outbox: Vec<Message>,
    pub failing_clone: bool,
    pub verbosity: Level,
    debug_log: RefCell<Vec<String>>,
}

impl MockArbChain {
    pub fn with_account(mut self, address: Address, state: AccountState) -> Self {
        self.accounts.0.insert(address, state);
        self
    }

    pub fn with_withdrawable(mut self, amount: U256) -> Self {
        self.withdrawable = amount;
        self
    }

    pub fn with_time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = time_bounds;
        self
    }

    pub fn with_current_message(mut self, message: InboundMessage) -> Self {
        self.current_message = message;
        self
    }

    pub fn with_clone_result(mut self, result: U256) -> Self {
        self.clone_result = result;
        self
    }

    pub fn with_failing_clone(mut self) -> Self {
        self.failing_clone = true;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Level) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn logs(&self) -> Vec<String> {
        self.debug_log.borrow().clone()
    }
}

impl Verbosity for MockArbChain {
    fn verbosity(&self) -> Level {
        self.verbosity
    }
}

impl DebugSink for MockArbChain {
    fn write_debug(&self, msg: &str) {
        self.debug_log.borrow_mut().push(msg.to_string());
    }
}

impl ArbSysHost for MockArbChain {
    type Accounts = MockAccounts;

    fn accounts(&self) -> &MockAccounts {
        &self.accounts
    }

    fn withdraw_eth(&mut self, amount: U256) -> Result<bool, Error> {
        match self.withdrawable.checked_sub(amount) {
            Some(remaining) => {
                self.withdrawable = remaining;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn time_bounds(&self) -> TimeBounds {
        self.time_bounds
    }

    fn current_message(&self) -> InboundMessage {
        self.current_message
    }

    fn clone_contract(&mut self, address: Address) -> Result<U256, Error> {
        if self.failing_clone {
            return Err(Error::Host("contract cloning failed".to_string()));
        }
        self.cloned.push(address);
        Ok(self.clone_result)
    }

    fn send_message(&mut self, message: Message) {
        self.outbox.push(message);
    }
}

/// Empty world state, enough for revm to run calls to precompiles.
impl Database for MockArbChain {
    type Error = Infallible;

    fn basic(&mut self, _address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(None)
    }

    fn code_by_hash(&mut self, _code_hash: B256) -> Result<Bytecode, Self::Error> {
        Ok(Bytecode::default())
    }

    fn storage(
        &mut self,
        _address: Address,
        _index: StorageKey,
    ) -> Result<StorageValue, Self::Error> {
        Ok(StorageValue::default())
    }

    fn block_hash(&mut self, _number: u64) -> Result<B256, Self::Error> {
        Ok(B256::ZERO)
    }
}
