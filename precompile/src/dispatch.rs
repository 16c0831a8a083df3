// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

use alloy_sol_types::SolCall;
use arb_logging::{log, tracing::instrument, Level};
use revm::primitives::U256;

use crate::{
    abi::{ArbSys, LocalExecState},
    constants::{
        CLONE_CONTRACT_SELECTOR, CURRENT_MESSAGE_TIME_SELECTOR, TIME_UPPER_BOUND_SELECTOR,
        TRANSACTION_COUNT_SELECTOR, WITHDRAW_ERC20_SELECTOR, WITHDRAW_ERC721_SELECTOR,
        WITHDRAW_ETH_SELECTOR,
    },
    error::Error,
    frame::CallFrames,
    host::ArbSysHost,
    message::TokenKind,
    output::{return_one_word, CallFinish},
    syscalls,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syscall {
    WithdrawEth,
    WithdrawErc20,
    WithdrawErc721,
    TimeUpperBound,
    CurrentMessageTime,
    TransactionCount,
    CloneContract,
}

pub const SYSCALLS: [(u32, Syscall); 7] = [
    (WITHDRAW_ETH_SELECTOR, Syscall::WithdrawEth),
    (WITHDRAW_ERC20_SELECTOR, Syscall::WithdrawErc20),
    (WITHDRAW_ERC721_SELECTOR, Syscall::WithdrawErc721),
    (TIME_UPPER_BOUND_SELECTOR, Syscall::TimeUpperBound),
    (CURRENT_MESSAGE_TIME_SELECTOR, Syscall::CurrentMessageTime),
    (TRANSACTION_COUNT_SELECTOR, Syscall::TransactionCount),
    (CLONE_CONTRACT_SELECTOR, Syscall::CloneContract),
];

impl Syscall {
    pub fn from_selector(selector: u32) -> Option<Self> {
        SYSCALLS
            .iter()
            .find(|(known, _)| *known == selector)
            .map(|(_, syscall)| *syscall)
    }

    pub fn selector(self) -> u32 {
        match self {
            Syscall::WithdrawEth => WITHDRAW_ETH_SELECTOR,
            Syscall::WithdrawErc20 => WITHDRAW_ERC20_SELECTOR,
            Syscall::WithdrawErc721 => WITHDRAW_ERC721_SELECTOR,
            Syscall::TimeUpperBound => TIME_UPPER_BOUND_SELECTOR,
            Syscall::CurrentMessageTime => CURRENT_MESSAGE_TIME_SELECTOR,
            Syscall::TransactionCount => TRANSACTION_COUNT_SELECTOR,
            Syscall::CloneContract => CLONE_CONTRACT_SELECTOR,
        }
    }

    /// Syscalls that change the chain state, refused in static calls.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Syscall::WithdrawEth
                | Syscall::WithdrawErc20
                | Syscall::WithdrawErc721
                | Syscall::CloneContract
        )
    }

    pub fn signature(self) -> &'static str {
        match self {
            Syscall::WithdrawEth => ArbSys::withdrawEthCall::SIGNATURE,
            Syscall::WithdrawErc20 => ArbSys::withdrawERC20Call::SIGNATURE,
            Syscall::WithdrawErc721 => ArbSys::withdrawERC721Call::SIGNATURE,
            Syscall::TimeUpperBound => ArbSys::timeUpperBoundCall::SIGNATURE,
            Syscall::CurrentMessageTime => ArbSys::currentMessageTimeCall::SIGNATURE,
            Syscall::TransactionCount => ArbSys::getTransactionCountCall::SIGNATURE,
            Syscall::CloneContract => ArbSys::cloneContractCall::SIGNATURE,
        }
    }
}

/// Runs one ArbSys call in a new frame on top of `frames`.
///
/// A selector that is not in [SYSCALLS] is not an error: the call returns
/// the zero word and has no effect.
#[instrument(skip_all)]
pub fn perform_precompile_call<Host: ArbSysHost>(
    host: &mut Host,
    frames: &mut CallFrames,
    exec_state: &LocalExecState,
) -> Result<CallFinish, Error> {
    let mut frame = frames.enter();
    let selector = exec_state.selector()?;

    let Some(syscall) = Syscall::from_selector(selector) else {
        log!(
            host,
            Level::Debug,
            "ArbSys: unknown selector {:#010x} from {}",
            selector,
            exec_state.caller
        );
        return Ok(return_one_word(&mut frame, U256::ZERO));
    };

    log!(
        host,
        Level::Debug,
        "ArbSys: {} from {}",
        syscall.signature(),
        exec_state.caller
    );

    match syscall {
        Syscall::WithdrawEth => syscalls::withdraw_eth(host, exec_state),
        Syscall::WithdrawErc20 => {
            syscalls::withdraw_token(host, exec_state, TokenKind::Erc20)
        }
        Syscall::WithdrawErc721 => {
            syscalls::withdraw_token(host, exec_state, TokenKind::Erc721)
        }
        Syscall::TimeUpperBound => Ok(syscalls::time_upper_bound(host, &mut frame)),
        Syscall::CurrentMessageTime => {
            Ok(syscalls::current_message_time(host, &mut frame))
        }
        Syscall::TransactionCount => {
            syscalls::transaction_count(host.accounts(), &mut frame, exec_state)
        }
        Syscall::CloneContract => syscalls::clone_contract(host, &mut frame, exec_state),
    }
}
