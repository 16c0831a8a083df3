// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

//! ArbSys, the system precompile of the rollup.
//!
//! Calls are routed on their 4 bytes selector to the withdrawal syscalls,
//! which hand messages to the base chain bridge, or to the time, nonce
//! and cloning syscalls, which return a single word.

pub mod abi;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod host;
pub mod message;
pub mod output;
pub mod provider;
pub mod syscalls;
pub mod value;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use abi::{ArbSys, LocalExecState};
pub use config::{ArbSysConfig, GasSchedule};
pub use dispatch::{perform_precompile_call, Syscall};
pub use error::Error;
pub use frame::CallFrames;
pub use host::{AccountState, AccountStore, ArbSysHost, InboundMessage, TimeBounds};
pub use message::{Message, MessageType};
pub use output::CallFinish;
pub use provider::ArbPrecompiles;
