// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

use std::iter;

use arb_logging::{log, Level};
use revm::{
    context::{Cfg, ContextTr, LocalContextTr},
    handler::{EthPrecompiles, PrecompileProvider},
    interpreter::{CallInput, Gas, InputsImpl, InstructionResult, InterpreterResult},
    primitives::{Address, Bytes},
};

use crate::{
    abi::LocalExecState,
    config::ArbSysConfig,
    dispatch::{perform_precompile_call, Syscall},
    error::Error,
    frame::CallFrames,
    host::ArbSysHost,
    output::CallFinish,
};

/// Ethereum precompiles plus ArbSys at the configured address.
#[derive(Debug, Default)]
pub struct ArbPrecompiles {
    pub config: ArbSysConfig,
    pub builtins: EthPrecompiles,
    frames: CallFrames,
}

impl ArbPrecompiles {
    pub fn new(config: ArbSysConfig) -> Self {
        Self {
            config,
            builtins: EthPrecompiles::default(),
            frames: CallFrames::new(),
        }
    }

    pub fn frames(&self) -> &CallFrames {
        &self.frames
    }

    fn warm_addresses(&self) -> Box<impl Iterator<Item = Address>> {
        Box::new(
            self.builtins
                .warm_addresses()
                .chain(iter::once(self.config.address)),
        )
    }

    fn contains(&self, address: &Address) -> bool {
        *address == self.config.address || self.builtins.contains(address)
    }

    fn run_arb_sys<CTX>(
        &mut self,
        context: &mut CTX,
        inputs: &InputsImpl,
        is_static: bool,
        gas_limit: u64,
    ) -> InterpreterResult
    where
        CTX: ContextTr,
        CTX::Db: ArbSysHost,
    {
        let input_bytes = match &inputs.input {
            CallInput::SharedBuffer(range) => context
                .local()
                .shared_memory_buffer_slice(range.clone())
                .map(|slice| slice.to_vec())
                .unwrap_or_default(),
            CallInput::Bytes(bytes) => bytes.to_vec(),
        };
        let exec_state = LocalExecState::new(inputs.caller_address, input_bytes);

        let selector = match exec_state.selector() {
            Ok(selector) => selector,
            Err(e) => return fault(context.db(), e, gas_limit),
        };
        let syscall = Syscall::from_selector(selector);

        let mut gas = Gas::new(gas_limit);
        if !gas.record_cost(self.config.gas.cost(syscall)) {
            return out_of_gas(gas_limit);
        }

        if is_static && syscall.is_some_and(Syscall::is_mutating) {
            return CallFinish::Revert(Bytes::new()).into_interpreter_result(gas);
        }

        match perform_precompile_call(context.db_mut(), &mut self.frames, &exec_state) {
            Ok(finish) => finish.into_interpreter_result(gas),
            Err(e) => fault(context.db(), e, gas_limit),
        }
    }
}

impl<CTX> PrecompileProvider<CTX> for ArbPrecompiles
where
    CTX: ContextTr,
    CTX::Db: ArbSysHost,
{
    type Output = InterpreterResult;

    fn set_spec(&mut self, spec: <CTX::Cfg as Cfg>::Spec) -> bool {
        <EthPrecompiles as PrecompileProvider<CTX>>::set_spec(&mut self.builtins, spec)
    }

    fn run(
        &mut self,
        context: &mut CTX,
        address: &Address,
        inputs: &InputsImpl,
        is_static: bool,
        gas_limit: u64,
    ) -> Result<Option<Self::Output>, String> {
        if *address == self.config.address {
            return Ok(Some(self.run_arb_sys(context, inputs, is_static, gas_limit)));
        }

        self.builtins
            .run(context, address, inputs, is_static, gas_limit)
    }

    fn warm_addresses(&self) -> Box<impl Iterator<Item = Address>> {
        self.warm_addresses()
    }

    fn contains(&self, address: &Address) -> bool {
        self.contains(address)
    }
}

pub(crate) fn out_of_gas(gas_limit: u64) -> InterpreterResult {
    InterpreterResult {
        result: InstructionResult::OutOfGas,
        gas: Gas::new_spent(gas_limit),
        output: Bytes::new(),
    }
}

// Aborts the call and consumes all its gas.
fn fault<Host: ArbSysHost>(host: &Host, error: Error, gas_limit: u64) -> InterpreterResult {
    log!(host, Level::Error, "ArbSys call failed: {}", error);
    InterpreterResult {
        result: InstructionResult::PrecompileError,
        gas: Gas::new_spent(gas_limit),
        output: Bytes::new(),
    }
}
