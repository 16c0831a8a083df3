// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
//
// SPDX-License-Identifier: MIT

use revm::{
    interpreter::{Gas, InstructionResult, InterpreterResult},
    primitives::{Bytes, B256, U256},
};

use crate::{abi::WORD_SIZE, frame::CallFrame};

/// How a precompile call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFinish {
    Return(Bytes),
    /// Success without return data.
    Stop,
    Revert(Bytes),
}

impl CallFinish {
    pub fn output(&self) -> &[u8] {
        match self {
            CallFinish::Return(output) | CallFinish::Revert(output) => output,
            CallFinish::Stop => &[],
        }
    }

    pub fn into_interpreter_result(self, gas: Gas) -> InterpreterResult {
        let (result, output) = match self {
            CallFinish::Return(output) => (InstructionResult::Return, output),
            CallFinish::Stop => (InstructionResult::Stop, Bytes::new()),
            CallFinish::Revert(output) => (InstructionResult::Revert, output),
        };
        InterpreterResult {
            result,
            gas,
            output,
        }
    }
}

/// Returns `word` the way a function returning a single `uint256` does:
/// the frame memory is sized to one word, the word is written at offset 0
/// and the first 32 bytes are returned.
pub fn return_one_word(frame: &mut CallFrame, word: U256) -> CallFinish {
    frame.memory.resize(WORD_SIZE);
    frame.memory.set_word(0, &B256::from(word));
    CallFinish::Return(Bytes::copy_from_slice(
        &frame.memory.slice_len(0, WORD_SIZE),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_sol_types::SolCall;
    use pretty_assertions::assert_eq;

    use crate::{abi::ArbSys, frame::CallFrames};

    #[test]
    fn one_word_output_decodes_as_uint256() {
        let mut frames = CallFrames::new();
        let mut frame = frames.enter();

        let finish = return_one_word(&mut frame, U256::from(0x1234_5678));

        assert_eq!(frame.memory.len(), WORD_SIZE);
        assert_eq!(finish.output().len(), WORD_SIZE);
        assert_eq!(
            ArbSys::timeUpperBoundCall::abi_decode_returns(finish.output()).unwrap(),
            U256::from(0x1234_5678)
        );
    }

    #[test]
    fn stop_has_no_output() {
        let result = CallFinish::Stop.into_interpreter_result(Gas::new(10));

        assert_eq!(result.result, InstructionResult::Stop);
        assert!(result.output.is_empty());
        assert_eq!(result.gas.remaining(), 10);
    }
}
