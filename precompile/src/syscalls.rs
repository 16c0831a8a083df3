// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

//! The ArbSys syscalls.
//!
//! Withdrawals end with [CallFinish::Stop] once their message is sent, the
//! queries return a single word through [return_one_word].

use arb_logging::{log, Level};
use revm::primitives::Bytes;

use crate::{
    abi::{parse_withdraw_call, LocalExecState, FIRST_ARG_OFFSET},
    error::Error,
    frame::CallFrame,
    host::{AccountStore, ArbSysHost},
    message::{EthTransferMessage, Message, TokenKind, TokenTransferMessage},
    output::{return_one_word, CallFinish},
};

/// Withdraws ETH of the caller to `dest` on the base chain. Reverts with
/// empty data when the balance does not cover `amount`.
pub fn withdraw_eth<Host: ArbSysHost>(
    host: &mut Host,
    exec_state: &LocalExecState,
) -> Result<CallFinish, Error> {
    let call = parse_withdraw_call(exec_state)?;

    if !host.withdraw_eth(call.amount)? {
        log!(
            host,
            Level::Info,
            "Refused withdrawal of {} wei from {}: insufficient balance",
            call.amount,
            call.caller
        );
        return Ok(CallFinish::Revert(Bytes::new()));
    }

    let message = Message::eth_transfer(
        call.caller,
        EthTransferMessage {
            amount: call.amount,
            dest: call.dest,
        },
    );
    host.send_message(message);
    log!(
        host,
        Level::Info,
        "Withdrawal of {} wei from {} to {}",
        call.amount,
        call.caller,
        call.dest
    );
    Ok(CallFinish::Stop)
}

/// Withdraws tokens of the calling token contract. The sender of the
/// message is the sender of the current inbound message, and no balance is
/// checked here: the base chain refuses transfers that are not covered.
pub fn withdraw_token<Host: ArbSysHost>(
    host: &mut Host,
    exec_state: &LocalExecState,
    kind: TokenKind,
) -> Result<CallFinish, Error> {
    let call = parse_withdraw_call(exec_state)?;
    let sender = host.current_message().sender;

    let message = Message::token_transfer(
        kind,
        sender,
        TokenTransferMessage {
            amount: call.amount,
            dest: call.dest,
            token_address: call.caller,
        },
    );
    host.send_message(message);
    log!(
        host,
        Level::Info,
        "{:?} withdrawal of {} from token {} on behalf of {} to {}",
        kind,
        call.amount,
        call.caller,
        sender,
        call.dest
    );
    Ok(CallFinish::Stop)
}

/// The actual time of the block never exceeds the returned value.
pub fn time_upper_bound<Host: ArbSysHost>(host: &Host, frame: &mut CallFrame) -> CallFinish {
    return_one_word(frame, host.time_bounds().upper)
}

pub fn current_message_time<Host: ArbSysHost>(
    host: &Host,
    frame: &mut CallFrame,
) -> CallFinish {
    return_one_word(frame, host.current_message().block_number)
}

pub fn transaction_count<Accounts: AccountStore>(
    accounts: &Accounts,
    frame: &mut CallFrame,
    exec_state: &LocalExecState,
) -> Result<CallFinish, Error> {
    let address = exec_state.address(FIRST_ARG_OFFSET)?;
    let account = accounts.account(&address)?;
    Ok(return_one_word(frame, account.next_seq_num))
}

pub fn clone_contract<Host: ArbSysHost>(
    host: &mut Host,
    frame: &mut CallFrame,
    exec_state: &LocalExecState,
) -> Result<CallFinish, Error> {
    let address = exec_state.address(FIRST_ARG_OFFSET)?;
    let result = host.clone_contract(address)?;
    Ok(return_one_word(frame, result))
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_sol_types::SolCall;
    use pretty_assertions::assert_eq;
    use revm::primitives::{Address, U256};

    use crate::{
        abi::ArbSys,
        frame::CallFrames,
        host::{AccountState, InboundMessage, TimeBounds},
        message::MessagePayload,
        testing::MockArbChain,
    };

    const CALLER: Address = Address::new([0x11; 20]);
    const DEST: Address = Address::new([0x22; 20]);
    const ORIGIN: Address = Address::new([0x33; 20]);

    fn withdraw_eth_state(amount: u64) -> LocalExecState {
        let data = ArbSys::withdrawEthCall {
            dest: DEST,
            amount: U256::from(amount),
        }
        .abi_encode();
        LocalExecState::new(CALLER, data)
    }

    #[test]
    fn withdraw_eth_sends_one_message_and_stops() {
        let mut host = MockArbChain::default().with_withdrawable(U256::from(100));

        let finish = withdraw_eth(&mut host, &withdraw_eth_state(60)).unwrap();

        assert_eq!(finish, CallFinish::Stop);
        assert_eq!(
            host.outbox,
            vec![Message::eth_transfer(
                CALLER,
                EthTransferMessage {
                    amount: U256::from(60),
                    dest: DEST,
                }
            )]
        );
        assert_eq!(host.withdrawable, U256::from(40));
    }

    #[test]
    fn withdraw_eth_reverts_on_insufficient_balance() {
        let mut host = MockArbChain::default().with_withdrawable(U256::from(10));

        let finish = withdraw_eth(&mut host, &withdraw_eth_state(11)).unwrap();

        assert_eq!(finish, CallFinish::Revert(Bytes::new()));
        assert!(finish.output().is_empty());
        assert!(host.outbox.is_empty());
        assert_eq!(host.withdrawable, U256::from(10));
    }

    #[test]
    fn token_withdrawals_use_caller_as_token_and_message_sender() {
        for (kind, data) in [
            (
                TokenKind::Erc20,
                ArbSys::withdrawERC20Call {
                    dest: DEST,
                    amount: U256::from(5),
                }
                .abi_encode(),
            ),
            (
                TokenKind::Erc721,
                ArbSys::withdrawERC721Call {
                    dest: DEST,
                    amount: U256::from(5),
                }
                .abi_encode(),
            ),
        ] {
            let mut host = MockArbChain::default().with_current_message(InboundMessage {
                block_number: U256::from(1),
                sender: ORIGIN,
            });

            let finish =
                withdraw_token(&mut host, &LocalExecState::new(CALLER, data), kind)
                    .unwrap();

            assert_eq!(finish, CallFinish::Stop);
            assert_eq!(host.outbox.len(), 1);
            let message = host.outbox[0];
            assert_eq!(message.message_type(), kind.message_type());
            assert_eq!(message.sender, ORIGIN);
            assert_eq!(
                message.payload,
                MessagePayload::Token(
                    kind,
                    TokenTransferMessage {
                        amount: U256::from(5),
                        dest: DEST,
                        token_address: CALLER,
                    }
                )
            );
        }
    }

    #[test]
    fn token_withdrawal_is_not_balance_gated() {
        let mut host = MockArbChain::default();
        let data = ArbSys::withdrawERC20Call {
            dest: DEST,
            amount: U256::MAX,
        }
        .abi_encode();

        withdraw_token(&mut host, &LocalExecState::new(CALLER, data), TokenKind::Erc20)
            .unwrap();

        assert_eq!(host.outbox.len(), 1);
    }

    #[test]
    fn queries_return_host_values() {
        let host = MockArbChain::default()
            .with_time_bounds(TimeBounds {
                lower: U256::from(10),
                upper: U256::from(20),
            })
            .with_current_message(InboundMessage {
                block_number: U256::from(1_234),
                sender: ORIGIN,
            });
        let mut frames = CallFrames::new();
        let mut frame = frames.enter();

        assert_eq!(
            time_upper_bound(&host, &mut frame).output(),
            U256::from(20).to_be_bytes::<32>()
        );
        assert_eq!(
            current_message_time(&host, &mut frame).output(),
            U256::from(1_234).to_be_bytes::<32>()
        );
    }

    #[test]
    fn transaction_count_reads_next_sequence_number() {
        let host = MockArbChain::default().with_account(
            DEST,
            AccountState {
                next_seq_num: U256::from(9),
            },
        );
        let data = ArbSys::getTransactionCountCall { account: DEST }.abi_encode();
        let mut frames = CallFrames::new();
        let mut frame = frames.enter();

        let finish = transaction_count(
            host.accounts(),
            &mut frame,
            &LocalExecState::new(CALLER, data),
        )
        .unwrap();
        assert_eq!(finish.output(), U256::from(9).to_be_bytes::<32>());

        let unknown = ArbSys::getTransactionCountCall { account: ORIGIN }.abi_encode();
        let finish = transaction_count(
            host.accounts(),
            &mut frame,
            &LocalExecState::new(CALLER, unknown),
        )
        .unwrap();
        assert_eq!(finish.output(), [0u8; 32]);
    }

    #[test]
    fn clone_contract_forwards_address_and_result() {
        let mut host = MockArbChain::default().with_clone_result(U256::from(0xc0de));
        let data = ArbSys::cloneContractCall { account: DEST }.abi_encode();
        let mut frames = CallFrames::new();
        let mut frame = frames.enter();

        let finish =
            clone_contract(&mut host, &mut frame, &LocalExecState::new(CALLER, data))
                .unwrap();

        assert_eq!(host.cloned, vec![DEST]);
        assert_eq!(finish.output(), U256::from(0xc0de).to_be_bytes::<32>());
    }

    #[test]
    fn eth_is_debited_only_for_sent_messages() {
        let initial = U256::from(100);
        let mut host = MockArbChain::default().with_withdrawable(initial);

        for amount in [60, 50, 40, 1] {
            withdraw_eth(&mut host, &withdraw_eth_state(amount)).unwrap();
        }

        let sent = host
            .outbox
            .iter()
            .map(|message| match message.payload {
                MessagePayload::Eth(transfer) => transfer.amount,
                MessagePayload::Token(..) => panic!("unexpected token transfer"),
            })
            .fold(U256::ZERO, |total, amount| total + amount);
        assert_eq!(host.outbox.len(), 2);
        assert_eq!(host.withdrawable + sent, initial);
    }

    #[test]
    fn host_failures_are_propagated() {
        let mut host = MockArbChain::default().with_failing_clone();
        let data = ArbSys::cloneContractCall { account: DEST }.abi_encode();
        let mut frames = CallFrames::new();
        let mut frame = frames.enter();

        let result =
            clone_contract(&mut host, &mut frame, &LocalExecState::new(CALLER, data));

        assert!(matches!(result, Err(Error::Host(_))));
        assert!(host.cloned.is_empty());
    }
}
