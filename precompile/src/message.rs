// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

//! Messages sent from the rollup to the base chain bridge.
//!
//! The envelope is the tuple `(type, sender, payload)`. An ETH transfer
//! payload is `(dest, amount)`, a token transfer payload is
//! `(token_address, dest, amount)`. This layout is what the base chain
//! withdrawal processing reads and must not change.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use revm::primitives::{Address, U256};

use crate::{
    constants::{WITHDRAW_ERC20_TYPECODE, WITHDRAW_ERC721_TYPECODE, WITHDRAW_ETH_TYPECODE},
    error::Error,
    value::Value,
};

/// Type codes of bridge messages. Only the withdrawals are emitted by the
/// rollup, the other kinds only travel from the base chain to the rollup.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum MessageType {
    Transaction = 0,
    EthTransfer = WITHDRAW_ETH_TYPECODE,
    Erc20Transfer = WITHDRAW_ERC20_TYPECODE,
    Erc721Transfer = WITHDRAW_ERC721_TYPECODE,
    ContractTransaction = 4,
    Call = 5,
}

impl TryFrom<u8> for MessageType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        FromPrimitive::from_u8(code)
            .ok_or_else(|| Error::InvalidMessage(format!("unknown type code {code}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Erc20,
    Erc721,
}

impl TokenKind {
    pub fn message_type(self) -> MessageType {
        match self {
            TokenKind::Erc20 => MessageType::Erc20Transfer,
            TokenKind::Erc721 => MessageType::Erc721Transfer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthTransferMessage {
    pub amount: U256,
    pub dest: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTransferMessage {
    pub amount: U256,
    pub dest: Address,
    pub token_address: Address,
}

/// The payload variant determines the message type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePayload {
    Eth(EthTransferMessage),
    Token(TokenKind, TokenTransferMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub sender: Address,
    pub payload: MessagePayload,
}

impl Message {
    pub fn eth_transfer(sender: Address, transfer: EthTransferMessage) -> Self {
        Self {
            sender,
            payload: MessagePayload::Eth(transfer),
        }
    }

    pub fn token_transfer(
        kind: TokenKind,
        sender: Address,
        transfer: TokenTransferMessage,
    ) -> Self {
        Self {
            sender,
            payload: MessagePayload::Token(kind, transfer),
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self.payload {
            MessagePayload::Eth(_) => MessageType::EthTransfer,
            MessagePayload::Token(kind, _) => kind.message_type(),
        }
    }

    pub fn to_value(&self) -> Value {
        let payload = match &self.payload {
            MessagePayload::Eth(EthTransferMessage { amount, dest }) => {
                Value::Tuple(vec![(*dest).into(), (*amount).into()])
            }
            MessagePayload::Token(
                _,
                TokenTransferMessage {
                    amount,
                    dest,
                    token_address,
                },
            ) => Value::Tuple(vec![
                (*token_address).into(),
                (*dest).into(),
                (*amount).into(),
            ]),
        };
        Value::Tuple(vec![
            Value::Int(U256::from(self.message_type() as u8)),
            self.sender.into(),
            payload,
        ])
    }

    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let [type_code, sender, payload] = fields::<3>(value, "envelope")?;

        let type_code = type_code
            .as_int()
            .and_then(|code| u8::try_from(code).ok())
            .ok_or_else(|| invalid("type code is not a small integer"))?;
        let sender = address(sender, "sender")?;

        match MessageType::try_from(type_code)? {
            MessageType::EthTransfer => {
                let [dest, amount] = fields::<2>(payload, "ETH transfer")?;
                Ok(Self::eth_transfer(
                    sender,
                    EthTransferMessage {
                        amount: int(amount, "amount")?,
                        dest: address(dest, "dest")?,
                    },
                ))
            }
            message_type @ (MessageType::Erc20Transfer | MessageType::Erc721Transfer) => {
                let kind = if message_type == MessageType::Erc20Transfer {
                    TokenKind::Erc20
                } else {
                    TokenKind::Erc721
                };
                let [token_address, dest, amount] = fields::<3>(payload, "token transfer")?;
                Ok(Self::token_transfer(
                    kind,
                    sender,
                    TokenTransferMessage {
                        amount: int(amount, "amount")?,
                        dest: address(dest, "dest")?,
                        token_address: address(token_address, "token_address")?,
                    },
                ))
            }
            inbound => Err(invalid(&format!(
                "{inbound:?} messages are not sent to the base chain"
            ))),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        self.to_value().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_value(&Value::from_bytes(bytes)?)
    }
}

fn invalid(reason: &str) -> Error {
    Error::InvalidMessage(reason.to_string())
}

fn fields<'a, const N: usize>(value: &'a Value, what: &str) -> Result<&'a [Value; N], Error> {
    value
        .as_tuple()
        .and_then(|items| items.try_into().ok())
        .ok_or_else(|| invalid(&format!("{what} is not a tuple of {N} elements")))
}

fn int(value: &Value, what: &str) -> Result<U256, Error> {
    value
        .as_int()
        .ok_or_else(|| invalid(&format!("{what} is not an integer")))
}

fn address(value: &Value, what: &str) -> Result<Address, Error> {
    value
        .as_address()
        .ok_or_else(|| invalid(&format!("{what} is not an address")))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::value::{NUM, TUPLE};
    use pretty_assertions::assert_eq;

    fn word(bytes: &[u8]) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        word
    }

    #[test]
    fn eth_transfer_envelope_is_byte_stable() {
        let message = Message::eth_transfer(
            Address::repeat_byte(0x11),
            EthTransferMessage {
                amount: U256::from(0x05),
                dest: Address::repeat_byte(0x22),
            },
        );

        let mut expected = vec![TUPLE + 3, NUM];
        expected.extend_from_slice(&word(&[WITHDRAW_ETH_TYPECODE]));
        expected.push(NUM);
        expected.extend_from_slice(&word(&[0x11; 20]));
        expected.push(TUPLE + 2);
        expected.push(NUM);
        expected.extend_from_slice(&word(&[0x22; 20]));
        expected.push(NUM);
        expected.extend_from_slice(&word(&[0x05]));

        assert_eq!(message.to_bytes().unwrap(), expected);
        assert_eq!(Message::from_bytes(&expected).unwrap(), message);
    }

    #[test]
    fn token_transfer_payload_starts_with_token_address() {
        let message = Message::token_transfer(
            TokenKind::Erc721,
            Address::repeat_byte(0x11),
            TokenTransferMessage {
                amount: U256::from(3),
                dest: Address::repeat_byte(0x22),
                token_address: Address::repeat_byte(0x33),
            },
        );

        let value = message.to_value();
        let items = value.as_tuple().unwrap();

        assert_eq!(items[0], Value::Int(U256::from(WITHDRAW_ERC721_TYPECODE)));
        assert_eq!(
            items[2],
            Value::Tuple(vec![
                Address::repeat_byte(0x33).into(),
                Address::repeat_byte(0x22).into(),
                U256::from(3).into(),
            ])
        );
        assert_eq!(Message::from_value(&value).unwrap(), message);
    }

    #[test]
    fn inbound_and_unknown_types_are_refused() {
        for code in [0u8, 4, 5, 6, 255] {
            let value = Value::Tuple(vec![
                Value::Int(U256::from(code)),
                Address::ZERO.into(),
                Value::Tuple(vec![Address::ZERO.into(), U256::ZERO.into()]),
            ]);
            assert!(matches!(
                Message::from_value(&value),
                Err(Error::InvalidMessage(_))
            ));
        }
    }

    #[test]
    fn payload_arity_is_checked() {
        let value = Value::Tuple(vec![
            Value::Int(U256::from(WITHDRAW_ERC20_TYPECODE)),
            Address::ZERO.into(),
            Value::Tuple(vec![Address::ZERO.into(), U256::ZERO.into()]),
        ]);

        assert_eq!(
            Message::from_value(&value),
            Err(Error::InvalidMessage(
                "token transfer is not a tuple of 3 elements".to_string()
            ))
        );
    }

    #[test]
    fn sender_must_be_an_address() {
        let value = Value::Tuple(vec![
            Value::Int(U256::from(WITHDRAW_ETH_TYPECODE)),
            Value::Int(U256::MAX),
            Value::Tuple(vec![Address::ZERO.into(), U256::ZERO.into()]),
        ]);

        assert_eq!(
            Message::from_value(&value),
            Err(Error::InvalidMessage("sender is not an address".to_string()))
        );
    }
}
