// SPDX-FileCopyrightText: 2025 Nomadic Labs <contact@nomadic-labs.com>
// SPDX-FileCopyrightText: 2025 Functori <contact@functori.com>
//
// SPDX-License-Identifier: MIT

use revm::primitives::{Address, FixedBytes};

pub const ARB_SYS_ADDRESS: Address = Address(FixedBytes::new([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x64,
]));

// Selector table. Any change here is a breaking protocol change.

// "0x1b9a91a4" is the function selector for `withdrawEth(address,uint256)`
pub const WITHDRAW_ETH_SELECTOR: u32 = 0x1B9A91A4;
// "0xa1db9782" is the function selector for `withdrawERC20(address,uint256)`
pub const WITHDRAW_ERC20_SELECTOR: u32 = 0xA1DB9782;
// "0xf3e414f8" is the function selector for `withdrawERC721(address,uint256)`
pub const WITHDRAW_ERC721_SELECTOR: u32 = 0xF3E414F8;
// "0xbde19776" is the function selector for `timeUpperBound()`
pub const TIME_UPPER_BOUND_SELECTOR: u32 = 0xBDE19776;
// "0x44f50653" is the function selector for `currentMessageTime()`
pub const CURRENT_MESSAGE_TIME_SELECTOR: u32 = 0x44F50653;
// "0x23ca0cd2" is the function selector for `getTransactionCount(address)`
pub const TRANSACTION_COUNT_SELECTOR: u32 = 0x23CA0CD2;
// "0x474ed9c0" is the function selector for `cloneContract(address)`
pub const CLONE_CONTRACT_SELECTOR: u32 = 0x474ED9C0;

// Outgoing message type codes, shared with the base chain withdrawal
// processing.
pub const WITHDRAW_ETH_TYPECODE: u8 = 1;
pub const WITHDRAW_ERC20_TYPECODE: u8 = 2;
pub const WITHDRAW_ERC721_TYPECODE: u8 = 3;

// Rationale regarding the cost:
// Reading the selector and one table lookup.
pub(crate) const DISPATCH_BASE_COST: u64 = 100;

// Rationale regarding the cost:
// A few decoding/encoding functions and one outbox write.
pub(crate) const WITHDRAW_BASE_COST: u64 = 500;

// Rationale regarding the cost:
// Covers a cold read (2100) of the queried state.
pub(crate) const QUERY_BASE_COST: u64 = 2_100;

// Rationale regarding the cost:
// Same order of magnitude as a CREATE.
pub(crate) const CLONE_CONTRACT_BASE_COST: u64 = 32_000;

#[cfg(test)]
mod test {
    use super::*;
    use crate::abi::ArbSys;
    use alloy_sol_types::SolCall;

    fn selector<C: SolCall>() -> u32 {
        u32::from_be_bytes(C::SELECTOR)
    }

    #[test]
    fn selectors_match_interface_signatures() {
        assert_eq!(WITHDRAW_ETH_SELECTOR, selector::<ArbSys::withdrawEthCall>());
        assert_eq!(WITHDRAW_ERC20_SELECTOR, selector::<ArbSys::withdrawERC20Call>());
        assert_eq!(
            WITHDRAW_ERC721_SELECTOR,
            selector::<ArbSys::withdrawERC721Call>()
        );
        assert_eq!(
            TIME_UPPER_BOUND_SELECTOR,
            selector::<ArbSys::timeUpperBoundCall>()
        );
        assert_eq!(
            CURRENT_MESSAGE_TIME_SELECTOR,
            selector::<ArbSys::currentMessageTimeCall>()
        );
        assert_eq!(
            TRANSACTION_COUNT_SELECTOR,
            selector::<ArbSys::getTransactionCountCall>()
        );
        assert_eq!(CLONE_CONTRACT_SELECTOR, selector::<ArbSys::cloneContractCall>());
    }
}
