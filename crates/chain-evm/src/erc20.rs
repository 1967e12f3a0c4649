use alloy_primitives::U256;

use crate::abi::{encode_function_call, AbiParam};
use crate::address::parse_address;
use crate::error::EvmError;

/// Function selector for `transfer(address,uint256)`: `0xa9059cbb`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Encodes an ERC-20 `transfer(address,uint256)` call.
///
/// This is the calldata placed on a token contract when a native-looking
/// transfer is rewritten into a token transfer: the recipient and base-unit
/// amount move into the calldata and the transaction's own value becomes 0.
///
/// # Parameters
///
/// - `to`: The recipient address (0x-prefixed hex string).
/// - `amount`: The transfer amount in the token's base units.
///
/// # Returns
///
/// The complete calldata (4-byte selector + 64 bytes of ABI-encoded params).
pub fn encode_transfer(to: &str, amount: U256) -> Result<Vec<u8>, EvmError> {
    let addr = parse_address(to)?;
    let params = [AbiParam::Address(addr), AbiParam::Uint256(amount)];
    Ok(encode_function_call(TRANSFER_SELECTOR, &params))
}
