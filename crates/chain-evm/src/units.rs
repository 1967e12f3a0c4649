use alloy_primitives::U256;

use crate::error::EvmError;

/// Converts a display-unit decimal string into base units.
///
/// `"1.5"` with 6 decimals becomes `1_500_000`. The conversion is exact
/// string arithmetic: the fractional part is right-padded to `decimals`
/// digits and the whole thing parsed as one integer, so no floating-point
/// rounding can creep in. Fractional digits beyond `decimals` are rejected
/// rather than truncated.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, EvmError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(EvmError::InvalidAmount("empty amount".into()));
    }

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(EvmError::InvalidAmount("no digits in amount".into()));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(EvmError::InvalidAmount(format!(
            "amount is not an unsigned decimal: {amount}"
        )));
    }
    if frac_part.len() > decimals as usize {
        return Err(EvmError::InvalidAmount(format!(
            "{} fractional digits exceed the asset's {} decimals",
            frac_part.len(),
            decimals
        )));
    }

    // Scale by concatenation: int || frac padded to `decimals` digits.
    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in frac_part.len()..decimals as usize {
        digits.push('0');
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10)
        .map_err(|e| EvmError::InvalidAmount(format!("amount out of range: {e}")))
}

/// Converts a display-unit ether string into wei (18 decimals).
pub fn to_wei(amount: &str) -> Result<U256, EvmError> {
    to_base_units(amount, 18)
}
