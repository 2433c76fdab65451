//! Checked arithmetic and constant-product formulas.
use odra::casper_types::{U256, U512};

use crate::errors::DexError;

/// LP units minted to the pair itself on the first deposit and never redeemable.
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Swap fee, charged on the input amount: 3 / 1000 = 0.3%.
pub const FEE_NUMERATOR: u64 = 3;
pub const FEE_DENOMINATOR: u64 = 1000;

/// Reserves are bounded to 112 bits.
pub const RESERVE_BITS: u32 = 112;

/// Precision of the spot prices returned by `Pair::get_price0/1`.
pub const PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Largest reserve a pair can hold, 2^112 - 1.
pub fn max_reserve() -> U256 {
    U256::from(u128::MAX >> (128 - RESERVE_BITS))
}

/// 2^112, the fixed-point scale of the cumulative price accumulators.
pub fn q112() -> U256 {
    U256::from(1u128 << RESERVE_BITS)
}

/// Native amounts are counted in U512 motes, ledgers in U256.
pub fn to_native(amount: U256) -> U512 {
    let mut bytes = [0u8; 64];
    amount.to_little_endian(&mut bytes[..32]);
    U512::from_little_endian(&bytes)
}

/// Ledger amount for `amount` motes; `Overflow` above 256 bits.
pub fn from_native(amount: U512) -> Result<U256, DexError> {
    let mut bytes = [0u8; 64];
    amount.to_little_endian(&mut bytes);
    if bytes[32..].iter().any(|byte| *byte != 0) {
        return Err(DexError::Overflow);
    }
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// Arithmetic that reports overflow instead of wrapping or panicking.
pub struct SafeMath;

impl SafeMath {
    pub fn add(a: U256, b: U256) -> Result<U256, DexError> {
        a.checked_add(b).ok_or(DexError::Overflow)
    }

    pub fn sub(a: U256, b: U256) -> Result<U256, DexError> {
        a.checked_sub(b).ok_or(DexError::Underflow)
    }

    pub fn mul(a: U256, b: U256) -> Result<U256, DexError> {
        a.checked_mul(b).ok_or(DexError::Overflow)
    }

    pub fn div(a: U256, b: U256) -> Result<U256, DexError> {
        a.checked_div(b).ok_or(DexError::DivisionByZero)
    }
}

/// Constant-product formulas shared by the pair and the router.
pub struct AmmMath;

impl AmmMath {
    /// Integer square root, rounded down (Babylonian method).
    pub fn sqrt(y: U256) -> U256 {
        if y > U256::from(3u64) {
            let mut z = y;
            let mut x = y / 2 + 1;
            while x < z {
                z = x;
                x = (y / x + x) / 2;
            }
            z
        } else if !y.is_zero() {
            U256::one()
        } else {
            U256::zero()
        }
    }

    /// LP units owed for a deposit of `amount0`/`amount1`.
    ///
    /// With no supply yet this is `sqrt(amount0 * amount1) - MINIMUM_LIQUIDITY`,
    /// otherwise the smaller of the two proportional shares. Returns zero when
    /// the deposit is too small to mint anything.
    pub fn calculate_liquidity(
        amount0: U256,
        amount1: U256,
        reserve0: U256,
        reserve1: U256,
        total_supply: U256,
    ) -> Result<U256, DexError> {
        if total_supply.is_zero() {
            let root = Self::sqrt(SafeMath::mul(amount0, amount1)?);
            return Ok(root.saturating_sub(U256::from(MINIMUM_LIQUIDITY)));
        }

        let share0 = SafeMath::div(SafeMath::mul(amount0, total_supply)?, reserve0)?;
        let share1 = SafeMath::div(SafeMath::mul(amount1, total_supply)?, reserve1)?;
        Ok(share0.min(share1))
    }

    /// Underlying amounts released by burning `liquidity` LP units.
    pub fn calculate_burn_amounts(
        liquidity: U256,
        balance0: U256,
        balance1: U256,
        total_supply: U256,
    ) -> Result<(U256, U256), DexError> {
        let amount0 = SafeMath::div(SafeMath::mul(liquidity, balance0)?, total_supply)?;
        let amount1 = SafeMath::div(SafeMath::mul(liquidity, balance1)?, total_supply)?;
        Ok((amount0, amount1))
    }

    /// Amount of B worth `amount_a` of A at the current reserve ratio.
    pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256, DexError> {
        if amount_a.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        SafeMath::div(SafeMath::mul(amount_a, reserve_b)?, reserve_a)
    }

    /// Maximum output for an exact input, after the swap fee.
    pub fn get_amount_out(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<U256, DexError> {
        if amount_in.is_zero() {
            return Err(DexError::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        let amount_in_with_fee =
            SafeMath::mul(amount_in, U256::from(FEE_DENOMINATOR - FEE_NUMERATOR))?;
        let numerator = SafeMath::mul(amount_in_with_fee, reserve_out)?;
        let denominator = SafeMath::add(
            SafeMath::mul(reserve_in, U256::from(FEE_DENOMINATOR))?,
            amount_in_with_fee,
        )?;
        SafeMath::div(numerator, denominator)
    }

    /// Minimum input for an exact output, after the swap fee.
    pub fn get_amount_in(
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> Result<U256, DexError> {
        if amount_out.is_zero() {
            return Err(DexError::InsufficientOutputAmount);
        }
        if reserve_in.is_zero() || amount_out >= reserve_out {
            return Err(DexError::InsufficientLiquidity);
        }
        let numerator = SafeMath::mul(
            SafeMath::mul(reserve_in, amount_out)?,
            U256::from(FEE_DENOMINATOR),
        )?;
        let denominator = SafeMath::mul(
            SafeMath::sub(reserve_out, amount_out)?,
            U256::from(FEE_DENOMINATOR - FEE_NUMERATOR),
        )?;
        SafeMath::add(SafeMath::div(numerator, denominator)?, U256::one())
    }

    /// Fee-adjusted invariant check run at the end of every swap:
    /// `(b0*1000 - in0*3) * (b1*1000 - in1*3) >= r0 * r1 * 1000^2`.
    pub fn check_k(
        balance0: U256,
        balance1: U256,
        amount0_in: U256,
        amount1_in: U256,
        reserve0: U256,
        reserve1: U256,
    ) -> Result<(), DexError> {
        let scale = U256::from(FEE_DENOMINATOR);
        let fee = U256::from(FEE_NUMERATOR);
        let balance0_adjusted =
            SafeMath::sub(SafeMath::mul(balance0, scale)?, SafeMath::mul(amount0_in, fee)?)?;
        let balance1_adjusted =
            SafeMath::sub(SafeMath::mul(balance1, scale)?, SafeMath::mul(amount1_in, fee)?)?;

        let k_new = SafeMath::mul(balance0_adjusted, balance1_adjusted)?;
        let k_old =
            SafeMath::mul(SafeMath::mul(reserve0, reserve1)?, SafeMath::mul(scale, scale)?)?;

        if k_new < k_old {
            return Err(DexError::InvalidK);
        }
        Ok(())
    }
}
