//! Error definitions for the DEX contracts
use odra::prelude::*;
use odra::ContractEnv;

/// Errors raised by ledgers, pairs, the factory and the router.
///
/// Entry points revert with these codes; the host discards everything the
/// call wrote before reverting.
#[odra::odra_error]
#[derive(Debug)]
pub enum DexError {
    /// Insufficient liquidity in the pool
    InsufficientLiquidity = 1,

    /// Insufficient input amount for swap
    InsufficientInputAmount = 2,

    /// Insufficient output amount for swap
    InsufficientOutputAmount = 3,

    /// Swap recipient is one of the pair tokens
    InvalidTo = 4,

    /// Pair already exists
    PairExists = 5,

    /// Pair does not exist
    PairNotFound = 6,

    /// Address could not be encoded into a pair key
    InvalidAddress = 7,

    /// Identical addresses provided
    IdenticalAddresses = 8,

    /// Zero amount passed to a quote
    InsufficientAmount = 9,

    /// Token A amount below the caller's minimum
    InsufficientAAmount = 10,

    /// Deadline expired
    Expired = 11,

    /// Token B amount below the caller's minimum
    InsufficientBAmount = 12,

    /// Overflow error
    Overflow = 13,

    /// Underflow error
    Underflow = 14,

    /// Division by zero
    DivisionByZero = 15,

    /// Unauthorized access
    Unauthorized = 16,

    /// Invalid path for swap
    InvalidPath = 17,

    /// K value invariant violated
    InvalidK = 18,

    /// Insufficient liquidity minted
    InsufficientLiquidityMinted = 19,

    /// Insufficient liquidity burned
    InsufficientLiquidityBurned = 20,

    /// Nested call into a pair that is already busy
    Reentrant = 21,

    /// Required input exceeds the caller's maximum
    ExcessiveInputAmount = 22,

    /// Holder balance too low
    InsufficientBalance = 60_001,

    /// Spender allowance too low
    InsufficientAllowance = 60_002,
}

/// Turns an internal `Result` into the value of an entry point, reverting the
/// whole call on error.
pub trait OrRevert<T> {
    fn or_revert(self, env: &ContractEnv) -> T;
}

impl<T> OrRevert<T> for Result<T, DexError> {
    fn or_revert(self, env: &ContractEnv) -> T {
        match self {
            Ok(value) => value,
            Err(error) => env.revert(error),
        }
    }
}
