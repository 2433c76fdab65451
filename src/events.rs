//! Events emitted by the DEX contracts.
use odra::casper_types::U256;
use odra::prelude::*;

/// Tokens moved between holders. Mints come from the token's own address,
/// burns go to it.
#[odra::event]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

#[odra::event]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

#[odra::event]
pub struct PairCreated {
    pub token0: Address,
    pub token1: Address,
    pub pair: Address,
    pub pair_count: u32,
}

#[odra::event]
pub struct LiquidityAdded {
    pub provider: Address,
    pub pair: Address,
    pub amount0: U256,
    pub amount1: U256,
    pub liquidity: U256,
}

#[odra::event]
pub struct LiquidityRemoved {
    pub provider: Address,
    pub pair: Address,
    pub amount0: U256,
    pub amount1: U256,
    pub liquidity: U256,
}

#[odra::event]
pub struct Swap {
    pub sender: Address,
    pub pair: Address,
    pub amount0_in: U256,
    pub amount1_in: U256,
    pub amount0_out: U256,
    pub amount1_out: U256,
    pub to: Address,
}

/// Reserves committed by a pair.
#[odra::event]
pub struct Sync {
    pub pair: Address,
    pub reserve0: U256,
    pub reserve1: U256,
}

#[odra::event]
pub struct Deposit {
    pub dst: Address,
    pub amount: U256,
}

#[odra::event]
pub struct Withdrawal {
    pub src: Address,
    pub amount: U256,
}
