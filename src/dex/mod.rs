//! DEX module containing all DEX-related contracts
//!
//! This module implements a constant-product AMM DEX with:
//! - Pair: Individual liquidity pools for token pairs
//! - Factory: Creates and owns pairs
//! - Router: User-facing contract for swaps and liquidity management

pub mod factory;
pub mod pair;
pub mod router;


pub use factory::{pair_key, sort_tokens, Factory};
pub use pair::{Pair, SwapCalleeContractRef};
pub use router::Router;
