//! Constant-product AMM contracts: liquidity pairs, a pair factory, a router
//! and a wrapped native token.
#![cfg_attr(target_arch = "wasm32", no_std)]

extern crate alloc;

#[cfg(not(target_arch = "wasm32"))]
pub mod deploy;
pub mod dex;
pub mod errors;
pub mod events;
pub mod math;
pub mod token;
pub mod tokens;

pub use errors::DexError;
