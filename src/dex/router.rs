//! Router contract for the DEX
//!
//! The Router is the main user-facing contract that provides:
//! - Adding/removing liquidity, with native asset variants
//! - Swapping tokens (exact input and exact output)
//! - Multi-hop swaps through multiple pairs
//! - Deadline protection
use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::dex::factory::{sort_tokens, FactoryContractRef};
use crate::dex::pair::PairContractRef;
use crate::errors::{DexError, OrRevert};
use crate::math::{from_native, to_native, AmmMath, SafeMath};
use crate::token::Cep18TokenContractRef;
use crate::tokens::wnative::WrappedNativeContractRef;

/// Router contract for user interactions
#[odra::module]
pub struct Router {
    /// Factory contract address
    factory: Var<Address>,
    /// Wrapped native token for native asset liquidity
    wnative: Var<Address>,
}

#[odra::module]
impl Router {
    /// Initialize the router with factory and wrapped native addresses
    pub fn init(&mut self, factory: Address, wnative: Address) {
        self.factory.set(factory);
        self.wnative.set(wnative);
    }

    /// Get the factory address
    pub fn factory(&self) -> Address {
        self.factory.get_or_revert_with(DexError::PairNotFound)
    }

    /// Get the wrapped native token address
    pub fn wnative(&self) -> Address {
        self.wnative.get_or_revert_with(DexError::InvalidAddress)
    }

    // ============ Liquidity Functions ============

    /// Add liquidity to a pair, creating it if needed.
    /// Returns (amount_a, amount_b, liquidity)
    pub fn add_liquidity(
        &mut self,
        token_a: Address,
        token_b: Address,
        amount_a_desired: U256,
        amount_b_desired: U256,
        amount_a_min: U256,
        amount_b_min: U256,
        to: Address,
        deadline: u64,
    ) -> (U256, U256, U256) {
        self.ensure_deadline(deadline).or_revert(&self.env());

        let pair = self.get_or_create_pair(token_a, token_b);
        let (amount_a, amount_b) = self
            .calculate_liquidity_amounts(
                token_a,
                token_b,
                amount_a_desired,
                amount_b_desired,
                amount_a_min,
                amount_b_min,
            )
            .or_revert(&self.env());

        // Transfer tokens to pair
        let caller = self.env().caller();
        self.pull(token_a, caller, pair, amount_a);
        self.pull(token_b, caller, pair, amount_b);

        let liquidity = PairContractRef::new(self.env(), pair).mint(to);
        (amount_a, amount_b, liquidity)
    }

    /// Add liquidity against the attached native amount; whatever the pair
    /// does not take is refunded.
    /// Returns (amount_token, amount_native, liquidity)
    #[odra(payable)]
    pub fn add_liquidity_native(
        &mut self,
        token: Address,
        amount_token_desired: U256,
        amount_token_min: U256,
        amount_native_min: U256,
        to: Address,
        deadline: u64,
    ) -> (U256, U256, U256) {
        self.ensure_deadline(deadline).or_revert(&self.env());

        let caller = self.env().caller();
        let value = from_native(self.env().attached_value()).or_revert(&self.env());
        let wnative = self.wnative();

        let pair = self.get_or_create_pair(token, wnative);
        let (amount_token, amount_native) = self
            .calculate_liquidity_amounts(
                token,
                wnative,
                amount_token_desired,
                value,
                amount_token_min,
                amount_native_min,
            )
            .or_revert(&self.env());

        self.pull(token, caller, pair, amount_token);
        let mut wnative_ref = WrappedNativeContractRef::new(self.env(), wnative);
        wnative_ref.with_tokens(to_native(amount_native)).deposit();
        wnative_ref.transfer(pair, amount_native);

        let liquidity = PairContractRef::new(self.env(), pair).mint(to);

        let refund = SafeMath::sub(value, amount_native).or_revert(&self.env());
        if !refund.is_zero() {
            self.env().transfer_tokens(&caller, &to_native(refund));
        }
        (amount_token, amount_native, liquidity)
    }

    /// Remove liquidity from a pair
    /// Returns (amount_a, amount_b)
    pub fn remove_liquidity(
        &mut self,
        token_a: Address,
        token_b: Address,
        liquidity: U256,
        amount_a_min: U256,
        amount_b_min: U256,
        to: Address,
        deadline: u64,
    ) -> (U256, U256) {
        self.remove_liquidity_to(
            token_a,
            token_b,
            liquidity,
            amount_a_min,
            amount_b_min,
            to,
            deadline,
        )
        .or_revert(&self.env())
    }

    /// Remove liquidity from a token/native pair and unwrap the native side.
    /// Returns (amount_token, amount_native)
    pub fn remove_liquidity_native(
        &mut self,
        token: Address,
        liquidity: U256,
        amount_token_min: U256,
        amount_native_min: U256,
        to: Address,
        deadline: u64,
    ) -> (U256, U256) {
        let router = self.env().self_address();
        let wnative = self.wnative();
        let (amount_token, amount_native) = self
            .remove_liquidity_to(
                token,
                wnative,
                liquidity,
                amount_token_min,
                amount_native_min,
                router,
                deadline,
            )
            .or_revert(&self.env());

        Cep18TokenContractRef::new(self.env(), token).transfer(to, amount_token);
        WrappedNativeContractRef::new(self.env(), wnative).withdraw(amount_native);
        self.env().transfer_tokens(&to, &to_native(amount_native));

        (amount_token, amount_native)
    }

    // ============ Swap Functions ============

    /// Swap exact input amount for output tokens
    /// path is an array of token addresses representing the swap route
    pub fn swap_exact_tokens_for_tokens(
        &mut self,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<U256> {
        self.ensure_deadline(deadline).or_revert(&self.env());

        let amounts = self.amounts_out(amount_in, &path).or_revert(&self.env());
        if amounts[amounts.len() - 1] < amount_out_min {
            self.env().revert(DexError::InsufficientOutputAmount);
        }

        // Transfer input tokens to first pair
        let pair = self.get_pair(path[0], path[1]).or_revert(&self.env());
        let caller = self.env().caller();
        self.pull(path[0], caller, pair, amounts[0]);

        self.execute_swap(&amounts, &path, to).or_revert(&self.env());
        amounts
    }

    /// Swap tokens for exact output amount
    pub fn swap_tokens_for_exact_tokens(
        &mut self,
        amount_out: U256,
        amount_in_max: U256,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<U256> {
        self.ensure_deadline(deadline).or_revert(&self.env());

        let amounts = self.amounts_in(amount_out, &path).or_revert(&self.env());
        if amounts[0] > amount_in_max {
            self.env().revert(DexError::ExcessiveInputAmount);
        }

        let pair = self.get_pair(path[0], path[1]).or_revert(&self.env());
        let caller = self.env().caller();
        self.pull(path[0], caller, pair, amounts[0]);

        self.execute_swap(&amounts, &path, to).or_revert(&self.env());
        amounts
    }

    // ============ Quote Functions ============

    /// Quote the amount of token B for a given amount of token A
    pub fn quote(&self, amount_a: U256, reserve_a: U256, reserve_b: U256) -> U256 {
        AmmMath::quote(amount_a, reserve_a, reserve_b).or_revert(&self.env())
    }

    /// Get the output amount for a given input amount
    pub fn get_amount_out(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> U256 {
        AmmMath::get_amount_out(amount_in, reserve_in, reserve_out).or_revert(&self.env())
    }

    /// Get the input amount required for a given output amount
    pub fn get_amount_in(&self, amount_out: U256, reserve_in: U256, reserve_out: U256) -> U256 {
        AmmMath::get_amount_in(amount_out, reserve_in, reserve_out).or_revert(&self.env())
    }

    /// Get output amounts for a swap path
    pub fn get_amounts_out(&self, amount_in: U256, path: Vec<Address>) -> Vec<U256> {
        self.amounts_out(amount_in, &path).or_revert(&self.env())
    }

    /// Get input amounts for a swap path
    pub fn get_amounts_in(&self, amount_out: U256, path: Vec<Address>) -> Vec<U256> {
        self.amounts_in(amount_out, &path).or_revert(&self.env())
    }

    /// Get reserves for a token pair, ordered as (token_a, token_b)
    pub fn get_reserves(&self, token_a: Address, token_b: Address) -> (U256, U256) {
        self.reserves(token_a, token_b).or_revert(&self.env())
    }
}

impl Router {
    /// Ensure the deadline has not passed
    fn ensure_deadline(&self, deadline: u64) -> Result<(), DexError> {
        if self.env().get_block_time() > deadline {
            return Err(DexError::Expired);
        }
        Ok(())
    }

    fn get_pair(&self, token_a: Address, token_b: Address) -> Result<Address, DexError> {
        FactoryContractRef::new(self.env(), self.factory())
            .get_pair(token_a, token_b)
            .ok_or(DexError::PairNotFound)
    }

    fn get_or_create_pair(&mut self, token_a: Address, token_b: Address) -> Address {
        let mut factory = FactoryContractRef::new(self.env(), self.factory());
        match factory.get_pair(token_a, token_b) {
            Some(pair) => pair,
            None => factory.create_pair(token_a, token_b),
        }
    }

    fn reserves(&self, token_a: Address, token_b: Address) -> Result<(U256, U256), DexError> {
        let pair = self.get_pair(token_a, token_b)?;
        let (reserve0, reserve1, _) = PairContractRef::new(self.env(), pair).get_reserves();

        let (token0, _) = sort_tokens(token_a, token_b);
        if token_a == token0 {
            Ok((reserve0, reserve1))
        } else {
            Ok((reserve1, reserve0))
        }
    }

    fn amounts_out(&self, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, DexError> {
        if path.len() < 2 {
            return Err(DexError::InvalidPath);
        }

        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in);

        for i in 0..path.len() - 1 {
            let (reserve_in, reserve_out) = self.reserves(path[i], path[i + 1])?;
            let amount_out = AmmMath::get_amount_out(amounts[i], reserve_in, reserve_out)?;
            amounts.push(amount_out);
        }

        Ok(amounts)
    }

    fn amounts_in(&self, amount_out: U256, path: &[Address]) -> Result<Vec<U256>, DexError> {
        if path.len() < 2 {
            return Err(DexError::InvalidPath);
        }

        let mut amounts = vec![U256::zero(); path.len()];
        amounts[path.len() - 1] = amount_out;

        for i in (0..path.len() - 1).rev() {
            let (reserve_in, reserve_out) = self.reserves(path[i], path[i + 1])?;
            amounts[i] = AmmMath::get_amount_in(amounts[i + 1], reserve_in, reserve_out)?;
        }

        Ok(amounts)
    }

    /// Calculate optimal liquidity amounts
    fn calculate_liquidity_amounts(
        &self,
        token_a: Address,
        token_b: Address,
        amount_a_desired: U256,
        amount_b_desired: U256,
        amount_a_min: U256,
        amount_b_min: U256,
    ) -> Result<(U256, U256), DexError> {
        let (reserve_a, reserve_b) = self.reserves(token_a, token_b)?;
        if reserve_a.is_zero() && reserve_b.is_zero() {
            // First liquidity provision - use desired amounts
            return Ok((amount_a_desired, amount_b_desired));
        }

        let amount_b_optimal = AmmMath::quote(amount_a_desired, reserve_a, reserve_b)?;
        if amount_b_optimal <= amount_b_desired {
            if amount_b_optimal < amount_b_min {
                return Err(DexError::InsufficientBAmount);
            }
            return Ok((amount_a_desired, amount_b_optimal));
        }

        let amount_a_optimal = AmmMath::quote(amount_b_desired, reserve_b, reserve_a)?;
        if amount_a_optimal > amount_a_desired || amount_a_optimal < amount_a_min {
            return Err(DexError::InsufficientAAmount);
        }
        Ok((amount_a_optimal, amount_b_desired))
    }

    /// Pull LP tokens into the pair, burn them and check the minimums.
    /// Amounts come back in the order the caller named the tokens.
    fn remove_liquidity_to(
        &mut self,
        token_a: Address,
        token_b: Address,
        liquidity: U256,
        amount_a_min: U256,
        amount_b_min: U256,
        to: Address,
        deadline: u64,
    ) -> Result<(U256, U256), DexError> {
        self.ensure_deadline(deadline)?;

        let pair = self.get_pair(token_a, token_b)?;
        let caller = self.env().caller();

        let mut pair_ref = PairContractRef::new(self.env(), pair);
        pair_ref.transfer_from(caller, pair, liquidity);
        let (amount0, amount1) = pair_ref.burn(to);

        let (token0, _) = sort_tokens(token_a, token_b);
        let (amount_a, amount_b) = if token_a == token0 {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };

        if amount_a < amount_a_min {
            return Err(DexError::InsufficientAAmount);
        }
        if amount_b < amount_b_min {
            return Err(DexError::InsufficientBAmount);
        }

        Ok((amount_a, amount_b))
    }

    /// Execute a multi-hop swap. The input for the first hop is already in
    /// the first pair; each hop sends its output to the next pair.
    fn execute_swap(
        &mut self,
        amounts: &[U256],
        path: &[Address],
        to: Address,
    ) -> Result<(), DexError> {
        for i in 0..path.len() - 1 {
            let (input, output) = (path[i], path[i + 1]);
            let (token0, _) = sort_tokens(input, output);
            let amount_out = amounts[i + 1];

            let (amount0_out, amount1_out) = if input == token0 {
                (U256::zero(), amount_out)
            } else {
                (amount_out, U256::zero())
            };

            let recipient = if i < path.len() - 2 {
                self.get_pair(output, path[i + 2])?
            } else {
                to
            };

            let pair = self.get_pair(input, output)?;
            tracing::debug!(?pair, ?input, ?output, %amount_out, "router hop");
            PairContractRef::new(self.env(), pair).swap(
                amount0_out,
                amount1_out,
                recipient,
                Vec::new(),
            );
        }

        Ok(())
    }

    /// Move `amount` of `token` from `from` to `to` using the allowance
    /// `from` granted to the router.
    fn pull(&self, token: Address, from: Address, to: Address, amount: U256) {
        Cep18TokenContractRef::new(self.env(), token).transfer_from(from, to, amount);
    }
}
