//! Liquidity Pair contract for the DEX
//!
//! Each Pair holds reserves of two tokens and allows:
//! - Adding liquidity (minting LP tokens)
//! - Removing liquidity (burning LP tokens)
//! - Swapping tokens, optionally as a flash swap
//!
//! All three follow push-then-act: the caller moves tokens into the pair
//! first, and the pair accounts only for the balance it observes.
use odra::casper_types::U256;
use odra::prelude::*;
use odra::ContractRef;

use crate::errors::{DexError, OrRevert};
use crate::events::{LiquidityAdded, LiquidityRemoved, Swap, Sync};
use crate::math::{max_reserve, q112, AmmMath, SafeMath, MINIMUM_LIQUIDITY, PRICE_PRECISION};
use crate::token::{Cep18TokenContractRef, Ledger};

pub const LP_NAME: &str = "AMM LP Token";
pub const LP_SYMBOL: &str = "AMM-LP";
pub const LP_DECIMALS: u8 = 18;

/// Receiver of a flash swap.
///
/// Called on the swap recipient after the pair has sent the requested outputs
/// and before it checks the invariant, so it may repay with either token. The
/// pair stays locked while the callee runs; other pairs do not.
#[odra::external_contract]
pub trait SwapCallee {
    fn on_swap(&mut self, sender: Address, amount0_out: U256, amount1_out: U256, data: Vec<u8>);
}

/// Liquidity Pair contract
#[odra::module(factory = on)]
pub struct Pair {
    /// LP token for this pair; shares the pair's address
    lp_token: SubModule<Ledger>,
    /// Address of token0
    token0: Var<Address>,
    /// Address of token1
    token1: Var<Address>,
    /// Reserve of token0
    reserve0: Var<U256>,
    /// Reserve of token1
    reserve1: Var<U256>,
    /// Block timestamp of last update
    block_timestamp_last: Var<u64>,
    /// Cumulative price of token0, UQ112.112 per time unit
    price0_cumulative_last: Var<U256>,
    /// Cumulative price of token1, UQ112.112 per time unit
    price1_cumulative_last: Var<U256>,
    /// Factory address
    factory: Var<Address>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module(factory = on)]
impl Pair {
    /// Initialize the pair with two token addresses. Tokens are stored sorted.
    pub fn init(&mut self, token0: Address, token1: Address, factory: Address) {
        let (t0, t1) = if token0 < token1 {
            (token0, token1)
        } else {
            (token1, token0)
        };

        self.token0.set(t0);
        self.token1.set(t1);
        self.factory.set(factory);
        self.reserve0.set(U256::zero());
        self.reserve1.set(U256::zero());
        self.locked.set(false);
    }

    pub fn token0(&self) -> Address {
        self.token0.get_or_revert_with(DexError::PairNotFound)
    }

    pub fn token1(&self) -> Address {
        self.token1.get_or_revert_with(DexError::PairNotFound)
    }

    pub fn factory(&self) -> Address {
        self.factory.get_or_revert_with(DexError::PairNotFound)
    }

    /// Get current reserves and the time they were last committed
    pub fn get_reserves(&self) -> (U256, U256, u64) {
        (
            self.reserve0.get_or_default(),
            self.reserve1.get_or_default(),
            self.block_timestamp_last.get_or_default(),
        )
    }

    pub fn price0_cumulative_last(&self) -> U256 {
        self.price0_cumulative_last.get_or_default()
    }

    pub fn price1_cumulative_last(&self) -> U256 {
        self.price1_cumulative_last.get_or_default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get_or_default()
    }

    // ============ LP Token ============

    pub fn name(&self) -> String {
        LP_NAME.to_string()
    }

    pub fn symbol(&self) -> String {
        LP_SYMBOL.to_string()
    }

    pub fn decimals(&self) -> u8 {
        LP_DECIMALS
    }

    pub fn total_supply(&self) -> U256 {
        self.lp_token.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.lp_token.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.lp_token.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        self.lp_token.transfer(caller, to, amount).or_revert(&self.env());
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        let caller = self.env().caller();
        self.lp_token.approve(caller, spender, amount);
    }

    pub fn transfer_from(&mut self, owner: Address, to: Address, amount: U256) {
        let caller = self.env().caller();
        self.lp_token
            .transfer_from(caller, owner, to, amount)
            .or_revert(&self.env());
    }

    // ============ Core ============

    /// Mint LP tokens for the tokens pushed in since the last update.
    /// Returns the amount of LP tokens minted to `to`.
    pub fn mint(&mut self, to: Address) -> U256 {
        self.non_reentrant(|pair| pair.mint_unlocked(to))
    }

    /// Burn the LP tokens pushed into the pair.
    /// Returns the amounts of token0 and token1 sent to `to`.
    pub fn burn(&mut self, to: Address) -> (U256, U256) {
        self.non_reentrant(|pair| pair.burn_unlocked(to))
    }

    /// Send out `amount0_out`/`amount1_out` and verify the pushed input pays
    /// for it. Non-empty `data` makes it a flash swap: `to` is called back
    /// through [`SwapCallee`] before the check.
    pub fn swap(&mut self, amount0_out: U256, amount1_out: U256, to: Address, data: Vec<u8>) {
        self.non_reentrant(|pair| pair.swap_unlocked(amount0_out, amount1_out, to, data))
    }

    /// Send balances above the reserves to `to`.
    pub fn skim(&mut self, to: Address) {
        self.non_reentrant(|pair| {
            let (token0, token1) = (pair.token0(), pair.token1());
            let (reserve0, reserve1, _) = pair.get_reserves();
            let balance0 = pair.token_balance(token0);
            let balance1 = pair.token_balance(token1);

            if balance0 > reserve0 {
                pair.send_token(token0, to, balance0 - reserve0);
            }
            if balance1 > reserve1 {
                pair.send_token(token1, to, balance1 - reserve1);
            }
            Ok(())
        })
    }

    /// Force reserves to match balances.
    pub fn sync(&mut self) {
        self.non_reentrant(|pair| {
            let balance0 = pair.token_balance(pair.token0());
            let balance1 = pair.token_balance(pair.token1());
            pair.update_reserves(balance0, balance1)
        })
    }

    /// Get the price of token0 in terms of token1
    pub fn get_price0(&self) -> U256 {
        let (reserve0, reserve1, _) = self.get_reserves();
        Self::spot_price(reserve1, reserve0).or_revert(&self.env())
    }

    /// Get the price of token1 in terms of token0
    pub fn get_price1(&self) -> U256 {
        let (reserve0, reserve1, _) = self.get_reserves();
        Self::spot_price(reserve0, reserve1).or_revert(&self.env())
    }
}

impl Pair {
    /// Runs `op` with the pair locked. The lock is released on return, and a
    /// failed `op` reverts the whole call.
    fn non_reentrant<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, DexError>) -> T {
        if self.locked.get_or_default() {
            self.env().revert(DexError::Reentrant);
        }
        self.locked.set(true);
        let result = op(self);
        self.locked.set(false);
        result.or_revert(&self.env())
    }

    fn mint_unlocked(&mut self, to: Address) -> Result<U256, DexError> {
        let (reserve0, reserve1, _) = self.get_reserves();
        let balance0 = self.token_balance(self.token0());
        let balance1 = self.token_balance(self.token1());
        Self::ensure_within_bounds(balance0, balance1)?;

        let amount0 = SafeMath::sub(balance0, reserve0)?;
        let amount1 = SafeMath::sub(balance1, reserve1)?;

        let total_supply = self.total_supply();
        let liquidity =
            AmmMath::calculate_liquidity(amount0, amount1, reserve0, reserve1, total_supply)?;
        if liquidity.is_zero() {
            return Err(DexError::InsufficientLiquidityMinted);
        }

        let pair = self.env().self_address();
        if total_supply.is_zero() {
            // permanently lock MINIMUM_LIQUIDITY in the pair's own custody
            self.lp_token.mint(pair, U256::from(MINIMUM_LIQUIDITY))?;
        }
        self.lp_token.mint(to, liquidity)?;
        self.update_reserves(balance0, balance1)?;

        tracing::debug!(?pair, %amount0, %amount1, %liquidity, "mint");
        self.env().emit_event(LiquidityAdded {
            provider: to,
            pair,
            amount0,
            amount1,
            liquidity,
        });
        Ok(liquidity)
    }

    fn burn_unlocked(&mut self, to: Address) -> Result<(U256, U256), DexError> {
        let (token0, token1) = (self.token0(), self.token1());
        let pair = self.env().self_address();
        let balance0 = self.token_balance(token0);
        let balance1 = self.token_balance(token1);

        let total_supply = self.total_supply();
        if total_supply.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }
        // the locked minimum stays behind
        let liquidity = self
            .balance_of(pair)
            .saturating_sub(U256::from(MINIMUM_LIQUIDITY));

        let (amount0, amount1) =
            AmmMath::calculate_burn_amounts(liquidity, balance0, balance1, total_supply)?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }

        self.lp_token.burn(pair, liquidity)?;
        self.send_token(token0, to, amount0);
        self.send_token(token1, to, amount1);

        let balance0 = self.token_balance(token0);
        let balance1 = self.token_balance(token1);
        self.update_reserves(balance0, balance1)?;

        tracing::debug!(?pair, %amount0, %amount1, %liquidity, "burn");
        self.env().emit_event(LiquidityRemoved {
            provider: to,
            pair,
            amount0,
            amount1,
            liquidity,
        });
        Ok((amount0, amount1))
    }

    fn swap_unlocked(
        &mut self,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
        data: Vec<u8>,
    ) -> Result<(), DexError> {
        let (reserve0, reserve1, _) = self.get_reserves();
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        if amount0_out >= reserve0 || amount1_out >= reserve1 {
            return Err(DexError::InsufficientLiquidity);
        }

        let (token0, token1) = (self.token0(), self.token1());
        if to == token0 || to == token1 {
            return Err(DexError::InvalidTo);
        }

        // optimistic transfer; a failed check below reverts it with the call
        if !amount0_out.is_zero() {
            self.send_token(token0, to, amount0_out);
        }
        if !amount1_out.is_zero() {
            self.send_token(token1, to, amount1_out);
        }
        let sender = self.env().caller();
        if !data.is_empty() {
            SwapCalleeContractRef::new(self.env(), to).on_swap(
                sender,
                amount0_out,
                amount1_out,
                data,
            );
        }

        let balance0 = self.token_balance(token0);
        let balance1 = self.token_balance(token1);

        // outputs are strictly below the reserves
        let amount0_in = balance0.saturating_sub(reserve0 - amount0_out);
        let amount1_in = balance1.saturating_sub(reserve1 - amount1_out);

        AmmMath::check_k(balance0, balance1, amount0_in, amount1_in, reserve0, reserve1)?;
        self.update_reserves(balance0, balance1)?;

        let pair = self.env().self_address();
        tracing::debug!(?pair, %amount0_in, %amount1_in, %amount0_out, %amount1_out, "swap");
        self.env().emit_event(Swap {
            sender,
            pair,
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
            to,
        });
        Ok(())
    }

    fn ensure_within_bounds(balance0: U256, balance1: U256) -> Result<(), DexError> {
        let max = max_reserve();
        if balance0 > max || balance1 > max {
            return Err(DexError::Overflow);
        }
        Ok(())
    }

    /// Commit balances as the new reserves and advance the price accumulators.
    fn update_reserves(&mut self, balance0: U256, balance1: U256) -> Result<(), DexError> {
        Self::ensure_within_bounds(balance0, balance1)?;

        let (reserve0, reserve1, last) = self.get_reserves();
        let now = self.env().get_block_time();
        let elapsed = now.saturating_sub(last);
        if elapsed > 0 && !reserve0.is_zero() && !reserve1.is_zero() {
            // accumulators wrap; only differences between readings are meaningful
            let elapsed = U256::from(elapsed);
            let price0 = reserve1 * q112() / reserve0;
            let price1 = reserve0 * q112() / reserve1;
            let cumulative0 = self
                .price0_cumulative_last()
                .overflowing_add(price0.overflowing_mul(elapsed).0)
                .0;
            let cumulative1 = self
                .price1_cumulative_last()
                .overflowing_add(price1.overflowing_mul(elapsed).0)
                .0;
            self.price0_cumulative_last.set(cumulative0);
            self.price1_cumulative_last.set(cumulative1);
        }

        self.reserve0.set(balance0);
        self.reserve1.set(balance1);
        self.block_timestamp_last.set(now);

        self.env().emit_event(Sync {
            pair: self.env().self_address(),
            reserve0: balance0,
            reserve1: balance1,
        });
        Ok(())
    }

    fn spot_price(numerator: U256, denominator: U256) -> Result<U256, DexError> {
        if denominator.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        SafeMath::div(
            SafeMath::mul(numerator, U256::from(PRICE_PRECISION))?,
            denominator,
        )
    }

    /// Get token balance of this contract
    fn token_balance(&self, token: Address) -> U256 {
        let token_ref = Cep18TokenContractRef::new(self.env(), token);
        token_ref.balance_of(self.env().self_address())
    }

    fn send_token(&self, token: Address, to: Address, amount: U256) {
        let mut token_ref = Cep18TokenContractRef::new(self.env(), token);
        token_ref.transfer(to, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Cep18Token, Cep18TokenHostRef};
    use crate::tokens::{USDCP, USDTP};
    use odra::host::{Deployer, HostEnv, HostRef};

    struct Setup {
        env: HostEnv,
        token0: Cep18TokenHostRef,
        token1: Cep18TokenHostRef,
        pair: PairHostRef,
        minter: Address,
        alice: Address,
        bob: Address,
    }

    fn units(amount: u128) -> U256 {
        U256::from(amount) * U256::from(1_000_000u64)
    }

    fn setup() -> Setup {
        let env = odra_test::env();
        let minter = env.get_account(0);
        env.set_caller(minter);

        let usdc = Cep18Token::deploy(&env, USDCP.init_args(minter));
        let usdt = Cep18Token::deploy(&env, USDTP.init_args(minter));
        let init_args = PairInitArgs {
            token0: usdc.address().clone(),
            token1: usdt.address().clone(),
            factory: env.get_account(9),
        };
        let pair = Pair::deploy(&env, init_args);

        let (token0, token1) = if pair.token0() == usdc.address().clone() {
            (usdc, usdt)
        } else {
            (usdt, usdc)
        };
        Setup {
            token0,
            token1,
            pair,
            minter,
            alice: env.get_account(1),
            bob: env.get_account(2),
            env,
        }
    }

    impl Setup {
        fn pair_address(&self) -> Address {
            self.pair.address().clone()
        }

        fn push(&mut self, amount0: U256, amount1: U256) {
            let pair = self.pair_address();
            self.env.set_caller(self.minter);
            if !amount0.is_zero() {
                self.token0.mint(pair, amount0);
            }
            if !amount1.is_zero() {
                self.token1.mint(pair, amount1);
            }
        }

        fn add_liquidity(&mut self, amount0: U256, amount1: U256) -> U256 {
            self.push(amount0, amount1);
            self.env.set_caller(self.alice);
            self.pair.mint(self.alice)
        }

        fn pair_balances(&self) -> (U256, U256) {
            let pair = self.pair_address();
            (self.token0.balance_of(pair), self.token1.balance_of(pair))
        }
    }

    #[test]
    fn test_pair_init() {
        let s = setup();
        assert!(s.pair.token0() < s.pair.token1());
        assert_eq!(s.pair.factory(), s.env.get_account(9));
        assert_eq!(s.pair.symbol(), LP_SYMBOL);
        assert!(!s.pair.is_locked());

        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert!(reserve0.is_zero());
        assert!(reserve1.is_zero());
    }

    #[test]
    fn test_first_mint_locks_minimum_liquidity() {
        let mut s = setup();
        let amount = units(100_000);
        let liquidity = s.add_liquidity(amount, amount);

        let expected = AmmMath::sqrt(amount * amount) - U256::from(MINIMUM_LIQUIDITY);
        let pair = s.pair_address();
        assert_eq!(liquidity, expected);
        assert_eq!(s.pair.balance_of(s.alice), expected);
        assert_eq!(s.pair.balance_of(pair), U256::from(MINIMUM_LIQUIDITY));
        assert_eq!(s.pair.total_supply(), AmmMath::sqrt(amount * amount));

        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert_eq!((reserve0, reserve1), (amount, amount));
        assert!(!s.pair.is_locked());
    }

    #[test]
    fn test_first_mint_below_minimum_fails() {
        let mut s = setup();
        s.push(U256::from(1_000u64), U256::from(1_000u64));

        s.env.set_caller(s.alice);
        let result = s.pair.try_mint(s.alice);
        assert_eq!(result, Err(DexError::InsufficientLiquidityMinted.into()));
        assert!(s.pair.total_supply().is_zero());
        assert!(s.pair.balance_of(s.alice).is_zero());
        assert!(s.pair.get_reserves().0.is_zero());
        assert_eq!(s.pair_balances(), (U256::from(1_000u64), U256::from(1_000u64)));

        // the failed call left the pair unlocked
        let liquidity = s.add_liquidity(U256::from(1_000u64), U256::from(1_000u64));
        assert_eq!(liquidity, U256::from(1_000u64));
    }

    #[test]
    fn test_proportional_mint_uses_smaller_ratio() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(4_000));
        let supply = s.pair.total_supply();

        // 10% of reserve0 but 20% of reserve1
        let minted = s.add_liquidity(units(100), units(800));
        assert_eq!(minted, units(100) * supply / units(1_000));
    }

    #[test]
    fn test_burn_returns_proportional_amounts() {
        let mut s = setup();
        let liquidity = s.add_liquidity(units(1_000), units(4_000));
        let pair = s.pair_address();
        s.pair.transfer(pair, liquidity);

        let (amount0, amount1) = s.pair.burn(s.bob);

        let supply = liquidity + U256::from(MINIMUM_LIQUIDITY);
        assert_eq!(amount0, liquidity * units(1_000) / supply);
        assert_eq!(amount1, liquidity * units(4_000) / supply);
        assert_eq!(s.token0.balance_of(s.bob), amount0);
        assert_eq!(s.token1.balance_of(s.bob), amount1);

        // only the locked minimum is left
        assert_eq!(s.pair.total_supply(), U256::from(MINIMUM_LIQUIDITY));
        assert_eq!(s.pair.balance_of(pair), U256::from(MINIMUM_LIQUIDITY));
        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert_eq!(reserve0, units(1_000) - amount0);
        assert_eq!(reserve1, units(4_000) - amount1);
    }

    #[test]
    fn test_burn_without_pushed_liquidity_fails() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));

        let result = s.pair.try_burn(s.alice);
        assert_eq!(result, Err(DexError::InsufficientLiquidityBurned.into()));
        assert_eq!(s.pair.balance_of(s.pair_address()), U256::from(MINIMUM_LIQUIDITY));
        assert!(s.token0.balance_of(s.alice).is_zero());
        assert!(s.token1.balance_of(s.alice).is_zero());
        assert_eq!(s.pair_balances(), (units(1_000), units(1_000)));
    }

    #[test]
    fn test_swap_token0_for_token1() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));
        let amount_in = units(10);
        let amount_out = AmmMath::get_amount_out(amount_in, units(1_000), units(1_000)).unwrap();

        s.push(amount_in, U256::zero());
        s.env.set_caller(s.alice);
        s.pair.swap(U256::zero(), amount_out, s.bob, Vec::new());

        assert_eq!(s.token1.balance_of(s.bob), amount_out);
        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert_eq!(reserve0, units(1_010));
        assert_eq!(reserve1, units(1_000) - amount_out);
        assert!(reserve0 * reserve1 >= units(1_000) * units(1_000));
    }

    #[test]
    fn test_swap_rejects_k_violation() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));
        let amount_in = units(10);
        let amount_out = AmmMath::get_amount_out(amount_in, units(1_000), units(1_000)).unwrap();

        s.push(amount_in, U256::zero());
        s.env.set_caller(s.alice);
        let result = s
            .pair
            .try_swap(U256::zero(), amount_out + U256::one(), s.bob, Vec::new());

        assert_eq!(result, Err(DexError::InvalidK.into()));
        assert!(!s.pair.is_locked());
        assert!(s.token1.balance_of(s.bob).is_zero());
        assert_eq!(s.pair_balances(), (units(1_010), units(1_000)));
        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert_eq!((reserve0, reserve1), (units(1_000), units(1_000)));
    }

    #[test]
    fn test_unpaid_swap_sends_nothing() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));

        // the output is sent before the invariant check fails
        s.env.set_caller(s.bob);
        let result = s.pair.try_swap(U256::zero(), units(10), s.bob, Vec::new());

        assert_eq!(result, Err(DexError::InvalidK.into()));
        assert!(s.token1.balance_of(s.bob).is_zero());
        assert_eq!(s.pair_balances(), (units(1_000), units(1_000)));
        assert!(!s.pair.is_locked());
    }

    #[test]
    fn test_swap_output_bounds() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));
        s.env.set_caller(s.bob);

        let none = s.pair.try_swap(U256::zero(), U256::zero(), s.bob, Vec::new());
        assert_eq!(none, Err(DexError::InsufficientLiquidity.into()));

        let drain = s.pair.try_swap(units(1_000), U256::zero(), s.bob, Vec::new());
        assert_eq!(drain, Err(DexError::InsufficientLiquidity.into()));

        let token0 = s.token0.address().clone();
        let to_token = s.pair.try_swap(U256::one(), U256::zero(), token0, Vec::new());
        assert_eq!(to_token, Err(DexError::InvalidTo.into()));

        assert!(s.token0.balance_of(s.bob).is_zero());
        assert!(s.token0.balance_of(token0).is_zero());
        assert_eq!(s.pair_balances(), (units(1_000), units(1_000)));
    }

    #[test]
    fn test_sync_reserve_boundary() {
        let mut s = setup();
        let max = max_reserve();
        s.push(max, max);
        s.pair.sync();
        assert_eq!(s.pair.get_reserves().0, max);

        s.push(U256::one(), U256::zero());
        assert_eq!(s.pair.try_sync(), Err(DexError::Overflow.into()));
        let (reserve0, reserve1, _) = s.pair.get_reserves();
        assert_eq!((reserve0, reserve1), (max, max));
    }

    #[test]
    fn test_price_accumulators_advance_with_time() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(2_000));
        assert!(s.pair.price0_cumulative_last().is_zero());
        let (_, _, before) = s.pair.get_reserves();

        s.env.advance_block_time(10_000);
        s.pair.sync();
        let (_, _, after) = s.pair.get_reserves();
        let elapsed = U256::from(after - before);
        assert!(!elapsed.is_zero());

        // price0 = 2.0 and price1 = 0.5 in UQ112.112
        assert_eq!(s.pair.price0_cumulative_last(), q112() * U256::from(2u64) * elapsed);
        assert_eq!(s.pair.price1_cumulative_last(), q112() / U256::from(2u64) * elapsed);
    }

    #[test]
    fn test_skim_and_sync() {
        let mut s = setup();
        s.add_liquidity(units(1_000), units(1_000));
        s.push(units(5), U256::zero());

        s.pair.skim(s.bob);
        assert_eq!(s.token0.balance_of(s.bob), units(5));
        assert_eq!(s.pair_balances(), (units(1_000), units(1_000)));

        s.push(units(7), U256::zero());
        s.pair.sync();
        assert_eq!(s.pair.get_reserves().0, units(1_007));
    }

    #[test]
    fn test_prices() {
        let mut s = setup();
        assert_eq!(
            s.pair.try_get_price0(),
            Err(DexError::InsufficientLiquidity.into())
        );
        s.add_liquidity(units(1_000), units(2_000));
        assert_eq!(s.pair.get_price0(), U256::from(2 * PRICE_PRECISION));
        assert_eq!(s.pair.get_price1(), U256::from(PRICE_PRECISION / 2));
    }
}
