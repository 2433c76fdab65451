//! Wrapped native asset.
//!
//! Holding the native asset in custody lets it trade through pairs like any
//! other token. Total supply always equals the native balance held at the
//! token's address.
use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::OrRevert;
use crate::events::{Deposit, Withdrawal};
use crate::math::{from_native, to_native};
use crate::token::Ledger;

pub const NAME: &str = "Wrapped Native";
pub const SYMBOL: &str = "WNATIVE";
pub const DECIMALS: u8 = 18;

/// Token with no minter: supply only changes through `deposit` and
/// `withdraw`.
#[odra::module]
pub struct WrappedNative {
    ledger: SubModule<Ledger>,
}

#[odra::module]
impl WrappedNative {
    pub fn name(&self) -> String {
        NAME.to_string()
    }

    pub fn symbol(&self) -> String {
        SYMBOL.to_string()
    }

    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.ledger.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        self.ledger.transfer(caller, to, amount).or_revert(&self.env());
    }

    pub fn approve(&mut self, spender: Address, amount: U256) {
        let caller = self.env().caller();
        self.ledger.approve(caller, spender, amount);
    }

    pub fn transfer_from(&mut self, owner: Address, to: Address, amount: U256) {
        let caller = self.env().caller();
        self.ledger
            .transfer_from(caller, owner, to, amount)
            .or_revert(&self.env());
    }

    /// Wrap the attached native amount for the caller.
    #[odra(payable)]
    pub fn deposit(&mut self) {
        let owner = self.env().caller();
        let amount = from_native(self.env().attached_value()).or_revert(&self.env());
        self.ledger.mint(owner, amount).or_revert(&self.env());

        tracing::debug!(?owner, %amount, "wrap");
        self.env().emit_event(Deposit { dst: owner, amount });
    }

    /// Unwrap `amount`, returning native balance to the caller.
    pub fn withdraw(&mut self, amount: U256) {
        let owner = self.env().caller();
        self.ledger.burn(owner, amount).or_revert(&self.env());
        self.env().transfer_tokens(&owner, &to_native(amount));

        tracing::debug!(?owner, %amount, "unwrap");
        self.env().emit_event(Withdrawal { src: owner, amount });
    }
}
