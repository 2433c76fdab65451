//! Balance ledgers and CEP-18 style tokens.
//!
//! - [`Ledger`]: holder balances, allowances and total supply, embedded by
//!   every token and by each pair for its LP share
//! - [`Cep18Token`]: a deployable ledger with metadata and a privileged minter
//!
//! Pairs talk to tokens only through `Cep18TokenContractRef`, so any contract
//! exposing the same `balance_of`/`transfer` entry points can be traded.
use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::{DexError, OrRevert};
use crate::events::{Approval, Transfer};
use crate::math::SafeMath;

/// Holder -> amount bookkeeping with allowances.
///
/// Every operation checks all of its preconditions before writing, so the
/// sum of all balances always equals `total_supply`.
#[odra::module]
pub struct Ledger {
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl Ledger {
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }
}

impl Ledger {
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), DexError> {
        if self.balance_of(from) < amount {
            return Err(DexError::InsufficientBalance);
        }
        self.move_balance(from, to, amount);
        Ok(())
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), DexError> {
        let current_allowance = self.allowance(from, spender);
        if current_allowance < amount {
            return Err(DexError::InsufficientAllowance);
        }
        if self.balance_of(from) < amount {
            return Err(DexError::InsufficientBalance);
        }

        self.approve(from, spender, current_allowance - amount);
        self.move_balance(from, to, amount);
        Ok(())
    }

    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), DexError> {
        let new_supply = SafeMath::add(self.total_supply(), amount)?;
        self.total_supply.set(new_supply);
        // bounded by the new supply
        let balance = self.balance_of(to) + amount;
        self.balances.set(&to, balance);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
        Ok(())
    }

    pub fn burn(&mut self, from: Address, amount: U256) -> Result<(), DexError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(DexError::InsufficientBalance);
        }
        self.balances.set(&from, balance - amount);
        self.total_supply.set(self.total_supply() - amount);

        self.env().emit_event(Transfer {
            from,
            to: self.env().self_address(),
            value: amount,
        });
        Ok(())
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }
}

/// Fungible token with metadata and an optional privileged minter.
#[odra::module]
pub struct Cep18Token {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    /// `None` disables `mint` entirely.
    minter: Var<Option<Address>>,
    ledger: SubModule<Ledger>,
}

#[odra::module]
impl Cep18Token {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, minter: Option<Address>) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.minter.set(minter);
    }

    // ============ View Functions ============

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn minter(&self) -> Option<Address> {
        self.minter.get_or_default()
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

    // ============ Write Functions ============

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

    /// Mint new tokens - only callable by the minter
    pub fn mint(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        if self.minter() != Some(caller) {
            self.env().revert(DexError::Unauthorized);
        }
        self.ledger.mint(to, amount).or_revert(&self.env());
    }
}
