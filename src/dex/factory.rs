//! Factory contract for the DEX
//!
//! The Factory creates and owns every Pair:
//! - One pair per unordered token pair, keyed by a deterministic pair key
//! - Creation-ordered list of all pairs
//! - Protocol fee recipient and the account allowed to change it
use odra::casper_types::bytesrepr::ToBytes;
use odra::prelude::*;
use odra::ContractRef;
use sha3::{Digest, Keccak256};

use crate::dex::pair::PairFactoryContractRef;
use crate::errors::{DexError, OrRevert};
use crate::events::PairCreated;

const PAIR_DOMAIN: &[u8] = b"amm-pair";

/// Sort two token addresses into canonical order
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Identity of the pair for two tokens, in either order.
///
/// Keccak-256 over a domain tag and both canonical addresses; depends only on
/// the tokens, so it can be computed without querying the factory.
pub fn pair_key(token_a: Address, token_b: Address) -> Result<[u8; 32], DexError> {
    let (token0, token1) = sort_tokens(token_a, token_b);
    let mut hasher = Keccak256::new();
    hasher.update(PAIR_DOMAIN);
    for token in [token0, token1] {
        let bytes = token.to_bytes().map_err(|_| DexError::InvalidAddress)?;
        hasher.update(&bytes);
    }
    Ok(hasher.finalize().into())
}

/// Factory contract
#[odra::module]
pub struct Factory {
    /// Protocol fee recipient, unset by default
    fee_to: Var<Option<Address>>,
    /// Account allowed to change fee settings
    fee_to_setter: Var<Address>,
    /// Factory deploying the pair contracts
    pair_factory: Var<Address>,
    /// pair key -> pair address
    pairs: Mapping<[u8; 32], Address>,
    /// All pairs in creation order
    all_pairs: Mapping<u32, Address>,
    all_pairs_length: Var<u32>,
}

#[odra::module]
impl Factory {
    /// Initialize the factory with the fee setter and the pair deployer
    pub fn init(&mut self, fee_to_setter: Address, pair_factory: Address) {
        self.fee_to.set(None);
        self.fee_to_setter.set(fee_to_setter);
        self.pair_factory.set(pair_factory);
        self.all_pairs_length.set(0);
    }

    pub fn fee_to(&self) -> Option<Address> {
        self.fee_to.get_or_default()
    }

    pub fn fee_to_setter(&self) -> Address {
        self.fee_to_setter.get_or_revert_with(DexError::Unauthorized)
    }

    pub fn pair_factory(&self) -> Address {
        self.pair_factory.get_or_revert_with(DexError::PairNotFound)
    }

    /// Get the pair for two tokens, in either order
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        let key = pair_key(token_a, token_b).or_revert(&self.env());
        self.pairs.get(&key)
    }

    /// Get the pair identity for two tokens, whether or not it was created
    pub fn pair_key(&self, token_a: Address, token_b: Address) -> [u8; 32] {
        pair_key(token_a, token_b).or_revert(&self.env())
    }

    pub fn all_pairs(&self) -> Vec<Address> {
        (0..self.all_pairs_length())
            .filter_map(|index| self.all_pairs.get(&index))
            .collect()
    }

    pub fn all_pairs_length(&self) -> u32 {
        self.all_pairs_length.get_or_default()
    }

    /// Create a pair for two tokens
    pub fn create_pair(&mut self, token_a: Address, token_b: Address) -> Address {
        if token_a == token_b {
            self.env().revert(DexError::IdenticalAddresses);
        }
        let (token0, token1) = sort_tokens(token_a, token_b);
        let key = pair_key(token0, token1).or_revert(&self.env());
        if self.pairs.get(&key).is_some() {
            self.env().revert(DexError::PairExists);
        }
        let index = self.all_pairs_length();
        let pair_count = index
            .checked_add(1)
            .ok_or(DexError::Overflow)
            .or_revert(&self.env());

        let mut deployer = PairFactoryContractRef::new(self.env(), self.pair_factory());
        let (pair, _) = deployer.new_contract(
            format!("pair_{}", hex::encode(key)),
            token0,
            token1,
            self.env().self_address(),
        );

        self.pairs.set(&key, pair);
        self.all_pairs.set(&index, pair);
        self.all_pairs_length.set(pair_count);

        tracing::info!(?token0, ?token1, ?pair, "pair created");
        self.env().emit_event(PairCreated {
            token0,
            token1,
            pair,
            pair_count,
        });
        pair
    }

    /// Set the protocol fee recipient - only callable by fee_to_setter
    pub fn set_fee_to(&mut self, fee_to: Option<Address>) {
        self.ensure_fee_to_setter();
        self.fee_to.set(fee_to);
    }

    /// Hand fee control to another account - only callable by fee_to_setter
    pub fn set_fee_to_setter(&mut self, setter: Address) {
        self.ensure_fee_to_setter();
        self.fee_to_setter.set(setter);
    }
}

impl Factory {
    fn ensure_fee_to_setter(&self) {
        if self.env().caller() != self.fee_to_setter() {
            self.env().revert(DexError::Unauthorized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::pair::{PairFactory, PairHostRef};
    use odra::host::{Deployer, HostEnv, HostRef, NoArgs};

    fn setup() -> (HostEnv, FactoryHostRef) {
        let env = odra_test::env();
        let admin = env.get_account(0);
        env.set_caller(admin);

        let pair_factory = PairFactory::deploy(&env, NoArgs);
        let init_args = FactoryInitArgs {
            fee_to_setter: admin,
            pair_factory: pair_factory.address().clone(),
        };
        let factory = Factory::deploy(&env, init_args);
        (env, factory)
    }

    #[test]
    fn test_factory_init() {
        let (env, factory) = setup();
        assert_eq!(factory.fee_to(), None);
        assert_eq!(factory.fee_to_setter(), env.get_account(0));
        assert_eq!(factory.all_pairs_length(), 0);
        assert!(factory.all_pairs().is_empty());
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        let env = odra_test::env();
        let (a, b, c) = (env.get_account(3), env.get_account(4), env.get_account(5));

        assert_eq!(pair_key(a, b).ok(), pair_key(b, a).ok());
        assert_ne!(pair_key(a, b).ok(), pair_key(a, c).ok());
    }

    #[test]
    fn test_create_pair_is_symmetric() {
        let (env, mut factory) = setup();
        let (a, b) = (env.get_account(3), env.get_account(4));

        let pair = factory.create_pair(a, b);
        assert_eq!(factory.get_pair(a, b), Some(pair));
        assert_eq!(factory.get_pair(b, a), Some(pair));
        assert_eq!(factory.pair_key(b, a), factory.pair_key(a, b));
        assert_eq!(factory.all_pairs(), vec![pair]);

        let (token0, token1) = sort_tokens(a, b);
        let created = PairHostRef::new(pair, env.clone());
        assert_eq!((created.token0(), created.token1()), (token0, token1));
        assert_eq!(created.factory(), factory.address().clone());
    }

    #[test]
    fn test_create_pair_rejects_duplicates_in_either_order() {
        let (env, mut factory) = setup();
        let (a, b) = (env.get_account(3), env.get_account(4));
        factory.create_pair(a, b);

        assert_eq!(factory.try_create_pair(b, a), Err(DexError::PairExists.into()));
        assert_eq!(factory.try_create_pair(a, b), Err(DexError::PairExists.into()));
        assert_eq!(factory.all_pairs_length(), 1);
    }

    #[test]
    fn test_create_pair_rejects_identical_tokens() {
        let (env, mut factory) = setup();
        let a = env.get_account(3);
        assert_eq!(
            factory.try_create_pair(a, a),
            Err(DexError::IdenticalAddresses.into())
        );
        assert_eq!(factory.get_pair(a, a), None);
        assert_eq!(factory.all_pairs_length(), 0);
    }

    #[test]
    fn test_pairs_are_listed_in_creation_order() {
        let (env, mut factory) = setup();
        let tokens: Vec<Address> = (3..6).map(|i| env.get_account(i)).collect();
        let first = factory.create_pair(tokens[0], tokens[1]);
        let second = factory.create_pair(tokens[2], tokens[0]);
        let third = factory.create_pair(tokens[1], tokens[2]);

        assert_eq!(factory.all_pairs(), vec![first, second, third]);
        assert_ne!(first, second);
        assert_eq!(factory.get_pair(tokens[2], tokens[1]), Some(third));
    }

    #[test]
    fn test_fee_settings_only_by_setter() {
        let (env, mut factory) = setup();
        let admin = env.get_account(0);
        let other = env.get_account(1);

        env.set_caller(other);
        assert_eq!(
            factory.try_set_fee_to(Some(other)),
            Err(DexError::Unauthorized.into())
        );
        env.set_caller(admin);
        factory.set_fee_to(Some(other));
        assert_eq!(factory.fee_to(), Some(other));

        factory.set_fee_to_setter(other);
        assert_eq!(factory.try_set_fee_to(None), Err(DexError::Unauthorized.into()));
        env.set_caller(other);
        factory.set_fee_to(None);
        assert_eq!(factory.fee_to(), None);
    }
}
