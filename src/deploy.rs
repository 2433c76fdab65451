//! Deployment driver: test tokens, the USDCp/USDTp pair and its first liquidity.
//!
//! Re-running against a partially filled [`AddressBook`] only deploys what is
//! missing. The book is returned to the caller; persisting it is left to them.
use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv, HostRef, NoArgs};
use odra::prelude::*;
use odra::prelude::OdraError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dex::factory::{Factory, FactoryHostRef, FactoryInitArgs};
use crate::dex::pair::PairFactory;
use crate::dex::router::{Router, RouterHostRef, RouterInitArgs};
use crate::token::{Cep18Token, Cep18TokenHostRef};
use crate::tokens::{TokenPreset, WrappedNative, USDCP, USDTP};

/// Minted to the deployer of each test token: 1,000,000 tokens at 6 decimals.
pub const MINT_AMOUNT: u64 = 1_000_000 * 1_000_000;
/// Seeded into the USDCp/USDTp pair: 100,000 tokens of each side.
pub const LIQUIDITY_AMOUNT: u64 = 100_000 * 1_000_000;
/// Validity window of the seeding call, in milliseconds.
pub const DEADLINE_WINDOW: u64 = 20 * 60 * 1000;

/// Addresses of one deployment target, hex encoded in their byte form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    pub target: String,
    #[serde(rename = "USDCp", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdcp: Option<Address>,
    #[serde(rename = "USDTp", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdtp: Option<Address>,
    #[serde(rename = "WrappedNative", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wnative: Option<Address>,
    #[serde(rename = "Factory", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<Address>,
    #[serde(rename = "Router", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router: Option<Address>,
    #[serde(rename = "USDC_USDT_Pair", with = "hex_address", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdc_usdt_pair: Option<Address>,
}

impl AddressBook {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}

/// Deploy whatever `book` is missing from the caller's account, seed the
/// USDCp/USDTp pair, and return the completed book.
pub fn provision(env: &HostEnv, mut book: AddressBook) -> Result<AddressBook, OdraError> {
    let deployer = env.caller();

    let mut usdcp = load_or_deploy_token(env, &mut book.usdcp, &USDCP, deployer);
    let mut usdtp = load_or_deploy_token(env, &mut book.usdtp, &USDTP, deployer);

    let wnative = *book
        .wnative
        .get_or_insert_with(|| WrappedNative::deploy(env, NoArgs).address().clone());
    let factory_address = *book.factory.get_or_insert_with(|| {
        let pair_factory = PairFactory::deploy(env, NoArgs);
        let init_args = FactoryInitArgs {
            fee_to_setter: deployer,
            pair_factory: pair_factory.address().clone(),
        };
        Factory::deploy(env, init_args).address().clone()
    });
    let router_address = *book.router.get_or_insert_with(|| {
        let init_args = RouterInitArgs {
            factory: factory_address,
            wnative,
        };
        Router::deploy(env, init_args).address().clone()
    });
    info!(target_name = %book.target, ?factory_address, ?router_address, "core deployed");

    let (usdcp_address, usdtp_address) = (usdcp.address().clone(), usdtp.address().clone());
    let mut factory = FactoryHostRef::new(factory_address, env.clone());
    let pair = match factory.get_pair(usdcp_address, usdtp_address) {
        Some(pair) => pair,
        None => factory.try_create_pair(usdcp_address, usdtp_address)?,
    };
    book.usdc_usdt_pair = Some(pair);
    info!(target_name = %book.target, ?pair, "USDCp-USDTp pair ready");

    for token in [&mut usdcp, &mut usdtp] {
        token.try_mint(deployer, U256::from(MINT_AMOUNT))?;
        token.try_approve(router_address, U256::from(MINT_AMOUNT))?;
    }

    let deadline = env.block_time().saturating_add(DEADLINE_WINDOW);
    let amount = U256::from(LIQUIDITY_AMOUNT);
    let mut router = RouterHostRef::new(router_address, env.clone());
    router.try_add_liquidity(
        usdcp_address,
        usdtp_address,
        amount,
        amount,
        U256::zero(),
        U256::zero(),
        deployer,
        deadline,
    )?;
    info!(target_name = %book.target, "liquidity seeded");

    Ok(book)
}

fn load_or_deploy_token(
    env: &HostEnv,
    slot: &mut Option<Address>,
    preset: &TokenPreset,
    minter: Address,
) -> Cep18TokenHostRef {
    match *slot {
        Some(address) => Cep18TokenHostRef::new(address, env.clone()),
        None => {
            let token = Cep18Token::deploy(env, preset.init_args(minter));
            *slot = Some(token.address().clone());
            token
        }
    }
}

mod hex_address {
    use odra::casper_types::bytesrepr::{FromBytes, ToBytes};
    use odra::prelude::Address;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        address: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match address {
            Some(address) => {
                let bytes = address
                    .to_bytes()
                    .map_err(|e| S::Error::custom(format!("{e:?}")))?;
                serializer.serialize_some(&hex::encode(bytes))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Address>, D::Error> {
        let Some(encoded) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let bytes = hex::decode(encoded).map_err(D::Error::custom)?;
        let (address, rest) =
            Address::from_bytes(&bytes).map_err(|e| D::Error::custom(format!("{e:?}")))?;
        if !rest.is_empty() {
            return Err(D::Error::custom("trailing bytes after address"));
        }
        Ok(Some(address))
    }
}
