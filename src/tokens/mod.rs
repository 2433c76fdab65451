//! Token presets deployed alongside the DEX.
//!
//! - WrappedNative: the native asset as an ordinary token
//! - USDCp / USDTp: 6-decimal stable test tokens with a privileged minter

pub mod wnative;

pub use wnative::WrappedNative;

/// Name, symbol and decimals of a preset token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPreset {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

pub const USDCP: TokenPreset = TokenPreset {
    name: "USD Coin (Test)",
    symbol: "USDCp",
    decimals: 6,
};

pub const USDTP: TokenPreset = TokenPreset {
    name: "Tether USD (Test)",
    symbol: "USDTp",
    decimals: 6,
};

#[cfg(not(target_arch = "wasm32"))]
impl TokenPreset {
    /// Init args for deploying the preset, mintable by `minter`.
    pub fn init_args(
        &self,
        minter: odra::prelude::Address,
    ) -> crate::token::Cep18TokenInitArgs {
        crate::token::Cep18TokenInitArgs {
            name: self.name.to_string(),
            symbol: self.symbol.to_string(),
            decimals: self.decimals,
            minter: Some(minter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Cep18Token;
    use odra::host::Deployer;

    #[test]
    fn test_presets() {
        let env = odra_test::env();
        let minter = env.get_account(0);

        let usdc = Cep18Token::deploy(&env, USDCP.init_args(minter));
        assert_eq!(usdc.symbol(), "USDCp");
        assert_eq!(usdc.decimals(), 6);
        assert_eq!(usdc.minter(), Some(minter));

        let usdt = Cep18Token::deploy(&env, USDTP.init_args(minter));
        assert_eq!(usdt.name(), "Tether USD (Test)");
        assert_eq!(usdt.decimals(), 6);
    }
}
