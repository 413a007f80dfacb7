use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Token standard selected in the wizard. `RiskScanner` is the allowance
/// scanner pseudo-type: it has a card in the UI but nothing to deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155,
    #[serde(rename = "RISK_SCANNER")]
    RiskScanner,
}

impl ContractType {
    pub fn is_nft(self) -> bool {
        matches!(self, Self::Erc721 | Self::Erc1155)
    }

    pub fn is_deployable(self) -> bool {
        !matches!(self, Self::RiskScanner)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Erc20 => "ERC20",
            Self::Erc721 => "ERC721",
            Self::Erc1155 => "ERC1155",
            Self::RiskScanner => "RISK_SCANNER",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may call the mint entry point. The ordinal is part of the
/// constructor ABI for ERC721/ERC1155 and must stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintAccessMode {
    #[default]
    OnlyOwner,
    Public,
    PublicWithWalletLimit,
}

impl MintAccessMode {
    pub fn ordinal(self) -> u8 {
        match self {
            Self::OnlyOwner => 0,
            Self::Public => 1,
            Self::PublicWithWalletLimit => 2,
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "onlyowner" | "only_owner" | "only-owner" => Ok(Self::OnlyOwner),
            "public" => Ok(Self::Public),
            "publicwithwalletlimit" | "public_with_wallet_limit" | "public-with-wallet-limit" => {
                Ok(Self::PublicWithWalletLimit)
            }
            _ => Err(anyhow!("unsupported mint_access_mode: {raw}").into()),
        }
    }
}

/// ERC1155 token model. Only the shared model survived into the final
/// contract template; the field is informational and never encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenModel {
    #[default]
    Shared,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Erc20Options {
    pub name: String,
    pub symbol: String,
    /// Whole-token units as entered by the user, scaled to 18 decimals at
    /// encoding time.
    pub initial_supply: String,
    pub owner: String,
    pub mintable: bool,
    pub burnable: bool,
    pub pausable: bool,
    #[serde(default)]
    pub max_supply: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Erc721Options {
    pub name: String,
    pub symbol: String,
    pub owner: String,
    pub burnable: bool,
    pub pausable: bool,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub max_supply: Option<String>,
    #[serde(default)]
    pub mint_access_mode: MintAccessMode,
    #[serde(default)]
    pub wallet_mint_limit: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Erc1155Options {
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub uri: Option<String>,
    pub mintable: bool,
    pub burnable: bool,
    pub pausable: bool,
    #[serde(default)]
    pub mint_access_mode: MintAccessMode,
    #[serde(default)]
    pub wallet_mint_limit: Option<String>,
    #[serde(default)]
    pub max_supply_per_token: Option<String>,
    #[serde(default)]
    pub token_model: TokenModel,
}

/// Snapshot of the wizard form, discriminated by the selected standard.
/// Callers hand the core immutable snapshots; the core never sees the
/// reactive UI state itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "contract_type")]
pub enum ContractOptions {
    #[serde(rename = "ERC20")]
    Erc20(Erc20Options),
    #[serde(rename = "ERC721")]
    Erc721(Erc721Options),
    #[serde(rename = "ERC1155")]
    Erc1155(Erc1155Options),
    /// The allowance scanner card carries no deployment parameters; a
    /// snapshot selecting it is valid form state but never encodable.
    #[serde(rename = "RISK_SCANNER")]
    RiskScanner,
}

impl ContractOptions {
    pub fn contract_type(&self) -> ContractType {
        match self {
            Self::Erc20(_) => ContractType::Erc20,
            Self::Erc721(_) => ContractType::Erc721,
            Self::Erc1155(_) => ContractType::Erc1155,
            Self::RiskScanner => ContractType::RiskScanner,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Erc20(o) => &o.name,
            Self::Erc721(o) => &o.name,
            Self::Erc1155(o) => &o.name,
            Self::RiskScanner => "",
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Erc20(o) => &o.owner,
            Self::Erc721(o) => &o.owner,
            Self::Erc1155(o) => &o.owner,
            Self::RiskScanner => "",
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Erc20(o) => Some(&o.symbol),
            Self::Erc721(o) => Some(&o.symbol),
            Self::Erc1155(_) | Self::RiskScanner => None,
        }
    }
}
