use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, U256};
use thiserror::Error;
use tracing::debug;
use wizard_core::types::{
    ContractOptions, ContractType, Erc1155Options, Erc20Options, Erc721Options, MintAccessMode,
};
use wizard_core::units::{parse_integer, scale_decimal, TOKEN_DECIMALS};
use wizard_core::utils::parse_address;

use crate::templates::template;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid owner address: {0}")]
    InvalidOwner(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidNumber { field: &'static str, reason: String },
    #[error("max supply {max} is below initial supply {initial}")]
    SupplyCapBelowInitial { max: String, initial: String },
    #[error("wallet mint limit is required for public-with-wallet-limit minting")]
    WalletLimitRequired,
    #[error("wallet mint limit must be a positive integer")]
    WalletLimitNotPositive,
    #[error("{0} is not a deployable contract type")]
    NotDeployable(ContractType),
    #[error("contract template is unusable: {0}")]
    Template(String),
}

/// Everything the deploy collaborator needs for one create transaction.
/// Produced once per confirmed configuration and consumed once.
#[derive(Debug, Clone)]
pub struct DeploymentData {
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    pub args: Vec<DynSolValue>,
}

impl DeploymentData {
    /// Creation bytecode with the ABI-encoded constructor arguments
    /// appended, ready to be sent as the input of a create transaction.
    pub fn init_code(&self) -> Bytes {
        let encoded = DynSolValue::Tuple(self.args.clone()).abi_encode_params();
        let mut out = Vec::with_capacity(self.bytecode.len() + encoded.len());
        out.extend_from_slice(&self.bytecode);
        out.extend_from_slice(&encoded);
        Bytes::from(out)
    }

    /// Argument list in display form, in ABI order. Used for the verify
    /// command's constructor-args file and for the encode preview.
    pub fn args_as_strings(&self) -> Vec<String> {
        self.args.iter().map(format_arg).collect()
    }
}

fn format_arg(value: &DynSolValue) -> String {
    match value {
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Address(a) => a.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        other => format!("{other:?}"),
    }
}

/// Validates an options snapshot and maps it onto the fixed constructor
/// signature of the matching template. Validation failures block the
/// deploy path; nothing is silently corrected.
pub fn encode_deployment(options: &ContractOptions) -> Result<DeploymentData, ValidationError> {
    let contract_type = options.contract_type();
    let args = match options {
        ContractOptions::Erc20(o) => erc20_args(o)?,
        ContractOptions::Erc721(o) => erc721_args(o)?,
        ContractOptions::Erc1155(o) => erc1155_args(o)?,
        ContractOptions::RiskScanner => {
            return Err(ValidationError::NotDeployable(contract_type))
        }
    };
    let tpl = template(contract_type)
        .ok_or(ValidationError::NotDeployable(contract_type))?;
    let abi = tpl
        .abi()
        .map_err(|e| ValidationError::Template(e.to_string()))?;
    let bytecode = tpl
        .bytecode()
        .map_err(|e| ValidationError::Template(e.to_string()))?;
    debug!(%contract_type, argc = args.len(), "encoded deployment arguments");

    Ok(DeploymentData {
        abi,
        bytecode,
        args,
    })
}

fn erc20_args(o: &Erc20Options) -> Result<Vec<DynSolValue>, ValidationError> {
    let name = required(&o.name, "name")?;
    let symbol = required(&o.symbol, "symbol")?;
    let owner = owner_address(&o.owner)?;

    // The template fixes 18 decimals; user input is in whole tokens.
    let initial_supply = scale_supply(&o.initial_supply, "initial_supply")?;
    let max_supply = match non_empty(o.max_supply.as_deref()) {
        Some(raw) => scale_supply(raw, "max_supply")?,
        // Zero means unlimited; the ABI has fixed arity, so absent caps
        // still occupy their argument slot.
        None => U256::ZERO,
    };
    if !max_supply.is_zero() && max_supply < initial_supply {
        return Err(ValidationError::SupplyCapBelowInitial {
            max: o.max_supply.clone().unwrap_or_default(),
            initial: o.initial_supply.clone(),
        });
    }

    Ok(vec![
        DynSolValue::String(name.to_string()),
        DynSolValue::String(symbol.to_string()),
        DynSolValue::Uint(initial_supply, 256),
        DynSolValue::Address(owner),
        DynSolValue::Bool(o.mintable),
        DynSolValue::Bool(o.burnable),
        DynSolValue::Bool(o.pausable),
        DynSolValue::Uint(max_supply, 256),
    ])
}

fn erc721_args(o: &Erc721Options) -> Result<Vec<DynSolValue>, ValidationError> {
    let name = required(&o.name, "name")?;
    let symbol = required(&o.symbol, "symbol")?;
    let owner = owner_address(&o.owner)?;
    let max_supply = integer_or_zero(o.max_supply.as_deref(), "max_supply")?;
    let wallet_mint_limit = wallet_limit(o.mint_access_mode, o.wallet_mint_limit.as_deref())?;

    Ok(vec![
        DynSolValue::String(name.to_string()),
        DynSolValue::String(symbol.to_string()),
        DynSolValue::Address(owner),
        DynSolValue::Bool(o.burnable),
        DynSolValue::Bool(o.pausable),
        DynSolValue::Uint(max_supply, 256),
        DynSolValue::Uint(U256::from(o.mint_access_mode.ordinal()), 8),
        DynSolValue::Uint(wallet_mint_limit, 256),
    ])
}

fn erc1155_args(o: &Erc1155Options) -> Result<Vec<DynSolValue>, ValidationError> {
    let name = required(&o.name, "name")?;
    let owner = owner_address(&o.owner)?;
    let uri = o.uri.clone().unwrap_or_default();
    let max_supply = integer_or_zero(o.max_supply_per_token.as_deref(), "max_supply_per_token")?;
    let wallet_mint_limit = wallet_limit(o.mint_access_mode, o.wallet_mint_limit.as_deref())?;

    Ok(vec![
        DynSolValue::String(name.to_string()),
        DynSolValue::String(uri),
        DynSolValue::Address(owner),
        DynSolValue::Bool(o.mintable),
        DynSolValue::Bool(o.burnable),
        DynSolValue::Bool(o.pausable),
        DynSolValue::Uint(max_supply, 256),
        DynSolValue::Uint(U256::from(o.mint_access_mode.ordinal()), 8),
        DynSolValue::Uint(wallet_mint_limit, 256),
    ])
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn owner_address(raw: &str) -> Result<Address, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingField("owner"));
    }
    parse_address(raw).map_err(|_| ValidationError::InvalidOwner(raw.to_string()))
}

fn scale_supply(raw: &str, field: &'static str) -> Result<U256, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(U256::ZERO);
    }
    scale_decimal(raw, TOKEN_DECIMALS).map_err(|e| ValidationError::InvalidNumber {
        field,
        reason: e.to_string(),
    })
}

fn integer_or_zero(raw: Option<&str>, field: &'static str) -> Result<U256, ValidationError> {
    match non_empty(raw) {
        Some(raw) => parse_integer(raw).map_err(|e| ValidationError::InvalidNumber {
            field,
            reason: e.to_string(),
        }),
        None => Ok(U256::ZERO),
    }
}

fn wallet_limit(
    mode: MintAccessMode,
    raw: Option<&str>,
) -> Result<U256, ValidationError> {
    if mode != MintAccessMode::PublicWithWalletLimit {
        // The limit only exists under the per-wallet cap policy; anything
        // supplied under other modes is ignored.
        return Ok(U256::ZERO);
    }
    let raw = non_empty(raw).ok_or(ValidationError::WalletLimitRequired)?;
    let limit = parse_integer(raw).map_err(|e| ValidationError::InvalidNumber {
        field: "wallet_mint_limit",
        reason: e.to_string(),
    })?;
    if limit.is_zero() {
        return Err(ValidationError::WalletLimitNotPositive);
    }
    Ok(limit)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> String {
        "0x1111111111111111111111111111111111111111".to_string()
    }

    fn erc20() -> Erc20Options {
        Erc20Options {
            name: "My Token".into(),
            symbol: "MTK".into(),
            initial_supply: "1000000".into(),
            owner: owner(),
            mintable: true,
            burnable: false,
            pausable: true,
            max_supply: None,
        }
    }

    fn pow18() -> U256 {
        U256::from(10u8).pow(U256::from(18u8))
    }

    fn as_uint(value: &DynSolValue) -> U256 {
        match value {
            DynSolValue::Uint(v, _) => *v,
            other => panic!("expected uint, got {other:?}"),
        }
    }

    #[test]
    fn erc20_arg_order_and_scaling() {
        let data = encode_deployment(&ContractOptions::Erc20(erc20())).unwrap();
        assert_eq!(data.args.len(), 8);
        assert_eq!(
            data.args[0],
            DynSolValue::String("My Token".to_string())
        );
        assert_eq!(data.args[1], DynSolValue::String("MTK".to_string()));
        assert_eq!(as_uint(&data.args[2]), U256::from(1_000_000u64) * pow18());
        assert_eq!(
            data.args[3],
            DynSolValue::Address(parse_address(&owner()).unwrap())
        );
        assert_eq!(data.args[4], DynSolValue::Bool(true));
        assert_eq!(data.args[5], DynSolValue::Bool(false));
        assert_eq!(data.args[6], DynSolValue::Bool(true));
        assert_eq!(as_uint(&data.args[7]), U256::ZERO);
    }

    #[test]
    fn erc20_scaling_is_exact_for_large_supplies() {
        let mut o = erc20();
        o.initial_supply = "123456789012345678".into();
        let data = encode_deployment(&ContractOptions::Erc20(o)).unwrap();
        let expected =
            U256::from_str_radix("123456789012345678", 10).unwrap() * pow18();
        assert_eq!(as_uint(&data.args[2]), expected);
    }

    #[test]
    fn erc20_max_supply_boundary() {
        let mut o = erc20();
        o.initial_supply = "1000".into();
        o.max_supply = Some("999".into());
        let err = encode_deployment(&ContractOptions::Erc20(o)).unwrap_err();
        assert!(matches!(err, ValidationError::SupplyCapBelowInitial { .. }));

        let mut o = erc20();
        o.initial_supply = "1000".into();
        o.max_supply = Some("1000".into());
        let data = encode_deployment(&ContractOptions::Erc20(o)).unwrap();
        assert_eq!(as_uint(&data.args[7]), U256::from(1000u64) * pow18());
    }

    #[test]
    fn erc20_missing_fields_rejected() {
        let mut o = erc20();
        o.symbol = "  ".into();
        let err = encode_deployment(&ContractOptions::Erc20(o)).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("symbol")));

        let mut o = erc20();
        o.owner = "0xnothex".into();
        let err = encode_deployment(&ContractOptions::Erc20(o)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOwner(_)));
    }

    #[test]
    fn erc20_empty_initial_supply_encodes_zero() {
        let mut o = erc20();
        o.initial_supply = "".into();
        let data = encode_deployment(&ContractOptions::Erc20(o)).unwrap();
        assert_eq!(as_uint(&data.args[2]), U256::ZERO);
    }

    fn erc721() -> Erc721Options {
        Erc721Options {
            name: "My Collection".into(),
            symbol: "MNFT".into(),
            owner: owner(),
            burnable: true,
            pausable: false,
            uri: Some("ipfs://bafybeigdyr".into()),
            max_supply: Some("10000".into()),
            mint_access_mode: MintAccessMode::PublicWithWalletLimit,
            wallet_mint_limit: Some("5".into()),
        }
    }

    #[test]
    fn erc721_arg_order_with_mode_ordinal_and_limit() {
        let data = encode_deployment(&ContractOptions::Erc721(erc721())).unwrap();
        assert_eq!(data.args.len(), 8);
        assert_eq!(as_uint(&data.args[5]), U256::from(10_000u64));
        assert_eq!(as_uint(&data.args[6]), U256::from(2u8));
        assert_eq!(as_uint(&data.args[7]), U256::from(5u8));
    }

    #[test]
    fn erc721_wallet_limit_required_with_capped_public_mint() {
        let mut o = erc721();
        o.wallet_mint_limit = None;
        let err = encode_deployment(&ContractOptions::Erc721(o)).unwrap_err();
        assert!(matches!(err, ValidationError::WalletLimitRequired));

        let mut o = erc721();
        o.wallet_mint_limit = Some("0".into());
        let err = encode_deployment(&ContractOptions::Erc721(o)).unwrap_err();
        assert!(matches!(err, ValidationError::WalletLimitNotPositive));
    }

    #[test]
    fn erc721_wallet_limit_ignored_outside_capped_mode() {
        let mut o = erc721();
        o.mint_access_mode = MintAccessMode::Public;
        o.wallet_mint_limit = Some("5".into());
        let data = encode_deployment(&ContractOptions::Erc721(o)).unwrap();
        assert_eq!(as_uint(&data.args[6]), U256::from(1u8));
        assert_eq!(as_uint(&data.args[7]), U256::ZERO);
    }

    #[test]
    fn erc721_absent_caps_encode_zero() {
        let mut o = erc721();
        o.max_supply = None;
        o.mint_access_mode = MintAccessMode::OnlyOwner;
        o.wallet_mint_limit = None;
        let data = encode_deployment(&ContractOptions::Erc721(o)).unwrap();
        assert_eq!(as_uint(&data.args[5]), U256::ZERO);
        assert_eq!(as_uint(&data.args[6]), U256::ZERO);
        assert_eq!(as_uint(&data.args[7]), U256::ZERO);
    }

    #[test]
    fn erc1155_args_have_uri_and_no_symbol() {
        let o = Erc1155Options {
            name: "Multi".into(),
            owner: owner(),
            uri: None,
            mintable: true,
            burnable: false,
            pausable: false,
            mint_access_mode: MintAccessMode::OnlyOwner,
            wallet_mint_limit: None,
            max_supply_per_token: Some("500".into()),
            ..Default::default()
        };
        let data = encode_deployment(&ContractOptions::Erc1155(o)).unwrap();
        assert_eq!(data.args.len(), 9);
        // Absent uri still occupies its slot as an empty string.
        assert_eq!(data.args[1], DynSolValue::String(String::new()));
        assert_eq!(as_uint(&data.args[6]), U256::from(500u64));
    }

    #[test]
    fn init_code_appends_encoded_args() {
        let data = encode_deployment(&ContractOptions::Erc20(erc20())).unwrap();
        let init = data.init_code();
        assert!(init.len() > data.bytecode.len());
        assert_eq!(&init[..data.bytecode.len()], data.bytecode.as_ref());
    }

    #[test]
    fn args_as_strings_follow_abi_order() {
        let data = encode_deployment(&ContractOptions::Erc20(erc20())).unwrap();
        let strings = data.args_as_strings();
        assert_eq!(strings[0], "My Token");
        assert_eq!(strings[1], "MTK");
        assert_eq!(strings[2], (U256::from(1_000_000u64) * pow18()).to_string());
        assert_eq!(strings[4], "true");
        assert_eq!(strings[7], "0");
    }

    #[test]
    fn encoding_is_deterministic() {
        let opts = ContractOptions::Erc20(erc20());
        let a = encode_deployment(&opts).unwrap();
        let b = encode_deployment(&opts).unwrap();
        assert_eq!(a.args, b.args);
        assert_eq!(a.init_code(), b.init_code());
    }

    #[test]
    fn risk_scanner_snapshot_is_not_deployable() {
        let opts: ContractOptions =
            serde_json::from_str(r#"{ "contract_type": "RISK_SCANNER" }"#).unwrap();
        let err = encode_deployment(&opts).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotDeployable(ContractType::RiskScanner)
        ));
    }
}
