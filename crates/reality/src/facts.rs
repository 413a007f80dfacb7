use wizard_core::types::{ContractOptions, ContractType, MintAccessMode};

/// Canonical projection of one options snapshot plus the connected wallet.
/// Sole input to both rule engines; recomputed on every options change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigFacts {
    pub contract_type: ContractType,
    pub is_mintable: bool,
    pub is_burnable: bool,
    pub is_pausable: bool,
    pub has_max_supply: bool,
    pub max_supply: Option<String>,
    pub has_metadata_uri: bool,
    pub is_owner_custom: bool,
    pub owner_address: String,
    pub has_wallet_mint_limit: bool,
    pub mint_access_mode: Option<MintAccessMode>,
    pub contract_name: String,
    pub symbol: Option<String>,
    pub initial_supply: Option<String>,
}

/// Total function: partial or odd input degrades to `false`/absent facts
/// rather than erroring, since this feeds an advisory screen. When the
/// caller address is unknown the owner is never flagged as custom;
/// warning on uncertain identity would be a false alarm.
pub fn derive_facts(options: &ContractOptions, caller: Option<&str>) -> ConfigFacts {
    let owner = options.owner().trim().to_string();
    let is_owner_custom = match caller {
        Some(caller) if !owner.is_empty() && !caller.trim().is_empty() => {
            !owner.eq_ignore_ascii_case(caller.trim())
        }
        _ => false,
    };

    let mut facts = ConfigFacts {
        contract_type: options.contract_type(),
        is_mintable: false,
        is_burnable: false,
        is_pausable: false,
        has_max_supply: false,
        max_supply: None,
        has_metadata_uri: false,
        is_owner_custom,
        owner_address: owner,
        has_wallet_mint_limit: false,
        mint_access_mode: None,
        contract_name: options.name().to_string(),
        symbol: options.symbol().map(str::to_string),
        initial_supply: None,
    };

    match options {
        ContractOptions::Erc20(o) => {
            facts.is_mintable = o.mintable;
            facts.is_burnable = o.burnable;
            facts.is_pausable = o.pausable;
            facts.max_supply = present(o.max_supply.as_deref());
            facts.has_max_supply = facts.max_supply.is_some();
            facts.initial_supply = present(Some(&o.initial_supply));
        }
        ContractOptions::Erc721(o) => {
            facts.is_burnable = o.burnable;
            facts.is_pausable = o.pausable;
            facts.max_supply = present(o.max_supply.as_deref());
            facts.has_max_supply = facts.max_supply.is_some();
            facts.has_metadata_uri = present(o.uri.as_deref()).is_some();
            facts.mint_access_mode = Some(o.mint_access_mode);
            facts.has_wallet_mint_limit =
                o.mint_access_mode == MintAccessMode::PublicWithWalletLimit;
        }
        ContractOptions::Erc1155(o) => {
            facts.is_mintable = o.mintable;
            facts.is_burnable = o.burnable;
            facts.is_pausable = o.pausable;
            facts.max_supply = present(o.max_supply_per_token.as_deref());
            facts.has_max_supply = facts.max_supply.is_some();
            facts.has_metadata_uri = present(o.uri.as_deref()).is_some();
            facts.mint_access_mode = Some(o.mint_access_mode);
            facts.has_wallet_mint_limit =
                o.mint_access_mode == MintAccessMode::PublicWithWalletLimit;
        }
        // Scanner card carries no token parameters; the default-false
        // facts already describe it.
        ContractOptions::RiskScanner => {}
    }

    facts
}

fn present(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::types::{Erc1155Options, Erc20Options, Erc721Options};

    fn erc20() -> ContractOptions {
        ContractOptions::Erc20(Erc20Options {
            name: "My Token".into(),
            symbol: "MTK".into(),
            initial_supply: "1000000".into(),
            owner: "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".into(),
            mintable: true,
            burnable: false,
            pausable: true,
            max_supply: None,
        })
    }

    #[test]
    fn derivation_is_pure_and_idempotent() {
        let opts = erc20();
        let caller = Some("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(derive_facts(&opts, caller), derive_facts(&opts, caller));
    }

    #[test]
    fn owner_comparison_is_case_insensitive() {
        let facts = derive_facts(
            &erc20(),
            Some("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
        );
        assert!(!facts.is_owner_custom);

        let facts = derive_facts(
            &erc20(),
            Some("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
        );
        assert!(facts.is_owner_custom);
    }

    #[test]
    fn unknown_caller_never_flags_custom_owner() {
        assert!(!derive_facts(&erc20(), None).is_owner_custom);
        assert!(!derive_facts(&erc20(), Some("  ")).is_owner_custom);
    }

    #[test]
    fn empty_max_supply_is_absent() {
        let opts = ContractOptions::Erc20(Erc20Options {
            max_supply: Some("  ".into()),
            ..match erc20() {
                ContractOptions::Erc20(o) => o,
                _ => unreachable!(),
            }
        });
        let facts = derive_facts(&opts, None);
        assert!(!facts.has_max_supply);
        assert!(facts.max_supply.is_none());
    }

    #[test]
    fn erc721_mint_mode_and_metadata_facts() {
        let opts = ContractOptions::Erc721(Erc721Options {
            name: "Drop".into(),
            symbol: "DRP".into(),
            owner: "0x1111111111111111111111111111111111111111".into(),
            burnable: false,
            pausable: false,
            uri: None,
            max_supply: Some("100".into()),
            mint_access_mode: MintAccessMode::PublicWithWalletLimit,
            wallet_mint_limit: Some("2".into()),
        });
        let facts = derive_facts(&opts, None);
        assert_eq!(facts.contract_type, ContractType::Erc721);
        assert!(!facts.has_metadata_uri);
        assert!(facts.has_wallet_mint_limit);
        assert!(facts.has_max_supply);
        // ERC721 has no standalone mintable flag; minting is governed by
        // the access mode.
        assert!(!facts.is_mintable);
    }

    #[test]
    fn risk_scanner_derives_featureless_facts() {
        let facts = derive_facts(
            &ContractOptions::RiskScanner,
            Some("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
        );
        assert_eq!(facts.contract_type, ContractType::RiskScanner);
        assert!(!facts.is_mintable);
        assert!(!facts.is_owner_custom);
        assert_eq!(facts.symbol, None);
        assert!(facts.initial_supply.is_none());
    }

    #[test]
    fn erc1155_has_no_symbol_fact() {
        let opts = ContractOptions::Erc1155(Erc1155Options {
            name: "Multi".into(),
            owner: "0x1111111111111111111111111111111111111111".into(),
            uri: Some("ipfs://bafybeigdyr".into()),
            mintable: true,
            ..Default::default()
        });
        let facts = derive_facts(&opts, None);
        assert_eq!(facts.symbol, None);
        assert!(facts.has_metadata_uri);
        assert!(facts.is_mintable);
    }
}
