use tracing::debug;
use wizard_core::types::{ContractType, MintAccessMode};
use wizard_core::utils::short_address;

use crate::facts::ConfigFacts;
use crate::types::{Consequence, Severity};

/// One rule per risk concern. Each rule inspects the facts and either
/// emits a single consequence or stays silent; mutual exclusion between
/// alternatives for the same concern lives inside the rule, so adding or
/// removing a concern never changes which alternative fires elsewhere.
type Rule = fn(&ConfigFacts) -> Option<Consequence>;

const RULES: &[Rule] = &[
    minting,
    pausing,
    metadata,
    custom_owner,
    mint_access,
    burnable,
    nft_supply_cap,
];

/// Evaluates the rule set in declaration order. Total: always returns a
/// list, never errors, so the decision screen always has something to
/// render.
pub fn evaluate_consequences(facts: &ConfigFacts) -> Vec<Consequence> {
    let consequences: Vec<Consequence> =
        RULES.iter().filter_map(|rule| rule(facts)).collect();
    debug!(
        contract_type = %facts.contract_type,
        count = consequences.len(),
        "evaluated configuration consequences"
    );
    consequences
}

/// Exactly one of three alternatives for ERC20; at most one otherwise.
fn minting(facts: &ConfigFacts) -> Option<Consequence> {
    if facts.is_mintable && !facts.has_max_supply {
        Some(Consequence {
            id: "unlimited-minting",
            severity: Severity::Warning,
            title: "No maximum supply enforced".into(),
            explanation: "Contract owner can create unlimited tokens at any time after deployment."
                .into(),
            tooltip: "Total supply can grow indefinitely, which permanently affects token \
                      scarcity and economics. Consider setting a max supply cap if token value \
                      depends on limited supply."
                .into(),
        })
    } else if !facts.is_mintable && facts.contract_type == ContractType::Erc20 {
        let initial = facts
            .initial_supply
            .clone()
            .unwrap_or_else(|| "the initial amount".into());
        Some(Consequence {
            id: "no-minting",
            severity: Severity::Critical,
            title: "Token supply is permanently fixed".into(),
            explanation: format!(
                "Total supply locked at {initial}. No additional tokens can ever be created."
            ),
            tooltip: "Minting is permanently disabled. If you need more tokens later for any \
                      reason (growth, partnerships, liquidity), you cannot create them. This \
                      decision is irreversible."
                .into(),
        })
    } else if facts.is_mintable && facts.has_max_supply {
        let max = facts.max_supply.clone().unwrap_or_default();
        Some(Consequence {
            id: "capped-minting",
            severity: Severity::Info,
            title: format!("Supply capped at {max}"),
            explanation: "Minting is limited by a permanent maximum supply.".into(),
            tooltip: "This cap cannot be changed after deployment. Choose carefully.".into(),
        })
    } else {
        None
    }
}

/// Exactly one of two alternatives, for every contract type.
fn pausing(facts: &ConfigFacts) -> Option<Consequence> {
    if !facts.is_pausable {
        Some(Consequence {
            id: "no-pausing",
            severity: Severity::Critical,
            title: "Emergency pause not available".into(),
            explanation: "Transfers cannot be frozen. No way to stop activity if security \
                          issues are discovered."
                .into(),
            tooltip: "If an exploit is found or a security issue emerges, you will not be able \
                      to pause token transfers. This is considered critical risk for production \
                      deployments."
                .into(),
        })
    } else {
        Some(Consequence {
            id: "pausable",
            severity: Severity::Info,
            title: "Emergency pause available".into(),
            explanation: "Contract owner can pause all transfers if needed.".into(),
            tooltip: "Useful for handling security incidents or unexpected issues.".into(),
        })
    }
}

fn metadata(facts: &ConfigFacts) -> Option<Consequence> {
    if facts.contract_type.is_nft() && !facts.has_metadata_uri {
        Some(Consequence {
            id: "no-metadata",
            severity: Severity::Critical,
            title: "No metadata URI provided".into(),
            explanation: "NFTs will not display properly on marketplaces and explorers.".into(),
            tooltip: "Metadata defines the name, description, and image for your NFTs. Without \
                      it, they appear blank."
                .into(),
        })
    } else {
        None
    }
}

fn custom_owner(facts: &ConfigFacts) -> Option<Consequence> {
    if facts.is_owner_custom {
        Some(Consequence {
            id: "custom-owner",
            severity: Severity::Critical,
            title: "Administrative control assigned to different address".into(),
            explanation: format!(
                "Contract ownership transferring to {}",
                short_address(&facts.owner_address)
            ),
            tooltip: "You are deploying this contract but giving control to a different \
                      address. Verify you control this address. Loss of access to the owner \
                      address means permanent loss of admin privileges."
                .into(),
        })
    } else {
        None
    }
}

/// NFT mint-access policy: public and owner-only are mutually exclusive;
/// the per-wallet-cap mode emits nothing here since the cap itself bounds
/// the concern.
fn mint_access(facts: &ConfigFacts) -> Option<Consequence> {
    if !facts.contract_type.is_nft() {
        return None;
    }
    match facts.mint_access_mode {
        Some(MintAccessMode::Public) => {
            let what = if facts.contract_type == ContractType::Erc1155 {
                "tokens for all token IDs"
            } else {
                "NFTs"
            };
            Some(Consequence {
                id: "public-minting",
                severity: Severity::Critical,
                title: "Public minting enabled without restrictions".into(),
                explanation: format!("Anyone can mint {what} from this contract."),
                tooltip: "Public minting means any address can create new tokens. Without max \
                          supply caps, this creates unlimited supply risk. Only use for open \
                          access projects like POAPs or badges."
                    .into(),
            })
        }
        Some(MintAccessMode::OnlyOwner) => Some(Consequence {
            id: "owner-only-minting",
            severity: Severity::Info,
            title: "Owner-only minting".into(),
            explanation: "Only the contract owner can mint new tokens.".into(),
            tooltip: "This gives you full control over NFT creation but limits community \
                      participation."
                .into(),
        }),
        _ => None,
    }
}

fn burnable(facts: &ConfigFacts) -> Option<Consequence> {
    if facts.is_burnable {
        Some(Consequence {
            id: "burnable",
            severity: Severity::Info,
            title: "Token holders can burn".into(),
            explanation: "Users can permanently destroy their own tokens.".into(),
            tooltip: "Burning reduces total supply. This is irreversible.".into(),
        })
    } else {
        None
    }
}

fn nft_supply_cap(facts: &ConfigFacts) -> Option<Consequence> {
    if facts.contract_type.is_nft() && facts.has_max_supply {
        let max = facts.max_supply.clone().unwrap_or_default();
        Some(Consequence {
            id: "nft-supply-cap",
            severity: Severity::Info,
            title: format!("Collection limited to {max} items"),
            explanation: "This maximum cannot be increased later.".into(),
            tooltip: "Fixed supply creates scarcity but limits future expansion.".into(),
        })
    } else {
        None
    }
}
