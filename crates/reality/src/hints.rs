use wizard_core::types::{ContractType, MintAccessMode};

use crate::facts::ConfigFacts;
use crate::types::ScenarioHint;

/// Additive advisory text alongside the consequences: no severity, no
/// mutual exclusion. Total; absent facts simply suppress their hint.
pub fn generate_hints(facts: &ConfigFacts) -> Vec<ScenarioHint> {
    let mut hints = Vec::new();

    if facts.contract_type.is_nft() && !facts.has_metadata_uri {
        hints.push(ScenarioHint {
            condition: "For marketplace integrations",
            hint: "OpenSea, Rarible, and other marketplaces require a metadata URI to display \
                   token information. Tokens without metadata appear blank or broken."
                .into(),
        });
    }

    if facts.contract_type == ContractType::Erc20 && !facts.is_mintable && !facts.has_max_supply {
        hints.push(ScenarioHint {
            condition: "For production token economics",
            hint: "Fixed supply with no minting capability means you cannot respond to demand \
                   changes or add liquidity later. Ensure the initial supply meets all future \
                   needs."
                .into(),
        });
    }

    if !facts.is_pausable {
        hints.push(ScenarioHint {
            condition: "If security incidents occur",
            hint: "Without pause capability, you cannot stop malicious activity or freeze \
                   transfers during vulnerability disclosure. Consider enabling pause for \
                   production deployments."
                .into(),
        });
    }

    if facts.is_owner_custom {
        hints.push(ScenarioHint {
            condition: "Before finalizing deployment",
            hint: "Verify the owner address multiple times. Use an address from a hardware \
                   wallet or multisig for production contracts. Loss of access means permanent \
                   loss of control."
                .into(),
        });
    }

    if facts.mint_access_mode == Some(MintAccessMode::Public) && !facts.has_max_supply {
        hints.push(ScenarioHint {
            condition: "For public minting without caps",
            hint: "This configuration allows unlimited minting by anyone. Only appropriate for \
                   free, unlimited access projects (badges, POAPs, attendance tokens)."
                .into(),
        });
    }

    if facts.contract_type == ContractType::Erc1155
        && facts.mint_access_mode == Some(MintAccessMode::Public)
    {
        hints.push(ScenarioHint {
            condition: "For ERC-1155 public minting",
            hint: "Public mint access applies to ALL token IDs in this contract. Anyone can \
                   mint unlimited quantities unless per-token caps are set."
                .into(),
        });
    }

    hints
}
