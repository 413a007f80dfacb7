use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use anyhow::{Context, Result};
use wizard_core::types::ContractType;

/// Pre-compiled contract template: the ABI and creation bytecode are fixed
/// build artifacts embedded at compile time, never edited by the wizard.
pub struct ContractTemplate {
    pub contract_name: &'static str,
    abi_json: &'static str,
    bytecode_hex: &'static str,
}

static ERC20_TEMPLATE: ContractTemplate = ContractTemplate {
    contract_name: "ConfigurableERC20",
    abi_json: include_str!("../../../contracts/abi/ConfigurableERC20.json"),
    bytecode_hex: include_str!("../../../contracts/bytecode/ConfigurableERC20.hex"),
};

static ERC721_TEMPLATE: ContractTemplate = ContractTemplate {
    contract_name: "ConfigurableERC721",
    abi_json: include_str!("../../../contracts/abi/ConfigurableERC721.json"),
    bytecode_hex: include_str!("../../../contracts/bytecode/ConfigurableERC721.hex"),
};

static ERC1155_TEMPLATE: ContractTemplate = ContractTemplate {
    contract_name: "ConfigurableERC1155",
    abi_json: include_str!("../../../contracts/abi/ConfigurableERC1155.json"),
    bytecode_hex: include_str!("../../../contracts/bytecode/ConfigurableERC1155.hex"),
};

pub fn template(contract_type: ContractType) -> Option<&'static ContractTemplate> {
    match contract_type {
        ContractType::Erc20 => Some(&ERC20_TEMPLATE),
        ContractType::Erc721 => Some(&ERC721_TEMPLATE),
        ContractType::Erc1155 => Some(&ERC1155_TEMPLATE),
        ContractType::RiskScanner => None,
    }
}

impl ContractTemplate {
    pub fn abi(&self) -> Result<JsonAbi> {
        serde_json::from_str(self.abi_json)
            .with_context(|| format!("malformed ABI for {}", self.contract_name))
    }

    pub fn bytecode(&self) -> Result<Bytes> {
        let stripped = self.bytecode_hex.trim().trim_start_matches("0x");
        let raw = hex::decode(stripped)
            .with_context(|| format!("malformed bytecode for {}", self.contract_name))?;
        Ok(Bytes::from(raw))
    }

    pub fn bytecode_hex(&self) -> &'static str {
        self.bytecode_hex.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployable_types_have_templates() {
        for ct in [
            ContractType::Erc20,
            ContractType::Erc721,
            ContractType::Erc1155,
        ] {
            let tpl = template(ct).unwrap();
            let abi = tpl.abi().unwrap();
            assert!(abi.constructor.is_some(), "{ct} template missing constructor");
            assert!(!tpl.bytecode().unwrap().is_empty());
        }
    }

    #[test]
    fn risk_scanner_has_no_template() {
        assert!(template(ContractType::RiskScanner).is_none());
    }

    #[test]
    fn constructor_arity_matches_encoder_contract() {
        let arity = |ct| {
            template(ct)
                .unwrap()
                .abi()
                .unwrap()
                .constructor
                .unwrap()
                .inputs
                .len()
        };
        assert_eq!(arity(ContractType::Erc20), 8);
        assert_eq!(arity(ContractType::Erc721), 8);
        assert_eq!(arity(ContractType::Erc1155), 9);
    }
}
