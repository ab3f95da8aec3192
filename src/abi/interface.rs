use alloy::primitives::hex;
use alloy::json_abi::{Function, JsonAbi};
use serde_json::Value;
use std::path::Path;
use crate::error::{Error, Result};

const ORACLE_ABI: &str = r#"[
  {"type":"function","name":"feedExists","stateMutability":"view",
   "inputs":[{"name":"symbol","type":"string","internalType":"string"}],
   "outputs":[{"name":"","type":"bool","internalType":"bool"}]},
  {"type":"function","name":"isActive","stateMutability":"view",
   "inputs":[{"name":"symbol","type":"string","internalType":"string"}],
   "outputs":[{"name":"","type":"bool","internalType":"bool"}]},
  {"type":"function","name":"getPrice","stateMutability":"view",
   "inputs":[{"name":"symbol","type":"string","internalType":"string"}],
   "outputs":[{"name":"","type":"uint256","internalType":"uint256"}]},
  {"type":"function","name":"getLastUpdated","stateMutability":"view",
   "inputs":[{"name":"symbol","type":"string","internalType":"string"}],
   "outputs":[{"name":"","type":"uint256","internalType":"uint256"}]}
]"#;

/// JSON ABI of a deployed contract, used to check it against the oracle bindings.
#[derive(Clone, Debug, Default)]
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    /// The built-in price oracle ABI.
    pub fn oracle_default() -> Self {
        // The embedded ABI is a constant; a parse failure here is a build defect.
        Self::from_artifact_json(ORACLE_ABI).unwrap_or_default()
    }

    /// Accepts either a compiler artifact (`{"abi": [...]}`) or a bare ABI array.
    pub fn from_artifact_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::ArtifactParse(e.to_string()))?;

        let abi = match value {
            Value::Array(_) => value,
            Value::Object(mut obj) => obj
                .remove("abi")
                .ok_or_else(|| Error::ArtifactParse("artifact has no `abi` field".to_string()))?,
            _ => return Err(Error::ArtifactParse("expected an ABI array or artifact object".to_string())),
        };

        let abi: JsonAbi = serde_json::from_value(abi)
            .map_err(|e| Error::ArtifactParse(e.to_string()))?;
        Ok(ContractInterface { abi })
    }

    pub fn from_artifact_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_artifact_json(&json)
    }

    /// First declared overload of `name`.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::AbiFunctionMissing(name.to_string()))
    }

    /// Every `(name, selector)` pair must be declared by some overload.
    pub fn require(&self, functions: &[(&str, [u8; 4])]) -> Result<()> {
        for (name, selector) in functions {
            let overloads = self.abi
                .function(name)
                .ok_or_else(|| Error::AbiFunctionMissing(name.to_string()))?;

            if !overloads.iter().any(|f| f.selector().0 == *selector) {
                let declared: Vec<String> = overloads.iter().map(|f| f.signature()).collect();
                return Err(Error::AbiFunctionMissing(format!(
                    "{} with selector 0x{} (declared: {})",
                    name,
                    hex::encode(selector),
                    declared.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.abi.functions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
