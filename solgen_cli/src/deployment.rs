//! Deployment and option files.
//!
//! A deployment file maps contract names to their ABI, either inline or as a
//! JSON-encoded string, optionally alongside the deployed address:
//!
//! ```json
//! {
//!   "Token": { "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3", "abi": [ ... ] },
//!   "Vault": "[{\"type\":\"function\", ...}]"
//! }
//! ```
//!
//! The option file maps the same names to their allow-lists.

use anyhow::{Context, Result};
use serde_derive::Deserialize;
use solgen_gen::Customs;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeploymentEntry {
    Deployed {
        #[serde(default)]
        address: Option<String>,
        abi: serde_json::Value,
    },
    Abi(String),
}

/// One contract listed in a deployment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub address: Option<String>,
    /// ABI JSON text.
    pub abi: String,
}

/// Contracts in name order.
pub fn parse_deployments(text: &str) -> Result<Vec<Deployment>> {
    let entries: BTreeMap<String, DeploymentEntry> =
        serde_json::from_str(text).context("deployment file is not a JSON object of contracts")?;

    entries
        .into_iter()
        .map(|(name, entry)| -> Result<Deployment> {
            let (address, abi) = match entry {
                DeploymentEntry::Deployed { address, abi } => {
                    let abi = match abi {
                        serde_json::Value::String(text) => text,
                        other => serde_json::to_string(&other)?,
                    };
                    (address, abi)
                }
                DeploymentEntry::Abi(abi) => (None, abi),
            };
            Ok(Deployment { name, address, abi })
        })
        .collect()
}

pub fn load_deployments(path: &Path) -> Result<Vec<Deployment>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deployment file {}", path.display()))?;
    parse_deployments(&text).with_context(|| format!("invalid deployment file {}", path.display()))
}

/// Contract name -> allow-list.
pub fn parse_options(text: &str) -> Result<BTreeMap<String, Customs>> {
    serde_json::from_str(text).context("option file is not a JSON object of allow-lists")
}

pub fn load_options(path: &Path) -> Result<BTreeMap<String, Customs>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read option file {}", path.display()))?;
    parse_options(&text).with_context(|| format!("invalid option file {}", path.display()))
}
