use serde_derive::{Deserialize, Serialize};
use solgen_types::AbiDocument;
use std::collections::BTreeMap;

/// Caller-supplied binding policy for one contract.
///
/// JSON form: `{ "Methods": {name: bool}, "Structs": {signature: name}, "Aliases": {name: alias} }`,
/// every key optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Customs {
    /// Method name (overload-resolved) -> exposed. Missing means not exposed.
    #[serde(rename = "Methods", default)]
    pub methods: BTreeMap<String, bool>,
    /// Struct signature -> display name override.
    #[serde(rename = "Structs", default)]
    pub structs: BTreeMap<String, String>,
    /// Method/event name -> name fed to the language normalizer instead.
    #[serde(rename = "Aliases", default)]
    pub aliases: BTreeMap<String, String>,
}

impl Customs {
    /// Exposes every name in `names`.
    pub fn expose_all<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            methods: names.into_iter().map(|name| (name.to_string(), true)).collect(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn expose(mut self, method: impl Into<String>) -> Self {
        self.methods.insert(method.into(), true);
        self
    }

    pub fn rename_struct(mut self, signature: impl Into<String>, name: impl Into<String>) -> Self {
        self.structs.insert(signature.into(), name.into());
        self
    }

    pub fn alias(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(name.into(), alias.into());
        self
    }

    /// Exposes every function of `document`, overriding any `false` entry.
    /// Struct renames and aliases are kept.
    pub fn expose_document(mut self, document: &AbiDocument) -> Self {
        for method in &document.methods {
            self.methods.insert(method.name.clone(), true);
        }
        self
    }

    pub fn is_exposed(&self, method: &str) -> bool {
        self.methods.get(method).copied().unwrap_or(false)
    }

    /// Name to normalize for `name`: its alias when one is declared.
    pub fn aliased<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}
