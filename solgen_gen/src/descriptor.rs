//! Binding IR handed to emitters.
//!
//! A [`ContractDescriptor`] holds everything a template needs to render one
//! contract: original and normalized members, host type tokens, and the
//! record definitions those tokens refer to. Emitters never have to look at
//! the ABI document again; the escaped ABI text is carried along for
//! embedding into generated code.
//!
//! The IR serializes with serde so out-of-process emitters can consume it.

use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use solgen_types::{AbiType, Event, Method};
use std::collections::BTreeMap;

/// Compiled form of one contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    /// Constructor, bound like a method (its inputs are normalized).
    #[serde(default)]
    pub constructor: Option<BoundMethod>,
    /// Fallback function definition, if the contract declares one.
    #[serde(default)]
    pub fallback: Option<Method>,
    /// Receive function definition, if the contract declares one.
    #[serde(default)]
    pub receive: Option<Method>,
    /// Read-only methods keyed by original (overload-resolved) name.
    pub calls: BTreeMap<String, BoundMethod>,
    /// State-mutating methods keyed by original name.
    pub transacts: BTreeMap<String, BoundMethod>,
    /// Non-anonymous events keyed by original name.
    pub events: BTreeMap<String, BoundEvent>,
    /// Records keyed by canonical signature, dependencies first.
    pub structs: IndexMap<String, BoundStruct>,
    /// Whitespace-stripped ABI with `"` escaped as `\"`.
    #[serde(default)]
    pub input_abi: String,
}

impl ContractDescriptor {
    pub fn call(&self, name: &str) -> Option<&BoundMethod> {
        self.calls.get(name)
    }

    pub fn transact(&self, name: &str) -> Option<&BoundMethod> {
        self.transacts.get(name)
    }

    pub fn event(&self, name: &str) -> Option<&BoundEvent> {
        self.events.get(name)
    }

    /// Looks a record up by display name rather than signature.
    pub fn struct_named(&self, name: &str) -> Option<&BoundStruct> {
        self.structs.values().find(|s| s.name == name)
    }

    /// Calls followed by transacts.
    pub fn methods(&self) -> impl Iterator<Item = &BoundMethod> {
        self.calls.values().chain(self.transacts.values())
    }
}

/// A method paired with its normalized, type-bound copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundMethod {
    pub original: Method,
    pub normalized: NormalizedMethod,
    /// True when the outputs can be returned as one record: at least two,
    /// all named, no two names colliding once capitalized.
    pub structured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMethod {
    /// Name in the target language's casing (aliases applied).
    pub name: String,
    /// Source-level signature, e.g. `transfer(address,uint256)`.
    pub signature: String,
    pub inputs: Vec<BoundArgument>,
    pub outputs: Vec<BoundArgument>,
    pub constant: bool,
    pub payable: bool,
}

/// An event paired with its normalized, type-bound copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundEvent {
    pub original: Event,
    pub normalized: NormalizedEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub name: String,
    pub signature: String,
    /// Every input, indexed or not, in declaration order.
    pub inputs: Vec<BoundArgument>,
}

impl NormalizedEvent {
    /// Inputs that can be used as topic filters.
    pub fn indexed(&self) -> impl Iterator<Item = &BoundArgument> {
        self.inputs.iter().filter(|arg| arg.indexed)
    }

    /// Inputs decoded from the log data.
    pub fn data(&self) -> impl Iterator<Item = &BoundArgument> {
        self.inputs.iter().filter(|arg| !arg.indexed)
    }
}

/// Normalized argument with its host type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
    /// Host type token, e.g. `*big.Int`.
    pub bound_type: String,
    #[serde(default)]
    pub indexed: bool,
    /// Host type used when filtering on this argument; indexed inputs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_type: Option<String>,
}

/// Record definition with host types for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundStruct {
    pub signature: String,
    pub name: String,
    pub fields: Vec<BoundField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundField {
    pub name: String,
    pub original_name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
    pub bound_type: String,
}
