//! Per-language naming and type binding rules.
//!
//! Each supported target is one variant of [`Lang`]; every rule dispatches on
//! the variant to that language's module, so adding a target means adding a
//! variant and a module rather than registering callbacks at runtime.

mod go;
mod java;

use crate::error::BindResult;
use crate::structs::StructRegistry;
use serde_derive::{Deserialize, Serialize};
use solgen_types::AbiType;
use std::fmt;

pub use solgen_types::to_camel_case;

/// Target host language of the generated bindings.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Go,
    Java,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Go, Lang::Java];

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Go => "go",
            Lang::Java => "java",
        }
    }

    /// Name of a method or event in the generated code.
    pub fn normalize_method(self, name: &str) -> String {
        match self {
            Lang::Go => capitalise(name),
            Lang::Java => decapitalise(name),
        }
    }

    /// Name of a struct field in the generated code.
    pub fn normalize_field(self, name: &str) -> String {
        match self {
            Lang::Go => capitalise(name),
            Lang::Java => decapitalise(name),
        }
    }

    pub fn is_reserved(self, name: &str) -> bool {
        match self {
            Lang::Go => go::KEYWORDS.contains(&name),
            Lang::Java => java::KEYWORDS.contains(&name),
        }
    }

    /// Whether arbitrary records can cross the binding boundary.
    pub fn supports_structs(self) -> bool {
        match self {
            Lang::Go => true,
            Lang::Java => false,
        }
    }

    /// Host type token for an ABI type. Tuples resolve through `structs`.
    pub fn bind_type(self, ty: &AbiType, structs: &StructRegistry) -> BindResult<String> {
        match self {
            Lang::Go => go::bind_type(ty, structs),
            Lang::Java => java::bind_type(ty, structs),
        }
    }

    /// Host type token for an indexed event parameter.
    ///
    /// Reference types are not stored in topics directly, only the keccak256
    /// hash of their encoding is, so they bind to the language's hash type.
    pub fn bind_topic_type(self, ty: &AbiType, structs: &StructRegistry) -> BindResult<String> {
        if ty.is_reference_type() {
            let hash = match self {
                Lang::Go => go::HASH_TYPE,
                Lang::Java => java::HASH_TYPE,
            };
            return Ok(hash.to_string());
        }
        self.bind_type(ty, structs)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exported (Go-style) form of an identifier.
pub fn capitalise(input: &str) -> String {
    to_camel_case(input)
}

/// Camel case with a lower-case first letter: `Get_value` -> `getValue`.
pub fn decapitalise(input: &str) -> String {
    let camel = to_camel_case(input);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
