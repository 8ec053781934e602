/* Java binding rules (gomobile-style wrappers) */

use crate::error::{BindError, BindResult};
use crate::lang::Lang;
use crate::structs::StructRegistry;
use solgen_types::AbiType;

pub(super) const HASH_TYPE: &str = "Hash";

pub(super) const KEYWORDS: &[&str] = &[
  "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
  "class", "const", "continue", "default", "do", "double", "else", "enum",
  "extends", "final", "finally", "float", "for", "goto", "if", "implements",
  "import", "instanceof", "int", "interface", "long", "native", "new",
  "package", "private", "protected", "public", "return", "short", "static",
  "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
  "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

pub(super) fn bind_type(ty: &AbiType, structs: &StructRegistry) -> BindResult<String> {
  match ty {
    AbiType::Address => Ok("Address".to_string()),
    /* Unsigned integers have no Java counterpart, so they all become BigInt */
    AbiType::Uint { .. } => Ok("BigInt".to_string()),
    AbiType::Int { bits } => Ok(
      match bits {
        8 => "byte",
        16 => "short",
        32 => "int",
        64 => "long",
        _ => "BigInt",
      }
      .to_string(),
    ),
    AbiType::Bytes | AbiType::FixedBytes { .. } => Ok("byte[]".to_string()),
    AbiType::Bool => Ok("boolean".to_string()),
    AbiType::String => Ok("String".to_string()),
    AbiType::Function | AbiType::Fixed { .. } => Err(BindError::unsupported_type(Lang::Java, ty)),
    AbiType::Array { element, .. } | AbiType::Slice { element } => {
      Ok(pluralize(&bind_type(element, structs)?))
    }
    AbiType::Tuple(tuple) => structs
      .get(&tuple.signature())
      .map(|def| def.name.clone())
      .ok_or_else(|| BindError::unsupported_type(Lang::Java, ty)),
  }
}

/* The Go mobile wrappers expose dedicated collection types for the common
 * element types. */
fn pluralize(element: &str) -> String {
  match element {
    "boolean" => "Bools".to_string(),
    "String" => "Strings".to_string(),
    "Address" => "Addresses".to_string(),
    "byte[]" => "Binaries".to_string(),
    "BigInt" => "BigInts".to_string(),
    other => format!("{other}[]"),
  }
}
