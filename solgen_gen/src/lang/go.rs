/* Go binding rules */

use super::capitalise;
use crate::error::{BindError, BindResult};
use crate::lang::Lang;
use crate::structs::StructRegistry;
use solgen_types::{AbiType, TupleType};

pub(super) const HASH_TYPE: &str = "common.Hash";

pub(super) const KEYWORDS: &[&str] = &[
  "break", "case", "chan", "const", "continue", "default", "defer", "else",
  "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
  "map", "package", "range", "return", "select", "struct", "switch", "type",
  "var",
];

pub(super) fn bind_type(ty: &AbiType, structs: &StructRegistry) -> BindResult<String> {
  match ty {
    AbiType::Int { bits } => Ok(bind_integer("int", *bits)),
    AbiType::Uint { bits } => Ok(bind_integer("uint", *bits)),
    AbiType::Address => Ok("common.Address".to_string()),
    AbiType::Bool => Ok("bool".to_string()),
    AbiType::String => Ok("string".to_string()),
    AbiType::Bytes => Ok("[]byte".to_string()),
    AbiType::FixedBytes { size } => Ok(format!("[{size}]byte")),
    AbiType::Function => Ok("[24]byte".to_string()),
    AbiType::Fixed { .. } => Err(BindError::unsupported_type(Lang::Go, ty)),
    AbiType::Array { element, size } => Ok(format!("[{size}]{}", bind_type(element, structs)?)),
    AbiType::Slice { element } => Ok(format!("[]{}", bind_type(element, structs)?)),
    AbiType::Tuple(tuple) => match structs.get(&tuple.signature()) {
      Some(def) => Ok(def.name.clone()),
      None => bind_inline_struct(tuple, structs),
    },
  }
}

/* Native integers only exist for 8/16/32/64 bits; everything else is a big.Int */
fn bind_integer(prefix: &str, bits: u16) -> String {
  match bits {
    8 | 16 | 32 | 64 => format!("{prefix}{bits}"),
    _ => "*big.Int".to_string(),
  }
}

/* Tuples that never went through the struct registry (non-indexed event
 * fields) are spelled out as anonymous struct types. */
fn bind_inline_struct(tuple: &TupleType, structs: &StructRegistry) -> BindResult<String> {
  let mut fields = Vec::with_capacity(tuple.components.len());
  for component in &tuple.components {
    fields.push(format!("{} {}", capitalise(&component.name), bind_type(&component.ty, structs)?));
  }
  Ok(format!("struct {{ {} }}", fields.join("; ")))
}
