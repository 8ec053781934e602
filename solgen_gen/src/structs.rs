//! Tuple-to-record resolution.
//!
//! The registry is scoped to one compilation and keyed by
//! [`TupleType::signature`]; a tuple seen twice is registered once.

use crate::error::{BindError, BindResult};
use crate::lang::Lang;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use solgen_types::{AbiType, TupleType};
use std::collections::{BTreeMap, HashMap};

/// Nesting limit for tuples inside tuples.
pub const MAX_STRUCT_DEPTH: usize = 64;

/// A record definition discovered while walking method/event arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub signature: String,
    /// Display name; defaults to the raw struct name or `Struct<n>`.
    pub name: String,
    pub fields: Vec<StructFieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructFieldDef {
    /// Field name normalized for the target language.
    pub name: String,
    /// Component name as declared in the ABI.
    pub original_name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
}

/// Resolution-ordered set of records. Nested records always precede the
/// records that contain them.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    structs: IndexMap<String, StructDef>,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.structs.contains_key(signature)
    }

    pub fn get(&self, signature: &str) -> Option<&StructDef> {
        self.structs.get(signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructDef> {
        self.structs.values()
    }

    fn name_taken(&self, name: &str) -> bool {
        self.structs.values().any(|def| def.name == name)
    }

    fn insert(&mut self, def: StructDef) {
        self.structs.insert(def.signature.clone(), def);
    }

    /// Applies `signature -> name` overrides. Must run after every tuple has
    /// been resolved so no later registration can pick a name that an
    /// override is about to claim.
    ///
    /// Overrides for signatures that were never registered are ignored.
    pub fn apply_renames(&mut self, renames: &BTreeMap<String, String>) -> BindResult<()> {
        for (signature, rename) in renames {
            if let Some(def) = self.structs.get_mut(signature) {
                def.name = rename.clone();
            }
        }

        let mut seen: HashMap<&str, &str> = HashMap::with_capacity(self.structs.len());
        for def in self.structs.values() {
            if let Some(previous) = seen.insert(def.name.as_str(), def.signature.as_str()) {
                return Err(BindError::DuplicateIdentifier {
                    kind: "struct",
                    name: format!("{} / {}", previous, def.signature),
                    normalized: def.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Walks ABI types and registers every tuple it finds.
pub struct StructResolver<'a> {
    lang: Lang,
    registry: &'a mut StructRegistry,
}

impl<'a> StructResolver<'a> {
    pub fn new(lang: Lang, registry: &'a mut StructRegistry) -> Self {
        Self { lang, registry }
    }

    /// Registers the tuple(s) reachable from `ty`. Non-tuple types are a no-op.
    pub fn resolve(&mut self, ty: &AbiType) -> BindResult<()> {
        self.resolve_at(ty, 0)
    }

    fn resolve_at(&mut self, ty: &AbiType, depth: usize) -> BindResult<()> {
        match ty {
            AbiType::Array { element, .. } | AbiType::Slice { element } => {
                self.resolve_at(element, depth)
            }
            AbiType::Tuple(tuple) => self.resolve_tuple(tuple, depth),
            _ => Ok(()),
        }
    }

    fn resolve_tuple(&mut self, tuple: &TupleType, depth: usize) -> BindResult<()> {
        let signature = tuple.signature();
        if self.registry.contains(&signature) {
            return Ok(());
        }
        if depth >= MAX_STRUCT_DEPTH {
            return Err(BindError::StructTooDeep {
                signature,
                limit: MAX_STRUCT_DEPTH,
            });
        }

        for component in &tuple.components {
            self.resolve_at(&component.ty, depth + 1)?;
        }

        let fields = tuple
            .components
            .iter()
            .map(|component| StructFieldDef {
                name: self.lang.normalize_field(&component.name),
                original_name: component.name.clone(),
                ty: component.ty.clone(),
            })
            .collect();
        let name = self.default_name(tuple);
        self.registry.insert(StructDef {
            signature,
            name,
            fields,
        });
        Ok(())
    }

    fn default_name(&self, tuple: &TupleType) -> String {
        let base = if tuple.raw_name.is_empty() {
            format!("Struct{}", self.registry.len())
        } else {
            tuple.raw_name.clone()
        };
        if !self.registry.name_taken(&base) {
            return base;
        }
        let mut idx = 0;
        loop {
            let candidate = format!("{base}{idx}");
            if !self.registry.name_taken(&candidate) {
                return candidate;
            }
            idx += 1;
        }
    }
}
