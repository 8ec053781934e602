//! Contract ABI to binding IR compiler.
//!
//! Reads an ABI document, keeps the members exposed by a [`Customs`]
//! allow-list, normalizes names and types for a target [`Lang`], resolves
//! tuple types into named records and assembles a [`ContractDescriptor`]
//! that a template emitter can render without looking at the ABI again.
//!
//! # Example
//! ```
//! use solgen_gen::{load_contract, Customs, Lang};
//!
//! let abi = r#"[{"type":"function","name":"getValue","stateMutability":"view",
//!               "inputs":[],"outputs":[{"name":"","type":"uint256"}]}]"#;
//! let customs = Customs::default().expose("getValue");
//! let contract = load_contract(abi, &customs, Lang::Go).unwrap();
//!
//! assert_eq!(contract.calls["getValue"].normalized.name, "GetValue");
//! assert_eq!(contract.calls["getValue"].normalized.outputs[0].bound_type, "*big.Int");
//! assert!(contract.transacts.is_empty());
//! ```

pub mod customs;
pub mod descriptor;
pub mod error;
pub mod lang;
pub mod loader;
pub mod parser;
pub mod structs;

pub use customs::Customs;
pub use descriptor::{
    BoundArgument, BoundEvent, BoundField, BoundMethod, BoundStruct, ContractDescriptor,
    NormalizedEvent, NormalizedMethod,
};
pub use error::{BindError, BindResult};
pub use lang::Lang;
pub use loader::{canonicalize_abi, load_contract, load_contract_with};
pub use parser::parse_contract;
pub use structs::{StructDef, StructRegistry, StructResolver, MAX_STRUCT_DEPTH};

// Re-export solgen_types for convenience
pub use solgen_types;
