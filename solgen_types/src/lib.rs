//! Contract ABI Definitions
//!
//! This crate contains the data model for contract ABI documents and the
//! JSON parsing that produces it. It carries no naming or code generation
//! logic; see `solgen_gen` for that.

pub mod document;
pub mod error;
pub mod types;

// Re-export commonly used types at the crate root
pub use document::{AbiDocument, Argument, Event, Method, StateMutability};
pub use error::AbiParseError;
pub use types::{to_camel_case, AbiType, RawArgument, TupleComponent, TupleType};
