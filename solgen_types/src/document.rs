use crate::error::AbiParseError;
use crate::types::{AbiType, RawArgument};
use serde_derive::{Deserialize, Serialize};

/// Value of the `type` field of an ABI entry.
///
/// https://docs.soliditylang.org/en/latest/abi-spec.html#json
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    #[default]
    Function,
    Constructor,
    Event,
    Fallback,
    Receive,
}

/// One element of the top-level ABI JSON array.
#[derive(Deserialize, Debug)]
struct RawEntry {
    #[serde(rename = "type", default)]
    kind: EntryKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<RawArgument>,
    #[serde(default)]
    outputs: Vec<RawArgument>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    anonymous: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Specified to not read blockchain state
    Pure,
    /// Specified to not modify the blockchain state
    View,
    /// Function does not accept ether
    Nonpayable,
    /// Function accepts ether
    Payable,
}

/// A named, typed parameter of a method or event.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
    #[serde(default)]
    pub indexed: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: AbiType) -> Self {
        Self { name: name.into(), ty, indexed: false }
    }

    pub fn indexed(name: impl Into<String>, ty: AbiType) -> Self {
        Self { name: name.into(), ty, indexed: true }
    }

    fn from_raw(raw: &RawArgument) -> Result<Self, AbiParseError> {
        Ok(Self {
            name: raw.name.clone(),
            ty: AbiType::from_raw(raw)?,
            indexed: raw.indexed,
        })
    }
}

/// Function, constructor, fallback or receive entry.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Method {
    /// Unique name within the document (overloads get `foo0`, `foo1`, ...).
    pub name: String,
    /// Name as declared in the contract source.
    pub raw_name: String,
    pub inputs: Vec<Argument>,
    pub outputs: Vec<Argument>,
    pub state_mutability: StateMutability,
}

impl Method {
    pub fn new(name: impl Into<String>, state_mutability: StateMutability) -> Self {
        let name = name.into();
        Self {
            raw_name: name.clone(),
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<Argument>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<Argument>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Read-only methods are bound as calls, everything else as transactions.
    pub fn is_constant(&self) -> bool {
        matches!(self.state_mutability, StateMutability::View | StateMutability::Pure)
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }

    /// Human readable signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        signature(&self.raw_name, &self.inputs)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Event {
    pub name: String,
    pub raw_name: String,
    pub anonymous: bool,
    pub inputs: Vec<Argument>,
}

impl Event {
    pub fn new(name: impl Into<String>, inputs: Vec<Argument>) -> Self {
        let name = name.into();
        Self { raw_name: name.clone(), name, anonymous: false, inputs }
    }

    pub fn signature(&self) -> String {
        signature(&self.raw_name, &self.inputs)
    }
}

/// A parsed contract ABI.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct AbiDocument {
    pub constructor: Option<Method>,
    pub fallback: Option<Method>,
    pub receive: Option<Method>,
    /// Functions in declaration order.
    pub methods: Vec<Method>,
    /// Events in declaration order.
    pub events: Vec<Event>,
}

impl AbiDocument {
    /// Parses standard ABI JSON (an array of entries).
    pub fn from_json(text: &str) -> Result<Self, AbiParseError> {
        let entries: Vec<RawEntry> = serde_json::from_str(text)?;
        let mut document = AbiDocument::default();

        for entry in entries {
            match entry.kind {
                EntryKind::Function => {
                    if entry.name.is_empty() {
                        return Err(AbiParseError::MissingName { kind: "function" });
                    }
                    let name = resolve_name_conflict(&entry.name, |candidate| {
                        document.methods.iter().any(|m| m.name == candidate)
                    });
                    let method = method_from_entry(name, &entry)
                        .map_err(|err| err.in_member("function", &entry.name))?;
                    document.methods.push(method);
                }
                EntryKind::Event => {
                    if entry.name.is_empty() {
                        return Err(AbiParseError::MissingName { kind: "event" });
                    }
                    let name = resolve_name_conflict(&entry.name, |candidate| {
                        document.events.iter().any(|e| e.name == candidate)
                    });
                    let inputs = parse_arguments(&entry.inputs)
                        .map_err(|err| err.in_member("event", &entry.name))?;
                    document.events.push(Event {
                        name,
                        raw_name: entry.name.clone(),
                        anonymous: entry.anonymous,
                        inputs,
                    });
                }
                // A later constructor/fallback/receive replaces an earlier one.
                EntryKind::Constructor => {
                    let method = method_from_entry(String::new(), &entry)
                        .map_err(|err| err.in_member("constructor", ""))?;
                    document.constructor = Some(method);
                }
                EntryKind::Fallback => {
                    document.fallback = Some(method_from_entry(String::new(), &entry)?);
                }
                EntryKind::Receive => {
                    document.receive = Some(method_from_entry(String::new(), &entry)?);
                }
            }
        }

        Ok(document)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }
}

fn method_from_entry(name: String, entry: &RawEntry) -> Result<Method, AbiParseError> {
    Ok(Method {
        name,
        raw_name: entry.name.clone(),
        inputs: parse_arguments(&entry.inputs)?,
        outputs: parse_arguments(&entry.outputs)?,
        state_mutability: mutability(entry),
    })
}

fn parse_arguments(raw: &[RawArgument]) -> Result<Vec<Argument>, AbiParseError> {
    raw.iter().map(Argument::from_raw).collect()
}

/* Pre-0.4.16 ABIs only carry `constant`/`payable`; transitional ones carry
 * both forms. A legacy flag set to true is honoured either way. */
fn mutability(entry: &RawEntry) -> StateMutability {
    let declared = entry.state_mutability.unwrap_or(StateMutability::Nonpayable);
    match declared {
        StateMutability::View | StateMutability::Pure => declared,
        _ if entry.constant => StateMutability::View,
        StateMutability::Nonpayable if entry.payable => StateMutability::Payable,
        _ => declared,
    }
}

/// Returns `raw` if unused, otherwise the first of `raw0`, `raw1`, ... that is.
fn resolve_name_conflict(raw: &str, used: impl Fn(&str) -> bool) -> String {
    let mut name = raw.to_string();
    let mut idx = 0;
    while used(&name) {
        name = format!("{raw}{idx}");
        idx += 1;
    }
    name
}

fn signature(name: &str, args: &[Argument]) -> String {
    let types: Vec<String> = args.iter().map(|arg| arg.ty.to_string()).collect();
    format!("{}({})", name, types.join(","))
}
