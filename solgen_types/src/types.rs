use crate::error::AbiParseError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

const STRUCT_PREFIX: &str = "struct ";

/// Argument entry exactly as it appears in ABI JSON.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct RawArgument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub components: Vec<RawArgument>,
    #[serde(rename = "internalType", default)]
    pub internal_type: Option<String>,
    #[serde(default)]
    pub indexed: bool,
}

/// Parsed ABI type.
///
/// Arrays and slices nest, so `(uint256,bool)[2][]` is a slice of a
/// two-element array of a tuple.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AbiType {
    Int { bits: u16 },
    Uint { bits: u16 },
    Address,
    Bool,
    String,
    Bytes,
    FixedBytes { size: usize },
    /// 24-byte function pointer (address + selector).
    Function,
    Fixed { signed: bool, bits: u16, decimals: u16 },
    Array { element: Box<AbiType>, size: usize },
    Slice { element: Box<AbiType> },
    Tuple(TupleType),
}

/// Structured ABI type with named components.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct TupleType {
    /// Struct name from `internalType` (`struct Lib.Point` -> `LibPoint`).
    /// Empty for compilers that do not emit internal types.
    #[serde(default)]
    pub raw_name: String,
    pub components: Vec<TupleComponent>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct TupleComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
}

impl AbiType {
    /// Parses a JSON argument, including its tuple components.
    pub fn from_raw(raw: &RawArgument) -> Result<Self, AbiParseError> {
        Self::parse(&raw.type_, &raw.components, raw.internal_type.as_deref())
    }

    /// Parses a type string. `components` and `internal_type` only matter for
    /// tuple types (and arrays of them).
    pub fn parse(
        ty: &str,
        components: &[RawArgument],
        internal_type: Option<&str>,
    ) -> Result<Self, AbiParseError> {
        let ty = ty.trim();

        if ty.ends_with(']') {
            let open = ty
                .rfind('[')
                .ok_or_else(|| AbiParseError::InvalidArraySize(ty.to_string()))?;
            let size = &ty[open + 1..ty.len() - 1];
            let element = Box::new(Self::parse(
                &ty[..open],
                components,
                internal_type.map(strip_array_suffix),
            )?);
            if size.is_empty() {
                return Ok(AbiType::Slice { element });
            }
            return match size.parse::<usize>() {
                Ok(size) if size > 0 => Ok(AbiType::Array { element, size }),
                _ => Err(AbiParseError::InvalidArraySize(ty.to_string())),
            };
        }

        match ty {
            "address" => Ok(AbiType::Address),
            "bool" => Ok(AbiType::Bool),
            "string" => Ok(AbiType::String),
            "bytes" => Ok(AbiType::Bytes),
            "function" => Ok(AbiType::Function),
            "tuple" => parse_tuple(components, internal_type),
            "int" => Ok(AbiType::Int { bits: 256 }),
            "uint" => Ok(AbiType::Uint { bits: 256 }),
            "fixed" => Ok(AbiType::Fixed { signed: true, bits: 128, decimals: 18 }),
            "ufixed" => Ok(AbiType::Fixed { signed: false, bits: 128, decimals: 18 }),
            _ => parse_sized(ty).ok_or_else(|| AbiParseError::UnknownType(ty.to_string())),
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, AbiType::Tuple(_))
    }

    /// True for tuples and for arrays/slices whose innermost element is a tuple.
    pub fn contains_tuple(&self) -> bool {
        match self {
            AbiType::Tuple(_) => true,
            AbiType::Array { element, .. } | AbiType::Slice { element } => element.contains_tuple(),
            _ => false,
        }
    }

    /// Reference types are hashed when used as indexed event topics.
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            AbiType::String
                | AbiType::Bytes
                | AbiType::Array { .. }
                | AbiType::Slice { .. }
                | AbiType::Tuple(_)
        )
    }
}

impl TupleType {
    /// Canonical parameter expression, e.g. `(uint256,address[])`.
    pub fn canonical(&self) -> String {
        let elems: Vec<String> = self.components.iter().map(|c| c.ty.to_string()).collect();
        format!("({})", elems.join(","))
    }

    /// Registry key for this record: raw struct name plus canonical expression.
    ///
    /// Older compilers leave the raw name empty, so the canonical expression is
    /// what keeps distinct shapes apart; the raw name keeps two structs with the
    /// same shape but different declarations apart.
    pub fn signature(&self) -> String {
        format!("{}{}", self.raw_name, self.canonical())
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Int { bits } => write!(f, "int{bits}"),
            AbiType::Uint { bits } => write!(f, "uint{bits}"),
            AbiType::Address => write!(f, "address"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::String => write!(f, "string"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::FixedBytes { size } => write!(f, "bytes{size}"),
            AbiType::Function => write!(f, "function"),
            AbiType::Fixed { signed, bits, decimals } => {
                let prefix = if *signed { "" } else { "u" };
                write!(f, "{prefix}fixed{bits}x{decimals}")
            }
            AbiType::Array { element, size } => write!(f, "{element}[{size}]"),
            AbiType::Slice { element } => write!(f, "{element}[]"),
            AbiType::Tuple(tuple) => write!(f, "{}", tuple.canonical()),
        }
    }
}

/// Splits on `_` and upper-cases the first letter of every part:
/// `get_value` -> `GetValue`, `_owner` -> `Owner`, `_` -> ``.
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for part in input.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn parse_tuple(
    components: &[RawArgument],
    internal_type: Option<&str>,
) -> Result<AbiType, AbiParseError> {
    let mut parsed = Vec::with_capacity(components.len());
    for (index, component) in components.iter().enumerate() {
        /* Components become record fields under their camel-cased name, so
         * `_` (empty once cased) and `value`/`_value` (both `Value`) are
         * rejected here. */
        let field = to_camel_case(&component.name);
        if !is_valid_field_name(&component.name) || field.is_empty() {
            return Err(AbiParseError::InvalidComponentName {
                index,
                name: component.name.clone(),
            });
        }
        if parsed.iter().any(|c: &TupleComponent| to_camel_case(&c.name) == field) {
            return Err(AbiParseError::DuplicateComponent(component.name.clone()));
        }
        parsed.push(TupleComponent {
            name: component.name.clone(),
            ty: AbiType::from_raw(component)?,
        });
    }

    Ok(AbiType::Tuple(TupleType {
        raw_name: internal_type.map(raw_struct_name).unwrap_or_default(),
        components: parsed,
    }))
}

fn parse_sized(ty: &str) -> Option<AbiType> {
    if let Some(bits) = ty.strip_prefix("uint") {
        return parse_int_bits(bits).map(|bits| AbiType::Uint { bits });
    }
    if let Some(bits) = ty.strip_prefix("int") {
        return parse_int_bits(bits).map(|bits| AbiType::Int { bits });
    }
    if let Some(size) = ty.strip_prefix("bytes") {
        let size = size.parse::<usize>().ok()?;
        return (1..=32).contains(&size).then_some(AbiType::FixedBytes { size });
    }
    if let Some(spec) = ty.strip_prefix("ufixed") {
        return parse_fixed(spec, false);
    }
    if let Some(spec) = ty.strip_prefix("fixed") {
        return parse_fixed(spec, true);
    }
    None
}

fn parse_int_bits(bits: &str) -> Option<u16> {
    let bits = bits.parse::<u16>().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

fn parse_fixed(spec: &str, signed: bool) -> Option<AbiType> {
    let (bits, decimals) = spec.split_once('x')?;
    let bits = parse_int_bits(bits)?;
    let decimals = decimals.parse::<u16>().ok().filter(|d| *d <= 80)?;
    Some(AbiType::Fixed { signed, bits, decimals })
}

/* `struct Lib.Point[][2]` -> `LibPoint` */
fn raw_struct_name(internal_type: &str) -> String {
    match internal_type.strip_prefix(STRUCT_PREFIX) {
        Some(name) => strip_array_suffixes(name).replace('.', ""),
        None => String::new(),
    }
}

fn strip_array_suffix(internal_type: &str) -> &str {
    match (internal_type.ends_with(']'), internal_type.rfind('[')) {
        (true, Some(open)) => &internal_type[..open],
        _ => internal_type,
    }
}

fn strip_array_suffixes(mut internal_type: &str) -> &str {
    while internal_type.ends_with(']') {
        let stripped = strip_array_suffix(internal_type);
        if stripped.len() == internal_type.len() {
            break;
        }
        internal_type = stripped;
    }
    internal_type
}

fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
