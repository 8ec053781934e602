use crate::lang::Lang;
use solgen_types::AbiParseError;
use thiserror::Error;

/// Result alias used across the compiler.
pub type BindResult<T> = Result<T, BindError>;

/// Failures of a single contract compilation. No partial descriptor is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum BindError {
    /// The ABI text is not a valid ABI document.
    #[error("malformed ABI: {0}")]
    MalformedAbi(#[from] AbiParseError),

    /// The contract needs a feature the target language cannot express.
    #[error("{lang} bindings do not support {feature} ({count} struct(s) required)")]
    UnsupportedLanguageFeature {
        lang: Lang,
        feature: &'static str,
        count: usize,
    },

    /// An ABI type has no mapping in the target language.
    #[error("{lang} bindings cannot represent ABI type '{ty}'{}", member_suffix(.member))]
    UnsupportedType {
        lang: Lang,
        ty: String,
        member: Option<String>,
    },

    /// Two members share the name used to key the descriptor.
    #[error("duplicate {kind} '{name}'")]
    DuplicateMember { kind: &'static str, name: String },

    /// Two members (or a member and an alias) normalize to the same identifier.
    #[error(
        "duplicated {kind} identifier \"{name}\" (normalized \"{normalized}\"), use an alias to rename"
    )]
    DuplicateIdentifier {
        kind: &'static str,
        name: String,
        normalized: String,
    },

    /// Tuple nesting exceeded [`crate::MAX_STRUCT_DEPTH`].
    #[error("struct '{signature}' nests deeper than {limit} levels")]
    StructTooDeep { signature: String, limit: usize },
}

impl BindError {
    pub(crate) fn unsupported_type(lang: Lang, ty: impl ToString) -> Self {
        BindError::UnsupportedType {
            lang,
            ty: ty.to_string(),
            member: None,
        }
    }

    /// Attaches the member being bound to an `UnsupportedType` error that does
    /// not name one yet. Other variants pass through untouched.
    pub(crate) fn in_member(self, member: &str) -> Self {
        match self {
            BindError::UnsupportedType { lang, ty, member: None } => BindError::UnsupportedType {
                lang,
                ty,
                member: Some(member.to_string()),
            },
            other => other,
        }
    }
}

fn member_suffix(member: &Option<String>) -> String {
    match member {
        Some(member) => format!(" in {member}"),
        None => String::new(),
    }
}
