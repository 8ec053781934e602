use thiserror::Error;

/// Errors produced while reading an ABI document.
#[derive(Debug, Error)]
pub enum AbiParseError {
    /// The text is not a JSON array of ABI entries.
    #[error("invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A type string has no known ABI meaning.
    #[error("unknown ABI type '{0}'")]
    UnknownType(String),

    /// An array suffix is malformed or has a zero length.
    #[error("invalid array size in type '{0}'")]
    InvalidArraySize(String),

    /// A tuple component name cannot become a record field.
    #[error("tuple component {index} has invalid name '{name}'")]
    InvalidComponentName { index: usize, name: String },

    /// Two components of one tuple share a name.
    #[error("tuple has duplicate component '{0}'")]
    DuplicateComponent(String),

    /// A function or event entry has no name.
    #[error("{kind} entry is missing a name")]
    MissingName { kind: &'static str },

    /// Wraps an error with the entry it was found in.
    #[error("in {kind} '{member}': {source}")]
    InMember {
        kind: &'static str,
        member: String,
        #[source]
        source: Box<AbiParseError>,
    },
}

impl AbiParseError {
    pub(crate) fn in_member(self, kind: &'static str, member: &str) -> Self {
        AbiParseError::InMember {
            kind,
            member: member.to_string(),
            source: Box::new(self),
        }
    }
}
