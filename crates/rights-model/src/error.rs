//! Error types for the rights model

/// Errors raised while parsing or decoding model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A path or reference was empty
    #[error("empty {0}")]
    Empty(&'static str),

    /// Empty segment in a dotted path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Record name contains the path separator
    #[error("record name '{0}' must not contain '.'")]
    DottedName(String),

    /// Reference has too few segments for its kind
    #[error("incomplete reference '{0}'")]
    IncompleteReference(String),

    /// Unknown or malformed right name
    #[error("invalid right name: '{0}'")]
    InvalidRight(String),

    /// Principal identifier is not usable
    #[error("invalid principal: '{0}'")]
    InvalidPrincipal(String),

    /// Object is missing a field required to decode a rule
    #[error("rights object is missing field '{0}'")]
    MissingField(&'static str),

    /// Object field holds a value that cannot be decoded
    #[error("rights object field '{field}' has invalid value '{value}'")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// Offending raw value
        value: String,
    },

    /// Stored record breaks an object numbering invariant
    #[error("invalid record '{record}': {reason}")]
    InvalidRecord {
        /// Record id
        record: String,
        /// What is wrong
        reason: String,
    },
}
