//! Error types for conversion operations.

use thiserror::Error;

/// Errors a conversion can end in. Both kinds are terminal for the call:
/// there is no retry, no partial output, and no silent repair of malformed
/// input. Callers decide how to surface the message.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source text does not conform to the grammar of the format selected
    /// by detection. Covers empty input and any malformed JSON/XML/YAML.
    #[error("parse error: {0}")]
    Parse(String),

    /// The parsed value violates a structural constraint of the requested
    /// target format, such as XML's single-root-element requirement.
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout triform-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
