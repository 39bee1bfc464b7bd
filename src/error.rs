use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtKitError>;

/// Represents errors that can occur in the ExtKit library.
///
/// Decoding and template failures are kept apart so callers can tell
/// "this extension value is malformed" from "this file is not a template"
/// from "the file could not be read at all".
#[derive(Debug, Error)]
pub enum ExtKitError {
    /// Octets do not match the ASN.1 shape expected for the claimed
    /// extension kind.
    #[error("Failed to decode extension value: {0}")]
    Decode(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A byte buffer does not parse as an X.509 Extensions SEQUENCE.
    #[error("Not a valid extension template: {0}")]
    TemplateLoad(String),

    /// A template file could not be read or written.
    #[error("Template file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<der::Error> for ExtKitError {
    /// Converts a `der::Error` into an `ExtKitError`.
    fn from(err: der::Error) -> Self {
        ExtKitError::Decode(err.to_string())
    }
}
