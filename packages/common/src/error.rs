use thiserror::Error;

/// Validation failure raised by the typed field constructors.
///
/// The two variants let callers tell "malformed" apart from "well-formed
/// but out of bounds": a handle without the leading `@` is `Format`, a
/// 40-character handle is `Range`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The value has the wrong shape for its field.
    #[error("malformed value: {0}")]
    Format(String),
    /// The value is well-formed but violates a length or numeric bound.
    #[error("value out of range: {0}")]
    Range(String),
}
