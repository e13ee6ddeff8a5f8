//! Field validation errors for card/list records.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for a create request.
///
/// Deterministic for a given input and store state; callers fix the request
/// instead of retrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier is the nil UUID.
    NilId,
    /// Card title is missing or empty.
    MissingTitle,
    /// Card content is missing or empty.
    MissingContent,
    /// List header is missing or empty.
    MissingHeader,
    /// A list references a card that does not currently exist.
    ///
    /// Holds the reference as the caller supplied it.
    UnknownCard(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "identifier must not be nil"),
            Self::MissingTitle => write!(f, "title is required"),
            Self::MissingContent => write!(f, "content is required"),
            Self::MissingHeader => write!(f, "header is required"),
            Self::UnknownCard(id) => write!(f, "card not found: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Returns `error` when `value` is empty. Whitespace counts as text.
pub(crate) fn require_text(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error);
    }
    Ok(())
}
