//! Domain model for cards and the lists that reference them.
//!
//! # Responsibility
//! - Define the canonical `Card` and `List` records and their wire shape.
//! - Own field-level validation shared by stores and the coordinator.
//!
//! # Invariants
//! - Every record is identified by a non-nil UUID generated at creation.
//! - Records carry no cross-entity knowledge; reference checks live in
//!   `service::coordinator`.

pub mod card;
pub mod list;
pub mod validation;

use uuid::Uuid;

/// Resource family an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Card,
    List,
}

impl EntityKind {
    /// Path segment used by external routes (`/card/:id`, `/list/:id`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::List => "list",
        }
    }
}

/// Parses a caller-supplied textual identifier.
///
/// Only the exact form ids are rendered in (lowercase, hyphenated, no
/// padding) is accepted, so a textual id resolves iff it equals a stored id
/// verbatim. Returns `None` otherwise; callers decide whether that means
/// "not found" or "invalid reference".
pub fn parse_id(value: &str) -> Option<Uuid> {
    let id = Uuid::parse_str(value).ok()?;
    (id.hyphenated().to_string() == value).then_some(id)
}
