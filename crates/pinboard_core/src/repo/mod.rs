//! Leaf entity stores for cards and lists.
//!
//! # Responsibility
//! - Define per-collection CRUD contracts (`CardRepository`, `ListRepository`).
//! - Provide process-memory implementations that keep insertion order.
//!
//! # Invariants
//! - Write paths validate records before storing them.
//! - Stores never reach across collections; cascades belong to the
//!   coordinator.
//! - Lookups of absent ids return semantic `NotFound` errors.

pub mod card_repo;
pub mod list_repo;

use crate::model::card::CardId;
use crate::model::list::ListId;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by card and list stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ValidationError),
    CardNotFound(CardId),
    ListNotFound(ListId),
    /// An insert collided with a live record id.
    DuplicateId(Uuid),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CardNotFound(id) => write!(f, "card not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::DuplicateId(id) => write!(f, "identifier already in use: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::CardNotFound(_) => None,
            Self::ListNotFound(_) => None,
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
