//! Card domain model.
//!
//! # Invariants
//! - `id` is generated once and never reused for another live card.
//! - `title` and `content` are non-empty; cards are immutable after creation.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a card.
pub type CardId = Uuid;

/// A unit record with a title and a content body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub content: String,
}

impl Card {
    /// Creates a validated card with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a validated card with a caller-provided id.
    ///
    /// Used by tests and fixtures where identity must be known up front.
    pub fn with_id(
        id: CardId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let card = Self {
            id,
            title: title.into(),
            content: content.into(),
        };
        card.validate()?;
        Ok(card)
    }

    /// Checks id and field invariants. Title is checked before content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        require_text(&self.title, ValidationError::MissingTitle)?;
        require_text(&self.content, ValidationError::MissingContent)
    }
}
