//! List domain model.
//!
//! # Invariants
//! - `header` is non-empty.
//! - `card_ids` keeps caller order and duplicates; it only shrinks when a
//!   referenced card is deleted.

use crate::model::card::CardId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a list.
pub type ListId = Uuid;

/// A named, ordered collection of card references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub header: String,
    /// Serialized as `cardIds` to match the external schema.
    #[serde(rename = "cardIds", default)]
    pub card_ids: Vec<CardId>,
}

impl List {
    /// Creates a validated list with a freshly generated id.
    ///
    /// Card references are stored as given; whether they resolve is not
    /// checked here.
    pub fn new(header: impl Into<String>, card_ids: Vec<CardId>) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), header, card_ids)
    }

    /// Creates a validated list with a caller-provided id.
    pub fn with_id(
        id: ListId,
        header: impl Into<String>,
        card_ids: Vec<CardId>,
    ) -> Result<Self, ValidationError> {
        let list = Self {
            id,
            header: header.into(),
            card_ids,
        };
        list.validate()?;
        Ok(list)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        require_text(&self.header, ValidationError::MissingHeader)
    }

    /// Returns whether any entry of `card_ids` equals `card_id`.
    pub fn references(&self, card_id: CardId) -> bool {
        self.card_ids.contains(&card_id)
    }

    /// Drops every occurrence of `card_id`, keeping the order of the rest.
    ///
    /// Returns `true` when at least one entry was removed.
    pub fn strip_card(&mut self, card_id: CardId) -> bool {
        let before = self.card_ids.len();
        self.card_ids.retain(|id| *id != card_id);
        self.card_ids.len() != before
    }
}
