//! Referential-integrity coordinator for cards and lists.
//!
//! # Responsibility
//! - Expose every card/list operation through one entry point.
//! - Check that a new list only references live cards.
//! - Cascade card deletion into every list that references the card.
//!
//! # Invariants
//! - Each operation runs under one acquisition of the board lock; mutations
//!   hold the write lock for their whole read-modify-write sequence.
//! - A rejected `create_list` persists nothing.
//! - After `delete_card` returns, no list references the deleted id.
//! - The coordinator holds no data besides the shared board handle.

use crate::model::card::{Card, CardId};
use crate::model::list::{List, ListId};
use crate::model::validation::{require_text, ValidationError};
use crate::model::EntityKind;
use crate::repo::card_repo::{CardRepository, MemoryCardStore};
use crate::repo::list_repo::{ListRepository, MemoryListStore};
use crate::repo::RepoError;
use crate::store::{BoardPoisoned, SharedBoard};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SEED_CARD_TITLE: &str = "Task One";
const SEED_CARD_CONTENT: &str = "This is card one";
const SEED_LIST_HEADER: &str = "List One";

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Error surfaced to callers of the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// Missing required field or unresolved card reference.
    Validation(ValidationError),
    /// Target identifier names no live record.
    NotFound { kind: EntityKind, id: String },
    /// Internal invariant broke. Indicates a defect, not bad input.
    InconsistentState(&'static str),
}

impl CoordinatorError {
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for CoordinatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
            Self::InconsistentState(details) => write!(f, "inconsistent board state: {details}"),
        }
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CoordinatorError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CoordinatorError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::CardNotFound(id) => Self::not_found(EntityKind::Card, id),
            RepoError::ListNotFound(id) => Self::not_found(EntityKind::List, id),
            RepoError::DuplicateId(_) => {
                Self::InconsistentState("generated identifier collided with a live record")
            }
        }
    }
}

impl From<BoardPoisoned> for CoordinatorError {
    fn from(_: BoardPoisoned) -> Self {
        Self::InconsistentState("board lock poisoned")
    }
}

/// Cards and lists read under one lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub cards: Vec<Card>,
    pub lists: Vec<List>,
}

impl BoardSnapshot {
    /// Returns list references that name no card in this snapshot.
    pub fn dangling_references(&self) -> Vec<(ListId, CardId)> {
        self.lists
            .iter()
            .flat_map(|list| list.card_ids.iter().map(move |card_id| (list.id, *card_id)))
            .filter(|(_, card_id)| !self.cards.iter().any(|card| card.id == *card_id))
            .collect()
    }
}

/// Composition root over the shared board.
pub struct IntegrityCoordinator<C = MemoryCardStore, L = MemoryListStore> {
    board: SharedBoard<C, L>,
}

impl IntegrityCoordinator {
    /// Creates a coordinator over a fresh, empty process-memory board.
    pub fn in_memory() -> Self {
        Self::new(SharedBoard::in_memory())
    }
}

impl<C: CardRepository, L: ListRepository> IntegrityCoordinator<C, L> {
    /// Creates a coordinator over an injected board handle.
    pub fn new(board: SharedBoard<C, L>) -> Self {
        Self { board }
    }

    /// Returns the shared board handle backing this coordinator.
    pub fn board(&self) -> &SharedBoard<C, L> {
        &self.board
    }

    /// Lists all cards in insertion order.
    pub fn list_cards(&self) -> CoordinatorResult<Vec<Card>> {
        Ok(self.board.read()?.cards().list_cards())
    }

    /// Gets one card by id.
    pub fn get_card(&self, id: CardId) -> CoordinatorResult<Card> {
        let board = self.board.read()?;
        board.cards().get_card(id).map_err(|err| {
            error!("event=card_get module=coordinator status=error card_id={id} error_code=not_found");
            err.into()
        })
    }

    /// Creates one card.
    pub fn create_card(&self, title: &str, content: &str) -> CoordinatorResult<Card> {
        let mut board = self.board.write()?;
        match board.cards_mut().create_card(title, content) {
            Ok(card) => {
                info!(
                    "event=card_create module=coordinator status=ok card_id={}",
                    card.id
                );
                Ok(card)
            }
            Err(err) => {
                error!("event=card_create module=coordinator status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Deletes one card and strips its id from every list.
    ///
    /// Both steps happen under a single write lock, so no reader can see the
    /// card gone while a list still references it. When the card is absent
    /// the error is returned and no list is touched.
    pub fn delete_card(&self, id: CardId) -> CoordinatorResult<()> {
        let mut board = self.board.write()?;
        if let Err(err) = board.cards_mut().delete_card(id) {
            error!("event=card_delete module=coordinator status=error card_id={id} error_code=not_found");
            return Err(err.into());
        }

        let lists_updated = board.lists_mut().remove_card_reference(id);
        info!(
            "event=card_delete module=coordinator status=ok card_id={id} lists_updated={lists_updated}"
        );
        Ok(())
    }

    /// Lists all lists in insertion order.
    pub fn list_lists(&self) -> CoordinatorResult<Vec<List>> {
        Ok(self.board.read()?.lists().list_lists())
    }

    /// Gets one list by id.
    pub fn get_list(&self, id: ListId) -> CoordinatorResult<List> {
        let board = self.board.read()?;
        board.lists().get_list(id).map_err(|err| {
            error!("event=list_get module=coordinator status=error list_id={id} error_code=not_found");
            err.into()
        })
    }

    /// Creates one list after checking every card reference.
    ///
    /// # Contract
    /// - Header is checked first, then references.
    /// - Fails with `ValidationError::UnknownCard` naming the first
    ///   unresolved id; nothing is stored in that case.
    /// - `card_ids` is stored as given, duplicates included.
    pub fn create_list(&self, header: &str, card_ids: Vec<CardId>) -> CoordinatorResult<List> {
        let mut board = self.board.write()?;
        if let Err(err) = require_text(header, ValidationError::MissingHeader) {
            error!("event=list_create module=coordinator status=error error={err}");
            return Err(err.into());
        }

        let unresolved: Vec<CardId> = card_ids
            .iter()
            .copied()
            .filter(|card_id| !board.cards().contains_card(*card_id))
            .collect();
        if let Some(first) = unresolved.first() {
            for card_id in &unresolved {
                error!(
                    "event=list_create module=coordinator status=error card_id={card_id} error_code=unknown_card"
                );
            }
            return Err(ValidationError::UnknownCard(first.to_string()).into());
        }

        let list = board.lists_mut().create_list(header, card_ids)?;
        info!(
            "event=list_create module=coordinator status=ok list_id={} card_refs={}",
            list.id,
            list.card_ids.len()
        );
        Ok(list)
    }

    /// Deletes one list. Referenced cards stay alive.
    pub fn delete_list(&self, id: ListId) -> CoordinatorResult<()> {
        let mut board = self.board.write()?;
        if let Err(err) = board.lists_mut().delete_list(id) {
            error!("event=list_delete module=coordinator status=error list_id={id} error_code=not_found");
            return Err(err.into());
        }
        info!("event=list_delete module=coordinator status=ok list_id={id}");
        Ok(())
    }

    /// Reads cards and lists together under one read lock.
    pub fn snapshot(&self) -> CoordinatorResult<BoardSnapshot> {
        let board = self.board.read()?;
        Ok(BoardSnapshot {
            cards: board.cards().list_cards(),
            lists: board.lists().list_lists(),
        })
    }

    /// Creates the demo card and a list referencing it.
    ///
    /// Goes through the normal validated paths; never called implicitly.
    pub fn seed_demo(&self) -> CoordinatorResult<(Card, List)> {
        let card = self.create_card(SEED_CARD_TITLE, SEED_CARD_CONTENT)?;
        let list = self.create_list(SEED_LIST_HEADER, vec![card.id])?;
        Ok((card, list))
    }
}

impl<C, L> Clone for IntegrityCoordinator<C, L> {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
        }
    }
}
