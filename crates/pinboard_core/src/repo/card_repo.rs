//! Card store contract and in-memory implementation.

use crate::model::card::{Card, CardId};
use crate::repo::{RepoError, RepoResult};

/// Store interface owning the card collection.
pub trait CardRepository {
    /// Returns all live cards in insertion order.
    fn list_cards(&self) -> Vec<Card>;
    /// Loads one card by id.
    fn get_card(&self, id: CardId) -> RepoResult<Card>;
    /// Returns whether a live card has this id.
    fn contains_card(&self, id: CardId) -> bool;
    /// Stores a prepared card. Rejects invalid records and id collisions.
    fn insert_card(&mut self, card: Card) -> RepoResult<Card>;
    /// Removes one card. Lists are not touched.
    fn delete_card(&mut self, id: CardId) -> RepoResult<()>;
    /// Number of live cards.
    fn card_count(&self) -> usize;

    /// Builds a card with a fresh id and stores it.
    fn create_card(&mut self, title: &str, content: &str) -> RepoResult<Card> {
        let card = Card::new(title, content)?;
        self.insert_card(card)
    }
}

/// Vec-backed card store preserving insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryCardStore {
    cards: Vec<Card>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

impl CardRepository for MemoryCardStore {
    fn list_cards(&self) -> Vec<Card> {
        self.cards.clone()
    }

    fn get_card(&self, id: CardId) -> RepoResult<Card> {
        self.cards
            .iter()
            .find(|card| card.id == id)
            .cloned()
            .ok_or(RepoError::CardNotFound(id))
    }

    fn contains_card(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    fn insert_card(&mut self, card: Card) -> RepoResult<Card> {
        card.validate()?;
        if self.contains_card(card.id) {
            return Err(RepoError::DuplicateId(card.id));
        }
        self.cards.push(card.clone());
        Ok(card)
    }

    fn delete_card(&mut self, id: CardId) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::CardNotFound(id))?;
        self.cards.remove(index);
        Ok(())
    }

    fn card_count(&self) -> usize {
        self.cards.len()
    }
}
