//! List store contract and in-memory implementation.

use crate::model::card::CardId;
use crate::model::list::{List, ListId};
use crate::repo::{RepoError, RepoResult};

/// Store interface owning the list collection.
pub trait ListRepository {
    /// Returns all live lists in insertion order.
    fn list_lists(&self) -> Vec<List>;
    /// Loads one list by id.
    fn get_list(&self, id: ListId) -> RepoResult<List>;
    /// Stores a prepared list. Card references are stored unchecked.
    fn insert_list(&mut self, list: List) -> RepoResult<List>;
    /// Removes one list. Referenced cards are not touched.
    fn delete_list(&mut self, id: ListId) -> RepoResult<()>;
    /// Strips every occurrence of `card_id` from every list.
    ///
    /// Returns how many lists changed. Calling it for an unreferenced card is
    /// a no-op.
    fn remove_card_reference(&mut self, card_id: CardId) -> usize;
    /// Number of live lists.
    fn list_count(&self) -> usize;

    /// Builds a list with a fresh id and stores it.
    fn create_list(&mut self, header: &str, card_ids: Vec<CardId>) -> RepoResult<List> {
        let list = List::new(header, card_ids)?;
        self.insert_list(list)
    }
}

/// Vec-backed list store preserving insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryListStore {
    lists: Vec<List>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|list| list.id == id)
    }
}

impl ListRepository for MemoryListStore {
    fn list_lists(&self) -> Vec<List> {
        self.lists.clone()
    }

    fn get_list(&self, id: ListId) -> RepoResult<List> {
        self.lists
            .iter()
            .find(|list| list.id == id)
            .cloned()
            .ok_or(RepoError::ListNotFound(id))
    }

    fn insert_list(&mut self, list: List) -> RepoResult<List> {
        list.validate()?;
        if self.position(list.id).is_some() {
            return Err(RepoError::DuplicateId(list.id));
        }
        self.lists.push(list.clone());
        Ok(list)
    }

    fn delete_list(&mut self, id: ListId) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::ListNotFound(id))?;
        self.lists.remove(index);
        Ok(())
    }

    fn remove_card_reference(&mut self, card_id: CardId) -> usize {
        self.lists
            .iter_mut()
            .map(|list| list.strip_card(card_id))
            .filter(|changed| *changed)
            .count()
    }

    fn list_count(&self) -> usize {
        self.lists.len()
    }
}
