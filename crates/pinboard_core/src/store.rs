//! Shared in-process board holding both leaf stores behind one lock.
//!
//! # Responsibility
//! - Pair one card store with one list store as a single unit of state.
//! - Hand out a cloneable handle so every caller works on the same board.
//!
//! # Invariants
//! - One `RwLock` guards cards and lists jointly; no caller can observe one
//!   collection mutated without the other.
//! - Lock poisoning is reported as an error, never unwrapped.

use crate::repo::card_repo::{CardRepository, MemoryCardStore};
use crate::repo::list_repo::{ListRepository, MemoryListStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cards and lists as one consistent state.
#[derive(Debug, Default)]
pub struct Board<C = MemoryCardStore, L = MemoryListStore> {
    cards: C,
    lists: L,
}

impl Board {
    /// Creates an empty process-memory board.
    pub fn in_memory() -> Self {
        Self::default()
    }
}

impl<C: CardRepository, L: ListRepository> Board<C, L> {
    pub fn new(cards: C, lists: L) -> Self {
        Self { cards, lists }
    }

    pub fn cards(&self) -> &C {
        &self.cards
    }

    pub fn lists(&self) -> &L {
        &self.lists
    }

    pub fn cards_mut(&mut self) -> &mut C {
        &mut self.cards
    }

    pub fn lists_mut(&mut self) -> &mut L {
        &mut self.lists
    }
}

/// A writer panicked while holding the board lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPoisoned;

impl Display for BoardPoisoned {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "board lock poisoned by a panicked writer")
    }
}

impl Error for BoardPoisoned {}

/// Cloneable handle to one shared board.
///
/// Construct once at startup and inject into whatever needs it.
pub struct SharedBoard<C = MemoryCardStore, L = MemoryListStore> {
    inner: Arc<RwLock<Board<C, L>>>,
}

impl SharedBoard {
    /// Creates a handle to a fresh, empty process-memory board.
    pub fn in_memory() -> Self {
        Self::new(Board::in_memory())
    }
}

impl<C, L> SharedBoard<C, L> {
    pub fn new(board: Board<C, L>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(board)),
        }
    }

    /// Acquires shared read access. Concurrent readers do not block each other.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Board<C, L>>, BoardPoisoned> {
        self.inner.read().map_err(|_| BoardPoisoned)
    }

    /// Acquires exclusive write access for one read-modify-write sequence.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Board<C, L>>, BoardPoisoned> {
        self.inner.write().map_err(|_| BoardPoisoned)
    }
}

impl<C, L> Clone for SharedBoard<C, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
