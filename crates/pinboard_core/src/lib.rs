//! Core domain logic for Pinboard cards and lists.
//! This crate is the single source of truth for referential-integrity rules.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use api::{
    authorize, location_for, resolve_id, submit_card, submit_list, CreateCardRequest,
    CreateListRequest, Created, CreatedListBody, ErrorBody, ErrorMessage, ErrorPayload, Status,
};
pub use config::{ConfigError, Environment, ServiceConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::card::{Card, CardId};
pub use model::list::{List, ListId};
pub use model::validation::ValidationError;
pub use model::{parse_id, EntityKind};
pub use repo::card_repo::{CardRepository, MemoryCardStore};
pub use repo::list_repo::{ListRepository, MemoryListStore};
pub use repo::{RepoError, RepoResult};
pub use service::coordinator::{
    BoardSnapshot, CoordinatorError, CoordinatorResult, IntegrityCoordinator,
};
pub use store::{Board, BoardPoisoned, SharedBoard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
