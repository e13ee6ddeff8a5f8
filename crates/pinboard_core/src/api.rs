//! Transport-agnostic request/response contracts.
//!
//! # Responsibility
//! - Decode create-request bodies and textual ids into coordinator calls.
//! - Map coordinator outcomes to status codes, `Location` values and error
//!   bodies, so any HTTP layer can stay a thin adapter.
//! - Check bearer credentials for mutating calls.
//!
//! # Invariants
//! - Validation and not-found failures carry a plain-text, stable message.
//! - Internal failures never leak details in production mode.
//! - Unparseable ids behave like absent ids: `NotFound` on lookups,
//!   `UnknownCard` inside list references.

use crate::config::{Environment, ServiceConfig};
use crate::model::card::{Card, CardId};
use crate::model::list::ListId;
use crate::model::validation::{require_text, ValidationError};
use crate::model::{parse_id, EntityKind};
use crate::repo::card_repo::CardRepository;
use crate::repo::list_repo::ListRepository;
use crate::service::coordinator::{CoordinatorError, CoordinatorResult, IntegrityCoordinator};
use log::error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const BEARER_SCHEME: &str = "bearer";

/// Response status contract, independent of any HTTP crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub fn for_error(err: &CoordinatorError) -> Self {
        match err {
            CoordinatorError::Validation(_) => Self::BadRequest,
            CoordinatorError::NotFound { .. } => Self::NotFound,
            CoordinatorError::InconsistentState(_) => Self::InternalServerError,
        }
    }
}

/// Body of `POST /card`. Fields are optional so "missing" can be reported
/// as a validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateCardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `POST /list`. `cardIds` defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(rename = "cardIds", default)]
    pub card_ids: Option<Vec<String>>,
}

/// Body returned by `POST /list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedListBody {
    pub id: ListId,
}

/// Successful create outcome: always `201` with a `Location` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<T> {
    pub location: String,
    pub body: T,
}

impl<T> Created<T> {
    pub fn status(&self) -> Status {
        Status::Created
    }
}

/// Error response body in the shape each failure class uses on the wire.
///
/// `Text` is sent as a plain-text body; the other variants are JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Plain text, e.g. `Invalid data`.
    Text(String),
    /// `{"error": "..."}`
    Error { error: String },
    /// `{"error": {"message": "..."}}`
    Nested { error: ErrorMessage },
    /// `{"message": "..."}`
    Message { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Error response: status plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: Status,
    pub payload: ErrorPayload,
}

impl ErrorBody {
    /// Translates a coordinator error from a read or create call.
    ///
    /// Validation and not-found failures get plain text. Internal failures
    /// get `{"error":{"message":"server error"}}` in production and the
    /// verbose `{"message": ...}` otherwise.
    pub fn from_error(err: &CoordinatorError, environment: Environment) -> Self {
        let payload = match err {
            CoordinatorError::Validation(_) => ErrorPayload::Text("Invalid data".to_string()),
            CoordinatorError::NotFound {
                kind: EntityKind::Card,
                ..
            } => ErrorPayload::Text("Card Not Found".to_string()),
            CoordinatorError::NotFound {
                kind: EntityKind::List,
                ..
            } => ErrorPayload::Text("List Not Found".to_string()),
            CoordinatorError::InconsistentState(_) if environment.is_production() => {
                ErrorPayload::Nested {
                    error: ErrorMessage {
                        message: "server error".to_string(),
                    },
                }
            }
            CoordinatorError::InconsistentState(_) => ErrorPayload::Message {
                message: err.to_string(),
            },
        };
        Self {
            status: Status::for_error(err),
            payload,
        }
    }

    /// Translates a coordinator error from a delete call.
    ///
    /// Same as `from_error` except for the not-found texts, which deletes
    /// report as `Not found` (card) and `Not Found` (list).
    pub fn from_delete_error(err: &CoordinatorError, environment: Environment) -> Self {
        let text = match err {
            CoordinatorError::NotFound {
                kind: EntityKind::Card,
                ..
            } => "Not found",
            CoordinatorError::NotFound {
                kind: EntityKind::List,
                ..
            } => "Not Found",
            _ => return Self::from_error(err, environment),
        };
        Self {
            status: Status::NotFound,
            payload: ErrorPayload::Text(text.to_string()),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: Status::Unauthorized,
            payload: ErrorPayload::Error {
                error: "Unauthorized request".to_string(),
            },
        }
    }

    /// Human-readable message, whatever the payload shape.
    pub fn message(&self) -> &str {
        match &self.payload {
            ErrorPayload::Text(message)
            | ErrorPayload::Error { error: message }
            | ErrorPayload::Message { message } => message,
            ErrorPayload::Nested { error } => &error.message,
        }
    }
}

/// Checks an `Authorization` header value against the configured secret.
///
/// Accepts `Bearer <token>` with a case-insensitive scheme. Without a
/// configured secret every request is rejected.
pub fn authorize(authorization: Option<&str>, config: &ServiceConfig) -> Result<(), ErrorBody> {
    let presented = authorization.and_then(|value| {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
                Some(token)
            }
            _ => None,
        }
    });

    match (presented, config.api_token.as_deref()) {
        (Some(token), Some(secret)) if token == secret => Ok(()),
        _ => {
            error!(
                "event=auth_reject module=api status=error header_present={}",
                authorization.is_some()
            );
            Err(ErrorBody::unauthorized())
        }
    }
}

/// Builds the `Location` value for a created record.
pub fn location_for(base_url: &str, kind: EntityKind, id: Uuid) -> String {
    format!("{}/{}/{id}", base_url.trim_end_matches('/'), kind.as_str())
}

/// Parses a path id; anything unparseable is reported as not found.
pub fn resolve_id(kind: EntityKind, raw: &str) -> CoordinatorResult<Uuid> {
    parse_id(raw).ok_or_else(|| CoordinatorError::not_found(kind, raw))
}

/// Handles `POST /card`.
pub fn submit_card<C: CardRepository, L: ListRepository>(
    coordinator: &IntegrityCoordinator<C, L>,
    base_url: &str,
    request: CreateCardRequest,
) -> CoordinatorResult<Created<Card>> {
    let title = request.title.ok_or(ValidationError::MissingTitle)?;
    let content = request.content.ok_or(ValidationError::MissingContent)?;
    let card = coordinator.create_card(&title, &content)?;
    Ok(Created {
        location: location_for(base_url, EntityKind::Card, card.id),
        body: card,
    })
}

/// Handles `POST /list`.
///
/// References that are not ids at all can never resolve. They are reported
/// as `UnknownCard` without reaching the coordinator, but only after the
/// header rule so an empty header still wins.
pub fn submit_list<C: CardRepository, L: ListRepository>(
    coordinator: &IntegrityCoordinator<C, L>,
    base_url: &str,
    request: CreateListRequest,
) -> CoordinatorResult<Created<CreatedListBody>> {
    let header = request.header.ok_or(ValidationError::MissingHeader)?;
    let mut card_ids: Vec<CardId> = Vec::new();
    for raw in request.card_ids.unwrap_or_default() {
        match parse_id(&raw) {
            Some(card_id) => card_ids.push(card_id),
            None => {
                require_text(&header, ValidationError::MissingHeader)?;
                error!("event=list_create module=api status=error error_code=unknown_card");
                return Err(ValidationError::UnknownCard(raw).into());
            }
        }
    }

    let list = coordinator.create_list(&header, card_ids)?;
    Ok(Created {
        location: location_for(base_url, EntityKind::List, list.id),
        body: CreatedListBody { id: list.id },
    })
}
