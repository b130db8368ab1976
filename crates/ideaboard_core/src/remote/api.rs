//! Board persistence API and error taxonomy.

use crate::remote::wire::{
    CardPatch, CardRecord, ConnectionRecord, CreateCardRequest, CreateConnectionRequest, CreatedId,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure surfaced by a `BoardApi` adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never reached the backend or errored in transit.
    Transport(String),
    /// The backend does not know the id (stale after a concurrent delete).
    NotFound { resource: &'static str, id: i64 },
    /// The backend answered with something this contract cannot read.
    BadResponse(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "transport failure: {details}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::BadResponse(details) => write!(f, "unreadable response: {details}"),
        }
    }
}

impl Error for RemoteError {}

/// CRUD contract consumed by the sync reconciler.
///
/// Adapters map each method onto one HTTP request against the backend
/// routes listed per method. Calls are logically asynchronous from the
/// board's point of view: local state is updated before a call is made,
/// and the returned result is the completion the reconciler reconciles.
pub trait BoardApi {
    /// `GET /api/ideas`
    fn list_cards(&self) -> RemoteResult<Vec<CardRecord>>;

    /// `POST /api/ideas`
    fn create_card(&self, request: &CreateCardRequest) -> RemoteResult<CreatedId>;

    /// `PATCH /api/ideas/:id` with any subset of x/y/width/height.
    fn update_card(&self, id: i64, patch: &CardPatch) -> RemoteResult<()>;

    /// `PATCH /api/ideas/:id/text`
    fn update_card_text(&self, id: i64, text: &str) -> RemoteResult<()>;

    /// `DELETE /api/ideas/:id`
    fn delete_card(&self, id: i64) -> RemoteResult<()>;

    /// `GET /api/connections`
    fn list_connections(&self) -> RemoteResult<Vec<ConnectionRecord>>;

    /// `POST /api/connections`
    fn create_connection(&self, request: &CreateConnectionRequest) -> RemoteResult<CreatedId>;

    /// `DELETE /api/connections/:id`
    fn delete_connection(&self, id: i64) -> RemoteResult<()>;
}
