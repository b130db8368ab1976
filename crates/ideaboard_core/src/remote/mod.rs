//! Remote persistence contract.
//!
//! # Responsibility
//! - Define the CRUD operations the board consumes, with the exact wire
//!   shapes of the JSON-over-HTTP backend.
//! - Keep the core transport-agnostic: an adapter in the embedding shell
//!   implements `BoardApi` over its HTTP client of choice.
//!
//! # Invariants
//! - Wire field names match the backend exactly (`zIndex`, `fromId`,
//!   `source_point`, ...); renames happen here and nowhere else.

mod api;
pub mod wire;

pub use api::{BoardApi, RemoteError, RemoteResult};
