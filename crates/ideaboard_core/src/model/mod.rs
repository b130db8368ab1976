//! Domain model for the idea board.
//!
//! # Responsibility
//! - Define the canonical card and connection records used by core logic.
//! - Keep identity kinds (session-local vs server-assigned) compiler-checked.
//!
//! # Invariants
//! - `CardId::Local` and `CardId::Persisted` are disjoint namespaces by
//!   construction; no value collision is possible.
//! - Connection anchors are drawn from the closed four-element set.

pub mod card;
pub mod connection;
