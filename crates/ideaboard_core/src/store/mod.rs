//! In-memory session state for the board.
//!
//! # Responsibility
//! - Hold the authoritative card and connection collections.
//! - Hand out consistent copy-on-write snapshots to renderers.
//!
//! # Invariants
//! - No collection is ever mutated in place while a snapshot may read it.
//! - Session-local counters are owned here, reset per session.

mod board_store;

pub use board_store::{BoardSnapshot, BoardStore};
