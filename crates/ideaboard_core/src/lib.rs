//! Canvas interaction and synchronization core for the idea board.
//! This crate is the single source of truth for gesture and sync invariants.

pub mod gesture;
pub mod layout;
pub mod logging;
pub mod model;
pub mod remote;
pub mod store;
pub mod sync;

pub use gesture::{GestureEffect, GestureState, HitTarget, InteractionController, PendingConnector};
pub use layout::anchor::{anchor_fallback, connection_midpoint, resolve_anchor, AnchorProbe};
pub use layout::placement::{allocate_position, PLACEMENT_START, PLACEMENT_STEP};
pub use layout::{Point, Rect};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{cluster_color, Card, CardId, MIN_CARD_HEIGHT, MIN_CARD_WIDTH};
pub use model::connection::{Anchor, Connection, ConnectionHandle};
pub use remote::{BoardApi, RemoteError, RemoteResult};
pub use store::{BoardSnapshot, BoardStore};
pub use sync::SyncReconciler;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
