//! Pointer gesture handling.
//!
//! # Responsibility
//! - Model drag, resize, and connect gestures as one finite state machine.
//! - Translate raw pointer events into store mutations and sync effects.
//!
//! # Invariants
//! - At most one gesture is active at any time.
//! - Pointer capture is held exactly while a gesture is active.

mod controller;
mod pointer;

pub use controller::{GestureEffect, GestureState, InteractionController, PendingConnector};
pub use pointer::HitTarget;
