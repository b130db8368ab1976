//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `ideaboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use ideaboard_core::{allocate_position, BoardStore};

fn main() {
    println!("ideaboard_core version={}", ideaboard_core::core_version());

    let store = BoardStore::new();
    let first = allocate_position(store.cards());
    println!("first free card slot=({}, {})", first.x, first.y);
}
