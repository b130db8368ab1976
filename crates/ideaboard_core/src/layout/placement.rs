//! New-card position allocation.
//!
//! # Responsibility
//! - Pick a position for a newly created card that does not sit exactly on
//!   top of an existing card's origin.
//!
//! # Invariants
//! - The collision check is exact-coordinate equality, not bounding-box
//!   overlap: cards dragged off the diagonal grid are not detected. This is
//!   the intended behavior; upgrading it would change where new cards land.
//! - Allocation never fails. After the attempt budget is spent on
//!   collisions, the candidate the loop advanced to is returned without a
//!   further check ("last attempted" reads as the next diagonal pair, not
//!   the last colliding one).

use crate::layout::Point;
use crate::model::card::Card;

/// First position tried for a new card.
pub const PLACEMENT_START: Point = Point { x: 100.0, y: 100.0 };
/// Diagonal step applied after each collision.
pub const PLACEMENT_STEP: f64 = 30.0;

const MAX_PLACEMENT_ATTEMPTS: usize = 50;

/// Walks the diagonal from `PLACEMENT_START` until a free origin is found.
pub fn allocate_position(existing: &[Card]) -> Point {
    let mut candidate = PLACEMENT_START;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let occupied = existing
            .iter()
            .any(|card| card.x == candidate.x && card.y == candidate.y);
        if !occupied {
            return candidate;
        }
        candidate.x += PLACEMENT_STEP;
        candidate.y += PLACEMENT_STEP;
    }
    candidate
}
