//! Board geometry: anchor resolution and new-card placement.
//!
//! # Responsibility
//! - Provide the shared point/rect primitives used across core modules.
//! - Resolve anchor coordinates and allocate non-colliding card positions.
//!
//! # Invariants
//! - Anchor resolution is total; it degrades to arithmetic, never fails.
//! - Placement uses exact-coordinate collision checks by design.

pub mod anchor;
pub mod placement;

/// A board- or viewport-relative point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}
