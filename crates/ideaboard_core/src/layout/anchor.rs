//! Anchor coordinate resolution.
//!
//! # Responsibility
//! - Compute the board-relative position of a card's named anchor.
//! - Prefer live rendered measurements, fall back to pure arithmetic.
//!
//! # Invariants
//! - `resolve_anchor` never fails: a probe miss yields the formula result.
//! - Connection midpoints are recomputed on every call, never cached, so
//!   they track in-progress drags and resizes of either endpoint.

use crate::layout::{Point, Rect};
use crate::model::card::{Card, CardId};
use crate::model::connection::Anchor;

/// Live layout measurement supplied by the embedding shell.
///
/// The shell reports rendered rectangles in viewport coordinates; the
/// resolver translates them into board-relative points. A shell with no
/// measurement capability can return `None` from `anchor_rect` and the
/// resolver degrades to the arithmetic formula.
pub trait AnchorProbe {
    /// Viewport position of the board's top-left corner.
    fn board_origin(&self) -> Point;

    /// Rendered bounding box of one anchor element, viewport-relative.
    fn anchor_rect(&self, card: CardId, anchor: Anchor) -> Option<Rect>;
}

/// Board-relative coordinate of a card's anchor.
///
/// The measured path accounts for actual rendered size, including a resize
/// still in progress; the fallback reads the card's own fields.
pub fn resolve_anchor(probe: &dyn AnchorProbe, card: &Card, anchor: Anchor) -> Point {
    match probe.anchor_rect(card.id, anchor) {
        Some(rect) => {
            let origin = probe.board_origin();
            let center = rect.center();
            Point::new(center.x - origin.x, center.y - origin.y)
        }
        None => anchor_fallback(card, anchor),
    }
}

/// Arithmetic anchor position: the midpoint of the named boundary edge.
pub fn anchor_fallback(card: &Card, anchor: Anchor) -> Point {
    match anchor {
        Anchor::Top => Point::new(card.x + card.width / 2.0, card.y),
        Anchor::Right => Point::new(card.x + card.width, card.y + card.height / 2.0),
        Anchor::Bottom => Point::new(card.x + card.width / 2.0, card.y + card.height),
        Anchor::Left => Point::new(card.x, card.y + card.height / 2.0),
    }
}

/// Midpoint of a rendered connection, where its delete control sits.
pub fn connection_midpoint(from: Point, to: Point) -> Point {
    Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0)
}
