//! Pointer hit targets.
//!
//! The embedding shell resolves what sits under the pointer before handing
//! the event to the controller. Making the resize handle its own target
//! (rather than a flag on the card body) is what keeps a handle press from
//! also starting a drag.

use crate::model::card::CardId;
use crate::model::connection::Anchor;

/// What the pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty board surface.
    Board,
    /// A card's body (drag surface).
    CardBody(CardId),
    /// A card's resize handle.
    ResizeHandle(CardId),
    /// One of a card's four connection anchors.
    AnchorPoint(CardId, Anchor),
}
