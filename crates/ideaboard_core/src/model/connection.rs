//! Connection domain model.
//!
//! # Responsibility
//! - Define directional card-to-card connections and their anchor points.
//! - Distinguish persisted connections from locally drawn, unconfirmed ones.
//!
//! # Invariants
//! - `id == None` means "created locally, persistence not yet confirmed".
//! - `handle` is unique per session and never reused, so reconciliation can
//!   address one exact record regardless of list order.

use crate::model::card::CardId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named attachment point on a card's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Right,
    Bottom,
    Left,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Top, Anchor::Right, Anchor::Bottom, Anchor::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-local identity for one connection record.
///
/// Assigned by the store on insert. Null-id records are matched by handle
/// during reconciliation, never by position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionHandle(pub u64);

impl Display for ConnectionHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Directional line between two cards, attached at named anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Server id; `None` until the create call is confirmed.
    pub id: Option<i64>,
    pub from_id: CardId,
    pub to_id: CardId,
    pub from_anchor: Anchor,
    pub to_anchor: Anchor,
    /// Store-assigned session identity; see type docs.
    pub handle: ConnectionHandle,
}

impl Connection {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Whether both endpoints resolve against the given live-card predicate.
    ///
    /// Dangling connections are suppressed from rendering but kept in the
    /// store; this is the display-time filter, not a mutation.
    pub fn endpoints_alive(&self, mut is_live: impl FnMut(CardId) -> bool) -> bool {
        is_live(self.from_id) && is_live(self.to_id)
    }
}
