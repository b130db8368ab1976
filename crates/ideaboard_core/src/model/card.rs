//! Card domain model.
//!
//! # Responsibility
//! - Define the card record and its identity union.
//! - Provide size/position constants shared by layout and gestures.
//!
//! # Invariants
//! - A card's identity kind can only change through explicit promotion
//!   (`CardId::Local` -> `CardId::Persisted`), never by value reuse.
//! - `width >= MIN_CARD_WIDTH` and `height >= MIN_CARD_HEIGHT` after any
//!   resize; hydration applies wire defaults before these apply.

use crate::layout::Rect;
use std::fmt::{Display, Formatter};

/// Minimum card width enforced by resize gestures.
pub const MIN_CARD_WIDTH: f64 = 100.0;
/// Minimum card height enforced by resize gestures.
pub const MIN_CARD_HEIGHT: f64 = 80.0;
/// Width applied when a loaded record carries no width.
pub const DEFAULT_CARD_WIDTH: f64 = 200.0;
/// Height applied when a loaded record carries no height.
pub const DEFAULT_CARD_HEIGHT: f64 = 100.0;
/// Coordinate applied when a loaded record carries no x or y.
pub const DEFAULT_CARD_COORD: f64 = 100.0;

/// Card identity.
///
/// Session-local ids are handed out by the store's counter and exist only
/// until the first successful create call; server ids are authoritative.
/// Keeping the two kinds in one tagged union makes every identity dispatch
/// an exhaustive match instead of a string-prefix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardId {
    /// Assigned from the session counter; never sent over the wire.
    Local(u64),
    /// Server-assigned row id.
    Persisted(i64),
}

impl CardId {
    /// Returns whether this id refers to a server-persisted card.
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    /// Returns the server id when persisted.
    pub fn server_id(self) -> Option<i64> {
        match self {
            Self::Local(_) => None,
            Self::Persisted(id) => Some(id),
        }
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(seq) => write!(f, "temp-{seq}"),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

/// A short text note laid out on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    /// Mutable note body; empty while a new card awaits its first commit.
    pub text: String,
    /// Top-left corner, board-relative.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order; the most recently interacted card holds the maximum.
    pub z_index: u32,
    /// Opaque grouping label used only for color lookup; assigned remotely.
    pub cluster: Option<i32>,
    /// Transient editing flag; never persisted.
    pub is_editing: bool,
}

impl Card {
    /// Creates a fresh session-local card at the given position.
    ///
    /// New cards start empty, in editing mode, with default dimensions.
    /// The caller (the store) is responsible for stacking it on top.
    pub fn new_local(seq: u64, x: f64, y: f64) -> Self {
        Self {
            id: CardId::Local(seq),
            text: String::new(),
            x,
            y,
            width: DEFAULT_CARD_WIDTH,
            height: DEFAULT_CARD_HEIGHT,
            z_index: 0,
            cluster: None,
            is_editing: true,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_persisted()
    }

    /// Bounding rectangle in board coordinates.
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

const CLUSTER_COLORS: [&str; 7] = [
    "#fff9c4", "#b2ebf2", "#ffcdd2", "#d1c4e9", "#c8e6c9", "#ffecb3", "#e0f7fa",
];

const UNCLUSTERED_COLOR: &str = "#eeeeee";

/// Maps an opaque cluster label to its display color.
///
/// Absent clusters and the `-1` noise label share the neutral color; real
/// labels cycle through the fixed palette.
pub fn cluster_color(cluster: Option<i32>) -> &'static str {
    match cluster {
        None | Some(-1) => UNCLUSTERED_COLOR,
        Some(label) => CLUSTER_COLORS[label.unsigned_abs() as usize % CLUSTER_COLORS.len()],
    }
}
