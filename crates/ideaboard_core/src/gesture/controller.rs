//! Gesture state machine.
//!
//! # Responsibility
//! - Own the single active gesture and dispatch pointer events to it.
//! - Apply drag/resize mutations to the store synchronously per move event.
//! - Emit a completion effect for the sync layer when a gesture ends.
//!
//! # Invariants
//! - `pointer_down` while a gesture is active is ignored.
//! - Connect gestures never mutate the store; only their transient line
//!   endpoint moves.
//! - Every path out of a gesture (end or cancel) releases pointer capture.

use crate::layout::Point;
use crate::model::card::{CardId, MIN_CARD_HEIGHT, MIN_CARD_WIDTH};
use crate::model::connection::Anchor;
use crate::store::BoardStore;

use super::pointer::HitTarget;

/// Outcome of a completed gesture, handed to the sync reconciler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// A drag ended; the card rests at its terminal position.
    PositionSettled { card: CardId },
    /// A resize ended; the card rests at its terminal size.
    SizeSettled { card: CardId },
    /// A connect gesture ended on a valid anchor of a different card.
    ConnectionDrawn {
        from: CardId,
        from_anchor: Anchor,
        to: CardId,
        to_anchor: Anchor,
    },
}

/// The in-flight connect line, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingConnector {
    pub from: CardId,
    pub from_anchor: Anchor,
    /// Free endpoint, board-relative.
    pub pointer: Point,
}

/// Discriminant view of the controller state, for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging(CardId),
    Resizing(CardId),
    ConnectingFrom(CardId, Anchor),
}

enum ActiveGesture {
    Drag {
        card: CardId,
        /// Pointer position relative to the card's top-left at press time.
        offset: Point,
    },
    Resize {
        card: CardId,
        start_pointer: Point,
        start_width: f64,
        start_height: f64,
    },
    Connect {
        from: CardId,
        from_anchor: Anchor,
        pointer: Point,
    },
}

impl ActiveGesture {
    fn on_move(&mut self, store: &mut BoardStore, pointer: Point, board_origin: Point) {
        match self {
            Self::Drag { card, offset } => {
                let x = pointer.x - offset.x - board_origin.x;
                let y = pointer.y - offset.y - board_origin.y;
                store.update_card(*card, |c| {
                    c.x = x;
                    c.y = y;
                });
            }
            Self::Resize {
                card,
                start_pointer,
                start_width,
                start_height,
            } => {
                let dx = pointer.x - start_pointer.x;
                let dy = pointer.y - start_pointer.y;
                let width = (*start_width + dx).max(MIN_CARD_WIDTH);
                let height = (*start_height + dy).max(MIN_CARD_HEIGHT);
                store.update_card(*card, |c| {
                    c.width = width;
                    c.height = height;
                });
            }
            Self::Connect { pointer: free, .. } => {
                *free = pointer;
            }
        }
    }

    fn end(self, target: HitTarget) -> Option<GestureEffect> {
        match self {
            Self::Drag { card, .. } => Some(GestureEffect::PositionSettled { card }),
            Self::Resize { card, .. } => Some(GestureEffect::SizeSettled { card }),
            Self::Connect {
                from, from_anchor, ..
            } => match target {
                // Self-connections are cancelled, not errors.
                HitTarget::AnchorPoint(to, to_anchor) if to != from => {
                    Some(GestureEffect::ConnectionDrawn {
                        from,
                        from_anchor,
                        to,
                        to_anchor,
                    })
                }
                _ => None,
            },
        }
    }
}

/// State machine over pointer input; at most one gesture at a time.
///
/// The controller is the sole subscriber to the shell's pointer source.
/// Pointer coordinates arrive viewport-relative; `board_origin` translates
/// them into board space.
pub struct InteractionController {
    active: Option<ActiveGesture>,
    board_origin: Point,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            active: None,
            board_origin: Point::default(),
        }
    }

    /// Viewport position of the board, refreshed by the shell on layout
    /// changes (scroll, window resize).
    pub fn set_board_origin(&mut self, origin: Point) {
        self.board_origin = origin;
    }

    pub fn state(&self) -> GestureState {
        match &self.active {
            None => GestureState::Idle,
            Some(ActiveGesture::Drag { card, .. }) => GestureState::Dragging(*card),
            Some(ActiveGesture::Resize { card, .. }) => GestureState::Resizing(*card),
            Some(ActiveGesture::Connect {
                from, from_anchor, ..
            }) => GestureState::ConnectingFrom(*from, *from_anchor),
        }
    }

    /// Whether the shell should hold global move/up listeners.
    ///
    /// True exactly while a gesture is active; acquisition and release are
    /// scoped to the gesture, never left dangling.
    pub fn captures_pointer(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight connect line, if a connect gesture is active.
    pub fn pending_connector(&self) -> Option<PendingConnector> {
        match &self.active {
            Some(ActiveGesture::Connect {
                from,
                from_anchor,
                pointer,
            }) => Some(PendingConnector {
                from: *from,
                from_anchor: *from_anchor,
                pointer: Point::new(
                    pointer.x - self.board_origin.x,
                    pointer.y - self.board_origin.y,
                ),
            }),
            _ => None,
        }
    }

    /// Begins a gesture according to what the pointer landed on.
    ///
    /// Dragging raises the card's z immediately; that side effect is
    /// visible regardless of persistence. Unknown card ids are ignored.
    pub fn pointer_down(&mut self, store: &mut BoardStore, target: HitTarget, pointer: Point) {
        if self.active.is_some() {
            return;
        }
        match target {
            HitTarget::Board => {}
            HitTarget::CardBody(id) => {
                let Some(card) = store.card(id) else { return };
                let offset = Point::new(
                    pointer.x - (card.x + self.board_origin.x),
                    pointer.y - (card.y + self.board_origin.y),
                );
                store.bring_to_front(id);
                self.active = Some(ActiveGesture::Drag { card: id, offset });
            }
            HitTarget::ResizeHandle(id) => {
                let Some(card) = store.card(id) else { return };
                self.active = Some(ActiveGesture::Resize {
                    card: id,
                    start_pointer: pointer,
                    start_width: card.width,
                    start_height: card.height,
                });
            }
            HitTarget::AnchorPoint(id, anchor) => {
                if store.card(id).is_none() {
                    return;
                }
                self.active = Some(ActiveGesture::Connect {
                    from: id,
                    from_anchor: anchor,
                    pointer,
                });
            }
        }
    }

    /// Advances the active gesture; a no-op while idle.
    pub fn pointer_move(&mut self, store: &mut BoardStore, pointer: Point) {
        let origin = self.board_origin;
        if let Some(gesture) = self.active.as_mut() {
            gesture.on_move(store, pointer, origin);
        }
    }

    /// Ends the active gesture and returns its effect, if any.
    ///
    /// A connect gesture released anywhere but a valid anchor of another
    /// card is discarded silently.
    pub fn pointer_up(&mut self, target: HitTarget) -> Option<GestureEffect> {
        self.active.take().and_then(|gesture| gesture.end(target))
    }

    /// Abandons the active gesture with no effect.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
