//! Board entity store.
//!
//! # Responsibility
//! - Canonical card-id -> card mapping and connection list for one session.
//! - Copy-on-write mutation so renders always observe a full snapshot.
//! - Session-local id and handle allocation.
//!
//! # Invariants
//! - Card ids are unique within the store.
//! - `bring_to_front` always assigns `max(existing z) + 1`.
//! - Dangling connections are filtered at display time, never deleted here.

use crate::layout::placement::allocate_position;
use crate::layout::Point;
use crate::model::card::{Card, CardId};
use crate::model::connection::{Anchor, Connection, ConnectionHandle};
use std::sync::Arc;

/// Cheap, immutable view of the store taken at one instant.
///
/// Snapshots share the underlying vectors with the store; a later mutation
/// replaces the store's vectors and leaves existing snapshots untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    pub cards: Arc<Vec<Card>>,
    pub connections: Arc<Vec<Connection>>,
}

/// Authoritative in-memory collection of cards and connections.
#[derive(Debug)]
pub struct BoardStore {
    cards: Arc<Vec<Card>>,
    connections: Arc<Vec<Connection>>,
    next_local_card: u64,
    next_handle: u64,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            cards: Arc::new(Vec::new()),
            connections: Arc::new(Vec::new()),
            next_local_card: 1,
            next_handle: 1,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cards: Arc::clone(&self.cards),
            connections: Arc::clone(&self.connections),
        }
    }

    /// Replaces the card collection wholesale (board load).
    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = Arc::new(cards);
    }

    /// Replaces the connection collection wholesale (board load).
    ///
    /// Loaded records get fresh handles so later reconciliation can address
    /// them individually.
    pub fn replace_connections(
        &mut self,
        connections: Vec<(Option<i64>, CardId, CardId, Anchor, Anchor)>,
    ) {
        let records = connections
            .into_iter()
            .map(|(id, from_id, to_id, from_anchor, to_anchor)| Connection {
                id,
                from_id,
                to_id,
                from_anchor,
                to_anchor,
                handle: self.allocate_handle(),
            })
            .collect();
        self.connections = Arc::new(records);
    }

    // ---- cards ----

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Creates a session-local card at an allocator-chosen free position,
    /// stacked on top, in editing mode.
    pub fn create_card(&mut self) -> CardId {
        let at = allocate_position(&self.cards);
        self.create_card_at(at)
    }

    /// Creates a session-local card at an explicit position.
    pub fn create_card_at(&mut self, at: Point) -> CardId {
        let seq = self.next_local_card;
        self.next_local_card += 1;
        let mut card = Card::new_local(seq, at.x, at.y);
        card.z_index = self.max_z() + 1;
        let id = card.id;
        self.with_cards(|cards| cards.push(card));
        id
    }

    /// Applies a closure to one card; returns false when the id is unknown.
    pub fn update_card(&mut self, id: CardId, apply: impl FnOnce(&mut Card)) -> bool {
        if self.card(id).is_none() {
            return false;
        }
        self.with_cards(|cards| {
            if let Some(card) = cards.iter_mut().find(|card| card.id == id) {
                apply(card);
            }
        });
        true
    }

    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        let mut removed = None;
        self.with_cards(|cards| removed = Some(cards.remove(index)));
        removed
    }

    pub fn max_z(&self) -> u32 {
        self.cards.iter().map(|card| card.z_index).max().unwrap_or(0)
    }

    /// Restacks one card above everything else; returns its new z.
    pub fn bring_to_front(&mut self, id: CardId) -> Option<u32> {
        self.card(id)?;
        let top = self.max_z() + 1;
        self.update_card(id, |card| card.z_index = top);
        Some(top)
    }

    /// Rewrites a card's identity after persistence confirms it.
    ///
    /// Matched by the old id, never by index: concurrent edits can reorder
    /// the collection while a create call is in flight. Connection endpoints
    /// referencing the old id are rewritten as well.
    pub fn promote_card_id(&mut self, from: CardId, to: CardId) -> bool {
        if self.card(from).is_none() {
            return false;
        }
        self.with_cards(|cards| {
            if let Some(card) = cards.iter_mut().find(|card| card.id == from) {
                card.id = to;
            }
        });
        self.with_connections(|connections| {
            for conn in connections.iter_mut() {
                if conn.from_id == from {
                    conn.from_id = to;
                }
                if conn.to_id == from {
                    conn.to_id = to;
                }
            }
        });
        true
    }

    /// Cards whose text contains the query, case-insensitively.
    ///
    /// Backs the search box; an empty query matches every card.
    pub fn cards_matching<'a>(&'a self, query: &str) -> Vec<&'a Card> {
        let needle = query.to_lowercase();
        self.cards
            .iter()
            .filter(|card| card.text.to_lowercase().contains(&needle))
            .collect()
    }

    // ---- connections ----

    pub fn connection(&self, handle: ConnectionHandle) -> Option<&Connection> {
        self.connections.iter().find(|conn| conn.handle == handle)
    }

    /// Inserts an optimistic, unconfirmed connection (`id = None`).
    pub fn insert_connection(
        &mut self,
        from_id: CardId,
        to_id: CardId,
        from_anchor: Anchor,
        to_anchor: Anchor,
    ) -> ConnectionHandle {
        let handle = self.allocate_handle();
        let record = Connection {
            id: None,
            from_id,
            to_id,
            from_anchor,
            to_anchor,
            handle,
        };
        self.with_connections(|connections| connections.push(record));
        handle
    }

    /// Promotes a null-id connection to its server id.
    pub fn confirm_connection(&mut self, handle: ConnectionHandle, id: i64) -> bool {
        if self.connection(handle).is_none() {
            return false;
        }
        self.with_connections(|connections| {
            if let Some(conn) = connections.iter_mut().find(|conn| conn.handle == handle) {
                conn.id = Some(id);
            }
        });
        true
    }

    /// Removes exactly one connection by its session handle.
    pub fn remove_connection(&mut self, handle: ConnectionHandle) -> bool {
        let Some(index) = self
            .connections
            .iter()
            .position(|conn| conn.handle == handle)
        else {
            return false;
        };
        self.with_connections(|connections| {
            connections.remove(index);
        });
        true
    }

    /// Connections whose endpoints both resolve to live cards.
    ///
    /// Dangling records stay in the store; suppression is display-only.
    pub fn visible_connections(&self) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|conn| conn.endpoints_alive(|id| self.card(id).is_some()))
            .collect()
    }

    // ---- copy-on-write internals ----

    fn with_cards(&mut self, apply: impl FnOnce(&mut Vec<Card>)) {
        let mut next = (*self.cards).clone();
        apply(&mut next);
        self.cards = Arc::new(next);
    }

    fn with_connections(&mut self, apply: impl FnOnce(&mut Vec<Connection>)) {
        let mut next = (*self.connections).clone();
        apply(&mut next);
        self.connections = Arc::new(next);
    }

    fn allocate_handle(&mut self) -> ConnectionHandle {
        let handle = ConnectionHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}
