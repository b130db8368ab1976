//! Sync reconciler.
//!
//! # Responsibility
//! - Drive the persistence contract from gesture effects and edit commits.
//! - Keep a per-card baseline of server-acknowledged fields so confirmed
//!   update failures can be rolled back consistently.
//!
//! # Invariants
//! - Temporary cards are persisted only on their first non-empty text
//!   commit; a failed create is retried on the next explicit commit only.
//! - Connection creates roll back fully on failure; deletes of persisted
//!   connections remove locally only after the backend confirms.
//! - Card deletion is optimistic and its remote delete is fire-and-forget.

use crate::gesture::GestureEffect;
use crate::model::card::CardId;
use crate::model::connection::{Anchor, ConnectionHandle};
use crate::remote::wire::{CardPatch, CreateCardRequest, CreateConnectionRequest};
use crate::remote::{BoardApi, RemoteResult};
use crate::store::BoardStore;
use log::{debug, error, info};
use std::collections::HashMap;

/// Last server-acknowledged mutable fields of a persisted card.
///
/// Seeded on load and create, advanced on every acknowledged update. A
/// confirmed update failure restores these values; a call that never
/// resolves restores nothing (the optimistic state stands).
#[derive(Debug, Clone, PartialEq)]
struct AckedCard {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: String,
}

/// Bridges optimistic local mutation to the asynchronous backend.
pub struct SyncReconciler<A: BoardApi> {
    api: A,
    acknowledged: HashMap<i64, AckedCard>,
}

impl<A: BoardApi> SyncReconciler<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            acknowledged: HashMap::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches cards and connections and hydrates the store.
    ///
    /// Nothing optimistic is in play here: on failure the store is left
    /// untouched and the error propagates to the shell.
    pub fn load_board(&mut self, store: &mut BoardStore) -> RemoteResult<()> {
        let card_records = self.api.list_cards()?;
        let connection_records = self.api.list_connections()?;

        let cards: Vec<_> = card_records
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_card(position))
            .collect();
        self.acknowledged = cards
            .iter()
            .filter_map(|card| {
                card.id.server_id().map(|id| {
                    (
                        id,
                        AckedCard {
                            x: card.x,
                            y: card.y,
                            width: card.width,
                            height: card.height,
                            text: card.text.clone(),
                        },
                    )
                })
            })
            .collect();

        store.replace_cards(cards);
        store.replace_connections(
            connection_records
                .into_iter()
                .map(|record| {
                    (
                        Some(record.id),
                        CardId::Persisted(record.source_id),
                        CardId::Persisted(record.target_id),
                        record.source_point,
                        record.target_point,
                    )
                })
                .collect(),
        );

        info!(
            "event=board_load module=sync status=ok cards={} connections={}",
            store.cards().len(),
            store.connections().len()
        );
        Ok(())
    }

    /// Routes a completed gesture to its persistence call.
    pub fn apply_effect(&mut self, store: &mut BoardStore, effect: GestureEffect) {
        match effect {
            GestureEffect::PositionSettled { card } => self.commit_position(store, card),
            GestureEffect::SizeSettled { card } => self.commit_size(store, card),
            GestureEffect::ConnectionDrawn {
                from,
                from_anchor,
                to,
                to_anchor,
            } => self.create_connection(store, from, from_anchor, to, to_anchor),
        }
    }

    /// Commits a card's text: first commit of a temporary card creates it.
    ///
    /// An empty (all-whitespace) commit is a silent validation no-op; the
    /// card stays as it was, editing included.
    pub fn commit_text(&mut self, store: &mut BoardStore, id: CardId) {
        let Some(card) = store.card(id) else { return };
        if card.text.trim().is_empty() {
            debug!("event=text_commit module=sync status=skip reason=empty card={id}");
            return;
        }
        let (text, x, y) = (card.text.clone(), card.x, card.y);

        // Editing ends immediately, before the call resolves.
        store.update_card(id, |card| card.is_editing = false);

        match id {
            CardId::Local(_) => {
                let request = CreateCardRequest { text, x, y };
                match self.api.create_card(&request) {
                    Ok(created) => {
                        // Matched by temp id: the collection may have been
                        // reordered while the call was in flight.
                        store.promote_card_id(id, CardId::Persisted(created.id));
                        self.remember_ack(store, created.id);
                        info!(
                            "event=card_create module=sync status=ok temp={id} id={}",
                            created.id
                        );
                    }
                    Err(err) => {
                        // Stays temporary; retried on the next explicit commit.
                        error!("event=card_create module=sync status=error card={id} err={err}");
                    }
                }
            }
            CardId::Persisted(server_id) => match self.api.update_card_text(server_id, &text) {
                Ok(()) => self.remember_ack(store, server_id),
                Err(err) => {
                    error!("event=text_update module=sync status=error card={id} err={err}");
                    self.rollback_card(store, server_id);
                }
            },
        }
    }

    /// Persists a drag's terminal position. Temporary cards are not synced.
    pub fn commit_position(&mut self, store: &mut BoardStore, id: CardId) {
        let Some(server_id) = id.server_id() else {
            return;
        };
        let Some(card) = store.card(id) else { return };
        let patch = CardPatch::position(card.x, card.y);
        match self.api.update_card(server_id, &patch) {
            Ok(()) => self.remember_ack(store, server_id),
            Err(err) => {
                error!("event=position_update module=sync status=error card={id} err={err}");
                self.rollback_card(store, server_id);
            }
        }
    }

    /// Persists a resize's terminal size. Temporary cards are not synced.
    pub fn commit_size(&mut self, store: &mut BoardStore, id: CardId) {
        let Some(server_id) = id.server_id() else {
            return;
        };
        let Some(card) = store.card(id) else { return };
        let patch = CardPatch::size(card.width, card.height);
        match self.api.update_card(server_id, &patch) {
            Ok(()) => self.remember_ack(store, server_id),
            Err(err) => {
                error!("event=size_update module=sync status=error card={id} err={err}");
                self.rollback_card(store, server_id);
            }
        }
    }

    /// Removes a card locally right away; the remote delete (persisted
    /// cards only) is fire-and-forget. Connections referencing the card
    /// stay in the store and are suppressed by the display filter.
    pub fn delete_card(&mut self, store: &mut BoardStore, id: CardId) {
        if store.remove_card(id).is_none() {
            return;
        }
        let Some(server_id) = id.server_id() else {
            return;
        };
        self.acknowledged.remove(&server_id);
        if let Err(err) = self.api.delete_card(server_id) {
            error!("event=card_delete module=sync status=error card={id} err={err}");
        }
    }

    /// Persists a drawn connection, optimistically inserted with a null id.
    ///
    /// The wire contract carries server card ids only, so a connection
    /// touching a never-persisted card is a validation no-op.
    pub fn create_connection(
        &mut self,
        store: &mut BoardStore,
        from: CardId,
        from_anchor: Anchor,
        to: CardId,
        to_anchor: Anchor,
    ) {
        let (Some(from_server), Some(to_server)) = (from.server_id(), to.server_id()) else {
            debug!(
                "event=connection_create module=sync status=skip reason=unpersisted_endpoint \
                 from={from} to={to}"
            );
            return;
        };

        let handle = store.insert_connection(from, to, from_anchor, to_anchor);
        let request = CreateConnectionRequest {
            from_id: from_server,
            to_id: to_server,
            from_pos: from_anchor,
            to_pos: to_anchor,
        };
        match self.api.create_connection(&request) {
            Ok(created) => {
                store.confirm_connection(handle, created.id);
                info!(
                    "event=connection_create module=sync status=ok id={} from={from} to={to}",
                    created.id
                );
            }
            Err(err) => {
                // Full rollback: exactly the optimistic record is removed.
                store.remove_connection(handle);
                error!("event=connection_create module=sync status=error from={from} to={to} err={err}");
            }
        }
    }

    /// Deletes one connection by its session handle.
    ///
    /// Persisted connections leave the store only when the backend
    /// confirms; never-persisted ones go immediately with no call.
    pub fn delete_connection(&mut self, store: &mut BoardStore, handle: ConnectionHandle) {
        let Some(conn) = store.connection(handle) else {
            return;
        };
        match conn.id {
            Some(server_id) => match self.api.delete_connection(server_id) {
                Ok(()) => {
                    store.remove_connection(handle);
                }
                Err(err) => {
                    error!(
                        "event=connection_delete module=sync status=error id={server_id} err={err}"
                    );
                }
            },
            None => {
                store.remove_connection(handle);
            }
        }
    }

    fn remember_ack(&mut self, store: &BoardStore, server_id: i64) {
        if let Some(card) = store.card(CardId::Persisted(server_id)) {
            self.acknowledged.insert(
                server_id,
                AckedCard {
                    x: card.x,
                    y: card.y,
                    width: card.width,
                    height: card.height,
                    text: card.text.clone(),
                },
            );
        }
    }

    /// Restores the last acknowledged fields after a confirmed failure.
    fn rollback_card(&self, store: &mut BoardStore, server_id: i64) {
        let Some(acked) = self.acknowledged.get(&server_id) else {
            return;
        };
        let acked = acked.clone();
        store.update_card(CardId::Persisted(server_id), |card| {
            card.x = acked.x;
            card.y = acked.y;
            card.width = acked.width;
            card.height = acked.height;
            card.text = acked.text;
        });
    }
}
