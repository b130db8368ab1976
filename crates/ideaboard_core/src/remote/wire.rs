//! Wire shapes of the persistence backend.
//!
//! # Responsibility
//! - Mirror the backend's JSON field names and optionality exactly.
//! - Apply the documented defaults when loaded records omit layout fields.
//!
//! # Invariants
//! - Card list and connection list use different naming conventions
//!   (`zIndex` camelCase vs `source_point` snake_case); both are preserved
//!   as-is, matching the backend.

use crate::model::card::{Card, CardId, DEFAULT_CARD_COORD, DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH};
use crate::model::connection::Anchor;
use serde::{Deserialize, Serialize};

/// One element of the `GET /api/ideas` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "zIndex", default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<i32>,
}

impl CardRecord {
    /// Hydrates a domain card, applying defaults for absent layout fields.
    ///
    /// `list_position` is the record's zero-based index in the response;
    /// a missing `zIndex` defaults to `list_position + 1`.
    pub fn into_card(self, list_position: usize) -> Card {
        Card {
            id: CardId::Persisted(self.id),
            text: self.text,
            x: self.x.unwrap_or(DEFAULT_CARD_COORD),
            y: self.y.unwrap_or(DEFAULT_CARD_COORD),
            width: self.width.unwrap_or(DEFAULT_CARD_WIDTH),
            height: self.height.unwrap_or(DEFAULT_CARD_HEIGHT),
            z_index: self.z_index.unwrap_or(list_position as u32 + 1),
            cluster: self.cluster,
            is_editing: false,
        }
    }
}

/// Body of `POST /api/ideas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Body of `PATCH /api/ideas/:id`; absent fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl CardPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// One element of the `GET /api/connections` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: i64,
    pub source_id: i64,
    pub target_id: i64,
    pub source_point: Anchor,
    pub target_point: Anchor,
}

/// Body of `POST /api/connections`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreateConnectionRequest {
    #[serde(rename = "fromId")]
    pub from_id: i64,
    #[serde(rename = "toId")]
    pub to_id: i64,
    #[serde(rename = "fromPos")]
    pub from_pos: Anchor,
    #[serde(rename = "toPos")]
    pub to_pos: Anchor,
}

/// Create responses carry the assigned row id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}
