//! Records stored in the remote pin store: businesses, their two menus,
//! and reviews.
//!
//! All types model the JSON documents exchanged with the store. Field names
//! are camelCase on the wire; optional document fields default rather than
//! fail deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// A stored longitude/latitude pair.
///
/// The wire format is a two-element array `[longitude, latitude]` —
/// longitude FIRST, matching the store's document shape. Use
/// [`LngLat::coordinates`] to un-swap the pair into named fields before any
/// distance math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LngLat([f64; 2]);

impl LngLat {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self([longitude, latitude])
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.0[1]
    }

    /// Returns the pair as named [`Coordinates`].
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.0[1],
            longitude: self.0[0],
        }
    }
}

/// Selects which of a business's two structurally identical menus an
/// operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Food,
    Drinks,
}

impl std::fmt::Display for MenuKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuKind::Food => write!(f, "food"),
            MenuKind::Drinks => write!(f, "drinks"),
        }
    }
}

/// One entry in a menu's ordered sequence: a section header or a priced
/// line item. Position in the sequence IS the display order — there is no
/// separate sort key.
///
/// `id` is unique within its list and stable across edits; an edit re-uses
/// the existing id, never regenerates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MenuEntry {
    Header {
        id: String,
        title: String,
    },
    Item {
        id: String,
        name: String,
        price: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl MenuEntry {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            MenuEntry::Header { id, .. } | MenuEntry::Item { id, .. } => id,
        }
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, MenuEntry::Item { .. })
    }
}

/// A customer review attached to a business document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Review fields supplied by the client when creating or replacing a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub rating: u8,
    #[serde(default)]
    pub text: Option<String>,
}

/// One place (restaurant) as stored in the remote pin store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub location: Option<LngLat>,
    #[serde(default)]
    pub food_menu: Vec<MenuEntry>,
    #[serde(default)]
    pub drinks_menu: Vec<MenuEntry>,
    /// User id of the business owner; input to the menu-edit permission gate.
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl BusinessRecord {
    /// The named menu, in display order.
    #[must_use]
    pub fn menu(&self, kind: MenuKind) -> &[MenuEntry] {
        match kind {
            MenuKind::Food => &self.food_menu,
            MenuKind::Drinks => &self.drinks_menu,
        }
    }

    /// Display name, falling back to the record id for unnamed documents.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
