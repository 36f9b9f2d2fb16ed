//! Render-ready search results: one group per matched business.

use rust_decimal::Decimal;

use tablepin_core::{BusinessRecord, MenuKind};

/// One match line inside a group.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultEntry {
    /// A menu item whose name or description matched.
    MenuMatch {
        /// Which of the two menus the item came from.
        source: MenuKind,
        item_name: String,
        item_price: Decimal,
        item_description: Option<String>,
    },
    /// The business itself matched (name, description, or cuisine) and no
    /// menu item did. At most one per group; never present alongside menu
    /// matches.
    BusinessDetails {
        description: Option<String>,
        cuisine: Vec<String>,
    },
}

/// Per-business bundle of search matches, in server-returned order.
///
/// Ephemeral: rebuilt from scratch on every search, discarded on the next
/// query or clear. The full record travels with the group so renderers can
/// reach any business field through a typed value rather than an ad-hoc
/// merge.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultGroup {
    pub business_id: String,
    pub business_name: String,
    /// Great-circle distance from the session location, when both ends are
    /// known.
    pub distance_km: Option<f64>,
    pub entries: Vec<SearchResultEntry>,
    pub record: BusinessRecord,
}
