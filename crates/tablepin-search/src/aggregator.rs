//! Search pipeline: query submission → remote fetch → multi-field match →
//! grouping by business → distance annotation → render-ready result tree.

use std::sync::atomic::{AtomicU64, Ordering};

use tablepin_client::{PinStoreClient, StoreError};
use tablepin_core::{distance_km, BusinessRecord, Coordinates, MenuEntry, MenuKind};
use thiserror::Error;

use crate::matcher::QueryMatcher;
use crate::types::{SearchResultEntry, SearchResultGroup};

#[derive(Debug, Error)]
pub enum SearchError {
    /// The remote fetch failed. Callers render an empty result list plus
    /// the user-visible message; the failure is terminal for this search.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A newer search started while this one was in flight; the stale
    /// response was discarded instead of being applied after the fact.
    #[error("superseded by a newer search")]
    Superseded,
}

/// Runs searches against the pin store and assembles result groups.
///
/// Holds a generation counter bumped on every submission: a response that
/// comes back after a newer search has started is detected at the
/// suspension point and dropped with [`SearchError::Superseded`].
pub struct SearchAggregator<'a> {
    store: &'a PinStoreClient,
    generation: AtomicU64,
}

impl<'a> SearchAggregator<'a> {
    #[must_use]
    pub fn new(store: &'a PinStoreClient) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Runs one search.
    ///
    /// An empty or whitespace-only query returns an empty result set
    /// WITHOUT contacting the store — "no query" is distinct from "query
    /// with zero matches", which does hit the network. When `origin` is
    /// absent, every group's `distance_km` is `None`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Store`] if the remote fetch fails.
    /// - [`SearchError::Superseded`] if a newer search started while this
    ///   one was suspended on the network.
    pub async fn search(
        &self,
        query: &str,
        origin: Option<Coordinates>,
    ) -> Result<Vec<SearchResultGroup>, SearchError> {
        let Some(matcher) = QueryMatcher::new(query) else {
            return Ok(Vec::new());
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let records = self.store.search_pins(query.trim()).await?;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(query, "discarding stale search response");
            return Err(SearchError::Superseded);
        }

        tracing::debug!(query, candidates = records.len(), "grouping candidates");
        Ok(group_matches(records, &matcher, origin))
    }
}

/// The pure grouping core, network-free.
///
/// Walks the candidate records in the order received (server order is group
/// order). Per record: annotate distance once, scan the food menu then the
/// drinks menu for item matches, and fall back to a single business-details
/// entry when only business-level fields matched. Item matches take display
/// priority — a group never carries both kinds.
#[must_use]
pub fn group_matches(
    records: Vec<BusinessRecord>,
    matcher: &QueryMatcher,
    origin: Option<Coordinates>,
) -> Vec<SearchResultGroup> {
    let mut groups = Vec::new();

    for record in records {
        let distance = match (origin, record.location) {
            (Some(from), Some(at)) => Some(distance_km(from, at.coordinates())),
            _ => None,
        };

        let mut entries = Vec::new();
        for kind in [MenuKind::Food, MenuKind::Drinks] {
            for entry in record.menu(kind) {
                let MenuEntry::Item {
                    name,
                    price,
                    description,
                    ..
                } = entry
                else {
                    continue;
                };
                if matcher.matches(name) || matcher.matches_opt(description.as_deref()) {
                    entries.push(SearchResultEntry::MenuMatch {
                        source: kind,
                        item_name: name.clone(),
                        item_price: *price,
                        item_description: description.clone(),
                    });
                }
            }
        }

        if entries.is_empty() {
            let business_matched = matcher.matches_opt(record.name.as_deref())
                || matcher.matches_opt(record.description.as_deref())
                || record.cuisine.iter().any(|c| matcher.matches(c));
            if business_matched {
                entries.push(SearchResultEntry::BusinessDetails {
                    description: record.description.clone(),
                    cuisine: record.cuisine.clone(),
                });
            }
        }

        if !entries.is_empty() {
            groups.push(SearchResultGroup {
                business_id: record.id.clone(),
                business_name: record.display_name().to_string(),
                distance_km: distance,
                entries,
                record,
            });
        }
    }

    groups
}
