//! Search-and-grouping pipeline over the remote pin store.

mod aggregator;
mod matcher;
mod types;

pub use aggregator::{group_matches, SearchAggregator, SearchError};
pub use matcher::QueryMatcher;
pub use types::{SearchResultEntry, SearchResultGroup};
