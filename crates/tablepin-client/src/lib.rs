//! Typed HTTP client for the remote pin store and the user-directory
//! service.

mod client;
mod error;

pub use client::PinStoreClient;
pub use error::StoreError;
