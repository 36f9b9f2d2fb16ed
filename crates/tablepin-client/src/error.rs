use thiserror::Error;

/// Errors returned by the pin store client.
///
/// Every failure is terminal for the call that produced it — the client
/// performs no automatic retries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed or cannot carry paths.
    #[error("invalid store base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP 404 — the addressed document does not exist.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// HTTP 401/403 — the store refused the operation. Carries the
    /// server-provided message when the body had one.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {status} from {url}: {message}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
