//! HTTP client for the remote pin store.
//!
//! Wraps `reqwest` with typed response deserialization and a status-code
//! error taxonomy: 404 → [`StoreError::NotFound`], 401/403 →
//! [`StoreError::PermissionDenied`] (with the server's message when the body
//! carries one), other non-2xx → [`StoreError::UnexpectedStatus`].
//!
//! Pin endpoints return bare documents/arrays; the user-directory endpoint
//! wraps its payload in a `{ "data": ... }` envelope.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::Deserialize;

use tablepin_core::{BusinessRecord, MenuEntry, MenuKind, Review, ReviewDraft, Role, User};

use crate::error::StoreError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Payload for the whole-menu replace endpoint.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuUpdate<'a> {
    menu_type: MenuKind,
    menu_data: &'a [MenuEntry],
}

/// Envelope used by the user-directory service.
#[derive(Debug, Deserialize)]
struct Enveloped<T> {
    data: T,
}

/// Client for the remote pin store REST API.
///
/// Manages the HTTP client and base URL. Use [`PinStoreClient::new`] for
/// production or point the base URL at a mock server in tests. The
/// underlying request timeout is the only timeout policy; no call is
/// retried.
pub struct PinStoreClient {
    client: Client,
    base_url: Url,
}

impl PinStoreClient {
    /// Creates a new client with the collaborator-default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if
    /// `base_url` is not a usable base.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new client with an explicit request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if
    /// `base_url` is not a usable base.
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tablepin/0.1 (restaurant-discovery)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // path joins append segments rather than replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| StoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches every business record in the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on network failure,
    /// [`StoreError::UnexpectedStatus`] on non-2xx, or
    /// [`StoreError::Deserialize`] on a malformed body.
    pub async fn list_pins(&self) -> Result<Vec<BusinessRecord>, StoreError> {
        let url = self.endpoint(&["pins"]);
        let body = self.request_json(Method::GET, url, None).await?;
        from_value(body, "GET pins")
    }

    /// Fetches business records matching `query`, as filtered by the store's
    /// own name search. Callers re-apply the canonical client-side matching
    /// rule over the returned candidates.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] on network failure,
    /// [`StoreError::UnexpectedStatus`] on non-2xx, or
    /// [`StoreError::Deserialize`] on a malformed body.
    pub async fn search_pins(&self, query: &str) -> Result<Vec<BusinessRecord>, StoreError> {
        let mut url = self.endpoint(&["pins", "search", "name"]);
        url.query_pairs_mut().append_pair("q", query);
        let body = self.request_json(Method::GET, url, None).await?;
        from_value(body, &format!("GET pins/search/name?q={query}"))
    }

    /// Fetches a single business record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no document has that id, plus
    /// the usual transport/deserialization failures.
    pub async fn get_pin(&self, id: &str) -> Result<BusinessRecord, StoreError> {
        let url = self.endpoint(&["pins", id]);
        let body = self.request_json(Method::GET, url, None).await?;
        from_value(body, &format!("GET pins/{id}"))
    }

    /// Replaces one of a business's menus wholesale and returns the updated
    /// record. There is no incremental patch — the entire ordered sequence
    /// travels on every call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown business,
    /// [`StoreError::PermissionDenied`] when the store refuses the write,
    /// plus the usual transport/deserialization failures.
    pub async fn replace_menu(
        &self,
        id: &str,
        kind: MenuKind,
        entries: &[MenuEntry],
    ) -> Result<BusinessRecord, StoreError> {
        tracing::debug!(pin = id, menu = %kind, entries = entries.len(), "replacing menu");
        let url = self.endpoint(&["pins", id, "menu"]);
        let payload = serde_json::to_value(MenuUpdate {
            menu_type: kind,
            menu_data: entries,
        })
        .map_err(|e| StoreError::Deserialize {
            context: format!("PUT pins/{id}/menu (request body)"),
            source: e,
        })?;
        let body = self.request_json(Method::PUT, url, Some(payload)).await?;
        from_value(body, &format!("PUT pins/{id}/menu"))
    }

    /// Creates a review on a business and returns the stored review.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown business, plus the
    /// usual transport/deserialization failures.
    pub async fn create_review(
        &self,
        id: &str,
        draft: &ReviewDraft,
    ) -> Result<Review, StoreError> {
        let url = self.endpoint(&["pins", id, "reviews"]);
        let payload = review_payload(id, draft)?;
        let body = self.request_json(Method::POST, url, Some(payload)).await?;
        from_value(body, &format!("POST pins/{id}/reviews"))
    }

    /// Replaces an existing review's fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown business or review,
    /// plus the usual transport/deserialization failures.
    pub async fn update_review(
        &self,
        id: &str,
        review_id: &str,
        draft: &ReviewDraft,
    ) -> Result<Review, StoreError> {
        let url = self.endpoint(&["pins", id, "reviews", review_id]);
        let payload = review_payload(id, draft)?;
        let body = self.request_json(Method::PUT, url, Some(payload)).await?;
        from_value(body, &format!("PUT pins/{id}/reviews/{review_id}"))
    }

    /// Deletes a review.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown business or review,
    /// plus the usual transport failures.
    pub async fn delete_review(&self, id: &str, review_id: &str) -> Result<(), StoreError> {
        let url = self.endpoint(&["pins", id, "reviews", review_id]);
        self.request_expect_success(Method::DELETE, url, None)
            .await?;
        Ok(())
    }

    /// Upserts a user by email in the user directory and returns the stored
    /// document. `role` falls back to the directory's default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnexpectedStatus`] when the directory rejects
    /// the payload, plus the usual transport/deserialization failures.
    pub async fn upsert_user(
        &self,
        name: &str,
        email: &str,
        role: Option<Role>,
    ) -> Result<User, StoreError> {
        tracing::debug!(email, "upserting user");
        let url = self.endpoint(&["users"]);
        let mut payload = serde_json::json!({ "name": name, "email": email });
        if let Some(role) = role {
            payload["role"] = serde_json::Value::String(role.to_string());
        }
        let body = self.request_json(Method::POST, url, Some(payload)).await?;
        let envelope: Enveloped<User> =
            serde_json::from_value(body).map_err(|e| StoreError::Deserialize {
                context: format!("POST users (email={email})"),
                source: e,
            })?;
        Ok(envelope.data)
    }

    /// Builds the full request URL from path segments, percent-encoding each
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            // Constructor rejected cannot-be-a-base URLs.
            let mut path = url
                .path_segments_mut()
                .expect("base URL validated at construction");
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    /// Sends a request, maps error statuses, and parses the body as JSON.
    async fn request_json(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, StoreError> {
        let text = self.request_expect_success(method, url.clone(), body).await?;
        serde_json::from_str(&text).map_err(|e| StoreError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends a request and returns the raw body text on 2xx, mapping 404,
    /// 401/403, and other non-2xx statuses to typed errors.
    async fn request_expect_success(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<String, StoreError> {
        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(StoreError::NotFound {
                url: url.to_string(),
            }),
            401 | 403 => Err(StoreError::PermissionDenied {
                message: server_message(&text)
                    .unwrap_or_else(|| "the store refused this operation".to_string()),
            }),
            code => Err(StoreError::UnexpectedStatus {
                status: code,
                url: url.to_string(),
                message: server_message(&text).unwrap_or_else(|| "no server message".to_string()),
            }),
        }
    }
}

fn review_payload(id: &str, draft: &ReviewDraft) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(draft).map_err(|e| StoreError::Deserialize {
        context: format!("review payload for pin {id}"),
        source: e,
    })
}

fn from_value<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
    context: &str,
) -> Result<T, StoreError> {
    serde_json::from_value(body).map_err(|e| StoreError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Extracts a human-readable message from an error body, accepting both the
/// enveloped `{"error": {"message": ...}}` and flat `{"message": ...}` shapes.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
