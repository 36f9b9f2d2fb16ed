//! The user-directory upsert endpoint.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use tablepin_core::{Role, User};
use tablepin_db::UserRow;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(in crate::api) struct UpsertUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Trims and lowercases the email; the lowered form is both the stored
/// value and the natural key.
fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err("email must not be empty".to_string());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(format!("'{email}' is not a valid email address"));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(format!("'{email}' is not a valid email address"));
    }
    Ok(email)
}

/// Missing role falls back to the directory default; unknown values are
/// rejected rather than silently coerced.
fn parse_role(raw: Option<&str>) -> Result<Role, String> {
    match raw {
        None => Ok(Role::default()),
        Some(value) => value
            .parse::<Role>()
            .map_err(|_| format!("role must be 'user' or 'admin', got '{value}'")),
    }
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: row.public_id,
        name: row.name,
        email: row.email,
        // The database CHECK constraint limits stored roles to the enum.
        role: row.role.parse().unwrap_or_default(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// POST /users — upsert a user by email and return the stored document.
pub(in crate::api) async fn upsert_user(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<UpsertUserRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let rid = &req_id.0;

    let name = body.name.trim().to_owned();
    if name.is_empty() || name.len() > 200 {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "name must be 1–200 characters",
        ));
    }
    let email =
        normalize_email(&body.email).map_err(|reason| ApiError::new(rid, "validation_error", reason))?;
    let role =
        parse_role(body.role.as_deref()).map_err(|reason| ApiError::new(rid, "validation_error", reason))?;

    let row = tablepin_db::upsert_user_by_email(&state.pool, &name, &email, &role.to_string())
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: user_from_row(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
