// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Json};
use tracing::warn;

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::UserResponse;
use crate::state::AppState;

/// Get the current authenticated user's profile.
///
/// The identity comes from the verified token; the account is then looked up
/// by its numeric id.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Account no longer exists"),
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .read()
        .await
        .find_by_id(identity.user_id)
        .ok_or_else(|| {
            warn!(user_id = identity.user_id, "Token refers to unknown user");
            ApiError::not_found("user not found")
        })?;

    Ok(Json(UserResponse { user }))
}
