// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, warn};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserDto, UserResponse};
use crate::state::AppState;
use crate::store::{hash_password, normalize_username, verify_password, Credentials, StoreError};

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Username or password empty"),
        (status = 409, description = "Username already taken"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    match create_account(&state, &request).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "User registered");
            Ok((StatusCode::CREATED, Json(UserResponse { user })))
        }
        Err(e) => {
            warn!(username = %request.username, error = %e, "Registration failed");
            Err(e.into())
        }
    }
}

/// Validate, hash off the runtime, then insert under a short write lock.
async fn create_account(
    state: &AppState,
    request: &RegisterRequest,
) -> Result<UserDto, StoreError> {
    if normalize_username(&request.username).is_empty() || request.password.is_empty() {
        return Err(StoreError::EmptyField);
    }
    // Skip the hash for names that are already taken; insert re-checks.
    if state.users.read().await.contains(&request.username) {
        return Err(StoreError::UsernameTaken);
    }

    let password = request.password.clone();
    let password_hash = blocking(move || hash_password(&password)).await?;

    state
        .users
        .write()
        .await
        .insert(&request.username, password_hash)
}

/// Run CPU-bound password work on the blocking pool.
async fn blocking<T, F>(job: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| StoreError::Hashing(e.to_string()))?
}

/// Check credentials and issue a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = check_credentials(&state, &request).await.map_err(|e| {
        match &e {
            StoreError::Hashing(detail) => {
                error!(username = %request.username, error = %detail, "Stored password hash unusable")
            }
            _ => warn!(username = %request.username, "Login failed"),
        }
        ApiError::from(e)
    })?;

    let token = state
        .issuer
        .issue(&Identity::new(user.id, user.username.clone()))
        .map_err(|e| {
            error!(user_id = user.id, error = %e, "Failed to generate token");
            ApiError::internal("failed to generate token")
        })?;

    info!(user_id = user.id, username = %user.username, "User logged in");
    Ok(Json(LoginResponse { token, user }))
}

/// Copy the stored hash out under the read lock, then verify without it.
async fn check_credentials(
    state: &AppState,
    request: &LoginRequest,
) -> Result<UserDto, StoreError> {
    let Credentials { user, password_hash } = state
        .users
        .read()
        .await
        .credentials(&request.username)
        .ok_or(StoreError::InvalidCredentials)?;

    let password = request.password.clone();
    blocking(move || verify_password(&password, &password_hash)).await?;
    Ok(user)
}
