// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, ORIGIN},
        HeaderName, HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, Identity},
    models::{LoginRequest, LoginResponse, RegisterRequest, UserDto, UserResponse},
    state::AppState,
};

pub mod accounts;
pub mod health;
pub mod users;

/// How long browsers may cache a preflight answer.
const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

pub fn router(state: AppState, cors_origin: HeaderValue) -> Router {
    // Everything under /api goes through the auth gate.
    let protected = Router::new()
        .route("/profile", get(users::profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::liveness))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .nest("/api", protected)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ORIGIN,
            CONTENT_TYPE,
            AUTHORIZATION,
            ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        accounts::register,
        accounts::login,
        users::profile
    ),
    components(
        schemas(
            Identity,
            UserDto,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Accounts", description = "Registration and token issuance"),
        (name = "Users", description = "Authenticated user endpoints")
    )
)]
struct ApiDoc;
