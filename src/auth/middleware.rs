// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied with `route_layer` to the protected `/api` subtree:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/profile", get(profile))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Each request is verified from scratch. Nothing is cached between requests.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::verifier::TokenVerifier;
use super::{AuthError, Identity};
use crate::state::AppState;

/// Optional scheme in front of the token.
const BEARER_SCHEME: &str = "Bearer";

/// Authentication middleware function.
///
/// On success the [`Identity`] is inserted into the request extensions and the
/// next stage runs. On failure the request stops here with a 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.verifier) {
        Ok(identity) => {
            debug!(
                user_id = identity.user_id,
                username = %identity.username,
                path = %request.uri().path(),
                "Request authenticated"
            );
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            debug!(
                reason = e.reason(),
                path = %request.uri().path(),
                "Request rejected"
            );
            e.into_response()
        }
    }
}

/// Decide whether `headers` carry a currently valid token.
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Identity, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = bearer_token(header).ok_or(AuthError::InvalidAuthHeader)?;

    Ok(verifier.verify(token)?)
}

/// Token text from an `Authorization` value, with or without `Bearer `.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
        None if header.eq_ignore_ascii_case(BEARER_SCHEME) => "",
        _ => header,
    };

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use crate::auth::issuer::TokenIssuer;
    use crate::auth::test_support::{other_keys, shared_keys};
    use crate::auth::verifier::VerifyError;
    use crate::auth::Auth;
    use crate::store::UserStore;
    use axum::{body::Body, http::StatusCode, routing::get, Json, Router};
    use chrono::TimeDelta;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(clock: Arc<ManualClock>) -> AppState {
        AppState::from_parts(shared_keys(), clock, UserStore::new())
    }

    /// Router with one protected route that records whether it ran.
    fn protected_app(state: AppState, reached: Arc<AtomicBool>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |Auth(identity): Auth| {
                    let reached = reached.clone();
                    async move {
                        reached.store(true, Ordering::SeqCst);
                        Json(identity)
                    }
                }),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_auth,
            ))
            .with_state(state)
    }

    fn request(authorization: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_handler() {
        let reached = Arc::new(AtomicBool::new(false));
        let app = protected_app(
            test_state(Arc::new(ManualClock::starting_now())),
            reached.clone(),
        );

        let response = app.oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let clock = Arc::new(ManualClock::starting_now());
        let state = test_state(clock);
        let token = state
            .issuer
            .issue(&Identity::new(7, "alice"))
            .expect("issue");
        let reached = Arc::new(AtomicBool::new(false));
        let app = protected_app(state, reached.clone());

        let response = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(reached.load(Ordering::SeqCst));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let identity: Identity = serde_json::from_slice(&body).unwrap();
        assert_eq!(identity, Identity::new(7, "alice"));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let reached = Arc::new(AtomicBool::new(false));
        let app = protected_app(
            test_state(Arc::new(ManualClock::starting_now())),
            reached.clone(),
        );

        let response = app
            .oneshot(request(Some("Bearer garbage-string")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn expired_and_forged_tokens_get_the_same_response() {
        let clock = Arc::new(ManualClock::starting_now());
        let state = test_state(clock.clone());
        let expired = state.issuer.issue(&Identity::new(1, "bob")).expect("issue");
        let forged = TokenIssuer::new(other_keys(), clock.clone())
            .issue(&Identity::new(1, "bob"))
            .expect("issue");
        clock.advance(TimeDelta::hours(25));

        let reached = Arc::new(AtomicBool::new(false));
        let app = protected_app(state, reached.clone());

        let mut bodies = Vec::new();
        for token in [expired, forged] {
            let response = app
                .clone()
                .oneshot(request(Some(&format!("Bearer {token}"))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(
                axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap(),
            );
        }

        assert_eq!(bodies[0], bodies[1]);
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[test]
    fn authenticate_distinguishes_reasons_internally() {
        let clock = Arc::new(ManualClock::starting_now());
        let state = test_state(clock.clone());
        let token = state.issuer.issue(&Identity::new(7, "alice")).expect("issue");

        let mut headers = HeaderMap::new();
        assert_eq!(
            authenticate(&headers, &state.verifier),
            Err(AuthError::MissingAuthHeader)
        );

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(
            authenticate(&headers, &state.verifier),
            Err(AuthError::InvalidAuthHeader)
        );

        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        assert_eq!(
            authenticate(&headers, &state.verifier),
            Ok(Identity::new(7, "alice"))
        );

        clock.advance(TimeDelta::hours(25));
        assert_eq!(
            authenticate(&headers, &state.verifier),
            Err(AuthError::InvalidToken(VerifyError::Expired))
        );
    }

    #[test]
    fn bearer_prefix_is_optional() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("  Bearer   abc.def.ghi  "), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token(""), None);
    }
}
