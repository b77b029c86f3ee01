// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::verifier::VerifyError;

/// Body sent for every rejection. Deliberately identical across variants.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized";

/// Why the auth gate rejected a request.
///
/// Every variant renders to the same `401 {"error":"unauthorized"}`. The
/// distinction only shows up in logs via [`AuthError::reason`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header present but not usable text, or empty after the scheme
    #[error("Invalid authorization header")]
    InvalidAuthHeader,
    /// Token failed verification
    #[error("Token rejected: {0}")]
    InvalidToken(#[from] VerifyError),
    /// A handler asked for the identity but the gate never ran
    #[error("Request was not authenticated")]
    NotAuthenticated,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Machine-readable reason, for logs only.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken(e) => e.reason(),
            AuthError::NotAuthenticated => "not_authenticated",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Bearer")],
            Json(AuthErrorBody {
                error: UNAUTHORIZED_MESSAGE,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use jsonwebtoken::Algorithm;

    async fn body_of(error: AuthError) -> (StatusCode, Vec<u8>) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn missing_auth_returns_401() {
        let (status, body) = body_of(AuthError::MissingAuthHeader).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, br#"{"error":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn every_variant_renders_identically() {
        let variants = [
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::InvalidToken(VerifyError::Malformed),
            AuthError::InvalidToken(VerifyError::BadSignature),
            AuthError::InvalidToken(VerifyError::WrongAlgorithm(Algorithm::HS256)),
            AuthError::InvalidToken(VerifyError::Expired),
            AuthError::NotAuthenticated,
        ];

        let expected = body_of(AuthError::MissingAuthHeader).await;
        for variant in variants {
            assert_eq!(body_of(variant).await, expected);
        }
    }

    #[test]
    fn response_carries_bearer_challenge() {
        let response = AuthError::InvalidToken(VerifyError::Expired).into_response();
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn reason_keeps_internal_distinction() {
        assert_eq!(AuthError::MissingAuthHeader.reason(), "missing_auth_header");
        assert_eq!(
            AuthError::InvalidToken(VerifyError::Expired).reason(),
            "token_expired"
        );
    }
}
