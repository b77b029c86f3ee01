// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated identity representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed token lifetime (24 hours).
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried inside every token this server issues.
///
/// Decoded in one go at verification time: a token whose `user_id` is not an
/// unsigned integer, or which lacks `username` or `exp`, fails to decode and
/// is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user id
    pub user_id: u64,

    /// Display handle
    pub username: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Claims for `identity`, valid from `issued_at` for [`TOKEN_TTL_SECS`].
    pub fn new(identity: &Identity, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();
        Self {
            user_id: identity.user_id,
            username: identity.username.clone(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        }
    }

    /// A token is valid strictly before `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Authenticated identity extracted from a verified token.
///
/// Attached to the request extensions by the auth gate and read by handlers
/// through the [`Auth`](super::Auth) extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Numeric user id
    pub user_id: u64,
    /// Display handle
    pub username: String,
}

impl Identity {
    pub fn new(user_id: u64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}
