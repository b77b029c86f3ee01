// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issuance.

use std::sync::Arc;

use jsonwebtoken::{encode, Header};

use super::claims::{Claims, Identity};
use super::clock::Clock;
use super::keys::{KeyPair, SIGNING_ALGORITHM};

/// Signing failed. Only possible if the private key is unusable, which the
/// key store rules out before any issuer exists.
#[derive(Debug, thiserror::Error)]
#[error("failed to sign token: {0}")]
pub struct IssueError(#[from] jsonwebtoken::errors::Error);

/// Builds and signs tokens with the process key pair.
pub struct TokenIssuer {
    keys: Arc<KeyPair>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(keys: Arc<KeyPair>, clock: Arc<dyn Clock>) -> Self {
        Self { keys, clock }
    }

    /// Sign an RS256 token for `identity`, expiring 24 hours from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, IssueError> {
        let claims = Claims::new(identity, self.clock.now());
        let token = encode(
            &Header::new(SIGNING_ALGORITHM),
            &claims,
            self.keys.encoding_key(),
        )?;
        Ok(token)
    }
}
