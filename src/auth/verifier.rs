// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification.
//!
//! Order of checks:
//!
//! 1. Header parses and declares `RS256`. Anything else is refused before the
//!    key is touched, so a token signed with, say, HS256 keyed on the public
//!    PEM never reaches signature verification.
//! 2. Signature verifies against the process public key.
//! 3. Claims decode into [`Claims`].
//! 4. `now < exp` against the injected clock, with no leeway.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::claims::{Claims, Identity};
use super::clock::Clock;
use super::keys::{KeyPair, SIGNING_ALGORITHM};

/// Why a token was refused.
///
/// Diagnostic only: the auth gate collapses every variant into the same 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token is signed with {0:?}, only RS256 is accepted")]
    WrongAlgorithm(Algorithm),
    #[error("token has expired")]
    Expired,
}

impl VerifyError {
    /// Short machine-readable reason for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            VerifyError::Malformed => "malformed_token",
            VerifyError::BadSignature => "invalid_signature",
            VerifyError::WrongAlgorithm(_) => "wrong_algorithm",
            VerifyError::Expired => "token_expired",
        }
    }
}

/// Validates tokens against the process public key.
pub struct TokenVerifier {
    keys: Arc<KeyPair>,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyPair>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against `clock` below, not the library's wall clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            keys,
            clock,
            validation,
        }
    }

    /// Verify `token` and return the identity it asserts.
    pub fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let header = decode_header(token).map_err(|_| VerifyError::Malformed)?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(VerifyError::WrongAlgorithm(header.alg));
        }

        let claims = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => VerifyError::BadSignature,
                ErrorKind::InvalidAlgorithm => VerifyError::WrongAlgorithm(header.alg),
                _ => VerifyError::Malformed,
            })?
            .claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err(VerifyError::Expired);
        }

        Ok(claims.into())
    }
}
