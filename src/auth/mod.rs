// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! RS256 bearer tokens signed with a key pair this server owns.
//!
//! ## Auth Flow
//!
//! 1. At startup `KeyStore::load_or_create` loads `keys/*.pem` or generates
//!    and persists a fresh 2048-bit RSA pair
//! 2. `POST /login` checks the password and calls `TokenIssuer::issue`
//! 3. Client sends `Authorization: Bearer <token>` (the scheme is optional)
//! 4. `require_auth` runs `TokenVerifier::verify`:
//!    - header must declare RS256
//!    - signature must verify against the process public key
//!    - claims must decode (`user_id`, `username`, `exp`)
//!    - `now < exp`
//! 5. The `Identity` is attached to the request for handlers (`Auth` extractor)
//!
//! ## Security
//!
//! - The key pair is read-only after startup and shared without locking
//! - Every rejection is the same 401 body; the reason is only logged
//! - Tokens live 24 hours, no leeway

pub mod claims;
pub mod clock;
pub mod error;
pub mod extractor;
pub mod issuer;
pub mod keys;
pub mod middleware;
pub mod verifier;

pub use claims::{Claims, Identity};
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use error::AuthError;
pub use extractor::Auth;
pub use issuer::{IssueError, TokenIssuer};
pub use keys::{KeyPair, KeyStore, KeyStoreError};
pub use middleware::require_auth;
pub use verifier::{TokenVerifier, VerifyError};
