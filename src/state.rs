// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{Clock, KeyPair, TokenIssuer, TokenVerifier};
use crate::store::UserStore;

/// Shared handler state.
///
/// The issuer and verifier hold the same `Arc<KeyPair>`, which is never
/// mutated after startup, so they need no lock.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub users: Arc<RwLock<UserStore>>,
}

impl AppState {
    pub fn new(keys: KeyPair, clock: Arc<dyn Clock>, users: UserStore) -> Self {
        Self::from_parts(Arc::new(keys), clock, users)
    }

    pub fn from_parts(keys: Arc<KeyPair>, clock: Arc<dyn Clock>, users: UserStore) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(keys.clone(), clock.clone())),
            verifier: Arc::new(TokenVerifier::new(keys, clock)),
            users: Arc::new(RwLock::new(users)),
        }
    }
}
