// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user directory.
//!
//! Stands in for the relational user table: ids are assigned sequentially from
//! 1, usernames are unique, and passwords are stored as Argon2 PHC strings.
//! The auth core only needs lookup by id and by username from it.

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::models::UserDto;

/// Errors from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("username and password must not be empty")]
    EmptyField,
    #[error("username is already taken")]
    UsernameTaken,
    /// Unknown user or wrong password; deliberately not told apart.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

struct StoredUser {
    id: u64,
    username: String,
    password_hash: String,
}

impl StoredUser {
    fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Canonical form of a username, applied on every path that takes one.
pub fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Hash `password` into an Argon2 PHC string.
///
/// CPU-bound; async callers run it on the blocking pool.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Hashing(e.to_string()))
}

/// Check `password` against a PHC string produced by [`hash_password`].
///
/// CPU-bound, like hashing.
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), StoreError> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| StoreError::Hashing(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| StoreError::InvalidCredentials)
}

/// Stored credentials for a login attempt, copied out of the directory.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: UserDto,
    pub password_hash: String,
}

#[derive(Default)]
pub struct UserStore {
    users: HashMap<u64, StoredUser>,
    ids_by_username: HashMap<String, u64>,
    last_id: u64,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `username` (after normalization) already has an account.
    pub fn contains(&self, username: &str) -> bool {
        self.ids_by_username
            .contains_key(normalize_username(username))
    }

    /// Create an account from an already computed password hash.
    ///
    /// Uniqueness is checked here, under whatever lock the caller holds, so a
    /// race between two registrations of the same name has one winner.
    pub fn insert(
        &mut self,
        username: &str,
        password_hash: String,
    ) -> Result<UserDto, StoreError> {
        let username = normalize_username(username);
        if username.is_empty() {
            return Err(StoreError::EmptyField);
        }
        if self.ids_by_username.contains_key(username) {
            return Err(StoreError::UsernameTaken);
        }

        self.last_id += 1;
        let user = StoredUser {
            id: self.last_id,
            username: username.to_string(),
            password_hash,
        };
        let dto = user.to_dto();
        self.ids_by_username.insert(user.username.clone(), user.id);
        self.users.insert(user.id, user);
        Ok(dto)
    }

    pub fn find_by_id(&self, id: u64) -> Option<UserDto> {
        self.users.get(&id).map(StoredUser::to_dto)
    }

    /// Copy out what a login needs, so the hash can be checked without
    /// holding the directory lock.
    pub fn credentials(&self, username: &str) -> Option<Credentials> {
        self.ids_by_username
            .get(normalize_username(username))
            .and_then(|id| self.users.get(id))
            .map(|user| Credentials {
                user: user.to_dto(),
                password_hash: user.password_hash.clone(),
            })
    }
}
