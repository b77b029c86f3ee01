// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Social Platform - Authentication Server
//!
//! This crate owns the token signing key, issues RS256 bearer tokens on login
//! and gates protected routes on a verified identity.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Key store, token issuer/verifier, auth gate
//! - `storage` - On-disk key file layout
//! - `store` - In-memory user directory

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
