// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key Storage Module
//!
//! Persistent storage for the token signing key pair.
//!
//! ## Storage Layout
//!
//! ```text
//! keys/            # 0700
//!   private.pem    # 0600, PKCS#1 "RSA PRIVATE KEY" (NEVER exposed via API)
//!   public.pem     # 0644, PKCS#1 "RSA PUBLIC KEY"
//! ```
//!
//! This module only knows about paths and bytes. Parsing and generating the
//! keys lives in [`crate::auth::keys`].

pub mod key_files;
pub mod paths;

pub use paths::KeyPaths;
