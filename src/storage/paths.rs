// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the on-disk key layout.

use std::path::{Path, PathBuf};

/// Default key directory, relative to the process working directory.
pub const KEYS_ROOT: &str = "keys";

/// File name of the PKCS#1 PEM private key.
pub const PRIVATE_KEY_FILE: &str = "private.pem";

/// File name of the PKCS#1 PEM public key.
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// Storage path utilities for the signing key pair.
#[derive(Debug, Clone)]
pub struct KeyPaths {
    root: PathBuf,
}

impl Default for KeyPaths {
    fn default() -> Self {
        Self::new(KEYS_ROOT)
    }
}

impl KeyPaths {
    /// Create a new KeyPaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding both key files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the private (signing) half.
    pub fn private_key(&self) -> PathBuf {
        self.root.join(PRIVATE_KEY_FILE)
    }

    /// Path to the public (verification) half.
    pub fn public_key(&self) -> PathBuf {
        self.root.join(PUBLIC_KEY_FILE)
    }
}
