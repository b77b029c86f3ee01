// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Raw file operations for PEM key material.
//!
//! Writes are atomic (temp file + rename) and carry an explicit Unix mode,
//! so the private half is never observable with looser permissions than
//! `0600`, not even for the window between create and chmod.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Mode for the key directory (owner only).
pub const KEY_DIR_MODE: u32 = 0o700;

/// Mode for the private key file (owner read/write).
pub const PRIVATE_KEY_MODE: u32 = 0o600;

/// Mode for the public key file (world readable).
pub const PUBLIC_KEY_MODE: u32 = 0o644;

/// Create the key directory if missing and restrict it to the owner.
pub fn ensure_key_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    fs::set_permissions(dir, fs::Permissions::from_mode(KEY_DIR_MODE))?;

    Ok(())
}

/// Write raw bytes to `path` with the given mode, atomically.
pub fn write_key_file(path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");

    {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(mode);

        let mut file = options.open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
    }

    // The process umask may have masked bits off at create time.
    #[cfg(unix)]
    fs::set_permissions(&temp_path, fs::Permissions::from_mode(mode))?;
    #[cfg(not(unix))]
    let _ = mode;

    fs::rename(&temp_path, path)
}

/// Read a whole key file as UTF-8 text.
pub fn read_key_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}
