/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Durable key-value settings backed by redb.
//!
//! One table, string keys to string values, surviving process restarts. The
//! only value queryshell stores today is the last-used endpoint URL, but the
//! store is keyed generically so future settings land in the same table.

use std::path::{Path, PathBuf};

use redb::ReadableDatabase;

const SETTINGS_TABLE: redb::TableDefinition<&str, &str> = redb::TableDefinition::new("settings");

/// Fixed key under which the last-used endpoint URL is persisted.
pub const ENDPOINT_STATE_KEY: &str = "queryshell.endpoint";

/// Default store location: a `queryshell` directory under the per-user data
/// dir, falling back to the current directory when the platform has none.
pub fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("queryshell")
}

/// Persistent settings store.
pub struct SettingsStore {
    db: redb::Database,
}

impl SettingsStore {
    /// Open or create the settings store at [`default_base_dir`]. This is
    /// the path embedders take; [`SettingsStore::open`] exists for tests and
    /// hosts that relocate their state.
    pub fn open_default() -> Result<Self, SettingsStoreError> {
        Self::open(&default_base_dir())
    }

    /// Open or create a settings store at the given directory.
    pub fn open(base_dir: &Path) -> Result<Self, SettingsStoreError> {
        std::fs::create_dir_all(base_dir)
            .map_err(|e| SettingsStoreError::Io(format!("Failed to create dir: {e}")))?;

        let db = redb::Database::create(base_dir.join("settings.redb"))
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;

        // Materialize the table so first reads don't have to special-case a
        // missing table.
        let write_txn = db
            .begin_write()
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        write_txn
            .open_table(SETTINGS_TABLE)
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        write_txn
            .commit()
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;

        Ok(Self { db })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, SettingsStoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        let table = read_txn
            .open_table(SETTINGS_TABLE)
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        let entry = table
            .get(key)
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        Ok(entry.map(|guard| guard.value().to_string()))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), SettingsStoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        {
            let mut table = write_txn
                .open_table(SETTINGS_TABLE)
                .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
            table
                .insert(key, value)
                .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        }
        write_txn
            .commit()
            .map_err(|e| SettingsStoreError::Redb(format!("{e}")))?;
        Ok(())
    }

    /// The persisted endpoint URL; empty string is the absent sentinel.
    pub fn endpoint(&self) -> Result<String, SettingsStoreError> {
        Ok(self.get(ENDPOINT_STATE_KEY)?.unwrap_or_default())
    }

    /// Overwrite the persisted endpoint URL.
    pub fn set_endpoint(&self, url: &str) -> Result<(), SettingsStoreError> {
        log::debug!("settings: persisting endpoint {url}");
        self.set(ENDPOINT_STATE_KEY, url)
    }
}

#[derive(Debug)]
pub enum SettingsStoreError {
    Io(String),
    Redb(String),
}

impl std::fmt::Display for SettingsStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsStoreError::Io(e) => write!(f, "IO error: {e}"),
            SettingsStoreError::Redb(e) => write!(f, "Redb error: {e}"),
        }
    }
}

impl std::error::Error for SettingsStoreError {}
