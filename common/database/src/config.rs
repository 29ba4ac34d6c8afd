// Copyright (C) 2024 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Database configuration utilities.
//!
//! This module provides configuration options for opening and managing
//! databases, including versioning and lifecycle callbacks.

use crate::database::RdbStore;

/// Configuration options for opening an RDB database.
///
/// Provides a builder-style API for configuring schema version and
/// lifecycle callbacks.
pub struct OpenConfig {
    /// Filesystem path of the database (`:memory:` for an in-memory store).
    pub(crate) path: String,
    /// Database schema version.
    pub(crate) version: i32,
    /// Callback handler for database lifecycle events.
    pub(crate) callback: Box<dyn OpenCallback>,
}

impl OpenConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Sets up a configuration with version 1 and a no-op callback.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            version: 1,
            callback: Box::new(DefaultCallback),
        }
    }

    /// Sets the callback handler for database lifecycle events.
    pub fn callback(&mut self, callback: Box<dyn OpenCallback>) -> &mut Self {
        self.callback = callback;
        self
    }

    /// Sets the database schema version.
    pub fn version(&mut self, version: i32) -> &mut Self {
        self.version = version;
        self
    }
}

/// Trait for handling database lifecycle events.
///
/// Implement this trait to customize database creation, migration, and
/// corruption handling. `RdbStore::open` calls exactly one of `on_create`,
/// `on_upgrade`, or `on_downgrade` (whichever matches the stored vs.
/// requested version), then always calls `on_open`.
pub trait OpenCallback {
    /// Called when the database's `user_version` pragma is `0` (fresh file).
    fn on_create(&mut self, _rdb: &RdbStore) -> rusqlite::Result<()> {
        Ok(())
    }

    /// Called when the stored version is non-zero and lower than requested.
    fn on_upgrade(
        &mut self,
        _rdb: &RdbStore,
        _old_version: i32,
        _new_version: i32,
    ) -> rusqlite::Result<()> {
        Ok(())
    }

    /// Called when the stored version is higher than requested.
    fn on_downgrade(
        &mut self,
        _rdb: &RdbStore,
        _current_version: i32,
        _target_version: i32,
    ) -> rusqlite::Result<()> {
        Ok(())
    }

    /// Called every time the database is successfully opened, after any
    /// create/upgrade/downgrade step.
    fn on_open(&mut self, _rdb: &RdbStore) -> rusqlite::Result<()> {
        Ok(())
    }

    /// Called when SQLite reports the database file is corrupted.
    fn on_corrupt(&mut self, _database_file: &str) -> rusqlite::Result<()> {
        Ok(())
    }
}

/// Default implementation of `OpenCallback` that performs no operations.
struct DefaultCallback;

impl OpenCallback for DefaultCallback {}
