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

//! Database interface for relational database operations.
//!
//! This module provides high-level abstractions for working with a SQLite
//! database: opening a connection with version-gated create/upgrade/
//! downgrade callbacks, executing statements, and running typed queries.

use std::sync::Mutex;

use rusqlite::Connection;

use crate::config::OpenConfig;
use crate::params::{FromRow, Params};

/// Database connection and operation interface.
///
/// Wraps a `rusqlite::Connection` behind a mutex so a single `RdbStore` can
/// be shared across threads (the task store keeps exactly one, reached from
/// every scheduler worker).
pub struct RdbStore {
    conn: Mutex<Connection>,
}

impl RdbStore {
    /// Opens a database connection using the provided configuration.
    ///
    /// Reads the `user_version` pragma to decide which of `on_create`,
    /// `on_upgrade`, or `on_downgrade` to invoke, bumps `user_version` to
    /// `config.version` afterwards, then always calls `on_open`.
    pub fn open(config: OpenConfig) -> rusqlite::Result<Self> {
        let conn = Connection::open(&config.path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        let stored_version = store.user_version()?;
        let mut callback = config.callback;
        if stored_version == 0 {
            callback.on_create(&store)?;
            store.set_user_version(config.version)?;
        } else if stored_version < config.version {
            callback.on_upgrade(&store, stored_version, config.version)?;
            store.set_user_version(config.version)?;
        } else if stored_version > config.version {
            callback.on_downgrade(&store, stored_version, config.version)?;
            store.set_user_version(config.version)?;
        }
        callback.on_open(&store)?;
        Ok(store)
    }

    fn user_version(&self) -> rusqlite::Result<i32> {
        let conn = self.conn.lock().unwrap();
        conn.pragma_query_value(None, "user_version", |row| row.get(0))
    }

    fn set_user_version(&self, version: i32) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.pragma_update(None, "user_version", version)
    }

    /// Executes an SQL statement with bound parameters.
    ///
    /// Use for statements that modify the database, like INSERT, UPDATE,
    /// ALTER TABLE, or DELETE. Returns the number of rows changed.
    pub fn execute<P: Params>(&self, sql: &str, values: P) -> rusqlite::Result<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(sql, rusqlite::params_from_iter(values.into_values()))
    }

    /// Executes an SQL query and returns results as a typed iterator.
    ///
    /// The return type `T` must implement `FromRow` — implemented for any
    /// single `FromSql` type and for tuples of `FromSql` types.
    pub fn query<T: FromRow>(&self, sql: &str, values: impl Params) -> rusqlite::Result<QuerySet<T>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        let column_count = stmt.column_count();
        let rows = stmt
            .query_map(rusqlite::params_from_iter(values.into_values()), |row| {
                T::from_row(row)
            })?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        let row_count = rows.len();
        Ok(QuerySet {
            rows: rows.into_iter(),
            row_count,
            column_count,
        })
    }
}

/// Materialized iterator over a query's result rows.
///
/// Rows are collected eagerly when `query` runs (the task store's result
/// sets are small — at most a few thousand rows), so `QuerySet` itself holds
/// no borrow on the underlying connection.
pub struct QuerySet<T> {
    rows: std::vec::IntoIter<T>,
    row_count: usize,
    column_count: usize,
}

impl<T> QuerySet<T> {
    /// Returns the number of rows in the query result.
    pub fn row_count(&self) -> i32 {
        self.row_count as i32
    }

    /// Returns the number of columns in the query result.
    pub fn column_count(&self) -> i32 {
        self.column_count as i32
    }
}

impl<T> Iterator for QuerySet<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}
