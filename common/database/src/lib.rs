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

//! A small SQLite wrapper used by the task store.
//!
//! `RdbStore` opens a `rusqlite::Connection`, runs version-gated migration
//! callbacks on open, and exposes `execute`/`query` with typed parameter
//! binding and typed row extraction.

pub mod config;
pub mod database;
pub mod params;

pub use config::{OpenCallback, OpenConfig};
pub use database::{QuerySet, RdbStore};
pub use params::{FromRow, FromSql, Params, ToSql};
