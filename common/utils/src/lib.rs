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

//! Common utilities shared by the task store, scheduler, transfer engine and
//! preload cache.
//!
//! This crate provides a collection of small, dependency-light helpers used
//! across the workspace: URL/task-id fingerprinting, an LRU cache, fast
//! non-cryptographic randomness, and file path validation.

#![allow(clippy::new_without_default)]

/// Internal macros module.
#[macro_use]
mod macros;

/// Fast pseudorandom number generation utilities.
pub mod fastrand;

/// File path control and validation utilities.
pub mod file_control;

/// URL fingerprinting (SHA-256 based content hashing).
pub mod hash;

/// Least Recently Used (LRU) cache implementation.
pub mod lru;

/// Task ID generation and management utilities.
pub mod task_id;

pub use log::{debug, error, info};
