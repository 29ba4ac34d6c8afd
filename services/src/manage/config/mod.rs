// Copyright (C) 2023 Huawei Device Co., Ltd.
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

//! Service-wide tunables for the scheduler and transfer engine.
//!
//! Assembled once at startup from defaults, with every field overridable by
//! the embedding application. Mirrors the shape of a small, immutable
//! configuration struct rather than a dynamic registry, since none of these
//! values change after the service starts.

use std::time::Duration;

/// Service-wide tunables for the scheduler and transfer engine.
#[derive(Clone, Copy, Debug)]
pub struct ServiceConfig {
    /// Number of tasks the scheduler runs concurrently.
    pub worker_pool_size: usize,
    /// Idle sleep interval when the pending queue is empty.
    pub polling_interval: Duration,
    /// Per-task cap on transient-error retries.
    pub retry_budget: u32,
    /// Timeout for the HTTP connect phase.
    pub connect_timeout: Duration,
    /// Watchdog timeout for a single read with no forward progress.
    pub read_timeout: Duration,
    /// Age after which terminal (completed/failed/removed) tasks are swept
    /// from the task store.
    pub retention_window: Duration,
}

impl ServiceConfig {
    /// Worker pool size used when not overridden.
    pub const DEFAULT_WORKER_POOL_SIZE: usize = 4;
    /// Polling interval used when not overridden.
    pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(1);
    /// Retry budget used when not overridden.
    pub const DEFAULT_RETRY_BUDGET: u32 = 3;
    /// Connect timeout used when not overridden.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
    /// Read watchdog timeout used when not overridden.
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
    /// Retention window used when not overridden.
    pub const DEFAULT_RETENTION_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            worker_pool_size: Self::DEFAULT_WORKER_POOL_SIZE,
            polling_interval: Self::DEFAULT_POLLING_INTERVAL,
            retry_budget: Self::DEFAULT_RETRY_BUDGET,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
            retention_window: Self::DEFAULT_RETENTION_WINDOW,
        }
    }
}
