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

//! Network state tracking.
//!
//! The platform's network-capability observer is an external collaborator:
//! it calls [`NetworkInner::update`] whenever connectivity changes. This
//! module only keeps the latest snapshot and wakes anyone waiting on it; it
//! never probes the network itself.

use std::sync::{Arc, RwLock};

use tokio::sync::Notify;

use NetworkState::{Offline, Online};

/// Network connection information.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct NetworkInfo {
    pub(crate) network_type: NetworkType,
    pub(crate) is_metered: bool,
    pub(crate) is_roaming: bool,
}

/// Types of network connections the observer can report.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum NetworkType {
    Other,
    Wifi,
    Cellular,
}

/// Represents the current state of network connectivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NetworkState {
    /// No active network connection available.
    Offline,
    /// Connected to a network with the provided network information.
    Online(NetworkInfo),
}

/// Public handle to the network state snapshot.
#[derive(Clone)]
pub struct Network {
    pub(crate) inner: NetworkInner,
}

impl Network {
    pub(crate) fn new() -> Self {
        Self {
            inner: NetworkInner::new(),
        }
    }

    /// Retrieves the current network state.
    pub(crate) fn state(&self) -> NetworkState {
        self.inner.state.read().unwrap().clone()
    }

    /// Waits until the network transitions away from offline, or returns
    /// immediately if it already has.
    pub(crate) async fn wait_online(&self) {
        loop {
            if self.state() != Offline {
                return;
            }
            self.inner.notify.notified().await;
        }
    }
}

/// Holds the network state storage and the wakeup registered for waiters.
#[derive(Clone)]
pub struct NetworkInner {
    state: Arc<RwLock<NetworkState>>,
    notify: Arc<Notify>,
}

impl NetworkInner {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(NetworkState::Offline)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Updates the network state to offline and logs the change.
    pub(crate) fn notify_offline(&self) {
        let mut state = self.state.write().unwrap();
        if *state != Offline {
            info!("network is offline");
            *state = Offline;
            self.notify.notify_waiters();
        }
    }

    /// Updates the network state to online with the provided network
    /// information. Only updates (and wakes waiters) if it actually changed.
    pub(crate) fn notify_online(&self, info: NetworkInfo) -> bool {
        let mut state = self.state.write().unwrap();
        if !matches!(&*state, Online(old_info) if old_info == &info) {
            info!("network online {:?}", info);
            *state = Online(info);
            self.notify.notify_waiters();
            true
        } else {
            false
        }
    }
}
