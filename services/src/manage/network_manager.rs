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

//! Process-wide handle to the current network state.
//!
//! A single [`Network`] is shared by everything in the process: the
//! platform observer calls [`NetworkManager::update`], and the scheduler
//! calls [`NetworkManager::network`] to read the snapshot or wait for a
//! transition back online.

use std::sync::OnceLock;

use super::network::{Network, NetworkInfo, NetworkState};

pub(crate) struct NetworkManager {
    network: Network,
}

impl NetworkManager {
    fn instance() -> &'static NetworkManager {
        static INSTANCE: OnceLock<NetworkManager> = OnceLock::new();
        INSTANCE.get_or_init(|| NetworkManager {
            network: Network::new(),
        })
    }

    /// Returns a cloneable handle to the shared network state.
    pub(crate) fn network() -> Network {
        Self::instance().network.clone()
    }

    /// Checks if the device is currently online.
    pub(crate) fn is_online() -> bool {
        matches!(Self::instance().network.state(), NetworkState::Online(_))
    }

    /// Queries the current network state.
    pub(crate) fn query_network() -> NetworkState {
        Self::instance().network.state()
    }

    /// Called by the platform's network observer whenever connectivity
    /// changes. `None` means offline.
    pub(crate) fn update(info: Option<NetworkInfo>) {
        let network = &Self::instance().network;
        match info {
            Some(info) => {
                network.inner.notify_online(info);
            }
            None => network.inner.notify_offline(),
        }
    }
}
