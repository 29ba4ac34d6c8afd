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

use std::collections::{HashMap, HashSet};

use super::reason::Reason;
use crate::manage::network::{NetworkState, NetworkType};
use crate::utils::form_item::{FileSpec, FormItem};

/// Specifies the type of network task to perform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Action {
    /// Download action for retrieving data from a server.
    Download = 0,
    /// Upload action for sending data to a server.
    Upload,
    /// Wildcard action that matches any operation type.
    Any,
}

/// Determines the execution context for a task.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Task runs in the background with lower priority.
    BackGround = 0,
    /// Task runs in the foreground with higher priority.
    FrontEnd,
    /// Wildcard mode that matches any execution context.
    Any,
}

/// Represents the API version used by the request system.
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(u8)]
pub(crate) enum Version {
    /// First API version.
    API9 = 1,
    /// Second API version with additional features.
    API10,
}

/// Specifies the network type required for task execution.
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(u8)]
pub enum NetworkConfig {
    /// Task can run on any available network type.
    Any = 0,
    /// Task requires a Wi-Fi connection.
    Wifi,
    /// Task requires a cellular network connection.
    Cellular,
}

/// Minimum speed requirements for a network task.
///
/// If the network speed falls below the specified threshold for the given
/// duration, the task may be paused or rescheduled.
#[derive(Copy, Clone, Debug, Default)]
pub struct MinSpeed {
    /// Minimum acceptable speed in bytes per second.
    pub(crate) speed: i64,
    /// Duration in milliseconds that the speed must be sustained below the
    /// threshold before triggering a response.
    pub(crate) duration: i64,
}

/// Timeout configuration for network operations.
#[derive(Copy, Clone, Debug, Default)]
pub struct Timeout {
    /// Maximum time in milliseconds to wait for a connection to be established.
    pub(crate) connection_timeout: u64,
    /// Maximum time in milliseconds for the entire task to complete.
    pub(crate) total_timeout: u64,
}

/// Core configuration shared by all types of network tasks.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CommonTaskConfig {
    /// Unique identifier for the task.
    pub(crate) task_id: u32,
    /// User ID associated with the task.
    pub(crate) uid: u64,
    /// Token ID for security verification.
    pub(crate) token_id: u64,
    /// Type of operation (download, upload, etc.).
    pub(crate) action: Action,
    /// Execution context (background, foreground).
    pub(crate) mode: Mode,
    /// Whether to overwrite existing files.
    pub(crate) cover: bool,
    /// Network type requirements.
    pub(crate) network_config: NetworkConfig,
    /// Whether task can run on metered networks.
    pub(crate) metered: bool,
    /// Whether task can run while roaming.
    pub(crate) roaming: bool,
    /// Whether to retry failed operations.
    pub(crate) retry: bool,
    /// Whether to follow HTTP redirects.
    pub(crate) redirect: bool,
    /// Index for ordering related tasks.
    pub(crate) index: u32,
    /// Starting byte position of a ranged request.
    pub(crate) begins: u64,
    /// Ending byte position of a ranged request, or -1 for the end of the file.
    pub(crate) ends: i64,
    /// Whether to enable speed measurement.
    pub(crate) gauge: bool,
    /// Whether to use precise progress tracking.
    pub(crate) precise: bool,
    /// Priority level for task scheduling.
    pub(crate) priority: u32,
    /// Whether task should continue in background.
    pub(crate) background: bool,
    /// Whether to use multipart encoding for uploads.
    pub(crate) multipart: bool,
    /// Minimum speed requirements.
    pub(crate) min_speed: MinSpeed,
    /// Timeout settings for the task.
    pub(crate) timeout: Timeout,
}

/// Complete configuration for a network task.
///
/// Contains all necessary parameters to execute a download or upload
/// operation, including network preferences, file specifications,
/// authentication details, and execution constraints.
#[derive(Clone, Debug)]
pub struct TaskConfig {
    /// Identifier of the requesting application.
    pub(crate) bundle: String,
    /// Target URL for the network operation.
    pub(crate) url: String,
    /// Human-readable title for the task.
    pub(crate) title: String,
    /// Detailed description of the task.
    pub(crate) description: String,
    /// HTTP method to use (GET, POST, etc.).
    pub(crate) method: String,
    /// HTTP headers to include in the request.
    pub(crate) headers: HashMap<String, String>,
    /// Request body data.
    pub(crate) data: String,
    /// Authentication token.
    pub(crate) token: String,
    /// Proxy server configuration.
    pub(crate) proxy: String,
    /// Certificate pins for secure connections.
    pub(crate) certificate_pins: String,
    /// Additional custom parameters.
    pub(crate) extras: HashMap<String, String>,
    /// API version compatibility indicator.
    pub(crate) version: Version,
    /// Form data items for upload requests.
    pub(crate) form_items: Vec<FormItem>,
    /// File specifications for upload/download operations.
    pub(crate) file_specs: Vec<FileSpec>,
    /// Paths to body files for complex requests.
    pub(crate) body_file_paths: Vec<String>,
    /// Paths to custom certificates.
    pub(crate) certs_path: Vec<String>,
    /// Core configuration shared across task types.
    pub(crate) common_data: CommonTaskConfig,
}

impl TaskConfig {
    /// Checks whether the task may run given the current network state.
    pub(crate) fn satisfy_network(&self, network: &NetworkState) -> Result<(), Reason> {
        match network {
            NetworkState::Offline => Err(Reason::NetworkOffline),
            NetworkState::Online(info) => match self.common_data.network_config {
                NetworkConfig::Any => Ok(()),
                NetworkConfig::Wifi if info.network_type == NetworkType::Cellular => {
                    Err(Reason::UnsupportedNetworkType)
                }
                _ => {
                    if (self.common_data.roaming || !info.is_roaming)
                        && (self.common_data.metered || !info.is_metered)
                    {
                        Ok(())
                    } else {
                        Err(Reason::UnsupportedNetworkType)
                    }
                }
            },
        }
    }

    /// Determines if a task satisfies foreground execution requirements.
    ///
    /// A task can run in the foreground if it's configured for background
    /// execution or if its associated UID is in the set of active foreground
    /// callers.
    pub(crate) fn satisfy_foreground(&self, foreground_callers: &HashSet<u64>) -> bool {
        self.common_data.mode == Mode::BackGround || foreground_callers.contains(&self.common_data.uid)
    }
}

impl PartialOrd for Mode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mode {
    /// Ordering is based on execution priority: FrontEnd > Any > BackGround.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_usize().cmp(&other.to_usize())
    }
}

impl Mode {
    fn to_usize(self) -> usize {
        match self {
            Mode::FrontEnd => 0,
            Mode::Any => 1,
            Mode::BackGround => 2,
        }
    }
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            0 => Mode::BackGround,
            1 => Mode::FrontEnd,
            _ => Mode::Any,
        }
    }
}

impl From<u8> for Action {
    fn from(value: u8) -> Self {
        match value {
            0 => Action::Download,
            1 => Action::Upload,
            _ => Action::Any,
        }
    }
}

impl From<u8> for Version {
    fn from(value: u8) -> Self {
        match value {
            2 => Version::API10,
            _ => Version::API9,
        }
    }
}

impl From<u8> for NetworkConfig {
    fn from(value: u8) -> Self {
        match value {
            0 => NetworkConfig::Any,
            2 => NetworkConfig::Cellular,
            _ => NetworkConfig::Wifi,
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            bundle: "xxx".to_string(),
            url: "".to_string(),
            title: "xxx".to_string(),
            description: "xxx".to_string(),
            method: "GET".to_string(),
            headers: Default::default(),
            data: "".to_string(),
            token: "xxx".to_string(),
            proxy: "".to_string(),
            extras: Default::default(),
            version: Version::API10,
            form_items: vec![],
            file_specs: vec![],
            body_file_paths: vec![],
            certs_path: vec![],
            certificate_pins: "".to_string(),
            common_data: CommonTaskConfig {
                task_id: 0,
                uid: 0,
                token_id: 0,
                action: Action::Download,
                mode: Mode::BackGround,
                cover: false,
                network_config: NetworkConfig::Any,
                metered: false,
                roaming: false,
                retry: false,
                redirect: true,
                index: 0,
                begins: 0,
                ends: -1,
                gauge: false,
                precise: false,
                priority: 0,
                background: false,
                multipart: false,
                min_speed: MinSpeed::default(),
                timeout: Timeout::default(),
            },
        }
    }
}

/// Builder pattern for constructing TaskConfig instances.
///
/// Provides a fluent interface for incrementally configuring network tasks
/// with method chaining for improved readability and usability.
pub struct ConfigBuilder {
    inner: TaskConfig,
}

impl ConfigBuilder {
    /// Creates a new builder with default task configuration.
    pub fn new() -> Self {
        Self {
            inner: TaskConfig::default(),
        }
    }

    /// Sets the target URL for the network operation.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.inner.url = url.to_string();
        self
    }

    /// Sets the API version compatibility level.
    pub fn version(&mut self, version: u8) -> &mut Self {
        self.inner.version = version.into();
        self
    }

    /// Adds a file to the task configuration by path.
    pub fn file_spec(&mut self, path: &str) -> &mut Self {
        self.inner.file_specs.push(FileSpec::new(path.to_string()));
        self
    }

    /// Sets the operation type (download or upload).
    pub fn action(&mut self, action: Action) -> &mut Self {
        self.inner.common_data.action = action;
        self
    }

    /// Sets the execution context (background or foreground).
    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.inner.common_data.mode = mode;
        self
    }

    /// Sets the identifier of the application requesting the task.
    pub fn bundle_name(&mut self, bundle_name: &str) -> &mut Self {
        self.inner.bundle = bundle_name.to_string();
        self
    }

    /// Sets the user ID associated with the task.
    pub fn uid(&mut self, uid: u64) -> &mut Self {
        self.inner.common_data.uid = uid;
        self
    }

    /// Sets the network type requirements for the task.
    pub fn network(&mut self, network: NetworkConfig) -> &mut Self {
        self.inner.common_data.network_config = network;
        self
    }

    /// Sets whether the task can run while roaming.
    pub fn roaming(&mut self, roaming: bool) -> &mut Self {
        self.inner.common_data.roaming = roaming;
        self
    }

    /// Sets whether the task can run on metered networks.
    pub fn metered(&mut self, metered: bool) -> &mut Self {
        self.inner.common_data.metered = metered;
        self
    }

    /// Sets whether to follow HTTP redirects.
    pub fn redirect(&mut self, redirect: bool) -> &mut Self {
        self.inner.common_data.redirect = redirect;
        self
    }

    /// Sets the starting byte position for a ranged request.
    pub fn begins(&mut self, begins: u64) -> &mut Self {
        self.inner.common_data.begins = begins;
        self
    }

    /// Sets the ending byte position for a ranged request.
    pub fn ends(&mut self, ends: u64) -> &mut Self {
        self.inner.common_data.ends = ends as i64;
        self
    }

    /// Sets the HTTP method to use for the request.
    pub fn method(&mut self, method: &str) -> &mut Self {
        self.inner.method = method.to_string();
        self
    }

    /// Sets whether failed operations should be retried.
    pub fn retry(&mut self, retry: bool) -> &mut Self {
        self.inner.common_data.retry = retry;
        self
    }

    /// Sets a minimum sustained-speed threshold that triggers a low-speed
    /// pause if the transfer falls below it for `duration` milliseconds.
    pub fn min_speed(&mut self, speed: i64, duration: i64) -> &mut Self {
        self.inner.common_data.min_speed = MinSpeed { speed, duration };
        self
    }

    /// Constructs the final TaskConfig from the builder's current state.
    pub fn build(&mut self) -> TaskConfig {
        self.inner.clone()
    }
}
