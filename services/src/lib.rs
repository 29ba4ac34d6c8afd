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

//! Request Download Server Implementation.
//!
//! This background service assists applications in handling network tasks
//! such as uploading and downloading, surviving app restarts and network
//! changes.

#![cfg_attr(test, allow(clippy::redundant_clone))]
#![allow(unreachable_pub, clippy::new_without_default)]
#![warn(
    missing_docs,
    clippy::redundant_static_lifetimes,
    clippy::enum_variant_names,
    clippy::clone_on_copy,
    clippy::unused_async
)]

#[macro_use]
mod macros;

#[macro_use]
extern crate request_utils;

mod error;
mod manage;
mod service;
mod task;
mod utils;

pub use manage::config::ServiceConfig;
pub use service::RequestServiceFacade;
pub use task::{config, info};
pub use task::files::FileSpec;
