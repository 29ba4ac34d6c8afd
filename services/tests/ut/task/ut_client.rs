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

use super::*;
use crate::task::config::TaskConfig;

// @tc.name: ut_build_client_defaults
// @tc.desc: Test building a client from a default config succeeds
// @tc.precon: NA
// @tc.step: 1. Build a default TaskConfig
//           2. Call build_client with a total timeout
// @tc.expect: Client is built without error
// @tc.type: FUNC
// @tc.require: issues#ICN16H
#[test]
fn ut_build_client_defaults() {
    let config = TaskConfig::default();
    let client = build_client(&config, 30);
    assert!(client.is_ok());
}

// @tc.name: ut_build_client_with_proxy
// @tc.desc: Test building a client with a task proxy configured
// @tc.precon: NA
// @tc.step: 1. Build a TaskConfig with a proxy url
//           2. Call build_client
// @tc.expect: Client is built without error
// @tc.type: FUNC
// @tc.require: issues#ICN16H
#[test]
fn ut_build_client_with_proxy() {
    let config = TaskConfig {
        proxy: "http://127.0.0.1:8080".to_string(),
        ..TaskConfig::default()
    };
    let client = build_client(&config, 30);
    assert!(client.is_ok());
}

// @tc.name: ut_build_client_bad_cert_path
// @tc.desc: Test building a client with a nonexistent cert path fails
// @tc.precon: NA
// @tc.step: 1. Build a TaskConfig with a cert path that does not exist
//           2. Call build_client
// @tc.expect: build_client returns an error
// @tc.type: FUNC
// @tc.require: issues#ICN16H
#[test]
fn ut_build_client_bad_cert_path() {
    let config = TaskConfig {
        certs_path: vec!["/no/such/cert.pem".to_string()],
        ..TaskConfig::default()
    };
    let client = build_client(&config, 30);
    assert!(client.is_err());
}
