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

//! Utility module providing common functionality for request handling.
//!
//! This module includes helper functions and types used throughout the
//! request processing system: time utilities, string handling, and form
//! field descriptions for upload tasks.

pub(crate) mod form_item;
pub(crate) mod task_id_generator;

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::sync::Once;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Retrieves the current system time as a timestamp in milliseconds since UNIX EPOCH.
pub(crate) fn get_current_timestamp() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_millis() as u64,
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Retrieves the current system time as a `Duration` since UNIX EPOCH.
pub(crate) fn get_current_duration() -> Duration {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(dur) => dur,
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Converts a HashMap<String, String> to a tab-delimited string representation.
pub(crate) fn hashmap_to_string(map: &HashMap<String, String>) -> String {
    let mut res = Vec::new();
    for (n, (k, v)) in map.iter().enumerate() {
        if n != 0 {
            let _ = write!(res, "\r\n");
        }
        let _ = write!(res, "{k}\t{v}");
    }
    String::from_utf8(res).unwrap_or_default()
}

/// Parses a tab-delimited string into a HashMap<String, String>.
pub(crate) fn string_to_hashmap(str: &mut str) -> HashMap<String, String> {
    let mut map = HashMap::<String, String>::new();
    if str.is_empty() {
        return map;
    }
    for item in str.split("\r\n") {
        let Some((k, v)) = item.split_once('\t') else {
            continue;
        };
        map.insert(k.into(), v.into());
    }
    map
}

/// Splits a string by removing surrounding brackets and then splitting by ", ".
pub(crate) fn split_string(str: &mut str) -> std::str::Split<'_, &str> {
    let pat: &[_] = &['[', ']'];
    str.trim_matches(pat).split(", ")
}

/// Calls the given closure exactly once, ensuring thread safety.
pub(crate) fn call_once<F: FnOnce()>(once: &Once, func: F) {
    once.call_once(func)
}

/// Spawns a future on the tokio runtime, returning a join handle.
pub(crate) fn runtime_spawn<F: Future<Output = ()> + Send + 'static>(
    fut: F,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(fut)
}
