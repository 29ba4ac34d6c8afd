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

// @tc.name: ut_hashmap_to_string_roundtrip
// @tc.desc: Test hashmap_to_string / string_to_hashmap round-trip
// @tc.precon: NA
// @tc.step: 1. Build a HashMap with a single entry
//           2. Serialize then parse it back
// @tc.expect: The parsed map matches the original
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_hashmap_to_string_roundtrip() {
    let mut map = HashMap::new();
    map.insert("key1".to_string(), "value1".to_string());
    let mut serialized = hashmap_to_string(&map);
    let parsed = string_to_hashmap(&mut serialized);
    assert_eq!(parsed.get("key1"), Some(&"value1".to_string()));
}

// @tc.name: ut_string_to_hashmap_empty
// @tc.desc: Test string_to_hashmap with an empty string
// @tc.precon: NA
// @tc.step: 1. Call string_to_hashmap on an empty string
// @tc.expect: Returns an empty map
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_string_to_hashmap_empty() {
    let mut s = String::new();
    assert!(string_to_hashmap(&mut s).is_empty());
}

// @tc.name: ut_split_string_brackets
// @tc.desc: Test split_string trims brackets and splits by ", "
// @tc.precon: NA
// @tc.step: 1. Call split_string on a bracketed list
// @tc.expect: Returns each element without the surrounding brackets
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_split_string_brackets() {
    let mut input = "[apple, banana, cherry]".to_string();
    let result: Vec<_> = split_string(&mut input).collect();
    assert_eq!(result, vec!["apple", "banana", "cherry"]);
}

// @tc.name: ut_get_current_timestamp_increases
// @tc.desc: Test get_current_timestamp returns a plausible, non-decreasing value
// @tc.precon: NA
// @tc.step: 1. Call get_current_timestamp twice
// @tc.expect: Second call is never earlier than the first
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_get_current_timestamp_increases() {
    let first = get_current_timestamp();
    let second = get_current_timestamp();
    assert!(second >= first);
}

// @tc.name: ut_call_once_runs_single_time
// @tc.desc: Test call_once only executes the closure once
// @tc.precon: NA
// @tc.step: 1. Call call_once twice against the same Once
// @tc.expect: The counter is incremented exactly once
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_call_once_runs_single_time() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static ONCE: Once = Once::new();
    static COUNT: AtomicUsize = AtomicUsize::new(0);
    call_once(&ONCE, || {
        COUNT.fetch_add(1, Ordering::SeqCst);
    });
    call_once(&ONCE, || {
        COUNT.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(COUNT.load(Ordering::SeqCst), 1);
}
