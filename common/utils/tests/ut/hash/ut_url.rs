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

use super::*;
use std::collections::HashSet;

// @tc.name: ut_url_hash_basic
// @tc.desc: Test basic functionality of url_hash
// @tc.precon: NA
// @tc.step: 1. Call url_hash with "https://example.com" twice
// @tc.expect: Both calls return the same hash value
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 0
#[test]
fn ut_url_hash_basic() {
    let input = "https://example.com";
    assert_eq!(url_hash(input), url_hash(input));
}

// @tc.name: ut_url_hash_empty_string
// @tc.desc: Test url_hash with empty string input matches the known SHA-256
// digest of the empty byte string
// @tc.precon: NA
// @tc.step: 1. Call url_hash with an empty string
// @tc.expect: Result matches the SHA-256 digest of the empty input
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 0
#[test]
fn ut_url_hash_empty_string() {
    let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    assert_eq!(url_hash(""), expected);
}

// @tc.name: ut_url_hash_is_64_hex_chars
// @tc.desc: Verify url_hash always returns a 64-character lowercase hex string
// @tc.precon: NA
// @tc.step: 1. Call url_hash with several inputs
// @tc.expect: Each result is 64 hex characters
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_url_hash_is_64_hex_chars() {
    for input in ["", "https://example.com", "a".repeat(10000).as_str()] {
        let hash = url_hash(input);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

// @tc.name: ut_url_hash_different_inputs
// @tc.desc: Test url_hash with different inputs produce different hashes
// @tc.precon: NA
// @tc.step: 1. Call url_hash with two distinct URLs
// @tc.expect: Different hash values are returned
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_url_hash_different_inputs() {
    let result1 = url_hash("https://example.com");
    let result2 = url_hash("https://example.org");
    assert_ne!(result1, result2);
}

// @tc.name: ut_url_hash_special_characters
// @tc.desc: Test url_hash with special characters in URL
// @tc.precon: NA
// @tc.step: 1. Call url_hash with a URL containing query and fragment parts
// @tc.expect: Valid hash is generated without panic
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 2
#[test]
fn ut_url_hash_special_characters() {
    let input = "https://example.com/path?query=123#fragment";
    let result = url_hash(input);
    assert!(!result.is_empty());
}

// @tc.name: ut_url_hash_collision_resistance
// @tc.desc: Test basic collision resistance across many distinct URLs
// @tc.precon: NA
// @tc.step: 1. Generate hashes for 1000 different URLs
// 2. Check for hash collisions
// @tc.expect: No collisions occur among generated hashes
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 3
#[test]
fn ut_url_hash_collision_resistance() {
    let mut hashes = HashSet::new();
    for i in 0..1000 {
        let url = format!("https://example.com/{}", i);
        let hash = url_hash(&url);
        assert!(hashes.insert(hash), "Collision detected at i = {}", i);
    }
}
