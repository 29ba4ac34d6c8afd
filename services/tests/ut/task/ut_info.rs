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

// @tc.name: ut_enum_state
// @tc.desc: Test the repr values of State enum
// @tc.precon: NA
// @tc.step: 1. Check the repr value of each State enum variant
// @tc.expect: Each State variant has the correct repr value
// @tc.type: FUNC
// @tc.require: issues#ICN16H
#[test]
fn ut_enum_state() {
    assert_eq!(State::Initialized as u8, 0);
    assert_eq!(State::Waiting as u8, 16);
    assert_eq!(State::Running as u8, 32);
    assert_eq!(State::Retrying as u8, 33);
    assert_eq!(State::Paused as u8, 48);
    assert_eq!(State::Stopped as u8, 49);
    assert_eq!(State::Completed as u8, 64);
    assert_eq!(State::Failed as u8, 65);
    assert_eq!(State::Removed as u8, 80);
    assert_eq!(State::Any as u8, 97);
}