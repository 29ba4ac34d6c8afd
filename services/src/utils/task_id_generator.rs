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

//! Provides utilities for generating unique task identifiers.

use crate::manage::database::RequestDb;

/// Generator for unique task identifiers.
pub(crate) struct TaskIdGenerator;

impl TaskIdGenerator {
    /// Generates a task identifier that does not collide with an existing
    /// task already present in the store.
    pub(crate) fn generate() -> u32 {
        loop {
            let task_id: u32 = rand::random();
            if task_id != 0 && !RequestDb::get_instance().contains_task(task_id) {
                return task_id;
            }
        }
    }
}
