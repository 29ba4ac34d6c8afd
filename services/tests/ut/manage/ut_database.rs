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

use super::{RequestDb, TaskFilter};
use crate::task::config::{Action, ConfigBuilder};
use crate::task::info::{State, UpdateInfo};
use crate::task::notify::Progress;
use crate::task::reason::Reason;
use crate::tests::{lock_database, test_init};
use crate::utils::task_id_generator::TaskIdGenerator;

// @tc.name: ut_database_insert_and_contains
// @tc.desc: Test inserting a task and checking its presence
// @tc.precon: NA
// @tc.step: 1. Insert a task built from a TaskConfig
//           2. Call contains_task
// @tc.expect: contains_task returns true, a second insert with the same id is rejected
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_insert_and_contains() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let config = ConfigBuilder::new().url("https://example.com").build();
    let db = RequestDb::get_instance();

    assert!(db.insert_task(task_id, &config));
    assert!(db.contains_task(task_id));
    assert!(!db.insert_task(task_id, &config));
}

// @tc.name: ut_database_round_trip_config
// @tc.desc: Test get_task_config returns the fields that were inserted
// @tc.precon: NA
// @tc.step: 1. Insert a task with a file spec and a set of headers
//           2. Fetch its config back
// @tc.expect: url, action and file_specs match what was inserted
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_round_trip_config() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let config = ConfigBuilder::new()
        .url("https://example.com/file")
        .action(Action::Upload)
        .file_spec("test_files/ut_database_round_trip.bin")
        .build();
    let db = RequestDb::get_instance();
    assert!(db.insert_task(task_id, &config));

    let fetched = db.get_task_config(task_id).unwrap();
    assert_eq!(fetched.url, "https://example.com/file");
    assert_eq!(fetched.common_data.action, Action::Upload);
    assert_eq!(fetched.file_specs.len(), 1);
    assert_eq!(fetched.file_specs[0].file_name, "ut_database_round_trip.bin");
}

// @tc.name: ut_database_update_state
// @tc.desc: Test update_task_state persists the new state and reason
// @tc.precon: NA
// @tc.step: 1. Insert a task
//           2. Call update_task_state with State::Running
//           3. Read it back via query_task_state
// @tc.expect: query_task_state reports State::Running
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_update_state() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let config = ConfigBuilder::new().url("https://example.com").build();
    let db = RequestDb::get_instance();
    db.insert_task(task_id, &config);

    db.update_task_state(task_id, State::Running, Reason::Default);
    assert_eq!(db.query_task_state(task_id), Some(State::Running));
}

// @tc.name: ut_database_update_progress
// @tc.desc: Test update_task_progress persists sizes and processed counts
// @tc.precon: NA
// @tc.step: 1. Insert a task
//           2. Apply an UpdateInfo with known progress
//           3. Fetch the TaskInfo back
// @tc.expect: The fetched progress matches what was written
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_update_progress() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let config = ConfigBuilder::new()
        .url("https://example.com")
        .file_spec("test_files/ut_database_progress.bin")
        .build();
    let db = RequestDb::get_instance();
    db.insert_task(task_id, &config);

    let mut progress = Progress::new(vec![100]);
    progress.processed[0] = 50;
    progress.common_data.total_processed = 50;
    let update = UpdateInfo {
        mtime: 42,
        reason: Reason::Default as u8,
        tries: 1,
        mime_type: "application/octet-stream".to_string(),
        progress,
    };
    db.update_task_progress(task_id, &update);

    let info = db.get_task_info(task_id).unwrap();
    assert_eq!(info.progress.sizes, vec![100]);
    assert_eq!(info.progress.processed, vec![50]);
    assert_eq!(info.common_data.tries, 1);
}

// @tc.name: ut_database_query_by_filter
// @tc.desc: Test query_by filters tasks by uid, state and action
// @tc.precon: NA
// @tc.step: 1. Insert two tasks for different uids
//           2. Query by uid
// @tc.expect: Only the matching task_id is returned
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_query_by_filter() {
    test_init();
    let _lock = lock_database();

    let task_id_a = TaskIdGenerator::generate();
    let task_id_b = TaskIdGenerator::generate();
    let db = RequestDb::get_instance();
    db.insert_task(task_id_a, &ConfigBuilder::new().url("a").uid(1001).build());
    db.insert_task(task_id_b, &ConfigBuilder::new().url("b").uid(1002).build());

    let filter = TaskFilter {
        uid: Some(1001),
        state: None,
        action: None,
    };
    let found = db.query_by(&filter);
    assert!(found.contains(&task_id_a));
    assert!(!found.contains(&task_id_b));
}

// @tc.name: ut_database_sweep_on_startup
// @tc.desc: Test sweep_on_startup fails running tasks and re-queues waiting tasks
// @tc.precon: NA
// @tc.step: 1. Insert a task and force it into Running state
//           2. Call sweep_on_startup
// @tc.expect: The task is now Failed
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_sweep_on_startup() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let db = RequestDb::get_instance();
    db.insert_task(task_id, &ConfigBuilder::new().url("https://example.com").build());
    db.update_task_state(task_id, State::Running, Reason::Default);

    db.sweep_on_startup();
    assert_eq!(db.query_task_state(task_id), Some(State::Failed));
}

// @tc.name: ut_database_delete_task
// @tc.desc: Test delete_task removes the row
// @tc.precon: NA
// @tc.step: 1. Insert a task
//           2. Delete it
// @tc.expect: contains_task reports false afterwards
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_database_delete_task() {
    test_init();
    let _lock = lock_database();

    let task_id = TaskIdGenerator::generate();
    let db = RequestDb::get_instance();
    db.insert_task(task_id, &ConfigBuilder::new().url("https://example.com").build());
    db.delete_task(task_id);
    assert!(!db.contains_task(task_id));
}
