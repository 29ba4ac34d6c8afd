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

use std::fs::File;
use std::io::Write;
use std::net::{TcpListener, TcpStream};

use super::*;
use crate::manage::client_manager;
use crate::manage::notifier::NullNotificationDispatcher;
use crate::task::config::{Action, ConfigBuilder, Mode, TaskConfig};
use crate::task::files::AttachedFiles;

const TEST_CONTENT: &str = "12345678910";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = std::fs::create_dir("test_files/");
}

fn build_task(config: TaskConfig) -> Arc<RequestTask> {
    let rest_time = 30;
    let files = AttachedFiles::open(&config).unwrap();
    let client = build_client(&config, rest_time).unwrap();
    let client_manager = client_manager::init();
    Arc::new(RequestTask::new(
        config,
        files,
        client,
        client_manager,
        Arc::new(NullNotificationDispatcher),
        false,
        rest_time,
    ))
}

fn create_file(path: &str) -> String {
    let mut file = File::options()
        .read(true)
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)
        .unwrap();
    file.write_all(TEST_CONTENT.as_bytes()).unwrap();
    path.to_string()
}

fn config(server: &str, paths: Vec<String>) -> TaskConfig {
    let mut builder = ConfigBuilder::new();
    builder
        .action(Action::Upload)
        .method("POST")
        .mode(Mode::BackGround)
        .url(&format!("http://{}/", server))
        .redirect(true)
        .version(1);
    for path in paths {
        builder.file_spec(&path);
    }
    builder.build()
}

/// Starts a one-shot-per-connection server that reads a plain (non-multipart)
/// request body up to its Content-Length and checks it against the expected
/// bytes for that connection, in order.
fn test_server(expected_bodies: Vec<Vec<u8>>) -> String {
    let host = "127.0.0.1";
    let mut port = 7979;
    let listener = loop {
        match TcpListener::bind((host, port)) {
            Ok(listener) => break listener,
            Err(_) => port += 1,
        }
    };
    std::thread::spawn(move || {
        for (stream, expected) in listener.incoming().zip(expected_bodies.iter()) {
            handle_connection(stream.unwrap(), expected);
        }
    });
    format!("{}:{}", host, port)
}

fn handle_connection(mut stream: TcpStream, expected: &[u8]) {
    let content_length = read_content_length(&mut stream);
    let mut body = vec![0u8; content_length];
    stream.read_exact(&mut body).unwrap();
    let response = if body == expected {
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n"
    } else {
        "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    };
    stream.write_all(response.as_bytes()).unwrap();
}

fn read_content_length(stream: &mut TcpStream) -> usize {
    let mut raw = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        stream.read_exact(&mut byte).unwrap();
        raw.push(byte[0]);
        if raw.ends_with(b"\r\n\r\n") {
            break;
        }
    }
    let headers = String::from_utf8_lossy(&raw);
    for line in headers.lines() {
        let lower = line.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("content-length:") {
            return rest.trim().parse().unwrap_or(0);
        }
    }
    0
}

// @tc.name: ut_upload_basic
// @tc.desc: Test a single-file upload streams the whole file body
// @tc.precon: NA
// @tc.step: 1. Start a server expecting the full file content
//           2. Build an upload task pointing at it
//           3. Run upload() to completion
// @tc.expect: running_result is Ok
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_upload_basic() {
    init();
    let path = create_file("test_files/ut_upload_basic.txt");
    let server = test_server(vec![TEST_CONTENT.as_bytes().to_vec()]);

    let config = config(&server, vec![path]);
    let task = build_task(config);
    upload(task.clone(), Arc::new(AtomicBool::new(false))).await;
    assert!(task.running_result.lock().unwrap().clone().unwrap().is_ok());
}

// @tc.name: ut_upload_begins
// @tc.desc: Test upload honors a begins offset, sending only the tail of the file
// @tc.precon: NA
// @tc.step: 1. Configure begins partway into the file
//           2. Run upload() to completion
// @tc.expect: Server receives exactly the bytes from begins onward
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_upload_begins() {
    init();
    let path = create_file("test_files/ut_upload_begins.txt");
    let (a, b) = TEST_CONTENT.split_at(2);
    let server = test_server(vec![b.as_bytes().to_vec()]);

    let mut config = config(&server, vec![path]);
    config.common_data.begins = a.as_bytes().len() as u64;

    let task = build_task(config);
    upload(task.clone(), Arc::new(AtomicBool::new(false))).await;
    assert!(task.running_result.lock().unwrap().clone().unwrap().is_ok());
}

// @tc.name: ut_upload_ends
// @tc.desc: Test upload honors an ends offset, sending only the head of the file
// @tc.precon: NA
// @tc.step: 1. Configure ends partway into the file
//           2. Run upload() to completion
// @tc.expect: Server receives exactly the bytes up to and including ends
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_upload_ends() {
    init();
    let path = create_file("test_files/ut_upload_ends.txt");
    let (a, _) = TEST_CONTENT.split_at(2);
    let server = test_server(vec![a.as_bytes().to_vec()]);

    let mut config = config(&server, vec![path]);
    config.common_data.ends = a.as_bytes().len() as i64 - 1;

    let task = build_task(config);
    upload(task.clone(), Arc::new(AtomicBool::new(false))).await;
    assert!(task.running_result.lock().unwrap().clone().unwrap().is_ok());
}

// @tc.name: ut_upload_range
// @tc.desc: Test upload honors a begins/ends pair bracketing the middle of the file
// @tc.precon: NA
// @tc.step: 1. Configure begins and ends around a middle slice
//           2. Run upload() to completion
// @tc.expect: Server receives exactly that slice
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_upload_range() {
    init();
    let path = create_file("test_files/ut_upload_range.txt");
    let (a, rest) = TEST_CONTENT.split_at(2);
    let (b, _) = rest.split_at(3);
    let server = test_server(vec![b.as_bytes().to_vec()]);

    let mut config = config(&server, vec![path]);
    config.common_data.begins = a.as_bytes().len() as u64;
    config.common_data.ends = (a.as_bytes().len() + b.as_bytes().len()) as i64 - 1;

    let task = build_task(config);
    upload(task.clone(), Arc::new(AtomicBool::new(false))).await;
    assert!(task.running_result.lock().unwrap().clone().unwrap().is_ok());
}

// @tc.name: ut_upload_index_range
// @tc.desc: Test a begins/ends range applies only to the configured file index
//           in a multi-file upload; the rest upload in full
// @tc.precon: NA
// @tc.step: 1. Configure 5 files, with a range on one of them
//           2. Run upload() to completion
// @tc.expect: Only the configured index's request carries the ranged slice
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_upload_index_range() {
    init();
    let mut paths = vec![];
    for i in 0..5 {
        paths.push(create_file(&format!(
            "test_files/ut_upload_range_index{}.txt",
            i
        )));
    }

    let (a, rest) = TEST_CONTENT.split_at(2);
    let (b, _) = rest.split_at(3);
    let index = 2;

    let mut expected = vec![TEST_CONTENT.as_bytes().to_vec(); 5];
    expected[index] = b.as_bytes().to_vec();
    let server = test_server(expected);

    let mut config = config(&server, paths);
    config.common_data.begins = a.as_bytes().len() as u64;
    config.common_data.ends = (a.as_bytes().len() + b.as_bytes().len()) as i64 - 1;
    config.common_data.index = index as u32;

    let task = build_task(config);
    upload(task.clone(), Arc::new(AtomicBool::new(false))).await;
    assert!(task.running_result.lock().unwrap().clone().unwrap().is_ok());
}
