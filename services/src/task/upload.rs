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

//! Upload task execution.
//!
//! Multi-file uploads run sequentially by index. Each file is streamed
//! from disk through a `TaskReader` (an `AsyncRead` wrapping the file
//! plus a `TaskOperator` for progress/speed-limit reporting) into the
//! request body, with a watchdog timeout guarding each individual read.

use std::fs::File;
use std::future::Future;
use std::io::{self, Read, SeekFrom};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use reqwest::{Client, Request, StatusCode};
use tokio::io::{AsyncRead, ReadBuf};
use tokio_util::io::ReaderStream;

use crate::error::TransferError;
use crate::manage::notifier::Notifier;
use crate::task::client::build_client;
use crate::task::info::State;
use crate::task::operator::TaskOperator;
use crate::task::reason::Reason;
use crate::task::request_task::{RequestTask, TaskError, TaskPhase};
use crate::task::task_control;
use crate::utils::get_current_duration;

/// Number of attempts before an individual file's upload gives up.
const UPLOAD_RETRY_TIMES: u32 = 3;

/// Maximum time a single read of the upload source file may take before
/// the upload is abandoned as stalled.
const READ_WATCHDOG: Duration = Duration::from_secs(30);

impl RequestTask {
    /// Prepares the task for upload, marking it as running.
    pub(crate) fn prepare_upload(&self) {
        self.progress.lock().unwrap().common_data.state = State::Running as u8;
    }
}

/// Runs the upload task to completion across every configured file, in
/// order, retrying each file's attempt on recoverable errors.
pub(crate) async fn upload(task: Arc<RequestTask>, abort_flag: Arc<AtomicBool>) {
    task.prepare_upload();

    let start_index = task.progress.lock().unwrap().common_data.index;
    let file_count = task.conf.file_specs.len();

    for index in start_index..file_count {
        task.progress.lock().unwrap().common_data.index = index;

        match upload_one_file(task.clone(), abort_flag.clone(), index).await {
            Ok(()) => {
                task.code.lock().unwrap()[index] = Reason::Default;
            }
            Err(TaskError::Waiting(TaskPhase::UserAbort)) => {
                finish_upload(&task, Err(Reason::UserOperation));
                return;
            }
            Err(TaskError::Waiting(TaskPhase::NetworkOffline)) => {
                finish_upload(&task, Err(Reason::NetworkOffline));
                return;
            }
            Err(TaskError::Waiting(TaskPhase::NeedRetry)) => {
                finish_upload(&task, Err(Reason::RequestError));
                return;
            }
            Err(TaskError::Failed(reason)) => {
                task.code.lock().unwrap()[index] = reason;
                finish_upload(&task, Err(Reason::UploadFileError));
                return;
            }
        }
    }

    finish_upload(&task, Ok(()));
}

fn finish_upload(task: &Arc<RequestTask>, result: Result<(), Reason>) {
    let time = get_current_duration().as_secs();
    task.task_time.fetch_add(
        time.saturating_sub(task.start_time.load(Ordering::SeqCst)),
        Ordering::SeqCst,
    );

    let (state, reason) = {
        let mut status = task.status.lock().unwrap();
        status.mtime = crate::utils::get_current_timestamp();
        match result {
            Ok(()) => {
                status.state = State::Completed;
                status.reason = Reason::Default;
            }
            Err(reason) => {
                status.state = State::Failed;
                status.reason = reason;
            }
        }
        (status.state, status.reason)
    };

    task.progress.lock().unwrap().common_data.state = state as u8;
    *task.running_result.lock().unwrap() = Some(result.map_err(|_| reason));
    task.update_progress_in_database();

    let notify_data = task.build_notify_data();
    match result {
        Ok(()) => Notifier::complete(&task.client_manager, notify_data),
        Err(_) => Notifier::fail(&task.client_manager, notify_data),
    }
}

async fn upload_one_file(
    task: Arc<RequestTask>,
    abort_flag: Arc<AtomicBool>,
    index: usize,
) -> Result<(), TaskError> {
    let mut tries = 0;
    loop {
        let rest_time = task.rest_time.load(Ordering::SeqCst);
        let client = build_client(&task.conf, rest_time)
            .map_err(|_| TaskError::Failed(Reason::BuildRequestFailed))?;
        *task.client.lock().await = client;

        match upload_one_file_inner(task.clone(), abort_flag.clone(), index).await {
            Ok(()) => return Ok(()),
            Err(TaskError::Waiting(TaskPhase::NeedRetry)) => continue,
            Err(TaskError::Failed(reason)) => {
                tries += 1;
                if tries >= UPLOAD_RETRY_TIMES {
                    return Err(TaskError::Failed(reason));
                }
                info!(
                    "task {} upload file {} attempt {} failed with {:?}, retrying",
                    task.task_id(),
                    index,
                    tries,
                    reason
                );
            }
            Err(other) => return Err(other),
        }
    }
}

async fn upload_one_file_inner(
    task: Arc<RequestTask>,
    abort_flag: Arc<AtomicBool>,
    index: usize,
) -> Result<(), TaskError> {
    let client = task.client.lock().await.clone();
    let request = build_stream_request(task.clone(), &client, index, abort_flag).await?;

    let response = client.execute(request).await;
    match response {
        Ok(response) => {
            let status_code = response.status();
            debug!(
                "task {} upload file {} response status {}",
                task.task_id(),
                index,
                status_code
            );
            task.record_upload_response(index, Ok(response)).await;
            if status_code.is_success() || status_code == StatusCode::PARTIAL_CONTENT {
                Ok(())
            } else {
                Err(TaskError::Failed(Reason::ProtocolError))
            }
        }
        Err(e) => task.handle_transfer_error(TransferError::from(e)).await,
    }
}

async fn build_stream_request(
    task: Arc<RequestTask>,
    client: &Client,
    index: usize,
    abort_flag: Arc<AtomicBool>,
) -> Result<Request, TaskError> {
    let mut request_builder = task.build_request_builder(client)?;

    let file = task
        .files
        .get(index)
        .ok_or(TaskError::Failed(Reason::OthersError))?;

    // The begins/ends range only applies to the file the task config names;
    // every other file in a multi-file upload is sent in full.
    let begins = if task.conf.common_data.index == index as u32 {
        task.conf.common_data.begins
    } else {
        0
    };
    if begins > 0 {
        task_control::file_seek(file.clone(), SeekFrom::Start(begins))
            .await
            .map_err(|_| TaskError::Failed(Reason::IoError))?;
    }

    let content_length = task
        .progress
        .lock()
        .unwrap()
        .sizes
        .get(index)
        .copied()
        .unwrap_or(0)
        .max(0) as u64;

    if let Some(spec) = task.conf.file_specs.get(index) {
        request_builder = request_builder.header("Content-Type", spec.mime_type.as_str());
    }
    request_builder = request_builder.header(reqwest::header::CONTENT_LENGTH, content_length);

    let operator = TaskOperator::new(task.clone(), abort_flag);
    let reader = TaskReader::new(operator, file, index, content_length);
    let stream = ReaderStream::new(reader);
    let body = reqwest::Body::wrap_stream(stream);

    let request = request_builder
        .body(body)
        .build()
        .map_err(|_| TaskError::Failed(Reason::BuildRequestFailed))?;
    Ok(request)
}

/// Streams a task's upload source file while reporting read progress
/// through the embedded `TaskOperator` (front/background notifications
/// and speed limiting) on every chunk.
struct TaskReader {
    operator: TaskOperator,
    file: Arc<Mutex<File>>,
    index: usize,
    /// Bytes left to read before this file's configured range is exhausted.
    remaining: u64,
    read_fut: Option<Pin<Box<dyn Future<Output = io::Result<Vec<u8>>> + Send>>>,
}

impl TaskReader {
    fn new(operator: TaskOperator, file: Arc<Mutex<File>>, index: usize, remaining: u64) -> Self {
        Self {
            operator,
            file,
            index,
            remaining,
            read_fut: None,
        }
    }
}

impl AsyncRead for TaskReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(Ok(()));
        }
        loop {
            if let Some(fut) = this.read_fut.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(result) => {
                        this.read_fut = None;
                        let data = result?;
                        if data.is_empty() {
                            this.remaining = 0;
                            return Poll::Ready(Ok(()));
                        }
                        this.remaining = this.remaining.saturating_sub(data.len() as u64);
                        buf.put_slice(&data);
                        {
                            let mut progress = this.operator.task.progress.lock().unwrap();
                            if let Some(processed) = progress.processed.get_mut(this.index) {
                                *processed += data.len();
                            }
                            progress.common_data.total_processed += data.len();
                        }
                        return match this.operator.poll_progress_common(cx) {
                            Poll::Ready(Ok(())) => Poll::Ready(Ok(())),
                            Poll::Ready(Err(e)) => {
                                Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, e)))
                            }
                            Poll::Pending => Poll::Pending,
                        };
                    }
                }
            } else {
                let file = this.file.clone();
                let want = buf.remaining().min(this.remaining as usize);
                this.read_fut = Some(Box::pin(async move {
                    match tokio::time::timeout(
                        READ_WATCHDOG,
                        task_control::runtime_spawn_blocking(move || {
                            let mut guard = file.lock().unwrap();
                            let mut tmp = vec![0u8; want];
                            let n = guard.read(&mut tmp)?;
                            tmp.truncate(n);
                            Ok(tmp)
                        }),
                    )
                    .await
                    {
                        Ok(join_result) => join_result
                            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
                            .and_then(|r| r),
                        Err(_) => Err(io::Error::new(
                            io::ErrorKind::TimedOut,
                            "upload read watchdog timeout",
                        )),
                    }
                }));
            }
        }
    }
}
