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

//! Download task execution.
//!
//! Drives the request/response cycle for a download task: builds the
//! request, streams the response body into the target file through
//! `TaskOperator`, retries on transient failures, and reports the final
//! outcome.

use std::future::poll_fn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::StreamExt;
use reqwest::StatusCode;

use crate::error::TransferError;
use crate::manage::notifier::Notifier;
use crate::task::client::build_client;
use crate::task::config::Version;
use crate::task::info::State;
use crate::task::operator::TaskOperator;
use crate::task::reason::Reason;
use crate::task::request_task::{RequestTask, TaskError, TaskPhase};
use crate::task::task_control;
use crate::utils::get_current_duration;

/// Number of attempts before a download task gives up.
const DOWNLOAD_RETRY_TIMES: u32 = 3;

impl RequestTask {
    /// Prepares the task for download, marking it as running.
    pub(crate) fn prepare_download(&self) {
        self.progress.lock().unwrap().common_data.state = State::Running as u8;
    }
}

/// Runs the download task to completion, retrying on recoverable errors.
///
/// # Arguments
///
/// * `task` - The task to download.
/// * `abort_flag` - Flag used to signal user-initiated abortion.
pub(crate) async fn download(task: Arc<RequestTask>, abort_flag: Arc<AtomicBool>) {
    task.prepare_download();

    let mut tries = 0;
    loop {
        let rest_time = task.rest_time.load(Ordering::SeqCst);
        let client = match build_client(&task.conf, rest_time) {
            Ok(client) => client,
            Err(e) => {
                error!("task {} rebuild client failed: {:?}", task.task_id(), e);
                finish_download(&task, Err(Reason::BuildRequestFailed));
                return;
            }
        };
        *task.client.lock().await = client;

        match download_inner(task.clone(), abort_flag.clone()).await {
            Ok(()) => {
                finish_download(&task, Ok(()));
                return;
            }
            Err(TaskError::Waiting(TaskPhase::UserAbort)) => {
                finish_download(&task, Err(Reason::UserOperation));
                return;
            }
            Err(TaskError::Waiting(TaskPhase::NetworkOffline)) => {
                finish_download(&task, Err(Reason::NetworkOffline));
                return;
            }
            Err(TaskError::Waiting(TaskPhase::NeedRetry)) => {
                continue;
            }
            Err(TaskError::Failed(reason)) => {
                tries += 1;
                if tries >= DOWNLOAD_RETRY_TIMES {
                    finish_download(&task, Err(reason));
                    return;
                }
                info!(
                    "task {} download attempt {} failed with {:?}, retrying",
                    task.task_id(),
                    tries,
                    reason
                );
            }
        }
    }
}

fn finish_download(task: &Arc<RequestTask>, result: Result<(), Reason>) {
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

async fn download_inner(
    task: Arc<RequestTask>,
    abort_flag: Arc<AtomicBool>,
) -> Result<(), TaskError> {
    if !check_file_exist(&task) {
        return Err(TaskError::Failed(Reason::IoError));
    }

    let client = task.client.lock().await.clone();
    let request = RequestTask::build_download_request(task.clone(), &client).await?;

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => return task.handle_transfer_error(TransferError::from(e)).await,
    };

    let status_code = response.status();
    debug!(
        "task {} download response status {}",
        task.task_id(),
        status_code
    );

    if status_code == StatusCode::RANGE_NOT_SATISFIABLE {
        return Err(TaskError::Failed(Reason::UnsupportedRangeRequest));
    }
    if !status_code.is_success() {
        return Err(TaskError::Failed(Reason::ProtocolError));
    }
    if task.require_range() && status_code != StatusCode::PARTIAL_CONTENT {
        return Err(TaskError::Failed(Reason::UnsupportedRangeRequest));
    }

    task.get_file_info(&response)?;
    if task.conf.version == Version::API9 {
        task.notify_header_receive();
    }

    let mut operator = TaskOperator::new(task.clone(), abort_flag);
    let noop_waker = futures::task::noop_waker();
    let mut write_cx = Context::from_waker(&noop_waker);

    let mut stream = response.bytes_stream();
    loop {
        let chunk = match stream.next().await {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => return task.handle_transfer_error(TransferError::from(e)).await,
            None => break,
        };
        if chunk.is_empty() {
            continue;
        }
        let mut remaining = &chunk[..];
        while !remaining.is_empty() {
            match operator.poll_write_file(&mut write_cx, remaining, 0) {
                Poll::Ready(Ok(written)) => remaining = &remaining[written..],
                Poll::Ready(Err(e)) => return task.handle_transfer_error(e).await,
                Poll::Pending => unreachable!("poll_write_file never returns Pending"),
            }
        }
        if let Err(e) = poll_fn(|cx| operator.poll_progress_common(cx)).await {
            return task.handle_transfer_error(e).await;
        }
    }

    task_control::file_sync_all(task.files.get(0).expect("checked by check_file_exist"))
        .await
        .map_err(|_| TaskError::Failed(Reason::IoError))?;

    Ok(())
}

/// Verifies that the download's target directory is present.
fn check_file_exist(task: &Arc<RequestTask>) -> bool {
    if task.files.is_empty() {
        error!("task {} has no target file to download into", task.task_id());
        return false;
    }
    for spec in task.conf.file_specs.iter() {
        let path = std::path::Path::new(&spec.path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                error!(
                    "task {} download target directory missing: {}",
                    task.task_id(),
                    parent.display()
                );
                return false;
            }
        }
    }
    true
}
