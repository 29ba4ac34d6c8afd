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

//! Notification system for task state changes and events.
//!
//! Broadcasts task-related events to in-process subscribers through the
//! [`super::client_manager::ClientManagerEntry`] registry. Publishing to an
//! external UI surface (a system notification bar, toast, etc.) is a
//! separate, narrower concern handled by [`NotificationDispatcher`] below.

use super::client_manager::ClientManagerEntry;
use crate::task::notify::{NotifyData, SubscribeType, WaitingCause};
use crate::task::reason::Reason;

/// Central notification dispatcher for task events.
///
/// Provides methods for sending various types of task-related notifications
/// to in-process subscribers.
pub(crate) struct Notifier;

impl Notifier {
    /// Sends a completion notification for a task.
    pub(crate) fn complete(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        client_manager.send_notify_data(SubscribeType::Complete, notify_data)
    }

    /// Sends a failure notification for a task.
    pub(crate) fn fail(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        client_manager.send_notify_data(SubscribeType::Fail, notify_data)
    }

    /// Sends a fault notification for a task.
    pub(crate) fn faults(tid: u32, client_manager: &ClientManagerEntry, reason: Reason) {
        client_manager.send_faults(tid, SubscribeType::FaultOccur, reason)
    }

    /// Sends a pause notification for a task.
    pub(crate) fn pause(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        client_manager.send_notify_data(SubscribeType::Pause, notify_data)
    }

    /// Sends a resume notification for a task.
    pub(crate) fn resume(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        client_manager.send_notify_data(SubscribeType::Resume, notify_data)
    }

    pub(crate) fn header_receive(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        client_manager.send_notify_data(SubscribeType::HeaderReceive, notify_data)
    }

    /// Sends a progress notification for a task. Skipped when the progress
    /// is still in its unstarted, unknown-size state.
    pub(crate) fn progress(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        let total_processed = notify_data.progress.common_data.total_processed;
        let file_total_size: i64 = notify_data.progress.sizes.iter().sum();
        if total_processed == 0 && file_total_size < 0 {
            return;
        }
        client_manager.send_notify_data(SubscribeType::Progress, notify_data)
    }

    /// Sends a removal notification and marks the task finished so its
    /// subscriber entry is dropped.
    pub(crate) fn remove(client_manager: &ClientManagerEntry, notify_data: NotifyData) {
        let task_id = notify_data.task_id;
        client_manager.send_notify_data(SubscribeType::Remove, notify_data);
        client_manager.notify_task_finished(task_id);
    }

    pub(crate) fn waiting(client_manager: &ClientManagerEntry, task_id: u32, cause: WaitingCause) {
        client_manager.send_wait_reason(task_id, cause);
    }
}

/// Narrow seam for publishing task state to an external UI surface (a
/// system notification bar, a toast, etc). That surface's rendering and
/// lifecycle are an external collaborator; this repo only needs the single
/// hook the transfer engine calls into.
pub(crate) trait NotificationDispatcher: Send + Sync {
    /// Called when a task's progress or terminal state changes and should
    /// be reflected in whatever UI surface is wired in.
    fn publish(&self, notify_data: &NotifyData);
}

/// Default dispatcher used when no platform UI surface is wired in: it
/// drops every notification.
pub(crate) struct NullNotificationDispatcher;

impl NotificationDispatcher for NullNotificationDispatcher {
    fn publish(&self, _notify_data: &NotifyData) {}
}
