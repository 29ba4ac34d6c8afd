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

//! In-process publish/subscribe registry for task notifications.
//!
//! The teacher's equivalent (`service/client/`) brokers a Unix-domain-socket
//! handshake so out-of-process clients can subscribe to a task; that wire
//! protocol is the client-facing binding this repo leaves out of scope. This
//! module keeps the same actor shape — a background task driven by an
//! unbounded channel, with a cheap cloneable handle for callers — but
//! delivers notifications as plain in-process channels instead of socket
//! frames. [`super::notifier::Notifier`] and the facade's subscribe commands
//! are the two callers.
//!
//! Run-count tracking (`service/run_count/` in the teacher) is folded in
//! here rather than kept as its own actor: it is the same
//! subscribe/unsubscribe/push shape over a single global counter instead of
//! a per-task one.

use std::collections::HashMap;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

use crate::error::ErrorCode;
use crate::task::notify::{NotifyData, SubscribeType, WaitingCause};
use crate::task::reason::Reason;

/// Events accepted by the background [`ClientManager`] task.
pub(crate) enum ClientEvent {
    Subscribe(u32, UnboundedSender<SubscriberEvent>, oneshot::Sender<ErrorCode>),
    Unsubscribe(u32, oneshot::Sender<ErrorCode>),
    TaskFinished(u32),
    SendNotifyData(SubscribeType, NotifyData),
    SendFaults(u32, SubscribeType, Reason),
    SendWaitNotify(u32, WaitingCause),
    SubscribeRunCount(UnboundedSender<i64>, oneshot::Sender<(ErrorCode, u64)>),
    UnsubscribeRunCount(u64, oneshot::Sender<ErrorCode>),
    ChangeRunCount(i64),
}

/// Notifications pushed to a task's subscriber channel.
#[derive(Debug, Clone)]
pub(crate) enum SubscriberEvent {
    Notify(SubscribeType, NotifyData),
    Fault(SubscribeType, Reason),
    Wait(WaitingCause),
}

/// Lightweight, cloneable handle for sending events to the [`ClientManager`].
#[derive(Clone)]
pub(crate) struct ClientManagerEntry {
    tx: UnboundedSender<ClientEvent>,
}

impl ClientManagerEntry {
    pub(crate) fn new(tx: UnboundedSender<ClientEvent>) -> Self {
        Self { tx }
    }

    fn send_event(&self, event: ClientEvent) -> bool {
        if self.tx.send(event).is_err() {
            info!("ClientManager is unloading");
            return false;
        }
        true
    }

    /// Registers a per-task subscriber channel. Returns the receiving end of
    /// the channel the caller should poll for [`SubscriberEvent`]s.
    pub(crate) async fn subscribe(
        &self,
        task_id: u32,
    ) -> (ErrorCode, Option<UnboundedReceiver<SubscriberEvent>>) {
        let (sub_tx, sub_rx) = mpsc::unbounded_channel();
        let (tx, rx) = oneshot::channel();
        if !self.send_event(ClientEvent::Subscribe(task_id, sub_tx, tx)) {
            return (ErrorCode::Other, None);
        }
        match rx.await {
            Ok(code) => (code, Some(sub_rx)),
            Err(_) => (ErrorCode::Other, None),
        }
    }

    pub(crate) async fn unsubscribe(&self, task_id: u32) -> ErrorCode {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(ClientEvent::Unsubscribe(task_id, tx)) {
            return ErrorCode::Other;
        }
        rx.await.unwrap_or(ErrorCode::Other)
    }

    /// Drops a task's subscriber once the task reaches a terminal state.
    pub(crate) fn notify_task_finished(&self, task_id: u32) {
        self.send_event(ClientEvent::TaskFinished(task_id));
    }

    pub(crate) fn send_notify_data(&self, sub_type: SubscribeType, data: NotifyData) {
        self.send_event(ClientEvent::SendNotifyData(sub_type, data));
    }

    pub(crate) fn send_faults(&self, task_id: u32, sub_type: SubscribeType, reason: Reason) {
        self.send_event(ClientEvent::SendFaults(task_id, sub_type, reason));
    }

    pub(crate) fn send_wait_reason(&self, task_id: u32, cause: WaitingCause) {
        self.send_event(ClientEvent::SendWaitNotify(task_id, cause));
    }

    /// Subscribes to the global running-task count. Returns a subscription
    /// id (used to unsubscribe) together with the receiving end of the
    /// channel; the current count is pushed immediately.
    pub(crate) async fn subscribe_run_count(
        &self,
    ) -> (ErrorCode, Option<(u64, UnboundedReceiver<i64>)>) {
        let (sub_tx, sub_rx) = mpsc::unbounded_channel();
        let (tx, rx) = oneshot::channel();
        if !self.send_event(ClientEvent::SubscribeRunCount(sub_tx, tx)) {
            return (ErrorCode::Other, None);
        }
        match rx.await {
            Ok((code, id)) => (code, Some((id, sub_rx))),
            Err(_) => (ErrorCode::Other, None),
        }
    }

    pub(crate) async fn unsubscribe_run_count(&self, id: u64) -> ErrorCode {
        let (tx, rx) = oneshot::channel();
        if !self.send_event(ClientEvent::UnsubscribeRunCount(id, tx)) {
            return ErrorCode::Other;
        }
        rx.await.unwrap_or(ErrorCode::Other)
    }

    pub(crate) fn notify_run_count(&self, count: i64) {
        self.send_event(ClientEvent::ChangeRunCount(count));
    }
}

/// Background actor holding subscriber state. Only reachable through a
/// [`ClientManagerEntry`].
struct ClientManager {
    subscribers: HashMap<u32, UnboundedSender<SubscriberEvent>>,
    run_count: i64,
    run_count_subs: HashMap<u64, UnboundedSender<i64>>,
    next_run_count_id: u64,
    rx: UnboundedReceiver<ClientEvent>,
}

impl ClientManager {
    /// Spawns the background actor and returns a handle to it.
    pub(crate) fn init() -> ClientManagerEntry {
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = ClientManager {
            subscribers: HashMap::new(),
            run_count: 0,
            run_count_subs: HashMap::new(),
            next_run_count_id: 0,
            rx,
        };
        tokio::spawn(manager.run());
        ClientManagerEntry::new(tx)
    }

    async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            match event {
                ClientEvent::Subscribe(task_id, sender, reply) => {
                    self.subscribers.insert(task_id, sender);
                    let _ = reply.send(ErrorCode::ErrOk);
                }
                ClientEvent::Unsubscribe(task_id, reply) => {
                    self.subscribers.remove(&task_id);
                    let _ = reply.send(ErrorCode::ErrOk);
                }
                ClientEvent::TaskFinished(task_id) => {
                    self.subscribers.remove(&task_id);
                }
                ClientEvent::SendNotifyData(sub_type, data) => {
                    if let Some(sender) = self.subscribers.get(&data.task_id) {
                        let _ = sender.send(SubscriberEvent::Notify(sub_type, data));
                    }
                }
                ClientEvent::SendFaults(task_id, sub_type, reason) => {
                    if let Some(sender) = self.subscribers.get(&task_id) {
                        let _ = sender.send(SubscriberEvent::Fault(sub_type, reason));
                    }
                }
                ClientEvent::SendWaitNotify(task_id, cause) => {
                    if let Some(sender) = self.subscribers.get(&task_id) {
                        let _ = sender.send(SubscriberEvent::Wait(cause));
                    }
                }
                ClientEvent::SubscribeRunCount(sender, reply) => {
                    let _ = sender.send(self.run_count);
                    let id = self.next_run_count_id;
                    self.next_run_count_id += 1;
                    self.run_count_subs.insert(id, sender);
                    let _ = reply.send((ErrorCode::ErrOk, id));
                }
                ClientEvent::UnsubscribeRunCount(id, reply) => {
                    self.run_count_subs.remove(&id);
                    let _ = reply.send(ErrorCode::ErrOk);
                }
                ClientEvent::ChangeRunCount(count) => {
                    self.run_count = count;
                    for sender in self.run_count_subs.values() {
                        let _ = sender.send(count);
                    }
                }
            }
        }
    }
}

/// Spawns the shared client manager and returns a handle to it. Called once
/// from the facade's construction path.
pub(crate) fn init() -> ClientManagerEntry {
    ClientManager::init()
}
