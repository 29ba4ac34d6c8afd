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
use crate::manage::client_manager::{self, SubscriberEvent};
use crate::task::config::{Action, Version};
use crate::task::notify::Progress;
use crate::task::reason::Reason;

fn test_notify_data(task_id: u32, total_processed: usize, sizes: Vec<i64>) -> NotifyData {
    let mut progress = Progress::new(sizes);
    progress.common_data.total_processed = total_processed;
    NotifyData {
        bundle: "com.example.app".to_string(),
        progress,
        action: Action::Download,
        version: Version::API10,
        each_file_status: Vec::new(),
        task_id,
        uid: 1,
    }
}

// @tc.name: ut_notifier_progress_delivered
// @tc.desc: Test Notifier::progress delivers a normal progress update
// @tc.precon: NA
// @tc.step: 1. Subscribe to a task
//           2. Call Notifier::progress with nonzero processed bytes
// @tc.expect: The subscriber receives the progress event
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_notifier_progress_delivered() {
    let client_manager = client_manager::init();
    let (_, rx) = client_manager.subscribe(1).await;
    let mut rx = rx.unwrap();

    Notifier::progress(&client_manager, test_notify_data(1, 10, vec![100]));

    let event = rx.recv().await.unwrap();
    assert!(matches!(event, SubscriberEvent::Notify(SubscribeType::Progress, _)));
}

// @tc.name: ut_notifier_progress_skips_unstarted_unknown_size
// @tc.desc: Test Notifier::progress swallows the invalid zero-processed,
//           unknown-size state
// @tc.precon: NA
// @tc.step: 1. Subscribe to a task
//           2. Call Notifier::progress with 0 processed and an unknown size
//           3. Send a real progress update afterwards
// @tc.expect: Only the second event is delivered
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_notifier_progress_skips_unstarted_unknown_size() {
    let client_manager = client_manager::init();
    let (_, rx) = client_manager.subscribe(2).await;
    let mut rx = rx.unwrap();

    Notifier::progress(&client_manager, test_notify_data(2, 0, vec![-1]));
    Notifier::progress(&client_manager, test_notify_data(2, 5, vec![-1]));

    let event = rx.recv().await.unwrap();
    match event {
        SubscriberEvent::Notify(SubscribeType::Progress, data) => {
            assert_eq!(data.progress.common_data.total_processed, 5)
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

// @tc.name: ut_notifier_remove_drops_subscriber
// @tc.desc: Test Notifier::remove sends the Remove event then finishes the
//           task's subscription
// @tc.precon: NA
// @tc.step: 1. Subscribe to a task
//           2. Call Notifier::remove
//           3. Send another notification for the same task
// @tc.expect: The Remove event is delivered, the channel then closes
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_notifier_remove_drops_subscriber() {
    let client_manager = client_manager::init();
    let (_, rx) = client_manager.subscribe(3).await;
    let mut rx = rx.unwrap();

    Notifier::remove(&client_manager, test_notify_data(3, 0, vec![10]));
    let event = rx.recv().await.unwrap();
    assert!(matches!(event, SubscriberEvent::Notify(SubscribeType::Remove, _)));

    Notifier::progress(&client_manager, test_notify_data(3, 1, vec![10]));
    assert!(rx.recv().await.is_none());
}

// @tc.name: ut_notifier_faults_delivered
// @tc.desc: Test Notifier::faults reaches the task's subscriber
// @tc.precon: NA
// @tc.step: 1. Subscribe to a task
//           2. Call Notifier::faults
// @tc.expect: The subscriber receives a Fault event with the given reason
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_notifier_faults_delivered() {
    let client_manager = client_manager::init();
    let (_, rx) = client_manager.subscribe(4).await;
    let mut rx = rx.unwrap();

    Notifier::faults(4, &client_manager, Reason::IoError);

    let event = rx.recv().await.unwrap();
    assert!(matches!(
        event,
        SubscriberEvent::Fault(SubscribeType::FaultOccur, Reason::IoError)
    ));
}

// @tc.name: ut_notifier_waiting_delivered
// @tc.desc: Test Notifier::waiting reaches the task's subscriber
// @tc.precon: NA
// @tc.step: 1. Subscribe to a task
//           2. Call Notifier::waiting
// @tc.expect: The subscriber receives a Wait event with the given cause
// @tc.type: FUNC
// @tc.require: issueNumber
#[tokio::test]
async fn ut_notifier_waiting_delivered() {
    let client_manager = client_manager::init();
    let (_, rx) = client_manager.subscribe(5).await;
    let mut rx = rx.unwrap();

    Notifier::waiting(&client_manager, 5, WaitingCause::Network);

    let event = rx.recv().await.unwrap();
    assert!(matches!(event, SubscriberEvent::Wait(WaitingCause::Network)));
}

// @tc.name: ut_null_notification_dispatcher_ignores_publish
// @tc.desc: Test the default NotificationDispatcher is a no-op
// @tc.precon: NA
// @tc.step: 1. Construct a NullNotificationDispatcher
//           2. Call publish
// @tc.expect: No panic occurs
// @tc.type: FUNC
// @tc.require: issueNumber
#[test]
fn ut_null_notification_dispatcher_ignores_publish() {
    let dispatcher = NullNotificationDispatcher;
    dispatcher.publish(&test_notify_data(6, 0, vec![10]));
}
