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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::run_count::{Client, RunCountEvent};
    use crate::error::ErrorCode;
    use ylong_runtime::sync::oneshot::{self, Sender};

    // Mock RemoteObj for testing
    #[cfg(feature = "oh")]
    struct MockRemoteObj;

    #[cfg(feature = "oh")]
    impl MockRemoteObj {
        fn new() -> Self {
            Self
        }
    }

    // @tc.name: ut_run_count_event_unsubscribe_creation
    // @tc.desc: Test creation of Unsubscribe variant of RunCountEvent
    // @tc.precon: NA
    // @tc.step: 1. Create oneshot channel
    //           2. Create Unsubscribe event with pid and sender
    // @tc.expect: Successfully creates Unsubscribe event
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 0
    #[test]
    fn ut_run_count_event_unsubscribe_creation_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(12345, tx);

        match event {
            RunCountEvent::Unsubscribe(pid, _) => assert_eq!(pid, 12345),
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_unsubscribe_zero_pid
    // @tc.desc: Test Unsubscribe event with zero PID
    // @tc.precon: NA
    // @tc.step: 1. Create oneshot channel
    //           2. Create Unsubscribe event with pid=0
    // @tc.expect: Successfully creates Unsubscribe event with pid=0
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_unsubscribe_zero_pid_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(0, tx);

        match event {
            RunCountEvent::Unsubscribe(pid, _) => assert_eq!(pid, 0),
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_unsubscribe_max_pid
    // @tc.desc: Test Unsubscribe event with maximum u64 PID
    // @tc.precon: NA
    // @tc.step: 1. Create oneshot channel
    //           2. Create Unsubscribe event with max u64 pid
    // @tc.expect: Successfully creates Unsubscribe event with max pid
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_unsubscribe_max_pid_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(u64::MAX, tx);

        match event {
            RunCountEvent::Unsubscribe(pid, _) => assert_eq!(pid, u64::MAX),
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_unsubscribe_sender_validity
    // @tc.desc: Test that Unsubscribe event contains valid sender
    // @tc.precon: NA
    // @tc.step: 1. Create oneshot channel
    //           2. Create Unsubscribe event
    //           3. Verify sender can send message
    // @tc.expect: Sender successfully sends message
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 1
    #[test]
    fn ut_run_count_event_unsubscribe_sender_validity_001() {
        let (tx, rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(123, tx);

        match event {
            RunCountEvent::Unsubscribe(_, sender) => {
                let _ = sender.send(ErrorCode::ErrOk);
                assert_eq!(rx.try_recv(), Ok(ErrorCode::ErrOk));
            },
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_size_check
    // @tc.desc: Test size of RunCountEvent variants
    // @tc.precon: NA
    // @tc.step: 1. Create different event variants
    //           2. Check memory layout
    // @tc.expect: Events have reasonable memory footprint
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 3
    #[test]
    fn ut_run_count_event_size_check_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let unsubscribe_event = RunCountEvent::Unsubscribe(12345, tx);

        // Basic size check - should not be unreasonably large
        assert!(std::mem::size_of_val(&unsubscribe_event) > 0);
        assert!(std::mem::size_of_val(&unsubscribe_event) < 1024);
    }

    // @tc.name: ut_run_count_event_clone_behavior
    // @tc.desc: Test clone behavior of RunCountEvent
    // @tc.precon: NA
    // @tc.step: 1. Create event
    //           2. Attempt to clone/move
    // @tc.expect: Proper move semantics for non-Copy types
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 3
    #[test]
    fn ut_run_count_event_clone_behavior_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(12345, tx);

        // RunCountEvent should implement proper move semantics
        let event2 = event;
        match event2 {
            RunCountEvent::Unsubscribe(pid, _) => assert_eq!(pid, 12345),
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_error_code_variants
    // @tc.desc: Test all ErrorCode variants in event context
    // @tc.precon: NA
    // @tc.step: 1. Create events with different ErrorCode values
    //           2. Verify ErrorCode variants work
    // @tc.expect: All ErrorCode variants can be used
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_error_code_variants_001() {
        let (tx1, _rx1) = oneshot::channel::<ErrorCode>();
        let (tx2, _rx2) = oneshot::channel::<ErrorCode>();

        let event1 = RunCountEvent::Unsubscribe(1, tx1);
        let event2 = RunCountEvent::Unsubscribe(2, tx2);

        // Verify we can create events with different ErrorCode senders
        match (event1, event2) {
            (RunCountEvent::Unsubscribe(pid1, _), RunCountEvent::Unsubscribe(pid2, _)) => {
                assert_ne!(pid1, pid2);
            },
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variants"),
        }
    }

    // @tc.name: ut_run_count_event_thread_safety
    // @tc.desc: Test thread safety of event creation and handling
    // @tc.precon: NA
    // @tc.step: 1. Create multiple threads
    //           2. Each thread creates events
    //           3. Verify no race conditions
    // @tc.expect: All threads complete successfully
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 3
    #[test]
    fn ut_run_count_event_thread_safety_001() {
        use std::thread;
        use std::sync::Arc;

        let mut handles = vec![];

        for i in 0..10 {
            let handle = thread::spawn(move || {
                let (tx, _rx) = oneshot::channel::<ErrorCode>();
                let event = RunCountEvent::Unsubscribe(i as u64, tx);

                match event {
                    RunCountEvent::Unsubscribe(pid, _) => {
                        assert_eq!(pid, i as u64);
                    },
                    #[cfg(feature = "oh")]
                    _ => panic!("Expected Unsubscribe variant"),
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    // @tc.name: ut_run_count_event_sender_drop
    // @tc.desc: Test behavior when sender is dropped
    // @tc.precon: NA
    // @tc.step: 1. Create event with sender
    //           2. Drop sender
    //           3. Verify no panic
    // @tc.expect: Clean drop without issues
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_sender_drop_001() {
        let (tx, _rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(12345, tx);

        // Explicitly drop the event
        drop(event);

        // Should complete without panic
    }

    // @tc.name: ut_run_count_event_multiple_events
    // @tc.desc: Test handling of multiple event instances
    // @tc.precon: NA
    // @tc.step: 1. Create multiple event instances
    //           2. Verify each has correct data
    // @tc.expect: All events maintain correct state
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_multiple_events_001() {
        let mut events = Vec::new();

        for i in 0..100 {
            let (tx, _rx) = oneshot::channel::<ErrorCode>();
            events.push(RunCountEvent::Unsubscribe(i as u64, tx));
        }

        for (i, event) in events.into_iter().enumerate() {
            match event {
                RunCountEvent::Unsubscribe(pid, _) => {
                    assert_eq!(pid, i as u64);
                },
                #[cfg(feature = "oh")]
                _ => panic!("Expected Unsubscribe variant"),
            }
        }
    }

    // @tc.name: ut_run_count_event_error_handling
    // @tc.desc: Test error handling in event context
    // @tc.precon: NA
    // @tc.step: 1. Create events with different error scenarios
    //           2. Verify proper error propagation
    // @tc.expect: Errors handled gracefully
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 2
    #[test]
    fn ut_run_count_event_error_handling_001() {
        let (tx, rx) = oneshot::channel::<ErrorCode>();
        let event = RunCountEvent::Unsubscribe(12345, tx);

        match event {
            RunCountEvent::Unsubscribe(_, sender) => {
                let _ = sender.send(ErrorCode::ErrOk);
                assert_eq!(rx.try_recv(), Ok(ErrorCode::ErrOk));
            },
            #[cfg(feature = "oh")]
            _ => panic!("Expected Unsubscribe variant"),
        }
    }

    // @tc.name: ut_run_count_event_boundary_values
    // @tc.desc: Test event creation with boundary values
    // @tc.precon: NA
    // @tc.step: 1. Test with PID=1
    //           2. Test with large PID values
    //           3. Test edge cases
    // @tc.expect: All boundary values handled correctly
    // @tc.type: FUNC
    // @tc.require: issue#ICODZX
    // @tc.level: Level 3
    #[test]
    fn ut_run_count_event_boundary_values_001() {
        let boundary_pids = [1, 1000, 65536, 1000000, u64::MAX - 1];

        for &pid in &boundary_pids {
            let (tx, _rx) = oneshot::channel::<ErrorCode>();
            let event = RunCountEvent::Unsubscribe(pid, tx);

            match event {
                RunCountEvent::Unsubscribe(event_pid, _) => {
                    assert_eq!(event_pid, pid);
                },
                #[cfg(feature = "oh")]
                _ => panic!("Expected Unsubscribe variant"),
            }
        }
    }
}
