// Copyright 2024 FastLabs Developers
//
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

mod common;

use std::sync::Arc;

use logmux::Backend;
use logmux::Destinations;
use logmux::Dispatcher;
use logmux::Severity;
use logmux::Unattached;
use logmux::local::Testing;
use logmux::queue::DeliveryMode;
use rand::Rng;
use rand::distr::Alphanumeric;

use self::common::RecordingPublisher;
use self::common::RecordingSystemLog;
use self::common::RecordingTrap;

fn random_message() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(1..64);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[test]
fn local_line_carries_prefix_token_and_message() {
    let testing = Testing::default();
    let dispatcher = Dispatcher::builder()
        .prefix("billing")
        .local_log(testing.clone())
        .enable_local_log(true)
        .build();

    for severity in Severity::ALL {
        let message = format!("{} happened: 100% [done]", severity.as_str().to_lowercase());
        dispatcher
            .log(Destinations::LOCAL, severity, &message)
            .unwrap();

        let records = testing.records().clone();
        let (recorded, line) = records.last().unwrap();
        assert_eq!(*recorded, Some(severity));
        assert_eq!(*line, format!("[billing] [{}] {message}", severity.as_str()));
    }
    assert_eq!(testing.lines().len(), 8);
}

#[test]
fn only_selected_and_available_backends_are_invoked() {
    for available in 0..=7u8 {
        let available = Destinations::from_bits(available).unwrap();

        for selected in 0..=7u8 {
            let selected = Destinations::from_bits(selected).unwrap();
            let testing = Testing::default();
            let system = RecordingSystemLog::default();
            let publisher = Arc::new(RecordingPublisher::default());

            let mut builder = Dispatcher::builder()
                .local_log(testing.clone())
                .enable_local_log(available.contains(Destinations::LOCAL));
            if available.contains(Destinations::SYSTEM) {
                builder = builder.system_log(system.clone());
            }
            if available.contains(Destinations::QUEUE) {
                builder = builder.queue(publisher.clone());
            }
            let dispatcher = builder.build();
            assert_eq!(dispatcher.available(), available);

            let message = random_message();
            dispatcher
                .log(selected, Severity::Notice, &message)
                .unwrap();

            let expected = selected & available;
            let local_calls = testing.lines().len();
            let system_calls = system.calls().len();
            let queue_calls = publisher.published().len();
            assert_eq!(
                local_calls,
                usize::from(expected.contains(Destinations::LOCAL)),
                "selected {selected:?}, available {available:?}"
            );
            assert_eq!(
                system_calls,
                usize::from(expected.contains(Destinations::SYSTEM)),
                "selected {selected:?}, available {available:?}"
            );
            assert_eq!(
                queue_calls,
                usize::from(expected.contains(Destinations::QUEUE)),
                "selected {selected:?}, available {available:?}"
            );
            if system_calls == 1 {
                assert_eq!(system.calls()[0], ("notice", message.clone()));
            }
        }
    }
}

#[test]
fn empty_destinations_invoke_nothing() {
    let testing = Testing::default();
    let system = RecordingSystemLog::failing("unreachable");
    let publisher = Arc::new(RecordingPublisher::failing("unreachable"));
    let dispatcher = Dispatcher::builder()
        .local_log(testing.clone())
        .enable_local_log(true)
        .system_log(system.clone())
        .queue(publisher.clone())
        .unattached(Unattached::Fail)
        .build();

    for severity in Severity::ALL {
        dispatcher
            .log(Destinations::EMPTY, severity, "nothing")
            .unwrap();
    }
    assert!(testing.lines().is_empty());
    assert!(system.calls().is_empty());
    assert!(publisher.published().is_empty());
}

#[test]
fn system_failure_is_returned() {
    // queue unattached
    let dispatcher = Dispatcher::builder()
        .system_log(RecordingSystemLog::failing("syslog is down"))
        .build();
    let err = dispatcher
        .err(Destinations::ALL, "payment failed")
        .unwrap_err();
    assert_eq!(err.failures().len(), 1);
    assert_eq!(
        err.failed(Backend::System).unwrap().to_string(),
        "syslog is down"
    );

    // queue succeeds
    let publisher = Arc::new(RecordingPublisher::default());
    let dispatcher = Dispatcher::builder()
        .system_log(RecordingSystemLog::failing("syslog is down"))
        .queue(publisher.clone())
        .build();
    let err = dispatcher
        .err(Destinations::SYSTEM | Destinations::QUEUE, "payment failed")
        .unwrap_err();
    let (backend, last) = err.last().unwrap();
    assert_eq!(backend, Backend::System);
    assert_eq!(last.to_string(), "syslog is down");
    assert!(err.failed(Backend::Queue).is_none());
    assert_eq!(publisher.published().len(), 1);
}

#[test]
fn every_failure_is_collected() {
    let testing = Testing::default();
    let dispatcher = Dispatcher::builder()
        .prefix("p")
        .local_log(testing.clone())
        .enable_local_log(true)
        .system_log(RecordingSystemLog::failing("syslog is down"))
        .queue(Arc::new(RecordingPublisher::failing("broker is gone")))
        .build();

    let err = dispatcher
        .crit(Destinations::ALL, "cannot reach database")
        .unwrap_err();

    let failures: Vec<_> = err
        .failures()
        .map(|(backend, err)| (backend, err.to_string()))
        .collect();
    assert_eq!(
        failures,
        [
            (Backend::System, "syslog is down".to_string()),
            (Backend::Queue, "broker is gone".to_string()),
        ]
    );
    assert_eq!(err.last().unwrap().0, Backend::Queue);
    assert!(err.to_string().contains("severity: CRIT"));
    // the local log is attempted regardless
    assert_eq!(testing.lines(), ["[p] [CRIT] cannot reach database"]);
}

#[test]
fn debug_envelope_is_plain_transient_text() {
    let publisher = Arc::new(RecordingPublisher::default());
    let dispatcher = Dispatcher::builder().queue(publisher.clone()).build();

    dispatcher
        .debug(Destinations::QUEUE, "cache miss for key=42 ✓")
        .unwrap();

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    let published = &published[0];
    assert_eq!(published.exchange, "logs");
    assert_eq!(published.routing_key, "DEBUG");
    assert!(!published.mandatory);
    assert!(!published.immediate);
    assert!(published.msg.headers.is_empty());
    assert_eq!(published.msg.content_type, "text/plain");
    assert_eq!(published.msg.content_encoding, "");
    assert_eq!(published.msg.delivery_mode, DeliveryMode::Transient);
    assert_eq!(published.msg.priority, 0);
    assert_eq!(published.msg.body, "cache miss for key=42 ✓".as_bytes());
}

#[test]
fn system_entry_point_matches_severity() {
    let system = RecordingSystemLog::default();
    let dispatcher = Dispatcher::builder().system_log(system.clone()).build();

    for severity in Severity::ALL {
        dispatcher
            .log(Destinations::SYSTEM, severity, severity.as_str())
            .unwrap();
    }

    let names: Vec<_> = system.calls().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        ["debug", "info", "notice", "warning", "err", "crit", "alert", "emerg"]
    );
}

#[test]
fn formatted_entry_points_match_plain_ones() {
    let plain = Testing::default();
    let formatted = Testing::default();
    let plain_dispatcher = Dispatcher::builder()
        .prefix("fmt")
        .local_log(plain.clone())
        .enable_local_log(true)
        .build();
    let formatted_dispatcher = Dispatcher::builder()
        .prefix("fmt")
        .local_log(formatted.clone())
        .enable_local_log(true)
        .build();

    let user = "alice";
    let ratio = 0.5f64;
    let dest = Destinations::LOCAL;

    plain_dispatcher.debug(dest, "no arguments").unwrap();
    formatted_dispatcher.debug_fmt(dest, format_args!("no arguments")).unwrap();

    plain_dispatcher.info(dest, "alice signed in").unwrap();
    formatted_dispatcher.info_fmt(dest, format_args!("{user} signed in")).unwrap();

    plain_dispatcher.notice(dest, "quota 50.00%").unwrap();
    formatted_dispatcher
        .notice_fmt(dest, format_args!("quota {:.2}%", ratio * 100.0))
        .unwrap();

    plain_dispatcher.warning(dest, "retry 3/5").unwrap();
    formatted_dispatcher
        .warning_fmt(dest, format_args!("retry {}/{}", 3, 5))
        .unwrap();

    plain_dispatcher.err(dest, "code 0x1f").unwrap();
    formatted_dispatcher.err_fmt(dest, format_args!("code {:#x}", 31)).unwrap();

    plain_dispatcher.crit(dest, "[  42]").unwrap();
    formatted_dispatcher.crit_fmt(dest, format_args!("[{:>4}]", 42)).unwrap();

    plain_dispatcher.alert(dest, "\"quoted\"").unwrap();
    formatted_dispatcher.alert_fmt(dest, format_args!("{:?}", "quoted")).unwrap();

    plain_dispatcher.emerg(dest, "{braces}").unwrap();
    logmux::dispatch!(formatted_dispatcher, dest, Severity::Emerg, "{{braces}}").unwrap();

    assert_eq!(plain.lines(), formatted.lines());
    assert_eq!(plain.lines().len(), 8);
}

#[test]
fn unrecognized_priority_degrades_to_empty_token() {
    let testing = Testing::default();
    let system = RecordingSystemLog::default();
    let publisher = Arc::new(RecordingPublisher::default());
    let dispatcher = Dispatcher::builder()
        .prefix("raw")
        .local_log(testing.clone())
        .enable_local_log(true)
        .system_log(system.clone())
        .queue(publisher.clone())
        .build();

    dispatcher
        .log_priority(Destinations::ALL, 9, "odd priority")
        .unwrap();

    assert_eq!(*testing.records(), [(None, "[raw] [] odd priority".to_string())]);
    assert!(system.calls().is_empty());
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].routing_key, "");

    // known priorities behave like their severity
    dispatcher
        .log_priority(Destinations::ALL, 4, "disk at 91%")
        .unwrap();
    assert_eq!(testing.lines()[1], "[raw] [WARNING] disk at 91%");
    assert_eq!(system.calls(), [("warning", "disk at 91%".to_string())]);
}

#[test]
fn unattached_backends_can_fail_the_call() {
    let dispatcher = Dispatcher::builder()
        .system_log(RecordingSystemLog::default())
        .unattached(Unattached::Fail)
        .build();

    let err = dispatcher
        .info(Destinations::ALL, "partially configured")
        .unwrap_err();
    let backends: Vec<_> = err.failures().map(|(backend, _)| backend).collect();
    assert_eq!(backends, [Backend::Local, Backend::Queue]);

    dispatcher.info(Destinations::SYSTEM, "fine").unwrap();
}

#[test]
fn unattached_backends_warn_once() {
    let trap = RecordingTrap::default();
    let dispatcher = Dispatcher::builder()
        .unattached(Unattached::Warn)
        .trap(trap.clone())
        .build();

    for _ in 0..3 {
        dispatcher
            .info(Destinations::SYSTEM | Destinations::QUEUE, "nobody listens")
            .unwrap();
    }

    let errors = trap.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("backend: system"), "{}", errors[0]);
    assert!(errors[1].contains("backend: queue"), "{}", errors[1]);
}

#[test]
fn dispatcher_is_shared_across_threads() {
    let testing = Testing::default();
    let publisher = Arc::new(RecordingPublisher::default());
    let dispatcher = Dispatcher::builder()
        .local_log(testing.clone())
        .enable_local_log(true)
        .queue(publisher.clone())
        .build();

    std::thread::scope(|s| {
        for i in 0..4 {
            let dispatcher = &dispatcher;
            s.spawn(move || {
                for j in 0..25 {
                    dispatcher
                        .info_fmt(Destinations::ALL, format_args!("worker {i} item {j}"))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(testing.lines().len(), 100);
    assert_eq!(publisher.published().len(), 100);
}

#[test]
fn flush_reports_system_log_failure() {
    let testing = Testing::default();
    let dispatcher = Dispatcher::builder()
        .local_log(testing.clone())
        .enable_local_log(true)
        .system_log(RecordingSystemLog::failing_flush("cannot flush socket"))
        .build();

    dispatcher.info(Destinations::ALL, "buffered").unwrap();
    let err = dispatcher.flush().unwrap_err();

    assert_eq!(err.message(), "failed to flush log");
    let failures: Vec<_> = err
        .failures()
        .map(|(backend, err)| (backend, err.to_string()))
        .collect();
    assert_eq!(
        failures,
        [(Backend::System, "cannot flush socket".to_string())]
    );

    let dispatcher = Dispatcher::builder()
        .system_log(RecordingSystemLog::default())
        .build();
    dispatcher.flush().unwrap();
    Dispatcher::builder().build().flush().unwrap();
}
