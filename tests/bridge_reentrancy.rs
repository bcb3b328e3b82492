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

use logmux::Destinations;
use logmux::Dispatcher;
use logmux::LogBridge;
use logmux::local::LogFacade;

use self::common::RecordingPublisher;

// one test per binary: the global logger can only be set once
#[test]
fn facade_lines_do_not_reenter_the_global_bridge() {
    let publisher = Arc::new(RecordingPublisher::default());
    let dispatcher = Dispatcher::builder()
        .prefix("loop")
        .local_log(LogFacade::default())
        .enable_local_log(true)
        .queue(publisher.clone())
        .build();
    LogBridge::new(dispatcher, Destinations::ALL).apply().unwrap();

    log::warn!("first {}", 1);
    log::error!("second");
    log::logger().flush();

    let keys: Vec<_> = publisher
        .published()
        .into_iter()
        .map(|published| (published.routing_key, published.msg.body))
        .collect();
    assert_eq!(
        keys,
        [
            ("WARNING".to_string(), b"first 1".to_vec()),
            ("ERR".to_string(), b"second".to_vec()),
        ]
    );

    // the guard is released after each record
    std::thread::spawn(|| log::info!("from another thread"))
        .join()
        .unwrap();
    log::info!("third");
    assert_eq!(publisher.published().len(), 4);
}
