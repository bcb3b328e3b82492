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

use std::sync::Arc;
use std::thread;

use logmux::Destinations;
use logmux::Dispatcher;
use logmux::Severity;
use logmux::Unattached;
use logmux::local;
use logmux::queue::ChannelPublisher;

fn main() {
    let (publisher, deliveries) = ChannelPublisher::bounded(1024);

    // stands in for the thread that owns the broker connection
    let forwarder = thread::spawn(move || {
        for delivery in deliveries {
            println!(
                "publish exchange={} key={} body={}",
                delivery.exchange,
                delivery.routing_key,
                String::from_utf8_lossy(&delivery.publishing.body)
            );
        }
    });

    let dispatcher = Dispatcher::builder()
        .prefix("fanout")
        .local_log(local::Stdout::default())
        .enable_local_log(true)
        .queue(Arc::new(publisher))
        .unattached(Unattached::Warn)
        .build();

    dispatcher.info(Destinations::LOCAL, "local only").unwrap();
    dispatcher
        .warning_fmt(Destinations::ALL, format_args!("{} of {} disks full", 3, 4))
        .unwrap();
    logmux::dispatch!(
        dispatcher,
        Destinations::QUEUE,
        Severity::Emerg,
        "shutting down in {}s",
        10
    )
    .unwrap();

    // dropping the dispatcher drops the last sender and stops the forwarder
    drop(dispatcher);
    forwarder.join().unwrap();
}
