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

use logmux::Destinations;
use logmux::Dispatcher;
use logmux::LogBridge;
use logmux::system::Syslog;

fn main() {
    let syslog = Syslog::tcp_well_known().unwrap();
    let dispatcher = Dispatcher::builder()
        .prefix("syslog-demo")
        .enable_local_log(true)
        .system_log(syslog)
        .build();

    LogBridge::new(dispatcher, Destinations::LOCAL | Destinations::SYSTEM)
        .apply()
        .unwrap();

    log::error!("Hello syslog error!");
    log::warn!("Hello syslog warn!");
    log::info!("Hello syslog info!");
    log::debug!("Hello syslog debug!");
    log::trace!("Hello syslog trace!");
}
