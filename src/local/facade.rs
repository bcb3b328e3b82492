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

use crate::Severity;
use crate::local::LocalLog;

/// A local-log sink that forwards lines to the [`log`] crate.
///
/// Lines are emitted at the [`log::Level`] matching their severity, under the target `"logmux"`
/// unless configured otherwise. Lines with an unrecognized severity are emitted at `Info`.
///
/// Combined with a [`LogBridge`](crate::LogBridge) installed as the global logger, forwarded
/// lines reach the bridge again and are dropped there rather than dispatched a second time.
#[derive(Debug, Clone)]
pub struct LogFacade {
    target: String,
}

impl Default for LogFacade {
    fn default() -> Self {
        Self {
            target: "logmux".to_string(),
        }
    }
}

impl LogFacade {
    /// Set the target of the forwarded records.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }
}

impl LocalLog for LogFacade {
    fn write_line(&self, severity: Option<Severity>, line: &str) {
        let level = severity.map_or(log::Level::Info, log::Level::from);
        log::log!(target: self.target.as_str(), level, "{line}");
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
