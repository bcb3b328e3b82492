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
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Severity;
use crate::local::LocalLog;

/// A local-log sink that keeps lines in memory and echoes them to a test harness.
///
/// Clones share the same buffer, so a clone can be handed to a dispatcher while the original is
/// kept for assertions. Echoed lines are captured by `cargo test` unless `--nocapture` or
/// `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use logmux::Destinations;
/// use logmux::Dispatcher;
/// use logmux::local::Testing;
///
/// let testing = Testing::default();
/// let dispatcher = Dispatcher::builder()
///     .prefix("test")
///     .local_log(testing.clone())
///     .enable_local_log(true)
///     .build();
///
/// dispatcher.info(Destinations::LOCAL, "hello").unwrap();
/// assert_eq!(testing.lines(), ["[test] [INFO] hello"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Testing {
    records: Arc<Mutex<Vec<(Option<Severity>, String)>>>,
}

impl Testing {
    /// Return every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Return every line written so far, together with its severity.
    pub fn records(&self) -> MutexGuard<'_, Vec<(Option<Severity>, String)>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drop every line written so far.
    pub fn clear(&self) {
        self.records().clear();
    }
}

impl LocalLog for Testing {
    fn write_line(&self, severity: Option<Severity>, line: &str) {
        eprintln!("{line}");
        self.records().push((severity, line.to_string()));
    }
}
