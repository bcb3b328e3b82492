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

use std::fmt;
use std::io::Write;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Severity;
use crate::local::LocalLog;
use crate::local::Timestamp;

/// A local-log sink that writes lines to any [`Write`] implementation, such as a file.
///
/// Write errors are swallowed: the local log never fails a dispatch.
///
/// # Examples
///
/// ```
/// use logmux::local::Writer;
///
/// let sink = Writer::new(Vec::<u8>::new());
/// ```
pub struct Writer<W: Write + Send + 'static> {
    writer: Mutex<W>,
    timestamp: Option<Timestamp>,
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Create a new [`Writer`] sink that writes bare lines.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamp: None,
        }
    }

    /// Head each line with the local date and time.
    pub fn with_timestamp(mut self) -> Self {
        self.timestamp = Some(Timestamp::default());
        self
    }

    fn writer(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send + 'static> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> LocalLog for Writer<W> {
    fn write_line(&self, _: Option<Severity>, line: &str) {
        let bytes = match self.timestamp {
            Some(ref timestamp) => format!("{} {line}\n", timestamp.now()),
            None => format!("{line}\n"),
        };
        let _ = self.writer().write_all(bytes.as_bytes());
    }

    fn flush(&self) {
        let _ = self.writer().flush();
    }
}

impl<W: Write + Send + 'static> Drop for Writer<W> {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}
