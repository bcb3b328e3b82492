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

use std::io::Write;

use jiff::tz::TimeZone;

use crate::Severity;
use crate::local::LocalLog;
use crate::local::Timestamp;

/// A local-log sink that prints lines to stdout.
///
/// Each line is headed by the local date and time, e.g.:
///
/// ```text
/// 2024/08/11 22:44:57 [billing] [WARNING] invoice 42 is overdue
/// ```
#[derive(Debug, Default)]
pub struct Stdout {
    header: Header,
}

impl Stdout {
    /// Use the given timezone for the line header instead of the system timezone.
    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.header.timestamp = Some(Timestamp::with_time_zone(tz));
        self
    }

    /// Print lines without the date and time header.
    pub fn without_timestamp(mut self) -> Self {
        self.header.plain = true;
        self
    }
}

impl LocalLog for Stdout {
    fn write_line(&self, _: Option<Severity>, line: &str) {
        let bytes = self.header.render(line);
        let _ = std::io::stdout().write_all(bytes.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// A local-log sink that prints lines to stderr.
///
/// This is the default local-log sink. See [`Stdout`] for the line format.
#[derive(Debug, Default)]
pub struct Stderr {
    header: Header,
}

impl Stderr {
    /// Use the given timezone for the line header instead of the system timezone.
    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.header.timestamp = Some(Timestamp::with_time_zone(tz));
        self
    }

    /// Print lines without the date and time header.
    pub fn without_timestamp(mut self) -> Self {
        self.header.plain = true;
        self
    }
}

impl LocalLog for Stderr {
    fn write_line(&self, _: Option<Severity>, line: &str) {
        let bytes = self.header.render(line);
        let _ = std::io::stderr().write_all(bytes.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[derive(Debug, Default)]
struct Header {
    timestamp: Option<Timestamp>,
    plain: bool,
}

impl Header {
    fn render(&self, line: &str) -> String {
        if self.plain {
            return format!("{line}\n");
        }
        let time = match self.timestamp {
            Some(ref timestamp) => timestamp.now(),
            None => Timestamp::default().now(),
        };
        format!("{time} {line}\n")
    }
}
