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

//! Sinks for the local text log.
//!
//! The local log is best-effort: a sink never reports failures back to the dispatcher.

use std::fmt;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Severity;

mod facade;
mod stdio;
mod testing;
mod writer;

pub use self::facade::LogFacade;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;
pub use self::writer::Writer;

/// A sink that consumes formatted local-log lines.
pub trait LocalLog: fmt::Debug + Send + Sync + 'static {
    /// Write one line, already formatted as `[prefix] [SEVERITY] message`.
    ///
    /// `severity` is `None` when the line was dispatched with an unrecognized priority.
    fn write_line(&self, severity: Option<Severity>, line: &str);

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) {}
}

impl<T: LocalLog> From<T> for Box<dyn LocalLog> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The date and time header put in front of a local-log line.
#[derive(Debug, Default, Clone)]
pub(crate) struct Timestamp {
    tz: Option<TimeZone>,
}

impl Timestamp {
    pub(crate) fn with_time_zone(tz: TimeZone) -> Self {
        Self { tz: Some(tz) }
    }

    pub(crate) fn now(&self) -> String {
        let now = match self.tz.clone() {
            Some(tz) => Zoned::now().with_time_zone(tz),
            None => Zoned::now(),
        };
        now.strftime("%Y/%m/%d %H:%M:%S").to_string()
    }
}
