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

//! Sinks for the system logging facility.

use std::fmt;

use crate::Severity;

#[cfg(feature = "syslog")]
pub mod syslog;

#[cfg(feature = "syslog")]
pub use self::syslog::Syslog;

/// A handle to a system logging facility, with one entry point per severity.
pub trait SystemLog: fmt::Debug + Send + Sync + 'static {
    /// Log a message with severity `DEBUG`.
    fn debug(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `INFO`.
    fn info(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `NOTICE`.
    fn notice(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `WARNING`.
    fn warning(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `ERR`.
    fn err(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `CRIT`.
    fn crit(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `ALERT`.
    fn alert(&self, message: &str) -> anyhow::Result<()>;
    /// Log a message with severity `EMERG`.
    fn emerg(&self, message: &str) -> anyhow::Result<()>;

    /// Flush any buffered messages.
    ///
    /// Default to a no-op.
    fn flush(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<T: SystemLog> From<T> for Box<dyn SystemLog> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Invoke the entry point of `handle` that matches `severity`.
pub(crate) fn log(handle: &dyn SystemLog, severity: Severity, message: &str) -> anyhow::Result<()> {
    match severity {
        Severity::Debug => handle.debug(message),
        Severity::Info => handle.info(message),
        Severity::Notice => handle.notice(message),
        Severity::Warning => handle.warning(message),
        Severity::Err => handle.err(message),
        Severity::Crit => handle.crit(message),
        Severity::Alert => handle.alert(message),
        Severity::Emerg => handle.emerg(message),
    }
}
