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

//! The eight-level severity scale shared by every backend.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The severity of a log message, ascending in importance.
///
/// The scale mirrors the syslog priorities of [RFC 5424], with `Debug` being the least and
/// `Emerg` the most important.
///
/// [RFC 5424]: https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.1
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    /// Debug-level messages.
    Debug = 0,
    /// Informational messages.
    Info = 1,
    /// Normal but significant conditions.
    Notice = 2,
    /// Warning conditions.
    Warning = 3,
    /// Error conditions.
    Err = 4,
    /// Critical conditions.
    Crit = 5,
    /// Action must be taken immediately.
    Alert = 6,
    /// System is unusable.
    Emerg = 7,
}

// Indexed by the syslog numeric priority, EMERG (0) first.
const TOKENS: [&str; 8] = [
    "EMERG", "ALERT", "CRIT", "ERR", "WARNING", "NOTICE", "INFO", "DEBUG",
];

/// Look up the uppercase token of a raw syslog priority.
///
/// Returns an empty string if the priority is not one of the eight known values.
///
/// # Examples
///
/// ```
/// assert_eq!(logmux::severity::token(4), "WARNING");
/// assert_eq!(logmux::severity::token(42), "");
/// ```
pub fn token(priority: u8) -> &'static str {
    TOKENS.get(priority as usize).copied().unwrap_or_default()
}

impl Severity {
    /// All severities, from the least to the most important.
    pub const ALL: [Severity; 8] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Err,
        Severity::Crit,
        Severity::Alert,
        Severity::Emerg,
    ];

    /// The syslog numeric priority, `0` for `Emerg` up to `7` for `Debug`.
    pub fn priority(self) -> u8 {
        7 - self as u8
    }

    /// Convert a syslog numeric priority back into a [`Severity`].
    pub fn from_priority(priority: u8) -> Option<Severity> {
        match priority {
            0 => Some(Severity::Emerg),
            1 => Some(Severity::Alert),
            2 => Some(Severity::Crit),
            3 => Some(Severity::Err),
            4 => Some(Severity::Warning),
            5 => Some(Severity::Notice),
            6 => Some(Severity::Info),
            7 => Some(Severity::Debug),
            _ => None,
        }
    }

    /// The uppercase token of this severity, e.g. `"WARNING"`.
    pub fn as_str(self) -> &'static str {
        token(self.priority())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let severity = match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Severity::Debug,
            "INFO" => Severity::Info,
            "NOTICE" => Severity::Notice,
            "WARNING" | "WARN" => Severity::Warning,
            "ERR" | "ERROR" => Severity::Err,
            "CRIT" | "CRITICAL" => Severity::Crit,
            "ALERT" => Severity::Alert,
            "EMERG" | "EMERGENCY" => Severity::Emerg,
            _ => return Err(Error::new("unknown severity").with_context("input", s)),
        };
        Ok(severity)
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Err,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Debug,
        }
    }
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => log::Level::Debug,
            Severity::Info | Severity::Notice => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Err | Severity::Crit | Severity::Alert | Severity::Emerg => {
                log::Level::Error
            }
        }
    }
}
