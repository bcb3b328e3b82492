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

//! A system-log handle that writes to syslog.
//!
//! # Examples
//!
//! ```rust, no_run
//! use logmux::Destinations;
//! use logmux::Dispatcher;
//! use logmux::system::Syslog;
//!
//! let syslog = Syslog::unix("/dev/log").unwrap();
//! let dispatcher = Dispatcher::builder()
//!     .prefix("billing")
//!     .system_log(syslog)
//!     .build();
//!
//! dispatcher.notice(Destinations::SYSTEM, "invoice run finished").unwrap();
//! ```

use std::io;
use std::sync::Mutex;
use std::sync::MutexGuard;

use fasyslog::SDElement;
use fasyslog::sender::SyslogSender;

use crate::Severity;
use crate::system::SystemLog;

// re-exports to avoid version conflicts
mod exported {
    pub use fasyslog::Facility;
    pub use fasyslog::format::SyslogContext;
}
pub use exported::*;

/// The format of the syslog message.
#[derive(Debug, Copy, Clone)]
pub enum SyslogFormat {
    /// [RFC 3164] (BSD syslog Protocol)
    ///
    /// [RFC 3164]: https://datatracker.ietf.org/doc/html/rfc3164
    RFC3164,
    /// [RFC 5424] (The Syslog Protocol)
    ///
    /// [RFC 5424]: https://datatracker.ietf.org/doc/html/rfc5424
    RFC5424,
}

/// A system-log handle that sends messages to a syslog daemon.
#[derive(Debug)]
pub struct Syslog {
    sender: Mutex<SyslogSender>,
    format: SyslogFormat,
    context: SyslogContext,
}

impl Syslog {
    /// Create a new [`Syslog`] handle from a connected sender.
    pub fn new(sender: SyslogSender) -> Self {
        Self {
            sender: Mutex::new(sender),
            format: SyslogFormat::RFC3164,
            context: SyslogContext::default(),
        }
    }

    /// Create a new syslog handle that sends messages to the well-known TCP port (514).
    pub fn tcp_well_known() -> io::Result<Syslog> {
        fasyslog::sender::tcp_well_known().map(|sender| Self::new(SyslogSender::Tcp(sender)))
    }

    /// Create a new syslog handle that sends messages to the given TCP address.
    pub fn tcp<A: std::net::ToSocketAddrs>(addr: A) -> io::Result<Syslog> {
        fasyslog::sender::tcp(addr).map(|sender| Self::new(SyslogSender::Tcp(sender)))
    }

    /// Create a new syslog handle that sends messages to the well-known UDP port (514).
    pub fn udp_well_known() -> io::Result<Syslog> {
        fasyslog::sender::udp_well_known().map(|sender| Self::new(SyslogSender::Udp(sender)))
    }

    /// Create a new syslog handle that sends messages to the given UDP address.
    pub fn udp<L: std::net::ToSocketAddrs, R: std::net::ToSocketAddrs>(
        local: L,
        remote: R,
    ) -> io::Result<Syslog> {
        fasyslog::sender::udp(local, remote).map(|sender| Self::new(SyslogSender::Udp(sender)))
    }

    /// Create a new syslog handle that sends messages to the given Unix socket.
    ///
    /// Stream or datagram sockets are chosen automatically based on the path.
    #[cfg(unix)]
    pub fn unix(path: impl AsRef<std::path::Path>) -> io::Result<Syslog> {
        fasyslog::sender::unix(path).map(Self::new)
    }

    /// Set the format of the [`Syslog`] handle.
    ///
    /// Default to [`SyslogFormat::RFC3164`].
    pub fn with_format(mut self, format: SyslogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the context of the [`Syslog`] handle, e.g. its facility and app name.
    pub fn with_context(mut self, context: SyslogContext) -> Self {
        self.context = context;
        self
    }

    fn sender(&self) -> MutexGuard<'_, SyslogSender> {
        self.sender.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn send(&self, severity: Severity, message: &str) -> anyhow::Result<()> {
        let severity = native_severity(severity);
        let message = match self.format {
            SyslogFormat::RFC3164 => {
                format!("{}", self.context.format_rfc3164(severity, Some(message)))
            }
            SyslogFormat::RFC5424 => {
                const EMPTY_MSGID: Option<&str> = None;
                const EMPTY_STRUCTURED_DATA: Vec<SDElement> = Vec::new();

                format!(
                    "{}",
                    self.context.format_rfc5424(
                        severity,
                        EMPTY_MSGID,
                        EMPTY_STRUCTURED_DATA,
                        Some(message)
                    )
                )
            }
        };
        self.sender().send_formatted(message.as_bytes())?;
        Ok(())
    }
}

/// Map a [`Severity`] onto the syslog severity of the same name.
pub fn native_severity(severity: Severity) -> fasyslog::Severity {
    match severity {
        Severity::Debug => fasyslog::Severity::DEBUG,
        Severity::Info => fasyslog::Severity::INFORMATIONAL,
        Severity::Notice => fasyslog::Severity::NOTICE,
        Severity::Warning => fasyslog::Severity::WARNING,
        Severity::Err => fasyslog::Severity::ERROR,
        Severity::Crit => fasyslog::Severity::CRITICAL,
        Severity::Alert => fasyslog::Severity::ALERT,
        Severity::Emerg => fasyslog::Severity::EMERGENCY,
    }
}

impl SystemLog for Syslog {
    fn debug(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Debug, message)
    }

    fn info(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Info, message)
    }

    fn notice(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Notice, message)
    }

    fn warning(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Warning, message)
    }

    fn err(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Err, message)
    }

    fn crit(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Crit, message)
    }

    fn alert(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Alert, message)
    }

    fn emerg(&self, message: &str) -> anyhow::Result<()> {
        self.send(Severity::Emerg, message)
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.sender().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn udp_sender_delivers_rfc3164_frames() {
        let server = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let syslog = Syslog::udp("127.0.0.1:0", server.local_addr().unwrap()).unwrap();

        syslog.warning("disk almost full").unwrap();

        let mut buf = [0u8; 1024];
        let n = server.recv(&mut buf).unwrap();
        let frame = String::from_utf8_lossy(&buf[..n]);
        // facility user (1) * 8 + warning (4)
        assert!(frame.starts_with("<12>"), "{frame}");
        assert!(frame.contains("disk almost full"), "{frame}");
    }

    #[test]
    fn udp_sender_delivers_rfc5424_frames() {
        let server = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let syslog = Syslog::udp("127.0.0.1:0", server.local_addr().unwrap())
            .unwrap()
            .with_format(SyslogFormat::RFC5424);

        syslog.crit("replica lost").unwrap();
        syslog.flush().unwrap();

        let mut buf = [0u8; 1024];
        let n = server.recv(&mut buf).unwrap();
        let frame = String::from_utf8_lossy(&buf[..n]);
        // facility user (1) * 8 + critical (2), then protocol version 1
        assert!(frame.starts_with("<10>1 "), "{frame}");
        assert!(frame.contains("replica lost"), "{frame}");
    }
}
