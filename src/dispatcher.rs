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
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::Backend;
use crate::Destinations;
use crate::Error;
use crate::Severity;
use crate::local;
use crate::local::LocalLog;
use crate::queue;
use crate::queue::Publish;
use crate::system;
use crate::system::SystemLog;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// What a dispatch does when it selects a backend that is not attached or not enabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Unattached {
    /// Skip the backend silently.
    #[default]
    Ignore,
    /// Skip the backend and report it to the trap, once per backend.
    Warn,
    /// Skip the backend and report it as a failure of the call.
    Fail,
}

/// A builder for configuring a [`Dispatcher`]. See also [`Dispatcher::builder`].
///
/// The configuration is fixed once [`Builder::build`] returns, so a dispatcher can be shared
/// across threads without further synchronization.
///
/// ## Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logmux::Destinations;
/// use logmux::Dispatcher;
/// use logmux::local;
/// use logmux::queue::ChannelPublisher;
///
/// let (publisher, deliveries) = ChannelPublisher::unbounded();
/// let dispatcher = Dispatcher::builder()
///     .prefix("billing")
///     .local_log(local::Stdout::default())
///     .enable_local_log(true)
///     .queue(Arc::new(publisher))
///     .build();
///
/// dispatcher
///     .warning(Destinations::ALL, "invoice 42 is overdue")
///     .unwrap();
/// assert_eq!(deliveries.recv().unwrap().routing_key, "WARNING");
/// ```
#[must_use = "call `build` to create the dispatcher"]
#[derive(Debug)]
pub struct Builder {
    prefix: String,
    local_enabled: bool,
    local: Box<dyn LocalLog>,
    system: Option<Box<dyn SystemLog>>,
    queue: Option<Arc<dyn Publish>>,
    unattached: Unattached,
    trap: Box<dyn Trap>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Create a new [`Builder`] with no backend enabled or attached.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            local_enabled: false,
            local: Box::new(local::Stderr::default()),
            system: None,
            queue: None,
            unattached: Unattached::Ignore,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the tag put in front of every local-log line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Enable or disable the local log, regardless of the destinations of a call.
    ///
    /// Default to disabled.
    pub fn enable_local_log(mut self, enabled: bool) -> Self {
        self.local_enabled = enabled;
        self
    }

    /// Set the sink of the local log.
    ///
    /// Default to [`local::Stderr`]. Setting a sink does not enable the local log.
    pub fn local_log(mut self, sink: impl Into<Box<dyn LocalLog>>) -> Self {
        self.local = sink.into();
        self
    }

    /// Attach a system-log handle.
    pub fn system_log(mut self, handle: impl Into<Box<dyn SystemLog>>) -> Self {
        self.system = Some(handle.into());
        self
    }

    /// Attach a system-log handle, or detach it with `None`.
    pub fn attach_system_log(mut self, handle: Option<Box<dyn SystemLog>>) -> Self {
        self.system = handle;
        self
    }

    /// Attach a shared publish channel.
    ///
    /// The dispatcher never closes the channel.
    pub fn queue(mut self, channel: Arc<dyn Publish>) -> Self {
        self.queue = Some(channel);
        self
    }

    /// Attach a shared publish channel, or detach it with `None`.
    pub fn attach_queue(mut self, channel: Option<Arc<dyn Publish>>) -> Self {
        self.queue = channel;
        self
    }

    /// Set what a dispatch does with selected backends that are not available.
    ///
    /// Default to [`Unattached::Ignore`].
    pub fn unattached(mut self, unattached: Unattached) -> Self {
        self.unattached = unattached;
        self
    }

    /// Set the trap for diagnostics that cannot be returned to a caller.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Create the [`Dispatcher`].
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            prefix: self.prefix,
            local_enabled: self.local_enabled,
            local: self.local,
            system: self.system,
            queue: self.queue,
            unattached: self.unattached,
            warned: Default::default(),
            trap: self.trap,
        }
    }
}

/// A logging facade that dispatches each call to a local log, a system log and a message queue.
///
/// A backend receives a message only if its flag is set in the call's [`Destinations`] and it is
/// available: the local log must be enabled, the system log and the queue must be attached.
/// Backends are attempted in the order local, system, queue. The local log never fails; the
/// failures of the other backends are all collected into the returned [`Error`].
#[derive(Debug)]
pub struct Dispatcher {
    prefix: String,
    local_enabled: bool,
    local: Box<dyn LocalLog>,
    system: Option<Box<dyn SystemLog>>,
    queue: Option<Arc<dyn Publish>>,
    unattached: Unattached,
    warned: [AtomicBool; 3],
    trap: Box<dyn Trap>,
}

impl Dispatcher {
    /// Create a new empty [`Builder`].
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The tag put in front of every local-log line.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The backends that are enabled or attached.
    pub fn available(&self) -> Destinations {
        let mut dest = Destinations::EMPTY;
        if self.local_enabled {
            dest |= Destinations::LOCAL;
        }
        if self.system.is_some() {
            dest |= Destinations::SYSTEM;
        }
        if self.queue.is_some() {
            dest |= Destinations::QUEUE;
        }
        dest
    }

    /// Dispatch `message` with `severity` to every selected and available backend.
    ///
    /// # Errors
    ///
    /// Return an error listing every backend that failed. A selected backend that is not
    /// available is not a failure unless configured with [`Unattached::Fail`].
    pub fn log(
        &self,
        destinations: Destinations,
        severity: Severity,
        message: &str,
    ) -> Result<(), Error> {
        self.dispatch(destinations, Some(severity), severity.as_str(), message)
    }

    /// Format `args` and dispatch the result like [`Dispatcher::log`].
    pub fn log_fmt(
        &self,
        destinations: Destinations,
        severity: Severity,
        args: fmt::Arguments<'_>,
    ) -> Result<(), Error> {
        match args.as_str() {
            Some(message) => self.log(destinations, severity, message),
            None => self.log(destinations, severity, &args.to_string()),
        }
    }

    /// Dispatch `message` with a raw syslog priority, `0` (`EMERG`) to `7` (`DEBUG`).
    ///
    /// An unrecognized priority does not abort the dispatch. Its token is empty, the system log
    /// has no matching entry point and is skipped, and the queue publishes with an empty routing
    /// key.
    pub fn log_priority(
        &self,
        destinations: Destinations,
        priority: u8,
        message: &str,
    ) -> Result<(), Error> {
        let severity = Severity::from_priority(priority);
        self.dispatch(destinations, severity, crate::severity::token(priority), message)
    }

    /// Flush the local log and the system log.
    ///
    /// # Errors
    ///
    /// Return an error if the system log fails to flush.
    pub fn flush(&self) -> Result<(), Error> {
        self.local.flush();
        if let Some(ref handle) = self.system {
            if let Err(err) = handle.flush() {
                return Err(Error::new("failed to flush log").with_failure(Backend::System, err));
            }
        }
        Ok(())
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }

    fn dispatch(
        &self,
        destinations: Destinations,
        severity: Option<Severity>,
        token: &str,
        message: &str,
    ) -> Result<(), Error> {
        let mut error = Error::new("failed to dispatch log message").with_context("severity", token);

        for backend in destinations.iter() {
            match backend {
                Backend::Local if self.local_enabled => {
                    let line = format!("[{}] [{}] {}", self.prefix, token, message);
                    self.local.write_line(severity, &line);
                }
                Backend::System => match (self.system.as_deref(), severity) {
                    (Some(handle), Some(severity)) => {
                        if let Err(err) = system::log(handle, severity, message) {
                            error.push_failure(backend, err);
                        }
                    }
                    // no entry point for an unrecognized priority
                    (Some(_), None) => {}
                    (None, _) => self.skip(backend, &mut error),
                },
                Backend::Queue => match self.queue.as_deref() {
                    Some(channel) => {
                        if let Err(err) = queue::publish(channel, token, message) {
                            error.push_failure(backend, err);
                        }
                    }
                    None => self.skip(backend, &mut error),
                },
                Backend::Local => self.skip(backend, &mut error),
            }
        }

        if error.has_failures() {
            Err(error)
        } else {
            Ok(())
        }
    }

    fn skip(&self, backend: Backend, error: &mut Error) {
        match self.unattached {
            Unattached::Ignore => {}
            Unattached::Warn => {
                let warned = &self.warned[backend as usize];
                if !warned.swap(true, Ordering::Relaxed) {
                    self.trap.trap(
                        &Error::new("log destination selected but not available")
                            .with_context("backend", backend),
                    );
                }
            }
            Unattached::Fail => {
                error.push_failure(backend, anyhow::anyhow!("{backend} backend is not available"));
            }
        }
    }
}

macro_rules! severity_entry_points {
    ($($severity:ident($token:literal) => $name:ident, $name_fmt:ident;)*) => {
        impl Dispatcher {
            $(
                #[doc = concat!("Dispatch `message` with severity `", $token, "`.")]
                pub fn $name(&self, destinations: Destinations, message: &str) -> Result<(), Error> {
                    self.log(destinations, Severity::$severity, message)
                }

                #[doc = concat!("Format `args` and dispatch it with severity `", $token, "`.")]
                pub fn $name_fmt(
                    &self,
                    destinations: Destinations,
                    args: fmt::Arguments<'_>,
                ) -> Result<(), Error> {
                    self.log_fmt(destinations, Severity::$severity, args)
                }
            )*
        }
    };
}

severity_entry_points! {
    Debug("DEBUG") => debug, debug_fmt;
    Info("INFO") => info, info_fmt;
    Notice("NOTICE") => notice, notice_fmt;
    Warning("WARNING") => warning, warning_fmt;
    Err("ERR") => err, err_fmt;
    Crit("CRIT") => crit, crit_fmt;
    Alert("ALERT") => alert, alert_fmt;
    Emerg("EMERG") => emerg, emerg_fmt;
}
