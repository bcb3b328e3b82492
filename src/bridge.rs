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

//! Bridge the [`log`] crate to a [`Dispatcher`].

use std::cell::Cell;
use std::sync::Arc;

use log::LevelFilter;
use log::Metadata;
use log::Record;

use crate::Destinations;
use crate::Dispatcher;
use crate::Error;
use crate::Severity;

/// A [`log::Log`] implementation that dispatches every record through a [`Dispatcher`].
///
/// Records are dispatched at the [`Severity`] matching their level; `Trace` records are
/// dispatched as `DEBUG`. Failures go to the dispatcher's trap.
///
/// Records emitted while a record is being dispatched on the same thread, for example by a
/// [`LogFacade`](crate::local::LogFacade) local sink, are dropped.
///
/// # Examples
///
/// ```
/// use logmux::Destinations;
/// use logmux::Dispatcher;
/// use logmux::LogBridge;
///
/// let dispatcher = Dispatcher::builder()
///     .prefix("api")
///     .enable_local_log(true)
///     .build();
///
/// LogBridge::new(dispatcher, Destinations::LOCAL)
///     .max_level(log::LevelFilter::Info)
///     .apply()
///     .unwrap();
///
/// log::info!("listening on {}", 8080);
/// ```
#[derive(Debug)]
pub struct LogBridge {
    dispatcher: Arc<Dispatcher>,
    destinations: Destinations,
    max_level: LevelFilter,
}

impl LogBridge {
    /// Create a bridge dispatching every record to `destinations`.
    pub fn new(dispatcher: impl Into<Arc<Dispatcher>>, destinations: Destinations) -> Self {
        Self {
            dispatcher: dispatcher.into(),
            destinations,
            max_level: LevelFilter::Trace,
        }
    }

    /// Override the destinations with the value of the environment variable `key`, if set.
    ///
    /// The variable holds a list such as `local,queue`; see [`Destinations`]' `FromStr`.
    ///
    /// # Errors
    ///
    /// Return an error if the variable is set but names an unknown destination.
    pub fn destinations_from_env(mut self, key: &str) -> Result<Self, Error> {
        if let Ok(value) = std::env::var(key) {
            self.destinations = value.parse().map_err(|err: Error| err.with_context("env", key))?;
        }
        Ok(self)
    }

    /// Set the maximum level of records to dispatch.
    ///
    /// Default to [`LevelFilter::Trace`].
    pub fn max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// The destinations every record is dispatched to.
    pub fn destinations(&self) -> Destinations {
        self.destinations
    }

    /// Set up the global logger with this bridge.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let Some(_guard) = DispatchGuard::enter() else {
            return;
        };

        let severity = Severity::from(record.level());
        if let Err(err) = self
            .dispatcher
            .log_fmt(self.destinations, severity, *record.args())
        {
            self.dispatcher
                .trap(&err.with_context("target", record.target()));
        }
    }

    fn flush(&self) {
        let Some(_guard) = DispatchGuard::enter() else {
            return;
        };

        if let Err(err) = self.dispatcher.flush() {
            self.dispatcher.trap(&err);
        }
    }
}

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

// Marks the current thread as dispatching or flushing through the bridge until dropped.
struct DispatchGuard;

impl DispatchGuard {
    fn enter() -> Option<DispatchGuard> {
        DISPATCHING.with(|dispatching| {
            if dispatching.replace(true) {
                None
            } else {
                Some(DispatchGuard)
            }
        })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|dispatching| dispatching.set(false));
    }
}
