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

//! Traps receive diagnostics that cannot be reported through a log call's result.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A trap for errors that happen outside of a caller's reach.
///
/// Examples are the warnings of [`Unattached::Warn`](crate::Unattached::Warn) and failures of
/// records dispatched through the [`LogBridge`](crate::LogBridge).
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The trap a [`Builder`](crate::Builder) starts with.
///
/// Each error is written as one line to standard error, for example the warning issued the first
/// time a dispatch selects a backend that is not attached. Errors are lost if standard error is
/// closed.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "logmux: {err}");
    }
}
