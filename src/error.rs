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

use crate::Backend;

/// The error struct of logmux.
///
/// A single dispatch can fail on more than one backend. Every failure is kept, in the order the
/// backends were attempted, so callers can tell which backend failed and why.
pub struct Error {
    message: String,
    failures: Vec<(Backend, anyhow::Error)>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.failures.is_empty() {
            write!(f, ", failures: [")?;
            for (i, (backend, source)) in self.failures.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{backend}: {source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("failures", &self.failures);
            return de.finish();
        }

        write!(f, "{}", self.message)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures:")?;
            for (backend, source) in self.failures.iter() {
                writeln!(f, "   {backend}: {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures.first().map(|(_, v)| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            failures: vec![],
            context: vec![],
        }
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Record that the given backend failed.
    pub fn with_failure(mut self, backend: Backend, src: impl Into<anyhow::Error>) -> Self {
        self.failures.push((backend, src.into()));
        self
    }

    pub(crate) fn push_failure(&mut self, backend: Backend, src: anyhow::Error) {
        self.failures.push((backend, src));
    }

    pub(crate) fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Return the message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return an iterator over all backend failures, in the order the backends were attempted.
    pub fn failures(&self) -> impl ExactSizeIterator<Item = (Backend, &anyhow::Error)> {
        self.failures.iter().map(|(b, e)| (*b, e))
    }

    /// Return the failure of the given backend, if it failed.
    pub fn failed(&self, backend: Backend) -> Option<&anyhow::Error> {
        self.failures
            .iter()
            .find(|(b, _)| *b == backend)
            .map(|(_, e)| e)
    }

    /// Return the failure of the last attempted backend that failed.
    ///
    /// This is the single error an overwrite-on-failure policy would surface.
    pub fn last(&self) -> Option<(Backend, &anyhow::Error)> {
        self.failures.last().map(|(b, e)| (*b, e))
    }
}
