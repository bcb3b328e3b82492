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

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use logmux::Error;
use logmux::queue::Publish;
use logmux::queue::Publishing;
use logmux::system::SystemLog;
use logmux::trap::Trap;

/// A system-log double that records every call by entry point name.
#[derive(Debug, Default, Clone)]
pub struct RecordingSystemLog {
    calls: Arc<Mutex<Vec<(&'static str, String)>>>,
    failure: Option<&'static str>,
    flush_failure: Option<&'static str>,
}

impl RecordingSystemLog {
    pub fn failing(failure: &'static str) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn failing_flush(failure: &'static str) -> Self {
        Self {
            flush_failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str, message: &str) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push((name, message.to_string()));
        match self.failure {
            Some(failure) => Err(anyhow::anyhow!(failure)),
            None => Ok(()),
        }
    }
}

impl SystemLog for RecordingSystemLog {
    fn debug(&self, message: &str) -> anyhow::Result<()> {
        self.record("debug", message)
    }

    fn info(&self, message: &str) -> anyhow::Result<()> {
        self.record("info", message)
    }

    fn notice(&self, message: &str) -> anyhow::Result<()> {
        self.record("notice", message)
    }

    fn warning(&self, message: &str) -> anyhow::Result<()> {
        self.record("warning", message)
    }

    fn err(&self, message: &str) -> anyhow::Result<()> {
        self.record("err", message)
    }

    fn crit(&self, message: &str) -> anyhow::Result<()> {
        self.record("crit", message)
    }

    fn alert(&self, message: &str) -> anyhow::Result<()> {
        self.record("alert", message)
    }

    fn emerg(&self, message: &str) -> anyhow::Result<()> {
        self.record("emerg", message)
    }

    fn flush(&self) -> anyhow::Result<()> {
        match self.flush_failure {
            Some(failure) => Err(anyhow::anyhow!(failure)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Published {
    pub exchange: String,
    pub routing_key: String,
    pub mandatory: bool,
    pub immediate: bool,
    pub msg: Publishing,
}

/// A publish-channel double that records every delivery.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Published>>,
    failure: Option<&'static str>,
}

impl RecordingPublisher {
    pub fn failing(failure: &'static str) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

impl Publish for RecordingPublisher {
    fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        mandatory: bool,
        immediate: bool,
        msg: Publishing,
    ) -> anyhow::Result<()> {
        self.published.lock().unwrap().push(Published {
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            mandatory,
            immediate,
            msg,
        });
        match self.failure {
            Some(failure) => Err(anyhow::anyhow!(failure)),
            None => Ok(()),
        }
    }
}

/// A trap that keeps the rendered errors.
#[derive(Debug, Default, Clone)]
pub struct RecordingTrap {
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingTrap {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Trap for RecordingTrap {
    fn trap(&self, err: &Error) {
        self.errors.lock().unwrap().push(err.to_string());
    }
}
