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

//! Logmux is a logging facade that dispatches a single log call to a local text log, a system
//! logging facility and a message-queue publisher.
//!
//! # Overview
//!
//! A [`Dispatcher`] is configured once through its [`Builder`]: a prefix for local-log lines, a
//! [local-log sink](local) and whether it is enabled, an optional [system-log handle](system)
//! and an optional shared [publish channel](queue). Every log call then selects its backends with
//! a set of [`Destinations`] and carries one of eight [`Severity`] levels.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logmux::Destinations;
//! use logmux::Dispatcher;
//! use logmux::queue::ChannelPublisher;
//!
//! let (publisher, deliveries) = ChannelPublisher::unbounded();
//! let dispatcher = Dispatcher::builder()
//!     .prefix("orders")
//!     .enable_local_log(true)
//!     .queue(Arc::new(publisher))
//!     .build();
//!
//! // local log only
//! dispatcher.info(Destinations::LOCAL, "order 7 received").unwrap();
//!
//! // local log and queue, formatted
//! dispatcher
//!     .err_fmt(Destinations::ALL, format_args!("order {} failed: {}", 7, "out of stock"))
//!     .unwrap();
//!
//! let delivery = deliveries.recv().unwrap();
//! assert_eq!(delivery.exchange, "logs");
//! assert_eq!(delivery.routing_key, "ERR");
//! assert_eq!(delivery.publishing.body, b"order 7 failed: out of stock");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod local;
pub mod queue;
pub mod severity;
pub mod system;
pub mod trap;

mod bridge;
mod destination;
mod dispatcher;
mod error;
mod macros;

pub use self::bridge::LogBridge;
pub use self::destination::Backend;
pub use self::destination::Destinations;
pub use self::dispatcher::Builder;
pub use self::dispatcher::Dispatcher;
pub use self::dispatcher::Unattached;
pub use self::error::Error;
pub use self::severity::Severity;
