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

//! Sinks for the message-queue publisher.
//!
//! The dispatcher never opens or closes a queue connection. It receives a shared handle to a
//! publish channel and only calls [`Publish::publish`] on it.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "amqp")]
pub mod amqp;
mod channel;

#[cfg(feature = "amqp")]
pub use self::amqp::AmqpChannel;
pub use self::channel::ChannelPublisher;
pub use self::channel::Delivery;

/// The exchange every log message is published to.
pub const LOG_EXCHANGE: &str = "logs";

/// The content type of a published log message.
pub const TEXT_PLAIN: &str = "text/plain";

/// Whether the broker keeps a message across restarts.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum DeliveryMode {
    /// Kept in memory only.
    #[default]
    Transient = 1,
    /// Written to disk by the broker.
    Persistent = 2,
}

/// The envelope of a published message.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Publishing {
    /// Application headers.
    pub headers: BTreeMap<String, String>,
    /// MIME content type of the body.
    pub content_type: String,
    /// MIME content encoding of the body.
    pub content_encoding: String,
    /// The raw message bytes.
    pub body: Vec<u8>,
    /// Transient or persistent delivery.
    pub delivery_mode: DeliveryMode,
    /// Message priority, `0` to `9`.
    pub priority: u8,
}

impl Publishing {
    /// Build the envelope of a plain-text log message: empty headers, `text/plain`, no content
    /// encoding, transient delivery and priority `0`.
    pub fn text(message: &str) -> Self {
        Self {
            headers: BTreeMap::new(),
            content_type: TEXT_PLAIN.to_string(),
            content_encoding: String::new(),
            body: message.as_bytes().to_vec(),
            delivery_mode: DeliveryMode::Transient,
            priority: 0,
        }
    }
}

/// A channel that publishes messages to a broker.
pub trait Publish: fmt::Debug + Send + Sync + 'static {
    /// Publish `msg` to `exchange` with the given routing key.
    fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        mandatory: bool,
        immediate: bool,
        msg: Publishing,
    ) -> anyhow::Result<()>;
}

/// Publish a log message to [`LOG_EXCHANGE`], keyed by its severity token.
pub(crate) fn publish(channel: &dyn Publish, token: &str, message: &str) -> anyhow::Result<()> {
    channel.publish(LOG_EXCHANGE, token, false, false, Publishing::text(message))
}
