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

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::TrySendError;

use crate::queue::Publish;
use crate::queue::Publishing;

/// A message handed over by a [`ChannelPublisher`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Delivery {
    /// The exchange to publish to.
    pub exchange: String,
    /// The routing key of the message.
    pub routing_key: String,
    /// Whether the broker must route the message to a queue.
    pub mandatory: bool,
    /// Whether the broker must deliver the message to a consumer immediately.
    pub immediate: bool,
    /// The message envelope.
    pub publishing: Publishing,
}

/// A publisher that hands deliveries to a worker over a channel.
///
/// The worker owns the broker connection and forwards every [`Delivery`] it receives. Publishing
/// fails once the worker has dropped its receiver, or when a bounded channel is full.
///
/// # Examples
///
/// ```
/// use logmux::queue::ChannelPublisher;
/// use logmux::queue::Publish;
/// use logmux::queue::Publishing;
///
/// let (publisher, deliveries) = ChannelPublisher::unbounded();
/// publisher
///     .publish("logs", "INFO", false, false, Publishing::text("hello"))
///     .unwrap();
///
/// let delivery = deliveries.recv().unwrap();
/// assert_eq!(delivery.routing_key, "INFO");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    sender: Sender<Delivery>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiving end of its unbounded channel.
    pub fn unbounded() -> (ChannelPublisher, Receiver<Delivery>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (ChannelPublisher { sender }, receiver)
    }

    /// Create a publisher and the receiving end of a channel holding at most `cap` deliveries.
    pub fn bounded(cap: usize) -> (ChannelPublisher, Receiver<Delivery>) {
        let (sender, receiver) = crossbeam_channel::bounded(cap);
        (ChannelPublisher { sender }, receiver)
    }
}

impl Publish for ChannelPublisher {
    fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        mandatory: bool,
        immediate: bool,
        msg: Publishing,
    ) -> anyhow::Result<()> {
        let delivery = Delivery {
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            mandatory,
            immediate,
            publishing: msg,
        };
        match self.sender.try_send(delivery) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(anyhow::anyhow!("publish channel is full")),
            Err(TrySendError::Disconnected(_)) => Err(anyhow::anyhow!("publish channel is closed")),
        }
    }
}
