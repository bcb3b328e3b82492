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

//! Destination flags selecting which backends a log call reaches.

use std::fmt;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::str::FromStr;

use crate::Error;

/// A single logging backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Backend {
    /// The local text log.
    Local,
    /// The system logging facility.
    System,
    /// The message-queue publisher.
    Queue,
}

impl Backend {
    /// Backends in the order a dispatch attempts them.
    pub const ORDERED: [Backend; 3] = [Backend::Local, Backend::System, Backend::Queue];

    /// The destination flag of this backend.
    pub fn flag(self) -> Destinations {
        match self {
            Backend::Local => Destinations::LOCAL,
            Backend::System => Destinations::SYSTEM,
            Backend::Queue => Destinations::QUEUE,
        }
    }

    /// The lowercase name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Local => "local",
            Backend::System => "system",
            Backend::Queue => "queue",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of backends a log call should reach.
///
/// Combine flags with `|`:
///
/// ```
/// use logmux::Destinations;
///
/// let dest = Destinations::LOCAL | Destinations::QUEUE;
/// assert!(dest.contains(Destinations::QUEUE));
/// assert!(!dest.contains(Destinations::SYSTEM));
/// assert_eq!((dest | Destinations::SYSTEM), Destinations::ALL);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Destinations(u8);

impl Destinations {
    /// No backend at all.
    pub const EMPTY: Destinations = Destinations(0);
    /// The local text log.
    pub const LOCAL: Destinations = Destinations(1);
    /// The system logging facility.
    pub const SYSTEM: Destinations = Destinations(2);
    /// The message-queue publisher.
    pub const QUEUE: Destinations = Destinations(4);
    /// Every backend.
    pub const ALL: Destinations = Destinations(7);

    /// Convert raw bits into [`Destinations`], rejecting bits that name no backend.
    pub const fn from_bits(bits: u8) -> Option<Destinations> {
        if bits & !Self::ALL.0 == 0 {
            Some(Destinations(bits))
        } else {
            None
        }
    }

    /// Convert raw bits into [`Destinations`], dropping bits that name no backend.
    pub const fn from_bits_truncate(bits: u8) -> Destinations {
        Destinations(bits & Self::ALL.0)
    }

    /// The raw bits of this set.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag of `other` is set in `self`.
    pub const fn contains(self, other: Destinations) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the selected backends in dispatch order.
    pub fn iter(self) -> impl Iterator<Item = Backend> {
        Backend::ORDERED
            .into_iter()
            .filter(move |backend| self.contains(backend.flag()))
    }
}

impl BitOr for Destinations {
    type Output = Destinations;

    fn bitor(self, rhs: Destinations) -> Destinations {
        Destinations(self.0 | rhs.0)
    }
}

impl BitOrAssign for Destinations {
    fn bitor_assign(&mut self, rhs: Destinations) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Destinations {
    type Output = Destinations;

    fn bitand(self, rhs: Destinations) -> Destinations {
        Destinations(self.0 & rhs.0)
    }
}

impl From<Backend> for Destinations {
    fn from(backend: Backend) -> Self {
        backend.flag()
    }
}

impl fmt::Debug for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromStr for Destinations {
    type Err = Error;

    /// Parse a list such as `"local,queue"` or `"system | queue"`.
    ///
    /// `"all"` selects every backend; `"none"` or an empty string selects nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut dest = Destinations::EMPTY;
        for name in s.split([',', '|']).map(str::trim).filter(|n| !n.is_empty()) {
            dest |= match name.to_ascii_lowercase().as_str() {
                "local" => Destinations::LOCAL,
                "system" | "syslog" => Destinations::SYSTEM,
                "queue" | "amqp" => Destinations::QUEUE,
                "all" => Destinations::ALL,
                "none" => Destinations::EMPTY,
                _ => {
                    return Err(Error::new("unknown log destination").with_context("name", name));
                }
            };
        }
        Ok(dest)
    }
}
