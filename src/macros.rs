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

/// Format a message and dispatch it through a [`Dispatcher`](crate::Dispatcher).
///
/// Expands to a call to [`Dispatcher::log_fmt`](crate::Dispatcher::log_fmt) and evaluates to its
/// result.
///
/// # Examples
///
/// ```
/// use logmux::Destinations;
/// use logmux::Dispatcher;
/// use logmux::Severity;
///
/// let dispatcher = Dispatcher::builder().build();
/// let user = "alice";
/// logmux::dispatch!(dispatcher, Destinations::ALL, Severity::Notice, "{user} signed in").unwrap();
/// ```
#[macro_export]
macro_rules! dispatch {
    ($dispatcher:expr, $destinations:expr, $severity:expr, $($arg:tt)+) => {
        $dispatcher.log_fmt($destinations, $severity, ::std::format_args!($($arg)+))
    };
}
