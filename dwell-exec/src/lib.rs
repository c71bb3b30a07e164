// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Drives dwell streams to completion with a push-style callback.
//!
//! [`SubscribeExt::subscribe`] is the observer side of an operator: it delivers every value
//! to a handler, surfaces the first error, and unsubscribes when its
//! [`CancellationToken`](dwell_core::CancellationToken) fires.

#[macro_use]
mod logging;

pub mod subscribe;

pub use subscribe::SubscribeExt;
