// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the dwell workspace.
//!
//! Not meant for production code. Operator tests follow one shape:
//!
//! - a [`test_channel`] stands in for the entity's transition source,
//! - a [`TestEntity`] stands in for the entity accessor,
//! - a [`VirtualScheduler`](dwell_runtime::VirtualScheduler) stands in for the clock,
//! - [`next_now`] / [`drain_now`] poll the derived stream without awaiting, so every
//!   emission can be pinned to an exact virtual instant.
//!
//! ```rust
//! use dwell_test_utils::{drain_now, fixtures::{at, ticks, turned_on}, test_channel};
//! use futures::StreamExt;
//!
//! let (tx, stream) = test_channel();
//! let mut stream = stream.boxed();
//!
//! tx.send(turned_on(at(0), at(1))).unwrap();
//!
//! assert_eq!(drain_now(&mut stream).len(), 1);
//! assert_eq!(ticks(3).as_millis(), 3);
//! ```

pub mod error_injection;
pub mod fixtures;
pub mod helpers;
pub mod spy;
pub mod test_entity;

use dwell_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use error_injection::ErrorInjectingStream;
pub use helpers::{assert_no_element_emitted, drain_now, next_now, values_now};
pub use spy::Spy;
pub use test_entity::TestEntity;

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
///
/// Dropping the sender completes the stream.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>`, for error propagation tests.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
