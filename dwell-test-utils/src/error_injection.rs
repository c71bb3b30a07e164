// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns a plain transition feed into a `StreamItem` feed that fails at a chosen point.

use dwell_core::{DwellError, StreamItem};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Yields the inner items as `StreamItem::Value`, with one `StreamItem::Error` spliced in
/// before the item at `position`.
///
/// ```rust
/// use dwell_core::StreamItem;
/// use dwell_test_utils::ErrorInjectingStream;
/// use futures::{stream, StreamExt};
///
/// # futures::executor::block_on(async {
/// let mut feed = ErrorInjectingStream::new(stream::iter([1, 2]), 1);
///
/// assert!(matches!(feed.next().await, Some(StreamItem::Value(1))));
/// assert!(matches!(feed.next().await, Some(StreamItem::Error(_))));
/// assert!(matches!(feed.next().await, Some(StreamItem::Value(2))));
/// # });
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    emitted: usize,
    injection: Option<(usize, DwellError)>,
}

impl<S> ErrorInjectingStream<S> {
    pub fn new(inner: S, position: usize) -> Self {
        Self {
            inner,
            emitted: 0,
            injection: Some((position, DwellError::stream_error("Injected test error"))),
        }
    }

    /// Replaces the injected error.
    pub fn with_error(mut self, error: DwellError) -> Self {
        if let Some((_, injected)) = self.injection.as_mut() {
            *injected = error;
        }
        self
    }

    fn take_due_error(&mut self) -> Option<DwellError> {
        match &self.injection {
            Some((position, _)) if *position == self.emitted => {
                self.injection.take().map(|(_, error)| error)
            }
            _ => None,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if let Some(error) = this.take_due_error() {
            this.emitted += 1;
            return Poll::Ready(Some(StreamItem::Error(error)));
        }

        let polled = Pin::new(&mut this.inner).poll_next(cx);
        if let Poll::Ready(Some(_)) = &polled {
            this.emitted += 1;
        }
        polled.map(|item| item.map(StreamItem::Value))
    }
}
