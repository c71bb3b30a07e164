// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use core::error::Error;
use core::future::Future;
use dwell_core::{CancellationToken, DwellError, Result, StreamItem};
use futures::future::{select, Either};
use futures::stream::{Stream, StreamExt};
use futures::pin_mut;

/// Extension trait providing push-style subscription for streams of [`StreamItem`]s.
///
/// Items are handled one at a time, in arrival order: the handler for one value runs to
/// completion before the next value is pulled from the stream.
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Subscribes to the stream, calling `on_next` for every value.
    ///
    /// The subscription ends when the stream completes, when the stream yields an error,
    /// when `on_next` fails, or when `cancellation_token` is cancelled. Ending drops the
    /// stream, so an operator stream's pending emission is cancelled with it: once
    /// cancelled, `on_next` is never called again.
    ///
    /// `on_next` also receives the token, so a handler may unsubscribe itself.
    ///
    /// # Errors
    ///
    /// Returns the first [`StreamItem::Error`] the stream yields, or the handler's error
    /// wrapped in [`DwellError::UserError`]. Cancellation is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dwell_core::{CancellationToken, StreamItem};
    /// use dwell_exec::SubscribeExt;
    /// use futures::stream;
    /// use std::sync::{Arc, Mutex};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    ///
    /// stream::iter(vec![StreamItem::Value(false), StreamItem::Value(true)])
    ///     .subscribe(
    ///         move |presence, _token| {
    ///             let sink = sink.clone();
    ///             async move {
    ///                 sink.lock().unwrap().push(presence);
    ///                 Ok::<(), std::io::Error>(())
    ///             }
    ///         },
    ///         None,
    ///     )
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(*seen.lock().unwrap(), vec![false, true]);
    /// # }
    /// ```
    async fn subscribe<F, Fut, E>(
        self,
        on_next: F,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: FnMut(T, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        E: Error + Send + Sync + 'static;
}

#[async_trait]
impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe<F, Fut, E>(
        self,
        mut on_next: F,
        cancellation_token: Option<CancellationToken>,
    ) -> Result<()>
    where
        F: FnMut(T, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        let cancellation_token = cancellation_token.unwrap_or_default();
        let stream = self;
        pin_mut!(stream);

        loop {
            let next = {
                let cancelled = cancellation_token.cancelled();
                pin_mut!(cancelled);
                match select(stream.next(), cancelled).await {
                    Either::Left((item, _)) => item,
                    Either::Right(((), _)) => None,
                }
            };

            if cancellation_token.is_cancelled() {
                debug!("subscription cancelled");
                return Ok(());
            }

            match next {
                Some(StreamItem::Value(value)) => {
                    on_next(value, cancellation_token.clone())
                        .await
                        .map_err(DwellError::user_error)?;
                }
                Some(StreamItem::Error(error)) => {
                    warn!("subscription ended by stream error: {}", error);
                    return Err(error);
                }
                None => {
                    debug!("subscription completed");
                    return Ok(());
                }
            }
        }
    }
}
