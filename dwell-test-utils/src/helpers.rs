// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dwell_core::StreamItem;
use futures::stream::StreamExt;
use futures::{FutureExt, Stream};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Waits `timeout_ms` on the tokio clock and panics if the stream yields anything meanwhile.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output: {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Polls the stream once without awaiting.
///
/// `None` means the stream is pending; `Some(None)` means it ended.
pub fn next_now<S>(stream: &mut S) -> Option<Option<S::Item>>
where
    S: Stream + Unpin,
{
    stream.next().now_or_never()
}

/// Collects every item the stream can yield right now, stopping when it is pending or ended.
pub fn drain_now<S>(stream: &mut S) -> Vec<S::Item>
where
    S: Stream + Unpin,
{
    let mut items = Vec::new();
    while let Some(Some(item)) = next_now(stream) {
        items.push(item);
    }
    items
}

/// Like [`drain_now`], panicking on the first `StreamItem::Error`.
pub fn values_now<S, T>(stream: &mut S) -> Vec<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    drain_now(stream)
        .into_iter()
        .map(|item| match item {
            StreamItem::Value(value) => value,
            StreamItem::Error(e) => panic!("Unexpected stream error: {e}"),
        })
        .collect()
}

/// Returns `true` if the stream has ended, without awaiting.
pub fn is_terminated_now<S>(stream: &mut S) -> bool
where
    S: Stream + Unpin,
{
    matches!(next_now(stream), Some(None))
}
