// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-windowed boolean operators over entity state-change streams.
//!
//! Both operators turn a stream of [`Transition`](dwell_core::Transition)s for one entity
//! into a `StreamItem<bool>` stream, using a [`Scheduler`](dwell_runtime::Scheduler) for
//! "now" and for the remaining wait:
//!
//! - **[`WhenTrueForExt`]** - `true` only once the predicate has held for a threshold
//! - **[`LimitTrueDurationExt`]** - `true` while the predicate holds, for at most a
//!   threshold
//!
//! The wait is measured from the state's `last_changed`, so a subscription made while a
//! state is already current only waits for what is left of the threshold. Both operators
//! run the same [`Gate`](gate::Gate) state machine.
//!
//! [`TrackedEntity`] bundles an entity's current snapshot with its transition stream.
//!
//! # Example
//!
//! ```rust
//! use dwell_core::{OnOff, StreamItem};
//! use dwell_runtime::{VirtualInstant, VirtualScheduler};
//! use dwell_stream::prelude::*;
//! use futures::{FutureExt, StreamExt};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let light = TrackedEntity::with_state(OnOff::Off, VirtualInstant::EPOCH);
//!
//! let mut off_for_5s = light
//!     .transitions()
//!     .unwrap()
//!     .when_true_for_by(Duration::from_secs(5), Predicate::is_off(), light.clone(), scheduler.clone());
//!
//! // Off since the epoch, which is zero seconds ago
//! assert_eq!(off_for_5s.next().now_or_never(), Some(Some(StreamItem::Value(false))));
//!
//! scheduler.advance_by(Duration::from_secs(5));
//! assert_eq!(off_for_5s.next().now_or_never(), Some(Some(StreamItem::Value(true))));
//! ```
//!
//! # Features
//!
//! - `runtime-tokio` (default) - `TokioScheduler` and `ChronoScheduler`
//! - `runtime-smol` - `SmolScheduler`
//! - `tracing` - gate and scheduler events through `tracing`

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod gate;
pub mod limit_true_duration;
pub mod options;
pub mod predicate;
pub mod prelude;
mod subscription;
pub mod temporal_predicate_stream;
pub mod tracked_entity;
pub mod when_true_for;

pub use gate::GateMode;
pub use limit_true_duration::LimitTrueDurationExt;
pub use options::GateOptions;
pub use predicate::Predicate;
pub use temporal_predicate_stream::TemporalPredicateStream;
pub use tracked_entity::{EntityStream, TrackedEntity};
pub use when_true_for::WhenTrueForExt;
