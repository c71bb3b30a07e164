// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Dwell
//!
//! Time-windowed boolean operators over the state changes of a single entity.
//!
//! ## Overview
//!
//! An entity (a switch, a door contact, a motion sensor) reports its state together with
//! the instant that state became current. Dwell turns the stream of its transitions into
//! a stream of booleans:
//!
//! - `when_true_for(D)` is `true` only once the predicate has held for at least `D`
//! - `limit_true_duration(D)` is `true` while the predicate holds, but for at most `D`
//!
//! Both measure from the state's `last_changed`, so subscribing while a state is already
//! current waits only for the rest of the threshold. Time comes from an injected
//! [`Scheduler`]: tokio or smol timers in production, a [`VirtualScheduler`] in tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use dwell::prelude::*;
//! use futures::{FutureExt, StreamExt};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let hallway = TrackedEntity::with_state(OnOff::On, scheduler.now());
//!
//! let mut occupied = hallway
//!     .when_true_for(Duration::from_secs(30), scheduler.clone())
//!     .unwrap();
//! assert_eq!(occupied.next().now_or_never(), Some(Some(StreamItem::Value(false))));
//!
//! scheduler.advance_by(Duration::from_secs(30));
//! assert_eq!(occupied.next().now_or_never(), Some(Some(StreamItem::Value(true))));
//! ```

pub use dwell_core::{
    BinaryState, CancellationToken, DwellError, EntityState, Instant, OnOff, Result,
    StateSnapshot, StreamItem, Subject, SubjectError, Transition,
};
pub use dwell_exec::SubscribeExt;
pub use dwell_runtime::{
    RuntimeScheduler, ScheduledAction, ScheduledHandle, Scheduler, VirtualInstant,
    VirtualScheduler,
};
pub use dwell_stream::{
    EntityStream, GateMode, GateOptions, LimitTrueDurationExt, Predicate,
    TemporalPredicateStream, TrackedEntity, WhenTrueForExt,
};

#[cfg(feature = "runtime-tokio")]
pub use dwell_runtime::{ChronoScheduler, TokioScheduler};

#[cfg(feature = "runtime-smol")]
pub use dwell_runtime::SmolScheduler;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BinaryState, CancellationToken, EntityState, GateMode, GateOptions,
        LimitTrueDurationExt, OnOff, Predicate, Scheduler, StateSnapshot, StreamItem,
        SubscribeExt, TrackedEntity, Transition, VirtualScheduler, WhenTrueForExt,
    };

    #[cfg(feature = "runtime-tokio")]
    pub use crate::TokioScheduler;
}
