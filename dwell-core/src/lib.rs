// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by the dwell crates.
//!
//! - [`StateSnapshot`] and [`Transition`] model the state changes of one monitored entity.
//! - [`EntityState`] is the accessor the operators call for the entity's current snapshot.
//! - [`BinaryState`] gives the predicate-free operators their "is on" test.
//! - [`Instant`] abstracts the timestamp arithmetic a scheduler clock needs.
//! - [`StreamItem`] and [`DwellError`] carry errors in-band through streams.
//! - [`CancellationToken`] and [`Subject`] are the runtime-agnostic plumbing.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod binary_state;
pub mod cancellation_token;
pub mod entity_state;
pub mod error;
pub mod instant;
pub mod snapshot;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::binary_state::{BinaryState, OnOff};
pub use self::cancellation_token::CancellationToken;
pub use self::entity_state::EntityState;
pub use self::error::{DwellError, IntoDwellError, Result, ResultExt};
pub use self::instant::Instant;
pub use self::snapshot::{StateSnapshot, Transition};
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subject_error::SubjectError;
