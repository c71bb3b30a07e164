// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators and the types needed to configure them.
//!
//! ```rust
//! use dwell_stream::prelude::*;
//! ```

pub use crate::gate::GateMode;
pub use crate::limit_true_duration::LimitTrueDurationExt;
pub use crate::options::GateOptions;
pub use crate::predicate::Predicate;
pub use crate::tracked_entity::TrackedEntity;
pub use crate::when_true_for::WhenTrueForExt;
