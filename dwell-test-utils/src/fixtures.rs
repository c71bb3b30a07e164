// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Switch-entity fixtures on a virtual timeline.
//!
//! One tick is one millisecond of virtual time.

use dwell_core::{OnOff, StateSnapshot, Transition};
use dwell_runtime::VirtualInstant;
use std::time::Duration;

pub type SwitchSnapshot = StateSnapshot<OnOff, VirtualInstant>;
pub type SwitchTransition = Transition<OnOff, VirtualInstant>;

pub fn ticks(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn at(tick: u64) -> VirtualInstant {
    VirtualInstant::from_elapsed(ticks(tick))
}

pub fn switch_on(since: VirtualInstant) -> SwitchSnapshot {
    StateSnapshot::new(OnOff::On, since)
}

pub fn switch_off(since: VirtualInstant) -> SwitchSnapshot {
    StateSnapshot::new(OnOff::Off, since)
}

pub fn turned_on(previous_since: VirtualInstant, since: VirtualInstant) -> SwitchTransition {
    Transition::between(switch_off(previous_since), switch_on(since))
}

pub fn turned_off(previous_since: VirtualInstant, since: VirtualInstant) -> SwitchTransition {
    Transition::between(switch_on(previous_since), switch_off(since))
}

/// A transition whose current side is absent.
pub fn removed(previous: SwitchSnapshot) -> SwitchTransition {
    Transition::new(Some(previous), None)
}
