// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::str::FromStr;

/// A state value with two canonical states.
///
/// The predicate-free operators fire on "the value is on". Implement this for a domain
/// enum to use them without writing a predicate.
pub trait BinaryState {
    /// Returns `true` if the value is the "on" state.
    fn is_on(&self) -> bool;

    /// Returns `true` if the value is the "off" state.
    ///
    /// Values that are neither (e.g. "unavailable") are off-by-default unless overridden.
    fn is_off(&self) -> bool {
        !self.is_on()
    }
}

impl BinaryState for bool {
    fn is_on(&self) -> bool {
        *self
    }
}

/// String states compare case-insensitively against `"on"` / `"off"`.
///
/// Any other string is neither on nor off.
impl BinaryState for str {
    fn is_on(&self) -> bool {
        self.eq_ignore_ascii_case("on")
    }

    fn is_off(&self) -> bool {
        self.eq_ignore_ascii_case("off")
    }
}

impl BinaryState for String {
    fn is_on(&self) -> bool {
        self.as_str().is_on()
    }

    fn is_off(&self) -> bool {
        self.as_str().is_off()
    }
}

impl BinaryState for &str {
    fn is_on(&self) -> bool {
        (**self).is_on()
    }

    fn is_off(&self) -> bool {
        (**self).is_off()
    }
}

/// The two states of a binary entity such as a switch or a motion sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OnOff {
    On,
    Off,
}

impl BinaryState for OnOff {
    fn is_on(&self) -> bool {
        matches!(self, OnOff::On)
    }

    fn is_off(&self) -> bool {
        matches!(self, OnOff::Off)
    }
}

impl From<bool> for OnOff {
    fn from(on: bool) -> Self {
        if on {
            OnOff::On
        } else {
            OnOff::Off
        }
    }
}

impl fmt::Display for OnOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnOff::On => f.write_str("on"),
            OnOff::Off => f.write_str("off"),
        }
    }
}

/// Error returned when parsing a string that is neither `"on"` nor `"off"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an on/off state")]
pub struct ParseOnOffError(pub String);

impl FromStr for OnOff {
    type Err = ParseOnOffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_on() {
            Ok(OnOff::On)
        } else if s.is_off() {
            Ok(OnOff::Off)
        } else {
            Err(ParseOnOffError(s.to_owned()))
        }
    }
}
