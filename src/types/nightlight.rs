// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nightlight (sleep timer) mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// How the nightlight reaches its target brightness.
///
/// The discriminants are the firmware's wire values and must not change.
///
/// # Examples
///
/// ```
/// use wled_lib::types::NightlightMode;
///
/// assert_eq!(NightlightMode::Sunrise.code(), 3);
/// assert_eq!(NightlightMode::try_from(1).unwrap(), NightlightMode::Fade);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum NightlightMode {
    /// Switch to the target brightness when the timer ends.
    #[default]
    Instant = 0,
    /// Fade brightness over the duration.
    Fade = 1,
    /// Fade brightness and the primary color over the duration.
    ColorFade = 2,
    /// Sunrise animation.
    Sunrise = 3,
}

impl NightlightMode {
    /// Returns the firmware code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for NightlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instant => "instant",
            Self::Fade => "fade",
            Self::ColorFade => "color fade",
            Self::Sunrise => "sunrise",
        };
        f.write_str(name)
    }
}

impl From<NightlightMode> for u8 {
    fn from(mode: NightlightMode) -> Self {
        mode.code()
    }
}

impl TryFrom<u8> for NightlightMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Instant),
            1 => Ok(Self::Fade),
            2 => Ok(Self::ColorFade),
            3 => Ok(Self::Sunrise),
            other => Err(ValueError::OutOfRange {
                value: i64::from(other),
                min: 0,
                max: 3,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_codes_are_stable() {
        assert_eq!(NightlightMode::Instant.code(), 0);
        assert_eq!(NightlightMode::Fade.code(), 1);
        assert_eq!(NightlightMode::ColorFade.code(), 2);
        assert_eq!(NightlightMode::Sunrise.code(), 3);
    }

    #[test]
    fn mode_from_invalid_code() {
        assert!(NightlightMode::try_from(4).is_err());
    }

    #[test]
    fn mode_serializes_as_code() {
        assert_eq!(serde_json::to_string(&NightlightMode::ColorFade).unwrap(), "2");
    }
}
