// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed-interval bounds for controllable quantities.
//!
//! Every numeric input is checked against its own [`Bounds`] before a
//! request is built. The bounds are not interchangeable: most quantities are
//! bytes, but presets and effects have their own ranges, and some of those
//! differ between the JSON API and the legacy query API.

use crate::error::ValueError;

/// An inclusive `[min, max]` range.
///
/// # Examples
///
/// ```
/// use wled_lib::types::Bounds;
///
/// assert_eq!(Bounds::BYTE.check(255), Ok(255));
/// assert!(Bounds::BYTE.check(256).is_err());
/// assert!(Bounds::JSON_PRESET.check(-1).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: i64,
    max: i64,
}

impl Bounds {
    /// Brightness, speed, intensity, palette, nightlight duration and target.
    pub const BYTE: Self = Self::new(0, 255);

    /// Transition time in deciseconds.
    pub const TRANSITION: Self = Self::new(0, 65_535);

    /// Preset ids on the JSON API; `-1` means "no preset".
    pub const JSON_PRESET: Self = Self::new(-1, 250);

    /// Preset ids on the legacy query API.
    pub const QUERY_PRESET: Self = Self::new(0, 255);

    /// Effect ids on the JSON API.
    pub const JSON_EFFECT: Self = Self::new(0, 117);

    /// Effect ids on the legacy query API.
    pub const QUERY_EFFECT: Self = Self::new(0, 101);

    /// Creates a new range. `min` must not exceed `max`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Returns whether `value` lies inside the range.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks `value` against the range and hands it back unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` carrying the value and both bounds.
    pub const fn check(&self, value: i64) -> Result<i64, ValueError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(self.out_of_range(value))
        }
    }

    /// Checks `value` and converts it to the wire width `N`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is outside the range or
    /// does not fit in `N`.
    pub fn check_into<N: TryFrom<i64>>(&self, value: i64) -> Result<N, ValueError> {
        let value = self.check(value)?;
        N::try_from(value).map_err(|_| self.out_of_range(value))
    }

    const fn out_of_range(&self, value: i64) -> ValueError {
        ValueError::OutOfRange {
            value,
            min: self.min,
            max: self.max,
        }
    }
}

/// Converts a transition time in milliseconds to deciseconds and checks it.
///
/// The device takes transitions in tenths of a second. The conversion floors,
/// so `-1` ms becomes `-1` ds and is rejected.
///
/// # Errors
///
/// Returns `ValueError::OutOfRange` if the converted value is outside
/// [`Bounds::TRANSITION`].
///
/// # Examples
///
/// ```
/// use wled_lib::types::transition_deciseconds;
///
/// assert_eq!(transition_deciseconds(1_250), Ok(12));
/// assert!(transition_deciseconds(6_553_600).is_err());
/// ```
pub fn transition_deciseconds(milliseconds: i64) -> Result<u16, ValueError> {
    Bounds::TRANSITION.check_into(milliseconds.div_euclid(100))
}
