// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type.
//!
//! # Device Methods
//!
//! Use [`Color`] with these [`Controller`](crate::Controller) methods:
//! - [`set_color()`](crate::Controller::set_color) - Set the primary color
//! - [`set_colors()`](crate::Controller::set_colors) - Set up to three segment colors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// On the JSON API a color is sent as a three-element list, e.g. `[255,128,0]`.
///
/// # Examples
///
/// ```
/// use wled_lib::types::Color;
///
/// let orange = Color::new(255, 128, 0);
/// assert_eq!(orange.to_array(), [255, 128, 0]);
///
/// // Wider integers go through validation
/// assert!(Color::try_new(255, 128, 0).is_ok());
/// assert!(Color::try_new(256, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Black (all channels off).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (all channels full).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Lower boundary triple reported on validation failure.
    pub const MIN_CHANNELS: (i64, i64, i64) = (0, 0, 0);

    /// Upper boundary triple reported on validation failure.
    pub const MAX_CHANNELS: (i64, i64, i64) = (255, 255, 255);

    /// Creates a new color from byte channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from wider integers, checking every channel.
    ///
    /// The minimum and maximum across all channels are checked together, and
    /// a failure reports the whole triple.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::ColorOutOfRange` if any channel is outside [0, 255].
    pub fn try_new(red: i64, green: i64, blue: i64) -> Result<Self, ValueError> {
        let channels = [red, green, blue];
        let lowest = channels.iter().copied().min().unwrap_or_default();
        let highest = channels.iter().copied().max().unwrap_or_default();

        match (u8::try_from(red), u8::try_from(green), u8::try_from(blue)) {
            (Ok(r), Ok(g), Ok(b)) if lowest >= 0 && highest <= 255 => Ok(Self::new(r, g, b)),
            _ => Err(ValueError::ColorOutOfRange {
                value: (red, green, blue),
                min: Self::MIN_CHANNELS,
                max: Self::MAX_CHANNELS,
            }),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the channels in wire order.
    #[must_use]
    pub const fn to_array(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.red, self.green, self.blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl TryFrom<(i64, i64, i64)> for Color {
    type Error = ValueError;

    fn try_from((red, green, blue): (i64, i64, i64)) -> Result<Self, Self::Error> {
        Self::try_new(red, green, blue)
    }
}
