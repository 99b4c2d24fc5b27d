// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status sub-resource selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Selects which part of the status document to fetch from `/json/{specifier}`.
///
/// # Examples
///
/// ```
/// use wled_lib::types::Specifier;
///
/// assert_eq!(Specifier::None.as_str(), "");
/// assert_eq!(Specifier::State.as_str(), "state");
/// assert_eq!("palettes".parse::<Specifier>().unwrap(), Specifier::Palettes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specifier {
    /// The full status document.
    #[default]
    None,
    /// Current light state.
    State,
    /// Device information.
    Info,
    /// Effect names.
    Effects,
    /// Palette names.
    Palettes,
    /// Live LED colors.
    Live,
}

impl Specifier {
    /// Returns the path segment appended to `/json/`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::State => "state",
            Self::Info => "info",
            Self::Effects => "effects",
            Self::Palettes => "palettes",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "state" => Ok(Self::State),
            "info" => Ok(Self::Info),
            "effects" => Ok(Self::Effects),
            "palettes" => Ok(Self::Palettes),
            "live" => Ok(Self::Live),
            other => Err(ParseError::UnexpectedFormat(format!(
                "unknown specifier: {other}"
            ))),
        }
    }
}
