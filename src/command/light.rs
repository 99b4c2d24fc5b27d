// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light control commands.
//!
//! This module provides commands for brightness, transition time, presets
//! and segment colors. Values are carried in their wire width; range checks
//! against the device bounds happen before a command is built.

use crate::command::{Command, CommandArgument};
use crate::error::ValueError;
use crate::types::Color;

/// Command to set the master brightness.
///
/// # Examples
///
/// ```
/// use wled_lib::command::{BrightnessCommand, Command, CommandArgument};
///
/// let cmd = BrightnessCommand(128);
/// assert_eq!(cmd.json_arguments(), Some(vec![CommandArgument::int("bri", 128)]));
/// assert_eq!(cmd.query_arguments(), Some(vec![CommandArgument::int("A", 128)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrightnessCommand(pub u8);

impl Command for BrightnessCommand {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::int("bri", self.0)])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::int("A", self.0)])
    }
}

/// Command to set the transition time, in deciseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionCommand(pub u16);

impl Command for TransitionCommand {
    fn name(&self) -> &'static str {
        "transition"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::int("transition", self.0)])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        None
    }
}

/// Command to apply or release a preset.
///
/// # Examples
///
/// ```
/// use wled_lib::command::{Command, CommandArgument, PresetCommand};
///
/// let apply = PresetCommand::Apply(3);
/// assert_eq!(apply.query_arguments(), Some(vec![CommandArgument::int("PL", 3)]));
///
/// let release = PresetCommand::Release;
/// assert_eq!(release.json_arguments(), Some(vec![CommandArgument::int("ps", -1)]));
/// assert_eq!(release.query_arguments(), Some(vec![CommandArgument::int("PS", 255)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetCommand {
    /// Load the preset with this id.
    Apply(i16),
    /// Select no preset.
    Release,
}

impl PresetCommand {
    /// Preset id meaning "none" on the JSON API.
    pub const JSON_NONE: i16 = -1;

    /// Preset slot meaning "none" on the legacy query API.
    pub const QUERY_NONE: i16 = 255;
}

impl Command for PresetCommand {
    fn name(&self) -> &'static str {
        "preset"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        let id = match self {
            Self::Apply(id) => *id,
            Self::Release => Self::JSON_NONE,
        };
        Some(vec![CommandArgument::int("ps", id)])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        let arg = match self {
            Self::Apply(id) => CommandArgument::int("PL", *id),
            Self::Release => CommandArgument::int("PS", Self::QUERY_NONE),
        };
        Some(vec![arg])
    }
}

/// Command to set the segment colors (primary, secondary, tertiary).
///
/// # Examples
///
/// ```
/// use wled_lib::command::ColorCommand;
/// use wled_lib::types::Color;
///
/// assert!(ColorCommand::new(vec![Color::WHITE]).is_ok());
/// assert!(ColorCommand::new(Vec::new()).is_err());
/// assert!(ColorCommand::new(vec![Color::BLACK; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorCommand {
    colors: Vec<Color>,
}

impl ColorCommand {
    /// Largest number of colors a segment takes.
    pub const MAX_COLORS: usize = 3;

    /// Creates a color command from one to three colors.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidColorCount` for zero or more than three colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, ValueError> {
        if colors.is_empty() || colors.len() > Self::MAX_COLORS {
            return Err(ValueError::InvalidColorCount(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Creates a command that sets only the primary color.
    #[must_use]
    pub fn primary(color: Color) -> Self {
        Self {
            colors: vec![color],
        }
    }

    /// Returns the colors.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Command for ColorCommand {
    fn name(&self) -> &'static str {
        "color"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::segment(CommandArgument::colors(
            "col",
            self.colors.clone(),
        ))])
    }

    /// The legacy API carries the primary color as `R`/`G`/`B` and the
    /// secondary as `R2`/`G2`/`B2`; it has no tertiary color.
    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        const KEYS: [[&str; 3]; 2] = [["R", "G", "B"], ["R2", "G2", "B2"]];

        if self.colors.len() > KEYS.len() {
            return None;
        }

        let args = self
            .colors
            .iter()
            .zip(KEYS)
            .flat_map(|(color, keys)| {
                keys.into_iter()
                    .zip(color.to_array())
                    .map(|(key, channel)| CommandArgument::int(key, channel))
            })
            .collect();
        Some(args)
    }
}
