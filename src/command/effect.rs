// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment effect commands.

use crate::command::{Command, CommandArgument};

/// Command to change the effect running on the main segment.
///
/// On the JSON API each variant becomes a member of the `seg` object.
///
/// # Examples
///
/// ```
/// use wled_lib::command::{Command, CommandArgument, EffectCommand};
///
/// let cmd = EffectCommand::Speed(200);
/// assert_eq!(
///     cmd.json_arguments(),
///     Some(vec![CommandArgument::segment(CommandArgument::int("sx", 200))])
/// );
/// assert_eq!(cmd.query_arguments(), Some(vec![CommandArgument::int("SX", 200)]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCommand {
    /// Effect id.
    Effect(u8),
    /// Effect speed.
    Speed(u8),
    /// Effect intensity.
    Intensity(u8),
    /// Color palette id.
    Palette(u8),
}

impl EffectCommand {
    fn keys(self) -> (&'static str, &'static str, u8) {
        match self {
            Self::Effect(v) => ("fx", "FX", v),
            Self::Speed(v) => ("sx", "SX", v),
            Self::Intensity(v) => ("ix", "IX", v),
            Self::Palette(v) => ("pal", "FP", v),
        }
    }
}

impl Command for EffectCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Effect(_) => "effect",
            Self::Speed(_) => "effect speed",
            Self::Intensity(_) => "effect intensity",
            Self::Palette(_) => "palette",
        }
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        let (key, _, value) = self.keys();
        Some(vec![CommandArgument::segment(CommandArgument::int(
            key, value,
        ))])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        let (_, key, value) = self.keys();
        Some(vec![CommandArgument::int(key, value)])
    }
}
