// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power, live override and freeze commands.

use crate::command::{Command, CommandArgument};

/// Command to control the power state.
///
/// # Examples
///
/// ```
/// use wled_lib::command::{ArgumentValue, Command, PowerCommand};
///
/// let args = PowerCommand::Off.json_arguments().unwrap();
/// assert_eq!(args[0].value(), &ArgumentValue::Bool(false));
///
/// // The legacy API toggles with T=2
/// let args = PowerCommand::Toggle.query_arguments().unwrap();
/// assert_eq!(args[0].value(), &ArgumentValue::Int(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerCommand {
    /// Turn the light on.
    On,
    /// Turn the light off.
    Off,
    /// Flip the current state.
    Toggle,
}

impl PowerCommand {
    /// Returns the command for the given state.
    #[must_use]
    pub const fn set(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl Command for PowerCommand {
    fn name(&self) -> &'static str {
        "power"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        let arg = match self {
            Self::On => CommandArgument::bool("on", true),
            Self::Off => CommandArgument::bool("on", false),
            Self::Toggle => CommandArgument::toggle("on"),
        };
        Some(vec![arg])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        let code = match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Toggle => 2,
        };
        Some(vec![CommandArgument::int("T", code)])
    }
}

/// Command to enter or leave live override mode.
///
/// Only the JSON API exposes this switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveCommand {
    /// Accept externally pushed frames.
    Enable,
    /// Return to normal effect processing.
    Disable,
}

impl Command for LiveCommand {
    fn name(&self) -> &'static str {
        "live override"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::bool(
            "live",
            matches!(self, Self::Enable),
        )])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        None
    }
}

/// Command to freeze or resume the segment animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreezeCommand {
    /// Hold the current frame.
    Freeze,
    /// Resume the effect.
    Unfreeze,
}

impl Command for FreezeCommand {
    fn name(&self) -> &'static str {
        "freeze"
    }

    fn json_arguments(&self) -> Option<Vec<CommandArgument>> {
        Some(vec![CommandArgument::segment(CommandArgument::bool(
            "frz",
            matches!(self, Self::Freeze),
        ))])
    }

    fn query_arguments(&self) -> Option<Vec<CommandArgument>> {
        None
    }
}
