// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! WLED command definitions.
//!
//! This module provides typed representations of the commands a WLED
//! controller understands. Every command knows how to express itself in both
//! wire dialects: as arguments of a JSON state object (`POST /json/`) and as
//! tokens of the legacy query API (`/win?K=V&...`).
//!
//! # Available Commands
//!
//! | Command Type | Purpose | JSON | Query |
//! |-------------|---------|------|-------|
//! | [`PowerCommand`] | On, off, toggle | `on` | `T` |
//! | [`LiveCommand`] | Live override | `live` | - |
//! | [`FreezeCommand`] | Freeze segment animation | `seg.frz` | - |
//! | [`BrightnessCommand`] | Master brightness (0-255) | `bri` | `A` |
//! | [`TransitionCommand`] | Transition time (deciseconds) | `transition` | - |
//! | [`PresetCommand`] | Apply or release a preset | `ps` | `PL` / `PS` |
//! | [`ColorCommand`] | Segment colors | `seg.col` | `R` `G` `B` |
//! | [`EffectCommand`] | Effect, speed, intensity, palette | `seg.fx` ... | `FX` ... |
//! | [`NightlightCommand`] | Nightlight timer | `nl` | `NL` `NT` `ND` |
//!
//! A command with no form in a dialect returns `None` for it.
//!
//! # Examples
//!
//! ```
//! use wled_lib::command::{ArgumentValue, Command, PowerCommand};
//!
//! let args = PowerCommand::Toggle.json_arguments().unwrap();
//! assert_eq!(args[0].key(), "on");
//! assert_eq!(args[0].value(), &ArgumentValue::Toggle);
//!
//! let args = PowerCommand::On.query_arguments().unwrap();
//! assert_eq!(args[0].key(), "T");
//! assert_eq!(args[0].value(), &ArgumentValue::Int(1));
//! ```

mod effect;
mod light;
mod nightlight;
mod power;

pub use effect::EffectCommand;
pub use light::{BrightnessCommand, ColorCommand, PresetCommand, TransitionCommand};
pub use nightlight::NightlightCommand;
pub use power::{FreezeCommand, LiveCommand, PowerCommand};

use crate::types::Color;

/// A command that can be sent to a WLED controller.
pub trait Command {
    /// Returns a short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Returns the arguments for the JSON API, if the command has a JSON form.
    fn json_arguments(&self) -> Option<Vec<CommandArgument>>;

    /// Returns the tokens for the legacy query API, if the command has one.
    fn query_arguments(&self) -> Option<Vec<CommandArgument>>;
}

/// The value half of a [`CommandArgument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// A bare number.
    Int(i64),
    /// `true`/`false` in JSON, `1`/`0` in a query.
    Bool(bool),
    /// Ask the device to flip a boolean instead of setting it.
    Toggle,
    /// A list of color triples.
    Colors(Vec<Color>),
    /// A key without a value (query dialect only).
    Flag,
    /// Nested arguments, e.g. the members of `seg` or `nl`.
    Object(Vec<CommandArgument>),
}

/// A key/value pair awaiting encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
    key: &'static str,
    value: ArgumentValue,
}

impl CommandArgument {
    /// Creates an argument from a key and value.
    #[must_use]
    pub const fn new(key: &'static str, value: ArgumentValue) -> Self {
        Self { key, value }
    }

    /// Numeric argument.
    #[must_use]
    pub fn int(key: &'static str, value: impl Into<i64>) -> Self {
        Self::new(key, ArgumentValue::Int(value.into()))
    }

    /// Boolean argument.
    #[must_use]
    pub const fn bool(key: &'static str, value: bool) -> Self {
        Self::new(key, ArgumentValue::Bool(value))
    }

    /// Toggle argument.
    #[must_use]
    pub const fn toggle(key: &'static str) -> Self {
        Self::new(key, ArgumentValue::Toggle)
    }

    /// Valueless flag.
    #[must_use]
    pub const fn flag(key: &'static str) -> Self {
        Self::new(key, ArgumentValue::Flag)
    }

    /// Color list argument.
    #[must_use]
    pub fn colors(key: &'static str, colors: impl Into<Vec<Color>>) -> Self {
        Self::new(key, ArgumentValue::Colors(colors.into()))
    }

    /// Nested object argument.
    #[must_use]
    pub fn nested(key: &'static str, members: Vec<CommandArgument>) -> Self {
        Self::new(key, ArgumentValue::Object(members))
    }

    /// Segment argument: `{"seg": {<member>}}`.
    #[must_use]
    pub fn segment(member: CommandArgument) -> Self {
        Self::nested("seg", vec![member])
    }

    /// Returns the key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &ArgumentValue {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_wraps_member() {
        let arg = CommandArgument::segment(CommandArgument::int("fx", 12));
        assert_eq!(arg.key(), "seg");
        assert_eq!(
            arg.value(),
            &ArgumentValue::Object(vec![CommandArgument::int("fx", 12)])
        );
    }

    #[test]
    fn int_accepts_narrow_types() {
        assert_eq!(
            CommandArgument::int("bri", 128u8).value(),
            &ArgumentValue::Int(128)
        );
        assert_eq!(
            CommandArgument::int("ps", -1i16).value(),
            &ArgumentValue::Int(-1)
        );
    }
}
