// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for WLED control.
//!
//! This module provides the validated values used to build commands. Range
//! checks happen here, locally, so an out-of-range value never reaches the
//! wire.
//!
//! # Types
//!
//! - [`Bounds`] - Closed-interval checks for numeric quantities
//! - [`Color`] - RGB color (three 0-255 channels)
//! - [`Specifier`] - Status sub-resource selector
//! - [`NightlightMode`] - Nightlight fade behavior (firmware codes 0-3)

mod bounds;
mod color;
mod nightlight;
mod specifier;

pub use bounds::{Bounds, transition_deciseconds};
pub use color::Color;
pub use nightlight::NightlightMode;
pub use specifier::Specifier;
