// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `WLED` Lib - A Rust library to control WLED RGB lighting controllers.
//!
//! This library provides an async API over the controller's HTTP interface,
//! in either of the two dialects the firmware has spoken: the JSON API
//! (`/json/...`) and the legacy query API (`/win?K=V&...`).
//!
//! # Supported Features
//!
//! - **Power control**: On, off, toggle, power cycle
//! - **Light control**: Brightness, transition, presets, segment colors
//! - **Effects**: Effect, speed, intensity, palette
//! - **Nightlight**: Duration, mode, target brightness, start/stop
//! - **Status queries**: Status documents, firmware build, heap, uptime
//! - **Hour marker**: Flash the light at the top of every hour
//!
//! Every numeric argument is range-checked before a request is built, so an
//! out-of-range value never reaches the device.
//!
//! # Quick Start
//!
//! ## JSON API
//!
//! ```no_run
//! use wled_lib::{Color, Controller, NightlightMode};
//!
//! #[tokio::main]
//! async fn main() -> wled_lib::Result<()> {
//!     let controller = Controller::http("192.168.1.60").build().await?;
//!
//!     controller.power_on().await?;
//!     controller.set_color(Color::new(255, 120, 0)).await?;
//!     controller.set_effect(9).await?;
//!
//!     controller.set_nightlight_mode(NightlightMode::Fade).await?;
//!     controller.set_nightlight_duration(30).await?;
//!     controller.nightlight_on().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Legacy Query API
//!
//! ```no_run
//! use wled_lib::{Controller, Dialect};
//!
//! #[tokio::main]
//! async fn main() -> wled_lib::Result<()> {
//!     let controller = Controller::http("192.168.1.61")
//!         .with_dialect(Dialect::Query)
//!         .build()
//!         .await?;
//!
//!     controller.set_preset(4).await?;
//!     controller.start_nightlight(20, 0).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Status
//!
//! ```no_run
//! use wled_lib::{Controller, Specifier};
//!
//! #[tokio::main]
//! async fn main() -> wled_lib::Result<()> {
//!     let controller = Controller::http("192.168.1.60").build().await?;
//!
//!     let info = controller.status(Specifier::Info).await?;
//!     println!("running {}", info.get("ver")?);
//!     println!("{}s left on the timer", controller.timer_remaining().await?);
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Command outcomes are emitted as `tracing` events: `info` for a success,
//! `error` for a failure. Install any subscriber to see them; turn them off
//! per controller with [`Controller::disable_logging`].

pub mod command;
mod device;
pub mod error;
pub mod marker;
pub mod protocol;
pub mod response;
pub mod types;

pub use command::Command;
#[cfg(feature = "http")]
pub use device::{ControllerBuilder, HttpController};
pub use device::Controller;
pub use error::{Error, ParseError, ProtocolError, Result, SendError, ValueError};
pub use marker::HourMarker;
#[cfg(feature = "http")]
pub use protocol::HttpConfig;
pub use protocol::{Dialect, Transport};
pub use response::StatusDocument;
pub use types::{Bounds, Color, NightlightMode, Specifier};
