// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level controller abstraction for WLED devices.
//!
//! A [`Controller`] wraps one [`Transport`] and one [`Dialect`]. Every
//! operation validates its arguments first, then issues exactly one request
//! and awaits it; nothing is cached between calls.
//!
//! ```no_run
//! use wled_lib::{Controller, Dialect};
//!
//! # async fn example() -> wled_lib::Result<()> {
//! let controller = Controller::http("192.168.1.60")
//!     .with_dialect(Dialect::Json)
//!     .build()
//!     .await?;
//!
//! controller.power_on().await?;
//! controller.set_brightness(128).await?;
//! println!("uptime: {}s", controller.uptime().await?);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod builder;

#[cfg(feature = "http")]
pub use builder::ControllerBuilder;

use std::time::Duration;

use serde_json::Value;

use crate::command::{
    BrightnessCommand, ColorCommand, Command, EffectCommand, FreezeCommand, LiveCommand,
    NightlightCommand, PowerCommand, PresetCommand, TransitionCommand,
};
use crate::error::{Error, ProtocolError, SendError};
use crate::protocol::{Dialect, Operation, Transport};
#[cfg(feature = "http")]
use crate::protocol::HttpClient;
use crate::response::StatusDocument;
use crate::types::{Bounds, Color, NightlightMode, Specifier, transition_deciseconds};

/// Status token the JSON API uses to reject a command.
const REJECTED_TOKEN: &str = "error";

/// Pause between the two halves of [`Controller::restart_power`].
const RESTART_PAUSE: Duration = Duration::from_millis(100);

/// A controller speaking HTTP through reqwest.
#[cfg(feature = "http")]
pub type HttpController = Controller<HttpClient>;

/// A WLED controller bound to one target.
///
/// # Type Parameter
///
/// `T` is the transport. [`HttpClient`](crate::protocol::HttpClient) is used
/// in production; tests substitute an in-memory implementation.
///
/// # Creating a Controller
///
/// Use [`Controller::http`] for a reqwest-backed controller, or
/// [`Controller::with_transport`] for any other [`Transport`]. Both probe the
/// target before handing the controller out.
#[derive(Debug)]
pub struct Controller<T: Transport> {
    target: String,
    dialect: Dialect,
    transport: T,
    logging: bool,
}

#[cfg(feature = "http")]
impl Controller<HttpClient> {
    /// Starts building an HTTP controller for `target` (host, `host:port`,
    /// or a full URL).
    #[must_use]
    pub fn http(target: impl Into<String>) -> ControllerBuilder {
        ControllerBuilder::new(target)
    }
}

impl<T: Transport> Controller<T> {
    /// Creates a controller over `transport` and probes the target.
    ///
    /// Command logging starts enabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnreachableTarget` if the probe fails.
    pub async fn with_transport(
        transport: T,
        target: impl Into<String>,
        dialect: Dialect,
    ) -> Result<Self, Error> {
        let controller = Self {
            target: target.into(),
            dialect,
            transport,
            logging: true,
        };

        if let Err(source) = controller.probe().await {
            tracing::debug!(host = %controller.target, error = %source, "Probe failed");
            return Err(Error::UnreachableTarget {
                target: controller.target,
                source: Box::new(source),
            });
        }

        Ok(controller)
    }

    async fn probe(&self) -> Result<(), Error> {
        let endpoint = self.dialect.endpoint(Operation::Probe);
        let body = endpoint.send(&self.transport).await?.into_success_body()?;

        if self.dialect == Dialect::Json {
            let is_object = StatusDocument::parse(&body)
                .is_ok_and(|document| document.as_value().is_object());
            if !is_object {
                return Err(Error::MalformedResponse {
                    endpoint: endpoint.path().to_string(),
                    body,
                });
            }
        }

        Ok(())
    }

    /// Returns the target this controller was built for.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns whether command outcomes are logged.
    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        self.logging
    }

    /// Logs the outcome of every subsequent command.
    pub fn enable_logging(&mut self) {
        self.logging = true;
    }

    /// Stops logging command outcomes.
    pub fn disable_logging(&mut self) {
        self.logging = false;
    }

    // ========== Read Operations ==========

    /// Returns the firmware build number.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails, or
    /// `Error::MalformedResponse` if the body is not an integer.
    pub async fn version(&self) -> Result<i64, Error> {
        self.read_integer(Operation::Version).await
    }

    /// Returns the free heap in bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails, or
    /// `Error::MalformedResponse` if the body is not an integer.
    pub async fn free_heap(&self) -> Result<i64, Error> {
        self.read_integer(Operation::FreeHeap).await
    }

    /// Returns the uptime in seconds.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails, or
    /// `Error::MalformedResponse` if the body is not an integer.
    pub async fn uptime(&self) -> Result<i64, Error> {
        self.read_integer(Operation::Uptime).await
    }

    async fn read_integer(&self, operation: Operation<'_>) -> Result<i64, Error> {
        let endpoint = self.dialect.endpoint(operation);
        let body = endpoint.send(&self.transport).await?.into_success_body()?;
        body.trim()
            .parse()
            .map_err(|_| Error::MalformedResponse {
                endpoint: endpoint.path().to_string(),
                body,
            })
    }

    /// Fetches the status document for `specifier`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails, or
    /// `Error::MalformedResponse` if the body is not JSON.
    pub async fn status(&self, specifier: Specifier) -> Result<StatusDocument, Error> {
        let endpoint = self.dialect.endpoint(Operation::Status(specifier));
        let body = endpoint.send(&self.transport).await?.into_success_body()?;
        StatusDocument::parse(&body).map_err(|_| Error::MalformedResponse {
            endpoint: endpoint.path().to_string(),
            body,
        })
    }

    /// Fetches the status document for `specifier` and projects a top-level
    /// key out of it.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownKey` if the key is absent, plus the errors of
    /// [`status`](Self::status).
    pub async fn status_key(&self, specifier: Specifier, key: &str) -> Result<Value, Error> {
        self.status(specifier).await?.take(key)
    }

    /// Returns the seconds left on the nightlight timer (`-1` when idle).
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownKey` if the state lacks `nl.rem`, or
    /// `Error::MalformedResponse` if the value is not an integer.
    pub async fn timer_remaining(&self) -> Result<i64, Error> {
        let nightlight = self.status_key(Specifier::State, "nl").await?;
        let remaining = nightlight
            .get("rem")
            .ok_or_else(|| Error::UnknownKey("nl.rem".to_string()))?;
        remaining.as_i64().ok_or_else(|| Error::MalformedResponse {
            endpoint: self
                .dialect
                .endpoint(Operation::Status(Specifier::State))
                .path()
                .to_string(),
            body: remaining.to_string(),
        })
    }

    /// Returns the raw status text of the dialect's status endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn status_text(&self) -> Result<String, Error> {
        let endpoint = self.dialect.endpoint(Operation::StatusText);
        Ok(endpoint.send(&self.transport).await?.into_success_body()?)
    }

    /// Returns whether the light is on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn is_powered_on(&self) -> Result<bool, Error> {
        let text = self.status_text().await?;
        Ok(!self.dialect.reports_power_off(&text))
    }

    // ========== Device Control ==========

    /// Reboots the controller and returns the HTTP status code.
    ///
    /// The body is not interpreted.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the request fails.
    pub async fn reboot(&self) -> Result<u16, Error> {
        let endpoint = self.dialect.endpoint(Operation::Reset);
        let response = endpoint.send(&self.transport).await?;
        tracing::debug!(host = %self.target, status = response.status(), "Reboot requested");
        Ok(response.status())
    }

    /// Sends a command and returns the device's status token.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` if the dialect has no form for the
    /// command, `Error::RejectedCommand` if the device answers with an error
    /// token, or `Error::CommandFailed` if the exchange fails.
    pub async fn send_command<C: Command + ?Sized>(&self, command: &C) -> Result<String, Error> {
        let arguments =
            self.dialect
                .render(command)
                .ok_or_else(|| Error::UnsupportedCommand {
                    command: command.name(),
                    dialect: self.dialect.name(),
                })?;
        let payload = self.dialect.encode(&arguments);
        self.send_payload(&payload).await
    }

    async fn send_payload(&self, payload: &str) -> Result<String, Error> {
        match self.exchange(payload).await {
            Ok(token) if token == REJECTED_TOKEN => {
                self.log_failure(payload);
                Err(Error::RejectedCommand {
                    payload: payload.to_string(),
                })
            }
            Ok(token) => {
                if self.logging {
                    tracing::info!("{payload} --> {token}");
                }
                Ok(token)
            }
            Err(source) => {
                self.log_failure(payload);
                Err(Error::CommandFailed {
                    payload: payload.to_string(),
                    source,
                })
            }
        }
    }

    async fn exchange(&self, payload: &str) -> Result<String, SendError> {
        let endpoint = self.dialect.endpoint(Operation::Command(payload));
        let response = endpoint.send(&self.transport).await?;
        if !response.is_success() {
            return Err(ProtocolError::Status(response.status()).into());
        }
        Ok(self.dialect.interpret(&response)?)
    }

    fn log_failure(&self, payload: &str) {
        if self.logging {
            tracing::error!("major error occurred with argument {payload}");
        }
    }

    async fn apply<C: Command>(&self, command: &C) -> Result<(), Error> {
        self.send_command(command).await.map(drop)
    }

    // ========== Power Control ==========

    /// Turns the light on.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn power_on(&self) -> Result<(), Error> {
        self.apply(&PowerCommand::On).await
    }

    /// Turns the light off.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn power_off(&self) -> Result<(), Error> {
        self.apply(&PowerCommand::Off).await
    }

    /// Flips the power state.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle(&self) -> Result<(), Error> {
        self.apply(&PowerCommand::Toggle).await
    }

    /// Turns the light off, waits briefly, and turns it back on.
    ///
    /// This cancels a running nightlight timer on firmware that has no
    /// explicit way to do so.
    ///
    /// # Errors
    ///
    /// Returns the first failing command's error; the light stays off if
    /// the second command fails.
    pub async fn restart_power(&self) -> Result<(), Error> {
        self.power_off().await?;
        tokio::time::sleep(RESTART_PAUSE).await;
        self.power_on().await
    }

    /// Enables live override.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn live_on(&self) -> Result<(), Error> {
        self.apply(&LiveCommand::Enable).await
    }

    /// Disables live override.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn live_off(&self) -> Result<(), Error> {
        self.apply(&LiveCommand::Disable).await
    }

    /// Freezes the segment animation.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn freeze(&self) -> Result<(), Error> {
        self.apply(&FreezeCommand::Freeze).await
    }

    /// Resumes the segment animation.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn unfreeze(&self) -> Result<(), Error> {
        self.apply(&FreezeCommand::Unfreeze).await
    }

    // ========== Light Control ==========

    /// Sets the master brightness (0-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_brightness(&self, brightness: i64) -> Result<(), Error> {
        let brightness = Bounds::BYTE.check_into(brightness)?;
        self.apply(&BrightnessCommand(brightness)).await
    }

    /// Sets the transition time in milliseconds.
    ///
    /// The device counts in deciseconds, so the value is floored to a
    /// multiple of 100 ms.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the converted value is out of range, or the
    /// command's error.
    pub async fn set_transition(&self, milliseconds: i64) -> Result<(), Error> {
        let deciseconds = transition_deciseconds(milliseconds)?;
        self.apply(&TransitionCommand(deciseconds)).await
    }

    /// Applies a preset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the id is out of the dialect's preset range,
    /// or the command's error.
    pub async fn set_preset(&self, preset: i64) -> Result<(), Error> {
        let preset = self.dialect.preset_bounds().check_into(preset)?;
        self.apply(&PresetCommand::Apply(preset)).await
    }

    /// Selects "no preset".
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn release_preset(&self) -> Result<(), Error> {
        self.apply(&PresetCommand::Release).await
    }

    /// Sets the primary color.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn set_color(&self, color: Color) -> Result<(), Error> {
        self.apply(&ColorCommand::primary(color)).await
    }

    /// Sets the primary color from unchecked channel values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if any channel is out of range, or the
    /// command's error.
    pub async fn set_rgb(&self, red: i64, green: i64, blue: i64) -> Result<(), Error> {
        let color = Color::try_new(red, green, blue)?;
        self.set_color(color).await
    }

    /// Sets the segment's primary, secondary and tertiary colors.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` unless one to three colors are given,
    /// `Error::UnsupportedCommand` for three colors on the query dialect, or
    /// the command's error.
    pub async fn set_colors(&self, colors: &[Color]) -> Result<(), Error> {
        let command = ColorCommand::new(colors.to_vec())?;
        self.apply(&command).await
    }

    // ========== Effects ==========

    /// Selects an effect by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if the id is out of the dialect's effect range,
    /// or the command's error.
    pub async fn set_effect(&self, effect: i64) -> Result<(), Error> {
        let effect = self.dialect.effect_bounds().check_into(effect)?;
        self.apply(&EffectCommand::Effect(effect)).await
    }

    /// Sets the effect speed (0-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_effect_speed(&self, speed: i64) -> Result<(), Error> {
        let speed = Bounds::BYTE.check_into(speed)?;
        self.apply(&EffectCommand::Speed(speed)).await
    }

    /// Sets the effect intensity (0-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_effect_intensity(&self, intensity: i64) -> Result<(), Error> {
        let intensity = Bounds::BYTE.check_into(intensity)?;
        self.apply(&EffectCommand::Intensity(intensity)).await
    }

    /// Selects a color palette by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_palette(&self, palette: i64) -> Result<(), Error> {
        let palette = Bounds::BYTE.check_into(palette)?;
        self.apply(&EffectCommand::Palette(palette)).await
    }

    // ========== Nightlight ==========

    /// Starts the nightlight timer with its stored settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn nightlight_on(&self) -> Result<(), Error> {
        self.apply(&NightlightCommand::Enable).await
    }

    /// Stops the nightlight timer.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn nightlight_off(&self) -> Result<(), Error> {
        self.apply(&NightlightCommand::Disable).await
    }

    /// Sets the nightlight duration in minutes (0-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_nightlight_duration(&self, minutes: i64) -> Result<(), Error> {
        let minutes = Bounds::BYTE.check_into(minutes)?;
        self.apply(&NightlightCommand::Duration(minutes)).await
    }

    /// Sets how the nightlight reaches its target.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCommand` on the query dialect, or the
    /// command's error.
    pub async fn set_nightlight_mode(&self, mode: NightlightMode) -> Result<(), Error> {
        self.apply(&NightlightCommand::Mode(mode)).await
    }

    /// Sets the brightness the nightlight ends at (0-255).
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn set_nightlight_brightness(&self, brightness: i64) -> Result<(), Error> {
        let brightness = Bounds::BYTE.check_into(brightness)?;
        self.apply(&NightlightCommand::TargetBrightness(brightness))
            .await
    }

    /// Starts the nightlight with a duration and target in one request.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if either value is out of range, or the
    /// command's error.
    pub async fn start_nightlight(&self, minutes: i64, target: i64) -> Result<(), Error> {
        let duration = Bounds::BYTE.check_into(minutes)?;
        let target = Bounds::BYTE.check_into(target)?;
        self.apply(&NightlightCommand::Start { duration, target })
            .await
    }

    /// Stops the nightlight and sets the target for its next run.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` if out of range, or the command's error.
    pub async fn stop_nightlight(&self, target: i64) -> Result<(), Error> {
        let target = Bounds::BYTE.check_into(target)?;
        self.apply(&NightlightCommand::Stop { target }).await
    }
}
