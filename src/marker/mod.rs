// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hourly flash signal.
//!
//! [`HourMarker`] polls the wall clock and, at the top of every hour while the
//! light is on, flashes a preset once per hour on a 12-hour dial before
//! settling on a baseline preset.
//!
//! ```no_run
//! use std::time::Duration;
//! use tokio::sync::watch;
//! use wled_lib::{Controller, HourMarker};
//!
//! # async fn example() -> wled_lib::Result<()> {
//! let controller = Controller::http("192.168.1.60").build().await?;
//! let (stop, stopped) = watch::channel(false);
//!
//! let marker = HourMarker::new(Duration::from_secs(20)).with_mark_preset(3);
//! // Stop after a working day
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_secs(8 * 3600)).await;
//!     stop.send(true).ok();
//! });
//! marker.run(&controller, stopped).await?;
//! # Ok(())
//! # }
//! ```

mod clock;

pub use clock::{Clock, SystemClock};

use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use tokio::sync::watch;

use crate::device::Controller;
use crate::error::Result;
use crate::protocol::{Dialect, Transport};
use crate::types::Bounds;

/// Pause between the steps of a marking script.
const STEP_PAUSE: Duration = Duration::from_secs(1);

/// Number of extra flashes after the first one for `hour`.
///
/// Counts `hour % 12 - 1`; midnight and noon wrap to 12.
///
/// ```
/// use wled_lib::marker::repeat_count;
///
/// assert_eq!(repeat_count(0), 12);
/// assert_eq!(repeat_count(1), 0);
/// assert_eq!(repeat_count(15), 2);
/// ```
#[must_use]
pub fn repeat_count(hour: u32) -> u32 {
    (hour % 12).checked_sub(1).unwrap_or(12)
}

/// Whether `now` is the first minute of an hour not yet marked.
#[must_use]
pub fn is_unmarked_new_hour(now: NaiveTime, last_marked_hour: u32) -> bool {
    now.minute() == 0 && now.hour() != last_marked_hour
}

/// Flashes the light at the top of every hour.
///
/// The marker never fires for the hour it was started in.
#[derive(Debug, Clone)]
pub struct HourMarker<C: Clock = SystemClock> {
    interval: Duration,
    mark_preset: i64,
    flash_brightness: i64,
    baseline_preset: Option<i64>,
    clock: C,
}

impl HourMarker<SystemClock> {
    /// Default preset flashed on every mark.
    pub const DEFAULT_MARK_PRESET: i64 = 1;
    /// Default brightness between flashes.
    pub const DEFAULT_FLASH_BRIGHTNESS: i64 = 16;

    /// Creates a marker that checks the clock every `interval`.
    ///
    /// The interval should be shorter than a minute or the top of an hour
    /// can be missed.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            mark_preset: Self::DEFAULT_MARK_PRESET,
            flash_brightness: Self::DEFAULT_FLASH_BRIGHTNESS,
            baseline_preset: None,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> HourMarker<C> {
    /// Sets the preset flashed on every mark.
    #[must_use]
    pub fn with_mark_preset(mut self, preset: i64) -> Self {
        self.mark_preset = preset;
        self
    }

    /// Sets the brightness the light drops to between flashes.
    #[must_use]
    pub fn with_flash_brightness(mut self, brightness: i64) -> Self {
        self.flash_brightness = brightness;
        self
    }

    /// Sets the preset applied once marking is done.
    ///
    /// Defaults to the highest preset id of the controller's dialect.
    #[must_use]
    pub fn with_baseline_preset(mut self, preset: i64) -> Self {
        self.baseline_preset = Some(preset);
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock<K: Clock>(self, clock: K) -> HourMarker<K> {
        HourMarker {
            interval: self.interval,
            mark_preset: self.mark_preset,
            flash_brightness: self.flash_brightness,
            baseline_preset: self.baseline_preset,
            clock,
        }
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks the presets and flash brightness against `dialect`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for the first setting out of range.
    pub fn validate(&self, dialect: Dialect) -> Result<()> {
        let presets = dialect.preset_bounds();
        presets.check(self.mark_preset)?;
        Bounds::BYTE.check(self.flash_brightness)?;
        if let Some(baseline) = self.baseline_preset {
            presets.check(baseline)?;
        }
        Ok(())
    }

    /// Runs until `stop` turns `true` or its sender is dropped.
    ///
    /// The settings are validated against the controller's dialect before
    /// the first poll, so a bad setting fails without touching the device.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for an invalid setting, otherwise the first
    /// controller error; nothing is retried.
    pub async fn run<T: Transport>(
        &self,
        controller: &Controller<T>,
        mut stop: watch::Receiver<bool>,
    ) -> Result<()> {
        self.validate(controller.dialect())?;

        let mut last_marked_hour = self.clock.now().hour();
        tracing::debug!(
            hour = last_marked_hour,
            interval_ms = self.interval.as_millis(),
            "Hour marker started"
        );

        while !*stop.borrow_and_update() {
            let powered = controller.is_powered_on().await?;
            let now = self.clock.now();

            if powered && is_unmarked_new_hour(now, last_marked_hour) {
                last_marked_hour = now.hour();
                tracing::info!(hour = last_marked_hour, "hour marked");
                if !self.mark(controller, last_marked_hour, &mut stop).await? {
                    break;
                }
            }

            if !pause(self.interval, &mut stop).await {
                break;
            }
        }

        tracing::debug!("Hour marker stopped");
        Ok(())
    }

    /// Plays the marking script. Returns `false` if stopped part way.
    async fn mark<T: Transport>(
        &self,
        controller: &Controller<T>,
        hour: u32,
        stop: &mut watch::Receiver<bool>,
    ) -> Result<bool> {
        controller.release_preset().await?;
        controller.set_preset(self.mark_preset).await?;
        if !pause(STEP_PAUSE, stop).await {
            return Ok(false);
        }

        for _ in 0..repeat_count(hour) {
            controller.set_brightness(self.flash_brightness).await?;
            if !pause(STEP_PAUSE, stop).await {
                return Ok(false);
            }
            controller.set_preset(self.mark_preset).await?;
            if !pause(STEP_PAUSE, stop).await {
                return Ok(false);
            }
        }

        let baseline = self
            .baseline_preset
            .unwrap_or_else(|| controller.dialect().preset_bounds().max());
        controller.set_preset(baseline).await?;
        Ok(true)
    }
}

/// Sleeps for `duration`. Returns `false` as soon as a stop is requested.
async fn pause(duration: Duration, stop: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return true,
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow_and_update() {
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn repeat_count_on_twelve_hour_dial() {
        assert_eq!(repeat_count(0), 12);
        assert_eq!(repeat_count(12), 12);
        assert_eq!(repeat_count(1), 0);
        assert_eq!(repeat_count(13), 0);
        assert_eq!(repeat_count(11), 10);
        assert_eq!(repeat_count(23), 10);
    }

    #[test]
    fn new_hour_requires_minute_zero() {
        assert!(is_unmarked_new_hour(at(14, 0), 13));
        assert!(!is_unmarked_new_hour(at(14, 1), 13));
        assert!(!is_unmarked_new_hour(at(14, 0), 14));
    }

    #[test]
    fn validate_follows_dialect() {
        let marker = HourMarker::new(Duration::from_secs(20));
        assert!(marker.validate(Dialect::Json).is_ok());
        assert!(marker.validate(Dialect::Query).is_ok());

        let baseline = marker.clone().with_baseline_preset(255);
        assert!(baseline.validate(Dialect::Json).is_err());
        assert!(baseline.validate(Dialect::Query).is_ok());

        let mark = marker.clone().with_mark_preset(-1);
        assert!(mark.validate(Dialect::Json).is_ok());
        assert!(mark.validate(Dialect::Query).is_err());

        let flash = marker.with_flash_brightness(256);
        assert!(matches!(
            flash.validate(Dialect::Json),
            Err(crate::error::Error::Value(crate::error::ValueError::OutOfRange {
                value: 256,
                ..
            }))
        ));
    }

    #[test]
    fn defaults() {
        let marker = HourMarker::new(Duration::from_secs(20));
        assert_eq!(marker.interval(), Duration::from_secs(20));
        assert_eq!(marker.mark_preset, 1);
        assert_eq!(marker.flash_brightness, 16);
        assert!(marker.baseline_preset.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_completes_without_stop() {
        let (_tx, mut rx) = watch::channel(false);
        assert!(pause(Duration::from_secs(5), &mut rx).await);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_ends_on_stop() {
        let (tx, mut rx) = watch::channel(false);
        let stopper = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            tx.send(true).unwrap();
        };
        let (running, ()) = tokio::join!(pause(Duration::from_secs(60), &mut rx), stopper);
        assert!(!running);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_ignores_false_updates() {
        let (tx, mut rx) = watch::channel(false);
        let nudger = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            tx.send(false).unwrap();
        };
        let (running, ()) = tokio::join!(pause(Duration::from_secs(5), &mut rx), nudger);
        assert!(running);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_ends_when_sender_dropped() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);
        assert!(!pause(Duration::from_secs(60), &mut rx).await);
    }
}
