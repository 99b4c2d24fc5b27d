// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the hour marker, on paused tokio time.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};
use tokio::sync::watch;
use tokio::time::Instant;
use wled_lib::protocol::{HttpResponse, Transport};
use wled_lib::{Controller, Dialect, Error, HourMarker, ProtocolError, ValueError};

const INTERVAL: Duration = Duration::from_secs(20);

/// In-memory controller that records every command payload.
#[derive(Debug)]
struct FakeWled {
    powered: bool,
    reject: bool,
    commands: Mutex<Vec<String>>,
}

impl FakeWled {
    fn on() -> Self {
        Self {
            powered: true,
            reject: false,
            commands: Mutex::new(Vec::new()),
        }
    }

    fn off() -> Self {
        Self {
            powered: false,
            ..Self::on()
        }
    }

    fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::on()
        }
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl Transport for FakeWled {
    async fn get(&self, path: &str) -> Result<HttpResponse, ProtocolError> {
        let body = match (path, self.powered) {
            ("/win", true) => "<vs><ac>128</ac></vs>",
            ("/win", false) => "<vs><ac>0</ac></vs>",
            (_, true) => r#"{"on":true,"bri":128,"nl":{"on":false}}"#,
            (_, false) => r#"{"on":false,"bri":128,"nl":{"on":false}}"#,
        };
        Ok(HttpResponse::new(200, body))
    }

    async fn post(&self, _path: &str, body: &str) -> Result<HttpResponse, ProtocolError> {
        self.commands.lock().unwrap().push(body.to_string());
        let reply = if self.reject {
            r#"{"error":1}"#
        } else {
            r#"{"success":true}"#
        };
        Ok(HttpResponse::new(200, reply))
    }

    async fn put(&self, path: &str) -> Result<HttpResponse, ProtocolError> {
        let query = path.trim_start_matches("/win?");
        self.commands.lock().unwrap().push(query.to_string());
        Ok(HttpResponse::new(200, "<vs><ac>128</ac></vs>"))
    }
}

/// A wall clock that starts at `hour:minute:second` and follows tokio time.
fn clock_from(hour: u32, minute: u32, second: u32) -> impl Fn() -> NaiveTime {
    let base = NaiveTime::from_hms_opt(hour, minute, second).unwrap();
    let start = Instant::now();
    move || base + TimeDelta::from_std(start.elapsed()).unwrap()
}

async fn run_for(
    marker: &HourMarker<impl wled_lib::marker::Clock>,
    controller: &Controller<FakeWled>,
    runtime: Duration,
) -> wled_lib::Result<()> {
    let (stop, stopped) = watch::channel(false);
    let stopper = async move {
        tokio::time::sleep(runtime).await;
        // The loop may already have ended with an error.
        stop.send(true).ok();
    };
    let (result, ()) = tokio::join!(marker.run(controller, stopped), stopper);
    result
}

#[tokio::test(start_paused = true)]
async fn one_o_clock_flashes_once() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(12, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(90))
        .await
        .unwrap();

    assert_eq!(
        controller.transport().commands(),
        vec![r#"{"ps":-1}"#, r#"{"ps":1}"#, r#"{"ps":250}"#]
    );
}

#[tokio::test(start_paused = true)]
async fn midnight_flashes_twelve_more_times() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(23, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(120))
        .await
        .unwrap();

    let commands = controller.transport().commands();
    assert_eq!(commands.len(), 27);
    assert_eq!(commands[0], r#"{"ps":-1}"#);
    assert_eq!(commands[1], r#"{"ps":1}"#);
    for pair in commands[2..26].chunks(2) {
        assert_eq!(pair, [r#"{"bri":16}"#, r#"{"ps":1}"#]);
    }
    assert_eq!(commands[26], r#"{"ps":250}"#);
}

#[tokio::test(start_paused = true)]
async fn custom_presets_and_brightness() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL)
        .with_mark_preset(7)
        .with_flash_brightness(40)
        .with_baseline_preset(2)
        .with_clock(clock_from(1, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        controller.transport().commands(),
        vec![r#"{"ps":-1}"#, r#"{"ps":7}"#, r#"{"bri":40}"#, r#"{"ps":7}"#, r#"{"ps":2}"#]
    );
}

#[tokio::test(start_paused = true)]
async fn query_dialect_uses_legacy_tokens() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Query)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(12, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        controller.transport().commands(),
        vec!["PS=255", "PL=1", "PL=255"]
    );
}

#[tokio::test(start_paused = true)]
async fn powered_off_light_is_left_alone() {
    let controller = Controller::with_transport(FakeWled::off(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(12, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(90))
        .await
        .unwrap();

    assert!(controller.transport().commands().is_empty());
}

#[tokio::test(start_paused = true)]
async fn start_hour_is_not_marked() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(13, 0, 0));

    run_for(&marker, &controller, Duration::from_secs(50))
        .await
        .unwrap();

    assert!(controller.transport().commands().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_during_script_returns_cleanly() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(23, 59, 50));

    run_for(&marker, &controller, Duration::from_secs(30))
        .await
        .unwrap();

    let commands = controller.transport().commands();
    assert!(commands.len() > 2);
    assert!(!commands.contains(&r#"{"ps":250}"#.to_string()));
}

#[tokio::test(start_paused = true)]
async fn dropped_sender_stops_the_loop() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(10, 0, 0));

    let (stop, stopped) = watch::channel(false);
    drop(stop);
    marker.run(&controller, stopped).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn device_error_ends_the_loop() {
    let controller = Controller::with_transport(FakeWled::rejecting(), "fake", Dialect::Json)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL).with_clock(clock_from(12, 59, 50));

    let err = run_for(&marker, &controller, Duration::from_secs(90))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RejectedCommand { payload } if payload == r#"{"ps":-1}"#));
    assert_eq!(controller.transport().commands().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn invalid_mark_preset_fails_before_any_request() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Json)
        .await
        .unwrap();
    // Far from the top of the hour: the setting must still be rejected.
    let marker = HourMarker::new(INTERVAL)
        .with_mark_preset(400)
        .with_clock(clock_from(12, 10, 0));

    let err = run_for(&marker, &controller, Duration::from_secs(50))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Value(ValueError::OutOfRange {
            value: 400,
            min: -1,
            max: 250
        })
    ));
    assert!(controller.transport().commands().is_empty());
}

#[tokio::test(start_paused = true)]
async fn invalid_settings_leave_the_preset_alone() {
    let controller = Controller::with_transport(FakeWled::on(), "fake", Dialect::Query)
        .await
        .unwrap();
    let marker = HourMarker::new(INTERVAL)
        .with_flash_brightness(300)
        .with_clock(clock_from(12, 59, 50));

    let err = run_for(&marker, &controller, Duration::from_secs(90))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Value(_)));
    assert!(controller.transport().commands().is_empty());
}
