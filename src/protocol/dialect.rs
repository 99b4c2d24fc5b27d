// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire dialects.
//!
//! WLED firmware has answered two APIs over its lifetime: the JSON API
//! (`/json/...`) and the older query API (`/win?K=V&...`). A controller speaks
//! one of them, chosen at construction; the command surface is the same.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::{Command, CommandArgument};
use crate::error::{ParseError, ProtocolError};
use crate::protocol::encoding::{encode_json, encode_query};
use crate::protocol::{HttpResponse, Transport};
use crate::types::{Bounds, Specifier};

/// HTTP method of an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST` with a body.
    Post,
    /// `PUT` without a body.
    Put,
}

/// A request ready to hand to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: String,
    body: Option<String>,
}

impl Endpoint {
    /// A `GET` request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// A `POST` request for `path` carrying `body`.
    #[must_use]
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body.into()),
        }
    }

    /// A `PUT` request for `path`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: None,
        }
    }

    /// Returns the method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the path, including any query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Sends this request through `transport`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    pub async fn send<T: Transport>(&self, transport: &T) -> Result<HttpResponse, ProtocolError> {
        match self.method {
            Method::Get => transport.get(&self.path).await,
            Method::Post => {
                transport
                    .post(&self.path, self.body.as_deref().unwrap_or_default())
                    .await
            }
            Method::Put => transport.put(&self.path).await,
        }
    }
}

/// Operations whose endpoint depends on the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// Reachability probe performed at construction.
    Probe,
    /// Structured status for a specifier.
    Status(Specifier),
    /// Status in its raw text form.
    StatusText,
    /// Firmware build number.
    Version,
    /// Free heap in bytes.
    FreeHeap,
    /// Uptime in seconds.
    Uptime,
    /// Reboot.
    Reset,
    /// An encoded command payload.
    Command(&'a str),
}

/// The API variant a controller speaks.
///
/// # Examples
///
/// ```
/// use wled_lib::command::PowerCommand;
/// use wled_lib::protocol::Dialect;
///
/// let args = Dialect::Query.render(&PowerCommand::On).unwrap();
/// assert_eq!(Dialect::Query.encode(&args), "T=1");
///
/// let args = Dialect::Json.render(&PowerCommand::On).unwrap();
/// assert_eq!(Dialect::Json.encode(&args), r#"{"on":true}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// The JSON API: `POST /json/` with a JSON state object.
    #[default]
    Json,
    /// The legacy query API: `PUT /win?K=V&...`.
    Query,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Query => "query",
        }
    }

    /// Valid preset ids.
    #[must_use]
    pub const fn preset_bounds(self) -> Bounds {
        match self {
            Self::Json => Bounds::JSON_PRESET,
            Self::Query => Bounds::QUERY_PRESET,
        }
    }

    /// Valid effect ids. Older firmware behind the query API knows fewer effects.
    #[must_use]
    pub const fn effect_bounds(self) -> Bounds {
        match self {
            Self::Json => Bounds::JSON_EFFECT,
            Self::Query => Bounds::QUERY_EFFECT,
        }
    }

    /// Returns whether a status text reports the light as off.
    ///
    /// The JSON state is checked for a top-level `"on": false`; nested
    /// objects such as `nl` carry their own `on` flag. The query API's XML
    /// reports an off light as `<ac>0</ac>`.
    #[must_use]
    pub fn reports_power_off(self, status_text: &str) -> bool {
        match self {
            Self::Json => serde_json::from_str::<Value>(status_text)
                .is_ok_and(|state| state.get("on") == Some(&Value::Bool(false))),
            Self::Query => status_text.contains("<ac>0</ac>"),
        }
    }

    /// Returns the request for an operation.
    #[must_use]
    pub fn endpoint(self, operation: Operation<'_>) -> Endpoint {
        match (self, operation) {
            (Self::Json, Operation::Probe) => Endpoint::get("/json/"),
            (Self::Json, Operation::StatusText) => Endpoint::get("/json/state"),
            (Self::Query, Operation::Probe | Operation::StatusText) => Endpoint::get("/win"),
            (_, Operation::Status(spec)) => Endpoint::get(format!("/json/{spec}")),
            (_, Operation::Version) => Endpoint::get("/version"),
            (_, Operation::FreeHeap) => Endpoint::get("/freeheap"),
            (_, Operation::Uptime) => Endpoint::get("/uptime"),
            (_, Operation::Reset) => Endpoint::get("/reset"),
            (Self::Json, Operation::Command(payload)) => Endpoint::post("/json/", payload),
            (Self::Query, Operation::Command(payload)) => Endpoint::put(format!("/win?{payload}")),
        }
    }

    /// Renders a command into this dialect's arguments.
    ///
    /// Returns `None` when the dialect has no form for the command.
    pub fn render<C: Command + ?Sized>(self, command: &C) -> Option<Vec<CommandArgument>> {
        match self {
            Self::Json => command.json_arguments(),
            Self::Query => command.query_arguments(),
        }
    }

    /// Encodes arguments into this dialect's payload.
    #[must_use]
    pub fn encode(self, arguments: &[CommandArgument]) -> String {
        match self {
            Self::Json => encode_json(arguments),
            Self::Query => encode_query(arguments),
        }
    }

    /// Extracts the status token from a successful command response.
    ///
    /// The JSON API answers with a one-key object such as `{"success":true}`
    /// or `{"error":9}`; the key is the token. The query API answers with its
    /// XML status document, so the token is the HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if a JSON response is not an object with exactly
    /// one key.
    pub fn interpret(self, response: &HttpResponse) -> Result<String, ParseError> {
        match self {
            Self::Json => {
                let object: Map<String, Value> = serde_json::from_str(response.body())?;
                let mut keys = object.keys();
                match (keys.next(), keys.next()) {
                    (Some(token), None) => Ok(token.clone()),
                    _ => Err(ParseError::UnexpectedFormat(format!(
                        "expected a single top-level key, got {}",
                        object.len()
                    ))),
                }
            }
            Self::Query => Ok(response.status().to_string()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{EffectCommand, LiveCommand};

    #[test]
    fn json_endpoints() {
        assert_eq!(
            Dialect::Json.endpoint(Operation::Probe),
            Endpoint::get("/json/")
        );
        assert_eq!(
            Dialect::Json.endpoint(Operation::Status(Specifier::Info)),
            Endpoint::get("/json/info")
        );
        assert_eq!(
            Dialect::Json.endpoint(Operation::Command(r#"{"on":true}"#)),
            Endpoint::post("/json/", r#"{"on":true}"#)
        );
    }

    #[test]
    fn query_endpoints() {
        assert_eq!(
            Dialect::Query.endpoint(Operation::Probe),
            Endpoint::get("/win")
        );
        let endpoint = Dialect::Query.endpoint(Operation::Command("T=1&A=16"));
        assert_eq!(endpoint.method(), Method::Put);
        assert_eq!(endpoint.path(), "/win?T=1&A=16");
        assert!(endpoint.body().is_none());
    }

    #[test]
    fn shared_endpoints() {
        for dialect in [Dialect::Json, Dialect::Query] {
            assert_eq!(dialect.endpoint(Operation::Reset), Endpoint::get("/reset"));
            assert_eq!(
                dialect.endpoint(Operation::FreeHeap),
                Endpoint::get("/freeheap")
            );
        }
    }

    #[test]
    fn render_respects_missing_forms() {
        assert!(Dialect::Query.render(&LiveCommand::Enable).is_none());
        assert!(Dialect::Json.render(&LiveCommand::Enable).is_some());
    }

    #[test]
    fn encode_merges_segment_in_json() {
        let mut args = Dialect::Json.render(&EffectCommand::Effect(3)).unwrap();
        args.extend(Dialect::Json.render(&EffectCommand::Speed(9)).unwrap());
        assert_eq!(Dialect::Json.encode(&args), r#"{"seg":{"fx":3,"sx":9}}"#);
    }

    #[test]
    fn interpret_json_token() {
        let ok = HttpResponse::new(200, r#"{"success":true}"#);
        assert_eq!(Dialect::Json.interpret(&ok).unwrap(), "success");

        let err = HttpResponse::new(200, r#"{"error":9}"#);
        assert_eq!(Dialect::Json.interpret(&err).unwrap(), "error");
    }

    #[test]
    fn interpret_json_rejects_garbage() {
        assert!(Dialect::Json.interpret(&HttpResponse::new(200, "OK")).is_err());
        assert!(Dialect::Json.interpret(&HttpResponse::new(200, "{}")).is_err());
        assert!(Dialect::Json.interpret(&HttpResponse::new(200, "[1]")).is_err());
    }

    #[test]
    fn interpret_json_rejects_ambiguous_reply() {
        let mixed = HttpResponse::new(200, r#"{"error":1,"success":true}"#);
        assert!(matches!(
            Dialect::Json.interpret(&mixed),
            Err(ParseError::UnexpectedFormat(reason)) if reason.contains("got 2")
        ));
    }

    #[test]
    fn interpret_query_uses_status_code() {
        let response = HttpResponse::new(200, "<?xml version=\"1.0\" ?><vs><ac>0</ac></vs>");
        assert_eq!(Dialect::Query.interpret(&response).unwrap(), "200");
    }

    #[test]
    fn power_off_detection() {
        assert!(Dialect::Json.reports_power_off(r#"{"on":false,"bri":80}"#));
        assert!(!Dialect::Json.reports_power_off(
            r#"{"on":true,"bri":80,"nl":{"on":false,"rem":-1}}"#
        ));
        assert!(Dialect::Query.reports_power_off("<vs><ac>0</ac><cl>255</cl></vs>"));
        assert!(!Dialect::Query.reports_power_off("<vs><ac>128</ac></vs>"));
    }

    #[test]
    fn per_dialect_bounds() {
        assert_eq!(Dialect::Json.effect_bounds().max(), 117);
        assert_eq!(Dialect::Query.effect_bounds().max(), 101);
        assert_eq!(Dialect::Json.preset_bounds().min(), -1);
        assert_eq!(Dialect::Query.preset_bounds().max(), 255);
    }
}
