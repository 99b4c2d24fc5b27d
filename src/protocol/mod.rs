// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport and wire-format plumbing.
//!
//! This module provides the pieces between a typed command and the bytes on
//! the wire:
//!
//! - [`Transport`]: the HTTP collaborator contract (`GET`/`POST`/`PUT`)
//! - [`HttpClient`]: the reqwest-backed transport, configured by [`HttpConfig`]
//! - [`Dialect`]: JSON API or legacy query API, chosen per controller
//! - [`encode_json`] / [`encode_query`]: payload encoders for each dialect

mod dialect;
mod encoding;
#[cfg(feature = "http")]
mod http;

pub use dialect::{Dialect, Endpoint, Method, Operation};
pub use encoding::{encode_json, encode_query, to_json_object};
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::error::ProtocolError;

/// Status code and body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response and returns the body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Returns whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body if the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Status` otherwise.
    pub fn into_success_body(self) -> Result<String, ProtocolError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ProtocolError::Status(self.status))
        }
    }
}

/// The HTTP collaborator a controller talks through.
///
/// Paths are relative to the device root (e.g. `/json/state`). Implementations
/// return non-2xx responses as values; only failures to complete the exchange
/// are errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs a `GET`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    async fn get(&self, path: &str) -> Result<HttpResponse, ProtocolError>;

    /// Performs a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    async fn post(&self, path: &str, body: &str) -> Result<HttpResponse, ProtocolError>;

    /// Performs a bodiless `PUT`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    async fn put(&self, path: &str) -> Result<HttpResponse, ProtocolError>;
}
