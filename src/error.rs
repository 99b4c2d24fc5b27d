// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `wled_lib` library.
//!
//! This module provides the error hierarchy for every failure the library
//! can report: local value validation, transport communication, response
//! parsing, and the outcome of commands sent to the controller.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when interacting
/// with a WLED controller.
#[derive(Debug, Error)]
pub enum Error {
    /// The initial status probe failed; no controller was created.
    #[error("the target '{target}' is not reachable")]
    UnreachableTarget {
        /// The connection string the controller was asked to bind to.
        target: String,
        /// What went wrong during the probe.
        #[source]
        source: Box<Error>,
    },

    /// A value failed validation before anything was sent.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A status projection asked for a key the document does not contain.
    #[error("unknown status key: {0}")]
    UnknownKey(String),

    /// The device answered a well-formed request with an error status.
    #[error("command rejected by device: {payload}")]
    RejectedCommand {
        /// The encoded payload that was sent.
        payload: String,
    },

    /// Sending a command failed, or its response could not be understood.
    #[error("'{payload}' resulted in an error")]
    CommandFailed {
        /// The encoded payload that was sent.
        payload: String,
        /// The underlying cause.
        #[source]
        source: SendError,
    },

    /// A read-only query returned a body of the wrong shape.
    #[error("malformed response from {endpoint}: {body:?}")]
    MalformedResponse {
        /// The endpoint that was queried.
        endpoint: String,
        /// The body as received.
        body: String,
    },

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The selected dialect has no wire form for this command.
    #[error("{command} is not supported by the {dialect} dialect")]
    UnsupportedCommand {
        /// The command name.
        command: &'static str,
        /// The dialect name.
        dialect: &'static str,
    },
}

/// Errors related to value validation and constraints.
///
/// These errors are raised locally, before any request is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside its closed interval.
    #[error("value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The value that was provided.
        value: i64,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
    },

    /// At least one color channel is outside [0, 255].
    #[error("color {value:?} is out of range [{min:?}, {max:?}]")]
    ColorOutOfRange {
        /// The channels that were provided.
        value: (i64, i64, i64),
        /// Lower boundary triple.
        min: (i64, i64, i64),
        /// Upper boundary triple.
        max: (i64, i64, i64),
    },

    /// A segment takes between one and three colors.
    #[error("expected 1 to 3 colors, got {0}")]
    InvalidColorCount(usize),
}

/// Errors related to transport communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status code.
    #[error("HTTP {0}")]
    Status(u16),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Cause of a failed send, carried by [`Error::CommandFailed`].
///
/// The public taxonomy folds all of these into one variant; the cause is kept
/// so callers that care can still tell a dead link from a garbled body.
#[derive(Debug, Error)]
pub enum SendError {
    /// The transport could not deliver the request.
    #[error(transparent)]
    Transport(#[from] ProtocolError),

    /// The response body could not be interpreted.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
