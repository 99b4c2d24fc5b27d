// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status document returned by `/json/{specifier}`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ParseError};

/// A status document as reported by the controller.
///
/// The document is kept as untyped JSON; consumers project the top-level key
/// they need. Projection of a missing key fails, it never yields a default.
///
/// # Examples
///
/// ```
/// use wled_lib::response::StatusDocument;
///
/// let doc = StatusDocument::parse(r#"{"on":true,"bri":128,"nl":{"rem":-1}}"#).unwrap();
/// assert_eq!(doc.get("bri").unwrap(), &serde_json::json!(128));
/// assert!(doc.get("seg").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDocument(Value);

impl StatusDocument {
    /// Wraps an already-decoded document.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decodes a document from a response body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not valid JSON.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        Ok(Self(serde_json::from_str(body)?))
    }

    /// Returns the sub-document stored under a top-level key.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownKey` if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value, Error> {
        self.0
            .get(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    /// Removes and returns the sub-document under a top-level key.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownKey` if the key is absent.
    pub fn take(mut self, key: &str) -> Result<Value, Error> {
        self.0
            .as_object_mut()
            .and_then(|object| object.remove(key))
            .ok_or_else(|| Error::UnknownKey(key.to_string()))
    }

    /// Deserializes the whole document into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the document does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        T::deserialize(&self.0).map_err(ParseError::Json)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the document and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for StatusDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StatusDocument> for Value {
    fn from(doc: StatusDocument) -> Self {
        doc.0
    }
}
