// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP controller builder.

use std::time::Duration;

use crate::device::Controller;
use crate::error::Error;
use crate::protocol::{Dialect, HttpClient, HttpConfig};

/// Builder for creating HTTP-based controllers.
///
/// Created with [`Controller::http`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use wled_lib::{Controller, Dialect};
///
/// # async fn example() -> wled_lib::Result<()> {
/// // Defaults: JSON API, logging on, port 80
/// let controller = Controller::http("192.168.1.60").build().await?;
///
/// // Older firmware through a debugging proxy
/// let controller = Controller::http("192.168.1.61")
///     .with_dialect(Dialect::Query)
///     .with_timeout(Duration::from_secs(3))
///     .with_proxy("http://127.0.0.1:8888")
///     .with_logging(false)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ControllerBuilder {
    target: String,
    config: HttpConfig,
    dialect: Dialect,
    logging: bool,
}

impl ControllerBuilder {
    /// Creates a new builder for `target`.
    pub(crate) fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            config: HttpConfig::new(target.clone()),
            target,
            dialect: Dialect::default(),
            logging: true,
        }
    }

    /// Selects the API the controller speaks.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enables or disables command logging.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Connects over HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.config = self.config.with_https();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Routes every request through an HTTP proxy.
    #[must_use]
    pub fn with_proxy(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_proxy(url);
        self
    }

    /// Returns the HTTP configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Returns the selected dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Builds the controller and probes the target.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the HTTP client cannot be created (for
    /// example an invalid proxy URL), or `Error::UnreachableTarget` if the
    /// probe fails.
    pub async fn build(self) -> Result<Controller<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;
        let mut controller = Controller::with_transport(client, self.target, self.dialect).await?;
        if !self.logging {
            controller.disable_logging();
        }
        Ok(controller)
    }
}
