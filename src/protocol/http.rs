// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for WLED controllers.

use std::time::Duration;

use reqwest::{Client, Proxy, RequestBuilder, header};

use crate::error::ProtocolError;
use crate::protocol::{HttpResponse, Transport};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTP connection to a controller.
///
/// # Examples
///
/// ```
/// use wled_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = HttpConfig::new("192.168.1.60");
///
/// // With all options
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5))
///     .with_proxy("http://127.0.0.1:8888");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
    proxy: Option<String>,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address, optionally with `:port`
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
            proxy: None,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes every request through an HTTP proxy, e.g. a debugging proxy.
    #[must_use]
    pub fn with_proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the proxy URL, if set.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Builds the base URL from this configuration.
    ///
    /// A host given as a full URL is used as is. A port already present in
    /// the host string wins over the configured one.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        let scheme = if self.use_https { "https" } else { "http" };
        let default_port = (self.use_https && self.port == Self::DEFAULT_HTTPS_PORT)
            || (!self.use_https && self.port == Self::DEFAULT_PORT);
        let port_suffix = if default_port || self.host.contains(':') {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the proxy URL is invalid or the client cannot be built.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url();

        let mut builder = Client::builder().timeout(self.timeout);
        if let Some(proxy) = &self.proxy {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|_| ProtocolError::InvalidAddress(proxy.clone()))?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

// ============================================================================
// HttpClient - reqwest-backed transport
// ============================================================================

/// HTTP client for communicating with a WLED controller.
///
/// # Examples
///
/// ```no_run
/// use wled_lib::protocol::{HttpClient, Transport};
///
/// # async fn example() -> wled_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.60")?;
/// let response = client.get("/json/state").await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<HttpResponse, ProtocolError> {
        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status, body = %body, "Received HTTP response");

        Ok(HttpResponse::new(status, body))
    }
}

impl Transport for HttpClient {
    async fn get(&self, path: &str) -> Result<HttpResponse, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP GET");
        self.execute(self.client.get(&url)).await
    }

    async fn post(&self, path: &str, body: &str) -> Result<HttpResponse, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, body = %body, "Sending HTTP POST");
        let request = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_owned());
        self.execute(request).await
    }

    async fn put(&self, path: &str) -> Result<HttpResponse, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP PUT");
        self.execute(self.client.put(&url)).await
    }
}
