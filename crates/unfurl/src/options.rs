// ABOUTME: Configuration options for the unfurl client and the fluent ClientBuilder.
// ABOUTME: Covers the single fetch's timeout, user agent, extra headers, body size limit and HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::error::FetchError;
use crate::resource::MAX_CONTENT_LENGTH;

/// Configuration options for the unfurl client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub max_content_length: usize,
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("unfurl/{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
            max_content_length: MAX_CONTENT_LENGTH,
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connect and read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to every request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Reject bodies larger than `bytes`.
    pub fn max_content_length(mut self, bytes: usize) -> Self {
        self.opts.max_content_length = bytes;
        self
    }

    /// Use a custom HTTP client. Its own timeout settings apply.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// The options configured so far.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, FetchError> {
        Client::new(self.opts)
    }
}
