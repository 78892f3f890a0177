// ABOUTME: Resource fetching: the Fetcher seam, the buffered FetchResponse and the reqwest-backed HttpFetcher.
// ABOUTME: One blocking GET per call with content-length limits, error classification and charset decoding.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};

use crate::error::FetchError;
use crate::options::Options;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Performs the single outbound read for an unfurl.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub final_url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl FetchResponse {
    /// A response with no headers, for callers that fetched elsewhere.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            final_url: String::new(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Sets the Content-Type header. Values that are not valid header text are ignored.
    pub fn with_content_type(mut self, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(v) => {
                self.headers.insert(CONTENT_TYPE, v);
            }
            Err(e) => tracing::debug!(value, error = %e, "ignoring content type"),
        }
        self
    }

    /// The first Content-Type value, if it is visible ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Decode the body as text, using the charset parameter or detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()))
    {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
///
/// Looser than the media type parser: `text/html;;charset=UTF-8` still
/// yields `utf-8`.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    lower.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Fetcher backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
    headers: HashMap<String, String>,
    max_content_length: usize,
}

impl HttpFetcher {
    /// Builds a fetcher from client options, reusing `opts.http_client` when set.
    pub fn new(opts: &Options) -> Result<Self, FetchError> {
        let client = match opts.http_client {
            Some(ref client) => client.clone(),
            None => build_http_client(opts.timeout)?,
        };
        Ok(Self {
            client,
            user_agent: opts.user_agent.clone(),
            headers: opts.headers.clone(),
            max_content_length: opts.max_content_length,
        })
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(|e| {
            FetchError::request(
                "",
                "Build",
                Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
            )
        })
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        if url.is_empty() {
            return Err(FetchError::invalid_url(url, "Fetch", None));
        }
        let parsed_url = url::Url::parse(url).map_err(|e| {
            FetchError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
        })?;
        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(FetchError::invalid_url(
                url,
                "Fetch",
                Some(anyhow::anyhow!("scheme must be http or https")),
            ));
        }

        let mut request = self
            .client
            .get(parsed_url)
            .header(USER_AGENT, self.user_agent.as_str());
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().map_err(|e| classify_error(url, e))?;

        if let Some(len) = response.content_length() {
            if len > self.max_content_length as u64 {
                return Err(FetchError::too_large(
                    url,
                    "Fetch",
                    Some(anyhow::anyhow!("content length {} exceeds limit", len)),
                ));
            }
        }

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();

        let body = response.bytes().map_err(|e| {
            FetchError::body(
                url,
                "Fetch",
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            )
        })?;

        if body.len() > self.max_content_length {
            return Err(FetchError::too_large(
                url,
                "Fetch",
                Some(anyhow::anyhow!("body of {} bytes exceeds limit", body.len())),
            ));
        }

        Ok(FetchResponse {
            status,
            final_url,
            headers,
            body,
        })
    }
}

/// Maps a reqwest failure onto the fetch error taxonomy.
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        return FetchError::timeout(url, "Fetch", Some(e.into()));
    }
    if e.is_connect() {
        if e.source().is_some_and(is_tls_failure) {
            return FetchError::tls(url, "Fetch", Some(e.into()));
        }
        return FetchError::connect(url, "Fetch", Some(e.into()));
    }
    if e.is_body() || e.is_decode() {
        return FetchError::body(url, "Fetch", Some(e.into()));
    }
    FetchError::request(url, "Fetch", Some(e.into()))
}

/// reqwest has no TLS predicate; look for the handshake failure in the source chain.
///
/// Callers pass the cause, not the reqwest error itself, whose message embeds the URL.
fn is_tls_failure(e: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(err) = current {
        let text = err.to_string().to_lowercase();
        if ["certificate", "tls", "ssl", "handshake"]
            .iter()
            .any(|needle| text.contains(needle))
        {
            return true;
        }
        current = err.source();
    }
    false
}
