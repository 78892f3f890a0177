// ABOUTME: Error types for the unfurl engine: fetch failures, lenient URI syntax errors, media type errors.
// ABOUTME: FetchError carries a categorized ErrorCode with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the ways a single fetch can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Connect,
    Timeout,
    Tls,
    Request,
    Body,
    TooLarge,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Connect => "connect error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Tls => "TLS error",
            ErrorCode::Request => "request error",
            ErrorCode::Body => "body read error",
            ErrorCode::TooLarge => "content too large",
        };
        write!(f, "{}", s)
    }
}

/// The error returned by a [`Fetcher`](crate::resource::Fetcher).
#[derive(Debug, thiserror::Error)]
pub struct FetchError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unfurl: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl FetchError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Connect error.
    pub fn connect(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Connect, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Create a TLS error.
    pub fn tls(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::with_code(ErrorCode::Tls, url, op, source)
    }

    /// Create a Request error for failures that are neither connect, TLS nor timeout.
    pub fn request(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Request, url, op, source)
    }

    /// Create a Body error.
    pub fn body(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Body, url, op, source)
    }

    /// Create a TooLarge error.
    pub fn too_large(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::TooLarge, url, op, source)
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Connect error.
    pub fn is_connect(&self) -> bool {
        self.code == ErrorCode::Connect
    }

    /// Returns true if this is a TLS error.
    pub fn is_tls(&self) -> bool {
        self.code == ErrorCode::Tls
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a TooLarge error.
    pub fn is_too_large(&self) -> bool {
        self.code == ErrorCode::TooLarge
    }
}

/// Syntax errors raised by [`crate::uri::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("empty URI")]
    Empty,
    #[error("URI does not match the generic syntax")]
    NoMatch,
    #[error("expected authority or path after scheme `{0}:`")]
    MissingHierarchy(String),
    #[error("illegal character {ch:?} in host at index {index}")]
    IllegalHostCharacter { index: usize, ch: char },
    #[error("illegal character {ch:?} in path at index {index}")]
    IllegalPathCharacter { index: usize, ch: char },
}

/// Errors raised while parsing a Content-Type value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("missing `/` between type and subtype")]
    MissingSlash,
    #[error("invalid token {0:?}")]
    InvalidToken(String),
    #[error("malformed parameter {0:?}")]
    MalformedParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_code_and_source() {
        let err = FetchError::timeout(
            "http://example.com",
            "Fetch",
            Some(anyhow::anyhow!("operation timed out")),
        );
        assert_eq!(
            err.to_string(),
            "unfurl: Fetch http://example.com: timeout: operation timed out"
        );
        assert!(err.is_timeout());
        assert!(!err.is_connect());
    }

    #[test]
    fn display_without_source() {
        let err = FetchError::invalid_url("nope", "Fetch", None);
        assert_eq!(err.to_string(), "unfurl: Fetch nope: invalid URL");
        assert!(err.is_invalid_url());
    }

    #[test]
    fn uri_error_messages() {
        assert_eq!(
            UriError::MissingHierarchy("http".into()).to_string(),
            "expected authority or path after scheme `http:`"
        );
        assert_eq!(
            UriError::IllegalPathCharacter { index: 5, ch: '"' }.to_string(),
            "illegal character '\"' in path at index 5"
        );
    }
}
