// ABOUTME: Lenient URI decomposition for the malformed URLs real pages put in canonical and image tags.
// ABOUTME: One generic-syntax regex splits the components, two authority regexes isolate userinfo, host and port.

//! Lenient URI parsing.
//!
//! Strict URL constructors reject a lot of what shows up in the wild
//! (`{}` and `<>` in queries, bare `//host` references, paths without a
//! leading slash). This module tokenizes a string into the five generic
//! components instead of validating it, and only gives up on input that
//! cannot be rendered back as a reference at all.
//!
//! Key behaviors:
//! - Every component is optional except `path`, which defaults to `""`.
//! - An unparsable or missing port is `None` rather than an error.
//! - [`parse_safe`] never fails; it logs and returns the empty sentinel.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::UriError;

/// Generic syntax: `scheme:` `//authority` `path` `?query` `#fragment`.
static URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([^:/?#]+):)?(//([^/?#]*))?([^?#]*)(\?([^#]*))?(#(.*))?$").unwrap()
});
static USERINFO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^\[\]]*)@").unwrap());
static PORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":([^:@\[\]]*?)$").unwrap());

/// Characters that can never appear in a host, even leniently.
const ILLEGAL_HOST_CHARS: &[char] = &['"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// A URI decomposed without regard to strict legality.
///
/// `host` is `None` when the input had no `//authority` part at all and
/// `Some("")` when the authority was present but empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LenientUri {
    pub scheme: Option<String>,
    pub userinfo: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl LenientUri {
    /// The empty-URI sentinel used wherever a URL could not be found or parsed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true for the empty sentinel (renders as `""`).
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.userinfo.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.path.is_empty()
            && self.query.is_none()
            && self.fragment.is_none()
    }

    /// The host, or `""` when there is none.
    pub fn host_str(&self) -> &str {
        self.host.as_deref().unwrap_or("")
    }

    /// The scheme, or `""` when there is none.
    pub fn scheme_str(&self) -> &str {
        self.scheme.as_deref().unwrap_or("")
    }

    /// `userinfo@host:port` as written, minus any unparsable port.
    pub fn authority(&self) -> String {
        let mut authority = String::new();
        if let Some(ref userinfo) = self.userinfo {
            authority.push_str(userinfo);
            authority.push('@');
        }
        authority.push_str(self.host_str());
        if let Some(port) = self.port {
            authority.push_str(&format!(":{}", port));
        }
        authority
    }

    /// Returns true when the scheme is missing or blank.
    pub fn lacks_scheme(&self) -> bool {
        self.scheme.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    /// Returns true when the host is missing or blank.
    pub fn lacks_host(&self) -> bool {
        self.host_str().trim().is_empty()
    }

    /// Returns a copy with the scheme replaced.
    pub fn with_scheme(&self, scheme: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with the host replaced.
    ///
    /// A rootless path gains a leading `/` so the result still renders as
    /// `//host/path` instead of running the path into the host.
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        if !path.is_empty() && !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            host: Some(host.into()),
            path,
            ..self.clone()
        }
    }
}

impl fmt::Display for LenientUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref scheme) = self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(ref host) = self.host {
            f.write_str("//")?;
            if let Some(ref userinfo) = self.userinfo {
                write!(f, "{}@", userinfo)?;
            }
            f.write_str(host)?;
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(ref query) = self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(ref fragment) = self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Parses a URI with utter disregard to legality.
///
/// Fails only for empty input, input the generic syntax cannot match,
/// a scheme followed by nothing, or characters that cannot be carried in a
/// host or path.
pub fn parse(text: &str) -> Result<LenientUri, UriError> {
    if text.is_empty() {
        return Err(UriError::Empty);
    }

    let caps = URI_RE.captures(text).ok_or(UriError::NoMatch)?;

    let scheme = caps.get(2).map(|m| m.as_str().to_string());
    let authority = caps.get(4);
    let path = caps.get(5).map_or("", |m| m.as_str());
    let query = caps.get(7).map(|m| m.as_str().to_string());
    let fragment = caps.get(9).map(|m| m.as_str().to_string());

    if let Some(ref s) = scheme {
        if authority.is_none() && path.is_empty() {
            return Err(UriError::MissingHierarchy(s.clone()));
        }
    }

    let mut userinfo = None;
    let mut host = None;
    let mut port = None;
    if let Some(auth) = authority {
        let raw = auth.as_str();
        let mut host_offset = auth.start();
        let without_user = match USERINFO_RE.captures(raw) {
            Some(user) => {
                let whole = user.get(0).map_or(0, |m| m.end());
                userinfo = user.get(1).map(|m| m.as_str().to_string());
                host_offset += whole;
                &raw[whole..]
            }
            None => raw,
        };
        let host_str = PORT_RE.replace(without_user, "");

        if let Some((i, ch)) = host_str
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || c.is_control() || ILLEGAL_HOST_CHARS.contains(c))
        {
            return Err(UriError::IllegalHostCharacter {
                index: host_offset + i,
                ch,
            });
        }

        port = PORT_RE
            .captures(raw)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u16>().ok());
        host = Some(host_str.into_owned());
    }

    let path_offset = caps.get(5).map_or(0, |m| m.start());
    if let Some((i, ch)) = path
        .char_indices()
        .find(|(_, c)| c.is_control() || *c == '"')
    {
        return Err(UriError::IllegalPathCharacter {
            index: path_offset + i,
            ch,
        });
    }

    Ok(LenientUri {
        scheme,
        userinfo,
        host,
        port,
        path: path.to_string(),
        query,
        fragment,
    })
}

/// Parses like [`parse`] but never fails: any error is logged and becomes
/// the empty sentinel.
pub fn parse_safe(text: &str) -> LenientUri {
    match parse(text) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(uri = %text, error = %e, "problem while parsing URI");
            LenientUri::empty()
        }
    }
}
