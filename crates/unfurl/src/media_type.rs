// ABOUTME: Content-Type classification deciding whether a response is a raw image or markup.
// ABOUTME: Parses `type/subtype[; attr=value]*` strictly but fails open to markup on any problem.

use crate::error::MediaTypeError;

/// A parsed media type. Type, subtype and parameter names are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub top_level: String,
    pub subtype: String,
    pub params: Vec<(String, String)>,
}

impl MediaType {
    /// Returns true for any `image/*` type.
    pub fn is_image(&self) -> bool {
        self.top_level == "image"
    }
}

/// How a fetched resource is assembled into an `Unfurled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Markup,
}

impl ContentKind {
    pub fn is_image(self) -> bool {
        self == ContentKind::Image
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}

fn token(s: &str) -> Result<&str, MediaTypeError> {
    if !s.is_empty() && s.chars().all(is_token_char) {
        Ok(s)
    } else {
        Err(MediaTypeError::InvalidToken(s.to_string()))
    }
}

/// Reads a quoted-string starting at the opening `"`, returning the unescaped
/// value and the input after the closing quote.
fn quoted_string(input: &str) -> Result<(String, &str), MediaTypeError> {
    let mut value = String::new();
    let mut chars = input.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            '"' => return Ok((value, &input[i + 1..])),
            other => value.push(other),
        }
    }
    Err(MediaTypeError::MalformedParameter(input.to_string()))
}

/// Parses a Content-Type header value.
///
/// Parameters are read left to right, so a `;` inside a quoted value is
/// part of the value. Every other `;` must introduce an `attribute=value`
/// pair, so values such as `text/html;;charset=UTF-8` or a trailing `;` are
/// rejected.
pub fn parse(value: &str) -> Result<MediaType, MediaTypeError> {
    let value = value.trim();
    let (essence, mut rest) = value.split_at(value.find(';').unwrap_or(value.len()));
    let (top_level, subtype) = essence
        .trim_end()
        .split_once('/')
        .ok_or(MediaTypeError::MissingSlash)?;
    let top_level = token(top_level)?.to_ascii_lowercase();
    let subtype = token(subtype)?.to_ascii_lowercase();

    let mut params = Vec::new();
    while let Some(after_semicolon) = rest.strip_prefix(';') {
        let param = after_semicolon.trim_start();
        let (attr, raw_value) = param
            .split_once('=')
            .ok_or_else(|| MediaTypeError::MalformedParameter(param.to_string()))?;
        let attr = token(attr)?.to_ascii_lowercase();

        let (param_value, remaining) = if raw_value.starts_with('"') {
            quoted_string(raw_value)?
        } else {
            let end = raw_value.find(';').unwrap_or(raw_value.len());
            let (unquoted, remaining) = raw_value.split_at(end);
            (token(unquoted.trim_end())?.to_string(), remaining)
        };
        params.push((attr, param_value));

        rest = remaining.trim_start();
        if !rest.is_empty() && !rest.starts_with(';') {
            return Err(MediaTypeError::MalformedParameter(rest.to_string()));
        }
    }

    Ok(MediaType {
        top_level,
        subtype,
        params,
    })
}

/// Classifies a response from its Content-Type header.
///
/// An absent or unparsable header is treated as markup.
pub fn classify(header: Option<&str>) -> ContentKind {
    let Some(value) = header else {
        return ContentKind::Markup;
    };
    match parse(value) {
        Ok(media_type) if media_type.is_image() => ContentKind::Image,
        Ok(_) => ContentKind::Markup,
        Err(e) => {
            tracing::info!(header = value, error = %e, "invalid media type header");
            ContentKind::Markup
        }
    }
}
