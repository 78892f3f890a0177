// ABOUTME: Absolutizes URLs found in page metadata by prepending the fetched page's origin.
// ABOUTME: String-based origin prepending, not RFC 3986 reference resolution.

use crate::uri::{parse, parse_safe, LenientUri};

/// Adds the page origin to ambiguous references when necessary.
///
/// * `subject` - the filename, path + filename, or full URL of a resource
/// * `scheme` / `authority` - origin of the fetched page
/// * `path` - the fetched page's path, prepended verbatim to relative names
///
/// Rules, in order:
/// 1. empty subject gives the empty sentinel
/// 2. `//x` is appended to the origin with every `//` collapsed to `/`
/// 3. `/x` is appended to the origin
/// 4. a subject without a scheme is appended to origin + page path
/// 5. anything else is already absolute
///
/// A subject the lenient parser rejects outright gives the empty sentinel.
pub fn fix_url(subject: &str, scheme: &str, authority: &str, path: &str) -> LenientUri {
    if subject.is_empty() {
        return LenientUri::empty();
    }

    let origin = format!("{}://{}", scheme, authority);
    if subject.starts_with("//") {
        return parse_safe(&format!("{}{}", origin, subject.replace("//", "/")));
    }

    if subject.starts_with('/') {
        return parse_safe(&format!("{}{}", origin, subject));
    }

    match parse(subject) {
        Ok(parsed) if parsed.scheme.is_none() => {
            tracing::debug!(subject, "relative path");
            parse_safe(&format!("{}{}{}", origin, path, subject))
        }
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(uri = %subject, error = %e, "problem while parsing URI");
            LenientUri::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEME: &str = "http";
    const AUTHORITY: &str = "localhost:8080";
    const PATH: &str = "/foo/bar";

    fn origin() -> String {
        format!("{}://{}", SCHEME, AUTHORITY)
    }

    #[test]
    fn empty_url_gives_empty_sentinel() {
        assert!(fix_url("", SCHEME, AUTHORITY, PATH).is_empty());
        assert_eq!(fix_url("", "http", "x.com", "/foo/").to_string(), "");
    }

    #[test]
    fn root_relative_gets_origin() {
        let image = "/foo/bar.jpg";
        assert_eq!(
            fix_url(image, SCHEME, AUTHORITY, PATH).to_string(),
            origin() + image
        );
        assert_eq!(
            fix_url("/a/b.jpg", "http", "x.com", "/foo/").to_string(),
            "http://x.com/a/b.jpg"
        );
    }

    #[test]
    fn protocol_relative_collapses_double_slash() {
        let image = "//foo/bar.jpg";
        assert_eq!(
            fix_url(image, SCHEME, AUTHORITY, PATH).to_string(),
            origin() + &image.replace("//", "/")
        );
        assert_eq!(
            fix_url("//x.com/a/b.jpg", "http", "x.com", "/foo/").to_string(),
            "http://x.com/x.com/a/b.jpg"
        );
    }

    #[test]
    fn relative_concatenates_page_path_verbatim() {
        assert_eq!(
            fix_url("baz.jpg", SCHEME, AUTHORITY, PATH).to_string(),
            format!("{}{}baz.jpg", origin(), PATH)
        );
        assert_eq!(
            fix_url("rel.jpg", "http", "x.com", "/foo/").to_string(),
            "http://x.com/foo/rel.jpg"
        );
    }

    #[test]
    fn absolute_is_unchanged() {
        let image = "https://cdn.example.com/i.png?w=100";
        assert_eq!(fix_url(image, SCHEME, AUTHORITY, PATH).to_string(), image);
    }

    #[test]
    fn unparsable_subject_never_panics() {
        assert!(fix_url("http:", SCHEME, AUTHORITY, PATH).is_empty());
    }
}
