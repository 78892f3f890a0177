// ABOUTME: Runs a matcher chain against a document head: first matcher yielding a value wins.
// ABOUTME: Also parses dimension values leniently, defaulting to zero on malformed input.

//! Chain evaluation.
//!
//! Key behaviors:
//! - Matchers are tried in declared order.
//! - A matcher whose selector finds nothing, or whose element lacks the
//!   attribute, is skipped.
//! - A present value wins even when empty, so `content=""` on `og:title`
//!   hides a `<title>` element further down the chain.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::matchers::Matcher;

static HEAD: Lazy<Selector> = Lazy::new(|| Selector::parse("head").unwrap());

/// Returns the first `<head>` element of a parsed document.
///
/// html5ever always synthesizes a head, so this is only `None` for fragments.
pub fn document_head(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&HEAD).next()
}

/// Returns the value of the first matcher in `chain` that yields one, or
/// `""` when none does.
pub fn extract_field(head: ElementRef<'_>, chain: &[Matcher], field: &str) -> String {
    for matcher in chain {
        if let Some(value) = matcher.read(head) {
            return value;
        }
    }
    tracing::debug!(field, "no match for field");
    String::new()
}

/// Extracts a pixel dimension. Missing values and non-numeric values give 0.
/// Signed values are kept as declared.
pub fn extract_dimension(head: ElementRef<'_>, chain: &[Matcher], field: &str) -> i32 {
    parse_dimension(&extract_field(head, chain, field), field)
}

pub(crate) fn parse_dimension(value: &str, field: &str) -> i32 {
    if value.is_empty() {
        return 0;
    }
    match value.parse::<i32>() {
        Ok(n) => n,
        Err(e) => {
            tracing::info!(field, value, error = %e, "problem parsing dimension");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::matchers::{DESCRIPTION, IMAGE, IMAGE_WIDTH, TITLE};

    fn head_of(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn og_title_beats_twitter_title() {
        let doc = head_of(
            r#"<html><head>
                <meta name="twitter:title" content="Twitter">
                <meta property="og:title" content="Open Graph">
                <title>Element</title>
            </head></html>"#,
        );
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &TITLE, "title"), "Open Graph");
    }

    #[test]
    fn falls_back_to_title_element() {
        let doc = head_of("<html><head><title>  Just \n the title </title></head></html>");
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &TITLE, "title"), "Just the title");
    }

    #[test]
    fn missing_attribute_moves_to_next_matcher() {
        let doc = head_of(
            r#"<html><head>
                <meta property="og:description">
                <meta name="description" content="generic">
            </head></html>"#,
        );
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &DESCRIPTION, "description"), "generic");
    }

    #[test]
    fn present_empty_value_wins() {
        let doc = head_of(
            r#"<html><head>
                <meta property="og:title" content="">
                <title>Element</title>
            </head></html>"#,
        );
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &TITLE, "title"), "");
    }

    #[test]
    fn nothing_found_is_empty_string() {
        let doc = head_of("<html><head></head><body><title>not in head</title></body></html>");
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &DESCRIPTION, "description"), "");
        assert_eq!(extract_field(head, &IMAGE, "image"), "");
    }

    #[test]
    fn icon_links_come_in_declared_order() {
        let doc = head_of(
            r#"<html><head>
                <link rel="shortcut icon" href="/favicon.ico">
                <link rel="apple-touch-icon-precomposed" href="/any.png">
                <link rel="apple-touch-icon-precomposed" sizes="72x72" href="/72.png">
            </head></html>"#,
        );
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_field(head, &IMAGE, "image"), "/72.png");
    }

    #[test]
    fn dimension_parses_and_defaults_to_zero() {
        let doc = head_of(r#"<html><head><meta property="og:image:width" content=" 640 "></head></html>"#);
        let head = document_head(&doc).unwrap();
        assert_eq!(extract_dimension(head, &IMAGE_WIDTH, "image width"), 640);

        assert_eq!(parse_dimension("wide", "image width"), 0);
        assert_eq!(parse_dimension("-3", "image width"), -3);
        assert_eq!(parse_dimension("+12", "image width"), 12);
        assert_eq!(parse_dimension("1.5", "image width"), 0);
        assert_eq!(parse_dimension("", "image width"), 0);
    }
}
