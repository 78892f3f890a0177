// ABOUTME: Process-wide matcher chains: ordered (selector, accessor) rules, one chain per extracted field.
// ABOUTME: Order encodes source priority: Open Graph, then Twitter Card, then generic meta, then fallback elements.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// How a value is read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// Read the named attribute; a missing attribute yields no value.
    Attr(&'static str),
    /// Read the element's text with whitespace collapsed.
    Text,
}

/// One rule in a chain: a compiled selector and how to read the element it finds.
#[derive(Debug)]
pub struct Matcher {
    pub css: &'static str,
    pub accessor: Accessor,
    selector: Selector,
}

impl Matcher {
    fn new(css: &'static str, accessor: Accessor) -> Self {
        let selector = Selector::parse(css)
            .unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"));
        Self {
            css,
            accessor,
            selector,
        }
    }

    fn content(css: &'static str) -> Self {
        Self::new(css, Accessor::Attr("content"))
    }

    fn href(css: &'static str) -> Self {
        Self::new(css, Accessor::Attr("href"))
    }

    fn text(css: &'static str) -> Self {
        Self::new(css, Accessor::Text)
    }

    /// Reads this matcher's value from the first element under `scope` that
    /// the selector matches.
    pub fn read(&self, scope: ElementRef<'_>) -> Option<String> {
        let element = scope.select(&self.selector).next()?;
        match self.accessor {
            Accessor::Attr(name) => element.value().attr(name).map(|v| v.trim().to_string()),
            Accessor::Text => Some(normalize_whitespace(&element.text().collect::<String>())),
        }
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub static TITLE: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:title']"),
        Matcher::content("meta[name='twitter:title']"),
        Matcher::content("meta[name='title']"),
        Matcher::text("title"),
    ]
});

pub static DESCRIPTION: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:description']"),
        Matcher::content("meta[name='twitter:description']"),
        Matcher::content("meta[name='description']"),
    ]
});

pub static CANONICAL_URL: Lazy<Vec<Matcher>> =
    Lazy::new(|| vec![Matcher::href("link[rel='canonical']")]);

pub static IMAGE: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:image']"),
        Matcher::content("meta[name='twitter:image:src']"),
        Matcher::content("meta[name='twitter:image']"),
        Matcher::href("link[rel='icon']"),
        Matcher::href("link[rel='apple-touch-icon-precomposed'][sizes='144x144']"),
        Matcher::href("link[rel='apple-touch-icon-precomposed'][sizes='114x114']"),
        Matcher::href("link[rel='apple-touch-icon-precomposed'][sizes='72x72']"),
        Matcher::href("link[rel='apple-touch-icon-precomposed']"),
        Matcher::href("link[rel='shortcut icon']"),
    ]
});

pub static IMAGE_WIDTH: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:image:width']"),
        Matcher::content("meta[name='twitter:image:width']"),
    ]
});

pub static IMAGE_HEIGHT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:image:height']"),
        Matcher::content("meta[name='twitter:image:height']"),
    ]
});

pub static VIDEO: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:video:url']"),
        Matcher::content("meta[property='og:video:secure_url']"),
        Matcher::content("meta[property='og:video']"),
        Matcher::content("meta[name='twitter:player']"),
    ]
});

pub static VIDEO_WIDTH: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:video:width']"),
        Matcher::content("meta[name='twitter:player:width']"),
    ]
});

pub static VIDEO_HEIGHT: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        Matcher::content("meta[property='og:video:height']"),
        Matcher::content("meta[name='twitter:player:height']"),
    ]
});
