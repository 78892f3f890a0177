// ABOUTME: Field getters that turn matcher-chain strings into preview values.
// ABOUTME: Image and video URLs are absolutized against the page; canonical URLs are parsed leniently.

use scraper::ElementRef;

use super::matchers::{
    CANONICAL_URL, DESCRIPTION, IMAGE, IMAGE_HEIGHT, IMAGE_WIDTH, TITLE, VIDEO, VIDEO_HEIGHT,
    VIDEO_WIDTH,
};
use super::select::{extract_dimension, extract_field};
use crate::resolve::fix_url;
use crate::result::Media;
use crate::uri::{parse_safe, LenientUri};

pub fn get_title(head: ElementRef<'_>) -> String {
    extract_field(head, &TITLE, "title")
}

pub fn get_description(head: ElementRef<'_>) -> String {
    extract_field(head, &DESCRIPTION, "description")
}

/// The page-declared canonical URL, or the empty sentinel.
pub fn get_canonical_url(head: ElementRef<'_>) -> LenientUri {
    let raw = extract_field(head, &CANONICAL_URL, "canonical url");
    if raw.is_empty() {
        return LenientUri::empty();
    }
    parse_safe(&raw)
}

/// The representative image, resolved against `page`.
///
/// `None` when no image metadata exists or the value cannot be resolved.
pub fn get_image(head: ElementRef<'_>, page: &LenientUri) -> Option<Media> {
    let url = resolve_against(&extract_field(head, &IMAGE, "image"), page)?;
    Some(Media {
        url,
        width: extract_dimension(head, &IMAGE_WIDTH, "image width"),
        height: extract_dimension(head, &IMAGE_HEIGHT, "image height"),
    })
}

/// The embedded video or player, resolved against `page`.
pub fn get_video(head: ElementRef<'_>, page: &LenientUri) -> Option<Media> {
    let url = resolve_against(&extract_field(head, &VIDEO, "video"), page)?;
    Some(Media {
        url,
        width: extract_dimension(head, &VIDEO_WIDTH, "video width"),
        height: extract_dimension(head, &VIDEO_HEIGHT, "video height"),
    })
}

fn resolve_against(raw: &str, page: &LenientUri) -> Option<String> {
    let resolved = fix_url(raw, page.scheme_str(), &page.authority(), &page.path);
    if resolved.is_empty() {
        None
    } else {
        Some(resolved.to_string())
    }
}
