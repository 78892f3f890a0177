// ABOUTME: Unfurled struct holding the preview extracted for one URI.
// ABOUTME: Serializes with camelCase keys for downstream preview renderers.

use serde::{Deserialize, Serialize};

/// What kind of resource the preview describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnfurlType {
    #[default]
    Text,
    Image,
    Video,
}

/// A representative image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    pub width: i32,
    pub height: i32,
}

/// The preview for a URI.
///
/// `title` and `description` use `""` for "not found"; `image` and `video`
/// are `None` when the page carries no matching metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unfurled {
    pub url: String,
    pub canonical_url: String,
    #[serde(rename = "type")]
    pub kind: UnfurlType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Media>,
}

impl Unfurled {
    /// An empty preview for `url`; the canonical URL defaults to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            canonical_url: url.clone(),
            url,
            kind: UnfurlType::Text,
            title: String::new(),
            description: String::new(),
            image: None,
            video: None,
        }
    }

    /// Returns true if nothing was found: no title, description, image or video.
    ///
    /// `url`, `canonical_url` and `kind` are always populated and play no part.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.image.is_none()
            && self.video.is_none()
    }

    /// Returns true if the preview has an image.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Returns true if the preview has a video.
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = "http://foobar.com/baz?qux";

    #[test]
    fn is_empty_true_when_empty() {
        let unfurled = Unfurled::new(PAGE);
        assert!(unfurled.is_empty());
        assert_eq!(unfurled.canonical_url, PAGE);
        assert_eq!(unfurled.kind, UnfurlType::Text);
    }

    #[test]
    fn is_empty_false_with_title() {
        let unfurled = Unfurled {
            title: "The title".to_string(),
            ..Unfurled::new(PAGE)
        };
        assert!(!unfurled.is_empty());
    }

    #[test]
    fn is_empty_false_with_description() {
        let unfurled = Unfurled {
            description: "Words".to_string(),
            ..Unfurled::new(PAGE)
        };
        assert!(!unfurled.is_empty());
    }

    #[test]
    fn is_empty_false_with_any_media() {
        let media = Media {
            url: String::new(),
            width: 0,
            height: 0,
        };
        let with_image = Unfurled {
            image: Some(media.clone()),
            ..Unfurled::new(PAGE)
        };
        let with_video = Unfurled {
            video: Some(media),
            ..Unfurled::new(PAGE)
        };
        assert!(!with_image.is_empty());
        assert!(with_image.has_image());
        assert!(!with_video.is_empty());
        assert!(with_video.has_video());
    }

    #[test]
    fn is_empty_ignores_url_canonical_and_type() {
        let unfurled = Unfurled {
            canonical_url: "http://elsewhere.com/".to_string(),
            kind: UnfurlType::Image,
            ..Unfurled::new(PAGE)
        };
        assert!(unfurled.is_empty());
    }

    #[test]
    fn serializes_camel_case_without_absent_media() {
        let unfurled = Unfurled {
            title: "T".to_string(),
            image: Some(Media {
                url: "http://a.com/i.jpg".to_string(),
                width: 800,
                height: 600,
            }),
            ..Unfurled::new("http://a.com/")
        };
        let json = serde_json::to_value(&unfurled).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "http://a.com/",
                "canonicalUrl": "http://a.com/",
                "type": "TEXT",
                "title": "T",
                "description": "",
                "image": { "url": "http://a.com/i.jpg", "width": 800, "height": 600 }
            })
        );

        let back: Unfurled = serde_json::from_value(json).unwrap();
        assert_eq!(back, unfurled);
    }
}
