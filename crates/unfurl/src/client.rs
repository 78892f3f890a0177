// ABOUTME: The Client that fetches a URI once and assembles the Unfurled preview.
// ABOUTME: Branches on content type into the raw-image path or the markup path and never returns an error.

use scraper::Html;

use crate::error::FetchError;
use crate::extractors::fields::{
    get_canonical_url, get_description, get_image, get_title, get_video,
};
use crate::extractors::select::document_head;
use crate::media_type::{classify, ContentKind};
use crate::options::{ClientBuilder, Options};
use crate::raw_image;
use crate::resource::{FetchResponse, Fetcher, HttpFetcher};
use crate::result::{Media, UnfurlType, Unfurled};
use crate::uri::{parse_safe, LenientUri};

/// Unfurls URIs into previews.
///
/// Holds no per-call state, so one client can serve many threads.
pub struct Client {
    fetcher: Box<dyn Fetcher>,
}

impl Client {
    /// Create a client backed by the reqwest HTTP fetcher.
    pub fn new(opts: Options) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Box::new(HttpFetcher::new(&opts)?),
        })
    }

    /// Create a new ClientBuilder for configuring a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client that reads through `fetcher` instead of HTTP.
    pub fn with_fetcher(fetcher: impl Fetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
        }
    }

    /// Fetches `uri` and builds its preview.
    ///
    /// Fetch failures, non-200 statuses and empty bodies all give an empty
    /// preview for `uri`.
    pub fn unfurl(&self, uri: &str) -> Unfurled {
        let span = tracing::info_span!("unfurl", uri);
        let _enter = span.enter();

        match self.fetcher.fetch(uri) {
            Ok(response) => assemble(uri, &response),
            Err(e) => {
                tracing::warn!(uri, error = %e, "problem fetching resource");
                Unfurled::new(uri)
            }
        }
    }

    /// Builds the preview for a response that was fetched elsewhere.
    pub fn unfurl_response(&self, uri: &str, response: &FetchResponse) -> Unfurled {
        let span = tracing::info_span!("unfurl", uri);
        let _enter = span.enter();
        assemble(uri, response)
    }

    /// Runs the markup path on `html` as if it had been served at `uri`.
    pub fn unfurl_html(&self, html: &str, uri: &str) -> Unfurled {
        let span = tracing::info_span!("unfurl", uri);
        let _enter = span.enter();
        build_from_markup(uri, html)
    }
}

fn assemble(uri: &str, response: &FetchResponse) -> Unfurled {
    if !response.final_url.is_empty() && response.final_url != uri {
        tracing::debug!(uri, final_url = %response.final_url, "request was redirected");
    }
    if response.status != 200 {
        tracing::info!(uri, status = response.status, "non-200 response");
        return Unfurled::new(uri);
    }
    if response.body.is_empty() {
        tracing::info!(uri, "empty response body");
        return Unfurled::new(uri);
    }

    match classify(response.content_type()) {
        ContentKind::Image => build_from_image(uri, &response.body),
        ContentKind::Markup => build_from_markup(uri, &response.text()),
    }
}

/// Preview for a URI that served an image: the filename stands in for
/// title and description.
fn build_from_image(uri: &str, bytes: &[u8]) -> Unfurled {
    let path = parse_safe(uri).path;
    let filename = path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string();
    let (width, height) = raw_image::dimensions(bytes);

    Unfurled {
        kind: UnfurlType::Image,
        title: filename.clone(),
        description: filename,
        image: Some(Media {
            url: uri.to_string(),
            width,
            height,
        }),
        ..Unfurled::new(uri)
    }
}

fn build_from_markup(uri: &str, html: &str) -> Unfurled {
    let page = parse_safe(uri);
    if page.lacks_scheme() || page.lacks_host() {
        tracing::warn!(uri, "cannot resolve metadata against a relative request URI");
        return Unfurled::new(uri);
    }

    let doc = Html::parse_document(html);
    let Some(head) = document_head(&doc) else {
        tracing::debug!(uri, "document has no head");
        return Unfurled::new(uri);
    };

    let video = get_video(head, &page);
    let kind = if video.is_some() {
        UnfurlType::Video
    } else {
        UnfurlType::Text
    };

    Unfurled {
        canonical_url: fill_canonical(get_canonical_url(head), &page)
            .unwrap_or_else(|| uri.to_string()),
        kind,
        title: get_title(head),
        description: get_description(head),
        image: get_image(head, &page),
        video,
        url: uri.to_string(),
    }
}

/// Borrows the request's scheme and host where the canonical URL lacks them.
fn fill_canonical(candidate: LenientUri, page: &LenientUri) -> Option<String> {
    if candidate.is_empty() {
        return None;
    }
    let mut canonical = candidate;
    if canonical.lacks_scheme() {
        canonical = canonical.with_scheme(page.scheme_str());
    }
    if canonical.lacks_host() {
        canonical = canonical.with_host(page.host_str());
    }
    Some(canonical.to_string())
}
