// ABOUTME: Main library entry point for the unfurl link-preview engine.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, Unfurled, Media, Fetcher and the error types.

//! Unfurl - structured link previews from a single fetch.
//!
//! Given a URI, the client performs one GET and reconciles Open Graph,
//! Twitter Card and generic HTML metadata into an [`Unfurled`] record:
//! title, description, representative image or video, canonical URL and
//! content type. Unreachable, malformed and metadata-free resources still
//! produce a well-formed (possibly empty) record.
//!
//! # Example
//!
//! ```no_run
//! use unfurl_core::{Client, FetchError};
//!
//! fn main() -> Result<(), FetchError> {
//!     let client = Client::builder().build()?;
//!     let preview = client.unfurl("https://example.com/article");
//!     if !preview.is_empty() {
//!         println!("{} ({})", preview.title, preview.canonical_url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod extractors;
pub mod media_type;
pub mod options;
pub mod raw_image;
pub mod resolve;
pub mod resource;
pub mod result;
pub mod uri;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, FetchError, MediaTypeError, UriError};
pub use crate::media_type::{classify, ContentKind};
pub use crate::options::{ClientBuilder, Options};
pub use crate::resolve::fix_url;
pub use crate::resource::{FetchResponse, Fetcher, HttpFetcher};
pub use crate::result::{Media, UnfurlType, Unfurled};
pub use crate::uri::{parse_safe, LenientUri};
