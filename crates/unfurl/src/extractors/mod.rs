// ABOUTME: Metadata extraction from a parsed document head.
// ABOUTME: Matcher chains define source priority; select evaluates them; fields shapes the results.

//! Metadata extraction module.
//!
//! Submodules:
//! - `matchers`: the process-wide matcher chains, one per field.
//! - `select`: chain evaluation and dimension parsing.
//! - `fields`: per-field getters used by the client.

pub mod fields;
pub mod matchers;
pub mod select;
