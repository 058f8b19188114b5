//! Wikipedia `pageimages` client.
//!
//! One blocking GET per batch of titles. The response maps opaque page ids to
//! records that may or may not carry a thumbnail, in no guaranteed order, so
//! callers must correlate results by the `title` field rather than position.

use crate::enrich::BATCH_SIZE;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Production MediaWiki API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

const THUMB_SIZE: u32 = 100;

/// One page's worth of a batch response, keyed by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbEntry {
    pub title: String,
    pub url: Option<String>,
}

/// Seam between the pipeline and the transport, mocked in tests.
pub trait ThumbnailSource {
    /// Look up thumbnails for at most [`BATCH_SIZE`] titles in one request.
    fn thumbnails(&self, titles: &[String]) -> Result<Vec<ThumbEntry>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<ApiQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiQuery {
    pages: BTreeMap<String, ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    thumbnail: Option<ApiThumbnail>,
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    source: String,
}

/// Blocking HTTP client for the thumbnail API.
pub struct WikiClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl WikiClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at an alternate endpoint (tests use a local server).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailSource for WikiClient {
    fn thumbnails(&self, titles: &[String]) -> Result<Vec<ThumbEntry>> {
        let joined = titles.join("|");
        let mut response = self
            .agent
            .get(&self.endpoint)
            .query("action", "query")
            .query("prop", "pageimages")
            .query("format", "json")
            .query("pithumbsize", &THUMB_SIZE.to_string())
            .query("pilimit", &BATCH_SIZE.to_string())
            .query("origin", "*")
            .query("titles", &joined)
            .call()
            .context("request thumbnail batch")?;
        let body: ApiResponse = response
            .body_mut()
            .read_json()
            .context("parse thumbnail response")?;
        flatten_response(body)
    }
}

/// Lower the nested response envelope into per-title entries. A well-formed
/// JSON body without the `query.pages` structure is an error.
fn flatten_response(body: ApiResponse) -> Result<Vec<ThumbEntry>> {
    let query = body
        .query
        .ok_or_else(|| anyhow!("thumbnail response missing query.pages"))?;
    Ok(query
        .pages
        .into_values()
        .map(|page| ThumbEntry {
            title: page.title,
            url: page.thumbnail.map(|thumb| thumb.source),
        })
        .collect())
}

#[cfg(test)]
#[path = "wiki_tests.rs"]
mod tests;
