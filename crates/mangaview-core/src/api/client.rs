//! Manifest client for the remote manga listing.
//!
//! The manifest is a JSON array of `{ article_url, manga_url }` objects.
//! Loading never fails from the caller's point of view: any error degrades
//! to an empty deck.

use serde_json::Value;
use tracing::{debug, error, info};

use crate::models::{MangaItem, SlideDeck};

use super::{FetchError, Network, Request};

/// Where the manifest lives unless the config says otherwise.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://syachi-progate-449933683609.s3-us-west-2.amazonaws.com/api_responses/20240623/manga_api.json";

pub struct ManifestClient<N> {
    network: N,
    url: String,
}

impl<N: Network> ManifestClient<N> {
    pub fn new(network: N, url: impl Into<String>) -> Self {
        Self {
            network,
            url: url.into(),
        }
    }

    /// Fetch and parse the manifest, surfacing every failure.
    /// A non-2xx status is rejected before parsing, even if the body is JSON.
    pub async fn fetch_manifest(&self) -> Result<Vec<MangaItem>, FetchError> {
        let response = self
            .network
            .fetch(&Request::get(&self.url))
            .await?
            .error_for_status()?;

        let entries: Vec<Value> = response.json()?;
        debug!(url = %self.url, count = entries.len(), "Parsed manifest");

        Ok(entries.iter().map(MangaItem::from_value).collect())
    }

    /// Single attempt, no retry. Errors are logged and replaced by an empty deck.
    pub async fn load_manifest(&self) -> SlideDeck {
        match self.fetch_manifest().await {
            Ok(items) => {
                info!(url = %self.url, slides = items.len(), "Loaded manga manifest");
                SlideDeck::from_items(items)
            }
            Err(e) => {
                error!(url = %self.url, error = %e, "Error loading manga data");
                SlideDeck::empty()
            }
        }
    }
}
