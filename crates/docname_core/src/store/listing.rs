//! Helpers for HTTP stores that expose a JSON document listing.
//!
//! The listing endpoint lives at `{base_project_url}{collection}` and answers
//! with an array of objects, each carrying at least a `name` field:
//!
//! ```text
//! [{"notebook_id": "5f1c...", "name": "Untitled0"}, {"name": "Notes"}]
//! ```

use serde::Deserialize;

use super::DocumentNameSet;
use crate::error::StoreError;

/// One entry of the listing response. Fields other than `name` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    /// Document name.
    pub name: String,
}

/// Build the listing URL from the project base URL and the collection path.
pub fn listing_url(base_project_url: &str, collection: &str) -> String {
    let collection = collection.trim_start_matches('/');
    if base_project_url.ends_with('/') {
        format!("{}{}", base_project_url, collection)
    } else {
        format!("{}/{}", base_project_url, collection)
    }
}

/// Parse a listing response body.
///
/// An empty array is a valid, empty store. A body that is not a listing is a
/// protocol failure and maps to [`StoreError::connection`].
pub fn parse_listing(body: &str) -> Result<DocumentNameSet, StoreError> {
    let entries: Vec<ListingEntry> = serde_json::from_str(body).map_err(|e| {
        log::warn!("Unreadable document listing: {}", e);
        StoreError::connection()
    })?;
    Ok(entries.into_iter().map(|entry| entry.name).collect())
}
