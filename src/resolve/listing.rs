//! Flat listing resolver
//!
//! Resolves a non-paginated resource: a single document whose `data` array
//! carries every package entry with its nested version list.

use crate::error::ResolveError;
use crate::registry::http::RegistryClient;
use crate::registry::index::{self, FlatListing, ListingEntry};
use crate::resolve::PackageMap;

/// Resolve a flat listing resource into a partial package mapping.
///
/// Malformed entries are logged and skipped; malformed version entries are
/// retained as `None` slots. Duplicate package ids inside one document are
/// last write wins. The result may be empty.
pub async fn resolve_listing(
    client: &RegistryClient,
    url: &str,
) -> Result<PackageMap, ResolveError> {
    let doc = client.fetch_json(url).await?;
    let listing = FlatListing::decode(doc, url)?;

    let mut packages = PackageMap::new();
    for element in &listing.data {
        let Some(entry) = ListingEntry::from_element(element) else {
            tracing::warn!("skipping malformed listing entry from {}", url);
            continue;
        };

        let Some(package_id) = entry.id else {
            tracing::warn!("skipping listing entry without 'id' from {}", url);
            continue;
        };

        let versions = entry.versions.iter().map(index::version_id).collect();
        packages.insert(package_id, versions);
    }

    Ok(packages)
}
