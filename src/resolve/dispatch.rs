//! Resource dispatcher
//!
//! Classifies one resource descriptor and routes it to the matching
//! resolver.

use crate::error::ResolveError;
use crate::registry::http::RegistryClient;
use crate::registry::index::{ResourceDescriptor, ResourceKind};
use crate::resolve::{catalog, listing, PackageMap};
use std::num::NonZeroUsize;

/// Resolve one resource descriptor.
///
/// `Ok(None)` is an intentional skip, not an error: autocomplete endpoints
/// carry no package data. Catalog and listing resources both require an
/// `@id` to fetch.
pub async fn dispatch(
    client: &RegistryClient,
    descriptor: &ResourceDescriptor,
    page_concurrency: NonZeroUsize,
) -> Result<Option<PackageMap>, ResolveError> {
    match descriptor.kind() {
        ResourceKind::Autocomplete => {
            tracing::info!("skipping autocomplete resource {}", descriptor.describe());
            Ok(None)
        }
        ResourceKind::Catalog => {
            let url = descriptor.id.as_deref().ok_or(ResolveError::MissingId)?;
            catalog::resolve_catalog(client, url, page_concurrency)
                .await
                .map(Some)
        }
        ResourceKind::Listing => {
            let url = descriptor.id.as_deref().ok_or(ResolveError::MissingId)?;
            listing::resolve_listing(client, url).await.map(Some)
        }
    }
}
