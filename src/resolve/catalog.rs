//! Catalog walker
//!
//! Two-level pagination: the catalog root lists pages, each page lists
//! package-event items whose details documents name the package. Pages are
//! fetched concurrently with the same bound as the top-level crawl, and one
//! failing page never aborts its siblings - catalogs can run to thousands of
//! pages.

use crate::error::ResolveError;
use crate::registry::http::RegistryClient;
use crate::registry::index::{
    CatalogPage, CatalogRef, CatalogRoot, PackageDetails, CATALOG_PAGE_TYPE, PACKAGE_DETAILS_TYPE,
};
use crate::resolve::{self, PackageMap};
use futures::StreamExt;
use serde_json::Value;
use std::num::NonZeroUsize;

/// Resolve a catalog resource into a partial package mapping.
///
/// The walker only establishes package presence: catalog-sourced packages
/// are recorded with an empty version list, and pick up version data when a
/// flat listing resource covers the same package.
pub async fn resolve_catalog(
    client: &RegistryClient,
    url: &str,
    page_concurrency: NonZeroUsize,
) -> Result<PackageMap, ResolveError> {
    let doc = client.fetch_json(url).await?;
    let root = CatalogRoot::decode(doc, url)?;

    let page_urls: Vec<String> = root
        .items
        .iter()
        .filter_map(|item| page_ref(item, url))
        .collect();

    tracing::debug!("catalog {} has {} pages", url, page_urls.len());

    let mut pages = futures::stream::iter(page_urls.into_iter().map(|page_url| async move {
        let result = resolve_page(client, &page_url).await;
        (page_url, result)
    }))
    .buffer_unordered(page_concurrency.get());

    let mut packages = PackageMap::new();
    while let Some((page_url, result)) = pages.next().await {
        match result {
            Ok(partial) => resolve::merge(&mut packages, partial),
            Err(err) => tracing::error!("catalog page {} failed: {}", page_url, err),
        }
    }

    Ok(packages)
}

/// Extract the URL of a catalog page reference. Items of other types are
/// skipped silently; a page reference without an `@id` is an error worth
/// logging but never fatal.
fn page_ref(item: &Value, catalog_url: &str) -> Option<String> {
    let reference = CatalogRef::from_item(item)?;
    if reference.type_tag != CATALOG_PAGE_TYPE {
        return None;
    }
    if reference.id.is_none() {
        tracing::error!("catalog page without '@id' in {}", catalog_url);
    }
    reference.id
}

/// Resolve one catalog page: follow every package-details item and record
/// the package it names.
async fn resolve_page(
    client: &RegistryClient,
    page_url: &str,
) -> Result<PackageMap, ResolveError> {
    let doc = client.fetch_json(page_url).await?;
    let page = CatalogPage::decode(doc, page_url)?;

    let mut packages = PackageMap::new();
    for item in &page.items {
        let Some(details_url) = details_ref(item, page_url) else {
            continue;
        };

        if let Some(package_id) = fetch_package_id(client, &details_url).await {
            packages.insert(package_id, Vec::new());
        }
    }

    Ok(packages)
}

/// Extract the details-document URL of a package item, skipping items of
/// other types.
fn details_ref(item: &Value, page_url: &str) -> Option<String> {
    let reference = CatalogRef::from_item(item)?;
    if reference.type_tag != PACKAGE_DETAILS_TYPE {
        return None;
    }
    if reference.id.is_none() {
        tracing::warn!("package item without '@id' in {}", page_url);
    }
    reference.id
}

/// Fetch a package-details document and extract the package identifier from
/// its `id` field. Any failure skips the single package.
async fn fetch_package_id(client: &RegistryClient, details_url: &str) -> Option<String> {
    let doc = match client.fetch_json(details_url).await {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!("package details {} failed: {}", details_url, err);
            return None;
        }
    };

    let Some(details) = PackageDetails::decode(doc) else {
        tracing::warn!("package details {} is malformed", details_url);
        return None;
    };

    match details.id {
        Some(package_id) => Some(package_id),
        None => {
            tracing::warn!("package details {} has no 'id' field", details_url);
            None
        }
    }
}
