//! Typed registry documents
//!
//! One decode boundary per wire document kind. Document-level requirements
//! (the `resources`, `data`, and `items` arrays) are enforced here by typed
//! serde decodes; element-level leniency lives in the per-entry helpers so
//! that one malformed entry never poisons its siblings.
//!
//! NuGet v3 linked-data conventions: service-index resources and catalog
//! items are addressed through `@id`/`@type`, while package documents and
//! search-data entries carry the package identifier in a plain `id` field.

use crate::error::{ResolveError, RunError};
use crate::registry::http::RegistryClient;
use serde::Deserialize;
use serde_json::Value;

/// Type-tag prefix of autocomplete endpoints, which carry no package data
const AUTOCOMPLETE_PREFIX: &str = "SearchAutocompleteService";

/// Type-tag prefix of paginated catalog resources
const CATALOG_PREFIX: &str = "Catalog";

/// Item type followed when walking a catalog root
pub const CATALOG_PAGE_TYPE: &str = "CatalogPage";

/// Item type followed when walking a catalog page
pub const PACKAGE_DETAILS_TYPE: &str = "nuget:PackageDetails";

/// Resource classification, decided once at the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Autocomplete endpoints are intentionally skipped.
    Autocomplete,
    /// Paginated catalog: root -> pages -> package details.
    Catalog,
    /// Everything else is treated as a flat listing; unrecognized types land
    /// here as well.
    Listing,
}

impl ResourceKind {
    /// Classify a raw `@type` tag by prefix match.
    pub fn classify(type_tag: &str) -> Self {
        if type_tag.starts_with(AUTOCOMPLETE_PREFIX) {
            ResourceKind::Autocomplete
        } else if type_tag.starts_with(CATALOG_PREFIX) {
            ResourceKind::Catalog
        } else {
            ResourceKind::Listing
        }
    }
}

/// One entry of the service index: a capability endpoint and its type.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDescriptor {
    /// Fetch target; a descriptor without one is unusable.
    #[serde(rename = "@id")]
    pub id: Option<String>,
    /// Raw type tag, e.g. "SearchQueryService/3.5.0" or "Catalog/3.0.0".
    #[serde(rename = "@type", default)]
    pub type_tag: String,
}

impl ResourceDescriptor {
    /// Classify this descriptor's type tag.
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::classify(&self.type_tag)
    }

    /// Human-readable identity for logs and reports.
    pub fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("{} ({})", self.type_tag, id),
            None => self.type_tag.clone(),
        }
    }
}

/// The root service index document.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceIndex {
    resources: Vec<Value>,
}

impl ServiceIndex {
    /// Decode a service index document. A document without a `resources`
    /// array cannot be crawled at all.
    pub fn decode(doc: Value, url: &str) -> Result<Self, RunError> {
        serde_json::from_value(doc).map_err(|_| RunError::MissingResources {
            url: url.to_string(),
        })
    }

    /// Decode the descriptor list; malformed entries are logged and skipped.
    pub fn descriptors(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .iter()
            .filter_map(|raw| match serde_json::from_value(raw.clone()) {
                Ok(descriptor) => Some(descriptor),
                Err(err) => {
                    tracing::warn!("skipping malformed resource descriptor: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// Fetch and decode the service index. Failures here are fatal to the run;
/// no resource fetch is attempted after one.
pub async fn fetch_service_index(
    client: &RegistryClient,
    url: &str,
) -> Result<ServiceIndex, RunError> {
    let doc = client.fetch_json(url).await?;
    ServiceIndex::decode(doc, url)
}

/// A catalog root: an ordered set of references, some of them pages.
#[derive(Debug, Deserialize)]
pub struct CatalogRoot {
    pub items: Vec<Value>,
}

impl CatalogRoot {
    pub fn decode(doc: Value, url: &str) -> Result<Self, ResolveError> {
        serde_json::from_value(doc).map_err(|_| ResolveError::MissingItems {
            url: url.to_string(),
        })
    }
}

/// One page of a catalog: an ordered set of package-event items.
#[derive(Debug, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<Value>,
}

impl CatalogPage {
    pub fn decode(doc: Value, url: &str) -> Result<Self, ResolveError> {
        serde_json::from_value(doc).map_err(|_| ResolveError::MissingItems {
            url: url.to_string(),
        })
    }
}

/// A linked-data reference inside a catalog root or page.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRef {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@type", default)]
    pub type_tag: String,
}

impl CatalogRef {
    /// Lenient per-item decode; anything that is not a reference object
    /// yields None.
    pub fn from_item(item: &Value) -> Option<Self> {
        serde_json::from_value(item.clone()).ok()
    }
}

/// A package-details document. The package identifier is the plain `id`
/// field, not the linked-data `@id` document address.
#[derive(Debug, Deserialize)]
pub struct PackageDetails {
    pub id: Option<String>,
}

impl PackageDetails {
    pub fn decode(doc: Value) -> Option<Self> {
        serde_json::from_value(doc).ok()
    }
}

/// A flat listing document: every package entry in one `data` array.
#[derive(Debug, Deserialize)]
pub struct FlatListing {
    pub data: Vec<Value>,
}

impl FlatListing {
    pub fn decode(doc: Value, url: &str) -> Result<Self, ResolveError> {
        serde_json::from_value(doc).map_err(|_| ResolveError::MissingData {
            url: url.to_string(),
        })
    }
}

/// One entry of a flat listing.
#[derive(Debug, Deserialize)]
pub struct ListingEntry {
    pub id: Option<String>,
    #[serde(default)]
    pub versions: Vec<Value>,
}

impl ListingEntry {
    /// Lenient per-element decode; non-object elements yield None.
    pub fn from_element(element: &Value) -> Option<Self> {
        serde_json::from_value(element.clone()).ok()
    }
}

/// Extract the reference identifier of one version entry. Malformed entries
/// yield None, which is retained positionally by the listing resolver so
/// version counts stay meaningful.
pub fn version_id(entry: &Value) -> Option<String> {
    entry
        .get("id")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_autocomplete_prefix() {
        assert_eq!(
            ResourceKind::classify("SearchAutocompleteService/3.5.0"),
            ResourceKind::Autocomplete
        );
    }

    #[test]
    fn classify_catalog_prefix() {
        assert_eq!(
            ResourceKind::classify("Catalog/3.0.0"),
            ResourceKind::Catalog
        );
    }

    #[test]
    fn classify_everything_else_as_listing() {
        assert_eq!(
            ResourceKind::classify("SearchQueryService/3.5.0"),
            ResourceKind::Listing
        );
        assert_eq!(ResourceKind::classify(""), ResourceKind::Listing);
        assert_eq!(
            ResourceKind::classify("RegistrationsBaseUrl/3.6.0"),
            ResourceKind::Listing
        );
    }

    #[test]
    fn service_index_requires_resources() {
        let err = ServiceIndex::decode(json!({"version": "3.0.0"}), "http://idx");
        assert!(matches!(err, Err(RunError::MissingResources { .. })));
    }

    #[test]
    fn service_index_skips_malformed_descriptors() {
        let index = ServiceIndex::decode(
            json!({
                "resources": [
                    {"@id": "http://a", "@type": "SearchQueryService"},
                    "not-an-object",
                    {"@id": 42, "@type": "Catalog/3.0.0"}
                ]
            }),
            "http://idx",
        )
        .unwrap();

        let descriptors = index.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].id.as_deref(), Some("http://a"));
    }

    #[test]
    fn descriptor_without_id_still_decodes() {
        let index = ServiceIndex::decode(
            json!({"resources": [{"@type": "SearchQueryService"}]}),
            "http://idx",
        )
        .unwrap();

        let descriptors = index.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert!(descriptors[0].id.is_none());
    }

    #[test]
    fn version_id_handles_malformed_entries() {
        assert_eq!(version_id(&json!({"id": "1.0.0"})), Some("1.0.0".into()));
        assert_eq!(version_id(&json!({})), None);
        assert_eq!(version_id(&json!({"id": 3})), None);
        assert_eq!(version_id(&json!("1.0.0")), None);
    }
}
