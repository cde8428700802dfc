//! nucat - concurrent NuGet v3 registry crawler
//!
//! Discovers a registry's service index, then walks its resources - flat
//! listings and multi-level paginated catalogs - in parallel to build one
//! package -> versions mapping. Individual resources, pages, and entries may
//! fail without aborting the rest of the crawl; only an unusable service
//! index is fatal.

pub mod error;
pub mod output;
pub mod registry;
pub mod resolve;

pub use error::{FetchError, ResolveError, RunError};
pub use registry::http::RegistryClient;
pub use resolve::{crawl, CrawlOutcome, PackageMap};
