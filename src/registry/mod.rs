//! Registry access layer
//!
//! This module provides the transport and document model for talking to a
//! NuGet v3 registry.
//!
//! # Module Structure
//!
//! - [`http`] - HTTP client for fetching JSON documents
//! - [`index`] - Typed wire documents: service index, catalog, flat listings
//!
//! # Example
//!
//! ```ignore
//! use nucat::registry::{http::RegistryClient, index};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = RegistryClient::new()?;
//!     let index = index::fetch_service_index(&client, "https://api.nuget.org/v3/index.json").await?;
//!     println!("{} resources", index.descriptors().len());
//!     Ok(())
//! }
//! ```

pub mod http;
pub mod index;
