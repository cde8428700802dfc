//! Concurrent crawl orchestrator
//!
//! Runs the dispatcher over every top-level resource with bounded
//! concurrency, waits for the full set, and merges the partial mappings in
//! completion order. Each task returns an owned partial result; the merge is
//! a single-threaded reduce, so no shared map is locked during the fetch
//! phase.

use crate::error::ResolveError;
use crate::registry::http::RegistryClient;
use crate::registry::index::ResourceDescriptor;
use crate::resolve::dispatch::dispatch;
use crate::resolve::{self, PackageMap};
use futures::StreamExt;
use std::num::NonZeroUsize;

/// Terminal outcome of one resource.
#[derive(Debug)]
pub enum ResourceOutcome {
    /// The resource resolved into this many packages.
    Resolved { packages: usize },
    /// The resource was intentionally skipped.
    Skipped,
    /// The resource failed and contributed nothing.
    Failed(ResolveError),
}

/// Per-resource report, attributable to the originating descriptor.
#[derive(Debug)]
pub struct ResourceReport {
    pub descriptor: ResourceDescriptor,
    pub outcome: ResourceOutcome,
}

/// Result of a full crawl. A crawl never fails as a whole: failures are
/// attributed to individual resources in `reports`, and partial results are
/// always preferable to none.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub packages: PackageMap,
    pub reports: Vec<ResourceReport>,
}

impl CrawlOutcome {
    /// Count of resources with the given outcome shape.
    pub fn resolved_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, ResourceOutcome::Resolved { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, ResourceOutcome::Skipped))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, ResourceOutcome::Failed(_)))
            .count()
    }
}

/// Crawl every resource of a service index with at most `concurrency`
/// resources in flight. Catalog page fan-out inside one resource reuses the
/// same bound.
///
/// No early cancellation: a slow or failing resource never blocks or aborts
/// its siblings, and the crawl returns only when every task has finished.
pub async fn crawl(
    client: &RegistryClient,
    resources: Vec<ResourceDescriptor>,
    concurrency: NonZeroUsize,
) -> CrawlOutcome {
    tracing::info!(
        "crawling {} resources with concurrency {}",
        resources.len(),
        concurrency
    );

    let mut tasks = futures::stream::iter(resources.into_iter().map(|descriptor| async move {
        let result = dispatch(client, &descriptor, concurrency).await;
        (descriptor, result)
    }))
    .buffer_unordered(concurrency.get());

    let mut outcome = CrawlOutcome::default();
    while let Some((descriptor, result)) = tasks.next().await {
        let resource_outcome = match result {
            Ok(Some(partial)) => {
                tracing::info!(
                    "resource {} resolved {} packages",
                    descriptor.describe(),
                    partial.len()
                );
                let packages = partial.len();
                resolve::merge(&mut outcome.packages, partial);
                ResourceOutcome::Resolved { packages }
            }
            Ok(None) => ResourceOutcome::Skipped,
            Err(err) => {
                tracing::error!("resource {} failed: {}", descriptor.describe(), err);
                ResourceOutcome::Failed(err)
            }
        };

        outcome.reports.push(ResourceReport {
            descriptor,
            outcome: resource_outcome,
        });
    }

    outcome
}
