//! Resource resolution layer
//!
//! Turns the heterogeneous resources named by a service index into one
//! package -> versions mapping.
//!
//! # Architecture
//!
//! - [`dispatch`] - Routes a descriptor to its resolver by resource kind
//! - [`listing`] - Resolves flat listings (one document, all entries)
//! - [`catalog`] - Walks two-level paginated catalogs
//! - [`orchestrator`] - Runs every resource with bounded concurrency and
//!   merges the partial results
//!
//! Every resolver returns an owned partial mapping; merging happens in a
//! single-threaded reduce after each task completes, so no map is ever
//! mutated from two tasks at once.

pub mod catalog;
pub mod dispatch;
pub mod listing;
pub mod orchestrator;

use std::collections::BTreeMap;

/// Ordered versions of one package. A `None` slot is a version entry that
/// could not be resolved, retained positionally.
pub type PackageVersions = Vec<Option<String>>;

/// Package identifier -> versions mapping. BTreeMap keeps key order
/// deterministic for output.
pub type PackageMap = BTreeMap<String, PackageVersions>;

/// Merge a partial mapping into an accumulator, last write wins per package.
pub fn merge(into: &mut PackageMap, partial: PackageMap) {
    into.extend(partial);
}

pub use dispatch::dispatch;
pub use orchestrator::{crawl, CrawlOutcome, ResourceOutcome, ResourceReport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_last_write_wins() {
        let mut acc = PackageMap::new();
        acc.insert("pkg".to_string(), vec![Some("1.0".to_string())]);

        let mut partial = PackageMap::new();
        partial.insert("pkg".to_string(), vec![Some("2.0".to_string())]);
        partial.insert("other".to_string(), vec![]);

        merge(&mut acc, partial);

        assert_eq!(acc.len(), 2);
        assert_eq!(acc["pkg"], vec![Some("2.0".to_string())]);
        assert_eq!(acc["other"], Vec::<Option<String>>::new());
    }
}
