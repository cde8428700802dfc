//! Property-based tests using proptest
//!
//! Randomized checks of resource classification and the merge rule the
//! orchestrator relies on.

use nucat::registry::index::ResourceKind;
use nucat::resolve::{merge, PackageMap};
use proptest::prelude::*;

/// Generate an arbitrary version list, including unresolved slots
fn arb_versions() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(
        prop_oneof![
            Just(None),
            "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}".prop_map(Some)
        ],
        0..5,
    )
}

/// Generate an arbitrary package mapping
fn arb_package_map() -> impl Strategy<Value = PackageMap> {
    prop::collection::btree_map("[a-z][a-z0-9.]{0,12}", arb_versions(), 0..20)
}

proptest! {
    /// Merging never loses keys: the result is the union of both maps
    #[test]
    fn merge_keys_are_the_union(a in arb_package_map(), b in arb_package_map()) {
        let mut merged = a.clone();
        merge(&mut merged, b.clone());

        for key in a.keys().chain(b.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert_eq!(merged.len(), a.keys().chain(b.keys()).collect::<std::collections::BTreeSet<_>>().len());
    }

    /// On key collision the later map wins
    #[test]
    fn merge_prefers_the_later_map(a in arb_package_map(), b in arb_package_map()) {
        let mut merged = a.clone();
        merge(&mut merged, b.clone());

        for (key, versions) in &b {
            prop_assert_eq!(&merged[key], versions);
        }
        for (key, versions) in &a {
            if !b.contains_key(key) {
                prop_assert_eq!(&merged[key], versions);
            }
        }
    }

    /// Merging an empty partial changes nothing
    #[test]
    fn merge_with_empty_is_identity(a in arb_package_map()) {
        let mut merged = a.clone();
        merge(&mut merged, PackageMap::new());
        prop_assert_eq!(merged, a);
    }

    /// Any type tag extending the autocomplete prefix classifies as a skip
    #[test]
    fn autocomplete_prefix_always_classifies_as_autocomplete(suffix in "[ -~]{0,24}") {
        let tag = format!("SearchAutocompleteService{suffix}");
        prop_assert_eq!(ResourceKind::classify(&tag), ResourceKind::Autocomplete);
    }

    /// Any type tag extending the catalog prefix classifies as a catalog
    #[test]
    fn catalog_prefix_always_classifies_as_catalog(suffix in "[ -~]{0,24}") {
        let tag = format!("Catalog{suffix}");
        prop_assert_eq!(ResourceKind::classify(&tag), ResourceKind::Catalog);
    }

    /// Tags starting with neither prefix fall through to the listing path
    #[test]
    fn other_tags_classify_as_listing(tag in "[a-z][A-Za-z/0-9.]{0,30}") {
        // lowercase first character can match neither prefix
        prop_assert_eq!(ResourceKind::classify(&tag), ResourceKind::Listing);
    }
}
