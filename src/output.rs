//! Output rendering
//!
//! The final mapping is printed to stdout as JSON. BTreeMap keys serialize
//! in sorted order, so two crawls over the same data render byte-identical
//! output regardless of completion order.

use crate::resolve::PackageMap;

/// Render the package mapping as pretty-printed JSON with stable key order.
/// Unresolved version slots render as `null`.
pub fn render_packages(packages: &PackageMap) -> serde_json::Result<String> {
    serde_json::to_string_pretty(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sorted_keys_and_null_slots() {
        let mut packages = PackageMap::new();
        packages.insert("zeta".to_string(), vec![Some("2.0".to_string())]);
        packages.insert("alpha".to_string(), vec![Some("1.0".to_string()), None]);

        let rendered = render_packages(&packages).unwrap();
        let alpha = rendered.find("alpha").unwrap();
        let zeta = rendered.find("zeta").unwrap();

        assert!(alpha < zeta);
        assert!(rendered.contains("null"));
    }

    #[test]
    fn renders_empty_mapping_as_empty_object() {
        let packages = PackageMap::new();
        assert_eq!(render_packages(&packages).unwrap(), "{}");
    }
}
