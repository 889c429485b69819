//! Property-based tests for manual region merging and ordered resolution.

#[cfg(test)]
mod proptest_tests {
    use std::path::Path;

    use crate::markers::{begin_marker, end_marker, merge_regions, parse_regions};
    use crate::registry::{Dependency, DependencySet, Scope};
    use proptest::prelude::*;

    fn region(id: &str, body: &[String]) -> String {
        let mut text = format!("{}\n", begin_marker(id));
        for line in body {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&end_marker(id));
        text.push('\n');
        text
    }

    // ============================================================================
    // manual region properties
    // ============================================================================

    proptest! {
        /// Property: the body of a manual region survives any regeneration
        #[test]
        fn manual_body_survives_regeneration(
            body in prop::collection::vec("[a-z <>/]{0,24}", 0..8),
            old_head in "[a-z ]{0,16}",
            new_head in "[a-z ]{0,16}",
        ) {
            let existing = format!("{}\n{}", old_head, region("notes", &body));
            let rendered = format!("{}\n{}", new_head, region("notes", &[]));
            let merged = merge_regions(Path::new("a.md"), &existing, &rendered).unwrap();

            let regions = parse_regions(Path::new("a.md"), &merged).unwrap();
            prop_assert_eq!(regions.len(), 1);
            let expected: String = body.iter().map(|l| format!("{}\n", l)).collect();
            prop_assert_eq!(&regions[0].body, &expected);
            prop_assert!(merged.starts_with(&new_head));
        }

        /// Property: merging a merged result again changes nothing
        #[test]
        fn merge_is_idempotent(
            body in prop::collection::vec("[a-z ]{0,24}", 0..8),
            head in "[a-z ]{0,16}",
        ) {
            let existing = region("plugins", &body);
            let rendered = format!("{}\n{}", head, region("plugins", &[]));
            let once = merge_regions(Path::new("pom.xml"), &existing, &rendered).unwrap();
            let twice = merge_regions(Path::new("pom.xml"), &once, &rendered).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: text without markers merges to the rendering unchanged
        #[test]
        fn merge_without_regions_returns_rendering(
            existing in "[a-z \n]{0,64}",
            rendered in "[a-z \n]{0,64}",
        ) {
            let merged = merge_regions(Path::new("a.md"), &existing, &rendered).unwrap();
            prop_assert_eq!(merged, rendered);
        }
    }

    // ============================================================================
    // dependency ordering properties
    // ============================================================================

    proptest! {
        /// Property: distinct dependencies keep their insertion order
        #[test]
        fn dependency_set_preserves_insertion_order(
            artifacts in prop::collection::btree_set("[a-z]{1,8}", 1..12),
        ) {
            let mut artifacts: Vec<String> = artifacts.into_iter().collect();
            artifacts.reverse();

            let mut set = DependencySet::new();
            for artifact in &artifacts {
                set.insert(Dependency {
                    group: "org.example".to_string(),
                    artifact: artifact.clone(),
                    version: "1.0".to_string(),
                    scope: Scope::Main,
                    pinned: false,
                })
                .unwrap();
            }
            let order: Vec<String> = set.iter().map(|d| d.artifact.clone()).collect();
            prop_assert_eq!(order, artifacts);
        }
    }
}
