//! Property-based tests for install planning.
//!
//! These tests generate random dependency graphs and verify that the
//! planner's ordering and termination guarantees hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::metadata::{ComponentKind, ComponentMetadata, MetadataResolver};
    use crate::phases::planning::plan_with;
    use crate::registry::{Registry, RegistryEntry};
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn component_name(i: usize) -> String {
        format!("c{}", i)
    }

    /// Write a library where component `i` depends on `edges[i]`.
    fn build_library(edges: &[Vec<usize>]) -> (TempDir, Registry) {
        let temp = TempDir::new().unwrap();
        let mut entries = Vec::new();

        for (i, deps) in edges.iter().enumerate() {
            let name = component_name(i);
            let mut metadata = ComponentMetadata::new(name.clone(), ComponentKind::Utility);
            metadata.dependencies = deps.iter().map(|&d| component_name(d)).collect();

            let dir = temp.path().join(&name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(
                dir.join("component.json"),
                serde_json::to_string(&metadata).unwrap(),
            )
            .unwrap();
            entries.push(RegistryEntry::new(name.clone(), name));
        }

        let registry = Registry::new(temp.path(), entries);
        (temp, registry)
    }

    /// Acyclic graphs: every edge points at a higher index.
    fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (1usize..9).prop_flat_map(|n| {
            (0..n)
                .map(|i| {
                    let later: Vec<usize> = ((i + 1)..n).collect();
                    proptest::sample::subsequence(later.clone(), 0..=later.len())
                })
                .collect::<Vec<_>>()
        })
    }

    /// Arbitrary graphs, cycles and self-loops included.
    fn any_graph() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (1usize..9).prop_flat_map(|n| proptest::collection::vec(proptest::collection::vec(0..n, 0..4), n))
    }

    fn reachable(edges: &[Vec<usize>], root: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if seen.insert(node) {
                stack.extend(edges[node].iter().copied());
            }
        }
        seen
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: every reachable edge X -> Y places Y before X
        #[test]
        fn dependencies_precede_dependents(edges in dag()) {
            let (_temp, registry) = build_library(&edges);
            let mut resolver = MetadataResolver::new();
            let (plan, diagnostics) = plan_with(&registry, &mut resolver, "c0");

            prop_assert!(diagnostics.is_empty());
            for node in reachable(&edges, 0) {
                let x = plan.position(&component_name(node)).unwrap();
                for &dep in &edges[node] {
                    let y = plan.position(&component_name(dep)).unwrap();
                    prop_assert!(y < x, "c{} must precede c{}", dep, node);
                }
            }
            prop_assert_eq!(plan.order.last().map(String::as_str), Some("c0"));
        }

        /// Property: the plan contains exactly the reachable components, once each
        #[test]
        fn plan_is_reachable_set_without_duplicates(edges in any_graph()) {
            let (_temp, registry) = build_library(&edges);
            let mut resolver = MetadataResolver::new();
            let (plan, _) = plan_with(&registry, &mut resolver, "c0");

            let unique: HashSet<&str> = plan.iter().collect();
            prop_assert_eq!(unique.len(), plan.len());

            let expected: HashSet<String> =
                reachable(&edges, 0).into_iter().map(component_name).collect();
            let actual: HashSet<String> = plan.order.iter().cloned().collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: planning is deterministic, even with a warm metadata cache
        #[test]
        fn plan_is_deterministic(edges in any_graph()) {
            let (_temp, registry) = build_library(&edges);
            let mut resolver = MetadataResolver::new();
            let (first, first_diagnostics) = plan_with(&registry, &mut resolver, "c0");
            let (second, second_diagnostics) = plan_with(&registry, &mut resolver, "c0");

            prop_assert_eq!(first, second);
            prop_assert_eq!(first_diagnostics, second_diagnostics);
        }
    }
}
