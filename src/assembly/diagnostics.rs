// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Diagnostic sweep over an assembly tree

use super::{Assembly, Item};
use crate::geometry::Extent;
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of checking one component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRecord {
    /// Item names from the outermost assembly down, joined with `/`
    pub path: String,
    pub kind: &'static str,
    pub extent: Extent,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestReport {
    pub records: Vec<TestRecord>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.records.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.iter().filter(|r| !r.passed)
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn passed_count(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }
}

impl Assembly {
    /// Run `test` on every component, descending into nested assemblies.
    ///
    /// Every component is visited even after a failure.
    pub fn test_assembly(&self) -> TestReport {
        let mut report = TestReport::default();
        self.collect_tests("", &mut report);
        debug!(
            total = report.total(),
            passed = report.passed_count(),
            "Diagnostics complete"
        );
        report
    }

    fn collect_tests(&self, prefix: &str, report: &mut TestReport) {
        for entry in &self.entries {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{}/{}", prefix, entry.name)
            };

            match &entry.item {
                Item::Assembly(nested) => nested.collect_tests(&path, report),
                Item::Component(component) => {
                    let passed = component.test();
                    if !passed {
                        warn!(item = %path, kind = component.kind(), "Component failed check");
                    }
                    report.records.push(TestRecord {
                        path,
                        kind: component.kind(),
                        extent: component.bounding_box(),
                        passed,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Placement;
    use crate::ast::{Node, Vec3};
    use crate::component::{Component, Cube};

    #[derive(Debug)]
    struct Inverted;

    impl Component for Inverted {
        fn kind(&self) -> &'static str {
            "inverted"
        }

        fn bounding_box(&self) -> Extent {
            Extent::new(1.0, -1.0, 1.0)
        }

        fn create(&self) -> Node {
            Node::cube(Vec3::new(1.0, 1.0, 1.0), true)
        }
    }

    #[test]
    fn test_sweep_continues_past_failures() {
        let mut inner = Assembly::new();
        inner.add("bad", Inverted, Placement::default()).unwrap();
        inner
            .add("good", Cube::new(1.0, 1.0, 1.0).unwrap(), Placement::default())
            .unwrap();

        let mut outer = Assembly::new();
        outer.add("first", Inverted, Placement::default()).unwrap();
        outer.add("sub", inner, Placement::default()).unwrap();

        let report = outer.test_assembly();
        assert!(!report.passed());
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 1);

        let failed: Vec<&str> = report.failures().map(|r| r.path.as_str()).collect();
        assert_eq!(failed, vec!["first", "sub/bad"]);
    }

    #[test]
    fn test_empty_assembly_passes() {
        let report = Assembly::new().test_assembly();
        assert!(report.passed());
        assert_eq!(report.total(), 0);
    }
}
