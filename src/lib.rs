// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Parts
//!
//! Parametric parts and assemblies that compile to OpenSCAD CSG.
//! Components describe single parts with a known bounding box and anchor;
//! an [`Assembly`] places named components and nested assemblies, lays them
//! out by stacking, centering and face alignment, and unions the result into
//! one [`Node`] tree ready for script export.

pub mod assembly;
pub mod ast;
pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;

pub use assembly::{Assembly, Item, Placement, TestReport};
pub use ast::{Node, NodeKind, TransformOp, Vec3};
pub use component::Component;
pub use config::Settings;
pub use error::AssemblyError;
pub use geometry::{Axis, BoundingBox, Extent, Face};
pub use io::{export_scad, load_assembly, to_scad, ExportSummary, Manifest};

use std::path::Path;

/// Build the assembly described by a manifest and write it as a script
pub fn export_manifest(
    manifest: impl AsRef<Path>,
    output: impl AsRef<Path>,
    settings: &Settings,
) -> anyhow::Result<ExportSummary> {
    load_assembly(manifest, settings)?.export_scad(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Cube;

    #[test]
    fn test_basic_assembly_script() {
        let mut assembly = Assembly::new();
        assembly
            .add("cube", Cube::new(10.0, 10.0, 10.0).unwrap(), Placement::default())
            .unwrap();
        let script = to_scad(&assembly.assemble());
        assert!(script.contains("cube(size = [10, 10, 10], center = true);"));
        assert!(script.contains("// cube"));
    }
}
