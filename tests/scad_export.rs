// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script export tests

use anyhow::Result;
use polyframe_parts::component::{Collar, Cube, MountingPlate, Torus};
use polyframe_parts::{to_scad, Assembly, Axis, Placement};
use tempfile::TempDir;

fn bracket() -> Assembly {
    let mut assembly = Assembly::new();
    assembly
        .add(
            "plate",
            MountingPlate::new(42.0, 42.0, 3.0, 3.0, 31.0, 31.0)
                .unwrap()
                .with_segments(24),
            Placement::default(),
        )
        .unwrap();
    assembly
        .add(
            "collar",
            Collar::new(8.0, 3.0, 6.0, 2.0, 3.0, 4.0).unwrap().with_color("orange"),
            Placement::default(),
        )
        .unwrap();
    assembly
        .add(
            "ring",
            Torus::new(30.0, 2.0).unwrap().with_segments(32),
            Placement::at(0.0, 0.0, 10.0).rotated(90.0, 0.0, 0.0),
        )
        .unwrap();
    assembly.stack_z(1.0);
    assembly
}

#[test]
fn test_export_writes_named_items() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bracket.scad");

    let summary = bracket().export_scad(&path)?;
    let script = std::fs::read_to_string(&path)?;

    assert_eq!(summary.path, path);
    assert_eq!(summary.bytes, script.len());
    assert!(script.starts_with("// Generated by polyframe-parts"));
    for name in ["// plate", "// collar", "// ring"] {
        assert!(script.contains(name), "missing {} in\n{}", name, script);
    }
    assert!(script.contains("color(\"orange\")"));
    assert!(script.contains("rotate([90, 0, 0])"));
    assert!(script.contains("$fn = 24"));
    Ok(())
}

#[test]
fn test_export_is_deterministic() -> Result<()> {
    let dir = TempDir::new()?;
    let first = bracket().export_scad(dir.path().join("a.scad"))?;
    let second = bracket().export_scad(dir.path().join("b.scad"))?;

    assert_eq!(first.sha256, second.sha256);
    assert_eq!(first.bytes, second.bytes);
    Ok(())
}

#[test]
fn test_parallel_script_matches() {
    let assembly = bracket();
    assert_eq!(
        to_scad(&assembly.assemble()),
        to_scad(&assembly.assemble_parallel())
    );
}

#[test]
fn test_collar_create_is_repeatable() {
    let collar = Collar::new(8.0, 3.0, 6.0, 2.0, 3.0, 4.0).unwrap().closed_by(0.5);
    let mut assembly = Assembly::new();
    assembly.add("collar", collar, Placement::default()).unwrap();

    assert_eq!(
        to_scad(&assembly.assemble()),
        to_scad(&assembly.assemble())
    );
}

#[test]
fn test_cross_section_export() -> Result<()> {
    let mut assembly = Assembly::new();
    assembly.add("block", Cube::new(20.0, 20.0, 20.0)?, Placement::default())?;

    let section = assembly.cross_section_view(Axis::Y, 3.0);
    let script = to_scad(&section);
    assert!(script.contains("intersection() {"));
    assert!(script.contains("translate([0, 3, 0])"));

    let dir = TempDir::new()?;
    let summary = polyframe_parts::export_scad(&section, dir.path().join("section.scad"))?;
    assert!(summary.bytes > 0);
    Ok(())
}

#[test]
fn test_empty_export() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("empty.scad");
    Assembly::new().export_scad(&path)?;

    let script = std::fs::read_to_string(&path)?;
    assert!(script.trim_end().ends_with("union() {}"));
    Ok(())
}
