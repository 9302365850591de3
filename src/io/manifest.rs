// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Assembly manifests
//!
//! A manifest describes an assembly as data: a list of items, each either a
//! part (tagged by `type`) or a nested assembly, followed by layout
//! operations applied in order.
//!
//! ```toml
//! [[item]]
//! name = "base"
//! part = { type = "cube", width = 40, length = 40, height = 5 }
//!
//! [[item]]
//! name = "bearing"
//! part = { type = "bearing", inner_diameter = 8, outer_diameter = 22, thickness = 7 }
//!
//! [[layout]]
//! op = "join"
//! base = "base"
//! added = "bearing"
//! align = "top"
//! face_align = "bottom"
//! ```

use crate::assembly::{Assembly, Item, Placement};
use crate::ast::Vec3;
use crate::component::{
    Bearing, Collar, Cone, Cube, Cylinder, HexagonalPrism, MeshPart, MountingPlate, Pyramid,
    Sphere, Tetrahedron, Torus, TriangularPrism, Washer,
};
use crate::config::Settings;
use crate::error::AssemblyError;
use crate::geometry::{Axis, Face};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Serialized form of an assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "item")]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub layout: Vec<LayoutOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub part: Option<PartSpec>,
    #[serde(default)]
    pub assembly: Option<Manifest>,
}

/// Every part type a manifest can name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartSpec {
    Cube(Cube),
    Cylinder(Cylinder),
    Sphere(Sphere),
    Cone(Cone),
    Pyramid(Pyramid),
    Tetrahedron(Tetrahedron),
    Torus(Torus),
    TriangularPrism(TriangularPrism),
    HexagonalPrism(HexagonalPrism),
    Washer(Washer),
    Bearing(Bearing),
    Collar(Collar),
    MountingPlate(MountingPlate),
    Mesh(MeshPart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LayoutOp {
    Stack {
        axis: Axis,
        #[serde(default)]
        margin: f64,
    },
    Center,
    Join {
        base: String,
        added: String,
        align: Face,
        face_align: Face,
    },
}

/// Match arms for parts that only need validating and a segment default
macro_rules! tessellated_parts {
    ($spec:expr, $segments:expr, [$($variant:ident),+ $(,)?], $($rest:tt)*) => {
        match $spec {
            $(
                PartSpec::$variant(mut p) => {
                    p.validate()?;
                    p.inherit_segments($segments);
                    Item::from(p)
                }
            )+
            $($rest)*
        }
    };
}

impl PartSpec {
    /// Validate the part and fill in unset values from `settings`
    pub fn into_item(self, settings: &Settings) -> std::result::Result<Item, AssemblyError> {
        let segments = settings.segments;
        let item = tessellated_parts!(
            self,
            segments,
            [
                Cube,
                Cylinder,
                Sphere,
                Cone,
                Pyramid,
                Tetrahedron,
                Torus,
                TriangularPrism,
                HexagonalPrism,
                Washer,
                Bearing,
                Collar,
            ],
            PartSpec::MountingPlate(mut p) => {
                p.validate()?;
                p.inherit_segments(segments);
                p.inherit_clearance(settings.profile.clearance());
                Item::from(p)
            }
            PartSpec::Mesh(p) => {
                p.validate()?;
                Item::from(p)
            }
        );
        Ok(item)
    }
}

impl Manifest {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML manifest")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON manifest")
    }

    /// Read a manifest, picking the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let manifest = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        };
        manifest.with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Build the assembly, then apply the layout operations in order
    pub fn build(&self, settings: &Settings) -> Result<Assembly> {
        let mut assembly = Assembly::new();

        for spec in &self.items {
            let item = match (&spec.part, &spec.assembly) {
                (Some(part), None) => part
                    .clone()
                    .into_item(settings)
                    .with_context(|| format!("item '{}'", spec.name))?,
                (None, Some(nested)) => Item::from(
                    nested
                        .build(settings)
                        .with_context(|| format!("nested assembly '{}'", spec.name))?,
                ),
                (Some(_), Some(_)) => {
                    bail!("item '{}' declares both a part and an assembly", spec.name)
                }
                (None, None) => bail!("item '{}' declares neither a part nor an assembly", spec.name),
            };

            let placement = Placement {
                position: Vec3::from(spec.position),
                rotation: Vec3::from(spec.rotation),
                parent: spec.parent.clone(),
            };
            assembly.add(spec.name.clone(), item, placement)?;
        }

        for op in &self.layout {
            apply(&mut assembly, op)?;
        }

        debug!(
            name = self.name.as_deref().unwrap_or("-"),
            items = assembly.len(),
            ops = self.layout.len(),
            "Manifest built"
        );
        Ok(assembly)
    }
}

fn apply(assembly: &mut Assembly, op: &LayoutOp) -> Result<()> {
    match op {
        LayoutOp::Stack { axis, margin } => assembly.stack(*axis, *margin),
        LayoutOp::Center => assembly.center_assembly(),
        LayoutOp::Join {
            base,
            added,
            align,
            face_align,
        } => assembly
            .join_to_surface(base, added, *align, *face_align)
            .with_context(|| format!("join '{}' to '{}'", added, base))?,
    }
    Ok(())
}

/// Load and build a manifest in one step
pub fn load_assembly(path: impl AsRef<Path>, settings: &Settings) -> Result<Assembly> {
    let path = path.as_ref();
    Manifest::load(path)?
        .build(settings)
        .with_context(|| format!("Failed to build assembly from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManufacturingProfile;

    const STACK: &str = r#"
        name = "tower"

        [[item]]
        name = "a"
        part = { type = "cube", width = 10, length = 10, height = 10 }

        [[item]]
        name = "b"
        position = [0, 3, 0]
        part = { type = "cube", width = 20, length = 20, height = 20 }

        [[layout]]
        op = "stack"
        axis = "x"
        margin = 5
    "#;

    #[test]
    fn test_toml_stack() {
        let assembly = Manifest::from_toml(STACK)
            .unwrap()
            .build(&Settings::default())
            .unwrap();
        assert_eq!(assembly.position("b").unwrap(), Vec3::new(20.0, 3.0, 0.0));
    }

    #[test]
    fn test_settings_fill_unset_values() {
        let manifest = Manifest::from_toml(
            r#"
            [[item]]
            name = "rod"
            part = { type = "cylinder", diameter = 8, height = 100 }

            [[item]]
            name = "plate"
            part = { type = "mounting_plate", width = 40, length = 40, thickness = 3, hole_diameter = 3, hole_pitch_width = 31, hole_pitch_length = 31 }
            "#,
        )
        .unwrap();

        let settings = Settings {
            segments: 48,
            profile: ManufacturingProfile::CncMetal,
            ..Settings::default()
        };
        let assembly = manifest.build(&settings).unwrap();

        let script = crate::io::to_scad(&assembly.assemble());
        assert!(script.contains("$fn = 48"));
        // 3 mm holes opened up by the cnc metal clearance
        assert!(script.contains("r = 1.55,"), "{}", script);
    }

    #[test]
    fn test_every_part_type_is_validated() {
        let invalid = [
            r#"{ type = "cube", width = -1, length = 1, height = 1 }"#,
            r#"{ type = "cylinder", diameter = 8, height = -1 }"#,
            r#"{ type = "sphere", diameter = -2 }"#,
            r#"{ type = "cone", diameter = -4, height = 4 }"#,
            r#"{ type = "pyramid", base = -3, height = 3 }"#,
            r#"{ type = "tetrahedron", side = -5 }"#,
            r#"{ type = "torus", diameter = 60, thickness = -30 }"#,
            r#"{ type = "triangular_prism", width = 7, length = -7, height = 7 }"#,
            r#"{ type = "hexagonal_prism", across_flats = -8, height = 8 }"#,
            r#"{ type = "washer", outer_diameter = 16, inner_diameter = 8.4, thickness = -1 }"#,
            r#"{ type = "bearing", inner_diameter = 8, outer_diameter = 22, thickness = -7 }"#,
            r#"{ type = "collar", inner_diameter = -8, thickness = 3, width = 6, connection_gap = 2, connection_hole_diameter = 3, connection_thickness = 4 }"#,
        ];

        for part in invalid {
            let manifest = Manifest::from_toml(&format!("[[item]]\nname = \"bad\"\npart = {}\n", part))
                .unwrap();
            assert!(manifest.build(&Settings::default()).is_err(), "accepted {}", part);
        }
    }

    #[test]
    fn test_curved_parts_inherit_segments() {
        let manifest = Manifest::load(
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/geometry.toml"),
        )
        .unwrap();
        let settings = Settings {
            segments: 48,
            ..Settings::default()
        };
        let script = crate::io::to_scad(&manifest.build(&settings).unwrap().assemble());

        // cylinder, sphere, cone and torus (circle plus extrusion)
        assert!(script.matches("$fn = 48").count() >= 5, "{}", script);
        assert!(!script.contains("$fn = 100"));
    }

    #[test]
    fn test_invalid_part_names_item() {
        let err = Manifest::from_toml(
            r#"
            [[item]]
            name = "broken"
            part = { type = "sphere", diameter = -2 }
            "#,
        )
        .unwrap()
        .build(&Settings::default())
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("broken"), "{}", message);
        assert!(message.contains("diameter"), "{}", message);
    }

    #[test]
    fn test_item_needs_exactly_one_source() {
        let err = Manifest::from_toml("[[item]]\nname = \"void\"\n")
            .unwrap()
            .build(&Settings::default())
            .unwrap_err();
        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn test_json_nested_assembly() {
        let manifest = Manifest::from_json(
            r#"{
                "item": [
                    { "name": "sub", "position": [0, 0, 10], "assembly": {
                        "item": [ { "name": "ball", "part": { "type": "sphere", "diameter": 4 } } ]
                    } }
                ],
                "layout": [ { "op": "center" } ]
            }"#,
        )
        .unwrap();
        let assembly = manifest.build(&Settings::default()).unwrap();

        let bbox = assembly.bounds().unwrap();
        assert!((bbox.center().coords - Vec3::zeros()).norm() < 1e-9);
        assert_eq!(assembly.item("sub").unwrap().kind(), "assembly");
    }

    #[test]
    fn test_unknown_join_target() {
        let manifest = Manifest::from_toml(
            r#"
            [[item]]
            name = "a"
            part = { type = "cube", width = 1, length = 1, height = 1 }

            [[layout]]
            op = "join"
            base = "a"
            added = "ghost"
            align = "top"
            face_align = "bottom"
            "#,
        )
        .unwrap();
        let err = manifest.build(&Settings::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("ghost"));
    }
}
