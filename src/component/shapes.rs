// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Fundamental shapes

use super::{base_origin, Component};
use crate::ast::{Node, Vec2, Vec3};
use crate::config::DEFAULT_SEGMENTS;
use crate::error::{non_negative, positive, Result};
use crate::geometry::Extent;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Adds the shared `segments`/`color` builders to shape records
macro_rules! appearance {
    ($($shape:ty),* $(,)?) => {
        $(
            impl $shape {
                pub fn with_segments(mut self, segments: u32) -> Self {
                    self.segments = segments;
                    self
                }

                pub fn with_color(mut self, color: impl Into<String>) -> Self {
                    self.color = Some(color.into());
                    self
                }

                /// Fill in the circle resolution when none was given
                pub fn inherit_segments(&mut self, segments: u32) {
                    if self.segments == 0 {
                        self.segments = segments;
                    }
                }
            }
        )*
    };
}

pub(crate) use appearance;

appearance!(
    Cube,
    Cylinder,
    Sphere,
    Cone,
    Pyramid,
    Tetrahedron,
    Torus,
    TriangularPrism,
    HexagonalPrism,
);

/// Box with width (x), length (y) and height (z)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Cube {
    pub fn new(width: f64, length: f64, height: f64) -> Result<Self> {
        let cube = Self {
            width,
            length,
            height,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        cube.validate()?;
        Ok(cube)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("cube", "width", self.width)?;
        non_negative("cube", "length", self.length)?;
        non_negative("cube", "height", self.height)
    }
}

impl Component for Cube {
    fn kind(&self) -> &'static str {
        "cube"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.width, self.length, self.height)
    }

    fn origin(&self) -> Vec3 {
        if self.center {
            Vec3::zeros()
        } else {
            self.bounding_box().to_vector() / 2.0
        }
    }

    fn create(&self) -> Node {
        Node::cube(Vec3::new(self.width, self.length, self.height), self.center)
            .color_opt(self.color.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub diameter: f64,
    pub height: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Cylinder {
    pub fn new(diameter: f64, height: f64) -> Result<Self> {
        let cylinder = Self {
            diameter,
            height,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        cylinder.validate()?;
        Ok(cylinder)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("cylinder", "diameter", self.diameter)?;
        non_negative("cylinder", "height", self.height)
    }
}

impl Component for Cylinder {
    fn kind(&self) -> &'static str {
        "cylinder"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.diameter, self.diameter, self.height)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.height)
    }

    fn create(&self) -> Node {
        Node::cylinder(self.height, self.diameter / 2.0, self.segments, self.center)
            .color_opt(self.color.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub diameter: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Sphere {
    pub fn new(diameter: f64) -> Result<Self> {
        let sphere = Self {
            diameter,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        sphere.validate()?;
        Ok(sphere)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("sphere", "diameter", self.diameter)
    }
}

impl Component for Sphere {
    fn kind(&self) -> &'static str {
        "sphere"
    }

    fn bounding_box(&self) -> Extent {
        Extent::cube(self.diameter)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.diameter)
    }

    fn create(&self) -> Node {
        let mut sphere = Node::sphere(self.diameter / 2.0, self.segments);
        if !self.center {
            sphere = sphere.translate(Vec3::new(0.0, 0.0, self.diameter / 2.0));
        }
        sphere.color_opt(self.color.as_deref())
    }
}

/// Cone tapering to a point at the top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub diameter: f64,
    pub height: f64,
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Cone {
    pub fn new(diameter: f64, height: f64) -> Result<Self> {
        let cone = Self {
            diameter,
            height,
            center: false,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        cone.validate()?;
        Ok(cone)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("cone", "diameter", self.diameter)?;
        non_negative("cone", "height", self.height)
    }
}

impl Component for Cone {
    fn kind(&self) -> &'static str {
        "cone"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.diameter, self.diameter, self.height)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.height)
    }

    fn create(&self) -> Node {
        Node::cone(
            self.height,
            self.diameter / 2.0,
            0.0,
            self.segments,
            self.center,
        )
        .color_opt(self.color.as_deref())
    }
}

/// Square-based pyramid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pyramid {
    pub base: f64,
    pub height: f64,
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Pyramid {
    pub fn new(base: f64, height: f64) -> Result<Self> {
        let pyramid = Self {
            base,
            height,
            center: false,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        pyramid.validate()?;
        Ok(pyramid)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("pyramid", "base", self.base)?;
        non_negative("pyramid", "height", self.height)
    }
}

impl Component for Pyramid {
    fn kind(&self) -> &'static str {
        "pyramid"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.base, self.base, self.height)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.height)
    }

    fn create(&self) -> Node {
        let half = self.base / 2.0;
        let z0 = if self.center { -self.height / 2.0 } else { 0.0 };
        let points = vec![
            Vec3::new(-half, -half, z0),
            Vec3::new(half, -half, z0),
            Vec3::new(half, half, z0),
            Vec3::new(-half, half, z0),
            Vec3::new(0.0, 0.0, z0 + self.height),
        ];
        let faces = vec![
            vec![0, 1, 2, 3],
            vec![0, 4, 1],
            vec![1, 4, 2],
            vec![2, 4, 3],
            vec![3, 4, 0],
        ];
        Node::polyhedron(points, faces).color_opt(self.color.as_deref())
    }
}

/// Regular tetrahedron with its base triangle boxed around the z axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    pub side: f64,
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Tetrahedron {
    pub fn new(side: f64) -> Result<Self> {
        let tetrahedron = Self {
            side,
            center: false,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        tetrahedron.validate()?;
        Ok(tetrahedron)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("tetrahedron", "side", self.side)
    }

    fn base_depth(&self) -> f64 {
        self.side * 3f64.sqrt() / 2.0
    }

    fn apex_height(&self) -> f64 {
        self.side * (2.0f64 / 3.0).sqrt()
    }
}

impl Component for Tetrahedron {
    fn kind(&self) -> &'static str {
        "tetrahedron"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.side, self.base_depth(), self.apex_height())
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.apex_height())
    }

    fn create(&self) -> Node {
        let depth = self.base_depth();
        let apex = self.apex_height();
        let z0 = if self.center { -apex / 2.0 } else { 0.0 };
        let half = self.side / 2.0;
        let points = vec![
            Vec3::new(-half, -depth / 2.0, z0),
            Vec3::new(half, -depth / 2.0, z0),
            Vec3::new(0.0, depth / 2.0, z0),
            // apex above the centroid of the base
            Vec3::new(0.0, -depth / 2.0 + depth / 3.0, z0 + apex),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![1, 3, 2], vec![2, 3, 0]];
        Node::polyhedron(points, faces).color_opt(self.color.as_deref())
    }
}

/// Donut: a circle of `thickness` swept around a circle of `diameter`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub diameter: f64,
    pub thickness: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Torus {
    pub fn new(diameter: f64, thickness: f64) -> Result<Self> {
        let torus = Self {
            diameter,
            thickness,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        torus.validate()?;
        Ok(torus)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        positive("torus", "thickness", self.thickness)?;
        non_negative("torus", "diameter", self.diameter)
    }
}

impl Component for Torus {
    fn kind(&self) -> &'static str {
        "torus"
    }

    fn bounding_box(&self) -> Extent {
        let outer = self.diameter + self.thickness;
        Extent::new(outer, outer, self.thickness)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.thickness)
    }

    fn create(&self) -> Node {
        let mut torus = Node::circle(self.thickness / 2.0, self.segments)
            .translate(Vec3::new(self.diameter / 2.0, 0.0, 0.0))
            .rotate_extrude(self.segments);
        if !self.center {
            torus = torus.translate(Vec3::new(0.0, 0.0, self.thickness / 2.0));
        }
        torus.color_opt(self.color.as_deref())
    }
}

/// Right-angled triangle of legs `width` (x) and `length` (y), extruded by `height`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangularPrism {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl TriangularPrism {
    pub fn new(width: f64, length: f64, height: f64) -> Result<Self> {
        let prism = Self {
            width,
            length,
            height,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        prism.validate()?;
        Ok(prism)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("triangular prism", "width", self.width)?;
        non_negative("triangular prism", "length", self.length)?;
        non_negative("triangular prism", "height", self.height)
    }
}

impl Component for TriangularPrism {
    fn kind(&self) -> &'static str {
        "triangular_prism"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.width, self.length, self.height)
    }

    fn origin(&self) -> Vec3 {
        if self.center {
            Vec3::zeros()
        } else {
            self.bounding_box().to_vector() / 2.0
        }
    }

    fn create(&self) -> Node {
        let mut prism = Node::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(self.width, 0.0),
            Vec2::new(0.0, self.length),
        ])
        .linear_extrude(self.height, false);
        if self.center {
            prism = prism.translate(-self.bounding_box().to_vector() / 2.0);
        }
        prism.color_opt(self.color.as_deref())
    }
}

/// Six-sided prism measured across its flats (along y)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexagonalPrism {
    pub across_flats: f64,
    pub height: f64,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl HexagonalPrism {
    pub fn new(across_flats: f64, height: f64) -> Result<Self> {
        let prism = Self {
            across_flats,
            height,
            center: true,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        prism.validate()?;
        Ok(prism)
    }

    pub fn centered(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("hexagonal prism", "across_flats", self.across_flats)?;
        non_negative("hexagonal prism", "height", self.height)
    }

    fn circumradius(&self) -> f64 {
        self.across_flats / 3f64.sqrt()
    }
}

impl Component for HexagonalPrism {
    fn kind(&self) -> &'static str {
        "hexagonal_prism"
    }

    fn bounding_box(&self) -> Extent {
        // a vertex sits on +x, so x spans the corners and y the flats
        Extent::new(2.0 * self.circumradius(), self.across_flats, self.height)
    }

    fn origin(&self) -> Vec3 {
        base_origin(self.center, self.height)
    }

    fn create(&self) -> Node {
        let r = self.circumradius();
        let hexagon = (0..6)
            .map(|i| {
                let angle = (60.0 * i as f64).to_radians();
                Vec2::new(r * angle.cos(), r * angle.sin())
            })
            .collect();
        Node::polygon(hexagon)
            .linear_extrude(self.height, self.center)
            .color_opt(self.color.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::bounds;
    use crate::error::AssemblyError;

    fn assert_bounds_match(component: &dyn Component) {
        let bbox = bounds(&component.create()).unwrap();
        let expected = component.bounding_box();
        let size = bbox.size();
        assert!(
            (size - expected.to_vector()).amax() < 1e-9,
            "{}: geometry {:?} vs declared {:?}",
            component.kind(),
            size,
            expected
        );
        let center = bbox.center().coords;
        assert!(
            (center - component.origin()).amax() < 1e-9,
            "{}: center {:?} vs origin {:?}",
            component.kind(),
            center,
            component.origin()
        );
    }

    #[test]
    fn test_declared_bounds_match_geometry() -> Result<()> {
        assert_bounds_match(&Cube::new(10.0, 20.0, 30.0)?);
        assert_bounds_match(&Cube::new(10.0, 20.0, 30.0)?.centered(false));
        assert_bounds_match(&Cylinder::new(20.0, 20.0)?.centered(false));
        assert_bounds_match(&Sphere::new(30.0)?.centered(false));
        assert_bounds_match(&Cone::new(40.0, 40.0)?);
        assert_bounds_match(&Pyramid::new(30.0, 30.0)?.centered(true));
        assert_bounds_match(&Tetrahedron::new(50.0)?);
        assert_bounds_match(&Torus::new(60.0, 30.0)?.centered(false));
        assert_bounds_match(&TriangularPrism::new(70.0, 70.0, 70.0)?);
        assert_bounds_match(&HexagonalPrism::new(80.0, 80.0)?);
        Ok(())
    }

    #[test]
    fn test_construction_names_offending_dimension() {
        let err = Cube::new(10.0, -1.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            AssemblyError::InvalidDimension {
                component: "cube",
                dimension: "length",
                value: -1.0,
            }
        );
        assert!(Torus::new(10.0, 0.0).is_err());
    }

    #[test]
    fn test_negative_extent_fails_test() {
        let cube = Cube {
            width: 10.0,
            length: -10.0,
            height: 10.0,
            center: true,
            segments: 0,
            color: None,
        };
        assert!(!cube.test());
        assert!(Cube::new(0.0, 0.0, 0.0).unwrap().test());
    }

    #[test]
    fn test_inherit_segments_only_fills_unset() -> Result<()> {
        let mut explicit = Cylinder::new(10.0, 5.0)?.with_segments(12);
        explicit.inherit_segments(64);
        assert_eq!(explicit.segments, 12);

        let mut unset = Cylinder::new(10.0, 5.0)?.with_segments(0);
        unset.inherit_segments(64);
        assert_eq!(unset.segments, 64);
        Ok(())
    }

    #[test]
    fn test_create_is_repeatable() -> Result<()> {
        let torus = Torus::new(60.0, 30.0)?.with_color("orange");
        assert_eq!(torus.create(), torus.create());
        Ok(())
    }
}
