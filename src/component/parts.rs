// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mechanical parts built from the fundamental shapes

use super::shapes::appearance;
use super::{Component, CUT_OVERLAP};
use crate::ast::{Node, Vec3};
use crate::config::DEFAULT_SEGMENTS;
use crate::error::{non_negative, positive, AssemblyError, Result};
use crate::geometry::Extent;
use serde::{Deserialize, Serialize};

appearance!(Washer, Bearing, Collar, MountingPlate);

/// Flat ring, centered on the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Washer {
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub thickness: f64,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Washer {
    pub fn new(outer_diameter: f64, inner_diameter: f64, thickness: f64) -> Result<Self> {
        let washer = Self {
            outer_diameter,
            inner_diameter,
            thickness,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        washer.validate()?;
        Ok(washer)
    }

    pub fn validate(&self) -> Result<()> {
        positive("washer", "outer_diameter", self.outer_diameter)?;
        positive("washer", "thickness", self.thickness)?;
        non_negative("washer", "inner_diameter", self.inner_diameter)?;
        bore_fits("washer", self.inner_diameter, self.outer_diameter)
    }
}

impl Component for Washer {
    fn kind(&self) -> &'static str {
        "washer"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.outer_diameter, self.outer_diameter, self.thickness)
    }

    fn create(&self) -> Node {
        let body = Node::cylinder(self.thickness, self.outer_diameter / 2.0, self.segments, true);
        let bore = Node::cylinder(
            self.thickness + 2.0 * CUT_OVERLAP,
            self.inner_diameter / 2.0,
            self.segments,
            true,
        );
        body.difference(vec![bore])
            .color_opt(self.color.as_deref())
    }
}

/// Plain ball bearing envelope resting on z = 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bearing {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub thickness: f64,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl Bearing {
    pub fn new(inner_diameter: f64, outer_diameter: f64, thickness: f64) -> Result<Self> {
        let bearing = Self {
            inner_diameter,
            outer_diameter,
            thickness,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        bearing.validate()?;
        Ok(bearing)
    }

    pub fn validate(&self) -> Result<()> {
        positive("bearing", "outer_diameter", self.outer_diameter)?;
        positive("bearing", "thickness", self.thickness)?;
        non_negative("bearing", "inner_diameter", self.inner_diameter)?;
        bore_fits("bearing", self.inner_diameter, self.outer_diameter)
    }
}

impl Component for Bearing {
    fn kind(&self) -> &'static str {
        "bearing"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.outer_diameter, self.outer_diameter, self.thickness)
    }

    fn origin(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.thickness / 2.0)
    }

    fn create(&self) -> Node {
        let outer = Node::cylinder(self.thickness, self.outer_diameter / 2.0, self.segments, false);
        let inner = Node::cylinder(
            self.thickness + 2.0 * CUT_OVERLAP,
            self.inner_diameter / 2.0,
            self.segments,
            false,
        )
        .translate(Vec3::new(0.0, 0.0, -CUT_OVERLAP));
        outer.difference(vec![inner])
            .color_opt(self.color.as_deref())
    }
}

/// Split clamping collar with a bolted tab.
///
/// The ring lies in the xy plane with its axis on z; the tab extends along +y.
/// `connection_gap_closed` models the collar tightened around its shaft: the
/// gap and the ring circumference shrink by that amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collar {
    pub inner_diameter: f64,
    pub thickness: f64,
    pub width: f64,
    pub connection_gap: f64,
    pub connection_hole_diameter: f64,
    pub connection_thickness: f64,
    #[serde(default)]
    pub connection_height: f64,
    #[serde(default)]
    pub connection_gap_closed: f64,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

/// Dimensions derived from a collar's configuration
struct CollarLayout {
    outer_diameter: f64,
    inner_diameter: f64,
    gap: f64,
    connection_width: f64,
    tab_center: f64,
}

impl Collar {
    pub fn new(
        inner_diameter: f64,
        thickness: f64,
        width: f64,
        connection_gap: f64,
        connection_hole_diameter: f64,
        connection_thickness: f64,
    ) -> Result<Self> {
        let collar = Self {
            inner_diameter,
            thickness,
            width,
            connection_gap,
            connection_hole_diameter,
            connection_thickness,
            connection_height: 0.0,
            connection_gap_closed: 0.0,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        collar.validate()?;
        Ok(collar)
    }

    pub fn with_connection_height(mut self, height: f64) -> Self {
        self.connection_height = height;
        self
    }

    /// Close the gap by `closed`, as when the collar is clamped
    pub fn closed_by(mut self, closed: f64) -> Self {
        self.connection_gap_closed = closed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        positive("collar", "inner_diameter", self.inner_diameter)?;
        positive("collar", "thickness", self.thickness)?;
        positive("collar", "width", self.width)?;
        positive("collar", "connection_thickness", self.connection_thickness)?;
        non_negative("collar", "connection_hole_diameter", self.connection_hole_diameter)?;
        non_negative("collar", "connection_height", self.connection_height)?;
        non_negative("collar", "connection_gap_closed", self.connection_gap_closed)?;
        non_negative(
            "collar",
            "connection_gap",
            self.connection_gap - self.connection_gap_closed,
        )
    }

    fn layout(&self) -> CollarLayout {
        let nominal_od = self.inner_diameter + self.thickness * 2.0;
        let circumference = std::f64::consts::PI * nominal_od - self.connection_gap_closed;
        let outer_diameter = circumference / std::f64::consts::PI;
        let gap = self.connection_gap - self.connection_gap_closed;

        CollarLayout {
            outer_diameter,
            inner_diameter: outer_diameter - self.thickness * 2.0,
            gap,
            connection_width: self.connection_thickness * 2.0 + gap,
            tab_center: outer_diameter / 2.0 + self.width / 2.0 + self.connection_height,
        }
    }

    /// (min, max) along y
    fn y_span(&self, layout: &CollarLayout) -> (f64, f64) {
        let min = -(layout.outer_diameter / 2.0).max(self.width / 2.0);
        let max = layout.tab_center + self.width / 2.0;
        (min, max)
    }
}

impl Component for Collar {
    fn kind(&self) -> &'static str {
        "collar"
    }

    fn bounding_box(&self) -> Extent {
        let layout = self.layout();
        let (min_y, max_y) = self.y_span(&layout);
        Extent::new(
            layout.outer_diameter.max(layout.connection_width),
            max_y - min_y,
            self.width,
        )
    }

    fn origin(&self) -> Vec3 {
        let (min_y, max_y) = self.y_span(&self.layout());
        Vec3::new(0.0, (min_y + max_y) / 2.0, 0.0)
    }

    fn create(&self) -> Node {
        let layout = self.layout();
        let segments = self.segments;
        let along_x = Vec3::new(0.0, 90.0, 0.0);

        let ring = Node::cylinder(self.width, layout.outer_diameter / 2.0, segments, true);
        let boss = Node::cylinder(layout.connection_width, self.width / 2.0, segments, true)
            .rotate(along_x);
        let tab = Node::hull(vec![
            boss.clone(),
            boss.translate(Vec3::new(0.0, layout.tab_center, 0.0)),
        ]);

        let bore = Node::cylinder(
            self.width + 2.0 * CUT_OVERLAP,
            layout.inner_diameter / 2.0,
            segments,
            true,
        );
        let split = Node::cube(
            Vec3::new(
                layout.gap,
                layout.tab_center + self.width / 2.0 + CUT_OVERLAP,
                self.width + 2.0 * CUT_OVERLAP,
            ),
            false,
        )
        .translate(Vec3::new(
            -layout.gap / 2.0,
            0.0,
            -self.width / 2.0 - CUT_OVERLAP,
        ));
        let bolt_hole = Node::cylinder(
            layout.connection_width + 2.0 * CUT_OVERLAP,
            self.connection_hole_diameter / 2.0,
            segments,
            true,
        )
        .rotate(along_x)
        .translate(Vec3::new(0.0, layout.tab_center, 0.0));

        Node::union(vec![ring, tab])
            .difference(vec![bore, split, bolt_hole])
            .color_opt(self.color.as_deref())
    }
}

/// Rectangular plate with four mounting holes on a rectangular pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountingPlate {
    pub width: f64,
    pub length: f64,
    pub thickness: f64,
    pub hole_diameter: f64,
    pub hole_pitch_width: f64,
    pub hole_pitch_length: f64,
    /// Extra hole diameter for the fastener fit
    #[serde(default)]
    pub clearance: Option<f64>,
    #[serde(default)]
    pub segments: u32,
    #[serde(default)]
    pub color: Option<String>,
}

impl MountingPlate {
    pub fn new(
        width: f64,
        length: f64,
        thickness: f64,
        hole_diameter: f64,
        hole_pitch_width: f64,
        hole_pitch_length: f64,
    ) -> Result<Self> {
        let plate = Self {
            width,
            length,
            thickness,
            hole_diameter,
            hole_pitch_width,
            hole_pitch_length,
            clearance: None,
            segments: DEFAULT_SEGMENTS,
            color: None,
        };
        plate.validate()?;
        Ok(plate)
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = Some(clearance);
        self
    }

    /// Fill in the hole clearance when none was given
    pub fn inherit_clearance(&mut self, clearance: f64) {
        self.clearance.get_or_insert(clearance);
    }

    pub fn validate(&self) -> Result<()> {
        positive("mounting plate", "width", self.width)?;
        positive("mounting plate", "length", self.length)?;
        positive("mounting plate", "thickness", self.thickness)?;
        non_negative("mounting plate", "hole_diameter", self.hole_diameter)?;
        non_negative("mounting plate", "hole_pitch_width", self.hole_pitch_width)?;
        non_negative("mounting plate", "hole_pitch_length", self.hole_pitch_length)?;
        non_negative("mounting plate", "clearance", self.clearance.unwrap_or(0.0))?;
        if self.hole_pitch_width > self.width {
            return Err(AssemblyError::InvalidDimension {
                component: "mounting plate",
                dimension: "hole_pitch_width",
                value: self.hole_pitch_width,
            });
        }
        if self.hole_pitch_length > self.length {
            return Err(AssemblyError::InvalidDimension {
                component: "mounting plate",
                dimension: "hole_pitch_length",
                value: self.hole_pitch_length,
            });
        }
        Ok(())
    }

    /// Hole centers relative to the plate center
    pub fn hole_positions(&self) -> [Vec3; 4] {
        let (x, y) = (self.hole_pitch_width / 2.0, self.hole_pitch_length / 2.0);
        [
            Vec3::new(-x, -y, 0.0),
            Vec3::new(x, -y, 0.0),
            Vec3::new(x, y, 0.0),
            Vec3::new(-x, y, 0.0),
        ]
    }
}

impl Component for MountingPlate {
    fn kind(&self) -> &'static str {
        "mounting_plate"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.width, self.length, self.thickness)
    }

    fn create(&self) -> Node {
        let hole_r = (self.hole_diameter + self.clearance.unwrap_or(0.0)) / 2.0;
        let plate = Node::cube(Vec3::new(self.width, self.length, self.thickness), true);
        let holes = self
            .hole_positions()
            .iter()
            .map(|position| {
                Node::cylinder(
                    self.thickness + 2.0 * CUT_OVERLAP,
                    hole_r,
                    self.segments,
                    true,
                )
                .translate(*position)
            })
            .collect();
        plate.difference(holes).color_opt(self.color.as_deref())
    }
}

/// Catalogued part supplied as a pre-authored mesh file.
///
/// The renderer loads the mesh; its extent and anchor are declared here
/// because the mesh itself is never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPart {
    pub file: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    #[serde(default = "zero_origin")]
    pub origin: Vec3,
    #[serde(default)]
    pub color: Option<String>,
}

fn zero_origin() -> Vec3 {
    Vec3::zeros()
}

impl MeshPart {
    pub fn new(file: impl Into<String>, extent: Extent) -> Result<Self> {
        let part = Self {
            file: file.into(),
            width: extent.width,
            length: extent.length,
            height: extent.height,
            origin: Vec3::zeros(),
            color: None,
        };
        part.validate()?;
        Ok(part)
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("mesh part", "width", self.width)?;
        non_negative("mesh part", "length", self.length)?;
        non_negative("mesh part", "height", self.height)
    }
}

impl Component for MeshPart {
    fn kind(&self) -> &'static str {
        "mesh"
    }

    fn bounding_box(&self) -> Extent {
        Extent::new(self.width, self.length, self.height)
    }

    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn create(&self) -> Node {
        Node::import(self.file.clone()).color_opt(self.color.as_deref())
    }
}

fn bore_fits(component: &'static str, inner: f64, outer: f64) -> Result<()> {
    if inner < outer {
        Ok(())
    } else {
        Err(AssemblyError::InvalidDimension {
            component,
            dimension: "inner_diameter",
            value: inner,
        })
    }
}
