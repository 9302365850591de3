// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Components - leaf geometry producers
//!
//! A component is a parametric part: it knows its own bounding box and
//! anchor, and produces a CSG description on demand. `create` is pure over
//! the component's fields, so calling it twice yields identical geometry.

mod parts;
mod shapes;

pub use parts::{Bearing, Collar, MeshPart, MountingPlate, Washer};
pub use shapes::{
    Cone, Cube, Cylinder, HexagonalPrism, Pyramid, Sphere, Tetrahedron, Torus, TriangularPrism,
};

use crate::ast::{Node, Vec3};
use crate::geometry::Extent;
use std::fmt;

/// Clearance added to cutting tools so cuts pass fully through a face
pub(crate) const CUT_OVERLAP: f64 = 1.0;

/// A single physical part
pub trait Component: fmt::Debug + Send + Sync {
    /// Short type label used in diagnostics
    fn kind(&self) -> &'static str;

    /// Axis-aligned extent of the part in its own frame
    fn bounding_box(&self) -> Extent;

    /// Center of the bounding box in the part's own frame
    fn origin(&self) -> Vec3 {
        Vec3::zeros()
    }

    /// Produce the part's geometry
    fn create(&self) -> Node;

    /// Coarse sanity check: false when any extent is negative
    fn test(&self) -> bool {
        self.bounding_box().is_valid()
    }

    fn width(&self) -> f64 {
        self.bounding_box().width
    }

    fn length(&self) -> f64 {
        self.bounding_box().length
    }

    fn height(&self) -> f64 {
        self.bounding_box().height
    }
}

/// Anchor of a part that is centered when `center` is set and otherwise
/// rests on z = 0
pub(crate) fn base_origin(center: bool, height: f64) -> Vec3 {
    if center {
        Vec3::zeros()
    } else {
        Vec3::new(0.0, 0.0, height / 2.0)
    }
}
