// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::Axis;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Zero-extent box at the origin, the placeholder for empty geometry
    pub fn zero() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Box of the given extent centered on `center`
    pub fn centered(center: Point3<f64>, extent: Extent) -> Self {
        let half = extent.to_vector() / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(*first, *first);
        for point in iter {
            bbox.expand_to_include(point);
        }
        Some(bbox)
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Smallest box containing both
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        let mut merged = *self;
        merged.expand_to_include(&other.min);
        merged.expand_to_include(&other.max);
        merged
    }

    /// Overlap of two boxes, `None` when they are disjoint
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );

        if min.x > max.x || min.y > max.y || min.z > max.z {
            None
        } else {
            Some(Self::new(min, max))
        }
    }

    /// Bounds of this box after an affine transform (all 8 corners)
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> BoundingBox {
        let corners: Vec<Point3<f64>> = self
            .corners()
            .iter()
            .map(|corner| matrix.transform_point(corner))
            .collect();
        // corners is never empty
        Self::from_points(&corners).unwrap_or(*self)
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(a.x, b.y, b.z),
        ]
    }

    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn extent(&self) -> Extent {
        let size = self.size();
        Extent::new(size.x, size.y, size.z)
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.min - other.min).amax() < tolerance && (self.max - other.max).amax() < tolerance
    }
}

/// Width (x), length (y) and height (z) of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    pub fn cube(side: f64) -> Self {
        Self::new(side, side, side)
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.length,
            Axis::Z => self.height,
        }
    }

    pub fn half(&self, axis: Axis) -> f64 {
        self.along(axis) / 2.0
    }

    /// Valid when no dimension is negative (NaN counts as invalid)
    pub fn is_valid(&self) -> bool {
        self.width >= 0.0 && self.length >= 0.0 && self.height >= 0.0
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.length, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::zero();
        bbox.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        bbox.expand_to_include(&Point3::new(-1.0, -2.0, -3.0));

        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.extent(), Extent::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_intersection_disjoint() {
        let a = BoundingBox::centered(Point3::origin(), Extent::cube(2.0));
        let b = BoundingBox::centered(Point3::new(5.0, 0.0, 0.0), Extent::cube(2.0));
        assert!(a.intersection(&b).is_none());

        let c = BoundingBox::centered(Point3::new(1.0, 0.0, 0.0), Extent::cube(2.0));
        let overlap = a.intersection(&c).unwrap();
        assert_eq!(overlap.extent(), Extent::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_transformed_rotation() {
        let bbox = BoundingBox::new(Point3::origin(), Point3::new(2.0, 1.0, 1.0));
        let rotation = Matrix4::from_euler_angles(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        let rotated = bbox.transformed(&rotation);
        let size = rotated.size();
        assert!((size.x - 1.0).abs() < 1e-9);
        assert!((size.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_extent_validity() {
        assert!(Extent::new(0.0, 0.0, 0.0).is_valid());
        assert!(!Extent::new(1.0, -1.0, 1.0).is_valid());
        assert!(!Extent::new(f64::NAN, 1.0, 1.0).is_valid());
    }
}
