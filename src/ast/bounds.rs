// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounds evaluator - axis-aligned bounds of a CSG tree without meshing

use super::{Node, NodeKind};
use crate::geometry::BoundingBox;
use nalgebra::{Matrix4, Point3};
use tracing::debug;

/// Compute the axis-aligned bounds of a node.
///
/// Returns `None` for empty geometry and for imported meshes, whose extent is
/// only known to the renderer. Differences report the bounds of their first
/// child and hulls the bounds of all children, so the result is conservative
/// but never requires boolean evaluation.
pub fn bounds(node: &Node) -> Option<BoundingBox> {
    evaluate_node(&node.kind, &Matrix4::identity())
}

fn evaluate_node(kind: &NodeKind, transform: &Matrix4<f64>) -> Option<BoundingBox> {
    match kind {
        NodeKind::Cube { size, center } => {
            let size = *size;
            let min = if *center {
                Point3::from(-size / 2.0)
            } else {
                Point3::origin()
            };
            local(min, min + size, transform)
        }

        NodeKind::Sphere { r, .. } => {
            local(Point3::new(-r, -r, -r), Point3::new(*r, *r, *r), transform)
        }

        NodeKind::Cylinder { h, r, center, .. } => column(*r, *h, *center, transform),

        NodeKind::Cone {
            h, r1, r2, center, ..
        } => column(r1.max(*r2), *h, *center, transform),

        NodeKind::Polyhedron { points, .. } => {
            let points: Vec<Point3<f64>> = points.iter().map(|p| Point3::from(*p)).collect();
            BoundingBox::from_points(&points).map(|b| b.transformed(transform))
        }

        NodeKind::Circle { r, .. } => {
            local(Point3::new(-r, -r, 0.0), Point3::new(*r, *r, 0.0), transform)
        }

        NodeKind::Square { size, center } => {
            let (min_x, min_y) = if *center {
                (-size.x / 2.0, -size.y / 2.0)
            } else {
                (0.0, 0.0)
            };
            local(
                Point3::new(min_x, min_y, 0.0),
                Point3::new(min_x + size.x, min_y + size.y, 0.0),
                transform,
            )
        }

        NodeKind::Polygon { points } => {
            let points: Vec<Point3<f64>> =
                points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
            BoundingBox::from_points(&points).map(|b| b.transformed(transform))
        }

        NodeKind::LinearExtrude {
            height,
            center,
            children,
        } => {
            let profile = union_of(children, &Matrix4::identity())?;
            let (z0, z1) = if *center {
                (-height / 2.0, height / 2.0)
            } else {
                (0.0, *height)
            };
            local(
                Point3::new(profile.min.x, profile.min.y, z0),
                Point3::new(profile.max.x, profile.max.y, z1),
                transform,
            )
        }

        NodeKind::RotateExtrude { children, .. } => {
            // The 2D profile's x is the radius and its y becomes z
            let profile = union_of(children, &Matrix4::identity())?;
            let radius = profile.min.x.abs().max(profile.max.x.abs());
            local(
                Point3::new(-radius, -radius, profile.min.y),
                Point3::new(radius, radius, profile.max.y),
                transform,
            )
        }

        NodeKind::Import { file } => {
            debug!(file = %file, "Imported mesh has no analytic bounds");
            None
        }

        NodeKind::Union(children) | NodeKind::Hull(children) => union_of(children, transform),

        NodeKind::Difference(children) => children
            .first()
            .and_then(|first| evaluate_node(&first.kind, transform)),

        NodeKind::Intersection(children) => {
            let mut iter = children.iter();
            let first = evaluate_node(&iter.next()?.kind, transform)?;
            iter.try_fold(first, |acc, child| {
                evaluate_node(&child.kind, transform).and_then(|b| acc.intersection(&b))
            })
        }

        NodeKind::Transform { op, children } => {
            let new_transform = transform * op.to_matrix();
            union_of(children, &new_transform)
        }

        NodeKind::Color { children, .. } => union_of(children, transform),

        NodeKind::Empty => None,
    }
}

fn local(min: Point3<f64>, max: Point3<f64>, transform: &Matrix4<f64>) -> Option<BoundingBox> {
    Some(BoundingBox::new(min, max).transformed(transform))
}

fn column(r: f64, h: f64, center: bool, transform: &Matrix4<f64>) -> Option<BoundingBox> {
    let (z0, z1) = if center { (-h / 2.0, h / 2.0) } else { (0.0, h) };
    local(Point3::new(-r, -r, z0), Point3::new(r, r, z1), transform)
}

fn union_of(children: &[Node], transform: &Matrix4<f64>) -> Option<BoundingBox> {
    children
        .iter()
        .filter_map(|child| evaluate_node(&child.kind, transform))
        .reduce(|acc, b| acc.merge(&b))
}
