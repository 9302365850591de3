// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG node definitions

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// 3D Vector type alias
pub type Vec3 = nalgebra::Vector3<f64>;

/// 2D Vector type alias, used by profiles
pub type Vec2 = nalgebra::Vector2<f64>;

/// A CSG node: one primitive, boolean, transform or modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub id: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, id: None }
    }

    pub fn with_id(kind: NodeKind, id: String) -> Self {
        Self { kind, id: Some(id) }
    }

    /// Tag this node, e.g. with the assembly item it came from
    pub fn named(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn empty() -> Self {
        Self::new(NodeKind::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, NodeKind::Empty)
    }

    pub fn cube(size: Vec3, center: bool) -> Self {
        Self::new(NodeKind::Cube { size, center })
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        Self::new(NodeKind::Sphere { r, fn_ })
    }

    pub fn cylinder(h: f64, r: f64, fn_: u32, center: bool) -> Self {
        Self::new(NodeKind::Cylinder { h, r, fn_, center })
    }

    pub fn cone(h: f64, r1: f64, r2: f64, fn_: u32, center: bool) -> Self {
        Self::new(NodeKind::Cone {
            h,
            r1,
            r2,
            fn_,
            center,
        })
    }

    pub fn polyhedron(points: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Self {
        Self::new(NodeKind::Polyhedron { points, faces })
    }

    pub fn circle(r: f64, fn_: u32) -> Self {
        Self::new(NodeKind::Circle { r, fn_ })
    }

    pub fn square(size: Vec2, center: bool) -> Self {
        Self::new(NodeKind::Square { size, center })
    }

    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self::new(NodeKind::Polygon { points })
    }

    pub fn import(file: impl Into<String>) -> Self {
        Self::new(NodeKind::Import { file: file.into() })
    }

    pub fn union(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Union(children))
    }

    pub fn intersection(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Intersection(children))
    }

    pub fn hull(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Hull(children))
    }

    /// `self` minus every node in `cuts`
    pub fn difference(self, cuts: Vec<Node>) -> Self {
        let mut children = Vec::with_capacity(cuts.len() + 1);
        children.push(self);
        children.extend(cuts);
        Self::new(NodeKind::Difference(children))
    }

    pub fn linear_extrude(self, height: f64, center: bool) -> Self {
        Self::new(NodeKind::LinearExtrude {
            height,
            center,
            children: vec![self],
        })
    }

    pub fn rotate_extrude(self, fn_: u32) -> Self {
        Self::new(NodeKind::RotateExtrude {
            fn_,
            children: vec![self],
        })
    }

    pub fn transform(self, op: TransformOp) -> Self {
        Self::new(NodeKind::Transform {
            op,
            children: vec![self],
        })
    }

    pub fn translate(self, offset: Vec3) -> Self {
        self.transform(TransformOp::Translate(offset))
    }

    /// Rotate by Euler angles in degrees
    pub fn rotate(self, angles: Vec3) -> Self {
        self.transform(TransformOp::Rotate(angles))
    }

    pub fn scale(self, factors: Vec3) -> Self {
        self.transform(TransformOp::Scale(factors))
    }

    pub fn mirror(self, normal: Vec3) -> Self {
        self.transform(TransformOp::Mirror(normal))
    }

    pub fn color(self, color: impl Into<String>) -> Self {
        Self::new(NodeKind::Color {
            color: color.into(),
            children: vec![self],
        })
    }

    /// Wrap in a color node when a color is set
    pub fn color_opt(self, color: Option<&str>) -> Self {
        match color {
            Some(c) => self.color(c),
            None => self,
        }
    }

    /// Bounds of this geometry, or a zero-extent box at the origin when
    /// the geometry is empty or its bounds are unknown
    pub fn bounding_box(&self) -> BoundingBox {
        super::bounds(self).unwrap_or_else(BoundingBox::zero)
    }
}

/// Types of CSG nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    // 3D primitives
    Cube {
        size: Vec3,
        center: bool,
    },
    Sphere {
        r: f64,
        fn_: u32,
    },
    Cylinder {
        h: f64,
        r: f64,
        fn_: u32,
        center: bool,
    },
    Cone {
        h: f64,
        r1: f64,
        r2: f64,
        fn_: u32,
        center: bool,
    },
    Polyhedron {
        points: Vec<Vec3>,
        faces: Vec<Vec<usize>>,
    },

    // 2D primitives
    Circle {
        r: f64,
        fn_: u32,
    },
    Square {
        size: Vec2,
        center: bool,
    },
    Polygon {
        points: Vec<Vec2>,
    },

    // Extrusions
    LinearExtrude {
        height: f64,
        center: bool,
        children: Vec<Node>,
    },
    RotateExtrude {
        fn_: u32,
        children: Vec<Node>,
    },

    /// Pre-authored mesh loaded by the renderer
    Import {
        file: String,
    },

    // Boolean operations
    Union(Vec<Node>),
    Difference(Vec<Node>),
    Intersection(Vec<Node>),
    Hull(Vec<Node>),

    // Transformations
    Transform {
        op: TransformOp,
        children: Vec<Node>,
    },

    Color {
        color: String,
        children: Vec<Node>,
    },

    // Empty node
    Empty,
}

impl NodeKind {
    /// Get child nodes
    pub fn get_children(&self) -> Vec<&Node> {
        match self {
            NodeKind::Union(children)
            | NodeKind::Difference(children)
            | NodeKind::Intersection(children)
            | NodeKind::Hull(children) => children.iter().collect(),
            NodeKind::LinearExtrude { children, .. }
            | NodeKind::RotateExtrude { children, .. }
            | NodeKind::Transform { children, .. }
            | NodeKind::Color { children, .. } => children.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Transformation operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Translate(Vec3),
    Rotate(Vec3),
    Scale(Vec3),
    Mirror(Vec3),
    Multmatrix(nalgebra::Matrix4<f64>),
}

impl TransformOp {
    /// Convert transformation to a 4x4 matrix
    pub fn to_matrix(&self) -> nalgebra::Matrix4<f64> {
        use nalgebra::{Matrix4, UnitQuaternion, Vector3};

        match self {
            TransformOp::Translate(v) => Matrix4::new_translation(v),
            TransformOp::Rotate(angles) => {
                let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
                let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
                let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());
                (rz * ry * rx).to_homogeneous()
            }
            TransformOp::Scale(s) => Matrix4::new_nonuniform_scaling(s),
            TransformOp::Mirror(normal) => {
                // Householder reflection through the plane with this normal
                let n = normal.normalize();
                if !n.iter().all(|c| c.is_finite()) {
                    return Matrix4::identity();
                }
                let reflection = nalgebra::Matrix3::identity() - 2.0 * n * n.transpose();
                reflection.to_homogeneous()
            }
            TransformOp::Multmatrix(m) => *m,
        }
    }
}
