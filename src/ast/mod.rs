// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG tree module
//!
//! Defines the solid-geometry description produced by components and
//! assemblies and handed to the OpenSCAD renderer

mod bounds;
mod node;

pub use bounds::bounds;
pub use node::{Node, NodeKind, TransformOp, Vec2, Vec3};
