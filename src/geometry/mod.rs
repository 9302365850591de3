// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - bounding boxes, extents and face addressing

mod axis;
mod bbox;

pub use axis::{Axis, Face};
pub use bbox::{BoundingBox, Extent};
