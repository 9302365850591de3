// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - script emission, export and manifests

mod exporter;
mod manifest;
mod scad;

pub use exporter::{export_scad, ExportSummary};
pub use manifest::{load_assembly, ItemSpec, LayoutOp, Manifest, PartSpec};
pub use scad::to_scad;
