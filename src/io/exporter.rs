// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script file exporter

use super::to_scad;
use crate::ast::Node;
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What was written by an export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex digest of the written script
    pub sha256: String,
}

/// Write `node` as an OpenSCAD script to `path`
pub fn export_scad(node: &Node, path: impl AsRef<Path>) -> Result<ExportSummary> {
    let path = path.as_ref();
    let script = to_scad(node);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    fs::write(path, &script)
        .with_context(|| format!("Failed to write SCAD file: {}", path.display()))?;

    let summary = ExportSummary {
        path: path.to_path_buf(),
        bytes: script.len(),
        sha256: digest(script.as_bytes()),
    };
    info!(path = %path.display(), bytes = summary.bytes, "Exported script");
    Ok(summary)
}

pub(crate) fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
