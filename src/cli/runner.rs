// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Subprocess runners for OpenSCAD and FreeCAD

use crate::ast::Node;
use crate::config::Settings;
use crate::io;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Output formats OpenSCAD can produce from a script
pub const RENDER_FORMATS: &[&str] = &["stl", "off", "amf", "3mf", "csg", "dxf", "svg"];

/// Output formats produced by converting the script with FreeCAD
pub const STEP_FORMATS: &[&str] = &["step", "stp"];

/// Runner for OpenSCAD renders and FreeCAD STEP conversion
pub struct Runner {
    executable: String,
    freecad: String,
}

impl Runner {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            freecad: Settings::default().freecad().to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.openscad()).with_freecad(settings.freecad())
    }

    pub fn with_freecad(mut self, freecad: impl Into<String>) -> Self {
        self.freecad = freecad.into();
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn freecad(&self) -> &str {
        &self.freecad
    }

    /// True when `path` has an extension this runner can write
    pub fn supports(path: &Path) -> bool {
        extension(path)
            .map(|ext| RENDER_FORMATS.contains(&ext.as_str()) || STEP_FORMATS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    fn is_step(path: &Path) -> bool {
        extension(path)
            .map(|ext| STEP_FORMATS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Run OpenSCAD on an existing script
    pub fn run_openscad(&self, input: &Path, output: &Path) -> Result<Duration> {
        if !self.is_openscad_available() {
            bail!("OpenSCAD is not installed or not in PATH ({})", self.executable);
        }

        let start = Instant::now();
        debug!(input = %input.display(), output = %output.display(), "Running OpenSCAD");

        let status = Command::new(&self.executable)
            .arg("-o")
            .arg(output)
            .arg(input)
            .arg("--quiet")
            .status()
            .context("Failed to execute OpenSCAD")?;

        if !status.success() {
            bail!("OpenSCAD exited with status: {}", status);
        }

        Ok(start.elapsed())
    }

    /// Convert an OpenSCAD script to STEP with FreeCAD's CSG importer
    pub fn to_step(&self, scad: &Path, step: &Path) -> Result<Duration> {
        if !self.is_freecad_available() {
            bail!("FreeCAD is not installed or not in PATH ({})", self.freecad);
        }

        let start = Instant::now();
        debug!(input = %scad.display(), output = %step.display(), "Running FreeCAD");

        let mut script = tempfile::Builder::new()
            .prefix("polyframe-step-")
            .suffix(".py")
            .tempfile()
            .context("Failed to create temporary FreeCAD script")?;
        script
            .write_all(step_script(scad, step)?.as_bytes())
            .context("Failed to write temporary FreeCAD script")?;

        let status = Command::new(&self.freecad)
            .arg(script.path())
            .status()
            .context("Failed to execute FreeCAD")?;

        if !status.success() {
            bail!("FreeCAD exited with status: {}", status);
        }
        // freecadcmd reports script errors on stderr but still exits cleanly
        if !step.exists() {
            bail!("FreeCAD did not write {}", step.display());
        }

        Ok(start.elapsed())
    }

    /// Render geometry to `output` through an intermediate script
    pub fn render(&self, node: &Node, output: &Path) -> Result<Duration> {
        if !Self::supports(output) {
            bail!(
                "Unsupported output format: {} (expected one of {}, {})",
                output.display(),
                RENDER_FORMATS.join(", "),
                STEP_FORMATS.join(", ")
            );
        }

        let script = tempfile::Builder::new()
            .prefix("polyframe-")
            .suffix(".scad")
            .tempfile()
            .context("Failed to create temporary script")?;
        io::export_scad(node, script.path())?;

        let duration = if Self::is_step(output) {
            self.to_step(script.path(), output)?
        } else {
            self.run_openscad(script.path(), output)?
        };
        info!(output = %output.display(), ms = duration.as_millis() as u64, "Rendered");
        Ok(duration)
    }

    /// Check if OpenSCAD is available
    pub fn is_openscad_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .output()
            .is_ok()
    }

    /// Check if FreeCAD is available
    pub fn is_freecad_available(&self) -> bool {
        Command::new(&self.freecad)
            .arg("--version")
            .output()
            .is_ok()
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Python run by `freecadcmd`: import the CSG script and export its solids
fn step_script(scad: &Path, step: &Path) -> Result<String> {
    let scad = serde_json::to_string(&scad.to_string_lossy())?;
    let step = serde_json::to_string(&step.to_string_lossy())?;
    Ok(format!(
        "import FreeCAD\n\
         import Part\n\
         import importCSG\n\
         doc = FreeCAD.newDocument(\"polyframe\")\n\
         importCSG.insert({scad}, doc.Name)\n\
         doc.recompute()\n\
         solids = [obj for obj in doc.RootObjects if hasattr(obj, \"Shape\")]\n\
         if not solids:\n    raise SystemExit(\"no solids imported from \" + {scad})\n\
         Part.export(solids, {step})\n"
    ))
}

impl Default for Runner {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Vec3;

    #[test]
    fn test_runner_from_settings() {
        let settings = Settings {
            openscad_path: Some("/opt/openscad/bin/openscad".into()),
            freecad_path: Some("/opt/freecad/bin/freecadcmd".into()),
            ..Settings::default()
        };
        let runner = Runner::from_settings(&settings);
        assert_eq!(runner.executable(), "/opt/openscad/bin/openscad");
        assert_eq!(runner.freecad(), "/opt/freecad/bin/freecadcmd");
        assert_eq!(Runner::default().executable(), "openscad");
        assert_eq!(Runner::default().freecad(), "freecadcmd");
    }

    #[test]
    fn test_supported_formats() {
        assert!(Runner::supports(Path::new("out/part.STL")));
        assert!(Runner::supports(Path::new("part.3mf")));
        assert!(Runner::supports(Path::new("part.step")));
        assert!(Runner::supports(Path::new("part.STP")));
        assert!(!Runner::supports(Path::new("part.obj")));
        assert!(!Runner::supports(Path::new("part")));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("part.obj");
        let node = Node::cube(Vec3::new(1.0, 1.0, 1.0), true);

        let err = Runner::default().render(&node, &output).unwrap_err();
        assert!(err.to_string().contains("Unsupported output format"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_executable_fails() {
        let runner = Runner::new("polyframe-no-such-openscad");
        assert!(!runner.is_openscad_available());

        let dir = tempfile::TempDir::new().unwrap();
        let node = Node::cube(Vec3::new(1.0, 1.0, 1.0), true);
        assert!(runner.render(&node, &dir.path().join("part.stl")).is_err());
    }

    #[test]
    fn test_step_without_freecad_fails() {
        let runner = Runner::default().with_freecad("polyframe-no-such-freecadcmd");
        assert!(!runner.is_freecad_available());

        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("part.step");
        let node = Node::cube(Vec3::new(1.0, 1.0, 1.0), true);

        let err = runner.render(&node, &output).unwrap_err();
        assert!(err.to_string().contains("FreeCAD"));
        assert!(!output.exists());
    }

    #[test]
    fn test_step_script_quotes_paths() -> Result<()> {
        let script = step_script(Path::new("/tmp/a \"b\".scad"), Path::new("/tmp/out.step"))?;
        assert!(script.contains(r#"importCSG.insert("/tmp/a \"b\".scad", doc.Name)"#));
        assert!(script.contains(r#"Part.export(solids, "/tmp/out.step")"#));
        Ok(())
    }
}
