// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Settings for tessellation, manufacturing clearances and rendering

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default circle resolution for curved parts
pub const DEFAULT_SEGMENTS: u32 = 100;

/// Default slab thickness for cross sections
pub const DEFAULT_SECTION_THICKNESS: f64 = 2.0;

/// Settings file picked up by [`Settings::load`]
pub const SETTINGS_FILE: &str = "polyframe.toml";

/// Manufacturing process the parts are dimensioned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManufacturingProfile {
    CncMetal,
    CncPlastic,
    #[default]
    Sls,
    Sla,
}

impl ManufacturingProfile {
    /// Clearance between moving mating parts in mm
    pub fn clearance(self) -> f64 {
        match self {
            ManufacturingProfile::CncMetal => 0.1,
            ManufacturingProfile::CncPlastic => 0.2,
            ManufacturingProfile::Sls => 0.5,
            ManufacturingProfile::Sla => 0.2,
        }
    }
}

impl FromStr for ManufacturingProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "cnc_metal" => Ok(ManufacturingProfile::CncMetal),
            "cnc_plastic" => Ok(ManufacturingProfile::CncPlastic),
            "sls" => Ok(ManufacturingProfile::Sls),
            "sla" => Ok(ManufacturingProfile::Sla),
            other => Err(anyhow!("unknown manufacturing profile '{}'", other)),
        }
    }
}

/// Rendering and manufacturing settings, passed explicitly to loaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Circle resolution given to parts that do not set their own
    pub segments: u32,
    /// Manufacturing profile for clearances
    pub profile: ManufacturingProfile,
    /// Slab thickness used by cross sections
    pub section_thickness: f64,
    /// OpenSCAD executable path
    pub openscad_path: Option<String>,
    /// FreeCAD command-line executable path, used for STEP output
    pub freecad_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            profile: ManufacturingProfile::default(),
            section_thickness: DEFAULT_SECTION_THICKNESS,
            openscad_path: None, // Auto-detect
            freecad_path: None,
        }
    }
}

impl Settings {
    /// Load settings from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load settings with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut settings = if PathBuf::from(SETTINGS_FILE).exists() {
            Self::from_file(SETTINGS_FILE)?
        } else {
            Self::default()
        };
        settings.apply_env()?;
        Ok(settings)
    }

    /// Apply `POLYFRAME_SEGMENTS`, `POLYFRAME_PROFILE`, `OPENSCAD_PATH` and `FREECAD_PATH`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(segments) = std::env::var("POLYFRAME_SEGMENTS") {
            self.segments = segments
                .parse()
                .with_context(|| format!("Invalid POLYFRAME_SEGMENTS: {}", segments))?;
        }

        if let Ok(profile) = std::env::var("POLYFRAME_PROFILE") {
            self.profile = profile.parse()?;
        }

        if let Ok(openscad) = std::env::var("OPENSCAD_PATH") {
            self.openscad_path = Some(openscad);
        }

        if let Ok(freecad) = std::env::var("FREECAD_PATH") {
            self.freecad_path = Some(freecad);
        }

        Ok(())
    }

    /// Save settings to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write settings file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// OpenSCAD executable, defaulting to `openscad` on PATH
    pub fn openscad(&self) -> &str {
        self.openscad_path.as_deref().unwrap_or("openscad")
    }

    /// FreeCAD executable, defaulting to `freecadcmd` on PATH
    pub fn freecad(&self) -> &str {
        self.freecad_path.as_deref().unwrap_or("freecadcmd")
    }
}
