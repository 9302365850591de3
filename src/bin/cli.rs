// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Parts CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polyframe_parts::cli::{Reporter, Runner};
use polyframe_parts::config::SETTINGS_FILE;
use polyframe_parts::{export_scad, load_assembly, Axis, Settings};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "polyframe-parts")]
#[command(about = "Polyframe Parts - parametric assemblies compiled to OpenSCAD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ./polyframe.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run component diagnostics on a manifest or every manifest in a directory
    Test {
        /// Manifest file or directory
        path: PathBuf,
    },

    /// Export an assembly to .scad, render mesh formats through OpenSCAD, or convert to STEP through FreeCAD
    Export {
        /// Assembly manifest (TOML or JSON)
        manifest: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export a cross section slab of an assembly
    Section {
        /// Assembly manifest (TOML or JSON)
        manifest: PathBuf,

        /// Axis the section is taken across
        #[arg(short, long, default_value = "x")]
        axis: Axis,

        /// Section position along the axis
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        position: f64,

        /// Slab thickness (defaults to the configured section thickness)
        #[arg(short, long)]
        thickness: Option<f64>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the bounding box of an assembly
    Bounds {
        /// Assembly manifest (TOML or JSON)
        manifest: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => {
            let mut settings = Settings::from_file(path)?;
            settings.apply_env()?;
            settings
        }
        None => Settings::load()?,
    };

    let result = match &cli.command {
        Commands::Test { path } => test_command(path, &settings),
        Commands::Export { manifest, output } => export_command(manifest, output, &settings),
        Commands::Section {
            manifest,
            axis,
            position,
            thickness,
            output,
        } => section_command(
            manifest,
            *axis,
            *position,
            thickness.unwrap_or(settings.section_thickness),
            output,
            &settings,
        ),
        Commands::Bounds { manifest } => bounds_command(manifest, &settings),
        Commands::Version => {
            println!("Polyframe Parts v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = result {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("polyframe_parts=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn test_command(path: &Path, settings: &Settings) -> Result<()> {
    let manifests = collect_manifests(path)?;
    if manifests.is_empty() {
        Reporter::report_warning(&format!("No manifests found under {}", path.display()));
        return Ok(());
    }

    let mut failed = 0;
    for manifest in &manifests {
        let assembly = load_assembly(manifest, settings)?;
        let report = assembly.test_assembly();
        Reporter::report_tests(&manifest.display().to_string(), &report);
        if !report.passed() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} manifests failed diagnostics", failed, manifests.len());
    }
    Ok(())
}

/// A single file, or every `.toml`/`.json` manifest below a directory
fn collect_manifests(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("Path not found: {}", path.display());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut manifests = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        let file = entry.path();
        let is_manifest = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == "toml" || ext == "json")
            .unwrap_or(false);
        let is_settings = file
            .file_name()
            .map(|name| name == SETTINGS_FILE)
            .unwrap_or(false);

        if entry.file_type().is_file() && is_manifest && !is_settings {
            manifests.push(file.to_path_buf());
        }
    }
    Ok(manifests)
}

fn export_command(manifest: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let assembly = load_assembly(manifest, settings)?;
    write_output(&assembly.assemble(), output, settings)
}

fn section_command(
    manifest: &Path,
    axis: Axis,
    position: f64,
    thickness: f64,
    output: &Path,
    settings: &Settings,
) -> Result<()> {
    let assembly = load_assembly(manifest, settings)?;
    if assembly.is_empty() {
        Reporter::report_warning("Assembly is empty; the section will be empty too");
    }
    let section = assembly.cross_section_with(axis, position, thickness);
    write_output(&section, output, settings)
}

fn write_output(node: &polyframe_parts::Node, output: &Path, settings: &Settings) -> Result<()> {
    let is_script = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("scad"))
        .unwrap_or(false);

    if is_script {
        let start = Instant::now();
        let summary = export_scad(node, output)?;
        Reporter::report_export(&summary, start.elapsed());
    } else {
        let duration = Runner::from_settings(settings).render(node, output)?;
        Reporter::report_render(&output.display().to_string(), duration);
    }
    Ok(())
}

fn bounds_command(manifest: &Path, settings: &Settings) -> Result<()> {
    let assembly = load_assembly(manifest, settings)?;
    Reporter::report_bounds(&manifest.display().to_string(), assembly.bounds().as_ref());
    Ok(())
}
