// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::assembly::TestReport;
use crate::geometry::{BoundingBox, Extent};
use crate::io::ExportSummary;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    fn rule() {
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a diagnostic sweep, one line per component
    pub fn report_tests(source: &str, report: &TestReport) {
        println!();
        Self::rule();
        println!("{} {}", "Assembly:".bold(), source.cyan());
        Self::rule();

        for record in &report.records {
            let status = if record.passed {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            println!(
                "  {} {:<32} {:<16} {}",
                status,
                record.path,
                record.kind.bright_black(),
                Self::format_extent(&record.extent).bright_black()
            );
        }

        let summary = format!("{}/{} passed", report.passed_count(), report.total());
        if report.passed() {
            println!("\n{} {}", "✅".green(), summary.green());
        } else {
            println!("\n{} {}", "❌".red(), summary.red());
        }
        Self::rule();
    }

    /// Report aggregate bounds of an assembly
    pub fn report_bounds(source: &str, bounds: Option<&BoundingBox>) {
        println!("{} {}", "Bounds:".bold(), source.cyan());
        match bounds {
            Some(bbox) => {
                println!(
                    "  {} {}",
                    "Size:".bright_black(),
                    Self::format_extent(&bbox.extent()).cyan()
                );
                println!(
                    "  {} [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
                    "Span:".bright_black(),
                    bbox.min.x,
                    bbox.min.y,
                    bbox.min.z,
                    bbox.max.x,
                    bbox.max.y,
                    bbox.max.z
                );
            }
            None => println!("  {}", "empty assembly".yellow()),
        }
    }

    /// Report a written script
    pub fn report_export(summary: &ExportSummary, duration: Duration) {
        println!(
            "{} {} {}",
            "✅".green(),
            "Exported".green(),
            summary.path.display().to_string().cyan()
        );
        println!(
            "  {} {}  {} {}  {} {}",
            "Bytes:".bright_black(),
            summary.bytes,
            "SHA-256:".bright_black(),
            &summary.sha256[..12.min(summary.sha256.len())],
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
    }

    /// Report an OpenSCAD render
    pub fn report_render(output: &str, duration: Duration) {
        println!(
            "{} {} {} {}",
            "✅".green(),
            "Rendered".green(),
            output.cyan(),
            Self::format_duration(duration).yellow()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn format_extent(extent: &Extent) -> String {
        format!(
            "{:.3} x {:.3} x {:.3}",
            extent.width, extent.length, extent.height
        )
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
