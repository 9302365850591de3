// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: OpenSCAD runner and terminal reporting

pub mod reporter;
pub mod runner;

pub use reporter::Reporter;
pub use runner::{Runner, RENDER_FORMATS};
