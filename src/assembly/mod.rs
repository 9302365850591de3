// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Assemblies - composition, layout and output of placed items

mod diagnostics;
mod item;
mod layout;
mod model;

pub use diagnostics::{TestRecord, TestReport};
pub use item::{Entry, Item, Placement};
pub use model::Assembly;
