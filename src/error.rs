// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for component construction and assembly topology

use thiserror::Error;

/// Errors raised while building components or mutating an assembly.
///
/// Every variant is fatal at the call that detects it; nothing is deferred
/// to `assemble()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// An item with this name is already registered.
    #[error("item '{0}' already exists in assembly")]
    DuplicateName(String),

    /// A lookup referenced a name that was never added.
    #[error("unknown item '{0}'")]
    UnknownItem(String),

    /// A parent reference must name an item added earlier.
    #[error("item '{item}' references unknown parent '{parent}'")]
    UnknownParent { item: String, parent: String },

    /// A component dimension is negative, non-finite, or otherwise unusable.
    #[error("{component}: invalid {dimension} ({value})")]
    InvalidDimension {
        component: &'static str,
        dimension: &'static str,
        value: f64,
    },

    /// Face alignment needs both faces on the same axis.
    #[error("faces '{align}' and '{face_align}' lie on different axes")]
    MismatchedFaces { align: String, face_align: String },

    /// An item cannot be joined to itself.
    #[error("cannot join item '{0}' to itself")]
    SelfJoin(String),

    /// Moving the added item would drag the base along with it.
    #[error("cannot join '{added}' to its own descendant '{base}'")]
    JoinToDescendant { base: String, added: String },

    #[error("unknown axis '{0}' (expected x, y or z)")]
    UnknownAxis(String),

    #[error("unknown face '{0}' (expected top, bottom, left, right, front or back)")]
    UnknownFace(String),
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Reject negative or non-finite dimensions.
pub(crate) fn non_negative(component: &'static str, dimension: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AssemblyError::InvalidDimension {
            component,
            dimension,
            value,
        })
    }
}

/// Reject dimensions that must be strictly positive.
pub(crate) fn positive(component: &'static str, dimension: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AssemblyError::InvalidDimension {
            component,
            dimension,
            value,
        })
    }
}
