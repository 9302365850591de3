// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axes and named box faces used by layout operations

use crate::error::AssemblyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a 3-vector
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(AssemblyError::UnknownAxis(s.to_string())),
        }
    }
}

/// A face of an axis-aligned box.
///
/// `left`/`right` lie on x, `front`/`back` on y, `bottom`/`top` on z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Left,
    Right,
    Front,
    Back,
    Bottom,
    Top,
}

impl Face {
    pub fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Front | Face::Back => Axis::Y,
            Face::Bottom | Face::Top => Axis::Z,
        }
    }

    /// +1 for the face on the positive side of its axis, -1 otherwise
    pub fn sign(self) -> f64 {
        match self {
            Face::Right | Face::Back | Face::Top => 1.0,
            Face::Left | Face::Front | Face::Bottom => -1.0,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Bottom => Face::Top,
            Face::Top => Face::Bottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Face::Left => "left",
            Face::Right => "right",
            Face::Front => "front",
            Face::Back => "back",
            Face::Bottom => "bottom",
            Face::Top => "top",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Face::Left),
            "right" => Ok(Face::Right),
            "front" => Ok(Face::Front),
            "back" => Ok(Face::Back),
            "bottom" => Ok(Face::Bottom),
            "top" => Ok(Face::Top),
            _ => Err(AssemblyError::UnknownFace(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_axes() {
        assert_eq!(Face::Top.axis(), Axis::Z);
        assert_eq!(Face::Front.axis(), Axis::Y);
        assert_eq!(Face::Left.opposite(), Face::Right);
        assert_eq!(Face::Top.sign(), -Face::Bottom.sign());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Y".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!("back".parse::<Face>().unwrap(), Face::Back);
        assert!(matches!(
            "w".parse::<Axis>(),
            Err(AssemblyError::UnknownAxis(_))
        ));
        assert!("middle".parse::<Face>().is_err());
    }
}
