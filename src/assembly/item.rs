// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Assembly item records

use super::Assembly;
use crate::ast::{Node, Vec3};
use crate::component::Component;
use crate::geometry::Extent;

/// Anything an assembly can hold: a part or a nested assembly
#[derive(Debug)]
pub enum Item {
    Component(Box<dyn Component>),
    Assembly(Assembly),
}

impl Item {
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Component(component) => component.kind(),
            Item::Assembly(_) => "assembly",
        }
    }

    pub fn extent(&self) -> Extent {
        match self {
            Item::Component(component) => component.bounding_box(),
            Item::Assembly(assembly) => assembly.extent(),
        }
    }

    /// Anchor of the item in its own frame
    pub fn origin(&self) -> Vec3 {
        match self {
            Item::Component(component) => component.origin(),
            Item::Assembly(assembly) => assembly.origin(),
        }
    }

    /// Geometry of the item in its own frame
    pub fn build(&self) -> Node {
        match self {
            Item::Component(component) => component.create(),
            Item::Assembly(assembly) => assembly.assemble(),
        }
    }

    pub(crate) fn build_parallel(&self) -> Node {
        match self {
            Item::Component(component) => component.create(),
            Item::Assembly(assembly) => assembly.assemble_parallel(),
        }
    }

    pub fn as_component(&self) -> Option<&dyn Component> {
        match self {
            Item::Component(component) => Some(component.as_ref()),
            Item::Assembly(_) => None,
        }
    }

    pub fn as_assembly(&self) -> Option<&Assembly> {
        match self {
            Item::Component(_) => None,
            Item::Assembly(assembly) => Some(assembly),
        }
    }
}

impl<C: Component + 'static> From<C> for Item {
    fn from(component: C) -> Self {
        Item::Component(Box::new(component))
    }
}

impl From<Assembly> for Item {
    fn from(assembly: Assembly) -> Self {
        Item::Assembly(assembly)
    }
}

/// Where an item is placed when it is added
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Euler angles in degrees, applied before the translation
    pub rotation: Vec3,
    /// Item whose frame this placement is relative to
    pub parent: Option<String>,
}

impl Placement {
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// A named item with its local transform
#[derive(Debug)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) item: Item,
    pub(crate) position: Vec3,
    pub(crate) rotation: Vec3,
    pub(crate) parent: Option<String>,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}
