// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Assembly - named tree of placed items

use super::{Entry, Item, Placement};
use crate::ast::{Node, TransformOp, Vec3};
use crate::config::DEFAULT_SECTION_THICKNESS;
use crate::error::{AssemblyError, Result};
use crate::geometry::{Axis, BoundingBox, Extent};
use crate::io::{self, ExportSummary};
use ahash::AHashMap;
use nalgebra::{Matrix4, Point3};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// A named, ordered collection of components and nested assemblies.
///
/// Items keep their insertion order, which is the order layout operations
/// and `assemble` walk them in. A parent reference always names an item
/// added earlier, so the parent graph is a forest by construction.
#[derive(Debug, Default)]
pub struct Assembly {
    pub(crate) entries: Vec<Entry>,
    index: AHashMap<String, usize>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` under `name`
    pub fn add(
        &mut self,
        name: impl Into<String>,
        item: impl Into<Item>,
        placement: Placement,
    ) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(AssemblyError::DuplicateName(name));
        }
        if let Some(parent) = &placement.parent {
            if !self.index.contains_key(parent) {
                return Err(AssemblyError::UnknownParent {
                    item: name,
                    parent: parent.clone(),
                });
            }
        }

        let item = item.into();
        debug!(
            name = %name,
            kind = item.kind(),
            parent = placement.parent.as_deref().unwrap_or("-"),
            "Adding item"
        );

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Entry {
            name,
            item,
            position: placement.position,
            rotation: placement.rotation,
            parent: placement.parent,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Item names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Result<&Entry> {
        self.entry_index(name).map(|idx| &self.entries[idx])
    }

    pub fn item(&self, name: &str) -> Result<&Item> {
        self.get(name).map(|entry| &entry.item)
    }

    /// Local position of an item
    pub fn position(&self, name: &str) -> Result<Vec3> {
        self.get(name).map(|entry| entry.position)
    }

    pub fn set_position(&mut self, name: &str, position: Vec3) -> Result<()> {
        let idx = self.entry_index(name)?;
        self.entries[idx].position = position;
        Ok(())
    }

    pub fn set_rotation(&mut self, name: &str, rotation: Vec3) -> Result<()> {
        let idx = self.entry_index(name)?;
        self.entries[idx].rotation = rotation;
        Ok(())
    }

    /// Move an item by `delta` expressed in the assembly frame
    pub fn move_by(&mut self, name: &str, delta: Vec3) -> Result<()> {
        let idx = self.entry_index(name)?;
        self.translate_world(idx, delta);
        Ok(())
    }

    /// Transform from the item's own frame to the assembly frame
    pub fn absolute_transform(&self, name: &str) -> Result<Matrix4<f64>> {
        self.entry_index(name).map(|idx| self.absolute_matrix(idx))
    }

    /// Where the item's own origin ends up in the assembly frame
    pub fn absolute_position(&self, name: &str) -> Result<Vec3> {
        let matrix = self.absolute_transform(name)?;
        Ok(matrix.transform_point(&Point3::origin()).coords)
    }

    /// Box the item occupies in the assembly frame.
    ///
    /// The anchor follows the full transform chain but the extent is the
    /// item's own, unrotated: rotations other than multiples of 90 degrees
    /// about a single axis make this an approximation.
    pub fn item_bounds(&self, name: &str) -> Result<BoundingBox> {
        self.entry_index(name).map(|idx| self.entry_bounds(idx))
    }

    /// Union of all item boxes, `None` when the assembly is empty
    pub fn bounds(&self) -> Option<BoundingBox> {
        (0..self.entries.len())
            .map(|idx| self.entry_bounds(idx))
            .reduce(|acc, b| acc.merge(&b))
    }

    pub fn extent(&self) -> Extent {
        self.bounds().map(|b| b.extent()).unwrap_or_default()
    }

    pub fn width(&self) -> f64 {
        self.extent().width
    }

    pub fn length(&self) -> f64 {
        self.extent().length
    }

    pub fn height(&self) -> f64 {
        self.extent().height
    }

    /// Center of the aggregate box, the anchor used when nested
    pub fn origin(&self) -> Vec3 {
        self.bounds()
            .map(|b| b.center().coords)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Combine every item, placed by its resolved transform, into one solid.
    ///
    /// An empty assembly yields [`Node::empty`].
    pub fn assemble(&self) -> Node {
        if self.entries.is_empty() {
            return Node::empty();
        }

        let children: Vec<Node> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| self.place(idx, entry.item.build()))
            .collect();

        debug!(items = children.len(), "Assembled");
        Node::union(children)
    }

    /// Same result as [`Assembly::assemble`], building sibling items on the
    /// rayon pool. The union keeps insertion order.
    pub fn assemble_parallel(&self) -> Node {
        if self.entries.is_empty() {
            return Node::empty();
        }

        let children: Vec<Node> = self
            .entries
            .par_iter()
            .enumerate()
            .map(|(idx, entry)| self.place(idx, entry.item.build_parallel()))
            .collect();

        debug!(items = children.len(), "Assembled in parallel");
        Node::union(children)
    }

    /// Slice of the assembled model: its intersection with a slab of the
    /// default thickness centered at `position` along `axis`
    pub fn cross_section_view(&self, axis: Axis, position: f64) -> Node {
        self.cross_section_with(axis, position, DEFAULT_SECTION_THICKNESS)
    }

    pub fn cross_section_with(&self, axis: Axis, position: f64, thickness: f64) -> Node {
        let Some(bbox) = self.bounds() else {
            return Node::empty();
        };

        // the slab overhangs the model on the other two axes
        let margin = thickness.max(1.0);
        let mut size = bbox.size().add_scalar(2.0 * margin);
        let mut center = bbox.center().coords;
        size[axis.index()] = thickness;
        center[axis.index()] = position;

        info!(axis = %axis, position, thickness, "Cross section");
        Node::intersection(vec![
            self.assemble(),
            Node::cube(size, true).translate(center),
        ])
    }

    /// Render the assembled model to an OpenSCAD script at `path`
    pub fn export_scad(&self, path: impl AsRef<Path>) -> anyhow::Result<ExportSummary> {
        io::export_scad(&self.assemble(), path)
    }

    pub(crate) fn entry_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AssemblyError::UnknownItem(name.to_string()))
    }

    pub(crate) fn parent_index(&self, idx: usize) -> Option<usize> {
        self.entries[idx]
            .parent
            .as_deref()
            .and_then(|parent| self.index.get(parent).copied())
    }

    /// True when `ancestor` is on the parent chain of `idx`
    pub(crate) fn is_ancestor(&self, ancestor: usize, idx: usize) -> bool {
        let mut current = self.parent_index(idx);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent_index(parent);
        }
        false
    }

    fn local_matrix(entry: &Entry) -> Matrix4<f64> {
        Matrix4::new_translation(&entry.position) * TransformOp::Rotate(entry.rotation).to_matrix()
    }

    pub(crate) fn absolute_matrix(&self, idx: usize) -> Matrix4<f64> {
        let mut matrix = Self::local_matrix(&self.entries[idx]);
        let mut current = self.parent_index(idx);
        while let Some(parent) = current {
            matrix = Self::local_matrix(&self.entries[parent]) * matrix;
            current = self.parent_index(parent);
        }
        matrix
    }

    pub(crate) fn entry_bounds(&self, idx: usize) -> BoundingBox {
        let item = &self.entries[idx].item;
        let anchor = self
            .absolute_matrix(idx)
            .transform_point(&Point3::from(item.origin()));
        BoundingBox::centered(anchor, item.extent())
    }

    /// Shift an item by a delta in the assembly frame, converting it into
    /// the parent's frame when the item has one
    pub(crate) fn translate_world(&mut self, idx: usize, delta: Vec3) {
        let local = match self.parent_index(idx) {
            Some(parent) => {
                let frame = self.absolute_matrix(parent);
                // parent frames are rigid, so the inverse rotation is the transpose
                frame.fixed_view::<3, 3>(0, 0).transpose() * delta
            }
            None => delta,
        };
        self.entries[idx].position += local;
    }

    /// Wrap item geometry in its own transform, then each ancestor's
    fn place(&self, idx: usize, geometry: Node) -> Node {
        let mut node = geometry;
        let mut current = Some(idx);
        while let Some(i) = current {
            let entry = &self.entries[i];
            if entry.rotation != Vec3::zeros() {
                node = node.rotate(entry.rotation);
            }
            if entry.position != Vec3::zeros() {
                node = node.translate(entry.position);
            }
            current = self.parent_index(i);
        }
        node.named(self.entries[idx].name.clone())
    }
}
