// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Layout operations
//!
//! Each operation rewrites stored positions from the current state and can
//! be applied any number of times. Positions are always adjusted through the
//! item's anchor, so rotated items and items whose geometry is not centered
//! on their own origin line up by their boxes.

use super::Assembly;
use crate::ast::Vec3;
use crate::error::{AssemblyError, Result};
use crate::geometry::{Axis, Face};
use tracing::{debug, info};

impl Assembly {
    /// Place root items one after another along `axis`, `margin` apart.
    ///
    /// The first item is moved so its position along `axis` is zero; each
    /// following item's near face sits `margin` past the previous item's far
    /// face. Positions on the other two axes are untouched. Items with a
    /// parent ride along with it.
    ///
    /// Gaps are measured between boxes, not stored positions: an item whose
    /// anchor is off its own origin (a part resting on z = 0) lands with its
    /// position shifted by that offset so its faces stay flush.
    pub fn stack(&mut self, axis: Axis, margin: f64) {
        let a = axis.index();
        let roots: Vec<usize> = (0..self.entries.len())
            .filter(|&idx| self.entries[idx].parent.is_none())
            .collect();

        // far face of the previous item along the axis
        let mut far_face: Option<f64> = None;
        for idx in roots {
            let bbox = self.entry_bounds(idx);
            let half = self.entries[idx].item.extent().half(axis);
            let delta = match far_face {
                None => -self.entries[idx].position[a],
                Some(face) => face + margin + half - bbox.center()[a],
            };

            let mut shift = Vec3::zeros();
            shift[a] = delta;
            self.translate_world(idx, shift);
            far_face = Some(bbox.center()[a] + delta + half);

            debug!(
                item = %self.entries[idx].name,
                axis = %axis,
                position = self.entries[idx].position[a],
                "Stacked"
            );
        }

        info!(axis = %axis, margin, items = self.entries.len(), "Stack applied");
    }

    pub fn stack_x(&mut self, margin: f64) {
        self.stack(Axis::X, margin);
    }

    pub fn stack_y(&mut self, margin: f64) {
        self.stack(Axis::Y, margin);
    }

    pub fn stack_z(&mut self, margin: f64) {
        self.stack(Axis::Z, margin);
    }

    /// Shift root items so the aggregate box is centered on the origin
    pub fn center_assembly(&mut self) {
        let Some(bbox) = self.bounds() else {
            return;
        };
        let shift = -bbox.center().coords;

        for entry in self.entries.iter_mut().filter(|e| e.parent.is_none()) {
            entry.position += shift;
        }
        info!(
            dx = shift.x,
            dy = shift.y,
            dz = shift.z,
            "Assembly centered"
        );
    }

    /// Move `added` along the faces' shared axis by the distance that takes
    /// its `face_align` face onto the `align` face of `base`, measured with
    /// both boxes sharing a center.
    ///
    /// The offset depends only on the two extents and is added to the current
    /// position, so `top`/`bottom` followed by `bottom`/`top` returns `added`
    /// to where it started. Place `added` on the base's center first for a
    /// flush fit.
    pub fn join_to_surface(
        &mut self,
        base: &str,
        added: &str,
        align: Face,
        face_align: Face,
    ) -> Result<()> {
        let base_idx = self.entry_index(base)?;
        let added_idx = self.entry_index(added)?;

        if align.axis() != face_align.axis() {
            return Err(AssemblyError::MismatchedFaces {
                align: align.to_string(),
                face_align: face_align.to_string(),
            });
        }
        if base_idx == added_idx {
            return Err(AssemblyError::SelfJoin(added.to_string()));
        }
        // moving an ancestor of base would drag base along with it
        if self.is_ancestor(added_idx, base_idx) {
            return Err(AssemblyError::JoinToDescendant {
                base: base.to_string(),
                added: added.to_string(),
            });
        }

        let axis = align.axis();
        let a = axis.index();
        let base_half = self.entries[base_idx].item.extent().half(axis);
        let added_half = self.entries[added_idx].item.extent().half(axis);

        let mut shift = Vec3::zeros();
        shift[a] = align.sign() * base_half - face_align.sign() * added_half;
        self.translate_world(added_idx, shift);

        info!(
            base,
            added,
            align = %align,
            face_align = %face_align,
            offset = shift[a],
            "Joined to surface"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Placement;
    use crate::component::{Bearing, Cube, Cylinder};
    use approx::assert_abs_diff_eq;

    fn cube(side: f64) -> Cube {
        Cube::new(side, side, side).unwrap()
    }

    #[test]
    fn test_stack_x_concrete_case() {
        let mut assembly = Assembly::new();
        assembly.add("small", cube(10.0), Placement::default()).unwrap();
        assembly.add("large", cube(20.0), Placement::default()).unwrap();
        assembly.stack_x(5.0);

        assert_abs_diff_eq!(assembly.position("small").unwrap().x, 0.0);
        assert_abs_diff_eq!(assembly.position("large").unwrap().x, 20.0);
    }

    #[test]
    fn test_stack_leaves_other_axes() {
        let mut assembly = Assembly::new();
        assembly.add("a", cube(2.0), Placement::at(7.0, 3.0, 1.0)).unwrap();
        assembly.add("b", cube(4.0), Placement::at(-2.0, 9.0, 4.0)).unwrap();
        assembly.stack_y(1.0);

        assert_eq!(assembly.position("a").unwrap(), Vec3::new(7.0, 0.0, 1.0));
        assert_eq!(assembly.position("b").unwrap(), Vec3::new(-2.0, 4.0, 4.0));
    }

    #[test]
    fn test_stack_uses_anchor_of_base_resting_parts() {
        // bearings rest on z = 0, so their anchor sits at half thickness
        let mut assembly = Assembly::new();
        assembly.add("a", Bearing::new(8.0, 22.0, 7.0).unwrap(), Placement::default()).unwrap();
        assembly.add("b", Bearing::new(8.0, 22.0, 7.0).unwrap(), Placement::default()).unwrap();
        assembly.stack_z(0.0);

        let a = assembly.item_bounds("a").unwrap();
        let b = assembly.item_bounds("b").unwrap();
        assert_abs_diff_eq!(b.min.z, a.max.z, epsilon = 1e-9);
        assert_abs_diff_eq!(assembly.position("b").unwrap().z, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stack_is_repeatable() {
        let mut assembly = Assembly::new();
        for (i, side) in [3.0, 1.0, 2.0].into_iter().enumerate() {
            assembly.add(format!("c{}", i), cube(side), Placement::default()).unwrap();
        }
        assembly.stack_z(0.5);
        let first: Vec<Vec3> = assembly.entries().iter().map(|e| e.position()).collect();
        assembly.stack_z(0.5);
        let second: Vec<Vec3> = assembly.entries().iter().map(|e| e.position()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_children_ride_with_stacked_parent() {
        let mut assembly = Assembly::new();
        assembly.add("a", cube(4.0), Placement::default()).unwrap();
        assembly.add("b", cube(4.0), Placement::default()).unwrap();
        assembly
            .add("pin", cube(1.0), Placement::at(0.0, 0.0, 2.5).child_of("b"))
            .unwrap();
        assembly.stack_x(0.0);

        assert_eq!(assembly.position("pin").unwrap(), Vec3::new(0.0, 0.0, 2.5));
        let pin = assembly.absolute_position("pin").unwrap();
        assert_abs_diff_eq!(pin.x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_center_is_idempotent() {
        let mut assembly = Assembly::new();
        assembly.add("a", cube(10.0), Placement::at(3.0, 4.0, 5.0)).unwrap();
        assembly.add("b", cube(2.0), Placement::at(20.0, 0.0, 0.0)).unwrap();
        assembly.center_assembly();
        let once: Vec<Vec3> = assembly.entries().iter().map(|e| e.position()).collect();
        assembly.center_assembly();
        let twice: Vec<Vec3> = assembly.entries().iter().map(|e| e.position()).collect();

        for (a, b) in once.iter().zip(&twice) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
        let bbox = assembly.bounds().unwrap();
        assert_abs_diff_eq!(bbox.min.coords, -bbox.max.coords, epsilon = 1e-9);
    }

    #[test]
    fn test_center_empty_is_noop() {
        let mut assembly = Assembly::new();
        assembly.center_assembly();
        assert!(assembly.bounds().is_none());
    }

    #[test]
    fn test_stack_mixed_anchors() {
        // the rod rests on z = 0, so its anchor sits half its height up
        let mut assembly = Assembly::new();
        assembly.add("block", cube(10.0), Placement::default()).unwrap();
        assembly
            .add("rod", Cylinder::new(4.0, 10.0).unwrap().centered(false), Placement::default())
            .unwrap();
        assembly.stack_z(0.0);

        assert_abs_diff_eq!(assembly.position("block").unwrap().z, 0.0);
        assert_abs_diff_eq!(assembly.position("rod").unwrap().z, 5.0, epsilon = 1e-9);

        let block = assembly.item_bounds("block").unwrap();
        let rod = assembly.item_bounds("rod").unwrap();
        assert_abs_diff_eq!(rod.min.z, block.max.z, epsilon = 1e-9);
    }

    #[test]
    fn test_join_top_bottom() {
        let mut assembly = Assembly::new();
        assembly.add("base", cube(10.0), Placement::default()).unwrap();
        assembly
            .add("lid", Cube::new(4.0, 4.0, 2.0).unwrap(), Placement::at(1.0, 2.0, 0.0))
            .unwrap();
        assembly
            .join_to_surface("base", "lid", Face::Top, Face::Bottom)
            .unwrap();

        // only z moves; lid bottom sits on base top
        assert_eq!(assembly.position("lid").unwrap(), Vec3::new(1.0, 2.0, 6.0));
    }

    #[test]
    fn test_join_offset_is_relative() {
        let mut assembly = Assembly::new();
        assembly.add("base", cube(10.0), Placement::default()).unwrap();
        assembly
            .add("lid", Cube::new(4.0, 4.0, 2.0).unwrap(), Placement::at(0.0, 0.0, -30.0))
            .unwrap();
        assembly
            .join_to_surface("base", "lid", Face::Top, Face::Bottom)
            .unwrap();

        assert_abs_diff_eq!(assembly.position("lid").unwrap().z, -24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_join_same_face_is_flush() {
        let mut assembly = Assembly::new();
        assembly.add("base", cube(10.0), Placement::default()).unwrap();
        assembly.add("tab", cube(2.0), Placement::default()).unwrap();
        assembly
            .join_to_surface("base", "tab", Face::Right, Face::Right)
            .unwrap();

        let base = assembly.item_bounds("base").unwrap();
        let tab = assembly.item_bounds("tab").unwrap();
        assert_abs_diff_eq!(tab.max.x, base.max.x, epsilon = 1e-9);
    }

    #[test]
    fn test_join_rejections() {
        let mut assembly = Assembly::new();
        assembly.add("a", cube(1.0), Placement::default()).unwrap();
        assembly
            .add("b", cube(1.0), Placement::default().child_of("a"))
            .unwrap();

        assert_eq!(
            assembly.join_to_surface("a", "a", Face::Top, Face::Bottom),
            Err(AssemblyError::SelfJoin("a".into()))
        );
        assert!(matches!(
            assembly.join_to_surface("b", "a", Face::Top, Face::Bottom),
            Err(AssemblyError::JoinToDescendant { .. })
        ));
        assert!(matches!(
            assembly.join_to_surface("a", "b", Face::Top, Face::Left),
            Err(AssemblyError::MismatchedFaces { .. })
        ));
        assert_eq!(
            assembly.join_to_surface("a", "nope", Face::Top, Face::Bottom),
            Err(AssemblyError::UnknownItem("nope".into()))
        );
    }
}
