//! Sparse voxel edit map - the surviving edit per voxel.
//!
//! Unlike an append-only history, applying the inverse of the current edit
//! (dig over build, or build over dig, on the same layer) deletes the record
//! and returns the voxel to its untouched baseline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::{BrushShape, EditOperation, VoxelEditRecord};
use crate::voxel::coord::VoxelCoord;

/// How `set_block` treats coordinates with a negative component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatePolicy {
    /// Accept any coordinate
    #[default]
    AllowNegative,
    /// Warn and ignore edits at negative coordinates
    RejectNegative,
}

/// What a `set_block` call did to the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// New record at a previously untouched voxel
    Inserted,
    /// Existing record overwritten
    Replaced,
    /// Existing record was the inverse on the same layer and got removed
    Cancelled,
    /// Nothing stored (Unset operation on an empty voxel)
    Ignored,
    /// Coordinate refused by the map's policy
    Rejected,
}

/// Per-voxel record of dig/build edits over a terrain.
///
/// Not internally synchronized; callers serialize mutation.
#[derive(Clone, Debug, Default)]
pub struct SparseVoxelEditMap {
    blocks: HashMap<VoxelCoord, VoxelEditRecord>,
    policy: CoordinatePolicy,
}

impl SparseVoxelEditMap {
    /// Create an empty map accepting all coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with the given coordinate policy.
    pub fn with_policy(policy: CoordinatePolicy) -> Self {
        Self {
            blocks: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CoordinatePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CoordinatePolicy) {
        self.policy = policy;
    }

    /// Record an edit at `position`.
    ///
    /// An opposite operation on the same layer cancels the stored record.
    /// Anything else overwrites it. `Unset` clears the voxel.
    pub fn set_block(
        &mut self,
        position: VoxelCoord,
        operation: EditOperation,
        layer_index: i32,
        brush: BrushShape,
        size: f32,
    ) -> EditOutcome {
        self.set_record(position, VoxelEditRecord::new(operation, layer_index, brush, size))
    }

    /// Same as [`set_block`](Self::set_block) with a prebuilt record.
    pub fn set_record(&mut self, position: VoxelCoord, record: VoxelEditRecord) -> EditOutcome {
        if self.policy == CoordinatePolicy::RejectNegative && position.is_negative() {
            log::warn!(
                "Ignoring {:?} at negative voxel ({}, {}, {})",
                record.operation, position.x, position.y, position.z
            );
            return EditOutcome::Rejected;
        }

        if record.is_unset() {
            return match self.blocks.remove(&position) {
                Some(_) => EditOutcome::Cancelled,
                None => EditOutcome::Ignored,
            };
        }

        let outcome = match self.blocks.get(&position) {
            None => {
                self.blocks.insert(position, record);
                EditOutcome::Inserted
            }
            Some(existing) if existing.is_cancelled_by(&record) => {
                self.blocks.remove(&position);
                EditOutcome::Cancelled
            }
            Some(_) => {
                self.blocks.insert(position, record);
                EditOutcome::Replaced
            }
        };

        log::trace!("Edit {:?} at {:?}: {:?}", record.operation, position, outcome);
        outcome
    }

    /// Delete any record at `position`, returning it.
    pub fn remove_block(&mut self, position: VoxelCoord) -> Option<VoxelEditRecord> {
        self.blocks.remove(&position)
    }

    /// Record at `position`, or [`VoxelEditRecord::UNSET`] if untouched.
    pub fn get_block(&self, position: VoxelCoord) -> VoxelEditRecord {
        self.blocks
            .get(&position)
            .copied()
            .unwrap_or(VoxelEditRecord::UNSET)
    }

    /// Copy of every edited voxel and its record.
    pub fn get_blocks(&self) -> HashMap<VoxelCoord, VoxelEditRecord> {
        self.blocks.clone()
    }

    /// Iterate edited voxels without copying.
    pub fn iter(&self) -> impl Iterator<Item = (&VoxelCoord, &VoxelEditRecord)> {
        self.blocks.iter()
    }

    pub fn contains(&self, position: VoxelCoord) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Number of edited voxels.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Forget all edits.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Store a record without the cancellation rule. Used when restoring snapshots.
    pub(crate) fn insert_raw(&mut self, position: VoxelCoord, record: VoxelEditRecord) {
        if !record.is_unset() {
            self.blocks.insert(position, record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32, z: i32) -> VoxelCoord {
        VoxelCoord::new(x, y, z)
    }

    #[test]
    fn test_insert_new_record() {
        let mut map = SparseVoxelEditMap::new();
        let outcome = map.set_block(p(1, 2, 3), EditOperation::Dig, 0, BrushShape::Sphere, 2.0);

        assert_eq!(outcome, EditOutcome::Inserted);
        assert_eq!(map.len(), 1);
        let rec = map.get_block(p(1, 2, 3));
        assert_eq!(rec.operation, EditOperation::Dig);
        assert_eq!(rec.layer_index, 0);
        assert_eq!(rec.size, 2.0);
    }

    #[test]
    fn test_inverse_cancellation() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(4, 0, -7);

        map.set_block(pos, EditOperation::Dig, 3, BrushShape::Cube, 1.0);
        let outcome = map.set_block(pos, EditOperation::Build, 3, BrushShape::Cube, 1.0);

        assert_eq!(outcome, EditOutcome::Cancelled);
        assert_eq!(map.get_block(pos), VoxelEditRecord::UNSET);
        assert!(map.is_empty());
    }

    #[test]
    fn test_build_then_dig_cancels() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(0, 0, 0);

        map.set_block(pos, EditOperation::Build, 1, BrushShape::Sphere, 1.0);
        // Brush and size do not take part in the inverse test
        map.set_block(pos, EditOperation::Dig, 1, BrushShape::Stalagmite, 5.0);

        assert!(!map.contains(pos));
    }

    #[test]
    fn test_different_layer_overwrites() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(1, 1, 1);

        map.set_block(pos, EditOperation::Dig, 1, BrushShape::Sphere, 1.0);
        let outcome = map.set_block(pos, EditOperation::Build, 2, BrushShape::RoundedCube, 1.5);

        assert_eq!(outcome, EditOutcome::Replaced);
        assert_eq!(
            map.get_block(pos),
            VoxelEditRecord::new(EditOperation::Build, 2, BrushShape::RoundedCube, 1.5)
        );
    }

    #[test]
    fn test_repeat_is_idempotent() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(9, 9, 9);

        map.set_block(pos, EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
        let outcome = map.set_block(pos, EditOperation::Dig, 0, BrushShape::Sphere, 1.0);

        assert_eq!(outcome, EditOutcome::Replaced);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get_block(pos),
            VoxelEditRecord::new(EditOperation::Dig, 0, BrushShape::Sphere, 1.0)
        );
    }

    #[test]
    fn test_cancel_then_reapply() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(2, 2, 2);

        map.set_block(pos, EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
        map.set_block(pos, EditOperation::Build, 0, BrushShape::Sphere, 1.0);
        let outcome = map.set_block(pos, EditOperation::Build, 0, BrushShape::Sphere, 1.0);

        // Voxel was back at baseline, so the build is a fresh record
        assert_eq!(outcome, EditOutcome::Inserted);
        assert_eq!(map.get_block(pos).operation, EditOperation::Build);
    }

    #[test]
    fn test_remove_block() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(-3, 5, 8);

        map.set_block(pos, EditOperation::Build, 4, BrushShape::Cube, 1.0);
        let removed = map.remove_block(pos);

        assert_eq!(removed.map(|r| r.layer_index), Some(4));
        assert!(map.get_block(pos).is_unset());
        assert!(!map.get_blocks().contains_key(&pos));

        // Removing again is a no-op
        assert!(map.remove_block(pos).is_none());
    }

    #[test]
    fn test_get_block_miss_returns_sentinel() {
        let map = SparseVoxelEditMap::new();
        assert_eq!(map.get_block(p(100, -100, 0)), VoxelEditRecord::UNSET);
    }

    #[test]
    fn test_snapshot_completeness() {
        let mut map = SparseVoxelEditMap::new();

        for i in 0..50 {
            let op = if i % 2 == 0 { EditOperation::Dig } else { EditOperation::Build };
            map.set_block(p(i, -i, i * 2), op, i % 4, BrushShape::Sphere, i as f32);
        }
        // Overwrite a few with a different layer so nothing cancels
        for i in 0..5 {
            map.set_block(p(i, -i, i * 2), EditOperation::Dig, 10, BrushShape::Cube, 0.5);
        }

        let blocks = map.get_blocks();
        assert_eq!(blocks.len(), 50);
        for i in 0..5 {
            let rec = blocks[&p(i, -i, i * 2)];
            assert_eq!(rec.layer_index, 10);
            assert_eq!(rec.brush, BrushShape::Cube);
        }
        assert_eq!(blocks[&p(7, -7, 14)].operation, EditOperation::Build);
        assert_eq!(blocks[&p(7, -7, 14)].size, 7.0);
    }

    #[test]
    fn test_get_blocks_is_a_copy() {
        let mut map = SparseVoxelEditMap::new();
        map.set_block(p(0, 0, 0), EditOperation::Dig, 0, BrushShape::Sphere, 1.0);

        let snapshot = map.get_blocks();
        map.clear();

        assert_eq!(snapshot.len(), 1);
        assert!(map.is_empty());
    }

    #[test]
    fn test_reject_negative_policy() {
        crate::core::logging::init_test();
        let mut map = SparseVoxelEditMap::with_policy(CoordinatePolicy::RejectNegative);

        let outcome = map.set_block(p(0, -1, 0), EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
        assert_eq!(outcome, EditOutcome::Rejected);
        assert!(map.is_empty());

        let outcome = map.set_block(p(0, 1, 0), EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
        assert_eq!(outcome, EditOutcome::Inserted);
    }

    #[test]
    fn test_allow_negative_by_default() {
        let mut map = SparseVoxelEditMap::new();
        assert_eq!(map.policy(), CoordinatePolicy::AllowNegative);

        let outcome = map.set_block(p(-1, -1, -1), EditOperation::Build, 0, BrushShape::Sphere, 1.0);
        assert_eq!(outcome, EditOutcome::Inserted);
    }

    #[test]
    fn test_unset_operation_clears() {
        let mut map = SparseVoxelEditMap::new();
        let pos = p(1, 0, 0);

        assert_eq!(
            map.set_block(pos, EditOperation::Unset, 0, BrushShape::Sphere, 0.0),
            EditOutcome::Ignored
        );

        map.set_block(pos, EditOperation::Dig, 0, BrushShape::Sphere, 1.0);
        assert_eq!(
            map.set_block(pos, EditOperation::Unset, 0, BrushShape::Sphere, 0.0),
            EditOutcome::Cancelled
        );
        assert!(map.is_empty());
    }
}
