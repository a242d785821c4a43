//! Edit record representation.
//!
//! One record is kept per edited voxel. The canonical schema carries the
//! brush size alongside operation, layer and brush shape.

use serde::{Deserialize, Serialize};

/// Kind of terrain edit applied to a voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOperation {
    /// No edit recorded. Only ever returned, never stored.
    #[default]
    Unset,
    /// Material removed
    Dig,
    /// Material added
    Build,
}

impl EditOperation {
    /// The operation that undoes this one, if any.
    pub fn inverse(self) -> Option<Self> {
        match self {
            EditOperation::Dig => Some(EditOperation::Build),
            EditOperation::Build => Some(EditOperation::Dig),
            EditOperation::Unset => None,
        }
    }

    /// True if `other` undoes `self` (Dig and Build, in either order).
    pub fn is_inverse_of(self, other: Self) -> bool {
        self.inverse() == Some(other)
    }
}

/// Brush shape used for an edit. Stored, never interpreted by the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushShape {
    #[default]
    Sphere,
    Cube,
    RoundedCube,
    Stalagmite,
}

/// The surviving edit at one voxel
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoxelEditRecord {
    pub operation: EditOperation,
    /// Terrain material layer the edit applies to
    pub layer_index: i32,
    pub brush: BrushShape,
    /// Brush size in meters
    pub size: f32,
}

impl VoxelEditRecord {
    /// Returned for coordinates with no record.
    pub const UNSET: VoxelEditRecord = VoxelEditRecord {
        operation: EditOperation::Unset,
        layer_index: -1,
        brush: BrushShape::Sphere,
        size: 0.0,
    };

    pub fn new(operation: EditOperation, layer_index: i32, brush: BrushShape, size: f32) -> Self {
        Self { operation, layer_index, brush, size }
    }

    /// True for the lookup-miss sentinel
    pub fn is_unset(&self) -> bool {
        self.operation == EditOperation::Unset
    }

    /// True if `next` would undo this record: opposite operation on the same layer.
    pub fn is_cancelled_by(&self, next: &VoxelEditRecord) -> bool {
        self.operation.is_inverse_of(next.operation) && self.layer_index == next.layer_index
    }
}

impl Default for VoxelEditRecord {
    fn default() -> Self {
        Self::UNSET
    }
}
