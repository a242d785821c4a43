//! Voxel edit system.
//!
//! Dig/build edits are tracked per voxel as the surviving record only,
//! with inverse edits on the same layer cancelling back to baseline.

pub mod record;
pub mod map;
pub mod queue;
pub mod snapshot;

pub use record::{BrushShape, EditOperation, VoxelEditRecord};
pub use map::{CoordinatePolicy, EditOutcome, SparseVoxelEditMap};
pub use queue::{EditQueue, PendingEdit};
pub use snapshot::EditSnapshot;
