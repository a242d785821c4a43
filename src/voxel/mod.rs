//! Voxel coordinates and terrain edit tracking

pub mod coord;
pub mod edit;

pub use coord::VoxelCoord;
pub use edit::{BrushShape, EditOperation, SparseVoxelEditMap, VoxelEditRecord};
