//! Hybrid terrain - sparse voxel edits over a fitted height field
//!
//! Two independent pieces make up the core:
//! - [`voxel::edit::SparseVoxelEditMap`] tracks the surviving dig/build edit
//!   per voxel, cancelling an edit when its inverse lands on the same layer.
//! - [`terrain::fit`] fits arbitrary raw heights onto a fixed
//!   power-of-two-plus-one grid.
//!
//! [`terrain::HybridTerrain`] composes them the way a host engine would.

pub mod core;
pub mod voxel;
pub mod terrain;
