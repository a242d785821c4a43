//! Height data, grid fitting and the hybrid terrain model

pub mod heightfield;
pub mod resample;
pub mod generator;
pub mod config;
pub mod hybrid;

pub use heightfield::{HeightField, TerrainSize};
pub use resample::{fit, pick_grid_resolution, resample, FittedHeights, GRID_RESOLUTIONS};
pub use generator::{BaseHeightGenerator, BaseHeightParams};
pub use config::TerrainConfig;
pub use hybrid::HybridTerrain;
