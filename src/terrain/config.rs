//! Terrain configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::heightfield::TerrainSize;
use crate::core::error::TerrainError;
use crate::core::types::Result;
use crate::voxel::edit::map::CoordinatePolicy;
use crate::voxel::edit::queue::DEFAULT_QUEUE_CAPACITY;

/// Configuration for a hybrid terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Whether edits at negative voxel coordinates are accepted
    pub coordinate_policy: CoordinatePolicy,
    /// Queued edits applied per `tick`
    pub max_edits_per_tick: usize,
    /// Maximum queued edits before `queue_*` calls fail
    pub edit_queue_capacity: usize,
    /// Physical size used until dimensions are supplied
    pub default_size: TerrainSize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            coordinate_policy: CoordinatePolicy::AllowNegative,
            max_edits_per_tick: 64,
            edit_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            default_size: TerrainSize::default(),
        }
    }
}

impl TerrainConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: TerrainConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the queue can both accept and drain edits, and the default size is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_edits_per_tick == 0 {
            return Err(TerrainError::InvalidConfig(
                "max_edits_per_tick must be at least 1".to_string(),
            ));
        }
        if self.edit_queue_capacity == 0 {
            return Err(TerrainError::InvalidConfig(
                "edit_queue_capacity must be at least 1".to_string(),
            ));
        }
        self.default_size.validate()
    }
}
