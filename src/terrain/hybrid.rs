//! Hybrid terrain: voxel edits layered over a fitted height field.

use glam::Vec3;

use super::config::TerrainConfig;
use super::heightfield::{HeightField, TerrainSize};
use super::resample::{self, FittedHeights};
use crate::core::types::Result;
use crate::voxel::coord::VoxelCoord;
use crate::voxel::edit::{
    BrushShape, EditOperation, EditOutcome, EditQueue, SparseVoxelEditMap, VoxelEditRecord,
};

/// Engine-independent state of one hybrid terrain.
///
/// Keeps the raw heights as the source of truth, a fitted grid derived from
/// them, and the sparse dig/build map. Invalid updates are logged and
/// rejected, leaving the previous state in place.
pub struct HybridTerrain {
    config: TerrainConfig,
    base: HeightField,
    fitted: FittedHeights,
    edits: SparseVoxelEditMap,
    queue: EditQueue,
}

impl HybridTerrain {
    /// Create a flat terrain at the config's default size.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let base = HeightField::flat(config.default_size)?;
        Self::with_heights(config, base)
    }

    /// Create from existing raw heights. Fails on an unusable config.
    pub fn with_heights(config: TerrainConfig, base: HeightField) -> Result<Self> {
        if let Err(e) = config.validate() {
            log::warn!("Terrain config rejected: {}", e);
            return Err(e);
        }
        let fitted = resample::fit(&base);
        Ok(Self {
            edits: SparseVoxelEditMap::with_policy(config.coordinate_policy),
            queue: EditQueue::new(config.edit_queue_capacity),
            config,
            base,
            fitted,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Change the physical size and refit the current heights.
    pub fn set_dimensions(&mut self, length: f32, width: f32, height: f32) -> Result<()> {
        let size = TerrainSize::new(length, width, height);
        match self.base.with_size(size) {
            Ok(base) => {
                self.replace_base(base);
                Ok(())
            }
            Err(e) => {
                log::warn!("Terrain resize rejected, keeping {:?}: {}", self.base.size(), e);
                Err(e)
            }
        }
    }

    /// Replace the raw heights (`samples_x` per row, row-major) and refit.
    pub fn set_base_heights(&mut self, samples: Vec<f32>, samples_x: usize, samples_y: usize) -> Result<()> {
        match HeightField::new(samples, samples_x, samples_y, self.base.size()) {
            Ok(base) => {
                self.replace_base(base);
                Ok(())
            }
            Err(e) => {
                log::warn!("Height update rejected, keeping previous heights: {}", e);
                Err(e)
            }
        }
    }

    fn replace_base(&mut self, base: HeightField) {
        self.fitted = resample::fit(&base);
        self.base = base;
        log::debug!(
            "Terrain refit: {}x{} raw samples -> {} grid",
            self.base.samples_x(),
            self.base.samples_y(),
            self.fitted.resolution()
        );
    }

    /// Raw height at column `x`, row `y`.
    pub fn get_height(&self, x: usize, y: usize) -> Option<f32> {
        self.base.get(x, y)
    }

    /// The raw heights as last supplied.
    pub fn get_base_heights(&self) -> &HeightField {
        &self.base
    }

    /// Normalized grid derived from the raw heights.
    pub fn fitted(&self) -> &FittedHeights {
        &self.fitted
    }

    pub fn size(&self) -> TerrainSize {
        self.base.size()
    }

    /// Remove material at a world-space position.
    pub fn dig(&mut self, pos: Vec3, layer_index: i32, brush: BrushShape, size: f32) -> EditOutcome {
        self.edits.set_block(VoxelCoord::from_world_pos(pos), EditOperation::Dig, layer_index, brush, size)
    }

    /// Add material at a world-space position.
    pub fn build(&mut self, pos: Vec3, layer_index: i32, brush: BrushShape, size: f32) -> EditOutcome {
        self.edits.set_block(VoxelCoord::from_world_pos(pos), EditOperation::Build, layer_index, brush, size)
    }

    /// Record at the voxel nearest `pos`.
    pub fn edit_at(&self, pos: Vec3) -> VoxelEditRecord {
        self.edits.get_block(VoxelCoord::from_world_pos(pos))
    }

    /// Queue a dig to be applied on a later `tick`.
    pub fn queue_dig(&mut self, pos: Vec3, layer_index: i32, brush: BrushShape, size: f32) -> Result<()> {
        let record = VoxelEditRecord::new(EditOperation::Dig, layer_index, brush, size);
        self.queue.push(VoxelCoord::from_world_pos(pos), record)
    }

    /// Queue a build to be applied on a later `tick`.
    pub fn queue_build(&mut self, pos: Vec3, layer_index: i32, brush: BrushShape, size: f32) -> Result<()> {
        let record = VoxelEditRecord::new(EditOperation::Build, layer_index, brush, size);
        self.queue.push(VoxelCoord::from_world_pos(pos), record)
    }

    /// Drain up to `max_edits_per_tick` queued edits.
    ///
    /// Returns the number the edit map accepted; policy rejections are not counted.
    pub fn tick(&mut self) -> usize {
        self.queue.drain_into(&mut self.edits, self.config.max_edits_per_tick)
    }

    /// Edits waiting for a tick
    pub fn pending_edits(&self) -> usize {
        self.queue.len()
    }

    pub fn edits(&self) -> &SparseVoxelEditMap {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut SparseVoxelEditMap {
        &mut self.edits
    }
}
