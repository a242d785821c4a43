//! Integer voxel coordinates used as edit-map keys

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Integer coordinate of a single voxel in terrain voxel space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    /// Create a new voxel coordinate
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert a world-space position to the nearest voxel.
    ///
    /// Each axis rounds half away from zero, so `-0.5` maps to `-1`.
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: pos.x.round() as i32,
            y: pos.y.round() as i32,
            z: pos.z.round() as i32,
        }
    }

    /// True if any component is below zero
    pub fn is_negative(&self) -> bool {
        self.x < 0 || self.y < 0 || self.z < 0
    }

    /// Center of this voxel as a float position
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<IVec3> for VoxelCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<VoxelCoord> for IVec3 {
    fn from(c: VoxelCoord) -> Self {
        IVec3::new(c.x, c.y, c.z)
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
