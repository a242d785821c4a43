//! JSON snapshots of an edit map.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::map::SparseVoxelEditMap;
use super::record::VoxelEditRecord;
use crate::core::error::TerrainError;
use crate::core::types::Result;
use crate::voxel::coord::VoxelCoord;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// One edited voxel in a snapshot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub position: VoxelCoord,
    pub record: VoxelEditRecord,
}

/// Serializable copy of every record in an edit map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditSnapshot {
    pub version: u32,
    pub entries: Vec<SnapshotEntry>,
}

impl EditSnapshot {
    /// Capture the map's current records.
    ///
    /// Entries are sorted by coordinate so equal maps produce equal files.
    pub fn from_map(map: &SparseVoxelEditMap) -> Self {
        let mut entries: Vec<SnapshotEntry> = map
            .iter()
            .map(|(&position, &record)| SnapshotEntry { position, record })
            .collect();
        entries.sort_by_key(|e| (e.position.x, e.position.y, e.position.z));

        Self {
            version: SNAPSHOT_VERSION,
            entries,
        }
    }

    /// Replace the map's contents with this snapshot.
    ///
    /// Records are restored as-is; the cancellation rule does not apply.
    pub fn apply_to(&self, map: &mut SparseVoxelEditMap) {
        map.clear();
        for entry in &self.entries {
            map.insert_raw(entry.position, entry.record);
        }
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a snapshot written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let snapshot: EditSnapshot = serde_json::from_reader(BufReader::new(file))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(TerrainError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
