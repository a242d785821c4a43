//! Pending edit queue drained a bounded number of items per tick.

use std::collections::VecDeque;

use super::map::{EditOutcome, SparseVoxelEditMap};
use super::record::VoxelEditRecord;
use crate::core::error::TerrainError;
use crate::core::types::Result;
use crate::voxel::coord::VoxelCoord;

/// Default maximum number of queued edits
pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// An edit waiting to be applied
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingEdit {
    pub position: VoxelCoord,
    pub record: VoxelEditRecord,
}

/// FIFO of edits applied to a map in per-tick batches
#[derive(Debug)]
pub struct EditQueue {
    pending: VecDeque<PendingEdit>,
    capacity: usize,
}

impl EditQueue {
    /// Create a queue holding at most `capacity` edits
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity,
        }
    }

    /// Queue an edit. Fails without queueing when full.
    pub fn push(&mut self, position: VoxelCoord, record: VoxelEditRecord) -> Result<()> {
        if self.pending.len() >= self.capacity {
            return Err(TerrainError::QueueFull { capacity: self.capacity });
        }
        self.pending.push_back(PendingEdit { position, record });
        Ok(())
    }

    /// Take up to `max` edits in order and apply them.
    ///
    /// Returns how many the map accepted; edits refused by its coordinate
    /// policy are dropped and not counted.
    pub fn drain_into(&mut self, map: &mut SparseVoxelEditMap, max: usize) -> usize {
        let count = max.min(self.pending.len());
        let mut applied = 0;
        let mut cancelled = 0;

        for edit in self.pending.drain(..count) {
            match map.set_record(edit.position, edit.record) {
                EditOutcome::Rejected => {}
                EditOutcome::Cancelled => {
                    applied += 1;
                    cancelled += 1;
                }
                _ => applied += 1,
            }
        }

        if count > 0 {
            log::debug!(
                "Applied {} of {} queued edits ({} cancelled), {} remaining",
                applied,
                count,
                cancelled,
                self.pending.len()
            );
        }
        applied
    }

    /// Number of edits waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all pending edits
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for EditQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
