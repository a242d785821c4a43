//! Raw height data and the physical extent it covers

use serde::{Deserialize, Serialize};

use crate::core::error::TerrainError;
use crate::core::types::Result;

/// Largest accepted sample count along either axis
pub const MAX_SAMPLES: usize = 4097;

/// Smallest accepted physical extent in meters
pub const MIN_DIMENSION: f32 = 1.0;

/// Physical terrain extent in meters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainSize {
    /// Extent along x
    pub length: f32,
    /// Extent along z
    pub width: f32,
    /// Height that maps to a normalized sample of 1.0
    pub height: f32,
}

impl TerrainSize {
    pub fn new(length: f32, width: f32, height: f32) -> Self {
        Self { length, width, height }
    }

    /// Check every extent is finite and at least one meter.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("length", self.length), ("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < MIN_DIMENSION {
                return Err(TerrainError::InvalidDimensions(format!(
                    "{} must be at least {}, got {}",
                    name, MIN_DIMENSION, value
                )));
            }
        }
        Ok(())
    }

    /// Larger of the two horizontal extents
    pub fn max_horizontal(&self) -> f32 {
        self.length.max(self.width)
    }
}

impl Default for TerrainSize {
    fn default() -> Self {
        Self::new(100.0, 100.0, 100.0)
    }
}

/// Row-major grid of raw height samples in meters.
///
/// `samples_x` values per row, `samples_y` rows. This is the canonical copy
/// used for read-back; the fitted grid is derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    samples_x: usize,
    samples_y: usize,
    samples: Vec<f32>,
    size: TerrainSize,
}

impl HeightField {
    /// Build a validated height field.
    pub fn new(samples: Vec<f32>, samples_x: usize, samples_y: usize, size: TerrainSize) -> Result<Self> {
        size.validate()?;
        Self::validate_samples(&samples, samples_x, samples_y)?;
        Ok(Self {
            samples_x,
            samples_y,
            samples,
            size,
        })
    }

    /// Build from nested rows (`rows[y][x]`).
    pub fn from_rows(rows: &[Vec<f32>], size: TerrainSize) -> Result<Self> {
        let samples_y = rows.len();
        let samples_x = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != samples_x) {
            return Err(TerrainError::InvalidHeightField(
                "rows have differing lengths".to_string(),
            ));
        }
        let samples = rows.iter().flatten().copied().collect();
        Self::new(samples, samples_x, samples_y, size)
    }

    /// A single zero sample, the state of a freshly created terrain.
    pub fn flat(size: TerrainSize) -> Result<Self> {
        Self::new(vec![0.0], 1, 1, size)
    }

    fn validate_samples(samples: &[f32], samples_x: usize, samples_y: usize) -> Result<()> {
        for (axis, count) in [("x", samples_x), ("y", samples_y)] {
            if count == 0 || count > MAX_SAMPLES {
                return Err(TerrainError::InvalidHeightField(format!(
                    "{} sample count {} outside [1, {}]",
                    axis, count, MAX_SAMPLES
                )));
            }
        }
        if samples.len() != samples_x * samples_y {
            return Err(TerrainError::InvalidHeightField(format!(
                "expected {}x{} = {} samples, got {}",
                samples_x,
                samples_y,
                samples_x * samples_y,
                samples.len()
            )));
        }
        if let Some(bad) = samples.iter().find(|h| !h.is_finite() || **h < 0.0) {
            return Err(TerrainError::InvalidHeightField(format!(
                "samples must be finite and non-negative, found {}",
                bad
            )));
        }
        Ok(())
    }

    /// Same samples over a different physical extent.
    pub fn with_size(&self, size: TerrainSize) -> Result<Self> {
        size.validate()?;
        Ok(Self { size, ..self.clone() })
    }

    /// Raw sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.samples_x && y < self.samples_y {
            Some(self.samples[y * self.samples_x + x])
        } else {
            None
        }
    }

    /// Sample with indices already known to be in range.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.samples_x + x]
    }

    pub fn samples_x(&self) -> usize {
        self.samples_x
    }

    pub fn samples_y(&self) -> usize {
        self.samples_y
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn size(&self) -> TerrainSize {
        self.size
    }

    /// Lowest and highest raw sample
    pub fn min_max(&self) -> (f32, f32) {
        self.samples.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        })
    }
}
