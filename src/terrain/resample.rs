//! Fitting raw height data onto a fixed-resolution terrain grid.
//!
//! Terrain grids come in power-of-two-plus-one sizes. A raw field of any
//! resolution is stretched over the chosen grid and normalized by the
//! terrain's physical height.

use rayon::prelude::*;

use super::heightfield::HeightField;

/// Grid resolutions a terrain can use, ascending
pub const GRID_RESOLUTIONS: [u32; 8] = [33, 65, 129, 257, 513, 1025, 2049, 4097];

/// Smallest grid resolution
pub const MIN_GRID_RESOLUTION: u32 = GRID_RESOLUTIONS[0];

/// Largest grid resolution
pub const MAX_GRID_RESOLUTION: u32 = GRID_RESOLUTIONS[GRID_RESOLUTIONS.len() - 1];

/// Smallest grid resolution covering `max_dimension` meters.
///
/// Sizes below one meter fall back to the smallest grid and sizes past the
/// largest grid clamp to it. Both cases are logged.
pub fn pick_grid_resolution(max_dimension: f32) -> u32 {
    if !(max_dimension >= 1.0) {
        log::warn!(
            "Terrain dimension {} below 1m, using {} grid",
            max_dimension, MIN_GRID_RESOLUTION
        );
        return MIN_GRID_RESOLUTION;
    }

    match GRID_RESOLUTIONS.iter().find(|&&res| max_dimension <= res as f32) {
        Some(&res) => res,
        None => {
            log::warn!(
                "Terrain dimension {} exceeds {}, clamping grid",
                max_dimension, MAX_GRID_RESOLUTION
            );
            MAX_GRID_RESOLUTION
        }
    }
}

/// Square grid of normalized heights, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct FittedHeights {
    resolution: u32,
    samples: Vec<f32>,
}

impl FittedHeights {
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Normalized height at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        let res = self.resolution as usize;
        if x < res && y < res {
            Some(self.samples[y * res + x])
        } else {
            None
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Iterate rows from y = 0
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.samples.chunks_exact(self.resolution as usize)
    }

    /// Copy out as nested rows (`rows[y][x]`)
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Floor and ceil of `f`, both clamped to `[0, len - 1]`, and the fraction between them.
#[inline]
fn bracket(f: f32, len: usize) -> (usize, usize, f32) {
    let last = len - 1;
    let lo = (f.floor() as usize).min(last);
    let hi = (f.ceil() as usize).min(last);
    let t = (f - f.floor()).clamp(0.0, 1.0);
    (lo, hi, t)
}

/// Stretch `source` over a `resolution × resolution` grid.
///
/// Each output cell interpolates once along x (on the lower source row) and
/// once along y (on the lower source column), then takes the plain average
/// of the two. This is not bilinear interpolation. Existing terrains were
/// fitted this way, so the formula must stay as is. The result is divided
/// by the source's physical height.
pub fn resample(source: &HeightField, resolution: u32) -> FittedHeights {
    let res = resolution.max(1) as usize;
    let ratio_x = source.samples_x() as f32 / res as f32;
    let ratio_y = source.samples_y() as f32 / res as f32;
    let height = source.size().height;

    let mut samples = vec![0.0f32; res * res];
    samples
        .par_chunks_mut(res)
        .enumerate()
        .for_each(|(j, row)| {
            let (y0, y1, ty) = bracket(j as f32 * ratio_y, source.samples_y());
            for (i, out) in row.iter_mut().enumerate() {
                let (x0, x1, tx) = bracket(i as f32 * ratio_x, source.samples_x());
                let base = source.at(x0, y0);
                let along_x = lerp(base, source.at(x1, y0), tx);
                let along_y = lerp(base, source.at(x0, y1), ty);
                *out = (along_x + along_y) * 0.5 / height;
            }
        });

    log::debug!(
        "Fitted {}x{} heights onto {}x{} grid",
        source.samples_x(),
        source.samples_y(),
        res,
        res
    );

    FittedHeights {
        resolution: res as u32,
        samples,
    }
}

/// Pick the grid for the field's physical size and fit onto it.
pub fn fit(source: &HeightField) -> FittedHeights {
    resample(source, pick_grid_resolution(source.size().max_horizontal()))
}
