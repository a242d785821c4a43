//! Noise-based procedural base heights

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::heightfield::{HeightField, TerrainSize};
use crate::core::types::Result;

/// Parameters controlling base height generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseHeightParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub height_scale: f32, // Vertical scale (max height)
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
}

impl Default for BaseHeightParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 100.0,
            height_scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Procedural base height generator using fractal Brownian motion (FBM)
pub struct BaseHeightGenerator {
    params: BaseHeightParams,
    noise: Fbm<Perlin>,
}

impl BaseHeightGenerator {
    /// Create a new generator with the given parameters
    pub fn new(params: BaseHeightParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    pub fn params(&self) -> &BaseHeightParams {
        &self.params
    }

    /// Height in meters at terrain-local position (x, z), in `[0, height_scale]`
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;

        // Noise is roughly [-1, 1]
        let noise_value = self.noise.get([nx, nz]);
        let normalized = ((noise_value + 1.0) / 2.0).clamp(0.0, 1.0);
        (normalized * self.params.height_scale as f64) as f32
    }

    /// Sample a `samples_x × samples_y` field spread evenly over `size`.
    ///
    /// Heights are clamped to the terrain's physical height.
    pub fn generate(&self, samples_x: usize, samples_y: usize, size: TerrainSize) -> Result<HeightField> {
        let step_x = size.length / (samples_x.max(2) - 1) as f32;
        let step_z = size.width / (samples_y.max(2) - 1) as f32;

        let mut samples = Vec::with_capacity(samples_x * samples_y);
        for y in 0..samples_y {
            for x in 0..samples_x {
                let h = self.height_at(x as f32 * step_x, y as f32 * step_z);
                samples.push(h.min(size.height));
            }
        }

        HeightField::new(samples, samples_x, samples_y, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default() {
        let params = BaseHeightParams::default();
        assert_eq!(params.seed, 12345);
        assert_eq!(params.scale, 100.0);
        assert_eq!(params.height_scale, 64.0);
        assert_eq!(params.octaves, 4);
    }

    #[test]
    fn test_height_in_range() {
        let generator = BaseHeightGenerator::new(BaseHeightParams::default());
        for i in 0..100 {
            let h = generator.height_at(i as f32 * 7.3, i as f32 * -3.1);
            assert!((0.0..=64.0).contains(&h));
        }
    }

    #[test]
    fn test_deterministic() {
        let a = BaseHeightGenerator::new(BaseHeightParams::default());
        let b = BaseHeightGenerator::new(BaseHeightParams::default());
        assert_eq!(a.height_at(12.5, 40.0), b.height_at(12.5, 40.0));
    }

    #[test]
    fn test_generate_field() {
        let generator = BaseHeightGenerator::new(BaseHeightParams::default());
        let size = TerrainSize::new(200.0, 100.0, 30.0);
        let field = generator.generate(17, 9, size).unwrap();

        assert_eq!(field.samples_x(), 17);
        assert_eq!(field.samples_y(), 9);
        let (lo, hi) = field.min_max();
        assert!(lo >= 0.0);
        assert!(hi <= 30.0);
    }

    #[test]
    fn test_generate_rejects_bad_size() {
        let generator = BaseHeightGenerator::new(BaseHeightParams::default());
        assert!(generator.generate(4, 4, TerrainSize::new(0.0, 10.0, 10.0)).is_err());
    }
}
