//! Seeded multi-octave simplex noise normalised to `[0, height]`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::DVec3;
use noise::{NoiseFn, Simplex};

/// Hash a textual seed into the `u32` the simplex permutation table wants.
///
/// Uses SipHash (via std's `DefaultHasher`) and folds the high half into the
/// low half so both contribute.
pub fn hash_seed(seed: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let h = hasher.finish();
    (h ^ (h >> 32)) as u32
}

/// Configuration for one [`Noise`] source.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Textual seed. Equal seeds give identical fields.
    pub seed: String,
    /// Number of octaves to composite.
    pub octaves: u32,
    /// Amplitude falloff. Each octave's amplitude is `2^-persistence` times
    /// the previous one.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Power applied to the normalised sum. Values above 1 flatten lowlands
    /// and sharpen peaks.
    pub exponentiation: f64,
    /// Output scale: results lie in `[0, height]`.
    pub height: f64,
    /// Spatial scale of the first octave in world units.
    pub scale: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: String::new(),
            octaves: 13,
            persistence: 0.707,
            lacunarity: 1.8,
            exponentiation: 4.5,
            height: 300.0,
            scale: 1100.0,
        }
    }
}

impl NoiseParams {
    /// Default parameters with the given seed.
    pub fn seeded(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Default::default()
        }
    }
}

/// Fractal Brownian motion over simplex noise, sampled in 3D world space.
#[derive(Clone, Debug)]
pub struct Noise {
    simplex: Simplex,
    params: NoiseParams,
}

impl Noise {
    /// Create a noise source. The permutation table is built once here.
    pub fn new(params: NoiseParams) -> Self {
        let simplex = Simplex::new(hash_seed(&params.seed));
        Self { simplex, params }
    }

    /// Sample at a world-space point.
    ///
    /// Each octave is remapped from `[-1, 1]` to `[0, 1]`, the weighted sum is
    /// divided by the total weight, raised to `exponentiation` and scaled by
    /// `height`.
    pub fn get(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &self.params;
        let falloff = 2.0_f64.powf(-p.persistence);
        let (xs, ys, zs) = (x / p.scale, y / p.scale, z / p.scale);

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut normalization = 0.0;
        let mut total = 0.0;

        for _ in 0..p.octaves {
            let sample = self
                .simplex
                .get([xs * frequency, ys * frequency, zs * frequency]);
            total += (sample * 0.5 + 0.5) * amplitude;
            normalization += amplitude;
            amplitude *= falloff;
            frequency *= p.lacunarity;
        }

        if normalization == 0.0 {
            return 0.0;
        }
        let unit = (total / normalization).clamp(0.0, 1.0);
        unit.powf(p.exponentiation) * p.height
    }

    /// [`get`](Self::get) taking a vector.
    #[inline]
    pub fn get_vec(&self, point: DVec3) -> f64 {
        self.get(point.x, point.y, point.z)
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_value() {
        let a = Noise::new(NoiseParams::seeded("blip"));
        let b = Noise::new(NoiseParams::seeded("blip"));
        for i in 0..50 {
            let p = DVec3::new(i as f64 * 37.0, i as f64 * -11.0, 400.0);
            assert_eq!(a.get_vec(p), b.get_vec(p));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let params = |seed: &str| NoiseParams {
            exponentiation: 1.0,
            ..NoiseParams::seeded(seed)
        };
        let a = Noise::new(params("blip"));
        let b = Noise::new(params("blarp"));
        let differing = (0..50)
            .filter(|&i| {
                let p = DVec3::new(i as f64 * 123.0, 77.0, i as f64 * 31.0);
                (a.get_vec(p) - b.get_vec(p)).abs() > 1e-9
            })
            .count();
        assert!(differing > 25, "only {differing} samples differ");
    }

    #[test]
    fn test_output_within_height() {
        let noise = Noise::new(NoiseParams {
            height: 50.0,
            exponentiation: 1.0,
            scale: 100.0,
            ..NoiseParams::seeded("range")
        });
        for i in 0..500 {
            let t = i as f64;
            let v = noise.get(t * 3.7, t * -1.3, t * 0.9);
            assert!((0.0..=50.0).contains(&v), "sample {i} out of range: {v}");
        }
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let noise = Noise::new(NoiseParams {
            octaves: 0,
            ..NoiseParams::seeded("flat")
        });
        assert_eq!(noise.get(1.0, 2.0, 3.0), 0.0);
    }

    #[test]
    fn test_hash_seed_is_stable_within_run() {
        assert_eq!(hash_seed("apple"), hash_seed("apple"));
        assert_ne!(hash_seed("apple"), hash_seed("mask"));
    }
}
