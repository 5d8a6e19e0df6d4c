//! Impact crater height fields.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Noise, hash_seed, remap, smooth_max, smooth_min};

/// One crater, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Crater {
    /// Impact point on the surface.
    pub center: DVec3,
    /// Rim radius.
    pub radius: f64,
    /// Floor level relative to the cavity curve `x² - 1`. Typically in `[-1, 0]`.
    pub floor_height: f64,
    /// How far past the rim the raised lip extends, as a fraction of `radius`.
    pub rim_width: f64,
    /// Height of the lip.
    pub rim_steepness: f64,
    /// Blend width between cavity, floor and rim.
    pub smoothness: f64,
}

/// Summed height offset of every crater influencing `input`.
///
/// Craters further than twice their radius are skipped. When `noise` is given,
/// its value modulates a radial sine that terraces the rim; without it the rim
/// is smooth.
pub fn crater_height(input: DVec3, craters: &[Crater], noise: Option<&Noise>) -> f64 {
    let n = noise.map(|noise| noise.get_vec(input));
    let mut total = 0.0;

    for crater in craters {
        let dist = input.distance(crater.center);
        if dist > crater.radius * 2.0 {
            continue;
        }
        let x = dist / crater.radius;

        let radial = match n {
            Some(n) if n != 0.0 => {
                let wavelength = remap(crater.radius, 1000.0, 200_000.0, 1000.0, 10_000.0) * n;
                libm::sin(dist / wavelength)
            }
            _ => 1.0,
        };

        let cavity = x * x - 1.0;
        let rim_x = (x - 1.0 - crater.rim_width).min(0.0);
        let rim = crater.rim_steepness * rim_x * rim_x;

        let shape = smooth_max(cavity, crater.floor_height, crater.smoothness);
        let shape = smooth_min(
            shape,
            rim * smooth_min(0.75, radial, 0.4),
            crater.smoothness,
        );
        total += shape * crater.radius;
    }

    total
}

/// Deterministically place `count` craters on a sphere of `planet_radius`.
///
/// Small craters are far more common than large ones. Identical arguments
/// always yield the identical field.
pub fn scatter_craters(seed: &str, planet_radius: f64, count: usize) -> Vec<Crater> {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(hash_seed(seed)));
    let min_radius = planet_radius * 0.005;
    let max_radius = planet_radius * 0.08;

    (0..count)
        .map(|_| {
            // Uniform direction on the unit sphere.
            let z: f64 = rng.random_range(-1.0..=1.0);
            let phi: f64 = rng.random_range(0.0..std::f64::consts::TAU);
            let ring = (1.0 - z * z).sqrt();
            let direction = DVec3::new(ring * libm::cos(phi), ring * libm::sin(phi), z);

            let size: f64 = rng.random_range(0.0..1.0);
            Crater {
                center: direction * planet_radius,
                radius: min_radius + (max_radius - min_radius) * size * size * size,
                floor_height: rng.random_range(-0.6..-0.2),
                rim_width: rng.random_range(0.2..0.6),
                rim_steepness: rng.random_range(0.2..0.5),
                smoothness: rng.random_range(0.1..0.3),
            }
        })
        .collect()
}
