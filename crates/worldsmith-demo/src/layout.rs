//! Where the demo puts its chunks: a square block of patches centred on the
//! +Z face of the planet, and the same block unrolled on the ring.

use glam::{DMat4, DVec3};
use worldsmith_chunk::PatchDescriptor;
use worldsmith_config::Config;
use worldsmith_terrain::GeneratorSettings;

/// Offsets of a `grid × grid` block of `width`-wide cells, centred on the origin.
pub fn block_offsets(grid: u32, cell_x: f64, cell_y: f64) -> Vec<DVec3> {
    let centre = f64::from(grid.saturating_sub(1)) / 2.0;
    let mut offsets = Vec::with_capacity((grid * grid) as usize);
    for i in 0..grid {
        for j in 0..grid {
            offsets.push(DVec3::new(
                (f64::from(i) - centre) * cell_x,
                (f64::from(j) - centre) * cell_y,
                0.0,
            ));
        }
    }
    offsets
}

/// Sphere patches on a planet centred at the world origin.
pub fn sphere_patches(config: &Config) -> Vec<PatchDescriptor<GeneratorSettings>> {
    let settings = config.planet.generator_settings();
    let radius = config.planet.radius_m;
    let width = config.chunk.width_m;
    let to_world = DMat4::from_translation(DVec3::new(0.0, 0.0, radius));

    block_offsets(config.chunk.grid, width, width)
        .into_iter()
        .map(|offset| {
            PatchDescriptor::new(radius, width, config.chunk.resolution, settings.clone())
                .with_offset(offset)
                .with_world_matrix(to_world)
                .with_inverted(config.chunk.inverted)
        })
        .collect()
}

/// Ring patches on a cylinder whose axis is the world Y axis.
pub fn ring_patches(config: &Config) -> Vec<PatchDescriptor<GeneratorSettings>> {
    let radius = config.ring.radius_m;
    let settings = GeneratorSettings {
        radius,
        ..config.planet.generator_settings()
    };
    let width = config.chunk.width_m;
    let length = config.ring.chunk_length_m;
    let to_world = DMat4::from_translation(DVec3::new(0.0, 0.0, radius));

    block_offsets(config.chunk.grid, width, length)
        .into_iter()
        .map(|offset| {
            PatchDescriptor::new(radius, width, config.chunk.resolution, settings.clone())
                .with_height(length)
                .with_offset(offset)
                .with_world_matrix(to_world)
                .with_inverted(config.chunk.inverted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_centred() {
        let offsets = block_offsets(3, 10.0, 20.0);
        assert_eq!(offsets.len(), 9);
        assert_eq!(offsets[0], DVec3::new(-10.0, -20.0, 0.0));
        assert_eq!(offsets[4], DVec3::ZERO);
        assert_eq!(offsets[8], DVec3::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn test_single_cell_block_sits_at_origin() {
        assert_eq!(block_offsets(1, 5.0, 5.0), vec![DVec3::ZERO]);
        assert!(block_offsets(0, 5.0, 5.0).is_empty());
    }

    #[test]
    fn test_patches_follow_config() {
        let mut config = Config::default();
        config.chunk.grid = 2;
        config.chunk.inverted = true;

        let spheres = sphere_patches(&config);
        assert_eq!(spheres.len(), 4);
        assert!(spheres.iter().all(|p| p.inverted && p.validate().is_ok()));
        assert_eq!(spheres[0].data.radius, config.planet.radius_m);

        let rings = ring_patches(&config);
        assert_eq!(rings.len(), 4);
        assert!(rings.iter().all(|p| p.validate_ring().is_ok()));
        assert_eq!(rings[0].height, config.ring.chunk_length_m);
        assert_eq!(rings[0].data.radius, config.ring.radius_m);
    }
}
