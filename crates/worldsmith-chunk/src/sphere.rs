//! Sphere chunks: a flat square patch bent onto a planet by cube-to-sphere
//! projection and displaced along the projection direction.
//!
//! The output is a point grid, not a mesh. It includes a one-sample skirt on
//! every side so the caller can stitch neighbouring chunks and build its own
//! index buffer.

use std::sync::Arc;

use glam::DVec3;
use tracing::debug;

use crate::buffers::{STRIDE_VEC3, STRIDE_VEC4, SphereChunkBuffers};
use crate::generator::sample_color;
use crate::{ChunkError, ColorGenerator, HeightGenerator, PatchDescriptor, SampleContext};

/// Number of samples along each grid axis: `resolution + 1` interior points
/// plus one skirt sample on either side.
#[inline]
pub fn samples_per_axis(resolution: u32) -> usize {
    resolution as usize + 3
}

/// Build a sphere chunk.
///
/// For each grid point `(x, y)` with `x, y ∈ [-1, resolution + 1]`:
///
/// 1. `P = (w·x/res − w/2, w·y/res − w/2, radius) + offset`
/// 2. `D = normalize(P)`, `P = D·radius − (0, 0, radius)`
/// 3. `W = world_matrix · P` is where both generators sample
/// 4. `H = D · height · (±1)` displaces the point
///
/// and the builder emits `P + H` as position, `W + H` as coord and `D` as up.
///
/// # Errors
///
/// Returns a [`ChunkError`] naming the first invalid descriptor field.
pub fn build_sphere_chunk<D>(
    patch: &PatchDescriptor<D>,
    height_gen: &dyn HeightGenerator<D>,
    color_gen: Option<&dyn ColorGenerator<D>>,
) -> Result<SphereChunkBuffers, ChunkError> {
    patch.validate()?;

    let resolution = patch.resolution;
    let effective = f64::from(resolution);
    let half = patch.width / 2.0;
    let sign = patch.displacement_sign();
    let samples = samples_per_axis(resolution);
    let last = i64::from(resolution) + 1;

    let mut buffers = SphereChunkBuffers::with_vertex_count(samples * samples);
    let mut vertex = 0;

    for x in -1..=last {
        let xp = patch.width * x as f64 / effective;
        for y in -1..=last {
            let yp = patch.width * y as f64 / effective;

            let flat = DVec3::new(xp - half, yp - half, patch.radius) + patch.offset;
            let direction = flat.normalize();
            let mut local = direction * patch.radius;
            local.z -= patch.radius;

            let world = patch.world_matrix.transform_point3(local);
            let sample = SampleContext {
                input: world,
                world_position: world,
                resolution: resolution + 2,
                patch,
            };
            let height = height_gen.height(&sample);
            let color = sample_color(color_gen, &sample, height);

            let displacement = direction * (height * sign);

            buffers
                .positions
                .set_element(vertex, &(local + displacement).as_vec3().to_array());
            buffers.colors.set_element(vertex, &color);
            buffers
                .coords
                .set_element(vertex, &(world + displacement).as_vec3().to_array());
            buffers
                .up
                .set_element(vertex, &direction.as_vec3().to_array());

            vertex += 1;
        }
    }

    debug_assert_eq!(buffers.positions.len(), vertex * STRIDE_VEC3);
    debug_assert_eq!(buffers.colors.len(), vertex * STRIDE_VEC4);
    debug!(resolution, vertices = vertex, "built sphere chunk");

    Ok(buffers)
}

/// A reusable sphere chunk builder bound to one generator pair.
pub struct SphereChunkBuilder<D> {
    height: Arc<dyn HeightGenerator<D>>,
    color: Option<Arc<dyn ColorGenerator<D>>>,
}

impl<D> SphereChunkBuilder<D> {
    /// Builder with the given height generator and white vertex colors.
    pub fn new(height: Arc<dyn HeightGenerator<D>>) -> Self {
        Self {
            height,
            color: None,
        }
    }

    /// Attach a color generator.
    #[must_use]
    pub fn with_color(mut self, color: Arc<dyn ColorGenerator<D>>) -> Self {
        self.color = Some(color);
        self
    }

    /// Build one chunk. See [`build_sphere_chunk`].
    pub fn build(&self, patch: &PatchDescriptor<D>) -> Result<SphereChunkBuffers, ChunkError> {
        build_sphere_chunk(patch, self.height.as_ref(), self.color.as_deref())
    }
}

impl<D> Clone for SphereChunkBuilder<D> {
    fn clone(&self) -> Self {
        Self {
            height: Arc::clone(&self.height),
            color: self.color.clone(),
        }
    }
}
