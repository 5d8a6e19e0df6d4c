//! Ring-world chunks: a flat rectangle bent onto a cylinder around local Y,
//! triangulated, smooth-shaded, and de-indexed for direct upload.

use std::sync::Arc;

use glam::DVec3;
use tracing::debug;

use crate::buffers::{RingChunkBuffers, STRIDE_UV, STRIDE_VEC3, STRIDE_VEC4};
use crate::generator::sample_color;
use crate::indexing::{accumulate_normals, deindex, grid_indices};
use crate::{ChunkError, ColorGenerator, HeightGenerator, PatchDescriptor, SampleContext};

/// World units per texture repeat.
pub const UV_TILING: f32 = 200.0;

/// Default tangent: +X with positive handedness.
const TANGENT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Bend a local patch point onto the cylinder of the given radius.
///
/// Returns the bent point (re-centred so the patch sits near the origin) and
/// the radial direction used for displacement. Only X and Z of the direction
/// are meaningful; Y is the untouched axial coordinate.
#[inline]
fn bend_to_cylinder(flat: DVec3, radius: f64) -> (DVec3, DVec3) {
    let cylinder_length = (flat.x * flat.x + flat.z * flat.z).sqrt();
    let direction = DVec3::new(flat.x / cylinder_length, flat.y, flat.z / cylinder_length);
    let bent = DVec3::new(
        direction.x * radius,
        direction.y,
        direction.z * radius - radius,
    );
    (bent, direction)
}

/// Build a ring-world chunk.
///
/// Samples a `(resolution + 1)²` grid spanning `width × height`, bends it onto
/// the cylinder, displaces X/Z radially by the generated height, triangulates
/// with [`grid_indices`], smooths normals with [`accumulate_normals`] and
/// expands every attribute with [`deindex`]. The result holds
/// `6 · resolution²` vertices.
///
/// # Errors
///
/// Returns a [`ChunkError`] naming the first invalid descriptor field.
pub fn build_ring_chunk<D>(
    patch: &PatchDescriptor<D>,
    height_gen: &dyn HeightGenerator<D>,
    color_gen: Option<&dyn ColorGenerator<D>>,
) -> Result<RingChunkBuffers, ChunkError> {
    patch.validate_ring()?;

    let resolution = patch.resolution;
    let steps = f64::from(resolution);
    let half_w = patch.width / 2.0;
    let half_h = patch.height / 2.0;
    let sign = patch.displacement_sign();

    let vertex_count = (resolution as usize + 1).pow(2);
    let mut positions = Vec::with_capacity(vertex_count * STRIDE_VEC3);
    let mut colors = Vec::with_capacity(vertex_count * STRIDE_VEC4);
    let mut uvs = Vec::with_capacity(vertex_count * STRIDE_UV);

    for x in 0..=resolution {
        let xp = patch.width * f64::from(x) / steps;
        for y in 0..=resolution {
            let yp = patch.height * f64::from(y) / steps;

            let flat = DVec3::new(xp - half_w, yp - half_h, patch.radius) + patch.offset;
            let (mut local, direction) = bend_to_cylinder(flat, patch.radius);

            let world = patch.world_matrix.transform_point3(local);
            let sample = SampleContext {
                input: world,
                world_position: world,
                resolution,
                patch,
            };
            let height = height_gen.height(&sample);
            let color = sample_color(color_gen, &sample, height);

            // The axial coordinate is never displaced.
            let signed = height * sign;
            local.x += direction.x * signed;
            local.z += direction.z * signed;

            let position = local.as_vec3();
            positions.extend_from_slice(&position.to_array());
            colors.extend_from_slice(&color);
            uvs.extend_from_slice(&[position.x / UV_TILING, position.y / UV_TILING]);
        }
    }

    let indices = grid_indices(resolution);
    let normals = accumulate_normals(&positions, &indices);
    let tangents = TANGENT.repeat(vertex_count);

    let buffers = RingChunkBuffers {
        positions: deindex(&positions, STRIDE_VEC3, &indices),
        colors: deindex(&colors, STRIDE_VEC4, &indices),
        normals: deindex(&normals, STRIDE_VEC3, &indices),
        tangents: deindex(&tangents, STRIDE_VEC4, &indices),
        uvs: deindex(&uvs, STRIDE_UV, &indices),
    };

    debug!(
        resolution,
        triangles = indices.len() / 3,
        "built ring chunk"
    );

    Ok(buffers)
}

/// A reusable ring chunk builder bound to one generator pair.
pub struct RingChunkBuilder<D> {
    height: Arc<dyn HeightGenerator<D>>,
    color: Option<Arc<dyn ColorGenerator<D>>>,
}

impl<D> RingChunkBuilder<D> {
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

    /// Build one chunk. See [`build_ring_chunk`].
    pub fn build(&self, patch: &PatchDescriptor<D>) -> Result<RingChunkBuffers, ChunkError> {
        build_ring_chunk(patch, self.height.as_ref(), self.color.as_deref())
    }
}

impl<D> Clone for RingChunkBuilder<D> {
    fn clone(&self) -> Self {
        Self {
            height: Arc::clone(&self.height),
            color: self.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, ColorContext, ConstantHeight};
    use glam::Vec3;

    const RADIUS: f64 = 1000.0;

    fn patch(resolution: u32) -> PatchDescriptor<()> {
        PatchDescriptor::new(RADIUS, 40.0, resolution, ()).with_height(60.0)
    }

    fn vec3_at(buf: &[f32], i: usize) -> Vec3 {
        Vec3::from_slice(&buf[i * 3..])
    }

    /// Outward radial direction of a chunk-local point (axis at z = -radius).
    fn radial(p: Vec3) -> Vec3 {
        Vec3::new(p.x, 0.0, p.z + RADIUS as f32).normalize()
    }

    #[test]
    fn test_vertex_count_is_six_per_quad() {
        for res in [1, 3, 8] {
            let out = build_ring_chunk(&patch(res), &ConstantHeight(0.0), None).unwrap();
            let n = 6 * (res as usize).pow(2);
            assert_eq!(out.vertex_count(), n);
            assert_eq!(out.triangle_count(), 2 * (res as usize).pow(2));
            assert_eq!(out.positions.len(), 3 * n);
            assert_eq!(out.colors.len(), 4 * n);
            assert_eq!(out.normals.len(), 3 * n);
            assert_eq!(out.tangents.len(), 4 * n);
            assert_eq!(out.uvs.len(), 2 * n);
        }
    }

    #[test]
    fn test_zero_height_lies_on_cylinder() {
        let p = patch(6).with_offset(DVec3::new(150.0, 20.0, 0.0));
        let out = build_ring_chunk(&p, &ConstantHeight(0.0), None).unwrap();
        for i in 0..out.vertex_count() {
            let v = vec3_at(&out.positions, i);
            let r = (v.x * v.x + (v.z + RADIUS as f32).powi(2)).sqrt();
            assert!((r - RADIUS as f32).abs() < 1e-3, "vertex {i} at radius {r}");
        }
    }

    #[test]
    fn test_normals_are_unit_and_outward() {
        let out = build_ring_chunk(&patch(5), &ConstantHeight(0.0), None).unwrap();
        for i in 0..out.vertex_count() {
            let n = vec3_at(&out.normals, i);
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {i} length {}", n.length());
            let outward = radial(vec3_at(&out.positions, i));
            assert!(n.dot(outward) > 0.999, "normal {i} not outward: {n:?}");
        }
    }

    #[test]
    fn test_normals_stay_unit_on_rough_terrain() {
        let height = |ctx: &SampleContext<'_, ()>| (ctx.input.x * 0.2).sin() * 8.0;
        let out = build_ring_chunk(&patch(7), &height, None).unwrap();
        for i in 0..out.vertex_count() {
            let n = vec3_at(&out.normals, i);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_axial_coordinate_never_displaced() {
        let flat = build_ring_chunk(&patch(4), &ConstantHeight(0.0), None).unwrap();
        let raised = build_ring_chunk(&patch(4), &ConstantHeight(50.0), None).unwrap();
        for i in 0..flat.vertex_count() {
            assert_eq!(vec3_at(&flat.positions, i).y, vec3_at(&raised.positions, i).y);
        }
    }

    #[test]
    fn test_inverted_negates_displacement() {
        let base = patch(3);
        let flat = build_ring_chunk(&base, &ConstantHeight(0.0), None).unwrap();
        let out = build_ring_chunk(&base, &ConstantHeight(12.0), None).unwrap();
        let inward =
            build_ring_chunk(&base.clone().with_inverted(true), &ConstantHeight(12.0), None)
                .unwrap();
        for i in 0..flat.vertex_count() {
            let dir = radial(vec3_at(&flat.positions, i));
            let up = vec3_at(&out.positions, i) - vec3_at(&flat.positions, i);
            let down = vec3_at(&inward.positions, i) - vec3_at(&flat.positions, i);
            assert!((up.dot(dir) - 12.0).abs() < 1e-2);
            assert!((down.dot(dir) + 12.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_uvs_follow_position() {
        let out = build_ring_chunk(&patch(2), &ConstantHeight(3.0), None).unwrap();
        for i in 0..out.vertex_count() {
            let p = vec3_at(&out.positions, i);
            assert_eq!(out.uvs.element(i, 2), &[p.x / UV_TILING, p.y / UV_TILING]);
        }
    }

    #[test]
    fn test_tangents_default() {
        let out = build_ring_chunk(&patch(2), &ConstantHeight(0.0), None).unwrap();
        for i in 0..out.vertex_count() {
            assert_eq!(out.tangents.element(i, 4), &TANGENT);
        }
    }

    #[test]
    fn test_default_and_generated_colors() {
        let white = build_ring_chunk(&patch(2), &ConstantHeight(1.0), None).unwrap();
        assert!(white.colors.iter().all(|&c| c == 1.0));

        let color = |ctx: &ColorContext<'_, ()>| Color::Rgba([0.2, 0.4, 0.6, ctx.height as f32]);
        let tinted = build_ring_chunk(&patch(2), &ConstantHeight(0.5), Some(&color)).unwrap();
        for i in 0..tinted.vertex_count() {
            assert_eq!(tinted.colors.element(i, 4), &[0.2, 0.4, 0.6, 0.5]);
        }
    }

    #[test]
    fn test_first_triangle_matches_grid_winding() {
        // Resolution 1: vertices (0,0), (0,1), (1,0), (1,1); triangle A = 0, 3, 1.
        let out = build_ring_chunk(&patch(1), &ConstantHeight(0.0), None).unwrap();
        let a0 = vec3_at(&out.positions, 0);
        let a1 = vec3_at(&out.positions, 1);
        let a2 = vec3_at(&out.positions, 2);
        assert!(a0.x < 0.0 && a0.y < 0.0, "(0,0) corner first: {a0:?}");
        assert!(a1.x > 0.0 && a1.y > 0.0, "(1,1) corner second: {a1:?}");
        assert!(a2.x < 0.0 && a2.y > 0.0, "(0,1) corner third: {a2:?}");
    }

    #[test]
    fn test_builds_are_deterministic() {
        let height = |ctx: &SampleContext<'_, ()>| {
            (ctx.input.x * 0.05).sin() * (ctx.input.y * 0.11).cos() * 30.0
        };
        let builder = RingChunkBuilder::<()>::new(Arc::new(height));
        let p = patch(10).with_offset(DVec3::new(-80.0, 300.0, 0.0));
        let first = builder.build(&p).unwrap();
        let second = builder.build(&p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.normals.as_bytes(), second.normals.as_bytes());
    }

    #[test]
    fn test_zero_ring_height_rejected() {
        let p = patch(2).with_height(0.0);
        let result = build_ring_chunk(&p, &ConstantHeight(0.0), None);
        assert_eq!(result, Err(ChunkError::InvalidHeight(0.0)));
    }

    #[test]
    fn test_oversized_resolution_rejected() {
        let p = patch(u32::MAX);
        let result = build_ring_chunk(&p, &ConstantHeight(0.0), None);
        assert_eq!(result, Err(ChunkError::InvalidResolution(u32::MAX)));
    }
}
