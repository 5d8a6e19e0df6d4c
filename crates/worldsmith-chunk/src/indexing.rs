//! Grid triangulation, smooth normals, and de-indexing.

use glam::Vec3;

use crate::buffers::{FloatBuffer, STRIDE_VEC3};

/// Triangle indices for a `(resolution + 1)²` vertex grid laid out with the
/// first grid axis outermost.
///
/// Each quad `(i, j)` emits two triangles:
///
/// ```text
/// A = (i, j), (i+1, j+1), (i, j+1)
/// B = (i+1, j), (i+1, j+1), (i, j)
/// ```
///
/// which winds counter-clockwise when viewed from outside the cylinder.
pub fn grid_indices(resolution: u32) -> Vec<u32> {
    let row = resolution + 1;
    let mut indices = Vec::with_capacity(resolution as usize * resolution as usize * 6);
    for i in 0..resolution {
        for j in 0..resolution {
            indices.extend_from_slice(&[
                i * row + j,
                (i + 1) * row + j + 1,
                i * row + j + 1,
                (i + 1) * row + j,
                (i + 1) * row + j + 1,
                i * row + j,
            ]);
        }
    }
    indices
}

/// Area-weighted smooth vertex normals.
///
/// For every triangle `(v1, v2, v3)` the unnormalized face normal
/// `(v3 - v2) × (v1 - v2)` is added to all three vertices; the sums are then
/// normalized. Vertices touched by no (or only degenerate) triangles keep a
/// zero normal.
pub fn accumulate_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex = |i: u32| Vec3::from_slice(&positions[i as usize * STRIDE_VEC3..]);
    let mut sums = vec![Vec3::ZERO; positions.len() / STRIDE_VEC3];

    for tri in indices.chunks_exact(3) {
        let (v1, v2, v3) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2]));
        let face = (v3 - v2).cross(v1 - v2);
        for &i in tri {
            sums[i as usize] += face;
        }
    }

    let mut normals = Vec::with_capacity(positions.len());
    for sum in sums {
        normals.extend_from_slice(&sum.normalize_or_zero().to_array());
    }
    normals
}

/// Expand an indexed attribute array into one element per index.
///
/// The result holds exactly `indices.len() * stride` floats.
pub fn deindex(src: &[f32], stride: usize, indices: &[u32]) -> FloatBuffer {
    let mut dst = FloatBuffer::zeroed(indices.len() * stride);
    for (slot, &index) in dst.as_mut_slice().chunks_exact_mut(stride).zip(indices) {
        let start = index as usize * stride;
        slot.copy_from_slice(&src[start..start + stride]);
    }
    dst
}
