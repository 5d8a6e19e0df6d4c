//! Flat vertex attribute buffers produced by the chunk builders.
//!
//! Every buffer is allocated once at its final size and never grows, so the
//! whole set can be moved to a render thread without copying.

use std::ops::Deref;

/// Positions, normals, up vectors and world coordinates.
pub const STRIDE_VEC3: usize = 3;
/// RGBA colors and tangents (xyz + handedness).
pub const STRIDE_VEC4: usize = 4;
/// Texture coordinates.
pub const STRIDE_UV: usize = 2;

/// A fixed-size run of `f32`s.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatBuffer(Box<[f32]>);

impl FloatBuffer {
    /// A buffer of `len` zeros.
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0.0; len].into_boxed_slice())
    }

    /// Number of floats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer holds no floats.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw bytes for GPU upload or shared-memory transfer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }

    /// Size in bytes.
    pub fn byte_size(&self) -> usize {
        self.0.len() * std::mem::size_of::<f32>()
    }

    /// The `index`-th element of a buffer laid out with `stride` floats per element.
    pub fn element(&self, index: usize, stride: usize) -> &[f32] {
        &self.0[index * stride..(index + 1) * stride]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }

    /// Overwrite the `index`-th element, whose stride is `values.len()`.
    pub(crate) fn set_element(&mut self, index: usize, values: &[f32]) {
        let stride = values.len();
        self.0[index * stride..(index + 1) * stride].copy_from_slice(values);
    }

    /// Give up the buffer, keeping its allocation.
    pub fn into_boxed_slice(self) -> Box<[f32]> {
        self.0
    }
}

impl Deref for FloatBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for FloatBuffer {
    fn from(values: Vec<f32>) -> Self {
        Self(values.into_boxed_slice())
    }
}

/// Output of a sphere chunk build: an un-triangulated point grid including
/// its one-sample skirt.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereChunkBuffers {
    /// Displaced chunk-local positions, 3 floats per vertex.
    pub positions: FloatBuffer,
    /// RGBA colors, 4 floats per vertex.
    pub colors: FloatBuffer,
    /// Displaced world-space coordinates, 3 floats per vertex.
    pub coords: FloatBuffer,
    /// Unit projection directions, 3 floats per vertex.
    pub up: FloatBuffer,
}

impl SphereChunkBuffers {
    pub(crate) fn with_vertex_count(count: usize) -> Self {
        Self {
            positions: FloatBuffer::zeroed(count * STRIDE_VEC3),
            colors: FloatBuffer::zeroed(count * STRIDE_VEC4),
            coords: FloatBuffer::zeroed(count * STRIDE_VEC3),
            up: FloatBuffer::zeroed(count * STRIDE_VEC3),
        }
    }

    /// Number of sampled points.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / STRIDE_VEC3
    }
}

/// Output of a ring chunk build: a de-indexed triangle list, three vertices
/// per triangle with no sharing.
#[derive(Clone, Debug, PartialEq)]
pub struct RingChunkBuffers {
    /// Displaced chunk-local positions, 3 floats per vertex.
    pub positions: FloatBuffer,
    /// RGBA colors, 4 floats per vertex.
    pub colors: FloatBuffer,
    /// Smoothed unit normals, 3 floats per vertex.
    pub normals: FloatBuffer,
    /// Tangents with handedness in `w`, 4 floats per vertex.
    pub tangents: FloatBuffer,
    /// Texture coordinates, 2 floats per vertex.
    pub uvs: FloatBuffer,
}

impl RingChunkBuffers {
    /// Number of emitted vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / STRIDE_VEC3
    }

    /// Number of emitted triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }
}

/// Either kind of chunk output, as delivered by the build pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum ChunkBuffers {
    /// Point grid from a sphere chunk.
    Sphere(SphereChunkBuffers),
    /// Triangle list from a ring chunk.
    Ring(RingChunkBuffers),
}

impl ChunkBuffers {
    /// Number of vertices in the position buffer.
    pub fn vertex_count(&self) -> usize {
        match self {
            ChunkBuffers::Sphere(buffers) => buffers.vertex_count(),
            ChunkBuffers::Ring(buffers) => buffers.vertex_count(),
        }
    }

    /// Total bytes across all attribute buffers.
    pub fn byte_size(&self) -> usize {
        match self {
            ChunkBuffers::Sphere(b) => {
                b.positions.byte_size()
                    + b.colors.byte_size()
                    + b.coords.byte_size()
                    + b.up.byte_size()
            }
            ChunkBuffers::Ring(b) => {
                b.positions.byte_size()
                    + b.colors.byte_size()
                    + b.normals.byte_size()
                    + b.tangents.byte_size()
                    + b.uvs.byte_size()
            }
        }
    }
}
