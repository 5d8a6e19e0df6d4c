//! Chunked procedural terrain meshes: cube-to-sphere point clouds, cube-to-cylinder
//! triangle meshes, and the flat buffer layout handed to the renderer.

mod buffers;
mod color;
mod descriptor;
mod error;
mod generator;

pub mod indexing;
pub mod pipeline;
pub mod ring;
pub mod sphere;

pub use buffers::{
    ChunkBuffers, FloatBuffer, RingChunkBuffers, STRIDE_UV, STRIDE_VEC3, STRIDE_VEC4,
    SphereChunkBuffers,
};
pub use color::Color;
pub use descriptor::{MAX_RESOLUTION, PatchDescriptor};
pub use error::ChunkError;
pub use generator::{ColorContext, ColorGenerator, ConstantHeight, HeightGenerator, SampleContext};
pub use indexing::{accumulate_normals, deindex, grid_indices};
pub use pipeline::{ChunkBuildPipeline, ChunkBuildResult, ChunkBuildTask, ChunkShape};
pub use ring::{RingChunkBuilder, UV_TILING, build_ring_chunk};
pub use sphere::{SphereChunkBuilder, build_sphere_chunk, samples_per_axis};
