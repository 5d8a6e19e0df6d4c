//! Chunk build error types.

/// Why a chunk could not be built. Everything but [`GeneratorPanicked`](Self::GeneratorPanicked)
/// is a structural problem with a [`crate::PatchDescriptor`], reported before any sampling.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ChunkError {
    /// The grid needs between one and [`crate::MAX_RESOLUTION`] quads per axis.
    #[error("invalid resolution {0}: must be between 1 and {max}", max = crate::MAX_RESOLUTION)]
    InvalidResolution(u32),

    /// The patch width along the tangent plane.
    #[error("invalid width {0}: must be positive and finite")]
    InvalidWidth(f64),

    /// The axial extent of a ring patch.
    #[error("invalid height {0}: must be positive and finite")]
    InvalidHeight(f64),

    /// The planet or ring radius.
    #[error("invalid radius {0}: must be positive and finite")]
    InvalidRadius(f64),

    /// The local-to-world matrix contains NaN or infinite entries.
    #[error("world matrix contains non-finite entries")]
    NonFiniteTransform,

    /// A height or color generator panicked on a pipeline worker.
    #[error("generator panicked during chunk build")]
    GeneratorPanicked,
}
