//! The immutable description of one chunk build.

use glam::{DMat4, DVec3};

use crate::ChunkError;

/// Largest accepted quad count per axis. Keeps the skirt-padded sample count
/// and the `u32` grid indices of a single chunk in range.
pub const MAX_RESOLUTION: u32 = 4096;

/// Everything a builder needs to know about the patch it is sampling.
///
/// The patch lives in a local tangent-plane frame whose origin sits on the
/// surface; `world_matrix` carries that frame into the space the noise is
/// sampled in. `data` is handed through untouched to the generators.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchDescriptor<D> {
    /// Sphere or cylinder radius in world units.
    pub radius: f64,
    /// Offset of the patch centre in the local frame.
    pub offset: DVec3,
    /// Extent of the patch along local X.
    pub width: f64,
    /// Extent of the patch along the cylinder axis (local Y). Ring chunks only.
    pub height: f64,
    /// Number of quads per axis.
    pub resolution: u32,
    /// Local-to-world transform. Never mutated by the builders.
    pub world_matrix: DMat4,
    /// World-space origin of the body the chunk belongs to.
    pub origin: DVec3,
    /// Displace inwards instead of outwards (hollow worlds).
    pub inverted: bool,
    /// Generator-specific payload.
    pub data: D,
}

impl<D> PatchDescriptor<D> {
    /// A square patch centred on the local origin with an identity transform.
    pub fn new(radius: f64, width: f64, resolution: u32, data: D) -> Self {
        Self {
            radius,
            offset: DVec3::ZERO,
            width,
            height: width,
            resolution,
            world_matrix: DMat4::IDENTITY,
            origin: DVec3::ZERO,
            inverted: false,
            data,
        }
    }

    /// Set the patch offset in the local frame.
    #[must_use]
    pub fn with_offset(mut self, offset: DVec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set the axial extent used by ring chunks.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the local-to-world transform.
    #[must_use]
    pub fn with_world_matrix(mut self, world_matrix: DMat4) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    /// Set the world-space origin of the owning body.
    #[must_use]
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// Set whether displacement points inwards.
    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// `-1.0` for inverted patches, `1.0` otherwise.
    #[inline]
    pub fn displacement_sign(&self) -> f64 {
        if self.inverted { -1.0 } else { 1.0 }
    }

    /// Check the fields shared by both chunk shapes.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.resolution == 0 || self.resolution > MAX_RESOLUTION {
            return Err(ChunkError::InvalidResolution(self.resolution));
        }
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(ChunkError::InvalidWidth(self.width));
        }
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ChunkError::InvalidRadius(self.radius));
        }
        if !self.world_matrix.is_finite() {
            return Err(ChunkError::NonFiniteTransform);
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the ring-only axial extent.
    pub fn validate_ring(&self) -> Result<(), ChunkError> {
        self.validate()?;
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(ChunkError::InvalidHeight(self.height));
        }
        Ok(())
    }
}
