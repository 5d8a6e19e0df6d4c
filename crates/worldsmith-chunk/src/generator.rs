//! Height and color generator contracts.
//!
//! Generators are pure functions of their context. They are shared between
//! worker threads, so both traits require `Send + Sync`, and any closure with
//! the right signature is a generator.

use glam::DVec3;

use crate::{Color, PatchDescriptor};

/// What a height generator sees for one grid sample.
#[derive(Debug)]
pub struct SampleContext<'a, D> {
    /// World-space sample point. Noise must be keyed on this so neighbouring
    /// chunks agree along shared edges.
    pub input: DVec3,
    /// World-space sample point (same as `input` for height queries).
    pub world_position: DVec3,
    /// Grid resolution as seen by the generator. Sphere chunks report their
    /// padded resolution (`resolution + 2`).
    pub resolution: u32,
    /// The patch being built.
    pub patch: &'a PatchDescriptor<D>,
}

impl<D> SampleContext<'_, D> {
    /// Radius of the body being sampled.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.patch.radius
    }

    /// Generator-specific payload.
    #[inline]
    pub fn data(&self) -> &D {
        &self.patch.data
    }
}

impl<D> Clone for SampleContext<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for SampleContext<'_, D> {}

/// What a color generator sees: the height sample plus the height it produced.
///
/// `input` is `(world.x, world.y, height)`; `world_position` is the
/// undisplaced world sample point.
#[derive(Debug)]
pub struct ColorContext<'a, D> {
    /// `(world.x, world.y, height)`.
    pub input: DVec3,
    /// World-space sample point.
    pub world_position: DVec3,
    /// Terrain height returned by the height generator.
    pub height: f64,
    /// Grid resolution as seen by the generator.
    pub resolution: u32,
    /// The patch being built.
    pub patch: &'a PatchDescriptor<D>,
}

impl<'a, D> ColorContext<'a, D> {
    pub(crate) fn from_sample(sample: &SampleContext<'a, D>, height: f64) -> Self {
        Self {
            input: DVec3::new(sample.world_position.x, sample.world_position.y, height),
            world_position: sample.world_position,
            height,
            resolution: sample.resolution,
            patch: sample.patch,
        }
    }

    /// Radius of the body being sampled.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.patch.radius
    }

    /// Generator-specific payload.
    #[inline]
    pub fn data(&self) -> &D {
        &self.patch.data
    }
}

/// Scalar terrain height at a world-space point.
///
/// Non-finite results are not checked; they end up in the output buffers as-is.
pub trait HeightGenerator<D>: Send + Sync {
    /// Height above the base surface, in world units.
    fn height(&self, ctx: &SampleContext<'_, D>) -> f64;
}

impl<D, F> HeightGenerator<D> for F
where
    F: Fn(&SampleContext<'_, D>) -> f64 + Send + Sync,
{
    #[inline]
    fn height(&self, ctx: &SampleContext<'_, D>) -> f64 {
        self(ctx)
    }
}

/// Vertex color for a sampled point.
pub trait ColorGenerator<D>: Send + Sync {
    /// Color for the sample, given the height already computed for it.
    fn color(&self, ctx: &ColorContext<'_, D>) -> Color;
}

impl<D, F> ColorGenerator<D> for F
where
    F: Fn(&ColorContext<'_, D>) -> Color + Send + Sync,
{
    #[inline]
    fn color(&self, ctx: &ColorContext<'_, D>) -> Color {
        self(ctx)
    }
}

/// The same height everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantHeight(pub f64);

impl<D> HeightGenerator<D> for ConstantHeight {
    #[inline]
    fn height(&self, _ctx: &SampleContext<'_, D>) -> f64 {
        self.0
    }
}

/// Sample the color generator, falling back to opaque white.
#[inline]
pub(crate) fn sample_color<D>(
    color_gen: Option<&dyn ColorGenerator<D>>,
    sample: &SampleContext<'_, D>,
    height: f64,
) -> [f32; 4] {
    match color_gen {
        Some(generator) => generator
            .color(&ColorContext::from_sample(sample, height))
            .to_rgba(),
        None => Color::WHITE.to_rgba(),
    }
}
