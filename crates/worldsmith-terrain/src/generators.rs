//! The generator table: one height/colour pair per [`PlanetKind`], chosen once
//! when a world is configured.

use std::fmt;
use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use worldsmith_chunk::{
    Color, ColorContext, ColorGenerator, HeightGenerator, RingChunkBuilder, SampleContext,
    SphereChunkBuilder,
};

use crate::units::EARTH_RADIUS;
use crate::{
    Crater, LinearSpline, Noise, NoiseParams, PlanetKind, crater_height, remap, scatter_craters,
};

/// Per-world generator data, carried as the patch payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// World seed. Every noise source derives its own seed from this.
    pub seed: String,
    /// Planet or ring radius in metres.
    pub radius: f64,
    /// Heights at or below this are water.
    pub sea_level: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: "worldsmith".to_owned(),
            radius: EARTH_RADIUS,
            sea_level: 0.0,
        }
    }
}

impl GeneratorSettings {
    fn noise(&self, name: &str) -> NoiseParams {
        NoiseParams::seeded(format!("{}/{name}", self.seed))
    }
}

/// Shared height generator over [`GeneratorSettings`].
pub type SharedHeight = Arc<dyn HeightGenerator<GeneratorSettings>>;
/// Shared colour generator over [`GeneratorSettings`].
pub type SharedColor = Arc<dyn ColorGenerator<GeneratorSettings>>;

/// The generators for one world.
#[derive(Clone)]
pub struct GeneratorSet {
    /// Which table entry produced this set.
    pub kind: PlanetKind,
    /// Height source.
    pub height: SharedHeight,
    /// Colour source. `None` leaves chunks white.
    pub color: Option<SharedColor>,
}

impl GeneratorSet {
    /// Build the generators for `kind`. Noise tables and crater fields are
    /// created here, so sampling does no setup work.
    pub fn for_kind(kind: PlanetKind, settings: &GeneratorSettings) -> Self {
        let (height, color): (SharedHeight, Option<SharedColor>) = match kind {
            PlanetKind::Terran => (
                Arc::new(TerranHeight::new(settings)),
                Some(Arc::new(TerranColor::new(settings))),
            ),
            PlanetKind::Lunar => (
                Arc::new(LunarHeight::new(settings)),
                Some(Arc::new(LunarColor::new(settings))),
            ),
            PlanetKind::Ocean => (
                Arc::new(OceanHeight::new(settings)),
                Some(Arc::new(OceanColor::new(settings))),
            ),
            PlanetKind::Simple => (Arc::new(SimpleHeight::new(settings)), None),
        };
        debug!(%kind, seed = %settings.seed, radius = settings.radius, "generator set ready");
        Self {
            kind,
            height,
            color,
        }
    }

    /// A sphere chunk builder bound to this set.
    pub fn sphere_builder(&self) -> SphereChunkBuilder<GeneratorSettings> {
        let builder = SphereChunkBuilder::new(Arc::clone(&self.height));
        match &self.color {
            Some(color) => builder.with_color(Arc::clone(color)),
            None => builder,
        }
    }

    /// A ring chunk builder bound to this set.
    pub fn ring_builder(&self) -> RingChunkBuilder<GeneratorSettings> {
        let builder = RingChunkBuilder::new(Arc::clone(&self.height));
        match &self.color {
            Some(color) => builder.with_color(Arc::clone(color)),
            None => builder,
        }
    }
}

impl fmt::Debug for GeneratorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSet")
            .field("kind", &self.kind)
            .field("colored", &self.color.is_some())
            .finish()
    }
}

fn color_or_white(spline: &LinearSpline<Color>, key: f64) -> Color {
    spline.get(key).unwrap_or(Color::WHITE)
}

// ---------------------------------------------------------------------------
// Terran
// ---------------------------------------------------------------------------

/// Domain-warped continents: a broad mask plus mountains gated by a
/// single-octave copy of the mask.
struct TerranHeight {
    warp: Noise,
    mountains: Noise,
    hills: Noise,
    mask: Noise,
    mask_gate: Noise,
}

fn terran_warp(settings: &GeneratorSettings) -> Noise {
    Noise::new(NoiseParams {
        octaves: 8,
        height: 10_000.0,
        scale: settings.radius / 2.0,
        ..settings.noise("apple")
    })
}

impl TerranHeight {
    fn new(settings: &GeneratorSettings) -> Self {
        let r = settings.radius;
        Self {
            warp: terran_warp(settings),
            mountains: Noise::new(NoiseParams {
                height: 20_000.0,
                scale: r / 75.0,
                ..settings.noise("blip")
            }),
            hills: Noise::new(NoiseParams {
                height: 10_000.0,
                scale: r / 3.0,
                ..settings.noise("blarp")
            }),
            mask: Noise::new(NoiseParams {
                height: 10_000.0,
                scale: r,
                ..settings.noise("mask")
            }),
            mask_gate: Noise::new(NoiseParams {
                octaves: 1,
                height: 1.0,
                scale: r,
                ..settings.noise("mask")
            }),
        }
    }
}

impl HeightGenerator<GeneratorSettings> for TerranHeight {
    fn height(&self, ctx: &SampleContext<'_, GeneratorSettings>) -> f64 {
        let w = self.warp.get_vec(ctx.input);
        let p = ctx.input + DVec3::splat(w);
        let m = self.mountains.get_vec(p);
        let n = self.hills.get_vec(p);
        let mask = self.mask.get_vec(p);
        let gate = self.mask_gate.get_vec(p);
        mask + (n + m) * gate * (n / 100.0)
    }
}

/// Altitude ramp from lowland green to bare rock, with warped coastlines.
struct TerranColor {
    warp: Noise,
    land: LinearSpline<Color>,
    ocean: Color,
    sea_level: f64,
}

impl TerranColor {
    fn new(settings: &GeneratorSettings) -> Self {
        let land = LinearSpline::colors()
            .with_point(0.0, Color::from_hex(0x37a726))
            .with_point(0.05, Color::from_hex(0x214711))
            .with_point(0.4, Color::from_hex(0x526b48))
            .with_point(0.9, Color::from_hex(0xab7916))
            .with_point(1.0, Color::from_hex(0xbab3a2));
        Self {
            warp: terran_warp(settings),
            land,
            ocean: Color::from_hex(0x2b65ec),
            sea_level: settings.sea_level,
        }
    }
}

impl ColorGenerator<GeneratorSettings> for TerranColor {
    fn color(&self, ctx: &ColorContext<'_, GeneratorSettings>) -> Color {
        let warped = ctx.height + self.warp.get_vec(ctx.input);
        if warped > self.sea_level {
            let altitude = ctx.height - self.sea_level;
            color_or_white(&self.land, remap(altitude, 0.0, 5_000.0, 0.0, 1.0))
        } else {
            self.ocean
        }
    }
}

// ---------------------------------------------------------------------------
// Lunar
// ---------------------------------------------------------------------------

const LUNAR_CRATER_COUNT: usize = 96;

/// Low regolith noise pocked by a fixed crater field.
struct LunarHeight {
    regolith: Noise,
    terrace: Noise,
    craters: Vec<Crater>,
}

impl LunarHeight {
    fn new(settings: &GeneratorSettings) -> Self {
        let r = settings.radius;
        Self {
            regolith: Noise::new(NoiseParams {
                height: 3_000.0,
                exponentiation: 2.0,
                scale: r / 4.0,
                ..settings.noise("regolith")
            }),
            terrace: Noise::new(NoiseParams {
                octaves: 2,
                height: 1.0,
                exponentiation: 1.0,
                scale: r / 20.0,
                ..settings.noise("terrace")
            }),
            craters: scatter_craters(&format!("{}/craters", settings.seed), r, LUNAR_CRATER_COUNT),
        }
    }
}

impl HeightGenerator<GeneratorSettings> for LunarHeight {
    fn height(&self, ctx: &SampleContext<'_, GeneratorSettings>) -> f64 {
        self.regolith.get_vec(ctx.input)
            + crater_height(ctx.input, &self.craters, Some(&self.terrace))
    }
}

/// Dark maria in crater floors, pale highlands.
struct LunarColor {
    ramp: LinearSpline<Color>,
    low: f64,
    high: f64,
}

impl LunarColor {
    fn new(settings: &GeneratorSettings) -> Self {
        Self {
            ramp: LinearSpline::colors()
                .with_point(0.0, Color::from_hex(0x2e2e33))
                .with_point(0.5, Color::from_hex(0x77777a))
                .with_point(1.0, Color::from_hex(0xc9c6bf)),
            low: -0.02 * settings.radius,
            high: 0.005 * settings.radius,
        }
    }
}

impl ColorGenerator<GeneratorSettings> for LunarColor {
    fn color(&self, ctx: &ColorContext<'_, GeneratorSettings>) -> Color {
        color_or_white(&self.ramp, remap(ctx.height, self.low, self.high, 0.0, 1.0))
    }
}

// ---------------------------------------------------------------------------
// Ocean
// ---------------------------------------------------------------------------

/// How far below sea level the abyssal plain sits.
const OCEAN_DEPTH: f64 = 2_500.0;

/// A shallow swell with rare island peaks breaking the surface.
struct OceanHeight {
    swell: Noise,
    islands: Noise,
    sea_level: f64,
}

impl OceanHeight {
    fn new(settings: &GeneratorSettings) -> Self {
        let r = settings.radius;
        Self {
            swell: Noise::new(NoiseParams {
                height: 2_000.0,
                exponentiation: 1.0,
                scale: r / 5.0,
                ..settings.noise("swell")
            }),
            islands: Noise::new(NoiseParams {
                height: 4_000.0,
                exponentiation: 6.0,
                scale: r / 10.0,
                ..settings.noise("islands")
            }),
            sea_level: settings.sea_level,
        }
    }
}

impl HeightGenerator<GeneratorSettings> for OceanHeight {
    fn height(&self, ctx: &SampleContext<'_, GeneratorSettings>) -> f64 {
        let p = ctx.input;
        self.sea_level - OCEAN_DEPTH + self.swell.get_vec(p) + self.islands.get_vec(p)
    }
}

/// Depth-shaded water, sand above the waterline.
struct OceanColor {
    depth: LinearSpline<Color>,
    sand: Color,
    sea_level: f64,
}

impl OceanColor {
    fn new(settings: &GeneratorSettings) -> Self {
        Self {
            depth: LinearSpline::colors()
                .with_point(0.0, Color::from_hex(0x0b2545))
                .with_point(1.0, Color::from_hex(0x2b65ec)),
            sand: Color::from_hex(0xc2b280),
            sea_level: settings.sea_level,
        }
    }
}

impl ColorGenerator<GeneratorSettings> for OceanColor {
    fn color(&self, ctx: &ColorContext<'_, GeneratorSettings>) -> Color {
        if ctx.height > self.sea_level {
            return self.sand;
        }
        let floor = self.sea_level - OCEAN_DEPTH;
        color_or_white(&self.depth, remap(ctx.height, floor, self.sea_level, 0.0, 1.0))
    }
}

// ---------------------------------------------------------------------------
// Simple
// ---------------------------------------------------------------------------

/// One default noise source scaled to the body.
struct SimpleHeight(Noise);

impl SimpleHeight {
    fn new(settings: &GeneratorSettings) -> Self {
        Self(Noise::new(NoiseParams {
            scale: settings.radius / 10.0,
            ..NoiseParams::seeded(settings.seed.clone())
        }))
    }
}

impl HeightGenerator<GeneratorSettings> for SimpleHeight {
    fn height(&self, ctx: &SampleContext<'_, GeneratorSettings>) -> f64 {
        self.0.get_vec(ctx.input)
    }
}
