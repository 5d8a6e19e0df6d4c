//! Procedural terrain sources for worldsmith chunks: seeded fBm noise, colour
//! splines, crater fields, and the per-planet-kind generator table.

mod craters;
mod fbm;
mod generators;
mod kind;
mod math;
mod spline;

pub mod units;

pub use craters::{Crater, crater_height, scatter_craters};
pub use fbm::{Noise, NoiseParams, hash_seed};
pub use generators::{GeneratorSet, GeneratorSettings, SharedColor, SharedHeight};
pub use kind::PlanetKind;
pub use math::{remap, smooth_max, smooth_min};
pub use spline::{Lerp, LinearSpline};
