//! Planet kinds, selectable by name in config files and on the command line.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The family of generators a world is built with.
///
/// Parsing never fails: unknown names fall back to [`PlanetKind::Simple`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanetKind {
    /// Warped continents with mountains, coloured by altitude, and oceans.
    Terran,
    /// Airless cratered rock.
    Lunar,
    /// A world almost entirely below sea level.
    Ocean,
    /// Plain rolling noise in white.
    #[default]
    Simple,
}

impl PlanetKind {
    /// All kinds, in declaration order.
    pub const ALL: [PlanetKind; 4] = [Self::Terran, Self::Lunar, Self::Ocean, Self::Simple];

    /// Lowercase name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Terran => "terran",
            Self::Lunar => "lunar",
            Self::Ocean => "ocean",
            Self::Simple => "simple",
        }
    }

    /// Case-insensitive lookup. `dwarf` is accepted as an alias for lunar.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "terran" => Self::Terran,
            "lunar" | "dwarf" => Self::Lunar,
            "ocean" => Self::Ocean,
            _ => Self::Simple,
        }
    }
}

impl fmt::Display for PlanetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanetKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for PlanetKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<PlanetKind> for String {
    fn from(kind: PlanetKind) -> Self {
        kind.name().to_owned()
    }
}
