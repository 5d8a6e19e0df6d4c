//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use worldsmith_terrain::{GeneratorSettings, PlanetKind, units};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The planet sphere chunks are built on.
    pub planet: PlanetConfig,
    /// The ring-world ring chunks are built on.
    pub ring: RingConfig,
    /// Per-chunk sampling settings shared by both shapes.
    pub chunk: ChunkConfig,
    /// Background build pool sizing.
    pub pipeline: PipelineConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Generator family.
    pub kind: PlanetKind,
    /// World seed.
    pub seed: String,
    /// Planet radius in meters.
    pub radius_m: f64,
    /// Sea level relative to the base radius, in meters.
    pub sea_level_m: f64,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            kind: PlanetKind::Terran,
            seed: "worldsmith".to_string(),
            radius_m: units::EARTH_RADIUS,
            sea_level_m: 0.0,
        }
    }
}

impl PlanetConfig {
    /// Generator data for this planet.
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            seed: self.seed.clone(),
            radius: self.radius_m,
            sea_level: self.sea_level_m,
        }
    }
}

/// Ring-world configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    /// Generator family for the inner surface.
    pub kind: PlanetKind,
    /// Distance from the spin axis to the surface, in meters.
    pub radius_m: f64,
    /// Axial extent of one chunk, in meters.
    pub chunk_length_m: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            kind: PlanetKind::Simple,
            radius_m: 100_000.0,
            chunk_length_m: 10_000.0,
        }
    }
}

/// Chunk sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkConfig {
    /// Grid cells per chunk edge.
    pub resolution: u32,
    /// Chunk edge length in meters.
    pub width_m: f64,
    /// Displace inward instead of outward.
    pub inverted: bool,
    /// Chunks per side of the square block the demo builds.
    pub grid: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            resolution: 32,
            width_m: 10_000.0,
            inverted: false,
            grid: 3,
        }
    }
}

/// Build pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker thread count (0 = one per core, minus one).
    pub workers: usize,
    /// Maximum queued plus running builds (0 = four per worker).
    pub budget: usize,
}

impl PipelineConfig {
    /// Worker count with `0` resolved against `available` cores.
    pub fn resolved_workers(&self, available: usize) -> usize {
        if self.workers == 0 {
            available.saturating_sub(1).max(1)
        } else {
            self.workers
        }
    }

    /// In-flight budget with `0` resolved against the worker count.
    pub fn resolved_budget(&self, workers: usize) -> usize {
        if self.budget == 0 {
            workers * 4
        } else {
            self.budget
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for worldsmith, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("worldsmith"))
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is not a positive finite length"),
        })
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values no chunk could be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk.resolution == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chunk.resolution",
                reason: "must be at least 1".to_string(),
            });
        }
        positive("chunk.width_m", self.chunk.width_m)?;
        positive("planet.radius_m", self.planet.radius_m)?;
        positive("ring.radius_m", self.ring.radius_m)?;
        positive("ring.chunk_length_m", self.ring.chunk_length_m)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("resolution: 32"));
        assert!(ron_str.contains("kind: \"terran\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(planet: (kind: \"lunar\"), chunk: (resolution: 8))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.planet.kind, PlanetKind::Lunar);
        assert_eq!(config.planet.seed, "worldsmith");
        assert_eq!(config.chunk.resolution, 8);
        assert_eq!(config.chunk.width_m, 10_000.0);
        assert_eq!(config.ring, RingConfig::default());
        assert_eq!(config.pipeline, PipelineConfig::default());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let config: Config = ron::from_str("(planet: (kind: \"strange\"))").unwrap();
        assert_eq!(config.planet.kind, PlanetKind::Simple);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.planet.seed = "ceres".to_string();
        config.planet.radius_m = units::CERES_RADIUS;
        config.chunk.inverted = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.chunk.resolution = 64;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().chunk.resolution, 64);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.chunk.resolution = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "chunk.resolution", .. })
        ));

        let mut config = Config::default();
        config.ring.radius_m = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ring.radius_m"));
    }

    #[test]
    fn test_pipeline_zero_means_auto() {
        let pipeline = PipelineConfig::default();
        assert_eq!(pipeline.resolved_workers(8), 7);
        assert_eq!(pipeline.resolved_workers(1), 1);
        assert_eq!(pipeline.resolved_budget(3), 12);

        let fixed = PipelineConfig { workers: 2, budget: 5 };
        assert_eq!(fixed.resolved_workers(8), 2);
        assert_eq!(fixed.resolved_budget(2), 5);
    }

    #[test]
    fn test_generator_settings_follow_planet() {
        let planet = PlanetConfig {
            seed: "mars".to_string(),
            radius_m: units::MARS_RADIUS,
            ..PlanetConfig::default()
        };
        let settings = planet.generator_settings();
        assert_eq!(settings.seed, "mars");
        assert_eq!(settings.radius, units::MARS_RADIUS);
    }
}
