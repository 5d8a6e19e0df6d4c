//! Configuration for worldsmith tools.
//!
//! Settings persist to disk as `config.ron`, every section falls back to its
//! defaults when missing, and command-line flags override individual fields.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    ChunkConfig, Config, DebugConfig, PipelineConfig, PlanetConfig, RingConfig, default_config_dir,
};
pub use error::ConfigError;
