//! Demo binary that builds a block of sphere chunks and ring chunks through
//! the background pipeline and reports what came back.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p worldsmith-demo -- --kind lunar --resolution 64`.

mod layout;

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};
use worldsmith_chunk::{
    ChunkBuildPipeline, ChunkBuildResult, ChunkBuildTask, ChunkShape, PatchDescriptor,
};
use worldsmith_config::{CliArgs, Config, default_config_dir};
use worldsmith_terrain::{GeneratorSet, GeneratorSettings};

/// Totals for one batch of builds.
#[derive(Debug, Default)]
struct BuildStats {
    built: usize,
    failed: usize,
    vertices: usize,
    bytes: usize,
    total_us: u64,
    slowest_us: u64,
}

impl BuildStats {
    fn record(&mut self, result: ChunkBuildResult) {
        match result.outcome {
            Ok(buffers) => {
                self.built += 1;
                self.vertices += buffers.vertex_count();
                self.bytes += buffers.byte_size();
                self.total_us += result.build_time_us;
                self.slowest_us = self.slowest_us.max(result.build_time_us);
            }
            Err(e) => {
                self.failed += 1;
                warn!(id = result.id, error = %e, "chunk build rejected");
            }
        }
    }

    fn finished(&self) -> usize {
        self.built + self.failed
    }

    fn mean_us(&self) -> u64 {
        if self.built == 0 {
            0
        } else {
            self.total_us / self.built as u64
        }
    }
}

/// Feed every patch through the pipeline, respecting its budget, and wait for
/// all results. The budget is always at least one, so a rejected submit only
/// means the pool is busy.
fn build_all(
    pipeline: &ChunkBuildPipeline<GeneratorSettings>,
    shape: ChunkShape,
    patches: Vec<PatchDescriptor<GeneratorSettings>>,
) -> BuildStats {
    let total = patches.len();
    let mut queue: VecDeque<_> = patches
        .into_iter()
        .enumerate()
        .map(|(id, patch)| ChunkBuildTask {
            id: id as u64,
            shape,
            patch,
        })
        .collect();
    let mut stats = BuildStats::default();

    while stats.finished() < total {
        while let Some(task) = queue.front() {
            if !pipeline.submit(task.clone()) {
                break;
            }
            queue.pop_front();
        }

        if let Some(result) = pipeline.recv_timeout(Duration::from_millis(100)) {
            stats.record(result);
        }
    }

    stats
}

fn report(shape: ChunkShape, kind: impl std::fmt::Display, stats: &BuildStats, elapsed: Duration) {
    info!(
        ?shape,
        %kind,
        built = stats.built,
        failed = stats.failed,
        vertices = stats.vertices,
        kib = stats.bytes / 1024,
        mean_us = stats.mean_us(),
        slowest_us = stats.slowest_us,
        wall_ms = elapsed.as_millis() as u64,
        "batch complete"
    );
}

fn run(config: &Config) -> io::Result<()> {
    let workers = config.pipeline.resolved_workers(num_cpus::get());
    let budget = config.pipeline.resolved_budget(workers);
    info!(workers, budget, resolution = config.chunk.resolution, "starting chunk builds");

    let planet = GeneratorSet::for_kind(config.planet.kind, &config.planet.generator_settings());
    let pipeline =
        ChunkBuildPipeline::new(workers, budget, planet.height.clone(), planet.color.clone())?;
    let start = Instant::now();
    let stats = build_all(&pipeline, ChunkShape::Sphere, layout::sphere_patches(config));
    report(ChunkShape::Sphere, planet.kind, &stats, start.elapsed());
    drop(pipeline);

    let ring_settings = GeneratorSettings {
        radius: config.ring.radius_m,
        ..config.planet.generator_settings()
    };
    let ring = GeneratorSet::for_kind(config.ring.kind, &ring_settings);
    let pipeline =
        ChunkBuildPipeline::new(workers, budget, ring.height.clone(), ring.color.clone())?;
    let start = Instant::now();
    let stats = build_all(&pipeline, ChunkShape::Ring, layout::ring_patches(config));
    report(ChunkShape::Ring, ring.kind, &stats, start.elapsed());

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from(".worldsmith"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) =
        worldsmith_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "refusing to build");
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "could not start build workers");
            ExitCode::FAILURE
        }
    }
}
