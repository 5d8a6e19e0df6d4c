//! Background chunk builds: a fixed pool of worker threads that turn patch
//! descriptors into owned buffers and hand them back over a channel.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tracing::{trace, warn};

use crate::{
    ChunkBuffers, ChunkError, ColorGenerator, HeightGenerator, PatchDescriptor, RingChunkBuilder,
    SphereChunkBuilder,
};

/// Which surface a task samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkShape {
    /// Cube-sphere point grid with skirt.
    Sphere,
    /// Cylinder triangle mesh.
    Ring,
}

/// A self-contained build request. Owns its descriptor so no world state is
/// borrowed while the worker runs.
#[derive(Clone, Debug)]
pub struct ChunkBuildTask<D> {
    /// Caller-chosen key used to match results to chunks.
    pub id: u64,
    /// Surface to build on.
    pub shape: ChunkShape,
    /// The patch to sample.
    pub patch: PatchDescriptor<D>,
}

/// A finished build. Ownership of the buffers passes to whoever drains it.
#[derive(Debug)]
pub struct ChunkBuildResult {
    /// The id from the originating task.
    pub id: u64,
    /// The built buffers, or why the descriptor was rejected.
    pub outcome: Result<ChunkBuffers, ChunkError>,
    /// Wall time spent building, in microseconds.
    pub build_time_us: u64,
}

/// Thread pool that builds chunks off the calling thread.
///
/// Submit [`ChunkBuildTask`]s with [`submit`](Self::submit) and collect
/// [`ChunkBuildResult`]s with [`drain_results`](Self::drain_results). A caller
/// that no longer wants a chunk simply ignores its id when it comes back.
pub struct ChunkBuildPipeline<D> {
    task_sender: Option<Sender<ChunkBuildTask<D>>>,
    result_receiver: Receiver<ChunkBuildResult>,
    worker_handles: Vec<JoinHandle<()>>,
    budget: usize,
    in_flight: Arc<AtomicUsize>,
}

impl<D: Send + Sync + 'static> ChunkBuildPipeline<D> {
    /// Spawn `worker_count` threads sharing one generator pair.
    ///
    /// `budget` caps the number of queued plus running tasks.
    ///
    /// # Errors
    ///
    /// Fails if the OS refuses to spawn a worker thread.
    pub fn new(
        worker_count: usize,
        budget: usize,
        height: Arc<dyn HeightGenerator<D>>,
        color: Option<Arc<dyn ColorGenerator<D>>>,
    ) -> io::Result<Self> {
        let (task_tx, task_rx) = crossbeam_channel::bounded(budget.max(1));
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut sphere = SphereChunkBuilder::new(Arc::clone(&height));
        let mut ring = RingChunkBuilder::new(height);
        if let Some(color) = color {
            sphere = sphere.with_color(Arc::clone(&color));
            ring = ring.with_color(color);
        }

        let mut handles = Vec::with_capacity(worker_count);
        for index in 0..worker_count {
            let rx: Receiver<ChunkBuildTask<D>> = task_rx.clone();
            let tx = result_tx.clone();
            let sphere = sphere.clone();
            let ring = ring.clone();
            let flight = Arc::clone(&in_flight);

            let handle = std::thread::Builder::new()
                .name(format!("chunk-build-{index}"))
                .spawn(move || {
                    while let Ok(task) = rx.recv() {
                        let start = Instant::now();
                        let built = panic::catch_unwind(AssertUnwindSafe(|| match task.shape {
                            ChunkShape::Sphere => {
                                sphere.build(&task.patch).map(ChunkBuffers::Sphere)
                            }
                            ChunkShape::Ring => ring.build(&task.patch).map(ChunkBuffers::Ring),
                        }));
                        let outcome = built.unwrap_or_else(|_| {
                            warn!(id = task.id, "generator panicked during chunk build");
                            Err(ChunkError::GeneratorPanicked)
                        });
                        let build_time_us = start.elapsed().as_micros() as u64;
                        trace!(id = task.id, build_time_us, "chunk build finished");

                        let _ = tx.send(ChunkBuildResult {
                            id: task.id,
                            outcome,
                            build_time_us,
                        });
                        flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })?;
            handles.push(handle);
        }

        Ok(Self {
            task_sender: Some(task_tx),
            result_receiver: result_rx,
            worker_handles: handles,
            budget,
            in_flight,
        })
    }

    /// A pool sized to the machine, leaving a core for the caller.
    pub fn with_defaults(
        height: Arc<dyn HeightGenerator<D>>,
        color: Option<Arc<dyn ColorGenerator<D>>>,
    ) -> io::Result<Self> {
        let workers = num_cpus::get().saturating_sub(1).max(1);
        Self::new(workers, workers * 4, height, color)
    }
}

impl<D> ChunkBuildPipeline<D> {
    /// Queue a build. Returns `false` if the budget is exhausted or the
    /// pipeline has been shut down.
    pub fn submit(&self, task: ChunkBuildTask<D>) -> bool {
        let Some(sender) = &self.task_sender else {
            return false;
        };
        if self.in_flight.load(Ordering::Relaxed) >= self.budget {
            return false;
        }
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        if sender.try_send(task).is_err() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Collect every finished build without blocking.
    pub fn drain_results(&self) -> Vec<ChunkBuildResult> {
        self.result_receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the next finished build.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ChunkBuildResult> {
        self.result_receiver.recv_timeout(timeout).ok()
    }

    /// Tasks queued or running.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Number of worker threads still attached.
    pub fn worker_count(&self) -> usize {
        self.worker_handles.len()
    }

    /// Close the task channel and join every worker.
    pub fn shutdown(&mut self) {
        self.task_sender.take();
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl<D> Drop for ChunkBuildPipeline<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
