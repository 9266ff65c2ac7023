//! Render coordinator: worker threads, start barrier and timing.

use std::io;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use lux_core::Scene;
use thiserror::Error;

use crate::barrier::{Crossing, StartBarrier};
use crate::buffer::PixelBuffer;
use crate::camera::Camera;
use crate::raytracer::{raytrace, PixelRegion};
use crate::scanline::{assign_scanlines, Scanline};

/// Upper bound on worker threads.
pub const MAX_THREADS: usize = 128;

/// Default image width in pixels.
pub const DEFAULT_WIDTH: u32 = 512;

/// Default image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 512;

/// Invalid render settings, reported before any allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid number of threads {0}, expected a value in [1, {MAX_THREADS}]")]
    ThreadCount(usize),

    #[error("Image size {width}x{height} has no pixels")]
    EmptyImage { width: u32, height: u32 },
}

/// Errors that end a render. None of them leave a partial image behind.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not allocate a {bytes} byte pixel buffer")]
    Allocation { bytes: usize },

    #[error("Could not spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of worker threads, in [1, MAX_THREADS]
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            threads: 1,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration.
    pub fn new(width: u32, height: u32, threads: usize) -> Self {
        Self {
            width,
            height,
            threads,
        }
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check the configuration before anything is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_THREADS).contains(&self.threads) {
            return Err(ConfigError::ThreadCount(self.threads));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Timing of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Worker threads used
    pub threads: usize,
    /// Wall-clock time from the start barrier to the last join
    pub elapsed: Duration,
}

/// A finished render.
#[derive(Debug)]
pub struct Render {
    pub buffer: PixelBuffer,
    pub stats: RenderStats,
}

/// Per-worker values, fixed before the worker starts.
struct Worker<'a> {
    index: usize,
    rows: Vec<Scanline<'a>>,
    scene: &'a Scene,
    camera: &'a Camera,
    barrier: &'a StartBarrier,
}

impl Worker<'_> {
    /// Wait for the start signal, then render every assigned row.
    ///
    /// Returns the number of rows rendered.
    fn run(self) -> usize {
        if self.barrier.cross() == Crossing::Abandoned {
            log::debug!("worker {} stopped before starting", self.index);
            return 0;
        }

        let width = self.camera.image_width;
        let count = self.rows.len();
        log::debug!("worker {} rendering {} rows", self.index, count);

        for scanline in self.rows {
            raytrace(
                self.scene,
                self.camera,
                PixelRegion::row(scanline.y, width),
                scanline.pixels,
            );
        }

        log::debug!("worker {} finished", self.index);
        count
    }
}

/// Render the scene with `config.threads` worker threads.
///
/// Worker `i` renders rows `i, i + T, i + 2T, ...` straight into the shared
/// buffer. All workers and the calling thread meet on a start barrier; the
/// returned time runs from that barrier until every worker has been joined.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<Render, RenderError> {
    config.validate()?;

    let camera = Camera::new(&scene.viewpoint, config.width, config.height);
    let mut buffer = PixelBuffer::try_new(config.width, config.height)?;
    let threads = config.threads;
    let barrier = StartBarrier::new(threads + 1);

    let assignments = assign_scanlines(buffer.as_bytes_mut(), config.width, threads);

    let elapsed = thread::scope(|scope| -> Result<Duration, RenderError> {
        let mut handles: Vec<ScopedJoinHandle<'_, usize>> = Vec::with_capacity(threads);

        for (index, rows) in assignments.into_iter().enumerate() {
            let worker = Worker {
                index,
                rows,
                scene,
                camera: &camera,
                barrier: &barrier,
            };

            let spawned = thread::Builder::new()
                .name(format!("lux-worker-{index}"))
                .spawn_scoped(scope, move || worker.run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    log::error!("Failed to spawn worker {}: {}", index, source);
                    // Let the workers already waiting return so the scope can end
                    barrier.abandon();
                    return Err(RenderError::Spawn {
                        worker: index,
                        source,
                    });
                }
            }
        }

        barrier.cross();
        let start = Instant::now();
        log::debug!("{} workers started", threads);

        let mut panicked = None;
        for (index, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(index);
            }
        }

        match panicked {
            Some(index) => Err(RenderError::WorkerPanicked(index)),
            None => Ok(start.elapsed()),
        }
    })?;

    log::info!(
        "Rendered {}x{} with {} threads in {:?}",
        config.width,
        config.height,
        threads,
        elapsed
    );

    Ok(Render {
        buffer,
        stats: RenderStats { threads, elapsed },
    })
}
