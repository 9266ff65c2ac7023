//! Lux Renderer - multi-threaded CPU ray tracing.
//!
//! A recursive (Whitted-style) ray tracer with Phong shading, hard shadows
//! and bounded mirror reflections. The image is split into scanlines that
//! are dealt out cyclically to a fixed set of worker threads; the workers
//! start together on a rendezvous barrier so the measured time covers only
//! rendering.

mod barrier;
mod buffer;
mod camera;
mod coordinator;
mod hittable;
mod raytracer;
mod rectangular;
mod scanline;
mod sphere;

pub use barrier::{Crossing, StartBarrier};
pub use buffer::{OutputError, PixelBuffer, CHANNELS};
pub use camera::Camera;
pub use coordinator::{
    render, ConfigError, Render, RenderConfig, RenderError, RenderStats, DEFAULT_HEIGHT,
    DEFAULT_WIDTH, MAX_THREADS,
};
pub use hittable::{HitRecord, Hittable};
pub use raytracer::{
    color_to_rgb, ray_color, raytrace, render_pixel, trace, PixelRegion, Sample, HIT_EPSILON,
    MAX_REFLECTION_DEPTH,
};
pub use scanline::{assign_scanlines, rows_for_worker, worker_for_row, Scanline};

/// Re-export math and scene types used in the public API
pub use lux_core::Scene;
pub use lux_math::{Color, Interval, Ray, Vec3};
