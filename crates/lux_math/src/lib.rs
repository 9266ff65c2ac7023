// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color with channels nominally in [0, 1].
///
/// Channels may exceed that range while shading; they are clamped only when
/// a pixel is written out.
pub type Color = Vec3;
