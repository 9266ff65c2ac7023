//! Camera for primary ray generation.

use lux_core::Viewpoint;
use lux_math::{Ray, Vec3};

/// Pinhole camera with an image plane one unit in front of the eye.
///
/// One primary ray goes through the center of each pixel; row 0 is the top
/// of the image.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Build the pixel lattice for a viewpoint and image resolution.
    pub fn new(view: &Viewpoint, image_width: u32, image_height: u32) -> Self {
        let (forward, up, right) = view.basis();
        let center = view.position;

        // Calculate viewport dimensions, aspect corrected horizontally
        let theta = view.fov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        let viewport_u = viewport_width * right;
        let viewport_v = -viewport_height * up;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = center + forward - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Primary ray through the center of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v;
        Ray::towards(self.center, pixel_center)
    }
}
