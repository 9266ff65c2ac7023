//! Recursive ray tracing with Phong shading.
//!
//! Implements Whitted-style ray tracing with:
//! - Hard shadows from point lights
//! - Mirror reflections blended by material reflectivity
//! - A fixed bound on reflection depth

use lux_core::Scene;
use lux_math::{Color, Interval, Ray, Vec3};

use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable};

/// Maximum number of mirror bounces followed from a primary ray.
///
/// Two facing mirrors would otherwise reflect forever.
pub const MAX_REFLECTION_DEPTH: u32 = 3;

/// Hits closer than this to a ray origin are ignored, so secondary rays do
/// not hit the surface they start on.
pub const HIT_EPSILON: f32 = 1e-3;

/// Result of tracing one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Unclamped color
    pub color: Color,
    /// Deepest reflection depth reached while computing `color`
    pub depth: u32,
}

/// Trace a ray at the given reflection depth.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32) -> Sample {
    let Some(rec) = scene.hit(ray, Interval::new(HIT_EPSILON, f32::INFINITY)) else {
        return Sample {
            color: scene.background,
            depth,
        };
    };

    let local = shade(scene, ray, &rec);
    if !rec.material.is_reflective() || depth >= MAX_REFLECTION_DEPTH {
        return Sample {
            color: local,
            depth,
        };
    }

    let mirror = Ray::new(rec.p, reflect(ray.direction(), rec.normal).normalize());
    let reflected = trace(scene, &mirror, depth + 1);
    let reflectivity = rec.material.reflectivity;

    Sample {
        color: local * (1.0 - reflectivity) + reflected.color * reflectivity,
        depth: reflected.depth,
    }
}

/// Compute the color seen by a primary ray.
pub fn ray_color(scene: &Scene, ray: &Ray) -> Color {
    trace(scene, ray, 0).color
}

/// Local illumination at a hit: ambient plus unshadowed diffuse and specular
/// contributions of every light.
fn shade(scene: &Scene, ray: &Ray, rec: &HitRecord) -> Color {
    let material = rec.material;
    let eye = -ray.direction();

    let mut color = material.color * material.ambient;

    for light in &scene.lights {
        let to_light = light.position - rec.p;
        let distance = to_light.length();
        if distance <= HIT_EPSILON {
            continue;
        }
        let light_dir = to_light / distance;

        // For the side of the surface facing away from the light, use only ambient light
        let light_dot_normal = light_dir.dot(rec.normal);
        if light_dot_normal <= 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(rec.p, light_dir);
        if scene.hit_any(&shadow_ray, Interval::new(HIT_EPSILON, distance)) {
            continue;
        }

        let radiance = light.radiance();
        color += material.color * radiance * (material.diffuse * light_dot_normal);

        let reflect_dot_eye = reflect(-light_dir, rec.normal).dot(eye);
        if reflect_dot_eye > 0.0 {
            color += radiance * (material.specular * reflect_dot_eye.powf(material.shininess));
        }
    }

    color
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Clamp a color to [0, 1] and convert it to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b]
}

/// Render a single pixel.
pub fn render_pixel(scene: &Scene, camera: &Camera, x: u32, y: u32) -> Color {
    ray_color(scene, &camera.get_ray(x, y))
}

/// An inclusive rectangle of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRegion {
    /// Create a region from inclusive bounds.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(left <= right && top <= bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// One full scanline of an image `width` pixels wide.
    pub fn row(y: u32, width: u32) -> Self {
        Self::new(0, y, width - 1, y)
    }

    /// The whole image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width - 1, height - 1)
    }

    /// Number of rows covered.
    pub fn rows(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Render every pixel of `region` into `rows`.
///
/// `rows` is the part of a row-major RGB buffer that starts at row
/// `region.top` and spans the full image width, so pixel (x, y) lands at
/// byte `((y - region.top) * width + x) * 3`.
pub fn raytrace(scene: &Scene, camera: &Camera, region: PixelRegion, rows: &mut [u8]) {
    let stride = camera.image_width as usize * 3;
    debug_assert!(region.right < camera.image_width);
    debug_assert!(rows.len() >= region.rows() as usize * stride);

    for y in region.top..=region.bottom {
        let row_start = (y - region.top) as usize * stride;
        for x in region.left..=region.right {
            let rgb = color_to_rgb(render_pixel(scene, camera, x, y));
            let offset = row_start + x as usize * 3;
            rows[offset..offset + 3].copy_from_slice(&rgb);
        }
    }
}
