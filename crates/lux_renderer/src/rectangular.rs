//! Rectangular intersection: plane hit followed by an inside test.

use lux_core::Rectangular;
use lux_math::{Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};

impl Hittable for Rectangular {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let normal = self.normal();
        let denom = normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.vertices[0] - ray.origin()).dot(normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        if !contains(&self.vertices, normal, p) {
            return None;
        }

        Some(HitRecord::new(ray, t, normal, &self.material))
    }
}

/// Inside test for a point on the plane of a convex polygon.
///
/// The point is inside when it lies on the inner side of every edge; points
/// on an edge count as inside.
fn contains(vertices: &[Vec3; 4], normal: Vec3, p: Vec3) -> bool {
    (0..vertices.len()).all(|i| {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        (b - a).cross(p - a).dot(normal) >= 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::Material;

    const FORWARD: Interval = Interval::new(0.001, f32::INFINITY);

    fn square() -> Rectangular {
        // Unit square in the plane z = -2, centered on the z axis
        Rectangular::from_corner(
            Vec3::new(-0.5, -0.5, -2.0),
            Vec3::X,
            Vec3::Y,
            Material::default(),
        )
    }

    #[test]
    fn test_rectangular_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let square = square();
        let rec = square.hit(&ray, FORWARD).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-6);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, -2.0));
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
        assert!(rec.front_face);
    }

    #[test]
    fn test_hit_from_behind_flips_normal() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
        let square = square();
        let rec = square.hit(&ray, FORWARD).unwrap();

        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_plane_hit_outside_outline_misses() {
        let ray = Ray::towards(Vec3::ZERO, Vec3::new(0.8, 0.0, -2.0));
        assert!(square().hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::X);
        assert!(square().hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_contains_is_winding_independent() {
        let mut flipped = square();
        flipped.vertices.reverse();

        let ray = Ray::towards(Vec3::ZERO, Vec3::new(0.3, -0.2, -2.0));
        assert!(square().hit(&ray, FORWARD).is_some());
        assert!(flipped.hit(&ray, FORWARD).is_some());
    }

    #[test]
    fn test_skewed_quad() {
        // A trapezoid on the floor
        let quad = Rectangular::new(
            [
                Vec3::new(-2.0, 0.0, 0.0),
                Vec3::new(-1.0, 0.0, -2.0),
                Vec3::new(1.0, 0.0, -2.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            Material::default(),
        );

        let down = |x: f32, z: f32| Ray::new(Vec3::new(x, 3.0, z), Vec3::NEG_Y);
        assert!(quad.hit(&down(0.0, -1.0), FORWARD).is_some());
        assert!(quad.hit(&down(1.7, -0.2), FORWARD).is_some());
        assert!(quad.hit(&down(1.7, -1.8), FORWARD).is_none());
    }
}
