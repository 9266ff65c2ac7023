//! Ray-primitive intersection shared by every primitive kind.

use lux_core::{Material, Primitive, Scene};
use lux_math::{Interval, Ray, Vec3};

/// Where and how a ray met a primitive.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal, turned to face the incoming ray
    pub normal: Vec3,
    pub material: &'a Material,
    /// Ray parameter of the hit
    pub t: f32,
    /// False when the ray arrived from behind the outward normal
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record at `t`, flipping `outward_normal` if the ray comes from
    /// behind it.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// A primitive, or a collection of them, that rays can be intersected with.
pub trait Hittable: Send + Sync {
    /// Nearest hit strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Whether anything is hit strictly inside `ray_t`.
    ///
    /// Shadow rays only need a yes/no answer, so implementors may stop at the
    /// first hit instead of searching for the nearest one.
    fn hit_any(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.hit(ray, ray_t).is_some()
    }
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Rectangular(rectangular) => rectangular.hit(ray, ray_t),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut nearest_t = ray_t.max;

        // Primitives are searched in insertion order and the interval is
        // open, so a later primitive at exactly the same distance never
        // replaces an earlier one.
        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(nearest_t)) {
                nearest_t = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn hit_any(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.primitives
            .iter()
            .any(|primitive| primitive.hit(ray, ray_t).is_some())
    }
}
