use crate::Vec3;

/// Half-line `origin + t * direction`, `t >= 0`.
///
/// Rays built by the renderer carry a unit direction, so the `t` of a hit is
/// also its distance from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` through `target`, with a unit direction.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_parameter() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));

        assert_eq!(ray.at(0.0), ray.origin());
        assert_eq!(ray.at(0.5), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(ray.at(3.0), Vec3::new(1.0, 6.0, 0.0));
    }

    #[test]
    fn test_towards_has_unit_direction() {
        let ray = Ray::towards(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, -9.0));

        assert_eq!(ray.origin(), Vec3::new(1.0, 1.0, 1.0));
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
        assert!((ray.at(10.0) - Vec3::new(1.0, 1.0, -9.0)).length() < 1e-5);
    }
}
