//! Built-in model scene used when no scene file is given.

use lux_math::{Color, Vec3};

use crate::scene::{Light, Material, Rectangular, Scene, Sphere, Viewpoint};

/// Background color of the built-in scene.
pub const STANDARD_BACKGROUND: Color = Color::new(0.0, 0.1, 0.1);

/// The benchmark scene: a mirror wall behind three spheres on a floor, lit by
/// two point lights.
pub fn standard_scene() -> Scene {
    let viewpoint = Viewpoint::look_at(
        Vec3::new(0.0, 1.6, 6.5),
        Vec3::new(0.0, 0.8, 0.0),
        Vec3::Y,
        40.0,
    );
    let mut scene = Scene::new("standard", viewpoint, STANDARD_BACKGROUND);

    // Floor
    scene.add_rectangular(Rectangular::from_corner(
        Vec3::new(-4.0, 0.0, -4.0),
        Vec3::new(0.0, 0.0, 8.0),
        Vec3::new(8.0, 0.0, 0.0),
        Material::new(Color::new(0.6, 0.6, 0.55))
            .with_phong(0.1, 0.8, 0.1, 10.0)
            .with_reflectivity(0.1),
    ));

    // Back wall mirror
    scene.add_rectangular(Rectangular::from_corner(
        Vec3::new(-3.0, 0.0, -2.5),
        Vec3::new(6.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
        Material::new(Color::new(0.2, 0.25, 0.3))
            .with_phong(0.05, 0.2, 0.6, 80.0)
            .with_reflectivity(0.7),
    ));

    scene.add_sphere(Sphere::new(
        Vec3::new(-1.2, 0.7, 0.0),
        0.7,
        Material::new(Color::new(0.9, 0.2, 0.15))
            .with_phong(0.1, 0.8, 0.5, 60.0)
            .with_reflectivity(0.2),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(1.1, 0.5, 0.8),
        0.5,
        Material::new(Color::new(0.2, 0.35, 0.9))
            .with_phong(0.1, 0.6, 0.9, 200.0)
            .with_reflectivity(0.5),
    ));
    scene.add_sphere(Sphere::new(
        Vec3::new(0.1, 0.3, 1.9),
        0.3,
        Material::new(Color::new(0.25, 0.8, 0.3)).with_phong(0.1, 0.9, 0.3, 30.0),
    ));

    scene.add_light(Light::new(Vec3::new(-4.0, 6.0, 5.0), Color::ONE, 0.8));
    scene.add_light(Light::new(
        Vec3::new(5.0, 4.0, 3.0),
        Color::new(1.0, 0.9, 0.8),
        0.4,
    ));

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scene_is_valid() {
        let scene = standard_scene();
        assert_eq!(scene.validate(), Ok(()));
        assert_eq!(scene.spheres().count(), 3);
        assert_eq!(scene.rectangulars().count(), 2);
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.background, STANDARD_BACKGROUND);
    }

    #[test]
    fn test_standard_scene_is_reproducible() {
        assert_eq!(standard_scene(), standard_scene());
    }
}
