//! Scene model types for Lux.
//!
//! Spheres and rectangulars share one `Vec` in insertion order. That order
//! matters: when two primitives are hit at exactly the same distance, the
//! renderer keeps the one that was added first, whatever its kind.

use lux_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when checking rectangular geometry.
const GEOMETRY_EPSILON: f32 = 1e-4;

/// Errors reported by [`Scene::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("{kind} {index} has reflectivity {value}, expected a value in [0, 1]")]
    InvalidReflectivity {
        kind: &'static str,
        index: usize,
        value: f32,
    },

    #[error("{kind} {index} has a negative or non-finite shading coefficient")]
    InvalidCoefficient { kind: &'static str, index: usize },

    #[error("Rectangular {0} is degenerate")]
    DegenerateRectangular(usize),

    #[error("Rectangular {0} is not planar")]
    NonPlanarRectangular(usize),

    #[error("Rectangular {0} is not convex")]
    NonConvexRectangular(usize),

    #[error("Light {0} has a negative or non-finite color or intensity")]
    InvalidLight(usize),

    #[error("Invalid viewpoint: {0}")]
    InvalidViewpoint(&'static str),

    #[error("Field of view {0} is outside (0, 180) degrees")]
    InvalidFieldOfView(f32),
}

/// Surface description for the Phong shading model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Color,

    /// Ambient coefficient
    pub ambient: f32,

    /// Diffuse coefficient
    pub diffuse: f32,

    /// Specular coefficient
    pub specular: f32,

    /// Phong exponent of the specular highlight
    pub shininess: f32,

    /// Fraction of the final color taken from the mirror direction (0-1)
    pub reflectivity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(0.5, 0.5, 0.5),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a new material with just a base color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the Phong coefficients.
    pub fn with_phong(mut self, ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    /// Check if this material reflects the rest of the scene.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    fn check(&self, kind: &'static str, index: usize) -> Result<(), SceneError> {
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(SceneError::InvalidReflectivity {
                kind,
                index,
                value: self.reflectivity,
            });
        }

        let coefficients = [self.ambient, self.diffuse, self.specular, self.shininess];
        let channels = self.color.to_array();
        if coefficients
            .iter()
            .chain(channels.iter())
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(SceneError::InvalidCoefficient { kind, index });
        }

        Ok(())
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    #[serde(default)]
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// A planar convex quadrilateral.
///
/// The four vertices are given in winding order around the outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangular {
    pub vertices: [Vec3; 4],
    #[serde(default)]
    pub material: Material,
}

impl Rectangular {
    /// Create a new rectangular from four vertices in winding order.
    pub fn new(vertices: [Vec3; 4], material: Material) -> Self {
        Self { vertices, material }
    }

    /// Create a parallelogram spanned by two edges from `origin`.
    pub fn from_corner(origin: Vec3, edge_u: Vec3, edge_v: Vec3, material: Material) -> Self {
        Self::new(
            [origin, origin + edge_u, origin + edge_u + edge_v, origin + edge_v],
            material,
        )
    }

    /// Unnormalized plane normal from the edges meeting at the first vertex.
    fn raw_normal(&self) -> Vec3 {
        let [v0, v1, _, v3] = self.vertices;
        (v1 - v0).cross(v3 - v0)
    }

    /// Unit plane normal, following the winding order of the vertices.
    pub fn normal(&self) -> Vec3 {
        self.raw_normal().normalize()
    }

    fn check(&self, index: usize) -> Result<(), SceneError> {
        let raw = self.raw_normal();
        if !raw.is_finite() || raw.length() < GEOMETRY_EPSILON {
            return Err(SceneError::DegenerateRectangular(index));
        }
        let normal = raw.normalize();

        let v0 = self.vertices[0];
        let extent = self
            .vertices
            .iter()
            .map(|v| (*v - v0).length())
            .fold(1.0_f32, f32::max);
        if self
            .vertices
            .iter()
            .any(|v| (*v - v0).dot(normal).abs() > GEOMETRY_EPSILON * extent)
        {
            return Err(SceneError::NonPlanarRectangular(index));
        }

        // Every corner must turn the same way as the plane normal.
        for i in 0..4 {
            let prev = self.vertices[(i + 3) % 4];
            let here = self.vertices[i];
            let next = self.vertices[(i + 1) % 4];
            if (here - prev).cross(next - here).dot(normal) <= 0.0 {
                return Err(SceneError::NonConvexRectangular(index));
            }
        }

        Ok(())
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    #[serde(default = "default_light_color")]
    pub color: Color,
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

fn default_light_color() -> Color {
    Color::ONE
}

fn default_light_intensity() -> f32 {
    1.0
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Light color scaled by intensity.
    pub fn radiance(&self) -> Color {
        self.color * self.intensity
    }
}

/// The camera the image is seen from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Eye position
    pub position: Vec3,

    /// Viewing direction (need not be normalized)
    pub forward: Vec3,

    /// Up hint; only needs to be non-parallel to `forward`
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 60.0,
        }
    }
}

impl Viewpoint {
    /// Create a viewpoint at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fov: f32) -> Self {
        Self {
            position,
            forward: target - position,
            up,
            fov,
        }
    }

    /// Orthonormal camera basis as (forward, up, right).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward.normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        (forward, up, right)
    }

    fn check(&self) -> Result<(), SceneError> {
        if !self.position.is_finite() {
            return Err(SceneError::InvalidViewpoint("position is not finite"));
        }
        if !self.forward.is_finite() || self.forward.length() < GEOMETRY_EPSILON {
            return Err(SceneError::InvalidViewpoint("forward direction is zero"));
        }
        let side = self.forward.normalize().cross(self.up);
        if !side.is_finite() || side.length() < GEOMETRY_EPSILON {
            return Err(SceneError::InvalidViewpoint(
                "up direction is parallel to forward",
            ));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SceneError::InvalidFieldOfView(self.fov));
        }
        Ok(())
    }
}

/// A primitive of either kind.
///
/// In scene files each entry carries a `"type"` tag, `"sphere"` or
/// `"rectangular"`, next to the fields of that kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Sphere(Sphere),
    Rectangular(Rectangular),
}

impl Primitive {
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => &sphere.material,
            Primitive::Rectangular(rectangular) => &rectangular.material,
        }
    }

    fn check(&self, index: usize) -> Result<(), SceneError> {
        match self {
            Primitive::Sphere(sphere) => {
                if !(sphere.radius.is_finite() && sphere.radius > 0.0)
                    || !sphere.center.is_finite()
                {
                    return Err(SceneError::InvalidRadius {
                        index,
                        radius: sphere.radius,
                    });
                }
                sphere.material.check("Sphere", index)
            }
            Primitive::Rectangular(rectangular) => {
                rectangular.check(index)?;
                rectangular.material.check("Rectangular", index)
            }
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Rectangular> for Primitive {
    fn from(rectangular: Rectangular) -> Self {
        Primitive::Rectangular(rectangular)
    }
}

/// A complete scene: primitives, lights, camera and background.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    /// Every primitive in insertion order, which is also the tie-break order
    #[serde(default)]
    pub primitives: Vec<Primitive>,

    #[serde(default)]
    pub lights: Vec<Light>,

    pub viewpoint: Viewpoint,

    /// Color returned for rays that hit nothing
    #[serde(default)]
    pub background: Color,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, viewpoint: Viewpoint, background: Color) -> Self {
        Self {
            name: name.into(),
            viewpoint,
            background,
            ..Default::default()
        }
    }

    /// Add a primitive and return its index in insertion order.
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) -> usize {
        self.primitives.push(primitive.into());
        self.primitives.len() - 1
    }

    /// Add a sphere to the scene and return its primitive index.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.add_primitive(sphere)
    }

    /// Add a rectangular to the scene and return its primitive index.
    pub fn add_rectangular(&mut self, rectangular: Rectangular) -> usize {
        self.add_primitive(rectangular)
    }

    /// Add a light to the scene and return its index.
    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Sphere(sphere) => Some(sphere),
            Primitive::Rectangular(_) => None,
        })
    }

    pub fn rectangulars(&self) -> impl Iterator<Item = &Rectangular> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rectangular(rectangular) => Some(rectangular),
            Primitive::Sphere(_) => None,
        })
    }

    /// Total number of primitives.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Check every invariant the renderer relies on.
    ///
    /// Primitive errors carry the primitive's insertion index.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.viewpoint.check()?;

        for (index, primitive) in self.primitives.iter().enumerate() {
            primitive.check(index)?;
        }

        for (index, light) in self.lights.iter().enumerate() {
            let color_ok = light.color.is_finite() && light.color.min_element() >= 0.0;
            let intensity_ok = light.intensity.is_finite() && light.intensity >= 0.0;
            if !light.position.is_finite() || !color_ok || !intensity_ok {
                return Err(SceneError::InvalidLight(index));
            }
        }

        Ok(())
    }
}
