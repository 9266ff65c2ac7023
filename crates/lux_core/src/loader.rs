//! JSON scene loading.
//!
//! A scene file is the JSON form of [`Scene`]. Vectors and colors are
//! three-element arrays; material fields may be omitted and fall back to
//! [`Material::default`](crate::Material). Primitives are listed in one array
//! whose order decides which of two equally distant surfaces is seen.
//!
//! ```json
//! {
//!   "viewpoint": { "position": [0, 1, 5], "forward": [0, 0, -1], "up": [0, 1, 0], "fov": 45 },
//!   "background": [0.0, 0.1, 0.1],
//!   "lights": [{ "position": [-5, 5, 5] }],
//!   "primitives": [
//!     { "type": "rectangular", "vertices": [[-5, 0, -5], [-5, 0, 5], [5, 0, 5], [5, 0, -5]] },
//!     { "type": "sphere", "center": [0, 1, 0], "radius": 1, "material": { "reflectivity": 0.3 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::{Scene, SceneError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load and validate a scene from a JSON file.
///
/// When the file does not name the scene, the file stem is used.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&text)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} spheres, {} rectangulars, {} lights",
        scene.name,
        path.display(),
        scene.spheres().count(),
        scene.rectangulars().count(),
        scene.lights.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<Scene> {
    let scene: Scene = serde_json::from_str(text)?;
    scene.validate()?;

    if scene.lights.is_empty() {
        log::warn!("Scene '{}' has no lights; only ambient shading applies", scene.name);
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Primitive};
    use lux_math::Vec3;
    use std::io::Write;

    const SIMPLE_SCENE: &str = r#"{
        "viewpoint": { "position": [0, 1, 5], "forward": [0, 0, -1], "up": [0, 1, 0], "fov": 45 },
        "background": [0.0, 0.1, 0.1],
        "lights": [{ "position": [-5, 5, 5], "intensity": 0.5 }],
        "primitives": [
            { "type": "sphere", "center": [0, 1, 0], "radius": 1, "material": { "reflectivity": 0.3 } },
            { "type": "rectangular", "vertices": [[-5, 0, -5], [-5, 0, 5], [5, 0, 5], [5, 0, -5]] },
            { "type": "sphere", "center": [2, 1, 0], "radius": 0.5 }
        ]
    }"#;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();

        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.background, Vec3::new(0.0, 0.1, 0.1));

        // File order is insertion order, across kinds
        assert!(matches!(scene.primitives[0], Primitive::Sphere(_)));
        assert!(matches!(scene.primitives[1], Primitive::Rectangular(_)));
        assert!(matches!(scene.primitives[2], Primitive::Sphere(_)));

        let spheres: Vec<_> = scene.spheres().collect();
        assert_eq!(spheres[0].center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(spheres[1].center, Vec3::new(2.0, 1.0, 0.0));

        // Partial and missing materials fall back to defaults
        assert_eq!(spheres[0].material.reflectivity, 0.3);
        assert_eq!(spheres[0].material.diffuse, Material::default().diffuse);
        assert_eq!(spheres[1].material, Material::default());
        assert_eq!(*scene.primitives[1].material(), Material::default());

        // Light color defaults to white
        assert_eq!(scene.lights[0].color, Vec3::ONE);
        assert_eq!(scene.lights[0].intensity, 0.5);
    }

    #[test]
    fn test_load_rejects_unknown_primitive_type() {
        let text = SIMPLE_SCENE.replace("\"type\": \"rectangular\"", "\"type\": \"torus\"");
        let err = load_scene_from_str(&text).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_load_rejects_invalid_scene() {
        let text = SIMPLE_SCENE.replace("\"radius\": 0.5", "\"radius\": -0.5");
        let err = load_scene_from_str(&text).unwrap_err();

        assert!(matches!(
            err,
            LoadError::Invalid(SceneError::InvalidRadius { index: 2, .. })
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = load_scene_from_str("{ \"spheres\": [").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_load_from_file_names_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SIMPLE_SCENE.as_bytes()).unwrap();

        let scene = load_scene(&path).unwrap();
        assert_eq!(scene.name, "studio");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip_of_standard_scene() {
        let scene = crate::standard_scene();
        let text = serde_json::to_string(&scene).unwrap();
        assert_eq!(load_scene_from_str(&text).unwrap(), scene);
    }
}
