//! Lux Core - Scene model for the Lux ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive` (`Sphere` or `Rectangular`), `Light`, `Viewpoint`, `Material`
//! - **Scene providers**: the built-in model scene and JSON scene files
//!
//! A `Scene` is built once, validated, and then only read. The renderer
//! shares it between worker threads by reference.
//!
//! # Example
//!
//! ```ignore
//! use lux_core::loader::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod models;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError};
pub use models::standard_scene;
pub use scene::{Light, Material, Primitive, Rectangular, Scene, SceneError, Sphere, Viewpoint};
