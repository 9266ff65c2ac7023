use anyhow::{Context, Result};
use clap::Parser;
use lux_core::{load_scene, standard_scene};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

/// Render the requested scene and write the image.
///
/// Nothing is written unless the render completes.
fn run(cli: &Cli) -> Result<()> {
    let config = cli.render_config();
    config.validate()?;

    let scene = match &cli.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => standard_scene(),
    };
    log::info!(
        "Scene '{}': {} primitives, {} lights",
        scene.name,
        scene.primitive_count(),
        scene.lights.len()
    );

    println!("# Rendering scene, using {} threads", config.threads);
    let render = lux_renderer::render(&scene, &config).context("Rendering failed")?;

    render
        .buffer
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    log::info!(
        "Wrote {}x{} image to {}",
        render.buffer.width(),
        render.buffer.height(),
        cli.output.display()
    );

    println!("Done!");
    println!(
        "Execution time of raytracing() : {:.6} sec",
        render.stats.elapsed.as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn cli(output: &Path, threads: usize) -> Cli {
        Cli {
            threads,
            output: output.to_path_buf(),
            scene: None,
            width: 24,
            height: 16,
        }
    }

    #[test]
    fn test_run_writes_ppm() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.ppm");

        run(&cli(&output, 3)).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let header = b"P6\n24 16\n255\n";
        assert!(bytes.starts_with(header));
        assert_eq!(bytes.len(), header.len() + 24 * 16 * 3);
    }

    #[test]
    fn test_invalid_thread_count_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.ppm");

        for threads in [0, 129] {
            assert!(run(&cli(&output, threads)).is_err());
            assert!(!output.exists());
        }
    }

    #[test]
    fn test_missing_scene_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.ppm");

        let mut args = cli(&output, 2);
        args.scene = Some(dir.path().join("missing.json"));

        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_with_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let scene_path = dir.path().join("scene.json");
        let output = dir.path().join("out.ppm");

        let json = r#"{
            "viewpoint": { "position": [0, 0, 0], "forward": [0, 0, -1], "up": [0, 1, 0], "fov": 60 },
            "background": [0.2, 0.4, 0.6],
            "primitives": [
                { "type": "sphere", "center": [0.0, 0.0, -3.0], "radius": 1.0 }
            ],
            "lights": [
                { "position": [2.0, 2.0, 0.0] }
            ]
        }"#;
        std::fs::write(&scene_path, json).unwrap();

        let mut args = cli(&output, 4);
        args.scene = Some(scene_path);
        run(&args).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"P6\n24 16\n255\n"));
    }
}
