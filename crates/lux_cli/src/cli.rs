//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use lux_renderer::{RenderConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_THREADS};

/// Render a scene with a pool of ray tracing threads and report the time taken
#[derive(Parser, Debug, Clone)]
#[command(name = "raytracing", version, about, long_about = None)]
pub struct Cli {
    /// Number of worker threads, 1 to 128
    #[arg(short, long, value_name = "NR_THREADS", default_value_t = 1, value_parser = parse_threads)]
    pub threads: usize,

    /// Output image; .ppm is written as binary PPM, other extensions are encoded by type
    #[arg(short, long, value_name = "PATH", default_value = "out.ppm")]
    pub output: PathBuf,

    /// JSON scene file to render instead of the built-in scene
    #[arg(short, long, value_name = "PATH")]
    pub scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
}

impl Cli {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.width, self.height, self.threads)
    }
}

fn parse_threads(arg: &str) -> Result<usize, String> {
    let threads: usize = arg
        .trim()
        .parse()
        .map_err(|_| format!("couldn't parse '{arg}' as a thread count"))?;

    if !(1..=MAX_THREADS).contains(&threads) {
        return Err(format!("invalid number of threads, expected [1,{MAX_THREADS}]"));
    }
    Ok(threads)
}
