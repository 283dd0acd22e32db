//! Softras: render triangle scenes to image files
//!
//! Renders RON scene files, or the built-in demo scenes, through one
//! rasterizer and writes each result next to the others in the output directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use softras::rasterizer::{RasterSettings, Rasterizer, ScanMode};
use softras::scene::{demo_scenes, load_scene, render_scene, save_scene, Scene};
use softras::VERSION;

#[derive(Debug, Parser)]
#[command(name = "softras", version, about = "Software triangle rasterizer", long_about = None)]
struct Arguments {
    /// Scene files (RON) to render
    scenes: Vec<PathBuf>,

    /// Render the built-in demo scenes
    #[arg(long)]
    demo: bool,

    /// Directory the images are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Override every scene's frame width
    #[arg(long)]
    width: Option<usize>,

    /// Override every scene's frame height
    #[arg(long)]
    height: Option<usize>,

    /// Show a progress bar while filling triangles
    #[arg(long)]
    progress: bool,

    /// Scan the whole frame for every half-space triangle instead of its bounding box
    #[arg(long)]
    full_scan: bool,

    /// Write the demo scenes as RON files into this directory and exit
    #[arg(long, value_name = "DIR")]
    dump_demo: Option<PathBuf>,
}

impl Arguments {
    fn settings(&self) -> RasterSettings {
        RasterSettings {
            scan: if self.full_scan { ScanMode::FullFrame } else { ScanMode::BoundingBox },
            show_progress: self.progress,
        }
    }

    fn resize(&self, scene: &mut Scene) {
        if let Some(width) = self.width {
            scene.width = width;
        }
        if let Some(height) = self.height {
            scene.height = height;
        }
    }
}

fn dump_demo(dir: &Path) -> ExitCode {
    let mut failed = false;
    for scene in demo_scenes() {
        let path = dir.join(&scene.output).with_extension("ron");
        match save_scene(&scene, &path) {
            Ok(()) => info!("saved {}", path.display()),
            Err(e) => {
                error!("failed to save {}: {}", path.display(), e);
                failed = true;
            }
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    info!("=== Softras v{} ===", VERSION);

    if let Some(dir) = &args.dump_demo {
        return dump_demo(dir);
    }

    let mut scenes = Vec::new();
    let mut failed = false;

    for path in &args.scenes {
        match load_scene(path) {
            Ok(scene) => scenes.push(scene),
            Err(e) => {
                error!("failed to load {}: {}", path.display(), e);
                failed = true;
            }
        }
    }
    if args.demo || (args.scenes.is_empty() && !failed) {
        scenes.extend(demo_scenes());
    }

    let mut ras = Rasterizer::with_settings(args.settings());
    for mut scene in scenes {
        args.resize(&mut scene);
        // Failures are already logged by the exporter; keep going with the next scene
        if render_scene(&mut ras, &scene, &args.out_dir).is_err() {
            failed = true;
        }
    }
    ras.deallocate_frame_buffer();

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
