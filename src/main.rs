use clap::Parser;
use glam::{Vec3A, Vec4};
use log::{error, info, warn};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use orthocast::output::{self, OutputFormat};
use orthocast::{ColorPolicy, Config, HittableList, Plane, RaycastError, Result, Sphere};

/// Demo scene used when the configuration defines no objects: a backdrop
/// plane and two spheres inside the default 1x1 camera plane.
fn create_scene() -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Plane::new(
        Vec3A::new(0.0, 0.0, 5.0),
        Vec3A::NEG_Z,
        Vec4::new(0.5, 0.5, 0.5, 1.0),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 0.0, 3.0),
        0.3,
        Vec4::new(1.0, 0.0, 0.0, 1.0),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.25, 0.2, 2.5),
        0.12,
        Vec4::new(0.1, 0.3, 0.9, 1.0),
    )));

    world
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Orthocast - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(args) {
        error!("Render failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Command line values win over the configuration file
    if let Some(width) = args.width {
        config.resolution.width = width;
    }
    if let Some(height) = args.height {
        config.resolution.height = height;
    }
    if args.output.is_some() {
        config.output = args.output.clone();
    }
    if args.parallel {
        config.render.parallel = true;
    }
    if args.hdr {
        config.render.color = ColorPolicy::Hdr;
    }
    if args.progress {
        config.render.progress = true;
    }
    config.validate()?;

    let (width, height) = (config.resolution.width, config.resolution.height);
    let output_path = config.output_path();
    let format = OutputFormat::from_path(&output_path)?;
    if format == OutputFormat::Png && config.render.color == ColorPolicy::Hdr {
        warn!("HDR colors will be clamped when written to PNG; use .exr to keep them");
    }

    let camera = config.camera();
    let light = config.light()?;
    let renderer = config.renderer();
    let world = if config.scene.spheres.is_empty() && config.scene.planes.is_empty() {
        info!("No scene objects configured, using the demo scene");
        create_scene()
    } else {
        config.build_scene()
    };

    info!(
        "Image resolution: {}x{}, {} objects, display filter {:?}",
        width,
        height,
        world.len(),
        config.resolution.filter
    );

    let frame = if config.render.parallel {
        if config.render.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.render.threads)
                .build_global()
                .map_err(|e| RaycastError::Config(e.to_string()))?;
        }
        renderer.render_parallel(&camera, &light, &world, width, height, None)?
    } else {
        renderer.render(&camera, &light, &world, width, height)?
    };

    output::save(&frame, &output_path)
}
