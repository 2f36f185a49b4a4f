//! Command-line front end: flags to config, scene selection, file output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_math::Vec3;
use lumen_renderer::{render, BvhNode, Camera, CameraConfig, ImageBuffer};

mod ppm;
mod scene;

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "Offline Monte Carlo path tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Aspect ratio as a decimal, or as a `W H` pair (e.g. `--aspect 16 9`)
    #[arg(long, num_args = 1..=2, value_name = "RATIO | W H", default_values_t = [16.0, 9.0])]
    aspect: Vec<f32>,

    /// Samples per pixel
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 100)]
    depth: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 20.0)]
    vfov: f32,

    /// Camera position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [13.0, 2.0, 3.0])]
    lookfrom: Vec<f32>,

    /// Point the camera looks at
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [0.0, 0.0, 0.0])]
    lookat: Vec<f32>,

    /// Camera up vector
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [0.0, 1.0, 0.0])]
    vup: Vec<f32>,

    /// Defocus angle in degrees (0 disables depth of field)
    #[arg(long, default_value_t = 0.6)]
    defocus: f32,

    /// Distance to the plane of perfect focus
    #[arg(long, default_value_t = 10.0)]
    focusdist: f32,

    /// Scene preset to render
    #[arg(long, value_enum, default_value_t = ScenePreset::Cover)]
    scene: ScenePreset,

    /// Seed driving scene randomization and pixel sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Worker threads; defaults to one per core
    #[arg(long)]
    threads: Option<usize>,

    /// Output file; `.ppm` writes P3 text, other extensions go through the
    /// image crate
    #[arg(long, short, default_value = "render.ppm")]
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScenePreset {
    /// Randomized sphere field with motion blur
    Cover,
    /// Five static spheres including a hollow glass shell
    ThreeSpheres,
}

impl Args {
    fn aspect_ratio(&self) -> Result<f32> {
        match self.aspect.as_slice() {
            [ratio] => Ok(*ratio),
            [w, h] => {
                if *h <= 0.0 {
                    bail!("aspect height must be positive, got {h}");
                }
                Ok(w / h)
            }
            other => bail!("--aspect takes one or two values, got {}", other.len()),
        }
    }

    fn camera_config(&self) -> Result<CameraConfig> {
        Ok(CameraConfig {
            aspect_ratio: self.aspect_ratio()?,
            image_width: self.width,
            samples_per_pixel: self.samples,
            max_depth: self.depth,
            vfov: self.vfov,
            look_from: vec3_arg(&self.lookfrom),
            look_at: vec3_arg(&self.lookat),
            view_up: vec3_arg(&self.vup),
            defocus_angle: self.defocus,
            focus_dist: self.focusdist,
        })
    }
}

fn vec3_arg(values: &[f32]) -> Vec3 {
    // clap enforces exactly three values
    Vec3::new(values[0], values[1], values[2])
}

fn write_output(path: &Path, image: &ImageBuffer) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ppm") => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            ppm::write_ppm(&mut out, image)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        _ => {
            image::save_buffer(
                path,
                &image.to_rgb_bytes(),
                image.width,
                image.height,
                image::ColorType::Rgb8,
            )
            .with_context(|| format!("failed to encode {}", path.display()))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    let camera = Camera::new(args.camera_config()?).context("invalid camera configuration")?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let list = match args.scene {
        ScenePreset::Cover => scene::cover(&mut rng),
        ScenePreset::ThreeSpheres => scene::three_spheres(),
    };
    log::info!("scene holds {} objects", list.len());
    let world = BvhNode::from_list(list);

    let image = render(&camera, &world, args.seed);

    write_output(&args.output, &image)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}
