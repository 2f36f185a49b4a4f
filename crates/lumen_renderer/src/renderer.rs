//! Radiance estimation and the scanline-parallel render driver.

use std::sync::atomic::{AtomicU32, Ordering};

use lumen_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::Hittable;
use crate::material::Color;

/// Radiance along `ray`, estimated by walking bounces up to `max_depth`.
///
/// Written as a loop carrying the accumulated attenuation instead of the
/// textbook recursion, so stack use stays flat at any configured depth.
/// Depth exhaustion and absorption both terminate in black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut current = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..max_depth {
        let Some(rec) = world.hit(&current, Interval::new(0.001, f32::INFINITY)) else {
            return throughput * sky_gradient(&current);
        };

        match rec.material.scatter(&current, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                current = scatter.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Background: white at the horizon blending to blue overhead.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0)
}

/// Gamma-2 transfer: square root for positive values, zero otherwise.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Linear color to output bytes: gamma, clamp to `[0, 0.999]`, scale by 256.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };
    let r = (256.0 * INTENSITY.clamp(linear_to_gamma(color.x))) as u8;
    let g = (256.0 * INTENSITY.clamp(linear_to_gamma(color.y))) as u8;
    let b = (256.0 * INTENSITY.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Rendered image: linear pixels in row-major order, top row first.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// The output contract: one RGB byte triple per pixel, top-to-bottom,
    /// left-to-right.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Average `samples_per_pixel` estimates through pixel `(x, y)`.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut acc = Color::ZERO;
    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        acc += ray_color(&ray, world, camera.max_depth(), rng);
    }
    acc / camera.samples_per_pixel() as f32
}

/// Derive a scanline's generator seed from the render seed.
///
/// splitmix64-style mix: rows get decorrelated streams and the result only
/// depends on (seed, row), never on worker scheduling.
fn scanline_seed(seed: u64, row: u32) -> u64 {
    let mut z = seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render the scene, one rayon task per scanline.
///
/// The scene graph is shared read-only across workers; each scanline owns a
/// seeded generator, so output bytes are identical across runs and across
/// pool sizes.
pub fn render(camera: &Camera, world: &dyn Hittable, seed: u64) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();

    log::info!(
        "rendering {}x{} at {} spp, depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );

    let remaining = AtomicU32::new(height);
    let rows: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut rng = StdRng::seed_from_u64(scanline_seed(seed, y));
            let row: Vec<Color> = (0..width)
                .map(|x| render_pixel(camera, world, x, y, &mut rng))
                .collect();
            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            log::debug!("scanlines remaining: {left}");
            row
        })
        .collect();

    log::info!("render finished");

    ImageBuffer {
        width,
        height,
        pixels: rows.into_iter().flatten().collect(),
    }
}
