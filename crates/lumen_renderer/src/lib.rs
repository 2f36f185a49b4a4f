//! lumen renderer - CPU Monte Carlo path tracing.
//!
//! Scenes are graphs of [`Hittable`] primitives with shared [`Material`]s;
//! the [`Camera`] generates sampled rays and [`render`] estimates radiance
//! along them, scanline-parallel, into an [`ImageBuffer`].

mod bvh;
mod camera;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod sphere;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig, ConfigError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, render, ImageBuffer};
pub use sampling::{gen_f32, gen_range, random_in_unit_disk, random_unit_vector};
pub use sphere::Sphere;

/// Re-export the math kernel types used throughout the public API.
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
