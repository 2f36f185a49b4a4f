//! Scene builders handed to the renderer.
//!
//! Scenes are graphs of reference-counted spheres and materials; callers
//! wrap the returned list in a BVH before rendering.

use std::sync::Arc;

use lumen_math::Vec3;
use lumen_renderer::{
    gen_f32, gen_range, Color, Dielectric, HittableList, Lambertian, Metal, Sphere,
};
use rand::RngCore;

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

fn random_color_in(rng: &mut dyn RngCore, lo: f32, hi: f32) -> Color {
    Color::new(
        gen_range(rng, lo, hi),
        gen_range(rng, lo, hi),
        gen_range(rng, lo, hi),
    )
}

/// The showcase scene: a gray ground sphere, a 22x22 field of small
/// randomized spheres (diffuse ones rise during the shutter for motion
/// blur), and three large feature spheres.
pub fn cover(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Lambertian::new(Color::splat(0.5)));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep the field clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                let material = Arc::new(Lambertian::new(albedo));
                let center_end = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.add(Arc::new(Sphere::new_moving(
                    center, center_end, 0.2, material,
                )));
            } else if choose_mat < 0.95 {
                let albedo = random_color_in(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                let material = Arc::new(Metal::new(albedo, fuzz));
                world.add(Arc::new(Sphere::new(center, 0.2, material)));
            } else {
                let material = Arc::new(Dielectric::new(1.5));
                world.add(Arc::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}

/// Small static demo: ground, a diffuse center sphere, a hollow glass
/// sphere (outer shell plus an air bubble), and a rough metal sphere.
pub fn three_spheres() -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Dielectric::new(1.5));
    let bubble = Arc::new(Dielectric::new(1.0 / 1.5));
    let metal = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        ground,
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.2),
        0.5,
        center,
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        glass,
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.4,
        bubble,
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal)));

    world
}
