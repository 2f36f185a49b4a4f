//! Random sampling over a caller-supplied generator.
//!
//! Every function takes `&mut dyn RngCore` so materials and the camera stay
//! free of generator state; render workers each own their stream.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn gen_f32(mut rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform sample in `[lo, hi)`.
#[inline]
pub fn gen_range(mut rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    rng.gen_range(lo..hi)
}

/// Uniformly distributed unit vector (rejection sampling on the unit ball).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        // Discard near-zero candidates; normalizing those loses precision
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point in the unit disk on the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Jitter offset in the `[-0.5, 0.5]` square around a pixel center.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
