//! Surface scattering models.

use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_unit_vector};

/// RGB color in linear space, values nominally in `[0, 1]`.
pub type Color = Vec3;

/// Outcome of a successful scatter.
pub struct Scatter {
    /// Color multiplier applied to light carried back along the new ray.
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How a surface responds to an incoming ray.
///
/// Implementations are pure: one instance is shared across every primitive
/// that references it and across all render workers, so the only mutable
/// state is the generator the caller passes in.
pub trait Material: Send + Sync {
    /// Produce an attenuated outgoing ray, or `None` to absorb.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter>;
}

/// Diffuse surface with cosine-weighted bounce.
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let mut direction = rec.normal + random_unit_vector(rng);

        // The random vector can nearly cancel the normal
        if direction.length_squared() < 1e-8 {
            direction = rec.normal;
        }

        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.point, direction, ray_in.time),
        })
    }
}

/// Mirror reflector with an optional fuzz perturbation.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// `fuzz` 0 is a perfect mirror, 1 the roughest; out-of-range values
    /// are clamped.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(ray_in.direction, rec.normal);
        let direction = reflected.normalize() + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the ray under the surface; absorb those
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.point, direction, ray_in.time),
        })
    }
}

/// Clear refractive surface (glass, water, diamond).
pub struct Dielectric {
    /// Index of the material relative to the enclosing medium.
    refraction_index: f32,
}

impl Dielectric {
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }

    /// Schlick's polynomial approximation of angle-dependent reflectance.
    fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        // Glass absorbs nothing in this model
        let attenuation = Color::ONE;
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = ri * sin_theta > 1.0;
        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(Scatter {
            attenuation,
            scattered: Ray::new(rec.point, direction, ray_in.time),
        })
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with relative index
/// `etai_over_etat`.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::sphere::Sphere;
    use lumen_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn unit_sphere_hit<'a>(material: &'a dyn Material) -> (Ray, HitRecord<'a>) {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z, 0.0);
        let rec = HitRecord::new(&ray, 1.0, Vec3::new(0.0, 0.0, 1.0), Vec3::Z, material);
        (ray, rec)
    }

    #[test]
    fn lambertian_always_scatters_with_bounded_attenuation() {
        let mat = Lambertian::new(Color::new(0.2, 0.5, 0.9));
        let (ray, rec) = unit_sphere_hit(&mat);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let s = mat.scatter(&ray, &rec, &mut rng).expect("never absorbs");
            for channel in [s.attenuation.x, s.attenuation.y, s.attenuation.z] {
                assert!((0.0..=1.0).contains(&channel));
            }
            // Bounce leaves from the hit point, same side as the normal
            assert_eq!(s.scattered.origin, rec.point);
            assert!(s.scattered.direction.dot(rec.normal) > -1e-6);
        }
    }

    #[test]
    fn metal_with_zero_fuzz_mirrors_exactly() {
        let mat = Metal::new(Color::splat(0.8), 0.0);
        let mut rng = StdRng::seed_from_u64(11);

        // 45-degree incidence on a +Y surface
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);
        let rec = HitRecord::new(&ray, 1.0, Vec3::ZERO, Vec3::Y, &mat);

        let s = mat.scatter(&ray, &rec, &mut rng).expect("reflects");
        let d = s.scattered.direction.normalize();
        let incoming = ray.direction.normalize();

        // Mirror law: the normal component flips, the tangent survives
        assert!((d.dot(rec.normal) - (-incoming).dot(rec.normal)).abs() < 1e-6);
        assert!((d - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn metal_absorbs_rays_fuzzed_under_the_surface() {
        // Maximum fuzz at grazing incidence drives some bounces under the
        // surface; those must come back as None rather than leak through.
        let mat = Metal::new(Color::splat(0.8), 1.0);
        let mut rng = StdRng::seed_from_u64(11);

        let ray = Ray::new(
            Vec3::new(-10.0, 0.01, 0.0),
            Vec3::new(10.0, -0.01, 0.0),
            0.0,
        );
        let rec = HitRecord::new(&ray, 1.0, Vec3::ZERO, Vec3::Y, &mat);

        let mut absorbed = 0;
        for _ in 0..200 {
            if mat.scatter(&ray, &rec, &mut rng).is_none() {
                absorbed += 1;
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn index_matched_dielectric_passes_straight_through() {
        let mat = Dielectric::new(1.0);
        let mut rng = StdRng::seed_from_u64(11);

        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.3, -1.0, 0.1), 0.0);
        let rec = HitRecord::new(&ray, 2.0, Vec3::ZERO, Vec3::Y, &mat);

        // r0 is 0 at index 1, so Schlick never wins and refraction is a no-op
        for _ in 0..50 {
            let s = mat.scatter(&ray, &rec, &mut rng).expect("never absorbs");
            let d = s.scattered.direction.normalize();
            assert!((d - ray.direction.normalize()).length() < 1e-5);
            assert_eq!(s.attenuation, Color::ONE);
        }
    }

    #[test]
    fn dielectric_reflects_under_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(11);

        // Leaving glass at a grazing angle: ri = 1.5, sin_theta near 1
        let glass = Arc::new(Dielectric::new(1.5));
        let sphere = Sphere::new(Vec3::ZERO, 1.0, glass);
        let ray = Ray::new(
            Vec3::new(-0.99, 0.0, 0.0),
            Vec3::new(0.05, 1.0, 0.0),
            0.0,
        );
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("exits the sphere");
        assert!(!rec.front_face);

        let s = mat.scatter(&ray, &rec, &mut rng).expect("never absorbs");
        // Past the critical angle the ray must mirror, not refract
        let unit_direction = ray.direction.normalize();
        let expected = unit_direction - 2.0 * unit_direction.dot(rec.normal) * rec.normal;
        assert!((s.scattered.direction.normalize() - expected.normalize()).length() < 1e-5);
        assert!(s.scattered.direction.dot(rec.normal) > 0.0);
    }

    #[test]
    fn schlick_reflectance_bounds() {
        // Normal incidence against glass
        let r0 = Dielectric::reflectance(1.0, 1.5);
        assert!((r0 - 0.04).abs() < 1e-3);
        // Grazing incidence approaches total reflection
        let grazing = Dielectric::reflectance(0.0, 1.5);
        assert!((grazing - 1.0).abs() < 1e-6);
    }
}
