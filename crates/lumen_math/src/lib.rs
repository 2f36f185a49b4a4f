//! Geometry kernel for the lumen path tracer.
//!
//! Vector arithmetic comes from glam; this crate adds the scalar interval,
//! the time-carrying ray, and the axis-aligned bounding box used by the
//! acceleration structure.

// Re-export glam so downstream crates use one set of vector types
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_reexport() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }
}
