use crate::{Interval, Ray};
use glam::Vec3;

/// Axis-aligned bounding box, stored as one interval per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Box spanning two corner points, in either order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Smallest box covering both inputs.
    pub fn union(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::union(&a.x, &b.x),
            y: Interval::union(&a.y, &b.y),
            z: Interval::union(&a.z, &b.z),
        }
    }

    /// Interval for axis `n` (0 = X, 1 = Y, 2 = Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Index of the axis with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let x = self.x.size();
        let y = self.y.size();
        let z = self.z.size();
        if x > y && x > z {
            0
        } else if y > z {
            1
        } else {
            2
        }
    }

    /// Slab test: does the ray pass through the box somewhere inside `ray_t`?
    ///
    /// A zero-extent axis counts as always inside, and a ray parallel to a
    /// slab reduces to an origin-inside test for that axis, so degenerate
    /// boxes and axis-aligned rays never produce a division blowup.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            if ax.size() == 0.0 {
                continue;
            }

            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir == 0.0 {
                if !ax.contains(origin) {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (ax.min - origin) * inv;
            let mut t1 = (ax.max - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Covers nothing; the identity for `union`.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
