//! The hittable contract and the flat scene aggregate.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::material::Material;

/// Record of the closest ray-surface intersection found so far.
///
/// Holds a non-owning view of the struck surface's material; the scene graph
/// outlives the render pass, so the borrow is good for the whole traversal.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Intersection point in world space.
    pub point: Vec3,
    /// Unit normal, always facing against the incoming ray.
    pub normal: Vec3,
    /// Ray parameter at the intersection.
    pub t: f32,
    /// True when the outward surface normal opposed the ray (outside hit).
    pub front_face: bool,
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal, flipping it to
    /// oppose the ray and remembering which side was struck.
    pub fn new(
        ray: &Ray,
        t: f32,
        point: Vec3,
        outward_normal: Vec3,
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Anything a ray can strike.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `ray` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Bounding box, constant after construction.
    fn bounding_box(&self) -> Aabb;
}

/// Unordered collection of shared scene objects.
///
/// Children are reference-counted so an acceleration structure built from
/// the same list shares the object graph instead of copying it.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::union(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Hand the shared children over, e.g. to a BVH build.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord> = None;
        let mut search = ray_t;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, search) {
                // Shrink the window so farther candidates prune early
                search.max = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
