//! Bounding volume hierarchy over shared scene objects.
//!
//! Construction is a deterministic longest-axis median split, so the same
//! input order always produces the same tree; traversal must agree with the
//! flat list it was built from, only faster.

use std::cmp::Ordering;
use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray};

use crate::hittable::{HitRecord, Hittable, HittableList};

pub enum BvhNode {
    /// Zero-object build. Hits nothing; callers should not create this
    /// knowingly, but it keeps an empty scene from crashing.
    Empty,
    Leaf {
        object: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
}

impl BvhNode {
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects)
    }

    pub fn from_list(list: HittableList) -> Self {
        Self::new(list.into_objects())
    }

    fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        if objects.len() == 1 {
            let object = objects.remove(0);
            return BvhNode::Leaf {
                bbox: object.bounding_box(),
                object,
            };
        }

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::union(&acc, &o.bounding_box()));
        let axis = bounds.longest_axis();

        // Order along the split axis by bounding-box minimum
        objects.sort_unstable_by(|a, b| {
            let a_min = a.bounding_box().axis_interval(axis).min;
            let b_min = b.bounding_box().axis_interval(axis).min;
            a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
        });

        let right = objects.split_off(objects.len() / 2);
        BvhNode::Branch {
            left: Box::new(Self::build(objects)),
            right: Box::new(Self::build(right)),
            bbox: bounds,
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { object, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                object.hit(ray, ray_t)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);
                // The right subtree only needs to beat the left's closest
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max));

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
