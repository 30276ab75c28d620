//! Core traits for helixcrate

use crate::{HelixMesh, HelixVertex, Point3f};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

impl Drawable for [HelixVertex] {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        let Some(first) = self.first() else {
            return (Point3f::origin(), Point3f::origin());
        };

        let mut min = first.point();
        let mut max = min;

        for vertex in self {
            let p = vertex.point();
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }
}

impl Drawable for HelixMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        self.vertices.bounding_box()
    }
}
