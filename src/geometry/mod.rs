//! Geometry primitives used to validate and render candidate corridor segments
//!
//! - `line`: rays and bounded segments, nearest-point queries
//! - `bounding_box`: (optionally placed) axis-aligned boxes, slab ray test
//! - `triangle`: barycentric coordinates and ray/triangle intersection

pub mod line;
pub mod bounding_box;
pub mod triangle;

pub use line::{ClosestPoints, Line};
pub use bounding_box::BoundingBox;
pub use triangle::Triangle;

use nalgebra::Vector3;

use crate::transforms::Transform;

/// Fixed list of shape-local points, pushed through the shape's placement transform lazily
#[derive(Debug, Clone)]
pub struct PlacedPoints<'a, const N: usize> {
    points: std::array::IntoIter<Vector3<f64>, N>,
    transform: Option<&'a Transform>,
}

impl<'a, const N: usize> PlacedPoints<'a, N> {
    pub(crate) fn new(points: [Vector3<f64>; N], transform: Option<&'a Transform>) -> Self {
        Self {
            points: points.into_iter(),
            transform,
        }
    }
}

impl<'a, const N: usize> Iterator for PlacedPoints<'a, N> {
    type Item = Vector3<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.points.next()?;
        Some(match self.transform {
            Some(t) => t.transform_point3(&point),
            None => point,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}
