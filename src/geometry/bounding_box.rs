//! Axis-aligned bounding boxes with an optional placement transform

use nalgebra::Vector3;

use crate::common::{CorridorError, CorridorResult, RenderPoints};
use crate::geometry::{Line, PlacedPoints};
use crate::transforms::Transform;

/// Box spanning `min..=max` in its own local frame, placed in the world by `transform`
#[derive(Debug, Clone)]
pub struct BoundingBox {
    min: Vector3<f64>,
    max: Vector3<f64>,
    transform: Option<Transform>,
    transform_inv: Option<Transform>,
}

impl BoundingBox {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>, transform: Option<Transform>) -> CorridorResult<Self> {
        if (0..3).any(|i| min[i] > max[i]) {
            return Err(CorridorError::configuration(format!(
                "bounding box min {:?} exceeds max {:?}",
                min.as_slice(),
                max.as_slice()
            )));
        }
        let transform_inv = match &transform {
            Some(t) => {
                CorridorError::check_dimension(3, t.dimension())?;
                Some(t.inverse()?)
            }
            None => None,
        };
        Ok(Self {
            min,
            max,
            transform,
            transform_inv,
        })
    }

    pub fn min(&self) -> &Vector3<f64> {
        &self.min
    }

    pub fn max(&self) -> &Vector3<f64> {
        &self.max
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Whether a box-local point lies inside the box (faces included)
    pub fn contains_point(&self, point: &Vector3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Express a world-frame line in box-local coordinates
    pub fn to_local(&self, line: &Line) -> CorridorResult<Line> {
        match &self.transform_inv {
            Some(inv) => line.transformed(inv),
            None => Ok(line.clone()),
        }
    }

    /// Slab test for a box-local line.
    ///
    /// Rays start at parameter 0 and run forever; segments stop at parameter 1.
    /// An axis the line runs parallel to takes no reciprocal: the line either
    /// lies between that pair of faces or misses the box.
    pub fn ray_intersect(&self, line: &Line) -> CorridorResult<bool> {
        CorridorError::check_dimension(3, line.dimension())?;
        let origin = line.start();
        let direction = line.direction();

        let mut t_min: f64 = 0.0;
        let mut t_max = line.upper_bound();
        for i in 0..3 {
            if direction[i] == 0.0 {
                if origin[i] < self.min[i] || origin[i] > self.max[i] {
                    return Ok(false);
                }
                continue;
            }

            let dir_inv = 1.0 / direction[i];
            let (near, far) = if dir_inv > 0.0 {
                (self.min[i], self.max[i])
            } else {
                (self.max[i], self.min[i])
            };

            t_min = ((near - origin[i]) * dir_inv).max(t_min);
            t_max = ((far - origin[i]) * dir_inv).min(t_max);
        }

        Ok(t_min <= t_max)
    }

    /// Slab test for a world-frame line
    pub fn ray_intersect_world(&self, line: &Line) -> CorridorResult<bool> {
        self.ray_intersect(&self.to_local(line)?)
    }
}

impl RenderPoints for BoundingBox {
    type Points<'a> = PlacedPoints<'a, 16>;

    /// Wireframe walk: bottom face loop, then up and around the vertical edges
    fn rendering_points(&self) -> Self::Points<'_> {
        let (lo, hi) = (&self.min, &self.max);
        let points = [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(lo.x, lo.y, hi.z),
        ];
        PlacedPoints::new(points, self.transform.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use std::f64::consts::FRAC_PI_4;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0), None).unwrap()
    }

    fn ray(origin: [f64; 3], direction: [f64; 3]) -> Line {
        Line::ray(DVector::from_row_slice(&origin), DVector::from_row_slice(&direction)).unwrap()
    }

    #[test]
    fn test_min_must_not_exceed_max() {
        let result = BoundingBox::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 1.0), None);
        assert!(matches!(result, Err(CorridorError::Configuration(_))));

        let flat = BoundingBox::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 0.0), None);
        assert!(flat.is_ok());

        let planar = Transform::from_offsets_2d(0.0, 0.0, 0.0);
        assert!(matches!(
            BoundingBox::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), Some(planar)),
            Err(CorridorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_contains_point() {
        let b = unit_box();
        assert!(b.contains_point(&Vector3::zeros()));
        assert!(b.contains_point(&Vector3::new(1.0, -1.0, 0.5)));
        assert!(!b.contains_point(&Vector3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_rays_from_center_always_hit() {
        let b = unit_box();
        let axes = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        for direction in &axes {
            assert!(b.ray_intersect(&ray([0.0, 0.0, 0.0], *direction)).unwrap());
        }
        assert!(b.ray_intersect(&ray([0.0, 0.0, 0.0], [0.3, -0.2, 0.9])).unwrap());
    }

    #[test]
    fn test_rays_pointing_away_miss() {
        let b = unit_box();
        assert!(!b.ray_intersect(&ray([3.0, 0.0, 0.0], [1.0, 0.0, 0.0])).unwrap());
        assert!(!b.ray_intersect(&ray([0.0, -3.0, 0.0], [0.0, -1.0, 0.0])).unwrap());
        assert!(!b.ray_intersect(&ray([2.0, 2.0, 2.0], [1.0, 1.0, 1.0])).unwrap());
        // parallel to the x slabs but outside them
        assert!(!b.ray_intersect(&ray([0.0, 2.0, 0.0], [1.0, 0.0, 0.0])).unwrap());
    }

    #[test]
    fn test_ray_towards_box_hits() {
        let b = unit_box();
        assert!(b.ray_intersect(&ray([-5.0, 0.5, 0.5], [1.0, 0.0, 0.0])).unwrap());
        assert!(b.ray_intersect(&ray([-5.0, -5.0, -5.0], [1.0, 1.0, 1.0])).unwrap());
        assert!(!b.ray_intersect(&ray([-5.0, 0.0, 0.0], [1.0, 2.0, 0.0])).unwrap());
    }

    #[test]
    fn test_segment_stops_short() {
        let b = unit_box();
        let short = Line::segment(
            DVector::from_row_slice(&[-5.0, 0.0, 0.0]),
            DVector::from_row_slice(&[-3.0, 0.0, 0.0]),
        )
        .unwrap();
        assert!(!b.ray_intersect(&short).unwrap());

        let long = Line::segment(
            DVector::from_row_slice(&[-5.0, 0.0, 0.0]),
            DVector::from_row_slice(&[-0.5, 0.0, 0.0]),
        )
        .unwrap();
        assert!(b.ray_intersect(&long).unwrap());
    }

    #[test]
    fn test_placed_box() {
        // box rotated 45 degrees about z and lifted to z = 5
        let place = Transform::from_offsets_3d(0.0, 0.0, FRAC_PI_4, 0.0, 0.0, 5.0);
        let b = BoundingBox::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0), Some(place)).unwrap();

        assert!(b.ray_intersect_world(&ray([0.0, 0.0, 0.0], [0.0, 0.0, 1.0])).unwrap());
        // corner of the rotated box reaches x = sqrt(2) at y = 0
        assert!(b.ray_intersect_world(&ray([1.3, 0.0, 0.0], [0.0, 0.0, 1.0])).unwrap());
        assert!(!b.ray_intersect_world(&ray([1.5, 0.0, 0.0], [0.0, 0.0, 1.0])).unwrap());

        let points: Vec<_> = b.rendering_points().collect();
        assert_eq!(points.len(), 16);
        assert!((points[0] - Vector3::new(0.0, -(2.0_f64).sqrt(), 4.0)).norm() < 1e-12);
    }

    #[test]
    fn test_ray_intersect_is_repeatable() {
        let b = unit_box();
        let r = ray([-2.0, 0.1, 0.3], [1.0, 0.05, -0.02]);
        assert_eq!(b.ray_intersect(&r).unwrap(), b.ray_intersect(&r).unwrap());
    }
}
