//! Triangles with precomputed barycentric terms

use nalgebra::Vector3;

use crate::common::{to_point3, CorridorError, CorridorResult, RenderPoints};
use crate::geometry::{Line, PlacedPoints};
use crate::transforms::Transform;

/// Rays closer than this (cosine with the plane normal) to the plane count as parallel
const PARALLEL_TOLERANCE: f64 = 1e-8;
/// Relative barycentric denominator below which the vertices are collinear
const DEGENERATE_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct Triangle {
    v0: Vector3<f64>,
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    /// v1 - v0
    e1: Vector3<f64>,
    /// v2 - v0
    e2: Vector3<f64>,
    e1_dot_e1: f64,
    e1_dot_e2: f64,
    e2_dot_e2: f64,
    barycentric_denom_inv: f64,
    /// Unit normal, zero when degenerate
    plane_normal: Vector3<f64>,
    degenerate: bool,
    transform: Option<Transform>,
    transform_inv: Option<Transform>,
}

impl Triangle {
    pub fn new(v0: Vector3<f64>, v1: Vector3<f64>, v2: Vector3<f64>) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let e1_dot_e1 = e1.dot(&e1);
        let e1_dot_e2 = e1.dot(&e2);
        let e2_dot_e2 = e2.dot(&e2);

        let denom = e1_dot_e1 * e2_dot_e2 - e1_dot_e2 * e1_dot_e2;
        let degenerate = denom.abs() <= DEGENERATE_EPSILON * e1_dot_e1 * e2_dot_e2;
        let (barycentric_denom_inv, plane_normal) = if degenerate {
            (0.0, Vector3::zeros())
        } else {
            (1.0 / denom, e1.cross(&e2).normalize())
        };

        Self {
            v0,
            v1,
            v2,
            e1,
            e2,
            e1_dot_e1,
            e1_dot_e2,
            e2_dot_e2,
            barycentric_denom_inv,
            plane_normal,
            degenerate,
            transform: None,
            transform_inv: None,
        }
    }

    /// Triangle whose vertices are local to `transform`
    pub fn with_transform(
        v0: Vector3<f64>,
        v1: Vector3<f64>,
        v2: Vector3<f64>,
        transform: Transform,
    ) -> CorridorResult<Self> {
        CorridorError::check_dimension(3, transform.dimension())?;
        let mut triangle = Self::new(v0, v1, v2);
        triangle.transform_inv = Some(transform.inverse()?);
        triangle.transform = Some(transform);
        Ok(triangle)
    }

    pub fn vertices(&self) -> [Vector3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// True when the vertices are collinear; every query then reports nothing
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn plane_normal(&self) -> &Vector3<f64> {
        &self.plane_normal
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Express a world-frame line in triangle-local coordinates
    pub fn to_local(&self, line: &Line) -> CorridorResult<Line> {
        match &self.transform_inv {
            Some(inv) => line.transformed(inv),
            None => Ok(line.clone()),
        }
    }

    /// Barycentric weights `(b0, b1, b2)` of a point in the triangle's plane
    pub fn point_to_barycentric(&self, point: &Vector3<f64>) -> Option<Vector3<f64>> {
        if self.degenerate {
            return None;
        }

        let v0_to_pt = point - self.v0;
        let e1_dot = self.e1.dot(&v0_to_pt);
        let e2_dot = self.e2.dot(&v0_to_pt);

        let b1 = (self.e2_dot_e2 * e1_dot - self.e1_dot_e2 * e2_dot) * self.barycentric_denom_inv;
        let b2 = (self.e1_dot_e1 * e2_dot - self.e1_dot_e2 * e1_dot) * self.barycentric_denom_inv;
        Some(Vector3::new(1.0 - b1 - b2, b1, b2))
    }

    /// Where `line` pierces the triangle, if it does.
    ///
    /// The line must already be in the triangle's frame. Points behind a
    /// ray's start (or past a segment's end) do not count.
    pub fn ray_intersect(&self, line: &Line) -> CorridorResult<Option<Vector3<f64>>> {
        CorridorError::check_dimension(3, line.dimension())?;
        if self.degenerate {
            return Ok(None);
        }

        let origin = to_point3(line.start());
        let direction = to_point3(line.direction());
        let length = direction.norm();
        let unit_direction = direction / length;

        let denominator = self.plane_normal.dot(&unit_direction);
        if denominator.abs() < PARALLEL_TOLERANCE {
            return Ok(None);
        }

        let t = self.plane_normal.dot(&(self.v0 - origin)) / denominator;
        if t < 0.0 || (line.is_bounded() && t > length) {
            return Ok(None);
        }

        let intersect = origin + unit_direction * t;
        let inside = self
            .point_to_barycentric(&intersect)
            .map_or(false, |b| b.iter().all(|c| (0.0..=1.0).contains(c)));

        Ok(if inside { Some(intersect) } else { None })
    }

    /// Ray test for a world-frame line; the hit is reported in world coordinates
    pub fn ray_intersect_world(&self, line: &Line) -> CorridorResult<Option<Vector3<f64>>> {
        let hit = self.ray_intersect(&self.to_local(line)?)?;
        Ok(match &self.transform {
            Some(t) => hit.map(|p| t.transform_point3(&p)),
            None => hit,
        })
    }
}

impl RenderPoints for Triangle {
    type Points<'a> = PlacedPoints<'a, 4>;

    fn rendering_points(&self) -> Self::Points<'_> {
        PlacedPoints::new([self.v0, self.v1, self.v2, self.v0], self.transform.as_ref())
    }
}
