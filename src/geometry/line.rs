//! Lines: infinite rays or bounded segments, with nearest-point queries

use nalgebra::{DVector, Vector3};

use crate::common::{to_point3, CorridorError, CorridorResult, RenderPoints};
use crate::geometry::PlacedPoints;
use crate::transforms::Transform;

/// Relative threshold on the Gram determinant below which two directions are parallel
const PARALLEL_EPSILON: f64 = 1e-10;

/// Ray (`end == None`) or segment (`direction == end - start`)
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: DVector<f64>,
    direction: DVector<f64>,
    end: Option<DVector<f64>>,
}

/// Result of a nearest-point query between two lines
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestPoints {
    pub distance: f64,
    pub on_self: DVector<f64>,
    pub on_other: DVector<f64>,
    /// Parameter of `on_self` along `self` (`start + s * direction`)
    pub s: f64,
    /// Parameter of `on_other` along `other`
    pub t: f64,
}

impl Line {
    /// Infinite ray from `start` along `direction`
    pub fn ray(start: DVector<f64>, direction: DVector<f64>) -> CorridorResult<Self> {
        CorridorError::check_dimension(start.len(), direction.len())?;
        check_direction(&direction)?;
        Ok(Self {
            start,
            direction,
            end: None,
        })
    }

    /// Bounded segment from `start` to `end`
    pub fn segment(start: DVector<f64>, end: DVector<f64>) -> CorridorResult<Self> {
        CorridorError::check_dimension(start.len(), end.len())?;
        let direction = &end - &start;
        check_direction(&direction)?;
        Ok(Self {
            start,
            direction,
            end: Some(end),
        })
    }

    /// Bounded segment from `start` to `start + direction`
    pub fn segment_from_direction(start: DVector<f64>, direction: DVector<f64>) -> CorridorResult<Self> {
        CorridorError::check_dimension(start.len(), direction.len())?;
        let end = &start + &direction;
        Self::segment(start, end)
    }

    pub fn start(&self) -> &DVector<f64> {
        &self.start
    }

    pub fn direction(&self) -> &DVector<f64> {
        &self.direction
    }

    pub fn end(&self) -> Option<&DVector<f64>> {
        self.end.as_ref()
    }

    pub fn is_bounded(&self) -> bool {
        self.end.is_some()
    }

    pub fn dimension(&self) -> usize {
        self.start.len()
    }

    /// Largest valid parameter: 1 for a segment, infinity for a ray
    pub fn upper_bound(&self) -> f64 {
        if self.is_bounded() {
            1.0
        } else {
            f64::INFINITY
        }
    }

    /// `start + t * direction`
    pub fn point_at(&self, t: f64) -> DVector<f64> {
        &self.start + &self.direction * t
    }

    /// The same line expressed through `transform` (points move, the direction only rotates)
    pub fn transformed(&self, transform: &Transform) -> CorridorResult<Line> {
        let start = transform.transform_vector(&self.start, true)?;
        let direction = transform.transform_vector(&self.direction, false)?;
        let end = match &self.end {
            Some(end) => Some(transform.transform_vector(end, true)?),
            None => None,
        };
        Ok(Self {
            start,
            direction,
            end,
        })
    }

    /// Parameter of the point on this line nearest to `point`, clamped to the line's extent
    pub fn project_parameter(&self, point: &DVector<f64>) -> CorridorResult<f64> {
        CorridorError::check_dimension(self.dimension(), point.len())?;
        let t = (point - &self.start).dot(&self.direction) / self.direction.norm_squared();
        Ok(t.clamp(0.0, self.upper_bound()))
    }

    /// Nearest pair of points between this line and `other`.
    ///
    /// Near-parallel lines take the best of the endpoint-to-opposite-line
    /// projections. Otherwise the unconstrained minimum is clamped on `self`,
    /// the parameter on `other` is re-solved from it, and if that falls out of
    /// range it is clamped and the parameter on `self` re-solved in turn.
    pub fn closest_points(&self, other: &Line) -> CorridorResult<ClosestPoints> {
        CorridorError::check_dimension(self.dimension(), other.dimension())?;

        let d1 = &self.direction;
        let d2 = &other.direction;
        let r = &self.start - &other.start;
        let a = d1.norm_squared();
        let e = d2.norm_squared();
        let b = d1.dot(d2);
        let c = d1.dot(&r);
        let f = d2.dot(&r);
        let denom = a * e - b * b;

        let s_max = self.upper_bound();
        let t_max = other.upper_bound();

        if denom <= PARALLEL_EPSILON * a * e {
            let mut candidates = vec![(0.0, other.project_parameter(&self.start)?)];
            if let Some(end) = &self.end {
                candidates.push((1.0, other.project_parameter(end)?));
            }
            candidates.push((self.project_parameter(&other.start)?, 0.0));
            if let Some(end) = &other.end {
                candidates.push((self.project_parameter(end)?, 1.0));
            }

            let mut best = self.evaluate(other, candidates[0].0, candidates[0].1);
            for &(s, t) in &candidates[1..] {
                let candidate = self.evaluate(other, s, t);
                if candidate.distance < best.distance {
                    best = candidate;
                }
            }
            return Ok(best);
        }

        let mut s = ((b * f - c * e) / denom).clamp(0.0, s_max);
        let mut t = (b * s + f) / e;
        if t < 0.0 {
            t = 0.0;
            s = (-c / a).clamp(0.0, s_max);
        } else if t > t_max {
            t = t_max;
            s = ((b * t_max - c) / a).clamp(0.0, s_max);
        }

        Ok(self.evaluate(other, s, t))
    }

    fn evaluate(&self, other: &Line, s: f64, t: f64) -> ClosestPoints {
        let on_self = self.point_at(s);
        let on_other = other.point_at(t);
        ClosestPoints {
            distance: (&on_self - &on_other).norm(),
            on_self,
            on_other,
            s,
            t,
        }
    }

    /// Start and end as 3D points (rays render one direction-length long)
    pub(crate) fn start3(&self) -> Vector3<f64> {
        to_point3(&self.start)
    }

    pub(crate) fn end3(&self) -> Vector3<f64> {
        match &self.end {
            Some(end) => to_point3(end),
            None => to_point3(&self.point_at(1.0)),
        }
    }
}

fn check_direction(direction: &DVector<f64>) -> CorridorResult<()> {
    if direction.iter().all(|v| *v == 0.0) {
        return Err(CorridorError::configuration("line direction must be non-zero"));
    }
    Ok(())
}

impl RenderPoints for Line {
    type Points<'a> = PlacedPoints<'a, 2>;

    fn rendering_points(&self) -> Self::Points<'_> {
        PlacedPoints::new([self.start3(), self.end3()], None)
    }
}
