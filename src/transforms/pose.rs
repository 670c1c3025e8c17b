//! Pose: a located, oriented frame backed by a homogeneous transform

use std::fmt;

use nalgebra::DVector;

use crate::common::{binomial, CorridorError, CorridorResult};
use crate::transforms::transform::Transform;

/// Position plus unit orientation vector, kept consistent with `transform`.
///
/// The orientation is the canonical first basis vector pushed through the
/// transform as a direction. Fields are private so the three stay in sync;
/// every mutation goes through `set_from_transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    position: DVector<f64>,
    orientation: DVector<f64>,
    transform: Transform,
}

impl Pose {
    /// Build a pose from a position and its orientation angles.
    ///
    /// `angles` holds one angle per pair of axes: `[yaw]` for a 2D position,
    /// `[roll, pitch, yaw]` for a 3D one (radians).
    pub fn from_position_orientation(position: &[f64], angles: &[f64]) -> CorridorResult<Self> {
        let expected = binomial(position.len(), 2);
        if angles.len() != expected {
            return Err(CorridorError::configuration(format!(
                "{}-dimensional pose needs {} orientation angles, got {}",
                position.len(),
                expected,
                angles.len()
            )));
        }

        let transform = match position.len() {
            2 => Transform::from_offsets_2d(angles[0], position[0], position[1]),
            3 => Transform::from_offsets_3d(
                angles[0],
                angles[1],
                angles[2],
                position[0],
                position[1],
                position[2],
            ),
            d => {
                return Err(CorridorError::configuration(format!(
                    "{}-dimensional poses are not supported",
                    d
                )))
            }
        };

        Self::from_transform(transform)
    }

    /// Pose at the origin facing +x
    pub fn origin(dimension: usize) -> CorridorResult<Self> {
        Self::from_transform(Transform::identity(dimension)?)
    }

    pub fn from_transform(transform: Transform) -> CorridorResult<Self> {
        let mut base = DVector::zeros(transform.dimension());
        base[0] = 1.0;
        let orientation = transform.transform_vector(&base, false)?;
        Ok(Self {
            position: transform.translation(),
            orientation,
            transform,
        })
    }

    pub fn position(&self) -> &DVector<f64> {
        &self.position
    }

    pub fn orientation(&self) -> &DVector<f64> {
        &self.orientation
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Apply `t` after this pose's own transform, in place
    pub fn apply_transform(&mut self, t: &Transform) -> CorridorResult<()> {
        let combined = self.transform.then(t)?;
        *self = Self::from_transform(combined)?;
        Ok(())
    }

    /// New pose equal to this one with `t` applied; `self` is untouched
    pub fn transformed(&self, t: &Transform) -> CorridorResult<Pose> {
        Self::from_transform(self.transform.then(t)?)
    }

    /// Dot product of the two orientation vectors: 1 when aligned, -1 when opposite
    pub fn orientation_dot(&self, other: &Pose) -> f64 {
        self.orientation.dot(&other.orientation)
    }

    /// Cosine distance between orientations: 0 when aligned, 2 when opposite
    pub fn angular_distance(&self, other: &Pose) -> f64 {
        1.0 - self.orientation.dot(&other.orientation)
    }

    /// Euclidean distance between positions
    pub fn linear_distance(&self, other: &Pose) -> f64 {
        (&self.position - &other.position).norm()
    }

    /// Planar angles of the orientation vector, `atan2(o[i], o[j])` for every `j < i`
    pub fn angles(&self) -> Vec<f64> {
        let o = &self.orientation;
        let mut angles = Vec::with_capacity(binomial(o.len(), 2));
        for i in 1..o.len() {
            for j in 0..i {
                angles.push(o[i].atan2(o[j]));
            }
        }
        angles
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {:?} Orientation: {:?}",
            self.position.as_slice(),
            self.orientation.as_slice()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: &DVector<f64>, b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-10)
    }

    #[test]
    fn test_orientation_from_angles() {
        let pose = Pose::from_position_orientation(&[1.0, 2.0, 3.0], &[0.0, 0.0, FRAC_PI_2]).unwrap();
        assert!(close(pose.position(), &[1.0, 2.0, 3.0]));
        assert!(close(pose.orientation(), &[0.0, 1.0, 0.0]));

        let pose2 = Pose::from_position_orientation(&[0.0, 0.0], &[FRAC_PI_2]).unwrap();
        assert!(close(pose2.orientation(), &[0.0, 1.0]));
    }

    #[test]
    fn test_angle_count_must_match_dimension() {
        assert!(matches!(
            Pose::from_position_orientation(&[0.0, 0.0, 0.0], &[0.0]),
            Err(CorridorError::Configuration(_))
        ));
        assert!(Pose::from_position_orientation(&[0.0, 0.0], &[0.0, 0.0, 0.0]).is_err());
        assert!(Pose::from_position_orientation(&[0.0; 4], &[0.0; 6]).is_err());
    }

    #[test]
    fn test_transformed_leaves_original_untouched() {
        let pose = Pose::from_position_orientation(&[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
        let turn = Transform::from_offsets_3d(0.0, 0.0, FRAC_PI_2, 0.0, 0.0, 0.0);

        let moved = pose.transformed(&turn).unwrap();
        assert!(close(pose.position(), &[1.0, 0.0, 0.0]));
        assert!(close(moved.position(), &[0.0, 1.0, 0.0]));
        assert!(close(moved.orientation(), &[0.0, 1.0, 0.0]));

        let mut in_place = pose.clone();
        in_place.apply_transform(&turn).unwrap();
        assert_eq!(in_place, moved);
    }

    #[test]
    fn test_local_step_through_parent_transform() {
        // parent at (2, 0, 0) facing +y; a forward step of 1 lands at (2, 1, 0)
        let parent = Pose::from_position_orientation(&[2.0, 0.0, 0.0], &[0.0, 0.0, FRAC_PI_2]).unwrap();
        let step = Pose::from_position_orientation(&[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
        let child = step.transformed(parent.transform()).unwrap();
        assert!(close(child.position(), &[2.0, 1.0, 0.0]));
        assert!(close(child.orientation(), &[0.0, 1.0, 0.0]));

        // a chained quarter turn keeps rotating the same way
        let turn = Pose::from_position_orientation(&[0.0, 0.0, 0.0], &[0.0, 0.0, FRAC_PI_2]).unwrap();
        let turned = turn.transformed(parent.transform()).unwrap();
        assert!(close(turned.orientation(), &[-1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_distances() {
        let a = Pose::from_position_orientation(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
        let b = Pose::from_position_orientation(&[3.0, 4.0, 0.0], &[0.0, 0.0, std::f64::consts::PI]).unwrap();
        assert!(a.angular_distance(&a).abs() < 1e-12);
        assert!((a.angular_distance(&b) - 2.0).abs() < 1e-12);
        assert!((a.orientation_dot(&a) - 1.0).abs() < 1e-12);
        assert!((a.orientation_dot(&b) + 1.0).abs() < 1e-12);
        assert!((a.linear_distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_angles() {
        let pose = Pose::from_position_orientation(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.3]).unwrap();
        let angles = pose.angles();
        assert_eq!(angles.len(), 3);
        assert!((angles[0] - 0.3).abs() < 1e-12);

        assert!(Pose::origin(2).unwrap().angles()[0].abs() < 1e-12);
    }
}
