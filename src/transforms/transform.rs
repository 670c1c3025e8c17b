//! Homogeneous rigid transforms in 2D and 3D
//!
//! Transforms are row-major: a point is a row vector that right-multiplies
//! the rotation block, and the translation lives in the last row.
//! `a.then(&b)` (equivalently `compose_transforms(&a, &b)`) is the transform
//! that applies `a` first and `b` second, i.e. the matrix product `A * B`.

use nalgebra::{DMatrix, DVector, Vector3};

use crate::common::{CorridorError, CorridorResult};

const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// A (D+1)x(D+1) homogeneous rigid transform, D = 2 or 3
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: DMatrix<f64>,
}

impl Transform {
    /// Identity transform for `dimension`-dimensional points
    pub fn identity(dimension: usize) -> CorridorResult<Self> {
        check_supported(dimension)?;
        Ok(Self {
            matrix: DMatrix::identity(dimension + 1, dimension + 1),
        })
    }

    /// 3D transform rotating by yaw * pitch * roll (yaw outermost) then translating.
    ///
    /// Angles are in radians. The rotation block stores the transpose of the
    /// column-convention matrix `Rz(yaw) * Ry(pitch) * Rx(roll)` so that row
    /// vectors rotate the same way column vectors would.
    pub fn from_offsets_3d(roll: f64, pitch: f64, yaw: f64, tx: f64, ty: f64, tz: f64) -> Self {
        let (r_sin, r_cos) = roll.sin_cos();
        let (p_sin, p_cos) = pitch.sin_cos();
        let (y_sin, y_cos) = yaw.sin_cos();

        let mut m = DMatrix::identity(4, 4);
        // column-convention entries written transposed
        m[(0, 0)] = y_cos * p_cos;
        m[(1, 0)] = y_cos * p_sin * r_sin - y_sin * r_cos;
        m[(2, 0)] = y_cos * p_sin * r_cos + y_sin * r_sin;
        m[(0, 1)] = y_sin * p_cos;
        m[(1, 1)] = y_sin * p_sin * r_sin + y_cos * r_cos;
        m[(2, 1)] = y_sin * p_sin * r_cos - y_cos * r_sin;
        m[(0, 2)] = -p_sin;
        m[(1, 2)] = p_cos * r_sin;
        m[(2, 2)] = p_cos * r_cos;
        m[(3, 0)] = tx;
        m[(3, 1)] = ty;
        m[(3, 2)] = tz;

        Self { matrix: m }
    }

    /// 2D transform rotating by `yaw` (radians, counter-clockwise) then translating
    pub fn from_offsets_2d(yaw: f64, tx: f64, ty: f64) -> Self {
        let (y_sin, y_cos) = yaw.sin_cos();

        let mut m = DMatrix::identity(3, 3);
        m[(0, 0)] = y_cos;
        m[(0, 1)] = y_sin;
        m[(1, 0)] = -y_sin;
        m[(1, 1)] = y_cos;
        m[(2, 0)] = tx;
        m[(2, 1)] = ty;

        Self { matrix: m }
    }

    /// Wrap an existing row-major homogeneous matrix.
    ///
    /// The matrix must be 3x3 or 4x4, its last column must be `(0, .., 0, 1)`
    /// and its rotation block must be orthonormal.
    pub fn from_matrix(matrix: DMatrix<f64>) -> CorridorResult<Self> {
        if !matrix.is_square() {
            return Err(CorridorError::configuration(format!(
                "transform matrix must be square, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        let d = matrix.nrows().saturating_sub(1);
        check_supported(d)?;

        for row in 0..=d {
            let expected = if row == d { 1.0 } else { 0.0 };
            if (matrix[(row, d)] - expected).abs() > ORTHONORMAL_TOLERANCE {
                return Err(CorridorError::configuration(
                    "last column of a homogeneous transform must be (0, .., 0, 1)",
                ));
            }
        }

        let rotation = matrix.view((0, 0), (d, d));
        let gram = rotation.tr_mul(&rotation);
        if (gram - DMatrix::<f64>::identity(d, d)).amax() > ORTHONORMAL_TOLERANCE {
            return Err(CorridorError::configuration(
                "rotation block of a rigid transform must be orthonormal",
            ));
        }

        Ok(Self { matrix })
    }

    /// Point dimension D handled by this transform
    pub fn dimension(&self) -> usize {
        self.matrix.nrows() - 1
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Translation row
    pub fn translation(&self) -> DVector<f64> {
        let d = self.dimension();
        DVector::from_fn(d, |i, _| self.matrix[(d, i)])
    }

    /// Transform a point (`apply_translation = true`) or a free direction (`false`)
    pub fn transform_vector(
        &self,
        point: &DVector<f64>,
        apply_translation: bool,
    ) -> CorridorResult<DVector<f64>> {
        let d = self.dimension();
        CorridorError::check_dimension(d, point.len())?;

        let rotation = self.matrix.view((0, 0), (d, d));
        let mut out: DVector<f64> = rotation.tr_mul(point);
        if apply_translation {
            for i in 0..d {
                out[i] += self.matrix[(d, i)];
            }
        }
        Ok(out)
    }

    /// Transform a 3D point for rendering; a 2D transform moves x/y and keeps z
    pub fn transform_point3(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let d = self.dimension().min(3);
        let mut out = *point;
        for col in 0..d {
            out[col] = self.matrix[(d, col)];
            for row in 0..d {
                out[col] += point[row] * self.matrix[(row, col)];
            }
        }
        out
    }

    /// The transform equivalent to applying `self` and then `next`
    pub fn then(&self, next: &Transform) -> CorridorResult<Transform> {
        CorridorError::check_dimension(self.dimension(), next.dimension())?;
        Ok(Self {
            matrix: &self.matrix * &next.matrix,
        })
    }

    pub fn inverse(&self) -> CorridorResult<Transform> {
        self.matrix
            .clone()
            .try_inverse()
            .map(|matrix| Self { matrix })
            .ok_or_else(|| CorridorError::Numerical("transform is not invertible".to_string()))
    }

    /// Embed a 2D transform as a rotation about z with an xy translation
    pub fn to_3d(&self) -> CorridorResult<Transform> {
        CorridorError::check_dimension(2, self.dimension())?;
        let mut m = DMatrix::identity(4, 4);
        for row in 0..2 {
            for col in 0..2 {
                m[(row, col)] = self.matrix[(row, col)];
            }
        }
        m[(3, 0)] = self.matrix[(2, 0)];
        m[(3, 1)] = self.matrix[(2, 1)];
        Ok(Self { matrix: m })
    }

    /// Project a 3D transform onto the xy plane.
    ///
    /// Fails when the transform rotates out of the plane (roll/pitch present).
    pub fn to_2d(&self) -> CorridorResult<Transform> {
        CorridorError::check_dimension(3, self.dimension())?;
        let mut m = DMatrix::identity(3, 3);
        for row in 0..2 {
            for col in 0..2 {
                m[(row, col)] = self.matrix[(row, col)];
            }
        }
        m[(2, 0)] = self.matrix[(3, 0)];
        m[(2, 1)] = self.matrix[(3, 1)];
        Self::from_matrix(m)
    }
}

/// Transform equivalent to applying `a` then `b`
pub fn compose_transforms(a: &Transform, b: &Transform) -> CorridorResult<Transform> {
    a.then(b)
}

fn check_supported(dimension: usize) -> CorridorResult<()> {
    match dimension {
        2 | 3 => Ok(()),
        d => Err(CorridorError::configuration(format!(
            "{}-dimensional transforms are not supported",
            d
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_close(a: &DVector<f64>, b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-10, "{} != {}", a, DVector::from_row_slice(b));
        }
    }

    #[test]
    fn test_yaw_rotates_x_onto_y() {
        let t = Transform::from_offsets_3d(0.0, 0.0, FRAC_PI_2, 0.0, 0.0, 0.0);
        let x = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert_vec_close(&t.transform_vector(&x, true).unwrap(), &[0.0, 1.0, 0.0]);

        let t2 = Transform::from_offsets_2d(FRAC_PI_2, 1.0, 1.0);
        let x2 = DVector::from_vec(vec![1.0, 0.0]);
        assert_vec_close(&t2.transform_vector(&x2, true).unwrap(), &[1.0, 2.0]);
        assert_vec_close(&t2.transform_vector(&x2, false).unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn test_pitch_and_roll() {
        // positive pitch tips +x down towards -z
        let t = Transform::from_offsets_3d(0.0, FRAC_PI_2, 0.0, 0.0, 0.0, 0.0);
        let x = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert_vec_close(&t.transform_vector(&x, false).unwrap(), &[0.0, 0.0, -1.0]);

        let t = Transform::from_offsets_3d(FRAC_PI_2, 0.0, 0.0, 0.0, 0.0, 0.0);
        let y = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        assert_vec_close(&t.transform_vector(&y, false).unwrap(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_translation_only_applies_to_points() {
        let t = Transform::from_offsets_3d(0.0, 0.0, 0.0, 1.0, 2.0, 3.0);
        let p = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        assert_vec_close(&t.transform_vector(&p, true).unwrap(), &[2.0, 3.0, 4.0]);
        assert_vec_close(&t.transform_vector(&p, false).unwrap(), &[1.0, 1.0, 1.0]);
        assert_vec_close(&t.translation(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let t = Transform::from_offsets_3d(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let p = DVector::from_vec(vec![1.0, 1.0]);
        assert!(matches!(
            t.transform_vector(&p, true),
            Err(CorridorError::DimensionMismatch { expected: 3, found: 2 })
        ));

        let t2 = Transform::from_offsets_2d(0.0, 0.0, 0.0);
        assert!(t.then(&t2).is_err());
    }

    #[test]
    fn test_composition_order() {
        // rotate then translate differs from translate then rotate
        let rotate = Transform::from_offsets_3d(0.0, 0.0, FRAC_PI_2, 0.0, 0.0, 0.0);
        let shift = Transform::from_offsets_3d(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let p = DVector::from_vec(vec![1.0, 0.0, 0.0]);

        let rotate_first = compose_transforms(&rotate, &shift).unwrap();
        assert_vec_close(&rotate_first.transform_vector(&p, true).unwrap(), &[1.0, 1.0, 0.0]);

        let shift_first = compose_transforms(&shift, &rotate).unwrap();
        assert_vec_close(&shift_first.transform_vector(&p, true).unwrap(), &[0.0, 2.0, 0.0]);

        // chained application agrees with the composed transform
        let stepwise = shift
            .transform_vector(&rotate.transform_vector(&p, true).unwrap(), true)
            .unwrap();
        assert_vec_close(&stepwise, &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_compose_with_inverse_is_identity() {
        let cases = [
            (0.3, -0.7, 1.2, 1.0, -2.0, 0.5),
            (1.5, 0.2, -2.9, -4.0, 0.0, 10.0),
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        ];
        for &(r, p, y, tx, ty, tz) in &cases {
            let t = Transform::from_offsets_3d(r, p, y, tx, ty, tz);
            let inv = t.inverse().unwrap();
            let id = compose_transforms(&t, &inv).unwrap();
            assert!((id.matrix() - DMatrix::<f64>::identity(4, 4)).amax() < 1e-10);

            let point = DVector::from_vec(vec![0.4, -1.3, 2.2]);
            let there = t.transform_vector(&point, true).unwrap();
            let back = inv.transform_vector(&there, true).unwrap();
            assert!((back - &point).amax() < 1e-10);
        }
    }

    #[test]
    fn test_transform_point3_matches_transform_vector() {
        let t = Transform::from_offsets_3d(0.2, -0.4, 1.1, 1.0, 2.0, 3.0);
        let p = Vector3::new(0.5, -1.0, 2.0);
        let expected = t
            .transform_vector(&DVector::from_column_slice(p.as_slice()), true)
            .unwrap();
        let got = t.transform_point3(&p);
        for i in 0..3 {
            assert!((got[i] - expected[i]).abs() < 1e-12);
        }

        let t2 = Transform::from_offsets_2d(FRAC_PI_2, 1.0, 0.0);
        assert!((t2.transform_point3(&Vector3::new(1.0, 0.0, 4.0)) - Vector3::new(1.0, 1.0, 4.0)).norm() < 1e-12);
    }

    #[test]
    fn test_from_matrix_validation() {
        let t = Transform::from_offsets_3d(0.1, 0.2, 0.3, 1.0, 2.0, 3.0);
        assert!(Transform::from_matrix(t.matrix().clone()).is_ok());

        let mut skewed = t.matrix().clone();
        skewed[(0, 0)] *= 2.0;
        assert!(matches!(
            Transform::from_matrix(skewed),
            Err(CorridorError::Configuration(_))
        ));
        assert!(Transform::from_matrix(DMatrix::identity(5, 5)).is_err());
        assert!(Transform::from_matrix(DMatrix::identity(3, 4)).is_err());
    }

    #[test]
    fn test_2d_3d_conversion() {
        let t2 = Transform::from_offsets_2d(0.4, 1.0, -2.0);
        let t3 = t2.to_3d().unwrap();
        let expected = Transform::from_offsets_3d(0.0, 0.0, 0.4, 1.0, -2.0, 0.0);
        assert!((t3.matrix() - expected.matrix()).amax() < 1e-12);

        let back = t3.to_2d().unwrap();
        assert!((back.matrix() - t2.matrix()).amax() < 1e-12);

        let tilted = Transform::from_offsets_3d(0.5, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(tilted.to_2d().is_err());
    }
}
