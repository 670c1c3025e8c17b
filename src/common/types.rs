//! Common types used throughout corridor_gen

use std::collections::HashMap;

use nalgebra::{DVector, Vector3};

use crate::common::error::{CorridorError, CorridorResult};

/// Key naming the angular component of a weight/tolerance map
pub const ANG_DIST: &str = "ang_dist";
/// Key naming the linear component of a weight/tolerance map
pub const LIN_DIST: &str = "lin_dist";

/// Pair of angular/linear factors, used both for search-cost weighting and goal tolerances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceWeights {
    pub ang_dist: f64,
    pub lin_dist: f64,
}

impl DistanceWeights {
    pub fn new(ang_dist: f64, lin_dist: f64) -> Self {
        Self { ang_dist, lin_dist }
    }

    /// Build from a string-keyed map; both `"ang_dist"` and `"lin_dist"` must be present
    pub fn from_map(map: &HashMap<String, f64>) -> CorridorResult<Self> {
        let get = |key: &str| {
            map.get(key)
                .copied()
                .ok_or_else(|| CorridorError::configuration(format!("missing '{}' entry", key)))
        };
        Ok(Self::new(get(ANG_DIST)?, get(LIN_DIST)?))
    }

    /// Weighted sum `ang * ang_dist + lin * lin_dist`
    pub fn combine(&self, ang: f64, lin: f64) -> f64 {
        ang * self.ang_dist + lin * self.lin_dist
    }

    /// True when both distances are within these tolerances
    pub fn admits(&self, ang: f64, lin: f64) -> bool {
        ang <= self.ang_dist && lin <= self.lin_dist
    }
}

/// Lift a 2D or 3D point into 3D for rendering (missing axes are zero)
pub fn to_point3(v: &DVector<f64>) -> Vector3<f64> {
    let mut p = Vector3::zeros();
    for (i, value) in v.iter().take(3).enumerate() {
        p[i] = *value;
    }
    p
}

/// Binomial coefficient C(n, k)
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (0..k.min(n - k)).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
