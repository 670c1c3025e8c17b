//! Normal generator with optional quantization

use rand::RngCore;
use rand_distr::{Distribution, Normal};

use crate::common::{CorridorError, CorridorResult, ParameterGenerator};
use crate::randomization::check_resolution;

/// Samples from N(mean, std).
///
/// Quantization snaps the zero-mean deviation before the mean is added back,
/// so the grid spacing does not depend on the mean.
#[derive(Debug, Clone)]
pub struct NormalGenerator {
    mean: f64,
    std: f64,
    resolution: Option<f64>,
    deviation: Normal<f64>,
}

impl NormalGenerator {
    pub fn new(mean: f64, std: f64, resolution: Option<f64>) -> CorridorResult<Self> {
        check_resolution(resolution, true)?;
        if !mean.is_finite() {
            return Err(CorridorError::configuration(format!("normal mean must be finite, got {}", mean)));
        }
        if !(std >= 0.0 && std.is_finite()) {
            return Err(CorridorError::configuration(format!(
                "normal std must be finite and non-negative, got {}",
                std
            )));
        }
        let deviation = Normal::new(0.0, std)
            .map_err(|e| CorridorError::configuration(format!("normal std {}: {}", std, e)))?;
        Ok(Self {
            mean,
            std,
            resolution,
            deviation,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl ParameterGenerator for NormalGenerator {
    fn generate(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        let (mean, deviation) = (self.mean, &self.deviation);
        match self.resolution {
            Some(res) => (0..n)
                .map(|_| mean + (deviation.sample(rng) / res).round() * res)
                .collect(),
            None => (0..n).map(|_| mean + deviation.sample(rng)).collect(),
        }
    }
}
