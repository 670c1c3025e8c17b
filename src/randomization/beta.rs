//! Beta generator scaled into [min, max]

use rand::RngCore;
use rand_distr::{Beta, Distribution};

use crate::common::{CorridorError, CorridorResult, ParameterGenerator};
use crate::randomization::pool::QuantizedPool;
use crate::randomization::{check_pool_size, check_range, check_resolution, grid_steps, snap_to_grid};

/// Samples `min + (max - min) * Beta(alpha, beta)`.
///
/// Quantization works as for [`UniformGenerator`](super::UniformGenerator).
/// Duplicate-free sampling takes the remaining grid value nearest to each beta
/// sample, so draws keep the distribution's shape until the pool thins out.
#[derive(Debug, Clone)]
pub struct BetaGenerator {
    min: f64,
    span: f64,
    resolution: Option<f64>,
    steps: usize,
    shape: Beta<f64>,
    pool: Option<QuantizedPool>,
}

impl BetaGenerator {
    pub fn new(
        alpha: f64,
        beta: f64,
        min: f64,
        max: f64,
        resolution: Option<f64>,
        duplicates: bool,
    ) -> CorridorResult<Self> {
        check_range(min, max)?;
        check_resolution(resolution, duplicates)?;
        let shape = Beta::new(alpha, beta).map_err(|e| {
            CorridorError::configuration(format!("beta parameters ({}, {}): {}", alpha, beta, e))
        })?;

        let steps = resolution.map_or(0, |res| grid_steps(min, max, res));
        if !duplicates {
            check_pool_size(steps)?;
        }
        let pool = match resolution {
            Some(res) if !duplicates => Some(QuantizedPool::new(min, res, steps)),
            _ => None,
        };

        Ok(Self {
            min,
            span: max - min,
            resolution,
            steps,
            shape,
            pool,
        })
    }

    pub fn remaining(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.remaining())
    }
}

impl ParameterGenerator for BetaGenerator {
    fn generate(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            let value = self.min + self.shape.sample(rng) * self.span;
            values.push(match (self.pool.as_mut(), self.resolution) {
                (Some(pool), _) => pool.draw_nearest(value),
                (None, Some(res)) => snap_to_grid(value, self.min, res, self.steps),
                (None, None) => value,
            });
        }
        values
    }

    fn reset(&mut self) {
        if let Some(pool) = self.pool.as_mut() {
            pool.reset();
        }
    }
}
