//! Uniform generator with optional quantization and duplicate-free sampling

use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

use crate::common::{CorridorResult, ParameterGenerator};
use crate::randomization::pool::QuantizedPool;
use crate::randomization::{check_pool_size, check_range, check_resolution, grid_steps, snap_to_grid};

/// Samples from U(min, max).
///
/// With a resolution, samples snap to `min + k * resolution`. With
/// `duplicates == false` they are instead drawn without replacement from that
/// grid, cycling once every grid value has been used.
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    min: f64,
    max: f64,
    resolution: Option<f64>,
    steps: usize,
    range: Uniform<f64>,
    pool: Option<QuantizedPool>,
}

impl UniformGenerator {
    pub fn new(min: f64, max: f64, resolution: Option<f64>, duplicates: bool) -> CorridorResult<Self> {
        check_range(min, max)?;
        check_resolution(resolution, duplicates)?;

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
            max,
            resolution,
            steps,
            range: Uniform::new_inclusive(min, max),
            pool,
        })
    }

    /// Continuous U(min, max)
    pub fn continuous(min: f64, max: f64) -> CorridorResult<Self> {
        Self::new(min, max, None, true)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    /// Size of the duplicate-free pool, if sampling without replacement
    pub fn pool_size(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.len())
    }

    /// Values left before the duplicate-free pool cycles
    pub fn remaining(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.remaining())
    }
}

impl ParameterGenerator for UniformGenerator {
    fn generate(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        if let Some(pool) = self.pool.as_mut() {
            return (0..n).map(|_| pool.draw_random(rng)).collect();
        }

        let (min, steps, range) = (self.min, self.steps, &self.range);
        match self.resolution {
            Some(res) => (0..n)
                .map(|_| snap_to_grid(range.sample(rng), min, res, steps))
                .collect(),
            None => (0..n).map(|_| range.sample(rng)).collect(),
        }
    }

    fn reset(&mut self) {
        if let Some(pool) = self.pool.as_mut() {
            pool.reset();
        }
    }
}
