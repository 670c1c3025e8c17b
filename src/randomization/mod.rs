//! Stochastic parameter generators
//!
//! Each generator is configured once per constraint and then sampled
//! repeatedly through [`ParameterGenerator`](crate::common::ParameterGenerator).
//! Configuration problems (non-positive resolution, duplicate-free sampling
//! without a resolution, invalid distribution parameters) are reported by the
//! constructors, never while sampling.

pub mod constant;
pub mod uniform;
pub mod normal;
pub mod beta;
mod pool;

pub use constant::ConstantGenerator;
pub use uniform::UniformGenerator;
pub use normal::NormalGenerator;
pub use beta::BetaGenerator;

use crate::common::{CorridorError, CorridorResult};

/// Guards against float noise when counting whole resolution steps in a range
const STEP_EPSILON: f64 = 1e-9;

/// Largest grid a duplicate-free generator will hold in memory
pub const MAX_POOL_SIZE: usize = 1 << 20;

/// Validate an optional resolution and whether duplicate-free sampling may use it
pub(crate) fn check_resolution(resolution: Option<f64>, duplicates: bool) -> CorridorResult<()> {
    match resolution {
        Some(res) if !(res > 0.0 && res.is_finite()) => Err(CorridorError::configuration(format!(
            "resolution must be positive, got {}",
            res
        ))),
        None if !duplicates => Err(CorridorError::configuration(
            "duplicate-free sampling requires a resolution",
        )),
        _ => Ok(()),
    }
}

pub(crate) fn check_range(min: f64, max: f64) -> CorridorResult<()> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(CorridorError::configuration(format!(
            "invalid sampling range [{}, {}]",
            min, max
        )));
    }
    Ok(())
}

/// Fails when a duplicate-free pool over `steps + 1` grid values would exceed [`MAX_POOL_SIZE`]
pub(crate) fn check_pool_size(steps: usize) -> CorridorResult<()> {
    if steps >= MAX_POOL_SIZE {
        return Err(CorridorError::configuration(format!(
            "duplicate-free pool would hold more than {} values",
            MAX_POOL_SIZE
        )));
    }
    Ok(())
}

/// Number of whole resolution steps that fit in `[min, max]`
pub(crate) fn grid_steps(min: f64, max: f64, resolution: f64) -> usize {
    ((max - min) / resolution + STEP_EPSILON).floor() as usize
}

/// Snap `value` to the nearest grid point `min + k * resolution`, `0 <= k <= steps`
pub(crate) fn snap_to_grid(value: f64, min: f64, resolution: f64, steps: usize) -> f64 {
    let k = ((value - min) / resolution).round().clamp(0.0, steps as f64);
    min + k * resolution
}
