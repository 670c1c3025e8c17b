//! Common traits shared by the generation pipeline

use nalgebra::Vector3;
use rand::RngCore;

/// Source of scalar samples for one generation constraint
pub trait ParameterGenerator {
    /// Draw `n` samples
    fn generate(&mut self, rng: &mut dyn RngCore, n: usize) -> Vec<f64>;

    /// Draw a single sample
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.generate(rng, 1)[0]
    }

    /// Restore any internal sampling state (e.g. a drained duplicate-free pool)
    fn reset(&mut self) {}
}

/// Produce the ordered 3D points describing an object for line/marker rendering.
///
/// Implementations are pure: calling `rendering_points` again restarts the walk.
pub trait RenderPoints {
    type Points<'a>: Iterator<Item = Vector3<f64>>
    where
        Self: 'a;

    fn rendering_points(&self) -> Self::Points<'_>;
}
