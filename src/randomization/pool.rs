//! Finite pool of quantized values drawn without replacement

use rand::{Rng, RngCore};

/// Values `min + k * resolution`, split into a live region `[0, live)` and a drawn tail.
///
/// Drawing swaps the chosen value to the end of the live region and shrinks it.
/// Once the live region is empty the next draw restores it to full size, so
/// uniqueness only holds within one pass over the pool.
#[derive(Debug, Clone)]
pub(crate) struct QuantizedPool {
    values: Vec<f64>,
    live: usize,
}

impl QuantizedPool {
    pub(crate) fn new(min: f64, resolution: f64, steps: usize) -> Self {
        let values: Vec<f64> = (0..=steps).map(|k| min + k as f64 * resolution).collect();
        let live = values.len();
        Self { values, live }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.live
    }

    pub(crate) fn reset(&mut self) {
        self.live = self.values.len();
    }

    /// Uniformly random remaining value
    pub(crate) fn draw_random(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.refill_if_drained();
        let index = rng.gen_range(0..self.live);
        self.take(index)
    }

    /// Remaining value closest to `target` (lowest index wins ties)
    pub(crate) fn draw_nearest(&mut self, target: f64) -> f64 {
        self.refill_if_drained();
        let mut best = 0;
        for i in 1..self.live {
            if (self.values[i] - target).abs() < (self.values[best] - target).abs() {
                best = i;
            }
        }
        self.take(best)
    }

    fn refill_if_drained(&mut self) {
        if self.live == 0 {
            log::debug!("quantized pool of {} values drained, cycling", self.values.len());
            self.reset();
        }
    }

    fn take(&mut self, index: usize) -> f64 {
        self.live -= 1;
        self.values.swap(index, self.live);
        self.values[self.live]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pool_drains_then_cycles() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = QuantizedPool::new(0.0, 0.5, 3);
        assert_eq!(pool.len(), 4);

        let mut first_pass: Vec<f64> = (0..4).map(|_| pool.draw_random(&mut rng)).collect();
        first_pass.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(first_pass, vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(pool.remaining(), 0);

        pool.draw_random(&mut rng);
        assert_eq!(pool.remaining(), 3);

        pool.reset();
        assert_eq!(pool.remaining(), 4);
    }

    #[test]
    fn test_draw_nearest_skips_drawn_values() {
        let mut pool = QuantizedPool::new(0.0, 1.0, 4);
        assert_eq!(pool.draw_nearest(2.2), 2.0);
        assert_eq!(pool.draw_nearest(2.2), 3.0);
        assert_eq!(pool.draw_nearest(2.2), 1.0);
        assert_eq!(pool.remaining(), 2);
    }
}
