//! Constant generator, so fixed and randomized constraints are interchangeable

use rand::RngCore;

use crate::common::ParameterGenerator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantGenerator {
    value: f64,
}

impl ConstantGenerator {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl ParameterGenerator for ConstantGenerator {
    fn generate(&mut self, _rng: &mut dyn RngCore, n: usize) -> Vec<f64> {
        vec![self.value; n]
    }
}
