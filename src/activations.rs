//! Activation functions for neuron units.
use std::fmt;

/// Trait for activation functions whose slope can be recovered from the
/// activation value itself, so backpropagation needs no pre-activation cache.
pub trait Activation: fmt::Debug + Send + Sync {
    fn apply(&self, x: f64) -> f64;
    /// Derivative evaluated at a point whose activation is `output`.
    fn derivative_from_output(&self, output: f64) -> f64;
}

/// Sigmoid: 1 / (1 + exp(-x))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn apply(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
    fn derivative_from_output(&self, output: f64) -> f64 {
        output * (1.0 - output)
    }
}
