//! Neuron units and the layers built from them.
use crate::activations::{Activation, Sigmoid};
use anyhow::{ensure, Result};

/// An ordered layer of neuron units sharing one fan-in.
pub type Layer = Vec<Neuron>;

/// A logistic unit: a weight vector plus the output and error scalars of the
/// most recent training step.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    output: f64,
    error: f64,
}

impl Neuron {
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            output: 0.0,
            error: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Output cached by the last forward pass of `learn`.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Error signal cached by the last backward pass of `learn`.
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// `sigmoid(Σ w·x)` for `input`; leaves the cached output untouched.
    pub fn compute_output(&self, input: &[f64]) -> Result<f64> {
        ensure!(
            input.len() == self.weights.len(),
            "Input size mismatch: expected {}, got {}",
            self.weights.len(),
            input.len()
        );
        let sum: f64 = input.iter().zip(&self.weights).map(|(&x, &w)| x * w).sum();
        Ok(Sigmoid.apply(sum))
    }

    /// Computes the output for `input` and caches it for the backward pass.
    pub(crate) fn activate(&mut self, input: &[f64]) -> Result<f64> {
        self.output = self.compute_output(input)?;
        Ok(self.output)
    }

    /// Backward step: `error = f'(output) * partial_error`, then
    /// `w[i] += rate * error * upstream_inputs[i]`.
    pub fn update(&mut self, upstream_inputs: &[f64], partial_error: f64, rate: f64) -> Result<()> {
        ensure!(
            upstream_inputs.len() == self.weights.len(),
            "Upstream size mismatch: expected {}, got {}",
            self.weights.len(),
            upstream_inputs.len()
        );
        self.error = Sigmoid.derivative_from_output(self.output) * partial_error;
        for (w, &x) in self.weights.iter_mut().zip(upstream_inputs) {
            *w += rate * self.error * x;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn compute_output_is_sigmoid_of_dot_product() -> Result<()> {
        let neuron = Neuron::new(vec![0.1, 0.8]);
        let out = neuron.compute_output(&[0.35, 0.9])?;
        assert_abs_diff_eq!(out, 0.6803, epsilon = 1e-4);
        // same weights, same input, same answer regardless of what ran in between
        neuron.compute_output(&[1.0, -1.0])?;
        assert_eq!(neuron.compute_output(&[0.35, 0.9])?, out);
        assert_eq!(neuron.output(), 0.0);
        Ok(())
    }

    #[test]
    fn update_moves_weights_along_error() -> Result<()> {
        let mut neuron = Neuron::new(vec![0.3, 0.9]);
        let upstream = [0.6803, 0.6637];
        let out = neuron.activate(&upstream)?;
        neuron.update(&upstream, 0.5 - out, 1.0)?;
        assert_abs_diff_eq!(neuron.error(), -0.0407, epsilon = 1e-4);
        assert_abs_diff_eq!(neuron.weights()[0], 0.2723, epsilon = 1e-4);
        assert_abs_diff_eq!(neuron.weights()[1], 0.8730, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn zero_rate_keeps_weights() -> Result<()> {
        let mut neuron = Neuron::new(vec![0.25, -0.5]);
        neuron.activate(&[1.0, 1.0])?;
        neuron.update(&[1.0, 1.0], 0.3, 0.0)?;
        assert_eq!(neuron.weights(), &[0.25, -0.5]);
        assert!(neuron.error() > 0.0);
        Ok(())
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut neuron = Neuron::new(vec![0.1, 0.2]);
        let err = neuron.compute_output(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("expected 2, got 3"));
        assert!(neuron.update(&[1.0], 0.1, 1.0).is_err());
        assert_eq!(neuron.weights(), &[0.1, 0.2]);
    }
}
