//! Single-layer perceptron, the linear baseline for the backprop network.
use anyhow::{ensure, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    weights: Vec<f64>,
    bias: f64,
}

impl Perceptron {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Every weight and the bias start at `initial_value`.
    pub fn with_size(input_size: usize, initial_value: f64) -> Self {
        Self {
            weights: vec![initial_value; input_size],
            bias: initial_value,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Fires when `bias + Σ w·x` is strictly positive.
    pub fn activate(&self, input: &[f64]) -> Result<bool> {
        ensure!(
            input.len() == self.weights.len(),
            "Input size mismatch: expected {}, got {}",
            self.weights.len(),
            input.len()
        );
        let sum = self.bias
            + self
                .weights
                .iter()
                .zip(input)
                .map(|(&w, &x)| w * x)
                .sum::<f64>();
        Ok(sum > 0.0)
    }

    /// Classic perceptron rule with unit step size.
    pub fn learn(&mut self, input: &[f64], target: bool) -> Result<()> {
        let error = f64::from(u8::from(target)) - f64::from(u8::from(self.activate(input)?));
        self.bias += error;
        for (w, &x) in self.weights.iter_mut().zip(input) {
            *w += error * x;
        }
        Ok(())
    }

    pub fn train(&mut self, examples: &[(Vec<f64>, bool)], epochs: usize) -> Result<&mut Self> {
        for _ in 0..epochs {
            for (input, target) in examples {
                self.learn(input, *target)?;
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truth_table(f: impl Fn(bool, bool) -> bool) -> Vec<(Vec<f64>, bool)> {
        [(false, false), (false, true), (true, false), (true, true)]
            .iter()
            .map(|&(a, b)| (vec![f64::from(u8::from(a)), f64::from(u8::from(b))], f(a, b)))
            .collect()
    }

    #[test]
    fn activation_threshold() -> Result<()> {
        let p = Perceptron::new(vec![2.0, 3.0], -25.0);
        assert!(!p.activate(&[4.0, 5.0])?);
        assert!(p.activate(&[4.0, 6.0])?);
        Ok(())
    }

    #[test]
    fn learns_and_function() -> Result<()> {
        let examples = truth_table(|a, b| a && b);
        let mut p = Perceptron::with_size(2, 0.0);
        p.train(&examples, 10)?;
        for (input, target) in &examples {
            assert_eq!(p.activate(input)?, *target);
        }
        Ok(())
    }

    #[test]
    fn learns_or_function() -> Result<()> {
        let examples = truth_table(|a, b| a || b);
        let mut p = Perceptron::with_size(2, 0.0);
        p.train(&examples, 10)?;
        for (input, target) in &examples {
            assert_eq!(p.activate(input)?, *target);
        }
        Ok(())
    }

    #[test]
    fn correct_prediction_leaves_weights() -> Result<()> {
        let mut p = Perceptron::new(vec![1.0, 1.0], -0.5);
        p.learn(&[1.0, 0.0], true)?;
        assert_eq!(p, Perceptron::new(vec![1.0, 1.0], -0.5));
        p.learn(&[1.0, 0.0], false)?;
        assert_eq!(p.weights(), &[0.0, 1.0]);
        assert_eq!(p.bias(), -1.5);
        Ok(())
    }

    #[test]
    fn input_size_mismatch() {
        let mut p = Perceptron::with_size(2, 0.0);
        let err = p.activate(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.to_string(), "Input size mismatch: expected 2, got 3");
        assert!(p.learn(&[1.0, 2.0, 3.0], true).is_err());
        assert_eq!(p, Perceptron::with_size(2, 0.0));
    }
}
