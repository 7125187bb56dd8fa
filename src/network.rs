//! Two-layer feed-forward network trained by online backpropagation.
use crate::layers::{Layer, Neuron};
use crate::loss::mse_loss;
use crate::utils::seeded_rng;
use anyhow::{bail, ensure, Result};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// A normalized input paired with its target output vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        Self { input, target }
    }
}

/// Hidden layer plus output layer, sharing one buffer for the hidden outputs
/// of the example currently being evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct BackpropNet {
    hidden_layer: Layer,
    output_layer: Layer,
    hidden_output: Vec<f64>,
    /// Number of input features.
    input_size: usize,
}

impl BackpropNet {
    /// Assemble a network from explicit layers.
    ///
    /// Every hidden neuron must share one fan-in and every output neuron must
    /// have one weight per hidden neuron.
    pub fn new(hidden_layer: Layer, output_layer: Layer) -> Result<Self> {
        let input_size = hidden_layer.first().map_or(0, Neuron::fan_in);
        if let Some(i) = hidden_layer.iter().position(|n| n.fan_in() != input_size) {
            bail!(
                "Hidden neuron {} has {} weights, expected {}",
                i,
                hidden_layer[i].fan_in(),
                input_size
            );
        }
        if let Some(j) = output_layer
            .iter()
            .position(|n| n.fan_in() != hidden_layer.len())
        {
            bail!(
                "Output neuron {} has {} weights, expected {}",
                j,
                output_layer[j].fan_in(),
                hidden_layer.len()
            );
        }
        Ok(Self::from_layers(input_size, hidden_layer, output_layer))
    }

    fn from_layers(input_size: usize, hidden_layer: Layer, output_layer: Layer) -> Self {
        let hidden_output = vec![0.0; hidden_layer.len()];
        Self {
            hidden_layer,
            output_layer,
            hidden_output,
            input_size,
        }
    }

    /// Network with every weight drawn uniformly from `[0, 1)`.
    ///
    /// All hidden weight vectors are drawn before the output ones, each filled
    /// left to right, so a given seed always yields the same network.
    pub fn random_net(n_input: usize, n_hidden: usize, n_output: usize, seed: Option<u64>) -> Self {
        let mut rng = seeded_rng(seed);
        let mut rand_weights =
            |n: usize| -> Vec<f64> { (0..n).map(|_| rng.gen_range(0.0..1.0)).collect() };
        let hidden_layer: Layer = (0..n_hidden)
            .map(|_| Neuron::new(rand_weights(n_input)))
            .collect();
        let output_layer: Layer = (0..n_output)
            .map(|_| Neuron::new(rand_weights(n_hidden)))
            .collect();
        Self::from_layers(n_input, hidden_layer, output_layer)
    }

    pub fn hidden_layer(&self) -> &[Neuron] {
        &self.hidden_layer
    }

    pub fn output_layer(&self) -> &[Neuron] {
        &self.output_layer
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_layer.len()
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        ensure!(
            input.len() == self.input_size,
            "Input size mismatch: expected {}, got {}",
            self.input_size,
            input.len()
        );
        Ok(())
    }

    /// Forward pass without caching: fills the hidden buffer only.
    fn evaluate_hidden(&mut self, input: &[f64]) -> Result<()> {
        self.check_input(input)?;
        for (slot, neuron) in self.hidden_output.iter_mut().zip(&self.hidden_layer) {
            *slot = neuron.compute_output(input)?;
        }
        Ok(())
    }

    /// Forward pass of a training step: every unit caches its output.
    fn forward(&mut self, input: &[f64]) -> Result<()> {
        for (slot, neuron) in self.hidden_output.iter_mut().zip(&mut self.hidden_layer) {
            *slot = neuron.activate(input)?;
        }
        for neuron in &mut self.output_layer {
            neuron.activate(&self.hidden_output)?;
        }
        Ok(())
    }

    /// Backward pass of a training step. The output layer is updated first;
    /// hidden errors are then summed over the already-updated output weights.
    fn backward(&mut self, example: &Example, rate: f64) -> Result<()> {
        for (neuron, &target) in self.output_layer.iter_mut().zip(&example.target) {
            let partial_error = target - neuron.output();
            neuron.update(&self.hidden_output, partial_error, rate)?;
        }
        for (i, neuron) in self.hidden_layer.iter_mut().enumerate() {
            let partial_error: f64 = self
                .output_layer
                .iter()
                .map(|out| out.weights()[i] * out.error())
                .sum();
            neuron.update(&example.input, partial_error, rate)?;
        }
        Ok(())
    }

    /// Learn one example: a full forward pass, then a full backward pass.
    pub fn learn(&mut self, example: &Example, rate: f64) -> Result<&mut Self> {
        ensure!(
            rate > 0.0 && rate <= 1.0,
            "learning rate must be in (0, 1], got {}",
            rate
        );
        self.check_input(&example.input)?;
        ensure!(
            example.target.len() == self.output_size(),
            "Target size mismatch: expected {}, got {}",
            self.output_size(),
            example.target.len()
        );
        self.forward(&example.input)?;
        self.backward(example, rate)?;
        Ok(self)
    }

    /// `epochs` sequential passes over `examples`, in order.
    pub fn train(&mut self, examples: &[Example], epochs: usize, rate: f64) -> Result<&mut Self> {
        for epoch in 0..epochs {
            let mut total_loss = 0.0;
            for example in examples {
                self.learn(example, rate)?;
                let outputs: Vec<f64> = self.output_layer.iter().map(Neuron::output).collect();
                total_loss += mse_loss(&outputs, &example.target)?;
            }
            if !examples.is_empty() {
                debug!(
                    epoch = epoch + 1,
                    loss = total_loss / examples.len() as f64,
                    "epoch finished"
                );
            }
        }
        Ok(self)
    }

    /// Raw output-layer activations for `input`. Learned state is untouched.
    pub fn outputs(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.evaluate_hidden(input)?;
        self.output_layer
            .iter()
            .map(|neuron| neuron.compute_output(&self.hidden_output))
            .collect()
    }

    /// Index of the highest output; ties go to the lowest index.
    pub fn predict(&mut self, input: &[f64]) -> Result<usize> {
        self.evaluate_hidden(input)?;
        let mut max_output = f64::NEG_INFINITY;
        let mut max_index = 0;
        for (i, neuron) in self.output_layer.iter().enumerate() {
            let output = neuron.compute_output(&self.hidden_output)?;
            if output > max_output {
                max_output = output;
                max_index = i;
            }
        }
        Ok(max_index)
    }
}

impl fmt::Display for BackpropNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BackpropNet: {:?}",
            [self.input_size, self.hidden_layer.len(), self.output_size()]
        )
    }
}
