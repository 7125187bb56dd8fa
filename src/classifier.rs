//! Classifier façade: one-hot training over a backpropagation network.
use crate::config::ClassifierConfig;
use crate::datasets::{one_hot, DataEntry};
use crate::metrics::accuracy;
use crate::network::{BackpropNet, Example};
use anyhow::{ensure, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// A pure per-feature transform applied identically at training and
/// prediction time.
#[derive(Clone)]
pub struct Normalizer(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl Normalizer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn identity() -> Self {
        Self::new(|x| x)
    }

    /// `(x - offset) / scale`
    pub fn affine(offset: f64, scale: f64) -> Self {
        Self::new(move |x| (x - offset) / scale)
    }

    pub fn apply(&self, x: f64) -> f64 {
        (self.0)(x)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Normalizer(..)")
    }
}

/// A network trained once at construction to map feature vectors to labels.
#[derive(Debug)]
pub struct BackpropClassifier {
    n_classes: usize,
    n_params: usize,
    normalized_input: Vec<f64>,
    learned: BackpropNet,
    normalizer: Normalizer,
}

impl BackpropClassifier {
    /// Train with the normalization described by `config.normalization`.
    pub fn new(training_set: &[DataEntry], config: &ClassifierConfig) -> Result<Self> {
        Self::with_normalizer(training_set, config, config.normalization.to_normalizer())
    }

    /// Train with an arbitrary normalizer; `config.normalization` is ignored.
    ///
    /// Class count is `max(label) + 1` and feature count comes from the first
    /// entry. An empty set is accepted with a warning and yields a classifier
    /// that only accepts empty feature vectors.
    pub fn with_normalizer(
        training_set: &[DataEntry],
        config: &ClassifierConfig,
        normalizer: Normalizer,
    ) -> Result<Self> {
        config.validate()?;
        if training_set.is_empty() {
            warn!("BackpropClassifier initialized with an empty training set");
        }
        let n_classes = training_set.iter().map(|(c, _)| *c).max().unwrap_or(0) + 1;
        let n_params = training_set.first().map_or(0, |(_, params)| params.len());
        let examples = create_examples(training_set, &normalizer, n_classes, n_params)?;

        let mut learned = BackpropNet::random_net(n_params, config.n_hidden, n_classes, config.seed);
        learned.train(&examples, config.epochs, config.learn_rate)?;
        info!(
            n_params,
            n_classes,
            n_hidden = config.n_hidden,
            epochs = config.epochs,
            examples = examples.len(),
            "trained classifier"
        );

        Ok(Self {
            n_classes,
            n_params,
            normalized_input: vec![0.0; n_params],
            learned,
            normalizer,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_params(&self) -> usize {
        self.n_params
    }

    pub fn network(&self) -> &BackpropNet {
        &self.learned
    }

    /// Label for `parameters`, normalized the same way as the training data.
    pub fn predict(&mut self, parameters: &[f64]) -> Result<usize> {
        ensure!(
            parameters.len() == self.n_params,
            "wrong number of parameters: expected {}, got {}",
            self.n_params,
            parameters.len()
        );
        for (slot, &param) in self.normalized_input.iter_mut().zip(parameters) {
            *slot = self.normalizer.apply(param);
        }
        self.learned.predict(&self.normalized_input)
    }

    /// Fraction of `test_set` predicted correctly.
    pub fn evaluate(&mut self, test_set: &[DataEntry]) -> Result<f64> {
        accuracy(self, test_set)
    }
}

/// Normalized inputs paired with one-hot targets.
pub(crate) fn create_examples(
    training_set: &[DataEntry],
    normalizer: &Normalizer,
    n_classes: usize,
    n_params: usize,
) -> Result<Vec<Example>> {
    training_set
        .iter()
        .enumerate()
        .map(|(i, (class_idx, params))| {
            ensure!(
                params.len() == n_params,
                "Training entry {} has {} parameters, expected {}",
                i,
                params.len(),
                n_params
            );
            let input = params.iter().map(|&x| normalizer.apply(x)).collect();
            Ok(Example::new(input, one_hot(*class_idx, n_classes)))
        })
        .collect()
}
