//! Classifier configuration, loadable from JSON.
//!
//! ```no_run
//! use backprop_ml::ClassifierConfig;
//!
//! let config = ClassifierConfig::load_from_file("iris.json")
//!     .unwrap_or_else(|_| ClassifierConfig::new(3, 5000));
//! println!("hidden units: {}", config.n_hidden);
//! ```
use crate::classifier::Normalizer;
use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable description of a per-feature normalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationKind {
    #[default]
    Identity,
    /// `(x - offset) / scale`
    Affine { offset: f64, scale: f64 },
}

impl NormalizationKind {
    pub fn to_normalizer(&self) -> Normalizer {
        match *self {
            NormalizationKind::Identity => Normalizer::identity(),
            NormalizationKind::Affine { offset, scale } => Normalizer::affine(offset, scale),
        }
    }
}

/// Hyperparameters for building a [`crate::BackpropClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Width of the hidden layer.
    pub n_hidden: usize,
    /// Full passes over the training set; 0 leaves the random network untrained.
    pub epochs: usize,
    /// Step size, in `(0, 1]`.
    pub learn_rate: f64,
    /// Seed for weight initialization; `None` is non-deterministic.
    pub seed: Option<u64>,
    pub normalization: NormalizationKind,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            n_hidden: 3,
            epochs: 1000,
            learn_rate: 1.0,
            seed: None,
            normalization: NormalizationKind::Identity,
        }
    }
}

impl ClassifierConfig {
    pub fn new(n_hidden: usize, epochs: usize) -> Self {
        Self {
            n_hidden,
            epochs,
            ..Self::default()
        }
    }

    pub fn with_learn_rate(mut self, learn_rate: f64) -> Self {
        self.learn_rate = learn_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationKind) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.n_hidden > 0, "n_hidden must be positive");
        ensure!(
            self.learn_rate > 0.0 && self.learn_rate <= 1.0,
            "learning rate must be in (0, 1], got {}",
            self.learn_rate
        );
        if let NormalizationKind::Affine { offset, scale } = self.normalization {
            ensure!(
                scale != 0.0 && scale.is_finite() && offset.is_finite(),
                "affine normalization needs a finite non-zero scale, got offset {} scale {}",
                offset,
                scale
            );
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| anyhow!("Invalid classifier config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() -> Result<()> {
        let config = ClassifierConfig::from_json_str(r#"{ "n_hidden": 5 }"#)?;
        assert_eq!(config.n_hidden, 5);
        assert_eq!(config.epochs, 1000);
        assert_eq!(config.learn_rate, 1.0);
        assert_eq!(config.seed, None);
        assert_eq!(config.normalization, NormalizationKind::Identity);
        Ok(())
    }

    #[test]
    fn parses_affine_normalization() -> Result<()> {
        let json = r#"{
            "n_hidden": 3,
            "epochs": 5000,
            "learn_rate": 0.5,
            "seed": 42,
            "normalization": { "kind": "affine", "offset": 25.0, "scale": 25.0 }
        }"#;
        let config = ClassifierConfig::from_json_str(json)?;
        assert_eq!(
            config,
            ClassifierConfig::new(3, 5000)
                .with_learn_rate(0.5)
                .with_seed(42)
                .with_normalization(NormalizationKind::Affine {
                    offset: 25.0,
                    scale: 25.0
                })
        );
        assert_eq!(config.normalization.to_normalizer().apply(50.0), 1.0);
        Ok(())
    }

    #[test]
    fn round_trips_through_json() -> Result<()> {
        let config = ClassifierConfig::new(7, 10).with_seed(1);
        let json = serde_json::to_string(&config)?;
        assert_eq!(ClassifierConfig::from_json_str(&json)?, config);
        Ok(())
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ClassifierConfig::new(0, 10).validate().is_err());
        assert!(ClassifierConfig::new(2, 10).with_learn_rate(0.0).validate().is_err());
        assert!(ClassifierConfig::new(2, 10).with_learn_rate(1.01).validate().is_err());
        let zero_scale = NormalizationKind::Affine {
            offset: 1.0,
            scale: 0.0,
        };
        assert!(ClassifierConfig::new(2, 10)
            .with_normalization(zero_scale)
            .validate()
            .is_err());
        assert!(ClassifierConfig::from_json_str(r#"{ "learn_rate": 2.0 }"#).is_err());
        assert!(ClassifierConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ClassifierConfig::load_from_file("/nonexistent/config.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
