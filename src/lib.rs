//! A small supervised-learning crate: a two-layer network trained by online
//! backpropagation, a perceptron baseline, and dataset loaders.
//!
//! - Logistic neuron units with in-place weight updates
//! - Hidden + output layer network with seeded random initialization
//! - Classifier façade with per-feature normalization and one-hot targets
//! - Iris (CSV) and MNIST (gzipped IDX) loaders with seeded splitting

pub mod activations;
pub mod classifier;
pub mod config;
pub mod datasets;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod perceptron;
pub mod utils;

pub use activations::{Activation, Sigmoid};
pub use classifier::{BackpropClassifier, Normalizer};
pub use config::{ClassifierConfig, NormalizationKind};
pub use datasets::{load_iris, load_mnist, one_hot, split_shuffled, DataEntry, DataSet, MnistFiles};
pub use layers::{Layer, Neuron};
pub use loss::mse_loss;
pub use metrics::{accuracy, confusion_matrix};
pub use network::{BackpropNet, Example};
pub use perceptron::Perceptron;
pub use utils::{generate_synthetic_data, init_logging, print_confusion_matrix, print_model_summary};
