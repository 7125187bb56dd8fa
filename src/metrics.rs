//! Metrics for evaluating a trained classifier on labeled data.
use crate::classifier::BackpropClassifier;
use crate::datasets::DataEntry;
use anyhow::{anyhow, ensure, Result};

/// Accuracy
pub fn accuracy(model: &mut BackpropClassifier, dataset: &[DataEntry]) -> Result<f64> {
    ensure!(!dataset.is_empty(), "Dataset is empty");
    let mut correct = 0;
    for (label, params) in dataset {
        if model.predict(params)? == *label {
            correct += 1;
        }
    }
    Ok(correct as f64 / dataset.len() as f64)
}

/// Confusion matrix indexed `[true][predicted]`.
pub fn confusion_matrix(
    model: &mut BackpropClassifier,
    dataset: &[DataEntry],
) -> Result<Vec<Vec<usize>>> {
    let num_classes = model.n_classes();
    let mut cm = vec![vec![0; num_classes]; num_classes];
    for (label, params) in dataset {
        let pred = model.predict(params)?;
        let row = cm
            .get_mut(*label)
            .ok_or_else(|| anyhow!("Label {} outside {} classes", label, num_classes))?;
        row[pred] += 1;
    }
    Ok(cm)
}
