//! Loss functions used to report training progress.
use anyhow::{ensure, Result};

/// MSE loss
pub fn mse_loss(pred: &[f64], target: &[f64]) -> Result<f64> {
    ensure!(
        pred.len() == target.len(),
        "Pred and target size mismatch: {} vs {}",
        pred.len(),
        target.len()
    );
    if pred.is_empty() {
        return Ok(0.0);
    }
    Ok(pred
        .iter()
        .zip(target)
        .map(|(&p, &t)| (p - t).powi(2))
        .sum::<f64>()
        / pred.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mse_of_known_vectors() -> Result<()> {
        assert_abs_diff_eq!(mse_loss(&[1.0, 0.0], &[0.0, 0.0])?, 0.5);
        assert_eq!(mse_loss(&[0.3, 0.7], &[0.3, 0.7])?, 0.0);
        assert_eq!(mse_loss(&[], &[])?, 0.0);
        Ok(())
    }

    #[test]
    fn mse_rejects_mismatch() {
        assert!(mse_loss(&[1.0], &[1.0, 0.0]).is_err());
    }
}
