//! Regression metrics: MSE, MAE, RMSE

use super::Metric;

fn paired_len(predictions: &[f64], targets: &[f64]) -> usize {
    predictions.len().min(targets.len())
}

/// Mean Squared Error (MSE) metric
///
/// MSE = mean((y - y_pred)²)
///
/// # Example
///
/// ```
/// use fitloop::train::{MeanSquaredError, Metric};
///
/// let mse = MeanSquaredError.compute(&[1.0, 2.0], &[2.0, 4.0]);
/// assert!((mse - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl Metric for MeanSquaredError {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        let n = paired_len(predictions, targets);
        if n == 0 {
            return 0.0;
        }
        predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).powi(2))
            .sum::<f64>()
            / n as f64
    }

    fn name(&self) -> &'static str {
        "mean_squared_error"
    }
}

/// Mean Absolute Error (MAE) metric
///
/// MAE = mean(|y - y_pred|)
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsoluteError;

impl Metric for MeanAbsoluteError {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        let n = paired_len(predictions, targets);
        if n == 0 {
            return 0.0;
        }
        predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).abs())
            .sum::<f64>()
            / n as f64
    }

    fn name(&self) -> &'static str {
        "mean_absolute_error"
    }
}

/// Root Mean Squared Error (RMSE) metric
///
/// Averaging RMSE across batches is not the RMSE of the epoch; prefer MSE
/// when the value is aggregated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootMeanSquaredError;

impl Metric for RootMeanSquaredError {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        MeanSquaredError.compute(predictions, targets).sqrt()
    }

    fn name(&self) -> &'static str {
        "root_mean_squared_error"
    }
}
