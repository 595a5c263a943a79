//! Linear regression with mean squared error loss

use super::Model;
use crate::optim::Optimizer;
use crate::train::{Batch, Logs, MeanAbsoluteError, MeanSquaredError, Metric};
use crate::{Error, Result};

/// `y = w·x + b` trained on mean squared error
///
/// Weights are stored flat as `[w_0, .., w_{n-1}, b]`. Each step reports
/// `loss` plus every configured metric (mean absolute error by default).
pub struct LinearRegression {
    params: Vec<f64>,
    metrics: Vec<Box<dyn Metric>>,
}

impl LinearRegression {
    /// Zero-initialised model over `num_features` inputs
    pub fn new(num_features: usize) -> Self {
        Self {
            params: vec![0.0; num_features + 1],
            metrics: vec![Box::new(MeanAbsoluteError)],
        }
    }

    /// Replace the reported metrics
    pub fn with_metrics(mut self, metrics: Vec<Box<dyn Metric>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Number of input features
    pub fn num_features(&self) -> usize {
        self.params.len() - 1
    }

    /// Coefficients without the bias
    pub fn coefficients(&self) -> &[f64] {
        &self.params[..self.num_features()]
    }

    /// Bias term
    pub fn bias(&self) -> f64 {
        self.params[self.num_features()]
    }

    fn check_rows(&self, inputs: &[Vec<f64>]) -> Result<()> {
        let expected = self.num_features();
        match inputs.iter().find(|row| row.len() != expected) {
            Some(row) => Err(Error::ShapeMismatch {
                expected,
                actual: row.len(),
            }),
            None => Ok(()),
        }
    }

    fn check_batch(&self, batch: &Batch) -> Result<()> {
        self.check_rows(&batch.inputs)?;
        if batch.targets.len() != batch.inputs.len() {
            return Err(Error::ShapeMismatch {
                expected: batch.inputs.len(),
                actual: batch.targets.len(),
            });
        }
        Ok(())
    }

    fn forward(&self, inputs: &[Vec<f64>]) -> Vec<f64> {
        let (w, b) = self.params.split_at(self.num_features());
        inputs
            .iter()
            .map(|row| row.iter().zip(w).map(|(x, w)| x * w).sum::<f64>() + b[0])
            .collect()
    }

    fn batch_logs(&self, predictions: &[f64], targets: &[f64]) -> Logs {
        let mut logs = Logs::new();
        logs.insert("loss", MeanSquaredError.compute(predictions, targets));
        for metric in &self.metrics {
            logs.insert(metric.name(), metric.compute(predictions, targets));
        }
        logs
    }
}

impl Model for LinearRegression {
    fn train_step(&mut self, batch: &Batch, optimizer: &mut dyn Optimizer) -> Result<Logs> {
        self.check_batch(batch)?;
        if batch.size() == 0 {
            return Ok(Logs::new());
        }

        let predictions = self.forward(&batch.inputs);
        let logs = self.batch_logs(&predictions, &batch.targets);

        // d/dθ mean((pred - y)^2)
        let n = batch.size() as f64;
        let features = self.num_features();
        let mut grads = vec![0.0; self.params.len()];
        for ((row, pred), target) in batch.inputs.iter().zip(&predictions).zip(&batch.targets) {
            let residual = 2.0 * (pred - target) / n;
            for (g, x) in grads[..features].iter_mut().zip(row) {
                *g += residual * x;
            }
            grads[features] += residual;
        }

        optimizer.step(&mut self.params, &grads);
        Ok(logs)
    }

    fn test_step(&self, batch: &Batch) -> Result<Logs> {
        self.check_batch(batch)?;
        if batch.size() == 0 {
            return Ok(Logs::new());
        }
        let predictions = self.forward(&batch.inputs);
        Ok(self.batch_logs(&predictions, &batch.targets))
    }

    fn predict_step(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.check_rows(inputs)?;
        Ok(self.forward(inputs))
    }

    fn weights(&self) -> Vec<f64> {
        self.params.clone()
    }

    fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.params.len() {
            return Err(Error::ShapeMismatch {
                expected: self.params.len(),
                actual: weights.len(),
            });
        }
        self.params.copy_from_slice(weights);
        Ok(())
    }

    fn name(&self) -> &str {
        "LinearRegression"
    }
}
