//! Models driven by the trainer
//!
//! The trainer treats a model as a black box: it hands over batches and an
//! optimizer and receives per-batch logs back. Callbacks reach the model only
//! through [`crate::train::ModelHandle`].

mod linear;

pub use linear::LinearRegression;

use crate::optim::Optimizer;
use crate::train::{Batch, Logs};
use crate::Result;

/// A trainable model
pub trait Model: Send {
    /// Run forward and backward on one batch and apply one optimizer update
    ///
    /// Returns the batch's loss and metrics, computed before the update.
    fn train_step(&mut self, batch: &Batch, optimizer: &mut dyn Optimizer) -> Result<Logs>;

    /// Compute loss and metrics on one batch without updating weights
    fn test_step(&self, batch: &Batch) -> Result<Logs>;

    /// Compute one output per input row
    fn predict_step(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Flat copy of all trainable weights
    fn weights(&self) -> Vec<f64>;

    /// Replace all trainable weights
    fn set_weights(&mut self, weights: &[f64]) -> Result<()>;

    /// Model name for logging
    fn name(&self) -> &str {
        "Model"
    }
}
