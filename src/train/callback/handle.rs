//! Callback-side view of the model under observation

use crate::model::Model;
use crate::optim::Optimizer;
use crate::train::{Batch, Logs};
use crate::{Error, Result};

/// The model, its optimizer and the run-control flags
///
/// Callbacks receive `&mut ModelHandle` at every event. Through it they can
/// request early termination of the current run, read and write the
/// optimizer's learning rate, and snapshot or restore weights. The run
/// driver checks the stop flags after every batch and every epoch.
pub struct ModelHandle {
    model: Box<dyn Model>,
    optimizer: Option<Box<dyn Optimizer>>,
    stop_training: bool,
    stop_evaluating: bool,
    stop_predicting: bool,
}

impl ModelHandle {
    /// Wrap a model without an optimizer
    pub fn new<M: Model + 'static>(model: M) -> Self {
        Self::from_boxed(Box::new(model))
    }

    /// Wrap an already boxed model
    pub fn from_boxed(model: Box<dyn Model>) -> Self {
        Self {
            model,
            optimizer: None,
            stop_training: false,
            stop_evaluating: false,
            stop_predicting: false,
        }
    }

    /// Attach (or replace) the optimizer
    pub fn set_optimizer(&mut self, optimizer: Box<dyn Optimizer>) {
        self.optimizer = Some(optimizer);
    }

    /// Whether an optimizer is attached
    pub fn is_compiled(&self) -> bool {
        self.optimizer.is_some()
    }

    /// Whether training has been asked to stop
    pub fn stop_training(&self) -> bool {
        self.stop_training
    }

    /// Request (or withdraw a request) to stop training
    pub fn set_stop_training(&mut self, stop: bool) {
        self.stop_training = stop;
    }

    /// Whether evaluation has been asked to stop
    pub fn stop_evaluating(&self) -> bool {
        self.stop_evaluating
    }

    /// Request (or withdraw a request) to stop evaluation
    pub fn set_stop_evaluating(&mut self, stop: bool) {
        self.stop_evaluating = stop;
    }

    /// Whether prediction has been asked to stop
    pub fn stop_predicting(&self) -> bool {
        self.stop_predicting
    }

    /// Request (or withdraw a request) to stop prediction
    pub fn set_stop_predicting(&mut self, stop: bool) {
        self.stop_predicting = stop;
    }

    /// Current optimizer learning rate
    pub fn learning_rate(&self) -> Result<f64> {
        self.optimizer
            .as_ref()
            .map(|opt| opt.lr())
            .ok_or(Error::NotCompiled)
    }

    /// Set the optimizer learning rate
    pub fn set_learning_rate(&mut self, lr: f64) -> Result<()> {
        if !lr.is_finite() || lr < 0.0 {
            return Err(Error::InvalidLearningRate(lr));
        }
        let optimizer = self.optimizer.as_mut().ok_or(Error::NotCompiled)?;
        optimizer.set_lr(lr);
        Ok(())
    }

    /// Name of the attached optimizer
    pub fn optimizer_name(&self) -> Option<&'static str> {
        self.optimizer.as_ref().map(|opt| opt.name())
    }

    /// Flat copy of the model weights
    pub fn weights(&self) -> Vec<f64> {
        self.model.weights()
    }

    /// Replace the model weights
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        self.model.set_weights(weights)
    }

    /// The model under observation
    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Mutable access to the model under observation
    pub fn model_mut(&mut self) -> &mut dyn Model {
        self.model.as_mut()
    }

    pub(crate) fn train_step(&mut self, batch: &Batch) -> Result<Logs> {
        let optimizer = self.optimizer.as_deref_mut().ok_or(Error::NotCompiled)?;
        self.model.train_step(batch, optimizer)
    }

    pub(crate) fn test_step(&self, batch: &Batch) -> Result<Logs> {
        self.model.test_step(batch)
    }

    pub(crate) fn predict_step(&self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.model.predict_step(inputs)
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.model.name())
            .field("optimizer", &self.optimizer_name())
            .field("stop_training", &self.stop_training)
            .field("stop_evaluating", &self.stop_evaluating)
            .field("stop_predicting", &self.stop_predicting)
            .finish()
    }
}
