//! Core traits and types for the callback system
//!
//! This module provides the foundational types for training callbacks:
//! - `RunMode` / `RunParams` - Which run is in progress and its shape
//! - `TrainerCallback` - The trait all callbacks implement

use serde::{Deserialize, Serialize};

use super::handle::ModelHandle;
use crate::train::Logs;
use crate::Result;

/// Kind of run a callback is being notified about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// `Trainer::fit`
    #[default]
    Train,
    /// `Trainer::evaluate`
    Test,
    /// `Trainer::predict`
    Predict,
}

/// Shape of the run, delivered through `set_params` before run begin
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    /// Which run this is
    pub mode: RunMode,
    /// Total epochs planned (1 for evaluate and predict)
    pub epochs: usize,
    /// Batches per epoch
    pub steps: usize,
    /// Verbosity requested by the caller
    pub verbose: u8,
}

/// Trait for training callbacks
///
/// Implement this trait to hook into run events. All methods have default
/// no-op implementations, so you only need to implement the events you care
/// about. `logs` is empty at every `*_begin` event and holds the current
/// metrics at every `*_end` event.
///
/// The `model` handle gives access to the stop flags, the optimizer learning
/// rate and the model weights. Callbacks never own the model.
pub trait TrainerCallback: Send {
    /// Receive the run's parameters before `on_*_begin`
    fn set_params(&mut self, _params: &RunParams) {}

    /// Called before training starts
    fn on_train_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called after training ends with the last epoch's logs
    fn on_train_end(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called before each epoch
    fn on_epoch_begin(
        &mut self,
        _epoch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after each epoch with the epoch's mean metrics
    fn on_epoch_end(
        &mut self,
        _epoch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before each training batch
    fn on_train_batch_begin(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after each training batch with the epoch's running means
    fn on_train_batch_end(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before evaluation starts
    fn on_test_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called after evaluation ends with the final mean metrics
    fn on_test_end(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called before each evaluation batch
    fn on_test_batch_begin(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after each evaluation batch with the running means
    fn on_test_batch_end(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before prediction starts
    fn on_predict_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called after prediction ends
    fn on_predict_end(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        Ok(())
    }

    /// Called before each prediction batch
    fn on_predict_batch_begin(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after each prediction batch
    fn on_predict_batch_end(
        &mut self,
        _batch: usize,
        _logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        Ok(())
    }

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "TrainerCallback"
    }
}
