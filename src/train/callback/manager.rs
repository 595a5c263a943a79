//! Callback manager for dispatching events to multiple callbacks

use super::handle::ModelHandle;
use super::history::History;
use super::progress::ProgressCallback;
use super::traits::{RunParams, TrainerCallback};
use crate::train::Logs;
use crate::Result;

/// Manages multiple callbacks and dispatches events
///
/// Dispatch order is: the progress logger (if verbose), the registered
/// callbacks in registration order, then the built-in [`History`]. The first
/// callback error aborts the dispatch and is returned to the run driver.
pub struct CallbackManager {
    callbacks: Vec<Box<dyn TrainerCallback>>,
    progress: Option<ProgressCallback>,
    history: History,
}

impl CallbackManager {
    /// Create new callback manager
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            progress: None,
            history: History::new(),
        }
    }

    /// Add a callback
    pub fn add<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Add an already boxed callback
    pub fn add_boxed(&mut self, callback: Box<dyn TrainerCallback>) {
        self.callbacks.push(callback);
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of registered callbacks (built-ins excluded)
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Names of the registered callbacks in dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    /// Install or remove the progress logger
    ///
    /// `0` is silent, `1` logs every `log_interval` batches, `2` logs one line
    /// per epoch.
    pub fn set_verbose(&mut self, verbose: u8, log_interval: usize) {
        self.progress = match verbose {
            0 => None,
            1 => Some(ProgressCallback::new(log_interval)),
            _ => Some(ProgressCallback::epoch_only()),
        };
    }

    /// Whether a progress logger is installed
    pub fn is_verbose(&self) -> bool {
        self.progress.is_some()
    }

    /// History of the most recent training run
    pub fn history(&self) -> &History {
        &self.history
    }

    fn dispatch<F>(&mut self, model: &mut ModelHandle, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn TrainerCallback, &mut ModelHandle) -> Result<()>,
    {
        if let Some(progress) = self.progress.as_mut() {
            event(progress as &mut dyn TrainerCallback, model)?;
        }
        for cb in &mut self.callbacks {
            event(cb.as_mut(), model)?;
        }
        event(&mut self.history as &mut dyn TrainerCallback, model)
    }

    /// Deliver run parameters to every callback
    pub fn set_params(&mut self, params: &RunParams) {
        if let Some(progress) = self.progress.as_mut() {
            progress.set_params(params);
        }
        for cb in &mut self.callbacks {
            cb.set_params(params);
        }
        self.history.set_params(params);
    }

    /// Fire train begin event
    pub fn on_train_begin(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_train_begin(logs, m))
    }

    /// Fire train end event
    pub fn on_train_end(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_train_end(logs, m))
    }

    /// Fire epoch begin event
    pub fn on_epoch_begin(
        &mut self,
        epoch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_epoch_begin(epoch, logs, m))
    }

    /// Fire epoch end event
    pub fn on_epoch_end(
        &mut self,
        epoch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_epoch_end(epoch, logs, m))
    }

    /// Fire train batch begin event
    pub fn on_train_batch_begin(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_train_batch_begin(batch, logs, m))
    }

    /// Fire train batch end event
    pub fn on_train_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_train_batch_end(batch, logs, m))
    }

    /// Fire test begin event
    pub fn on_test_begin(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_test_begin(logs, m))
    }

    /// Fire test end event
    pub fn on_test_end(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_test_end(logs, m))
    }

    /// Fire test batch begin event
    pub fn on_test_batch_begin(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_test_batch_begin(batch, logs, m))
    }

    /// Fire test batch end event
    pub fn on_test_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_test_batch_end(batch, logs, m))
    }

    /// Fire predict begin event
    pub fn on_predict_begin(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_predict_begin(logs, m))
    }

    /// Fire predict end event
    pub fn on_predict_end(&mut self, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_predict_end(logs, m))
    }

    /// Fire predict batch begin event
    pub fn on_predict_batch_begin(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_predict_batch_begin(batch, logs, m))
    }

    /// Fire predict batch end event
    pub fn on_predict_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.dispatch(model, |cb, m| cb.on_predict_batch_end(batch, logs, m))
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
