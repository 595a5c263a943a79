//! Learning rate scheduler callback

use super::handle::ModelHandle;
use super::traits::TrainerCallback;
use crate::optim::LRScheduler;
use crate::train::Logs;
use crate::{Error, Result};

/// Callback that applies a learning rate schedule at each epoch begin
///
/// The schedule sees the epoch index and the optimizer's current learning
/// rate. A non-finite or negative result aborts the run.
///
/// # Example
///
/// ```rust
/// use fitloop::optim::StepDecayLR;
/// use fitloop::train::callback::LearningRateScheduler;
///
/// let halve_every_ten = LearningRateScheduler::new(StepDecayLR::new(0.1, 10, 0.5));
/// let warmup = LearningRateScheduler::new(|epoch: usize, lr: f64| {
///     if epoch < 3 { 0.01 * (epoch + 1) as f64 } else { lr }
/// });
/// ```
pub struct LearningRateScheduler<S: LRScheduler> {
    schedule: S,
    initial_lr: Option<f64>,
    last_lr: Option<f64>,
}

impl<S: LRScheduler> LearningRateScheduler<S> {
    /// Wrap a schedule
    pub fn new(schedule: S) -> Self {
        Self {
            schedule,
            initial_lr: None,
            last_lr: None,
        }
    }

    /// Learning rate the optimizer had when training began
    pub fn initial_lr(&self) -> Option<f64> {
        self.initial_lr
    }

    /// Learning rate most recently applied
    pub fn last_lr(&self) -> Option<f64> {
        self.last_lr
    }
}

impl<S: LRScheduler> TrainerCallback for LearningRateScheduler<S> {
    fn on_train_begin(&mut self, _logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        self.initial_lr = Some(model.learning_rate()?);
        self.last_lr = None;
        Ok(())
    }

    fn on_epoch_begin(
        &mut self,
        epoch: usize,
        _logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        let current = model.learning_rate()?;
        let lr = self.schedule.lr_at(epoch, current);
        if !lr.is_finite() || lr < 0.0 {
            return Err(Error::callback(
                self.name(),
                format!("schedule returned invalid learning rate {lr} for epoch {epoch}"),
            ));
        }
        model.set_learning_rate(lr)?;
        if self.last_lr != Some(lr) {
            tracing::debug!(epoch, lr, "learning rate scheduled");
        }
        self.last_lr = Some(lr);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LearningRateScheduler"
    }
}
