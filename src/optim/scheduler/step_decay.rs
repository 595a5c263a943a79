//! Step decay learning rate scheduler

use super::LRScheduler;

/// Piecewise-constant decay: `lr(epoch) = lr_initial * gamma^(epoch / step_size)`
///
/// Ignores the optimizer's current rate, so resuming at `initial_epoch`
/// lands on the same value an uninterrupted run would have used.
#[derive(Clone, Debug)]
pub struct StepDecayLR {
    lr_initial: f64,
    gamma: f64,
    step_size: usize,
}

impl StepDecayLR {
    /// Decay `lr_initial` by `gamma` every `step_size` epochs; a zero
    /// `step_size` never decays
    pub fn new(lr_initial: f64, step_size: usize, gamma: f64) -> Self {
        Self { lr_initial, gamma, step_size }
    }
}

impl LRScheduler for StepDecayLR {
    fn lr_at(&mut self, epoch: usize, _current_lr: f64) -> f64 {
        if self.step_size == 0 {
            return self.lr_initial;
        }
        let num_decays = epoch / self.step_size;
        self.lr_initial * self.gamma.powi(num_decays as i32)
    }
}
