//! Learning rate schedules
//!
//! Provides learning rate scheduling strategies for training:
//! - `CosineAnnealingLR` - Smooth cosine decay
//! - `StepDecayLR` - Step decay by factor every N epochs
//! - `PiecewiseSchedule` - Explicit `(epoch, lr)` table
//!
//! Any `FnMut(usize, f64) -> f64` closure is also a schedule.

mod cosine_annealing;
mod piecewise;
mod step_decay;


pub use cosine_annealing::CosineAnnealingLR;
pub use piecewise::PiecewiseSchedule;
pub use step_decay::StepDecayLR;

/// Learning rate schedule
///
/// Given the epoch index about to start and the optimizer's current
/// learning rate, return the learning rate to use for that epoch.
pub trait LRScheduler: Send {
    /// Learning rate for `epoch`
    fn lr_at(&mut self, epoch: usize, current_lr: f64) -> f64;
}

impl<F> LRScheduler for F
where
    F: FnMut(usize, f64) -> f64 + Send,
{
    fn lr_at(&mut self, epoch: usize, current_lr: f64) -> f64 {
        self(epoch, current_lr)
    }
}
