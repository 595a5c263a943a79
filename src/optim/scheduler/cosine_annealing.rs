//! Cosine annealing learning rate scheduler

use super::LRScheduler;
use std::f64::consts::PI;

/// Cosine Annealing Learning Rate Scheduler
///
/// Decreases the learning rate following a cosine curve from lr_max to lr_min.
///
/// Formula: lr_t = lr_min + 0.5 * (lr_max - lr_min) * (1 + cos(pi * t / T))
///
/// Where:
/// - t is the current epoch
/// - T is the total number of epochs
/// - lr_max is the initial learning rate
/// - lr_min is the minimum learning rate (default 0)
#[derive(Clone, Debug)]
pub struct CosineAnnealingLR {
    lr_max: f64,
    lr_min: f64,
    t_max: usize,
}

impl CosineAnnealingLR {
    /// Create a new cosine annealing scheduler
    ///
    /// # Arguments
    /// * `lr_max` - Initial (maximum) learning rate
    /// * `t_max` - Total number of epochs for the schedule
    /// * `lr_min` - Minimum learning rate
    pub fn new(lr_max: f64, t_max: usize, lr_min: f64) -> Self {
        Self { lr_max, lr_min, t_max }
    }

    /// Create scheduler with lr_min = 0
    pub fn default_min(lr_max: f64, t_max: usize) -> Self {
        Self::new(lr_max, t_max, 0.0)
    }
}

impl LRScheduler for CosineAnnealingLR {
    fn lr_at(&mut self, epoch: usize, _current_lr: f64) -> f64 {
        if epoch >= self.t_max {
            return self.lr_min;
        }

        let progress = epoch as f64 / self.t_max as f64;
        let cosine_decay = 0.5 * (1.0 + (PI * progress).cos());
        self.lr_min + (self.lr_max - self.lr_min) * cosine_decay
    }
}
