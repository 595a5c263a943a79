//! Table-driven learning rate schedule

use super::LRScheduler;

/// Sets explicit learning rates at chosen epochs
///
/// Epochs that are not in the table keep whatever rate the optimizer
/// currently has, so a table `[(3, 0.05), (6, 0.01)]` holds the initial
/// rate for epochs 0-2, 0.05 for epochs 3-5 and 0.01 afterwards.
#[derive(Clone, Debug, Default)]
pub struct PiecewiseSchedule {
    table: Vec<(usize, f64)>,
}

impl PiecewiseSchedule {
    /// Create from `(epoch, lr)` pairs in any order
    pub fn new(mut table: Vec<(usize, f64)>) -> Self {
        table.sort_by_key(|(epoch, _)| *epoch);
        Self { table }
    }

    /// The sorted table
    pub fn table(&self) -> &[(usize, f64)] {
        &self.table
    }
}

impl LRScheduler for PiecewiseSchedule {
    fn lr_at(&mut self, epoch: usize, current_lr: f64) -> f64 {
        self.table
            .iter()
            .find(|(e, _)| *e == epoch)
            .map_or(current_lr, |(_, lr)| *lr)
    }
}
