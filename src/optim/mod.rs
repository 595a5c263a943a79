//! Optimizers and learning rate schedules

mod adam;
mod optimizer;
mod scheduler;
mod sgd;

pub use adam::Adam;
pub use optimizer::Optimizer;
pub use scheduler::{CosineAnnealingLR, LRScheduler, PiecewiseSchedule, StepDecayLR};
pub use sgd::Sgd;
