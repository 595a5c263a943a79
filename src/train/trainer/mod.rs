//! Trainer abstraction for fit, evaluate and predict runs
//!
//! The `Trainer` owns the model handle and the callback manager and drives
//! the three run kinds, firing every lifecycle event in order:
//! - `fit`: train begin, then per epoch: epoch begin, train batches, optional
//!   nested validation, epoch end; then train end
//! - `evaluate`: test begin, test batches, test end
//! - `predict`: predict begin, predict batches, predict end

mod core;
mod evaluate;
mod predict;
mod train_loop;

pub use self::core::Trainer;
