//! Evaluation metrics for training and validation
//!
//! Per-batch regression metrics plus the running-mean aggregator the run
//! driver uses to turn per-batch values into batch-end and epoch-end logs.

mod aggregate;
mod regression;
mod trait_def;


pub use aggregate::MetricsAggregator;
pub use regression::{MeanAbsoluteError, MeanSquaredError, RootMeanSquaredError};
pub use trait_def::Metric;
