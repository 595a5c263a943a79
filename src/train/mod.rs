//! High-level training loop
//!
//! This module provides:
//! - The callback system (`callback`) and its built-in callbacks
//! - The `Trainer` driver for fit, evaluate and predict runs
//! - In-memory datasets, batches and metric snapshots (`Logs`)
//! - Regression metrics and the running-mean aggregator
//!
//! # Example
//!
//! ```
//! use fitloop::model::LinearRegression;
//! use fitloop::optim::Sgd;
//! use fitloop::train::{Dataset, TrainConfig, Trainer};
//!
//! let data = Dataset::synthetic_linear(&[1.5], -0.5, 64, 0.0, 1);
//! let mut trainer = Trainer::new(LinearRegression::new(1))
//!     .with_config(TrainConfig::new().with_epochs(3).with_batch_size(16));
//! trainer.compile(Sgd::new(0.1, 0.0));
//!
//! let history = trainer.fit(&data, None)?;
//! assert_eq!(history.epochs(), &[0, 1, 2]);
//! # Ok::<(), fitloop::Error>(())
//! ```

mod batch;
pub mod callback;
mod config;
mod data;
mod logs;
mod metrics;
mod trainer;

pub use batch::Batch;
pub use callback::{
    CallbackManager, Checkpoint, CheckpointCallback, CsvLogger, EarlyStopping, History,
    LambdaCallback, LearningRateScheduler, ModelHandle, MonitorMode, ProgressCallback, RunMode,
    RunParams, TerminateOnNaN, TrainerCallback,
};
pub use config::TrainConfig;
pub use data::Dataset;
pub use logs::Logs;
pub use metrics::{
    MeanAbsoluteError, MeanSquaredError, Metric, MetricsAggregator, RootMeanSquaredError,
};
pub use trainer::Trainer;
