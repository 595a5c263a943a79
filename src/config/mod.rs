//! Declarative fit configuration
//!
//! A YAML file describes the data, model, optimizer, run parameters and
//! callbacks of a fit. [`load_config`] parses and validates it, the
//! `build_*` functions turn it into a ready [`Trainer`](crate::train::Trainer)
//! and [`fit_from_yaml`] runs the whole thing.
//!
//! ```yaml
//! data:
//!   synthetic: { weights: [2.0, -1.0], bias: 0.5, samples: 256 }
//! optimizer:
//!   name: adam
//!   lr: 0.05
//! training:
//!   epochs: 50
//!   validation_split: 0.2
//! callbacks:
//!   early_stopping: { patience: 5, restore_best_weights: true }
//!   lr_schedule: { kind: step_decay, lr: 0.05, step_size: 20, gamma: 0.5 }
//! ```

mod builder;
mod cli;
mod schema;
mod train;
mod validate;

pub use builder::{
    build_callbacks, build_datasets, build_model, build_optimizer, build_train_config,
    build_trainer,
};
pub use cli::{
    apply_overrides, parse_args, Cli, Command, FitArgs, InfoArgs, OutputFormat, ValidateArgs,
};
pub use schema::{
    CallbacksSpec, CheckpointSpec, CsvLogSpec, DataSpec, EarlyStoppingSpec, FitSpec,
    LrScheduleSpec, ModelKind, ModelSpec, OptimSpec, SyntheticSpec, TrainingParams,
};
pub use train::{fit_from_spec, fit_from_yaml, load_config, FitReport};
pub use validate::{validate_config, ValidationError};
