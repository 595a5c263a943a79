//! fitloop: a training run driver with an event-driven callback system
//!
//! A [`train::Trainer`] drives three kinds of runs over a black-box
//! [`model::Model`]: `fit`, `evaluate` and `predict`. At every lifecycle
//! boundary (run begin/end, epoch begin/end, batch begin/end) it notifies the
//! registered [`train::TrainerCallback`]s with the current metrics snapshot
//! and a mutable [`train::ModelHandle`] through which callbacks can request
//! early termination, adjust the learning rate or swap weights.
//!
//! # Example
//!
//! ```no_run
//! use fitloop::model::LinearRegression;
//! use fitloop::optim::Sgd;
//! use fitloop::train::{Dataset, EarlyStopping, TrainConfig, Trainer};
//!
//! let data = Dataset::synthetic_linear(&[2.0, -1.0], 0.5, 256, 0.01, 7);
//! let mut trainer = Trainer::new(LinearRegression::new(2))
//!     .with_config(TrainConfig::new().with_epochs(20).with_batch_size(32));
//! trainer.compile(Sgd::new(0.05, 0.0));
//! trainer.add_callback(EarlyStopping::new(3, 1e-4));
//!
//! let history = trainer.fit(&data, None)?;
//! println!("trained {} epochs", history.epochs().len());
//! # Ok::<(), fitloop::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod optim;
pub mod train;

pub use error::{Error, Result};
