//! Callback system for run events
//!
//! Callbacks observe three kinds of run: training (`fit`), evaluation
//! (`evaluate`) and prediction (`predict`). Each run fires a begin/end pair,
//! training additionally fires epoch events, and every run fires per-batch
//! events:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_begin` / `on_epoch_end`
//! - `on_train_batch_begin` / `on_train_batch_end`
//! - `on_test_*` and `on_predict_*` counterparts
//!
//! Callbacks act on the run through the [`ModelHandle`] they are given: they
//! can raise a stop flag, change the learning rate or swap weights.
//!
//! # Example
//!
//! ```rust
//! use fitloop::train::callback::{ModelHandle, TrainerCallback};
//! use fitloop::train::Logs;
//!
//! struct PrintCallback;
//!
//! impl TrainerCallback for PrintCallback {
//!     fn on_epoch_end(
//!         &mut self,
//!         epoch: usize,
//!         logs: &Logs,
//!         _model: &mut ModelHandle,
//!     ) -> fitloop::Result<()> {
//!         println!("Epoch {epoch} finished: {}", logs.summary());
//!         Ok(())
//!     }
//! }
//! ```

mod checkpoint;
mod csv_logger;
mod early_stopping;
mod handle;
mod history;
mod lambda;
mod manager;
mod monitor;
mod progress;
mod scheduler;
mod terminate_on_nan;
mod traits;

pub use checkpoint::{Checkpoint, CheckpointCallback};
pub use csv_logger::CsvLogger;
pub use early_stopping::EarlyStopping;
pub use handle::ModelHandle;
pub use history::History;
pub use lambda::LambdaCallback;
pub use manager::CallbackManager;
pub use monitor::MonitorMode;
pub use progress::ProgressCallback;
pub use scheduler::LearningRateScheduler;
pub use terminate_on_nan::TerminateOnNaN;
pub use traits::{RunMode, RunParams, TrainerCallback};
