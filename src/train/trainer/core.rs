//! Core Trainer struct and basic methods

use crate::model::Model;
use crate::optim::Optimizer;
use crate::train::callback::{CallbackManager, History, ModelHandle, TrainerCallback};
use crate::train::TrainConfig;
use crate::Result;

/// High-level trainer that orchestrates fit, evaluate and predict runs
///
/// # Example
///
/// ```
/// use fitloop::model::LinearRegression;
/// use fitloop::optim::Adam;
/// use fitloop::train::{Dataset, EarlyStopping, TrainConfig, Trainer};
///
/// let data = Dataset::synthetic_linear(&[2.0, -1.0], 0.5, 128, 0.0, 3);
/// let mut trainer = Trainer::new(LinearRegression::new(2))
///     .with_config(TrainConfig::new().with_epochs(10).with_batch_size(16));
/// trainer.compile(Adam::default_params(0.05));
/// trainer.add_callback(EarlyStopping::new(2, 1e-4));
///
/// let history = trainer.fit(&data, None)?;
/// assert!(!history.epochs().is_empty());
/// # Ok::<(), fitloop::Error>(())
/// ```
pub struct Trainer {
    /// Model, optimizer and stop flags shared with callbacks
    pub(crate) handle: ModelHandle,

    /// Callback manager
    pub(crate) callbacks: CallbackManager,

    /// Run configuration
    pub(crate) config: TrainConfig,
}

impl Trainer {
    /// Create a new trainer around a model
    pub fn new<M: Model + 'static>(model: M) -> Self {
        Self::from_boxed(Box::new(model))
    }

    /// Create a new trainer around an already boxed model
    pub fn from_boxed(model: Box<dyn Model>) -> Self {
        Self {
            handle: ModelHandle::from_boxed(model),
            callbacks: CallbackManager::new(),
            config: TrainConfig::default(),
        }
    }

    /// Replace the run configuration
    pub fn with_config(mut self, config: TrainConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Replace the run configuration in place
    pub fn set_config(&mut self, config: TrainConfig) {
        self.callbacks
            .set_verbose(config.verbose, config.log_interval);
        self.config = config;
    }

    /// Attach the optimizer used by `fit`
    pub fn compile<O: Optimizer + 'static>(&mut self, optimizer: O) {
        self.handle.set_optimizer(Box::new(optimizer));
    }

    /// Attach an already boxed optimizer
    pub fn compile_boxed(&mut self, optimizer: Box<dyn Optimizer>) {
        self.handle.set_optimizer(optimizer);
    }

    /// Add a callback to the trainer
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Add an already boxed callback
    pub fn add_boxed_callback(&mut self, callback: Box<dyn TrainerCallback>) {
        self.callbacks.add_boxed(callback);
    }

    /// Get current learning rate
    pub fn lr(&self) -> Result<f64> {
        self.handle.learning_rate()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f64) -> Result<()> {
        self.handle.set_learning_rate(lr)
    }

    /// Get reference to the model handle
    pub fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    /// Get mutable reference to the model handle
    pub fn handle_mut(&mut self) -> &mut ModelHandle {
        &mut self.handle
    }

    /// Get reference to callback manager
    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    /// Get mutable reference to callback manager
    pub fn callbacks_mut(&mut self) -> &mut CallbackManager {
        &mut self.callbacks
    }

    /// Get the run configuration
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// History of the most recent `fit`
    pub fn history(&self) -> &History {
        self.callbacks.history()
    }
}
