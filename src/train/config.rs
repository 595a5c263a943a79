//! Run configuration for the trainer

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Training configuration
///
/// Built with the `with_*` methods; checked by [`TrainConfig::validate`]
/// at the start of every run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of epochs to train for (an upper bound; callbacks may stop earlier)
    pub epochs: usize,
    /// Rows per batch for fit, evaluate and predict
    pub batch_size: usize,
    /// 0 = silent, 1 = per-batch progress, 2 = one line per epoch
    pub verbose: u8,
    /// Print progress every N batches when `verbose == 1`
    pub log_interval: usize,
    /// Fraction of the training set held out for validation when no
    /// validation set is passed
    pub validation_split: f64,
    /// Reshuffle training rows at every epoch
    pub shuffle: bool,
    /// Seed for shuffling
    pub seed: u64,
    /// Epoch to resume from
    pub initial_epoch: usize,
    /// Cap on batches per epoch
    pub steps_per_epoch: Option<usize>,
    /// Validate every N epochs
    pub validation_freq: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 1,
            batch_size: 32,
            verbose: 0,
            log_interval: 10,
            validation_split: 0.0,
            shuffle: true,
            seed: 42,
            initial_epoch: 0,
            steps_per_epoch: None,
            validation_freq: 1,
        }
    }
}

impl TrainConfig {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set verbosity
    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set log interval
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }

    /// Hold out a fraction of the training rows for validation
    pub fn with_validation_split(mut self, fraction: f64) -> Self {
        self.validation_split = fraction;
        self
    }

    /// Enable or disable per-epoch shuffling
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Resume at `epoch`
    pub fn with_initial_epoch(mut self, epoch: usize) -> Self {
        self.initial_epoch = epoch;
        self
    }

    /// Cap the number of batches per epoch
    pub fn with_steps_per_epoch(mut self, steps: usize) -> Self {
        self.steps_per_epoch = Some(steps);
        self
    }

    /// Validate every `freq` epochs
    pub fn with_validation_freq(mut self, freq: usize) -> Self {
        self.validation_freq = freq;
        self
    }

    /// Reject settings no run can honor
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.validation_freq == 0 {
            return Err(Error::InvalidConfig("validation_freq must be at least 1".into()));
        }
        if self.steps_per_epoch == Some(0) {
            return Err(Error::InvalidConfig("steps_per_epoch must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(Error::InvalidConfig(format!(
                "validation_split must be in [0, 1), got {}",
                self.validation_split
            )));
        }
        Ok(())
    }
}
