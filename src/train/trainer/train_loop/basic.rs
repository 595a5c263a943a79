//! Epoch and batch loop behind `Trainer::fit`

use std::borrow::Cow;

use crate::train::callback::{History, RunMode, RunParams};
use crate::train::metrics::MetricsAggregator;
use crate::train::trainer::core::Trainer;
use crate::train::{Dataset, Logs};
use crate::{Error, Result};

impl Trainer {
    /// Train for up to `config.epochs` epochs with full callback support
    ///
    /// When `validation` is `None` and `validation_split` is set, the tail of
    /// `train` is held out instead. Returns the history of this run.
    ///
    /// # Errors
    ///
    /// `NotCompiled` without an optimizer, `EmptyDataset` for an empty
    /// training or validation set, `InvalidConfig` for an unusable
    /// configuration, and any error a callback or the model returns. A run
    /// aborted by an error does not fire `on_train_end`.
    ///
    /// # Example
    ///
    /// ```
    /// # use fitloop::model::LinearRegression;
    /// # use fitloop::optim::Sgd;
    /// # use fitloop::train::{Dataset, TrainConfig, Trainer};
    /// let data = Dataset::synthetic_linear(&[1.0], 0.0, 40, 0.0, 5);
    /// let mut trainer = Trainer::new(LinearRegression::new(1)).with_config(
    ///     TrainConfig::new().with_epochs(4).with_batch_size(8).with_validation_split(0.25),
    /// );
    /// trainer.compile(Sgd::new(0.1, 0.9));
    ///
    /// let history = trainer.fit(&data, None)?;
    /// assert_eq!(history.get("val_loss").map(|v| v.len()), Some(4));
    /// # Ok::<(), fitloop::Error>(())
    /// ```
    pub fn fit(&mut self, train: &Dataset, validation: Option<&Dataset>) -> Result<History> {
        if !self.handle.is_compiled() {
            return Err(Error::NotCompiled);
        }
        self.config.validate()?;
        if train.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let split;
        let (train, validation) = match validation {
            Some(val) => (train, Some(val)),
            None if self.config.validation_split > 0.0 => {
                split = train.split_validation(self.config.validation_split)?;
                (&split.0, Some(&split.1))
            }
            None => (train, None),
        };
        if validation.is_some_and(Dataset::is_empty) {
            return Err(Error::EmptyDataset);
        }

        let batch_size = self.config.batch_size;
        let steps = self
            .config
            .steps_per_epoch
            .map_or(train.num_batches(batch_size), |cap| {
                cap.min(train.num_batches(batch_size))
            });
        let epochs = self.config.epochs;

        let span = tracing::info_span!("fit", model = self.handle.model().name(), epochs, steps);
        let _enter = span.enter();

        self.handle.set_stop_training(false);
        self.callbacks.set_params(&RunParams {
            mode: RunMode::Train,
            epochs,
            steps,
            verbose: self.config.verbose,
        });
        self.callbacks.on_train_begin(&Logs::new(), &mut self.handle)?;

        let mut epoch_logs = Logs::new();
        for epoch in self.config.initial_epoch..epochs {
            self.callbacks
                .on_epoch_begin(epoch, &Logs::new(), &mut self.handle)?;

            let data = if self.config.shuffle {
                Cow::Owned(train.shuffled(self.config.seed.wrapping_add(epoch as u64)))
            } else {
                Cow::Borrowed(train)
            };
            epoch_logs = self.run_epoch_batches(&data, steps)?;

            if let Some(val) = validation {
                if (epoch + 1) % self.config.validation_freq == 0 {
                    self.validate_epoch(val, &mut epoch_logs)?;
                }
            }

            tracing::debug!(epoch, logs = %epoch_logs.summary(), "epoch finished");
            self.callbacks
                .on_epoch_end(epoch, &epoch_logs, &mut self.handle)?;
            if self.handle.stop_training() {
                tracing::debug!(epoch, "training stopped by callback");
                break;
            }
        }

        self.callbacks.on_train_end(&epoch_logs, &mut self.handle)?;
        Ok(self.callbacks.history().clone())
    }

    /// Run the train batches of one epoch and return their means
    fn run_epoch_batches(&mut self, data: &Dataset, steps: usize) -> Result<Logs> {
        let mut aggregator = MetricsAggregator::new();
        for (index, batch) in data
            .batches(self.config.batch_size)
            .iter()
            .take(steps)
            .enumerate()
        {
            self.callbacks
                .on_train_batch_begin(index, &Logs::new(), &mut self.handle)?;
            let logs = self.handle.train_step(batch)?;
            aggregator.update(&logs, batch.size());
            self.callbacks
                .on_train_batch_end(index, &aggregator.result(), &mut self.handle)?;
            if self.handle.stop_training() {
                break;
            }
        }
        Ok(aggregator.result())
    }
}
