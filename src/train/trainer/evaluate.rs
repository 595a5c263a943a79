//! Evaluation runs

use crate::train::callback::{RunMode, RunParams};
use crate::train::metrics::MetricsAggregator;
use crate::train::{Dataset, Logs};
use crate::{Error, Result};

use super::core::Trainer;

impl Trainer {
    /// Evaluate the model on `data` without updating weights
    ///
    /// Returns the sample-weighted means of the model's test logs. Callbacks
    /// may end the run early through `stop_evaluating`.
    ///
    /// # Example
    ///
    /// ```
    /// # use fitloop::model::LinearRegression;
    /// # use fitloop::train::{Dataset, Trainer};
    /// let data = Dataset::synthetic_linear(&[1.0], 0.0, 10, 0.0, 1);
    /// let mut trainer = Trainer::new(LinearRegression::new(1));
    /// let logs = trainer.evaluate(&data)?;
    /// assert!(logs.get("loss").is_some());
    /// # Ok::<(), fitloop::Error>(())
    /// ```
    pub fn evaluate(&mut self, data: &Dataset) -> Result<Logs> {
        if self.config.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if data.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let span = tracing::info_span!("evaluate", samples = data.len());
        let _enter = span.enter();

        self.callbacks.set_params(&RunParams {
            mode: RunMode::Test,
            epochs: 1,
            steps: data.num_batches(self.config.batch_size),
            verbose: self.config.verbose,
        });
        self.run_test(data)
    }

    /// Fire a full test run over `data`
    ///
    /// Shared by `evaluate` and the validation pass inside `fit`.
    pub(super) fn run_test(&mut self, data: &Dataset) -> Result<Logs> {
        self.handle.set_stop_evaluating(false);
        self.callbacks.on_test_begin(&Logs::new(), &mut self.handle)?;

        let mut aggregator = MetricsAggregator::new();
        for (index, batch) in data.batches(self.config.batch_size).iter().enumerate() {
            self.callbacks
                .on_test_batch_begin(index, &Logs::new(), &mut self.handle)?;
            let logs = self.handle.test_step(batch)?;
            aggregator.update(&logs, batch.size());
            self.callbacks
                .on_test_batch_end(index, &aggregator.result(), &mut self.handle)?;
            if self.handle.stop_evaluating() {
                tracing::debug!(batch = index, "evaluation stopped by callback");
                break;
            }
        }

        let logs = aggregator.result();
        self.callbacks.on_test_end(&logs, &mut self.handle)?;
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::LinearRegression;
    use crate::train::callback::{ModelHandle, RunMode, RunParams};
    use crate::train::{Dataset, Logs, TrainConfig, Trainer, TrainerCallback};
    use crate::{Error, Result};
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl TrainerCallback for Recorder {
        fn set_params(&mut self, params: &RunParams) {
            self.0.lock().unwrap().push(format!("params:{:?}", params.mode));
        }
        fn on_test_begin(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
            self.0.lock().unwrap().push(format!("test_begin:{}", logs.len()));
            Ok(())
        }
        fn on_test_batch_end(
            &mut self,
            batch: usize,
            _: &Logs,
            model: &mut ModelHandle,
        ) -> Result<()> {
            self.0.lock().unwrap().push(format!("batch_end:{batch}"));
            if batch == 1 {
                model.set_stop_evaluating(true);
            }
            Ok(())
        }
        fn on_test_end(&mut self, logs: &Logs, _: &mut ModelHandle) -> Result<()> {
            self.0.lock().unwrap().push(format!("test_end:{}", logs.contains("loss")));
            Ok(())
        }
    }

    fn data(n: usize) -> Dataset {
        Dataset::synthetic_linear(&[1.0], 0.0, n, 0.0, 2)
    }

    #[test]
    fn test_evaluate_fires_hooks_and_stops() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut trainer = Trainer::new(LinearRegression::new(1))
            .with_config(TrainConfig::new().with_batch_size(2));
        trainer.add_callback(Recorder(Arc::clone(&trace)));

        let logs = trainer.evaluate(&data(10)).unwrap();
        assert!(logs.contains("loss"));
        assert_eq!(
            *trace.lock().unwrap(),
            vec!["params:Test", "test_begin:0", "batch_end:0", "batch_end:1", "test_end:true"]
        );
        assert!(trainer.handle().stop_evaluating());
    }

    #[test]
    fn test_evaluate_resets_stop_flag() {
        let mut trainer = Trainer::new(LinearRegression::new(1))
            .with_config(TrainConfig::new().with_batch_size(1));
        trainer.handle_mut().set_stop_evaluating(true);
        let batches = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&batches);
        trainer.add_callback(CountTestBatches(counter));

        trainer.evaluate(&data(3)).unwrap();
        assert_eq!(*batches.lock().unwrap(), 3);
    }

    struct CountTestBatches(Arc<Mutex<usize>>);

    impl TrainerCallback for CountTestBatches {
        fn on_test_batch_end(&mut self, _: usize, _: &Logs, _: &mut ModelHandle) -> Result<()> {
            *self.0.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_evaluate_empty_dataset() {
        let mut trainer = Trainer::new(LinearRegression::new(1));
        let empty = Dataset::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(trainer.evaluate(&empty), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_evaluate_does_not_touch_history() {
        let mut trainer = Trainer::new(LinearRegression::new(1));
        trainer.evaluate(&data(4)).unwrap();
        assert!(trainer.history().epochs().is_empty());
        assert_eq!(trainer.history().params().mode, RunMode::Train);
    }
}
