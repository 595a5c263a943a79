//! Progress callback for printing run progress

use std::time::Instant;

use super::handle::ModelHandle;
use super::traits::{RunMode, RunParams, TrainerCallback};
use crate::train::Logs;
use crate::Result;

/// Progress callback for printing run progress to stdout
///
/// Installed by the trainer when `verbose > 0`; it runs before any user
/// callback.
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    /// Log every N train batches; `None` prints epoch summaries only
    log_interval: Option<usize>,
    params: RunParams,
    epoch_started: Option<Instant>,
}

impl ProgressCallback {
    /// Create progress callback printing every `log_interval` batches
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval: Some(log_interval.max(1)),
            params: RunParams::default(),
            epoch_started: None,
        }
    }

    /// Create progress callback printing one line per epoch
    pub fn epoch_only() -> Self {
        Self {
            log_interval: None,
            params: RunParams::default(),
            epoch_started: None,
        }
    }

    fn line(prefix: &str, logs: &Logs) -> String {
        if logs.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix} - {}", logs.summary())
        }
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TrainerCallback for ProgressCallback {
    fn set_params(&mut self, params: &RunParams) {
        self.params = params.clone();
    }

    fn on_epoch_begin(
        &mut self,
        epoch: usize,
        _logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        self.epoch_started = Some(Instant::now());
        match model.learning_rate() {
            Ok(lr) => println!("Epoch {}/{} (lr: {lr:.2e})", epoch + 1, self.params.epochs),
            Err(_) => println!("Epoch {}/{}", epoch + 1, self.params.epochs),
        }
        Ok(())
    }

    fn on_train_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        _model: &mut ModelHandle,
    ) -> Result<()> {
        if let Some(interval) = self.log_interval {
            if (batch + 1) % interval == 0 {
                let prefix = format!("  {}/{}", batch + 1, self.params.steps);
                println!("{}", Self::line(&prefix, logs));
            }
        }
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        let elapsed = self
            .epoch_started
            .take()
            .map_or(0.0, |start| start.elapsed().as_secs_f64());
        let prefix = format!("Epoch {}/{} ({elapsed:.1}s)", epoch + 1, self.params.epochs);
        println!("{}", Self::line(&prefix, logs));
        Ok(())
    }

    fn on_test_end(&mut self, logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        // nested validation is reported in the epoch line
        if self.params.mode == RunMode::Test {
            println!("{}", Self::line("Evaluation", logs));
        }
        Ok(())
    }

    fn on_predict_end(&mut self, logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        println!("{}", Self::line("Prediction", logs));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearRegression;

    fn handle() -> ModelHandle {
        ModelHandle::new(LinearRegression::new(1))
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = ProgressCallback::new(5);
        let mut model = handle();
        progress.set_params(&RunParams {
            mode: RunMode::Train,
            epochs: 10,
            steps: 100,
            verbose: 1,
        });
        let logs = Logs::new().with("loss", 0.5);

        assert!(progress.on_epoch_begin(0, &Logs::new(), &mut model).is_ok());
        assert!(progress.on_train_batch_end(4, &logs, &mut model).is_ok());
        assert!(progress.on_epoch_end(0, &logs, &mut model).is_ok());
        assert!(progress.epoch_started.is_none());
    }

    #[test]
    fn test_progress_callback_default() {
        assert_eq!(ProgressCallback::default().log_interval, Some(10));
        assert_eq!(ProgressCallback::new(0).log_interval, Some(1));
        assert_eq!(ProgressCallback::epoch_only().log_interval, None);
    }

    #[test]
    fn test_progress_callback_keeps_params() {
        let mut pc = ProgressCallback::epoch_only();
        let params = RunParams { mode: RunMode::Test, epochs: 1, steps: 4, verbose: 2 };
        pc.set_params(&params);
        assert_eq!(pc.params, params);
    }

    #[test]
    fn test_progress_line_format() {
        let logs = Logs::new().with("loss", 0.25);
        assert_eq!(ProgressCallback::line("Evaluation", &logs), "Evaluation - loss: 0.2500");
        assert_eq!(ProgressCallback::line("Evaluation", &Logs::new()), "Evaluation");
    }

    #[test]
    fn test_progress_callback_name() {
        assert_eq!(ProgressCallback::new(5).name(), "ProgressCallback");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::LinearRegression;
    use proptest::prelude::*;

    proptest! {
        /// Progress output never fails or touches the stop flags
        #[test]
        fn progress_callback_never_stops(
            epoch in 0usize..100,
            batch in 0usize..1000,
            loss in -100.0f64..100.0,
        ) {
            let mut progress = ProgressCallback::new(10);
            let mut model = ModelHandle::new(LinearRegression::new(1));
            let logs = Logs::new().with("loss", loss);

            prop_assert!(progress.on_train_begin(&Logs::new(), &mut model).is_ok());
            prop_assert!(progress.on_epoch_begin(epoch, &Logs::new(), &mut model).is_ok());
            prop_assert!(progress.on_train_batch_end(batch, &logs, &mut model).is_ok());
            prop_assert!(progress.on_epoch_end(epoch, &logs, &mut model).is_ok());
            prop_assert!(!model.stop_training());
        }
    }
}
