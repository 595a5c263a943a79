//! Early stopping callback to halt training when a monitored quantity plateaus

use super::handle::ModelHandle;
use super::monitor::MonitorMode;
use super::traits::TrainerCallback;
use crate::train::Logs;
use crate::Result;

/// Early stopping callback to halt training when a monitored quantity plateaus
///
/// Monitors one log key at each epoch end and raises the model's
/// `stop_training` flag once `patience` epochs pass without an improvement of
/// more than `min_delta`. The first epoch never triggers a stop.
///
/// # Example
///
/// ```rust
/// use fitloop::train::callback::{EarlyStopping, MonitorMode};
///
/// // Stop if val_loss has not improved by 0.001 for 5 epochs
/// let early_stop = EarlyStopping::new(5, 0.001)
///     .monitor("val_loss")
///     .mode(MonitorMode::Min)
///     .with_restore_best();
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    monitor: String,
    patience: usize,
    min_delta: f64,
    mode: MonitorMode,
    baseline: Option<f64>,
    restore_best: bool,
    start_from_epoch: usize,
    /// Epochs without improvement
    pub(crate) wait: usize,
    best: f64,
    best_epoch: Option<usize>,
    best_weights: Option<Vec<f64>>,
    stopped_epoch: Option<usize>,
}

impl EarlyStopping {
    /// Create an early stopping callback monitoring `loss`
    pub fn new(patience: usize, min_delta: f64) -> Self {
        Self {
            monitor: "loss".to_string(),
            patience,
            min_delta: min_delta.abs(),
            mode: MonitorMode::Auto,
            baseline: None,
            restore_best: false,
            start_from_epoch: 0,
            wait: 0,
            best: f64::INFINITY,
            best_epoch: None,
            best_weights: None,
            stopped_epoch: None,
        }
    }

    /// Monitor a different log key, e.g. `val_loss`
    pub fn monitor(mut self, key: impl Into<String>) -> Self {
        self.monitor = key.into();
        self
    }

    /// Set the improvement direction
    pub fn mode(mut self, mode: MonitorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Require the monitored value to beat `baseline` before patience resets
    pub fn baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Restore the weights of the best epoch when stopping
    pub fn with_restore_best(mut self) -> Self {
        self.restore_best = true;
        self
    }

    /// Ignore epochs before `epoch`
    pub fn start_from_epoch(mut self, epoch: usize) -> Self {
        self.start_from_epoch = epoch;
        self
    }

    /// Monitored key
    pub fn monitored(&self) -> &str {
        &self.monitor
    }

    /// Epoch at which training was stopped, if it was
    pub fn stopped_epoch(&self) -> Option<usize> {
        self.stopped_epoch
    }

    /// Best monitored value seen
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Epoch of the best monitored value
    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        let mode = self.resolved_mode();
        self.wait = 0;
        self.best = mode.worst();
        self.best_epoch = None;
        self.best_weights = None;
        self.stopped_epoch = None;
    }

    fn resolved_mode(&self) -> MonitorMode {
        self.mode.resolve(&self.monitor)
    }

    fn beats_baseline(&self, current: f64) -> bool {
        match self.baseline {
            None => true,
            Some(baseline) => self.resolved_mode().improves(current, baseline, self.min_delta),
        }
    }
}

impl TrainerCallback for EarlyStopping {
    fn on_train_begin(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        self.reset();
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs, model: &mut ModelHandle) -> Result<()> {
        let Some(current) = logs.get(&self.monitor) else {
            tracing::warn!(
                monitor = %self.monitor,
                available = ?logs.keys().collect::<Vec<_>>(),
                "early stopping conditioned on a missing metric"
            );
            return Ok(());
        };
        if epoch < self.start_from_epoch {
            return Ok(());
        }

        self.wait += 1;
        if self.resolved_mode().improves(current, self.best, self.min_delta) {
            self.best = current;
            self.best_epoch = Some(epoch);
            if self.restore_best {
                self.best_weights = Some(model.weights());
            }
            if self.beats_baseline(current) {
                self.wait = 0;
            }
            return Ok(());
        }

        if self.wait >= self.patience && epoch > 0 {
            self.stopped_epoch = Some(epoch);
            model.set_stop_training(true);
            if let Some(weights) = self.best_weights.as_deref() {
                tracing::debug!(best_epoch = ?self.best_epoch, "restoring best weights");
                model.set_weights(weights)?;
            }
        }
        Ok(())
    }

    fn on_train_end(&mut self, _logs: &Logs, _model: &mut ModelHandle) -> Result<()> {
        if let Some(epoch) = self.stopped_epoch {
            tracing::info!(
                epoch = epoch + 1,
                monitor = %self.monitor,
                best = self.best,
                "early stopping"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EarlyStopping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearRegression;

    fn handle() -> ModelHandle {
        ModelHandle::new(LinearRegression::new(1))
    }

    fn loss(value: f64) -> Logs {
        Logs::new().with("loss", value)
    }

    #[test]
    fn test_early_stopping_patience() {
        let mut es = EarlyStopping::new(3, 0.001);
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();

        // establishes best
        es.on_epoch_end(0, &loss(1.0), &mut model).unwrap();
        // improvement
        es.on_epoch_end(1, &loss(0.9), &mut model).unwrap();
        // within delta, no improvement
        es.on_epoch_end(2, &loss(0.8995), &mut model).unwrap();
        es.on_epoch_end(3, &loss(0.8995), &mut model).unwrap();
        assert!(!model.stop_training());

        es.on_epoch_end(4, &loss(0.8995), &mut model).unwrap();
        assert!(model.stop_training());
        assert_eq!(es.stopped_epoch(), Some(4));
        assert_eq!(es.best_epoch(), Some(1));
    }

    #[test]
    fn test_early_stopping_improvement_resets() {
        let mut es = EarlyStopping::new(2, 0.01);
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();

        es.on_epoch_end(0, &loss(1.0), &mut model).unwrap();
        es.on_epoch_end(1, &loss(1.0), &mut model).unwrap();
        assert_eq!(es.wait, 1);

        es.on_epoch_end(2, &loss(0.5), &mut model).unwrap();
        assert_eq!(es.wait, 0);
        assert!(!model.stop_training());
    }

    #[test]
    fn test_early_stopping_zero_patience_never_stops_first_epoch() {
        let mut es = EarlyStopping::new(0, 0.0);
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();
        es.on_epoch_end(0, &loss(1.0), &mut model).unwrap();
        assert!(!model.stop_training());
        es.on_epoch_end(1, &loss(2.0), &mut model).unwrap();
        assert!(model.stop_training());
    }

    #[test]
    fn test_early_stopping_missing_monitor_is_noop() {
        let mut es = EarlyStopping::new(1, 0.0).monitor("val_loss");
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();
        for epoch in 0..5 {
            es.on_epoch_end(epoch, &loss(1.0), &mut model).unwrap();
        }
        assert!(!model.stop_training());
        assert_eq!(es.best(), f64::INFINITY);
    }

    #[test]
    fn test_early_stopping_max_mode() {
        let mut es = EarlyStopping::new(1, 0.0).monitor("val_accuracy");
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();

        es.on_epoch_end(0, &Logs::new().with("val_accuracy", 0.5), &mut model).unwrap();
        es.on_epoch_end(1, &Logs::new().with("val_accuracy", 0.7), &mut model).unwrap();
        assert!(!model.stop_training());
        es.on_epoch_end(2, &Logs::new().with("val_accuracy", 0.6), &mut model).unwrap();
        assert!(model.stop_training());
        assert_eq!(es.best(), 0.7);
    }

    #[test]
    fn test_early_stopping_baseline_keeps_counting() {
        let mut es = EarlyStopping::new(2, 0.0).baseline(0.1);
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();

        // improving but never under the baseline
        es.on_epoch_end(0, &loss(1.0), &mut model).unwrap();
        es.on_epoch_end(1, &loss(0.9), &mut model).unwrap();
        assert!(!model.stop_training());
        es.on_epoch_end(2, &loss(0.95), &mut model).unwrap();
        assert!(model.stop_training());
    }

    #[test]
    fn test_early_stopping_start_from_epoch() {
        let mut es = EarlyStopping::new(1, 0.0).start_from_epoch(3);
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();
        for epoch in 0..3 {
            es.on_epoch_end(epoch, &loss(1.0), &mut model).unwrap();
        }
        assert!(!model.stop_training());
        assert_eq!(es.best_epoch(), None);

        es.on_epoch_end(3, &loss(1.0), &mut model).unwrap();
        es.on_epoch_end(4, &loss(1.0), &mut model).unwrap();
        assert!(model.stop_training());
    }

    #[test]
    fn test_early_stopping_restores_best_weights() {
        let mut es = EarlyStopping::new(1, 0.0).with_restore_best();
        let mut model = handle();
        es.on_train_begin(&Logs::new(), &mut model).unwrap();

        model.set_weights(&[1.0, 1.0]).unwrap();
        es.on_epoch_end(0, &loss(0.5), &mut model).unwrap();

        model.set_weights(&[9.0, 9.0]).unwrap();
        es.on_epoch_end(1, &loss(0.7), &mut model).unwrap();

        assert!(model.stop_training());
        assert_eq!(model.weights(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_early_stopping_train_begin_resets() {
        let mut es = EarlyStopping::new(3, 0.001);
        let mut model = handle();
        es.on_epoch_end(0, &loss(0.5), &mut model).unwrap();
        assert_eq!(es.best(), 0.5);

        es.on_train_begin(&Logs::new(), &mut model).unwrap();
        assert_eq!(es.best(), f64::INFINITY);
        assert_eq!(es.wait, 0);
        assert_eq!(es.stopped_epoch(), None);
    }

    #[test]
    fn test_early_stopping_name() {
        assert_eq!(EarlyStopping::new(3, 0.001).name(), "EarlyStopping");
    }
}
