//! Prediction runs

use crate::train::callback::{RunMode, RunParams};
use crate::train::Logs;
use crate::{Error, Result};

use super::core::Trainer;

impl Trainer {
    /// Predict one value per input row
    ///
    /// Batch-end logs carry `size`, the rows in that batch; the predict-end
    /// logs carry `samples`, the rows predicted. When a callback raises
    /// `stop_predicting`, the predictions made so far are returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use fitloop::model::LinearRegression;
    /// # use fitloop::train::Trainer;
    /// let mut trainer = Trainer::new(LinearRegression::new(2));
    /// trainer.handle_mut().set_weights(&[1.0, 2.0, 0.5])?;
    /// let out = trainer.predict(&[vec![1.0, 1.0], vec![0.0, 2.0]])?;
    /// assert_eq!(out, vec![3.5, 4.5]);
    /// # Ok::<(), fitloop::Error>(())
    /// ```
    pub fn predict(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        let batch_size = self.config.batch_size;
        if batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if inputs.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let span = tracing::info_span!("predict", samples = inputs.len());
        let _enter = span.enter();

        self.handle.set_stop_predicting(false);
        self.callbacks.set_params(&RunParams {
            mode: RunMode::Predict,
            epochs: 1,
            steps: inputs.len().div_ceil(batch_size),
            verbose: self.config.verbose,
        });
        self.callbacks
            .on_predict_begin(&Logs::new(), &mut self.handle)?;

        let mut outputs = Vec::with_capacity(inputs.len());
        for (index, chunk) in inputs.chunks(batch_size).enumerate() {
            self.callbacks
                .on_predict_batch_begin(index, &Logs::new(), &mut self.handle)?;
            outputs.extend(self.handle.predict_step(chunk)?);
            let logs = Logs::new().with("size", chunk.len() as f64);
            self.callbacks
                .on_predict_batch_end(index, &logs, &mut self.handle)?;
            if self.handle.stop_predicting() {
                tracing::debug!(batch = index, "prediction stopped by callback");
                break;
            }
        }

        let logs = Logs::new().with("samples", outputs.len() as f64);
        self.callbacks.on_predict_end(&logs, &mut self.handle)?;
        Ok(outputs)
    }
}
