//! Validation pass nested inside a training epoch

use crate::train::trainer::core::Trainer;
use crate::train::{Dataset, Logs};
use crate::Result;

impl Trainer {
    /// Evaluate on `validation` and merge the results into `epoch_logs` as `val_*`
    ///
    /// Fires the test hooks but does not deliver new run parameters, so
    /// callbacks still see the training run's parameters.
    pub(super) fn validate_epoch(
        &mut self,
        validation: &Dataset,
        epoch_logs: &mut Logs,
    ) -> Result<()> {
        let span = tracing::debug_span!("validation", samples = validation.len());
        let _enter = span.enter();

        let val_logs = self.run_test(validation)?;
        epoch_logs.merge_prefixed(&val_logs, "val_");
        Ok(())
    }
}
