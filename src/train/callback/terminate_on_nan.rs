//! Stop training when the loss stops being a number

use super::handle::ModelHandle;
use super::traits::TrainerCallback;
use crate::train::Logs;
use crate::Result;

/// Raises `stop_training` as soon as a train batch reports a NaN or infinite loss
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminateOnNaN;

impl TrainerCallback for TerminateOnNaN {
    fn on_train_batch_end(
        &mut self,
        batch: usize,
        logs: &Logs,
        model: &mut ModelHandle,
    ) -> Result<()> {
        if let Some(loss) = logs.get("loss") {
            if !loss.is_finite() {
                tracing::warn!(batch, loss, "invalid loss, terminating training");
                model.set_stop_training(true);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TerminateOnNaN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearRegression;

    #[test]
    fn test_terminate_on_nan() {
        let mut cb = TerminateOnNaN;
        let mut model = ModelHandle::new(LinearRegression::new(1));

        cb.on_train_batch_end(0, &Logs::new().with("loss", 1.0), &mut model).unwrap();
        assert!(!model.stop_training());

        cb.on_train_batch_end(1, &Logs::new().with("loss", f64::NAN), &mut model).unwrap();
        assert!(model.stop_training());
    }

    #[test]
    fn test_terminate_on_infinite_loss() {
        let mut cb = TerminateOnNaN;
        let mut model = ModelHandle::new(LinearRegression::new(1));
        cb.on_train_batch_end(0, &Logs::new().with("loss", f64::INFINITY), &mut model).unwrap();
        assert!(model.stop_training());
    }

    #[test]
    fn test_terminate_ignores_missing_loss() {
        let mut cb = TerminateOnNaN;
        let mut model = ModelHandle::new(LinearRegression::new(1));
        cb.on_train_batch_end(0, &Logs::new(), &mut model).unwrap();
        assert!(!model.stop_training());
    }
}
