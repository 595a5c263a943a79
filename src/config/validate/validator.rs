//! Configuration validation logic
//!
//! Validates fit specifications for correctness before execution.

use super::error::ValidationError;
use crate::config::schema::{
    CallbacksSpec, DataSpec, FitSpec, LrScheduleSpec, OptimSpec, TrainingParams,
};

const VALID_OPTIMIZERS: [&str; 2] = ["sgd", "adam"];

/// Validate a fit specification
///
/// Checks:
/// - Data sources exist and are unambiguous
/// - Numeric values are in valid ranges
/// - Names match allowed values
pub fn validate_config(spec: &FitSpec) -> Result<(), ValidationError> {
    let data_features = validate_data(&spec.data)?;

    if let Some(features) = spec.model.features {
        if features == 0 {
            return Err(ValidationError::InvalidFeatureCount(features));
        }
        if let Some(actual) = data_features {
            if actual != features {
                return Err(ValidationError::FeatureMismatch {
                    expected: features,
                    actual,
                });
            }
        }
    }
    let known_features = spec.model.features.or(data_features);
    if let (Some(weights), Some(features)) = (&spec.model.weights, known_features) {
        if weights.len() != features + 1 {
            return Err(ValidationError::InvalidModelWeights {
                expected: features + 1,
                actual: weights.len(),
            });
        }
    }

    validate_optimizer(&spec.optimizer)?;
    validate_training(&spec.training)?;
    validate_callbacks(&spec.callbacks)?;
    Ok(())
}

/// Returns the feature count when it is known without reading files
fn validate_data(data: &DataSpec) -> Result<Option<usize>, ValidationError> {
    let features = match (&data.path, &data.synthetic) {
        (None, None) => return Err(ValidationError::MissingData),
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingData),
        (Some(path), None) => {
            if !path.exists() {
                return Err(ValidationError::TrainDataNotFound(path.display().to_string()));
            }
            None
        }
        (None, Some(synthetic)) => {
            if synthetic.weights.is_empty() {
                return Err(ValidationError::InvalidFeatureCount(0));
            }
            if synthetic.samples == 0 {
                return Err(ValidationError::InvalidSamples(0));
            }
            if !synthetic.noise.is_finite() || synthetic.noise < 0.0 {
                return Err(ValidationError::InvalidNoise(synthetic.noise));
            }
            Some(synthetic.weights.len())
        }
    };

    if let Some(val_path) = &data.validation_path {
        if !val_path.exists() {
            return Err(ValidationError::ValDataNotFound(val_path.display().to_string()));
        }
    }
    Ok(features)
}

fn validate_optimizer(optimizer: &OptimSpec) -> Result<(), ValidationError> {
    // Validate learning rate (must be positive and reasonable)
    if !(optimizer.lr > 0.0 && optimizer.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(optimizer.lr));
    }

    let name = optimizer.name.to_lowercase();
    if !VALID_OPTIMIZERS.contains(&name.as_str()) {
        return Err(ValidationError::InvalidOptimizer(optimizer.name.clone()));
    }

    for (key, value) in &optimizer.params {
        let in_range = match (key.as_str(), value.as_f64()) {
            ("momentum" | "beta1" | "beta2", Some(v)) => (0.0..1.0).contains(&v),
            ("eps", Some(v)) => v > 0.0 && v.is_finite(),
            _ => false,
        };
        if !in_range {
            return Err(ValidationError::InvalidOptimizerParam {
                name: key.clone(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_training(training: &TrainingParams) -> Result<(), ValidationError> {
    if training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(training.epochs));
    }
    if training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(training.batch_size));
    }
    if training.initial_epoch >= training.epochs {
        return Err(ValidationError::InvalidInitialEpoch {
            initial: training.initial_epoch,
            epochs: training.epochs,
        });
    }
    if !(0.0..1.0).contains(&training.validation_split) {
        return Err(ValidationError::InvalidValidationSplit(training.validation_split));
    }
    if training.validation_freq == 0 {
        return Err(ValidationError::InvalidValidationFreq(0));
    }
    if training.steps_per_epoch == Some(0) {
        return Err(ValidationError::InvalidStepsPerEpoch(0));
    }
    if training.verbose > 2 {
        return Err(ValidationError::InvalidVerbose(training.verbose));
    }
    if training.log_interval == 0 {
        return Err(ValidationError::InvalidLogInterval(0));
    }
    Ok(())
}

fn validate_schedule(schedule: &LrScheduleSpec) -> Result<(), ValidationError> {
    let valid_lr = |lr: f64| lr.is_finite() && lr >= 0.0;
    let problem = match schedule {
        LrScheduleSpec::StepDecay { lr, step_size, gamma } => {
            if !valid_lr(*lr) {
                Some(format!("step_decay lr {lr}"))
            } else if *step_size == 0 {
                Some("step_decay step_size must be > 0".to_string())
            } else if !(gamma.is_finite() && *gamma > 0.0) {
                Some(format!("step_decay gamma {gamma} must be > 0.0"))
            } else {
                None
            }
        }
        LrScheduleSpec::Cosine { lr_max, lr_min, t_max } => {
            if !valid_lr(*lr_max) || !valid_lr(*lr_min) || lr_min > lr_max {
                Some(format!("cosine needs 0.0 <= lr_min <= lr_max, got {lr_min}..{lr_max}"))
            } else if *t_max == 0 {
                Some("cosine t_max must be > 0".to_string())
            } else {
                None
            }
        }
        LrScheduleSpec::Piecewise { table } => {
            if table.is_empty() {
                Some("piecewise table is empty".to_string())
            } else {
                table
                    .iter()
                    .find(|(_, lr)| !valid_lr(*lr))
                    .map(|(epoch, lr)| format!("piecewise lr {lr} at epoch {epoch}"))
            }
        }
    };
    match problem {
        Some(message) => Err(ValidationError::InvalidLRSchedule(message)),
        None => Ok(()),
    }
}

fn validate_callbacks(callbacks: &CallbacksSpec) -> Result<(), ValidationError> {
    if let Some(schedule) = &callbacks.lr_schedule {
        validate_schedule(schedule)?;
    }
    if let Some(checkpoint) = &callbacks.checkpoint {
        if checkpoint.save_every == Some(0) {
            return Err(ValidationError::InvalidSaveInterval(0));
        }
    }
    if let Some(early) = &callbacks.early_stopping {
        if let Some(baseline) = early.baseline {
            if !baseline.is_finite() {
                return Err(ValidationError::InvalidBaseline(baseline));
            }
        }
    }
    Ok(())
}
