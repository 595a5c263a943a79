//! Build training components from configuration

use super::schema::{CallbacksSpec, DataSpec, FitSpec, LrScheduleSpec, ModelKind, OptimSpec};
use crate::error::{Error, Result};
use crate::model::{LinearRegression, Model};
use crate::optim::{Adam, CosineAnnealingLR, Optimizer, PiecewiseSchedule, Sgd, StepDecayLR};
use crate::train::{
    CheckpointCallback, CsvLogger, Dataset, EarlyStopping, LearningRateScheduler, TerminateOnNaN,
    TrainConfig, Trainer, TrainerCallback,
};

// Optimizer parameter field names
const PARAM_MOMENTUM: &str = "momentum";
const PARAM_BETA1: &str = "beta1";
const PARAM_BETA2: &str = "beta2";
const PARAM_EPS: &str = "eps";

fn param(spec: &OptimSpec, key: &str, default: f64) -> f64 {
    spec.params
        .get(key)
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(default)
}

/// Build optimizer from configuration
pub fn build_optimizer(spec: &OptimSpec) -> Result<Box<dyn Optimizer>> {
    match spec.name.to_lowercase().as_str() {
        "sgd" => Ok(Box::new(Sgd::new(spec.lr, param(spec, PARAM_MOMENTUM, 0.0)))),
        "adam" => Ok(Box::new(Adam::new(
            spec.lr,
            param(spec, PARAM_BETA1, 0.9),
            param(spec, PARAM_BETA2, 0.999),
            param(spec, PARAM_EPS, 1e-8),
        ))),
        name => Err(Error::Config(format!(
            "Unknown optimizer: {name}. Supported: sgd, adam"
        ))),
    }
}

/// Load the training set and the optional validation set
pub fn build_datasets(spec: &DataSpec) -> Result<(Dataset, Option<Dataset>)> {
    let train = match (&spec.path, &spec.synthetic) {
        (Some(path), None) => Dataset::from_csv(path, spec.has_headers)?,
        (None, Some(s)) => {
            Dataset::synthetic_linear(&s.weights, s.bias, s.samples, s.noise, s.seed)
        }
        _ => {
            return Err(Error::Config(
                "data needs exactly one of `path` or `synthetic`".to_string(),
            ))
        }
    };
    let validation = spec
        .validation_path
        .as_ref()
        .map(|path| Dataset::from_csv(path, spec.has_headers))
        .transpose()?;
    Ok((train, validation))
}

/// Build the model for `num_features` inputs
pub fn build_model(spec: &FitSpec, num_features: usize) -> Result<Box<dyn Model>> {
    let features = spec.model.features.unwrap_or(num_features);
    let mut model: Box<dyn Model> = match spec.model.kind {
        ModelKind::Linear => Box::new(LinearRegression::new(features)),
    };
    if let Some(weights) = &spec.model.weights {
        model.set_weights(weights)?;
    }
    Ok(model)
}

/// Build the configured callbacks in registration order
///
/// Order: terminate-on-NaN, LR schedule, early stopping, checkpoint, CSV log.
pub fn build_callbacks(spec: &CallbacksSpec) -> Vec<Box<dyn TrainerCallback>> {
    let mut callbacks: Vec<Box<dyn TrainerCallback>> = Vec::new();

    if spec.terminate_on_nan {
        callbacks.push(Box::new(TerminateOnNaN));
    }

    if let Some(schedule) = &spec.lr_schedule {
        let scheduler: Box<dyn TrainerCallback> = match schedule {
            LrScheduleSpec::StepDecay { lr, step_size, gamma } => Box::new(
                LearningRateScheduler::new(StepDecayLR::new(*lr, *step_size, *gamma)),
            ),
            LrScheduleSpec::Cosine { lr_max, lr_min, t_max } => Box::new(
                LearningRateScheduler::new(CosineAnnealingLR::new(*lr_max, *t_max, *lr_min)),
            ),
            LrScheduleSpec::Piecewise { table } => Box::new(LearningRateScheduler::new(
                PiecewiseSchedule::new(table.clone()),
            )),
        };
        callbacks.push(scheduler);
    }

    if let Some(es) = &spec.early_stopping {
        let mut early = EarlyStopping::new(es.patience, es.min_delta)
            .monitor(es.monitor.clone())
            .mode(es.mode)
            .start_from_epoch(es.start_from_epoch);
        if let Some(baseline) = es.baseline {
            early = early.baseline(baseline);
        }
        if es.restore_best_weights {
            early = early.with_restore_best();
        }
        callbacks.push(Box::new(early));
    }

    if let Some(ckpt) = &spec.checkpoint {
        let mut checkpoint = CheckpointCallback::new(&ckpt.dir).save_best(ckpt.save_best);
        if let Some(every) = ckpt.save_every {
            checkpoint = checkpoint.save_every(every);
        }
        if let Some(monitor) = &ckpt.monitor {
            checkpoint = checkpoint.monitor(monitor.clone());
        }
        callbacks.push(Box::new(checkpoint));
    }

    if let Some(csv) = &spec.csv_log {
        callbacks.push(Box::new(CsvLogger::new(&csv.path).append(csv.append)));
    }

    callbacks
}

/// Run configuration from the `training` section
pub fn build_train_config(spec: &FitSpec) -> TrainConfig {
    let t = &spec.training;
    let mut config = TrainConfig::new()
        .with_epochs(t.epochs)
        .with_batch_size(t.batch_size)
        .with_verbose(t.verbose)
        .with_log_interval(t.log_interval)
        .with_validation_split(t.validation_split)
        .with_shuffle(t.shuffle)
        .with_seed(t.seed)
        .with_initial_epoch(t.initial_epoch)
        .with_validation_freq(t.validation_freq);
    if let Some(steps) = t.steps_per_epoch {
        config = config.with_steps_per_epoch(steps);
    }
    config
}

/// Assemble a compiled trainer with its callbacks for `num_features` inputs
pub fn build_trainer(spec: &FitSpec, num_features: usize) -> Result<Trainer> {
    let mut trainer =
        Trainer::from_boxed(build_model(spec, num_features)?).with_config(build_train_config(spec));
    trainer.compile_boxed(build_optimizer(&spec.optimizer)?);
    for callback in build_callbacks(&spec.callbacks) {
        trainer.add_boxed_callback(callback);
    }
    Ok(trainer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::*;
    use crate::train::MonitorMode;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn optim(name: &str, params: &[(&str, f64)]) -> OptimSpec {
        OptimSpec {
            name: name.to_string(),
            lr: 0.05,
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn spec() -> FitSpec {
        FitSpec {
            model: ModelSpec::default(),
            data: DataSpec {
                synthetic: Some(SyntheticSpec {
                    weights: vec![1.0, 2.0],
                    bias: 0.0,
                    samples: 20,
                    noise: 0.0,
                    seed: 3,
                }),
                ..Default::default()
            },
            optimizer: optim("sgd", &[]),
            training: TrainingParams::default(),
            callbacks: CallbacksSpec::default(),
        }
    }

    #[test]
    fn test_build_optimizer() {
        let sgd = build_optimizer(&optim("SGD", &[("momentum", 0.9)])).unwrap();
        assert_eq!(sgd.name(), "SGD");
        assert_eq!(sgd.lr(), 0.05);

        let adam = build_optimizer(&optim("adam", &[("beta1", 0.8)])).unwrap();
        assert_eq!(adam.name(), "Adam");

        assert!(build_optimizer(&optim("lbfgs", &[])).is_err());
    }

    #[test]
    fn test_build_synthetic_dataset() {
        let (train, val) = build_datasets(&spec().data).unwrap();
        assert_eq!(train.len(), 20);
        assert_eq!(train.num_features(), 2);
        assert!(val.is_none());
    }

    #[test]
    fn test_build_csv_datasets() {
        let mut train = tempfile::NamedTempFile::new().unwrap();
        writeln!(train, "x,y\n1,2\n2,4").unwrap();
        let mut val = tempfile::NamedTempFile::new().unwrap();
        writeln!(val, "x,y\n3,6").unwrap();

        let data = DataSpec {
            path: Some(train.path().to_path_buf()),
            validation_path: Some(val.path().to_path_buf()),
            has_headers: true,
            synthetic: None,
        };
        let (train, val) = build_datasets(&data).unwrap();
        assert_eq!(train.len(), 2);
        assert_eq!(val.map(|v| v.targets().to_vec()), Some(vec![6.0]));
    }

    #[test]
    fn test_build_model_with_initial_weights() {
        let mut s = spec();
        s.model.weights = Some(vec![1.0, 2.0, 3.0]);
        let model = build_model(&s, 2).unwrap();
        assert_eq!(model.weights(), vec![1.0, 2.0, 3.0]);

        s.model.weights = Some(vec![1.0]);
        assert!(matches!(build_model(&s, 2), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_build_callbacks_order() {
        let callbacks = CallbacksSpec {
            early_stopping: Some(EarlyStoppingSpec {
                monitor: "loss".into(),
                patience: 2,
                min_delta: 0.0,
                mode: MonitorMode::Auto,
                baseline: None,
                restore_best_weights: true,
                start_from_epoch: 0,
            }),
            lr_schedule: Some(LrScheduleSpec::Piecewise { table: vec![(0, 0.1)] }),
            checkpoint: Some(CheckpointSpec {
                dir: PathBuf::from("ckpt"),
                save_every: Some(1),
                save_best: false,
                monitor: None,
            }),
            csv_log: Some(CsvLogSpec { path: PathBuf::from("log.csv"), append: false }),
            terminate_on_nan: true,
        };
        let names: Vec<_> = build_callbacks(&callbacks).iter().map(|cb| cb.name()).collect();
        assert_eq!(
            names,
            vec![
                "TerminateOnNaN",
                "LearningRateScheduler",
                "EarlyStopping",
                "CheckpointCallback",
                "CsvLogger"
            ]
        );
        assert!(build_callbacks(&CallbacksSpec::default()).is_empty());
    }

    #[test]
    fn test_build_trainer() {
        let mut s = spec();
        s.training.epochs = 3;
        s.training.verbose = 0;
        s.callbacks.terminate_on_nan = true;
        let trainer = build_trainer(&s, 2).unwrap();
        assert!(trainer.handle().is_compiled());
        assert_eq!(trainer.config().epochs, 3);
        assert_eq!(trainer.callbacks().len(), 1);
        assert!(!trainer.callbacks().is_verbose());
    }
}
