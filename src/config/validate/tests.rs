//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::train::MonitorMode;
use std::collections::HashMap;
use std::path::PathBuf;

fn create_valid_spec() -> FitSpec {
    FitSpec {
        model: ModelSpec::default(),
        data: DataSpec {
            synthetic: Some(SyntheticSpec {
                weights: vec![2.0, -1.0],
                bias: 0.5,
                samples: 64,
                noise: 0.0,
                seed: 1,
            }),
            ..Default::default()
        },
        optimizer: OptimSpec {
            name: "sgd".to_string(),
            lr: 0.01,
            params: HashMap::new(),
        },
        training: TrainingParams::default(),
        callbacks: CallbacksSpec::default(),
    }
}

#[test]
fn test_valid_config() {
    let spec = create_valid_spec();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_missing_and_conflicting_data() {
    let mut spec = create_valid_spec();
    spec.data.synthetic = None;
    assert!(matches!(validate_config(&spec), Err(ValidationError::MissingData)));

    let mut spec = create_valid_spec();
    spec.data.path = Some(PathBuf::from("train.csv"));
    assert!(matches!(validate_config(&spec), Err(ValidationError::ConflictingData)));
}

#[test]
fn test_data_paths_must_exist() {
    let mut spec = create_valid_spec();
    spec.data.synthetic = None;
    spec.data.path = Some(PathBuf::from("/nonexistent/train.csv"));
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::TrainDataNotFound(_))
    ));

    let file = tempfile::NamedTempFile::new().unwrap();
    spec.data.path = Some(file.path().to_path_buf());
    assert!(validate_config(&spec).is_ok());

    spec.data.validation_path = Some(PathBuf::from("/nonexistent/val.csv"));
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::ValDataNotFound(_))
    ));
}

#[test]
fn test_invalid_synthetic() {
    let mut spec = create_valid_spec();
    if let Some(s) = spec.data.synthetic.as_mut() {
        s.samples = 0;
    }
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidSamples(0))));

    let mut spec = create_valid_spec();
    if let Some(s) = spec.data.synthetic.as_mut() {
        s.weights.clear();
    }
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidFeatureCount(0))));

    let mut spec = create_valid_spec();
    if let Some(s) = spec.data.synthetic.as_mut() {
        s.noise = -1.0;
    }
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidNoise(_))));
}

#[test]
fn test_model_features_must_match_data() {
    let mut spec = create_valid_spec();
    spec.model.features = Some(3);
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::FeatureMismatch { expected: 3, actual: 2 })
    ));

    spec.model.features = Some(2);
    spec.model.weights = Some(vec![0.0, 0.0]);
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::InvalidModelWeights { expected: 3, actual: 2 })
    ));
}

#[test]
fn test_invalid_learning_rate() {
    let mut spec = create_valid_spec();
    spec.optimizer.lr = 0.0;
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidLearningRate(lr) if lr == 0.0));

    spec.optimizer.lr = f64::NAN;
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::InvalidLearningRate(_))
    ));
}

#[test]
fn test_invalid_optimizer() {
    let mut spec = create_valid_spec();
    spec.optimizer.name = "rmsprop".to_string();
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidOptimizer(ref name) if name == "rmsprop"));

    spec.optimizer.name = "Adam".to_string();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_optimizer_params() {
    let mut spec = create_valid_spec();
    spec.optimizer.params.insert("momentum".into(), serde_json::json!(1.5));
    assert!(matches!(
        validate_config(&spec),
        Err(ValidationError::InvalidOptimizerParam { ref name, .. }) if name == "momentum"
    ));

    let mut spec = create_valid_spec();
    spec.optimizer.params.insert("weight_decay".into(), serde_json::json!(0.01));
    assert!(validate_config(&spec).is_err());

    let mut spec = create_valid_spec();
    spec.optimizer.params.insert("momentum".into(), serde_json::json!(0.9));
    assert!(validate_config(&spec).is_ok());
}

fn training_error(mutate: impl FnOnce(&mut TrainingParams)) -> ValidationError {
    let mut spec = create_valid_spec();
    mutate(&mut spec.training);
    validate_config(&spec).unwrap_err()
}

#[test]
fn test_invalid_training_params() {
    assert!(matches!(training_error(|t| t.epochs = 0), ValidationError::InvalidEpochs(0)));
    assert!(matches!(training_error(|t| t.batch_size = 0), ValidationError::InvalidBatchSize(0)));
    assert!(matches!(
        training_error(|t| t.initial_epoch = 10),
        ValidationError::InvalidInitialEpoch { initial: 10, epochs: 10 }
    ));
    assert!(matches!(
        training_error(|t| t.validation_split = 1.0),
        ValidationError::InvalidValidationSplit(_)
    ));
    assert!(matches!(
        training_error(|t| t.validation_freq = 0),
        ValidationError::InvalidValidationFreq(0)
    ));
    assert!(matches!(
        training_error(|t| t.steps_per_epoch = Some(0)),
        ValidationError::InvalidStepsPerEpoch(0)
    ));
    assert!(matches!(training_error(|t| t.verbose = 3), ValidationError::InvalidVerbose(3)));
    assert!(matches!(
        training_error(|t| t.log_interval = 0),
        ValidationError::InvalidLogInterval(0)
    ));
}

#[test]
fn test_invalid_schedules() {
    let bad = [
        LrScheduleSpec::StepDecay { lr: 0.1, step_size: 0, gamma: 0.5 },
        LrScheduleSpec::StepDecay { lr: 0.1, step_size: 2, gamma: 0.0 },
        LrScheduleSpec::Cosine { lr_max: 0.01, lr_min: 0.1, t_max: 10 },
        LrScheduleSpec::Cosine { lr_max: 0.1, lr_min: 0.0, t_max: 0 },
        LrScheduleSpec::Piecewise { table: vec![] },
        LrScheduleSpec::Piecewise { table: vec![(0, 0.1), (3, -0.1)] },
    ];
    for schedule in bad {
        let mut spec = create_valid_spec();
        spec.callbacks.lr_schedule = Some(schedule.clone());
        assert!(
            matches!(validate_config(&spec), Err(ValidationError::InvalidLRSchedule(_))),
            "{schedule:?} should be rejected"
        );
    }

    let mut spec = create_valid_spec();
    spec.callbacks.lr_schedule = Some(LrScheduleSpec::Cosine {
        lr_max: 0.1,
        lr_min: 0.0,
        t_max: 10,
    });
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_callbacks() {
    let mut spec = create_valid_spec();
    spec.callbacks.checkpoint = Some(CheckpointSpec {
        dir: PathBuf::from("ckpt"),
        save_every: Some(0),
        save_best: true,
        monitor: None,
    });
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidSaveInterval(0))));

    let mut spec = create_valid_spec();
    spec.callbacks.early_stopping = Some(EarlyStoppingSpec {
        monitor: "loss".into(),
        patience: 2,
        min_delta: 0.0,
        mode: MonitorMode::Min,
        baseline: Some(f64::INFINITY),
        restore_best_weights: false,
        start_from_epoch: 0,
    });
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidBaseline(_))));
}

#[test]
fn test_error_messages() {
    let err = ValidationError::InvalidBatchSize(0);
    assert_eq!(err.to_string(), "Invalid batch size: 0 (must be > 0)");
    let err = ValidationError::FeatureMismatch { expected: 3, actual: 2 };
    assert_eq!(err.to_string(), "Model expects 3 features but the data has 2");
}
