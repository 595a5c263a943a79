//! Validation error types
//!
//! Defines all validation error variants for fit specifications.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Data section needs either `path` or `synthetic`")]
    MissingData,

    #[error("Data section sets both `path` and `synthetic`")]
    ConflictingData,

    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Validation data path does not exist: {0}")]
    ValDataNotFound(String),

    #[error("Invalid sample count: {0} (must be > 0)")]
    InvalidSamples(usize),

    #[error("Invalid noise amplitude: {0} (must be finite and >= 0.0)")]
    InvalidNoise(f64),

    #[error("Invalid feature count: {0} (must be > 0)")]
    InvalidFeatureCount(usize),

    #[error("Model expects {expected} features but the data has {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Initial model weights need {expected} values, got {actual}")]
    InvalidModelWeights { expected: usize, actual: usize },

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid optimizer: {0} (must be one of: sgd, adam)")]
    InvalidOptimizer(String),

    #[error("Invalid optimizer parameter {name}: {value}")]
    InvalidOptimizerParam { name: String, value: String },

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid initial epoch: {initial} (must be < epochs = {epochs})")]
    InvalidInitialEpoch { initial: usize, epochs: usize },

    #[error("Invalid validation split: {0} (must be in [0.0, 1.0))")]
    InvalidValidationSplit(f64),

    #[error("Invalid validation frequency: {0} (must be > 0)")]
    InvalidValidationFreq(usize),

    #[error("Invalid steps per epoch: {0} (must be > 0)")]
    InvalidStepsPerEpoch(usize),

    #[error("Invalid verbosity: {0} (must be 0, 1 or 2)")]
    InvalidVerbose(u8),

    #[error("Invalid log interval: {0} (must be > 0)")]
    InvalidLogInterval(usize),

    #[error("Invalid LR schedule: {0}")]
    InvalidLRSchedule(String),

    #[error("Invalid save interval: {0} (must be > 0)")]
    InvalidSaveInterval(usize),

    #[error("Invalid early stopping baseline: {0} (must be finite)")]
    InvalidBaseline(f64),
}
