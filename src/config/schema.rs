//! YAML schema definitions for declarative fit configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::train::MonitorMode;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

fn default_true() -> bool {
    true
}

/// Complete fit specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSpec {
    /// Model configuration
    #[serde(default)]
    pub model: ModelSpec,

    /// Data configuration
    pub data: DataSpec,

    /// Optimizer configuration
    pub optimizer: OptimSpec,

    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Callbacks to register, in this order
    #[serde(default)]
    pub callbacks: CallbacksSpec,
}

/// Model kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Least-squares linear regression
    #[default]
    Linear,
}

/// Model configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model kind
    #[serde(default)]
    pub kind: ModelKind,

    /// Input width; inferred from the data when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<usize>,

    /// Initial weights `[w.., b]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
}

/// Data configuration: either a CSV `path` or a `synthetic` generator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSpec {
    /// Training CSV; the last column is the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Optional validation CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_path: Option<PathBuf>,

    /// Whether the CSV files start with a header row
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_bool_lenient"
    )]
    pub has_headers: bool,

    /// Generate a linear dataset instead of reading a file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic: Option<SyntheticSpec>,
}

/// Parameters of `Dataset::synthetic_linear`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    /// True coefficients
    pub weights: Vec<f64>,

    /// True intercept
    #[serde(default)]
    pub bias: f64,

    /// Number of rows
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Uniform noise amplitude
    #[serde(default)]
    pub noise: f64,

    /// Generator seed
    #[serde(default)]
    pub seed: u64,
}

fn default_samples() -> usize {
    256
}

/// Optimizer specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "sgd" | "adam"
    pub name: String,

    /// Learning rate
    pub lr: f64,

    /// Optimizer-specific parameters (momentum, beta1, beta2, eps)
    #[serde(flatten)]
    pub params: HashMap<String, serde_json::Value>,
}

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Number of epochs
    #[serde(default = "default_epochs")]
    pub epochs: usize,

    /// Rows per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Reshuffle rows every epoch
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_bool_lenient"
    )]
    pub shuffle: bool,

    /// Shuffle seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Fraction of training rows held out when no validation file is given
    #[serde(default)]
    pub validation_split: f64,

    /// Validate every N epochs
    #[serde(default = "default_validation_freq")]
    pub validation_freq: usize,

    /// Cap on batches per epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_per_epoch: Option<usize>,

    /// Epoch to resume from
    #[serde(default)]
    pub initial_epoch: usize,

    /// 0 = silent, 1 = per-batch progress, 2 = one line per epoch
    #[serde(default = "default_verbose")]
    pub verbose: u8,

    /// Progress line every N batches
    #[serde(default = "default_log_interval")]
    pub log_interval: usize,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            shuffle: true,
            seed: default_seed(),
            validation_split: 0.0,
            validation_freq: default_validation_freq(),
            steps_per_epoch: None,
            initial_epoch: 0,
            verbose: default_verbose(),
            log_interval: default_log_interval(),
        }
    }
}

fn default_epochs() -> usize {
    10
}

fn default_batch_size() -> usize {
    32
}

fn default_seed() -> u64 {
    42
}

fn default_validation_freq() -> usize {
    1
}

fn default_verbose() -> u8 {
    2
}

fn default_log_interval() -> usize {
    10
}

/// Callback section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallbacksSpec {
    /// Stop when a monitored value plateaus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_stopping: Option<EarlyStoppingSpec>,

    /// Learning rate schedule applied at each epoch begin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lr_schedule: Option<LrScheduleSpec>,

    /// Weight checkpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<CheckpointSpec>,

    /// Per-epoch CSV log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_log: Option<CsvLogSpec>,

    /// Stop on a NaN or infinite loss
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub terminate_on_nan: bool,
}

/// Early stopping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyStoppingSpec {
    /// Log key to monitor
    #[serde(default = "default_monitor")]
    pub monitor: String,

    /// Epochs without improvement before stopping
    #[serde(default)]
    pub patience: usize,

    /// Minimum change that counts as improvement
    #[serde(default)]
    pub min_delta: f64,

    /// Improvement direction
    #[serde(default)]
    pub mode: MonitorMode,

    /// Value the monitored key has to beat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,

    /// Restore the best epoch's weights when stopping
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub restore_best_weights: bool,

    /// Ignore epochs before this one
    #[serde(default)]
    pub start_from_epoch: usize,
}

fn default_monitor() -> String {
    "val_loss".to_string()
}

/// Learning rate schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LrScheduleSpec {
    /// `lr * gamma^(epoch / step_size)`
    StepDecay {
        /// Learning rate at epoch 0
        lr: f64,
        /// Epochs between decays
        step_size: usize,
        /// Decay factor
        gamma: f64,
    },
    /// Cosine annealing from `lr_max` to `lr_min` over `t_max` epochs
    Cosine {
        /// Starting learning rate
        lr_max: f64,
        /// Final learning rate
        #[serde(default)]
        lr_min: f64,
        /// Epochs to anneal over
        t_max: usize,
    },
    /// Explicit `(epoch, lr)` table
    Piecewise {
        /// Learning rate changes keyed by epoch
        table: Vec<(usize, f64)>,
    },
}

/// Checkpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSpec {
    /// Output directory
    pub dir: PathBuf,

    /// Save every N epochs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_every: Option<usize>,

    /// Save whenever the monitored value improves
    #[serde(
        default = "default_true",
        deserialize_with = "deserialize_bool_lenient"
    )]
    pub save_best: bool,

    /// Key to monitor; `val_loss` falling back to `loss` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
}

/// CSV log settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvLogSpec {
    /// Output file
    pub path: PathBuf,

    /// Append to an existing file instead of truncating it
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub append: bool,
}
